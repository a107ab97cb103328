//! Run-to-completion scheduling for Priority, FCFS and SJF.
//!
//! # Algorithm
//!
//! 1. Take the tasks in the order chosen by the rule engine.
//! 2. Start the clock at 0.
//! 3. If arrival is honored and the task has not arrived yet, idle until it does.
//! 4. Run the task for its full duration and advance the clock.
//!
//! # Complexity
//! O(n) after sorting.

use crate::models::{ExecutionPlan, ScheduleEntry, Task};

use super::Algorithm;

/// Runs `order` back to back on one processor.
///
/// With `honor_arrival`, the clock jumps forward to a task's arrival time
/// when the processor would otherwise start it early.
pub(crate) fn run_to_completion<'a>(
    algorithm: Algorithm,
    order: Vec<&'a Task>,
    honor_arrival: bool,
) -> ExecutionPlan<'a> {
    let mut plan = ExecutionPlan::new(algorithm);
    let mut clock: i64 = 0;

    for task in order {
        if honor_arrival && task.arrival_time > clock {
            clock = task.arrival_time;
        }
        plan.push(ScheduleEntry::new(task, clock, task.duration));
        clock = clock.saturating_add(task.duration);
    }

    plan
}
