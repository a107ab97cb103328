//! Fixed-quantum round-robin.
//!
//! # Algorithm
//!
//! 1. Seed a FIFO ready queue with the tasks in input order (no sorting).
//! 2. Pop the head and run it for `min(quantum, remaining)`.
//! 3. Record the slice with the work left after it.
//! 4. Re-enqueue at the tail while work remains.
//!
//! Remaining work travels with the queue entry, so the borrowed tasks are
//! never written to.
//!
//! # Complexity
//! O(total_duration / quantum + n).

use std::collections::VecDeque;

use crate::models::{ExecutionPlan, ScheduleEntry, Task};

use super::Algorithm;

/// Runs round-robin over `tasks` with a quantum of at least 1.
pub(crate) fn run(tasks: &[Task], quantum: i64) -> ExecutionPlan<'_> {
    debug_assert!(quantum >= 1);

    let mut plan = ExecutionPlan::new(Algorithm::RoundRobin);
    let mut queue: VecDeque<(&Task, i64)> = tasks.iter().map(|t| (t, t.duration)).collect();
    let mut clock: i64 = 0;

    while let Some((task, remaining)) = queue.pop_front() {
        let slice = quantum.min(remaining);
        let left = remaining - slice;

        plan.push(ScheduleEntry::new(task, clock, slice).with_remaining(left));
        clock = clock.saturating_add(slice);

        if left > 0 {
            queue.push_back((task, left));
        }
    }

    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskId;

    fn make_task(id: u64, duration: i64) -> Task {
        Task::new(id).with_duration(duration)
    }

    #[test]
    fn test_single_task_sliced() {
        let tasks = vec![make_task(1, 5)];
        let plan = run(&tasks, 2);
        let durations: Vec<i64> = plan.entries.iter().map(|e| e.duration).collect();
        let remaining: Vec<Option<i64>> = plan.entries.iter().map(|e| e.remaining_time).collect();
        assert_eq!(durations, vec![2, 2, 1]);
        assert_eq!(remaining, vec![Some(3), Some(1), Some(0)]);
        assert_eq!(plan.total_time, 5);
    }

    #[test]
    fn test_interleaving_keeps_input_order() {
        // Priorities are ignored: input order seeds the queue
        let tasks = vec![
            make_task(1, 3).with_priority(5),
            make_task(2, 3).with_priority(1),
        ];
        let plan = run(&tasks, 2);
        let order: Vec<u64> = plan.entries.iter().map(|e| e.task.id.0).collect();
        assert_eq!(order, vec![1, 2, 1, 2]);
        assert_eq!(plan.task_completion_time(TaskId(1)), Some(5));
        assert_eq!(plan.task_completion_time(TaskId(2)), Some(6));
    }

    #[test]
    fn test_quantum_larger_than_all_durations() {
        let tasks = vec![make_task(1, 2), make_task(2, 1)];
        let plan = run(&tasks, 10);
        assert_eq!(plan.len(), 2);
        assert!(plan.entries.iter().all(|e| e.remaining_time == Some(0)));
        assert_eq!(plan.total_time, 3);
    }

    #[test]
    fn test_duplicate_ids_tracked_per_entry() {
        let tasks = vec![make_task(1, 2), make_task(1, 3)];
        let plan = run(&tasks, 2);
        assert_eq!(plan.busy_time(), 5);
        assert!(plan.entries.iter().all(|e| e.duration > 0));
    }

    #[test]
    fn test_empty() {
        let plan = run(&[], 2);
        assert!(plan.is_empty());
        assert_eq!(plan.total_time, 0);
    }
}
