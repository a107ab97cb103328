//! Execution plan metrics.
//!
//! Computes the classic CPU-scheduling performance indicators from a plan.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Makespan | Completion time of the last slot |
//! | Idle Time | Makespan minus busy time |
//! | CPU Utilization | Busy time / makespan |
//! | Context Switches | Adjacent slots belonging to different tasks |
//! | Turnaround | completion - arrival |
//! | Waiting | turnaround - duration |
//! | Response | first start - arrival |
//!
//! Priority and SJF do not look at arrival times, so their turnaround,
//! waiting and response values can be negative for late-arriving tasks.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.2: Scheduling Criteria

use serde::Serialize;
use std::collections::HashMap;

use crate::models::{ExecutionPlan, TaskId};

use super::Algorithm;

/// Per-task timing indicators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskMetrics {
    /// Task identifier.
    pub task_id: TaskId,
    /// Task arrival time.
    pub arrival_time: i64,
    /// First time on the processor.
    pub first_start: i64,
    /// End of the task's last slot.
    pub completion_time: i64,
    /// completion - arrival.
    pub turnaround: i64,
    /// turnaround - duration.
    pub waiting: i64,
    /// first start - arrival.
    pub response: i64,
}

/// Plan performance indicators.
#[derive(Debug, Clone, Serialize)]
pub struct PlanMetrics {
    /// Algorithm that produced the plan.
    pub algorithm: Algorithm,
    /// Makespan.
    pub makespan: i64,
    /// Processor time covered by slots.
    pub busy_time: i64,
    /// Gaps inside the makespan.
    pub idle_time: i64,
    /// busy / makespan (0.0..1.0, 0.0 for an empty plan).
    pub cpu_utilization: f64,
    /// Number of task changes between adjacent slots.
    pub context_switches: usize,
    /// Per-task indicators in order of first appearance.
    pub tasks: Vec<TaskMetrics>,
    /// Mean turnaround.
    pub avg_turnaround: f64,
    /// Mean waiting time.
    pub avg_waiting: f64,
    /// Mean response time.
    pub avg_response: f64,
}

impl PlanMetrics {
    /// Computes metrics for a plan.
    pub fn calculate(plan: &ExecutionPlan<'_>) -> Self {
        let makespan = plan.total_time;
        let busy_time = plan.busy_time();

        let context_switches = plan
            .entries
            .windows(2)
            .filter(|w| w[0].task.id != w[1].task.id)
            .count();

        // One pass: first slot fixes arrival and first start, later slots
        // only push the completion time out.
        let mut tasks: Vec<TaskMetrics> = Vec::new();
        let mut durations: Vec<i64> = Vec::new();
        let mut index: HashMap<TaskId, usize> = HashMap::new();
        for entry in &plan.entries {
            let task = entry.task;
            match index.get(&task.id) {
                Some(&i) => {
                    let m = &mut tasks[i];
                    m.completion_time = m.completion_time.max(entry.completion_time());
                }
                None => {
                    index.insert(task.id, tasks.len());
                    durations.push(task.duration);
                    tasks.push(TaskMetrics {
                        task_id: task.id,
                        arrival_time: task.arrival_time,
                        first_start: entry.start_time,
                        completion_time: entry.completion_time(),
                        turnaround: 0,
                        waiting: 0,
                        response: entry.start_time.saturating_sub(task.arrival_time),
                    });
                }
            }
        }
        for (m, duration) in tasks.iter_mut().zip(durations) {
            m.turnaround = m.completion_time.saturating_sub(m.arrival_time);
            m.waiting = m.turnaround.saturating_sub(duration);
        }

        let cpu_utilization = if makespan <= 0 {
            0.0
        } else {
            busy_time as f64 / makespan as f64
        };

        Self {
            algorithm: plan.algorithm,
            makespan,
            busy_time,
            idle_time: makespan.saturating_sub(busy_time),
            cpu_utilization,
            context_switches,
            avg_turnaround: mean(tasks.iter().map(|t| t.turnaround)),
            avg_waiting: mean(tasks.iter().map(|t| t.waiting)),
            avg_response: mean(tasks.iter().map(|t| t.response)),
            tasks,
        }
    }

    /// Metrics for a single task.
    pub fn for_task(&self, task_id: TaskId) -> Option<&TaskMetrics> {
        self.tasks.iter().find(|t| t.task_id == task_id)
    }
}

fn mean(values: impl Iterator<Item = i64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(s, c), v| (s + v as f64, c + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}
