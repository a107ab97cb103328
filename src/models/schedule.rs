//! Execution plan (solution) model.
//!
//! An execution plan is the ordered list of processor slots produced by one
//! scheduling run. Entries borrow the tasks they were computed from, so a
//! plan never outlives its task snapshot.

use serde::Serialize;
use std::collections::HashSet;

use super::{Task, TaskId};
use crate::scheduler::Algorithm;

/// A single processor slot in an execution plan.
///
/// Non-preemptive algorithms emit one entry per task. Round-robin emits one
/// entry per quantum slice and records the work left after the slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScheduleEntry<'a> {
    /// Source task (read-only).
    pub task: &'a Task,
    /// Slot start time.
    pub start_time: i64,
    /// Slot length (> 0).
    pub duration: i64,
    /// Work left on the task after this slot. Round-robin only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_time: Option<i64>,
}

impl<'a> ScheduleEntry<'a> {
    /// Creates a run-to-completion entry.
    pub fn new(task: &'a Task, start_time: i64, duration: i64) -> Self {
        Self {
            task,
            start_time,
            duration,
            remaining_time: None,
        }
    }

    /// Sets the remaining work (round-robin slices).
    pub fn with_remaining(mut self, remaining_time: i64) -> Self {
        self.remaining_time = Some(remaining_time);
        self
    }

    /// End of the slot (`start_time + duration`, saturating at `i64::MAX`).
    #[inline]
    pub fn completion_time(&self) -> i64 {
        self.start_time.saturating_add(self.duration)
    }

    /// Whether this slot finishes its task.
    #[inline]
    pub fn finishes_task(&self) -> bool {
        !matches!(self.remaining_time, Some(r) if r > 0)
    }
}

/// Ordered execution plan plus timing metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionPlan<'a> {
    /// Algorithm that produced the plan.
    pub algorithm: Algorithm,
    /// Slots in execution order.
    pub entries: Vec<ScheduleEntry<'a>>,
    /// Makespan: completion time of the last entry (0 when empty).
    pub total_time: i64,
}

impl<'a> ExecutionPlan<'a> {
    /// Creates an empty plan.
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            entries: Vec::new(),
            total_time: 0,
        }
    }

    /// Appends an entry and advances the makespan.
    pub fn push(&mut self, entry: ScheduleEntry<'a>) {
        self.total_time = self.total_time.max(entry.completion_time());
        self.entries.push(entry);
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the plan has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries for a given task, in execution order.
    pub fn entries_for_task(&self, task_id: TaskId) -> Vec<&ScheduleEntry<'a>> {
        self.entries
            .iter()
            .filter(|e| e.task.id == task_id)
            .collect()
    }

    /// First time the task touches the processor.
    pub fn task_first_start(&self, task_id: TaskId) -> Option<i64> {
        self.entries
            .iter()
            .find(|e| e.task.id == task_id)
            .map(|e| e.start_time)
    }

    /// Completion time for a task (end of its last slot).
    pub fn task_completion_time(&self, task_id: TaskId) -> Option<i64> {
        self.entries_for_task(task_id)
            .iter()
            .map(|e| e.completion_time())
            .max()
    }

    /// Total processor time covered by entries.
    pub fn busy_time(&self) -> i64 {
        self.entries
            .iter()
            .fold(0i64, |busy, e| busy.saturating_add(e.duration))
    }

    /// Distinct tasks in order of first appearance.
    pub fn task_order(&self) -> Vec<TaskId> {
        let mut seen = HashSet::new();
        self.entries
            .iter()
            .map(|e| e.task.id)
            .filter(|id| seen.insert(*id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tasks() -> Vec<Task> {
        vec![
            Task::new(1).with_name("A").with_duration(3),
            Task::new(2).with_name("B").with_duration(2),
        ]
    }

    fn sample_plan(tasks: &[Task]) -> ExecutionPlan<'_> {
        let mut plan = ExecutionPlan::new(Algorithm::RoundRobin);
        plan.push(ScheduleEntry::new(&tasks[0], 0, 2).with_remaining(1));
        plan.push(ScheduleEntry::new(&tasks[1], 2, 2).with_remaining(0));
        plan.push(ScheduleEntry::new(&tasks[0], 4, 1).with_remaining(0));
        plan
    }

    #[test]
    fn test_plan_total_time() {
        let tasks = sample_tasks();
        let plan = sample_plan(&tasks);
        assert_eq!(plan.total_time, 5);
        assert_eq!(plan.len(), 3);
        assert_eq!(plan.busy_time(), 5);
    }

    #[test]
    fn test_entry_completion() {
        let tasks = sample_tasks();
        let e = ScheduleEntry::new(&tasks[0], 4, 3);
        assert_eq!(e.completion_time(), 7);
        assert!(e.finishes_task());
        assert!(!e.with_remaining(2).finishes_task());
    }

    #[test]
    fn test_task_queries() {
        let tasks = sample_tasks();
        let plan = sample_plan(&tasks);
        assert_eq!(plan.entries_for_task(TaskId(1)).len(), 2);
        assert_eq!(plan.task_first_start(TaskId(1)), Some(0));
        assert_eq!(plan.task_completion_time(TaskId(1)), Some(5));
        assert_eq!(plan.task_completion_time(TaskId(2)), Some(4));
        assert_eq!(plan.task_completion_time(TaskId(99)), None);
        assert_eq!(plan.task_order(), vec![TaskId(1), TaskId(2)]);
    }

    #[test]
    fn test_completion_saturates() {
        let tasks = vec![Task::new(1).with_duration(i64::MAX)];
        let e = ScheduleEntry::new(&tasks[0], 5, i64::MAX);
        assert_eq!(e.completion_time(), i64::MAX);

        let mut plan = ExecutionPlan::new(Algorithm::Priority);
        plan.push(ScheduleEntry::new(&tasks[0], 0, i64::MAX));
        plan.push(e);
        assert_eq!(plan.total_time, i64::MAX);
        assert_eq!(plan.busy_time(), i64::MAX);
    }

    #[test]
    fn test_empty_plan() {
        let plan = ExecutionPlan::new(Algorithm::Priority);
        assert!(plan.is_empty());
        assert_eq!(plan.total_time, 0);
        assert_eq!(plan.busy_time(), 0);
    }

    #[test]
    fn test_remaining_time_only_serialized_when_present() {
        let tasks = sample_tasks();
        let plain = serde_json::to_value(ScheduleEntry::new(&tasks[0], 0, 3)).unwrap();
        assert!(plain.get("remaining_time").is_none());
        let slice = serde_json::to_value(ScheduleEntry::new(&tasks[0], 0, 2).with_remaining(1))
            .unwrap();
        assert_eq!(slice["remaining_time"], 1);
        assert_eq!(slice["task"]["name"], "A");
    }
}
