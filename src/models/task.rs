//! Task model.
//!
//! A task is a single unit of CPU work: it needs `duration` time units of
//! processor time and may not start before `arrival_time`.
//!
//! # Time Representation
//! All times are integer time units relative to the simulation epoch (t=0).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque task identifier, assigned by the task store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub u64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TaskId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Lifecycle state of a task.
///
/// The scheduling engine only consumes [`TaskStatus::Pending`] tasks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Waiting to be scheduled.
    #[default]
    Pending,
    /// Picked by `execute_next` and currently running.
    Executing,
    /// Finished.
    Completed,
}

impl TaskStatus {
    /// Wire name (`"pending"`, `"executing"`, `"completed"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Executing => "executing",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A task to be scheduled on the single processor.
///
/// `sequence` is the creation order assigned by the store. Every ordering
/// algorithm uses it as the deterministic tie-breaker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique task identifier.
    pub id: TaskId,
    /// Human-readable name.
    pub name: String,
    /// Scheduling priority (lower = more important, 1 is highest).
    pub priority: i32,
    /// Total work required (time units, must be >= 1).
    pub duration: i64,
    /// Earliest start time (time units, >= 0).
    pub arrival_time: i64,
    /// Monotonic creation sequence number.
    pub sequence: u64,
    /// Lifecycle state.
    pub status: TaskStatus,
    /// Start time recorded when the task was picked for execution.
    pub start_time: Option<i64>,
    /// Completion time recorded when the task was completed.
    pub completion_time: Option<i64>,
}

impl Task {
    /// Creates a pending task with unit duration and top priority.
    pub fn new(id: u64) -> Self {
        Self {
            id: TaskId(id),
            name: String::new(),
            priority: 1,
            duration: 1,
            arrival_time: 0,
            sequence: id,
            status: TaskStatus::Pending,
            start_time: None,
            completion_time: None,
        }
    }

    /// Sets the task name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the scheduling priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the required work.
    pub fn with_duration(mut self, duration: i64) -> Self {
        self.duration = duration;
        self
    }

    /// Sets the arrival time.
    pub fn with_arrival_time(mut self, arrival_time: i64) -> Self {
        self.arrival_time = arrival_time;
        self
    }

    /// Sets the creation sequence number.
    pub fn with_sequence(mut self, sequence: u64) -> Self {
        self.sequence = sequence;
        self
    }

    /// Sets the lifecycle state.
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Whether the task is waiting to be scheduled.
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.status == TaskStatus::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_builder() {
        let task = Task::new(7)
            .with_name("compile")
            .with_priority(3)
            .with_duration(5)
            .with_arrival_time(2)
            .with_sequence(11);

        assert_eq!(task.id, TaskId(7));
        assert_eq!(task.name, "compile");
        assert_eq!(task.priority, 3);
        assert_eq!(task.duration, 5);
        assert_eq!(task.arrival_time, 2);
        assert_eq!(task.sequence, 11);
        assert!(task.is_pending());
        assert!(task.start_time.is_none());
    }

    #[test]
    fn test_task_defaults() {
        let task = Task::new(3);
        assert_eq!(task.priority, 1);
        assert_eq!(task.duration, 1);
        assert_eq!(task.arrival_time, 0);
        // Sequence follows the id unless set explicitly
        assert_eq!(task.sequence, 3);
    }

    #[test]
    fn test_status_wire_names() {
        assert_eq!(TaskStatus::Pending.as_str(), "pending");
        assert_eq!(TaskStatus::Executing.to_string(), "executing");
        let json = serde_json::to_string(&TaskStatus::Completed).unwrap();
        assert_eq!(json, "\"completed\"");
    }

    #[test]
    fn test_task_id_serializes_as_number() {
        let json = serde_json::to_value(Task::new(42)).unwrap();
        assert_eq!(json["id"], 42);
        assert_eq!(json["status"], "pending");
    }
}
