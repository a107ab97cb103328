//! In-memory task store.
//!
//! Owns the task records, hands out identities and creation sequence
//! numbers, and drives the task lifecycle:
//!
//! ```text
//! pending --execute_next--> executing --complete--> completed
//!    ^                                                  |
//!    +---------------------- reset ---------------------+
//! ```
//!
//! Sequence numbers are a monotonic counter, never reused, so tie-breaking
//! on creation order is exact regardless of clock resolution.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::info;

use crate::error::{Error, Result};
use crate::models::{Task, TaskId, TaskStatus};
use crate::scheduler::{schedule_by_key, SchedulerParams};
use crate::validation::{validate_arrival, validate_duration, ValidationError};

/// Fields accepted when creating a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTask {
    /// Display name (required, non-empty).
    pub name: String,
    /// Priority (default 1).
    #[serde(default = "default_priority")]
    pub priority: i32,
    /// Duration (default 1).
    #[serde(default = "default_duration")]
    pub duration: i64,
    /// Arrival time (default 0).
    #[serde(default)]
    pub arrival_time: i64,
}

fn default_priority() -> i32 {
    1
}

fn default_duration() -> i64 {
    1
}

impl NewTask {
    /// Creates a request with default priority, duration and arrival.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            priority: default_priority(),
            duration: default_duration(),
            arrival_time: 0,
        }
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the duration.
    pub fn with_duration(mut self, duration: i64) -> Self {
        self.duration = duration;
        self
    }

    /// Sets the arrival time.
    pub fn with_arrival_time(mut self, arrival_time: i64) -> Self {
        self.arrival_time = arrival_time;
        self
    }
}

/// Partial update. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub priority: Option<i32>,
    #[serde(default)]
    pub duration: Option<i64>,
    #[serde(default)]
    pub arrival_time: Option<i64>,
    #[serde(default)]
    pub status: Option<TaskStatus>,
}

/// In-memory task store.
#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    tasks: BTreeMap<TaskId, Task>,
    next_id: u64,
    next_sequence: u64,
}

impl TaskStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tasks in any state.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the store holds no tasks.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Adds a pending task and returns it.
    pub fn create(&mut self, new: NewTask) -> Result<&Task> {
        check_name(&new.name)?;
        check_times(Some(new.duration), Some(new.arrival_time))?;

        self.next_id += 1;
        self.next_sequence += 1;
        let id = TaskId(self.next_id);

        let task = Task::new(id.0)
            .with_name(new.name)
            .with_priority(new.priority)
            .with_duration(new.duration)
            .with_arrival_time(new.arrival_time)
            .with_sequence(self.next_sequence);

        info!(task_id = %id, name = %task.name, "task created");
        Ok(&*self.tasks.entry(id).or_insert(task))
    }

    /// Looks up a task.
    pub fn get(&self, id: TaskId) -> Result<&Task> {
        self.tasks.get(&id).ok_or(Error::TaskNotFound(id))
    }

    /// All tasks in creation order.
    pub fn list(&self) -> Vec<&Task> {
        let mut tasks: Vec<&Task> = self.tasks.values().collect();
        tasks.sort_by_key(|t| t.sequence);
        tasks
    }

    /// Snapshot of pending tasks in creation order.
    ///
    /// The snapshot is what the scheduling engine borrows; later store
    /// mutations do not affect it.
    pub fn pending(&self) -> Vec<Task> {
        self.list()
            .into_iter()
            .filter(|t| t.is_pending())
            .cloned()
            .collect()
    }

    /// Applies a partial update.
    pub fn update(&mut self, id: TaskId, update: TaskUpdate) -> Result<&Task> {
        if let Some(name) = &update.name {
            check_name(name)?;
        }
        check_times(update.duration, update.arrival_time)?;

        let task = self.tasks.get_mut(&id).ok_or(Error::TaskNotFound(id))?;
        if let Some(name) = update.name {
            task.name = name;
        }
        if let Some(priority) = update.priority {
            task.priority = priority;
        }
        if let Some(duration) = update.duration {
            task.duration = duration;
        }
        if let Some(arrival) = update.arrival_time {
            task.arrival_time = arrival;
        }
        if let Some(status) = update.status {
            task.status = status;
        }

        info!(task_id = %id, "task updated");
        Ok(&*task)
    }

    /// Removes a task and returns it.
    pub fn delete(&mut self, id: TaskId) -> Result<Task> {
        let task = self.tasks.remove(&id).ok_or(Error::TaskNotFound(id))?;
        info!(task_id = %id, "task deleted");
        Ok(task)
    }

    /// Starts the task that `algorithm_key` would run first.
    ///
    /// Schedules the pending snapshot with default parameters, marks the
    /// head of the plan as executing and records its planned start time.
    pub fn execute_next(&mut self, algorithm_key: &str) -> Result<&Task> {
        let pending = self.pending();
        let (id, start) = {
            let plan = schedule_by_key(&pending, algorithm_key, &SchedulerParams::default());
            let head = plan.entries.first().ok_or(Error::NoPendingTasks)?;
            (head.task.id, head.start_time)
        };

        let task = self.tasks.get_mut(&id).ok_or(Error::TaskNotFound(id))?;
        task.status = TaskStatus::Executing;
        task.start_time = Some(start);

        info!(task_id = %id, name = %task.name, start, "executing task");
        Ok(&*task)
    }

    /// Marks a task completed.
    ///
    /// If the task was started and has no completion time yet, the
    /// completion time becomes `start_time + duration`.
    pub fn complete(&mut self, id: TaskId) -> Result<&Task> {
        let task = self.tasks.get_mut(&id).ok_or(Error::TaskNotFound(id))?;
        task.status = TaskStatus::Completed;
        if let (Some(start), None) = (task.start_time, task.completion_time) {
            task.completion_time = Some(start.saturating_add(task.duration));
        }

        info!(task_id = %id, name = %task.name, "task completed");
        Ok(&*task)
    }

    /// Puts every task back to pending and clears lifecycle times.
    pub fn reset(&mut self) {
        for task in self.tasks.values_mut() {
            task.status = TaskStatus::Pending;
            task.start_time = None;
            task.completion_time = None;
        }
        info!(tasks = self.tasks.len(), "all tasks reset to pending");
    }
}

fn check_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::InvalidTask("Task name is required".into()));
    }
    Ok(())
}

fn check_times(duration: Option<i64>, arrival_time: Option<i64>) -> Result<()> {
    let errors: Vec<ValidationError> = [
        duration.map(validate_duration),
        arrival_time.map(validate_arrival),
    ]
    .into_iter()
    .flatten()
    .filter_map(|check| check.err())
    .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors.into())
    }
}
