//! CPU scheduling domain models.
//!
//! Provides the input task record and the execution plan produced by the
//! scheduling engine.
//!
//! # Domain Mappings
//!
//! | u-cpu-sched | OS textbook | Original task board |
//! |-------------|-------------|---------------------|
//! | Task | Process / job | Task card |
//! | ScheduleEntry | CPU burst slot | Gantt bar |
//! | ExecutionPlan | Gantt chart | Timeline |

mod schedule;
mod task;

pub use schedule::{ExecutionPlan, ScheduleEntry};
pub use task::{Task, TaskId, TaskStatus};
