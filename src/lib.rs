//! Single-processor CPU scheduling engine.
//!
//! Computes deterministic execution plans for a snapshot of tasks under the
//! classic textbook algorithms and derives Gantt chart data from them.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Task`, `TaskId`, `TaskStatus`,
//!   `ScheduleEntry`, `ExecutionPlan`
//! - **`dispatching`**: Ordering rules and the rule engine behind the
//!   non-preemptive algorithms
//! - **`scheduler`**: `Algorithm`, `SchedulerParams`, `schedule()` and
//!   plan metrics
//! - **`gantt`**: Priority palette and chart payload
//! - **`validation`**: Input checks callers run before scheduling
//! - **`store`**: In-memory task store and task lifecycle
//! - **`request`**: Request parsing and response shaping
//! - **`workload`**: Seeded random task sets
//!
//! # Example
//!
//! ```
//! use u_cpu_sched::gantt::GanttChart;
//! use u_cpu_sched::models::Task;
//! use u_cpu_sched::scheduler::{schedule, Algorithm, SchedulerParams};
//!
//! let tasks = vec![
//!     Task::new(1).with_name("A").with_priority(2).with_duration(5),
//!     Task::new(2).with_name("B").with_priority(1).with_duration(2),
//! ];
//! let params = SchedulerParams::new().with_quantum(2);
//! let plan = schedule(&tasks, Algorithm::RoundRobin, &params);
//! assert_eq!(plan.len(), 4);
//! assert_eq!(plan.total_time, 7);
//!
//! let chart = GanttChart::from_plan(&plan);
//! assert_eq!(chart.algorithm, "RoundRobinScheduler");
//! ```
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", Ch. 2.4

pub mod dispatching;
pub mod error;
pub mod gantt;
pub mod models;
pub mod request;
pub mod scheduler;
pub mod store;
pub mod validation;
pub mod workload;

pub use error::{Error, Result};
