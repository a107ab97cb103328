//! Ordering rules and rule engine for the non-preemptive algorithms.
//!
//! Priority, FCFS and SJF differ only in how they order the ready set.
//! Each ordering is a chain of rules evaluated in sequence, with later rules
//! consulted only on ties.
//!
//! # Usage
//!
//! ```
//! use u_cpu_sched::dispatching::RuleEngine;
//! use u_cpu_sched::dispatching::rules;
//! use u_cpu_sched::models::Task;
//!
//! let engine = RuleEngine::new()
//!     .with_rule(rules::ArrivalTime)
//!     .with_tie_breaker(rules::CreationOrder);
//!
//! let tasks = vec![
//!     Task::new(1).with_arrival_time(4),
//!     Task::new(2).with_arrival_time(0),
//! ];
//! let order = engine.sort_indices(&tasks);
//! assert_eq!(order, vec![1, 0]);
//! ```
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Haupt (1989), "A Survey of Priority Rule-Based Scheduling"

mod engine;
pub mod rules;

pub use engine::{RuleEngine, TieBreaker};

use crate::models::Task;
use std::fmt::Debug;

/// Sort key returned by an ordering rule.
///
/// Lower keys = scheduled first.
pub type RuleKey = i64;

/// An ordering rule that maps a task to an integer sort key.
///
/// # Key Convention
/// **Lower key = earlier in the plan.** Keys are integers so that ties are
/// exact and the resulting order is fully deterministic.
pub trait OrderingRule: Send + Sync + Debug {
    /// Rule name (e.g., "PRIORITY", "FCFS").
    fn name(&self) -> &'static str;

    /// Sort key for a task.
    fn key(&self, task: &Task) -> RuleKey;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
