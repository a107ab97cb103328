//! Scheduling engine and plan metrics.
//!
//! Maps (task snapshot, algorithm, parameters) to an [`ExecutionPlan`].
//! Every call is a one-shot pure computation: tasks are borrowed, never
//! mutated, and the plan is freshly allocated.
//!
//! # Algorithms
//!
//! | Algorithm | Order | Clock rule |
//! |-----------|-------|------------|
//! | Priority | priority, then creation | back to back from t=0 |
//! | FCFS | arrival, then creation | idle until arrival when ahead |
//! | SJF | duration, then creation | back to back from t=0 (ignores arrival) |
//! | Round-robin | input order, FIFO | back to back, one quantum per turn |
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", Ch. 2.4

mod kpi;
mod round_robin;
mod sequential;

pub use kpi::{PlanMetrics, TaskMetrics};

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

use crate::dispatching::{rules, RuleEngine};
use crate::error::{Error, Result};
use crate::models::{ExecutionPlan, Task};
use crate::validation::validate_quantum;

/// Default round-robin time slice.
pub const DEFAULT_QUANTUM: i64 = 2;

/// Scheduling algorithm selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// Static priority, non-preemptive.
    #[default]
    Priority,
    /// First come, first served.
    Fcfs,
    /// Shortest job first, non-preemptive.
    Sjf,
    /// Fixed-quantum round-robin.
    RoundRobin,
}

impl Algorithm {
    /// All algorithms, in presentation order.
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Priority,
        Algorithm::Fcfs,
        Algorithm::Sjf,
        Algorithm::RoundRobin,
    ];

    /// Resolves a selector key, or `None` if it is not recognized.
    pub fn try_from_key(key: &str) -> Option<Self> {
        match key {
            "priority" => Some(Self::Priority),
            "fcfs" => Some(Self::Fcfs),
            "sjf" => Some(Self::Sjf),
            "round_robin" => Some(Self::RoundRobin),
            _ => None,
        }
    }

    /// Resolves a selector key.
    ///
    /// Unknown keys fall back to [`Algorithm::Priority`]. This is a
    /// compatibility contract with existing callers, not an error.
    pub fn from_key(key: &str) -> Self {
        Self::try_from_key(key).unwrap_or_else(|| {
            warn!(key, "unknown scheduling algorithm, falling back to priority");
            Self::Priority
        })
    }

    /// Selector key (`"priority"`, `"fcfs"`, `"sjf"`, `"round_robin"`).
    pub fn key(&self) -> &'static str {
        match self {
            Self::Priority => "priority",
            Self::Fcfs => "fcfs",
            Self::Sjf => "sjf",
            Self::RoundRobin => "round_robin",
        }
    }

    /// Scheduler label reported to the presentation layer.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Priority => "PriorityScheduler",
            Self::Fcfs => "FCFSScheduler",
            Self::Sjf => "SJFScheduler",
            Self::RoundRobin => "RoundRobinScheduler",
        }
    }

    /// Whether the algorithm interleaves tasks.
    pub fn is_preemptive(&self) -> bool {
        matches!(self, Self::RoundRobin)
    }

    /// Ordering used by the non-preemptive algorithms.
    ///
    /// Returns `None` for round-robin, which keeps input order.
    pub fn rule_engine(&self) -> Option<RuleEngine> {
        let engine = match self {
            Self::Priority => RuleEngine::new().with_rule(rules::PriorityLevel),
            Self::Fcfs => RuleEngine::new().with_rule(rules::ArrivalTime),
            Self::Sjf => RuleEngine::new().with_rule(rules::ShortestDuration),
            Self::RoundRobin => return None,
        };
        Some(engine.with_tie_breaker(rules::CreationOrder))
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Algorithm parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerParams {
    /// Round-robin time slice. Ignored by the other algorithms.
    #[serde(default = "default_quantum")]
    pub quantum: i64,
}

fn default_quantum() -> i64 {
    DEFAULT_QUANTUM
}

impl SchedulerParams {
    /// Creates parameters with the default quantum.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the round-robin quantum.
    pub fn with_quantum(mut self, quantum: i64) -> Self {
        self.quantum = quantum;
        self
    }

    /// Parses a raw quantum parameter.
    ///
    /// `None` keeps the default. Otherwise the trimmed value must be an
    /// integer of at least 1.
    pub fn parse_quantum(raw: Option<&str>) -> Result<Self> {
        let Some(raw) = raw else {
            return Ok(Self::default());
        };
        let quantum: i64 = raw
            .trim()
            .parse()
            .map_err(|_| Error::invalid_parameter("quantum", raw, "not an integer"))?;
        validate_quantum(quantum)
            .map_err(|e| Error::invalid_parameter("quantum", raw, e.message))?;
        Ok(Self::new().with_quantum(quantum))
    }

    /// Quantum actually used by round-robin (at least 1).
    pub fn effective_quantum(&self) -> i64 {
        if self.quantum < 1 {
            warn!(quantum = self.quantum, "non-positive quantum, clamping to 1");
            1
        } else {
            self.quantum
        }
    }
}

impl Default for SchedulerParams {
    fn default() -> Self {
        Self {
            quantum: DEFAULT_QUANTUM,
        }
    }
}

/// Produces the execution plan for `tasks` under `algorithm`.
///
/// Callers pass only pending tasks with `duration >= 1`. An empty slice
/// yields an empty plan with `total_time == 0`.
///
/// # Example
///
/// ```
/// use u_cpu_sched::models::Task;
/// use u_cpu_sched::scheduler::{schedule, Algorithm, SchedulerParams};
///
/// let tasks = vec![
///     Task::new(1).with_name("A").with_priority(2).with_duration(5),
///     Task::new(2).with_name("B").with_priority(1).with_duration(2),
/// ];
/// let plan = schedule(&tasks, Algorithm::Priority, &SchedulerParams::default());
/// assert_eq!(plan.entries[0].task.name, "B");
/// assert_eq!(plan.total_time, 7);
/// ```
pub fn schedule<'a>(
    tasks: &'a [Task],
    algorithm: Algorithm,
    params: &SchedulerParams,
) -> ExecutionPlan<'a> {
    debug!(%algorithm, tasks = tasks.len(), quantum = params.quantum, "scheduling");

    let plan = match algorithm.rule_engine() {
        Some(engine) => {
            let order = engine.sort(tasks);
            let honor_arrival = algorithm == Algorithm::Fcfs;
            sequential::run_to_completion(algorithm, order, honor_arrival)
        }
        None => round_robin::run(tasks, params.effective_quantum()),
    };

    debug!(
        %algorithm,
        entries = plan.len(),
        total_time = plan.total_time,
        "schedule computed"
    );
    plan
}

/// Resolves `key` (with priority fallback) and schedules.
pub fn schedule_by_key<'a>(
    tasks: &'a [Task],
    key: &str,
    params: &SchedulerParams,
) -> ExecutionPlan<'a> {
    schedule(tasks, Algorithm::from_key(key), params)
}
