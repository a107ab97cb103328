//! Rule engine for multi-key task ordering.
//!
//! Composes ordering rules into a lexicographic comparison: the first rule
//! decides, each following rule only breaks ties left by the previous ones.

use std::cmp::Ordering;
use std::sync::Arc;

use super::{OrderingRule, RuleKey};
use crate::models::Task;

/// How ties are broken after all rules are exhausted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TieBreaker {
    /// Keep input order (stable sort).
    #[default]
    InputOrder,
    /// Deterministic by task ID.
    ById,
}

/// A composable rule engine for task ordering.
///
/// # Example
/// ```
/// use u_cpu_sched::dispatching::RuleEngine;
/// use u_cpu_sched::dispatching::rules;
///
/// let engine = RuleEngine::new()
///     .with_rule(rules::PriorityLevel)
///     .with_tie_breaker(rules::CreationOrder);
/// assert_eq!(engine.rule_names(), vec!["PRIORITY", "CREATED"]);
/// ```
#[derive(Clone, Default)]
pub struct RuleEngine {
    rules: Vec<Arc<dyn OrderingRule>>,
    tie_breaker: TieBreaker,
}

impl RuleEngine {
    /// Creates an empty rule engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a primary rule.
    pub fn with_rule<R: OrderingRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Adds a tie-breaking rule, consulted after all earlier rules tie.
    pub fn with_tie_breaker<R: OrderingRule + 'static>(self, rule: R) -> Self {
        self.with_rule(rule)
    }

    /// Sets the final tie-breaking strategy.
    pub fn with_final_tie_breaker(mut self, tie_breaker: TieBreaker) -> Self {
        self.tie_breaker = tie_breaker;
        self
    }

    /// Names of the configured rules, in evaluation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Sorts tasks (first to run first).
    ///
    /// Returns indices into the original task slice. The sort is stable, so
    /// full ties keep input order under [`TieBreaker::InputOrder`].
    pub fn sort_indices(&self, tasks: &[Task]) -> Vec<usize> {
        if tasks.is_empty() {
            return Vec::new();
        }

        // Precompute keys once per task: O(n * r) evaluations, O(n log n) compares.
        let keys: Vec<Vec<RuleKey>> = tasks.iter().map(|t| self.keys(t)).collect();

        let mut indices: Vec<usize> = (0..tasks.len()).collect();
        indices.sort_by(|&a, &b| {
            keys[a]
                .cmp(&keys[b])
                .then_with(|| self.final_tie_break(&tasks[a], &tasks[b]))
        });
        indices
    }

    /// Sorts tasks and returns references in run order.
    pub fn sort<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        self.sort_indices(tasks)
            .into_iter()
            .map(|i| &tasks[i])
            .collect()
    }

    /// Evaluates a single task and returns the key from each rule.
    pub fn keys(&self, task: &Task) -> Vec<RuleKey> {
        self.rules.iter().map(|r| r.key(task)).collect()
    }

    fn final_tie_break(&self, a: &Task, b: &Task) -> Ordering {
        match self.tie_breaker {
            TieBreaker::InputOrder => Ordering::Equal,
            TieBreaker::ById => a.id.cmp(&b.id),
        }
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field("rules", &self.rule_names())
            .field("tie_breaker", &self.tie_breaker)
            .finish()
    }
}
