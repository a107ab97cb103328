//! Built-in ordering rules.
//!
//! | Rule | Key | Used by |
//! |------|-----|---------|
//! | `PriorityLevel` | priority (1 = highest) | Priority |
//! | `ArrivalTime` | arrival time | FCFS |
//! | `ShortestDuration` | total duration | SJF |
//! | `CreationOrder` | store sequence number | tie-breaker for all |
//!
//! All rules return lower keys for tasks that should run first.

use super::{OrderingRule, RuleKey};
use crate::models::Task;

/// Static priority.
///
/// Lower priority numbers run first (1 = highest).
#[derive(Debug, Clone, Copy)]
pub struct PriorityLevel;

impl OrderingRule for PriorityLevel {
    fn name(&self) -> &'static str {
        "PRIORITY"
    }

    fn key(&self, task: &Task) -> RuleKey {
        task.priority as RuleKey
    }

    fn description(&self) -> &'static str {
        "Lowest priority number first"
    }
}

/// First come, first served.
#[derive(Debug, Clone, Copy)]
pub struct ArrivalTime;

impl OrderingRule for ArrivalTime {
    fn name(&self) -> &'static str {
        "FCFS"
    }

    fn key(&self, task: &Task) -> RuleKey {
        task.arrival_time
    }

    fn description(&self) -> &'static str {
        "Earliest arrival first"
    }
}

/// Shortest job first.
///
/// Minimizes mean waiting time when all jobs are available at once.
///
/// # Reference
/// Smith (1956), optimal for minimizing mean flow time on a single machine.
#[derive(Debug, Clone, Copy)]
pub struct ShortestDuration;

impl OrderingRule for ShortestDuration {
    fn name(&self) -> &'static str {
        "SJF"
    }

    fn key(&self, task: &Task) -> RuleKey {
        task.duration
    }

    fn description(&self) -> &'static str {
        "Shortest Job First"
    }
}

/// Creation order.
///
/// Deterministic tie-breaker: tasks created earlier win.
#[derive(Debug, Clone, Copy)]
pub struct CreationOrder;

impl OrderingRule for CreationOrder {
    fn name(&self) -> &'static str {
        "CREATED"
    }

    fn key(&self, task: &Task) -> RuleKey {
        // Sequence numbers above i64::MAX never come out of the store.
        RuleKey::try_from(task.sequence).unwrap_or(RuleKey::MAX)
    }

    fn description(&self) -> &'static str {
        "Earliest created first"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_task(id: u64, priority: i32, duration: i64, arrival: i64) -> Task {
        Task::new(id)
            .with_priority(priority)
            .with_duration(duration)
            .with_arrival_time(arrival)
    }

    #[test]
    fn test_priority_level() {
        let high = make_task(1, 1, 5, 0);
        let low = make_task(2, 5, 5, 0);
        assert!(PriorityLevel.key(&high) < PriorityLevel.key(&low));
    }

    #[test]
    fn test_arrival_time() {
        let early = make_task(1, 3, 5, 0);
        let late = make_task(2, 1, 5, 8);
        assert!(ArrivalTime.key(&early) < ArrivalTime.key(&late));
    }

    #[test]
    fn test_shortest_duration() {
        let short = make_task(1, 5, 1, 0);
        let long = make_task(2, 1, 9, 0);
        assert!(ShortestDuration.key(&short) < ShortestDuration.key(&long));
    }

    #[test]
    fn test_creation_order() {
        let first = make_task(9, 1, 1, 0).with_sequence(1);
        let second = make_task(3, 1, 1, 0).with_sequence(2);
        assert!(CreationOrder.key(&first) < CreationOrder.key(&second));
        let huge = make_task(4, 1, 1, 0).with_sequence(u64::MAX);
        assert_eq!(CreationOrder.key(&huge), RuleKey::MAX);
    }

    #[test]
    fn test_rule_names() {
        assert_eq!(PriorityLevel.name(), "PRIORITY");
        assert_eq!(ArrivalTime.name(), "FCFS");
        assert_eq!(ShortestDuration.description(), "Shortest Job First");
        assert_eq!(CreationOrder.name(), "CREATED");
    }
}
