//! Random workload generation.
//!
//! Produces reproducible task sets for demos and randomized checks. The same
//! seed and configuration always yield the same tasks.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::ops::RangeInclusive;

use crate::models::Task;

/// Configuration for a random task set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkloadGenerator {
    /// Number of tasks.
    pub count: usize,
    /// Priority range (inclusive).
    pub priority: RangeInclusive<i32>,
    /// Duration range (inclusive, lower bound clamped to 1).
    pub duration: RangeInclusive<i64>,
    /// Arrival time range (inclusive, lower bound clamped to 0).
    pub arrival: RangeInclusive<i64>,
    /// RNG seed.
    pub seed: u64,
}

impl Default for WorkloadGenerator {
    fn default() -> Self {
        Self {
            count: 5,
            priority: 1..=5,
            duration: 1..=8,
            arrival: 0..=10,
            seed: 42,
        }
    }
}

impl WorkloadGenerator {
    /// Creates a generator for `count` tasks with default ranges.
    pub fn new(count: usize) -> Self {
        Self {
            count,
            ..Default::default()
        }
    }

    /// Sets the priority range.
    pub fn with_priority(mut self, range: RangeInclusive<i32>) -> Self {
        self.priority = range;
        self
    }

    /// Sets the duration range.
    pub fn with_duration(mut self, range: RangeInclusive<i64>) -> Self {
        self.duration = range;
        self
    }

    /// Sets the arrival range.
    pub fn with_arrival(mut self, range: RangeInclusive<i64>) -> Self {
        self.arrival = range;
        self
    }

    /// Sets the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Generates pending tasks with ids and sequence numbers `1..=count`.
    pub fn generate(&self) -> Vec<Task> {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let duration = clamp_low(&self.duration, 1);
        let arrival = clamp_low(&self.arrival, 0);

        (1..=self.count as u64)
            .map(|i| {
                Task::new(i)
                    .with_name(format!("P{i}"))
                    .with_priority(sample(&mut rng, &self.priority))
                    .with_duration(sample(&mut rng, &duration))
                    .with_arrival_time(sample(&mut rng, &arrival))
                    .with_sequence(i)
            })
            .collect()
    }
}

fn clamp_low(range: &RangeInclusive<i64>, floor: i64) -> RangeInclusive<i64> {
    let lo = (*range.start()).max(floor);
    let hi = (*range.end()).max(lo);
    lo..=hi
}

fn sample<T, R>(rng: &mut R, range: &RangeInclusive<T>) -> T
where
    T: Copy + PartialOrd + rand::distr::uniform::SampleUniform,
    R: Rng,
{
    if range.start() >= range.end() {
        *range.start()
    } else {
        rng.random_range(range.clone())
    }
}
