//! Running counters fed by the allocation engine.

use serde::{Deserialize, Serialize};

/// Accumulated statistics of a run.
///
/// Only the engine writes to these counters. Per-block occupancy and
/// assignment counts live on [`Block`](crate::models::Block).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsAggregator {
    /// Sum of sampled waiting-queue lengths.
    pub queue_length_sum: u64,
    /// Number of queue-length samples (one per tick).
    pub queue_length_samples: u64,
    /// Largest sampled waiting-queue length.
    pub queue_length_max: usize,
    /// Sum of `start - arrival` over started jobs.
    pub wait_time_sum: u64,
    /// Number of jobs that left the queue for a block.
    pub jobs_started: u64,
    /// Sum of wasted bytes over sampled ticks (`u128`: sums of `u64` capacities).
    pub fragmentation_bytes_sum: u128,
    /// Sum of occupied capacity over sampled ticks.
    pub occupied_capacity_sum: u128,
    /// Ticks with at least one occupied block.
    pub fragmentation_samples: u64,
}

impl MetricsAggregator {
    /// Creates an empty aggregator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the waiting-queue length at the start of placement.
    pub fn record_queue_length(&mut self, len: usize) {
        self.queue_length_sum += len as u64;
        self.queue_length_samples += 1;
        self.queue_length_max = self.queue_length_max.max(len);
    }

    /// Records a job leaving the queue after `wait` ticks.
    pub fn record_start(&mut self, wait: u64) {
        self.wait_time_sum += wait;
        self.jobs_started += 1;
    }

    /// Records one tick's internal fragmentation.
    ///
    /// Ticks where nothing is occupied are skipped so they do not drag the
    /// average towards zero.
    pub fn record_fragmentation(&mut self, wasted: u128, occupied_capacity: u128) {
        if occupied_capacity == 0 {
            return;
        }
        self.fragmentation_bytes_sum += wasted;
        self.occupied_capacity_sum += occupied_capacity;
        self.fragmentation_samples += 1;
    }

    /// Mean waiting-queue length.
    pub fn avg_queue_length(&self) -> f64 {
        ratio(self.queue_length_sum.into(), self.queue_length_samples.into())
    }

    /// Mean time spent waiting by started jobs.
    pub fn avg_wait_time(&self) -> f64 {
        ratio(self.wait_time_sum.into(), self.jobs_started.into())
    }

    /// Mean wasted bytes per sampled tick.
    pub fn avg_fragmentation_bytes(&self) -> f64 {
        ratio(self.fragmentation_bytes_sum, self.fragmentation_samples.into())
    }

    /// Wasted bytes as a percentage of occupied capacity.
    pub fn fragmentation_percent(&self) -> f64 {
        ratio(self.fragmentation_bytes_sum, self.occupied_capacity_sum) * 100.0
    }
}

fn ratio(num: u128, den: u128) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}
