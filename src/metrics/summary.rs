//! Run statistics snapshot.
//!
//! Computed on demand from the aggregator's counters and the per-block
//! usage counters. Never re-walks the run history, so it is cheap to take
//! mid-run.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Throughput | Completed jobs / elapsed ticks |
//! | Avg Queue Length | Mean waiting-queue size, sampled before placement |
//! | Avg Wait | Mean (start - arrival) over started jobs |
//! | Avg Fragmentation | Mean wasted bytes per tick with ≥1 occupied block |
//! | Fragmentation % | Wasted bytes / occupied capacity |
//! | Block Utilization % | Occupied block-ticks / (elapsed × blocks) |
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 9.2.3: Fragmentation

use serde::{Deserialize, Serialize};

use super::MetricsAggregator;
use crate::models::{Block, Tick};

/// Usage tier of a block, by share of elapsed ticks spent occupied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UtilizationTier {
    /// Never hosted a job.
    NeverUsed,
    /// Occupied less than 20% of the time.
    Light,
    /// Occupied 20% to 80% of the time.
    Moderate,
    /// Occupied at least 80% of the time.
    Heavy,
}

impl UtilizationTier {
    /// All tiers, lightest first.
    pub const ALL: [UtilizationTier; 4] = [
        UtilizationTier::NeverUsed,
        UtilizationTier::Light,
        UtilizationTier::Moderate,
        UtilizationTier::Heavy,
    ];

    /// Lower bound of the moderate tier (fraction of elapsed ticks).
    pub const MODERATE_THRESHOLD: f64 = 0.2;
    /// Lower bound of the heavy tier (fraction of elapsed ticks).
    pub const HEAVY_THRESHOLD: f64 = 0.8;

    /// Classifies a block after `elapsed` ticks.
    ///
    /// A block that was assigned at least once is never `NeverUsed`, even if
    /// it has not yet accrued an occupied tick.
    pub fn classify(block: &Block, elapsed: Tick) -> Self {
        if block.assignments == 0 {
            return UtilizationTier::NeverUsed;
        }
        let frac = if elapsed == 0 {
            0.0
        } else {
            block.occupied_ticks as f64 / elapsed as f64
        };
        if frac >= Self::HEAVY_THRESHOLD {
            UtilizationTier::Heavy
        } else if frac >= Self::MODERATE_THRESHOLD {
            UtilizationTier::Moderate
        } else {
            UtilizationTier::Light
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            UtilizationTier::NeverUsed => "never used",
            UtilizationTier::Light => "lightly used (<20% time)",
            UtilizationTier::Moderate => "moderately used (20-80% time)",
            UtilizationTier::Heavy => "heavily used (>=80% time)",
        }
    }
}

/// Number and share of blocks in one tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierBreakdown {
    pub tier: UtilizationTier,
    pub count: usize,
    /// Share of all blocks (0.0..=100.0).
    pub percent: f64,
}

/// Statistics of a run so far.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsSummary {
    /// Ticks executed.
    pub elapsed_ticks: Tick,
    /// Jobs that finished service.
    pub jobs_completed: usize,
    /// Jobs rejected at admission.
    pub jobs_rejected: usize,
    /// Jobs that were placed into a block.
    pub jobs_started: u64,
    /// Completed jobs per tick.
    pub throughput: f64,
    /// Mean waiting-queue length.
    pub avg_queue_length: f64,
    /// Largest waiting-queue length.
    pub max_queue_length: usize,
    /// Mean ticks spent waiting by started jobs.
    pub avg_wait_time: f64,
    /// Mean wasted bytes per tick with at least one occupied block.
    pub avg_fragmentation_bytes: f64,
    /// Wasted bytes as a percentage of occupied capacity.
    pub fragmentation_percent: f64,
    /// Occupied block-ticks as a percentage of available block-ticks.
    pub block_utilization_percent: f64,
    /// Blocks per usage tier, in [`UtilizationTier::ALL`] order.
    pub tiers: Vec<TierBreakdown>,
}

impl StatsSummary {
    /// Computes a summary from the run's counters.
    ///
    /// # Arguments
    /// * `metrics` - Counters accumulated by the engine.
    /// * `blocks` - Block table with per-block usage counters.
    /// * `elapsed` - Ticks executed so far.
    /// * `completed` / `rejected` - Job outcome counts.
    pub fn calculate(
        metrics: &MetricsAggregator,
        blocks: &[Block],
        elapsed: Tick,
        completed: usize,
        rejected: usize,
    ) -> Self {
        let throughput = if elapsed == 0 {
            0.0
        } else {
            completed as f64 / elapsed as f64
        };

        let occupied_ticks: u64 = blocks.iter().map(|b| b.occupied_ticks).sum();
        let available = elapsed * blocks.len() as u64;
        let block_utilization_percent = if available == 0 {
            0.0
        } else {
            occupied_ticks as f64 * 100.0 / available as f64
        };

        let mut counts = [0usize; 4];
        for block in blocks {
            let tier = UtilizationTier::classify(block, elapsed);
            counts[tier as usize] += 1;
        }
        let tiers = UtilizationTier::ALL
            .iter()
            .map(|&tier| {
                let count = counts[tier as usize];
                let percent = if blocks.is_empty() {
                    0.0
                } else {
                    count as f64 * 100.0 / blocks.len() as f64
                };
                TierBreakdown {
                    tier,
                    count,
                    percent,
                }
            })
            .collect();

        Self {
            elapsed_ticks: elapsed,
            jobs_completed: completed,
            jobs_rejected: rejected,
            jobs_started: metrics.jobs_started,
            throughput,
            avg_queue_length: metrics.avg_queue_length(),
            max_queue_length: metrics.queue_length_max,
            avg_wait_time: metrics.avg_wait_time(),
            avg_fragmentation_bytes: metrics.avg_fragmentation_bytes(),
            fragmentation_percent: metrics.fragmentation_percent(),
            block_utilization_percent,
            tiers,
        }
    }

    /// Breakdown for a single tier.
    pub fn tier(&self, tier: UtilizationTier) -> TierBreakdown {
        self.tiers
            .iter()
            .copied()
            .find(|t| t.tier == tier)
            .unwrap_or(TierBreakdown {
                tier,
                count: 0,
                percent: 0.0,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BlockSpec;

    fn block(id: u32, occupied_ticks: u64, assignments: u64) -> Block {
        let mut b = Block::new(&BlockSpec::new(id, 100));
        b.occupied_ticks = occupied_ticks;
        b.assignments = assignments;
        b
    }

    #[test]
    fn test_classify() {
        assert_eq!(
            UtilizationTier::classify(&block(1, 0, 0), 10),
            UtilizationTier::NeverUsed
        );
        assert_eq!(
            UtilizationTier::classify(&block(1, 1, 1), 10),
            UtilizationTier::Light
        );
        assert_eq!(
            UtilizationTier::classify(&block(1, 2, 1), 10),
            UtilizationTier::Moderate
        );
        assert_eq!(
            UtilizationTier::classify(&block(1, 7, 2), 10),
            UtilizationTier::Moderate
        );
        assert_eq!(
            UtilizationTier::classify(&block(1, 8, 2), 10),
            UtilizationTier::Heavy
        );
    }

    #[test]
    fn test_assigned_but_unaged_is_light() {
        // Placed on the last tick: assigned, but no occupied tick yet.
        assert_eq!(
            UtilizationTier::classify(&block(1, 0, 1), 5),
            UtilizationTier::Light
        );
    }

    #[test]
    fn test_summary_basic() {
        let mut m = MetricsAggregator::new();
        m.record_queue_length(1);
        m.record_queue_length(0);
        m.record_start(0);
        m.record_start(2);
        m.record_fragmentation(50, 100);

        let blocks = vec![block(1, 10, 2), block(2, 3, 1), block(3, 0, 0), block(4, 0, 0)];
        let s = StatsSummary::calculate(&m, &blocks, 10, 2, 1);

        assert_eq!(s.elapsed_ticks, 10);
        assert!((s.throughput - 0.2).abs() < 1e-10);
        assert!((s.avg_queue_length - 0.5).abs() < 1e-10);
        assert_eq!(s.max_queue_length, 1);
        assert!((s.avg_wait_time - 1.0).abs() < 1e-10);
        assert!((s.avg_fragmentation_bytes - 50.0).abs() < 1e-10);
        assert!((s.fragmentation_percent - 50.0).abs() < 1e-10);
        // 13 occupied block-ticks out of 40
        assert!((s.block_utilization_percent - 32.5).abs() < 1e-10);

        assert_eq!(s.tier(UtilizationTier::NeverUsed).count, 2);
        assert!((s.tier(UtilizationTier::NeverUsed).percent - 50.0).abs() < 1e-10);
        assert_eq!(s.tier(UtilizationTier::Moderate).count, 1);
        assert_eq!(s.tier(UtilizationTier::Heavy).count, 1);
        assert_eq!(s.tier(UtilizationTier::Light).count, 0);
    }

    #[test]
    fn test_summary_before_first_tick() {
        let blocks = vec![block(1, 0, 0)];
        let s = StatsSummary::calculate(&MetricsAggregator::new(), &blocks, 0, 0, 0);
        assert!((s.throughput - 0.0).abs() < 1e-10);
        assert!((s.block_utilization_percent - 0.0).abs() < 1e-10);
        assert_eq!(s.tier(UtilizationTier::NeverUsed).count, 1);
        assert_eq!(s.tiers.len(), 4);
    }
}
