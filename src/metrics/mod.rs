//! Run metrics: running counters and on-demand summaries.
//!
//! # Counters
//!
//! `MetricsAggregator` collects queue-length samples, wait times and
//! internal fragmentation as the engine steps. It is never mutated from
//! outside the engine.
//!
//! # Summary
//!
//! `StatsSummary` turns the counters into throughput, averages, and a
//! per-block utilization breakdown.

mod aggregator;
mod summary;

pub use aggregator::MetricsAggregator;
pub use summary::{StatsSummary, TierBreakdown, UtilizationTier};
