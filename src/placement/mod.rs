//! Placement policies for fixed-partition allocation.
//!
//! A placement policy decides which empty block hosts a waiting job.
//! Policies are pure: they read the current block table and never mutate it.
//!
//! # Usage
//!
//! ```
//! use u_partition::models::{Block, BlockSpec, Job, JobSpec};
//! use u_partition::placement::{BestFit, FirstFit, PlacementPolicy};
//!
//! let blocks = vec![
//!     Block::new(&BlockSpec::new(1, 100)),
//!     Block::new(&BlockSpec::new(2, 60)),
//! ];
//! let job = Job::admit(&JobSpec::new(1, 2, 50), 0);
//!
//! assert_eq!(FirstFit.select(&blocks, &job), Some(0));
//! assert_eq!(BestFit.select(&blocks, &job), Some(1));
//! ```
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 9.2
//! - Knuth (1997), "The Art of Computer Programming", Vol. 1, §2.5

mod rules;

pub use rules::{BestFit, FirstFit};

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::models::{Block, Job};

/// A rule choosing the block that hosts a job.
///
/// `blocks` is in ascending id order; the returned value is an index into it.
pub trait PlacementPolicy: Send + Sync + Debug {
    /// Policy name (e.g., "First-Fit").
    fn name(&self) -> &'static str;

    /// Selects an empty block with enough capacity for `job`, if any.
    fn select(&self, blocks: &[Block], job: &Job) -> Option<usize>;

    /// Policy description.
    fn description(&self) -> &'static str {
        self.name()
    }
}

/// Serializable policy selector used in configuration.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum PolicyKind {
    /// Lowest-id empty block that fits.
    #[default]
    FirstFit,
    /// Empty block with the least leftover capacity.
    BestFit,
}

impl PolicyKind {
    /// Both policies, in comparison order.
    pub const ALL: [PolicyKind; 2] = [PolicyKind::FirstFit, PolicyKind::BestFit];

    /// Whether selecting this policy reorders the workload by demand at setup.
    ///
    /// Best-Fit runs admit jobs smallest-first; First-Fit keeps the declared
    /// order. Arrival order therefore differs between the two policies.
    pub fn presorts_workload(&self) -> bool {
        matches!(self, PolicyKind::BestFit)
    }

    fn rule(&self) -> &'static dyn PlacementPolicy {
        match self {
            PolicyKind::FirstFit => &FirstFit,
            PolicyKind::BestFit => &BestFit,
        }
    }
}

impl PlacementPolicy for PolicyKind {
    fn name(&self) -> &'static str {
        self.rule().name()
    }

    fn select(&self, blocks: &[Block], job: &Job) -> Option<usize> {
        self.rule().select(blocks, job)
    }

    fn description(&self) -> &'static str {
        self.rule().description()
    }
}

impl std::fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BlockSpec, JobSpec};

    #[test]
    fn test_kind_delegates() {
        let blocks = vec![
            Block::new(&BlockSpec::new(1, 100)),
            Block::new(&BlockSpec::new(2, 60)),
        ];
        let job = Job::admit(&JobSpec::new(1, 2, 50), 0);
        assert_eq!(PolicyKind::FirstFit.select(&blocks, &job), Some(0));
        assert_eq!(PolicyKind::BestFit.select(&blocks, &job), Some(1));
        assert_eq!(PolicyKind::FirstFit.name(), "First-Fit");
        assert_eq!(PolicyKind::BestFit.to_string(), "Best-Fit");
    }

    #[test]
    fn test_presort_only_best_fit() {
        assert!(!PolicyKind::FirstFit.presorts_workload());
        assert!(PolicyKind::BestFit.presorts_workload());
    }

    #[test]
    fn test_kind_serde() {
        let json = serde_json::to_string(&PolicyKind::BestFit).unwrap();
        assert_eq!(json, "\"best-fit\"");
        let kind: PolicyKind = serde_json::from_str("\"first-fit\"").unwrap();
        assert_eq!(kind, PolicyKind::FirstFit);
    }
}
