//! Side-by-side policy comparison.
//!
//! Runs every placement policy over the same workload and block set, each
//! in its own engine, and collects their final statistics.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::engine::{AllocationEngine, SimulationRequest};
use crate::error::SimError;
use crate::metrics::StatsSummary;
use crate::models::JobId;
use crate::placement::PolicyKind;

/// Outcome of one policy's run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyRun {
    pub policy: PolicyKind,
    /// Job ids in the order they were admitted.
    pub admission_order: Vec<JobId>,
    /// Final statistics.
    pub summary: StatsSummary,
}

/// Final statistics of every policy over one scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyComparison {
    /// One run per policy, in [`PolicyKind::ALL`] order.
    pub runs: Vec<PolicyRun>,
}

impl PolicyComparison {
    /// Runs every policy to completion over `request`'s jobs and blocks.
    ///
    /// The policy set on `request` is ignored.
    pub fn run(request: &SimulationRequest) -> Result<Self, SimError> {
        let mut runs = Vec::with_capacity(PolicyKind::ALL.len());
        for policy in PolicyKind::ALL {
            let mut engine = AllocationEngine::new(request.clone().with_policy(policy))?;
            engine.run_to_completion();
            let summary = engine.summary();
            info!(
                %policy,
                ticks = summary.elapsed_ticks,
                avg_wait = summary.avg_wait_time,
                fragmentation = summary.fragmentation_percent,
                "policy run complete"
            );
            runs.push(PolicyRun {
                policy,
                admission_order: engine.workload().iter().map(|j| j.id).collect(),
                summary,
            });
        }
        Ok(Self { runs })
    }

    /// The run for `policy`.
    pub fn get(&self, policy: PolicyKind) -> Option<&PolicyRun> {
        self.runs.iter().find(|r| r.policy == policy)
    }

    /// Policy with the lowest fragmentation percentage; `None` on a tie.
    pub fn least_fragmented(&self) -> Option<PolicyKind> {
        let mut best: Option<&PolicyRun> = None;
        let mut tied = false;
        for run in &self.runs {
            let pct = run.summary.fragmentation_percent;
            match best {
                Some(b) if (pct - b.summary.fragmentation_percent).abs() < 1e-9 => tied = true,
                Some(b) if pct > b.summary.fragmentation_percent => {}
                _ => {
                    best = Some(run);
                    tied = false;
                }
            }
        }
        if tied {
            None
        } else {
            best.map(|r| r.policy)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario;

    #[test]
    fn test_compare_two_blocks() {
        let request = SimulationRequest::from_tuples(&[(1, 2, 50)], &[(1, 100), (2, 60)]);
        let cmp = PolicyComparison::run(&request).unwrap();
        assert_eq!(cmp.runs.len(), 2);

        let ff = cmp.get(PolicyKind::FirstFit).unwrap();
        let bf = cmp.get(PolicyKind::BestFit).unwrap();
        assert!((ff.summary.fragmentation_percent - 50.0).abs() < 1e-10);
        assert!((bf.summary.fragmentation_percent - 10.0 * 100.0 / 60.0).abs() < 1e-10);
        assert_eq!(cmp.least_fragmented(), Some(PolicyKind::BestFit));
    }

    #[test]
    fn test_compare_tie() {
        let request = SimulationRequest::from_tuples(&[(1, 2, 50)], &[(1, 100)]);
        let cmp = PolicyComparison::run(&request).unwrap();
        assert_eq!(cmp.least_fragmented(), None);
    }

    #[test]
    fn test_compare_classroom_admission_orders_differ() {
        let cmp = PolicyComparison::run(&scenario::classroom(PolicyKind::FirstFit)).unwrap();
        let ff = &cmp.get(PolicyKind::FirstFit).unwrap().admission_order;
        let bf = &cmp.get(PolicyKind::BestFit).unwrap().admission_order;
        assert_eq!(ff[0], 1);
        // Smallest job (220 bytes) arrives first under Best-Fit.
        assert_eq!(bf[0], 15);
        assert_eq!(bf.last(), Some(&19));
        assert_ne!(ff, bf);
        for run in &cmp.runs {
            assert_eq!(run.summary.jobs_completed, 24);
            assert_eq!(run.summary.jobs_rejected, 1);
        }
    }

    #[test]
    fn test_compare_invalid() {
        let request = SimulationRequest::from_tuples(&[(1, 2, 50)], &[]);
        assert!(PolicyComparison::run(&request).is_err());
    }
}
