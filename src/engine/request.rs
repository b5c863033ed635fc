//! Setup input for a simulation run.

use serde::{Deserialize, Serialize};

use crate::models::{BlockId, BlockSpec, JobId, JobSpec};
use crate::placement::PolicyKind;
use crate::validation::{validate_input, ValidationResult};

/// Input container for a simulation run.
///
/// Each engine keeps its own copy, so one request can seed any number of
/// independent runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationRequest {
    /// Workload in declared order.
    pub jobs: Vec<JobSpec>,
    /// Memory blocks. Order is irrelevant; blocks are scanned by ascending id.
    pub blocks: Vec<BlockSpec>,
    /// Placement policy.
    #[serde(default)]
    pub policy: PolicyKind,
}

impl SimulationRequest {
    /// Creates a First-Fit request.
    pub fn new(jobs: Vec<JobSpec>, blocks: Vec<BlockSpec>) -> Self {
        Self {
            jobs,
            blocks,
            policy: PolicyKind::FirstFit,
        }
    }

    /// Builds a request from `(id, duration, demand)` and `(id, capacity)` tuples.
    pub fn from_tuples(jobs: &[(JobId, u32, u64)], blocks: &[(BlockId, u64)]) -> Self {
        Self::new(
            jobs.iter()
                .map(|&(id, duration, demand)| JobSpec::new(id, duration, demand))
                .collect(),
            blocks
                .iter()
                .map(|&(id, capacity)| BlockSpec::new(id, capacity))
                .collect(),
        )
    }

    /// Sets the placement policy.
    pub fn with_policy(mut self, policy: PolicyKind) -> Self {
        self.policy = policy;
        self
    }

    /// Appends a job to the workload.
    pub fn with_job(mut self, id: JobId, duration: u32, demand: u64) -> Self {
        self.jobs.push(JobSpec::new(id, duration, demand));
        self
    }

    /// Adds a memory block.
    pub fn with_block(mut self, id: BlockId, capacity: u64) -> Self {
        self.blocks.push(BlockSpec::new(id, capacity));
        self
    }

    /// Checks the request for configuration defects.
    pub fn validate(&self) -> ValidationResult {
        validate_input(&self.jobs, &self.blocks)
    }

    /// Largest configured block capacity (0 without blocks).
    pub fn max_capacity(&self) -> u64 {
        self.blocks.iter().map(|b| b.capacity).max().unwrap_or(0)
    }

    /// Workload in admission order for the selected policy.
    ///
    /// Best-Fit admits jobs by ascending demand (stable on ties); First-Fit
    /// keeps the declared order.
    pub fn admission_order(&self) -> Vec<JobSpec> {
        let mut jobs = self.jobs.clone();
        if self.policy.presorts_workload() {
            jobs.sort_by_key(|j| j.demand);
        }
        jobs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let req = SimulationRequest::new(Vec::new(), Vec::new())
            .with_job(1, 2, 50)
            .with_block(1, 100)
            .with_block(2, 60)
            .with_policy(PolicyKind::BestFit);

        assert_eq!(req.jobs, vec![JobSpec::new(1, 2, 50)]);
        assert_eq!(req.blocks.len(), 2);
        assert_eq!(req.policy, PolicyKind::BestFit);
        assert_eq!(req.max_capacity(), 100);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_admission_order_first_fit() {
        let req = SimulationRequest::from_tuples(&[(1, 1, 500), (2, 1, 100)], &[(1, 1000)]);
        let ids: Vec<_> = req.admission_order().iter().map(|j| j.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_admission_order_best_fit_stable() {
        let req = SimulationRequest::from_tuples(
            &[(1, 1, 500), (2, 1, 100), (3, 1, 300), (4, 1, 100)],
            &[(1, 1000)],
        )
        .with_policy(PolicyKind::BestFit);
        let ids: Vec<_> = req.admission_order().iter().map(|j| j.id).collect();
        assert_eq!(ids, vec![2, 4, 3, 1]);
        // Declared order is untouched.
        assert_eq!(req.jobs[0].id, 1);
    }

    #[test]
    fn test_serde_default_policy() {
        let json = r#"{
            "jobs": [{"id": 1, "duration": 2, "demand": 50}],
            "blocks": [{"id": 1, "capacity": 100}]
        }"#;
        let req: SimulationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.policy, PolicyKind::FirstFit);
        assert_eq!(req.jobs[0], JobSpec::new(1, 2, 50));

        let back = serde_json::to_string(&req.clone().with_policy(PolicyKind::BestFit)).unwrap();
        assert!(back.contains("\"best-fit\""));
    }
}
