//! Ready-made workloads.
//!
//! `classroom` is the 25-job / 10-partition exercise used to contrast
//! First-Fit with Best-Fit. `random_jobs` builds seeded synthetic
//! workloads for experiments and tests.

use std::ops::RangeInclusive;

use rand::Rng;

use crate::engine::SimulationRequest;
use crate::models::{BlockId, JobId, JobSpec};
use crate::placement::PolicyKind;

/// Classroom workload as `(id, duration, demand)`.
pub const CLASSROOM_JOBS: [(JobId, u32, u64); 25] = [
    (1, 5, 5760),
    (2, 4, 4190),
    (3, 8, 3290),
    (4, 2, 2030),
    (5, 2, 2550),
    (6, 6, 6990),
    (7, 8, 8940),
    (8, 10, 740),
    (9, 7, 3930),
    (10, 6, 6890),
    (11, 5, 6580),
    (12, 8, 3820),
    (13, 9, 9140),
    (14, 10, 420),
    (15, 10, 220),
    (16, 7, 7540),
    (17, 3, 3210),
    (18, 1, 1380),
    (19, 9, 9850),
    (20, 3, 3610),
    (21, 7, 7540),
    (22, 2, 2710),
    (23, 8, 8390),
    (24, 5, 5950),
    (25, 10, 760),
];

/// Classroom partitions as `(id, capacity)`.
pub const CLASSROOM_BLOCKS: [(BlockId, u64); 10] = [
    (1, 9500),
    (2, 7000),
    (3, 4500),
    (4, 8500),
    (5, 3000),
    (6, 9000),
    (7, 1000),
    (8, 5500),
    (9, 1500),
    (10, 500),
];

/// The classroom scenario under `policy`.
pub fn classroom(policy: PolicyKind) -> SimulationRequest {
    SimulationRequest::from_tuples(&CLASSROOM_JOBS, &CLASSROOM_BLOCKS).with_policy(policy)
}

/// Generates `count` jobs with ids `1..=count` and uniform duration/demand.
pub fn random_jobs<R: Rng>(
    rng: &mut R,
    count: usize,
    duration: RangeInclusive<u32>,
    demand: RangeInclusive<u64>,
) -> Vec<JobSpec> {
    (1..=count as JobId)
        .map(|id| {
            JobSpec::new(
                id,
                rng.random_range(duration.clone()),
                rng.random_range(demand.clone()),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_classroom_is_valid() {
        let req = classroom(PolicyKind::FirstFit);
        assert!(req.validate().is_ok());
        assert_eq!(req.jobs.len(), 25);
        assert_eq!(req.blocks.len(), 10);
        assert_eq!(req.max_capacity(), 9500);
    }

    #[test]
    fn test_random_jobs_in_range() {
        let mut rng = SmallRng::seed_from_u64(42);
        let jobs = random_jobs(&mut rng, 30, 2..=4, 100..=200);
        assert_eq!(jobs.len(), 30);
        assert_eq!(jobs[0].id, 1);
        assert_eq!(jobs[29].id, 30);
        assert!(jobs
            .iter()
            .all(|j| (2..=4).contains(&j.duration) && (100..=200).contains(&j.demand)));
    }

    #[test]
    fn test_random_jobs_seeded() {
        let a = random_jobs(&mut SmallRng::seed_from_u64(7), 10, 1..=10, 1..=9000);
        let b = random_jobs(&mut SmallRng::seed_from_u64(7), 10, 1..=10, 1..=9000);
        assert_eq!(a, b);
    }
}
