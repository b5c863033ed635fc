//! Built-in placement rules.
//!
//! Both rules only consider empty blocks whose capacity covers the job's
//! demand, and both scan in ascending block id order.

use super::PlacementPolicy;
use crate::models::{Block, Job};

/// First-Fit.
///
/// Takes the first empty block, in ascending id order, that is large
/// enough. Fast, but tends to leave large holes in low-numbered blocks.
#[derive(Debug, Clone, Copy)]
pub struct FirstFit;

impl PlacementPolicy for FirstFit {
    fn name(&self) -> &'static str {
        "First-Fit"
    }

    fn select(&self, blocks: &[Block], job: &Job) -> Option<usize> {
        blocks.iter().position(|b| b.can_fit(job))
    }

    fn description(&self) -> &'static str {
        "Lowest-id empty block that fits"
    }
}

/// Best-Fit.
///
/// Takes the empty fitting block with the smallest `capacity - demand`.
/// On equal waste the earlier (lower id) block is kept.
#[derive(Debug, Clone, Copy)]
pub struct BestFit;

impl PlacementPolicy for BestFit {
    fn name(&self) -> &'static str {
        "Best-Fit"
    }

    fn select(&self, blocks: &[Block], job: &Job) -> Option<usize> {
        let mut best: Option<(usize, u64)> = None;
        for (i, block) in blocks.iter().enumerate() {
            if !block.can_fit(job) {
                continue;
            }
            let waste = block.capacity - job.demand;
            // Strict comparison keeps the lowest id among ties.
            let better = match best {
                None => true,
                Some((_, w)) => waste < w,
            };
            if better {
                best = Some((i, waste));
            }
        }
        best.map(|(i, _)| i)
    }

    fn description(&self) -> &'static str {
        "Empty block with the least leftover capacity"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BlockSpec, JobSpec};

    fn blocks(caps: &[(u32, u64)]) -> Vec<Block> {
        caps.iter()
            .map(|&(id, cap)| Block::new(&BlockSpec::new(id, cap)))
            .collect()
    }

    fn job(demand: u64) -> Job {
        Job::admit(&JobSpec::new(99, 1, demand), 0)
    }

    #[test]
    fn test_first_fit_lowest_id() {
        let bs = blocks(&[(1, 100), (2, 60), (3, 500)]);
        assert_eq!(FirstFit.select(&bs, &job(50)), Some(0));
        assert_eq!(FirstFit.select(&bs, &job(150)), Some(2));
    }

    #[test]
    fn test_first_fit_skips_occupied() {
        let mut bs = blocks(&[(1, 100), (2, 60)]);
        bs[0].load(0, &job(10));
        assert_eq!(FirstFit.select(&bs, &job(50)), Some(1));
        assert_eq!(FirstFit.select(&bs, &job(70)), None);
    }

    #[test]
    fn test_first_fit_exact_capacity() {
        let bs = blocks(&[(1, 50)]);
        assert_eq!(FirstFit.select(&bs, &job(50)), Some(0));
        assert_eq!(FirstFit.select(&bs, &job(51)), None);
    }

    #[test]
    fn test_best_fit_min_waste() {
        let bs = blocks(&[(1, 100), (2, 60), (3, 55)]);
        assert_eq!(BestFit.select(&bs, &job(50)), Some(2));
        assert_eq!(BestFit.select(&bs, &job(58)), Some(1));
    }

    #[test]
    fn test_best_fit_tie_lowest_id() {
        let bs = blocks(&[(1, 100), (2, 80), (3, 80)]);
        assert_eq!(BestFit.select(&bs, &job(70)), Some(1));
    }

    #[test]
    fn test_best_fit_skips_occupied() {
        let mut bs = blocks(&[(1, 100), (2, 60)]);
        bs[1].load(0, &job(10));
        assert_eq!(BestFit.select(&bs, &job(50)), Some(0));
    }

    #[test]
    fn test_no_block_fits() {
        let bs = blocks(&[(1, 100), (2, 60)]);
        assert_eq!(FirstFit.select(&bs, &job(9999)), None);
        assert_eq!(BestFit.select(&bs, &job(9999)), None);
        assert_eq!(FirstFit.select(&[], &job(1)), None);
        assert_eq!(BestFit.select(&[], &job(1)), None);
    }
}
