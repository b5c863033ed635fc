//! Memory block (fixed partition) model.
//!
//! A block has an immutable capacity and hosts at most one job at a time.
//! The occupant is stored as an index into the engine's job table rather
//! than a reference, so blocks and jobs can live in separate owned
//! collections.

use serde::{Deserialize, Serialize};

use super::{BlockId, Job};

/// Static description of a block, as supplied in the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockSpec {
    /// Unique block identifier. Ascending id order is the scan order.
    pub id: BlockId,
    /// Capacity in bytes.
    pub capacity: u64,
}

impl BlockSpec {
    /// Creates a block specification.
    pub fn new(id: BlockId, capacity: u64) -> Self {
        Self { id, capacity }
    }
}

/// A fixed partition and its running usage counters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    /// Unique block identifier.
    pub id: BlockId,
    /// Capacity in bytes.
    pub capacity: u64,
    /// Index of the hosted job in the engine's job table.
    pub(crate) occupant: Option<usize>,
    /// Demand of the hosted job (0 when empty).
    pub(crate) occupant_demand: u64,
    /// Ticks during which the block hosted a job.
    pub occupied_ticks: u64,
    /// Number of jobs ever placed into the block.
    pub assignments: u64,
}

impl Block {
    /// Creates an empty block from its specification.
    pub fn new(spec: &BlockSpec) -> Self {
        Self {
            id: spec.id,
            capacity: spec.capacity,
            occupant: None,
            occupant_demand: 0,
            occupied_ticks: 0,
            assignments: 0,
        }
    }

    /// Whether the block hosts no job.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.occupant.is_none()
    }

    /// Whether `job` could be placed here right now.
    #[inline]
    pub fn can_fit(&self, job: &Job) -> bool {
        self.is_empty() && job.demand <= self.capacity
    }

    /// Index of the hosted job in the engine's job table.
    #[inline]
    pub fn occupant(&self) -> Option<usize> {
        self.occupant
    }

    /// Internal fragmentation: capacity minus occupant demand, 0 if empty.
    #[inline]
    pub fn wasted(&self) -> u64 {
        if self.is_empty() {
            0
        } else {
            self.capacity - self.occupant_demand
        }
    }

    /// Places the job at `index` into this block.
    pub(crate) fn load(&mut self, index: usize, job: &Job) {
        debug_assert!(self.can_fit(job), "block {} cannot host job {}", self.id, job.id);
        self.occupant = Some(index);
        self.occupant_demand = job.demand;
        self.assignments += 1;
    }

    /// Clears the occupant.
    pub(crate) fn release(&mut self) {
        self.occupant = None;
        self.occupant_demand = 0;
    }

    /// Restores the block to its freshly created state.
    pub(crate) fn clear(&mut self) {
        self.release();
        self.occupied_ticks = 0;
        self.assignments = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::JobSpec;

    fn job(demand: u64) -> Job {
        Job::admit(&JobSpec::new(1, 1, demand), 0)
    }

    #[test]
    fn test_new_block_is_empty() {
        let b = Block::new(&BlockSpec::new(1, 100));
        assert!(b.is_empty());
        assert_eq!(b.wasted(), 0);
        assert_eq!(b.assignments, 0);
        assert_eq!(b.occupied_ticks, 0);
    }

    #[test]
    fn test_can_fit() {
        let mut b = Block::new(&BlockSpec::new(1, 100));
        assert!(b.can_fit(&job(100)));
        assert!(b.can_fit(&job(1)));
        assert!(!b.can_fit(&job(101)));

        b.load(0, &job(40));
        assert!(!b.can_fit(&job(10)));
    }

    #[test]
    fn test_load_and_release() {
        let mut b = Block::new(&BlockSpec::new(2, 60));
        b.load(3, &job(55));
        assert_eq!(b.occupant(), Some(3));
        assert_eq!(b.wasted(), 5);
        assert_eq!(b.assignments, 1);

        b.release();
        assert!(b.is_empty());
        assert_eq!(b.wasted(), 0);
        assert_eq!(b.assignments, 1);
    }

    #[test]
    fn test_clear_resets_counters() {
        let mut b = Block::new(&BlockSpec::new(2, 60));
        b.load(0, &job(10));
        b.occupied_ticks = 4;
        b.clear();
        assert!(b.is_empty());
        assert_eq!(b.occupied_ticks, 0);
        assert_eq!(b.assignments, 0);
        assert_eq!(b.capacity, 60);
    }
}
