//! Job model.
//!
//! A job is a unit of work that needs a single memory partition for a
//! fixed number of ticks. Its lifecycle is
//! `Waiting → Running → Done`, or `Waiting → Rejected` at admission.

use serde::{Deserialize, Serialize};

use super::{BlockId, JobId, Tick};

/// Static description of a job, as supplied in the workload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSpec {
    /// Unique job identifier.
    pub id: JobId,
    /// Service time in ticks.
    pub duration: u32,
    /// Memory demand in bytes.
    pub demand: u64,
}

impl JobSpec {
    /// Creates a job specification.
    pub fn new(id: JobId, duration: u32, demand: u64) -> Self {
        Self {
            id,
            duration,
            demand,
        }
    }
}

/// Lifecycle state of a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobState {
    /// Admitted, queued for a block.
    Waiting,
    /// Occupying a block.
    Running,
    /// Service completed; block released.
    Done,
    /// Larger than every block. Never queued.
    Rejected,
}

/// A job admitted into the simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    /// Unique job identifier.
    pub id: JobId,
    /// Total service time (ticks).
    pub duration: u32,
    /// Service time still owed (ticks).
    pub remaining: u32,
    /// Memory demand (bytes).
    pub demand: u64,
    /// Tick at which the job was admitted.
    pub arrival_tick: Tick,
    /// Tick at which the job was placed into a block.
    pub start_tick: Option<Tick>,
    /// Block currently hosting the job. Set iff `state == Running`.
    pub block: Option<BlockId>,
    /// Current lifecycle state.
    pub state: JobState,
}

impl Job {
    /// Admits a job at `tick` in the `Waiting` state.
    pub fn admit(spec: &JobSpec, tick: Tick) -> Self {
        Self {
            id: spec.id,
            duration: spec.duration,
            remaining: spec.duration,
            demand: spec.demand,
            arrival_tick: tick,
            start_tick: None,
            block: None,
            state: JobState::Waiting,
        }
    }

    /// Marks a freshly admitted job as permanently rejected.
    pub(crate) fn reject(&mut self) {
        debug_assert_eq!(self.state, JobState::Waiting);
        self.state = JobState::Rejected;
    }

    /// Transitions `Waiting → Running` on `block` at `tick`.
    pub(crate) fn start(&mut self, tick: Tick, block: BlockId) {
        debug_assert_eq!(self.state, JobState::Waiting);
        self.state = JobState::Running;
        self.start_tick = Some(tick);
        self.block = Some(block);
    }

    /// Consumes one tick of service.
    ///
    /// Returns `true` if the job finished on this tick, in which case it is
    /// now `Done` and no longer references its block.
    pub(crate) fn tick(&mut self) -> bool {
        if self.state != JobState::Running || self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        if self.remaining == 0 {
            self.state = JobState::Done;
            self.block = None;
            true
        } else {
            false
        }
    }

    /// Ticks spent in the waiting queue, once started.
    pub fn wait_time(&self) -> Option<Tick> {
        self.start_tick.map(|start| start - self.arrival_tick)
    }

    /// Whether the job is queued for a block.
    #[inline]
    pub fn is_waiting(&self) -> bool {
        self.state == JobState::Waiting
    }

    /// Whether the job is occupying a block.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.state == JobState::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admit() {
        let job = Job::admit(&JobSpec::new(7, 3, 1200), 4);
        assert_eq!(job.id, 7);
        assert_eq!(job.remaining, 3);
        assert_eq!(job.arrival_tick, 4);
        assert_eq!(job.state, JobState::Waiting);
        assert!(job.start_tick.is_none());
        assert!(job.block.is_none());
    }

    #[test]
    fn test_run_to_done() {
        let mut job = Job::admit(&JobSpec::new(1, 2, 50), 0);
        job.start(1, 3);
        assert!(job.is_running());
        assert_eq!(job.block, Some(3));

        assert!(!job.tick());
        assert_eq!(job.remaining, 1);
        assert!(job.tick());
        assert_eq!(job.state, JobState::Done);
        assert_eq!(job.remaining, 0);
        assert!(job.block.is_none());

        // Done jobs no longer age.
        assert!(!job.tick());
        assert_eq!(job.remaining, 0);
    }

    #[test]
    fn test_waiting_job_does_not_age() {
        let mut job = Job::admit(&JobSpec::new(1, 2, 50), 0);
        assert!(!job.tick());
        assert_eq!(job.remaining, 2);
    }

    #[test]
    fn test_wait_time() {
        let mut job = Job::admit(&JobSpec::new(1, 2, 50), 2);
        assert_eq!(job.wait_time(), None);
        job.start(5, 1);
        assert_eq!(job.wait_time(), Some(3));
    }

    #[test]
    fn test_reject() {
        let mut job = Job::admit(&JobSpec::new(1, 2, 50), 0);
        job.reject();
        assert_eq!(job.state, JobState::Rejected);
        assert!(!job.is_waiting());
    }
}
