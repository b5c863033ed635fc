//! Tick-driven fixed-partition allocation engine.
//!
//! # Algorithm
//!
//! Each call to [`AllocationEngine::advance`] runs one tick:
//!
//! 1. Admit the next workload job. Jobs larger than the largest block are
//!    rejected for good; others join the waiting queue.
//! 2. Age every running job by one tick. Finished jobs free their block
//!    immediately.
//! 3. Sample the queue length, then scan the waiting queue front to back
//!    and place every job the policy finds a block for. A job that does
//!    not fit is skipped, not blocking the jobs behind it.
//! 4. Sample internal fragmentation over occupied blocks.
//! 5. Advance the clock.
//!
//! # Complexity
//! O(w * b) per tick where w=waiting jobs, b=blocks.

use tracing::debug;

use super::{SimulationRequest, TickEvent, TickReport};
use crate::error::SimError;
use crate::metrics::{MetricsAggregator, StatsSummary};
use crate::models::{Block, Job, JobId, JobSpec, JobState, Tick};
use crate::placement::{PlacementPolicy, PolicyKind};

/// Job counts by state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineCounts {
    /// Jobs in the workload.
    pub total: usize,
    /// Jobs admitted so far.
    pub admitted: usize,
    pub waiting: usize,
    pub running: usize,
    pub done: usize,
    pub rejected: usize,
}

impl EngineCounts {
    /// Every admitted job is in exactly one state.
    pub fn is_conserved(&self) -> bool {
        self.admitted == self.done + self.rejected + self.waiting + self.running
            && self.admitted <= self.total
    }
}

/// Fixed-partition allocation engine.
///
/// Owns its configuration, its block table, and every admitted job.
/// Blocks reference their occupant by index into the job table.
///
/// # Example
///
/// ```
/// use u_partition::engine::{AllocationEngine, SimulationRequest};
/// use u_partition::placement::PolicyKind;
///
/// let request = SimulationRequest::from_tuples(&[(1, 2, 50)], &[(1, 100), (2, 60)])
///     .with_policy(PolicyKind::BestFit);
/// let mut engine = AllocationEngine::new(request).unwrap();
///
/// let report = engine.advance();
/// assert_eq!(report.allocations().next(), Some((1, 2, 10)));
///
/// engine.run_to_completion();
/// assert!(engine.is_finished());
/// assert_eq!(engine.counts().done, 1);
/// ```
#[derive(Debug, Clone)]
pub struct AllocationEngine {
    request: SimulationRequest,
    workload: Vec<JobSpec>,
    max_capacity: u64,
    blocks: Vec<Block>,
    jobs: Vec<Job>,
    waiting: Vec<usize>,
    running: usize,
    done: usize,
    rejected: usize,
    clock: Tick,
    metrics: MetricsAggregator,
}

impl AllocationEngine {
    /// Validates `request` and sets up a run.
    ///
    /// Blocks are ordered by ascending id. With Best-Fit the workload is
    /// reordered by ascending demand before the first tick.
    pub fn new(request: SimulationRequest) -> Result<Self, SimError> {
        request.validate()?;
        let engine = Self::setup(request);
        debug!(
            policy = %engine.policy(),
            jobs = engine.workload.len(),
            blocks = engine.blocks.len(),
            max_capacity = engine.max_capacity,
            "simulation set up"
        );
        Ok(engine)
    }

    fn setup(request: SimulationRequest) -> Self {
        let workload = request.admission_order();
        let max_capacity = request.max_capacity();
        let mut blocks: Vec<Block> = request.blocks.iter().map(Block::new).collect();
        blocks.sort_by_key(|b| b.id);

        Self {
            jobs: Vec::with_capacity(workload.len()),
            request,
            workload,
            max_capacity,
            blocks,
            waiting: Vec::new(),
            running: 0,
            done: 0,
            rejected: 0,
            clock: 0,
            metrics: MetricsAggregator::new(),
        }
    }

    /// Restores the freshly set-up state, keeping the configuration.
    pub fn reset(&mut self) {
        for block in &mut self.blocks {
            block.clear();
        }
        self.jobs.clear();
        self.waiting.clear();
        self.running = 0;
        self.done = 0;
        self.rejected = 0;
        self.clock = 0;
        self.metrics = MetricsAggregator::new();
        debug!(policy = %self.policy(), "simulation reset");
    }

    /// Runs one tick and reports what happened.
    ///
    /// After the run has finished this is a no-op returning an empty report
    /// for the current clock.
    pub fn advance(&mut self) -> TickReport {
        let mut report = TickReport::new(self.clock);
        if self.is_finished() {
            return report;
        }

        self.admit_next(&mut report);
        self.age_running(&mut report);
        self.place_waiting(&mut report);
        self.sample_fragmentation();
        self.clock += 1;

        self.check_invariants();
        if self.is_finished() {
            debug!(policy = %self.policy(), ticks = self.clock, "simulation finished");
        }
        report
    }

    /// Advances until finished, returning every tick's report.
    pub fn run_to_completion(&mut self) -> Vec<TickReport> {
        let mut reports = Vec::new();
        while !self.is_finished() {
            reports.push(self.advance());
        }
        reports
    }

    /// Whether every job was admitted and none is waiting or running.
    pub fn is_finished(&self) -> bool {
        self.jobs.len() == self.workload.len() && self.waiting.is_empty() && self.running == 0
    }

    fn admit_next(&mut self, report: &mut TickReport) {
        let Some(spec) = self.workload.get(self.jobs.len()) else {
            return;
        };
        let mut job = Job::admit(spec, self.clock);
        report.push(TickEvent::Arrival {
            job: job.id,
            duration: job.duration,
            demand: job.demand,
        });

        if job.demand > self.max_capacity {
            job.reject();
            self.rejected += 1;
            report.push(TickEvent::Rejection {
                job: job.id,
                demand: job.demand,
                max_capacity: self.max_capacity,
            });
        } else {
            self.waiting.push(self.jobs.len());
        }
        self.jobs.push(job);
    }

    fn age_running(&mut self, report: &mut TickReport) {
        for block in &mut self.blocks {
            let Some(index) = block.occupant() else {
                continue;
            };
            block.occupied_ticks += 1;
            let job = &mut self.jobs[index];
            if job.tick() {
                block.release();
                self.running -= 1;
                self.done += 1;
                report.push(TickEvent::Completion {
                    job: job.id,
                    block: block.id,
                });
            }
        }
    }

    fn place_waiting(&mut self, report: &mut TickReport) {
        self.metrics.record_queue_length(self.waiting.len());

        let mut still_waiting = Vec::with_capacity(self.waiting.len());
        for &index in &self.waiting {
            let job = &self.jobs[index];
            let Some(slot) = self.request.policy.select(&self.blocks, job) else {
                report.push(TickEvent::StillWaiting { job: job.id });
                still_waiting.push(index);
                continue;
            };

            let block = &mut self.blocks[slot];
            block.load(index, job);
            let job = &mut self.jobs[index];
            job.start(self.clock, block.id);
            self.running += 1;
            self.metrics.record_start(self.clock - job.arrival_tick);
            report.push(TickEvent::Allocation {
                job: job.id,
                block: block.id,
                capacity: block.capacity,
                wasted: block.wasted(),
            });
        }
        self.waiting = still_waiting;
    }

    fn sample_fragmentation(&mut self) {
        let (wasted, occupied) = self
            .blocks
            .iter()
            .filter(|b| !b.is_empty())
            .fold((0u128, 0u128), |(w, c), b| {
                (w + u128::from(b.wasted()), c + u128::from(b.capacity))
            });
        self.metrics.record_fragmentation(wasted, occupied);
    }

    fn check_invariants(&self) {
        debug_assert!(self.counts().is_conserved(), "job counts not conserved");
        for block in &self.blocks {
            if let Some(index) = block.occupant() {
                let job = &self.jobs[index];
                debug_assert_eq!(
                    job.state,
                    JobState::Running,
                    "block {} hosts job {} which is not running",
                    block.id,
                    job.id
                );
                debug_assert_eq!(job.block, Some(block.id), "job {} block mismatch", job.id);
                debug_assert!(job.demand <= block.capacity);
            }
        }
        for &index in &self.waiting {
            debug_assert_eq!(self.jobs[index].state, JobState::Waiting);
        }
    }

    // ======================== Queries ========================

    /// Current clock (number of ticks executed).
    pub fn clock(&self) -> Tick {
        self.clock
    }

    /// Active placement policy.
    pub fn policy(&self) -> PolicyKind {
        self.request.policy
    }

    /// Configuration this engine was built from.
    pub fn request(&self) -> &SimulationRequest {
        &self.request
    }

    /// Workload in admission order.
    pub fn workload(&self) -> &[JobSpec] {
        &self.workload
    }

    /// Largest block capacity; the rejection bound.
    pub fn max_capacity(&self) -> u64 {
        self.max_capacity
    }

    /// Blocks in ascending id order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Admitted jobs in admission order.
    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    /// Looks up an admitted job by id.
    pub fn job(&self, id: JobId) -> Option<&Job> {
        self.jobs.iter().find(|j| j.id == id)
    }

    /// Job hosted by `block`, if any.
    pub fn occupant(&self, block: &Block) -> Option<&Job> {
        block.occupant().map(|index| &self.jobs[index])
    }

    /// Waiting jobs in queue order.
    pub fn waiting_jobs(&self) -> impl Iterator<Item = &Job> + '_ {
        self.waiting.iter().map(|&index| &self.jobs[index])
    }

    /// Job counts by state.
    pub fn counts(&self) -> EngineCounts {
        EngineCounts {
            total: self.workload.len(),
            admitted: self.jobs.len(),
            waiting: self.waiting.len(),
            running: self.running,
            done: self.done,
            rejected: self.rejected,
        }
    }

    /// Raw metric counters.
    pub fn metrics(&self) -> &MetricsAggregator {
        &self.metrics
    }

    /// Statistics snapshot of the run so far.
    pub fn summary(&self) -> StatsSummary {
        StatsSummary::calculate(
            &self.metrics,
            &self.blocks,
            self.clock,
            self.done,
            self.rejected,
        )
    }
}
