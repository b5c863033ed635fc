//! Structured per-tick output.
//!
//! The engine never formats text. Drivers render these events however
//! they like.

use serde::{Deserialize, Serialize};

use crate::models::{BlockId, JobId, Tick};

/// Something that happened during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum TickEvent {
    /// A job was admitted.
    Arrival {
        job: JobId,
        duration: u32,
        demand: u64,
    },
    /// A job was larger than every block and was dropped.
    Rejection {
        job: JobId,
        demand: u64,
        max_capacity: u64,
    },
    /// A job finished and freed its block.
    Completion { job: JobId, block: BlockId },
    /// A waiting job was placed into a block.
    Allocation {
        job: JobId,
        block: BlockId,
        capacity: u64,
        wasted: u64,
    },
    /// A waiting job found no suitable empty block.
    StillWaiting { job: JobId },
}

impl TickEvent {
    /// Job the event refers to.
    pub fn job(&self) -> JobId {
        match *self {
            TickEvent::Arrival { job, .. }
            | TickEvent::Rejection { job, .. }
            | TickEvent::Completion { job, .. }
            | TickEvent::Allocation { job, .. }
            | TickEvent::StillWaiting { job } => job,
        }
    }
}

/// Everything that happened during one tick, in occurrence order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickReport {
    /// Tick index (clock value before the tick advanced it).
    pub tick: Tick,
    /// Events in the order they occurred.
    pub events: Vec<TickEvent>,
}

impl TickReport {
    /// Creates an empty report for `tick`.
    pub fn new(tick: Tick) -> Self {
        Self {
            tick,
            events: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, event: TickEvent) {
        tracing::trace!(tick = self.tick, ?event);
        self.events.push(event);
    }

    /// Whether nothing happened.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Allocations made this tick as `(job, block, wasted)`.
    pub fn allocations(&self) -> impl Iterator<Item = (JobId, BlockId, u64)> + '_ {
        self.events.iter().filter_map(|e| match *e {
            TickEvent::Allocation {
                job, block, wasted, ..
            } => Some((job, block, wasted)),
            _ => None,
        })
    }

    /// Jobs completed this tick as `(job, block)`.
    pub fn completions(&self) -> impl Iterator<Item = (JobId, BlockId)> + '_ {
        self.events.iter().filter_map(|e| match *e {
            TickEvent::Completion { job, block } => Some((job, block)),
            _ => None,
        })
    }

    /// Total wasted bytes of the allocations made this tick.
    pub fn allocated_waste(&self) -> u64 {
        self.allocations().map(|(_, _, wasted)| wasted).sum()
    }
}
