//! Partition allocation domain models.
//!
//! Provides the entities the engine manipulates: jobs competing for
//! memory, and the fixed-size blocks they are placed into.
//!
//! # Domain Mappings
//!
//! | u-partition | Operating System | Classroom Simulator |
//! |-------------|------------------|---------------------|
//! | Job | Process image | Job card |
//! | Block | Fixed partition | Memory block |
//! | Tick | Scheduler quantum | Time step |

mod block;
mod job;

pub use block::{Block, BlockSpec};
pub use job::{Job, JobSpec, JobState};

/// Discrete simulation time.
pub type Tick = u64;

/// Job identifier.
pub type JobId = u32;

/// Block identifier.
pub type BlockId = u32;
