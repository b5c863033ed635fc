//! Tick-driven allocation engine.
//!
//! A driver builds a [`SimulationRequest`], hands it to
//! [`AllocationEngine::new`], and calls [`AllocationEngine::advance`]
//! once per step. Each step returns a [`TickReport`] describing what
//! happened; the engine itself holds no timing or rendering knowledge.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 9.2: Contiguous Memory Allocation

mod report;
mod request;
mod simulator;

pub use report::{TickEvent, TickReport};
pub use request::SimulationRequest;
pub use simulator::{AllocationEngine, EngineCounts};
