//! Fixed-partition memory allocation simulator.
//!
//! Runs a workload of jobs against a fixed set of memory partitions one
//! tick at a time, placing waiting jobs with First-Fit or Best-Fit, and
//! reports queueing, fragmentation and utilization statistics.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Job`, `JobSpec`, `Block`, `BlockSpec`
//! - **`placement`**: `PlacementPolicy` and the `FirstFit` / `BestFit` rules
//! - **`engine`**: `AllocationEngine`, `SimulationRequest`, `TickReport`
//! - **`metrics`**: `MetricsAggregator` counters and `StatsSummary` snapshots
//! - **`comparison`**: Run all policies over one scenario
//! - **`scenario`**: Classroom preset and random workloads
//! - **`validation`**: Configuration checks (empty block list, zero sizes, duplicate IDs)
//!
//! # Architecture
//!
//! The engine is a pure in-memory state machine. It performs no I/O and
//! formats no text; drivers (the bundled CLI, a UI, a test) call
//! `advance()` and render the returned events.
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 9
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", Ch. 3.2

pub mod comparison;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod models;
pub mod placement;
pub mod scenario;
pub mod validation;

pub use error::SimError;
