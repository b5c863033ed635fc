//! Input validation for allocation scenarios.
//!
//! Checks structural integrity of the workload and block configuration
//! before a run starts. Detects:
//! - An empty block list
//! - Zero block capacities
//! - Zero job durations or demands
//! - Duplicate job or block IDs
//!
//! Every defect is reported, not just the first one found.

use std::collections::HashSet;
use std::fmt;

use crate::models::{BlockSpec, JobSpec};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// No blocks were configured.
    EmptyBlockList,
    /// A block has zero capacity.
    NonPositiveCapacity,
    /// A job has zero duration.
    NonPositiveDuration,
    /// A job has zero memory demand.
    NonPositiveDemand,
    /// Two jobs or two blocks share the same ID.
    DuplicateId,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::EmptyBlockList => "empty block list",
            Self::NonPositiveCapacity => "non-positive capacity",
            Self::NonPositiveDuration => "non-positive duration",
            Self::NonPositiveDemand => "non-positive demand",
            Self::DuplicateId => "duplicate id",
        };
        f.write_str(s)
    }
}

/// Validates a workload and block configuration.
///
/// Checks:
/// 1. At least one block exists
/// 2. Every block capacity is positive
/// 3. No duplicate block IDs
/// 4. Every job duration and demand is positive
/// 5. No duplicate job IDs
///
/// An empty workload is valid; such a run finishes immediately.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(jobs: &[JobSpec], blocks: &[BlockSpec]) -> ValidationResult {
    let mut errors = Vec::new();

    if blocks.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyBlockList,
            "At least one memory block is required",
        ));
    }

    let mut block_ids = HashSet::new();
    for b in blocks {
        if !block_ids.insert(b.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate block ID: {}", b.id),
            ));
        }
        if b.capacity == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveCapacity,
                format!("Block {} has zero capacity", b.id),
            ));
        }
    }

    let mut job_ids = HashSet::new();
    for j in jobs {
        if !job_ids.insert(j.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate job ID: {}", j.id),
            ));
        }
        if j.duration == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveDuration,
                format!("Job {} has zero duration", j.id),
            ));
        }
        if j.demand == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveDemand,
                format!("Job {} has zero memory demand", j.id),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
