//! Crate error type.

use thiserror::Error;

use crate::validation::ValidationError;

#[derive(Debug, Error)]
pub enum SimError {
    /// The workload or block configuration failed validation.
    #[error("invalid configuration: {}", join(.0))]
    InvalidConfig(Vec<ValidationError>),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("failed to parse scenario: {0}")]
    Parse(#[from] serde_json::Error),
}

impl From<Vec<ValidationError>> for SimError {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self::InvalidConfig(errors)
    }
}

impl SimError {
    /// Validation errors carried by this error, if any.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            Self::InvalidConfig(errors) => errors,
            _ => &[],
        }
    }
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BlockSpec;
    use crate::validation::validate_input;

    #[test]
    fn test_invalid_config_message() {
        let errors = validate_input(&[], &[BlockSpec::new(1, 0), BlockSpec::new(1, 5)]).unwrap_err();
        let err = SimError::from(errors);
        assert_eq!(err.validation_errors().len(), 2);
        assert_eq!(
            err.to_string(),
            "invalid configuration: Block 1 has zero capacity; Duplicate block ID: 1"
        );
    }
}
