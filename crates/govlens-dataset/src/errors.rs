//! Error handling for govlens-dataset
//!
//! Wraps govlens-core ExError with dataset-specific helpers

use govlens_core::errors::{ExError, ExErrorKind, GovLensError};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create a dataset validation error
pub fn dataset_validation(reason: &str) -> ExError {
    ExError::new(ExErrorKind::InvalidInput)
        .with_op("dataset_parse")
        .with_message(reason.to_string())
}

/// Create a value conversion error for one field of one record
pub fn value_mismatch(index: usize, field: &str, expected: &str) -> ExError {
    ExError::new(ExErrorKind::InvalidInput)
        .with_op("dataset_parse")
        .with_field(field)
        .with_message(format!(
            "Record #{} field '{}' must be {}",
            index, field, expected
        ))
}

/// Classify a store construction error, tagging it with the dataset domain
pub fn store_error(domain: &str, err: GovLensError) -> ExError {
    ExError::from(err).with_domain(domain)
}

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}
