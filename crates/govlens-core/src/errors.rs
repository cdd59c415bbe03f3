use govlens_core_types::{RequestId, TraceId};
use thiserror::Error;

use crate::model::FieldKind;

/// Result type alias using GovLensError
pub type Result<T> = std::result::Result<T, GovLensError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that callers (the CLI, tests, a
/// future API boundary) can match on without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Configuration
    InvalidSchema,
    MissingIdentifier,
    DuplicateIdentifier,
    UndeclaredField,
    KindMismatch,

    // Query input
    InvalidInput,
    InvalidTimeRange,
    InvalidTimestamp,
    InvalidThreshold,
    NotFound,

    // Integration/IO
    Io,
    Serialization,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidSchema => "ERR_INVALID_SCHEMA",
            ExErrorKind::MissingIdentifier => "ERR_MISSING_IDENTIFIER",
            ExErrorKind::DuplicateIdentifier => "ERR_DUPLICATE_IDENTIFIER",
            ExErrorKind::UndeclaredField => "ERR_UNDECLARED_FIELD",
            ExErrorKind::KindMismatch => "ERR_KIND_MISMATCH",
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::InvalidTimeRange => "ERR_INVALID_TIME_RANGE",
            ExErrorKind::InvalidTimestamp => "ERR_INVALID_TIMESTAMP",
            ExErrorKind::InvalidThreshold => "ERR_INVALID_THRESHOLD",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }

    /// True for kinds raised while building a store rather than per query
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            ExErrorKind::InvalidSchema
                | ExErrorKind::MissingIdentifier
                | ExErrorKind::DuplicateIdentifier
                | ExErrorKind::UndeclaredField
                | ExErrorKind::KindMismatch
        )
    }
}

/// Canonical structured error type
///
/// Carries a stable classification plus optional context for debugging.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    domain: Option<String>,
    field: Option<String>,
    record_id: Option<String>,
    request_id: Option<RequestId>,
    trace_id: Option<TraceId>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            domain: None,
            field: None,
            record_id: None,
            request_id: None,
            trace_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add dataset domain context
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// Add field name context
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Add record identifier context
    pub fn with_record_id(mut self, id: impl Into<String>) -> Self {
        self.record_id = Some(id.into());
        self
    }

    /// Add request ID context
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Add trace ID context
    pub fn with_trace_id(mut self, trace_id: TraceId) -> Self {
        self.trace_id = Some(trace_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }

    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    pub fn record_id(&self) -> Option<&str> {
        self.record_id.as_deref()
    }

    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    pub fn trace_id(&self) -> Option<&TraceId> {
        self.trace_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(domain) = &self.domain {
            write!(f, " (domain: {})", domain)?;
        }
        if let Some(field) = &self.field {
            write!(f, " (field: {})", field)?;
        }
        if let Some(record_id) = &self.record_id {
            write!(f, " (record_id: {})", record_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for GovLens operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GovLensError {
    // ===== Configuration Errors =====
    /// Schema is internally inconsistent (empty or undeclared role fields)
    #[error("Invalid schema for domain '{domain}': {reason}")]
    InvalidSchema { domain: String, reason: String },

    /// Record at `index` has no value for the identifier field
    #[error("Record #{index} is missing identifier field '{field}'")]
    MissingIdentifier { index: usize, field: String },

    /// Two records share the same identifier
    #[error("Duplicate record identifier: {record_id}")]
    DuplicateIdentifier { record_id: String },

    /// Record carries a field the schema does not declare
    #[error("Record {record_id} has undeclared field '{field}'")]
    UndeclaredField { record_id: String, field: String },

    /// Record value kind disagrees with the declared field kind
    #[error("Record {record_id} field '{field}' is {found}, schema declares {expected}")]
    FieldKindMismatch {
        record_id: String,
        field: String,
        expected: FieldKind,
        found: FieldKind,
    },

    // ===== Query Input Errors =====
    /// Time range token is not one of 1d/7d/30d/90d
    #[error("Invalid time range '{token}': expected one of 1d, 7d, 30d, 90d")]
    InvalidTimeRange { token: String },

    /// Reference timestamp could not be parsed
    #[error("Invalid timestamp '{value}'")]
    InvalidTimestamp { value: String },

    /// Analysis threshold outside [0, 1]
    #[error("Invalid threshold {threshold}: must lie within [0, 1]")]
    InvalidThreshold { threshold: f64 },

    /// Unknown protected attribute name
    #[error("Unknown protected attribute '{name}'")]
    UnknownAttribute { name: String },

    /// Built-in dataset name not recognised
    #[error("Unknown domain '{domain}'")]
    UnknownDomain { domain: String },

    // ===== Integration Errors =====
    /// Export serialization failed
    #[error("Serialization failed: {reason}")]
    Serialization { reason: String },
}

impl From<GovLensError> for ExError {
    fn from(err: GovLensError) -> Self {
        match err {
            GovLensError::InvalidSchema { domain, reason } => {
                ExError::new(ExErrorKind::InvalidSchema)
                    .with_op("store_new")
                    .with_domain(domain)
                    .with_message(reason)
            }

            GovLensError::MissingIdentifier { index, field } => {
                ExError::new(ExErrorKind::MissingIdentifier)
                    .with_op("store_new")
                    .with_field(field)
                    .with_message(format!("Record #{} has no identifier", index))
            }

            GovLensError::DuplicateIdentifier { record_id } => {
                ExError::new(ExErrorKind::DuplicateIdentifier)
                    .with_op("store_new")
                    .with_record_id(record_id)
                    .with_message("Duplicate record identifier")
            }

            GovLensError::UndeclaredField { record_id, field } => {
                ExError::new(ExErrorKind::UndeclaredField)
                    .with_op("store_new")
                    .with_record_id(record_id)
                    .with_field(field)
                    .with_message("Field is not declared by the schema")
            }

            GovLensError::FieldKindMismatch {
                record_id,
                field,
                expected,
                found,
            } => ExError::new(ExErrorKind::KindMismatch)
                .with_op("store_new")
                .with_record_id(record_id)
                .with_field(field)
                .with_message(format!("Expected {}, found {}", expected, found)),

            GovLensError::InvalidTimeRange { token } => {
                ExError::new(ExErrorKind::InvalidTimeRange)
                    .with_op("parse_time_range")
                    .with_message(format!("Unrecognised time range '{}'", token))
            }

            GovLensError::InvalidTimestamp { value } => {
                ExError::new(ExErrorKind::InvalidTimestamp)
                    .with_op("parse_timestamp")
                    .with_message(format!("Unparseable timestamp '{}'", value))
            }

            GovLensError::InvalidThreshold { threshold } => {
                ExError::new(ExErrorKind::InvalidThreshold)
                    .with_op("analyze")
                    .with_message(format!("Threshold {} outside [0, 1]", threshold))
            }

            GovLensError::UnknownAttribute { name } => ExError::new(ExErrorKind::InvalidInput)
                .with_op("analyze")
                .with_message(format!("Unknown protected attribute '{}'", name)),

            GovLensError::UnknownDomain { domain } => ExError::new(ExErrorKind::NotFound)
                .with_op("load_domain")
                .with_domain(domain)
                .with_message("Unknown domain"),

            GovLensError::Serialization { reason } => {
                ExError::new(ExErrorKind::Serialization)
                    .with_op("export")
                    .with_message(reason)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(ExErrorKind::InvalidSchema.code(), "ERR_INVALID_SCHEMA");
        assert_eq!(
            ExErrorKind::DuplicateIdentifier.code(),
            "ERR_DUPLICATE_IDENTIFIER"
        );
        assert_eq!(ExErrorKind::Io.code(), "ERR_IO");
    }

    #[test]
    fn test_configuration_kinds() {
        assert!(ExErrorKind::InvalidSchema.is_configuration());
        assert!(ExErrorKind::KindMismatch.is_configuration());
        assert!(!ExErrorKind::InvalidTimeRange.is_configuration());
        assert!(!ExErrorKind::Io.is_configuration());
    }

    #[test]
    fn test_display_includes_context() {
        let err = ExError::new(ExErrorKind::UndeclaredField)
            .with_op("store_new")
            .with_field("ip")
            .with_record_id("audit-001")
            .with_message("Field is not declared by the schema");
        let rendered = err.to_string();
        assert!(rendered.starts_with("[ERR_UNDECLARED_FIELD]"));
        assert!(rendered.contains("store_new"));
        assert!(rendered.contains("(field: ip)"));
        assert!(rendered.contains("(record_id: audit-001)"));
    }
}
