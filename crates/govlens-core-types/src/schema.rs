//! Canonical schema constants for structured logging
//!
//! These constants keep field keys and event names consistent across the
//! query engine, the dataset loader and the CLI.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_REQUEST_ID: &str = "request_id";
pub const FIELD_TRACE_ID: &str = "trace_id";

// Dataset identifiers
pub const FIELD_DOMAIN: &str = "domain";
pub const FIELD_RECORD_ID: &str = "record_id";

// Collection sizes
pub const FIELD_TOTAL_COUNT: &str = "total_count";
pub const FIELD_MATCHED_COUNT: &str = "matched_count";
pub const FIELD_BUCKET_COUNT: &str = "bucket_count";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names_are_distinct() {
        assert_ne!(EVENT_START, EVENT_END);
        assert_ne!(EVENT_START, EVENT_END_ERROR);
        assert_ne!(EVENT_END, EVENT_END_ERROR);
    }

    #[test]
    fn test_count_fields_are_distinct() {
        assert_ne!(FIELD_TOTAL_COUNT, FIELD_MATCHED_COUNT);
        assert_ne!(FIELD_MATCHED_COUNT, FIELD_BUCKET_COUNT);
    }
}
