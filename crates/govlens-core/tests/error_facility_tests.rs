use govlens_core::errors::{ExError, ExErrorKind, GovLensError};
use govlens_core::fixtures::audit_schema;
use govlens_core::model::FieldKind;
use govlens_core::{FieldValue, Record, RecordStore};

#[test]
fn test_duplicate_identifier_verifiable_by_kind() {
    let records = vec![
        Record::new()
            .with("id", FieldValue::text("audit-001"))
            .with("category", FieldValue::category("analysis")),
        Record::new()
            .with("id", FieldValue::text("audit-001"))
            .with("category", FieldValue::category("violation")),
    ];

    let err = RecordStore::new(audit_schema(), records).unwrap_err();
    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::DuplicateIdentifier);
    assert_eq!(ex_err.code(), "ERR_DUPLICATE_IDENTIFIER");
    assert_eq!(ex_err.record_id(), Some("audit-001"));
    assert_eq!(ex_err.op(), Some("store_new"));
}

#[test]
fn test_undeclared_field_carries_field_and_record() {
    let records = vec![Record::new()
        .with("id", FieldValue::text("audit-007"))
        .with("severity", FieldValue::category("high"))];

    let ex_err: ExError = RecordStore::new(audit_schema(), records)
        .unwrap_err()
        .into();

    assert_eq!(ex_err.kind(), ExErrorKind::UndeclaredField);
    assert_eq!(ex_err.field(), Some("severity"));
    assert_eq!(ex_err.record_id(), Some("audit-007"));
}

#[test]
fn test_kind_mismatch_distinct_from_undeclared() {
    let err = GovLensError::FieldKindMismatch {
        record_id: "audit-001".to_string(),
        field: "status".to_string(),
        expected: FieldKind::Category,
        found: FieldKind::Text,
    };

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::KindMismatch);
    assert_ne!(ex_err.kind(), ExErrorKind::UndeclaredField);
    assert!(ex_err.message().contains("category"));
    assert!(ex_err.message().contains("text"));
}

#[test]
fn test_query_input_errors_are_not_configuration() {
    let cases = vec![
        GovLensError::InvalidTimeRange {
            token: "2w".to_string(),
        },
        GovLensError::InvalidTimestamp {
            value: "yesterday".to_string(),
        },
        GovLensError::InvalidThreshold { threshold: 2.0 },
    ];

    for err in cases {
        let ex_err: ExError = err.into();
        assert!(!ex_err.kind().is_configuration());
    }
}

#[test]
fn test_unknown_domain_maps_to_not_found() {
    let ex_err: ExError = GovLensError::UnknownDomain {
        domain: "finance".to_string(),
    }
    .into();

    assert_eq!(ex_err.kind(), ExErrorKind::NotFound);
    assert_eq!(ex_err.domain(), Some("finance"));
    assert_eq!(ex_err.op(), Some("load_domain"));
}

#[test]
fn test_error_kind_code_mapping() {
    // Each kind has a stable, unique code
    let kinds = vec![
        (ExErrorKind::InvalidSchema, "ERR_INVALID_SCHEMA"),
        (ExErrorKind::MissingIdentifier, "ERR_MISSING_IDENTIFIER"),
        (ExErrorKind::DuplicateIdentifier, "ERR_DUPLICATE_IDENTIFIER"),
        (ExErrorKind::UndeclaredField, "ERR_UNDECLARED_FIELD"),
        (ExErrorKind::KindMismatch, "ERR_KIND_MISMATCH"),
        (ExErrorKind::InvalidInput, "ERR_INVALID_INPUT"),
        (ExErrorKind::InvalidTimeRange, "ERR_INVALID_TIME_RANGE"),
        (ExErrorKind::InvalidTimestamp, "ERR_INVALID_TIMESTAMP"),
        (ExErrorKind::InvalidThreshold, "ERR_INVALID_THRESHOLD"),
        (ExErrorKind::NotFound, "ERR_NOT_FOUND"),
        (ExErrorKind::Io, "ERR_IO"),
        (ExErrorKind::Serialization, "ERR_SERIALIZATION"),
        (ExErrorKind::Internal, "ERR_INTERNAL"),
    ];

    let mut seen = std::collections::HashSet::new();
    for (kind, expected_code) in kinds {
        assert_eq!(kind.code(), expected_code);
        assert!(seen.insert(expected_code));
    }
}
