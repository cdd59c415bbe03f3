use std::collections::HashMap;

use crate::errors::{GovLensError, Result};
use crate::model::{Record, Schema};

/// Immutable, ordered record collection for one domain
///
/// All schema/record consistency checks run once in [`RecordStore::new`];
/// queries against a built store cannot fail. There is no write path.
#[derive(Debug, Clone)]
pub struct RecordStore {
    schema: Schema,
    records: Vec<Record>,
    /// Identifier -> position in `records`
    index: HashMap<String, usize>,
}

impl RecordStore {
    /// Build a store, validating the schema and every record against it
    ///
    /// Records keep their given order. Missing non-identifier fields are
    /// allowed; they read as empty text and are left out of aggregation.
    ///
    /// # Errors
    ///
    /// - `InvalidSchema` if the schema itself is inconsistent
    /// - `MissingIdentifier` if a record has no identifier value
    /// - `DuplicateIdentifier` if two records share an identifier
    /// - `UndeclaredField` if a record carries a field the schema lacks
    /// - `FieldKindMismatch` if a value's kind differs from the declared kind
    pub fn new(schema: Schema, records: Vec<Record>) -> Result<Self> {
        schema.validate()?;

        let mut index = HashMap::with_capacity(records.len());
        for (position, record) in records.iter().enumerate() {
            let id = record
                .get(schema.id_field())
                .and_then(|v| v.as_str())
                .filter(|id| !id.is_empty())
                .ok_or_else(|| GovLensError::MissingIdentifier {
                    index: position,
                    field: schema.id_field().to_string(),
                })?;

            for (name, value) in record.fields() {
                let expected =
                    schema
                        .field_kind(name)
                        .ok_or_else(|| GovLensError::UndeclaredField {
                            record_id: id.to_string(),
                            field: name.clone(),
                        })?;
                if value.kind() != expected {
                    return Err(GovLensError::FieldKindMismatch {
                        record_id: id.to_string(),
                        field: name.clone(),
                        expected,
                        found: value.kind(),
                    });
                }
            }

            if index.insert(id.to_string(), position).is_some() {
                return Err(GovLensError::DuplicateIdentifier {
                    record_id: id.to_string(),
                });
            }
        }

        tracing::debug!(
            domain = schema.domain(),
            record_count = records.len(),
            "record store built"
        );

        Ok(Self {
            schema,
            records,
            index,
        })
    }

    /// Build an empty store for `schema`
    ///
    /// # Errors
    ///
    /// Returns `InvalidSchema` if the schema is inconsistent.
    pub fn empty(schema: Schema) -> Result<Self> {
        Self::new(schema, Vec::new())
    }

    /// Full record set in insertion order
    pub fn all_records(&self) -> &[Record] {
        &self.records
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Look up a record by identifier
    pub fn get(&self, id: &str) -> Option<&Record> {
        self.index.get(id).map(|&position| &self.records[position])
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FieldKind, FieldValue};

    fn schema() -> Schema {
        Schema::builder("policy")
            .field("id", FieldKind::Text)
            .field("name", FieldKind::Text)
            .field("status", FieldKind::Category)
            .id_field("id")
            .category_field("status")
            .searchable(["name"])
            .build()
    }

    fn policy(id: &str, status: &str) -> Record {
        Record::new()
            .with("id", FieldValue::text(id))
            .with("name", FieldValue::text(format!("Policy {}", id)))
            .with("status", FieldValue::category(status))
    }

    #[test]
    fn test_preserves_insertion_order() {
        let store = RecordStore::new(
            schema(),
            vec![policy("p-2", "active"), policy("p-1", "draft")],
        )
        .unwrap();
        let ids: Vec<_> = store
            .all_records()
            .iter()
            .map(|r| r.text_of("id").into_owned())
            .collect();
        assert_eq!(ids, vec!["p-2", "p-1"]);
        assert_eq!(store.get("p-1").unwrap().text_of("status"), "draft");
    }

    #[test]
    fn test_duplicate_identifier_rejected() {
        let err = RecordStore::new(
            schema(),
            vec![policy("p-1", "active"), policy("p-1", "draft")],
        )
        .unwrap_err();
        assert_eq!(
            err,
            GovLensError::DuplicateIdentifier {
                record_id: "p-1".to_string()
            }
        );
    }

    #[test]
    fn test_missing_identifier_rejected() {
        let record = Record::new().with("status", FieldValue::category("active"));
        let err = RecordStore::new(schema(), vec![record]).unwrap_err();
        assert!(matches!(
            err,
            GovLensError::MissingIdentifier { index: 0, .. }
        ));
    }

    #[test]
    fn test_undeclared_field_rejected() {
        let record = policy("p-1", "active").with("owner", FieldValue::text("ops"));
        let err = RecordStore::new(schema(), vec![record]).unwrap_err();
        assert!(matches!(err, GovLensError::UndeclaredField { ref field, .. } if field == "owner"));
    }

    #[test]
    fn test_kind_mismatch_rejected() {
        let record = policy("p-1", "active").with("name", FieldValue::number(1.0));
        let err = RecordStore::new(schema(), vec![record]).unwrap_err();
        assert!(matches!(
            err,
            GovLensError::FieldKindMismatch {
                expected: FieldKind::Text,
                found: FieldKind::Number,
                ..
            }
        ));
    }

    #[test]
    fn test_missing_optional_field_allowed() {
        let record = Record::new().with("id", FieldValue::text("p-9"));
        let store = RecordStore::new(schema(), vec![record]).unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_empty_store() {
        let store = RecordStore::empty(schema()).unwrap();
        assert!(store.is_empty());
        assert!(store.all_records().is_empty());
    }
}
