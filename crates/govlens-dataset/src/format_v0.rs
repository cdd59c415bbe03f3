//! Dataset Format v0 schema
//!
//! Defines the YAML/JSON structure of a dataset file: one domain schema and
//! its records.

use govlens_core::model::{FieldKind, FieldSpec};
use govlens_core::{FieldValue, GovLensError, Record, RecordStore, Schema};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{store_error, value_mismatch, Result};

/// A record as written in the file, before kind conversion
pub type RawRecord = Map<String, Value>;

/// Top-level dataset file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetV0 {
    /// Schema version (must be 0 for this format)
    pub schema_version: u32,

    /// Domain name, e.g. "audit"
    pub domain: String,

    /// Field declarations and roles
    pub schema: SchemaSection,

    /// Records in display order
    #[serde(default)]
    pub records: Vec<RawRecord>,
}

/// Schema declaration in a dataset file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaSection {
    pub id_field: String,

    pub category_field: String,

    #[serde(default)]
    pub searchable: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp_field: Option<String>,

    /// Dropdown options, in display order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub category_values: Vec<String>,

    /// Declared fields, in export order
    pub fields: Vec<FieldSpec>,
}

impl SchemaSection {
    /// Build the core schema for `domain`
    pub fn to_schema(&self, domain: &str) -> Schema {
        let mut builder = Schema::builder(domain)
            .id_field(self.id_field.as_str())
            .category_field(self.category_field.as_str())
            .searchable(self.searchable.iter().map(String::as_str))
            .category_values(self.category_values.iter().map(String::as_str));
        if let Some(timestamp) = &self.timestamp_field {
            builder = builder.timestamp_field(timestamp.as_str());
        }
        for spec in &self.fields {
            builder = builder.field(spec.name.as_str(), spec.kind);
        }
        builder.build()
    }

    fn from_schema(schema: &Schema) -> Self {
        Self {
            id_field: schema.id_field().to_string(),
            category_field: schema.category_field().to_string(),
            searchable: schema.searchable().to_vec(),
            timestamp_field: schema.timestamp_field().map(str::to_string),
            category_values: schema.category_values().to_vec(),
            fields: schema.fields().to_vec(),
        }
    }
}

impl DatasetV0 {
    /// Convert into a validated store
    ///
    /// Values are converted by the declared kind of their field; `null`
    /// means the field is absent. Fields the schema does not declare are
    /// converted by their natural JSON shape and then rejected by the store.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for values of the wrong shape, and the
    /// classified store error for schema or record inconsistencies.
    pub fn into_store(self) -> Result<RecordStore> {
        let schema = self.schema.to_schema(&self.domain);

        let records = self
            .records
            .into_iter()
            .enumerate()
            .map(|(index, raw)| convert_record(index, raw, &schema))
            .collect::<Result<Vec<_>>>()?;

        RecordStore::new(schema, records).map_err(|e| store_error(&self.domain, e))
    }

    /// Describe an existing store in file form
    ///
    /// # Errors
    ///
    /// Returns `Serialization` if a record cannot be represented as JSON.
    pub fn from_store(store: &RecordStore) -> Result<Self> {
        let records = store
            .all_records()
            .iter()
            .map(|record| match serde_json::to_value(record) {
                Ok(Value::Object(map)) => Ok(map),
                Ok(_) => Ok(Map::new()),
                Err(e) => Err(store_error(
                    store.schema().domain(),
                    GovLensError::Serialization {
                        reason: e.to_string(),
                    },
                )),
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            schema_version: 0,
            domain: store.schema().domain().to_string(),
            schema: SchemaSection::from_schema(store.schema()),
            records,
        })
    }
}

fn convert_record(index: usize, raw: RawRecord, schema: &Schema) -> Result<Record> {
    let mut record = Record::new();
    for (name, value) in raw {
        if value.is_null() {
            continue;
        }
        let converted = match schema.field_kind(&name) {
            Some(kind) => convert_value(index, &name, value, kind)?,
            None => natural_value(index, &name, value)?,
        };
        record.set(name, converted);
    }
    Ok(record)
}

fn convert_value(index: usize, field: &str, value: Value, kind: FieldKind) -> Result<FieldValue> {
    match (kind, value) {
        (FieldKind::Text, Value::String(s)) => Ok(FieldValue::text(s)),
        (FieldKind::Category, Value::String(s)) => Ok(FieldValue::category(s)),
        (FieldKind::Number, Value::Number(n)) => n
            .as_f64()
            .map(FieldValue::number)
            .ok_or_else(|| value_mismatch(index, field, "a finite number")),
        (FieldKind::List, Value::Array(items)) => list_value(index, field, items),
        (kind, _) => Err(value_mismatch(index, field, expected_shape(kind))),
    }
}

fn natural_value(index: usize, field: &str, value: Value) -> Result<FieldValue> {
    match value {
        Value::String(s) => Ok(FieldValue::text(s)),
        Value::Number(n) => n
            .as_f64()
            .map(FieldValue::number)
            .ok_or_else(|| value_mismatch(index, field, "a finite number")),
        Value::Array(items) => list_value(index, field, items),
        _ => Err(value_mismatch(index, field, "a string, number or list")),
    }
}

fn list_value(index: usize, field: &str, items: Vec<Value>) -> Result<FieldValue> {
    let items = items
        .into_iter()
        .map(|item| match item {
            Value::String(s) => Ok(s),
            _ => Err(value_mismatch(index, field, "a list of strings")),
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(FieldValue::list(items))
}

fn expected_shape(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::Text => "a string (text)",
        FieldKind::Category => "a string (category)",
        FieldKind::Number => "a number",
        FieldKind::List => "a list of strings",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use govlens_core::errors::ExErrorKind;
    use serde_json::json;

    fn section() -> SchemaSection {
        SchemaSection {
            id_field: "id".to_string(),
            category_field: "category".to_string(),
            searchable: vec!["name".to_string()],
            timestamp_field: None,
            category_values: Vec::new(),
            fields: vec![
                FieldSpec {
                    name: "id".to_string(),
                    kind: FieldKind::Text,
                },
                FieldSpec {
                    name: "name".to_string(),
                    kind: FieldKind::Text,
                },
                FieldSpec {
                    name: "category".to_string(),
                    kind: FieldKind::Category,
                },
                FieldSpec {
                    name: "violations".to_string(),
                    kind: FieldKind::Number,
                },
            ],
        }
    }

    fn dataset(records: Vec<Value>) -> DatasetV0 {
        DatasetV0 {
            schema_version: 0,
            domain: "policy".to_string(),
            schema: section(),
            records: records
                .into_iter()
                .filter_map(|v| v.as_object().cloned())
                .collect(),
        }
    }

    #[test]
    fn test_values_converted_by_declared_kind() {
        let store = dataset(vec![json!({
            "id": "p1",
            "name": "PII",
            "category": "data_privacy",
            "violations": 3
        })])
        .into_store()
        .unwrap();

        let record = store.get("p1").unwrap();
        assert_eq!(
            record.get("category"),
            Some(&FieldValue::category("data_privacy"))
        );
        assert_eq!(record.get("violations"), Some(&FieldValue::number(3.0)));
    }

    #[test]
    fn test_number_for_text_rejected() {
        let err = dataset(vec![json!({ "id": "p1", "name": 42 })])
            .into_store()
            .unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidInput);
        assert_eq!(err.field(), Some("name"));
    }

    #[test]
    fn test_null_means_absent() {
        let store = dataset(vec![json!({ "id": "p1", "name": null, "category": "x" })])
            .into_store()
            .unwrap();
        assert!(!store.get("p1").unwrap().contains_key("name"));
    }

    #[test]
    fn test_undeclared_field_reaches_store_validation() {
        let err = dataset(vec![json!({ "id": "p1", "owner": "legal" })])
            .into_store()
            .unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::UndeclaredField);
        assert_eq!(err.domain(), Some("policy"));
    }
}
