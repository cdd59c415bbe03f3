//! Dataset parser with validation
//!
//! Parses YAML or JSON, validates the format version, and builds the store

use crate::errors::{dataset_validation, io_error, Result};
use crate::format_v0::DatasetV0;
use govlens_core::{log_op_end, log_op_error, log_op_start, RecordStore};
use std::fs;
use std::path::Path;
use std::time::Instant;

/// Load a dataset file into a validated store
///
/// Files ending in `.json` are parsed as JSON, everything else as YAML.
///
/// # Errors
///
/// Returns `Io` if the file cannot be read, `InvalidInput` for malformed
/// documents, and the classified store error for inconsistent contents.
pub fn load_dataset_file(path: &Path) -> Result<RecordStore> {
    let path_str = path.display().to_string();
    log_op_start!("load_dataset", path = path_str.as_str());
    let start = Instant::now();

    let result = (|| -> Result<RecordStore> {
        let content = fs::read_to_string(path).map_err(|e| io_error("dataset_read", e))?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let dataset = if is_json {
            parse_dataset_json(&content)?
        } else {
            parse_dataset_str(&content)?
        };

        dataset.into_store()
    })();

    let elapsed = start.elapsed().as_millis() as u64;
    match &result {
        Ok(store) => {
            log_op_end!(
                "load_dataset",
                duration_ms = elapsed,
                domain = store.schema().domain(),
                record_count = store.len()
            );
        }
        Err(e) => log_op_error!("load_dataset", e.clone(), duration_ms = elapsed),
    }
    result
}

/// Parse a YAML dataset from a string
///
/// # Errors
///
/// Returns `InvalidInput` for malformed YAML or an unsupported version.
pub fn parse_dataset_str(content: &str) -> Result<DatasetV0> {
    let dataset: DatasetV0 = serde_yaml::from_str(content)
        .map_err(|e| dataset_validation(&format!("YAML parse error: {}", e)))?;

    validate_dataset(&dataset)?;

    Ok(dataset)
}

/// Parse a JSON dataset from a string
///
/// # Errors
///
/// Returns `InvalidInput` for malformed JSON or an unsupported version.
pub fn parse_dataset_json(content: &str) -> Result<DatasetV0> {
    let dataset: DatasetV0 = serde_json::from_str(content)
        .map_err(|e| dataset_validation(&format!("JSON parse error: {}", e)))?;

    validate_dataset(&dataset)?;

    Ok(dataset)
}

/// Checks that do not need the core schema rules
fn validate_dataset(dataset: &DatasetV0) -> Result<()> {
    if dataset.schema_version != 0 {
        return Err(dataset_validation(&format!(
            "Unsupported schema_version: {}. Expected 0",
            dataset.schema_version
        )));
    }

    if dataset.domain.trim().is_empty() {
        return Err(dataset_validation("Dataset domain must not be empty"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_dataset() {
        let yaml = r#"
schema_version: 0
domain: audit
schema:
  id_field: id
  category_field: category
  searchable: [user]
  fields:
    - { name: id, kind: text }
    - { name: user, kind: text }
    - { name: category, kind: category }
records:
  - { id: audit-001, user: sarah, category: data_access }
"#;

        let result = parse_dataset_str(yaml);
        assert!(result.is_ok());
        assert_eq!(result.unwrap().records.len(), 1);
    }

    #[test]
    fn test_reject_invalid_schema_version() {
        let yaml = r#"
schema_version: 99
domain: audit
schema:
  id_field: id
  category_field: category
  fields: []
"#;

        let result = parse_dataset_str(yaml);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(err.to_string().contains("schema_version"));
    }

    #[test]
    fn test_reject_unknown_field_kind() {
        let json = r#"{
            "schema_version": 0,
            "domain": "audit",
            "schema": {
                "id_field": "id",
                "category_field": "category",
                "fields": [{ "name": "id", "kind": "date" }]
            }
        }"#;

        let err = parse_dataset_json(json).unwrap_err();
        assert_eq!(err.op(), Some("dataset_parse"));
        assert!(err.to_string().contains("JSON parse error"));
    }

    #[test]
    fn test_reject_blank_domain() {
        let yaml = r#"
schema_version: 0
domain: "  "
schema:
  id_field: id
  category_field: category
  fields: []
"#;

        assert!(parse_dataset_str(yaml).is_err());
    }
}
