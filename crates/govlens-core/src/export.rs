//! JSON export of matched records
//!
//! Each record becomes an object whose keys follow the schema's field
//! declaration order. Fields a record lacks are omitted.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::errors::{GovLensError, Result};
use crate::model::{Record, Schema};

/// One record serialized in schema field order
pub struct ExportRow<'a> {
    record: &'a Record,
    schema: &'a Schema,
}

impl<'a> ExportRow<'a> {
    pub fn new(record: &'a Record, schema: &'a Schema) -> Self {
        Self { record, schema }
    }
}

impl Serialize for ExportRow<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let present = self
            .schema
            .fields()
            .iter()
            .filter_map(|spec| self.record.get(&spec.name).map(|v| (&spec.name, v)));
        let mut map = serializer.serialize_map(None)?;
        for (name, value) in present {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Serialize records as a pretty-printed JSON array
///
/// # Errors
///
/// Returns `Serialization` if serde_json fails to write the document.
pub fn export_json<'r, I>(records: I, schema: &Schema) -> Result<String>
where
    I: IntoIterator<Item = &'r Record>,
{
    let rows: Vec<ExportRow<'_>> = records
        .into_iter()
        .map(|record| ExportRow::new(record, schema))
        .collect();
    serde_json::to_string_pretty(&rows).map_err(|e| GovLensError::Serialization {
        reason: e.to_string(),
    })
}
