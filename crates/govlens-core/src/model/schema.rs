use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::FieldKind;
use crate::errors::{GovLensError, Result};

/// One declared field of a schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub kind: FieldKind,
}

/// Per-domain description of field roles
///
/// A schema names the identifier field, the categorical field used for
/// equality filtering and grouping, the free-text-searchable fields and,
/// optionally, a timestamp field for time-window filtering. `fields` keeps
/// declaration order, which is also the export column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    domain: String,
    id_field: String,
    category_field: String,
    searchable: Vec<String>,
    timestamp_field: Option<String>,
    category_values: Vec<String>,
    fields: Vec<FieldSpec>,
}

impl Schema {
    /// Start building a schema for `domain`
    pub fn builder(domain: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder {
            schema: Schema {
                domain: domain.into(),
                id_field: String::new(),
                category_field: String::new(),
                searchable: Vec::new(),
                timestamp_field: None,
                category_values: Vec::new(),
                fields: Vec::new(),
            },
        }
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn id_field(&self) -> &str {
        &self.id_field
    }

    pub fn category_field(&self) -> &str {
        &self.category_field
    }

    pub fn searchable(&self) -> &[String] {
        &self.searchable
    }

    pub fn timestamp_field(&self) -> Option<&str> {
        self.timestamp_field.as_deref()
    }

    /// Declared category values (dropdown options), possibly empty
    pub fn category_values(&self) -> &[String] {
        &self.category_values
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Declared kind of `name`, if the field exists
    pub fn field_kind(&self, name: &str) -> Option<FieldKind> {
        self.fields.iter().find(|f| f.name == name).map(|f| f.kind)
    }

    pub fn declares(&self, name: &str) -> bool {
        self.field_kind(name).is_some()
    }

    /// Check the schema is internally consistent
    ///
    /// # Errors
    ///
    /// Returns `InvalidSchema` when a role field is empty or undeclared,
    /// a field is declared twice, or a role field has an unusable kind.
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: String| GovLensError::InvalidSchema {
            domain: self.domain.clone(),
            reason,
        };

        if self.fields.is_empty() {
            return Err(invalid("no fields declared".to_string()));
        }

        let mut seen = HashSet::new();
        for spec in &self.fields {
            if spec.name.trim().is_empty() {
                return Err(invalid("field with empty name".to_string()));
            }
            if !seen.insert(spec.name.as_str()) {
                return Err(invalid(format!("field '{}' declared twice", spec.name)));
            }
        }

        if self.id_field.is_empty() {
            return Err(invalid("identifier field not set".to_string()));
        }
        match self.field_kind(&self.id_field) {
            Some(FieldKind::Text) | Some(FieldKind::Category) => {}
            Some(kind) => {
                return Err(invalid(format!(
                    "identifier field '{}' must be text or category, not {}",
                    self.id_field, kind
                )))
            }
            None => {
                return Err(invalid(format!(
                    "identifier field '{}' is not declared",
                    self.id_field
                )))
            }
        }

        if self.category_field.is_empty() {
            return Err(invalid("categorical field not set".to_string()));
        }
        match self.field_kind(&self.category_field) {
            Some(FieldKind::List) => {
                return Err(invalid(format!(
                    "categorical field '{}' cannot be a list",
                    self.category_field
                )))
            }
            Some(_) => {}
            None => {
                return Err(invalid(format!(
                    "categorical field '{}' is not declared",
                    self.category_field
                )))
            }
        }

        for name in &self.searchable {
            if !self.declares(name) {
                return Err(invalid(format!(
                    "searchable field '{}' is not declared",
                    name
                )));
            }
        }

        if let Some(ts) = &self.timestamp_field {
            if self.field_kind(ts) != Some(FieldKind::Text) {
                return Err(invalid(format!(
                    "timestamp field '{}' must be a declared text field",
                    ts
                )));
            }
        }

        Ok(())
    }
}

/// Builder for [`Schema`]; validation happens when a store is built
#[derive(Debug, Clone)]
pub struct SchemaBuilder {
    schema: Schema,
}

impl SchemaBuilder {
    /// Declare a field
    pub fn field(mut self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.schema.fields.push(FieldSpec {
            name: name.into(),
            kind,
        });
        self
    }

    pub fn id_field(mut self, name: impl Into<String>) -> Self {
        self.schema.id_field = name.into();
        self
    }

    pub fn category_field(mut self, name: impl Into<String>) -> Self {
        self.schema.category_field = name.into();
        self
    }

    pub fn searchable<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.schema.searchable = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn timestamp_field(mut self, name: impl Into<String>) -> Self {
        self.schema.timestamp_field = Some(name.into());
        self
    }

    pub fn category_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.schema.category_values = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn build(self) -> Schema {
        self.schema
    }
}
