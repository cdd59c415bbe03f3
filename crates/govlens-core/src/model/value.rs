use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Declared kind of a schema field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Free text (names, descriptions, emails)
    Text,
    /// Numeric value (scores, thresholds, violation counts)
    Number,
    /// Enumerated value drawn from a small closed set
    Category,
    /// Ordered list of strings (policy conditions and actions)
    List,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Number => "number",
            FieldKind::Category => "category",
            FieldKind::List => "list",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single field value inside a [`Record`](super::Record)
///
/// Serializes untagged so exported records read as plain JSON objects.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Category(String),
    List(Vec<String>),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    pub fn category(value: impl Into<String>) -> Self {
        FieldValue::Category(value.into())
    }

    pub fn number(value: f64) -> Self {
        FieldValue::Number(value)
    }

    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FieldValue::List(items.into_iter().map(Into::into).collect())
    }

    /// The kind this value satisfies
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Text(_) => FieldKind::Text,
            FieldValue::Number(_) => FieldKind::Number,
            FieldValue::Category(_) => FieldKind::Category,
            FieldValue::List(_) => FieldKind::List,
        }
    }

    /// Text form used for substring search
    ///
    /// Lists are joined with single spaces; numbers use their shortest
    /// round-trip representation.
    pub fn display_text(&self) -> Cow<'_, str> {
        match self {
            FieldValue::Text(s) | FieldValue::Category(s) => Cow::Borrowed(s.as_str()),
            FieldValue::Number(n) => Cow::Owned(n.to_string()),
            FieldValue::List(items) => Cow::Owned(items.join(" ")),
        }
    }

    /// Grouping key for aggregation; lists cannot be grouped
    pub fn group_key(&self) -> Option<Cow<'_, str>> {
        match self {
            FieldValue::List(_) => None,
            other => Some(other.display_text()),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) | FieldValue::Category(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_text())
    }
}
