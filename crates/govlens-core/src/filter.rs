//! Predicate filter
//!
//! A record matches [`FilterCriteria`] when all of these hold:
//! - some searchable field contains the search text (case-insensitive),
//!   or the search text is empty/whitespace;
//! - the categorical field equals the selected category exactly, or the
//!   selector is `"all"`;
//! - the record's timestamp lies in the time window, if one is given.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{GovLensError, Result};
use crate::model::{Record, Schema};

/// Sentinel category value that matches every record
pub const ALL_CATEGORIES: &str = "all";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Category half of the criteria
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CategorySelector {
    #[default]
    All,
    Value(String),
}

impl CategorySelector {
    pub fn matches(&self, value: &str) -> bool {
        match self {
            CategorySelector::All => true,
            CategorySelector::Value(expected) => expected == value,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CategorySelector::All => ALL_CATEGORIES,
            CategorySelector::Value(v) => v,
        }
    }
}

impl From<&str> for CategorySelector {
    fn from(value: &str) -> Self {
        if value == ALL_CATEGORIES {
            CategorySelector::All
        } else {
            CategorySelector::Value(value.to_string())
        }
    }
}

impl From<String> for CategorySelector {
    fn from(value: String) -> Self {
        if value == ALL_CATEGORIES {
            CategorySelector::All
        } else {
            CategorySelector::Value(value)
        }
    }
}

impl From<CategorySelector> for String {
    fn from(selector: CategorySelector) -> Self {
        selector.as_str().to_string()
    }
}

/// Relative date-range options of the audit view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeRange {
    #[serde(rename = "1d")]
    Day,
    #[serde(rename = "7d")]
    Week,
    #[serde(rename = "30d")]
    Month,
    #[serde(rename = "90d")]
    Quarter,
}

impl TimeRange {
    pub fn duration(&self) -> Duration {
        match self {
            TimeRange::Day => Duration::days(1),
            TimeRange::Week => Duration::days(7),
            TimeRange::Month => Duration::days(30),
            TimeRange::Quarter => Duration::days(90),
        }
    }

    pub fn token(&self) -> &'static str {
        match self {
            TimeRange::Day => "1d",
            TimeRange::Week => "7d",
            TimeRange::Month => "30d",
            TimeRange::Quarter => "90d",
        }
    }
}

impl FromStr for TimeRange {
    type Err = GovLensError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "1d" => Ok(TimeRange::Day),
            "7d" => Ok(TimeRange::Week),
            "30d" => Ok(TimeRange::Month),
            "90d" => Ok(TimeRange::Quarter),
            other => Err(GovLensError::InvalidTimeRange {
                token: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Half-open window `(reference - range, reference]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub range: TimeRange,
    pub reference: NaiveDateTime,
}

impl TimeWindow {
    pub fn new(range: TimeRange, reference: NaiveDateTime) -> Self {
        Self { range, reference }
    }

    pub fn contains(&self, at: NaiveDateTime) -> bool {
        at <= self.reference && at > self.reference - self.range.duration()
    }
}

/// Parse a dataset timestamp (`YYYY-MM-DD HH:MM:SS` or `YYYY-MM-DD`)
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(value, DATE_FORMAT)
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Parse a reference timestamp supplied by a caller
///
/// # Errors
///
/// Returns `InvalidTimestamp` if neither accepted format matches.
pub fn parse_reference(value: &str) -> Result<NaiveDateTime> {
    parse_timestamp(value).ok_or_else(|| GovLensError::InvalidTimestamp {
        value: value.to_string(),
    })
}

/// One filter request: search text, category and optional time window
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterCriteria {
    pub search_text: String,
    pub category: CategorySelector,
    pub window: Option<TimeWindow>,
}

impl FilterCriteria {
    pub fn new(search_text: impl Into<String>, category: impl Into<CategorySelector>) -> Self {
        Self {
            search_text: search_text.into(),
            category: category.into(),
            window: None,
        }
    }

    /// Criteria matching every record
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_window(mut self, window: TimeWindow) -> Self {
        self.window = Some(window);
        self
    }

    /// True when the criteria cannot exclude any record
    pub fn is_unrestricted(&self) -> bool {
        self.search_text.trim().is_empty()
            && self.category == CategorySelector::All
            && self.window.is_none()
    }
}

/// Criteria prepared once per query against one schema
///
/// Lower-cases the needle up front so per-record checks do not repeat it.
#[derive(Debug)]
pub struct PreparedFilter<'a> {
    schema: &'a Schema,
    needle: Option<String>,
    category: &'a CategorySelector,
    window: Option<TimeWindow>,
}

impl<'a> PreparedFilter<'a> {
    pub fn new(criteria: &'a FilterCriteria, schema: &'a Schema) -> Self {
        let trimmed = criteria.search_text.trim();
        let needle = (!trimmed.is_empty()).then(|| criteria.search_text.to_lowercase());
        // a window without a timestamp field cannot restrict anything
        let window = criteria.window.filter(|_| schema.timestamp_field().is_some());
        Self {
            schema,
            needle,
            category: &criteria.category,
            window,
        }
    }

    /// True when `criteria` carried a window this schema cannot apply
    pub fn ignores_window(&self, criteria: &FilterCriteria) -> bool {
        criteria.window.is_some() && self.window.is_none()
    }

    pub fn matches(&self, record: &Record) -> bool {
        self.text_matches(record) && self.category_matches(record) && self.window_matches(record)
    }

    fn text_matches(&self, record: &Record) -> bool {
        let Some(needle) = &self.needle else {
            return true;
        };
        self.schema
            .searchable()
            .iter()
            .any(|field| record.text_of(field).to_lowercase().contains(needle.as_str()))
    }

    fn category_matches(&self, record: &Record) -> bool {
        match self.category {
            CategorySelector::All => true,
            CategorySelector::Value(_) => {
                let value = record.text_of(self.schema.category_field());
                record.contains_key(self.schema.category_field()) && self.category.matches(&value)
            }
        }
    }

    fn window_matches(&self, record: &Record) -> bool {
        let (Some(window), Some(field)) = (self.window, self.schema.timestamp_field()) else {
            return true;
        };
        record
            .get(field)
            .and_then(|v| v.as_str())
            .and_then(parse_timestamp)
            .is_some_and(|at| window.contains(at))
    }
}

/// Decide whether a single record matches `criteria`
///
/// Prepares the criteria on every call and logs nothing; filter many
/// records through one [`PreparedFilter`] instead.
pub fn matches(record: &Record, criteria: &FilterCriteria, schema: &Schema) -> bool {
    PreparedFilter::new(criteria, schema).matches(record)
}
