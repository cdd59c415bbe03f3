//! Categorical aggregation
//!
//! Buckets come out in first-seen order of each distinct value while
//! scanning the input in order. Grouping uses the exact value: `"Active"` and
//! `"active"` are separate buckets. Records without the grouped field (or
//! with a list value) are not counted.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::model::{Record, Schema};

/// Count of records sharing one category value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateBucket {
    pub category_value: String,
    pub count: usize,
}

impl AggregateBucket {
    pub fn new(category_value: impl Into<String>, count: usize) -> Self {
        Self {
            category_value: category_value.into(),
            count,
        }
    }

    /// Share of `total` held by this bucket, in percent
    pub fn percentage_of(&self, total: usize) -> f64 {
        percentage(self.count, total)
    }
}

/// `count / total * 100`, or 0.0 when `total` is zero
pub fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

/// Group records by the schema's categorical field
pub fn aggregate<'r, I>(records: I, schema: &Schema) -> Vec<AggregateBucket>
where
    I: IntoIterator<Item = &'r Record>,
{
    aggregate_by(records, schema.category_field())
}

/// Group records by any field using the same first-seen ordering
pub fn aggregate_by<'r, I>(records: I, field: &str) -> Vec<AggregateBucket>
where
    I: IntoIterator<Item = &'r Record>,
{
    let mut buckets: Vec<AggregateBucket> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for record in records {
        let Some(key) = record.get(field).and_then(|v| v.group_key()) else {
            continue;
        };
        match positions.get(key.as_ref()).copied() {
            Some(position) => buckets[position].count += 1,
            None => {
                positions.insert(key.to_string(), buckets.len());
                buckets.push(AggregateBucket::new(key, 1));
            }
        }
    }

    buckets
}

/// Aggregate including zero-count buckets for declared category values
///
/// Declared values come first in declaration order, followed by any
/// undeclared values present in the records, in first-seen order. Without
/// declared values this is identical to [`aggregate`].
pub fn aggregate_with_declared<'r, I>(records: I, schema: &Schema) -> Vec<AggregateBucket>
where
    I: IntoIterator<Item = &'r Record>,
{
    let observed = aggregate(records, schema);
    let declared = schema.category_values();

    let mut buckets: Vec<AggregateBucket> = declared
        .iter()
        .map(|value| {
            let count = observed
                .iter()
                .find(|b| &b.category_value == value)
                .map_or(0, |b| b.count);
            AggregateBucket::new(value.clone(), count)
        })
        .collect();

    buckets.extend(
        observed
            .into_iter()
            .filter(|b| !declared.contains(&b.category_value)),
    );

    buckets
}

/// Sum of a numeric field over the records; non-numeric values are skipped
pub fn sum_by<'r, I>(records: I, field: &str) -> f64
where
    I: IntoIterator<Item = &'r Record>,
{
    records
        .into_iter()
        .filter_map(|r| r.get(field).and_then(|v| v.as_number()))
        .sum()
}

/// Total count across buckets
pub fn bucket_total(buckets: &[AggregateBucket]) -> usize {
    buckets.iter().map(|b| b.count).sum()
}
