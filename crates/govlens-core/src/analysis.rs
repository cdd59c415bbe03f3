//! Bias analysis as an explicit request/result pair
//!
//! No fairness metric is computed from model data here. A request names a
//! catalogued model and a pass threshold; the outcome grades the supplied
//! metric samples against that threshold. Unknown models and empty metric
//! sets produce [`AnalysisOutcome::Failed`] rather than an error, so callers
//! render both states the same way.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use crate::errors::{GovLensError, Result};
use crate::filter::FilterCriteria;
use crate::model::{FieldKind, FieldValue, Record, Schema};
use crate::query::query;
use crate::store::RecordStore;
use crate::{log_op_end, log_op_error, log_op_start};

/// Pass threshold used when a request does not set one
pub const DEFAULT_THRESHOLD: f64 = 0.8;

pub const STATUS_PASS: &str = "pass";
pub const STATUS_FAIL: &str = "fail";

/// Attribute whose groups a fairness metric compares
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProtectedAttribute {
    Gender,
    Race,
    Age,
}

impl ProtectedAttribute {
    pub const ALL: [ProtectedAttribute; 3] = [
        ProtectedAttribute::Gender,
        ProtectedAttribute::Race,
        ProtectedAttribute::Age,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProtectedAttribute::Gender => "gender",
            ProtectedAttribute::Race => "race",
            ProtectedAttribute::Age => "age",
        }
    }
}

impl FromStr for ProtectedAttribute {
    type Err = GovLensError;

    fn from_str(s: &str) -> Result<Self> {
        let lowered = s.trim().to_lowercase();
        ProtectedAttribute::ALL
            .into_iter()
            .find(|a| a.as_str() == lowered)
            .ok_or_else(|| GovLensError::UnknownAttribute {
                name: s.to_string(),
            })
    }
}

impl fmt::Display for ProtectedAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One fairness metric observation for a model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSample {
    pub name: String,
    pub value: f64,
    pub description: String,
}

impl MetricSample {
    pub fn new(name: impl Into<String>, value: f64, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value,
            description: description.into(),
        }
    }
}

/// Request to grade one model's metrics
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    pub model_id: String,
    pub protected_attributes: Vec<ProtectedAttribute>,
    pub threshold: f64,
}

impl AnalysisRequest {
    /// Request with the default threshold over all protected attributes
    pub fn new(model_id: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            protected_attributes: ProtectedAttribute::ALL.to_vec(),
            threshold: DEFAULT_THRESHOLD,
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_attributes(mut self, attributes: Vec<ProtectedAttribute>) -> Self {
        self.protected_attributes = attributes;
        self
    }

    /// # Errors
    ///
    /// Returns `InvalidThreshold` unless the threshold is a number in `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        if (0.0..=1.0).contains(&self.threshold) {
            Ok(())
        } else {
            Err(GovLensError::InvalidThreshold {
                threshold: self.threshold,
            })
        }
    }
}

/// Graded result of a completed analysis
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub model_id: String,
    pub model_name: String,
    pub threshold: f64,
    pub protected_attributes: Vec<ProtectedAttribute>,
    /// Mean of all metric values
    pub overall_score: f64,
    /// Graded metrics, queryable like any other domain
    pub metrics: RecordStore,
    pub recommendations: Vec<String>,
}

impl AnalysisReport {
    /// Names of metrics below the threshold, in sample order
    pub fn failing_metrics(&self) -> Vec<String> {
        query(&self.metrics, &FilterCriteria::new("", STATUS_FAIL))
            .matched
            .into_iter()
            .map(|r| r.text_of("name").into_owned())
            .collect()
    }

    pub fn passed(&self) -> bool {
        self.failing_metrics().is_empty()
    }
}

/// Outcome of an analysis request
#[derive(Debug, Clone)]
pub enum AnalysisOutcome {
    Completed(AnalysisReport),
    Failed { model_id: String, reason: String },
}

impl AnalysisOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, AnalysisOutcome::Completed(_))
    }

    pub fn report(&self) -> Option<&AnalysisReport> {
        match self {
            AnalysisOutcome::Completed(report) => Some(report),
            AnalysisOutcome::Failed { .. } => None,
        }
    }
}

/// Schema of graded fairness metrics, grouped by pass/fail status
pub fn metric_schema() -> Schema {
    Schema::builder("bias")
        .field("name", FieldKind::Text)
        .field("value", FieldKind::Number)
        .field("threshold", FieldKind::Number)
        .field("status", FieldKind::Category)
        .field("description", FieldKind::Text)
        .id_field("name")
        .category_field("status")
        .searchable(["name", "description"])
        .category_values([STATUS_PASS, STATUS_FAIL])
        .build()
}

/// Grade samples against `threshold`: `pass` when `value >= threshold`
///
/// # Errors
///
/// Returns `DuplicateIdentifier` if two samples share a name.
pub fn metrics_store(samples: &[MetricSample], threshold: f64) -> Result<RecordStore> {
    let records = samples
        .iter()
        .map(|sample| {
            let status = if sample.value >= threshold {
                STATUS_PASS
            } else {
                STATUS_FAIL
            };
            Record::new()
                .with("name", FieldValue::text(&sample.name))
                .with("value", FieldValue::number(sample.value))
                .with("threshold", FieldValue::number(threshold))
                .with("status", FieldValue::category(status))
                .with("description", FieldValue::text(&sample.description))
        })
        .collect();
    RecordStore::new(metric_schema(), records)
}

fn recommendations(failing: &[String]) -> Vec<String> {
    if failing.is_empty() {
        return Vec::new();
    }
    let mut out: Vec<String> = failing
        .iter()
        .map(|name| {
            format!(
                "Consider re-balancing training data to improve {} metric",
                name
            )
        })
        .collect();
    out.push("Review feature selection to reduce potential bias sources".to_string());
    out.push("Implement post-processing techniques to improve fairness".to_string());
    out
}

/// Run one analysis request against a model catalog
///
/// `catalog` is any store whose identifier is the model id and which has a
/// `name` field (see [`crate::fixtures::model_catalog`]).
///
/// # Errors
///
/// Returns `InvalidThreshold` for an out-of-range threshold and propagates
/// store errors for duplicate metric names. Unknown models and missing
/// metrics are reported as [`AnalysisOutcome::Failed`].
pub fn analyze(
    catalog: &RecordStore,
    samples: &[MetricSample],
    request: &AnalysisRequest,
) -> Result<AnalysisOutcome> {
    log_op_start!("analyze", model_id = request.model_id.as_str());
    let start = Instant::now();

    let result = (|| -> Result<AnalysisOutcome> {
        request.validate()?;

        let Some(model) = catalog.get(&request.model_id) else {
            return Ok(AnalysisOutcome::Failed {
                model_id: request.model_id.clone(),
                reason: format!("model '{}' is not in the catalog", request.model_id),
            });
        };

        if samples.is_empty() {
            return Ok(AnalysisOutcome::Failed {
                model_id: request.model_id.clone(),
                reason: "no fairness metrics available".to_string(),
            });
        }

        let metrics = metrics_store(samples, request.threshold)?;
        let overall_score =
            samples.iter().map(|s| s.value).sum::<f64>() / samples.len() as f64;

        let mut report = AnalysisReport {
            model_id: request.model_id.clone(),
            model_name: model.text_of("name").into_owned(),
            threshold: request.threshold,
            protected_attributes: request.protected_attributes.clone(),
            overall_score,
            metrics,
            recommendations: Vec::new(),
        };
        report.recommendations = recommendations(&report.failing_metrics());

        Ok(AnalysisOutcome::Completed(report))
    })();

    let elapsed = start.elapsed().as_millis() as u64;
    match &result {
        Ok(outcome) => {
            log_op_end!(
                "analyze",
                duration_ms = elapsed,
                completed = outcome.is_completed()
            );
        }
        Err(e) => log_op_error!("analyze", e.clone(), duration_ms = elapsed),
    }
    result
}
