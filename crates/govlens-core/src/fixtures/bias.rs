use crate::analysis::{metrics_store, MetricSample, DEFAULT_THRESHOLD};
use crate::errors::Result;
use crate::model::{FieldKind, FieldValue, Record, Schema};
use crate::store::RecordStore;

/// Fairness metric observations shown by the bias-detection view
pub fn metric_samples() -> Vec<MetricSample> {
    vec![
        MetricSample::new(
            "Demographic Parity",
            0.89,
            "Equal positive prediction rates across groups",
        ),
        MetricSample::new(
            "Equal Opportunity",
            0.76,
            "Equal true positive rates across groups",
        ),
        MetricSample::new("Equalized Odds", 0.92, "Equal TPR and FPR across groups"),
        MetricSample::new(
            "Calibration",
            0.85,
            "Predicted probabilities match actual outcomes",
        ),
    ]
}

/// Sample metrics graded at the default threshold
///
/// # Errors
///
/// Propagates store validation errors.
pub fn bias_metric_store() -> Result<RecordStore> {
    metrics_store(&metric_samples(), DEFAULT_THRESHOLD)
}

/// Schema of the analysable model catalog, grouped by model type
pub fn model_schema() -> Schema {
    Schema::builder("models")
        .field("id", FieldKind::Text)
        .field("name", FieldKind::Text)
        .field("model_type", FieldKind::Category)
        .field("last_analyzed", FieldKind::Text)
        .id_field("id")
        .category_field("model_type")
        .searchable(["name"])
        .timestamp_field("last_analyzed")
        .build()
}

/// The three catalogued models
///
/// # Errors
///
/// Propagates store validation errors.
pub fn model_catalog() -> Result<RecordStore> {
    let models = [
        ("model-1", "Customer Scoring Model v2.1", "Classification", "2024-01-15"),
        ("model-2", "Hiring Algorithm v1.3", "Ranking", "2024-01-14"),
        ("model-3", "Credit Risk Assessment", "Regression", "2024-01-12"),
    ];

    let records = models
        .into_iter()
        .map(|(id, name, model_type, last_analyzed)| {
            Record::new()
                .with("id", FieldValue::text(id))
                .with("name", FieldValue::text(name))
                .with("model_type", FieldValue::category(model_type))
                .with("last_analyzed", FieldValue::text(last_analyzed))
        })
        .collect();

    RecordStore::new(model_schema(), records)
}
