use crate::errors::Result;
use crate::model::{FieldKind, FieldValue, Record, Schema};
use crate::store::RecordStore;

/// Schema of governance policies
pub fn policy_schema() -> Schema {
    Schema::builder("policy")
        .field("id", FieldKind::Text)
        .field("name", FieldKind::Text)
        .field("description", FieldKind::Text)
        .field("category", FieldKind::Category)
        .field("status", FieldKind::Category)
        .field("severity", FieldKind::Category)
        .field("created", FieldKind::Text)
        .field("last_modified", FieldKind::Text)
        .field("violations", FieldKind::Number)
        .field("conditions", FieldKind::List)
        .field("actions", FieldKind::List)
        .id_field("id")
        .category_field("category")
        .searchable(["name", "description"])
        .timestamp_field("last_modified")
        .category_values([
            "data_privacy",
            "bias_monitoring",
            "documentation",
            "data_retention",
            "api_governance",
        ])
        .build()
}

struct PolicyRow<'a> {
    id: &'a str,
    name: &'a str,
    description: &'a str,
    category: &'a str,
    status: &'a str,
    severity: &'a str,
    created: &'a str,
    last_modified: &'a str,
    violations: u32,
    conditions: &'a [&'a str],
    actions: &'a [&'a str],
}

impl PolicyRow<'_> {
    fn into_record(self) -> Record {
        Record::new()
            .with("id", FieldValue::text(self.id))
            .with("name", FieldValue::text(self.name))
            .with("description", FieldValue::text(self.description))
            .with("category", FieldValue::category(self.category))
            .with("status", FieldValue::category(self.status))
            .with("severity", FieldValue::category(self.severity))
            .with("created", FieldValue::text(self.created))
            .with("last_modified", FieldValue::text(self.last_modified))
            .with("violations", FieldValue::number(f64::from(self.violations)))
            .with("conditions", FieldValue::list(self.conditions.iter().copied()))
            .with("actions", FieldValue::list(self.actions.iter().copied()))
    }
}

/// The five sample policies (four active, one draft)
///
/// # Errors
///
/// Propagates store validation errors.
pub fn policy_store() -> Result<RecordStore> {
    let rows = [
        PolicyRow {
            id: "policy-001",
            name: "PII Data Protection",
            description:
                "Prevents personally identifiable information from being used in model training",
            category: "data_privacy",
            status: "active",
            severity: "critical",
            created: "2024-01-10",
            last_modified: "2024-01-14",
            violations: 3,
            conditions: &["Contains PII fields", "Data not anonymized"],
            actions: &["Block training", "Send alert", "Log violation"],
        },
        PolicyRow {
            id: "policy-002",
            name: "Bias Threshold Monitoring",
            description: "Monitors model fairness metrics and triggers alerts when thresholds are exceeded",
            category: "bias_monitoring",
            status: "active",
            severity: "high",
            created: "2024-01-08",
            last_modified: "2024-01-12",
            violations: 1,
            conditions: &["Demographic parity < 0.8", "Equal opportunity < 0.8"],
            actions: &["Send alert", "Require review", "Log violation"],
        },
        PolicyRow {
            id: "policy-003",
            name: "Model Documentation Requirements",
            description: "Ensures all models have complete documentation before deployment",
            category: "documentation",
            status: "active",
            severity: "medium",
            created: "2024-01-05",
            last_modified: "2024-01-10",
            violations: 5,
            conditions: &["Missing model card", "No bias analysis", "Incomplete testing docs"],
            actions: &["Block deployment", "Send notification", "Log violation"],
        },
        PolicyRow {
            id: "policy-004",
            name: "Data Retention Compliance",
            description: "Enforces data retention policies and automated deletion schedules",
            category: "data_retention",
            status: "active",
            severity: "medium",
            created: "2024-01-03",
            last_modified: "2024-01-08",
            violations: 0,
            conditions: &["Data age > 3 years", "No business justification"],
            actions: &["Auto-delete", "Send notification", "Log action"],
        },
        PolicyRow {
            id: "policy-005",
            name: "External API Usage Monitoring",
            description: "Monitors and controls usage of external APIs for data processing",
            category: "api_governance",
            status: "draft",
            severity: "low",
            created: "2024-01-15",
            last_modified: "2024-01-15",
            violations: 0,
            conditions: &["Unauthorized API usage", "Exceeds rate limits"],
            actions: &["Block requests", "Send alert", "Log usage"],
        },
    ];

    RecordStore::new(
        policy_schema(),
        rows.into_iter().map(PolicyRow::into_record).collect(),
    )
}
