use crate::errors::Result;
use crate::model::{FieldKind, FieldValue, Record, Schema};
use crate::store::RecordStore;

/// Schema of audit events
///
/// Search covers user, action and resource; `category` drives the
/// dropdown and grouping; `timestamp` backs the date-range selector.
pub fn audit_schema() -> Schema {
    Schema::builder("audit")
        .field("id", FieldKind::Text)
        .field("timestamp", FieldKind::Text)
        .field("user", FieldKind::Text)
        .field("action", FieldKind::Text)
        .field("resource", FieldKind::Text)
        .field("status", FieldKind::Category)
        .field("ip", FieldKind::Text)
        .field("details", FieldKind::Text)
        .field("category", FieldKind::Category)
        .id_field("id")
        .category_field("category")
        .searchable(["user", "action", "resource"])
        .timestamp_field("timestamp")
        .category_values([
            "data_access",
            "policy_change",
            "violation",
            "data_export",
            "deployment",
            "analysis",
        ])
        .build()
}

#[allow(clippy::too_many_arguments)]
fn event(
    id: &str,
    timestamp: &str,
    user: &str,
    action: &str,
    resource: &str,
    status: &str,
    ip: &str,
    details: &str,
    category: &str,
) -> Record {
    Record::new()
        .with("id", FieldValue::text(id))
        .with("timestamp", FieldValue::text(timestamp))
        .with("user", FieldValue::text(user))
        .with("action", FieldValue::text(action))
        .with("resource", FieldValue::text(resource))
        .with("status", FieldValue::category(status))
        .with("ip", FieldValue::text(ip))
        .with("details", FieldValue::text(details))
        .with("category", FieldValue::category(category))
}

/// The six sample audit events
///
/// # Errors
///
/// Propagates store validation errors.
pub fn audit_store() -> Result<RecordStore> {
    let records = vec![
        event(
            "audit-001",
            "2024-01-15 14:23:12",
            "sarah.johnson@company.com",
            "Model Data Access",
            "Customer Scoring Model v2.1",
            "success",
            "192.168.1.100",
            "Accessed training dataset for bias analysis",
            "data_access",
        ),
        event(
            "audit-002",
            "2024-01-15 13:45:33",
            "john.doe@company.com",
            "Policy Update",
            "PII Data Protection Policy",
            "success",
            "192.168.1.101",
            "Updated retention period from 2 years to 3 years",
            "policy_change",
        ),
        event(
            "audit-003",
            "2024-01-15 12:18:45",
            "automated-system",
            "Compliance Violation",
            "Hiring Algorithm v1.3",
            "warning",
            "system",
            "Bias threshold exceeded for gender attribute",
            "violation",
        ),
        event(
            "audit-004",
            "2024-01-15 11:32:17",
            "mike.wilson@company.com",
            "Data Export",
            "Audit Trail Report",
            "success",
            "192.168.1.102",
            "Exported compliance report for Q4 2023",
            "data_export",
        ),
        event(
            "audit-005",
            "2024-01-15 10:15:22",
            "jane.smith@company.com",
            "Model Deployment",
            "Credit Risk Assessment v2.0",
            "failed",
            "192.168.1.103",
            "Deployment failed due to missing bias check approval",
            "deployment",
        ),
        event(
            "audit-006",
            "2024-01-15 09:47:55",
            "automated-system",
            "Bias Analysis",
            "Customer Scoring Model v2.1",
            "success",
            "system",
            "Automated bias detection completed successfully",
            "analysis",
        ),
    ];

    RecordStore::new(audit_schema(), records)
}
