//! CLI integration tests
//!
//! Run the built `govlens` binary against the built-in datasets and
//! scratch dataset files.

use std::fs;
use std::process::{Command, Output};
use tempfile::TempDir;

fn govlens(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_govlens"))
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .expect("Failed to execute CLI")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_query_audit_search() {
    // When: `govlens query --domain audit --search sarah`
    let output = govlens(&["query", "--domain", "audit", "--search", "sarah"]);

    // Then: one of six events matches
    assert!(
        output.status.success(),
        "CLI command should succeed. Stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let out = stdout(&output);
    assert!(out.contains("Showing 1 of 6 events"));
    assert!(out.contains("sarah.johnson@company.com"));
    assert!(out.contains("data_access (1)"));
}

#[test]
fn test_query_json_output() {
    let output = govlens(&[
        "query",
        "--domain",
        "audit",
        "--category",
        "violation",
        "--format",
        "json",
    ]);
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(parsed["matched_count"], 1);
    assert_eq!(parsed["total_count"], 6);
    assert_eq!(parsed["matched"][0]["id"], "audit-003");
    assert_eq!(parsed["buckets"][0]["category_value"], "violation");
    assert_eq!(parsed["buckets"][0]["count"], 1);
}

#[test]
fn test_query_time_range_with_reference() {
    let output = govlens(&[
        "query",
        "--domain",
        "audit",
        "--range",
        "1d",
        "--reference",
        "2024-01-15 12:00:00",
    ]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Showing 3 of 6 events"));
}

#[test]
fn test_query_rejects_bad_range() {
    let output = govlens(&["query", "--domain", "audit", "--range", "2w"]);

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid time range"));
}

#[test]
fn test_unknown_domain_fails() {
    let output = govlens(&["query", "--domain", "finance"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unknown domain"));
}

#[test]
fn test_source_is_required() {
    let output = govlens(&["query", "--search", "sarah"]);
    assert!(!output.status.success());
}

#[test]
fn test_summary_status_counts() {
    let output = govlens(&[
        "summary",
        "--domain",
        "policy",
        "--field",
        "status",
        "--sum",
        "violations",
    ]);
    assert!(output.status.success());

    let out = stdout(&output);
    assert!(out.contains("active: 4 (80.0%)"));
    assert!(out.contains("draft: 1 (20.0%)"));
    assert!(out.contains("Sum of violations: 9"));
}

#[test]
fn test_analyze_completed_report() {
    let output = govlens(&["analyze", "--model", "model-1"]);
    assert!(
        output.status.success(),
        "Stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let out = stdout(&output);
    assert!(out.contains("Customer Scoring Model v2.1"));
    assert!(out.contains("Overall score: 0.855"));
    assert!(out.contains("Equal Opportunity"));
    assert!(out.contains("Recommendations:"));
}

#[test]
fn test_analyze_unknown_model_exits_with_failure() {
    let output = govlens(&["analyze", "--model", "model-9"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("model-9"));
}

#[test]
fn test_analyze_rejects_unknown_attribute() {
    let output = govlens(&["analyze", "--model", "model-1", "--attributes", "gender,income"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_export_writes_matched_records() {
    let temp_dir = TempDir::new().unwrap();
    let out_path = temp_dir.path().join("violations.json");

    let output = govlens(&[
        "export",
        "--domain",
        "audit",
        "--category",
        "violation",
        "--output",
        out_path.to_str().unwrap(),
    ]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Exported 1 of 6 records"));

    let parsed: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out_path).unwrap()).unwrap();
    let rows = parsed.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["user"], "automated-system");
}

#[test]
fn test_query_dataset_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("models.yaml");
    fs::write(
        &path,
        r#"
schema_version: 0
domain: models
schema:
  id_field: id
  category_field: model_type
  searchable: [name]
  fields:
    - { name: id, kind: text }
    - { name: name, kind: text }
    - { name: model_type, kind: category }
records:
  - { id: model-1, name: Customer Scoring Model v2.1, model_type: Classification }
  - { id: model-2, name: Hiring Algorithm v1.3, model_type: Ranking }
"#,
    )
    .unwrap();

    let output = govlens(&["query", "--file", path.to_str().unwrap(), "--search", "hiring"]);
    assert!(output.status.success());

    let out = stdout(&output);
    assert!(out.contains("Showing 1 of 2 records"));
    assert!(out.contains("model-2 | Hiring Algorithm v1.3 | [Ranking]"));
}

#[test]
fn test_invalid_dataset_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.yaml");
    fs::write(&path, "schema_version: 7\ndomain: audit\n").unwrap();

    let output = govlens(&["query", "--file", path.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("ERR_INVALID_INPUT"));
}
