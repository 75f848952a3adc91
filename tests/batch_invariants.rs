//! Batch validation invariants: totality, partition, and the
//! one-alert-per-batch policy.

use rollbook::alert::MockAlertGateway;
use rollbook::batch::{BatchReport, BatchValidator};
use rollbook::record::TableRecord;
use rollbook::roster::ActionSpec;
use serde_json::{json, Value};

fn headers() -> Vec<String> {
    ActionSpec::headers().iter().map(|s| s.to_string()).collect()
}

fn good_row() -> Vec<Value> {
    vec![json!("JOIN"), json!("Welcome"), json!("<p>Hi</p>"), json!("")]
}

#[test]
fn decode_is_total_over_hostile_rows() {
    // Wrong arities, wrong types, nulls: always Err, never a panic.
    let hostile: Vec<Vec<Value>> = vec![
        vec![],
        vec![json!(null)],
        vec![json!([1, 2]), json!({"a": 1}), json!(3.5), json!(true), json!("extra")],
        vec![json!("JOIN")],
        vec![json!(0), json!(0), json!(0), json!("zero")],
    ];

    for row in &hostile {
        assert!(ActionSpec::decode(&headers(), row).is_err());
    }
}

#[test]
fn partition_holds_for_any_mix() {
    let gateway = MockAlertGateway::new();
    let validator = BatchValidator::new(&gateway, "ops@club.org");

    let rows = vec![
        good_row(),
        vec![json!(""), json!("Subject"), json!("Body"), json!(0)],
        good_row(),
        vec![json!("NUDGE"), json!("S"), json!("B"), json!("")],
        vec![json!("JOIN"), json!("S"), json!("B"), json!("soon")],
    ];

    let report: BatchReport<ActionSpec> = validator.validate_rows(&headers(), &rows, "actions");
    assert_eq!(report.records.len() + report.errors.len(), rows.len());
    assert_eq!(report.records.len(), 2);
}

#[test]
fn scenario_blank_type_reports_row_two() {
    let gateway = MockAlertGateway::new();
    let validator = BatchValidator::new(&gateway, "ops@club.org");

    let rows = vec![vec![json!(""), json!("Subject"), json!("Body"), json!(0)]];
    let report: BatchReport<ActionSpec> = validator.validate_rows(&headers(), &rows, "actions");

    assert!(report.records.is_empty());
    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].message.contains("Row 2"));
    assert!(report.errors[0].message.contains("Type is required"));
}

#[test]
fn one_bad_row_of_three_sends_one_alert() {
    let gateway = MockAlertGateway::new();
    let validator = BatchValidator::new(&gateway, "ops@club.org");

    let rows = vec![
        good_row(),
        vec![json!(""), json!("Subject"), json!("Body"), json!(0)],
        good_row(),
    ];
    let report: BatchReport<ActionSpec> = validator.validate_rows(&headers(), &rows, "actions");

    assert_eq!(report.records.len(), 2);
    assert_eq!(gateway.sent_count(), 1);

    let alert = gateway.last_sent().unwrap();
    assert!(alert.subject.contains('1'));
    assert!(alert.body.contains("Row 3: Type is required"));
}

#[test]
fn no_failures_means_no_alert() {
    let gateway = MockAlertGateway::new();
    let validator = BatchValidator::new(&gateway, "ops@club.org");

    let rows = vec![good_row(); 10];
    let report: BatchReport<ActionSpec> = validator.validate_rows(&headers(), &rows, "actions");

    assert_eq!(report.records.len(), 10);
    assert_eq!(gateway.sent_count(), 0);
}

#[test]
fn many_failures_still_one_alert() {
    let gateway = MockAlertGateway::new();
    let validator = BatchValidator::new(&gateway, "ops@club.org");

    let bad = vec![json!(""), json!("S"), json!("B"), json!("")];
    let rows = vec![bad; 7];
    let _: BatchReport<ActionSpec> = validator.validate_rows(&headers(), &rows, "actions");

    assert_eq!(gateway.sent_count(), 1);
    let alert = gateway.last_sent().unwrap();
    assert_eq!(alert.subject, "7 ActionSpec Validation Errors");
    assert_eq!(alert.body.matches("Type is required").count(), 7);
}

#[test]
fn alert_failure_returns_the_same_records() {
    let rows = vec![
        good_row(),
        vec![json!(""), json!("S"), json!("B"), json!("")],
        good_row(),
    ];

    let working = MockAlertGateway::new();
    let with_alert: BatchReport<ActionSpec> =
        BatchValidator::new(&working, "ops@club.org").validate_rows(&headers(), &rows, "actions");

    let broken = MockAlertGateway::new();
    broken.set_failing(true);
    let without_alert: BatchReport<ActionSpec> =
        BatchValidator::new(&broken, "ops@club.org").validate_rows(&headers(), &rows, "actions");

    assert_eq!(with_alert.records, without_alert.records);
    assert_eq!(with_alert.errors, without_alert.errors);
    assert_eq!(working.sent_count(), 1);
    assert_eq!(broken.sent_count(), 0);
}

#[test]
fn batch_under_reordered_headers() {
    // The whole batch path is position-independent, not just one decode.
    let gateway = MockAlertGateway::new();
    let validator = BatchValidator::new(&gateway, "ops@club.org");

    let reordered: Vec<String> = ["Offset", "Body", "Subject", "Type"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let rows = vec![vec![json!(-7), json!("<p>Hi</p>"), json!("Reminder"), json!("REMIND")]];

    let report: BatchReport<ActionSpec> = validator.validate_rows(&reordered, &rows, "actions");
    assert_eq!(report.records.len(), 1);
    assert_eq!(report.records[0].subject, "Reminder");
    assert_eq!(report.records[0].offset_days, Some(-7.0));
}
