//! Batch validation with consolidated operator alerting
//!
//! One batch = one table snapshot. Every row is decoded in order; failures
//! are attributed to their 1-based, header-inclusive row number and
//! collected into the returned report (an owned value, never a shared
//! mutable side channel). If any row failed, exactly one alert covering
//! the whole batch goes out through the injected gateway. A gateway outage
//! is logged and swallowed: alerting must never cause data loss.

use serde_json::Value;

use crate::alert::{Alert, AlertGateway};
use crate::observability::Logger;
use crate::record::TableRecord;

/// One rejected row: its table row number and the human-readable reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    /// 1-based row number counting the header row, so data row `i`
    /// (0-based) reports as `i + 2` — what an operator sees in the table.
    pub row: usize,
    pub message: String,
}

/// The outcome of validating one batch.
#[derive(Debug, Clone)]
pub struct BatchReport<R> {
    /// Records that passed, in table order.
    pub records: Vec<R>,
    /// Per-row failures, in table order, never deduplicated.
    pub errors: Vec<RowError>,
}

impl<R> BatchReport<R> {
    /// Number of rows that failed validation.
    pub fn skipped(&self) -> usize {
        self.errors.len()
    }
}

/// Drives decoding across a batch and owns the one-alert-per-batch policy.
pub struct BatchValidator<'a> {
    gateway: &'a dyn AlertGateway,
    recipient: String,
}

impl<'a> BatchValidator<'a> {
    /// Collaborators are injected; the validator never reaches for
    /// ambient globals.
    pub fn new(gateway: &'a dyn AlertGateway, recipient: impl Into<String>) -> Self {
        Self {
            gateway,
            recipient: recipient.into(),
        }
    }

    /// Validates every row of one table snapshot.
    ///
    /// Rows are processed in given order; a bad row is excluded from the
    /// output and reported, never fatal. Returns the partial but
    /// internally consistent set of records that passed, plus the errors.
    pub fn validate_rows<R: TableRecord>(
        &self,
        headers: &[String],
        rows: &[Vec<Value>],
        context: &str,
    ) -> BatchReport<R> {
        let mut records = Vec::with_capacity(rows.len());
        let mut errors = Vec::new();

        for (i, row) in rows.iter().enumerate() {
            let row_number = i + 2;
            match R::decode(headers, row) {
                Ok(record) => records.push(record),
                Err(e) => {
                    let message = format!("Row {}: {}", row_number, e);
                    Logger::warn(
                        "ROW_REJECTED",
                        &[
                            ("kind", R::KIND),
                            ("context", context),
                            ("message", &message),
                        ],
                    );
                    errors.push(RowError {
                        row: row_number,
                        message,
                    });
                }
            }
        }

        if !errors.is_empty() {
            let alert = compose_alert::<R>(&self.recipient, context, rows.len(), &errors);
            if let Err(e) = self.gateway.send(&alert) {
                // Alerting is observability, not correctness.
                Logger::error(
                    "ALERT_SEND_FAILED",
                    &[
                        ("kind", R::KIND),
                        ("context", context),
                        ("error", &e.to_string()),
                    ],
                );
            }
        }

        Logger::info(
            "BATCH_VALIDATED",
            &[
                ("kind", R::KIND),
                ("context", context),
                ("rows", &rows.len().to_string()),
                ("skipped", &errors.len().to_string()),
            ],
        );

        BatchReport { records, errors }
    }
}

/// Builds the single consolidated alert for a batch with failures.
fn compose_alert<R: TableRecord>(
    recipient: &str,
    context: &str,
    total_rows: usize,
    errors: &[RowError],
) -> Alert {
    let plural = if errors.len() == 1 { "" } else { "s" };
    let subject = format!("{} {} Validation Error{}", errors.len(), R::KIND, plural);

    let mut body = String::new();
    body.push_str(&format!("Context: {}\n", context));
    body.push_str(&format!("Rows processed: {}\n", total_rows));
    body.push_str(&format!("Rows skipped: {}\n\n", errors.len()));
    for error in errors {
        body.push_str(&error.message);
        body.push('\n');
    }

    Alert {
        to: recipient.to_string(),
        subject,
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alert::MockAlertGateway;
    use crate::roster::ActionSpec;
    use serde_json::json;

    fn headers() -> Vec<String> {
        ActionSpec::headers().iter().map(|s| s.to_string()).collect()
    }

    fn good_row() -> Vec<Value> {
        vec![json!("JOIN"), json!("Welcome"), json!("Hello {FirstName}"), json!("")]
    }

    fn bad_row() -> Vec<Value> {
        vec![json!(""), json!("Subject"), json!("Body"), json!(0)]
    }

    #[test]
    fn test_empty_batch_no_alert() {
        let gateway = MockAlertGateway::new();
        let validator = BatchValidator::new(&gateway, "ops@club.org");

        let report: BatchReport<ActionSpec> = validator.validate_rows(&headers(), &[], "actions");

        assert!(report.records.is_empty());
        assert!(report.errors.is_empty());
        assert_eq!(gateway.sent_count(), 0);
    }

    #[test]
    fn test_all_valid_no_alert() {
        let gateway = MockAlertGateway::new();
        let validator = BatchValidator::new(&gateway, "ops@club.org");

        let report: BatchReport<ActionSpec> =
            validator.validate_rows(&headers(), &[good_row(), good_row()], "actions");

        assert_eq!(report.records.len(), 2);
        assert_eq!(gateway.sent_count(), 0);
    }

    #[test]
    fn test_first_data_row_reports_as_row_two() {
        let gateway = MockAlertGateway::new();
        let validator = BatchValidator::new(&gateway, "ops@club.org");

        let report: BatchReport<ActionSpec> =
            validator.validate_rows(&headers(), &[bad_row()], "actions");

        assert!(report.records.is_empty());
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].row, 2);
        assert!(report.errors[0].message.contains("Row 2"));
        assert!(report.errors[0].message.contains("Type is required"));
    }

    #[test]
    fn test_one_alert_covers_all_failures() {
        let gateway = MockAlertGateway::new();
        let validator = BatchValidator::new(&gateway, "ops@club.org");

        let report: BatchReport<ActionSpec> = validator.validate_rows(
            &headers(),
            &[good_row(), bad_row(), good_row(), bad_row()],
            "actions",
        );

        assert_eq!(report.records.len(), 2);
        assert_eq!(report.errors.len(), 2);
        assert_eq!(gateway.sent_count(), 1);

        let alert = gateway.last_sent().unwrap();
        assert_eq!(alert.subject, "2 ActionSpec Validation Errors");
        assert!(alert.body.contains("Row 3"));
        assert!(alert.body.contains("Row 5"));
        assert!(alert.body.contains("Rows processed: 4"));
        assert!(alert.body.contains("Rows skipped: 2"));
    }

    #[test]
    fn test_single_failure_subject_is_singular() {
        let gateway = MockAlertGateway::new();
        let validator = BatchValidator::new(&gateway, "ops@club.org");

        let _: BatchReport<ActionSpec> =
            validator.validate_rows(&headers(), &[good_row(), bad_row(), good_row()], "actions");

        let alert = gateway.last_sent().unwrap();
        assert_eq!(alert.subject, "1 ActionSpec Validation Error");
    }

    #[test]
    fn test_gateway_failure_does_not_lose_records() {
        let gateway = MockAlertGateway::new();
        gateway.set_failing(true);
        let validator = BatchValidator::new(&gateway, "ops@club.org");

        let report: BatchReport<ActionSpec> =
            validator.validate_rows(&headers(), &[good_row(), bad_row()], "actions");

        assert_eq!(report.records.len(), 1);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(gateway.sent_count(), 0);
    }

    #[test]
    fn test_partition_property() {
        let gateway = MockAlertGateway::new();
        let validator = BatchValidator::new(&gateway, "ops@club.org");

        let rows = vec![good_row(), bad_row(), bad_row(), good_row(), good_row()];
        let report: BatchReport<ActionSpec> = validator.validate_rows(&headers(), &rows, "actions");

        assert_eq!(report.records.len() + report.errors.len(), rows.len());
        assert_eq!(report.skipped(), 2);
    }

    #[test]
    fn test_identical_errors_not_deduplicated() {
        let gateway = MockAlertGateway::new();
        let validator = BatchValidator::new(&gateway, "ops@club.org");

        let report: BatchReport<ActionSpec> =
            validator.validate_rows(&headers(), &[bad_row(), bad_row()], "actions");

        assert_eq!(report.errors.len(), 2);
        assert_eq!(report.errors[0].message, "Row 2: Type is required");
        assert_eq!(report.errors[1].message, "Row 3: Type is required");
    }
}
