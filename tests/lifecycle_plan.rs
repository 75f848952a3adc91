//! Notice planning end to end: raw rows in, queued notices out.

use chrono::NaiveDate;
use rollbook::alert::MockAlertGateway;
use rollbook::batch::BatchValidator;
use rollbook::lifecycle::plan_notices;
use rollbook::record::TableRecord;
use rollbook::roster::{ActionSpec, BootstrapRow};
use serde_json::json;

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn headers<R: TableRecord>() -> Vec<String> {
    R::headers().iter().map(|s| s.to_string()).collect()
}

#[test]
fn plan_from_raw_tables() {
    let gateway = MockAlertGateway::new();
    let validator = BatchValidator::new(&gateway, "ops@club.org");

    let member_rows = vec![
        vec![
            json!("m-1"),
            json!("ada@example.com"),
            json!("Ada"),
            json!("Lovelace"),
            json!("2026-01-01"),
            json!("2026-06-01"),
        ],
        vec![
            json!("m-2"),
            json!("grace@example.com"),
            json!("Grace"),
            json!("Hopper"),
            json!("2026-03-01"),
            json!("2027-03-01"),
        ],
    ];
    let members = validator
        .validate_rows::<BootstrapRow>(&headers::<BootstrapRow>(), &member_rows, "members")
        .records;

    let action_rows = vec![
        vec![json!("JOIN"), json!("Welcome {FirstName}!"), json!("<p>Welcome.</p>"), json!("")],
        vec![
            json!("REMIND"),
            json!("Renewal reminder"),
            json!("<p>{FirstName}, you expire {ExpiresOn}.</p>"),
            json!(-14),
        ],
    ];
    let actions = validator
        .validate_rows::<ActionSpec>(&headers::<ActionSpec>(), &action_rows, "actions")
        .records;

    // Grace's join date: only her welcome fires.
    let due = plan_notices(&members, &actions, day("2026-03-01")).unwrap();
    assert_eq!(due.len(), 1);
    assert_eq!(due[0].email, "grace@example.com");
    assert_eq!(due[0].subject, "Welcome Grace!");

    // Fourteen days before Ada's expiry: only her reminder fires.
    let due = plan_notices(&members, &actions, day("2026-05-18")).unwrap();
    assert_eq!(due.len(), 1);
    assert_eq!(due[0].email, "ada@example.com");
    assert!(due[0].html_body.contains("Ada"));
    assert!(due[0].html_body.contains("2026-06-01"));

    // A quiet day.
    assert!(plan_notices(&members, &actions, day("2026-04-10")).unwrap().is_empty());
}

#[test]
fn planned_notices_are_fresh_queue_items() {
    let members = vec![BootstrapRow::decode(
        &headers::<BootstrapRow>(),
        &[
            json!("m-1"),
            json!("ada@example.com"),
            json!("Ada"),
            json!("Lovelace"),
            json!("2026-01-01"),
            json!(""),
        ],
    )
    .unwrap()];
    let actions = vec![ActionSpec::decode(
        &headers::<ActionSpec>(),
        &[json!("JOIN"), json!("Welcome"), json!("<p>Hi</p>"), json!("")],
    )
    .unwrap()];

    let due = plan_notices(&members, &actions, day("2026-01-01")).unwrap();
    assert_eq!(due.len(), 1);

    let notice = &due[0];
    assert_eq!(notice.attempts, 0);
    assert!(!notice.dead);
    assert!(notice.last_attempt_at.is_none());
    assert!(!notice.id.is_empty());

    // Ids are unique per enqueue.
    let again = plan_notices(&members, &actions, day("2026-01-01")).unwrap();
    assert_ne!(notice.id, again[0].id);
}
