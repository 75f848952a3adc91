//! CLI command implementations
//!
//! Thin wiring only: each command loads config and tables, hands the work
//! to the library, and writes results back. Row-level validation failures
//! never fail a command; store failures do.

use std::fs;
use std::path::Path;

use chrono::{NaiveDate, Utc};

use crate::alert::{AlertGateway, LogAlertGateway, SmtpAlertGateway};
use crate::batch::BatchValidator;
use crate::lifecycle::plan_notices;
use crate::observability::Logger;
use crate::outbox::{
    LogMailTransport, MailTransport, OutboxWorker, QueuedEmail, SmtpMailTransport,
};
use crate::record::TableRecord;
use crate::roster::{ActionSpec, AuditEntry, BootstrapRow, Election, ElectionConfig, PublicGroup};
use crate::store::{JsonTableStore, StoreError, TableStore};

use super::args::{Cli, Command};
use super::config::Config;
use super::errors::{CliError, CliResult};

/// The table each record kind lives in by default.
const TABLES: &[(&str, &str)] = &[
    ("actions", "actions"),
    ("members", "members"),
    ("election-config", "election_config"),
    ("elections", "elections"),
    ("groups", "groups"),
    ("audit", "audit"),
    ("queue", "queue"),
];

/// Parse arguments and dispatch to the requested command.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();

    match cli.command {
        Command::Init { config } => init(&config),
        Command::Validate {
            config,
            kind,
            table,
        } => validate(&config, &kind, table.as_deref()),
        Command::Plan { config, date } => plan(&config, date.as_deref()),
        Command::Drain { config } => drain(&config),
    }
}

/// `init`: write a default config (keeping an existing one) and seed any
/// missing table files with their canonical headers.
pub fn init(config_path: &Path) -> CliResult<()> {
    let config = if config_path.exists() {
        Config::load(config_path)?
    } else {
        let config = Config::default();
        let content = serde_json::to_string_pretty(&config)
            .map_err(|e| CliError::config_error(e.to_string()))?;
        fs::write(config_path, content).map_err(|e| CliError::io_error(e.to_string()))?;
        println!("Wrote default config to {}", config_path.display());
        config
    };

    let store = JsonTableStore::new(config.data_path());
    for (kind, table) in TABLES {
        match store.load(table) {
            Ok(_) => continue,
            Err(StoreError::TableNotFound { .. }) => {
                store.create(table, kind_headers(kind)?)?;
                println!("Created table '{}'", table);
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}

/// `validate`: run one table through batch validation, alerting the
/// operator about bad rows, and print the partition.
pub fn validate(config_path: &Path, kind: &str, table: Option<&str>) -> CliResult<()> {
    let config = Config::load(config_path)?;
    let store = JsonTableStore::new(config.data_path());
    let gateway = make_gateway(&config);
    let validator = BatchValidator::new(gateway.as_ref(), &config.alert_recipient);

    let table = match table {
        Some(t) => t.to_string(),
        None => default_table(kind)?.to_string(),
    };
    let snapshot = store.load(&table)?;
    let context = format!("validate {}", table);

    let (valid, skipped) = match kind {
        "actions" => count::<ActionSpec>(&validator, &snapshot.headers, &snapshot.rows, &context),
        "members" => count::<BootstrapRow>(&validator, &snapshot.headers, &snapshot.rows, &context),
        "election-config" => {
            count::<ElectionConfig>(&validator, &snapshot.headers, &snapshot.rows, &context)
        }
        "elections" => count::<Election>(&validator, &snapshot.headers, &snapshot.rows, &context),
        "groups" => count::<PublicGroup>(&validator, &snapshot.headers, &snapshot.rows, &context),
        "audit" => count::<AuditEntry>(&validator, &snapshot.headers, &snapshot.rows, &context),
        "queue" => count::<QueuedEmail>(&validator, &snapshot.headers, &snapshot.rows, &context),
        other => return Err(CliError::UnknownKind(other.to_string())),
    };

    println!(
        "{}: {} valid, {} skipped of {} rows",
        table,
        valid,
        skipped,
        snapshot.rows.len()
    );
    Ok(())
}

/// `plan`: queue the membership notices due on the given date.
pub fn plan(config_path: &Path, date: Option<&str>) -> CliResult<()> {
    let config = Config::load(config_path)?;
    let store = JsonTableStore::new(config.data_path());
    let gateway = make_gateway(&config);
    let validator = BatchValidator::new(gateway.as_ref(), &config.alert_recipient);

    let today = match date {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|_| CliError::BadDate(s.to_string()))?,
        None => Utc::now().date_naive(),
    };

    let members_snapshot = store.load("members")?;
    let members = validator
        .validate_rows::<BootstrapRow>(
            &members_snapshot.headers,
            &members_snapshot.rows,
            "plan members",
        )
        .records;

    let actions_snapshot = store.load("actions")?;
    let actions = validator
        .validate_rows::<ActionSpec>(
            &actions_snapshot.headers,
            &actions_snapshot.rows,
            "plan actions",
        )
        .records;

    let notices = plan_notices(&members, &actions, today)?;
    let queued = notices.len();

    let queue_snapshot = store.load("queue")?;
    let mut rows = queue_snapshot.rows;
    rows.extend(notices.iter().map(QueuedEmail::encode));
    store.overwrite("queue", rows)?;

    append_audit(
        &store,
        "PLAN",
        &format!("queued {} notice(s) for {}", queued, today),
    )?;

    println!("Queued {} notice(s) for {}", queued, today);
    Ok(())
}

/// `drain`: attempt delivery of every due queue item and write the
/// surviving queue back.
pub fn drain(config_path: &Path) -> CliResult<()> {
    let config = Config::load(config_path)?;
    let store = JsonTableStore::new(config.data_path());
    let gateway = make_gateway(&config);
    let validator = BatchValidator::new(gateway.as_ref(), &config.alert_recipient);

    let snapshot = store.load("queue")?;
    let report =
        validator.validate_rows::<QueuedEmail>(&snapshot.headers, &snapshot.rows, "drain queue");

    let transport = make_transport(&config);
    let policy = config.retry_policy();
    let worker = OutboxWorker::new(transport.as_ref(), &policy);
    let (surviving, drained) = worker.drain(report.records, Utc::now());

    store.overwrite("queue", surviving.iter().map(QueuedEmail::encode).collect())?;

    append_audit(
        &store,
        "DRAIN",
        &format!(
            "attempted {}, delivered {}, failed {}, dead-lettered {}",
            drained.attempted, drained.delivered, drained.failed, drained.dead_lettered
        ),
    )?;

    println!(
        "Attempted {}: {} delivered, {} pending retry, {} dead-lettered",
        drained.attempted, drained.delivered, drained.failed, drained.dead_lettered
    );
    Ok(())
}

fn default_table(kind: &str) -> CliResult<&'static str> {
    TABLES
        .iter()
        .find(|(k, _)| *k == kind)
        .map(|(_, table)| *table)
        .ok_or_else(|| CliError::UnknownKind(kind.to_string()))
}

fn kind_headers(kind: &str) -> CliResult<&'static [&'static str]> {
    match kind {
        "actions" => Ok(ActionSpec::headers()),
        "members" => Ok(BootstrapRow::headers()),
        "election-config" => Ok(ElectionConfig::headers()),
        "elections" => Ok(Election::headers()),
        "groups" => Ok(PublicGroup::headers()),
        "audit" => Ok(AuditEntry::headers()),
        "queue" => Ok(QueuedEmail::headers()),
        other => Err(CliError::UnknownKind(other.to_string())),
    }
}

fn count<R: TableRecord>(
    validator: &BatchValidator,
    headers: &[String],
    rows: &[Vec<serde_json::Value>],
    context: &str,
) -> (usize, usize) {
    let report = validator.validate_rows::<R>(headers, rows, context);
    (report.records.len(), report.skipped())
}

fn make_gateway(config: &Config) -> Box<dyn AlertGateway> {
    match config.smtp_config() {
        Some(smtp) => Box::new(SmtpAlertGateway::new(smtp)),
        None => {
            Logger::warn("NO_SMTP_CONFIGURED", &[("channel", "alerts")]);
            Box::new(LogAlertGateway::new())
        }
    }
}

fn make_transport(config: &Config) -> Box<dyn MailTransport> {
    match config.smtp_config() {
        Some(smtp) => Box::new(SmtpMailTransport::new(smtp)),
        None => {
            Logger::warn("NO_SMTP_CONFIGURED", &[("channel", "notices")]);
            Box::new(LogMailTransport::new())
        }
    }
}

fn append_audit(store: &JsonTableStore, action: &str, detail: &str) -> CliResult<()> {
    let entry = AuditEntry::record("rollbook", action, detail);
    let snapshot = store.load("audit")?;
    let mut rows = snapshot.rows;
    rows.push(entry.encode());
    store.overwrite("audit", rows)?;
    Ok(())
}
