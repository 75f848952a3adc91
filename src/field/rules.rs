//! The field rule functions.
//!
//! Cells arrive as `serde_json::Value` because the backing table is untyped:
//! a number-looking column may hold strings, a date column may hold epoch
//! millis, and operators paste whatever their editor gives them. Each rule
//! normalizes one of those shapes or fails with a message naming the field.

use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use regex::Regex;
use serde_json::Value;

use super::errors::{FieldError, FieldResult};

/// Renders a raw cell as text for trimming and error messages.
///
/// Null renders as the empty string so "absent" and "blank" collapse into
/// one case everywhere downstream.
fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => other.to_string(),
    }
}

/// Required string: non-empty after trimming. Scalar cells stringify.
pub fn require_string(field: &str, value: Option<&Value>) -> FieldResult<String> {
    let text = cell_text(value);
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(FieldError::required(field));
    }
    Ok(trimmed.to_string())
}

/// Optional string: absent, null, and blank all normalize to `''`.
pub fn optional_string(_field: &str, value: Option<&Value>) -> String {
    cell_text(value).trim().to_string()
}

/// Required membership in a closed allow-list (exact match after trim).
pub fn require_enum(field: &str, value: Option<&Value>, allowed: &[&str]) -> FieldResult<String> {
    let text = require_string(field, value)?;
    if allowed.contains(&text.as_str()) {
        Ok(text)
    } else {
        Err(FieldError::not_in_set(field, allowed, text))
    }
}

/// Optional number: absent/blank is `None`; numbers and numeric strings
/// parse; anything else is a validation failure, never a silent zero.
pub fn optional_number(field: &str, value: Option<&Value>) -> FieldResult<Option<f64>> {
    if let Some(Value::Number(n)) = value {
        return n
            .as_f64()
            .map(Some)
            .ok_or_else(|| FieldError::not_numeric(field, n.to_string()));
    }

    let text = cell_text(value);
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    // `f64::from_str` also accepts "NaN"/"inf"; those are junk in a
    // numeric column and would not survive a JSON round-trip.
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .map(Some)
        .ok_or_else(|| FieldError::not_numeric(field, trimmed))
}

/// Required non-negative integer (attempt counters and the like).
pub fn require_count(field: &str, value: Option<&Value>) -> FieldResult<u32> {
    match optional_count(field, value)? {
        Some(n) => Ok(n),
        None => Err(FieldError::required(field)),
    }
}

/// Optional non-negative integer: absent/blank is `None`.
pub fn optional_count(field: &str, value: Option<&Value>) -> FieldResult<Option<u32>> {
    let number = match optional_number(field, value) {
        Ok(n) => n,
        Err(_) => {
            return Err(FieldError::not_a_count(field, cell_text(value).trim()));
        }
    };

    match number {
        None => Ok(None),
        Some(n) if n >= 0.0 && n.fract() == 0.0 && n <= u32::MAX as f64 => Ok(Some(n as u32)),
        Some(n) => Err(FieldError::not_a_count(field, n.to_string())),
    }
}

/// Optional timestamp. Accepted wire forms, tried in order:
/// RFC 3339, `YYYY-MM-DD` (midnight UTC), `YYYY-MM-DD HH:MM:SS` (read as
/// UTC), and epoch milliseconds (number or all-digit string).
pub fn optional_timestamp(
    field: &str,
    value: Option<&Value>,
) -> FieldResult<Option<DateTime<Utc>>> {
    if let Some(Value::Number(n)) = value {
        let millis = n
            .as_i64()
            .ok_or_else(|| FieldError::not_a_timestamp(field, n.to_string()))?;
        return match Utc.timestamp_millis_opt(millis) {
            chrono::LocalResult::Single(ts) => Ok(Some(ts)),
            _ => Err(FieldError::not_a_timestamp(field, n.to_string())),
        };
    }

    let text = cell_text(value);
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(Some(ts.with_timezone(&Utc)));
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        let midnight = date.and_time(chrono::NaiveTime::MIN);
        return Ok(Some(Utc.from_utc_datetime(&midnight)));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
        return Ok(Some(Utc.from_utc_datetime(&dt)));
    }
    // Epoch millis as text, signed to match the numeric cell form.
    let digits = trimmed.strip_prefix('-').unwrap_or(trimmed);
    if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
        if let Ok(millis) = trimmed.parse::<i64>() {
            if let chrono::LocalResult::Single(ts) = Utc.timestamp_millis_opt(millis) {
                return Ok(Some(ts));
            }
        }
    }

    Err(FieldError::not_a_timestamp(field, trimmed))
}

/// Required timestamp: same wire forms as [`optional_timestamp`].
pub fn require_timestamp(field: &str, value: Option<&Value>) -> FieldResult<DateTime<Utc>> {
    match optional_timestamp(field, value)? {
        Some(ts) => Ok(ts),
        None => Err(FieldError::required(field)),
    }
}

/// Ordering pair: when both ends are present, end must not precede start.
/// A missing end (or start) passes; the pair is only checked jointly.
pub fn require_ordered(
    start_field: &str,
    start: Option<DateTime<Utc>>,
    end_field: &str,
    end: Option<DateTime<Utc>>,
) -> FieldResult<()> {
    if let (Some(s), Some(e)) = (start, end) {
        if e < s {
            return Err(FieldError::out_of_order(start_field, end_field));
        }
    }
    Ok(())
}

/// "At least one of A or B": both blank is the only failure.
pub fn require_either(field_a: &str, a: &str, field_b: &str, b: &str) -> FieldResult<()> {
    if a.trim().is_empty() && b.trim().is_empty() {
        return Err(FieldError::neither_present(field_a, field_b));
    }
    Ok(())
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern compiles")
    })
}

/// Required email address (local@domain.tld shape).
pub fn require_email(field: &str, value: Option<&Value>) -> FieldResult<String> {
    let text = require_string(field, value)?;
    if email_pattern().is_match(&text) {
        Ok(text)
    } else {
        Err(FieldError::not_an_address(field, text))
    }
}

/// Optional email: blank passes as `''`, anything non-blank must be valid.
pub fn optional_email(field: &str, value: Option<&Value>) -> FieldResult<String> {
    let text = optional_string(field, value);
    if text.is_empty() {
        return Ok(text);
    }
    if email_pattern().is_match(&text) {
        Ok(text)
    } else {
        Err(FieldError::not_an_address(field, text))
    }
}

/// Boolean coercion with an explicit truth table.
///
/// Falsy: absent, null, `false`, numeric zero, and blank (all-whitespace)
/// strings. Everything else is truthy, INCLUDING the string `"false"` —
/// operators mark consent columns with free-form text and any non-blank
/// mark has always counted. The quirk is a documented contract here, pinned
/// by tests, rather than an accident of implicit truthiness.
pub fn truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(_) => true,
    }
}
