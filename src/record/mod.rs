//! The shared record contract: named-field decoding and positional encoding
//!
//! Every record kind in the catalog implements [`TableRecord`]: a canonical
//! header list (used only for encode), a validating constructor over a
//! [`FieldMap`], and a positional `encode`. The provided `decode` zips an
//! arbitrary-order header list with a row — the only place column position
//! matters, and only to pair each header name with its value — then hands
//! the map to the constructor. Operators may reorder table columns freely
//! without breaking ingestion.

use std::collections::HashMap;

use serde_json::Value;

use crate::field::FieldResult;

/// Name→value view of one raw row, built by zipping headers with cells.
///
/// Header names are trimmed when the map is built; lookups are by exact
/// (trimmed) name. A row shorter than the header list simply leaves the
/// trailing headers absent, which field rules treat like blank cells.
#[derive(Debug, Clone, Default)]
pub struct FieldMap {
    fields: HashMap<String, Value>,
}

impl FieldMap {
    /// Builds the map by pairing `headers[i]` with `row[i]`.
    pub fn zip(headers: &[String], row: &[Value]) -> Self {
        let fields = headers
            .iter()
            .zip(row.iter())
            .map(|(header, cell)| (header.trim().to_string(), cell.clone()))
            .collect();
        Self { fields }
    }

    /// Looks up a cell by canonical field name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

/// One validated record kind backed by one table.
///
/// An instance that exists is valid for its lifetime: invariants run once,
/// in `from_fields`, and there is no re-validation path. Callers needing
/// guaranteed freshness reconstruct rather than patch.
pub trait TableRecord: Sized {
    /// Human name of the kind, used in alert subjects.
    const KIND: &'static str;

    /// Canonical header list. Fixed order; consumed only by `encode` and
    /// by tests — decoding never depends on it.
    fn headers() -> &'static [&'static str];

    /// Validating constructor. Runs the field rules and either returns a
    /// fully-populated instance or fails naming the offending field.
    fn from_fields(fields: &FieldMap) -> FieldResult<Self>;

    /// Positional row in canonical header order, suitable for writing back
    /// as one table row.
    fn encode(&self) -> Vec<Value>;

    /// Decodes one raw row under the given (arbitrary-order) headers.
    ///
    /// Total over all inputs: returns `Err`, never panics, so one corrupt
    /// row can never abort a batch.
    fn decode(headers: &[String], row: &[Value]) -> FieldResult<Self> {
        let fields = FieldMap::zip(headers, row);
        Self::from_fields(&fields)
    }
}

/// Renders an optional timestamp cell for encoding: RFC 3339, or `''` when
/// absent. Shared by the kinds that carry timestamp columns.
pub fn encode_timestamp(ts: Option<chrono::DateTime<chrono::Utc>>) -> Value {
    match ts {
        Some(t) => Value::String(t.to_rfc3339()),
        None => Value::String(String::new()),
    }
}

/// Renders an optional count cell: the number, or `''` when absent.
pub fn encode_count(n: Option<u32>) -> Value {
    match n {
        Some(n) => Value::from(n),
        None => Value::String(String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_zip_pairs_by_position_once() {
        let map = FieldMap::zip(&headers(&["A", "B"]), &[json!(1), json!("x")]);
        assert_eq!(map.get("A"), Some(&json!(1)));
        assert_eq!(map.get("B"), Some(&json!("x")));
        assert_eq!(map.get("C"), None);
    }

    #[test]
    fn test_zip_trims_header_names() {
        let map = FieldMap::zip(&headers(&[" Key ", "Value"]), &[json!("k"), json!("v")]);
        assert_eq!(map.get("Key"), Some(&json!("k")));
    }

    #[test]
    fn test_short_row_leaves_trailing_headers_absent() {
        let map = FieldMap::zip(&headers(&["A", "B", "C"]), &[json!("only")]);
        assert_eq!(map.get("A"), Some(&json!("only")));
        assert_eq!(map.get("B"), None);
        assert_eq!(map.get("C"), None);
    }

    #[test]
    fn test_encode_helpers() {
        assert_eq!(encode_timestamp(None), json!(""));
        assert_eq!(encode_count(None), json!(""));
        assert_eq!(encode_count(Some(3)), json!(3));

        let ts = chrono::TimeZone::with_ymd_and_hms(&chrono::Utc, 2026, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(encode_timestamp(Some(ts)), json!("2026-01-02T03:04:05+00:00"));
    }
}
