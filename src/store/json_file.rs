//! JSON-file table store
//!
//! One file per table under a data directory, `<table>.json`, holding a
//! serialized [`TableSnapshot`]. Overwrite writes a sibling temp file and
//! renames it over the original, so readers see either the old table or
//! the new one, never a torn write.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use super::errors::{StoreError, StoreResult};
use super::{TableSnapshot, TableStore};

pub struct JsonTableStore {
    data_dir: PathBuf,
}

impl JsonTableStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    fn table_path(&self, table: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", table))
    }

    /// Creates the table file with the given headers and no rows. Used to
    /// seed a fresh data directory; refuses to clobber an existing table.
    pub fn create(&self, table: &str, headers: &[&str]) -> StoreResult<()> {
        let path = self.table_path(table);
        if path.exists() {
            return Err(StoreError::write_failed(table, "table already exists"));
        }

        fs::create_dir_all(&self.data_dir)
            .map_err(|e| StoreError::write_failed(table, e.to_string()))?;

        let snapshot = TableSnapshot {
            headers: headers.iter().map(|s| s.to_string()).collect(),
            rows: Vec::new(),
        };
        self.write_snapshot(table, &path, &snapshot)
    }

    fn write_snapshot(
        &self,
        table: &str,
        path: &Path,
        snapshot: &TableSnapshot,
    ) -> StoreResult<()> {
        let content = serde_json::to_string_pretty(snapshot)
            .map_err(|e| StoreError::write_failed(table, e.to_string()))?;

        let temp = path.with_extension("json.tmp");
        fs::write(&temp, content).map_err(|e| StoreError::write_failed(table, e.to_string()))?;
        fs::rename(&temp, path).map_err(|e| StoreError::write_failed(table, e.to_string()))?;
        Ok(())
    }
}

impl TableStore for JsonTableStore {
    fn load(&self, table: &str) -> StoreResult<TableSnapshot> {
        let path = self.table_path(table);
        if !path.exists() {
            return Err(StoreError::not_found(table));
        }

        let content = fs::read_to_string(&path)
            .map_err(|e| StoreError::read_failed(table, e.to_string()))?;

        serde_json::from_str(&content).map_err(|e| StoreError::malformed(table, e.to_string()))
    }

    fn overwrite(&self, table: &str, rows: Vec<Vec<Value>>) -> StoreResult<()> {
        // Headers belong to the store; keep the existing ones.
        let mut snapshot = self.load(table)?;
        snapshot.rows = rows;
        self.write_snapshot(table, &self.table_path(table), &snapshot)
    }
}
