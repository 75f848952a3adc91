//! In-memory table store, the test seam

use std::collections::HashMap;
use std::sync::RwLock;

use serde_json::Value;

use super::errors::{StoreError, StoreResult};
use super::{TableSnapshot, TableStore};

/// Tables behind an `RwLock` map.
#[derive(Debug, Default)]
pub struct MemoryTableStore {
    tables: RwLock<HashMap<String, TableSnapshot>>,
}

impl MemoryTableStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds (or replaces) a table.
    pub fn insert(&self, table: impl Into<String>, headers: Vec<String>, rows: Vec<Vec<Value>>) {
        self.tables
            .write()
            .unwrap()
            .insert(table.into(), TableSnapshot { headers, rows });
    }
}

impl TableStore for MemoryTableStore {
    fn load(&self, table: &str) -> StoreResult<TableSnapshot> {
        self.tables
            .read()
            .unwrap()
            .get(table)
            .cloned()
            .ok_or_else(|| StoreError::not_found(table))
    }

    fn overwrite(&self, table: &str, rows: Vec<Vec<Value>>) -> StoreResult<()> {
        let mut tables = self.tables.write().unwrap();
        let snapshot = tables
            .get_mut(table)
            .ok_or_else(|| StoreError::not_found(table))?;
        snapshot.rows = rows;
        Ok(())
    }
}
