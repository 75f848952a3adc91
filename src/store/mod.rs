//! The backing table boundary
//!
//! The core never touches storage directly: it consumes a
//! [`TableSnapshot`] loaded before a batch runs and hands encoded rows
//! back for write-back at the end. [`MemoryTableStore`] is the test seam;
//! [`JsonTableStore`] keeps one JSON file per table and overwrites by
//! write-temp-then-rename so a crashed batch never leaves a partial
//! table behind.

mod errors;
mod json_file;
mod memory;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use errors::{StoreError, StoreResult};
pub use json_file::JsonTableStore;
pub use memory::MemoryTableStore;

/// One full load of a table: its header row plus every data row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

/// The backing store contract: read a full snapshot, write rows back in
/// one shot. Write-back replaces every data row of the table (headers are
/// the store's own) and must be all-or-nothing.
pub trait TableStore {
    fn load(&self, table: &str) -> StoreResult<TableSnapshot>;
    fn overwrite(&self, table: &str, rows: Vec<Vec<Value>>) -> StoreResult<()>;
}
