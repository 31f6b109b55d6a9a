// In-memory model of the inventory file: header + rows, with one typed
// availability field and everything else kept as opaque text.
use std::path::Path;

use crate::error::InventoryError;

pub const ROOMS_COLUMN: &str = "rooms_available";
pub const STATUS_COLUMN: &str = "status";

// The two fixed status labels. Anything else found in an existing status
// column is left alone until a mutation touches that row.
pub const STATUS_AVAILABLE: &str = "available";
pub const STATUS_UNAVAILABLE: &str = "unavailable";

// Columns consulted when matching a hotel by name.
pub const IDENTITY_COLUMNS: [&str; 2] = ["name", "hotel_name"];

#[derive(Debug, Clone)]
pub struct Table {
    pub(crate) columns: Vec<String>,
    pub(crate) rows: Vec<Row>,
    pub(crate) rooms_idx: usize,
    pub(crate) status_idx: usize,
}

#[derive(Debug, Clone)]
pub struct Row {
    // Aligned with Table::columns; the rooms_available cell mirrors the
    // typed integer below so persisting is a straight dump of `values`.
    pub(crate) values: Vec<String>,
    pub(crate) rooms_available: u32,
}

impl Row {
    pub fn value(&self, column_idx: usize) -> Option<&str> {
        self.values.get(column_idx).map(String::as_str)
    }

    pub fn rooms_available(&self) -> u32 {
        self.rooms_available
    }
}

impl Table {
    /// Read and normalize the inventory table at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, InventoryError> {
        crate::loader::load(path.as_ref())
    }

    /// Atomically rewrite `path` with the current table contents.
    pub fn persist(&self, path: impl AsRef<Path>) -> Result<(), InventoryError> {
        crate::writer::persist(self, path.as_ref())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn rooms_available(&self, row_idx: usize) -> u32 {
        self.rows[row_idx].rooms_available
    }

    pub fn status(&self, row_idx: usize) -> &str {
        &self.rows[row_idx].values[self.status_idx]
    }

    /// Set a row's availability, keeping the text cell and the status
    /// column consistent with the new value.
    pub(crate) fn set_rooms_available(&mut self, row_idx: usize, value: u32) {
        let row = &mut self.rows[row_idx];
        row.rooms_available = value;
        row.values[self.rooms_idx] = value.to_string();
        row.values[self.status_idx] = status_for(value).to_string();
    }
}

/// Status label implied by an availability count.
pub fn status_for(rooms_available: u32) -> &'static str {
    if rooms_available > 0 {
        STATUS_AVAILABLE
    } else {
        STATUS_UNAVAILABLE
    }
}

/// Clean up a raw availability cell and parse it: thousands separators
/// removed, surrounding whitespace trimmed, a trailing ".0" stripped.
/// Anything that still fails to parse (including negatives) becomes 0.
pub(crate) fn normalize_rooms(raw: &str) -> u32 {
    let cleaned = raw.replace(',', "");
    let cleaned = cleaned.trim();
    let cleaned = cleaned.strip_suffix(".0").unwrap_or(cleaned);
    cleaned.parse().unwrap_or(0)
}
