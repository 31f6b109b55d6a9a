// Hotel room inventory kept in a single delimited file: tolerant load,
// fuzzy name matching, in-memory mutation, atomic rewrite.

pub mod availability;
pub mod error;
pub mod loader;
pub mod matcher;
pub mod table;
pub mod writer;

// Re-export key types for convenience
pub use availability::{decrement_availability, increment_availability};
pub use error::InventoryError;
pub use matcher::{match_rows, MatchStage};
pub use table::{
    status_for, Row, Table, IDENTITY_COLUMNS, ROOMS_COLUMN, STATUS_AVAILABLE, STATUS_COLUMN,
    STATUS_UNAVAILABLE,
};
