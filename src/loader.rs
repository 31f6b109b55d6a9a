// Tolerant CSV ingestion: prioritized encoding fallback, raw-text fields,
// and normalization of the two semantic columns.
use std::borrow::Cow;
use std::fs;
use std::path::Path;

use encoding_rs::WINDOWS_1252;
use tracing::debug;

use crate::error::InventoryError;
use crate::table::{normalize_rooms, status_for, Row, Table, ROOMS_COLUMN, STATUS_COLUMN};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

// Candidate encodings, tried in order. The first one whose decode AND
// structural CSV parse both succeed wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SourceEncoding {
    Utf8Bom,
    Utf8,
    Windows1252,
}

impl SourceEncoding {
    const PRIORITY: [SourceEncoding; 3] = [Self::Utf8Bom, Self::Utf8, Self::Windows1252];

    fn decode<'a>(self, bytes: &'a [u8]) -> Result<Cow<'a, str>, String> {
        match self {
            Self::Utf8Bom => {
                let stripped = bytes
                    .strip_prefix(UTF8_BOM)
                    .ok_or_else(|| "missing UTF-8 signature".to_string())?;
                std::str::from_utf8(stripped)
                    .map(Cow::Borrowed)
                    .map_err(|e| e.to_string())
            }
            Self::Utf8 => std::str::from_utf8(bytes)
                .map(Cow::Borrowed)
                .map_err(|e| e.to_string()),
            Self::Windows1252 => {
                let (text, _, had_errors) = WINDOWS_1252.decode(bytes);
                if had_errors {
                    Err("undecodable Windows-1252 input".to_string())
                } else {
                    Ok(text)
                }
            }
        }
    }
}

/// Load the inventory table at `path`, trying each supported encoding in
/// priority order. Fails with `NotFound` if the path does not exist and
/// `Parse` (carrying the last underlying error) if no encoding yields a
/// structurally valid table.
pub fn load(path: &Path) -> Result<Table, InventoryError> {
    if !path.exists() {
        return Err(InventoryError::NotFound(path.to_path_buf()));
    }
    let bytes = fs::read(path)?;

    let mut last_error = String::new();
    for encoding in SourceEncoding::PRIORITY {
        let text = match encoding.decode(&bytes) {
            Ok(text) => text,
            Err(message) => {
                last_error = message;
                continue;
            }
        };
        match parse_table(&text) {
            Ok(table) => {
                debug!(
                    path = %path.display(),
                    rows = table.len(),
                    encoding = ?encoding,
                    "loaded inventory table"
                );
                return Ok(table);
            }
            Err(message) => last_error = message,
        }
    }

    Err(InventoryError::Parse {
        path: path.to_path_buf(),
        message: last_error,
    })
}

// Every field is kept as raw text; no implicit type inference, so values
// like leading-zero codes survive untouched.
fn parse_table(text: &str) -> Result<Table, String> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(text.as_bytes());

    let columns: Vec<String> = reader
        .headers()
        .map_err(|e| e.to_string())?
        .iter()
        .map(str::to_owned)
        .collect();

    let mut records = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| e.to_string())?;
        records.push(record.iter().map(str::to_owned).collect());
    }

    Ok(assemble(columns, records))
}

// Ensure the two semantic columns exist and normalize availability:
// a missing rooms_available column defaults every row to 0, a missing
// status column is derived from availability, and an existing status
// column is left exactly as found.
fn assemble(mut columns: Vec<String>, records: Vec<Vec<String>>) -> Table {
    let rooms_idx = columns
        .iter()
        .position(|c| c == ROOMS_COLUMN)
        .unwrap_or_else(|| {
            columns.push(ROOMS_COLUMN.to_string());
            columns.len() - 1
        });
    let existing_status = columns.iter().position(|c| c == STATUS_COLUMN);
    let status_idx = existing_status.unwrap_or_else(|| {
        columns.push(STATUS_COLUMN.to_string());
        columns.len() - 1
    });

    let mut rows = Vec::with_capacity(records.len());
    for mut values in records {
        values.resize(columns.len(), String::new());
        let rooms_available = normalize_rooms(&values[rooms_idx]);
        values[rooms_idx] = rooms_available.to_string();
        if existing_status.is_none() {
            values[status_idx] = status_for(rooms_available).to_string();
        }
        rows.push(Row {
            values,
            rooms_available,
        });
    }

    Table {
        columns,
        rows,
        rooms_idx,
        status_idx,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{STATUS_AVAILABLE, STATUS_UNAVAILABLE};
    use tempfile::TempDir;

    fn write_fixture(dir: &TempDir, name: &str, bytes: &[u8]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, bytes).unwrap();
        path
    }

    #[test]
    fn test_load_plain_utf8() {
        let dir = TempDir::new().unwrap();
        let path = write_fixture(
            &dir,
            "hotels.csv",
            b"name,city,rooms_available,status\nSunrise Inn,Hanoi,10,available\n",
        );

        let table = Table::load(&path).unwrap();
        assert_eq!(
            table.columns(),
            &["name", "city", "rooms_available", "status"]
        );
        assert_eq!(table.len(), 1);
        assert_eq!(table.rooms_available(0), 10);
        assert_eq!(table.status(0), STATUS_AVAILABLE);
    }

    #[test]
    fn test_load_strips_utf8_bom_from_header() {
        let dir = TempDir::new().unwrap();
        let path = write_fixture(
            &dir,
            "hotels.csv",
            b"\xEF\xBB\xBFname,rooms_available\nSunrise Inn,3\n",
        );

        let table = Table::load(&path).unwrap();
        assert_eq!(table.columns()[0], "name");
        assert_eq!(table.rooms_available(0), 3);
    }

    #[test]
    fn test_load_falls_back_to_windows_1252() {
        let dir = TempDir::new().unwrap();
        // 0xE9 is 'é' in Windows-1252 but invalid as standalone UTF-8.
        let path = write_fixture(
            &dir,
            "hotels.csv",
            b"name,rooms_available\nCaf\xE9 Royal,5\n",
        );

        let table = Table::load(&path).unwrap();
        let name_idx = table.column_index("name").unwrap();
        assert_eq!(table.rows()[0].value(name_idx), Some("Caf\u{e9} Royal"));
        assert_eq!(table.rooms_available(0), 5);
    }

    #[test]
    fn test_missing_rooms_column_defaults_to_zero() {
        let dir = TempDir::new().unwrap();
        let path = write_fixture(&dir, "hotels.csv", b"name\nSunrise Inn\nHarbor View\n");

        let table = Table::load(&path).unwrap();
        assert_eq!(table.columns(), &["name", "rooms_available", "status"]);
        assert_eq!(table.rooms_available(0), 0);
        assert_eq!(table.rooms_available(1), 0);
        assert_eq!(table.status(0), STATUS_UNAVAILABLE);
    }

    #[test]
    fn test_missing_status_column_is_derived() {
        let dir = TempDir::new().unwrap();
        let path = write_fixture(
            &dir,
            "hotels.csv",
            b"name,rooms_available\nSunrise Inn,2\nHarbor View,0\n",
        );

        let table = Table::load(&path).unwrap();
        assert_eq!(table.status(0), STATUS_AVAILABLE);
        assert_eq!(table.status(1), STATUS_UNAVAILABLE);
    }

    #[test]
    fn test_existing_status_column_left_untouched() {
        let dir = TempDir::new().unwrap();
        // Stale status: 0 rooms but still marked available. The loader
        // must not rewrite it.
        let path = write_fixture(
            &dir,
            "hotels.csv",
            b"name,rooms_available,status\nSunrise Inn,0,available\n",
        );

        let table = Table::load(&path).unwrap();
        assert_eq!(table.status(0), STATUS_AVAILABLE);
    }

    #[test]
    fn test_messy_numeric_formatting_is_normalized() {
        let dir = TempDir::new().unwrap();
        let path = write_fixture(
            &dir,
            "hotels.csv",
            b"name,rooms_available\nBig Resort,\"1,200.0\"\nBroken,n/a\n",
        );

        let table = Table::load(&path).unwrap();
        assert_eq!(table.rooms_available(0), 1200);
        assert_eq!(table.rooms_available(1), 0);
    }

    #[test]
    fn test_leading_zero_codes_survive_as_text() {
        let dir = TempDir::new().unwrap();
        let path = write_fixture(
            &dir,
            "hotels.csv",
            b"name,branch_code,rooms_available\nSunrise Inn,00142,4\n",
        );

        let table = Table::load(&path).unwrap();
        let code_idx = table.column_index("branch_code").unwrap();
        assert_eq!(table.rows()[0].value(code_idx), Some("00142"));
    }

    #[test]
    fn test_nonexistent_path_is_not_found() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.csv");

        let err = Table::load(&path).unwrap_err();
        assert!(matches!(err, InventoryError::NotFound(_)));
        assert!(!path.exists());
    }

    #[test]
    fn test_ragged_rows_are_a_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = write_fixture(
            &dir,
            "hotels.csv",
            b"name,rooms_available\nSunrise Inn,3,extra,fields,here\n",
        );

        let err = Table::load(&path).unwrap_err();
        assert!(matches!(err, InventoryError::Parse { .. }));
    }
}
