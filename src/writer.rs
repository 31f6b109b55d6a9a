// Crash-safe persistence: serialize the whole table to a temp file in the
// target's directory, then rename it over the target. A concurrent reader
// of the target path only ever sees the old file or the new one in full.
use std::io::Write;
use std::path::Path;

use tracing::debug;

use crate::error::InventoryError;
use crate::table::Table;

// Excel expects a signed UTF-8 file.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Atomically replace `path` with the serialized table. Fails with `Io` on
/// any filesystem failure, in which case the original file is untouched.
pub fn persist(table: &Table, path: &Path) -> Result<(), InventoryError> {
    // The temp file must live in the target's directory so the final
    // replace is a same-filesystem rename, not a copy.
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::Builder::new()
        .suffix(".csv")
        .tempfile_in(dir)?;
    tmp.write_all(UTF8_BOM)?;
    {
        let mut writer = csv::Writer::from_writer(tmp.as_file_mut());
        writer.write_record(table.columns()).map_err(into_io)?;
        for row in table.rows() {
            writer.write_record(&row.values).map_err(into_io)?;
        }
        writer.flush()?;
    }
    tmp.persist(path)
        .map_err(|e| InventoryError::Io(e.error))?;

    debug!(path = %path.display(), rows = table.len(), "persisted inventory table");
    Ok(())
}

// write_record only fails on I/O here; anything else is wrapped so the
// caller still sees a single filesystem-failure kind.
fn into_io(err: csv::Error) -> InventoryError {
    match err.into_kind() {
        csv::ErrorKind::Io(io_err) => InventoryError::Io(io_err),
        other => InventoryError::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            format!("{other:?}"),
        )),
    }
}
