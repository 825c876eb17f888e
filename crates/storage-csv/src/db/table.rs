use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::errors::{IntoCore, StorageError};
use tickerbook_core::Result;

/// A row type stored as one CSV file with a fixed header.
pub trait CsvTable: Serialize + DeserializeOwned {
    /// Column names, in serialization order.
    const HEADERS: &'static [&'static str];
}

/// Reads every row of `path`. A missing file is an empty table.
pub fn read_table<R: CsvTable>(path: &Path) -> Result<Vec<R>> {
    let file = match fs::File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(StorageError::Io(e).into()),
    };

    let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(file);
    let rows = reader.deserialize().collect::<std::result::Result<Vec<R>, _>>().into_core()?;
    debug!("Read {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Replaces the contents of `path` with the header and `rows`.
///
/// Writes to `<path>.tmp` and renames it over `path`.
pub fn write_table<R: CsvTable>(path: &Path, rows: &[R]) -> Result<()> {
    let tmp_path = path.with_extension("csv.tmp");

    let write = || -> std::result::Result<(), StorageError> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&tmp_path)?;
        writer.write_record(R::HEADERS)?;
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        Ok(())
    };

    if let Err(e) = write() {
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }

    fs::rename(&tmp_path, path).into_core()?;
    debug!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}
