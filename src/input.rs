//! CSV input plumbing shared by the annotation and task readers.
//!
//! Both input files are header-keyed: columns are located by name, not
//! position, and a missing required column is fatal at read time rather than
//! producing empty fields downstream.

use std::fs::File;
use std::path::Path;

use crate::error::{Error, Result};

/// Open a CSV file for header-keyed reading.
///
/// A missing or unreadable file is reported as [`Error::NotFound`] after an
/// error-level diagnostic naming the path. Rows are allowed to be shorter
/// than the header; absent cells read as empty strings.
pub(crate) fn open_reader(path: &Path) -> Result<csv::Reader<File>> {
    let file = File::open(path).map_err(|e| {
        log::error!("cannot open {}: {}", path.display(), e);
        Error::not_found(path.display().to_string())
    })?;
    Ok(csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file))
}

/// Resolve required header columns to field indexes, in the order given.
pub(crate) fn column_indexes(
    reader: &mut csv::Reader<File>,
    required: &[&str],
    path: &Path,
) -> Result<Vec<usize>> {
    let headers = reader.headers()?.clone();
    required
        .iter()
        .map(|name| {
            headers
                .iter()
                .position(|h| h == *name)
                .ok_or_else(|| Error::schema_mismatch(*name, path.display().to_string()))
        })
        .collect()
}
