//! Reading inventory exports into [`Source`]s.

use std::path::Path;

use crate::config::ColumnMapping;
use crate::error::ReconError;
use crate::model::{Source, FIRST_DATA_ROW};

/// Read a file and convert to UTF-8 if needed.
///
/// Spreadsheet exports are often Windows-1252; anything that is not valid
/// UTF-8 is decoded that way. A leading byte-order mark is dropped so the
/// first header compares cleanly.
pub fn read_source_file(label: &str, path: &Path) -> Result<String, ReconError> {
    let bytes = std::fs::read(path)
        .map_err(|e| ReconError::unreadable(label, format!("{}: {e}", path.display())))?;

    let text = match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => {
            log::debug!("{label}: {} is not UTF-8, decoding as Windows-1252", path.display());
            let bytes = e.into_bytes();
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            decoded.into_owned()
        }
    };

    Ok(match text.strip_prefix('\u{feff}') {
        Some(rest) => rest.to_string(),
        None => text,
    })
}

/// Parse delimited text into a [`Source`], looking columns up by header name.
///
/// Positions count the header as row 1. Rows shorter than the header read
/// missing cells as empty.
pub fn load_source(
    label: &str,
    data: &str,
    columns: &ColumnMapping,
    delimiter: u8,
) -> Result<Source, ReconError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(data.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| ReconError::unreadable(label, e))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    // A repeated header resolves to its last column.
    let idx = |name: &str| -> Result<usize, ReconError> {
        let name = name.trim();
        headers
            .iter()
            .rposition(|h| h == name)
            .ok_or_else(|| ReconError::MissingColumn {
                source: label.into(),
                column: name.into(),
            })
    };

    let key_idx = idx(&columns.key)?;
    let tag_idx = idx(&columns.tag)?;
    let serial_idx = idx(&columns.serial)?;

    let mut source = Source::new(label);

    for (i, record) in reader.records().enumerate() {
        let record = record.map_err(|e| ReconError::unreadable(label, e))?;
        let cell = |idx: usize| record.get(idx).unwrap_or("");
        source.push_row(
            i + FIRST_DATA_ROW,
            cell(key_idx),
            cell(tag_idx),
            cell(serial_idx),
        );
    }

    if source.is_empty() {
        log::warn!("{label}: no rows with a non-blank '{}'", columns.key);
    }
    log::debug!(
        "{label}: loaded {} rows ({} blank keys skipped)",
        source.len(),
        source.blank_keys
    );

    Ok(source)
}
