//! CSV to grid reading.
//!
//! The first record is the header row. Short records are padded with blank
//! cells; a record wider than the header is rejected.

use std::path::Path;

use csv::ReaderBuilder;
use medicor_core::SheetGrid;
use medicor_model::CellValue;

use crate::error::{IngestError, Result};

/// Read the CSV file at `path` into a grid.
///
/// # Errors
///
/// Returns an [`IngestError`] when the file cannot be opened or parsed, has
/// no header row, or has a record wider than its header.
pub fn read_csv_grid(path: &Path) -> Result<SheetGrid> {
    let file = std::fs::File::open(path).map_err(|e| IngestError::io(path, e))?;
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(file);

    let mut records = reader.records();
    let headers: Vec<String> = match records.next() {
        Some(record) => record
            .map_err(|source| csv_error(path, source))?
            .iter()
            .map(|value| value.trim_matches('\u{feff}').trim().to_string())
            .collect(),
        None => {
            return Err(IngestError::EmptyCsv {
                path: path.to_path_buf(),
            });
        }
    };

    let mut rows = Vec::new();
    for record in records {
        let record = record.map_err(|source| csv_error(path, source))?;
        rows.push(record.iter().map(CellValue::text).collect());
    }

    let grid = SheetGrid::new(headers, rows).map_err(|source| IngestError::Grid {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(
        path = %path.display(),
        rows = grid.rows().len(),
        columns = grid.headers().len(),
        "Loaded grid"
    );
    Ok(grid)
}

fn csv_error(path: &Path, source: csv::Error) -> IngestError {
    IngestError::CsvParse {
        path: path.to_path_buf(),
        source,
    }
}
