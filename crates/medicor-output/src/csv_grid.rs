//! Grid to CSV writing.

use std::fs;
use std::path::Path;

use csv::WriterBuilder;
use medicor_core::GridAccessor;

use crate::error::{OutputError, Result};

/// Ensure a parent directory exists for a file path.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| OutputError::FileWrite {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

/// Write the header row and every data row of `grid` to `path`.
///
/// Cells are written as their display text, so corrected timestamps read
/// back to the same values.
pub fn write_csv_grid<G>(grid: &G, path: &Path) -> Result<()>
where
    G: GridAccessor + ?Sized,
{
    ensure_parent_dir(path)?;
    let csv_error = |source| OutputError::CsvWrite {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = WriterBuilder::new().from_path(path).map_err(csv_error)?;

    let columns = 1..=grid.column_count();
    writer
        .write_record(columns.clone().map(|column| grid.header_text(column)))
        .map_err(csv_error)?;
    for row in grid.data_rows() {
        writer
            .write_record(columns.clone().map(|column| grid.text(row, column)))
            .map_err(csv_error)?;
    }
    writer.flush().map_err(|source| OutputError::FileWrite {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!(
        path = %path.display(),
        rows = grid.row_count().saturating_sub(1),
        "Wrote grid"
    );
    Ok(())
}
