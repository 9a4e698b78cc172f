//! Error types for formatting passes.

use medicor_model::ConfigError;
use thiserror::Error;

/// Errors from the grid storage behind a [`crate::GridAccessor`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// Cell address outside the grid extents.
    #[error("cell ({row}, {column}) is outside a grid of {rows} rows and {columns} columns")]
    OutOfBounds {
        row: usize,
        column: usize,
        rows: usize,
        columns: usize,
    },

    /// Writes to the header row are refused.
    #[error("column {column} of the header row cannot be overwritten")]
    HeaderRow { column: usize },

    /// A data row is wider than the header row.
    #[error("row {row} has {found} cells, but the header has {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Errors that stop a formatting pass.
#[derive(Debug, Error)]
pub enum FormatError {
    /// Mappings could not be resolved; nothing was modified.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The grid refused a read or write.
    #[error(transparent)]
    Grid(#[from] GridError),
}

pub type Result<T> = std::result::Result<T, FormatError>;
