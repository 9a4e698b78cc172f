//! Configuration errors.
//!
//! These are raised while mappings are loaded or resolved, always before any
//! cell of the grid is touched.

use thiserror::Error;

/// A mapping section is absent, empty, or names columns the grid lacks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("missing required mapping section '{section}'")]
    MissingSection { section: &'static str },

    #[error("mapping section '{section}' has no entries")]
    EmptySection { section: &'static str },

    #[error("mapping section '{section}' names unknown header '{header}'")]
    UnknownHeader {
        section: &'static str,
        header: String,
    },

    #[error("mapping section '{section}' names column {index}, but the grid has {columns} columns")]
    ColumnOutOfRange {
        section: &'static str,
        index: usize,
        columns: usize,
    },

    #[error("mapping section '{section}' has a blank column identifier")]
    InvalidColumn { section: &'static str },

    #[error("mapping section '{section}' maps column {column} more than once")]
    DuplicateColumn { section: &'static str, column: usize },

    #[error("mapping section '{section}' maps column {column} onto itself")]
    SelfReference { section: &'static str, column: usize },
}

pub type Result<T> = std::result::Result<T, ConfigError>;
