//! Error types for settings and grid ingestion.

use std::path::PathBuf;

use medicor_core::GridError;
use thiserror::Error;

/// Errors that can occur while loading settings or reading a grid.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === CSV Errors ===
    /// Failed to parse CSV.
    #[error("failed to parse CSV {path}: {source}")]
    CsvParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// CSV file has no header row.
    #[error("CSV file is empty: {path}")]
    EmptyCsv { path: PathBuf },

    /// A data row does not fit under the header row.
    #[error("invalid grid in {path}: {source}")]
    Grid {
        path: PathBuf,
        #[source]
        source: GridError,
    },

    // === Settings Errors ===
    /// Settings file is not valid JSON.
    #[error("failed to parse settings {path}: {source}")]
    SettingsJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Settings file is not valid TOML.
    #[error("failed to parse settings {path}: {source}")]
    SettingsToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Settings file extension is neither `.json` nor `.toml`.
    #[error("unsupported settings format for {path}: expected .json or .toml")]
    UnsupportedSettingsFormat { path: PathBuf },

    /// No input given on the command line and none in settings.
    #[error("no input file: pass a path or set FileName in settings")]
    MissingInput,
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

impl IngestError {
    /// Map an I/O error on `path`, keeping not-found distinct.
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::FileRead {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}
