//! Settings file loading.
//!
//! Settings use the PascalCase keys of `appsettings.json`:
//!
//! ```json
//! {
//!   "FileRoot": "data/",
//!   "FileName": "theatre-times",
//!   "NullColumns": { "2": 1, "Surgery finish time": { "Placeholder": "Not recorded" } },
//!   "IncorrectTimeColumns": { "4": 3 },
//!   "DateOrder": "DayFirst"
//! }
//! ```
//!
//! Files ending in `.toml` are read as TOML with the same keys.

use std::path::{Path, PathBuf};

use medicor_core::DateOrder;
use medicor_model::{ConfigError, FillMapping, RawMappings, ReferenceMapping};
use serde::Deserialize;

use crate::error::{IngestError, Result};

/// Default settings file name, looked up in the working directory.
pub const DEFAULT_SETTINGS_FILE: &str = "appsettings.json";

/// Extension appended to `FileName` when building the input path.
pub const INPUT_EXTENSION: &str = "csv";

/// Parsed settings file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Settings {
    /// Directory prefix of the input file, used verbatim.
    #[serde(default)]
    pub file_root: Option<String>,

    /// Input file name without extension.
    #[serde(default)]
    pub file_name: Option<String>,

    /// Fill Mapping.
    #[serde(default)]
    pub null_columns: Option<FillMapping>,

    /// Reference Mapping.
    #[serde(default)]
    pub incorrect_time_columns: Option<ReferenceMapping>,

    #[serde(default)]
    pub date_order: DateOrder,
}

impl Settings {
    /// Parse settings from JSON text.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error when the text is not a valid settings
    /// document.
    pub fn from_json(text: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Parse settings from TOML text.
    ///
    /// # Errors
    ///
    /// Returns the `toml` error when the text is not a valid settings
    /// document.
    pub fn from_toml(text: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Both mappings, checked for presence and entries.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingSection`] or
    /// [`ConfigError::EmptySection`].
    pub fn mappings(&self) -> std::result::Result<RawMappings, ConfigError> {
        RawMappings::from_sections(
            self.null_columns.clone(),
            self.incorrect_time_columns.clone(),
        )
    }

    /// Input file named by `FileRoot` and `FileName`, if `FileName` is set.
    pub fn input_path(&self) -> Option<PathBuf> {
        let name = self.file_name.as_deref()?.trim();
        if name.is_empty() {
            return None;
        }
        let root = self.file_root.as_deref().unwrap_or_default();
        Some(PathBuf::from(format!("{root}{name}.{INPUT_EXTENSION}")))
    }
}

/// Load settings from `path`, choosing the format by extension.
///
/// # Errors
///
/// Returns an [`IngestError`] when the file cannot be read, has an unknown
/// extension, or does not parse.
pub fn load_settings(path: &Path) -> Result<Settings> {
    let format = SettingsFormat::from_path(path)?;
    let text = std::fs::read_to_string(path).map_err(|e| IngestError::io(path, e))?;
    let settings = match format {
        SettingsFormat::Json => Settings::from_json(&text).map_err(|source| {
            IngestError::SettingsJson {
                path: path.to_path_buf(),
                source,
            }
        })?,
        SettingsFormat::Toml => Settings::from_toml(&text).map_err(|source| {
            IngestError::SettingsToml {
                path: path.to_path_buf(),
                source,
            }
        })?,
    };
    tracing::info!(
        path = %path.display(),
        fill_entries = settings.null_columns.as_ref().map_or(0, FillMapping::len),
        reference_entries = settings
            .incorrect_time_columns
            .as_ref()
            .map_or(0, ReferenceMapping::len),
        "Loaded settings"
    );
    Ok(settings)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SettingsFormat {
    Json,
    Toml,
}

impl SettingsFormat {
    fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            _ => Err(IngestError::UnsupportedSettingsFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}
