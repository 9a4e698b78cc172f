//! Cell styling for annotations.
//!
//! The formatter only says which cells deserve attention. This sink turns
//! each request into a concrete spreadsheet style and saves the list next to
//! the output grid as `<stem>.annotations.json`, ready to be applied by
//! whatever opens the sheet:
//!
//! | Kind                   | Style                         |
//! |------------------------|-------------------------------|
//! | `filled`               | thick deep sky blue border    |
//! | `clock-corrected`      | thick red border              |
//! | `chronology-violation` | green fill, white font        |

use std::fs;
use std::path::{Path, PathBuf};

use medicor_core::{AnnotationSink, GridAccessor};
use medicor_model::AnnotationKind;
use serde::Serialize;

use crate::csv_grid::ensure_parent_dir;
use crate::error::{OutputError, Result};

/// Suffix replacing the output extension for the styling sidecar.
pub const SIDECAR_SUFFIX: &str = "annotations.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Color {
    DeepSkyBlue,
    Red,
    Green,
    White,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BorderWeight {
    Thick,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Border {
    pub color: Color,
    pub weight: BorderWeight,
}

/// Style applied to one cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CellStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border: Option<Border>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<Color>,
}

impl CellStyle {
    /// Style used for an annotation kind.
    pub const fn for_kind(kind: AnnotationKind) -> Self {
        match kind {
            AnnotationKind::Filled => Self::thick_border(Color::DeepSkyBlue),
            AnnotationKind::ClockCorrected => Self::thick_border(Color::Red),
            AnnotationKind::ChronologyViolation => Self {
                border: None,
                fill: Some(Color::Green),
                font: Some(Color::White),
            },
        }
    }

    const fn thick_border(color: Color) -> Self {
        Self {
            border: Some(Border {
                color,
                weight: BorderWeight::Thick,
            }),
            fill: None,
            font: None,
        }
    }
}

/// One styled cell of the sidecar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyledCell {
    pub row: usize,
    pub column: usize,
    pub header: String,
    pub kind: AnnotationKind,
    pub style: CellStyle,
}

/// Annotation sink that collects styled cells for a grid.
#[derive(Debug, Clone, Default)]
pub struct StyledAnnotations {
    headers: Vec<String>,
    cells: Vec<StyledCell>,
}

impl StyledAnnotations {
    /// Sink for `grid`, remembering its header row.
    pub fn for_grid<G>(grid: &G) -> Self
    where
        G: GridAccessor + ?Sized,
    {
        Self {
            headers: (1..=grid.column_count())
                .map(|column| grid.header_text(column))
                .collect(),
            cells: Vec::new(),
        }
    }

    /// Styled cells in the order they were annotated.
    pub fn cells(&self) -> &[StyledCell] {
        &self.cells
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Write the styled cells as pretty JSON to `path`.
    ///
    /// # Errors
    ///
    /// Returns an [`OutputError`] when serialization or the write fails.
    pub fn write_json(&self, path: &Path) -> Result<()> {
        ensure_parent_dir(path)?;
        let json = serde_json::to_string_pretty(&self.cells).map_err(|source| {
            OutputError::Json {
                path: path.to_path_buf(),
                source,
            }
        })?;
        fs::write(path, json).map_err(|source| OutputError::FileWrite {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), cells = self.cells.len(), "Wrote annotations");
        Ok(())
    }
}

impl AnnotationSink for StyledAnnotations {
    fn annotate(&mut self, row: usize, column: usize, kind: AnnotationKind) {
        let duplicate = self
            .cells
            .iter()
            .any(|cell| cell.row == row && cell.column == column && cell.kind == kind);
        if duplicate {
            return;
        }
        let header = column
            .checked_sub(1)
            .and_then(|idx| self.headers.get(idx))
            .cloned()
            .unwrap_or_default();
        self.cells.push(StyledCell {
            row,
            column,
            header,
            kind,
            style: CellStyle::for_kind(kind),
        });
    }
}

/// Sidecar path for an output grid: `theatre.csv` becomes
/// `theatre.annotations.json` in the same directory.
pub fn sidecar_path(output: &Path) -> PathBuf {
    let stem = output
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    output.with_file_name(format!("{stem}.{SIDECAR_SUFFIX}"))
}
