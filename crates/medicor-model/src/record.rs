//! Records produced by a formatting pass.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cell::CellValue;

/// Why a cell value was changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChangeReason {
    /// A blank cell received a placeholder or a sibling's timestamp.
    NullFill,
    /// A 12-hour reading was moved to the afternoon.
    ClockCorrection,
}

impl ChangeReason {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NullFill => "null-fill",
            Self::ClockCorrection => "clock-correction",
        }
    }

    /// The annotation a change of this kind asks for.
    #[must_use]
    pub const fn annotation(self) -> AnnotationKind {
        match self {
            Self::NullFill => AnnotationKind::Filled,
            Self::ClockCorrection => AnnotationKind::ClockCorrected,
        }
    }
}

impl fmt::Display for ChangeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One mutation of the grid. Rows and columns are 1-based.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeRecord {
    pub row: usize,
    pub column: usize,
    pub previous: CellValue,
    pub value: CellValue,
    pub reason: ChangeReason,
}

/// A cell timestamped earlier than its reference column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnomalyRecord {
    pub row: usize,
    pub column: usize,
    /// The reference column the cell was compared against.
    pub reference: usize,
}

/// Visual annotation requested for a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnnotationKind {
    Filled,
    ClockCorrected,
    ChronologyViolation,
}

impl AnnotationKind {
    pub const ALL: [Self; 3] = [Self::Filled, Self::ClockCorrected, Self::ChronologyViolation];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Filled => "filled",
            Self::ClockCorrected => "clock-corrected",
            Self::ChronologyViolation => "chronology-violation",
        }
    }
}

impl fmt::Display for AnnotationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
