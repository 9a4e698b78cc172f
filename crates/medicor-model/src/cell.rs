//! Typed cell content.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Day zero of spreadsheet serial dates.
///
/// Time-only values are placed on this date so that the times of one row
/// compare against each other without inventing a calendar day.
pub const SERIAL_EPOCH: NaiveDate = match NaiveDate::from_ymd_opt(1899, 12, 30) {
    Some(date) => date,
    None => panic!("invalid serial epoch"),
};

/// Content of a single grid cell.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum CellValue {
    /// Nothing stored in the cell.
    #[default]
    Empty,
    /// Raw text as entered.
    Text(String),
    /// Numeric content, read as a serial date when a timestamp is expected.
    Number(f64),
    /// A timestamp written back by a correction or fill.
    DateTime(NaiveDateTime),
}

impl CellValue {
    /// Build a text cell, collapsing empty input to [`CellValue::Empty`].
    pub fn text(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.is_empty() {
            Self::Empty
        } else {
            Self::Text(value)
        }
    }

    /// Returns true when the cell has no content or only whitespace.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(text) => text.trim().is_empty(),
            Self::Number(_) | Self::DateTime(_) => false,
        }
    }

    /// Display text of the cell, as a spreadsheet would show it.
    pub fn to_text(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Text(text) => text.clone(),
            Self::Number(number) => number.to_string(),
            Self::DateTime(value) => format_timestamp(*value),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(value: NaiveDateTime) -> Self {
        Self::DateTime(value)
    }
}

/// Render a timestamp in the form the cell parser reads back.
///
/// Values on [`SERIAL_EPOCH`] render as `HH:MM`, everything else as
/// `YYYY-MM-DD HH:MM`. Seconds are appended only when non-zero, and the
/// fraction of a second only when there is one.
pub fn format_timestamp(value: NaiveDateTime) -> String {
    let time = if value.nanosecond() != 0 {
        value.format("%H:%M:%S%.f")
    } else if value.second() != 0 {
        value.format("%H:%M:%S")
    } else {
        value.format("%H:%M")
    };
    if value.date() == SERIAL_EPOCH {
        time.to_string()
    } else {
        format!("{} {}", value.format("%Y-%m-%d"), time)
    }
}
