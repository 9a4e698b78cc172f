//! Cell timestamp parsing.
//!
//! Theatre sheets mix full timestamps, dates and bare clock times. Every form
//! is read into a [`NaiveDateTime`]:
//!
//! - date and time: as written
//! - date only: midnight of that day
//! - time only: that time on [`SERIAL_EPOCH`]
//! - spreadsheet serial numbers: days since [`SERIAL_EPOCH`]
//!
//! A value that matches none of these is not a timestamp. That is a normal
//! outcome, not an error. Text written back by
//! [`medicor_model::cell::format_timestamp`] always parses to the value it was
//! rendered from.

use std::cmp::Ordering;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use medicor_model::CellValue;
use medicor_model::cell::SERIAL_EPOCH;
use serde::{Deserialize, Serialize};

use crate::grid::GridAccessor;

/// Largest serial number that is still a valid date (9999-12-31).
const MAX_SERIAL: f64 = 2_958_465.0;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// How all-numeric dates such as `03/04/2024` are read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateOrder {
    /// `dd/mm/yyyy`
    #[default]
    DayFirst,
    /// `mm/dd/yyyy`
    MonthFirst,
}

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%d-%b-%Y %H:%M:%S", // 15-Jan-2024 10:30:00
    "%d-%b-%Y %H:%M",
    "%d %b %Y %H:%M:%S",
    "%d %b %Y %H:%M",
    "%Y-%m-%d %I:%M:%S %p",
    "%Y-%m-%d %I:%M %p",
];

const DAY_FIRST_DATETIME_FORMATS: &[&str] = &[
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%d/%m/%Y %I:%M:%S %p",
    "%d/%m/%Y %I:%M %p",
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
    "%d-%m-%Y %H:%M:%S",
    "%d-%m-%Y %H:%M",
];

const MONTH_FIRST_DATETIME_FORMATS: &[&str] = &[
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
    "%m-%d-%Y %H:%M:%S",
    "%m-%d-%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d-%b-%Y", // 15-Jan-2024
    "%d-%B-%Y", // 15-January-2024
    "%d %b %Y", // 15 Jan 2024
    "%d %B %Y", // 15 January 2024
];

const DAY_FIRST_DATE_FORMATS: &[&str] = &["%d/%m/%Y", "%d.%m.%Y", "%d-%m-%Y"];

const MONTH_FIRST_DATE_FORMATS: &[&str] = &["%m/%d/%Y", "%m-%d-%Y"];

const TIME_FORMATS: &[&str] = &[
    "%H:%M:%S%.f",
    "%H:%M:%S",
    "%H:%M",
    "%I:%M:%S %p",
    "%I:%M %p",
    "%I:%M%p",
];

/// Reads cell content as timestamps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellParser {
    date_order: DateOrder,
}

impl CellParser {
    #[must_use]
    pub const fn new(date_order: DateOrder) -> Self {
        Self { date_order }
    }

    #[must_use]
    pub const fn date_order(&self) -> DateOrder {
        self.date_order
    }

    /// Parse raw cell text. Blank text is never a timestamp.
    pub fn parse_text(&self, raw: &str) -> Option<NaiveDateTime> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        self.try_parse_datetime(trimmed)
            .or_else(|| self.try_parse_date(trimmed).map(|d| d.and_time(NaiveTime::MIN)))
            .or_else(|| try_parse_time(trimmed).map(|t| SERIAL_EPOCH.and_time(t)))
    }

    /// Parse a typed cell value.
    pub fn parse_value(&self, value: &CellValue) -> Option<NaiveDateTime> {
        match value {
            CellValue::Empty => None,
            CellValue::Text(text) => self.parse_text(text),
            CellValue::Number(serial) => from_serial(*serial),
            CellValue::DateTime(value) => Some(*value),
        }
    }

    /// Parse the cell at `(row, column)`.
    pub fn parse_cell<G>(&self, grid: &G, row: usize, column: usize) -> Option<NaiveDateTime>
    where
        G: GridAccessor + ?Sized,
    {
        self.parse_value(&grid.value(row, column))
    }

    fn try_parse_datetime(&self, value: &str) -> Option<NaiveDateTime> {
        let ordered = match self.date_order {
            DateOrder::DayFirst => DAY_FIRST_DATETIME_FORMATS,
            DateOrder::MonthFirst => MONTH_FIRST_DATETIME_FORMATS,
        };
        DATETIME_FORMATS
            .iter()
            .chain(ordered)
            .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
    }

    fn try_parse_date(&self, value: &str) -> Option<NaiveDate> {
        let ordered = match self.date_order {
            DateOrder::DayFirst => DAY_FIRST_DATE_FORMATS,
            DateOrder::MonthFirst => MONTH_FIRST_DATE_FORMATS,
        };
        DATE_FORMATS
            .iter()
            .chain(ordered)
            .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
    }
}

fn try_parse_time(value: &str) -> Option<NaiveTime> {
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(value, fmt).ok())
}

/// Parse raw cell text with day-first dates.
pub fn parse(raw: &str) -> Option<NaiveDateTime> {
    CellParser::default().parse_text(raw)
}

/// Order two timestamps of the same row.
///
/// A time-only value sits on [`SERIAL_EPOCH`] and has no real day, so when
/// only one side is time-only the times of day are compared instead.
pub fn chronological_cmp(left: NaiveDateTime, right: NaiveDateTime) -> Ordering {
    if (left.date() == SERIAL_EPOCH) == (right.date() == SERIAL_EPOCH) {
        left.cmp(&right)
    } else {
        left.time().cmp(&right.time())
    }
}

/// Convert a spreadsheet serial number to a timestamp.
///
/// The integer part counts days from [`SERIAL_EPOCH`], the fraction is the
/// time of day, rounded to the nearest second.
pub fn from_serial(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || !(0.0..MAX_SERIAL + 1.0).contains(&serial) {
        return None;
    }
    let seconds = (serial * SECONDS_PER_DAY).round() as i64;
    SERIAL_EPOCH
        .and_time(NaiveTime::MIN)
        .checked_add_signed(Duration::seconds(seconds))
}
