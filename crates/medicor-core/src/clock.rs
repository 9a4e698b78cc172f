//! 12-hour clock correction.
//!
//! Theatre times are often keyed on a 12-hour clock without a marker, so an
//! evening event such as 14:30 ends up recorded as 02:30. Events of one case
//! happen in column order, so the other timestamps of the same row tell
//! whether a morning reading is really an afternoon one.
//!
//! Per row, columns are visited in ascending order:
//!
//! 1. A cell that is not a timestamp, or whose hour is above
//!    [`AMBIGUOUS_HOUR_CEILING`], is left alone.
//! 2. Otherwise the nearest timestamp in the row is the anchor: searching
//!    towards higher columns, or towards lower columns when the cell is in the
//!    last column. No anchor, or an anchor that is itself at or below the
//!    ceiling, leaves the cell alone.
//! 3. The cell moved forward 12 hours is accepted when it still sorts before
//!    an anchor to its right, or after an anchor to its left.
//! 4. After an acceptance against an anchor to the right, earlier cells of
//!    the row at or below the ceiling are moved forward 12 hours as long as
//!    they stay at or before the value corrected after them.
//!
//! Corrections are written into the grid at once, so later columns see them.
//! A time-only cell is ordered against a dated one by time of day.

use chrono::{Duration, NaiveDateTime, Timelike};
use medicor_model::{AnnotationKind, ChangeReason, ChangeRecord};
use tracing::{debug, trace};

use crate::context::FormatContext;
use crate::datetime::chronological_cmp;
use crate::error::GridError;
use crate::grid::GridAccessor;
use crate::sink::AnnotationSink;

/// Highest hour that may be a mislabelled afternoon reading.
///
/// The ceiling is 9 rather than 12: readings from 10:00 to 12:59 are common
/// genuine morning times and are never moved.
pub const AMBIGUOUS_HOUR_CEILING: u32 = 9;

fn half_day() -> Duration {
    Duration::hours(12)
}

/// Returns true if the hour of `value` is at or below the ceiling.
pub fn is_ambiguous(value: NaiveDateTime) -> bool {
    value.hour() <= AMBIGUOUS_HOUR_CEILING
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AnchorSide {
    After,
    Before,
}

#[derive(Debug, Clone, Copy)]
struct Anchor {
    column: usize,
    value: NaiveDateTime,
    side: AnchorSide,
}

impl Anchor {
    fn accepts(&self, shifted: NaiveDateTime) -> bool {
        match self.side {
            AnchorSide::After => chronological_cmp(shifted, self.value).is_le(),
            AnchorSide::Before => chronological_cmp(self.value, shifted).is_le(),
        }
    }
}

fn find_anchor<G>(ctx: &FormatContext<'_>, grid: &G, row: usize, column: usize) -> Option<Anchor>
where
    G: GridAccessor + ?Sized,
{
    let last = grid.column_count();
    let anchor_at = |side: AnchorSide| {
        move |candidate: usize| {
            ctx.parser
                .parse_cell(grid, row, candidate)
                .map(|value| Anchor {
                    column: candidate,
                    value,
                    side,
                })
        }
    };
    if column == last {
        (1..column).rev().find_map(anchor_at(AnchorSide::Before))
    } else {
        (column + 1..=last).find_map(anchor_at(AnchorSide::After))
    }
}

/// Correct the cell at `(row, column)` and, after an acceptance, the earlier
/// cells of the row.
///
/// Returns every change made, the cell itself first.
///
/// # Errors
///
/// Propagates a refused write from the grid.
pub fn correct_cell<G, S>(
    ctx: &FormatContext<'_>,
    grid: &mut G,
    sink: &mut S,
    row: usize,
    column: usize,
) -> Result<Vec<ChangeRecord>, GridError>
where
    G: GridAccessor + ?Sized,
    S: AnnotationSink + ?Sized,
{
    let Some(current) = ctx.parser.parse_cell(&*grid, row, column) else {
        return Ok(Vec::new());
    };
    if !is_ambiguous(current) {
        return Ok(Vec::new());
    }
    let Some(anchor) = find_anchor(ctx, &*grid, row, column) else {
        trace!(row, column, "no anchor in row");
        return Ok(Vec::new());
    };
    if is_ambiguous(anchor.value) {
        trace!(row, column, anchor = anchor.column, "anchor is also ambiguous");
        return Ok(Vec::new());
    }

    let shifted = current + half_day();
    if !anchor.accepts(shifted) {
        trace!(row, column, anchor = anchor.column, "shift rejected by anchor");
        return Ok(Vec::new());
    }

    let mut changes = vec![apply_shift(grid, sink, row, column, shifted)?];
    if anchor.side == AnchorSide::After {
        back_propagate(ctx, grid, sink, row, column, shifted, &mut changes)?;
    }
    Ok(changes)
}

/// Move earlier ambiguous cells of the row forward 12 hours, walking from
/// `column - 1` down to the first column.
///
/// Each cell is bounded by the nearest value corrected after it, not only by
/// the cell that triggered the walk, so the moved cells stay in column order.
fn back_propagate<G, S>(
    ctx: &FormatContext<'_>,
    grid: &mut G,
    sink: &mut S,
    row: usize,
    column: usize,
    corrected: NaiveDateTime,
    changes: &mut Vec<ChangeRecord>,
) -> Result<(), GridError>
where
    G: GridAccessor + ?Sized,
    S: AnnotationSink + ?Sized,
{
    let mut bound = corrected;
    for earlier in (1..column).rev() {
        let Some(value) = ctx.parser.parse_cell(&*grid, row, earlier) else {
            continue;
        };
        if !is_ambiguous(value) {
            continue;
        }
        let shifted = value + half_day();
        if chronological_cmp(shifted, bound).is_le() {
            changes.push(apply_shift(grid, sink, row, earlier, shifted)?);
            bound = shifted;
        }
    }
    Ok(())
}

fn apply_shift<G, S>(
    grid: &mut G,
    sink: &mut S,
    row: usize,
    column: usize,
    shifted: NaiveDateTime,
) -> Result<ChangeRecord, GridError>
where
    G: GridAccessor + ?Sized,
    S: AnnotationSink + ?Sized,
{
    let previous = grid.value(row, column);
    grid.set_value(row, column, shifted.into())?;
    sink.annotate(row, column, AnnotationKind::ClockCorrected);
    debug!(row, column, "12-hour reading moved to afternoon");
    Ok(ChangeRecord {
        row,
        column,
        previous,
        value: shifted.into(),
        reason: ChangeReason::ClockCorrection,
    })
}

/// Correct every column of `row` in ascending order.
///
/// # Errors
///
/// Propagates a refused write from the grid.
pub fn disambiguate_row<G, S>(
    ctx: &FormatContext<'_>,
    grid: &mut G,
    sink: &mut S,
    row: usize,
) -> Result<Vec<ChangeRecord>, GridError>
where
    G: GridAccessor + ?Sized,
    S: AnnotationSink + ?Sized,
{
    let mut changes = Vec::new();
    for column in 1..=grid.column_count() {
        changes.extend(correct_cell(ctx, grid, sink, row, column)?);
    }
    Ok(changes)
}
