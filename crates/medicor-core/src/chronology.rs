//! Chronology checks between paired columns.
//!
//! A column listed in the Reference Mapping must not be timestamped before
//! its reference column in the same row. A violation is reported and
//! annotated, never corrected.

use medicor_model::{AnnotationKind, AnomalyRecord};
use tracing::debug;

use crate::context::FormatContext;
use crate::datetime::chronological_cmp;
use crate::grid::GridAccessor;
use crate::sink::AnnotationSink;

/// Compare the cell at `(row, column)` with its reference column.
///
/// Returns `None` when the column has no reference or either cell is not a
/// timestamp.
pub fn check_order<G, S>(
    ctx: &FormatContext<'_>,
    grid: &G,
    sink: &mut S,
    row: usize,
    column: usize,
) -> Option<AnomalyRecord>
where
    G: GridAccessor + ?Sized,
    S: AnnotationSink + ?Sized,
{
    let reference = ctx.mappings.reference_column(column)?;
    let current = ctx.parser.parse_cell(grid, row, column)?;
    let partner = ctx.parser.parse_cell(grid, row, reference)?;
    if chronological_cmp(current, partner).is_ge() {
        return None;
    }
    sink.annotate(row, column, AnnotationKind::ChronologyViolation);
    debug!(row, column, reference, "timestamp precedes its reference column");
    Some(AnomalyRecord {
        row,
        column,
        reference,
    })
}

/// Check every column of `row`.
pub fn check_row<G, S>(
    ctx: &FormatContext<'_>,
    grid: &G,
    sink: &mut S,
    row: usize,
) -> Vec<AnomalyRecord>
where
    G: GridAccessor + ?Sized,
    S: AnnotationSink + ?Sized,
{
    (1..=grid.column_count())
        .filter_map(|column| check_order(ctx, grid, sink, row, column))
        .collect()
}
