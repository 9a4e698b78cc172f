//! Blank cell filling.
//!
//! A blank cell whose column has a Fill Mapping entry receives either the
//! placeholder text verbatim or the parsed timestamp of its source column in
//! the same row. A source that does not parse leaves the cell blank.

use medicor_model::{AnnotationKind, CellValue, ChangeReason, ChangeRecord};
use tracing::{debug, trace};

use crate::context::FormatContext;
use crate::error::GridError;
use crate::grid::GridAccessor;
use crate::resolve::ResolvedFill;
use crate::sink::AnnotationSink;

/// Fill the cell at `(row, column)` if it is blank and mapped.
///
/// Returns the change made, or `None` when the cell was not blank, the column
/// is unmapped, or the source column holds no timestamp.
///
/// # Errors
///
/// Propagates a refused write from the grid.
pub fn fill_blank<G, S>(
    ctx: &FormatContext<'_>,
    grid: &mut G,
    sink: &mut S,
    row: usize,
    column: usize,
) -> Result<Option<ChangeRecord>, GridError>
where
    G: GridAccessor + ?Sized,
    S: AnnotationSink + ?Sized,
{
    let previous = grid.value(row, column);
    if !previous.is_blank() {
        return Ok(None);
    }
    let Some(source) = ctx.mappings.fill_source(column) else {
        return Ok(None);
    };
    let value = match source {
        ResolvedFill::Placeholder(text) => CellValue::text(text.as_str()),
        ResolvedFill::Column(partner) => match ctx.parser.parse_cell(&*grid, row, *partner) {
            Some(timestamp) => CellValue::DateTime(timestamp),
            None => {
                trace!(row, column, source = *partner, "fill source holds no timestamp");
                return Ok(None);
            }
        },
    };
    if value.is_blank() {
        return Ok(None);
    }

    grid.set_value(row, column, value.clone())?;
    sink.annotate(row, column, AnnotationKind::Filled);
    debug!(row, column, "blank cell filled");
    Ok(Some(ChangeRecord {
        row,
        column,
        previous,
        value,
        reason: ChangeReason::NullFill,
    }))
}

/// Fill every blank, mapped cell of `row`.
///
/// Columns are swept in ascending order until a sweep fills nothing, so a
/// column copying from a later column that is itself filled still gets a
/// value.
///
/// # Errors
///
/// Propagates a refused write from the grid.
pub fn fill_row<G, S>(
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
    loop {
        let before = changes.len();
        for column in 1..=grid.column_count() {
            if let Some(change) = fill_blank(ctx, grid, sink, row, column)? {
                changes.push(change);
            }
        }
        if changes.len() == before {
            return Ok(changes);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datetime::parse;
    use crate::grid::SheetGrid;
    use crate::resolve::ResolvedMappings;
    use crate::sink::AnnotationLog;

    fn grid(row: &[&str]) -> SheetGrid {
        SheetGrid::from_text_rows(
            ["In", "Anaesthetic", "Start", "Note"],
            vec![row.to_vec()],
        )
        .unwrap()
    }

    fn mappings() -> ResolvedMappings {
        ResolvedMappings::new(
            [
                (1, ResolvedFill::Column(2)),
                (4, ResolvedFill::Placeholder("Not recorded".to_string())),
            ],
            [(3, 1)],
        )
    }

    #[test]
    fn blank_cell_copies_parsed_sibling() {
        let mappings = mappings();
        let ctx = FormatContext::new(&mappings);
        let mut grid = grid(&["", "08:10", "14:00", "x"]);
        let mut sink = AnnotationLog::new();

        let change = fill_blank(&ctx, &mut grid, &mut sink, 2, 1).unwrap().unwrap();

        let expected = parse("08:10").unwrap();
        assert_eq!(change.value, CellValue::DateTime(expected));
        assert_eq!(change.previous, CellValue::Empty);
        assert_eq!(change.reason, ChangeReason::NullFill);
        assert_eq!(grid.value(2, 1), CellValue::DateTime(expected));
        assert_eq!(sink.count(AnnotationKind::Filled), 1);
    }

    #[test]
    fn whitespace_counts_as_blank() {
        let mappings = mappings();
        let ctx = FormatContext::new(&mappings);
        let mut grid = grid(&["  ", "08:10", "14:00", "x"]);
        let change = fill_blank(&ctx, &mut grid, &mut AnnotationLog::new(), 2, 1).unwrap();
        assert!(change.is_some());
        assert_eq!(grid.text(2, 1), "08:10");
    }

    #[test]
    fn placeholder_is_written_verbatim() {
        let mappings = mappings();
        let ctx = FormatContext::new(&mappings);
        let mut grid = grid(&["07:00", "08:10", "14:00", ""]);
        let change = fill_blank(&ctx, &mut grid, &mut AnnotationLog::new(), 2, 4)
            .unwrap()
            .unwrap();
        assert_eq!(change.value, CellValue::text("Not recorded"));
        assert_eq!(grid.text(2, 4), "Not recorded");
    }

    #[test]
    fn unparseable_source_leaves_cell_blank() {
        let mappings = mappings();
        let ctx = FormatContext::new(&mappings);
        let mut grid = grid(&["", "cancelled", "14:00", "x"]);
        let mut sink = AnnotationLog::new();
        let change = fill_blank(&ctx, &mut grid, &mut sink, 2, 1).unwrap();
        assert_eq!(change, None);
        assert_eq!(grid.value(2, 1), CellValue::Empty);
        assert!(sink.entries().is_empty());
    }

    #[test]
    fn filled_and_unmapped_cells_are_untouched() {
        let mappings = mappings();
        let ctx = FormatContext::new(&mappings);
        let mut grid = grid(&["07:00", "", "", "x"]);
        let mut sink = AnnotationLog::new();
        assert_eq!(fill_blank(&ctx, &mut grid, &mut sink, 2, 1).unwrap(), None);
        assert_eq!(fill_blank(&ctx, &mut grid, &mut sink, 2, 3).unwrap(), None);
        assert_eq!(grid.text(2, 1), "07:00");
        assert_eq!(grid.value(2, 3), CellValue::Empty);
    }

    #[test]
    fn chained_sources_fill_in_one_row_pass() {
        let mappings = ResolvedMappings::new(
            [(1, ResolvedFill::Column(2)), (2, ResolvedFill::Column(3))],
            [(3, 1)],
        );
        let ctx = FormatContext::new(&mappings);
        let mut grid = grid(&["", "", "14:00", "x"]);
        let changes = fill_row(&ctx, &mut grid, &mut AnnotationLog::new(), 2).unwrap();
        let columns: Vec<usize> = changes.iter().map(|change| change.column).collect();
        assert_eq!(columns, vec![2, 1]);
        assert_eq!(grid.row_text(2), vec!["14:00", "14:00", "14:00", "x"]);
    }
}
