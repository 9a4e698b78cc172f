use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use medicor_core::{FormatReport, ResolvedFill};
use medicor_model::{AnnotationKind, ChangeReason};

use crate::types::{FormatOutcome, LogEntry, MappingsOutcome};

pub fn print_format_summary(outcome: &FormatOutcome) {
    println!("Input: {}", outcome.input.display());
    match &outcome.output {
        Some(path) => println!("Output: {}", path.display()),
        None => println!("Output: dry run, nothing written"),
    }
    if let Some(path) = &outcome.annotations {
        println!("Annotations: {}", path.display());
    }
    println!("{}", counts_table(&outcome.report));
    if !outcome.entries.is_empty() {
        println!();
        println!("{}", render_change_log(&outcome.entries));
    }
    println!();
    println!("Execution time: {} ms", outcome.elapsed.as_millis());
}

pub fn print_mappings(outcome: &MappingsOutcome) {
    println!("Input: {}", outcome.input.display());
    println!("{}", mappings_table(outcome));
}

/// Counts per annotation kind.
pub fn counts_table(report: &FormatReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Kind"), header_cell("Cells")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for kind in AnnotationKind::ALL {
        let count = match kind {
            AnnotationKind::Filled => report.change_count(ChangeReason::NullFill),
            AnnotationKind::ClockCorrected => report.change_count(ChangeReason::ClockCorrection),
            AnnotationKind::ChronologyViolation => report.anomalies.len(),
        };
        table.add_row(vec![Cell::new(kind), count_cell(count, kind_color(kind))]);
    }
    table.add_row(vec![
        Cell::new("Rows scanned")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(report.rows_scanned).add_attribute(Attribute::Bold),
    ]);
    table
}

/// Resolved Fill and Reference mappings, one row per mapped column.
pub fn mappings_table(outcome: &MappingsOutcome) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Section"),
        header_cell("Col"),
        header_cell("Header"),
        header_cell("Source"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    let header = |column: usize| {
        column
            .checked_sub(1)
            .and_then(|idx| outcome.headers.get(idx))
            .cloned()
            .unwrap_or_default()
    };
    for (column, source) in outcome.mappings.fill() {
        let source = match source {
            ResolvedFill::Column(partner) => format!("copy col {partner} ({})", header(*partner)),
            ResolvedFill::Placeholder(text) => format!("placeholder \"{text}\""),
        };
        table.add_row(vec![
            Cell::new("NullColumns"),
            Cell::new(column),
            Cell::new(header(*column)),
            Cell::new(source),
        ]);
    }
    for (column, reference) in outcome.mappings.reference() {
        table.add_row(vec![
            Cell::new("IncorrectTimeColumns"),
            Cell::new(column),
            Cell::new(header(*column)),
            Cell::new(format!("not before col {reference} ({})", header(*reference))),
        ]);
    }
    table
}

/// Plain-text change listing, one line per entry.
pub fn render_change_log(entries: &[LogEntry]) -> String {
    let header_width = entries
        .iter()
        .map(|entry| entry.header.chars().count())
        .chain(std::iter::once("HEADER".len()))
        .max()
        .unwrap_or_default();
    let value_width = entries
        .iter()
        .map(|entry| entry.value.chars().count())
        .chain(std::iter::once("VALUE".len()))
        .max()
        .unwrap_or_default();
    let line = |row: &str, column: &str, header: &str, value: &str, reason: &str| {
        format!("{row:<5}{column:<5}{header:<header_width$}  {value:<value_width$}  {reason}")
    };
    std::iter::once(line("ROW", "COL", "HEADER", "VALUE", "REASON"))
        .chain(entries.iter().map(|entry| {
            line(
                &entry.row.to_string(),
                &entry.column.to_string(),
                &entry.header,
                &entry.value,
                &entry.reason,
            )
        }))
        .collect::<Vec<_>>()
        .join("\n")
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn kind_color(kind: AnnotationKind) -> Color {
    match kind {
        AnnotationKind::Filled => Color::Blue,
        AnnotationKind::ClockCorrected => Color::Red,
        AnnotationKind::ChronologyViolation => Color::Green,
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
