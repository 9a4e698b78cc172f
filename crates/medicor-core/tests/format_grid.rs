//! Whole-pass behaviour of the formatting engine.

use medicor_core::{
    AnnotationLog, DateOrder, DiscardAnnotations, FormatError, Formatter, GridAccessor, Pipeline,
    SheetGrid, Stage, format_grid, parse,
};
use medicor_model::{
    AnnotationKind, AnomalyRecord, CellValue, ChangeReason, ColumnRef, ConfigError, FillMapping,
    FillSource, RawMappings, ReferenceMapping,
};

fn index(column: usize) -> ColumnRef {
    ColumnRef::Index(column)
}

fn header(name: &str) -> ColumnRef {
    ColumnRef::Header(name.to_string())
}

fn mappings(
    fill: Vec<(ColumnRef, FillSource)>,
    reference: Vec<(ColumnRef, ColumnRef)>,
) -> RawMappings {
    RawMappings {
        fill: FillMapping::new(fill),
        reference: ReferenceMapping::new(reference),
    }
}

fn copy_from(column: usize) -> FillSource {
    FillSource::Column(index(column))
}

fn theatre_grid(rows: Vec<Vec<&str>>) -> SheetGrid {
    SheetGrid::from_text_rows(
        [
            "Time into theatre",
            "Anaesthetic start",
            "Surgery start time",
            "Surgery finish time",
        ],
        rows,
    )
    .unwrap()
}

#[test]
fn copied_morning_value_survives_a_rejected_shift() {
    let mut grid =
        SheetGrid::from_text_rows(["In", "Start", "Out"], vec![vec!["", "08:10", "14:00"]])
            .unwrap();
    let raw = mappings(vec![(index(1), copy_from(2))], vec![(index(3), index(2))]);
    let mut sink = AnnotationLog::new();

    let report = format_grid(&mut grid, &raw, &mut sink).unwrap();

    assert_eq!(grid.row_text(2), vec!["08:10", "08:10", "14:00"]);
    assert_eq!(report.changes.len(), 1);
    assert_eq!(report.changes[0].reason, ChangeReason::NullFill);
    assert_eq!(report.changes[0].column, 1);
    assert!(report.anomalies.is_empty());
    assert_eq!(sink.count(AnnotationKind::Filled), 1);
    assert_eq!(sink.count(AnnotationKind::ClockCorrected), 0);
}

#[test]
fn two_column_shift_depends_on_the_anchor() {
    let raw = mappings(vec![(index(1), copy_from(2))], vec![(index(2), index(1))]);

    let mut rejected = SheetGrid::from_text_rows(["A", "B"], vec![vec!["09:30", "16:45"]]).unwrap();
    let report = format_grid(&mut rejected, &raw, &mut AnnotationLog::new()).unwrap();
    assert_eq!(rejected.row_text(2), vec!["09:30", "16:45"]);
    assert!(report.changes.is_empty());

    let mut accepted = SheetGrid::from_text_rows(["A", "B"], vec![vec!["09:30", "22:00"]]).unwrap();
    let mut sink = AnnotationLog::new();
    let report = format_grid(&mut accepted, &raw, &mut sink).unwrap();
    assert_eq!(accepted.row_text(2), vec!["21:30", "22:00"]);
    assert_eq!(report.change_count(ChangeReason::ClockCorrection), 1);
    assert_eq!(report.changes[0].previous, CellValue::text("09:30"));
    assert_eq!(sink.count(AnnotationKind::ClockCorrected), 1);
}

#[test]
fn chronology_violation_is_flagged_not_fixed() {
    let mut grid = SheetGrid::from_text_rows(["A", "B"], vec![vec!["10:00", "09:00"]]).unwrap();
    let raw = mappings(vec![(index(1), copy_from(2))], vec![(index(2), index(1))]);
    let formatter =
        Formatter::new().with_pipeline(Pipeline::default().without(Stage::ClockCorrection));
    let mut sink = AnnotationLog::new();

    let report = formatter.run(&mut grid, &raw, &mut sink).unwrap();

    assert_eq!(
        report.anomalies,
        vec![AnomalyRecord {
            row: 2,
            column: 2,
            reference: 1
        }]
    );
    assert!(report.changes.is_empty());
    assert_eq!(grid.row_text(2), vec!["10:00", "09:00"]);
    assert_eq!(sink.count(AnnotationKind::ChronologyViolation), 1);
}

#[test]
fn checker_sees_corrected_values() {
    // 03:00 in the last column becomes 15:00, which no longer precedes 10:00.
    let mut grid = SheetGrid::from_text_rows(["A", "B"], vec![vec!["10:00", "03:00"]]).unwrap();
    let raw = mappings(vec![(index(1), copy_from(2))], vec![(index(2), index(1))]);

    let report = format_grid(&mut grid, &raw, &mut AnnotationLog::new()).unwrap();

    assert_eq!(grid.row_text(2), vec!["10:00", "15:00"]);
    assert_eq!(report.change_count(ChangeReason::ClockCorrection), 1);
    assert!(report.anomalies.is_empty());
}

#[test]
fn fill_copies_the_sibling_before_it_is_corrected() {
    let mut grid =
        SheetGrid::from_text_rows(["A", "B", "C"], vec![vec!["", "08:00", "21:00"]]).unwrap();
    let raw = mappings(vec![(index(1), copy_from(2))], vec![(index(3), index(2))]);

    let report = format_grid(&mut grid, &raw, &mut AnnotationLog::new()).unwrap();

    let fill = &report.changes[0];
    assert_eq!(fill.reason, ChangeReason::NullFill);
    assert_eq!(fill.value, CellValue::DateTime(parse("08:00").unwrap()));
    // Column 2 moves to 20:00 and pulls the copied value along with it.
    assert_eq!(grid.row_text(2), vec!["20:00", "20:00", "21:00"]);
    assert_eq!(report.change_count(ChangeReason::ClockCorrection), 2);
}

#[test]
fn header_keyed_mappings_behave_like_index_keyed_ones() {
    let rows = vec![
        vec!["08:05", "", "02:40", "10:30"],
        vec!["13:00", "13:20", "13:45", "13:10"],
    ];
    let by_index = mappings(
        vec![(index(2), copy_from(1))],
        vec![(index(4), index(3)), (index(3), index(1))],
    );
    let by_header = mappings(
        vec![(
            header("anaesthetic start"),
            FillSource::Column(header("Time into theatre")),
        )],
        vec![
            (header("Surgery finish time"), header("Surgery start time")),
            (header("Surgery start time"), header("Time into theatre")),
        ],
    );

    let mut first = theatre_grid(rows.clone());
    let mut second = theatre_grid(rows);
    let first_report = format_grid(&mut first, &by_index, &mut AnnotationLog::new()).unwrap();
    let second_report = format_grid(&mut second, &by_header, &mut AnnotationLog::new()).unwrap();

    assert_eq!(first, second);
    assert_eq!(first_report, second_report);
    assert_eq!(
        first_report.anomalies,
        vec![
            AnomalyRecord {
                row: 2,
                column: 3,
                reference: 1
            },
            AnomalyRecord {
                row: 3,
                column: 4,
                reference: 3
            },
        ]
    );
}

#[test]
fn placeholder_fill_is_not_a_timestamp() {
    let mut grid = theatre_grid(vec![vec!["08:00", "08:20", "", "11:00"]]);
    let raw = mappings(
        vec![(index(3), FillSource::Placeholder("Not recorded".to_string()))],
        vec![(index(4), index(3))],
    );

    let report = format_grid(&mut grid, &raw, &mut AnnotationLog::new()).unwrap();

    assert_eq!(grid.text(2, 3), "Not recorded");
    assert_eq!(report.change_count(ChangeReason::NullFill), 1);
    assert!(report.anomalies.is_empty());
}

#[test]
fn config_errors_stop_the_pass_before_any_change() {
    let mut grid = theatre_grid(vec![vec!["", "08:10", "02:00", "16:00"]]);
    let before = grid.clone();
    let raw = mappings(
        vec![(index(1), copy_from(2))],
        vec![(header("Time out of recovery"), index(1))],
    );
    let mut sink = AnnotationLog::new();

    let err = format_grid(&mut grid, &raw, &mut sink).unwrap_err();

    assert!(matches!(
        err,
        FormatError::Config(ConfigError::UnknownHeader { .. })
    ));
    assert_eq!(grid, before);
    assert!(sink.entries().is_empty());
}

#[test]
fn empty_sections_stop_the_pass() {
    let mut grid = theatre_grid(vec![vec!["", "08:10", "02:00", "16:00"]]);
    let raw = mappings(vec![(index(1), copy_from(2))], Vec::new());
    let err = format_grid(&mut grid, &raw, &mut AnnotationLog::new()).unwrap_err();
    assert!(matches!(
        err,
        FormatError::Config(ConfigError::EmptySection { .. })
    ));
}

#[test]
fn header_only_grid_scans_nothing() {
    let mut grid = theatre_grid(Vec::new());
    let raw = mappings(vec![(index(1), copy_from(2))], vec![(index(2), index(1))]);
    let report = format_grid(&mut grid, &raw, &mut AnnotationLog::new()).unwrap();
    assert_eq!(report.rows_scanned, 0);
    assert!(report.is_clean());
}

#[test]
fn records_are_in_row_order() {
    let mut grid = theatre_grid(vec![
        vec!["", "08:00", "09:00", "20:00"],
        vec!["12:00", "", "02:00", "15:00"],
    ]);
    let raw = mappings(
        vec![(index(1), copy_from(2)), (index(2), copy_from(1))],
        vec![(index(4), index(1))],
    );

    let report = format_grid(&mut grid, &raw, &mut AnnotationLog::new()).unwrap();

    let rows: Vec<usize> = report.changes.iter().map(|change| change.row).collect();
    let mut sorted = rows.clone();
    sorted.sort_unstable();
    assert_eq!(rows, sorted);
    assert_eq!(report.rows_scanned, 2);
    assert_eq!(grid.row_text(3), vec!["12:00", "12:00", "14:00", "15:00"]);
}

#[test]
fn month_first_dates_are_read_when_configured() {
    let mut grid = SheetGrid::from_text_rows(
        ["A", "B"],
        vec![vec!["03/04/2024 09:00", "03/04/2024 22:00"]],
    )
    .unwrap();
    let raw = mappings(vec![(index(1), copy_from(2))], vec![(index(2), index(1))]);
    let formatter = Formatter::new().with_date_order(DateOrder::MonthFirst);

    formatter.run(&mut grid, &raw, &mut AnnotationLog::new()).unwrap();

    assert_eq!(grid.text(2, 1), "2024-03-04 21:00");
    assert_eq!(grid.text(2, 2), "03/04/2024 22:00");
}

#[test]
fn discarding_annotations_still_reports_every_record() {
    let rows = vec![vec!["", "02:15", "03:00", "01:00"]];
    let raw = mappings(
        vec![(index(1), copy_from(2))],
        vec![(index(4), index(3))],
    );
    let mut logged = theatre_grid(rows.clone());
    let mut discarded = theatre_grid(rows);

    let with_log = format_grid(&mut logged, &raw, &mut AnnotationLog::new()).unwrap();
    let without = format_grid(&mut discarded, &raw, &mut DiscardAnnotations).unwrap();

    assert_eq!(with_log, without);
    assert_eq!(logged.row_text(2), discarded.row_text(2));
}

#[test]
fn corrected_fractional_seconds_read_back_unchanged() {
    let mut grid =
        SheetGrid::from_text_rows(["A", "B"], vec![vec!["08:00:00.500", "21:00"]]).unwrap();
    let raw = mappings(vec![(index(1), copy_from(2))], vec![(index(2), index(1))]);

    format_grid(&mut grid, &raw, &mut AnnotationLog::new()).unwrap();

    let rendered = grid.text(2, 1);
    assert_eq!(rendered, "20:00:00.500");
    assert_eq!(CellValue::DateTime(parse(&rendered).unwrap()), grid.value(2, 1));
}

#[test]
fn time_only_cells_are_ordered_by_time_against_dated_cells() {
    let mut grid = SheetGrid::from_text_rows(
        ["Time into theatre", "Anaesthetic start"],
        vec![vec!["08:00", "2024-01-15 14:00"], vec!["2024-01-15 14:00", "13:30"]],
    )
    .unwrap();
    let raw = mappings(vec![(index(1), copy_from(2))], vec![(index(2), index(1))]);

    let report = format_grid(&mut grid, &raw, &mut AnnotationLog::new()).unwrap();

    assert_eq!(grid.row_text(2), vec!["08:00", "2024-01-15 14:00"]);
    assert_eq!(grid.row_text(3), vec!["2024-01-15 14:00", "13:30"]);
    assert!(report.changes.is_empty());
    assert_eq!(
        report.anomalies,
        vec![AnomalyRecord {
            row: 3,
            column: 2,
            reference: 1
        }]
    );
}
