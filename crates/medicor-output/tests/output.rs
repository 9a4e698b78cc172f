//! Writing a formatted grid and its styling sidecar.

use medicor_core::{SheetGrid, format_grid};
use medicor_model::{
    AnnotationKind, ColumnRef, FillMapping, FillSource, RawMappings, ReferenceMapping,
};
use medicor_output::{StyledAnnotations, sidecar_path, write_csv_grid};
use tempfile::TempDir;

#[test]
fn formatted_grid_and_styles_are_written_side_by_side() {
    let mut grid = SheetGrid::from_text_rows(
        ["Time into theatre", "Anaesthetic start", "Surgery finish time"],
        vec![vec!["", "02:15", "15:00"], vec!["11:00", "11:30", "10:45"]],
    )
    .unwrap();
    let mappings = RawMappings {
        fill: FillMapping::new([(ColumnRef::Index(1), FillSource::Column(ColumnRef::Index(2)))]),
        reference: ReferenceMapping::new([(ColumnRef::Index(3), ColumnRef::Index(2))]),
    };
    let mut sink = StyledAnnotations::for_grid(&grid);

    format_grid(&mut grid, &mappings, &mut sink).unwrap();

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("theatre.csv");
    write_csv_grid(&grid, &output).unwrap();
    let sidecar = sidecar_path(&output);
    sink.write_json(&sidecar).unwrap();

    let csv = std::fs::read_to_string(&output).unwrap();
    assert_eq!(
        csv,
        "Time into theatre,Anaesthetic start,Surgery finish time\n\
         14:15,14:15,15:00\n\
         11:00,11:30,10:45\n"
    );

    let styled: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&sidecar).unwrap()).unwrap();
    let kinds: Vec<&str> = styled
        .as_array()
        .unwrap()
        .iter()
        .map(|cell| cell["kind"].as_str().unwrap())
        .collect();
    assert_eq!(
        kinds,
        vec!["filled", "clock-corrected", "clock-corrected", "chronology-violation"]
    );
    assert_eq!(styled[3]["row"], 3);
    assert_eq!(styled[3]["header"], "Surgery finish time");
    assert_eq!(
        sink.cells()
            .iter()
            .filter(|cell| cell.kind == AnnotationKind::ClockCorrected)
            .count(),
        2
    );
}
