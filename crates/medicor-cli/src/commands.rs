use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, info, info_span};

use medicor_core::{FormatReport, Formatter, GridAccessor, resolve_mappings};
use medicor_ingest::{IngestError, Settings, load_settings, read_csv_grid};
use medicor_model::AnnotationKind;
use medicor_output::{StyledAnnotations, sidecar_path, write_csv_grid};

use crate::cli::{FormatArgs, MappingsArgs};
use crate::logging::redact_value;
use crate::types::{FormatOutcome, LogEntry, MappingsOutcome};

pub fn run_format(args: &FormatArgs) -> Result<FormatOutcome> {
    let start = Instant::now();
    let settings = load_settings(&args.settings).context("load settings")?;
    let input = input_path(args.input.as_deref(), &settings)?;
    let span = info_span!("format", input = %input.display(), dry_run = args.dry_run);
    let _guard = span.enter();

    // Mapping sections are checked before the sheet is read.
    let mappings = settings.mappings().context("read mappings")?;
    let mut grid = read_csv_grid(&input).context("read sheet")?;
    let mut sink = StyledAnnotations::for_grid(&grid);
    let report = Formatter::new()
        .with_date_order(settings.date_order)
        .run(&mut grid, &mappings, &mut sink)
        .with_context(|| format!("format {}", input.display()))?;

    for change in &report.changes {
        let value = change.value.to_text();
        debug!(
            row = change.row,
            column = change.column,
            reason = %change.reason,
            value = redact_value(&value),
            "cell changed"
        );
    }
    let entries = log_entries(&grid, &report);

    let mut output = None;
    let mut annotations = None;
    if args.dry_run {
        info!("dry run, nothing written");
    } else {
        let path = args.output.clone().unwrap_or_else(|| input.clone());
        write_csv_grid(&grid, &path).context("write sheet")?;
        if !args.no_annotations {
            let sidecar = sidecar_path(&path);
            sink.write_json(&sidecar).context("write annotations")?;
            annotations = Some(sidecar);
        }
        output = Some(path);
    }

    let elapsed = start.elapsed();
    info!(
        changes = report.changes.len(),
        chronology_violations = report.anomalies.len(),
        duration_ms = elapsed.as_millis(),
        "format complete"
    );
    Ok(FormatOutcome {
        input,
        output,
        annotations,
        report,
        entries,
        elapsed,
    })
}

pub fn run_mappings(args: &MappingsArgs) -> Result<MappingsOutcome> {
    let settings = load_settings(&args.settings).context("load settings")?;
    let input = input_path(args.input.as_deref(), &settings)?;
    let raw = settings.mappings().context("read mappings")?;
    let grid = read_csv_grid(&input).context("read sheet")?;
    let mappings = resolve_mappings(&grid, &raw)
        .with_context(|| format!("resolve mappings against {}", input.display()))?;
    Ok(MappingsOutcome {
        input,
        headers: grid.headers().to_vec(),
        mappings,
    })
}

/// The sheet to work on: the command-line path, else the one named in settings.
fn input_path(input: Option<&Path>, settings: &Settings) -> Result<PathBuf> {
    input
        .map(Path::to_path_buf)
        .or_else(|| settings.input_path())
        .ok_or(IngestError::MissingInput)
        .context("locate input sheet")
}

/// Changes and chronology violations of a pass, ordered by row.
pub fn log_entries<G>(grid: &G, report: &FormatReport) -> Vec<LogEntry>
where
    G: GridAccessor + ?Sized,
{
    let changes = report.changes.iter().map(|change| LogEntry {
        row: change.row,
        column: change.column,
        header: grid.header_text(change.column),
        value: change.value.to_text(),
        reason: change.reason.to_string(),
    });
    let anomalies = report.anomalies.iter().map(|anomaly| LogEntry {
        row: anomaly.row,
        column: anomaly.column,
        header: grid.header_text(anomaly.column),
        value: grid.text(anomaly.row, anomaly.column),
        reason: format!(
            "{} (col {})",
            AnnotationKind::ChronologyViolation,
            anomaly.reference
        ),
    });
    let mut entries: Vec<LogEntry> = changes.chain(anomalies).collect();
    entries.sort_by_key(|entry| entry.row);
    entries
}
