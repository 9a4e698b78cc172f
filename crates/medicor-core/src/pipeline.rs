//! Formatting pass orchestration.
//!
//! A pass resolves the mappings first, so a configuration error stops it
//! before any cell changes. Each data row then runs through the stages in a
//! fixed order:
//!
//! 1. [`Stage::NullFill`] over every column, until no blank can be filled
//! 2. [`Stage::ClockCorrection`] over the row, with back-propagation
//! 3. [`Stage::ChronologyCheck`] over every column, on the corrected values
//!
//! Rows never read or write each other's cells.

use std::fmt;
use std::time::Instant;

use medicor_model::{AnomalyRecord, ChangeReason, ChangeRecord, RawMappings};
use tracing::{info, info_span};

use crate::chronology::check_row;
use crate::clock::disambiguate_row;
use crate::context::FormatContext;
use crate::datetime::{CellParser, DateOrder};
use crate::error::{GridError, Result};
use crate::fill::fill_row;
use crate::grid::GridAccessor;
use crate::resolve::resolve_mappings;
use crate::sink::AnnotationSink;

/// One step of a row's processing. Ordering is execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    NullFill,
    ClockCorrection,
    ChronologyCheck,
}

impl Stage {
    pub const ALL: [Self; 3] = [Self::NullFill, Self::ClockCorrection, Self::ChronologyCheck];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NullFill => "null-fill",
            Self::ClockCorrection => "clock-correction",
            Self::ChronologyCheck => "chronology-check",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered set of enabled stages.
///
/// Stages can be left out but never reordered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pipeline {
    stages: Vec<Stage>,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self {
            stages: Stage::ALL.to_vec(),
        }
    }
}

impl Pipeline {
    /// Pipeline running only the given stages, in execution order.
    pub fn with_stages(stages: impl IntoIterator<Item = Stage>) -> Self {
        let mut stages: Vec<Stage> = stages.into_iter().collect();
        stages.sort_unstable();
        stages.dedup();
        Self { stages }
    }

    #[must_use]
    pub fn without(mut self, stage: Stage) -> Self {
        self.stages.retain(|enabled| *enabled != stage);
        self
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn runs(&self, stage: Stage) -> bool {
        self.stages.contains(&stage)
    }

    /// Run the enabled stages over one data row.
    ///
    /// # Errors
    ///
    /// Propagates a refused write from the grid.
    pub fn run_row<G, S>(
        &self,
        ctx: &FormatContext<'_>,
        grid: &mut G,
        sink: &mut S,
        row: usize,
    ) -> std::result::Result<RowReport, GridError>
    where
        G: GridAccessor + ?Sized,
        S: AnnotationSink + ?Sized,
    {
        let mut report = RowReport {
            row,
            ..RowReport::default()
        };
        for stage in &self.stages {
            match stage {
                Stage::NullFill => {
                    report.changes.extend(fill_row(ctx, grid, sink, row)?);
                }
                Stage::ClockCorrection => {
                    report
                        .changes
                        .extend(disambiguate_row(ctx, grid, sink, row)?);
                }
                Stage::ChronologyCheck => {
                    report.anomalies.extend(check_row(ctx, &*grid, sink, row));
                }
            }
        }
        Ok(report)
    }
}

/// Records produced for one row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowReport {
    pub row: usize,
    pub changes: Vec<ChangeRecord>,
    pub anomalies: Vec<AnomalyRecord>,
}

/// Records produced by a whole pass, in row order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormatReport {
    pub changes: Vec<ChangeRecord>,
    pub anomalies: Vec<AnomalyRecord>,
    pub rows_scanned: usize,
}

impl FormatReport {
    pub fn push_row(&mut self, row: RowReport) {
        self.changes.extend(row.changes);
        self.anomalies.extend(row.anomalies);
        self.rows_scanned += 1;
    }

    pub fn change_count(&self, reason: ChangeReason) -> usize {
        self.changes
            .iter()
            .filter(|change| change.reason == reason)
            .count()
    }

    /// Returns true when the pass changed nothing and flagged nothing.
    pub fn is_clean(&self) -> bool {
        self.changes.is_empty() && self.anomalies.is_empty()
    }
}

/// Formatting pass configuration.
#[derive(Debug, Clone, Default)]
pub struct Formatter {
    parser: CellParser,
    pipeline: Pipeline,
}

impl Formatter {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_date_order(mut self, date_order: DateOrder) -> Self {
        self.parser = CellParser::new(date_order);
        self
    }

    #[must_use]
    pub fn with_pipeline(mut self, pipeline: Pipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Run a full pass over every data row of `grid`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::FormatError::Config`] before touching the grid when
    /// the mappings do not resolve, and [`crate::FormatError::Grid`] when the
    /// grid refuses a write.
    pub fn run<G, S>(
        &self,
        grid: &mut G,
        mappings: &RawMappings,
        sink: &mut S,
    ) -> Result<FormatReport>
    where
        G: GridAccessor + ?Sized,
        S: AnnotationSink + ?Sized,
    {
        let resolved = resolve_mappings(&*grid, mappings)?;
        let ctx = FormatContext::new(&resolved).with_parser(self.parser);
        let span = info_span!(
            "format_grid",
            rows = grid.row_count().saturating_sub(1),
            columns = grid.column_count()
        );
        let _guard = span.enter();
        let start = Instant::now();

        let mut report = FormatReport::default();
        for row in grid.data_rows() {
            report.push_row(self.pipeline.run_row(&ctx, grid, sink, row)?);
        }

        info!(
            rows = report.rows_scanned,
            filled = report.change_count(ChangeReason::NullFill),
            clock_corrected = report.change_count(ChangeReason::ClockCorrection),
            chronology_violations = report.anomalies.len(),
            duration_ms = start.elapsed().as_millis(),
            "format pass complete"
        );
        Ok(report)
    }
}

/// Run a default pass: all stages, day-first dates.
///
/// # Errors
///
/// See [`Formatter::run`].
pub fn format_grid<G, S>(grid: &mut G, mappings: &RawMappings, sink: &mut S) -> Result<FormatReport>
where
    G: GridAccessor + ?Sized,
    S: AnnotationSink + ?Sized,
{
    Formatter::new().run(grid, mappings, sink)
}
