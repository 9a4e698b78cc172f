//! Theatre timestamp formatting engine.
//!
//! This crate cleans a grid of surgical case timestamps, one row per case
//! and one column per event:
//!
//! - **grid**: the [`GridAccessor`] contract and the in-memory [`SheetGrid`]
//! - **datetime**: reading cell content as timestamps
//! - **resolve**: turning settings mappings into column positions
//! - **fill**: filling blank cells from placeholders or sibling columns
//! - **clock**: correcting 12-hour readings against the rest of the row
//! - **chronology**: flagging cells earlier than their reference column
//! - **pipeline**: the ordered per-row stages and [`format_grid`]
//! - **sink**: where annotation requests go

pub mod chronology;
pub mod clock;
pub mod context;
pub mod datetime;
pub mod error;
pub mod fill;
pub mod grid;
pub mod pipeline;
pub mod resolve;
pub mod sink;

pub use context::FormatContext;
pub use datetime::{CellParser, DateOrder, chronological_cmp, parse};
pub use error::{FormatError, GridError, Result};
pub use grid::{GridAccessor, SheetGrid};
pub use pipeline::{FormatReport, Formatter, Pipeline, RowReport, Stage, format_grid};
pub use resolve::{ResolvedFill, ResolvedMappings, resolve_mappings};
pub use sink::{Annotation, AnnotationLog, AnnotationSink, DiscardAnnotations};
