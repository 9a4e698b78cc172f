use std::path::PathBuf;
use std::time::Duration;

use medicor_core::{FormatReport, ResolvedMappings};

/// Result of `medicor format`.
#[derive(Debug)]
pub struct FormatOutcome {
    pub input: PathBuf,
    /// Where the sheet was saved; `None` on a dry run.
    pub output: Option<PathBuf>,
    /// Where the styling sidecar was saved, if it was written.
    pub annotations: Option<PathBuf>,
    pub report: FormatReport,
    pub entries: Vec<LogEntry>,
    pub elapsed: Duration,
}

/// One line of the change listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub row: usize,
    pub column: usize,
    pub header: String,
    pub value: String,
    pub reason: String,
}

/// Result of `medicor mappings`.
#[derive(Debug)]
pub struct MappingsOutcome {
    pub input: PathBuf,
    pub headers: Vec<String>,
    pub mappings: ResolvedMappings,
}
