//! Resolution of settings mappings against a grid header.
//!
//! Settings may name columns by position or by header text. Everything past
//! this module works on 1-based positions only, so the engine does not care
//! which keying scheme the settings file used.

use std::collections::BTreeMap;

use medicor_model::mapping::{FILL_SECTION, REFERENCE_SECTION};
use medicor_model::{ColumnRef, ConfigError, FillSource, RawMappings};
use tracing::debug;

use crate::grid::GridAccessor;

/// Fill source with its column resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedFill {
    Column(usize),
    Placeholder(String),
}

/// Fill and Reference mappings keyed by column position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedMappings {
    fill: BTreeMap<usize, ResolvedFill>,
    reference: BTreeMap<usize, usize>,
}

impl ResolvedMappings {
    pub fn new(
        fill: impl IntoIterator<Item = (usize, ResolvedFill)>,
        reference: impl IntoIterator<Item = (usize, usize)>,
    ) -> Self {
        Self {
            fill: fill.into_iter().collect(),
            reference: reference.into_iter().collect(),
        }
    }

    /// Fill source for blank cells of `column`.
    pub fn fill_source(&self, column: usize) -> Option<&ResolvedFill> {
        self.fill.get(&column)
    }

    /// Column that `column` must not precede in time.
    pub fn reference_column(&self, column: usize) -> Option<usize> {
        self.reference.get(&column).copied()
    }

    pub fn fill(&self) -> &BTreeMap<usize, ResolvedFill> {
        &self.fill
    }

    pub fn reference(&self) -> &BTreeMap<usize, usize> {
        &self.reference
    }
}

/// Resolve both mappings against the header row of `grid`.
///
/// # Errors
///
/// Returns a [`ConfigError`] when a section is empty, an identifier is blank or
/// names no column of the grid, two entries resolve to the same column, or a
/// fill entry copies from its own column.
pub fn resolve_mappings<G>(grid: &G, raw: &RawMappings) -> Result<ResolvedMappings, ConfigError>
where
    G: GridAccessor + ?Sized,
{
    raw.ensure_not_empty()?;
    let headers = HeaderIndex::new(grid);

    let mut fill = BTreeMap::new();
    for (key, source) in raw.fill.entries() {
        let column = headers.resolve(FILL_SECTION, key)?;
        let resolved = match source {
            FillSource::Column(partner) => {
                let partner = headers.resolve(FILL_SECTION, partner)?;
                if partner == column {
                    return Err(ConfigError::SelfReference {
                        section: FILL_SECTION,
                        column,
                    });
                }
                ResolvedFill::Column(partner)
            }
            FillSource::Placeholder(text) => ResolvedFill::Placeholder(text.clone()),
        };
        if fill.insert(column, resolved).is_some() {
            return Err(ConfigError::DuplicateColumn {
                section: FILL_SECTION,
                column,
            });
        }
    }

    let mut reference = BTreeMap::new();
    for (key, partner) in raw.reference.entries() {
        let column = headers.resolve(REFERENCE_SECTION, key)?;
        let partner = headers.resolve(REFERENCE_SECTION, partner)?;
        if reference.insert(column, partner).is_some() {
            return Err(ConfigError::DuplicateColumn {
                section: REFERENCE_SECTION,
                column,
            });
        }
    }

    debug!(
        fill_entries = fill.len(),
        reference_entries = reference.len(),
        "mappings resolved"
    );
    Ok(ResolvedMappings { fill, reference })
}

struct HeaderIndex {
    headers: Vec<String>,
}

impl HeaderIndex {
    fn new<G: GridAccessor + ?Sized>(grid: &G) -> Self {
        Self {
            headers: (1..=grid.column_count())
                .map(|column| grid.header_text(column))
                .collect(),
        }
    }

    fn resolve(&self, section: &'static str, column: &ColumnRef) -> Result<usize, ConfigError> {
        match column {
            ColumnRef::Index(index) => {
                if (1..=self.headers.len()).contains(index) {
                    Ok(*index)
                } else {
                    Err(ConfigError::ColumnOutOfRange {
                        section,
                        index: *index,
                        columns: self.headers.len(),
                    })
                }
            }
            ColumnRef::Header(name) if name.trim().is_empty() => {
                Err(ConfigError::InvalidColumn { section })
            }
            ColumnRef::Header(name) => self
                .headers
                .iter()
                .position(|header| column.matches_header(header))
                .map(|idx| idx + 1)
                .ok_or_else(|| ConfigError::UnknownHeader {
                    section,
                    header: name.clone(),
                }),
        }
    }
}
