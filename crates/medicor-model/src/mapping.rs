//! Unresolved column mappings.
//!
//! Mappings are keyed by [`ColumnRef`] exactly as they appear in settings.
//! They are resolved to column positions against a grid header before a
//! formatting pass starts.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::column::{ColumnRef, FillSource};
use crate::error::ConfigError;

/// Settings section holding the Fill Mapping.
pub const FILL_SECTION: &str = "NullColumns";

/// Settings section holding the Reference Mapping.
pub const REFERENCE_SECTION: &str = "IncorrectTimeColumns";

/// Column to fill source, for blank cells.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "BTreeMap<String, FillSource>")]
pub struct FillMapping {
    entries: Vec<(ColumnRef, FillSource)>,
}

impl FillMapping {
    pub fn new(entries: impl IntoIterator<Item = (ColumnRef, FillSource)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    pub fn entries(&self) -> &[(ColumnRef, FillSource)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl From<BTreeMap<String, FillSource>> for FillMapping {
    fn from(map: BTreeMap<String, FillSource>) -> Self {
        Self::new(
            map.into_iter()
                .map(|(key, source)| (ColumnRef::parse(&key), source)),
        )
    }
}

/// Column to the column it must not precede in time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "BTreeMap<String, ColumnRef>")]
pub struct ReferenceMapping {
    entries: Vec<(ColumnRef, ColumnRef)>,
}

impl ReferenceMapping {
    pub fn new(entries: impl IntoIterator<Item = (ColumnRef, ColumnRef)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    pub fn entries(&self) -> &[(ColumnRef, ColumnRef)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl From<BTreeMap<String, ColumnRef>> for ReferenceMapping {
    fn from(map: BTreeMap<String, ColumnRef>) -> Self {
        Self::new(
            map.into_iter()
                .map(|(key, partner)| (ColumnRef::parse(&key), partner)),
        )
    }
}

/// Both mappings a formatting pass needs, before resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawMappings {
    pub fill: FillMapping,
    pub reference: ReferenceMapping,
}

impl RawMappings {
    /// Build from optional sections, failing when either is absent or empty.
    pub fn from_sections(
        fill: Option<FillMapping>,
        reference: Option<ReferenceMapping>,
    ) -> Result<Self, ConfigError> {
        let fill = fill.ok_or(ConfigError::MissingSection {
            section: FILL_SECTION,
        })?;
        let reference = reference.ok_or(ConfigError::MissingSection {
            section: REFERENCE_SECTION,
        })?;
        let mappings = Self { fill, reference };
        mappings.ensure_not_empty()?;
        Ok(mappings)
    }

    /// Fail when either section has no entries.
    pub fn ensure_not_empty(&self) -> Result<(), ConfigError> {
        if self.fill.is_empty() {
            return Err(ConfigError::EmptySection {
                section: FILL_SECTION,
            });
        }
        if self.reference.is_empty() {
            return Err(ConfigError::EmptySection {
                section: REFERENCE_SECTION,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill() -> FillMapping {
        FillMapping::new([(ColumnRef::Index(1), FillSource::Column(ColumnRef::Index(2)))])
    }

    fn reference() -> ReferenceMapping {
        ReferenceMapping::new([(ColumnRef::Index(2), ColumnRef::Index(1))])
    }

    #[test]
    fn missing_sections_are_named() {
        let err = RawMappings::from_sections(None, Some(reference())).unwrap_err();
        assert_eq!(
            err,
            ConfigError::MissingSection {
                section: FILL_SECTION
            }
        );
        let err = RawMappings::from_sections(Some(fill()), None).unwrap_err();
        assert_eq!(
            err,
            ConfigError::MissingSection {
                section: REFERENCE_SECTION
            }
        );
    }

    #[test]
    fn empty_sections_are_rejected() {
        let err =
            RawMappings::from_sections(Some(FillMapping::default()), Some(reference()))
                .unwrap_err();
        assert_eq!(
            err,
            ConfigError::EmptySection {
                section: FILL_SECTION
            }
        );
    }

    #[test]
    fn sections_deserialize_from_json_objects() {
        let fill: FillMapping =
            serde_json::from_str(r#"{"1": "2", "Time out of Theatre": {"Placeholder": "N/A"}}"#)
                .unwrap();
        assert_eq!(fill.len(), 2);
        assert!(fill.entries().contains(&(
            ColumnRef::Index(1),
            FillSource::Column(ColumnRef::Index(2))
        )));
        assert!(fill.entries().contains(&(
            ColumnRef::Header("Time out of Theatre".to_string()),
            FillSource::Placeholder("N/A".to_string())
        )));

        let reference: ReferenceMapping =
            serde_json::from_str(r#"{"3": 2, "Surgery finish time": "Time into theatre"}"#)
                .unwrap();
        assert_eq!(reference.len(), 2);
    }

    #[test]
    fn sections_deserialize_from_toml_tables() {
        let reference: ReferenceMapping = toml::from_str("\"3\" = 2\n\"4\" = \"3\"\n").unwrap();
        assert_eq!(
            reference.entries(),
            &[
                (ColumnRef::Index(3), ColumnRef::Index(2)),
                (ColumnRef::Index(4), ColumnRef::Index(3)),
            ]
        );
    }
}
