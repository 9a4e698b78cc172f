//! Column identifiers as written in settings.

use std::fmt;

use serde::Deserialize;

/// A column named either by its 1-based position or by its header text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(from = "ColumnRefRepr")]
pub enum ColumnRef {
    /// 1-based column position.
    Index(usize),
    /// Header text from row 1, matched trimmed and case-insensitively.
    Header(String),
}

impl ColumnRef {
    /// Interpret a settings key or value.
    ///
    /// Numeric text is a position, anything else is header text.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.parse::<usize>() {
            Ok(index) => Self::Index(index),
            Err(_) => Self::Header(trimmed.to_string()),
        }
    }

    /// Returns true if `header` names this column.
    pub fn matches_header(&self, header: &str) -> bool {
        match self {
            Self::Index(_) => false,
            Self::Header(name) => name.trim().eq_ignore_ascii_case(header.trim()),
        }
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => write!(f, "column {index}"),
            Self::Header(name) => write!(f, "column '{name}'"),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ColumnRefRepr {
    Index(usize),
    Text(String),
}

impl From<ColumnRefRepr> for ColumnRef {
    fn from(repr: ColumnRefRepr) -> Self {
        match repr {
            ColumnRefRepr::Index(index) => Self::Index(index),
            ColumnRefRepr::Text(text) => Self::parse(&text),
        }
    }
}

/// What a blank cell is filled with.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "FillSourceRepr")]
pub enum FillSource {
    /// Copy the parsed timestamp of another column in the same row.
    Column(ColumnRef),
    /// Write this text verbatim.
    Placeholder(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FillSourceRepr {
    Placeholder {
        #[serde(rename = "Placeholder", alias = "placeholder")]
        placeholder: String,
    },
    Column(ColumnRef),
}

impl From<FillSourceRepr> for FillSource {
    fn from(repr: FillSourceRepr) -> Self {
        match repr {
            FillSourceRepr::Placeholder { placeholder } => Self::Placeholder(placeholder),
            FillSourceRepr::Column(column) => Self::Column(column),
        }
    }
}

impl fmt::Display for FillSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Column(column) => write!(f, "copy from {column}"),
            Self::Placeholder(text) => write!(f, "placeholder '{text}'"),
        }
    }
}
