//! Data model for theatre timestamp formatting.
//!
//! This crate holds the plain types shared by the formatting engine and its
//! collaborators:
//!
//! - **cell**: typed cell content as read from a grid
//! - **column**: column identifiers and fill sources as written in settings
//! - **mapping**: unresolved Fill and Reference mappings
//! - **record**: change, anomaly and annotation records produced by a pass
//! - **error**: configuration errors raised before a pass starts

pub mod cell;
pub mod column;
pub mod error;
pub mod mapping;
pub mod record;

pub use cell::CellValue;
pub use column::{ColumnRef, FillSource};
pub use error::{ConfigError, Result};
pub use mapping::{FillMapping, RawMappings, ReferenceMapping};
pub use record::{AnnotationKind, AnomalyRecord, ChangeReason, ChangeRecord};
