//! Persisting a formatted grid.
//!
//! - **csv_grid**: writing the grid back as CSV
//! - **styling**: the annotation sink that renders annotation kinds into cell
//!   styles and saves them as a JSON sidecar

pub mod csv_grid;
pub mod error;
pub mod styling;

pub use csv_grid::{ensure_parent_dir, write_csv_grid};
pub use error::{OutputError, Result};
pub use styling::{CellStyle, StyledAnnotations, StyledCell, sidecar_path};
