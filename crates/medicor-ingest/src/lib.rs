//! Setup-time inputs for theatre timestamp formatting.
//!
//! - **settings**: `appsettings.json` (or TOML) with the Fill and Reference
//!   mappings
//! - **csv_grid**: reading a CSV export into a [`medicor_core::SheetGrid`]

pub mod csv_grid;
pub mod error;
pub mod settings;

pub use csv_grid::read_csv_grid;
pub use error::{IngestError, Result};
pub use settings::{DEFAULT_SETTINGS_FILE, Settings, load_settings};
