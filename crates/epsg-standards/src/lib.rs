#![deny(unsafe_code)]

//! Loading of the EPSG-to-GeoTrans field table.

pub mod error;
pub mod loader;
pub mod paths;
pub mod warning;

pub use crate::error::{RegistryLoadError, Result};
pub use crate::loader::{LoadReport, load, load_default, read_registry};
pub use crate::paths::{DATA_DIR_ENV_VAR, EPSG_CSV_FILE, data_dir, default_epsg_csv_path, epsg_csv_path};
pub use crate::warning::{LoadWarning, WarningKind};
