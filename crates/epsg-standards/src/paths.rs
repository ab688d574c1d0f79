//! EPSG data file path resolution.

use std::path::{Path, PathBuf};

use crate::error::{RegistryLoadError, Result};

/// Environment variable naming the GeoTrans data directory.
pub const DATA_DIR_ENV_VAR: &str = "MSPCCS_DATA";

/// File name of the EPSG table inside the data directory.
pub const EPSG_CSV_FILE: &str = "EPSG_codes_TO_GeoTrans_fields.csv";

/// The data directory from `MSPCCS_DATA`, if set and non-empty.
pub fn data_dir() -> Option<PathBuf> {
    std::env::var_os(DATA_DIR_ENV_VAR)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// Location of the EPSG table inside `dir`.
pub fn epsg_csv_path(dir: &Path) -> PathBuf {
    dir.join(EPSG_CSV_FILE)
}

/// Location of the EPSG table inside the configured data directory.
///
/// # Errors
///
/// Returns [`RegistryLoadError::DataDirUnset`] when `MSPCCS_DATA` is not set.
pub fn default_epsg_csv_path() -> Result<PathBuf> {
    data_dir()
        .map(|dir| epsg_csv_path(&dir))
        .ok_or(RegistryLoadError::DataDirUnset {
            var: DATA_DIR_ENV_VAR,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_path_joins_file_name() {
        let path = epsg_csv_path(Path::new("/opt/geotrans/data"));
        assert_eq!(
            path,
            PathBuf::from("/opt/geotrans/data/EPSG_codes_TO_GeoTrans_fields.csv")
        );
    }
}
