use std::path::PathBuf;

/// Fatal failures while loading the EPSG table.
///
/// Malformed rows are never reported here; they become
/// [`LoadWarning`](crate::LoadWarning)s instead.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RegistryLoadError {
    #[error("failed to read EPSG file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to split line {line} of EPSG file {path}: {source}")]
    Csv {
        path: PathBuf,
        line: usize,
        #[source]
        source: csv::Error,
    },

    #[error("environment variable {var} is not set; cannot locate the EPSG file")]
    DataDirUnset { var: &'static str },
}

impl RegistryLoadError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, RegistryLoadError>;
