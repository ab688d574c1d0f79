use epsg_model::ModelError;
use thiserror::Error;

/// Why an EPSG code could not be applied.
///
/// Every failure leaves the panel fully cleared.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ApplicationError {
    #[error("Unsupported EPSG Code [{0}]")]
    UnsupportedCode(String),

    #[error(
        "GeoTrans does not currently support this coordinate system [{name}] for EPSG codes (EPSG {code})"
    )]
    UnsupportedCoordinateSystem { code: String, name: String },

    #[error("EPSG code {code} has no '{attribute}' attribute")]
    MissingAttribute {
        code: String,
        attribute: &'static str,
    },

    #[error("EPSG code {code} has an invalid '{attribute}' value: {source}")]
    InvalidAttribute {
        code: String,
        attribute: &'static str,
        #[source]
        source: ModelError,
    },
}

impl ApplicationError {
    /// The code (or entered text) the failure is about.
    pub fn code(&self) -> &str {
        match self {
            Self::UnsupportedCode(code)
            | Self::UnsupportedCoordinateSystem { code, .. }
            | Self::MissingAttribute { code, .. }
            | Self::InvalidAttribute { code, .. } => code,
        }
    }
}

pub type Result<T> = std::result::Result<T, ApplicationError>;
