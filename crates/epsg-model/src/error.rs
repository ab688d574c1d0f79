use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("unknown coordinate system: {0}")]
    UnknownCoordinateSystem(String),
    #[error("invalid hemisphere '{0}' (expected N or S)")]
    InvalidHemisphere(String),
    #[error("unknown height type: {0}")]
    UnknownHeightType(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
