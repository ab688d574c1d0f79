#![deny(unsafe_code)]

pub mod derive;
pub mod error;
pub mod panel;
pub mod tracker;

pub use derive::derive_parameters;
pub use error::{ApplicationError, Result};
pub use panel::{EpsgCatalog, EpsgPanel, SurfaceSide};
pub use tracker::{
    Applied, ApplyEpoch, ChangeOrigin, ConsistencyTracker, FieldChangeOutcome, FieldKind,
};
