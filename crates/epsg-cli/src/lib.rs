//! CLI library components for the GeoTrans EPSG tool.

pub mod logging;
pub mod script;
