//! Attribute names used as keys in an [`EpsgEntry`](crate::EpsgEntry).
//!
//! The names match the column labels of the EPSG-to-GeoTrans field table.

pub const DATUM: &str = "Datum";
pub const COORD_SYS: &str = "Coord_Sys";
pub const ZONE: &str = "Zone (1-60)";
pub const OVERRIDE: &str = "Override";
pub const HEMISPHERE: &str = "Hemisphere";
pub const CENTRAL_MERIDIAN: &str = "Central Meridian";
pub const STANDARD_PARALLEL: &str = "Standard Parallel";
pub const FALSE_EASTING: &str = "False Easting (m)";
pub const FALSE_NORTHING: &str = "False Northing (m)";
pub const HEIGHT_TYPE: &str = "Height Type";

/// Attributes every registry entry must carry.
pub const REQUIRED: &[&str] = &[DATUM, COORD_SYS];

/// Value of [`OVERRIDE`] that disables the UTM zone override.
pub const OVERRIDE_OFF: &str = "Off";
