use serde::Serialize;

use crate::enums::{CoordinateSystemKind, Hemisphere, HeightType};

/// Coordinate-system parameters derived from one EPSG entry.
///
/// Numeric values stay as the display text found in the table. Parsing and
/// range checks belong to whoever constructs projection parameters from them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "coord_sys")]
pub enum DerivedParameters {
    #[serde(rename = "Universal Transverse Mercator (UTM)")]
    Utm {
        datum: String,
        zone: String,
        override_zone: bool,
        hemisphere: Hemisphere,
    },
    #[serde(rename = "Mercator (Standard Parallel)")]
    MercatorStandardParallel {
        datum: String,
        central_meridian: String,
        standard_parallel: String,
        false_easting: String,
        false_northing: String,
    },
    Geodetic {
        datum: String,
        height_type: HeightType,
    },
    #[serde(rename = "Universal Polar Stereographic (UPS)")]
    Ups {
        datum: String,
        hemisphere: Hemisphere,
    },
    Geocentric {
        datum: String,
    },
    #[serde(rename = "Web Mercator (S)")]
    WebMercator {
        datum: String,
    },
}

impl DerivedParameters {
    pub fn kind(&self) -> CoordinateSystemKind {
        match self {
            Self::Utm { .. } => CoordinateSystemKind::Utm,
            Self::MercatorStandardParallel { .. } => CoordinateSystemKind::MercatorStandardParallel,
            Self::Geodetic { .. } => CoordinateSystemKind::Geodetic,
            Self::Ups { .. } => CoordinateSystemKind::Ups,
            Self::Geocentric { .. } => CoordinateSystemKind::Geocentric,
            Self::WebMercator { .. } => CoordinateSystemKind::WebMercator,
        }
    }

    /// Datum code to select on the editing surface.
    pub fn datum(&self) -> &str {
        match self {
            Self::Utm { datum, .. }
            | Self::MercatorStandardParallel { datum, .. }
            | Self::Geodetic { datum, .. }
            | Self::Ups { datum, .. }
            | Self::Geocentric { datum }
            | Self::WebMercator { datum } => datum,
        }
    }

    /// UTM zone as a number, if this is a UTM parameter set with a zone in 1..=60.
    pub fn zone_number(&self) -> Option<u8> {
        match self {
            Self::Utm { zone, .. } => zone
                .trim()
                .parse::<u8>()
                .ok()
                .filter(|zone| (1..=60).contains(zone)),
            _ => None,
        }
    }

    pub fn hemisphere(&self) -> Option<Hemisphere> {
        match self {
            Self::Utm { hemisphere, .. } | Self::Ups { hemisphere, .. } => Some(*hemisphere),
            _ => None,
        }
    }

    /// Display-ready (label, value) pairs in selector order.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("Coordinate System", self.kind().as_str().to_string()),
            ("Datum", self.datum().to_string()),
        ];
        match self {
            Self::Utm {
                zone,
                override_zone,
                hemisphere,
                ..
            } => {
                fields.push(("Zone", zone.clone()));
                fields.push((
                    "Override",
                    if *override_zone { "On" } else { "Off" }.to_string(),
                ));
                fields.push(("Hemisphere", hemisphere.to_string()));
            }
            Self::MercatorStandardParallel {
                central_meridian,
                standard_parallel,
                false_easting,
                false_northing,
                ..
            } => {
                fields.push(("Central Meridian", central_meridian.clone()));
                fields.push(("Standard Parallel", standard_parallel.clone()));
                fields.push(("False Easting (m)", false_easting.clone()));
                fields.push(("False Northing (m)", false_northing.clone()));
            }
            Self::Geodetic { height_type, .. } => {
                fields.push(("Height Type", height_type.to_string()));
            }
            Self::Ups { hemisphere, .. } => {
                fields.push(("Hemisphere", hemisphere.to_string()));
            }
            Self::Geocentric { .. } | Self::WebMercator { .. } => {}
        }
        fields
    }
}
