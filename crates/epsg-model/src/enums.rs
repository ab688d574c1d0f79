//! Type-safe enumerations for values that the EPSG table stores as text.
//!
//! The display names are the labels GeoTrans uses in its coordinate-system
//! and height selectors, so a parsed value can be pushed straight back into
//! those selectors.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Coordinate systems an EPSG code can be applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CoordinateSystemKind {
    /// Universal Transverse Mercator: zone, override and hemisphere.
    #[serde(rename = "Universal Transverse Mercator (UTM)")]
    Utm,
    /// Mercator defined by a standard parallel.
    #[serde(rename = "Mercator (Standard Parallel)")]
    MercatorStandardParallel,
    /// Geodetic latitude/longitude with a height type.
    Geodetic,
    /// Universal Polar Stereographic: hemisphere only.
    #[serde(rename = "Universal Polar Stereographic (UPS)")]
    Ups,
    /// Earth-centred cartesian.
    Geocentric,
    /// Spherical Web Mercator.
    #[serde(rename = "Web Mercator (S)")]
    WebMercator,
}

impl CoordinateSystemKind {
    /// Returns the selector label as it appears in the EPSG table.
    pub fn as_str(&self) -> &'static str {
        match self {
            CoordinateSystemKind::Utm => "Universal Transverse Mercator (UTM)",
            CoordinateSystemKind::MercatorStandardParallel => "Mercator (Standard Parallel)",
            CoordinateSystemKind::Geodetic => "Geodetic",
            CoordinateSystemKind::Ups => "Universal Polar Stereographic (UPS)",
            CoordinateSystemKind::Geocentric => "Geocentric",
            CoordinateSystemKind::WebMercator => "Web Mercator (S)",
        }
    }

    /// All supported coordinate systems in selector order.
    pub fn all() -> &'static [CoordinateSystemKind] {
        &[
            Self::Utm,
            Self::MercatorStandardParallel,
            Self::Geodetic,
            Self::Ups,
            Self::Geocentric,
            Self::WebMercator,
        ]
    }
}

impl fmt::Display for CoordinateSystemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CoordinateSystemKind {
    type Err = ModelError;

    /// Exact, case-sensitive match on the selector label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ModelError::UnknownCoordinateSystem(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hemisphere {
    #[serde(rename = "N")]
    North,
    #[serde(rename = "S")]
    South,
}

impl Hemisphere {
    pub fn as_char(&self) -> char {
        match self {
            Hemisphere::North => 'N',
            Hemisphere::South => 'S',
        }
    }
}

impl fmt::Display for Hemisphere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for Hemisphere {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "N" => Ok(Hemisphere::North),
            "S" => Ok(Hemisphere::South),
            _ => Err(ModelError::InvalidHemisphere(s.to_string())),
        }
    }
}

/// Height reference for geodetic coordinates.
///
/// Selector order matches the GeoTrans height selector; note that the
/// EGM2008 model sits third in the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeightType {
    #[serde(rename = "No Height")]
    NoHeight,
    #[serde(rename = "Ellipsoid Height")]
    EllipsoidHeight,
    #[serde(rename = "MSL-EGM2008-2.5M-BCS Height")]
    Egm2008TwoPtFiveMinBicubicSpline,
    #[serde(rename = "MSL-EGM96-15M-BL Height")]
    Egm96FifteenMinBilinear,
    #[serde(rename = "MSL-EGM96-VG-NS Height")]
    Egm96VariableNaturalSpline,
    #[serde(rename = "MSL-EGM84-10D-BL Height")]
    Egm84TenDegBilinear,
    #[serde(rename = "MSL-EGM84-10D-NS Height")]
    Egm84TenDegNaturalSpline,
    #[serde(rename = "MSL-EGM84-30M-BL Height")]
    Egm84ThirtyMinBilinear,
}

impl HeightType {
    pub fn as_str(&self) -> &'static str {
        match self {
            HeightType::NoHeight => "No Height",
            HeightType::EllipsoidHeight => "Ellipsoid Height",
            HeightType::Egm2008TwoPtFiveMinBicubicSpline => "MSL-EGM2008-2.5M-BCS Height",
            HeightType::Egm96FifteenMinBilinear => "MSL-EGM96-15M-BL Height",
            HeightType::Egm96VariableNaturalSpline => "MSL-EGM96-VG-NS Height",
            HeightType::Egm84TenDegBilinear => "MSL-EGM84-10D-BL Height",
            HeightType::Egm84TenDegNaturalSpline => "MSL-EGM84-10D-NS Height",
            HeightType::Egm84ThirtyMinBilinear => "MSL-EGM84-30M-BL Height",
        }
    }

    pub fn all() -> &'static [HeightType] {
        &[
            Self::NoHeight,
            Self::EllipsoidHeight,
            Self::Egm2008TwoPtFiveMinBicubicSpline,
            Self::Egm96FifteenMinBilinear,
            Self::Egm96VariableNaturalSpline,
            Self::Egm84TenDegBilinear,
            Self::Egm84TenDegNaturalSpline,
            Self::Egm84ThirtyMinBilinear,
        ]
    }

    /// Returns true if the height is measured against mean sea level.
    pub fn is_msl(&self) -> bool {
        !matches!(self, HeightType::NoHeight | HeightType::EllipsoidHeight)
    }
}

impl fmt::Display for HeightType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for HeightType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|height| height.as_str() == s)
            .ok_or_else(|| ModelError::UnknownHeightType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinate_system_labels_round_trip() {
        for kind in CoordinateSystemKind::all() {
            assert_eq!(kind.as_str().parse::<CoordinateSystemKind>().unwrap(), *kind);
        }
    }

    #[test]
    fn coordinate_system_match_is_exact() {
        assert!("geodetic".parse::<CoordinateSystemKind>().is_err());
        assert!("Lambert Conformal Conic (1 Standard Parallel)"
            .parse::<CoordinateSystemKind>()
            .is_err());
    }

    #[test]
    fn hemisphere_from_str() {
        assert_eq!("N".parse::<Hemisphere>().unwrap(), Hemisphere::North);
        assert_eq!("S".parse::<Hemisphere>().unwrap(), Hemisphere::South);
        assert_eq!(
            "n".parse::<Hemisphere>(),
            Err(ModelError::InvalidHemisphere("n".to_string()))
        );
        assert_eq!(Hemisphere::South.as_char(), 'S');
    }

    #[test]
    fn height_types_parse_selector_labels() {
        assert_eq!(
            "MSL-EGM2008-2.5M-BCS Height".parse::<HeightType>().unwrap(),
            HeightType::Egm2008TwoPtFiveMinBicubicSpline
        );
        assert_eq!("No Height".parse::<HeightType>().unwrap(), HeightType::NoHeight);
        assert!(!HeightType::EllipsoidHeight.is_msl());
        assert!(HeightType::Egm84ThirtyMinBilinear.is_msl());
        assert!("Orthometric Height".parse::<HeightType>().is_err());
    }
}
