//! Mapping from a registry entry to coordinate-system parameters.

use std::str::FromStr;

use epsg_model::{
    CoordinateSystemKind, DerivedParameters, EpsgEntry, HeightType, Hemisphere, ModelError,
    attributes,
};

use crate::error::{ApplicationError, Result};

/// Derives the parameters `entry` sets for `code`.
///
/// Numeric attributes are handed through as the text found in the table.
pub fn derive_parameters(code: &str, entry: &EpsgEntry) -> Result<DerivedParameters> {
    let datum = required(code, entry, attributes::DATUM)?.to_string();
    let name = required(code, entry, attributes::COORD_SYS)?;
    let kind = CoordinateSystemKind::from_str(name).map_err(|_| {
        ApplicationError::UnsupportedCoordinateSystem {
            code: code.to_string(),
            name: name.to_string(),
        }
    })?;

    let parameters = match kind {
        CoordinateSystemKind::Utm => DerivedParameters::Utm {
            datum,
            zone: text(code, entry, attributes::ZONE)?,
            override_zone: required(code, entry, attributes::OVERRIDE)? != attributes::OVERRIDE_OFF,
            hemisphere: parsed::<Hemisphere>(code, entry, attributes::HEMISPHERE)?,
        },
        CoordinateSystemKind::MercatorStandardParallel => {
            DerivedParameters::MercatorStandardParallel {
                datum,
                central_meridian: text(code, entry, attributes::CENTRAL_MERIDIAN)?,
                standard_parallel: text(code, entry, attributes::STANDARD_PARALLEL)?,
                false_easting: text(code, entry, attributes::FALSE_EASTING)?,
                false_northing: text(code, entry, attributes::FALSE_NORTHING)?,
            }
        }
        CoordinateSystemKind::Geodetic => DerivedParameters::Geodetic {
            datum,
            height_type: parsed::<HeightType>(code, entry, attributes::HEIGHT_TYPE)?,
        },
        CoordinateSystemKind::Ups => DerivedParameters::Ups {
            datum,
            hemisphere: parsed::<Hemisphere>(code, entry, attributes::HEMISPHERE)?,
        },
        CoordinateSystemKind::Geocentric => DerivedParameters::Geocentric { datum },
        CoordinateSystemKind::WebMercator => DerivedParameters::WebMercator { datum },
    };
    Ok(parameters)
}

fn required<'a>(code: &str, entry: &'a EpsgEntry, attribute: &'static str) -> Result<&'a str> {
    entry
        .get(attribute)
        .ok_or_else(|| ApplicationError::MissingAttribute {
            code: code.to_string(),
            attribute,
        })
}

fn text(code: &str, entry: &EpsgEntry, attribute: &'static str) -> Result<String> {
    required(code, entry, attribute).map(str::to_string)
}

fn parsed<T>(code: &str, entry: &EpsgEntry, attribute: &'static str) -> Result<T>
where
    T: FromStr<Err = ModelError>,
{
    required(code, entry, attribute)?
        .parse()
        .map_err(|source| ApplicationError::InvalidAttribute {
            code: code.to_string(),
            attribute,
            source,
        })
}
