#![deny(unsafe_code)]

pub mod attributes;
pub mod enums;
pub mod error;
pub mod parameters;
pub mod registry;

pub use enums::{CoordinateSystemKind, HeightType, Hemisphere};
pub use error::{ModelError, Result};
pub use parameters::DerivedParameters;
pub use registry::{EpsgEntry, EpsgRegistry, EpsgRegistryBuilder};

#[cfg(test)]
mod tests {
    use super::*;

    fn utm_entry() -> EpsgEntry {
        [
            (attributes::DATUM, "WGE"),
            (attributes::COORD_SYS, "Universal Transverse Mercator (UTM)"),
            (attributes::ZONE, "1"),
            (attributes::OVERRIDE, "Off"),
            (attributes::HEMISPHERE, "N"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn entry_reports_missing_required_attributes() {
        let entry = utm_entry();
        assert_eq!(entry.datum(), Some("WGE"));
        assert_eq!(entry.missing_required(), None);

        let partial: EpsgEntry = [(attributes::COORD_SYS, "Geodetic")].into_iter().collect();
        assert_eq!(partial.missing_required(), Some(attributes::DATUM));
    }

    #[test]
    fn derived_parameters_serializes_with_coord_sys_tag() {
        let params = DerivedParameters::Ups {
            datum: "WGE".to_string(),
            hemisphere: Hemisphere::South,
        };
        let json = serde_json::to_value(&params).expect("serialize parameters");
        assert_eq!(json["coord_sys"], "Universal Polar Stereographic (UPS)");
        assert_eq!(json["hemisphere"], "S");
        assert_eq!(json["datum"], "WGE");
    }
}
