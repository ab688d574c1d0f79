//! Tests for epsg-model types.

use epsg_model::{
    CoordinateSystemKind, DerivedParameters, EpsgEntry, EpsgRegistry, HeightType, Hemisphere,
    attributes,
};

fn entry(coord_sys: &str) -> EpsgEntry {
    [(attributes::DATUM, "WGE"), (attributes::COORD_SYS, coord_sys)]
        .into_iter()
        .collect()
}

#[test]
fn registry_keeps_first_load_position_for_replaced_codes() {
    let mut builder = EpsgRegistry::builder();
    assert!(builder.insert("4326", entry("Geodetic")).is_none());
    assert!(builder.insert("3395", entry("Mercator (Standard Parallel)")).is_none());
    let replaced = builder.insert("4326", entry("Geocentric"));
    assert_eq!(
        replaced.and_then(|e| e.coordinate_system().map(str::to_string)),
        Some("Geodetic".to_string())
    );

    let registry = builder.build();
    assert_eq!(registry.len(), 2);
    assert_eq!(registry.codes(), ["4326".to_string(), "3395".to_string()]);
    assert_eq!(
        registry.get("4326").and_then(EpsgEntry::coordinate_system),
        Some("Geocentric")
    );
    let iterated: Vec<&str> = registry.iter().map(|(code, _)| code).collect();
    assert_eq!(iterated, vec!["4326", "3395"]);
}

#[test]
fn registry_lookup_is_exact() {
    let registry = EpsgRegistry::builder()
        .with_entry("32601", entry("Universal Transverse Mercator (UTM)"))
        .build();
    assert!(registry.contains("32601"));
    assert!(!registry.contains("3260"));
    assert!(!registry.contains(" 32601"));
    assert!(registry.get("999999").is_none());
}

#[test]
fn utm_parameters_expose_zone_and_hemisphere() {
    let params = DerivedParameters::Utm {
        datum: "WGE".to_string(),
        zone: "1".to_string(),
        override_zone: false,
        hemisphere: Hemisphere::North,
    };
    assert_eq!(params.kind(), CoordinateSystemKind::Utm);
    assert_eq!(params.datum(), "WGE");
    assert_eq!(params.zone_number(), Some(1));
    assert_eq!(params.hemisphere().map(|h| h.as_char()), Some('N'));

    let bad_zone = DerivedParameters::Utm {
        datum: "WGE".to_string(),
        zone: "61".to_string(),
        override_zone: true,
        hemisphere: Hemisphere::South,
    };
    assert_eq!(bad_zone.zone_number(), None);
}

#[test]
fn geodetic_fields_include_height_type() {
    let params = DerivedParameters::Geodetic {
        datum: "WGE".to_string(),
        height_type: HeightType::EllipsoidHeight,
    };
    let fields = params.fields();
    assert_eq!(fields[0], ("Coordinate System", "Geodetic".to_string()));
    assert_eq!(fields[1], ("Datum", "WGE".to_string()));
    assert_eq!(fields[2], ("Height Type", "Ellipsoid Height".to_string()));
    assert_eq!(params.hemisphere(), None);
}

#[test]
fn utm_parameters_json_shape() {
    let params = DerivedParameters::Utm {
        datum: "WGE".to_string(),
        zone: "1".to_string(),
        override_zone: false,
        hemisphere: Hemisphere::North,
    };
    insta::assert_json_snapshot!(params, @r#"
    {
      "coord_sys": "Universal Transverse Mercator (UTM)",
      "datum": "WGE",
      "zone": "1",
      "override_zone": false,
      "hemisphere": "N"
    }
    "#);
}
