//! Applying codes from a loaded table and keeping them consistent.

use std::fs;

use epsg_core::{
    ApplicationError, ChangeOrigin, ConsistencyTracker, EpsgCatalog, EpsgPanel,
    FieldChangeOutcome, FieldKind, SurfaceSide,
};
use epsg_model::{DerivedParameters, EpsgRegistry, Hemisphere};
use tempfile::TempDir;

const TABLE: &str = "\
Authority,Code,Attr1,Val1,Attr2,Val2,Attr3,Val3,Attr4,Val4,Attr5,Val5
EPSG,32601,Datum,WGE,Coord_Sys,Universal Transverse Mercator (UTM),Zone (1-60),1,Override,Off,Hemisphere,N
EPSG,4326,Datum,WGE,Coord_Sys,Geodetic,Height Type,No Height
EPSG,3395,Datum,WGE,Coord_Sys,Mercator (Standard Parallel),Central Meridian,0,Standard Parallel,0,False Easting (m),0,False Northing (m),0
EPSG,5041,Datum,WGE,Coord_Sys,Universal Polar Stereographic (UPS),Hemisphere,N
EPSG,2154,Datum,RGF,Coord_Sys,Lambert Conformal Conic (2 Standard Parallel)
";

fn load_registry() -> EpsgRegistry {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("EPSG_codes_TO_GeoTrans_fields.csv");
    fs::write(&path, TABLE).expect("write table");
    let report = epsg_standards::load(&path).expect("load table");
    assert!(!report.has_warnings(), "{:?}", report.warning_messages());
    report.registry
}

fn panel() -> EpsgPanel {
    EpsgPanel::new(SurfaceSide::Source, &EpsgCatalog::new(load_registry()))
}

fn pick(panel: &mut EpsgPanel, code: &str) {
    panel.set_text(code);
    panel.process_pending();
}

#[test]
fn applying_utm_code() {
    let registry = load_registry();
    let mut tracker = ConsistencyTracker::new();
    let applied = tracker.apply("32601", &registry).expect("apply 32601");

    assert_eq!(
        applied.parameters,
        DerivedParameters::Utm {
            datum: "WGE".to_string(),
            zone: "1".to_string(),
            override_zone: false,
            hemisphere: Hemisphere::North,
        }
    );
    assert_eq!(applied.parameters.zone_number(), Some(1));
    assert_eq!(tracker.current_code(), Some("32601"));
    assert_eq!(
        applied.rewritten,
        vec![
            FieldKind::Datum,
            FieldKind::CoordinateSystem,
            FieldKind::Zone,
            FieldKind::ZoneOverride,
            FieldKind::Hemisphere,
        ]
    );
}

#[test]
fn unknown_code_leaves_nothing_active() {
    let registry = load_registry();
    let mut tracker = ConsistencyTracker::new();
    tracker.apply("4326", &registry).expect("apply 4326");

    let err = tracker.apply("999999", &registry).unwrap_err();
    assert_eq!(err, ApplicationError::UnsupportedCode("999999".to_string()));
    assert_eq!(tracker.current_code(), None);
    assert!(tracker.pending_echoes().is_empty());
}

#[test]
fn unsupported_coordinate_system_clears() {
    let mut panel = panel();
    pick(&mut panel, "2154");
    let err = panel.apply_selected().unwrap_err();
    assert!(matches!(
        err,
        ApplicationError::UnsupportedCoordinateSystem { ref code, .. } if code == "2154"
    ));
    assert!(!panel.is_active());
    assert_eq!(panel.session().text(), "");
}

#[test]
fn untagged_echoes_are_consumed_once() {
    let registry = load_registry();
    let mut tracker = ConsistencyTracker::new();
    tracker.apply("4326", &registry).expect("apply 4326");

    for field in [FieldKind::Datum, FieldKind::CoordinateSystem, FieldKind::HeightType] {
        assert_eq!(
            tracker.notify_field_changed(field, ChangeOrigin::Untagged),
            FieldChangeOutcome::Absorbed
        );
    }
    assert_eq!(tracker.current_code(), Some("4326"));

    assert_eq!(
        tracker.notify_field_changed(FieldKind::Datum, ChangeOrigin::Untagged),
        FieldChangeOutcome::Invalidated
    );
    assert_eq!(tracker.current_code(), None);
}

#[test]
fn fields_without_a_slot_always_invalidate_untagged() {
    let registry = load_registry();
    let mut tracker = ConsistencyTracker::new();
    tracker.apply("32601", &registry).expect("apply 32601");
    assert_eq!(
        tracker.notify_field_changed(FieldKind::Zone, ChangeOrigin::Untagged),
        FieldChangeOutcome::Invalidated
    );
}

#[test]
fn tagged_writes_survive_a_dirty_slot() {
    let registry = load_registry();
    let mut tracker = ConsistencyTracker::new();
    let applied = tracker.apply("32601", &registry).expect("apply 32601");

    // The height selector is never rewritten for UTM, so its slot stays
    // armed. Tagged writes do not depend on it.
    for field in &applied.rewritten {
        assert_eq!(
            tracker.notify_field_changed(*field, ChangeOrigin::Programmatic(applied.epoch)),
            FieldChangeOutcome::Absorbed
        );
    }
    assert_eq!(tracker.pending_echoes(), vec![FieldKind::HeightType]);
    assert_eq!(
        tracker.notify_field_changed(FieldKind::Hemisphere, ChangeOrigin::User),
        FieldChangeOutcome::Invalidated
    );
}

#[test]
fn clear_is_idempotent() {
    let registry = load_registry();
    let mut tracker = ConsistencyTracker::new();
    tracker.apply("5041", &registry).expect("apply 5041");
    tracker.clear();
    let once = (tracker.current_code().map(str::to_string), tracker.pending_echoes());
    tracker.clear();
    let twice = (tracker.current_code().map(str::to_string), tracker.pending_echoes());
    assert_eq!(once, twice);
    assert_eq!(once, (None, Vec::new()));
}

#[test]
fn panel_applies_the_resolved_selection() {
    let mut panel = panel();
    panel.insert(0, "3");
    panel.process_pending();
    let index = panel
        .session()
        .candidates()
        .iter()
        .position(|code| code == "3395")
        .expect("3395 offered");
    panel.select_candidate(index);
    panel.process_pending();

    let applied = panel.apply_selected().expect("apply").expect("code applied");
    assert_eq!(applied.code, "3395");
    assert_eq!(panel.current_code(), Some("3395"));
    insta::assert_json_snapshot!(applied.parameters, @r#"
    {
      "coord_sys": "Mercator (Standard Parallel)",
      "datum": "WGE",
      "central_meridian": "0",
      "standard_parallel": "0",
      "false_easting": "0",
      "false_northing": "0"
    }
    "#);
}

#[test]
fn panel_rejects_partial_codes() {
    let mut panel = panel();
    panel.insert(0, "4");
    panel.process_pending();
    let err = panel.apply_selected().unwrap_err();
    assert_eq!(err.to_string(), "Unsupported EPSG Code [4]");
    assert_eq!(err.code(), "4");
    assert_eq!(panel.session().text(), "");
    assert!(!panel.is_active());
}

#[test]
fn empty_panel_apply_drops_the_code() {
    let mut panel = panel();
    pick(&mut panel, "4326");
    panel.apply_selected().expect("apply 4326");
    let len = panel.session().char_len();
    panel.remove(0..len);
    panel.process_pending();

    assert!(panel.apply_selected().expect("empty apply").is_none());
    assert!(!panel.is_active());
}

#[test]
fn user_edit_clears_the_code_box() {
    let mut panel = panel();
    pick(&mut panel, "32601");
    let applied = panel.apply_selected().expect("apply").expect("code applied");

    assert_eq!(
        panel.notify_field_changed(FieldKind::Datum, ChangeOrigin::Programmatic(applied.epoch)),
        FieldChangeOutcome::Absorbed
    );
    assert_eq!(panel.session().text(), "32601");

    assert_eq!(
        panel.notify_field_changed(FieldKind::Zone, ChangeOrigin::User),
        FieldChangeOutcome::Invalidated
    );
    assert_eq!(panel.session().text(), "");
    assert!(!panel.is_active());
}

#[test]
fn height_reset_buttons_rearm_the_height_slot() {
    let mut panel = panel();
    pick(&mut panel, "4326");
    let applied = panel.apply_selected().expect("apply").expect("code applied");
    panel.notify_field_changed(FieldKind::HeightType, ChangeOrigin::Untagged);

    assert_eq!(panel.expect_echo(FieldKind::HeightType), Some(applied.epoch));
    assert_eq!(
        panel.notify_field_changed(FieldKind::HeightType, ChangeOrigin::Untagged),
        FieldChangeOutcome::Absorbed
    );
    assert!(panel.is_active());
}

#[test]
fn stale_text_is_discarded_before_conversion() {
    let mut panel = panel();
    pick(&mut panel, "4326");
    assert!(panel.discard_inactive_selection());
    assert_eq!(panel.session().text(), "");
    assert!(!panel.discard_inactive_selection());

    pick(&mut panel, "4326");
    panel.apply_selected().expect("apply 4326");
    assert!(!panel.discard_inactive_selection());
    assert_eq!(panel.session().text(), "4326");
}

#[test]
fn editing_the_code_box_drops_the_applied_code() {
    let mut panel = panel();
    pick(&mut panel, "4326");
    panel.apply_selected().expect("apply 4326");

    pick(&mut panel, "4978");
    assert_eq!(panel.session().text(), "4978");
    assert_eq!(panel.current_code(), None);
    assert!(panel.tracker().pending_echoes().is_empty());
    assert!(panel.discard_inactive_selection());
    assert_eq!(panel.session().text(), "");

    pick(&mut panel, "3395");
    panel.apply_selected().expect("apply 3395");
    let len = panel.session().char_len();
    assert!(panel.remove(len - 1..len).is_accepted());
    assert!(!panel.is_active());
}

#[test]
fn rejected_keystrokes_keep_the_applied_code() {
    let mut panel = panel();
    pick(&mut panel, "4326");
    panel.apply_selected().expect("apply 4326");

    let len = panel.session().char_len();
    assert!(!panel.insert(len, "x").is_accepted());
    panel.set_text("4326");
    panel.process_pending();
    assert_eq!(panel.current_code(), Some("4326"));
}

#[test]
fn panels_share_one_catalog() {
    let catalog = EpsgCatalog::new(load_registry());
    let mut source = EpsgPanel::new(SurfaceSide::Source, &catalog);
    let mut target = EpsgPanel::new(SurfaceSide::Target, &catalog);
    pick(&mut source, "4326");
    pick(&mut target, "5041");
    source.apply_selected().expect("apply source");
    target.apply_selected().expect("apply target");

    source.clear();
    assert!(!source.is_active());
    assert_eq!(target.current_code(), Some("5041"));
    assert_eq!(target.side().to_string(), "target");
    assert_eq!(std::sync::Arc::strong_count(catalog.registry()), 3);
}
