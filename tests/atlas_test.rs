//! End-to-end checks driven entirely through the crate's public surface.
//!
//! This crate never exposes a writer (see `DESIGN.md`), so there is no way
//! to build a real archive from outside the crate — the fixture-backed
//! scenario tests instead live as a `#[cfg(test)]` module next to `Atlas`.
//! What remains reachable from here is the public API's error handling and
//! the standalone geometry/identifier helpers re-exported at the crate root.

use rusty_atlas::{country_code, osm_identifier, way_section_index};
use rusty_atlas::{Atlas, Location, LoadOption, PolyLine};

#[test]
fn opening_a_missing_file_fails() {
    let result = Atlas::open("/nonexistent/path/to/some.atlas");
    assert!(result.is_err());
}

#[test]
fn opening_a_non_archive_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("not-an-atlas");
    std::fs::write(&path, b"this is not a zip file").unwrap();
    assert!(Atlas::open(&path).is_err());
}

#[test]
fn eager_and_lazy_load_options_are_distinct() {
    assert_ne!(LoadOption::Eager, LoadOption::Lazy);
    assert_eq!(LoadOption::default(), LoadOption::Lazy);
}

#[test]
fn identifier_components_round_trip_through_the_public_helpers() {
    let osm_id = 222_222;
    let country = 1;
    let way_section = 3;
    let identifier = osm_id * 1_000_000 + country * 1_000 + way_section;
    assert_eq!(osm_identifier(identifier), osm_id);
    assert_eq!(country_code(identifier), country);
    assert_eq!(way_section_index(identifier), way_section);
}

#[test]
fn polyline_encoding_round_trips_through_the_public_api() {
    let locations = vec![
        Location::new(382_117_269, -1_193_153_616).unwrap(),
        Location::new(382_117_927, -1_193_152_951).unwrap(),
    ];
    let polyline = PolyLine::new(locations.clone()).unwrap();
    let encoded = polyline.encode().unwrap();
    let decoded = PolyLine::decode(&encoded).unwrap();
    assert_eq!(decoded.locations(), locations.as_slice());
}
