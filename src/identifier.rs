//! Atlas identifier decomposition.
//!
//! An identifier is a positive integer `osm_id * 10^6 + country_code * 10^3 +
//! way_section_index`. The negative sign an `Edge` identifier may carry is
//! stripped before decomposition.

const WAY_SECTION_SCALE: i64 = 1_000;
const COUNTRY_CODE_SCALE: i64 = 1_000;
const OSM_ID_SCALE: i64 = WAY_SECTION_SCALE * COUNTRY_CODE_SCALE;

/// The OSM identifier component of a full atlas identifier.
pub fn osm_identifier(atlas_identifier: i64) -> i64 {
    atlas_identifier.abs() / OSM_ID_SCALE
}

/// The three-digit country code component of a full atlas identifier.
pub fn country_code(atlas_identifier: i64) -> i64 {
    (atlas_identifier.abs() / WAY_SECTION_SCALE) % COUNTRY_CODE_SCALE
}

/// The three-digit way-section index component of a full atlas identifier.
pub fn way_section_index(atlas_identifier: i64) -> i64 {
    atlas_identifier.abs() % WAY_SECTION_SCALE
}
