//! Read-only, lazily-materialized columnar store for an OpenStreetMap-derived
//! map extract ("atlas"). See [`Atlas`] for the top-level entry point.

mod archive;
mod atlas;
mod config;
mod decode;
mod dictionary;
mod entities;
mod entity;
mod error;
mod geo;
mod identifier;
mod metadata;
mod proto;
mod spatial_index;
mod store;
mod tags;

pub use atlas::Atlas;
pub use config::LoadOption;
pub use entities::{Area, Edge, Entity, Line, Node, Point, Relation, RelationMember};
pub use entity::EntityKind;
pub use error::{AtlasError, AtlasResult};
pub use geo::{
    bounds_atlasentities, bounds_locations, bounds_rectangles, Bounded, Location, PolyLine,
    Polygon, Rectangle,
};
pub use identifier::{country_code, osm_identifier, way_section_index};
pub use metadata::AtlasMetadata;
