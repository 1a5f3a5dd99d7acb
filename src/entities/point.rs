use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use crate::entity::EntityKind;
use crate::error::AtlasResult;
use crate::geo::{Bounded, Location, Polygon, Rectangle};
use crate::store::AtlasStore;

use super::Relation;

/// A single located point, carrying tags and relation membership but no
/// navigable structure (contrast with [`super::Node`]).
#[derive(Clone, Copy)]
pub struct Point<'a> {
    store: &'a AtlasStore,
    row: u32,
    identifier: i64,
}

impl<'a> Point<'a> {
    pub(crate) fn new(store: &'a AtlasStore, row: u32, identifier: i64) -> Self {
        Self { store, row, identifier }
    }

    pub fn identifier(&self) -> i64 {
        self.identifier
    }

    pub fn osm_identifier(&self) -> i64 {
        crate::identifier::osm_identifier(self.identifier)
    }

    pub fn kind(&self) -> EntityKind {
        EntityKind::Point
    }

    pub fn location(&self) -> AtlasResult<Location> {
        self.store.point_location(self.row as usize)
    }

    pub fn tags(&self) -> AtlasResult<HashMap<String, String>> {
        self.store.tags(EntityKind::Point, self.row as usize)
    }

    pub fn bounds(&self) -> AtlasResult<Rectangle> {
        Ok(self.location()?.bounds())
    }

    /// Strict interior containment: a point on `polygon`'s boundary does not
    /// intersect it.
    pub fn intersects(&self, polygon: &Polygon) -> AtlasResult<bool> {
        Ok(polygon.fully_geometrically_encloses_location(&self.location()?))
    }

    pub fn relations(&self) -> AtlasResult<Vec<Relation<'a>>> {
        super::resolve_relations(self.store, EntityKind::Point, self.row)
    }

    pub(crate) fn row(&self) -> u32 {
        self.row
    }
}

impl Bounded for Point<'_> {
    fn bounds(&self) -> AtlasResult<Rectangle> {
        Point::bounds(self)
    }
}

impl PartialEq for Point<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.identifier == other.identifier
    }
}
impl Eq for Point<'_> {}

impl Hash for Point<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        EntityKind::Point.hash(state);
        self.identifier.hash(state);
    }
}
