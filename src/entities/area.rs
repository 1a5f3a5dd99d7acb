use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use crate::entity::EntityKind;
use crate::error::AtlasResult;
use crate::geo::{Bounded, Polygon, Rectangle};
use crate::store::AtlasStore;

use super::Relation;

/// A closed region. The closing vertex is synthesized on demand by
/// [`Polygon::closed_loop`]; it is never stored.
#[derive(Clone, Copy)]
pub struct Area<'a> {
    store: &'a AtlasStore,
    row: u32,
    identifier: i64,
}

impl<'a> Area<'a> {
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
        EntityKind::Area
    }

    pub fn as_polygon(&self) -> AtlasResult<&'a Polygon> {
        self.store.area_polygon(self.row as usize)
    }

    pub fn tags(&self) -> AtlasResult<HashMap<String, String>> {
        self.store.tags(EntityKind::Area, self.row as usize)
    }

    pub fn bounds(&self) -> AtlasResult<Rectangle> {
        Ok(self.as_polygon()?.bounds())
    }

    /// Non-empty intersection with `polygon`; one fully containing the other
    /// counts as intersecting.
    pub fn intersects(&self, polygon: &Polygon) -> AtlasResult<bool> {
        Ok(self.as_polygon()?.intersects(polygon))
    }

    pub fn relations(&self) -> AtlasResult<Vec<Relation<'a>>> {
        super::resolve_relations(self.store, EntityKind::Area, self.row)
    }

    pub(crate) fn row(&self) -> u32 {
        self.row
    }
}

impl Bounded for Area<'_> {
    fn bounds(&self) -> AtlasResult<Rectangle> {
        Area::bounds(self)
    }
}

impl PartialEq for Area<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.identifier == other.identifier
    }
}
impl Eq for Area<'_> {}

impl Hash for Area<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        EntityKind::Area.hash(state);
        self.identifier.hash(state);
    }
}
