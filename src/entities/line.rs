use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use crate::entity::EntityKind;
use crate::error::AtlasResult;
use crate::geo::{Bounded, PolyLine, Polygon, Rectangle};
use crate::store::AtlasStore;

use super::Relation;

/// An unnavigable polyline (not part of the node/edge routing graph;
/// contrast with [`super::Edge`]).
#[derive(Clone, Copy)]
pub struct Line<'a> {
    store: &'a AtlasStore,
    row: u32,
    identifier: i64,
}

impl<'a> Line<'a> {
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
        EntityKind::Line
    }

    pub fn as_polyline(&self) -> AtlasResult<&'a PolyLine> {
        self.store.line_polyline(self.row as usize)
    }

    pub fn tags(&self) -> AtlasResult<HashMap<String, String>> {
        self.store.tags(EntityKind::Line, self.row as usize)
    }

    pub fn bounds(&self) -> AtlasResult<Rectangle> {
        Ok(self.as_polyline()?.bounds())
    }

    /// Non-empty intersection with `polygon`; touching or full containment
    /// both count as overlap.
    pub fn intersects(&self, polygon: &Polygon) -> AtlasResult<bool> {
        Ok(polygon.overlaps_polyline(self.as_polyline()?))
    }

    pub fn relations(&self) -> AtlasResult<Vec<Relation<'a>>> {
        super::resolve_relations(self.store, EntityKind::Line, self.row)
    }

    pub(crate) fn row(&self) -> u32 {
        self.row
    }
}

impl Bounded for Line<'_> {
    fn bounds(&self) -> AtlasResult<Rectangle> {
        Line::bounds(self)
    }
}

impl PartialEq for Line<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.identifier == other.identifier
    }
}
impl Eq for Line<'_> {}

impl Hash for Line<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        EntityKind::Line.hash(state);
        self.identifier.hash(state);
    }
}
