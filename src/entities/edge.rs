use std::cmp::Ordering;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use crate::entity::EntityKind;
use crate::error::AtlasResult;
use crate::geo::{Bounded, PolyLine, Polygon, Rectangle};
use crate::store::AtlasStore;

use super::{Node, Relation};

/// A unidirectional routing edge. A bidirectional OSM way produces a pair of
/// Edges with identifiers `id` and `-id`; the positive one is the master.
#[derive(Clone, Copy)]
pub struct Edge<'a> {
    store: &'a AtlasStore,
    row: u32,
    identifier: i64,
}

impl<'a> Edge<'a> {
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
        EntityKind::Edge
    }

    pub fn as_polyline(&self) -> AtlasResult<&'a PolyLine> {
        self.store.edge_polyline(self.row as usize)
    }

    pub fn tags(&self) -> AtlasResult<HashMap<String, String>> {
        self.store.tags(EntityKind::Edge, self.row as usize)
    }

    pub fn bounds(&self) -> AtlasResult<Rectangle> {
        Ok(self.as_polyline()?.bounds())
    }

    pub fn intersects(&self, polygon: &Polygon) -> AtlasResult<bool> {
        Ok(polygon.overlaps_polyline(self.as_polyline()?))
    }

    pub fn relations(&self) -> AtlasResult<Vec<Relation<'a>>> {
        super::resolve_relations(self.store, EntityKind::Edge, self.row)
    }

    pub fn start(&self) -> AtlasResult<Node<'a>> {
        let row = self.store.edge_start_node(self.row as usize)?;
        let identifier = self.store.identifier(EntityKind::Node, row as usize)?;
        Ok(Node::new(self.store, row, identifier))
    }

    pub fn end(&self) -> AtlasResult<Node<'a>> {
        let row = self.store.edge_end_node(self.row as usize)?;
        let identifier = self.store.identifier(EntityKind::Node, row as usize)?;
        Ok(Node::new(self.store, row, identifier))
    }

    pub fn connected_nodes(&self) -> AtlasResult<Vec<Node<'a>>> {
        let start = self.start()?;
        let end = self.end()?;
        if start == end {
            Ok(vec![start])
        } else {
            Ok(vec![start, end])
        }
    }

    /// Every edge at either endpoint, excluding this one. Includes the
    /// reversed edge if this is part of a two-way road.
    pub fn connected_edges(&self) -> AtlasResult<Vec<Edge<'a>>> {
        let mut result = Vec::new();
        for edge in self.start()?.connected_edges()? {
            if edge != *self {
                result.push(edge);
            }
        }
        for edge in self.end()?.connected_edges()? {
            if edge != *self && !result.contains(&edge) {
                result.push(edge);
            }
        }
        Ok(result)
    }

    pub fn is_master_edge(&self) -> bool {
        self.identifier > 0
    }

    /// The master edge of this pair: itself if already master.
    pub fn master_edge(&self) -> AtlasResult<Edge<'a>> {
        if self.is_master_edge() {
            Ok(*self)
        } else {
            self.edge_with_identifier(-self.identifier)
        }
    }

    pub fn has_reversed_edge(&self) -> AtlasResult<bool> {
        Ok(self.reversed_row()?.is_some())
    }

    /// The bidirectional pair edge, if present.
    pub fn reversed_edge(&self) -> AtlasResult<Option<Edge<'a>>> {
        match self.reversed_row()? {
            Some(_) => Ok(Some(self.edge_with_identifier(-self.identifier)?)),
            None => Ok(None),
        }
    }

    /// True iff this edge's identifier has a nonzero way-section component.
    pub fn is_way_sectioned(&self) -> bool {
        crate::identifier::way_section_index(self.identifier) != 0
    }

    pub fn highway_tag_value(&self) -> AtlasResult<Option<String>> {
        Ok(self.tags()?.get("highway").cloned())
    }

    pub(crate) fn row(&self) -> u32 {
        self.row
    }

    fn reversed_row(&self) -> AtlasResult<Option<u32>> {
        self.store.row_of(EntityKind::Edge, -self.identifier)
    }

    fn edge_with_identifier(&self, identifier: i64) -> AtlasResult<Edge<'a>> {
        let row = self
            .store
            .row_of(EntityKind::Edge, identifier)?
            .expect("identifier presence already checked by caller");
        Ok(Edge::new(self.store, row, identifier))
    }
}

impl Bounded for Edge<'_> {
    fn bounds(&self) -> AtlasResult<Rectangle> {
        Edge::bounds(self)
    }
}

impl PartialEq for Edge<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.identifier == other.identifier
    }
}
impl Eq for Edge<'_> {}

impl PartialOrd for Edge<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Edge<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.identifier.cmp(&other.identifier)
    }
}

impl Hash for Edge<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        EntityKind::Edge.hash(state);
        self.identifier.hash(state);
    }
}
