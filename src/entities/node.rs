use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use crate::entity::EntityKind;
use crate::error::AtlasResult;
use crate::geo::{Bounded, Location, Polygon, Rectangle};
use crate::store::AtlasStore;

use super::{Edge, Relation};

/// A located point that participates in the node/edge routing graph.
#[derive(Clone, Copy)]
pub struct Node<'a> {
    store: &'a AtlasStore,
    row: u32,
    identifier: i64,
}

impl<'a> Node<'a> {
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
        EntityKind::Node
    }

    pub fn location(&self) -> AtlasResult<Location> {
        self.store.node_location(self.row as usize)
    }

    pub fn tags(&self) -> AtlasResult<HashMap<String, String>> {
        self.store.tags(EntityKind::Node, self.row as usize)
    }

    pub fn bounds(&self) -> AtlasResult<Rectangle> {
        Ok(self.location()?.bounds())
    }

    pub fn intersects(&self, polygon: &Polygon) -> AtlasResult<bool> {
        Ok(polygon.fully_geometrically_encloses_location(&self.location()?))
    }

    pub fn relations(&self) -> AtlasResult<Vec<Relation<'a>>> {
        super::resolve_relations(self.store, EntityKind::Node, self.row)
    }

    /// Incoming edges, sorted by identifier ascending.
    pub fn in_edges(&self) -> AtlasResult<Vec<Edge<'a>>> {
        let mut edges = self.edges_from(self.store.node_in_edges(self.row)?)?;
        edges.sort_by_key(|edge| edge.identifier());
        Ok(edges)
    }

    /// Outgoing edges, sorted by identifier ascending.
    pub fn out_edges(&self) -> AtlasResult<Vec<Edge<'a>>> {
        let mut edges = self.edges_from(self.store.node_out_edges(self.row)?)?;
        edges.sort_by_key(|edge| edge.identifier());
        Ok(edges)
    }

    /// In-edges followed by out-edges, each group sorted by identifier.
    pub fn connected_edges(&self) -> AtlasResult<Vec<Edge<'a>>> {
        let mut edges = self.in_edges()?;
        edges.extend(self.out_edges()?);
        Ok(edges)
    }

    pub fn absolute_valence(&self) -> AtlasResult<usize> {
        Ok(self.connected_edges()?.len())
    }

    /// Count of connected edges with a positive (master) identifier.
    pub fn valence(&self) -> AtlasResult<usize> {
        Ok(self
            .connected_edges()?
            .into_iter()
            .filter(|edge| edge.identifier() > 0)
            .count())
    }

    pub(crate) fn row(&self) -> u32 {
        self.row
    }

    fn edges_from(&self, rows: &[u32]) -> AtlasResult<Vec<Edge<'a>>> {
        rows.iter()
            .map(|&row| {
                let identifier = self.store.identifier(EntityKind::Edge, row as usize)?;
                Ok(Edge::new(self.store, row, identifier))
            })
            .collect()
    }
}

impl Bounded for Node<'_> {
    fn bounds(&self) -> AtlasResult<Rectangle> {
        Node::bounds(self)
    }
}

impl PartialEq for Node<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.identifier == other.identifier
    }
}
impl Eq for Node<'_> {}

impl Hash for Node<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        EntityKind::Node.hash(state);
        self.identifier.hash(state);
    }
}
