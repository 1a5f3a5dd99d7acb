//! Flyweight entity layer: cheap `(store, row)` values that resolve columns
//! on demand. None of these own geometry or tags; they borrow the store for
//! the duration of the call.

pub mod area;
pub mod edge;
pub mod line;
pub mod node;
pub mod point;
pub mod relation;

pub use area::Area;
pub use edge::Edge;
pub use line::Line;
pub use node::Node;
pub use point::Point;
pub use relation::{Relation, RelationMember};

use std::collections::HashMap;

use crate::entity::EntityKind;
use crate::error::AtlasResult;
use crate::geo::{Bounded, Polygon, Rectangle};
use crate::store::AtlasStore;

/// Any one of the six flyweight kinds, as yielded by [`crate::Atlas::entities`]
/// and returned by [`crate::Atlas::entity`].
#[derive(Clone, Copy)]
pub enum Entity<'a> {
    Point(Point<'a>),
    Line(Line<'a>),
    Area(Area<'a>),
    Node(Node<'a>),
    Edge(Edge<'a>),
    Relation(Relation<'a>),
}

impl<'a> Entity<'a> {
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Point(_) => EntityKind::Point,
            Entity::Line(_) => EntityKind::Line,
            Entity::Area(_) => EntityKind::Area,
            Entity::Node(_) => EntityKind::Node,
            Entity::Edge(_) => EntityKind::Edge,
            Entity::Relation(_) => EntityKind::Relation,
        }
    }

    pub fn identifier(&self) -> i64 {
        match self {
            Entity::Point(e) => e.identifier(),
            Entity::Line(e) => e.identifier(),
            Entity::Area(e) => e.identifier(),
            Entity::Node(e) => e.identifier(),
            Entity::Edge(e) => e.identifier(),
            Entity::Relation(e) => e.identifier(),
        }
    }

    pub fn osm_identifier(&self) -> i64 {
        crate::identifier::osm_identifier(self.identifier())
    }

    pub fn tags(&self) -> AtlasResult<HashMap<String, String>> {
        match self {
            Entity::Point(e) => e.tags(),
            Entity::Line(e) => e.tags(),
            Entity::Area(e) => e.tags(),
            Entity::Node(e) => e.tags(),
            Entity::Edge(e) => e.tags(),
            Entity::Relation(e) => e.tags(),
        }
    }

    pub fn bounds(&self) -> AtlasResult<Rectangle> {
        match self {
            Entity::Point(e) => e.bounds(),
            Entity::Line(e) => e.bounds(),
            Entity::Area(e) => e.bounds(),
            Entity::Node(e) => e.bounds(),
            Entity::Edge(e) => e.bounds(),
            Entity::Relation(e) => e.bounds(),
        }
    }

    pub fn intersects(&self, polygon: &Polygon) -> AtlasResult<bool> {
        match self {
            Entity::Point(e) => e.intersects(polygon),
            Entity::Line(e) => e.intersects(polygon),
            Entity::Area(e) => e.intersects(polygon),
            Entity::Node(e) => e.intersects(polygon),
            Entity::Edge(e) => e.intersects(polygon),
            Entity::Relation(e) => e.intersects(polygon),
        }
    }

    pub fn relations(&self) -> AtlasResult<Vec<Relation<'a>>> {
        match self {
            Entity::Point(e) => e.relations(),
            Entity::Line(e) => e.relations(),
            Entity::Area(e) => e.relations(),
            Entity::Node(e) => e.relations(),
            Entity::Edge(e) => e.relations(),
            Entity::Relation(e) => e.relations(),
        }
    }
}

impl Bounded for Entity<'_> {
    fn bounds(&self) -> AtlasResult<Rectangle> {
        Entity::bounds(self)
    }
}

impl PartialEq for Entity<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.kind() == other.kind() && self.identifier() == other.identifier()
    }
}
impl Eq for Entity<'_> {}

impl std::hash::Hash for Entity<'_> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.kind().hash(state);
        self.identifier().hash(state);
    }
}

/// Resolve a row's member-of-relation indices into `Relation` flyweights.
pub(crate) fn resolve_relations(
    store: &AtlasStore,
    kind: EntityKind,
    row: u32,
) -> AtlasResult<Vec<Relation<'_>>> {
    store
        .relations_of(kind, row)?
        .iter()
        .map(|&relation_row| {
            let identifier = store.identifier(EntityKind::Relation, relation_row as usize)?;
            Ok(Relation::new(store, relation_row, identifier))
        })
        .collect()
}

