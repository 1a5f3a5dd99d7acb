use std::collections::{HashMap, HashSet};
use std::hash::{Hash, Hasher};

use crate::entity::EntityKind;
use crate::error::AtlasResult;
use crate::geo::{bounds_rectangles, Bounded, Polygon, Rectangle};
use crate::store::AtlasStore;

use super::area::Area;
use super::edge::Edge;
use super::line::Line;
use super::node::Node;
use super::point::Point;
use super::Entity;

/// An aggregation of other entities (possibly including other Relations)
/// under a logical relationship, each tagged with a role string.
#[derive(Clone, Copy)]
pub struct Relation<'a> {
    store: &'a AtlasStore,
    row: u32,
    identifier: i64,
}

/// One member of a [`Relation`]: the role it plays, the member entity, and
/// the identifier of the relation that owns it.
#[derive(Clone, Copy)]
pub struct RelationMember<'a> {
    role: &'a str,
    entity: Entity<'a>,
    relation_identifier: i64,
}

impl<'a> RelationMember<'a> {
    pub fn role(&self) -> &'a str {
        self.role
    }

    pub fn entity(&self) -> Entity<'a> {
        self.entity
    }

    pub fn relation_identifier(&self) -> i64 {
        self.relation_identifier
    }
}

impl<'a> Relation<'a> {
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
        EntityKind::Relation
    }

    pub fn tags(&self) -> AtlasResult<HashMap<String, String>> {
        self.store.tags(EntityKind::Relation, self.row as usize)
    }

    pub fn relations(&self) -> AtlasResult<Vec<Relation<'a>>> {
        super::resolve_relations(self.store, EntityKind::Relation, self.row)
    }

    /// This relation's members, sorted by (member type, member identifier,
    /// role).
    pub fn members(&self) -> AtlasResult<Vec<RelationMember<'a>>> {
        let row = self.row as usize;
        let types = self.store.relation_member_types(row)?;
        let indices = self.store.relation_member_indices(row)?;
        let roles = self.store.relation_member_roles(row)?;
        let dictionary = self.store.dictionary()?;

        let mut members = Vec::with_capacity(types.len());
        for ((&type_value, &member_row), &role_index) in
            types.iter().zip(indices.iter()).zip(roles.iter())
        {
            let kind = EntityKind::try_from(type_value)?;
            let entity = self.entity_of(kind, member_row)?;
            let role = dictionary.word(role_index as u32)?;
            members.push(RelationMember {
                role,
                entity,
                relation_identifier: self.identifier,
            });
        }
        members.sort_by(|a, b| {
            a.entity
                .kind()
                .cmp(&b.entity.kind())
                .then(a.entity.identifier().cmp(&b.entity.identifier()))
                .then(a.role.cmp(b.role))
        });
        Ok(members)
    }

    pub(crate) fn row(&self) -> u32 {
        self.row
    }

    fn entity_of(&self, kind: EntityKind, row: u32) -> AtlasResult<Entity<'a>> {
        let identifier = self.store.identifier(kind, row as usize)?;
        Ok(match kind {
            EntityKind::Point => Entity::Point(Point::new(self.store, row, identifier)),
            EntityKind::Line => Entity::Line(Line::new(self.store, row, identifier)),
            EntityKind::Area => Entity::Area(Area::new(self.store, row, identifier)),
            EntityKind::Node => Entity::Node(Node::new(self.store, row, identifier)),
            EntityKind::Edge => Entity::Edge(Edge::new(self.store, row, identifier)),
            EntityKind::Relation => Entity::Relation(Relation::new(self.store, row, identifier)),
        })
    }

    /// Union of member bounds. An empty relation yields a zero-extent
    /// rectangle at the origin. Relations-of-relations are followed with a
    /// visited set, since self-referential cycles are not expected but must
    /// not hang the caller if one slips through.
    pub fn bounds(&self) -> AtlasResult<Rectangle> {
        let mut visited = HashSet::new();
        match self.bounds_with_visited(&mut visited)? {
            Some(rect) => Ok(rect),
            None => Rectangle::new(
                crate::geo::Location::new(0, 0)?,
                crate::geo::Location::new(0, 0)?,
            ),
        }
    }

    fn bounds_with_visited(&self, visited: &mut HashSet<i64>) -> AtlasResult<Option<Rectangle>> {
        if !visited.insert(self.identifier) {
            return Ok(None);
        }
        let mut rects = Vec::new();
        for member in self.members()? {
            match member.entity {
                Entity::Relation(relation) => {
                    if let Some(rect) = relation.bounds_with_visited(visited)? {
                        rects.push(rect);
                    }
                }
                other => rects.push(other.bounds()?),
            }
        }
        Ok(if rects.is_empty() {
            None
        } else {
            Some(bounds_rectangles(rects)?)
        })
    }

    /// Logical OR over live member bounds: true iff any member intersects
    /// `polygon`. Relation members are followed recursively with cycle
    /// protection.
    pub fn intersects(&self, polygon: &Polygon) -> AtlasResult<bool> {
        let mut visited = HashSet::new();
        self.intersects_with_visited(polygon, &mut visited)
    }

    fn intersects_with_visited(
        &self,
        polygon: &Polygon,
        visited: &mut HashSet<i64>,
    ) -> AtlasResult<bool> {
        if !visited.insert(self.identifier) {
            return Ok(false);
        }
        for member in self.members()? {
            let hit = match member.entity {
                Entity::Relation(relation) => relation.intersects_with_visited(polygon, visited)?,
                other => other.intersects(polygon)?,
            };
            if hit {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

impl Bounded for Relation<'_> {
    fn bounds(&self) -> AtlasResult<Rectangle> {
        Relation::bounds(self)
    }
}

impl PartialEq for Relation<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.identifier == other.identifier
    }
}
impl Eq for Relation<'_> {}

impl Hash for Relation<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        EntityKind::Relation.hash(state);
        self.identifier.hash(state);
    }
}
