//! Top-level facade: by-identifier lookup, kind-major iteration, and
//! index-pruned spatial queries over a single opened atlas.

use std::path::Path;

use once_cell::unsync::OnceCell;

use crate::archive::ArchiveReader;
use crate::config::LoadOption;
use crate::entities::{Area, Edge, Entity, Line, Node, Point, Relation};
use crate::entity::EntityKind;
use crate::error::AtlasResult;
use crate::geo::{Location, Polygon, Rectangle};
use crate::metadata::AtlasMetadata;
use crate::spatial_index::SpatialIndex;
use crate::store::AtlasStore;

pub struct Atlas {
    store: AtlasStore,
    point_index: OnceCell<SpatialIndex>,
    line_index: OnceCell<SpatialIndex>,
    area_index: OnceCell<SpatialIndex>,
    node_index: OnceCell<SpatialIndex>,
    edge_index: OnceCell<SpatialIndex>,
    relation_index: OnceCell<SpatialIndex>,
}

impl Atlas {
    pub fn open(path: impl AsRef<Path>) -> AtlasResult<Self> {
        Self::open_with_option(path, LoadOption::default())
    }

    pub fn open_with_option(path: impl AsRef<Path>, option: LoadOption) -> AtlasResult<Self> {
        let archive = ArchiveReader::open(path)?;
        let atlas = Self {
            store: AtlasStore::new(archive),
            point_index: OnceCell::new(),
            line_index: OnceCell::new(),
            area_index: OnceCell::new(),
            node_index: OnceCell::new(),
            edge_index: OnceCell::new(),
            relation_index: OnceCell::new(),
        };
        if option.is_eager() {
            atlas.load_all_fields()?;
            for kind in EntityKind::ALL {
                atlas.index_for(kind)?;
            }
        }
        Ok(atlas)
    }

    /// Force every column of every kind to materialize.
    pub fn load_all_fields(&self) -> AtlasResult<()> {
        self.store.load_all()
    }

    pub fn metadata(&self) -> AtlasResult<&AtlasMetadata> {
        self.store.metadata()
    }

    // ---- by-identifier lookups ----

    pub fn point(&self, identifier: i64) -> AtlasResult<Option<Point<'_>>> {
        Ok(self
            .store
            .row_of(EntityKind::Point, identifier)?
            .map(|row| Point::new(&self.store, row, identifier)))
    }

    pub fn line(&self, identifier: i64) -> AtlasResult<Option<Line<'_>>> {
        Ok(self
            .store
            .row_of(EntityKind::Line, identifier)?
            .map(|row| Line::new(&self.store, row, identifier)))
    }

    pub fn area(&self, identifier: i64) -> AtlasResult<Option<Area<'_>>> {
        Ok(self
            .store
            .row_of(EntityKind::Area, identifier)?
            .map(|row| Area::new(&self.store, row, identifier)))
    }

    pub fn node(&self, identifier: i64) -> AtlasResult<Option<Node<'_>>> {
        Ok(self
            .store
            .row_of(EntityKind::Node, identifier)?
            .map(|row| Node::new(&self.store, row, identifier)))
    }

    pub fn edge(&self, identifier: i64) -> AtlasResult<Option<Edge<'_>>> {
        Ok(self
            .store
            .row_of(EntityKind::Edge, identifier)?
            .map(|row| Edge::new(&self.store, row, identifier)))
    }

    pub fn relation(&self, identifier: i64) -> AtlasResult<Option<Relation<'_>>> {
        Ok(self
            .store
            .row_of(EntityKind::Relation, identifier)?
            .map(|row| Relation::new(&self.store, row, identifier)))
    }

    /// Dispatch by kind value; an out-of-range `kind` fails with `InvalidKind`.
    pub fn entity(&self, identifier: i64, kind: i64) -> AtlasResult<Option<Entity<'_>>> {
        Ok(match EntityKind::try_from(kind)? {
            EntityKind::Point => self.point(identifier)?.map(Entity::Point),
            EntityKind::Line => self.line(identifier)?.map(Entity::Line),
            EntityKind::Area => self.area(identifier)?.map(Entity::Area),
            EntityKind::Node => self.node(identifier)?.map(Entity::Node),
            EntityKind::Edge => self.edge(identifier)?.map(Entity::Edge),
            EntityKind::Relation => self.relation(identifier)?.map(Entity::Relation),
        })
    }

    // ---- iteration, storage order, kind-major for entities() ----

    pub fn points(&self) -> AtlasResult<impl Iterator<Item = Point<'_>> + '_> {
        Ok(self.rows(EntityKind::Point)?.map(move |(row, identifier)| {
            Point::new(&self.store, row, identifier)
        }))
    }

    pub fn lines(&self) -> AtlasResult<impl Iterator<Item = Line<'_>> + '_> {
        Ok(self.rows(EntityKind::Line)?.map(move |(row, identifier)| {
            Line::new(&self.store, row, identifier)
        }))
    }

    pub fn areas(&self) -> AtlasResult<impl Iterator<Item = Area<'_>> + '_> {
        Ok(self.rows(EntityKind::Area)?.map(move |(row, identifier)| {
            Area::new(&self.store, row, identifier)
        }))
    }

    pub fn nodes(&self) -> AtlasResult<impl Iterator<Item = Node<'_>> + '_> {
        Ok(self.rows(EntityKind::Node)?.map(move |(row, identifier)| {
            Node::new(&self.store, row, identifier)
        }))
    }

    pub fn edges(&self) -> AtlasResult<impl Iterator<Item = Edge<'_>> + '_> {
        Ok(self.rows(EntityKind::Edge)?.map(move |(row, identifier)| {
            Edge::new(&self.store, row, identifier)
        }))
    }

    pub fn relations(&self) -> AtlasResult<impl Iterator<Item = Relation<'_>> + '_> {
        Ok(self.rows(EntityKind::Relation)?.map(move |(row, identifier)| {
            Relation::new(&self.store, row, identifier)
        }))
    }

    /// Every entity, in the order Point, Line, Area, Node, Edge, Relation.
    pub fn entities(&self) -> AtlasResult<impl Iterator<Item = Entity<'_>> + '_> {
        Ok(self
            .points()?
            .map(Entity::Point)
            .chain(self.lines()?.map(Entity::Line))
            .chain(self.areas()?.map(Entity::Area))
            .chain(self.nodes()?.map(Entity::Node))
            .chain(self.edges()?.map(Entity::Edge))
            .chain(self.relations()?.map(Entity::Relation)))
    }

    pub fn number_of_points(&self) -> AtlasResult<usize> {
        self.store.len(EntityKind::Point)
    }

    pub fn number_of_lines(&self) -> AtlasResult<usize> {
        self.store.len(EntityKind::Line)
    }

    pub fn number_of_areas(&self) -> AtlasResult<usize> {
        self.store.len(EntityKind::Area)
    }

    pub fn number_of_nodes(&self) -> AtlasResult<usize> {
        self.store.len(EntityKind::Node)
    }

    pub fn number_of_edges(&self) -> AtlasResult<usize> {
        self.store.len(EntityKind::Edge)
    }

    pub fn number_of_relations(&self) -> AtlasResult<usize> {
        self.store.len(EntityKind::Relation)
    }

    fn rows(&self, kind: EntityKind) -> AtlasResult<impl Iterator<Item = (u32, i64)> + '_> {
        let identifiers = self.store.identifiers(kind)?;
        Ok(identifiers
            .iter()
            .enumerate()
            .map(|(row, &identifier)| (row as u32, identifier)))
    }

    // ---- spatial queries: coarse R-tree prune, then exact predicate ----

    pub fn points_at(
        &self,
        location: Location,
        predicate: impl Fn(&Point<'_>) -> bool,
    ) -> AtlasResult<Vec<Point<'_>>> {
        let candidates = self.point_candidates(&location.bounds())?;
        Ok(candidates.into_iter().filter(|p| predicate(p)).collect())
    }

    pub fn points_within(
        &self,
        polygon: &Polygon,
        predicate: impl Fn(&Point<'_>) -> bool,
    ) -> AtlasResult<Vec<Point<'_>>> {
        let mut result = Vec::new();
        for point in self.point_candidates(&polygon.bounds())? {
            if polygon.fully_geometrically_encloses_location(&point.location()?) && predicate(&point) {
                result.push(point);
            }
        }
        Ok(result)
    }

    pub fn lines_containing(
        &self,
        location: Location,
        predicate: impl Fn(&Line<'_>) -> bool,
    ) -> AtlasResult<Vec<Line<'_>>> {
        let mut result = Vec::new();
        for line in self.line_candidates(&location.bounds())? {
            if line.as_polyline()?.contains_location(&location) && predicate(&line) {
                result.push(line);
            }
        }
        Ok(result)
    }

    pub fn lines_intersecting(
        &self,
        polygon: &Polygon,
        predicate: impl Fn(&Line<'_>) -> bool,
    ) -> AtlasResult<Vec<Line<'_>>> {
        let mut result = Vec::new();
        for line in self.line_candidates(&polygon.bounds())? {
            if polygon.overlaps_polyline(line.as_polyline()?) && predicate(&line) {
                result.push(line);
            }
        }
        Ok(result)
    }

    pub fn areas_covering(
        &self,
        location: Location,
        predicate: impl Fn(&Area<'_>) -> bool,
    ) -> AtlasResult<Vec<Area<'_>>> {
        let mut result = Vec::new();
        for area in self.area_candidates(&location.bounds())? {
            if area.as_polygon()?.fully_geometrically_encloses_location(&location) && predicate(&area) {
                result.push(area);
            }
        }
        Ok(result)
    }

    pub fn areas_intersecting(
        &self,
        polygon: &Polygon,
        predicate: impl Fn(&Area<'_>) -> bool,
    ) -> AtlasResult<Vec<Area<'_>>> {
        let mut result = Vec::new();
        for area in self.area_candidates(&polygon.bounds())? {
            if area.as_polygon()?.intersects(polygon) && predicate(&area) {
                result.push(area);
            }
        }
        Ok(result)
    }

    pub fn nodes_at(
        &self,
        location: Location,
        predicate: impl Fn(&Node<'_>) -> bool,
    ) -> AtlasResult<Vec<Node<'_>>> {
        let candidates = self.node_candidates(&location.bounds())?;
        Ok(candidates.into_iter().filter(|n| predicate(n)).collect())
    }

    pub fn nodes_within(
        &self,
        polygon: &Polygon,
        predicate: impl Fn(&Node<'_>) -> bool,
    ) -> AtlasResult<Vec<Node<'_>>> {
        let mut result = Vec::new();
        for node in self.node_candidates(&polygon.bounds())? {
            if polygon.fully_geometrically_encloses_location(&node.location()?) && predicate(&node) {
                result.push(node);
            }
        }
        Ok(result)
    }

    pub fn edges_containing(
        &self,
        location: Location,
        predicate: impl Fn(&Edge<'_>) -> bool,
    ) -> AtlasResult<Vec<Edge<'_>>> {
        let mut result = Vec::new();
        for edge in self.edge_candidates(&location.bounds())? {
            if edge.as_polyline()?.contains_location(&location) && predicate(&edge) {
                result.push(edge);
            }
        }
        Ok(result)
    }

    pub fn edges_intersecting(
        &self,
        polygon: &Polygon,
        predicate: impl Fn(&Edge<'_>) -> bool,
    ) -> AtlasResult<Vec<Edge<'_>>> {
        let mut result = Vec::new();
        for edge in self.edge_candidates(&polygon.bounds())? {
            if polygon.overlaps_polyline(edge.as_polyline()?) && predicate(&edge) {
                result.push(edge);
            }
        }
        Ok(result)
    }

    pub fn relations_with_entities_intersecting(
        &self,
        polygon: &Polygon,
        predicate: impl Fn(&Relation<'_>) -> bool,
    ) -> AtlasResult<Vec<Relation<'_>>> {
        let mut result = Vec::new();
        for relation in self.relation_candidates(&polygon.bounds())? {
            if relation.intersects(polygon)? && predicate(&relation) {
                result.push(relation);
            }
        }
        Ok(result)
    }

    // ---- index plumbing ----

    fn index_for(&self, kind: EntityKind) -> AtlasResult<&SpatialIndex> {
        match kind {
            EntityKind::Point => self.point_index.get_or_try_init(|| self.build_point_index()),
            EntityKind::Line => self.line_index.get_or_try_init(|| self.build_line_index()),
            EntityKind::Area => self.area_index.get_or_try_init(|| self.build_area_index()),
            EntityKind::Node => self.node_index.get_or_try_init(|| self.build_node_index()),
            EntityKind::Edge => self.edge_index.get_or_try_init(|| self.build_edge_index()),
            EntityKind::Relation => self
                .relation_index
                .get_or_try_init(|| self.build_relation_index()),
        }
    }

    fn build_point_index(&self) -> AtlasResult<SpatialIndex> {
        let mut entries = Vec::new();
        for point in self.points()? {
            entries.push((point.row(), point.bounds()?));
        }
        Ok(SpatialIndex::build(entries))
    }

    fn build_line_index(&self) -> AtlasResult<SpatialIndex> {
        let mut entries = Vec::new();
        for line in self.lines()? {
            entries.push((line.row(), line.bounds()?));
        }
        Ok(SpatialIndex::build(entries))
    }

    fn build_area_index(&self) -> AtlasResult<SpatialIndex> {
        let mut entries = Vec::new();
        for area in self.areas()? {
            entries.push((area.row(), area.bounds()?));
        }
        Ok(SpatialIndex::build(entries))
    }

    fn build_node_index(&self) -> AtlasResult<SpatialIndex> {
        let mut entries = Vec::new();
        for node in self.nodes()? {
            entries.push((node.row(), node.bounds()?));
        }
        Ok(SpatialIndex::build(entries))
    }

    fn build_edge_index(&self) -> AtlasResult<SpatialIndex> {
        let mut entries = Vec::new();
        for edge in self.edges()? {
            entries.push((edge.row(), edge.bounds()?));
        }
        Ok(SpatialIndex::build(entries))
    }

    fn build_relation_index(&self) -> AtlasResult<SpatialIndex> {
        let mut entries = Vec::new();
        for relation in self.relations()? {
            entries.push((relation.row(), relation.bounds()?));
        }
        Ok(SpatialIndex::build(entries))
    }

    fn point_candidates(&self, rect: &Rectangle) -> AtlasResult<Vec<Point<'_>>> {
        self.index_for(EntityKind::Point)?
            .query(rect)
            .into_iter()
            .map(|row| {
                let identifier = self.store.identifier(EntityKind::Point, row as usize)?;
                Ok(Point::new(&self.store, row, identifier))
            })
            .collect()
    }

    fn line_candidates(&self, rect: &Rectangle) -> AtlasResult<Vec<Line<'_>>> {
        self.index_for(EntityKind::Line)?
            .query(rect)
            .into_iter()
            .map(|row| {
                let identifier = self.store.identifier(EntityKind::Line, row as usize)?;
                Ok(Line::new(&self.store, row, identifier))
            })
            .collect()
    }

    fn area_candidates(&self, rect: &Rectangle) -> AtlasResult<Vec<Area<'_>>> {
        self.index_for(EntityKind::Area)?
            .query(rect)
            .into_iter()
            .map(|row| {
                let identifier = self.store.identifier(EntityKind::Area, row as usize)?;
                Ok(Area::new(&self.store, row, identifier))
            })
            .collect()
    }

    fn node_candidates(&self, rect: &Rectangle) -> AtlasResult<Vec<Node<'_>>> {
        self.index_for(EntityKind::Node)?
            .query(rect)
            .into_iter()
            .map(|row| {
                let identifier = self.store.identifier(EntityKind::Node, row as usize)?;
                Ok(Node::new(&self.store, row, identifier))
            })
            .collect()
    }

    fn edge_candidates(&self, rect: &Rectangle) -> AtlasResult<Vec<Edge<'_>>> {
        self.index_for(EntityKind::Edge)?
            .query(rect)
            .into_iter()
            .map(|row| {
                let identifier = self.store.identifier(EntityKind::Edge, row as usize)?;
                Ok(Edge::new(&self.store, row, identifier))
            })
            .collect()
    }

    fn relation_candidates(&self, rect: &Rectangle) -> AtlasResult<Vec<Relation<'_>>> {
        self.index_for(EntityKind::Relation)?
            .query(rect)
            .into_iter()
            .map(|row| {
                let identifier = self.store.identifier(EntityKind::Relation, row as usize)?;
                Ok(Relation::new(&self.store, row, identifier))
            })
            .collect()
    }
}
