//! Lazily-materialized column storage, one struct per entity kind. Every
//! column is a `OnceCell` filled on first access from a single archive
//! read; once filled, it is immutable for the lifetime of the store.

use std::collections::HashMap;

use once_cell::unsync::OnceCell;

use crate::archive::{self, ArchiveReader};
use crate::decode;
use crate::dictionary::StringDictionary;
use crate::entity::EntityKind;
use crate::error::AtlasResult;
use crate::geo::{Location, PolyLine, Polygon};
use crate::metadata::AtlasMetadata;
use crate::tags::PackedTagStore;

/// Columns every entity kind carries: identifiers, the identifier -> row
/// index map, tags, and the reverse relation-membership index.
#[derive(Default)]
pub(crate) struct SimpleColumns {
    identifiers: OnceCell<Vec<i64>>,
    identifier_to_index: OnceCell<HashMap<i64, u32>>,
    tags: OnceCell<PackedTagStore>,
    index_to_relations: OnceCell<HashMap<u32, Vec<u32>>>,
}

impl SimpleColumns {
    fn identifiers(&self, archive: &ArchiveReader, kind: EntityKind) -> AtlasResult<&[i64]> {
        self.identifiers
            .get_or_try_init(|| {
                let field = archive::field_name(kind, "identifiers");
                decode::long_array(&field, &archive.load_raw(&field)?)
            })
            .map(Vec::as_slice)
    }

    fn identifier_to_index(
        &self,
        archive: &ArchiveReader,
        kind: EntityKind,
    ) -> AtlasResult<&HashMap<i64, u32>> {
        self.identifier_to_index.get_or_try_init(|| {
            let field = archive::field_name(kind, "identifierToArrayIndex");
            decode::identifier_index_map(&field, &archive.load_raw(&field)?)
        })
    }

    fn tags(&self, archive: &ArchiveReader, kind: EntityKind) -> AtlasResult<&PackedTagStore> {
        self.tags.get_or_try_init(|| {
            let field = archive::field_name(kind, "tags");
            decode::packed_tag_store(&field, &archive.load_raw(&field)?)
        })
    }

    fn index_to_relations(
        &self,
        archive: &ArchiveReader,
        kind: EntityKind,
    ) -> AtlasResult<&HashMap<u32, Vec<u32>>> {
        self.index_to_relations.get_or_try_init(|| {
            let field = archive::field_name(kind, "indexToRelationIndices");
            decode::row_multimap(&field, &archive.load_raw(&field)?)
        })
    }

    fn force(&self, archive: &ArchiveReader, kind: EntityKind) -> AtlasResult<()> {
        self.identifiers(archive, kind)?;
        self.identifier_to_index(archive, kind)?;
        self.tags(archive, kind)?;
        self.index_to_relations(archive, kind)?;
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct PointColumns {
    common: SimpleColumns,
    locations: OnceCell<Vec<Location>>,
}

#[derive(Default)]
pub(crate) struct LineColumns {
    common: SimpleColumns,
    polylines: OnceCell<Vec<PolyLine>>,
}

#[derive(Default)]
pub(crate) struct AreaColumns {
    common: SimpleColumns,
    polygons: OnceCell<Vec<Polygon>>,
}

#[derive(Default)]
pub(crate) struct NodeColumns {
    common: SimpleColumns,
    locations: OnceCell<Vec<Location>>,
    in_edges: OnceCell<HashMap<u32, Vec<u32>>>,
    out_edges: OnceCell<HashMap<u32, Vec<u32>>>,
}

#[derive(Default)]
pub(crate) struct EdgeColumns {
    common: SimpleColumns,
    polylines: OnceCell<Vec<PolyLine>>,
    start_node: OnceCell<Vec<u32>>,
    end_node: OnceCell<Vec<u32>>,
}

#[derive(Default)]
pub(crate) struct RelationColumns {
    common: SimpleColumns,
    member_types: OnceCell<Vec<Vec<u8>>>,
    member_indices: OnceCell<Vec<Vec<u32>>>,
    member_roles: OnceCell<Vec<Vec<i32>>>,
}

/// Owns the archive and every per-kind column set. Nothing is read from disk
/// until a column is first asked for.
pub(crate) struct AtlasStore {
    archive: ArchiveReader,
    metadata: OnceCell<AtlasMetadata>,
    dictionary: OnceCell<StringDictionary>,
    points: PointColumns,
    lines: LineColumns,
    areas: AreaColumns,
    nodes: NodeColumns,
    edges: EdgeColumns,
    relations: RelationColumns,
}

impl AtlasStore {
    pub fn new(archive: ArchiveReader) -> Self {
        Self {
            archive,
            metadata: OnceCell::new(),
            dictionary: OnceCell::new(),
            points: PointColumns::default(),
            lines: LineColumns::default(),
            areas: AreaColumns::default(),
            nodes: NodeColumns::default(),
            edges: EdgeColumns::default(),
            relations: RelationColumns::default(),
        }
    }

    pub fn metadata(&self) -> AtlasResult<&AtlasMetadata> {
        self.metadata
            .get_or_try_init(|| decode::metadata(archive::METADATA, &self.archive.load_raw(archive::METADATA)?))
    }

    pub fn dictionary(&self) -> AtlasResult<&StringDictionary> {
        self.dictionary.get_or_try_init(|| {
            decode::dictionary(archive::DICTIONARY, &self.archive.load_raw(archive::DICTIONARY)?)
        })
    }

    pub fn identifiers(&self, kind: EntityKind) -> AtlasResult<&[i64]> {
        self.common(kind).identifiers(&self.archive, kind)
    }

    pub fn identifier_to_index(&self, kind: EntityKind) -> AtlasResult<&HashMap<i64, u32>> {
        self.common(kind).identifier_to_index(&self.archive, kind)
    }

    pub fn row_of(&self, kind: EntityKind, identifier: i64) -> AtlasResult<Option<u32>> {
        Ok(self.identifier_to_index(kind)?.get(&identifier).copied())
    }

    pub fn len(&self, kind: EntityKind) -> AtlasResult<usize> {
        Ok(self.identifiers(kind)?.len())
    }

    pub fn identifier(&self, kind: EntityKind, row: usize) -> AtlasResult<i64> {
        Ok(self.identifiers(kind)?[row])
    }

    pub fn tags(&self, kind: EntityKind, row: usize) -> AtlasResult<HashMap<String, String>> {
        let store = self.common(kind).tags(&self.archive, kind)?;
        store.tags(row, self.dictionary()?)
    }

    pub fn relations_of(&self, kind: EntityKind, row: u32) -> AtlasResult<&[u32]> {
        Ok(self
            .common(kind)
            .index_to_relations(&self.archive, kind)?
            .get(&row)
            .map(Vec::as_slice)
            .unwrap_or(&[]))
    }

    fn common(&self, kind: EntityKind) -> &SimpleColumns {
        match kind {
            EntityKind::Point => &self.points.common,
            EntityKind::Line => &self.lines.common,
            EntityKind::Area => &self.areas.common,
            EntityKind::Node => &self.nodes.common,
            EntityKind::Edge => &self.edges.common,
            EntityKind::Relation => &self.relations.common,
        }
    }

    pub fn point_location(&self, row: usize) -> AtlasResult<Location> {
        let field = archive::field_name(EntityKind::Point, "geometry");
        let locations = self.points.locations.get_or_try_init(|| {
            decode::point_locations(&field, &self.archive.load_raw(&field)?)
        })?;
        Ok(locations[row])
    }

    pub fn node_location(&self, row: usize) -> AtlasResult<Location> {
        let field = archive::field_name(EntityKind::Node, "geometry");
        let locations = self.nodes.locations.get_or_try_init(|| {
            decode::point_locations(&field, &self.archive.load_raw(&field)?)
        })?;
        Ok(locations[row])
    }

    pub fn line_polyline(&self, row: usize) -> AtlasResult<&PolyLine> {
        let field = archive::field_name(EntityKind::Line, "geometry");
        let polylines = self.lines.polylines.get_or_try_init(|| {
            decode::polylines(&field, &self.archive.load_raw(&field)?)
        })?;
        Ok(&polylines[row])
    }

    pub fn edge_polyline(&self, row: usize) -> AtlasResult<&PolyLine> {
        let field = archive::field_name(EntityKind::Edge, "geometry");
        let polylines = self.edges.polylines.get_or_try_init(|| {
            decode::polylines(&field, &self.archive.load_raw(&field)?)
        })?;
        Ok(&polylines[row])
    }

    pub fn area_polygon(&self, row: usize) -> AtlasResult<&Polygon> {
        let field = archive::field_name(EntityKind::Area, "geometry");
        let polygons = self.areas.polygons.get_or_try_init(|| {
            decode::polygons(&field, &self.archive.load_raw(&field)?)
        })?;
        Ok(&polygons[row])
    }

    pub fn node_in_edges(&self, row: u32) -> AtlasResult<&[u32]> {
        let field = archive::field_name(EntityKind::Node, "inEdgesIndices");
        let map = self.nodes.in_edges.get_or_try_init(|| {
            decode::row_multimap(&field, &self.archive.load_raw(&field)?)
        })?;
        Ok(map.get(&row).map(Vec::as_slice).unwrap_or(&[]))
    }

    pub fn node_out_edges(&self, row: u32) -> AtlasResult<&[u32]> {
        let field = archive::field_name(EntityKind::Node, "outEdgesIndices");
        let map = self.nodes.out_edges.get_or_try_init(|| {
            decode::row_multimap(&field, &self.archive.load_raw(&field)?)
        })?;
        Ok(map.get(&row).map(Vec::as_slice).unwrap_or(&[]))
    }

    pub fn edge_start_node(&self, row: usize) -> AtlasResult<u32> {
        let field = archive::field_name(EntityKind::Edge, "startNodeIndex");
        let rows = self.edges.start_node.get_or_try_init(|| {
            decode::node_edge_index(&field, &self.archive.load_raw(&field)?)
        })?;
        Ok(rows[row])
    }

    pub fn edge_end_node(&self, row: usize) -> AtlasResult<u32> {
        let field = archive::field_name(EntityKind::Edge, "endNodeIndex");
        let rows = self.edges.end_node.get_or_try_init(|| {
            decode::node_edge_index(&field, &self.archive.load_raw(&field)?)
        })?;
        Ok(rows[row])
    }

    pub fn relation_member_types(&self, row: usize) -> AtlasResult<&[u8]> {
        let field = archive::field_name(EntityKind::Relation, "memberTypes");
        let rows = self.relations.member_types.get_or_try_init(|| {
            decode::relation_member_types(&field, &self.archive.load_raw(&field)?)
        })?;
        Ok(&rows[row])
    }

    pub fn relation_member_indices(&self, row: usize) -> AtlasResult<&[u32]> {
        let field = archive::field_name(EntityKind::Relation, "memberIndices");
        let rows = self.relations.member_indices.get_or_try_init(|| {
            decode::relation_member_indices(&field, &self.archive.load_raw(&field)?)
        })?;
        Ok(&rows[row])
    }

    pub fn relation_member_roles(&self, row: usize) -> AtlasResult<&[i32]> {
        let field = archive::field_name(EntityKind::Relation, "memberRoles");
        let rows = self.relations.member_roles.get_or_try_init(|| {
            decode::relation_member_roles(&field, &self.archive.load_raw(&field)?)
        })?;
        Ok(&rows[row])
    }

    /// Force every known column to materialize, for `LoadOption::Eager`.
    pub fn load_all(&self) -> AtlasResult<()> {
        self.metadata()?;
        self.dictionary()?;
        for kind in EntityKind::ALL {
            self.common(kind).force(&self.archive, kind)?;
            let len = self.len(kind)?;
            for row in 0..len {
                match kind {
                    EntityKind::Point => {
                        self.point_location(row)?;
                    }
                    EntityKind::Line => {
                        self.line_polyline(row)?;
                    }
                    EntityKind::Area => {
                        self.area_polygon(row)?;
                    }
                    EntityKind::Node => {
                        self.node_location(row)?;
                        self.node_in_edges(row as u32)?;
                        self.node_out_edges(row as u32)?;
                    }
                    EntityKind::Edge => {
                        self.edge_polyline(row)?;
                        self.edge_start_node(row)?;
                        self.edge_end_node(row)?;
                    }
                    EntityKind::Relation => {
                        self.relation_member_types(row)?;
                        self.relation_member_indices(row)?;
                        self.relation_member_roles(row)?;
                    }
                }
            }
        }
        Ok(())
    }
}
