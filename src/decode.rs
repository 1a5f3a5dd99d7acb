//! Decoders from raw archive-entry bytes to typed columns. Each function
//! decodes exactly one `Proto*` message (see `proto/atlas.proto`) and
//! reshapes it into the in-memory column representation.

use std::collections::HashMap;

use prost::Message;

use crate::dictionary::StringDictionary;
use crate::error::{decode_error, AtlasResult};
use crate::geo::{Location, PolyLine, Polygon};
use crate::geo::polyline::decode_vertices;
use crate::metadata::AtlasMetadata;
use crate::proto;
use crate::tags::PackedTagStore;

fn decode_message<M: Message + Default>(field: &str, bytes: &[u8]) -> AtlasResult<M> {
    M::decode(bytes).map_err(|err| decode_error(field, err))
}

pub(crate) fn metadata(field: &str, bytes: &[u8]) -> AtlasResult<AtlasMetadata> {
    let proto = decode_message::<proto::ProtoAtlasMetaData>(field, bytes)?;
    Ok(AtlasMetadata {
        edge_number: proto.edge_number,
        node_number: proto.node_number,
        area_number: proto.area_number,
        line_number: proto.line_number,
        point_number: proto.point_number,
        relation_number: proto.relation_number,
        original: proto.original,
        code_version: proto.code_version,
        data_version: proto.data_version,
        country: proto.country,
        shard_name: proto.shard_name,
        tags: proto
            .tags
            .into_iter()
            .map(|tag| (tag.key, tag.value))
            .collect(),
    })
}

pub(crate) fn dictionary(field: &str, bytes: &[u8]) -> AtlasResult<StringDictionary> {
    let proto = decode_message::<proto::ProtoIntegerStringDictionary>(field, bytes)?;
    StringDictionary::from_parallel_arrays(proto.indexes, proto.words)
}

pub(crate) fn long_array(field: &str, bytes: &[u8]) -> AtlasResult<Vec<i64>> {
    let proto = decode_message::<proto::ProtoLongArray>(field, bytes)?;
    Ok(proto.elements)
}

/// `ProtoLongToLongMap`: parallel `keys`/`values` arrays, used for
/// `identifierToArrayIndex` columns. Returns an exact id -> row-index map.
pub(crate) fn identifier_index_map(field: &str, bytes: &[u8]) -> AtlasResult<HashMap<i64, u32>> {
    let proto = decode_message::<proto::ProtoLongToLongMap>(field, bytes)?;
    let keys = proto.keys.unwrap_or_default().elements;
    let values = proto.values.unwrap_or_default().elements;
    if keys.len() != values.len() {
        return Err(decode_error(field, "array length mismatch"));
    }
    keys.into_iter()
        .zip(values)
        .map(|(id, row)| {
            let row = u32::try_from(row).map_err(|_| decode_error(field, "negative row index"))?;
            Ok((id, row))
        })
        .collect()
}

/// `ProtoLongToLongMultiMap`: flat `keys` aligned with ragged `values`, used
/// for `indexToRelationIndices`, `inEdgesIndices`, and `outEdgesIndices`.
pub(crate) fn row_multimap(field: &str, bytes: &[u8]) -> AtlasResult<HashMap<u32, Vec<u32>>> {
    let proto = decode_message::<proto::ProtoLongToLongMultiMap>(field, bytes)?;
    let keys = proto.keys.unwrap_or_default().elements;
    let value_arrays = proto.values.unwrap_or_default().arrays;
    if keys.len() != value_arrays.len() {
        return Err(decode_error(field, "array length mismatch"));
    }
    let mut map = HashMap::with_capacity(keys.len());
    for (key, values) in keys.into_iter().zip(value_arrays) {
        let key = u32::try_from(key).map_err(|_| decode_error(field, "negative row index"))?;
        let values = values
            .elements
            .into_iter()
            .map(|v| u32::try_from(v).map_err(|_| decode_error(field, "negative row index")))
            .collect::<AtlasResult<Vec<u32>>>()?;
        map.insert(key, values);
    }
    Ok(map)
}

pub(crate) fn packed_tag_store(field: &str, bytes: &[u8]) -> AtlasResult<PackedTagStore> {
    let proto = decode_message::<proto::ProtoPackedTagStore>(field, bytes)?;
    let keys = proto
        .keys
        .unwrap_or_default()
        .arrays
        .into_iter()
        .map(|a| a.elements)
        .collect();
    let values = proto
        .values
        .unwrap_or_default()
        .arrays
        .into_iter()
        .map(|a| a.elements)
        .collect();
    PackedTagStore::new(keys, values)
}

pub(crate) fn point_locations(field: &str, bytes: &[u8]) -> AtlasResult<Vec<Location>> {
    let proto = decode_message::<proto::ProtoLongArray>(field, bytes)?;
    Ok(proto
        .elements
        .into_iter()
        .map(Location::from_packed_int)
        .collect())
}

pub(crate) fn polylines(field: &str, bytes: &[u8]) -> AtlasResult<Vec<PolyLine>> {
    let proto = decode_message::<proto::ProtoPolyLineArray>(field, bytes)?;
    proto
        .encodings
        .into_iter()
        .map(|encoding| PolyLine::decode(&encoding))
        .collect()
}

pub(crate) fn polygons(field: &str, bytes: &[u8]) -> AtlasResult<Vec<Polygon>> {
    let proto = decode_message::<proto::ProtoPolygonArray>(field, bytes)?;
    proto
        .encodings
        .into_iter()
        .map(|encoding| decode_vertices(&encoding).and_then(Polygon::new))
        .collect()
}

pub(crate) fn node_edge_index(field: &str, bytes: &[u8]) -> AtlasResult<Vec<u32>> {
    let proto = decode_message::<proto::ProtoLongArray>(field, bytes)?;
    proto
        .elements
        .into_iter()
        .map(|v| u32::try_from(v).map_err(|_| decode_error(field, "negative node index")))
        .collect()
}

pub(crate) fn relation_member_types(field: &str, bytes: &[u8]) -> AtlasResult<Vec<Vec<u8>>> {
    let proto = decode_message::<proto::ProtoByteArrayOfArrays>(field, bytes)?;
    Ok(proto.arrays)
}

pub(crate) fn relation_member_indices(field: &str, bytes: &[u8]) -> AtlasResult<Vec<Vec<u32>>> {
    let proto = decode_message::<proto::ProtoLongArrayOfArrays>(field, bytes)?;
    proto
        .arrays
        .into_iter()
        .map(|array| {
            array
                .elements
                .into_iter()
                .map(|v| u32::try_from(v).map_err(|_| decode_error(field, "negative row index")))
                .collect::<AtlasResult<Vec<u32>>>()
        })
        .collect()
}

pub(crate) fn relation_member_roles(field: &str, bytes: &[u8]) -> AtlasResult<Vec<Vec<i32>>> {
    let proto = decode_message::<proto::ProtoIntegerArrayOfArrays>(field, bytes)?;
    Ok(proto.arrays.into_iter().map(|a| a.elements).collect())
}
