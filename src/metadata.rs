use std::collections::HashMap;

/// Decoded `metadata` entry: atlas-wide counts and provenance, plus a free
/// tag map untouched by the string dictionary (these are producer-level
/// metadata pairs, not entity tags).
#[derive(Debug, Clone, Default)]
pub struct AtlasMetadata {
    pub edge_number: u64,
    pub node_number: u64,
    pub area_number: u64,
    pub line_number: u64,
    pub point_number: u64,
    pub relation_number: u64,
    pub original: bool,
    pub code_version: String,
    pub data_version: String,
    pub country: String,
    pub shard_name: String,
    pub tags: HashMap<String, String>,
}
