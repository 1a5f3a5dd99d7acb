use std::collections::HashMap;

use crate::dictionary::StringDictionary;
use crate::error::AtlasResult;

/// Per-entity-kind packed tag store: for row `i`, `keys[i]` and `values[i]`
/// are equal-length parallel integer arrays indexing into the shared
/// [`StringDictionary`].
#[derive(Debug, Default)]
pub struct PackedTagStore {
    keys: Vec<Vec<i32>>,
    values: Vec<Vec<i32>>,
}

impl PackedTagStore {
    pub fn new(keys: Vec<Vec<i32>>, values: Vec<Vec<i32>>) -> AtlasResult<Self> {
        if keys.len() != values.len() {
            return Err(crate::error::decode_error(
                "tags",
                "array length mismatch between keys and values",
            ));
        }
        for (row, (row_keys, row_values)) in keys.iter().zip(values.iter()).enumerate() {
            if row_keys.len() != row_values.len() {
                return Err(crate::error::decode_error(
                    "tags",
                    format!("row {row}: array length mismatch"),
                ));
            }
        }
        Ok(Self { keys, values })
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Resolve row `row`'s key/value integer pairs into an unordered string
    /// map. Insertion order is not preserved.
    pub fn tags(&self, row: usize, dictionary: &StringDictionary) -> AtlasResult<HashMap<String, String>> {
        let row_keys = &self.keys[row];
        let row_values = &self.values[row];
        let mut tags = HashMap::with_capacity(row_keys.len());
        for (key_index, value_index) in row_keys.iter().zip(row_values.iter()) {
            let key = dictionary.word(*key_index as u32)?.to_string();
            let value = dictionary.word(*value_index as u32)?.to_string();
            tags.insert(key, value);
        }
        Ok(tags)
    }
}
