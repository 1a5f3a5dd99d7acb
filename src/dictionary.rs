use crate::error::{AtlasError, AtlasResult};

/// A two-way mapping from non-negative integer indices to UTF-8 strings,
/// built once per atlas from the `ProtoIntegerStringDictionary` entry's
/// parallel `indexes`/`words` arrays.
#[derive(Debug, Default)]
pub struct StringDictionary {
    words: Vec<String>,
}

impl StringDictionary {
    /// Build a dictionary from the parallel `(index, word)` arrays stored in
    /// the archive entry. Invariant: the two arrays have equal length.
    pub fn from_parallel_arrays(indexes: Vec<i32>, words: Vec<String>) -> AtlasResult<Self> {
        if indexes.len() != words.len() {
            return Err(crate::error::decode_error(
                "dictionary",
                "array length mismatch between indexes and words",
            ));
        }
        let max_index = indexes.iter().copied().max().unwrap_or(-1);
        let mut table = vec![String::new(); (max_index + 1).max(0) as usize];
        for (index, word) in indexes.into_iter().zip(words.into_iter()) {
            let index = usize::try_from(index)
                .map_err(|_| crate::error::decode_error("dictionary", "negative index"))?;
            table[index] = word;
        }
        Ok(Self { words: table })
    }

    /// Resolve an integer index to its word. Fails with `UnknownIndex` if the
    /// index is out of range.
    pub fn word(&self, index: u32) -> AtlasResult<&str> {
        self.words
            .get(index as usize)
            .map(String::as_str)
            .ok_or(AtlasError::UnknownIndex(index))
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_index() {
        let dict = StringDictionary::from_parallel_arrays(
            vec![0, 1, 2],
            vec!["highway".to_string(), "residential".to_string(), "name".to_string()],
        )
        .unwrap();
        assert_eq!(dict.word(0).unwrap(), "highway");
        assert_eq!(dict.word(2).unwrap(), "name");
    }

    #[test]
    fn unknown_index_fails() {
        let dict = StringDictionary::from_parallel_arrays(vec![0], vec!["a".to_string()]).unwrap();
        assert!(matches!(dict.word(5), Err(AtlasError::UnknownIndex(5))));
    }

    #[test]
    fn mismatched_arrays_fail() {
        let result = StringDictionary::from_parallel_arrays(vec![0, 1], vec!["only_one".to_string()]);
        assert!(result.is_err());
    }
}
