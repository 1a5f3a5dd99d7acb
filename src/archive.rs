//! The archive reader: maps named zip entries onto raw bytes, loaded on
//! demand. The file handle is held open only for the duration of each read
//! (scoped acquisition, guaranteed release) — nothing is kept resident
//! between calls.

use std::fs::File;
use std::io::Read as _;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use benchmark_rs::stopwatch::StopWatch;

use crate::entity::EntityKind;
use crate::error::{AtlasError, AtlasResult};

pub(crate) const METADATA: &str = "metadata";
pub(crate) const DICTIONARY: &str = "dictionary";

pub(crate) fn kind_prefix(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Point => "point",
        EntityKind::Line => "line",
        EntityKind::Area => "area",
        EntityKind::Node => "node",
        EntityKind::Edge => "edge",
        EntityKind::Relation => "relation",
    }
}

fn common_field_suffixes() -> [&'static str; 5] {
    [
        "identifiers",
        "identifierToArrayIndex",
        "geometry",
        "tags",
        "indexToRelationIndices",
    ]
}

/// Every recognized entry name, in the fixed enumeration order from the
/// format contract: metadata, dictionary, then each kind's common fields,
/// then each kind's extra fields.
pub(crate) fn known_fields() -> &'static [String] {
    static FIELDS: OnceLock<Vec<String>> = OnceLock::new();
    FIELDS.get_or_init(|| {
        let mut fields = vec![METADATA.to_string(), DICTIONARY.to_string()];
        for kind in EntityKind::ALL {
            let prefix = kind_prefix(kind);
            for suffix in common_field_suffixes() {
                fields.push(format!("{prefix}.{suffix}"));
            }
            for suffix in extra_field_suffixes(kind) {
                fields.push(format!("{prefix}.{suffix}"));
            }
        }
        fields
    })
}

fn extra_field_suffixes(kind: EntityKind) -> &'static [&'static str] {
    match kind {
        EntityKind::Node => &["inEdgesIndices", "outEdgesIndices"],
        EntityKind::Edge => &["startNodeIndex", "endNodeIndex"],
        EntityKind::Relation => &["memberTypes", "memberIndices", "memberRoles"],
        _ => &[],
    }
}

pub(crate) fn field_name(kind: EntityKind, suffix: &str) -> String {
    format!("{}.{}", kind_prefix(kind), suffix)
}

/// Reads named entries out of a zip-compressed archive. Verifies the file is
/// a well-formed archive at `open` time but loads nothing until asked.
pub(crate) struct ArchiveReader {
    path: PathBuf,
}

impl ArchiveReader {
    pub fn open(path: impl AsRef<Path>) -> AtlasResult<Self> {
        let path = path.as_ref().to_path_buf();
        log::debug!("ArchiveReader: opening {}", path.display());
        let mut stopwatch = StopWatch::new();
        stopwatch.start();
        let file = File::open(&path)?;
        let _archive = zip::ZipArchive::new(file)?;
        log::info!("ArchiveReader: opened {}, time: {}", path.display(), stopwatch);
        Ok(Self { path })
    }

    /// Load a named entry's raw bytes. Fails with `EntryMissing` if absent,
    /// `CorruptArchive` on any read error. Naming an entry outside the
    /// recognized set is a programming error (`UnknownField`).
    pub fn load(&self, name: &str) -> AtlasResult<Vec<u8>> {
        if !known_fields().iter().any(|f| f == name) {
            return Err(AtlasError::UnknownField(name.to_string()));
        }
        self.load_raw(name)
    }

    /// Load a named entry's raw bytes without the `known_fields` check. Used
    /// internally by column decoders, which already know the exact entry
    /// name they are asking for.
    pub(crate) fn load_raw(&self, name: &str) -> AtlasResult<Vec<u8>> {
        log::trace!("ArchiveReader: loading entry '{name}'");
        let mut stopwatch = StopWatch::new();
        stopwatch.start();
        let file = File::open(&self.path)?;
        let mut archive = zip::ZipArchive::new(file)?;
        let mut entry = archive
            .by_name(name)
            .map_err(|_| AtlasError::EntryMissing(name.to_string()))?;
        let mut bytes = Vec::with_capacity(entry.size() as usize);
        entry.read_to_end(&mut bytes)?;
        log::trace!("ArchiveReader: loaded entry '{name}', time: {}", stopwatch);
        Ok(bytes)
    }

    /// Iterate every known entry name once, forcing a read of each (used by
    /// `eager` loading and by `Atlas::load_all_fields`).
    pub fn load_all(&self) -> AtlasResult<Vec<(String, Vec<u8>)>> {
        known_fields()
            .iter()
            .map(|name| {
                let bytes = self.load_raw(name)?;
                Ok((name.clone(), bytes))
            })
            .collect()
    }
}
