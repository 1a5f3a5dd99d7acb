use std::fmt;

/// Error taxonomy for the atlas read path.
///
/// `NotFound` is deliberately absent here: identifier lookups that miss on a
/// well-formed column return `Option::None`, not an `Err` (see the `Atlas`
/// by-identifier accessors).
#[derive(Debug, thiserror::Error)]
pub enum AtlasError {
    #[error("archive is missing required entry '{0}'")]
    EntryMissing(String),

    #[error("archive is corrupt: {0}")]
    CorruptArchive(String),

    #[error("failed to decode entry '{field}': {reason}")]
    DecodeError { field: String, reason: String },

    #[error("dictionary index {0} is not resolvable")]
    UnknownIndex(u32),

    #[error("unknown column field: {0}")]
    UnknownField(String),

    #[error("invalid entity kind value: {0}")]
    InvalidKind(InvalidKindValue),

    #[error("polyline longitude delta too large between consecutive vertices")]
    DeltaTooLarge,

    #[error("cannot compute bounds of an empty collection")]
    EmptyBounds,

    #[error("location out of range: {0}")]
    OutOfRange(String),
}

/// The raw value that failed to resolve to an [`EntityKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidKindValue(pub i64);

impl fmt::Display for InvalidKindValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<std::io::Error> for AtlasError {
    fn from(err: std::io::Error) -> Self {
        AtlasError::CorruptArchive(err.to_string())
    }
}

impl From<zip::result::ZipError> for AtlasError {
    fn from(err: zip::result::ZipError) -> Self {
        AtlasError::CorruptArchive(err.to_string())
    }
}

pub(crate) fn decode_error(field: &str, reason: impl fmt::Display) -> AtlasError {
    AtlasError::DecodeError {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

pub type AtlasResult<T> = Result<T, AtlasError>;
