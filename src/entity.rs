use crate::error::{AtlasError, InvalidKindValue};

/// The six flyweight entity kinds.
///
/// The numeric values are part of the wire contract: they appear as bytes in
/// the relation member-type ragged array and must be preserved exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum EntityKind {
    Node = 0,
    Edge = 1,
    Area = 2,
    Line = 3,
    Point = 4,
    Relation = 5,
}

impl EntityKind {
    pub const ALL: [EntityKind; 6] = [
        EntityKind::Node,
        EntityKind::Edge,
        EntityKind::Area,
        EntityKind::Line,
        EntityKind::Point,
        EntityKind::Relation,
    ];

    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for EntityKind {
    type Error = AtlasError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(EntityKind::Node),
            1 => Ok(EntityKind::Edge),
            2 => Ok(EntityKind::Area),
            3 => Ok(EntityKind::Line),
            4 => Ok(EntityKind::Point),
            5 => Ok(EntityKind::Relation),
            other => Err(AtlasError::InvalidKind(InvalidKindValue(other as i64))),
        }
    }
}

impl TryFrom<i64> for EntityKind {
    type Error = AtlasError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if !(0..=5).contains(&value) {
            return Err(AtlasError::InvalidKind(InvalidKindValue(value)));
        }
        EntityKind::try_from(value as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_values_are_fixed() {
        assert_eq!(EntityKind::Node.as_u8(), 0);
        assert_eq!(EntityKind::Edge.as_u8(), 1);
        assert_eq!(EntityKind::Area.as_u8(), 2);
        assert_eq!(EntityKind::Line.as_u8(), 3);
        assert_eq!(EntityKind::Point.as_u8(), 4);
        assert_eq!(EntityKind::Relation.as_u8(), 5);
    }

    #[test]
    fn try_from_round_trips() {
        for kind in EntityKind::ALL {
            assert_eq!(EntityKind::try_from(kind.as_u8()).unwrap(), kind);
        }
    }

    #[test]
    fn try_from_rejects_out_of_range() {
        assert!(matches!(
            EntityKind::try_from(6u8),
            Err(AtlasError::InvalidKind(InvalidKindValue(6)))
        ));
        assert!(matches!(
            EntityKind::try_from(-1i64),
            Err(AtlasError::InvalidKind(InvalidKindValue(-1)))
        ));
    }
}
