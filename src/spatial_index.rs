//! Per-kind spatial index over row bounds, built once and never mutated.
//! Envelopes are kept in raw `dm7` integer coordinates rather than floats —
//! bulk-loading from exact integers avoids introducing floating-point jitter
//! into what is otherwise an exact-comparison predicate boundary.

use rstar::{RTree, RTreeObject, AABB};

use crate::geo::Rectangle;

#[derive(Debug, Clone, Copy)]
struct IndexedRow {
    row: u32,
    lower: [i32; 2],
    upper: [i32; 2],
}

impl RTreeObject for IndexedRow {
    type Envelope = AABB<[i32; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.lower, self.upper)
    }
}

/// A bulk-loaded R-tree over one entity kind's row bounds. Built once, from
/// every row's bounds at construction time; immutable afterwards.
pub(crate) struct SpatialIndex {
    tree: RTree<IndexedRow>,
}

impl SpatialIndex {
    pub fn build(bounds: impl IntoIterator<Item = (u32, Rectangle)>) -> Self {
        let entries: Vec<IndexedRow> = bounds
            .into_iter()
            .map(|(row, rect)| IndexedRow {
                row,
                lower: [rect.lower_left().longitude(), rect.lower_left().latitude()],
                upper: [rect.upper_right().longitude(), rect.upper_right().latitude()],
            })
            .collect();
        Self {
            tree: RTree::bulk_load(entries),
        }
    }

    /// Row indices whose stored bounds intersect `query`. A coarse prune:
    /// callers still apply the exact geometric predicate afterwards.
    pub fn query(&self, query: &Rectangle) -> Vec<u32> {
        let envelope = AABB::from_corners(
            [query.lower_left().longitude(), query.lower_left().latitude()],
            [query.upper_right().longitude(), query.upper_right().latitude()],
        );
        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .map(|entry| entry.row)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Location;

    fn rect(lat1: i32, lon1: i32, lat2: i32, lon2: i32) -> Rectangle {
        Rectangle::new(Location::new(lat1, lon1).unwrap(), Location::new(lat2, lon2).unwrap()).unwrap()
    }

    #[test]
    fn finds_intersecting_rows() {
        let index = SpatialIndex::build([
            (0, rect(0, 0, 10, 10)),
            (1, rect(100, 100, 110, 110)),
            (2, rect(5, 5, 15, 15)),
        ]);
        let mut hits = index.query(&rect(0, 0, 10, 10));
        hits.sort();
        assert_eq!(hits, vec![0, 2]);
    }

    #[test]
    fn empty_index_returns_no_hits() {
        let index = SpatialIndex::build(std::iter::empty());
        assert!(index.query(&rect(0, 0, 1, 1)).is_empty());
    }
}
