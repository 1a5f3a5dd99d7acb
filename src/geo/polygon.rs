use geo::{Contains, Intersects};

use crate::error::AtlasResult;
use crate::geo::location::Location;
use crate::geo::polyline::PolyLine;
use crate::geo::rectangle::{self, Rectangle};

/// A closed ring of locations. The closing vertex (a repeat of the first) is
/// never stored; the API synthesizes it on demand via [`Polygon::closed_loop`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polygon {
    vertices: Vec<Location>,
}

impl Polygon {
    pub fn new(vertices: Vec<Location>) -> AtlasResult<Self> {
        if vertices.is_empty() {
            return Err(crate::error::AtlasError::EmptyBounds);
        }
        Ok(Self::new_unchecked(vertices))
    }

    pub(crate) fn new_unchecked(vertices: Vec<Location>) -> Self {
        Self { vertices }
    }

    /// The stored, open vertex ring (the closing vertex is not included).
    pub fn vertices(&self) -> &[Location] {
        &self.vertices
    }

    /// Iterate the ring, yielding the first vertex again at the end.
    pub fn closed_loop(&self) -> impl Iterator<Item = Location> + '_ {
        self.vertices.iter().copied().chain(self.vertices.first().copied())
    }

    pub fn bounds(&self) -> Rectangle {
        rectangle::bounds_locations(self.vertices.iter().copied())
            .expect("Polygon is never empty")
    }

    /// Strict interior containment: a boundary point returns `false`.
    pub fn fully_geometrically_encloses_location(&self, location: &Location) -> bool {
        self.as_geo_polygon().contains(&location.as_geo_coord())
    }

    /// Non-empty geometric intersection with a polyline. Touching or full
    /// containment both count as overlap.
    pub fn overlaps_polyline(&self, line: &PolyLine) -> bool {
        self.as_geo_polygon().intersects(&self.as_geo_line_string(line))
    }

    /// Non-empty geometric intersection with another polygon. One fully
    /// containing the other counts as intersecting.
    pub fn intersects(&self, other: &Polygon) -> bool {
        self.as_geo_polygon().intersects(&other.as_geo_polygon())
    }

    pub(crate) fn as_geo_polygon(&self) -> geo::Polygon<f64> {
        let coords: Vec<geo::Coord<f64>> =
            self.closed_loop().map(|location| location.as_geo_coord()).collect();
        geo::Polygon::new(geo::LineString::new(coords), vec![])
    }

    fn as_geo_line_string(&self, line: &PolyLine) -> geo::LineString<f64> {
        geo::LineString::new(
            line.locations()
                .iter()
                .map(|location| location.as_geo_coord())
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location(lat: i32, lon: i32) -> Location {
        Location::new(lat, lon).unwrap()
    }

    fn square() -> Polygon {
        Polygon::new(vec![
            location(0, 0),
            location(0, 100),
            location(100, 100),
            location(100, 0),
        ])
        .unwrap()
    }

    #[test]
    fn closed_loop_repeats_first_vertex() {
        let polygon = square();
        let loop_vertices: Vec<_> = polygon.closed_loop().collect();
        assert_eq!(loop_vertices.len(), polygon.vertices().len() + 1);
        assert_eq!(loop_vertices.first(), loop_vertices.last());
    }

    #[test]
    fn strict_interior_excludes_boundary() {
        let polygon = square();
        assert!(polygon.fully_geometrically_encloses_location(&location(50, 50)));
        assert!(!polygon.fully_geometrically_encloses_location(&location(0, 50)));
        assert!(!polygon.fully_geometrically_encloses_location(&location(0, 0)));
        assert!(!polygon.fully_geometrically_encloses_location(&location(200, 200)));
    }

    #[test]
    fn polyline_overlap_counts_touching() {
        let polygon = square();
        let touching = PolyLine::new(vec![location(0, -50), location(0, 50)]).unwrap();
        assert!(polygon.overlaps_polyline(&touching));
        let disjoint = PolyLine::new(vec![location(-50, -50), location(-10, -10)]).unwrap();
        assert!(!polygon.overlaps_polyline(&disjoint));
    }

    #[test]
    fn polygon_intersects_counts_containment() {
        let outer = square();
        let inner = Polygon::new(vec![
            location(10, 10),
            location(10, 20),
            location(20, 20),
            location(20, 10),
        ])
        .unwrap();
        assert!(outer.intersects(&inner));
        assert!(inner.intersects(&outer));
    }

    #[test]
    fn bounds_covers_vertices() {
        let polygon = square();
        let bounds = polygon.bounds();
        assert_eq!(bounds.lower_left(), location(0, 0));
        assert_eq!(bounds.upper_right(), location(100, 100));
    }
}
