use crate::error::{AtlasError, AtlasResult};
use crate::geo::location::Location;
use crate::geo::polygon::Polygon;

/// An axis-aligned, non-wrapping bounding rectangle, represented as a closed
/// four-vertex [`Polygon`] for geometric predicate purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rectangle {
    lower_left: Location,
    upper_right: Location,
}

impl Rectangle {
    pub fn new(lower_left: Location, upper_right: Location) -> AtlasResult<Self> {
        if lower_left.longitude() > upper_right.longitude() {
            return Err(AtlasError::OutOfRange(
                "rectangle must not cross longitude -180 (non-wrapping)".to_string(),
            ));
        }
        Ok(Self::new_unchecked(lower_left, upper_right))
    }

    pub(crate) fn new_unchecked(lower_left: Location, upper_right: Location) -> Self {
        Self {
            lower_left,
            upper_right,
        }
    }

    pub fn lower_left(&self) -> Location {
        self.lower_left
    }

    pub fn upper_right(&self) -> Location {
        self.upper_right
    }

    pub fn intersects(&self, other: &Rectangle) -> bool {
        self.lower_left.longitude() <= other.upper_right.longitude()
            && other.lower_left.longitude() <= self.upper_right.longitude()
            && self.lower_left.latitude() <= other.upper_right.latitude()
            && other.lower_left.latitude() <= self.upper_right.latitude()
    }

    /// The four corners of this rectangle as a closed polygon, vertices
    /// ordered counter-clockwise starting at the lower-left corner.
    pub fn as_polygon(&self) -> Polygon {
        let top_left =
            Location::new_unchecked(self.upper_right.latitude(), self.lower_left.longitude());
        let bottom_right =
            Location::new_unchecked(self.lower_left.latitude(), self.upper_right.longitude());
        Polygon::new_unchecked(vec![
            self.lower_left,
            bottom_right,
            self.upper_right,
            top_left,
        ])
    }

    pub(crate) fn as_geo_rect(&self) -> geo::Rect<f64> {
        geo::Rect::new(self.lower_left.as_geo_coord(), self.upper_right.as_geo_coord())
    }
}

/// The smallest axis-aligned rectangle containing every location in `iter`.
/// Fails with `EmptyBounds` if `iter` yields nothing.
pub fn bounds_locations(iter: impl IntoIterator<Item = Location>) -> AtlasResult<Rectangle> {
    let mut iter = iter.into_iter();
    let first = iter.next().ok_or(AtlasError::EmptyBounds)?;
    let (mut min_lat, mut min_lon) = (first.latitude(), first.longitude());
    let (mut max_lat, mut max_lon) = (first.latitude(), first.longitude());
    for location in iter {
        min_lat = min_lat.min(location.latitude());
        min_lon = min_lon.min(location.longitude());
        max_lat = max_lat.max(location.latitude());
        max_lon = max_lon.max(location.longitude());
    }
    Ok(Rectangle::new_unchecked(
        Location::new_unchecked(min_lat, min_lon),
        Location::new_unchecked(max_lat, max_lon),
    ))
}

/// Anything with a bounding rectangle — implemented by every entity
/// flyweight. Fallible because an entity's extent may live in a lazily
/// loaded column that has not been read yet.
pub trait Bounded {
    fn bounds(&self) -> AtlasResult<Rectangle>;
}

/// The smallest axis-aligned rectangle covering every entity's bounds in
/// `iter`. Fails with `EmptyBounds` if `iter` yields nothing, or with the
/// first entity whose own bounds computation fails.
pub fn bounds_atlasentities<T: Bounded>(iter: impl IntoIterator<Item = T>) -> AtlasResult<Rectangle> {
    let rects = iter
        .into_iter()
        .map(|item| item.bounds())
        .collect::<AtlasResult<Vec<_>>>()?;
    bounds_rectangles(rects)
}

/// The smallest axis-aligned rectangle covering every entity's bounds in
/// `iter`. Fails with `EmptyBounds` if `iter` yields nothing.
pub fn bounds_rectangles(iter: impl IntoIterator<Item = Rectangle>) -> AtlasResult<Rectangle> {
    let mut iter = iter.into_iter();
    let first = iter.next().ok_or(AtlasError::EmptyBounds)?;
    let mut acc = first;
    for rect in iter {
        acc = Rectangle::new_unchecked(
            Location::new_unchecked(
                acc.lower_left.latitude().min(rect.lower_left.latitude()),
                acc.lower_left.longitude().min(rect.lower_left.longitude()),
            ),
            Location::new_unchecked(
                acc.upper_right.latitude().max(rect.upper_right.latitude()),
                acc.upper_right.longitude().max(rect.upper_right.longitude()),
            ),
        );
    }
    Ok(acc)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location(lat: i32, lon: i32) -> Location {
        Location::new(lat, lon).unwrap()
    }

    #[test]
    fn intersects_is_inclusive_of_touching_edges() {
        let a = Rectangle::new(location(0, 0), location(10, 10)).unwrap();
        let b = Rectangle::new(location(10, 10), location(20, 20)).unwrap();
        assert!(a.intersects(&b));
    }

    #[test]
    fn rejects_antimeridian_crossing() {
        assert!(Rectangle::new(location(0, 10), location(10, 0)).is_err());
    }

    #[test]
    fn bounds_locations_empty_fails() {
        assert!(matches!(
            bounds_locations(std::iter::empty()),
            Err(AtlasError::EmptyBounds)
        ));
    }

    #[test]
    fn bounds_locations_computes_envelope() {
        let rect = bounds_locations([location(1, 1), location(-3, 8), location(5, -2)]).unwrap();
        assert_eq!(rect.lower_left(), location(-3, -2));
        assert_eq!(rect.upper_right(), location(5, 8));
    }

    #[test]
    fn bounds_rectangles_unions() {
        let a = Rectangle::new(location(0, 0), location(1, 1)).unwrap();
        let b = Rectangle::new(location(5, 5), location(6, 6)).unwrap();
        let union = bounds_rectangles([a, b]).unwrap();
        assert_eq!(union.lower_left(), location(0, 0));
        assert_eq!(union.upper_right(), location(6, 6));
    }

    struct Probe(Option<Rectangle>);

    impl Bounded for Probe {
        fn bounds(&self) -> AtlasResult<Rectangle> {
            self.0.ok_or(AtlasError::EmptyBounds)
        }
    }

    #[test]
    fn bounds_atlasentities_unions_entity_bounds() {
        let a = Probe(Some(Rectangle::new(location(0, 0), location(1, 1)).unwrap()));
        let b = Probe(Some(Rectangle::new(location(5, 5), location(6, 6)).unwrap()));
        let union = bounds_atlasentities([a, b]).unwrap();
        assert_eq!(union.lower_left(), location(0, 0));
        assert_eq!(union.upper_right(), location(6, 6));
    }

    #[test]
    fn bounds_atlasentities_propagates_a_failed_entity() {
        let a = Probe(Some(Rectangle::new(location(0, 0), location(1, 1)).unwrap()));
        let b = Probe(None);
        assert!(matches!(
            bounds_atlasentities([a, b]),
            Err(AtlasError::EmptyBounds)
        ));
    }

    #[test]
    fn bounds_atlasentities_empty_fails() {
        assert!(matches!(
            bounds_atlasentities(std::iter::empty::<Probe>()),
            Err(AtlasError::EmptyBounds)
        ));
    }
}
