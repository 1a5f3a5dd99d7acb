//! Variable-length delta encoding of `Location` sequences.
//!
//! This follows the MapQuest-style compressed lat/lon encoding used by the
//! upstream producer: each vertex is two signed varints (delta-latitude then
//! delta-longitude), ZigZag-encoded by bitwise complement rather than the
//! usual `(n << 1) ^ (n >> 63)` shift, and chunked into 5 payload bits per
//! byte with a continuation bit. Because `dm7` is already a 7-decimal fixed
//! point representation, the codec operates on raw `dm7` deltas directly —
//! no float round-trip, so `decode(encode(p)) == p` exactly.

use crate::error::{AtlasError, AtlasResult};
use crate::geo::location::Location;
use crate::geo::rectangle::{self, Rectangle};

const ENCODING_OFFSET: i64 = 63;
const FIVE_BIT_MASK: u64 = 0x1f;
const SIXTH_BIT_MASK: u64 = 0x20;
const BIT_SHIFT: u32 = 5;
const MAXIMUM_DELTA_LONGITUDE: i64 = 180 * 10_000_000;

/// An ordered sequence of locations. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolyLine {
    locations: Vec<Location>,
}

impl PolyLine {
    pub fn new(locations: Vec<Location>) -> AtlasResult<Self> {
        if locations.is_empty() {
            return Err(AtlasError::EmptyBounds);
        }
        Ok(Self { locations })
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn bounds(&self) -> Rectangle {
        rectangle::bounds_locations(self.locations.iter().copied())
            .expect("PolyLine is never empty")
    }

    pub fn encode(&self) -> AtlasResult<Vec<u8>> {
        let mut out = Vec::new();
        let mut previous_lat: i64 = 0;
        let mut previous_lon: i64 = 0;
        for location in &self.locations {
            let lat = location.latitude() as i64;
            let lon = location.longitude() as i64;
            encode_number(lat - previous_lat, &mut out);
            let delta_lon = lon - previous_lon;
            if delta_lon.abs() > MAXIMUM_DELTA_LONGITUDE {
                return Err(AtlasError::DeltaTooLarge);
            }
            encode_number(delta_lon, &mut out);
            previous_lat = lat;
            previous_lon = lon;
        }
        Ok(out)
    }

    pub fn decode(bytes: &[u8]) -> AtlasResult<Self> {
        let locations = decode_vertices(bytes)?;
        PolyLine::new(locations)
    }

    /// True iff `location` lies on this polyline — at a vertex or strictly
    /// between two consecutive vertices. Tested with exact integer
    /// arithmetic on the underlying `dm7` coordinates, so a point on a
    /// segment's interior is never missed the way a zero-area polygon
    /// intersection test would miss it.
    pub fn contains_location(&self, location: &Location) -> bool {
        if self.locations.len() == 1 {
            return self.locations[0] == *location;
        }
        self.locations
            .windows(2)
            .any(|pair| segment_contains(pair[0], pair[1], *location))
    }
}

/// True iff `p` is collinear with the segment `a`-`b` and falls within its
/// span, checked with exact integer arithmetic (no float tolerance).
fn segment_contains(a: Location, b: Location, p: Location) -> bool {
    let (ax, ay) = (a.longitude() as i64, a.latitude() as i64);
    let (bx, by) = (b.longitude() as i64, b.latitude() as i64);
    let (px, py) = (p.longitude() as i64, p.latitude() as i64);

    let cross = (bx - ax) * (py - ay) - (by - ay) * (px - ax);
    if cross != 0 {
        return false;
    }
    let dot = (px - ax) * (bx - ax) + (py - ay) * (by - ay);
    if dot < 0 {
        return false;
    }
    let squared_length = (bx - ax) * (bx - ax) + (by - ay) * (by - ay);
    dot <= squared_length
}

/// Decode a vertex list without requiring it be non-empty — used by
/// `Polygon`, whose closing vertex is never stored.
pub(crate) fn decode_vertices(bytes: &[u8]) -> AtlasResult<Vec<Location>> {
    let mut index = 0usize;
    let mut latitude: i64 = 0;
    let mut longitude: i64 = 0;
    let mut locations = Vec::new();

    while index < bytes.len() {
        let delta_lat = decode_number(bytes, &mut index)?;
        latitude += delta_lat;
        let delta_lon = decode_number(bytes, &mut index)?;
        longitude += delta_lon;
        locations.push(Location::new_unchecked(latitude as i32, longitude as i32));
    }
    Ok(locations)
}

fn encode_number(delta: i64, out: &mut Vec<u8>) {
    let mut value: u64 = if delta >= 0 {
        (delta as u64) << 1
    } else {
        (((-delta) as u64) << 1).wrapping_sub(1)
    };
    while value >= SIXTH_BIT_MASK {
        let byte = (SIXTH_BIT_MASK | (value & FIVE_BIT_MASK)) as i64 + ENCODING_OFFSET;
        out.push(byte as u8);
        value >>= BIT_SHIFT;
    }
    out.push((value as i64 + ENCODING_OFFSET) as u8);
}

fn decode_number(bytes: &[u8], index: &mut usize) -> AtlasResult<i64> {
    let mut shift = 0u32;
    let mut result: u64 = 0;
    loop {
        let byte = *bytes
            .get(*index)
            .ok_or_else(|| crate::error::decode_error("polyline", "truncated varint"))?;
        let byte_encoded = byte as i64 - ENCODING_OFFSET;
        result |= ((byte_encoded as u64) & FIVE_BIT_MASK) << shift;
        shift += BIT_SHIFT;
        *index += 1;
        if (byte_encoded as u64) < SIXTH_BIT_MASK {
            break;
        }
    }
    if result & 1 != 0 {
        Ok(-((result >> 1) as i64) - 1)
    } else {
        Ok((result >> 1) as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location(lat: i32, lon: i32) -> Location {
        Location::new(lat, lon).unwrap()
    }

    #[test]
    fn round_trips_reference_polyline() {
        let polyline = PolyLine::new(vec![
            location(382_117_269, -1_193_153_616),
            location(382_117_927, -1_193_152_951),
            location(382_116_912, -1_193_151_049),
        ])
        .unwrap();
        let encoded = polyline.encode().unwrap();
        let decoded = PolyLine::decode(&encoded).unwrap();
        assert_eq!(decoded, polyline);
    }

    #[test]
    fn round_trips_single_vertex() {
        let polyline = PolyLine::new(vec![location(0, 0)]).unwrap();
        let decoded = PolyLine::decode(&polyline.encode().unwrap()).unwrap();
        assert_eq!(decoded, polyline);
    }

    #[test]
    fn round_trips_negative_deltas() {
        let polyline = PolyLine::new(vec![
            location(10, 10),
            location(-20, -30),
            location(5, -5),
        ])
        .unwrap();
        let decoded = PolyLine::decode(&polyline.encode().unwrap()).unwrap();
        assert_eq!(decoded, polyline);
    }

    #[test]
    fn rejects_empty_location_list() {
        assert!(PolyLine::new(vec![]).is_err());
    }

    #[test]
    fn rejects_too_large_longitude_delta() {
        let polyline = PolyLine::new(vec![
            location(0, -1_799_999_999),
            location(0, 1_799_999_999),
        ])
        .unwrap();
        assert!(matches!(polyline.encode(), Err(AtlasError::DeltaTooLarge)));
    }

    #[test]
    fn bounds_covers_all_vertices() {
        let polyline = PolyLine::new(vec![location(0, 0), location(10, 20), location(-5, 3)])
            .unwrap();
        let bounds = polyline.bounds();
        assert_eq!(bounds.lower_left(), location(-5, 0));
        assert_eq!(bounds.upper_right(), location(10, 20));
    }

    #[test]
    fn contains_location_matches_a_vertex() {
        let polyline = PolyLine::new(vec![location(0, 0), location(0, 100)]).unwrap();
        assert!(polyline.contains_location(&location(0, 0)));
        assert!(polyline.contains_location(&location(0, 100)));
    }

    #[test]
    fn contains_location_matches_a_mid_segment_point() {
        let polyline = PolyLine::new(vec![location(0, 0), location(0, 100)]).unwrap();
        assert!(polyline.contains_location(&location(0, 50)));
    }

    #[test]
    fn contains_location_rejects_a_point_off_the_segment() {
        let polyline = PolyLine::new(vec![location(0, 0), location(0, 100)]).unwrap();
        assert!(!polyline.contains_location(&location(1, 50)));
    }

    #[test]
    fn contains_location_rejects_a_collinear_point_past_the_segment_end() {
        let polyline = PolyLine::new(vec![location(0, 0), location(0, 100)]).unwrap();
        assert!(!polyline.contains_location(&location(0, 150)));
    }

    #[test]
    fn contains_location_single_vertex_matches_only_that_point() {
        let polyline = PolyLine::new(vec![location(10, 10)]).unwrap();
        assert!(polyline.contains_location(&location(10, 10)));
        assert!(!polyline.contains_location(&location(10, 11)));
    }
}
