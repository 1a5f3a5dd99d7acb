use crate::error::{AtlasError, AtlasResult};
use crate::geo::rectangle::Rectangle;

/// `dm7` units per degree: a signed fixed-point representation with
/// 10^7 units per degree of latitude/longitude.
pub const DM7_PER_DEGREE: f64 = 10_000_000.0;

const MIN_LATITUDE: i32 = -900_000_000;
const MAX_LATITUDE: i32 = 900_000_000;
const MIN_LONGITUDE: i32 = -1_800_000_000;
const MAX_LONGITUDE: i32 = 1_799_999_999;

/// A latitude/longitude location in `dm7` fixed-point units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location {
    latitude: i32,
    longitude: i32,
}

impl Location {
    pub fn new(latitude: i32, longitude: i32) -> AtlasResult<Self> {
        if !(MIN_LATITUDE..=MAX_LATITUDE).contains(&latitude) {
            return Err(AtlasError::OutOfRange(format!(
                "latitude {latitude} outside [{MIN_LATITUDE}, {MAX_LATITUDE}]"
            )));
        }
        if !(MIN_LONGITUDE..=MAX_LONGITUDE).contains(&longitude) {
            return Err(AtlasError::OutOfRange(format!(
                "longitude {longitude} outside [{MIN_LONGITUDE}, {MAX_LONGITUDE}]"
            )));
        }
        Ok(Self { latitude, longitude })
    }

    /// Construct without range validation. Used internally by the polyline
    /// decoder, which trusts the upstream producer's encoding.
    pub(crate) fn new_unchecked(latitude: i32, longitude: i32) -> Self {
        Self { latitude, longitude }
    }

    pub fn latitude(&self) -> i32 {
        self.latitude
    }

    pub fn longitude(&self) -> i32 {
        self.longitude
    }

    pub fn latitude_degrees(&self) -> f64 {
        self.latitude as f64 / DM7_PER_DEGREE
    }

    pub fn longitude_degrees(&self) -> f64 {
        self.longitude as f64 / DM7_PER_DEGREE
    }

    /// Pack into a single 64-bit value: latitude in the upper 32 bits,
    /// longitude in the lower 32 bits, both sign-extended on unpack.
    pub fn as_packed_int(&self) -> i64 {
        ((self.latitude as i64) << 32) | (self.longitude as u32 as i64)
    }

    pub fn from_packed_int(packed: i64) -> Self {
        let longitude = packed as i32;
        let latitude = (packed >> 32) as i32;
        Self { latitude, longitude }
    }

    /// A degenerate rectangle of zero extent at this point.
    pub fn bounds(&self) -> Rectangle {
        Rectangle::new_unchecked(*self, *self)
    }

    pub(crate) fn as_geo_coord(&self) -> geo::Coord<f64> {
        geo::Coord {
            x: self.longitude_degrees(),
            y: self.latitude_degrees(),
        }
    }
}
