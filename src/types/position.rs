use geo::HaversineDistance;
use geo_types::Point;
use serde::{Deserialize, Serialize};

/// Coordinates are stored with this many decimal places
pub const COORDINATE_DECIMALS: usize = 8;
const COORDINATE_SCALE: f64 = 100_000_000.0;

/// Where the map opens when the report has no position yet (Mumbai)
pub const DEFAULT_CENTER: LatLng = LatLng {
    lat: 19.076,
    lng: 72.8777,
};
pub const DEFAULT_ZOOM: u8 = 12;

/// A fully populated coordinate pair
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn rounded(self) -> Self {
        Self {
            lat: round_coordinate(self.lat),
            lng: round_coordinate(self.lng),
        }
    }

    /// Great-circle distance in metres
    pub fn distance_to(&self, other: &LatLng) -> f64 {
        Point::from(*self).haversine_distance(&Point::from(*other))
    }
}

// geo-types points are (x, y) = (lng, lat)
impl From<LatLng> for Point {
    fn from(value: LatLng) -> Self {
        Point::new(value.lng, value.lat)
    }
}

impl From<Point> for LatLng {
    fn from(value: Point) -> Self {
        LatLng::new(value.y(), value.x())
    }
}

/// The report location as the form holds it. Either half may be missing while
/// the user is still typing.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Position {
    pub fn blank() -> Self {
        Self::default()
    }

    pub fn point(&self) -> Option<LatLng> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Some(LatLng::new(lat, lng)),
            _ => None,
        }
    }
}

impl From<LatLng> for Position {
    fn from(value: LatLng) -> Self {
        Self {
            latitude: Some(value.lat),
            longitude: Some(value.lng),
        }
    }
}

/// Outcome of reading one coordinate text field
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CoordinateInput {
    /// Field was emptied
    Clear,
    Value(f64),
    /// Not a number, the stored value stays as it was
    Invalid,
}

pub fn round_coordinate(value: f64) -> f64 {
    (value * COORDINATE_SCALE).round() / COORDINATE_SCALE
}

pub fn parse_coordinate(text: &str) -> CoordinateInput {
    if text.is_empty() {
        return CoordinateInput::Clear;
    }
    // Scaling for the rounding overflows above ~1.8e300, so finiteness is
    // checked on the rounded value.
    match text.trim().parse::<f64>().map(round_coordinate) {
        Ok(value) if value.is_finite() => CoordinateInput::Value(value),
        _ => CoordinateInput::Invalid,
    }
}

/// Text shown in a coordinate field: fixed 8 decimals with the trailing zeros
/// (and a dangling dot) dropped.
pub fn format_coordinate(value: Option<f64>) -> String {
    let Some(value) = value else {
        return String::new();
    };
    let mut text = format!("{:.*}", COORDINATE_DECIMALS, value);
    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed);
    }
    if text == "-0" {
        text.remove(0);
    }
    text
}
