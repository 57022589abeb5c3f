use serde::{Deserialize, Serialize};

/// Represents a single track point with longitude and latitude.
///
/// The `Coordinate` struct stores a point on Earth in decimal degrees.
/// Latitude values range from -90.0 to 90.0, and longitude values range
/// from -180.0 to 180.0. The field order follows the map convention
/// (longitude first), which is also the order the rendering surface expects.
///
/// # Example
///
/// ```rust
/// use common::position::Coordinate;
///
/// let point = Coordinate::new(151.2093, -33.8688);
/// assert!(point.is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub longitude: f64,
    pub latitude: f64,
}

impl Coordinate {
    /// Creates a new [`Coordinate`] from a longitude and a latitude in decimal degrees.
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Coordinate {
            longitude,
            latitude,
        }
    }

    /// Returns `true` when both values are finite and inside the WGS84 value range.
    pub fn is_valid(&self) -> bool {
        self.longitude.is_finite()
            && self.latitude.is_finite()
            && (-180.0..=180.0).contains(&self.longitude)
            && (-90.0..=90.0).contains(&self.latitude)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((longitude, latitude): (f64, f64)) -> Self {
        Coordinate::new(longitude, latitude)
    }
}
