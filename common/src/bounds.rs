use crate::position::Coordinate;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box of a track in decimal degrees.
///
/// A box may have zero area when it was derived from a single point. Consumers
/// that fit a viewport to it should use [`Bounds::padded`] first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl Bounds {
    /// Creates a zero-area box located on `point`.
    pub fn from_point(point: &Coordinate) -> Self {
        Bounds {
            min_lon: point.longitude,
            min_lat: point.latitude,
            max_lon: point.longitude,
            max_lat: point.latitude,
        }
    }

    /// Grows the box so that it contains `point`.
    pub fn extend(&mut self, point: &Coordinate) {
        self.min_lon = self.min_lon.min(point.longitude);
        self.min_lat = self.min_lat.min(point.latitude);
        self.max_lon = self.max_lon.max(point.longitude);
        self.max_lat = self.max_lat.max(point.latitude);
    }

    pub fn width(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    pub fn height(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    pub fn center(&self) -> Coordinate {
        Coordinate::new(
            (self.min_lon + self.max_lon) / 2.0,
            (self.min_lat + self.max_lat) / 2.0,
        )
    }

    pub fn contains(&self, point: &Coordinate) -> bool {
        (self.min_lon..=self.max_lon).contains(&point.longitude)
            && (self.min_lat..=self.max_lat).contains(&point.latitude)
    }

    /// Returns `true` if the box has no extent on at least one axis.
    pub fn is_degenerate(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    /// Returns a copy that spans at least `min_span` degrees on each axis.
    ///
    /// Axes that are already wider than `min_span` are left untouched; narrower
    /// axes are widened symmetrically around the center of the box.
    pub fn padded(&self, min_span: f64) -> Bounds {
        let center = self.center();
        let mut padded = *self;
        if self.width() < min_span {
            padded.min_lon = center.longitude - min_span / 2.0;
            padded.max_lon = center.longitude + min_span / 2.0;
        }
        if self.height() < min_span {
            padded.min_lat = center.latitude - min_span / 2.0;
            padded.max_lat = center.latitude + min_span / 2.0;
        }
        padded
    }
}
