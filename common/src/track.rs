use crate::{bounds::Bounds, category::Category, color::Color};
use serde::{Deserialize, Serialize};

/// Read-only view of a loaded track, handed out to the presentation layer.
///
/// A summary is a copy: changing the track afterwards does not change an
/// already taken summary.
///
/// # Fields
///
/// - `id` – The file name of the track in the file store.
/// - `display_name` – The name shown in the track list.
/// - `color` – The current line color.
/// - `category` – The activity label.
/// - `visible` – Whether the line is currently shown on the map.
/// - `bounds` – The bounding box of all track points.
/// - `point_count` – The number of track points of the line.
///
/// # Example
///
/// ```rust
/// use common::{bounds::Bounds, category::Category, color::Color, track::TrackSummary};
///
/// let summary = TrackSummary {
///     id: "ride.gpx".into(),
///     display_name: "Morning Ride".into(),
///     color: Color::parse("#FF5733").unwrap(),
///     category: Category::Cycling,
///     visible: true,
///     bounds: Bounds { min_lon: 151.0, min_lat: -33.9, max_lon: 151.2, max_lat: -33.8 },
///     point_count: 2,
/// };
/// assert_eq!(summary.visibility_label(), "Hide");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackSummary {
    pub id: String,
    pub display_name: String,
    pub color: Color,
    pub category: Category,
    pub visible: bool,
    pub bounds: Bounds,
    pub point_count: usize,
}

impl TrackSummary {
    /// Label of the action that flips the current visibility.
    pub fn visibility_label(&self) -> &'static str {
        if self.visible { "Hide" } else { "Show" }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
