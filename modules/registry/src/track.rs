use common::{
    bounds::Bounds, category::Category, color::Color, position::Coordinate, track::TrackSummary,
};
use module_core::LayerHandle;

/// A loaded track together with the layer that draws it.
///
/// Only the registry creates, mutates and drops tracks. The layer is removed
/// from the surface before the track is dropped.
#[derive(Debug)]
pub(crate) struct Track {
    pub id: String,
    pub points: Vec<Coordinate>,
    pub display_name: String,
    pub color: Color,
    pub category: Category,
    pub visible: bool,
    pub bounds: Bounds,
    pub layer: LayerHandle,
    /// Operation token of the load that created this track.
    pub token: u64,
}

impl Track {
    pub fn summary(&self) -> TrackSummary {
        TrackSummary {
            id: self.id.clone(),
            display_name: self.display_name.clone(),
            color: self.color.clone(),
            category: self.category,
            visible: self.visible,
            bounds: self.bounds,
            point_count: self.points.len(),
        }
    }
}
