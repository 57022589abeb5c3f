use common::{bounds::Bounds, color::Color, position::Coordinate};
use std::time::Duration;

/// Opaque reference to a line layer on a rendering surface.
///
/// Handles are created by a [`RenderingAdapter`] and are only meaningful to
/// the adapter that created them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerHandle(u64);

impl LayerHandle {
    pub fn new(id: u64) -> Self {
        LayerHandle(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Stroke style of a track line.
#[derive(Debug, Clone, PartialEq)]
pub struct LineStyle {
    pub color: Color,
    pub width: f32,
}

impl LineStyle {
    pub const DEFAULT_WIDTH: f32 = 4.0;

    pub fn new(color: Color, width: f32) -> Self {
        LineStyle { color, width }
    }
}

/// Options used when the viewport is fitted to a bounding box.
///
/// # Fields
///
/// - `padding` – Space in pixels kept free around the box.
/// - `duration` – Duration of the viewport animation.
/// - `min_span` – Minimal extent in degrees of each axis of the fitted box.
///   Boxes with a smaller extent (e.g. of a single point track) are widened.
#[derive(Debug, Clone, PartialEq)]
pub struct FitOptions {
    pub padding: u32,
    pub duration: Duration,
    pub min_span: f64,
}

impl Default for FitOptions {
    fn default() -> Self {
        FitOptions {
            padding: 50,
            duration: Duration::from_millis(1000),
            min_span: 0.005,
        }
    }
}

/// Common interface of a map surface that tracks are drawn on.
///
/// Every method is synchronous. The track registry calls them while it holds
/// its state lock, so the surface always changes in lockstep with the registry.
pub trait RenderingAdapter {
    /// Creates a new line layer for `line` drawn with `style`.
    ///
    /// The layer is visible after creation.
    fn create_layer(&mut self, line: &[Coordinate], style: &LineStyle) -> LayerHandle;

    /// Removes the layer. Unknown handles are ignored.
    fn remove_layer(&mut self, handle: LayerHandle);

    /// Shows or hides the layer.
    fn set_visible(&mut self, handle: LayerHandle, visible: bool);

    /// Replaces the stroke style of the layer.
    fn set_style(&mut self, handle: LayerHandle, style: &LineStyle);

    /// Moves the viewport so that `bounds` is fully visible.
    ///
    /// Implementations must accept boxes without area.
    fn fit_view(&mut self, bounds: &Bounds, options: &FitOptions);
}
