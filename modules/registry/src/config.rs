use common::color::{Color, default_palette};
use module_core::{FitOptions, LineStyle};

/// Settings of a [`crate::TrackRegistry`].
///
/// # Fields
///
/// - `palette` – Colors a newly loaded track gets one of.
/// - `line_width` – Stroke width of every track line.
/// - `fit` – Options used when the viewport is fitted to a track.
/// - `seed` – Seed of the color picker. `None` seeds from the operating system.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistryConfig {
    pub palette: Vec<Color>,
    pub line_width: f32,
    pub fit: FitOptions,
    pub seed: Option<u64>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        RegistryConfig {
            palette: default_palette(),
            line_width: LineStyle::DEFAULT_WIDTH,
            fit: FitOptions::default(),
            seed: None,
        }
    }
}
