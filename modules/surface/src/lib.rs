// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

//! Surface Modul for the track viewer
//!
//! Provides an in-memory map surface for running the track viewer without a display.

use common::{bounds::Bounds, position::Coordinate};
use module_core::{FitOptions, LayerHandle, LineStyle, RenderingAdapter};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// A line layer drawn on a [`HeadlessSurface`].
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub line: Vec<Coordinate>,
    pub style: LineStyle,
    pub visible: bool,
}

/// The visible area of a [`HeadlessSurface`].
///
/// # Fields
///
/// - `bounds` – The fitted box, widened to the minimal span of the fit.
/// - `padding` – Space in pixels kept free around `bounds`.
/// - `duration_ms` – Duration of the animation that moved the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    pub bounds: Bounds,
    pub padding: u32,
    pub duration_ms: u128,
}

/// A map surface that keeps its layers in memory.
///
/// Every call is logged. Calls for unknown handles are logged as warning and
/// otherwise ignored.
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    next_handle: u64,
    layers: BTreeMap<LayerHandle, Layer>,
    viewport: Option<Viewport>,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        HeadlessSurface::default()
    }

    pub fn layer(&self, handle: LayerHandle) -> Option<&Layer> {
        self.layers.get(&handle)
    }

    /// All live layers ordered by handle.
    pub fn layers(&self) -> impl Iterator<Item = (&LayerHandle, &Layer)> {
        self.layers.iter()
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// The viewport of the last fit, `None` before the first fit.
    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    fn layer_mut(&mut self, handle: LayerHandle, operation: &str) -> Option<&mut Layer> {
        let layer = self.layers.get_mut(&handle);
        if layer.is_none() {
            warn!("Ignoring {operation} of unknown layer {}", handle.id());
        }
        layer
    }
}

impl RenderingAdapter for HeadlessSurface {
    fn create_layer(&mut self, line: &[Coordinate], style: &LineStyle) -> LayerHandle {
        self.next_handle += 1;
        let handle = LayerHandle::new(self.next_handle);
        self.layers.insert(
            handle,
            Layer {
                line: line.to_vec(),
                style: style.clone(),
                visible: true,
            },
        );
        info!(
            "Created layer {} with {} points in {}",
            handle.id(),
            line.len(),
            style.color
        );
        handle
    }

    fn remove_layer(&mut self, handle: LayerHandle) {
        match self.layers.remove(&handle) {
            Some(_) => info!("Removed layer {}", handle.id()),
            None => warn!("Ignoring removal of unknown layer {}", handle.id()),
        }
    }

    fn set_visible(&mut self, handle: LayerHandle, visible: bool) {
        if let Some(layer) = self.layer_mut(handle, "visibility change") {
            layer.visible = visible;
            debug!("Layer {} visible: {visible}", handle.id());
        }
    }

    fn set_style(&mut self, handle: LayerHandle, style: &LineStyle) {
        if let Some(layer) = self.layer_mut(handle, "restyle") {
            layer.style = style.clone();
            debug!(
                "Layer {} restyled to {} with width {}",
                handle.id(),
                style.color,
                style.width
            );
        }
    }

    fn fit_view(&mut self, bounds: &Bounds, options: &FitOptions) {
        let viewport = Viewport {
            bounds: bounds.padded(options.min_span),
            padding: options.padding,
            duration_ms: options.duration.as_millis(),
        };
        info!("Viewport fitted to {:?}", viewport.bounds);
        self.viewport = Some(viewport);
    }
}
