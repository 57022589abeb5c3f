use crate::{FitOptions, LayerHandle, LineStyle, RenderingAdapter};
use common::bounds::Bounds;
use common::position::Coordinate;
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

/// A single call received by a [`RecordingRenderer`].
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCall {
    CreateLayer {
        handle: LayerHandle,
        line: Vec<Coordinate>,
        style: LineStyle,
    },
    RemoveLayer(LayerHandle),
    SetVisible(LayerHandle, bool),
    SetStyle(LayerHandle, LineStyle),
    FitView(Bounds, FitOptions),
}

#[derive(Debug, Default)]
struct RenderLogState {
    calls: Vec<RenderCall>,
    live: BTreeSet<LayerHandle>,
}

/// Shared view on everything a [`RecordingRenderer`] was asked to do.
///
/// The log stays readable after the renderer was moved into a registry.
#[derive(Debug, Clone, Default)]
pub struct RenderLog {
    state: Arc<Mutex<RenderLogState>>,
}

impl RenderLog {
    fn record(&self, call: RenderCall) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        match &call {
            RenderCall::CreateLayer { handle, .. } => {
                state.live.insert(*handle);
            }
            RenderCall::RemoveLayer(handle) => {
                state.live.remove(handle);
            }
            _ => (),
        }
        state.calls.push(call);
    }

    /// All calls in the order they were received.
    pub fn calls(&self) -> Vec<RenderCall> {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .calls
            .clone()
    }

    /// Handles that were created and not removed yet.
    pub fn live_layers(&self) -> Vec<LayerHandle> {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .live
            .iter()
            .copied()
            .collect()
    }

    pub fn created_layers(&self) -> usize {
        self.count(|call| matches!(call, RenderCall::CreateLayer { .. }))
    }

    pub fn style_calls(&self) -> Vec<(LayerHandle, LineStyle)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                RenderCall::SetStyle(handle, style) => Some((handle, style)),
                _ => None,
            })
            .collect()
    }

    pub fn visibility_calls(&self) -> Vec<(LayerHandle, bool)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                RenderCall::SetVisible(handle, visible) => Some((handle, visible)),
                _ => None,
            })
            .collect()
    }

    pub fn fit_calls(&self) -> Vec<(Bounds, FitOptions)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                RenderCall::FitView(bounds, options) => Some((bounds, options)),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, predicate: impl Fn(&RenderCall) -> bool) -> usize {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .calls
            .iter()
            .filter(|call| predicate(*call))
            .count()
    }
}

/// A [`RenderingAdapter`] that draws nothing and records every call.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    next_handle: u64,
    log: RenderLog,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        RecordingRenderer::default()
    }

    pub fn log(&self) -> RenderLog {
        self.log.clone()
    }
}

impl RenderingAdapter for RecordingRenderer {
    fn create_layer(&mut self, line: &[Coordinate], style: &LineStyle) -> LayerHandle {
        self.next_handle += 1;
        let handle = LayerHandle::new(self.next_handle);
        self.log.record(RenderCall::CreateLayer {
            handle,
            line: line.to_vec(),
            style: style.clone(),
        });
        handle
    }

    fn remove_layer(&mut self, handle: LayerHandle) {
        self.log.record(RenderCall::RemoveLayer(handle));
    }

    fn set_visible(&mut self, handle: LayerHandle, visible: bool) {
        self.log.record(RenderCall::SetVisible(handle, visible));
    }

    fn set_style(&mut self, handle: LayerHandle, style: &LineStyle) {
        self.log.record(RenderCall::SetStyle(handle, style.clone()));
    }

    fn fit_view(&mut self, bounds: &Bounds, options: &FitOptions) {
        self.log.record(RenderCall::FitView(*bounds, options.clone()));
    }
}
