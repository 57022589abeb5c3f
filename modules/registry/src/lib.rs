// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

//! Track registry of the track viewer
//!
//! Owns every loaded track and keeps the rendering surface and the list of
//! available files in sync with it.

mod config;
mod error;
mod track;

pub use config::RegistryConfig;
pub use error::RegistryError;

use algorithm::{calculate_bounds, pick_color};
use common::{
    bounds::Bounds,
    category::Category,
    color::Color,
    position::Coordinate,
    track::TrackSummary,
};
use futures::future::{BoxFuture, FutureExt, Shared};
use gpx::GpxError;
use module_core::{EventBus, EventKind, FileStore, LineStyle, RenderingAdapter};
use rand::{SeedableRng, rngs::StdRng};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
};
use track::Track;
use tracing::{debug, error, info, warn};

/// Geometry produced by the fetch and parse step of a load.
#[derive(Debug)]
struct LoadedGeometry {
    points: Vec<Coordinate>,
    track_name: Option<String>,
    bounds: Bounds,
}

type LoadResult = Result<Arc<LoadedGeometry>, RegistryError>;
type SharedLoad = Shared<BoxFuture<'static, LoadResult>>;

/// A load that waits for the file store.
///
/// All callers that load the same id while the fetch is running await the same
/// shared future. Only a completion that still carries the current `token`
/// may insert the track.
struct PendingLoad {
    token: u64,
    future: SharedLoad,
}

struct RegistryState<R> {
    renderer: R,
    tracks: HashMap<String, Track>,
    pending: HashMap<String, PendingLoad>,
    available: Vec<String>,
    rng: StdRng,
    next_token: u64,
}

/// The registry of loaded GPX tracks.
///
/// The registry is the single source of truth for which tracks are loaded
/// and how they look. Every change of a track is mirrored on the rendering
/// surface `R` while the state lock is held, so a track is in the registry if
/// and only if its layer is live on the surface. Files are read from and
/// deleted in the file store `S`.
///
/// Operations suspend only while they wait for the file store. The state lock
/// is never held across such a suspension point, so other operations may run
/// while a load or delete is in flight.
///
/// Every change is announced on the [`EventBus`] the registry was created with.
pub struct TrackRegistry<R: RenderingAdapter, S: FileStore> {
    store: Arc<S>,
    state: Mutex<RegistryState<R>>,
    config: RegistryConfig,
    event_bus: EventBus,
}

impl<R: RenderingAdapter, S: FileStore + 'static> TrackRegistry<R, S> {
    /// Creates a registry with the default [`RegistryConfig`].
    pub fn new(renderer: R, store: Arc<S>, event_bus: EventBus) -> Self {
        TrackRegistry::new_with_config(renderer, store, event_bus, RegistryConfig::default())
    }

    /// Creates a registry with a custom configuration.
    ///
    /// An empty palette in `config` is replaced by the default palette.
    pub fn new_with_config(
        renderer: R,
        store: Arc<S>,
        event_bus: EventBus,
        mut config: RegistryConfig,
    ) -> Self {
        if config.palette.is_empty() {
            warn!("Empty color palette configured, using the default palette");
            config.palette = RegistryConfig::default().palette;
        }
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        TrackRegistry {
            store,
            state: Mutex::new(RegistryState {
                renderer,
                tracks: HashMap::new(),
                pending: HashMap::new(),
                available: vec![],
                rng,
                next_token: 0,
            }),
            config,
            event_bus,
        }
    }

    /// Loads the track `id` from the file store and draws it.
    ///
    /// Process:
    /// - If the track is already loaded, its summary is returned and nothing
    ///   else happens.
    /// - If a load of `id` is in flight, this call joins it instead of fetching
    ///   the file a second time.
    /// - Otherwise the file is fetched and parsed, the track gets a color from
    ///   the palette and its GPX name (or `id`) as display name, and a layer is
    ///   created for it.
    ///
    /// Errors:
    /// - [`RegistryError::Fetch`], [`RegistryError::Parse`] or
    ///   [`RegistryError::EmptyTrack`] if the file could not be turned into a track.
    /// - [`RegistryError::Superseded`] if `id` was unloaded while the file was
    ///   fetched. The fetched track is discarded.
    ///
    /// The registry is unchanged on every error.
    pub async fn load(&self, id: &str) -> Result<TrackSummary, RegistryError> {
        let (token, future) = {
            let mut state = self.lock();
            if let Some(track) = state.tracks.get(id) {
                debug!("Track {id} is already loaded");
                return Ok(track.summary());
            }
            match state.pending.get(id) {
                Some(pending) => {
                    debug!("Joining in-flight load of track {id}");
                    (pending.token, pending.future.clone())
                }
                None => {
                    state.next_token += 1;
                    let token = state.next_token;
                    let future = self.fetch_and_parse(id);
                    state.pending.insert(
                        id.to_string(),
                        PendingLoad {
                            token,
                            future: future.clone(),
                        },
                    );
                    info!("Loading track {id}");
                    (token, future)
                }
            }
        };

        let result = future.await;

        let mut state = self.lock();
        let is_current = state
            .pending
            .get(id)
            .is_some_and(|pending| pending.token == token);
        let geometry = match result {
            Ok(geometry) => geometry,
            Err(e) => {
                if is_current {
                    state.pending.remove(id);
                    error!("Failed to load track {id}. Error: {e}");
                    self.event_bus
                        .publish_kind(EventKind::LoadFailedEvent(id.to_string(), e.to_string()));
                }
                return Err(e);
            }
        };
        if !is_current {
            if let Some(track) = state.tracks.get(id)
                && track.token == token
            {
                return Ok(track.summary());
            }
            warn!("Discarding superseded load of track {id}");
            return Err(RegistryError::Superseded(id.to_string()));
        }
        state.pending.remove(id);

        let color = pick_color(&self.config.palette, &mut state.rng)
            .unwrap_or_else(|| Color::from_rgb(0xFF, 0x57, 0x33));
        let style = LineStyle::new(color.clone(), self.config.line_width);
        let layer = state.renderer.create_layer(&geometry.points, &style);
        let track = Track {
            id: id.to_string(),
            points: geometry.points.clone(),
            display_name: geometry
                .track_name
                .clone()
                .unwrap_or_else(|| id.to_string()),
            color,
            category: Category::default(),
            visible: true,
            bounds: geometry.bounds,
            layer,
            token,
        };
        let summary = track.summary();
        state.tracks.insert(id.to_string(), track);
        info!(
            "Loaded track {id} with {} points as layer {}",
            summary.point_count,
            layer.id()
        );
        self.event_bus
            .publish_kind(EventKind::TrackLoadedEvent(Arc::new(summary.clone())));
        Ok(summary)
    }

    /// Loads the track like [`TrackRegistry::load`] and fits the viewport to it.
    pub async fn load_and_focus(&self, id: &str) -> Result<TrackSummary, RegistryError> {
        let summary = self.load(id).await?;
        self.focus(id);
        Ok(summary)
    }

    /// Unloads the track if it is loaded, loads it otherwise.
    ///
    /// Returns whether the track is loaded afterwards.
    pub async fn toggle(&self, id: &str) -> Result<bool, RegistryError> {
        if self.unload(id) {
            return Ok(false);
        }
        self.load(id).await.map(|_| true)
    }

    /// Removes the track and its layer.
    ///
    /// A load of `id` that is still in flight is invalidated as well, its result
    /// will be discarded. Returns `true` if a loaded track was removed.
    pub fn unload(&self, id: &str) -> bool {
        let mut state = self.lock();
        if state.pending.remove(id).is_some() {
            debug!("Cancelled in-flight load of track {id}");
        }
        match state.tracks.remove(id) {
            Some(track) => {
                state.renderer.remove_layer(track.layer);
                info!("Unloaded track {id}, removed layer {}", track.layer.id());
                self.event_bus
                    .publish_kind(EventKind::TrackUnloadedEvent(id.to_string()));
                true
            }
            None => false,
        }
    }

    /// Shows or hides the track. Returns `false` if the track is not loaded.
    pub fn set_visible(&self, id: &str, visible: bool) -> bool {
        self.update(id, |track, renderer, _| {
            track.visible = visible;
            renderer.set_visible(track.layer, visible);
            debug!("Track {id} visible: {visible}");
        })
    }

    /// Changes the display name. An empty name resets it to the id.
    pub fn rename(&self, id: &str, name: &str) -> bool {
        self.update(id, |track, _, _| {
            let name = name.trim();
            track.display_name = if name.is_empty() {
                track.id.clone()
            } else {
                name.to_string()
            };
            debug!("Track {id} renamed to {}", track.display_name);
        })
    }

    /// Parses `color` and applies it to the track.
    ///
    /// Errors:
    /// - [`RegistryError::InvalidColor`] if `color` is not a valid color. The
    ///   track is left unchanged.
    pub fn recolor(&self, id: &str, color: &str) -> Result<bool, RegistryError> {
        let color = Color::parse(color)?;
        Ok(self.set_color(id, color))
    }

    /// Applies `color` to the track and restyles its layer.
    pub fn set_color(&self, id: &str, color: Color) -> bool {
        self.update(id, |track, renderer, config| {
            track.color = color;
            renderer.set_style(
                track.layer,
                &LineStyle::new(track.color.clone(), config.line_width),
            );
            debug!("Track {id} recolored to {}", track.color);
        })
    }

    /// Parses `category` and assigns it to the track.
    ///
    /// Errors:
    /// - [`RegistryError::InvalidCategory`] if `category` is not one of the
    ///   known labels. The track is left unchanged.
    pub fn categorize(&self, id: &str, category: &str) -> Result<bool, RegistryError> {
        let category = Category::parse(category)?;
        Ok(self.set_category(id, category))
    }

    pub fn set_category(&self, id: &str, category: Category) -> bool {
        self.update(id, |track, _, _| {
            track.category = category;
            debug!("Track {id} categorized as {category}");
        })
    }

    /// Fits the viewport to the bounds of the track.
    pub fn focus(&self, id: &str) -> bool {
        let mut state = self.lock();
        let state = &mut *state;
        match state.tracks.get(id) {
            Some(track) => {
                debug!("Focus track {id} at {:?}", track.bounds);
                state.renderer.fit_view(&track.bounds, &self.config.fit);
                true
            }
            None => false,
        }
    }

    /// Deletes the file from the file store.
    ///
    /// Once the store confirmed the deletion, the track is unloaded, the file is
    /// removed from the list of available files and a
    /// [`EventKind::FileRemovedEvent`] is published.
    ///
    /// Errors:
    /// - [`RegistryError::Delete`] if the store refused. Nothing is changed locally.
    pub async fn delete_remote(&self, id: &str) -> Result<(), RegistryError> {
        info!("Deleting file {id} from the file store");
        if let Err(source) = self.store.delete(id).await {
            error!("Failed to delete file {id}. Error: {source}");
            return Err(RegistryError::Delete {
                id: id.to_string(),
                source,
            });
        }
        self.unload(id);
        self.lock().available.retain(|file| file != id);
        self.event_bus
            .publish_kind(EventKind::FileRemovedEvent(id.to_string()));
        Ok(())
    }

    /// Reads the list of available files from the file store.
    pub async fn refresh_files(&self) -> Result<Vec<String>, RegistryError> {
        let files = self.store.list().await.map_err(|e| {
            error!("Failed to list files. Error: {e}");
            RegistryError::List(e)
        })?;
        debug!("Available files: {files:?}");
        self.lock().available = files.clone();
        self.event_bus
            .publish_kind(EventKind::FilesListedEvent(Arc::new(files.clone())));
        Ok(files)
    }

    /// Uploads a file to the file store and refreshes the list of available files.
    ///
    /// Returns the identifier of the new file. A failed refresh is only logged,
    /// the file is stored anyway.
    ///
    /// Errors:
    /// - [`RegistryError::Upload`] if the store refused the file.
    pub async fn upload(&self, bytes: &[u8], filename: &str) -> Result<String, RegistryError> {
        let id = self
            .store
            .upload(bytes, filename)
            .await
            .map_err(|source| {
                error!("Failed to upload {filename}. Error: {source}");
                RegistryError::Upload {
                    filename: filename.to_string(),
                    source,
                }
            })?;
        info!("Uploaded {filename} as {id}");
        if let Err(e) = self.refresh_files().await {
            warn!("Uploaded {id}, but the list of available files is stale. Error: {e}");
        }
        Ok(id)
    }

    /// Returns a summary of every loaded track, ordered by id.
    pub fn snapshot(&self) -> Vec<TrackSummary> {
        let state = self.lock();
        let mut summaries: Vec<TrackSummary> = state.tracks.values().map(Track::summary).collect();
        summaries.sort_by(|a, b| a.id.cmp(&b.id));
        summaries
    }

    pub fn get(&self, id: &str) -> Option<TrackSummary> {
        self.lock().tracks.get(id).map(Track::summary)
    }

    /// Returns the track points of a loaded track.
    pub fn points(&self, id: &str) -> Option<Vec<Coordinate>> {
        self.lock().tracks.get(id).map(|track| track.points.clone())
    }

    /// Files of the file store as of the last refresh.
    pub fn available_files(&self) -> Vec<String> {
        self.lock().available.clone()
    }

    pub fn is_loaded(&self, id: &str) -> bool {
        self.lock().tracks.contains_key(id)
    }

    pub fn is_loading(&self, id: &str) -> bool {
        self.lock().pending.contains_key(id)
    }

    /// Gives `inspect` read access to the rendering surface.
    pub fn with_renderer<T>(&self, inspect: impl FnOnce(&R) -> T) -> T {
        inspect(&self.lock().renderer)
    }

    pub fn len(&self) -> usize {
        self.lock().tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().tracks.is_empty()
    }

    /// Unloads every track and invalidates every in-flight load.
    pub fn clear(&self) {
        let ids: Vec<String> = {
            let mut state = self.lock();
            state.pending.clear();
            state.tracks.keys().cloned().collect()
        };
        for id in ids.iter() {
            self.unload(id);
        }
    }

    /// Starts the fetch and parse step of a load as a shareable future.
    fn fetch_and_parse(&self, id: &str) -> SharedLoad {
        let store = Arc::clone(&self.store);
        let id = id.to_string();
        async move {
            let text = store
                .fetch(&id)
                .await
                .map_err(|source| RegistryError::Fetch {
                    id: id.clone(),
                    source,
                })?;
            let parsed = gpx::parse(&text).map_err(|e| match e {
                GpxError::NoTrackPoints => RegistryError::EmptyTrack(id.clone()),
                source => RegistryError::Parse {
                    id: id.clone(),
                    source,
                },
            })?;
            if parsed.skipped_points > 0 {
                warn!(
                    "Skipped {} track points with invalid coordinates in {id}",
                    parsed.skipped_points
                );
            }
            let bounds = calculate_bounds(&parsed.points)
                .ok_or_else(|| RegistryError::EmptyTrack(id.clone()))?;
            Ok(Arc::new(LoadedGeometry {
                points: parsed.points,
                track_name: parsed.track_name,
                bounds,
            }))
        }
        .boxed()
        .shared()
    }

    /// Applies `change` to a loaded track and announces the new state.
    fn update<F>(&self, id: &str, change: F) -> bool
    where
        F: FnOnce(&mut Track, &mut R, &RegistryConfig),
    {
        let mut state = self.lock();
        let state = &mut *state;
        match state.tracks.get_mut(id) {
            Some(track) => {
                change(track, &mut state.renderer, &self.config);
                self.event_bus
                    .publish_kind(EventKind::TrackUpdatedEvent(Arc::new(track.summary())));
                true
            }
            None => {
                debug!("Ignoring change of track {id}, it is not loaded");
                false
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, RegistryState<R>> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl<R: RenderingAdapter, S: FileStore> Drop for TrackRegistry<R, S> {
    /// Removes the layers of all tracks that are still loaded.
    fn drop(&mut self) {
        let state = self.state.get_mut().unwrap_or_else(|e| e.into_inner());
        for (id, track) in state.tracks.drain() {
            state.renderer.remove_layer(track.layer);
            debug!("Removed layer {} of track {id} on teardown", track.layer.id());
        }
    }
}
