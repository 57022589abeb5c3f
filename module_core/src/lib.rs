// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

//! Core Modul for the track viewer
//!
//! Provides the event bus the track registry reports its changes on and the
//! interfaces of the collaborators the registry is driven by: the rendering
//! surface and the remote file store.

use common::track::TrackSummary;
use std::sync::Arc;
use strum_macros::EnumDiscriminants;

pub mod render;
pub mod store;

pub use render::{FitOptions, LayerHandle, LineStyle, RenderingAdapter};
pub use store::{FileStore, StoreError};

/// Represents a high-level event in the system.
///
/// Each `Event` wraps an [`EventKind`], which defines the actual type
/// and data carried by the event.
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    /// The inner event type and associated data.
    pub kind: EventKind,
}

impl Event {
    pub fn new(kind: EventKind) -> Self {
        Event { kind }
    }

    /// Returns the payload-free type of this event.
    pub fn event_type(&self) -> EventKindType {
        EventKindType::from(&self.kind)
    }
}

/// A thread-safe, reference-counted pointer to a [`TrackSummary`].
///
/// Summaries are shared between all subscribers of the [`EventBus`]
/// without copying them.
pub type TrackSummaryPtr = Arc<TrackSummary>;

/// A thread-safe, reference-counted list of file identifiers.
pub type FileIdsPtr = Arc<Vec<String>>;

/// Enumerates the different kinds of events that can be emitted
/// and transmitted via the [`EventBus`].
///
/// The events only signal that the state of the track registry changed.
/// The registry snapshot stays the single source of truth.
#[derive(Clone, Debug, PartialEq, EnumDiscriminants)]
#[strum_discriminants(name(EventKindType), derive(Hash))]
pub enum EventKind {
    /// A track was loaded and its line is now shown on the map.
    TrackLoadedEvent(TrackSummaryPtr),

    /// A track was unloaded and its line was removed from the map.
    TrackUnloadedEvent(String),

    /// Name, color, category or visibility of a loaded track changed.
    TrackUpdatedEvent(TrackSummaryPtr),

    /// Loading the track with the given id failed. Carries the reason.
    LoadFailedEvent(String, String),

    /// The list of files available in the file store was refreshed.
    FilesListedEvent(FileIdsPtr),

    /// A file was deleted from the file store.
    FileRemovedEvent(String),
}

/// A simple asynchronous event bus for publishing and subscribing to [`Event`]s.
///
/// The event bus uses a [`tokio::sync::broadcast::channel`] under the hood,
/// allowing multiple receivers to listen for the same stream of events.
///
/// Each published event is cloned and distributed to all active subscribers.
/// If no subscribers exist at the time of publication, the event is discarded silently.
#[derive(Clone)]
pub struct EventBus {
    /// The broadcast sender used internally to distribute events.
    sender: tokio::sync::broadcast::Sender<Event>,
}

impl EventBus {
    /// Creates a new [`EventBus`] with a fixed buffer capacity of 100 messages.
    ///
    /// When the buffer is full, the oldest messages are dropped automatically
    /// as new ones are published.
    pub fn new() -> Self {
        let (sender, _) = tokio::sync::broadcast::channel(100);
        EventBus { sender }
    }

    /// Subscribes to the event bus and returns a [`tokio::sync::broadcast::Receiver`].
    ///
    /// The returned receiver will receive all future events published after the
    /// subscription is created.
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<Event> {
        self.sender.subscribe()
    }

    /// Publishes an [`Event`] to all active subscribers.
    ///
    /// If no subscribers exist, the event is discarded silently.
    pub fn publish(&self, event: &Event) {
        let _ = self.sender.send(event.clone());
    }

    /// Wraps `kind` into an [`Event`] and publishes it.
    pub fn publish_kind(&self, kind: EventKind) {
        let _ = self.sender.send(Event { kind });
    }
}

/// Provides a default instance of [`EventBus`].
impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

pub mod test_helper;
