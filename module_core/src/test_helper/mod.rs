//! Test doubles for the collaborators of the track registry.

use crate::{Event, EventKindType};
use tokio::sync::broadcast::error::RecvError;
use tokio::time::{Instant, timeout_at};

mod memory_store;
mod recording_renderer;

pub use memory_store::MemoryStore;
pub use recording_renderer::{RecordingRenderer, RenderCall, RenderLog};

/// Waits asynchronously for a specific type of [`Event`] to be received on a
/// [`tokio::sync::broadcast::Receiver`] within a given duration.
///
/// Events of other types are skipped. A lagging receiver keeps waiting, a
/// closed channel ends the wait early.
///
/// # Panics
///
/// This function panics if no matching event is received within the specified
/// `duration`.
///
/// # Returns
///
/// Returns the first [`Event`] whose [`crate::EventKind`] discriminant matches
/// `exp_event`.
pub async fn wait_for_event(
    rx: &mut tokio::sync::broadcast::Receiver<Event>,
    duration: std::time::Duration,
    exp_event: EventKindType,
) -> Event {
    let deadline = Instant::now() + duration;
    loop {
        match timeout_at(deadline, rx.recv()).await {
            Ok(Ok(event)) if event.event_type() == exp_event => return event,
            Ok(Ok(_)) | Ok(Err(RecvError::Lagged(_))) => continue,
            Ok(Err(RecvError::Closed)) | Err(_) => break,
        }
    }
    panic!("Failed to receive event of type {:?}", exp_event);
}

/// Collects all events that are already queued on the receiver without waiting.
pub fn drain_events(rx: &mut tokio::sync::broadcast::Receiver<Event>) -> Vec<Event> {
    let mut events = vec![];
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}
