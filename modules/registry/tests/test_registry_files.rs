// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use common::test_helper::track::{get_coastal_walk_gpx, get_ride_gpx};
use module_core::{
    EventBus, EventKind, EventKindType, StoreError,
    test_helper::{MemoryStore, RecordingRenderer, RenderLog, drain_events, wait_for_event},
};
use registry::{RegistryError, TrackRegistry};
use std::{sync::Arc, time::Duration};

fn create_registry() -> (
    TrackRegistry<RecordingRenderer, MemoryStore>,
    Arc<MemoryStore>,
    RenderLog,
    EventBus,
) {
    let renderer = RecordingRenderer::new();
    let log = renderer.log();
    let store = Arc::new(
        MemoryStore::new()
            .with_file("ride.gpx", get_ride_gpx())
            .with_file("coastal_walk.gpx", get_coastal_walk_gpx()),
    );
    let event_bus = EventBus::default();
    let registry = TrackRegistry::new(renderer, Arc::clone(&store), event_bus.clone());
    (registry, store, log, event_bus)
}

#[tokio::test]
#[test_log::test]
async fn refresh_files_lists_store_content() {
    let (registry, _store, _log, eb) = create_registry();
    let mut rx = eb.subscribe();
    assert!(registry.available_files().is_empty());

    let files = registry.refresh_files().await.unwrap();

    let expected = vec!["coastal_walk.gpx".to_string(), "ride.gpx".to_string()];
    assert_eq!(files, expected);
    assert_eq!(registry.available_files(), expected);
    let event = wait_for_event(
        &mut rx,
        Duration::from_millis(100),
        EventKindType::FilesListedEvent,
    )
    .await;
    assert_eq!(event.kind, EventKind::FilesListedEvent(Arc::new(expected)));
}

#[tokio::test]
#[test_log::test]
async fn delete_remote_unloads_and_forgets_file() {
    let (registry, store, log, eb) = create_registry();
    registry.refresh_files().await.unwrap();
    registry.load("ride.gpx").await.unwrap();
    let mut rx = eb.subscribe();

    registry.delete_remote("ride.gpx").await.unwrap();

    assert!(!store.contains("ride.gpx"));
    assert!(!registry.is_loaded("ride.gpx"));
    assert!(log.live_layers().is_empty());
    assert_eq!(registry.available_files(), vec!["coastal_walk.gpx"]);
    let event = wait_for_event(
        &mut rx,
        Duration::from_millis(100),
        EventKindType::FileRemovedEvent,
    )
    .await;
    assert_eq!(
        event.kind,
        EventKind::FileRemovedEvent("ride.gpx".to_string())
    );
}

#[tokio::test]
#[test_log::test]
async fn delete_remote_of_unloaded_file() {
    let (registry, store, _log, _eb) = create_registry();

    registry.delete_remote("coastal_walk.gpx").await.unwrap();

    assert!(!store.contains("coastal_walk.gpx"));
    assert_eq!(store.delete_count(), 1);
    assert!(registry.is_empty());
}

#[tokio::test]
#[test_log::test]
async fn refused_delete_keeps_track_loaded() {
    let (registry, store, log, _eb) = create_registry();
    registry.refresh_files().await.unwrap();
    let summary = registry.load("ride.gpx").await.unwrap();
    store.fail_delete("ride.gpx");

    let result = registry.delete_remote("ride.gpx").await;

    match result {
        Err(RegistryError::Delete { id, source }) => {
            assert_eq!(id, "ride.gpx");
            assert!(matches!(source, StoreError::Http { status: Some(500), .. }));
        }
        other => panic!("Unexpected result {other:?}"),
    }
    assert!(store.contains("ride.gpx"));
    assert_eq!(registry.get("ride.gpx"), Some(summary));
    assert_eq!(log.live_layers().len(), 1);
    assert_eq!(registry.available_files().len(), 2);
}

#[tokio::test]
#[test_log::test]
async fn delete_of_missing_file_is_reported() {
    let (registry, _store, _log, _eb) = create_registry();

    let result = registry.delete_remote("missing.gpx").await;

    assert_eq!(
        result,
        Err(RegistryError::Delete {
            id: "missing.gpx".to_string(),
            source: StoreError::NotFound("missing.gpx".to_string()),
        })
    );
}

#[tokio::test]
#[test_log::test]
async fn upload_refreshes_available_files() {
    let (registry, store, _log, _eb) = create_registry();

    let id = registry
        .upload(get_ride_gpx().as_bytes(), "evening.gpx")
        .await
        .unwrap();

    assert_eq!(id, "evening.gpx");
    assert!(store.contains("evening.gpx"));
    assert!(registry.available_files().contains(&id));
    assert_eq!(
        registry.load(&id).await.unwrap().display_name,
        "Harbour Ride"
    );
}

#[tokio::test]
#[test_log::test]
async fn upload_with_wrong_extension_is_refused() {
    let (registry, store, _log, _eb) = create_registry();

    let result = registry.upload(b"<gpx/>", "notes.txt").await;

    assert_eq!(
        result,
        Err(RegistryError::Upload {
            filename: "notes.txt".to_string(),
            source: StoreError::InvalidName("notes.txt".to_string()),
        })
    );
    assert!(!store.contains("notes.txt"));
    assert!(registry.available_files().is_empty());
}

#[tokio::test]
#[test_log::test]
async fn upload_succeeds_when_refresh_fails() {
    let (registry, store, _log, _eb) = create_registry();
    store.fail_list(StoreError::Http {
        status: Some(503),
        message: "unavailable".to_string(),
    });

    let id = registry
        .upload(get_ride_gpx().as_bytes(), "evening.gpx")
        .await
        .unwrap();

    assert_eq!(id, "evening.gpx");
    assert!(store.contains("evening.gpx"));
    assert!(registry.available_files().is_empty());
}

#[tokio::test]
#[test_log::test]
async fn delete_remote_during_load_discards_track() {
    let (registry, store, log, eb) = create_registry();
    let mut rx = eb.subscribe();
    store.hold("ride.gpx");

    let (loaded, deleted) = tokio::join!(registry.load("ride.gpx"), async {
        tokio::task::yield_now().await;
        let deleted = registry.delete_remote("ride.gpx").await;
        store.release("ride.gpx");
        deleted
    });

    assert_eq!(deleted, Ok(()));
    assert!(loaded.is_err());
    assert!(!registry.is_loaded("ride.gpx"));
    assert!(!registry.is_loading("ride.gpx"));
    assert!(log.live_layers().is_empty());
    assert_eq!(log.created_layers(), 0);
    let events = drain_events(&mut rx);
    assert!(
        !events
            .iter()
            .any(|event| event.event_type() == EventKindType::TrackLoadedEvent)
    );
    assert!(
        events
            .iter()
            .any(|event| event.kind == EventKind::FileRemovedEvent("ride.gpx".to_string()))
    );
}
