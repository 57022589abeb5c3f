use module_core::{
    Event, EventBus, EventKind, EventKindType,
    test_helper::{drain_events, wait_for_event},
};
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
#[test_log::test]
pub async fn events_delivered() {
    let event_bus = EventBus::new();
    let mut receiver = event_bus.subscribe();
    let event = Event {
        kind: EventKind::TrackUnloadedEvent("ride.gpx".to_string()),
    };
    event_bus.publish(&event);
    let received_event =
        tokio::time::timeout(std::time::Duration::from_millis(100), receiver.recv())
            .await
            .expect("Failed to receive event in required time")
            .unwrap();
    assert_eq!(received_event.event_type(), event.event_type());
    assert_eq!(received_event, event);
}

#[tokio::test]
#[test_log::test]
pub async fn test_wait_for_event_skips_other_kinds() {
    let event_bus = EventBus::new();
    let mut receiver = event_bus.subscribe();
    event_bus.publish_kind(EventKind::FileRemovedEvent("a.gpx".to_string()));
    event_bus.publish_kind(EventKind::FilesListedEvent(Arc::new(vec![
        "b.gpx".to_string(),
    ])));

    let event = wait_for_event(
        &mut receiver,
        Duration::from_millis(100),
        EventKindType::FilesListedEvent,
    )
    .await;

    match event.kind {
        EventKind::FilesListedEvent(ids) => assert_eq!(*ids, vec!["b.gpx".to_string()]),
        other => panic!("Unexpected event {other:?}"),
    }
}

#[tokio::test]
#[test_log::test]
pub async fn events_without_subscriber_are_dropped() {
    let event_bus = EventBus::default();
    event_bus.publish_kind(EventKind::FileRemovedEvent("a.gpx".to_string()));
    let mut receiver = event_bus.subscribe();
    assert!(drain_events(&mut receiver).is_empty());
}
