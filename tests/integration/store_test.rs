//! Integration tests for the notification store and its persistence.

mod helpers;

use std::collections::HashSet;
use std::sync::Arc;

use schoolhub_core::traits::storage::KeyValueStore;
use schoolhub_notify::{NewNotification, NotificationFormatter, NotificationKind};

#[tokio::test]
async fn test_generated_ids_are_unique() {
    let (store, _) = helpers::memory_store().await;
    let mut ids = HashSet::new();
    for n in 0..50 {
        ids.insert(store.create(NewNotification::new(format!("n{n}"))).await);
    }
    assert_eq!(ids.len(), 50);
}

#[tokio::test]
async fn test_newest_first_and_mutations_do_not_reorder() {
    let (store, _) = helpers::memory_store().await;
    let first = store.create(NewNotification::new("first")).await;
    let second = store.create(NewNotification::new("second")).await;
    let third = store.create(NewNotification::new("third")).await;

    store.mark_read(second.as_str()).await;
    store.remove("unknown").await;

    let ids: Vec<_> = store.records().iter().map(|r| r.id.clone()).collect();
    assert_eq!(ids, vec![third.clone(), second, first.clone()]);

    store.remove(third.as_str()).await;
    assert_eq!(store.records()[1].id, first);
}

#[tokio::test]
async fn test_persistence_round_trip_through_local_files() {
    let dir = tempfile::tempdir().unwrap();

    let store = helpers::local_store(dir.path()).await;
    store
        .create(NotificationFormatter::message_received("Ms. Rao", "Hi", "t-1"))
        .await;
    store
        .create(NotificationFormatter::fee_reminder("$40", "Friday"))
        .await;
    let read = store
        .create(NewNotification::new("seen").duration_ms(2000))
        .await;
    store.mark_read(read.as_str()).await;
    let before = store.records();
    drop(store);

    let reloaded = helpers::local_store(dir.path()).await;
    assert_eq!(reloaded.records(), before);
    assert_eq!(reloaded.unread_count(None), 2);
}

#[tokio::test]
async fn test_persisted_records_carry_both_read_flags() {
    let (store, backend) = helpers::memory_store().await;
    let id = store.create(NewNotification::new("x")).await;
    store.create(NewNotification::new("y")).await;
    store.mark_read(id.as_str()).await;

    let raw = backend.get("notifications").await.unwrap().unwrap();
    let items: Vec<serde_json::Value> = serde_json::from_str(&raw).unwrap();
    for item in &items {
        assert_eq!(item["read"], item["isRead"]);
        assert_eq!(item["id"], item["notificationId"]);
    }
    assert_eq!(items[1]["read"], true);
}

#[tokio::test]
async fn test_legacy_records_are_normalized_on_load() {
    let (seed, backend) = helpers::memory_store().await;
    drop(seed);
    backend
        .set(
            "notifications",
            r#"[
                {"notificationId": 42, "type": "notice", "message": "Old", "isRead": true,
                 "timestamp": 1700000000000, "referenceId": "n-1"},
                {"message": "No id, no flags"},
                "not an object",
                {"id": "bad", "read": {"nested": true}, "message": "kept with defaults"}
            ]"#,
        )
        .await
        .unwrap();

    let store = helpers::store_over(Arc::new(backend)).await;
    let records = store.records();
    assert_eq!(records.len(), 3);

    assert_eq!(records[0].id, "42");
    assert_eq!(records[0].kind, NotificationKind::Notice);
    assert!(records[0].read);
    assert_eq!(records[0].created_at.timestamp_millis(), 1_700_000_000_000);
    assert_eq!(records[0].route(), "/notice-board/n-1");

    assert!(!records[1].id.is_empty());
    assert!(!records[1].read);
    assert_eq!(records[1].kind, NotificationKind::System);
    assert!(records[1].auto_dismiss);

    assert_eq!(records[2].id, "bad");
    assert!(!records[2].read);
}

#[tokio::test]
async fn test_ids_assigned_on_load_are_stable() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("notifications.json"),
        r#"[{"message":"no id"},{"id":"x","message":"a"},{"id":"x","message":"b"}]"#,
    )
    .unwrap();

    let first = helpers::local_store(dir.path()).await;
    let first_ids: Vec<_> = first.records().iter().map(|r| r.id.clone()).collect();
    drop(first);

    let second = helpers::local_store(dir.path()).await;
    let second_ids: Vec<_> = second.records().iter().map(|r| r.id.clone()).collect();
    assert_eq!(first_ids, second_ids);
    assert_eq!(first_ids[1], "x");
    assert_ne!(first_ids[2], "x");

    second.mark_read(first_ids[0].as_str()).await;
    assert_eq!(second.unread_count(None), 2);
}

#[tokio::test]
async fn test_unparsable_payload_starts_empty() {
    for raw in ["{not json", r#"{"id":"x"}"#, "42", "null"] {
        let (seed, backend) = helpers::memory_store().await;
        drop(seed);
        backend.set("notifications", raw).await.unwrap();

        let store = helpers::store_over(Arc::new(backend)).await;
        assert!(store.is_empty(), "payload {raw:?} should load as empty");
    }
}

#[tokio::test]
async fn test_failing_backend_degrades_silently() {
    let store = helpers::store_over(Arc::new(helpers::FailingStore)).await;
    assert!(store.is_empty());

    let id = store.create(NewNotification::new("still works")).await;
    store.mark_read(id.as_str()).await;
    assert_eq!(store.len(), 1);
    assert!(store.get(id.as_str()).unwrap().read);
}

#[tokio::test]
async fn test_mark_all_read_is_idempotent() {
    let (store, backend) = helpers::memory_store().await;
    store.create(NewNotification::new("a")).await;
    store.create(NewNotification::new("b")).await;

    assert_eq!(store.mark_all_read().await, 2);
    let once = store.records();
    let persisted = backend.get("notifications").await.unwrap();

    assert_eq!(store.mark_all_read().await, 0);
    assert_eq!(store.records(), once);
    assert_eq!(backend.get("notifications").await.unwrap(), persisted);
}

#[tokio::test]
async fn test_mark_by_reference_scoping() {
    let (store, _) = helpers::memory_store().await;
    let a = store
        .create(
            NewNotification::new("A")
                .reference("r1")
                .kind(NotificationKind::Notice),
        )
        .await;
    let b = store
        .create(
            NewNotification::new("B")
                .reference("r1")
                .kind(NotificationKind::Message),
        )
        .await;

    store
        .mark_by_reference("r1", Some(&NotificationKind::Notice))
        .await;
    assert!(store.get(a.as_str()).unwrap().read);
    assert!(!store.get(b.as_str()).unwrap().read);

    assert_eq!(store.mark_by_reference("r1", None).await, 1);
    assert_eq!(store.mark_by_reference("missing", None).await, 0);
}

#[tokio::test]
async fn test_persistent_payload_disables_auto_dismiss() {
    let (store, _) = helpers::memory_store().await;
    let id = store
        .create(
            NewNotification::new("Hi")
                .kind(NotificationKind::Message)
                .persistent(true),
        )
        .await;
    assert!(!store.get(id.as_str()).unwrap().auto_dismiss);
}
