//! Integration tests for the inbox view over a shared store.

mod helpers;

use std::sync::Arc;

use chrono::{Duration, Utc};

use schoolhub_core::config::notifications::{BannerConfig, InboxConfig};
use schoolhub_notify::inbox::{InboxTab, relative_time};
use schoolhub_notify::{
    BannerPresenter, InboxPresenter, NewNotification, NotificationFormatter, NotificationKind,
};

#[tokio::test]
async fn test_parent_inbox_scenario() {
    let (store, _) = helpers::memory_store().await;
    store
        .create(NotificationFormatter::fee_reminder("$80", "Monday"))
        .await;
    store
        .create(NotificationFormatter::notice_posted("Staff meeting", "n-1", Some("teacher")))
        .await;
    store
        .create(NotificationFormatter::notice_posted("Sports day", "n-2", None))
        .await;
    store
        .create(NotificationFormatter::message_received("Mr. Lee", "Thanks!", "t-4"))
        .await;

    let mut inbox = InboxPresenter::new(Arc::clone(&store), &InboxConfig::default())
        .with_viewer_role("parent");
    assert_eq!(inbox.entries().len(), 3);
    assert_eq!(inbox.unread_count(), 3);

    inbox.select_tab(InboxTab::Kind(NotificationKind::Notice));
    let entries = inbox.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].record.message, "Sports day");
    assert_eq!(entries[0].route, "/notice-board/n-2");

    inbox.select_tab("system".parse().unwrap());
    assert_eq!(inbox.unread_count(), 1);
}

#[tokio::test]
async fn test_backdated_records_sort_by_timestamp() {
    let (store, _) = helpers::memory_store().await;
    let now = Utc::now();
    store
        .create(NewNotification::new("last week").created_at(now - Duration::days(7)))
        .await;
    store.create(NewNotification::new("today")).await;
    store
        .create(NewNotification::new("yesterday").created_at(now - Duration::days(1)))
        .await;

    let inbox = InboxPresenter::new(Arc::clone(&store), &InboxConfig::default());
    let rows: Vec<_> = inbox
        .entries()
        .into_iter()
        .map(|e| (e.record.message, relative_time(e.record.created_at, now)))
        .collect();
    assert_eq!(rows[0].0, "today");
    assert_eq!(rows[1], ("yesterday".to_string(), "1d ago".to_string()));
    assert_eq!(rows[2].0, "last week");
    assert_ne!(rows[2].1, "7d ago");
}

#[tokio::test]
async fn test_custom_tab_set() {
    let (store, _) = helpers::memory_store().await;
    store
        .create(NotificationFormatter::homework_assigned("Science", "Tuesday", "hw-1"))
        .await;
    let config = InboxConfig {
        tabs: vec!["homework".into(), "message".into()],
    };

    let inbox = InboxPresenter::new(Arc::clone(&store), &config);
    let badges: Vec<_> = inbox
        .tab_badges()
        .into_iter()
        .map(|(tab, count)| (tab.to_string(), count))
        .collect();
    assert_eq!(
        badges,
        vec![
            ("all".to_string(), 1),
            ("homework".to_string(), 1),
            ("message".to_string(), 0)
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_inbox_and_banner_share_one_store() {
    let (store, _) = helpers::memory_store().await;
    let id = store
        .create(NotificationFormatter::message_received("Ms. Rao", "Call me", "t-9"))
        .await;
    let banners = BannerPresenter::new(Arc::clone(&store), BannerConfig::default());
    let inbox = InboxPresenter::new(Arc::clone(&store), &InboxConfig::default());

    assert_eq!(inbox.open(id.as_str()).await.as_deref(), Some("/messages/t-9"));
    assert_eq!(inbox.unread_count(), 0);

    // The banner keeps showing until its own dismissal rules apply.
    banners.sync();
    let visible = banners.visible();
    assert_eq!(visible.len(), 1);
    assert!(visible[0].record.read);

    inbox.clear_all().await;
    banners.sync();
    assert!(banners.visible().is_empty());
    assert_eq!(banners.pending_timers(), 0);
}
