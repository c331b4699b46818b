//! Integration tests for banner timing, driven by paused Tokio time.

mod helpers;

use std::sync::Arc;
use std::time::Duration;

use schoolhub_core::config::notifications::BannerConfig;
use schoolhub_notify::banner::BannerState;
use schoolhub_notify::{BannerPresenter, NewNotification, NotificationKind};

async fn advance(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

#[tokio::test(start_paused = true)]
async fn test_auto_dismiss_after_default_duration() {
    let (store, _) = helpers::memory_store().await;
    let id = store.create(NewNotification::new("Assembly at 9")).await;
    let presenter = BannerPresenter::new(Arc::clone(&store), BannerConfig::default());

    advance(6499).await;
    assert_eq!(presenter.visible().len(), 1);

    advance(2).await;
    assert!(presenter.visible().is_empty());
    assert_eq!(presenter.state_of(id.as_str()), Some(BannerState::Dismissed));
    assert_eq!(presenter.pending_timers(), 0);
    // Expiry is a presentation concern; the record stays unread.
    assert!(!store.get(id.as_str()).unwrap().read);
}

#[tokio::test(start_paused = true)]
async fn test_manual_close_cancels_timer() {
    let (store, _) = helpers::memory_store().await;
    let id = store
        .create(NewNotification::new("Close me").duration_ms(6500))
        .await;
    let other = store.create(NewNotification::new("Longer").duration_ms(20_000)).await;
    let presenter = BannerPresenter::new(Arc::clone(&store), BannerConfig::default());
    assert_eq!(presenter.pending_timers(), 2);

    advance(2000).await;
    assert_eq!(presenter.close(id.as_str()), Some(BannerState::Dismissed));
    assert_eq!(presenter.pending_timers(), 1);
    let after_close = presenter.visible();

    advance(4600).await;
    assert_eq!(presenter.visible(), after_close);
    assert_eq!(presenter.pending_timers(), 1);
    assert!(presenter.state_of(other.as_str()).unwrap().is_visible());
    assert_eq!(presenter.close(id.as_str()), None);
}

#[tokio::test(start_paused = true)]
async fn test_hover_restarts_at_half_duration() {
    let (store, _) = helpers::memory_store().await;
    let id = store
        .create(NewNotification::new("Hover me").duration_ms(6500))
        .await;
    let presenter = BannerPresenter::new(Arc::clone(&store), BannerConfig::default());

    advance(6000).await;
    assert_eq!(presenter.pointer_enter(id.as_str()), Some(BannerState::Paused));
    assert_eq!(presenter.pending_timers(), 0);

    // Paused banners never expire.
    advance(60_000).await;
    assert_eq!(presenter.state_of(id.as_str()), Some(BannerState::Paused));

    assert_eq!(
        presenter.pointer_leave(id.as_str()),
        Some(BannerState::Timed {
            duration: Duration::from_millis(3250)
        })
    );
    advance(3249).await;
    assert_eq!(presenter.visible().len(), 1);
    advance(2).await;
    assert!(presenter.visible().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_hover_without_explicit_duration_resumes_at_default() {
    let (store, _) = helpers::memory_store().await;
    let id = store.create(NewNotification::new("Default timing")).await;
    let presenter = BannerPresenter::new(Arc::clone(&store), BannerConfig::default());

    presenter.pointer_enter(id.as_str());
    presenter.pointer_leave(id.as_str());

    advance(2999).await;
    assert_eq!(presenter.visible().len(), 1);
    advance(2).await;
    assert!(presenter.visible().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_persistent_banner_only_leaves_by_user_action() {
    let (store, _) = helpers::memory_store().await;
    let id = store
        .create(
            NewNotification::new("Hi")
                .kind(NotificationKind::Message)
                .persistent(true),
        )
        .await;
    let presenter = BannerPresenter::new(Arc::clone(&store), BannerConfig::default());
    assert_eq!(presenter.state_of(id.as_str()), Some(BannerState::Pinned));
    assert_eq!(presenter.pending_timers(), 0);

    presenter.pointer_enter(id.as_str());
    presenter.pointer_leave(id.as_str());
    advance(120_000).await;
    assert_eq!(presenter.state_of(id.as_str()), Some(BannerState::Pinned));

    presenter.close(id.as_str());
    assert!(presenter.visible().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_expiry_promotes_waiting_records() {
    let (store, _) = helpers::memory_store().await;
    let oldest = store.create(NewNotification::new("oldest")).await;
    for n in 0..3 {
        store
            .create(NewNotification::new(format!("short {n}")).duration_ms(1000))
            .await;
    }
    let presenter = BannerPresenter::new(Arc::clone(&store), BannerConfig::default());
    assert_eq!(presenter.state_of(oldest.as_str()), None);

    advance(1001).await;
    let visible = presenter.visible();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].record.id, oldest);
    assert_eq!(
        visible[0].state,
        BannerState::Timed {
            duration: Duration::from_millis(6500)
        }
    );
}

#[tokio::test(start_paused = true)]
async fn test_new_records_push_out_without_dismissing() {
    let (store, _) = helpers::memory_store().await;
    let config = BannerConfig {
        max_visible: 1,
        ..BannerConfig::default()
    };
    let first = store.create(NewNotification::new("first")).await;
    let presenter = Arc::new(BannerPresenter::new(Arc::clone(&store), config));
    presenter.watch();

    let second = store.create(NewNotification::new("second")).await;
    advance(1).await;
    assert_eq!(presenter.state_of(first.as_str()), None);
    assert!(presenter.state_of(second.as_str()).is_some());

    presenter.close(second.as_str());
    let visible = presenter.visible();
    assert_eq!(visible[0].record.id, first);
    presenter.shutdown();
}

#[tokio::test(start_paused = true)]
async fn test_open_marks_related_records_read() {
    let (store, _) = helpers::memory_store().await;
    let notice = store
        .create(
            NewNotification::new("Notice")
                .kind(NotificationKind::Notice)
                .reference("n-5"),
        )
        .await;
    let reply = store
        .create(
            NewNotification::new("Reply")
                .kind(NotificationKind::Message)
                .reference("n-5"),
        )
        .await;
    let repost = store
        .create(
            NewNotification::new("Notice again")
                .kind(NotificationKind::Notice)
                .reference("n-5"),
        )
        .await;
    let presenter = BannerPresenter::new(Arc::clone(&store), BannerConfig::default());

    let route = presenter.open(repost.as_str()).await;
    assert_eq!(route.as_deref(), Some("/notice-board/n-5"));
    assert!(store.get(repost.as_str()).unwrap().read);
    assert!(store.get(notice.as_str()).unwrap().read);
    assert!(!store.get(reply.as_str()).unwrap().read);
    assert_eq!(presenter.visible().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_drop_cancels_timers() {
    let (store, _) = helpers::memory_store().await;
    store.create(NewNotification::new("a")).await;
    let presenter = BannerPresenter::new(Arc::clone(&store), BannerConfig::default());
    assert_eq!(presenter.pending_timers(), 1);
    drop(presenter);

    advance(10_000).await;
    assert_eq!(store.len(), 1);
}
