//! Canonical notification record.

use std::time::Duration;

use chrono::{DateTime, Utc};

use schoolhub_core::config::notifications::BannerConfig;
use schoolhub_core::types::id::{NotificationId, ReferenceId, UserId};

use super::kind::NotificationKind;
use crate::route;

/// A single notification entry held by the store.
///
/// Records are produced only by normalizing a
/// [`NewNotification`](super::NewNotification). Apart from `read`, which the
/// store flips, every field is fixed at creation.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationRecord {
    /// Unique notification identifier.
    pub id: NotificationId,
    /// Domain object this notification points at (message, notice).
    pub reference_id: Option<ReferenceId>,
    /// Intended recipient. `None` means broadcast.
    pub recipient_id: Option<UserId>,
    /// Coarse audience role (e.g. `"teacher"`, `"parent"`).
    pub recipient_role: Option<String>,
    /// Notification kind.
    pub kind: NotificationKind,
    /// Headline text.
    pub title: Option<String>,
    /// Body text.
    pub message: String,
    /// Display name of the originator.
    pub sender: Option<String>,
    /// Free-form priority label surfaced as a badge.
    pub priority: Option<String>,
    /// When the notification was created (millisecond precision).
    pub created_at: DateTime<Utc>,
    /// Whether the notification has been read.
    pub read: bool,
    /// Whether the banner should stay until dismissed by hand.
    pub persistent: bool,
    /// Whether the banner auto-dismisses. Resolved once at creation.
    pub auto_dismiss: bool,
    /// Banner visible duration override.
    pub duration_ms: Option<u64>,
}

impl NotificationRecord {
    /// Check if the notification has not been read yet.
    pub fn is_unread(&self) -> bool {
        !self.read
    }

    /// Banner countdown for a freshly shown banner.
    pub fn banner_duration(&self, config: &BannerConfig) -> Duration {
        Duration::from_millis(self.duration_ms.unwrap_or(config.default_duration_ms))
    }

    /// Banner countdown restarted after the pointer leaves a paused banner:
    /// half the record's own duration, or the configured resume default.
    pub fn resume_duration(&self, config: &BannerConfig) -> Duration {
        Duration::from_millis(
            self.duration_ms
                .map(|ms| ms / 2)
                .unwrap_or(config.resume_duration_ms),
        )
    }

    /// In-app route opened when the notification is clicked.
    pub fn route(&self) -> String {
        route::route_for(&self.kind, self.reference_id.as_ref())
    }

    /// Whether the record has the given reference id.
    pub fn references(&self, reference_id: &str) -> bool {
        self.reference_id
            .as_ref()
            .is_some_and(|r| r.as_str() == reference_id)
    }
}
