//! Producer payload and its normalization into a record.

use chrono::{DateTime, SubsecRound, Utc};

use schoolhub_core::types::id::{NotificationId, ReferenceId, UserId};

use super::kind::NotificationKind;
use super::model::NotificationRecord;

/// Loosely-shaped notification handed in by a producer.
///
/// Only `message` is meaningful to every producer; everything else is
/// optional and defaulted by [`NewNotification::normalize`]. The payload is
/// not validated: an empty message is stored as-is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewNotification {
    pub id: Option<NotificationId>,
    pub reference_id: Option<ReferenceId>,
    pub recipient_id: Option<UserId>,
    pub recipient_role: Option<String>,
    pub kind: Option<NotificationKind>,
    pub title: Option<String>,
    pub message: String,
    pub sender: Option<String>,
    pub priority: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub read: Option<bool>,
    pub persistent: bool,
    pub auto_dismiss: Option<bool>,
    pub duration_ms: Option<u64>,
}

impl NewNotification {
    /// Start a payload with the given body text.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    /// Use a caller-chosen identifier (e.g. an idempotency key).
    pub fn with_id(mut self, id: impl Into<NotificationId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the kind.
    pub fn kind(mut self, kind: NotificationKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Set the headline.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Point the notification at a domain object.
    pub fn reference(mut self, reference_id: impl Into<ReferenceId>) -> Self {
        self.reference_id = Some(reference_id.into());
        self
    }

    /// Address the notification to one user.
    pub fn recipient(mut self, recipient_id: impl Into<UserId>) -> Self {
        self.recipient_id = Some(recipient_id.into());
        self
    }

    /// Restrict inbox visibility to one role.
    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.recipient_role = Some(role.into());
        self
    }

    /// Set the sender display name.
    pub fn sender(mut self, sender: impl Into<String>) -> Self {
        self.sender = Some(sender.into());
        self
    }

    /// Set the priority badge label.
    pub fn priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    /// Set an explicit creation time.
    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Set the initial read flag.
    pub fn read(mut self, read: bool) -> Self {
        self.read = Some(read);
        self
    }

    /// Keep the banner up until the user dismisses it.
    pub fn persistent(mut self, persistent: bool) -> Self {
        self.persistent = persistent;
        self
    }

    /// Override the auto-dismiss flag derived from `persistent`.
    pub fn auto_dismiss(mut self, auto_dismiss: bool) -> Self {
        self.auto_dismiss = Some(auto_dismiss);
        self
    }

    /// Override the banner visible duration.
    pub fn duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    /// Normalize into a canonical record.
    ///
    /// Assigns an id when none (or an empty one) was supplied, stamps
    /// `created_at` with `now`, and resolves `auto_dismiss` to
    /// `!persistent` unless it was given explicitly.
    pub fn normalize(self, now: DateTime<Utc>) -> NotificationRecord {
        let id = self
            .id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(NotificationId::generate);

        NotificationRecord {
            id,
            reference_id: self.reference_id.filter(|r| !r.is_empty()),
            recipient_id: self.recipient_id.filter(|u| !u.is_empty()),
            recipient_role: self.recipient_role.filter(|r| !r.is_empty()),
            kind: self.kind.unwrap_or_default(),
            title: self.title,
            message: self.message,
            sender: self.sender,
            priority: self.priority,
            created_at: self.created_at.unwrap_or(now).trunc_subsecs(3),
            read: self.read.unwrap_or(false),
            persistent: self.persistent,
            auto_dismiss: self.auto_dismiss.unwrap_or(!self.persistent),
            duration_ms: self.duration_ms,
        }
    }
}
