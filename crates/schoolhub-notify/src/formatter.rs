//! Ready-made payloads for common school events.

use crate::record::{NewNotification, NotificationKind};

/// Builds [`NewNotification`] payloads for the application's producers.
pub struct NotificationFormatter;

impl NotificationFormatter {
    /// A direct message arrived.
    pub fn message_received(sender: &str, preview: &str, thread_id: &str) -> NewNotification {
        NewNotification::new(preview)
            .kind(NotificationKind::Message)
            .title(format!("New message from {sender}"))
            .sender(sender)
            .reference(thread_id)
    }

    /// A notice was posted, optionally to one audience role.
    pub fn notice_posted(title: &str, notice_id: &str, audience: Option<&str>) -> NewNotification {
        let payload = NewNotification::new(title)
            .kind(NotificationKind::Notice)
            .title("New notice")
            .reference(notice_id);
        match audience {
            Some(role) => payload.role(role),
            None => payload,
        }
    }

    /// Homework was assigned for a subject.
    pub fn homework_assigned(subject: &str, due: &str, homework_id: &str) -> NewNotification {
        NewNotification::new(format!("{subject} homework is due {due}"))
            .kind(NotificationKind::Homework)
            .title("Homework assigned")
            .reference(homework_id)
    }

    /// Fee payment reminder for parents. Stays until dismissed.
    pub fn fee_reminder(amount: &str, due: &str) -> NewNotification {
        NewNotification::new(format!("A fee of {amount} is due on {due}"))
            .kind(NotificationKind::System)
            .title("Fee reminder")
            .role("parent")
            .priority("high")
            .persistent(true)
    }

    /// Feedback toast after a successful action.
    pub fn action_succeeded(message: &str) -> NewNotification {
        NewNotification::new(message).kind(NotificationKind::Success)
    }

    /// Feedback toast after a failed action. Stays until dismissed.
    pub fn action_failed(message: &str) -> NewNotification {
        NewNotification::new(message)
            .kind(NotificationKind::Error)
            .priority("high")
            .persistent(true)
    }
}
