//! Notification creation command.

use clap::Args;

use crate::output;
use schoolhub_core::result::AppResult;
use schoolhub_notify::{NewNotification, NotificationKind, NotificationStore};

/// Arguments for `send`
#[derive(Debug, Args)]
pub struct SendArgs {
    /// Message body
    pub message: String,
    /// Kind: message, notice, homework, system, success, error, or any other name
    #[arg(short, long, default_value = "system")]
    pub kind: NotificationKind,
    /// Title
    #[arg(short, long)]
    pub title: Option<String>,
    /// Related entity id (message thread, notice, homework)
    #[arg(short, long)]
    pub reference: Option<String>,
    /// Recipient user id
    #[arg(long)]
    pub recipient: Option<String>,
    /// Recipient role, e.g. teacher or parent
    #[arg(long)]
    pub role: Option<String>,
    /// Sender display name
    #[arg(long)]
    pub sender: Option<String>,
    /// Priority label, e.g. high
    #[arg(long)]
    pub priority: Option<String>,
    /// Keep the banner until dismissed
    #[arg(long)]
    pub persistent: bool,
    /// Banner duration in milliseconds
    #[arg(long)]
    pub duration_ms: Option<u64>,
}

impl SendArgs {
    fn payload(&self) -> NewNotification {
        let mut payload = NewNotification::new(self.message.clone())
            .kind(self.kind.clone())
            .persistent(self.persistent);
        if let Some(title) = &self.title {
            payload = payload.title(title.clone());
        }
        if let Some(reference) = &self.reference {
            payload = payload.reference(reference.as_str());
        }
        if let Some(recipient) = &self.recipient {
            payload = payload.recipient(recipient.as_str());
        }
        if let Some(role) = &self.role {
            payload = payload.role(role.clone());
        }
        if let Some(sender) = &self.sender {
            payload = payload.sender(sender.clone());
        }
        if let Some(priority) = &self.priority {
            payload = payload.priority(priority.clone());
        }
        if let Some(ms) = self.duration_ms {
            payload = payload.duration_ms(ms);
        }
        payload
    }
}

/// Execute `send`
pub async fn execute(args: &SendArgs, store: &NotificationStore) -> AppResult<()> {
    let id = store.create(args.payload()).await;
    output::print_success(&format!("Notification created: {id}"));
    Ok(())
}
