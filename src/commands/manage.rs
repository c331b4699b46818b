//! Read-state and removal commands.

use clap::Args;

use crate::output;
use schoolhub_core::error::AppError;
use schoolhub_core::result::AppResult;
use schoolhub_notify::{NotificationKind, NotificationStore};

/// Arguments for `read-ref`
#[derive(Debug, Args)]
pub struct ReadRefArgs {
    /// Reference id
    pub reference: String,
    /// Only mark this kind
    #[arg(short, long)]
    pub kind: Option<NotificationKind>,
}

fn ensure_exists(store: &NotificationStore, id: &str) -> AppResult<()> {
    match store.get(id) {
        Some(_) => Ok(()),
        None => Err(AppError::not_found(format!("Notification '{id}' not found"))),
    }
}

/// Execute `read`
pub async fn read(id: &str, store: &NotificationStore) -> AppResult<()> {
    ensure_exists(store, id)?;
    store.mark_read(id).await;
    output::print_success(&format!("Marked {id} as read"));
    Ok(())
}

/// Execute `read-all`
pub async fn read_all(store: &NotificationStore) -> AppResult<()> {
    let count = store.mark_all_read().await;
    output::print_success(&format!("Marked {count} notification(s) as read"));
    Ok(())
}

/// Execute `read-ref`
pub async fn read_ref(args: &ReadRefArgs, store: &NotificationStore) -> AppResult<()> {
    let count = store
        .mark_by_reference(&args.reference, args.kind.as_ref())
        .await;
    output::print_success(&format!(
        "Marked {count} notification(s) for '{}' as read",
        args.reference
    ));
    Ok(())
}

/// Execute `remove`
pub async fn remove(id: &str, store: &NotificationStore) -> AppResult<()> {
    ensure_exists(store, id)?;
    store.remove(id).await;
    output::print_success(&format!("Removed {id}"));
    Ok(())
}

/// Execute `clear`
pub async fn clear(store: &NotificationStore) -> AppResult<()> {
    let count = store.len();
    store.clear_all().await;
    output::print_success(&format!("Removed {count} notification(s)"));
    Ok(())
}
