//! Inbox listing commands.

use std::sync::Arc;

use chrono::Utc;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use schoolhub_core::config::AppConfig;
use schoolhub_core::result::AppResult;
use schoolhub_notify::inbox::{InboxEntry, InboxTab, relative_time};
use schoolhub_notify::{InboxPresenter, NotificationKind, NotificationStore};

/// Arguments for `list`
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Tab to show
    #[arg(short, long, default_value = "all")]
    pub tab: InboxTab,
    /// Viewer role; hides notifications addressed to other roles
    #[arg(short, long)]
    pub role: Option<String>,
}

/// Arguments for `unread`
#[derive(Debug, Args)]
pub struct UnreadArgs {
    /// Only count this kind
    #[arg(short, long)]
    pub kind: Option<NotificationKind>,
}

#[derive(Debug, Serialize, Tabled)]
struct InboxRow {
    id: String,
    kind: String,
    title: String,
    message: String,
    when: String,
    read: bool,
    route: String,
}

impl InboxRow {
    fn new(entry: InboxEntry, now: chrono::DateTime<Utc>) -> Self {
        let record = entry.record;
        Self {
            id: record.id.into_string(),
            kind: format!("{} {}", record.kind.icon(), record.kind),
            title: record.title.unwrap_or_default(),
            message: record.message,
            when: relative_time(record.created_at, now),
            read: record.read,
            route: entry.route,
        }
    }
}

/// Execute `list`
pub fn list(
    args: &ListArgs,
    store: &Arc<NotificationStore>,
    config: &AppConfig,
    format: OutputFormat,
) -> AppResult<()> {
    let mut inbox = InboxPresenter::new(Arc::clone(store), &config.notifications.inbox);
    if let Some(role) = &args.role {
        inbox = inbox.with_viewer_role(role.clone());
    }
    inbox.select_tab(args.tab.clone());

    let now = Utc::now();
    let rows: Vec<InboxRow> = inbox
        .entries()
        .into_iter()
        .map(|e| InboxRow::new(e, now))
        .collect();
    output::print_list(&rows, format);

    if format == OutputFormat::Table {
        let badges: Vec<String> = inbox
            .tab_badges()
            .into_iter()
            .map(|(tab, count)| format!("{tab} ({count})"))
            .collect();
        println!("{}", badges.join("  "));
    }
    Ok(())
}

/// Execute `unread`
pub fn unread(args: &UnreadArgs, store: &NotificationStore, format: OutputFormat) -> AppResult<()> {
    let count = store.unread_count(args.kind.as_ref());
    output::print_value("unread", &count, format);
    Ok(())
}
