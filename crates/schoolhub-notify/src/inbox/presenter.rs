//! Inbox presenter.

use std::sync::Arc;

use tracing::debug;

use schoolhub_core::config::notifications::InboxConfig;

use super::filter::{InboxTab, visible_to};
use crate::record::NotificationRecord;
use crate::store::NotificationStore;

/// One row of the inbox.
#[derive(Debug, Clone, PartialEq)]
pub struct InboxEntry {
    pub record: NotificationRecord,
    /// Where opening the row navigates.
    pub route: String,
}

impl From<NotificationRecord> for InboxEntry {
    fn from(record: NotificationRecord) -> Self {
        let route = record.route();
        Self { record, route }
    }
}

/// Filterable view over the whole notification list.
///
/// Rows are recomputed from the store on every call: filtered by the
/// active tab and the viewer's role, then sorted newest-first by
/// `created_at`. Bulk actions act on the whole store.
#[derive(Debug)]
pub struct InboxPresenter {
    store: Arc<NotificationStore>,
    tabs: Vec<InboxTab>,
    active: InboxTab,
    viewer_role: Option<String>,
}

impl InboxPresenter {
    pub fn new(store: Arc<NotificationStore>, config: &InboxConfig) -> Self {
        Self {
            store,
            tabs: InboxTab::from_names(&config.tabs),
            active: InboxTab::All,
            viewer_role: None,
        }
    }

    /// Scope the view to records addressed to `role` or to everyone.
    pub fn with_viewer_role(mut self, role: impl Into<String>) -> Self {
        self.viewer_role = Some(role.into()).filter(|r: &String| !r.is_empty());
        self
    }

    pub fn tabs(&self) -> &[InboxTab] {
        &self.tabs
    }

    pub fn active_tab(&self) -> &InboxTab {
        &self.active
    }

    /// Switch to `tab`. Tabs outside the configured set are accepted too.
    pub fn select_tab(&mut self, tab: InboxTab) {
        debug!(tab = %tab, "Inbox tab selected");
        self.active = tab;
    }

    /// Rows for the active tab, newest first.
    pub fn entries(&self) -> Vec<InboxEntry> {
        self.filtered(&self.active)
            .into_iter()
            .map(InboxEntry::from)
            .collect()
    }

    /// Unread rows on the active tab.
    pub fn unread_count(&self) -> usize {
        self.unread_on(&self.active)
    }

    /// Unread count for every configured tab, in tab order.
    pub fn tab_badges(&self) -> Vec<(InboxTab, usize)> {
        self.tabs
            .iter()
            .map(|tab| (tab.clone(), self.unread_on(tab)))
            .collect()
    }

    /// Open a row: mark it read and return its route. Unknown ids give `None`.
    pub async fn open(&self, id: &str) -> Option<String> {
        let record = self.store.get(id)?;
        self.store.mark_read(id).await;
        Some(record.route())
    }

    /// Mark a row read without navigating.
    pub async fn mark_read(&self, id: &str) {
        self.store.mark_read(id).await;
    }

    /// Mark every notification read. Returns how many changed.
    pub async fn mark_all_read(&self) -> usize {
        self.store.mark_all_read().await
    }

    /// Remove every notification.
    pub async fn clear_all(&self) {
        self.store.clear_all().await;
    }

    fn filtered(&self, tab: &InboxTab) -> Vec<NotificationRecord> {
        let viewer = self.viewer_role.as_deref();
        let mut rows: Vec<NotificationRecord> = self
            .store
            .records()
            .iter()
            .filter(|r| tab.matches(r) && visible_to(r, viewer))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        rows
    }

    fn unread_on(&self, tab: &InboxTab) -> usize {
        let viewer = self.viewer_role.as_deref();
        self.store
            .records()
            .iter()
            .filter(|r| r.is_unread() && tab.matches(r) && visible_to(r, viewer))
            .count()
    }
}
