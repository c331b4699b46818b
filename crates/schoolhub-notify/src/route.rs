//! Navigation targets for opened notifications.
//!
//! This table is the contract between the notification engine and the
//! application's router. Kinds without an entry open the dashboard.

use schoolhub_core::types::id::ReferenceId;

use crate::record::NotificationKind;

/// Fallback route for kinds without a dedicated page.
pub const DASHBOARD: &str = "/dashboard";

/// Resolve the in-app path for a notification of `kind`.
pub fn route_for(kind: &NotificationKind, reference_id: Option<&ReferenceId>) -> String {
    let reference = reference_id.filter(|r| !r.is_empty());
    match (kind, reference) {
        (NotificationKind::Message, Some(r)) => format!("/messages/{r}"),
        (NotificationKind::Message, None) => "/messages".to_string(),
        (NotificationKind::Notice, Some(r)) => format!("/notice-board/{r}"),
        (NotificationKind::Notice, None) => "/notice-board".to_string(),
        (NotificationKind::Homework, _) => "/homework".to_string(),
        _ => DASHBOARD.to_string(),
    }
}
