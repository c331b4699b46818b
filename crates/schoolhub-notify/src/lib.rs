//! # schoolhub-notify
//!
//! In-process notification engine for SchoolHub. Provides:
//!
//! - The canonical notification record and its legacy-tolerant wire format
//! - A write-through [`NotificationStore`], the single writer of the list
//! - A timer-driven [`BannerPresenter`] showing the newest records as toasts
//! - A filterable [`InboxPresenter`] for the full notification list
//! - Ready-made payloads for the application's producers
//!
//! Presenters never mutate the list directly; every change goes through the
//! store, and both presenters recompute from its snapshots.

pub mod banner;
pub mod formatter;
pub mod inbox;
pub mod record;
pub mod route;
pub mod store;

pub use banner::BannerPresenter;
pub use formatter::NotificationFormatter;
pub use inbox::InboxPresenter;
pub use record::{NewNotification, NotificationKind, NotificationRecord};
pub use store::NotificationStore;
