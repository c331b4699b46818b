//! Notification record model, producer payload, and wire format.

pub mod kind;
pub mod model;
pub mod payload;
pub mod wire;

pub use kind::NotificationKind;
pub use model::NotificationRecord;
pub use payload::NewNotification;
pub use wire::StoredNotification;
