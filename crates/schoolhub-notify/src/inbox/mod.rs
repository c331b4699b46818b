//! Full, filterable notification list.

pub mod filter;
pub mod presenter;
pub mod time;

pub use filter::{InboxTab, visible_to};
pub use presenter::{InboxEntry, InboxPresenter};
pub use time::relative_time;
