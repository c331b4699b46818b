//! Transient, auto-expiring banners over the newest notifications.

pub mod presenter;
pub mod state;
pub mod timer;

pub use presenter::{BannerPresenter, BannerView};
pub use state::{BannerEvent, BannerState, BannerTiming, TimerEffect, Transition};
pub use timer::TimerRegistry;
