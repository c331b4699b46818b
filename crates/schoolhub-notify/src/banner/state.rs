//! Per-banner state machine.
//!
//! Transitions are pure: they return the next state together with the timer
//! effect the presenter must apply. Scheduling and cancelling the actual
//! timer is left to [`TimerRegistry`](super::timer::TimerRegistry).

use std::time::Duration;

use schoolhub_core::config::notifications::BannerConfig;

use crate::record::NotificationRecord;

/// Lifecycle state of one banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerState {
    /// Visible with a countdown running.
    Timed {
        /// Length of the running countdown.
        duration: Duration,
    },
    /// Visible, countdown cancelled while the pointer is over the banner.
    Paused,
    /// Visible until dismissed by hand (auto-dismiss disabled).
    Pinned,
    /// Removed from view for the rest of the session.
    Dismissed,
}

/// Input to the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerEvent {
    /// Pointer entered the banner.
    PointerEnter,
    /// Pointer left the banner.
    PointerLeave,
    /// The countdown ran out.
    Elapsed,
    /// Close button clicked.
    Close,
    /// Banner body clicked (open the target).
    Open,
}

/// What the presenter must do with the banner's timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEffect {
    /// Leave the timer as it is.
    Keep,
    /// Replace any pending timer with a fresh countdown.
    Schedule(Duration),
    /// Cancel the pending timer, if any.
    Cancel,
}

/// Result of a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub state: BannerState,
    pub effect: TimerEffect,
}

impl Transition {
    fn new(state: BannerState, effect: TimerEffect) -> Self {
        Self { state, effect }
    }
}

/// Timing parameters resolved once when a banner is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BannerTiming {
    /// Countdown when first shown.
    pub duration: Duration,
    /// Countdown restarted after hover.
    pub resume: Duration,
    /// Whether the banner counts down at all.
    pub auto_dismiss: bool,
}

impl BannerTiming {
    /// Resolve timing for `record` against the configured defaults.
    pub fn for_record(record: &NotificationRecord, config: &BannerConfig) -> Self {
        Self {
            duration: record.banner_duration(config),
            resume: record.resume_duration(config),
            auto_dismiss: record.auto_dismiss,
        }
    }
}

impl BannerState {
    /// State of a banner entering the visible set.
    pub fn initial(timing: &BannerTiming) -> Transition {
        if timing.auto_dismiss {
            Transition::new(
                Self::Timed {
                    duration: timing.duration,
                },
                TimerEffect::Schedule(timing.duration),
            )
        } else {
            Transition::new(Self::Pinned, TimerEffect::Keep)
        }
    }

    /// Apply `event`.
    pub fn on_event(self, event: BannerEvent, timing: &BannerTiming) -> Transition {
        use BannerEvent::*;

        match (self, event) {
            (Self::Dismissed, _) => Transition::new(Self::Dismissed, TimerEffect::Keep),
            (_, Close | Open) => Transition::new(Self::Dismissed, TimerEffect::Cancel),
            (Self::Timed { .. }, Elapsed) => Transition::new(Self::Dismissed, TimerEffect::Cancel),
            (Self::Timed { .. }, PointerEnter) => Transition::new(Self::Paused, TimerEffect::Cancel),
            (Self::Paused, PointerLeave) => Transition::new(
                Self::Timed {
                    duration: timing.resume,
                },
                TimerEffect::Schedule(timing.resume),
            ),
            // Pinned ignores hover, a stale Elapsed is ignored while paused,
            // and repeated enter/leave events are idempotent.
            (state, _) => Transition::new(state, TimerEffect::Keep),
        }
    }

    /// Whether the banner is on screen.
    pub fn is_visible(&self) -> bool {
        !matches!(self, Self::Dismissed)
    }
}
