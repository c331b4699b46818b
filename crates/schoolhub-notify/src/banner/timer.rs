//! Auto-dismiss timers, one per banner.

use std::collections::HashMap;
use std::time::Duration;

use tokio::task::AbortHandle;
use tracing::trace;

use schoolhub_core::types::id::NotificationId;

/// A scheduled countdown.
#[derive(Debug)]
struct TimerHandle {
    /// Distinguishes this countdown from earlier ones for the same banner.
    generation: u64,
    /// Handle to the sleeping task.
    abort: AbortHandle,
}

/// Tracks pending countdowns by notification id.
///
/// Each countdown runs as a Tokio task that sleeps and then invokes its
/// callback with the generation it was scheduled under. Cancelling aborts
/// the task and forgets the handle; a callback that races a cancellation
/// is recognised as stale through [`TimerRegistry::complete`].
///
/// Scheduling requires a Tokio runtime context.
#[derive(Debug, Default)]
pub struct TimerRegistry {
    next_generation: u64,
    active: HashMap<NotificationId, TimerHandle>,
}

impl TimerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a countdown for `id`, replacing any pending one.
    ///
    /// Returns the generation passed to `on_fire`.
    pub fn schedule<F>(&mut self, id: NotificationId, after: Duration, on_fire: F) -> u64
    where
        F: FnOnce(u64) + Send + 'static,
    {
        self.cancel(id.as_str());
        self.next_generation += 1;
        let generation = self.next_generation;

        let task = tokio::spawn(async move {
            tokio::time::sleep(after).await;
            on_fire(generation);
        });

        trace!(%id, generation, ?after, "Banner timer scheduled");
        self.active.insert(
            id,
            TimerHandle {
                generation,
                abort: task.abort_handle(),
            },
        );
        generation
    }

    /// Cancel the countdown for `id`. Returns `false` if none was pending,
    /// so cancelling twice is harmless.
    pub fn cancel(&mut self, id: &str) -> bool {
        match self.active.remove(id) {
            Some(handle) => {
                handle.abort.abort();
                trace!(id, generation = handle.generation, "Banner timer cancelled");
                true
            }
            None => false,
        }
    }

    /// Retire the countdown that just fired.
    ///
    /// Returns `true` only if `generation` is the countdown currently
    /// registered for `id`; a stale callback gets `false` and must not act.
    pub fn complete(&mut self, id: &str, generation: u64) -> bool {
        match self.active.get(id) {
            Some(handle) if handle.generation == generation => {
                self.active.remove(id);
                true
            }
            _ => false,
        }
    }

    /// Cancel every pending countdown. Returns how many were cancelled.
    pub fn cancel_all(&mut self) -> usize {
        let count = self.active.len();
        for (_, handle) in self.active.drain() {
            handle.abort.abort();
        }
        count
    }

    /// Number of pending countdowns.
    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// Whether no countdown is pending.
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

impl Drop for TimerRegistry {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
