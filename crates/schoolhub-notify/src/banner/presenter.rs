//! Banner (toast) presenter.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, Weak};

use tokio::task::JoinHandle;
use tracing::{debug, trace};

use schoolhub_core::config::notifications::BannerConfig;
use schoolhub_core::types::id::NotificationId;

use super::state::{BannerEvent, BannerState, BannerTiming, TimerEffect};
use super::timer::TimerRegistry;
use crate::record::NotificationRecord;
use crate::store::{NotificationStore, Snapshot};

/// A banner currently on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct BannerView {
    /// The record shown, as of the last store snapshot.
    pub record: NotificationRecord,
    /// Lifecycle state.
    pub state: BannerState,
}

#[derive(Debug)]
struct Banner {
    record: NotificationRecord,
    timing: BannerTiming,
    state: BannerState,
}

/// Presentation state shared with timer callbacks.
#[derive(Debug)]
struct BannerBoard {
    me: Weak<Mutex<BannerBoard>>,
    config: BannerConfig,
    /// Latest store snapshot.
    records: Snapshot,
    /// Visible banners, in store order.
    banners: Vec<Banner>,
    /// Ids dismissed this session. Never persisted.
    dismissed: HashSet<NotificationId>,
    timers: TimerRegistry,
}

impl BannerBoard {
    /// Recompute the visible set: the first `max_visible` records that were
    /// not dismissed. Banners that stay keep their state; banners that
    /// drop out lose their timer; newcomers start fresh.
    fn reconcile(&mut self) {
        let wanted: Vec<NotificationRecord> = self
            .records
            .iter()
            .filter(|r| !self.dismissed.contains(&r.id))
            .take(self.config.max_visible)
            .cloned()
            .collect();

        let mut previous = std::mem::take(&mut self.banners);
        for banner in &previous {
            if !wanted.iter().any(|r| r.id == banner.record.id) {
                self.timers.cancel(banner.record.id.as_str());
                trace!(id = %banner.record.id, "Banner left the visible set");
            }
        }

        for record in wanted {
            match previous.iter().position(|b| b.record.id == record.id) {
                Some(index) => {
                    let mut banner = previous.swap_remove(index);
                    banner.record = record;
                    self.banners.push(banner);
                }
                None => {
                    let timing = BannerTiming::for_record(&record, &self.config);
                    let transition = BannerState::initial(&timing);
                    let id = record.id.clone();
                    debug!(%id, state = ?transition.state, "Banner shown");
                    self.banners.push(Banner {
                        record,
                        timing,
                        state: transition.state,
                    });
                    self.apply_effect(id, transition.effect);
                }
            }
        }
    }

    /// Feed `event` to the banner for `id`. Returns the new state, or `None`
    /// if no such banner is visible.
    fn dispatch(&mut self, id: &str, event: BannerEvent) -> Option<BannerState> {
        let index = self.banners.iter().position(|b| b.record.id == id)?;
        let banner = &mut self.banners[index];
        let transition = banner.state.on_event(event, &banner.timing);
        banner.state = transition.state;
        let id = banner.record.id.clone();

        debug!(%id, ?event, state = ?transition.state, "Banner transition");
        self.apply_effect(id.clone(), transition.effect);

        if !transition.state.is_visible() {
            self.banners.remove(index);
            self.dismissed.insert(id);
            self.reconcile();
        }
        Some(transition.state)
    }

    fn apply_effect(&mut self, id: NotificationId, effect: TimerEffect) {
        match effect {
            TimerEffect::Keep => {}
            TimerEffect::Cancel => {
                self.timers.cancel(id.as_str());
            }
            TimerEffect::Schedule(after) => {
                let board = self.me.clone();
                let fired = id.clone();
                self.timers.schedule(id, after, move |generation| {
                    if let Some(board) = board.upgrade() {
                        lock(&board).on_elapsed(fired.as_str(), generation);
                    }
                });
            }
        }
    }

    fn on_elapsed(&mut self, id: &str, generation: u64) {
        if self.timers.complete(id, generation) {
            self.dispatch(id, BannerEvent::Elapsed);
        } else {
            trace!(id, generation, "Ignoring stale banner timer");
        }
    }
}

fn lock(board: &Mutex<BannerBoard>) -> MutexGuard<'_, BannerBoard> {
    board.lock().unwrap_or_else(|e| e.into_inner())
}

/// Shows the newest notifications as transient, auto-expiring banners.
///
/// The visible set is the first `max_visible` store records not dismissed
/// this session, in store order. Each banner runs its own
/// [`BannerState`] machine; countdowns are Tokio tasks, so the presenter
/// must be created and driven inside a Tokio runtime.
///
/// Dismissal is local to the presenter and independent of the record's
/// `read` flag. All pending timers are cancelled on [`shutdown`] and on drop.
///
/// [`shutdown`]: BannerPresenter::shutdown
#[derive(Debug)]
pub struct BannerPresenter {
    store: Arc<NotificationStore>,
    board: Arc<Mutex<BannerBoard>>,
    watcher: Mutex<Option<JoinHandle<()>>>,
}

impl BannerPresenter {
    /// Create a presenter over `store` and show the initial banners.
    pub fn new(store: Arc<NotificationStore>, config: BannerConfig) -> Self {
        let records = store.records();
        let board = Arc::new_cyclic(|me| {
            Mutex::new(BannerBoard {
                me: me.clone(),
                config,
                records,
                banners: Vec::new(),
                dismissed: HashSet::new(),
                timers: TimerRegistry::new(),
            })
        });
        lock(&board).reconcile();

        Self {
            store,
            board,
            watcher: Mutex::new(None),
        }
    }

    /// Re-read the store and recompute the visible set.
    pub fn sync(&self) {
        let records = self.store.records();
        let mut board = lock(&self.board);
        board.records = records;
        board.reconcile();
    }

    /// Follow store changes in a background task until [`shutdown`].
    ///
    /// [`shutdown`]: BannerPresenter::shutdown
    pub fn watch(self: &Arc<Self>) {
        let presenter = Arc::downgrade(self);
        let mut changes = self.store.subscribe();
        let task = tokio::spawn(async move {
            // Catch up on changes made before the subscription.
            loop {
                match presenter.upgrade() {
                    Some(presenter) => presenter.sync(),
                    None => break,
                }
                if changes.changed().await.is_err() {
                    break;
                }
            }
        });

        let mut watcher = self.watcher.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(previous) = watcher.replace(task) {
            previous.abort();
        }
    }

    /// Banners currently on screen, newest first.
    pub fn visible(&self) -> Vec<BannerView> {
        lock(&self.board)
            .banners
            .iter()
            .map(|b| BannerView {
                record: b.record.clone(),
                state: b.state,
            })
            .collect()
    }

    /// State of the banner for `id`: its live state if visible,
    /// `Dismissed` if dismissed this session, otherwise `None`.
    pub fn state_of(&self, id: &str) -> Option<BannerState> {
        let board = lock(&self.board);
        if let Some(banner) = board.banners.iter().find(|b| b.record.id == id) {
            return Some(banner.state);
        }
        board
            .dismissed
            .contains(id)
            .then_some(BannerState::Dismissed)
    }

    /// Pointer entered the banner: cancel its countdown.
    pub fn pointer_enter(&self, id: &str) -> Option<BannerState> {
        lock(&self.board).dispatch(id, BannerEvent::PointerEnter)
    }

    /// Pointer left the banner: restart a fresh, shorter countdown.
    pub fn pointer_leave(&self, id: &str) -> Option<BannerState> {
        lock(&self.board).dispatch(id, BannerEvent::PointerLeave)
    }

    /// Close button clicked: dismiss without touching the read flag.
    pub fn close(&self, id: &str) -> Option<BannerState> {
        lock(&self.board).dispatch(id, BannerEvent::Close)
    }

    /// Banner body clicked.
    ///
    /// Marks the record read (and every record sharing its reference and
    /// kind), dismisses the banner, and returns the route to navigate to.
    /// Returns `None` if no banner for `id` is visible.
    pub async fn open(&self, id: &str) -> Option<String> {
        let record = {
            let mut board = lock(&self.board);
            let record = board
                .banners
                .iter()
                .find(|b| b.record.id == id)
                .map(|b| b.record.clone())?;
            board.dispatch(id, BannerEvent::Open);
            record
        };

        self.store.mark_read(id).await;
        if let Some(reference) = &record.reference_id {
            self.store
                .mark_by_reference(reference.as_str(), Some(&record.kind))
                .await;
        }
        self.sync();

        Some(record.route())
    }

    /// Number of countdowns currently pending.
    pub fn pending_timers(&self) -> usize {
        lock(&self.board).timers.len()
    }

    /// Stop following the store and cancel every pending countdown.
    pub fn shutdown(&self) {
        if let Some(task) = self
            .watcher
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take()
        {
            task.abort();
        }
        let cancelled = lock(&self.board).timers.cancel_all();
        debug!(cancelled, "Banner presenter shut down");
    }
}

impl Drop for BannerPresenter {
    fn drop(&mut self) {
        self.shutdown();
    }
}
