//! The refresh cycle and the lifetime of the view that owns it.
//!
//! A mounted dashboard holds one [`ViewLifetime`]. Every timer tick calls
//! [`ViewLifetime::run_cycle`], which fetches, builds the view model and
//! hands it to the caller's `apply` closure. Two pieces of shared state make
//! this safe with a cooperative scheduler:
//!
//! - `alive` is cleared on teardown. A cycle checks it before starting and
//!   again right before applying, so a response that lands after unmount is
//!   dropped.
//! - `in_flight` records the id and start time of the running cycle. A tick
//!   that arrives while it is still running is skipped. Once the running
//!   cycle is older than the stale bound, the next tick takes its place and
//!   the old cycle's result is discarded when (if ever) it arrives.

use std::sync::atomic::AtomicBool;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use dioxus_logger::tracing::debug;
use dioxus_logger::tracing::info;
use dioxus_logger::tracing::warn;
use parking_lot::Mutex;
use web_time::Instant;

use crate::error::FetchError;
use crate::fetcher::fetch_snapshot;
use crate::source::ChainSource;
use crate::view_model::build_view;
use crate::view_model::DashboardView;

/// Period of the refresh timer.
pub const REFRESH_PERIOD: Duration = Duration::from_secs(10);

/// Age after which a running cycle no longer blocks new ticks.
pub const STALE_CYCLE_AFTER: Duration = Duration::from_secs(3 * REFRESH_PERIOD.as_secs());

/// How a call to [`ViewLifetime::run_cycle`] ended.
#[derive(Debug, strum::EnumIs)]
pub enum CycleOutcome {
    /// A new view was applied. Carries the number of blocks it holds.
    Applied(usize),
    /// Another cycle was still running; nothing was fetched.
    SkippedOverlap,
    /// The view was already torn down; nothing was fetched.
    SkippedTornDown,
    /// The data arrived after teardown and was discarded.
    Discarded,
    /// The cycle outlived the stale bound and a newer one took over; its
    /// data was discarded.
    Superseded,
    /// The status or staking query failed; the display is unchanged.
    Failed(FetchError),
}

#[derive(Clone, Copy, Debug)]
struct InFlight {
    id: u64,
    started: Instant,
}

#[derive(Debug)]
struct Flags {
    alive: AtomicBool,
    in_flight: Mutex<Option<InFlight>>,
    next_id: AtomicU64,
    stale_after: Duration,
}

/// Shared handle tied to one mounted dashboard. Cheap to clone.
#[derive(Clone, Debug)]
pub struct ViewLifetime(Arc<Flags>);

impl Default for ViewLifetime {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewLifetime {
    pub fn new() -> Self {
        Self::with_stale_after(STALE_CYCLE_AFTER)
    }

    /// A lifetime whose running cycle stops blocking new ticks after
    /// `stale_after`.
    pub fn with_stale_after(stale_after: Duration) -> Self {
        Self(Arc::new(Flags {
            alive: AtomicBool::new(true),
            in_flight: Mutex::new(None),
            next_id: AtomicU64::new(1),
            stale_after,
        }))
    }

    pub fn is_alive(&self) -> bool {
        self.0.alive.load(Ordering::Acquire)
    }

    /// Marks the view as gone. Idempotent.
    pub fn teardown(&self) {
        if self.0.alive.swap(false, Ordering::AcqRel) {
            info!("dashboard torn down; refresh stopped");
        }
    }

    pub fn is_cycle_running(&self) -> bool {
        self.0.in_flight.lock().is_some()
    }

    fn try_begin(&self) -> Option<CycleGuard<'_>> {
        let mut in_flight = self.0.in_flight.lock();
        if let Some(running) = *in_flight {
            let age = running.started.elapsed();
            if age < self.0.stale_after {
                return None;
            }
            warn!(
                "refresh cycle {} stuck for {:?}; starting a new one",
                running.id, age
            );
        }

        let id = self.0.next_id.fetch_add(1, Ordering::Relaxed);
        *in_flight = Some(InFlight {
            id,
            started: Instant::now(),
        });
        Some(CycleGuard { flags: &self.0, id })
    }

    /// Runs one fetch/build/apply cycle against `source`.
    ///
    /// `apply` is called at most once, only while the view is alive, only
    /// while this cycle is still the current one, and only when the status
    /// and staking queries succeeded.
    pub async fn run_cycle<S, F>(&self, source: &S, apply: F) -> CycleOutcome
    where
        S: ChainSource,
        F: FnOnce(DashboardView),
    {
        if !self.is_alive() {
            return CycleOutcome::SkippedTornDown;
        }
        let Some(guard) = self.try_begin() else {
            debug!("previous refresh still running; skipping tick");
            return CycleOutcome::SkippedOverlap;
        };

        let snapshot = match fetch_snapshot(source).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!("Error fetching data: {}", e);
                return CycleOutcome::Failed(e);
            }
        };

        if !self.is_alive() {
            debug!("discarding refresh for height {}: view is gone", snapshot.height);
            return CycleOutcome::Discarded;
        }
        if !guard.is_current() {
            debug!(
                "discarding refresh for height {}: cycle {} was superseded",
                snapshot.height, guard.id
            );
            return CycleOutcome::Superseded;
        }

        let view = build_view(snapshot);
        let num_blocks = view.blocks.len();
        apply(view);
        CycleOutcome::Applied(num_blocks)
    }
}

/// Clears the in-flight slot when the cycle ends, however it ends, unless a
/// newer cycle has taken the slot over.
struct CycleGuard<'a> {
    flags: &'a Flags,
    id: u64,
}

impl CycleGuard<'_> {
    fn is_current(&self) -> bool {
        matches!(*self.flags.in_flight.lock(), Some(running) if running.id == self.id)
    }
}

impl Drop for CycleGuard<'_> {
    fn drop(&mut self) {
        let mut in_flight = self.flags.in_flight.lock();
        if matches!(*in_flight, Some(running) if running.id == self.id) {
            *in_flight = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use tokio::sync::Notify;

    use super::*;
    use crate::source::fake::FakeSource;
    use crate::staking::StakingStats;
    use crate::view_model::DashboardState;

    #[tokio::test]
    async fn successful_cycle_replaces_loading() {
        let lifetime = ViewLifetime::new();
        let mut source = FakeSource::at_height(1000);
        source.staking = Some(StakingStats {
            active_delegations: Some(500),
            total_stakers: None,
            finality_providers: Some(12),
        });
        let mut state = DashboardState::Loading;

        let outcome = lifetime
            .run_cycle(&source, |view| state = DashboardState::Loaded(view))
            .await;

        assert!(matches!(outcome, CycleOutcome::Applied(10)));
        let view = state.view().unwrap();
        assert_eq!(view.summary.current_block_height, 1000);
        assert_eq!(view.summary.active_delegations, 500);
        assert_eq!(view.summary.total_stakers, 0);
        assert_eq!(view.summary.finality_providers, 12);
        assert!(!lifetime.is_cycle_running());
    }

    #[tokio::test]
    async fn failed_first_cycle_stays_loading() {
        let lifetime = ViewLifetime::new();
        let source = FakeSource::unreachable();
        let mut state = DashboardState::Loading;

        let outcome = lifetime
            .run_cycle(&source, |view| state = DashboardState::Loaded(view))
            .await;

        assert!(outcome.is_failed());
        assert!(state.is_loading());
        assert!(!lifetime.is_cycle_running());
    }

    #[tokio::test]
    async fn failed_later_cycle_keeps_previous_view() {
        let lifetime = ViewLifetime::new();
        let mut state = DashboardState::Loading;
        lifetime
            .run_cycle(&FakeSource::at_height(500), |view| {
                state = DashboardState::Loaded(view)
            })
            .await;
        let before = state.clone();

        let outcome = lifetime
            .run_cycle(&FakeSource::unreachable(), |view| {
                state = DashboardState::Loaded(view)
            })
            .await;

        assert!(outcome.is_failed());
        assert_eq!(state, before);
    }

    #[tokio::test]
    async fn nothing_runs_after_teardown() {
        let lifetime = ViewLifetime::new();
        lifetime.teardown();
        let source = FakeSource::at_height(10);
        let mut applied = false;

        let outcome = lifetime.run_cycle(&source, |_| applied = true).await;

        assert!(outcome.is_skipped_torn_down());
        assert!(!applied);
        assert!(source.requested_blocks.borrow().is_empty());
    }

    #[tokio::test]
    async fn response_after_teardown_is_discarded() {
        let lifetime = ViewLifetime::new();
        let gate = Rc::new(Notify::new());
        let mut source = FakeSource::at_height(10);
        source.gate = Some(gate.clone());
        let mut applied = false;

        let cycle = lifetime.run_cycle(&source, |_| applied = true);
        let unmount = async {
            lifetime.teardown();
            gate.notify_one();
        };
        let (outcome, ()) = tokio::join!(cycle, unmount);

        assert!(outcome.is_discarded());
        assert!(!applied);
        assert!(!lifetime.is_cycle_running());
    }

    #[tokio::test]
    async fn overlapping_tick_is_skipped() {
        let lifetime = ViewLifetime::new();
        let gate = Rc::new(Notify::new());
        let mut slow = FakeSource::at_height(10);
        slow.gate = Some(gate.clone());
        let fast = FakeSource::at_height(20);
        let mut applied_heights = Vec::new();
        let mut second_applied = false;

        let first = lifetime.run_cycle(&slow, |view| {
            applied_heights.push(view.summary.current_block_height)
        });
        let second = async {
            let outcome = lifetime.run_cycle(&fast, |_| second_applied = true).await;
            gate.notify_one();
            outcome
        };
        let (first, second) = tokio::join!(first, second);

        assert!(first.is_applied());
        assert!(second.is_skipped_overlap());
        assert!(!second_applied);
        assert_eq!(applied_heights, vec![10]);
        assert!(fast.requested_blocks.borrow().is_empty());

        // the guard is released, so the next tick runs
        let third = lifetime.run_cycle(&fast, |_| {}).await;
        assert!(third.is_applied());
    }

    #[tokio::test]
    async fn hung_cycle_does_not_block_later_ticks() {
        let lifetime = ViewLifetime::with_stale_after(Duration::ZERO);
        let mut hung = FakeSource::at_height(10);
        // never notified
        hung.gate = Some(Rc::new(Notify::new()));
        let healthy = FakeSource::at_height(20);
        let mut hung_applied = false;
        let mut applied_heights = Vec::new();

        let stuck = lifetime.run_cycle(&hung, |_| hung_applied = true);
        let later = async {
            let mut outcomes = Vec::new();
            for _ in 0..5 {
                let outcome = lifetime
                    .run_cycle(&healthy, |view| {
                        applied_heights.push(view.summary.current_block_height)
                    })
                    .await;
                outcomes.push(outcome);
            }
            outcomes
        };
        let outcomes = tokio::select! {
            biased;
            _ = stuck => panic!("gated cycle should never finish"),
            outcomes = later => outcomes,
        };

        assert!(outcomes.iter().all(CycleOutcome::is_applied));
        assert_eq!(applied_heights, vec![20; 5]);
        assert!(!hung_applied);
    }

    #[tokio::test]
    async fn superseded_cycle_result_is_discarded() {
        let lifetime = ViewLifetime::with_stale_after(Duration::ZERO);
        let gate = Rc::new(Notify::new());
        let mut slow = FakeSource::at_height(10);
        slow.gate = Some(gate.clone());
        let fast = FakeSource::at_height(20);
        let mut applied_heights = Vec::new();

        let first = lifetime.run_cycle(&slow, |view| {
            applied_heights.push(view.summary.current_block_height)
        });
        let second = async {
            let outcome = lifetime.run_cycle(&fast, |_| {}).await;
            gate.notify_one();
            outcome
        };
        let (first, second) = tokio::join!(first, second);

        assert!(second.is_applied());
        assert!(first.is_superseded());
        assert!(applied_heights.is_empty());
        assert!(!lifetime.is_cycle_running());
    }

    #[test]
    fn teardown_is_idempotent() {
        let lifetime = ViewLifetime::new();
        let clone = lifetime.clone();
        lifetime.teardown();
        clone.teardown();
        assert!(!lifetime.is_alive());
        assert!(!clone.is_alive());
    }
}
