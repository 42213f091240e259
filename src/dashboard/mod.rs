//! Dashboard controller for backend status polling.
//!
//! Owns the [`ViewState`], runs refresh cycles against the backend and
//! notifies subscribers whenever the state changes. Rendering lives in
//! [`render`] and is a pure function of a state snapshot.

pub mod client;
pub mod error;
pub mod render;
pub mod types;

pub use client::{Endpoint, StatusClient};
pub use error::RefreshError;
pub use render::render_dashboard;
pub use types::{JobRecord, LiveStatus, Snapshot, ViewState};

use crate::config::{OverlapPolicy, PanelConfig, PollConfig};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use tokio_util::sync::{CancellationToken, DropGuard};

/// Result of a single call to [`DashboardController::refresh`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// All three endpoints answered and the state was updated
    Completed,
    /// The cycle failed; the error is also stored in the view state
    Failed(RefreshError),
    /// Another cycle was in flight and the overlap policy is `skip`
    Skipped,
}

struct Inner {
    client: StatusClient,
    poll: PollConfig,
    state: watch::Sender<ViewState>,
    in_flight: AtomicUsize,
    /// Present while the periodic timer runs; dropping it cancels the timer
    timer: Mutex<Option<DropGuard>>,
}

/// Decrements the in-flight counter when a cycle ends, however it ends.
struct InFlight<'a>(&'a AtomicUsize);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
    }
}

/// Polls the backend and owns the view state.
///
/// Cheap to clone; clones share the same state and timer.
#[derive(Clone)]
pub struct DashboardController {
    inner: Arc<Inner>,
}

impl DashboardController {
    /// Create a controller with an initial loading state.
    pub fn new(client: StatusClient, poll: PollConfig) -> Self {
        let (state, _) = watch::channel(ViewState::default());
        Self {
            inner: Arc::new(Inner {
                client,
                poll,
                state,
                in_flight: AtomicUsize::new(0),
                timer: Mutex::new(None),
            }),
        }
    }

    /// Build the HTTP client and controller from configuration.
    pub fn from_config(config: &PanelConfig) -> Result<Self, reqwest::Error> {
        let client = StatusClient::new(&config.api)?;
        Ok(Self::new(client, config.poll.clone()))
    }

    /// Copy of the current view state.
    pub fn snapshot(&self) -> ViewState {
        self.inner.state.borrow().clone()
    }

    /// Receiver notified on every view state change.
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.inner.state.subscribe()
    }

    /// Number of refresh cycles currently in flight.
    pub fn cycles_in_flight(&self) -> usize {
        self.inner.in_flight.load(Ordering::Acquire)
    }

    fn enter_cycle(&self) -> Option<InFlight<'_>> {
        let counter = &self.inner.in_flight;
        match self.inner.poll.overlap {
            OverlapPolicy::Allow => {
                counter.fetch_add(1, Ordering::AcqRel);
            }
            OverlapPolicy::Skip => {
                counter
                    .compare_exchange(0, 1, Ordering::AcqRel, Ordering::Acquire)
                    .ok()?;
            }
        }
        Some(InFlight(counter))
    }

    /// Run one refresh cycle.
    ///
    /// Errors never escape: they are stored in the view state and returned
    /// in the outcome for logging. Overlapping cycles are not fenced, so the
    /// last one to finish determines the state.
    pub async fn refresh(&self) -> CycleOutcome {
        let Some(_in_flight) = self.enter_cycle() else {
            tracing::debug!("Refresh cycle already in flight, skipping");
            return CycleOutcome::Skipped;
        };

        self.inner.state.send_modify(ViewState::begin_cycle);
        tracing::debug!("Refresh cycle started");

        let result = self.inner.client.fetch_snapshot().await;
        let outcome = match &result {
            Ok(snapshot) => {
                tracing::debug!(
                    live_status = ?snapshot.live.status,
                    jobs = snapshot.jobs.len(),
                    "Refresh cycle completed"
                );
                CycleOutcome::Completed
            }
            Err(e) => {
                tracing::warn!(endpoint = e.endpoint(), error = %e, "Refresh cycle failed");
                CycleOutcome::Failed(e.clone())
            }
        };

        self.inner
            .state
            .send_modify(|state| state.finish_cycle(result.map_err(|e| e.to_string())));
        outcome
    }

    /// Spawn a refresh cycle unless one is already loading.
    ///
    /// Mirrors a refresh button that is disabled while loading. Returns
    /// whether a cycle was started.
    pub fn request_refresh(&self) -> bool {
        if self.inner.state.borrow().loading {
            tracing::debug!("Manual refresh ignored while loading");
            return false;
        }
        let controller = self.clone();
        tokio::spawn(async move {
            controller.refresh().await;
        });
        true
    }

    /// Refresh now, then every `poll.interval_ms` until [`stop`](Self::stop).
    ///
    /// Each tick spawns its cycle as a separate task, so a slow backend never
    /// delays the timer. Calling this while already running does nothing.
    /// Must be called from within a tokio runtime.
    pub fn start(&self) {
        let mut timer = self
            .inner
            .timer
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if timer.is_some() {
            tracing::debug!("Poller already running");
            return;
        }

        let cancel_token = CancellationToken::new();
        let token = cancel_token.clone();
        let weak = Arc::downgrade(&self.inner);
        let interval_ms = self.inner.poll.interval_ms;

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_millis(interval_ms));
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

            tracing::info!(interval_ms, "Poller started");

            loop {
                tokio::select! {
                    _ = token.cancelled() => {
                        tracing::info!("Poller stopped");
                        break;
                    }
                    _ = interval.tick() => {
                        let Some(inner) = weak.upgrade() else {
                            break;
                        };
                        let controller = DashboardController { inner };
                        tokio::spawn(async move {
                            controller.refresh().await;
                        });
                    }
                }
            }
        });

        *timer = Some(cancel_token.drop_guard());
    }

    /// Cancel the periodic timer. In-flight cycles still complete.
    ///
    /// Returns whether the timer was running.
    pub fn stop(&self) -> bool {
        let guard = self
            .inner
            .timer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        guard.is_some()
    }

    /// Whether the periodic timer is running.
    pub fn is_running(&self) -> bool {
        self.inner
            .timer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}
