//! Debounced reverse-geocode scheduling.
//!
//! The [`ReverseGeocodeScheduler`] turns bursts of pin placements into a
//! single background reverse lookup: each placement (re)starts a quiet-period
//! timer, and only when the timer fires untouched is a request issued for the
//! coordinate that was current at that moment.
//!
//! Per session the scheduler moves through `Idle → Scheduled → InFlight →
//! Idle`. At most one timer is pending at any time; starting a new one
//! synchronously cancels its predecessor. Cancellation is timer-level only:
//! a request already dispatched to the network is never aborted, its effect
//! simply goes stale once a newer placement supersedes it.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::coord::Coordinate;
use crate::geocode::Geocoder;

/// Quiet period with no further pin placements before a lookup is issued.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(500);

/// Reverse-geocode scheduler configuration.
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Debounce quiet period.
    pub quiet_period: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            quiet_period: DEFAULT_QUIET_PERIOD,
        }
    }
}

/// Where the scheduler currently is in its per-session state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupPhase {
    /// No timer pending, no request outstanding.
    Idle,
    /// Quiet-period timer running; a further placement replaces it.
    Scheduled,
    /// Lookup request dispatched, awaiting the response.
    InFlight,
}

const PHASE_IDLE: u8 = 0;
const PHASE_SCHEDULED: u8 = 1;
const PHASE_IN_FLIGHT: u8 = 2;

impl LookupPhase {
    fn from_u8(value: u8) -> Self {
        match value {
            PHASE_SCHEDULED => LookupPhase::Scheduled,
            PHASE_IN_FLIGHT => LookupPhase::InFlight,
            _ => LookupPhase::Idle,
        }
    }

    fn as_u8(self) -> u8 {
        match self {
            LookupPhase::Idle => PHASE_IDLE,
            LookupPhase::Scheduled => PHASE_SCHEDULED,
            LookupPhase::InFlight => PHASE_IN_FLIGHT,
        }
    }
}

/// Events emitted by the scheduler towards the owning session.
#[derive(Debug, Clone, PartialEq)]
pub enum ReverseEvent {
    /// The quiet period elapsed and a lookup was dispatched; the session
    /// shows its "looking up name" indicator from here until [`Resolved`].
    ///
    /// [`Resolved`]: ReverseEvent::Resolved
    LookupStarted { coordinate: Coordinate },
    /// The lookup completed. `name` is `None` on failure or when the service
    /// has no name for the coordinate (an empty name counts as no name);
    /// neither case is an error to the user.
    Resolved {
        coordinate: Coordinate,
        name: Option<String>,
    },
}

/// Cancellable handle to a pending quiet-period timer.
///
/// At most one live handle exists per scheduler. Cancelling after the timer
/// has fired only stops the task from updating the phase indicator; the
/// dispatched request itself runs to completion.
#[derive(Debug)]
pub struct DebounceHandle {
    token: CancellationToken,
}

impl DebounceHandle {
    /// Cancels the timer if it has not fired yet.
    pub fn cancel(&self) {
        self.token.cancel();
    }
}

/// Debounces pin placements into background reverse lookups.
///
/// Owned by a picker session; completion events arrive on the channel
/// returned from [`ReverseGeocodeScheduler::new`] and are applied by the
/// session's run loop. Dropping the scheduler cancels any pending timer, so
/// a torn-down session is never mutated by a late timer fire.
pub struct ReverseGeocodeScheduler<G> {
    geocoder: Arc<G>,
    quiet_period: Duration,
    pending: Option<DebounceHandle>,
    phase: Arc<AtomicU8>,
    events_tx: mpsc::UnboundedSender<ReverseEvent>,
}

impl<G: Geocoder + 'static> ReverseGeocodeScheduler<G> {
    /// Creates a scheduler and the event channel it reports on.
    pub fn new(
        geocoder: Arc<G>,
        config: SchedulerConfig,
    ) -> (Self, mpsc::UnboundedReceiver<ReverseEvent>) {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let scheduler = Self {
            geocoder,
            quiet_period: config.quiet_period,
            pending: None,
            phase: Arc::new(AtomicU8::new(PHASE_IDLE)),
            events_tx,
        };
        (scheduler, events_rx)
    }

    /// Current state-machine phase.
    pub fn phase(&self) -> LookupPhase {
        LookupPhase::from_u8(self.phase.load(Ordering::Acquire))
    }

    /// (Re)schedules a lookup for a freshly placed pin.
    ///
    /// Any pending timer is cancelled first, so only the last placement in a
    /// rapid burst ever produces a network call.
    pub fn schedule(&mut self, coordinate: Coordinate) {
        if let Some(previous) = self.pending.take() {
            trace!("Replacing pending debounce timer");
            previous.cancel();
        }

        self.phase
            .store(LookupPhase::Scheduled.as_u8(), Ordering::Release);

        let token = CancellationToken::new();
        let task_token = token.clone();
        let geocoder = Arc::clone(&self.geocoder);
        let phase = Arc::clone(&self.phase);
        let events_tx = self.events_tx.clone();
        let quiet_period = self.quiet_period;

        tokio::spawn(async move {
            tokio::select! {
                biased;

                _ = task_token.cancelled() => {
                    trace!("Debounce timer cancelled before firing");
                    return;
                }

                _ = tokio::time::sleep(quiet_period) => {}
            }

            // Timer fired: look up the coordinate that was current at this
            // moment. A cancellation from here on must not touch the phase
            // indicator (a newer cycle owns it), but the request itself is
            // never aborted.
            if !task_token.is_cancelled() {
                phase.store(LookupPhase::InFlight.as_u8(), Ordering::Release);
            }
            let _ = events_tx.send(ReverseEvent::LookupStarted { coordinate });

            debug!(
                lat = coordinate.lat,
                lng = coordinate.lng,
                "Issuing reverse lookup"
            );

            // An empty name from the service is no name at all; the session
            // falls back to the coordinate label on save.
            let name = match geocoder.reverse(coordinate).await {
                Ok(name) => name.filter(|name| !name.is_empty()),
                Err(e) => {
                    // Place naming is an enhancement, not a precondition:
                    // failures resolve to "no name" and are never surfaced.
                    debug!(error = %e, "Reverse lookup failed");
                    None
                }
            };

            if !task_token.is_cancelled() {
                phase.store(LookupPhase::Idle.as_u8(), Ordering::Release);
            }
            let _ = events_tx.send(ReverseEvent::Resolved { coordinate, name });
        });

        self.pending = Some(DebounceHandle { token });
    }

    /// Cancels any pending timer, e.g. when the session closes.
    pub fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.cancel();
            self.phase
                .store(LookupPhase::Idle.as_u8(), Ordering::Release);
        }
    }
}

impl<G> Drop for ReverseGeocodeScheduler<G> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.cancel();
        }
    }
}
