//! Picker session orchestration.
//!
//! A [`ModalSession`] spans one open/close cycle of the location picker. It
//! owns the selection model and composes the reverse-geocode scheduler, the
//! search controller, and the camera controller into the save/cancel
//! contract exposed to the host application.
//!
//! Hosts drive the session one of two ways. In channel mode they send
//! [`SessionEvent`]s into [`ModalSession::run`], which multiplexes user
//! events with background lookup completions until the session closes, and
//! render from the [`SessionView`] snapshots published on the watch channel
//! from [`ModalSession::subscribe`]. In direct mode they call the session's
//! methods from their own event dispatch and call
//! [`ModalSession::poll_completions`] before each render to apply any
//! background completions that have arrived.
//!
//! Everything a session owns is discarded on close: the pending debounce
//! timer is cancelled and the page-effect registrations are released, on
//! every exit path (cancel, save-side close, forced teardown).

mod events;
mod guards;
mod host;
mod stats;
mod view;

pub use events::SessionEvent;
pub use guards::{EffectsGuard, NoopPageEffects, PageEffects};
pub use host::SessionHost;
pub use stats::{SessionStats, SessionStatsSnapshot};
pub use view::SessionView;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace};

use crate::camera::{CameraConfig, CameraController, MapCamera, FOCUS_ZOOM, WIDE_ZOOM};
use crate::coord::Coordinate;
use crate::geocode::Geocoder;
use crate::scheduler::{ReverseEvent, ReverseGeocodeScheduler, SchedulerConfig};
use crate::search::{SearchController, SearchEvent};
use crate::selection::Selection;

/// Session configuration.
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    /// Reverse-geocode debounce configuration.
    pub scheduler: SchedulerConfig,
    /// Camera animation configuration.
    pub camera: CameraConfig,
}

/// Whether the run loop should keep going after an event.
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Close,
}

/// One open/close cycle of the location picker.
pub struct ModalSession<G, C, H> {
    selection: Selection,
    scheduler: ReverseGeocodeScheduler<G>,
    search: SearchController<G>,
    camera: CameraController<C>,
    host: H,
    stats: Arc<SessionStats>,
    saving: bool,
    resolving_name: bool,
    reverse_rx: Option<mpsc::UnboundedReceiver<ReverseEvent>>,
    search_rx: Option<mpsc::UnboundedReceiver<SearchEvent>>,
    view_tx: watch::Sender<SessionView>,
    _effects: EffectsGuard,
}

impl<G, C, H> ModalSession<G, C, H>
where
    G: Geocoder + 'static,
    C: MapCamera,
    H: SessionHost,
{
    /// Opens a session, optionally seeded with a host-supplied coordinate.
    ///
    /// With a seed, the selection starts map-click derived at the seed and
    /// the camera animates once to it; without, the selection is empty and
    /// the map shows a wide default world view.
    pub fn open(
        geocoder: Arc<G>,
        map: Arc<C>,
        effects: Arc<dyn PageEffects>,
        host: H,
        seed: Option<Coordinate>,
        config: SessionConfig,
    ) -> Self {
        let effects_guard = EffectsGuard::acquire(effects);
        let (scheduler, reverse_rx) =
            ReverseGeocodeScheduler::new(Arc::clone(&geocoder), config.scheduler);
        let (search, search_rx) = SearchController::new(geocoder);
        let mut camera = CameraController::new(map, config.camera);

        let selection = match seed {
            Some(coordinate) => {
                camera.request_fly_to(coordinate);
                Selection::seeded(coordinate)
            }
            None => Selection::empty(),
        };

        info!(seeded = seed.is_some(), "Picker session opened");

        let (view_tx, _) = watch::channel(SessionView::default());
        let session = Self {
            selection,
            scheduler,
            search,
            camera,
            host,
            stats: Arc::new(SessionStats::default()),
            saving: false,
            resolving_name: false,
            reverse_rx: Some(reverse_rx),
            search_rx: Some(search_rx),
            view_tx,
            _effects: effects_guard,
        };
        session.publish_view();
        session
    }

    /// Subscribes to the view snapshots published by the run loop.
    ///
    /// [`ModalSession::run`] publishes a fresh [`SessionView`] after every
    /// applied event, so a host rendering in channel mode subscribes before
    /// handing the session to `run` and redraws whenever the receiver
    /// observes a change.
    pub fn subscribe(&self) -> watch::Receiver<SessionView> {
        self.view_tx.subscribe()
    }

    fn publish_view(&self) {
        self.view_tx.send_replace(self.view());
    }

    /// Handle to the session's statistics counters.
    pub fn stats(&self) -> Arc<SessionStats> {
        Arc::clone(&self.stats)
    }

    /// Snapshot of everything the host needs to render.
    pub fn view(&self) -> SessionView {
        let coordinate = self.selection.coordinate();
        SessionView {
            coordinate,
            display_name: self.selection.display_name().map(str::to_string),
            provenance: self.selection.provenance(),
            query: self.search.query().to_string(),
            results: self.search.results().to_vec(),
            searching: self.search.is_searching(),
            resolving_name: self.resolving_name,
            saving: self.saving,
            can_save: coordinate.is_some() && !self.saving,
            zoom: if coordinate.is_some() {
                FOCUS_ZOOM
            } else {
                WIDE_ZOOM
            },
        }
    }

    /// The user clicked the map, placing a pin.
    ///
    /// Sets the coordinate, clears any stale name, schedules a debounced
    /// reverse lookup, and notifies the camera.
    pub fn map_click(&mut self, coordinate: Coordinate) {
        debug!(
            lat = coordinate.lat,
            lng = coordinate.lng,
            "Pin placed via map click"
        );
        self.stats.pins_placed.fetch_add(1, Ordering::Relaxed);
        self.selection.place_pin(coordinate);
        self.camera.request_fly_to(coordinate);
        self.scheduler.schedule(coordinate);
    }

    /// Updates the search query text.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.search.set_query(query);
    }

    /// Submits the current query as a forward search.
    pub fn submit_search(&mut self) {
        if self.search.search() {
            self.stats.searches_issued.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Applies the search result at `index` as the user's pick.
    ///
    /// The result already carries a name, so this bypasses the reverse
    /// scheduler entirely; the camera animates to the chosen coordinate.
    pub fn pick_result(&mut self, index: usize) {
        let Some(result) = self.search.select_result(index) else {
            trace!(index, "Ignoring pick of missing result");
            return;
        };
        debug!(name = %result.display_name, "Search result picked");
        self.stats.results_picked.fetch_add(1, Ordering::Relaxed);
        self.selection
            .apply_search_pick(result.coordinate, result.display_name);
        self.camera.request_fly_to(result.coordinate);
    }

    /// Marks whether host-side persistence is in flight.
    pub fn set_saving(&mut self, saving: bool) {
        self.saving = saving;
    }

    /// Confirms the pick.
    ///
    /// No-op without a coordinate or while the host is already saving;
    /// otherwise invokes the host save callback with the resolved name or
    /// the fixed-precision coordinate label fallback.
    pub fn save(&mut self) {
        if self.saving {
            trace!("Ignoring save while persistence is in flight");
            return;
        }
        let Some(coordinate) = self.selection.coordinate() else {
            trace!("Ignoring save without a coordinate");
            return;
        };
        let Some(place_name) = self.selection.save_label() else {
            return;
        };
        info!(
            lat = coordinate.lat,
            lng = coordinate.lng,
            place_name = %place_name,
            "Saving picked location"
        );
        self.host.on_save(coordinate.lat, coordinate.lng, &place_name);
    }

    /// Dismisses the picker.
    ///
    /// Invokes the host cancel callback and cancels any pending debounce
    /// timer; the session is about to be destroyed, so the selection itself
    /// is not cleared.
    pub fn cancel(&mut self) {
        info!("Picker session cancelled");
        self.scheduler.cancel_pending();
        self.host.on_cancel();
    }

    /// Applies a reverse-geocode scheduler event.
    pub fn handle_reverse(&mut self, event: ReverseEvent) {
        match event {
            ReverseEvent::LookupStarted { .. } => {
                self.stats.lookups_issued.fetch_add(1, Ordering::Relaxed);
                self.resolving_name = true;
            }
            ReverseEvent::Resolved { name, .. } => {
                self.resolving_name = false;
                if let Some(name) = name {
                    if self.selection.apply_resolved_name(name) {
                        self.stats.names_resolved.fetch_add(1, Ordering::Relaxed);
                    }
                }
            }
        }
    }

    /// Applies a search completion event.
    pub fn handle_search(&mut self, event: SearchEvent) {
        match event {
            SearchEvent::Completed { results } => self.search.apply_completion(results),
        }
    }

    /// Drains pending background completions and applies them.
    ///
    /// Hosts driving the session in direct mode (method calls instead of
    /// [`ModalSession::run`]) call this before each render so reverse-lookup
    /// and search completions reach the model. A no-op while the run loop
    /// owns the receivers.
    pub fn poll_completions(&mut self) {
        while let Some(event) = self
            .reverse_rx
            .as_mut()
            .and_then(|rx| rx.try_recv().ok())
        {
            self.handle_reverse(event);
        }
        while let Some(event) = self.search_rx.as_mut().and_then(|rx| rx.try_recv().ok()) {
            self.handle_search(event);
        }
        self.publish_view();
    }

    fn handle_event(&mut self, event: SessionEvent) -> Flow {
        match event {
            SessionEvent::MapClick(coordinate) => self.map_click(coordinate),
            SessionEvent::QueryChanged(query) => self.set_query(query),
            SessionEvent::SearchSubmitted => self.submit_search(),
            SessionEvent::ResultPicked(index) => self.pick_result(index),
            SessionEvent::SavePressed => self.save(),
            SessionEvent::SavingChanged(saving) => self.set_saving(saving),
            SessionEvent::CancelPressed | SessionEvent::EscapePressed => {
                self.cancel();
                return Flow::Close;
            }
        }
        Flow::Continue
    }

    /// Runs the session until it closes.
    ///
    /// Multiplexes host events with background lookup and search
    /// completions, publishing a fresh view snapshot after each (see
    /// [`ModalSession::subscribe`]). Ends on cancel/escape, when the event
    /// channel closes, or when the shutdown token fires (host closed the
    /// picker, e.g. after a save completed). All paths cancel the pending
    /// debounce timer and release the page effects.
    pub async fn run(
        mut self,
        mut events: mpsc::Receiver<SessionEvent>,
        shutdown: CancellationToken,
    ) {
        let (mut reverse_rx, mut search_rx) =
            match (self.reverse_rx.take(), self.search_rx.take()) {
                (Some(reverse_rx), Some(search_rx)) => (reverse_rx, search_rx),
                _ => return,
            };

        loop {
            tokio::select! {
                biased;

                _ = shutdown.cancelled() => {
                    info!("Picker session shutting down");
                    break;
                }

                maybe_event = events.recv() => {
                    match maybe_event {
                        Some(event) => {
                            let flow = self.handle_event(event);
                            self.publish_view();
                            if flow == Flow::Close {
                                break;
                            }
                        }
                        None => {
                            debug!("Session event channel closed");
                            break;
                        }
                    }
                }

                Some(event) = reverse_rx.recv() => {
                    self.handle_reverse(event);
                    self.publish_view();
                }

                Some(event) = search_rx.recv() => {
                    self.handle_search(event);
                    self.publish_view();
                }
            }
        }

        self.scheduler.cancel_pending();
        info!("Picker session closed");
    }
}
