//! Integration tests for the picker session.
//!
//! These tests verify the complete picking flow including:
//! - Debounced reverse geocoding (click bursts → one lookup)
//! - Search-driven picks (name known up front, no debounce)
//! - Camera animation suppression
//! - Session teardown (pending timers cancelled, page effects released)
//!
//! Run with: `cargo test --test session_integration`

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::yield_now;
use tokio::time::advance;
use tokio_util::sync::CancellationToken;

use pinpoint::camera::MapCamera;
use pinpoint::coord::Coordinate;
use pinpoint::geocode::{GeocodeError, Geocoder, SearchResult};
use pinpoint::session::{
    ModalSession, PageEffects, SessionConfig, SessionEvent, SessionHost,
};

// ============================================================================
// Mock Implementations
// ============================================================================

/// Mock geocoder with canned replies and call recording.
#[derive(Default)]
struct StubGeocoder {
    search_reply: Mutex<Vec<SearchResult>>,
    reverse_reply: Mutex<Option<Result<Option<String>, GeocodeError>>>,
    reverse_calls: Mutex<Vec<Coordinate>>,
}

impl StubGeocoder {
    fn with_reverse_name(name: &str) -> Self {
        let stub = Self::default();
        *stub.reverse_reply.lock().unwrap() = Some(Ok(Some(name.to_string())));
        stub
    }

    fn with_search_hits(hits: Vec<SearchResult>) -> Self {
        let stub = Self::default();
        *stub.search_reply.lock().unwrap() = hits;
        stub
    }

    fn reverse_calls(&self) -> Vec<Coordinate> {
        self.reverse_calls.lock().unwrap().clone()
    }
}

impl Geocoder for StubGeocoder {
    async fn search(&self, _query: &str) -> Result<Vec<SearchResult>, GeocodeError> {
        Ok(self.search_reply.lock().unwrap().clone())
    }

    async fn reverse(&self, coordinate: Coordinate) -> Result<Option<String>, GeocodeError> {
        self.reverse_calls.lock().unwrap().push(coordinate);
        self.reverse_reply
            .lock()
            .unwrap()
            .clone()
            .unwrap_or(Ok(None))
    }
}

/// Mock map recording animation requests.
#[derive(Default)]
struct StubMap {
    flights: Mutex<Vec<Coordinate>>,
}

impl StubMap {
    fn flights(&self) -> Vec<Coordinate> {
        self.flights.lock().unwrap().clone()
    }
}

impl MapCamera for StubMap {
    fn fly_to(&self, center: Coordinate, _duration: Duration) {
        self.flights.lock().unwrap().push(center);
    }
}

/// Mock host recording callbacks.
#[derive(Default)]
struct StubHost {
    saves: Mutex<Vec<(f64, f64, String)>>,
    cancels: AtomicUsize,
}

impl SessionHost for StubHost {
    fn on_save(&self, lat: f64, lng: f64, place_name: &str) {
        self.saves
            .lock()
            .unwrap()
            .push((lat, lng, place_name.to_string()));
    }

    fn on_cancel(&self) {
        self.cancels.fetch_add(1, Ordering::SeqCst);
    }
}

/// Page effects with balanced acquire/release counting.
#[derive(Default)]
struct CountingEffects {
    acquired: AtomicUsize,
    released: AtomicUsize,
}

impl PageEffects for CountingEffects {
    fn acquire(&self) {
        self.acquired.fetch_add(1, Ordering::SeqCst);
    }

    fn release(&self) {
        self.released.fetch_add(1, Ordering::SeqCst);
    }
}

async fn settle() {
    for _ in 0..20 {
        yield_now().await;
    }
}

fn open_session(
    geocoder: Arc<StubGeocoder>,
    map: Arc<StubMap>,
    effects: Arc<CountingEffects>,
    host: Arc<StubHost>,
    seed: Option<Coordinate>,
) -> ModalSession<StubGeocoder, StubMap, Arc<StubHost>> {
    ModalSession::open(
        geocoder,
        map,
        effects,
        host,
        seed,
        SessionConfig::default(),
    )
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test(start_paused = true)]
async fn click_burst_produces_one_lookup_for_last_click() {
    let geocoder = Arc::new(StubGeocoder::with_reverse_name("Market Street"));
    let map = Arc::new(StubMap::default());
    let effects = Arc::new(CountingEffects::default());
    let host = Arc::new(StubHost::default());

    let session = open_session(
        Arc::clone(&geocoder),
        map,
        effects,
        Arc::clone(&host),
        None,
    );
    let (events_tx, events_rx) = mpsc::channel(16);
    let shutdown = CancellationToken::new();
    let handle = tokio::spawn(session.run(events_rx, shutdown.clone()));

    // Three clicks inside the quiet period.
    for (lat, lng) in [(1.0, 1.0), (2.0, 2.0), (3.0, 3.0)] {
        events_tx
            .send(SessionEvent::MapClick(Coordinate::new(lat, lng)))
            .await
            .unwrap();
        settle().await;
        advance(Duration::from_millis(100)).await;
    }

    advance(Duration::from_millis(500)).await;
    settle().await;

    assert_eq!(geocoder.reverse_calls(), vec![Coordinate::new(3.0, 3.0)]);

    // The resolved name flows into the save callback.
    events_tx.send(SessionEvent::SavePressed).await.unwrap();
    settle().await;
    shutdown.cancel();
    handle.await.unwrap();

    let saves = host.saves.lock().unwrap();
    assert_eq!(saves.len(), 1);
    assert_eq!(saves[0], (3.0, 3.0, "Market Street".to_string()));
}

#[tokio::test(start_paused = true)]
async fn search_pick_skips_reverse_geocoding() {
    let geocoder = Arc::new(StubGeocoder::with_search_hits(vec![SearchResult {
        coordinate: Coordinate::new(48.8566, 2.3522),
        display_name: "Paris, France".to_string(),
    }]));
    let map = Arc::new(StubMap::default());
    let effects = Arc::new(CountingEffects::default());
    let host = Arc::new(StubHost::default());

    let session = open_session(
        Arc::clone(&geocoder),
        Arc::clone(&map),
        effects,
        Arc::clone(&host),
        None,
    );
    let (events_tx, events_rx) = mpsc::channel(16);
    let shutdown = CancellationToken::new();
    let handle = tokio::spawn(session.run(events_rx, shutdown.clone()));

    events_tx
        .send(SessionEvent::QueryChanged("paris".to_string()))
        .await
        .unwrap();
    events_tx.send(SessionEvent::SearchSubmitted).await.unwrap();
    settle().await;
    events_tx.send(SessionEvent::ResultPicked(0)).await.unwrap();
    events_tx.send(SessionEvent::SavePressed).await.unwrap();
    settle().await;

    // The pick carried its own name; no reverse lookup ever fires.
    advance(Duration::from_secs(5)).await;
    settle().await;
    assert!(geocoder.reverse_calls().is_empty());

    shutdown.cancel();
    handle.await.unwrap();

    let saves = host.saves.lock().unwrap();
    assert_eq!(saves[0].2, "Paris, France");
    assert_eq!(map.flights(), vec![Coordinate::new(48.8566, 2.3522)]);
}

#[tokio::test(start_paused = true)]
async fn seeded_session_animates_once_to_seed() {
    let geocoder = Arc::new(StubGeocoder::default());
    let map = Arc::new(StubMap::default());
    let effects = Arc::new(CountingEffects::default());
    let host = Arc::new(StubHost::default());

    let session = open_session(
        geocoder,
        Arc::clone(&map),
        effects,
        host,
        Some(Coordinate::new(40.0, -75.0)),
    );

    let view = session.view();
    assert_eq!(view.coordinate, Some(Coordinate::new(40.0, -75.0)));
    assert_eq!(map.flights(), vec![Coordinate::new(40.0, -75.0)]);

    // A repeated click on the exact seed coordinate does not replay the
    // animation.
    let (events_tx, events_rx) = mpsc::channel(16);
    let shutdown = CancellationToken::new();
    let handle = tokio::spawn(session.run(events_rx, shutdown.clone()));

    events_tx
        .send(SessionEvent::MapClick(Coordinate::new(40.0, -75.0)))
        .await
        .unwrap();
    settle().await;
    assert_eq!(map.flights().len(), 1);

    shutdown.cancel();
    handle.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn closing_cancels_pending_lookup_and_releases_effects() {
    let geocoder = Arc::new(StubGeocoder::with_reverse_name("Should Never Resolve"));
    let map = Arc::new(StubMap::default());
    let effects = Arc::new(CountingEffects::default());
    let host = Arc::new(StubHost::default());

    let session = open_session(
        Arc::clone(&geocoder),
        map,
        Arc::clone(&effects),
        Arc::clone(&host),
        None,
    );
    assert_eq!(effects.acquired.load(Ordering::SeqCst), 1);

    let (events_tx, events_rx) = mpsc::channel(16);
    let shutdown = CancellationToken::new();
    let handle = tokio::spawn(session.run(events_rx, shutdown));

    events_tx
        .send(SessionEvent::MapClick(Coordinate::new(40.0, -75.0)))
        .await
        .unwrap();
    settle().await;

    // Escape before the quiet period elapses.
    events_tx.send(SessionEvent::EscapePressed).await.unwrap();
    handle.await.unwrap();

    assert_eq!(host.cancels.load(Ordering::SeqCst), 1);
    assert_eq!(effects.released.load(Ordering::SeqCst), 1);

    // The timer was cancelled with the session; no late lookup fires.
    advance(Duration::from_secs(5)).await;
    settle().await;
    assert!(geocoder.reverse_calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn save_without_pick_does_not_invoke_host() {
    let geocoder = Arc::new(StubGeocoder::default());
    let map = Arc::new(StubMap::default());
    let effects = Arc::new(CountingEffects::default());
    let host = Arc::new(StubHost::default());

    let session = open_session(geocoder, map, effects, Arc::clone(&host), None);
    let (events_tx, events_rx) = mpsc::channel(16);
    let shutdown = CancellationToken::new();
    let handle = tokio::spawn(session.run(events_rx, shutdown.clone()));

    events_tx.send(SessionEvent::SavePressed).await.unwrap();
    settle().await;
    assert!(host.saves.lock().unwrap().is_empty());

    // The session is still running and usable.
    events_tx
        .send(SessionEvent::MapClick(Coordinate::new(12.345678, -98.765432)))
        .await
        .unwrap();
    events_tx.send(SessionEvent::SavePressed).await.unwrap();
    settle().await;

    shutdown.cancel();
    handle.await.unwrap();

    let saves = host.saves.lock().unwrap();
    assert_eq!(
        *saves,
        vec![(12.345678, -98.765432, "12.3457, -98.7654".to_string())]
    );
}
