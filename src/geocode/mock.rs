//! Mock geocoder for tests.
//!
//! Replays queued responses and records every call, so controller tests can
//! assert on exactly which lookups were issued. An optional reverse delay
//! (virtual time) lets tests observe the in-flight window.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use super::types::{GeocodeError, Geocoder, SearchResult};
use crate::coord::Coordinate;

#[derive(Default)]
pub struct MockGeocoder {
    pub search_replies: Mutex<VecDeque<Result<Vec<SearchResult>, GeocodeError>>>,
    pub reverse_replies: Mutex<VecDeque<Result<Option<String>, GeocodeError>>>,
    pub search_calls: Mutex<Vec<String>>,
    pub reverse_calls: Mutex<Vec<Coordinate>>,
    /// Virtual-time delay before a reverse reply is produced.
    pub reverse_delay: Duration,
}

impl MockGeocoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reverse_delay(mut self, delay: Duration) -> Self {
        self.reverse_delay = delay;
        self
    }

    pub fn queue_search(&self, reply: Result<Vec<SearchResult>, GeocodeError>) {
        self.search_replies.lock().unwrap().push_back(reply);
    }

    pub fn queue_reverse(&self, reply: Result<Option<String>, GeocodeError>) {
        self.reverse_replies.lock().unwrap().push_back(reply);
    }

    pub fn search_calls(&self) -> Vec<String> {
        self.search_calls.lock().unwrap().clone()
    }

    pub fn reverse_calls(&self) -> Vec<Coordinate> {
        self.reverse_calls.lock().unwrap().clone()
    }
}

impl Geocoder for MockGeocoder {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, GeocodeError> {
        self.search_calls.lock().unwrap().push(query.to_string());
        let reply = self.search_replies.lock().unwrap().pop_front();
        reply.unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn reverse(&self, coordinate: Coordinate) -> Result<Option<String>, GeocodeError> {
        self.reverse_calls.lock().unwrap().push(coordinate);
        if !self.reverse_delay.is_zero() {
            tokio::time::sleep(self.reverse_delay).await;
        }
        let reply = self.reverse_replies.lock().unwrap().pop_front();
        reply.unwrap_or(Ok(None))
    }
}
