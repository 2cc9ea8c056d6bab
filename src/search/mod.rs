//! Forward place search.
//!
//! The [`SearchController`] owns the ephemeral search state of a picker
//! session: the query text, the visible result list, and the searching flag.
//! Searches run on spawned tasks and report back over a channel consumed by
//! the session's run loop.
//!
//! Overlapping searches are allowed. There is no request-generation guard;
//! the most recently *completed* response determines the visible list.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, trace};

use crate::geocode::{Geocoder, SearchResult};

/// Events emitted by in-flight searches towards the owning session.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchEvent {
    /// A forward search completed. Failures arrive as an empty list; the
    /// search affordance stays usable and no error is shown.
    Completed { results: Vec<SearchResult> },
}

/// Issues on-demand forward searches and holds the visible result list.
pub struct SearchController<G> {
    geocoder: Arc<G>,
    query: String,
    results: Vec<SearchResult>,
    searching: bool,
    events_tx: mpsc::UnboundedSender<SearchEvent>,
}

impl<G: Geocoder + 'static> SearchController<G> {
    /// Creates a controller and the completion channel it reports on.
    pub fn new(geocoder: Arc<G>) -> (Self, mpsc::UnboundedReceiver<SearchEvent>) {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let controller = Self {
            geocoder,
            query: String::new(),
            results: Vec::new(),
            searching: false,
            events_tx,
        };
        (controller, events_rx)
    }

    /// Current query text.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The visible result list, in the service's relevance order.
    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    /// Whether a search is outstanding.
    pub fn is_searching(&self) -> bool {
        self.searching
    }

    /// Updates the query text as the user types.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Issues a forward search for the current query.
    ///
    /// No-op on blank input. Clears the previous result list immediately and
    /// marks the controller as searching until a completion arrives. Returns
    /// whether a request was actually issued.
    pub fn search(&mut self) -> bool {
        let query = self.query.trim().to_string();
        if query.is_empty() {
            trace!("Ignoring blank search query");
            return false;
        }

        self.results.clear();
        self.searching = true;

        debug!(query = %query, "Issuing forward search");

        let geocoder = Arc::clone(&self.geocoder);
        let events_tx = self.events_tx.clone();
        tokio::spawn(async move {
            let results = match geocoder.search(&query).await {
                Ok(results) => results,
                Err(e) => {
                    // Failures leave the list empty; no error is surfaced.
                    debug!(query = %query, error = %e, "Forward search failed");
                    Vec::new()
                }
            };
            let _ = events_tx.send(SearchEvent::Completed { results });
        });
        true
    }

    /// Applies a search completion, replacing the list wholesale.
    pub fn apply_completion(&mut self, results: Vec<SearchResult>) {
        debug!(results = results.len(), "Search completed");
        self.results = results;
        self.searching = false;
    }

    /// Takes the result at `index` as the user's pick.
    ///
    /// Clears the result list and the query text; the caller applies the
    /// returned result to the selection and requests a camera animation.
    /// Returns `None` for an out-of-range index.
    pub fn select_result(&mut self, index: usize) -> Option<SearchResult> {
        if index >= self.results.len() {
            return None;
        }
        let result = self.results[index].clone();
        self.results.clear();
        self.query.clear();
        Some(result)
    }
}
