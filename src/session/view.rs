//! View projection of session state.

use crate::camera::WIDE_ZOOM;
use crate::coord::Coordinate;
use crate::geocode::SearchResult;
use crate::selection::Provenance;

/// Snapshot of everything the host needs to render the picker.
///
/// The rendered view is a pure projection of model state and never mutated
/// directly: hosts either call [`ModalSession::view`] after each event, or
/// watch the snapshots published by [`ModalSession::run`] via
/// [`ModalSession::subscribe`].
///
/// [`ModalSession::view`]: super::ModalSession::view
/// [`ModalSession::run`]: super::ModalSession::run
/// [`ModalSession::subscribe`]: super::ModalSession::subscribe
#[derive(Debug, Clone, PartialEq)]
pub struct SessionView {
    /// The pinned coordinate, if any.
    pub coordinate: Option<Coordinate>,
    /// The resolved or picked place name, if any.
    pub display_name: Option<String>,
    /// Which interaction path produced the pick.
    pub provenance: Provenance,
    /// Current search query text.
    pub query: String,
    /// Visible search results, in service order.
    pub results: Vec<SearchResult>,
    /// A forward search is outstanding.
    pub searching: bool,
    /// A reverse lookup is in flight ("looking up name…" indicator).
    pub resolving_name: bool,
    /// Host-side persistence is in flight; the save affordance is disabled.
    pub saving: bool,
    /// Save is permitted (a coordinate is present and not currently saving).
    pub can_save: bool,
    /// Zoom level the map should use: wide without a pick, focused with one.
    pub zoom: u8,
}

/// The view of a freshly opened, unseeded picker.
impl Default for SessionView {
    fn default() -> Self {
        Self {
            coordinate: None,
            display_name: None,
            provenance: Provenance::None,
            query: String::new(),
            results: Vec::new(),
            searching: false,
            resolving_name: false,
            saving: false,
            can_save: false,
            zoom: WIDE_ZOOM,
        }
    }
}
