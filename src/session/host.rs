//! Host application contract.

use std::sync::Arc;

/// Callbacks the picker invokes on the embedding application.
///
/// `on_save` receives the picked coordinate and a place name that is never
/// empty: either the resolved display name or the fixed-precision coordinate
/// label fallback.
pub trait SessionHost: Send + Sync {
    /// The user confirmed a pick.
    fn on_save(&self, lat: f64, lng: f64, place_name: &str);

    /// The user dismissed the picker without picking.
    fn on_cancel(&self);
}

/// Hosts are commonly shared with the UI layer behind an `Arc`.
impl<H: SessionHost + ?Sized> SessionHost for Arc<H> {
    fn on_save(&self, lat: f64, lng: f64, place_name: &str) {
        (**self).on_save(lat, lng, place_name)
    }

    fn on_cancel(&self) {
        (**self).on_cancel()
    }
}
