//! Map camera control.
//!
//! The map itself is a black box to the picker: it renders at a center/zoom,
//! reports click coordinates, and can animate its viewport. Only the last
//! capability crosses this seam, via the [`MapCamera`] trait.
//!
//! [`CameraController`] guards against animation replay: unrelated re-renders
//! of the surrounding UI may request a fly-to for the same coordinate many
//! times, and only a by-value change of target may trigger an animation.

use std::sync::Arc;
use std::time::Duration;

use tracing::trace;

use crate::coord::Coordinate;

/// Default duration of a viewport animation.
pub const DEFAULT_FLY_DURATION: Duration = Duration::from_millis(1500);

/// Wide world view used when the picker opens without a seed coordinate.
pub const WIDE_ZOOM: u8 = 2;

/// Closer view used once a seed or pick is present.
pub const FOCUS_ZOOM: u8 = 13;

/// Camera configuration.
#[derive(Debug, Clone)]
pub struct CameraConfig {
    /// Duration of each fly-to animation.
    pub fly_duration: Duration,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fly_duration: DEFAULT_FLY_DURATION,
        }
    }
}

/// Black-box capability of the host's map widget: animate the viewport to a
/// new center. Zoom is left as currently set by the caller.
pub trait MapCamera: Send + Sync {
    /// Animates the viewport to `center` over `duration`.
    fn fly_to(&self, center: Coordinate, duration: Duration);
}

/// Decides when the map viewport should animate to a new center.
///
/// Holds the last coordinate actually animated to (the camera target) purely
/// for de-duplication; the target is not part of the selection model.
pub struct CameraController<C> {
    map: Arc<C>,
    target: Option<Coordinate>,
    fly_duration: Duration,
}

impl<C: MapCamera> CameraController<C> {
    pub fn new(map: Arc<C>, config: CameraConfig) -> Self {
        Self {
            map,
            target: None,
            fly_duration: config.fly_duration,
        }
    }

    /// The last coordinate the map was told to animate to.
    pub fn target(&self) -> Option<Coordinate> {
        self.target
    }

    /// Requests a viewport animation to `coordinate`.
    ///
    /// No-op when `coordinate` equals the current target by value; otherwise
    /// records the new target and instructs the map to animate. Returns
    /// whether an animation was triggered.
    pub fn request_fly_to(&mut self, coordinate: Coordinate) -> bool {
        if self.target == Some(coordinate) {
            trace!(
                lat = coordinate.lat,
                lng = coordinate.lng,
                "Suppressing redundant fly-to"
            );
            return false;
        }
        self.target = Some(coordinate);
        self.map.fly_to(coordinate, self.fly_duration);
        true
    }
}
