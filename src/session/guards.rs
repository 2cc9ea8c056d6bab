//! Scoped acquisition of process-wide UI affordances.
//!
//! While the picker is open it owns two page-global side effects: an
//! escape-key listener (delivered back as [`SessionEvent::EscapePressed`])
//! and suppression of background page scroll. Both must be released on every
//! exit path, so acquisition is modelled as an RAII guard held by the
//! session and released on drop rather than relying on any UI framework's
//! implicit cleanup.
//!
//! [`SessionEvent::EscapePressed`]: super::SessionEvent::EscapePressed

use std::sync::Arc;

use tracing::trace;

/// Host-side capability for page-global side effects.
pub trait PageEffects: Send + Sync {
    /// Registers the escape-key listener and suppresses background scroll.
    fn acquire(&self);

    /// Releases everything `acquire` registered.
    fn release(&self);
}

/// No-op effects for headless hosts and tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopPageEffects;

impl PageEffects for NoopPageEffects {
    fn acquire(&self) {}
    fn release(&self) {}
}

/// RAII registration of the page effects for one session.
///
/// Created on session open; dropping it (cancel, save-side close, or forced
/// teardown) releases the effects exactly once.
pub struct EffectsGuard {
    effects: Arc<dyn PageEffects>,
}

impl EffectsGuard {
    pub fn acquire(effects: Arc<dyn PageEffects>) -> Self {
        trace!("Acquiring page effects");
        effects.acquire();
        Self { effects }
    }
}

impl Drop for EffectsGuard {
    fn drop(&mut self) {
        trace!("Releasing page effects");
        self.effects.release();
    }
}
