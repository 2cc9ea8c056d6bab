//! Session statistics for host-side diagnostics.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for one picker session.
#[derive(Debug, Default)]
pub struct SessionStats {
    /// Pins placed via map click.
    pub pins_placed: AtomicU64,
    /// Forward searches actually issued (blank submissions excluded).
    pub searches_issued: AtomicU64,
    /// Reverse lookups dispatched after a quiet period elapsed.
    pub lookups_issued: AtomicU64,
    /// Reverse lookups that resolved a name which was applied.
    pub names_resolved: AtomicU64,
    /// Search results picked.
    pub results_picked: AtomicU64,
}

impl SessionStats {
    /// Get a snapshot of current statistics.
    pub fn snapshot(&self) -> SessionStatsSnapshot {
        SessionStatsSnapshot {
            pins_placed: self.pins_placed.load(Ordering::Relaxed),
            searches_issued: self.searches_issued.load(Ordering::Relaxed),
            lookups_issued: self.lookups_issued.load(Ordering::Relaxed),
            names_resolved: self.names_resolved.load(Ordering::Relaxed),
            results_picked: self.results_picked.load(Ordering::Relaxed),
        }
    }
}

/// Snapshot of session statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionStatsSnapshot {
    pub pins_placed: u64,
    pub searches_issued: u64,
    pub lookups_issued: u64,
    pub names_resolved: u64,
    pub results_picked: u64,
}
