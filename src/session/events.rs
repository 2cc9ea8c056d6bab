//! Session event types.

use crate::coord::Coordinate;

/// User and host events driving a picker session's run loop.
///
/// All mutation happens on discrete events that run to completion without
/// preemption; the host delivers these over the channel passed to
/// [`ModalSession::run`].
///
/// [`ModalSession::run`]: super::ModalSession::run
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// The user clicked the map, placing a pin.
    MapClick(Coordinate),
    /// The search query text changed.
    QueryChanged(String),
    /// The user submitted the current query.
    SearchSubmitted,
    /// The user picked the result at this index in the visible list.
    ResultPicked(usize),
    /// The user pressed the save affordance.
    SavePressed,
    /// The user pressed the cancel affordance.
    CancelPressed,
    /// The escape key was pressed (delivered by the host's key listener).
    EscapePressed,
    /// The host-side persistence flag changed.
    SavingChanged(bool),
}
