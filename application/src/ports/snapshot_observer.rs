//! Snapshot observer port
//!
//! Defines how the rendering layer subscribes to conversation snapshots.

use medichat_domain::Snapshot;

/// Receives every snapshot the chat controller emits, in order.
///
/// Implementations live in the presentation layer and redraw the
/// conversation however they like (terminal, web view, test recorder).
pub trait SnapshotObserver: Send + Sync {
    fn on_snapshot(&self, snapshot: &Snapshot);
}

/// No-op observer for when nothing needs to be drawn
pub struct NoSnapshotObserver;

impl SnapshotObserver for NoSnapshotObserver {
    fn on_snapshot(&self, _snapshot: &Snapshot) {}
}
