//! Per-tick snapshot of all device states.
//!
//! [`Snapshot`] is an **owned**, read-only copy of every known mouse's
//! accumulated state at the moment of a poll, ordered by logical index. It is
//! a copy, not a view: a later `reset_states()` cannot corrupt a snapshot
//! already handed out, and cloning is cheap for realistic device counts.
//!
//! # Semantics
//! - Entries are indexed by logical device index (see
//!   [`DeviceRegistry`](crate::registry::DeviceRegistry)).
//! - Queries for an index at or beyond [`Snapshot::len`] return neutral
//!   defaults (zero delta, no button activity) instead of failing, so a
//!   consuming loop never has to bounds-check against a device count that may
//!   have changed since its last poll.
//! - A snapshot never mutates; to refresh, poll again.

use crate::event::MouseButton;
use crate::state::{ButtonState, MouseState};

/// Owned snapshot of all device states, ordered by logical index.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Snapshot(Vec<MouseState>);

impl Snapshot {
    pub(crate) fn new(states: Vec<MouseState>) -> Self {
        Self(states)
    }

    /// Number of devices known at poll time.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// State for a device, if `mouse` is in range.
    #[inline]
    pub fn get(&self, mouse: usize) -> Option<&MouseState> {
        self.0.get(mouse)
    }

    /// State for a device; out-of-range indices yield the neutral default.
    #[inline]
    pub fn state(&self, mouse: usize) -> MouseState {
        self.0.get(mouse).copied().unwrap_or_default()
    }

    /// Accumulated raw delta for a device (`(0, 0)` when out of range).
    #[inline]
    pub fn delta(&self, mouse: usize) -> (i32, i32) {
        let s = self.state(mouse);
        (s.x, s.y)
    }

    /// Button state for a device (all-false when out of range).
    #[inline]
    pub fn button(&self, mouse: usize, button: MouseButton) -> ButtonState {
        self.state(mouse).button(button)
    }

    /// Iterate device states in logical-index order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &MouseState> {
        self.0.iter()
    }

    /// Consume the snapshot and return the inner sequence.
    #[inline]
    pub fn into_inner(self) -> Vec<MouseState> {
        self.0
    }
}
