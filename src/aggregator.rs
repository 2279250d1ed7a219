//! The discrete input aggregator.
//!
//! [`Aggregator`] owns the registry and one [`MouseState`] per device, kept
//! in lockstep: the state for logical index `i` lives at `states[i]`. It is
//! shared between the consumer and a backend's delivery path as
//! [`SharedAggregator`]; every operation is a single short critical section
//! under that lock, so event application can interleave safely with the
//! consumer's poll/reset cycle.
//!
//! The poll/reset split is deliberate: `poll` is read-only and may be called
//! any number of times (diagnostics included) before the one `reset_states`
//! that closes the cycle.

use std::sync::{Arc, Mutex};

use crate::event::{InputKind, RawHandle, RawMouseEvent};
use crate::registry::DeviceRegistry;
use crate::snapshot::Snapshot;
use crate::state::MouseState;

/// Aggregator handle shared between the consumer and backend threads.
pub type SharedAggregator = Arc<Mutex<Aggregator>>;

/// Accumulates per-device deltas and button transitions between polls.
#[derive(Debug, Default)]
pub struct Aggregator {
    registry: DeviceRegistry,
    states: Vec<MouseState>,
    accepting: bool,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh shared instance for handing to backends.
    pub fn shared() -> SharedAggregator {
        Arc::new(Mutex::new(Self::new()))
    }

    /// Whether events are currently applied rather than dropped.
    pub fn is_accepting(&self) -> bool {
        self.accepting
    }

    pub(crate) fn set_accepting(&mut self, accepting: bool) {
        self.accepting = accepting;
    }

    /// Seeds the registry with already-known handles, in iteration order.
    ///
    /// Devices registered here start with neutral state; enumeration yielding
    /// nothing is a valid steady state, not an error.
    pub fn register_known<I>(&mut self, handles: I)
    where
        I: IntoIterator<Item = RawHandle>,
    {
        for handle in handles {
            self.index_for(handle);
        }
    }

    /// Applies one raw event, registering a previously-unseen handle first.
    ///
    /// Events arriving while the subsystem is not active are dropped.
    pub fn apply(&mut self, event: &RawMouseEvent) {
        if !self.accepting {
            return;
        }

        #[cfg(feature = "debug-log")]
        println!("[multimouse] {:?}", event);

        let index = self.index_for(event.device);
        let state = &mut self.states[index];
        match event.kind {
            InputKind::Motion { dx, dy } => state.accumulate(dx, dy),
            InputKind::ButtonPressed { button } => state.button_mut(button).press(),
            InputKind::ButtonReleased { button } => state.button_mut(button).release(),
        }
    }

    /// Owned copy of the current state of every device.
    pub fn poll(&self) -> Snapshot {
        Snapshot::new(self.states.clone())
    }

    /// Zeroes deltas and edge flags for all devices; held state survives.
    pub fn reset_states(&mut self) {
        for state in &mut self.states {
            state.reset();
        }
    }

    /// Hard reset: forgets every device, index, and accumulated state.
    pub fn reset_device_list(&mut self) {
        self.registry.clear();
        self.states.clear();
    }

    /// Number of devices registered so far.
    pub fn device_count(&self) -> usize {
        self.states.len()
    }

    fn index_for(&mut self, handle: RawHandle) -> usize {
        let index = self.registry.register(handle);
        if index == self.states.len() {
            self.states.push(MouseState::default());
        }
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::MouseButton;

    fn active() -> Aggregator {
        let mut agg = Aggregator::new();
        agg.set_accepting(true);
        agg
    }

    #[test]
    fn motion_events_sum_between_polls() {
        let mut agg = active();
        agg.apply(&RawMouseEvent::motion(RawHandle(1), 3, -2));
        agg.apply(&RawMouseEvent::motion(RawHandle(1), -1, 5));
        assert_eq!(agg.poll().delta(0), (2, 3));
    }

    #[test]
    fn events_route_by_handle_not_arrival() {
        let mut agg = active();
        agg.apply(&RawMouseEvent::motion(RawHandle(9), 1, 0));
        agg.apply(&RawMouseEvent::motion(RawHandle(4), 0, 1));
        agg.apply(&RawMouseEvent::motion(RawHandle(9), 1, 0));
        let snap = agg.poll();
        assert_eq!(snap.delta(0), (2, 0));
        assert_eq!(snap.delta(1), (0, 1));
    }

    #[test]
    fn poll_does_not_mutate() {
        let mut agg = active();
        agg.apply(&RawMouseEvent::motion(RawHandle(1), 3, 3));
        let first = agg.poll();
        assert_eq!(agg.poll(), first);
    }

    #[test]
    fn snapshot_survives_a_later_reset() {
        let mut agg = active();
        agg.apply(&RawMouseEvent::press(RawHandle(1), MouseButton::Left));
        let snap = agg.poll();
        agg.reset_states();
        assert!(snap.button(0, MouseButton::Left).down);
        assert!(!agg.poll().button(0, MouseButton::Left).down);
    }

    #[test]
    fn reset_states_keeps_devices_and_held() {
        let mut agg = active();
        agg.apply(&RawMouseEvent::press(RawHandle(1), MouseButton::Right));
        agg.reset_states();
        assert_eq!(agg.device_count(), 1);
        assert!(agg.poll().button(0, MouseButton::Right).held);
    }

    #[test]
    fn reset_device_list_forgets_devices() {
        let mut agg = active();
        agg.apply(&RawMouseEvent::motion(RawHandle(1), 1, 1));
        agg.reset_device_list();
        assert_eq!(agg.device_count(), 0);
        assert!(agg.poll().is_empty());
    }

    #[test]
    fn events_dropped_while_not_accepting() {
        let mut agg = Aggregator::new();
        agg.apply(&RawMouseEvent::motion(RawHandle(1), 1, 1));
        assert_eq!(agg.device_count(), 0);
    }

    #[test]
    fn seeded_handles_keep_enumeration_order() {
        let mut agg = active();
        agg.register_known([RawHandle(50), RawHandle(40)]);
        agg.apply(&RawMouseEvent::motion(RawHandle(40), 7, 0));
        let snap = agg.poll();
        assert_eq!(snap.delta(0), (0, 0));
        assert_eq!(snap.delta(1), (7, 0));
    }
}
