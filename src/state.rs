//! Per-device accumulated state.
//!
//! [`MouseState`] is the unit of accumulation: a summed motion delta plus one
//! [`ButtonState`] per tracked button. Both structs are `#[repr(C)]` with a
//! stable field order (two signed ints, then two 3-boolean button records)
//! suitable for cross-boundary binary transfer; keep the order if plugin
//! interop is ever needed.
//!
//! ## Edge vs. level state
//! - `down` / `up` are **edge** flags: true only during the polling cycle in
//!   which the transition occurred, cleared by a state reset.
//! - `held` is **level** state: true continuously between a press and its
//!   matching release, untouched by a state reset.
//!
//! Edges record the *net* transition over a cycle: a press and its release
//! arriving between two resets cancel out, so `down` and `up` can never both
//! be true in one snapshot.

use crate::event::MouseButton;

/// Edge and level state of one button on one device.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ButtonState {
    /// Transitioned to pressed this cycle.
    pub down: bool,
    /// Transitioned to released this cycle.
    pub up: bool,
    /// Currently pressed.
    pub held: bool,
}

impl ButtonState {
    /// Applies a press edge. Repeated presses while held are no-ops.
    pub(crate) fn press(&mut self) {
        if self.held {
            return;
        }
        self.held = true;
        if self.up {
            // Released and re-pressed within one cycle: net no transition.
            self.up = false;
        } else {
            self.down = true;
        }
    }

    /// Applies a release edge. Releases while not held are no-ops.
    pub(crate) fn release(&mut self) {
        if !self.held {
            return;
        }
        self.held = false;
        if self.down {
            // Pressed and released within one cycle: net no transition.
            self.down = false;
        } else {
            self.up = true;
        }
    }

    /// Clears the edge flags, leaving `held` alone.
    pub(crate) fn reset_edges(&mut self) {
        self.down = false;
        self.up = false;
    }
}

/// Accumulated state of one mouse since the last state reset.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MouseState {
    /// Summed X motion in raw counts.
    pub x: i32,
    /// Summed Y motion in raw counts (positive = up).
    pub y: i32,
    pub left: ButtonState,
    pub right: ButtonState,
}

impl MouseState {
    /// State of a single button.
    #[inline]
    pub fn button(&self, button: MouseButton) -> ButtonState {
        match button {
            MouseButton::Left => self.left,
            MouseButton::Right => self.right,
        }
    }

    #[inline]
    pub(crate) fn button_mut(&mut self, button: MouseButton) -> &mut ButtonState {
        match button {
            MouseButton::Left => &mut self.left,
            MouseButton::Right => &mut self.right,
        }
    }

    /// Adds a motion event to the accumulated delta.
    pub(crate) fn accumulate(&mut self, dx: i32, dy: i32) {
        self.x = self.x.saturating_add(dx);
        self.y = self.y.saturating_add(dy);
    }

    /// Zeroes the delta and clears button edges; `held` survives.
    pub(crate) fn reset(&mut self) {
        self.x = 0;
        self.y = 0;
        self.left.reset_edges();
        self.right.reset_edges();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_sets_down_and_held() {
        let mut b = ButtonState::default();
        b.press();
        assert!(b.down && b.held && !b.up);
    }

    #[test]
    fn release_after_reset_sets_up_only() {
        let mut b = ButtonState::default();
        b.press();
        b.reset_edges();
        b.release();
        assert!(!b.down && b.up && !b.held);
    }

    #[test]
    fn press_release_within_one_cycle_cancels_edges() {
        let mut b = ButtonState::default();
        b.press();
        b.release();
        assert_eq!(b, ButtonState::default());
    }

    #[test]
    fn release_press_within_one_cycle_cancels_edges() {
        let mut b = ButtonState::default();
        b.press();
        b.reset_edges();
        // Next cycle: release then press again.
        b.release();
        b.press();
        assert!(!b.down && !b.up && b.held);
    }

    #[test]
    fn repeated_press_while_held_is_noop() {
        let mut b = ButtonState::default();
        b.press();
        b.reset_edges();
        b.press();
        assert!(!b.down && b.held);
    }

    #[test]
    fn state_reset_keeps_held() {
        let mut m = MouseState::default();
        m.accumulate(3, -2);
        m.button_mut(MouseButton::Left).press();
        m.reset();
        assert_eq!((m.x, m.y), (0, 0));
        assert!(!m.left.down && m.left.held);
    }

    #[test]
    fn accumulate_saturates_instead_of_wrapping() {
        let mut m = MouseState::default();
        m.accumulate(i32::MAX, i32::MIN);
        m.accumulate(5, -5);
        assert_eq!((m.x, m.y), (i32::MAX, i32::MIN));
    }
}
