//! Raw events and device identity.
//!
//! `multimouse` represents input changes as small, per-device deltas
//! ([`InputKind`]) tagged with the OS handle of the mouse that produced them
//! ([`RawMouseEvent`]).
//!
//! ## Value conventions
//! - **Motion:** `dx`/`dy` are **raw OS counts**, already converted to the
//!   crate's axis convention (positive Y is "up"). Multiple motion events
//!   between polls are summed, never coalesced or replaced.
//! - **Buttons:** press/release edges per [`MouseButton`].
//!
//! Backends are responsible for converting whatever the platform reports
//! (e.g. Windows `RAWMOUSE` packets, which use positive-Y-down counts) into
//! these conventions before dispatching.

/// Opaque OS-level identity of one physical pointer device.
///
/// On Windows this wraps the Raw Input `hDevice` value; the virtual backend
/// uses arbitrary caller-chosen values. Handles may become stale across focus
/// transitions and are only ever compared for equality, never dereferenced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RawHandle(pub u64);

/// Logical mouse button.
///
/// Only the two buttons the aggregator tracks today; this enum (together with
/// [`MouseState`](crate::state::MouseState)) is the extension point for more.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
}

/// Per-device input change (delta).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputKind {
    /// Relative motion in raw counts (positive Y = up).
    Motion { dx: i32, dy: i32 },

    /// A button transitioned to pressed.
    ButtonPressed { button: MouseButton },

    /// A button transitioned to released.
    ButtonReleased { button: MouseButton },
}

/// One raw event as delivered by a backend to the aggregator.
///
/// Events are applied strictly in arrival order within a device.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawMouseEvent {
    /// Raw Input device handle that produced the event.
    pub device: RawHandle,
    /// The actual input change.
    pub kind: InputKind,
}

impl RawMouseEvent {
    /// Relative motion event.
    #[inline]
    pub fn motion(device: RawHandle, dx: i32, dy: i32) -> Self {
        Self {
            device,
            kind: InputKind::Motion { dx, dy },
        }
    }

    /// Button press edge.
    #[inline]
    pub fn press(device: RawHandle, button: MouseButton) -> Self {
        Self {
            device,
            kind: InputKind::ButtonPressed { button },
        }
    }

    /// Button release edge.
    #[inline]
    pub fn release(device: RawHandle, button: MouseButton) -> Self {
        Self {
            device,
            kind: InputKind::ButtonReleased { button },
        }
    }
}
