#![cfg(target_os = "windows")]

//! Windows Raw Input backend.
//!
//! Two layers, split the same way as their responsibilities:
//! - **`raw_input`** — "dumb" helpers: parse `WM_INPUT` payloads into mouse
//!   packets and enumerate mouse handles. No routing, no state.
//! - **`source`** — the [`RawInputSource`](source::RawInputSource) event
//!   source: a dedicated thread owning a message-only window registered for
//!   mouse raw input with `RIDEV_INPUTSINK`, translating packets into
//!   aggregator events.
//!
//! Most users should not touch these modules directly; construct a
//! [`MultiMouse`](crate::manager::MultiMouse) and let it drive the source.

pub mod raw_input;
pub mod source;

pub use source::RawInputSource;
