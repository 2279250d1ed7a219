//! In-process virtual backend.
//!
//! [`VirtualSource`] produces no events on its own; its paired
//! [`VirtualInjector`] feeds synthetic [`RawMouseEvent`]s from test or demo
//! code. Injection goes through the same [`EventSink`] path a real backend
//! uses, so registry growth, drop-when-inactive, and locking behave exactly
//! as they do under OS delivery.

use std::sync::{Arc, Mutex};

use crate::backends::{EventSink, EventSource};
use crate::error::Result;
use crate::event::{MouseButton, RawHandle, RawMouseEvent};

/// Event source driven entirely by a [`VirtualInjector`].
pub struct VirtualSource {
    slot: Arc<Mutex<Option<EventSink>>>,
}

impl VirtualSource {
    /// Creates a source and the injector that feeds it.
    pub fn new() -> (Self, VirtualInjector) {
        let slot = Arc::new(Mutex::new(None));
        (
            Self { slot: slot.clone() },
            VirtualInjector { slot },
        )
    }
}

impl EventSource for VirtualSource {
    fn start(&mut self, sink: EventSink) -> Result<()> {
        let mut slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        slot.get_or_insert(sink);
        Ok(())
    }

    fn reacquire(&mut self) -> Result<()> {
        // Nothing to re-bind; speculative calls are harmless.
        Ok(())
    }

    fn stop(&mut self) {
        let mut slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        *slot = None;
    }

    fn name(&self) -> &str {
        "virtual"
    }
}

/// Feeds synthetic events into a started [`VirtualSource`].
///
/// Events injected while the source is stopped are dropped, mirroring how OS
/// events for an unregistered subsystem are dropped.
#[derive(Clone)]
pub struct VirtualInjector {
    slot: Arc<Mutex<Option<EventSink>>>,
}

impl VirtualInjector {
    /// Injects a raw event.
    pub fn feed(&self, event: RawMouseEvent) {
        let slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(sink) = slot.as_ref() {
            sink.dispatch(event);
        }
    }

    /// Convenience: relative motion from `device`.
    pub fn motion(&self, device: RawHandle, dx: i32, dy: i32) {
        self.feed(RawMouseEvent::motion(device, dx, dy));
    }

    pub fn press_button(&self, device: RawHandle, button: MouseButton) {
        self.feed(RawMouseEvent::press(device, button));
    }

    pub fn release_button(&self, device: RawHandle, button: MouseButton) {
        self.feed(RawMouseEvent::release(device, button));
    }
}
