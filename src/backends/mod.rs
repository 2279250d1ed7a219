//! Input backends for `multimouse`.
//!
//! A backend is an [`EventSource`]: something that can be started with an
//! [`EventSink`], deliver raw mouse events into it from wherever the platform
//! produces them, refresh its OS registration on demand, and stop cleanly.
//!
//! # Feature flags
//! - **`rawinput`** — enables the Windows Raw Input backend (default).
//!
//! The virtual backend is always available; it is the default source on
//! non-Windows targets and the test/demo vehicle everywhere.

use crate::aggregator::SharedAggregator;
use crate::error::Result;
use crate::event::{RawHandle, RawMouseEvent};

pub mod virtual_input;

#[cfg(all(feature = "rawinput", target_os = "windows"))]
#[cfg_attr(docsrs, doc(cfg(all(feature = "rawinput", target_os = "windows"))))]
pub mod windows;

/// Delivery endpoint handed to a backend on start.
///
/// Cloneable; each call is one short critical section on the shared
/// aggregator, so delivery can run concurrently with the consumer's
/// poll/reset cycle.
#[derive(Clone)]
pub struct EventSink {
    shared: SharedAggregator,
}

impl EventSink {
    pub(crate) fn new(shared: SharedAggregator) -> Self {
        Self { shared }
    }

    /// Applies one event to the aggregator.
    ///
    /// Unknown handles are registered on first sight; events are dropped when
    /// the subsystem is not active. A poisoned lock is ignored rather than
    /// propagated so an OS delivery path can never stall.
    pub fn dispatch(&self, event: RawMouseEvent) {
        let mut agg = self.shared.lock().unwrap_or_else(|e| e.into_inner());
        agg.apply(&event);
    }

    /// Seeds the registry with handles known from device enumeration.
    pub fn register_known<I>(&self, handles: I)
    where
        I: IntoIterator<Item = RawHandle>,
    {
        let mut agg = self.shared.lock().unwrap_or_else(|e| e.into_inner());
        agg.register_known(handles);
    }
}

/// A platform-specific producer of raw mouse events.
pub trait EventSource: Send {
    /// Activates the source. Idempotent: starting a running source is a no-op.
    fn start(&mut self, sink: EventSink) -> Result<()>;

    /// Re-binds OS-level input registration without disturbing logical
    /// indices or accumulated state. Safe to call speculatively.
    fn reacquire(&mut self) -> Result<()>;

    /// Stops delivery and releases OS resources. Idempotent.
    fn stop(&mut self);

    /// Short backend name for diagnostics.
    fn name(&self) -> &str;
}

/// The natural source for the current target.
pub fn default_source() -> Box<dyn EventSource> {
    #[cfg(all(feature = "rawinput", target_os = "windows"))]
    {
        Box::new(windows::RawInputSource::new())
    }

    #[cfg(not(all(feature = "rawinput", target_os = "windows")))]
    {
        let (source, _) = virtual_input::VirtualSource::new();
        Box::new(source)
    }
}
