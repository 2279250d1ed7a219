//! Consumer-facing subsystem lifecycle and queries.
//!
//! [`MultiMouse`] ties a backend [`EventSource`] to a shared
//! [`Aggregator`](crate::aggregator::Aggregator) and exposes the
//! poll/reset protocol plus the per-mouse query surface a game loop
//! consumes. One owned instance holds all subsystem state; pass it (or
//! inject it) into the loop that ticks it.
//!
//! # Expected usage
//! Exactly one [`poll`](MultiMouse::poll) followed by one
//! [`reset_states`](MultiMouse::reset_states) per tick —
//! [`tick`](MultiMouse::tick) does both — then read deltas and buttons
//! through the queries until the next tick. Polling more than once before
//! the reset is allowed (diagnostics); the two calls are deliberately not
//! fused.
//!
//! ```no_run
//! use multimouse::MultiMouse;
//!
//! let mut mice = MultiMouse::new();
//! mice.init().expect("activate input capture");
//! loop {
//!     mice.tick();
//!     for mouse in 0..mice.mouse_count() {
//!         let (dx, dy) = mice.delta(mouse);
//!         if mice.button_down(mouse, multimouse::MouseButton::Left) {
//!             println!("mouse {mouse} clicked after moving ({dx}, {dy})");
//!         }
//!     }
//! }
//! ```
//!
//! # Queries and staleness
//! Queries read the snapshot captured by the most recent `poll`/`tick`, so
//! they are stable for the whole frame regardless of events arriving
//! concurrently. Out-of-range indices answer with neutral defaults rather
//! than failing.

use crate::aggregator::{Aggregator, SharedAggregator};
use crate::backends::{default_source, EventSink, EventSource};
use crate::error::Result;
use crate::event::MouseButton;
use crate::snapshot::Snapshot;

const NEUTRAL_SENSITIVITY: f32 = 1.0;

/// Per-device discrete mouse input subsystem.
///
/// Lifecycle: `Uninitialized -> Active` via [`init`](Self::init),
/// `-> Uninitialized` via [`kill`](Self::kill). Queries are valid in either
/// state (neutral answers while uninitialized).
pub struct MultiMouse {
    shared: SharedAggregator,
    source: Box<dyn EventSource>,
    active: bool,
    last: Snapshot,
    /// Indexed by logical device index; missing entries read as 1.0.
    sensitivities: Vec<f32>,
}

impl MultiMouse {
    /// Subsystem over the natural backend for this target.
    pub fn new() -> Self {
        Self::with_source(default_source())
    }

    /// Subsystem over an explicit backend (e.g. a virtual source for tests).
    pub fn with_source(source: Box<dyn EventSource>) -> Self {
        Self {
            shared: Aggregator::shared(),
            source,
            active: false,
            last: Snapshot::default(),
            sensitivities: Vec::new(),
        }
    }

    /// Activates the subsystem. Idempotent.
    ///
    /// Brings up the backend (on Windows: the capture window and its message
    /// loop) and starts accepting events. Device enumeration that finds
    /// nothing still succeeds; zero devices is a valid steady state.
    pub fn init(&mut self) -> Result<()> {
        if self.active {
            return Ok(());
        }

        {
            let mut agg = self.shared.lock().unwrap_or_else(|e| e.into_inner());
            agg.set_accepting(true);
        }
        if let Err(e) = self.source.start(EventSink::new(self.shared.clone())) {
            let mut agg = self.shared.lock().unwrap_or_else(|e| e.into_inner());
            agg.set_accepting(false);
            return Err(e);
        }
        self.active = true;
        Ok(())
    }

    /// Releases the backend and all accumulated state.
    ///
    /// After `kill` the subsystem is back to `Uninitialized`; only
    /// [`init`](Self::init) is meaningful until then. Idempotent.
    pub fn kill(&mut self) {
        self.source.stop();
        {
            let mut agg = self.shared.lock().unwrap_or_else(|e| e.into_inner());
            agg.set_accepting(false);
            agg.reset_device_list();
        }
        self.sensitivities.clear();
        self.last = Snapshot::default();
        self.active = false;
    }

    /// Whether the subsystem is between `init` and `kill`.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Snapshot of all devices; also becomes the basis for queries.
    ///
    /// Read-only: accumulated state keeps growing until
    /// [`reset_states`](Self::reset_states).
    pub fn poll(&mut self) -> Snapshot {
        let snap = {
            let agg = self.shared.lock().unwrap_or_else(|e| e.into_inner());
            agg.poll()
        };
        self.last = snap.clone();
        snap
    }

    /// Clears deltas and edge flags so the next interval starts clean.
    ///
    /// Held buttons stay held; the last polled snapshot is unaffected.
    pub fn reset_states(&mut self) {
        let mut agg = self.shared.lock().unwrap_or_else(|e| e.into_inner());
        agg.reset_states();
    }

    /// One `poll` followed by one `reset_states`.
    pub fn tick(&mut self) -> &Snapshot {
        self.poll();
        self.reset_states();
        &self.last
    }

    /// Hard reset: forgets all devices, indices, and sensitivities.
    pub fn reset_device_list(&mut self) {
        {
            let mut agg = self.shared.lock().unwrap_or_else(|e| e.into_inner());
            agg.reset_device_list();
        }
        self.sensitivities.clear();
        self.last = Snapshot::default();
    }

    /// Re-binds OS input registration after a focus regain.
    ///
    /// Never disturbs device count, indices, sensitivities, or held state;
    /// harmless to call speculatively. Failures leave the device set
    /// unchanged and degrade silently (the backend keeps its previous
    /// registration).
    pub fn reacquire_handles(&mut self) {
        if let Err(e) = self.source.reacquire() {
            eprintln!("multimouse: reacquire on {} failed: {e}", self.source.name());
        }
    }

    /// Number of mice seen in the last polled snapshot.
    pub fn mouse_count(&self) -> usize {
        self.last.len()
    }

    /// Sensitivity-scaled delta from the last poll (`(0.0, 0.0)` when out of
    /// range).
    pub fn delta(&self, mouse: usize) -> (f32, f32) {
        let (x, y) = self.last.delta(mouse);
        let s = self.sensitivity(mouse);
        (x as f32 * s, y as f32 * s)
    }

    /// Unscaled delta in raw counts from the last poll.
    pub fn raw_delta(&self, mouse: usize) -> (i32, i32) {
        self.last.delta(mouse)
    }

    /// Level state: is `button` currently held on `mouse`?
    pub fn button(&self, mouse: usize, button: MouseButton) -> bool {
        self.last.button(mouse, button).held
    }

    /// Edge state: did `button` go down on `mouse` this cycle?
    pub fn button_down(&self, mouse: usize, button: MouseButton) -> bool {
        self.last.button(mouse, button).down
    }

    /// Edge state: did `button` go up on `mouse` this cycle?
    pub fn button_up(&self, mouse: usize, button: MouseButton) -> bool {
        self.last.button(mouse, button).up
    }

    /// Sensitivity multiplier for `mouse` (1.0 until configured).
    pub fn sensitivity(&self, mouse: usize) -> f32 {
        self.sensitivities
            .get(mouse)
            .copied()
            .unwrap_or(NEUTRAL_SENSITIVITY)
    }

    /// Sets the sensitivity multiplier for `mouse`.
    ///
    /// May target an index not yet observed; the value sticks and applies
    /// once the device appears. Values persist across state resets and
    /// handle re-acquisition, and are only dropped by
    /// [`reset_device_list`](Self::reset_device_list) or [`kill`](Self::kill).
    pub fn set_sensitivity(&mut self, mouse: usize, value: f32) {
        if self.sensitivities.len() <= mouse {
            self.sensitivities.resize(mouse + 1, NEUTRAL_SENSITIVITY);
        }
        self.sensitivities[mouse] = value;
    }

    /// All configured sensitivities, indexed by logical device index.
    pub fn sensitivities(&self) -> &[f32] {
        &self.sensitivities
    }
}

impl Default for MultiMouse {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for MultiMouse {
    fn drop(&mut self) {
        if self.active {
            self.kill();
        }
    }
}
