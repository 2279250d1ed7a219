//! multimouse — per-device discrete raw mouse input for Rust.
//!
//! Aggregates relative motion and button transitions **per physical mouse**,
//! keyed by stable logical indices, behind a poll/reset protocol suited to a
//! game loop: once per tick, take a [`Snapshot`] and reset the accumulated
//! edge state, then query deltas and buttons by mouse index.
//!
//! On Windows the events come from the Raw Input API via a dedicated
//! message-loop thread; everywhere (including tests and non-Windows
//! targets) a virtual backend can feed synthetic events through the same
//! pipeline.

pub mod aggregator;
pub mod backends;
pub mod error;
pub mod event;
pub mod manager;
pub mod profile;
pub mod registry;
pub mod snapshot;
pub mod state;

pub use aggregator::*;
pub use error::*;
pub use event::*;
pub use manager::*;
pub use profile::*;
pub use registry::*;
pub use snapshot::*;
pub use state::*;
