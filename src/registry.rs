//! Handle-to-index device registry.
//!
//! The registry owns the mapping from opaque OS handles ([`RawHandle`]) to
//! dense logical indices. Indices are assigned in first-seen order and are
//! stable for the lifetime of the registry: index `i` always refers to the
//! same physical device until a hard reset, and indices are never reused.
//!
//! Handle re-acquisition after a focus change happens at the OS registration
//! layer (see the Windows backend); the registry itself never invalidates an
//! entry, so a device that resumes reporting under its old handle keeps its
//! index and accumulated configuration.

use crate::event::RawHandle;
use std::collections::HashMap;

/// Assigns and remembers logical indices for device handles.
#[derive(Debug, Default)]
pub struct DeviceRegistry {
    indices: HashMap<RawHandle, usize>,
}

impl DeviceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index for `handle`, assigning the next free index on first sight.
    ///
    /// Both enumeration-time seeding and event-time discovery of a
    /// previously-unseen handle go through here, so registration order is
    /// first-seen order in every case.
    pub fn register(&mut self, handle: RawHandle) -> usize {
        let next = self.indices.len();
        *self.indices.entry(handle).or_insert(next)
    }

    /// Index for `handle` if it has been registered.
    pub fn get(&self, handle: RawHandle) -> Option<usize> {
        self.indices.get(&handle).copied()
    }

    /// Number of registered devices.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Hard reset: forgets every handle and index.
    pub fn clear(&mut self) {
        self.indices.clear();
    }
}
