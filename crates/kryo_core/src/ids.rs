//! Identifiers used across the IR.

use std::fmt;

use kryo_memory::PoolKey;

/// A component's stable, serializable identity within its owning context.
///
/// Unlike [`NodeHandle`], this survives serialization round-trips and is
/// what `find_by_id`, hot-reload scope matching, and KIR documents use.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct ComponentId(pub u32);

impl fmt::Debug for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A generation-checked handle into a context's component pool.
///
/// This is the in-memory replacement for the original C implementation's
/// `parent`/`children` pointers: cheap to copy, cannot dangle silently
/// (a stale handle simply fails to resolve), and carries no lifetime.
pub type NodeHandle = PoolKey;

/// Identity for a [`crate::event::Logic`] binding, unique within a context.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, serde::Serialize, serde::Deserialize)]
pub struct LogicId(pub u32);

/// Identity for a runtime instance (see `kryo_runtime`).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, serde::Serialize, serde::Deserialize)]
pub struct InstanceId(pub u32);

/// Monotonically-increasing id allocator.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdAllocator(u32);

impl IdAllocator {
    pub fn new() -> Self {
        Self(0)
    }

    pub fn next(&mut self) -> u32 {
        let id = self.0;
        self.0 = self.0.wrapping_add(1);
        id
    }

    /// The next value that would be returned by `next`, without consuming it.
    pub fn peek(&self) -> u32 {
        self.0
    }

    /// Advance the allocator so `peek() >= value`, never moving it backward.
    pub fn set_at_least(&mut self, value: u32) {
        if value > self.0 {
            self.0 = value;
        }
    }
}
