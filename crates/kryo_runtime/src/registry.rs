//! Process-wide instance registry, bounded by [`IR_MAX_INSTANCES`] (§4.8).

use std::path::PathBuf;

use kryo_core::InstanceId;
use rustc_hash::FxHashMap;

use crate::error::{RuntimeError, RuntimeResult};
use crate::instance::Instance;

/// Upper bound on concurrently live instances per process. Not set by
/// `spec.md` (implementation-defined, like its grid-track and
/// breakpoint bounds); chosen generously since an instance is a full
/// IR tree plus watcher, not a lightweight handle.
pub const IR_MAX_INSTANCES: usize = 64;

#[derive(Default)]
pub struct InstanceRegistry {
    instances: FxHashMap<InstanceId, Instance>,
    next_id: u32,
}

impl InstanceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Allocate and register a new, empty instance. Fails once
    /// [`IR_MAX_INSTANCES`] are already live.
    pub fn create(&mut self, name: impl Into<String>, base_directory: impl Into<PathBuf>) -> RuntimeResult<InstanceId> {
        if self.instances.len() >= IR_MAX_INSTANCES {
            return Err(RuntimeError::InstanceLimitExceeded(IR_MAX_INSTANCES));
        }
        let id = InstanceId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.instances.insert(id, Instance::new(id, name, base_directory));
        Ok(id)
    }

    pub fn get(&self, id: InstanceId) -> Option<&Instance> {
        self.instances.get(&id)
    }

    pub fn get_mut(&mut self, id: InstanceId) -> Option<&mut Instance> {
        self.instances.get_mut(&id)
    }

    /// Drop an instance, running its `on_destroy` callback via `Drop`.
    pub fn destroy(&mut self, id: InstanceId) -> RuntimeResult<()> {
        self.instances.remove(&id).map(|_| ()).ok_or(RuntimeError::InstanceNotFound(id))
    }

    /// Advance every running, non-suspended instance by `delta_time`
    /// (§5: instances are independent, but nothing stops a caller from
    /// driving them all from one frame loop on one thread).
    pub fn tick_all(&mut self, delta_time: f32) {
        for instance in self.instances.values_mut() {
            instance.tick(delta_time);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_and_destroy_round_trips() {
        let mut registry = InstanceRegistry::new();
        let id = registry.create("demo", ".").unwrap();
        assert_eq!(registry.len(), 1);
        registry.destroy(id).unwrap();
        assert!(registry.is_empty());
    }

    #[test]
    fn destroying_unknown_instance_errors() {
        let mut registry = InstanceRegistry::new();
        assert!(registry.destroy(InstanceId(999)).is_err());
    }

    #[test]
    fn registry_refuses_past_the_instance_limit() {
        let mut registry = InstanceRegistry::new();
        for _ in 0..IR_MAX_INSTANCES {
            registry.create("demo", ".").unwrap();
        }
        assert!(matches!(registry.create("overflow", "."), Err(RuntimeError::InstanceLimitExceeded(_))));
    }
}
