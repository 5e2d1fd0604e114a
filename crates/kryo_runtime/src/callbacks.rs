//! Instance lifecycle callback table (§4.8).
//!
//! Distinct from [`kryo_core::ComponentCallbacks`], which fires on
//! individual component mutation; these fire on instance-level
//! lifecycle transitions. All methods are no-ops by default so an
//! instance need only override what it cares about.

use kryo_core::{IRContext, NodeHandle};

use crate::error::RuntimeError;

pub trait InstanceCallbacks {
    fn on_create(&self, _ctx: &IRContext) {}
    fn on_destroy(&self, _ctx: &IRContext) {}
    fn on_suspend(&self, _ctx: &IRContext) {}
    fn on_resume(&self, _ctx: &IRContext) {}

    /// Fires before a reload swap, given the still-live old root.
    fn on_before_reload(&self, _ctx: &IRContext, _old_root: NodeHandle) {}
    /// Fires after the swap, given the new root.
    fn on_after_reload(&self, _ctx: &IRContext, _new_root: NodeHandle) {}

    /// Veto a pending reload. Default allows it.
    fn can_reload(&self, _ctx: &IRContext) -> bool {
        true
    }

    fn on_error(&self, _error: &RuntimeError) {}
}
