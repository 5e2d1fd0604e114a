//! A single isolated IR runtime: one tree, one executor, one hot-reload
//! watcher (§4.8).

use std::any::Any;
use std::path::PathBuf;

use kryo_animation::TransitionRegistry;
use kryo_core::{IRContext, InstanceId};
use tracing::{info, warn};

use crate::assets::AssetRegistry;
use crate::callbacks::InstanceCallbacks;
use crate::compile;
use crate::error::{RuntimeError, RuntimeResult};
use crate::migrate::migrate_scoped_state;
use crate::reload::{PollResult, ReloadWatcher};

pub struct Instance {
    pub id: InstanceId,
    pub name: String,
    pub ctx: IRContext,
    pub assets: AssetRegistry,
    /// Out-of-scope platform extension points (§4.8): decoded audio
    /// backend handle, windowing/back-end handle. Left as opaque `Any`
    /// slots since neither has a concrete shape in this subsystem.
    pub audio_state: Option<Box<dyn Any + Send>>,
    pub backend_state: Option<Box<dyn Any + Send>>,
    reload_watcher: Option<ReloadWatcher>,
    transitions: TransitionRegistry,
    pub version: u64,
    pub running: bool,
    pub suspended: bool,
    base_directory: PathBuf,
    callbacks: Option<Box<dyn InstanceCallbacks>>,
}

impl Instance {
    pub fn new(id: InstanceId, name: impl Into<String>, base_directory: impl Into<PathBuf>) -> Self {
        let ctx = IRContext::new(id);
        Self {
            id,
            name: name.into(),
            ctx,
            assets: AssetRegistry::new(),
            audio_state: None,
            backend_state: None,
            reload_watcher: None,
            transitions: TransitionRegistry::new(),
            version: 0,
            running: true,
            suspended: false,
            base_directory: base_directory.into(),
            callbacks: None,
        }
    }

    pub fn with_callbacks(mut self, callbacks: Box<dyn InstanceCallbacks>) -> Self {
        callbacks.on_create(&self.ctx);
        self.callbacks = Some(callbacks);
        self
    }

    /// Build the instance's initial tree from source, replacing any
    /// existing root.
    pub fn load(&mut self, source: &str) -> RuntimeResult<()> {
        if let Some(old_root) = self.ctx.root {
            self.ctx.destroy(old_root);
        }
        let produced = compile::compile_source(&mut self.ctx, &self.base_directory, source, None)?;
        if let Some(&root) = produced.first() {
            self.ctx.set_root(root);
            kryo_animation::propagate_flags(&mut self.ctx, root);
        }
        Ok(())
    }

    /// Begin watching `path` for hot-reload (§4.8). Subsequent `poll`
    /// calls consult this watcher.
    pub fn watch(&mut self, path: impl Into<PathBuf>) -> RuntimeResult<()> {
        self.reload_watcher = Some(ReloadWatcher::new(path.into())?);
        Ok(())
    }

    pub fn suspend(&mut self) {
        if !self.suspended {
            self.suspended = true;
            if let Some(cb) = &self.callbacks {
                cb.on_suspend(&self.ctx);
            }
        }
    }

    pub fn resume(&mut self) {
        if self.suspended {
            self.suspended = false;
            if let Some(cb) = &self.callbacks {
                cb.on_resume(&self.ctx);
            }
        }
    }

    /// One frame of the hot path (§5): advance animations and
    /// transitions against the live tree. A no-op while suspended.
    pub fn tick(&mut self, delta_time: f32) {
        if self.suspended || !self.running {
            return;
        }
        let Some(root) = self.ctx.root else { return };
        kryo_animation::animation_tree_update(&mut self.ctx, root, delta_time);
        self.transitions.detect_and_start(&self.ctx, root);
        self.transitions.update_active(delta_time);
        self.transitions.apply_values(&mut self.ctx);
    }

    /// Drive the hot-reload state machine one step (§4.8 steps 1-9). A
    /// no-op if no watcher is attached. Parse failures and vetoes are
    /// reported via the instance's `on_error` callback and otherwise
    /// leave the instance untouched.
    pub fn poll_reload(&mut self) -> RuntimeResult<bool> {
        let Some(watcher) = self.reload_watcher.as_mut() else { return Ok(false) };
        let outcome = watcher.poll();
        let path = match outcome {
            PollResult::NoChanges => return Ok(false),
            PollResult::Error(err) => {
                self.report_error(&err);
                return Err(err);
            }
            PollResult::Reloaded(path) => path,
        };

        if let Some(cb) = &self.callbacks {
            if !cb.can_reload(&self.ctx) {
                return Err(RuntimeError::ReloadVetoed);
            }
        }
        let Some(old_root) = self.ctx.root else { return Ok(false) };
        if let Some(cb) = &self.callbacks {
            cb.on_before_reload(&self.ctx, old_root);
        }

        let source = match std::fs::read_to_string(&path) {
            Ok(s) => s,
            Err(io_err) => {
                warn!(path = %path.display(), err = %io_err, "hot-reload read failed");
                let err = RuntimeError::ReloadIoFailed(io_err);
                self.report_error(&err);
                return Err(err);
            }
        };

        let mut new_ctx = IRContext::new(self.id);
        let produced = match compile::compile_source(&mut new_ctx, &self.base_directory, &source, None) {
            Ok(p) => p,
            Err(err) => {
                self.report_error(&err);
                return Err(err);
            }
        };
        let Some(&new_root) = produced.first() else { return Ok(false) };
        new_ctx.set_root(new_root);

        migrate_scoped_state(&self.ctx, old_root, &mut new_ctx, new_root);

        self.ctx = new_ctx;
        kryo_animation::propagate_flags(&mut self.ctx, new_root);
        self.version += 1;
        if let Some(watcher) = self.reload_watcher.as_mut() {
            watcher.mark_reloaded();
        }
        info!(instance = ?self.id, version = self.version, "hot-reload swapped root");

        if let Some(cb) = &self.callbacks {
            cb.on_after_reload(&self.ctx, new_root);
        }
        Ok(true)
    }

    fn report_error(&self, err: &RuntimeError) {
        if let Some(cb) = &self.callbacks {
            cb.on_error(err);
        }
    }
}

impl Drop for Instance {
    fn drop(&mut self) {
        if let Some(cb) = &self.callbacks {
            cb.on_destroy(&self.ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_sets_root_and_propagates_flags() {
        let mut instance = Instance::new(InstanceId(0), "demo", ".");
        instance.load("Container { }").unwrap();
        assert!(instance.ctx.root.is_some());
    }

    #[test]
    fn tick_is_a_no_op_while_suspended() {
        let mut instance = Instance::new(InstanceId(0), "demo", ".");
        instance.load("Container { }").unwrap();
        instance.suspend();
        instance.tick(1.0 / 60.0);
        assert!(instance.suspended);
    }

    #[test]
    fn poll_reload_without_a_watcher_is_a_no_op() {
        let mut instance = Instance::new(InstanceId(0), "demo", ".");
        instance.load("Container { }").unwrap();
        assert!(!instance.poll_reload().unwrap());
    }
}
