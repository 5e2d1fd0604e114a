//! The per-instance IR context: component pool, id index, and tree ops.

use rustc_hash::FxHashMap;
use tracing::{trace, warn};

use crate::component::{Component, ComponentVariant, DirtyFlags};
use crate::error::{IrError, IrResult};
use crate::event::Logic;
use crate::ids::{ComponentId, IdAllocator, InstanceId, LogicId, NodeHandle};

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct ContextMetadata {
    pub window_width: Option<f32>,
    pub window_height: Option<f32>,
    pub title: Option<String>,
}

/// Placeholder for the reactive binding manifest; out of scope beyond its
/// presence as an optional side-table on the context.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct ReactiveManifest {
    pub bindings: Vec<(String, ComponentId)>,
}

/// Placeholder for a parsed stylesheet side-table.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct Stylesheet {
    pub rules: Vec<(String, String)>,
}

/// Weak callbacks invoked synchronously at the mutation point (§6, §9).
/// Implementations must not re-enter IR mutation for the same component.
pub trait ComponentCallbacks {
    fn on_component_added(&self, _ctx: &IRContext, _handle: NodeHandle) {}
    fn on_component_removed(&self, _ctx: &IRContext, _handle: NodeHandle) {}
    fn cleanup_handlers_for_component(&self, _ctx: &IRContext, _handle: NodeHandle) {}
}

pub struct IRContext {
    pub instance_id: InstanceId,
    pub root: Option<NodeHandle>,
    pool: kryo_memory::Pool<Component>,
    by_id: FxHashMap<ComponentId, NodeHandle>,
    pub top_level_logic: Vec<Logic>,
    next_component_id: IdAllocator,
    next_logic_id: IdAllocator,
    pub metadata: Option<ContextMetadata>,
    pub reactive_manifest: Option<ReactiveManifest>,
    pub stylesheet: Option<Stylesheet>,
    pub callbacks: Option<Box<dyn ComponentCallbacks>>,
}

impl IRContext {
    pub fn new(instance_id: InstanceId) -> Self {
        Self {
            instance_id,
            root: None,
            pool: kryo_memory::Pool::new(),
            by_id: FxHashMap::default(),
            top_level_logic: Vec::new(),
            next_component_id: IdAllocator::new(),
            next_logic_id: IdAllocator::new(),
            metadata: None,
            reactive_manifest: None,
            stylesheet: None,
            callbacks: None,
        }
    }

    pub fn next_component_id(&mut self) -> ComponentId {
        ComponentId(self.next_component_id.next())
    }

    pub fn next_logic_id(&mut self) -> LogicId {
        LogicId(self.next_logic_id.next())
    }

    /// Allocate a component from the pool and register it in the id index.
    /// Returns `None` on pool exhaustion (mirroring the spec's "constructor
    /// returns nothing on allocation failure").
    pub fn alloc(&mut self, variant: ComponentVariant) -> Option<NodeHandle> {
        let id = self.next_component_id();
        let mut component = Component::new(id, variant, self.instance_id);
        component.dirty.insert(DirtyFlags::LAYOUT);
        let handle = self.pool.alloc(component);
        self.by_id.insert(id, handle);
        Some(handle)
    }

    /// Allocate a component with an explicit id, for deserialization
    /// where the document's id must be preserved rather than
    /// re-allocated. Bumps the id allocator so future `alloc` calls
    /// never collide with it.
    pub fn alloc_with_id(&mut self, variant: ComponentVariant, id: ComponentId) -> Option<NodeHandle> {
        if id.0 >= self.next_component_id.peek() {
            self.next_component_id.set_at_least(id.0.wrapping_add(1));
        }
        let mut component = Component::new(id, variant, self.instance_id);
        component.dirty.insert(DirtyFlags::LAYOUT);
        let handle = self.pool.alloc(component);
        self.by_id.insert(id, handle);
        Some(handle)
    }

    pub fn get(&self, handle: NodeHandle) -> Option<&Component> {
        self.pool.get(handle)
    }

    pub fn get_mut(&mut self, handle: NodeHandle) -> Option<&mut Component> {
        self.pool.get_mut(handle)
    }

    /// `find_by_id`: O(1) via the hash map; falls back to an O(tree)
    /// traversal if the map entry is somehow absent but the tree is intact.
    pub fn find_by_id(&self, id: ComponentId) -> Option<NodeHandle> {
        if let Some(&handle) = self.by_id.get(&id) {
            return Some(handle);
        }
        let root = self.root?;
        self.find_by_id_traverse(root, id)
    }

    fn find_by_id_traverse(&self, handle: NodeHandle, id: ComponentId) -> Option<NodeHandle> {
        let component = self.pool.get(handle)?;
        if component.id == id {
            return Some(handle);
        }
        for &child in component.children.iter() {
            if let Some(found) = self.find_by_id_traverse(child, id) {
                return Some(found);
            }
        }
        None
    }

    pub fn set_root(&mut self, handle: NodeHandle) {
        self.root = Some(handle);
    }

    /// Append `child` to `parent`'s children, amortized O(1).
    pub fn add_child(&mut self, parent: NodeHandle, child: NodeHandle) -> IrResult<()> {
        if self.pool.get(child).is_none() || self.pool.get(parent).is_none() {
            return Ok(());
        }
        if let Some(c) = self.pool.get_mut(child) {
            c.parent = Some(parent);
        }
        if let Some(p) = self.pool.get_mut(parent) {
            p.children.push(child);
        }
        self.mark_dirty(parent, DirtyFlags::CHILDREN | DirtyFlags::LAYOUT);
        if let Some(cb) = self.callbacks.take() {
            cb.on_component_added(self, child);
            self.callbacks = Some(cb);
        }
        Ok(())
    }

    /// Insert `child` at `index`, preserving the positions of earlier
    /// siblings. O(child_count).
    pub fn insert_child(&mut self, parent: NodeHandle, index: usize, child: NodeHandle) -> IrResult<()> {
        let count = match self.pool.get(parent) {
            Some(p) => p.children.len(),
            None => return Ok(()),
        };
        if index > count {
            return Err(IrError::ChildIndexOutOfRange { index, count });
        }
        if let Some(c) = self.pool.get_mut(child) {
            c.parent = Some(parent);
        }
        if let Some(p) = self.pool.get_mut(parent) {
            p.children.insert(index, child);
        }
        self.mark_dirty(parent, DirtyFlags::CHILDREN | DirtyFlags::LAYOUT);
        Ok(())
    }

    /// Remove `child` from `parent`'s children, preserving order.
    /// O(child_count).
    pub fn remove_child(&mut self, parent: NodeHandle, child: NodeHandle) -> IrResult<()> {
        let removed = if let Some(p) = self.pool.get_mut(parent) {
            if let Some(pos) = p.children.iter().position(|&h| h == child) {
                p.children.remove(pos);
                true
            } else {
                false
            }
        } else {
            false
        };
        if removed {
            if let Some(c) = self.pool.get_mut(child) {
                c.parent = None;
            }
            self.mark_dirty(parent, DirtyFlags::CHILDREN | DirtyFlags::LAYOUT);
            if let Some(cb) = self.callbacks.take() {
                cb.on_component_removed(self, child);
                self.callbacks = Some(cb);
            }
        }
        Ok(())
    }

    /// Shared dirty-marking helper (§4.2). Invalidates this component's
    /// layout cache and ORs in the given flags. Never propagates to
    /// ancestors — that is the executor's job before the next layout pass.
    pub fn mark_dirty(&mut self, handle: NodeHandle, flags: DirtyFlags) {
        if let Some(c) = self.pool.get_mut(handle) {
            c.dirty.insert(flags);
            if flags.intersects(DirtyFlags::STYLE | DirtyFlags::LAYOUT | DirtyFlags::CONTENT | DirtyFlags::CHILDREN) {
                c.rendered_bounds.valid = false;
            }
        }
    }

    /// Recursively destroy `handle`'s entire subtree, freeing each
    /// component's owned fields and returning it to the pool unless it is
    /// externally allocated (in which case the pool slot is bypassed).
    pub fn destroy(&mut self, handle: NodeHandle) {
        let children: smallvec::SmallVec<[NodeHandle; crate::component::INLINE_CHILDREN]> =
            match self.pool.get(handle) {
                Some(c) => c.children.clone(),
                None => return,
            };
        for child in children {
            self.destroy(child);
        }
        if let Some(cb) = self.callbacks.take() {
            cb.cleanup_handlers_for_component(self, handle);
            self.callbacks = Some(cb);
        }
        let externally_allocated = self.pool.get(handle).map(|c| c.externally_allocated).unwrap_or(false);
        if let Some(component) = self.pool.get(handle) {
            self.by_id.remove(&component.id);
        }
        if externally_allocated {
            trace!(?handle, "skipping pool free for externally-allocated component");
        } else if self.pool.free(handle).is_none() {
            warn!(?handle, "double-free attempted on component");
        }
        if self.root == Some(handle) {
            self.root = None;
        }
    }

    pub fn stats(&self) -> kryo_memory::PoolStats {
        self.pool.stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_ctx() -> IRContext {
        IRContext::new(InstanceId(0))
    }

    #[test]
    fn add_child_registers_parent_and_marks_dirty() {
        let mut ctx = new_ctx();
        let root = ctx.alloc(ComponentVariant::Container).unwrap();
        ctx.set_root(root);
        let child = ctx.alloc(ComponentVariant::Text).unwrap();
        ctx.add_child(root, child).unwrap();

        assert_eq!(ctx.get(child).unwrap().parent, Some(root));
        assert_eq!(ctx.get(root).unwrap().children.len(), 1);
        assert!(!ctx.get(root).unwrap().rendered_bounds.valid);
    }

    #[test]
    fn find_by_id_is_o1_via_hash_map() {
        let mut ctx = new_ctx();
        let root = ctx.alloc(ComponentVariant::Container).unwrap();
        let id = ctx.get(root).unwrap().id;
        assert_eq!(ctx.find_by_id(id), Some(root));
        assert!(ctx.find_by_id(ComponentId(9999)).is_none());
    }

    #[test]
    fn remove_child_preserves_order() {
        let mut ctx = new_ctx();
        let root = ctx.alloc(ComponentVariant::Row).unwrap();
        let a = ctx.alloc(ComponentVariant::Text).unwrap();
        let b = ctx.alloc(ComponentVariant::Text).unwrap();
        let c = ctx.alloc(ComponentVariant::Text).unwrap();
        ctx.add_child(root, a).unwrap();
        ctx.add_child(root, b).unwrap();
        ctx.add_child(root, c).unwrap();
        ctx.remove_child(root, b).unwrap();
        let children = &ctx.get(root).unwrap().children;
        assert_eq!(children.as_slice(), &[a, c]);
    }

    #[test]
    fn insert_child_out_of_range_errors() {
        let mut ctx = new_ctx();
        let root = ctx.alloc(ComponentVariant::Row).unwrap();
        let a = ctx.alloc(ComponentVariant::Text).unwrap();
        assert!(ctx.insert_child(root, 5, a).is_err());
    }

    #[test]
    fn destroy_removes_from_hash_map_and_frees_descendants() {
        let mut ctx = new_ctx();
        let root = ctx.alloc(ComponentVariant::Container).unwrap();
        ctx.set_root(root);
        let child = ctx.alloc(ComponentVariant::Text).unwrap();
        let child_id = ctx.get(child).unwrap().id;
        ctx.add_child(root, child).unwrap();

        ctx.destroy(root);
        assert!(ctx.find_by_id(child_id).is_none());
        assert!(ctx.root.is_none());
    }

    #[test]
    fn externally_allocated_component_bypasses_pool_free() {
        let mut ctx = new_ctx();
        let handle = ctx.alloc(ComponentVariant::Container).unwrap();
        ctx.get_mut(handle).unwrap().externally_allocated = true;
        ctx.destroy(handle);
        // The slot was not returned to the free list via `free`, but the
        // id index entry is still gone.
        assert_eq!(ctx.stats().total_freed, 0);
    }
}
