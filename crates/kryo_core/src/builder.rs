//! Typed constructors, attachers, mutators, and queries (§4.2).
//!
//! Constructors return `None` on allocation failure; attachers and
//! mutators silently no-op on a handle that does not resolve to a live
//! component, rather than panicking.

use crate::component::{Component, ComponentVariant};
use crate::event::{Event, Logic};
use crate::ids::NodeHandle;
use crate::style::Style;
use crate::tree::{ContextMetadata, IRContext};

pub const MIN_HEADING_LEVEL: u8 = 1;
pub const MAX_HEADING_LEVEL: u8 = 6;

/// Construct a component of any variant.
pub fn create(ctx: &mut IRContext, variant: ComponentVariant) -> Option<NodeHandle> {
    ctx.alloc(variant)
}

/// Construct a heading, clamping the level into `[1, 6]`.
pub fn create_heading(ctx: &mut IRContext, level: u8) -> Option<NodeHandle> {
    let clamped = level.clamp(MIN_HEADING_LEVEL, MAX_HEADING_LEVEL);
    ctx.alloc(ComponentVariant::Heading(clamped))
}

/// Re-clamp an existing heading's level.
pub fn set_heading_level(ctx: &mut IRContext, handle: NodeHandle, level: u8) {
    let clamped = level.clamp(MIN_HEADING_LEVEL, MAX_HEADING_LEVEL);
    if let Some(c) = ctx.get_mut(handle) {
        if matches!(c.variant, ComponentVariant::Heading(_)) {
            c.variant = ComponentVariant::Heading(clamped);
            mark_content_dirty(ctx, handle);
        }
    }
}

fn mark_content_dirty(ctx: &mut IRContext, handle: NodeHandle) {
    ctx.mark_dirty(handle, crate::component::DirtyFlags::CONTENT);
}

pub fn set_text(ctx: &mut IRContext, handle: NodeHandle, text: impl Into<String>) {
    if let Some(c) = ctx.get_mut(handle) {
        c.text_content = Some(text.into());
    }
    mark_content_dirty(ctx, handle);
}

pub fn set_tag(ctx: &mut IRContext, handle: NodeHandle, tag: impl Into<String>) {
    if let Some(c) = ctx.get_mut(handle) {
        c.tag = Some(tag.into());
    }
}

pub fn set_scope(ctx: &mut IRContext, handle: NodeHandle, scope: impl Into<String>) {
    if let Some(c) = ctx.get_mut(handle) {
        c.scope = Some(scope.into());
    }
}

pub fn set_disabled(ctx: &mut IRContext, handle: NodeHandle, disabled: bool) {
    if let Some(c) = ctx.get_mut(handle) {
        c.is_disabled = disabled;
    }
    mark_content_dirty(ctx, handle);
}

pub fn set_z_index(ctx: &mut IRContext, handle: NodeHandle, z_index: i32) {
    if let Some(c) = ctx.get_mut(handle) {
        c.z_index = z_index;
    }
    ctx.mark_dirty(handle, crate::component::DirtyFlags::LAYOUT);
}

/// Replace a component's style wholesale, marking it dirty.
pub fn set_style(ctx: &mut IRContext, handle: NodeHandle, style: Style) {
    if let Some(c) = ctx.get_mut(handle) {
        c.style = Some(Box::new(style));
    }
    ctx.mark_dirty(handle, crate::component::DirtyFlags::STYLE | crate::component::DirtyFlags::LAYOUT);
}

/// Mutate a component's style in place via `f`, marking it dirty
/// afterward. No-ops if the style has not yet been attached or the handle
/// does not resolve.
pub fn mutate_style(ctx: &mut IRContext, handle: NodeHandle, f: impl FnOnce(&mut Style)) {
    if let Some(c) = ctx.get_mut(handle) {
        f(c.style_or_default());
    }
    ctx.mark_dirty(handle, crate::component::DirtyFlags::STYLE | crate::component::DirtyFlags::LAYOUT);
}

pub fn push_event(ctx: &mut IRContext, handle: NodeHandle, event: Event) {
    if let Some(c) = ctx.get_mut(handle) {
        crate::event::push_front(&mut c.events, event);
    }
}

pub fn push_logic(ctx: &mut IRContext, handle: NodeHandle, logic: Logic) {
    if let Some(c) = ctx.get_mut(handle) {
        c.logic.push(logic);
    }
}

pub fn set_metadata(ctx: &mut IRContext, metadata: ContextMetadata) {
    ctx.metadata = Some(metadata);
}

/// Look up a component's `Component` record for read-only inspection.
pub fn get(ctx: &IRContext, handle: NodeHandle) -> Option<&Component> {
    ctx.get(handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::InstanceId;

    fn new_ctx() -> IRContext {
        IRContext::new(InstanceId(0))
    }

    #[test]
    fn heading_level_clamped_at_construction() {
        let mut ctx = new_ctx();
        let h = create_heading(&mut ctx, 9).unwrap();
        assert_eq!(get(&ctx, h).unwrap().variant, ComponentVariant::Heading(6));
        let h2 = create_heading(&mut ctx, 0).unwrap();
        assert_eq!(get(&ctx, h2).unwrap().variant, ComponentVariant::Heading(1));
    }

    #[test]
    fn mutate_style_marks_dirty() {
        let mut ctx = new_ctx();
        let h = create(&mut ctx, ComponentVariant::Text).unwrap();
        mutate_style(&mut ctx, h, |s| s.opacity = 0.5);
        assert_eq!(get(&ctx, h).unwrap().style.as_ref().unwrap().opacity, 0.5);
        assert!(get(&ctx, h).unwrap().dirty.contains(crate::component::DirtyFlags::STYLE));
    }

    #[test]
    fn attacher_on_missing_handle_is_noop() {
        let mut ctx = new_ctx();
        let h = create(&mut ctx, ComponentVariant::Text).unwrap();
        ctx.destroy(h);
        // Should not panic even though the handle is now stale.
        set_text(&mut ctx, h, "hello");
    }
}
