//! Tree-wide animation driving, short-circuited by `has_active_animations`
//! so an unanimated subtree costs one flag check (§4.6).

use kryo_core::{DirtyFlags, IRContext, NodeHandle};

use crate::keyframe::{self, AnimationPhase};

/// Recompute `has_active_animations` bottom-up from `handle` down.
/// Animations may be attached to a style before the component is
/// parented, so this must run once after the tree is built (and again
/// any time a component's own animation list changes) rather than being
/// maintained incrementally by `add_child`.
pub fn propagate_flags(ctx: &mut IRContext, handle: NodeHandle) -> bool {
    let children: Vec<NodeHandle> = match ctx.get(handle) {
        Some(c) => c.children.iter().copied().collect(),
        None => return false,
    };
    let mut any_child_active = false;
    for child in children {
        any_child_active |= propagate_flags(ctx, child);
    }
    let self_has_animations =
        ctx.get(handle).and_then(|c| c.style.as_deref()).map(|s| !s.animations.is_empty()).unwrap_or(false);
    let active = self_has_animations || any_child_active;
    if let Some(c) = ctx.get_mut(handle) {
        c.has_active_animations = active;
    }
    active
}

/// Advance every active animation under `root` by `delta_time`. Subtrees
/// whose `has_active_animations` flag is clear are skipped entirely,
/// pruning the ~95% of a typical tree that never animates.
pub fn animation_tree_update(ctx: &mut IRContext, root: NodeHandle, delta_time: f32) {
    let Some(component) = ctx.get(root) else { return };
    if !component.has_active_animations {
        return;
    }
    let children: Vec<NodeHandle> = component.children.iter().copied().collect();

    let mut still_active = false;
    if let Some(c) = ctx.get_mut(root) {
        if let Some(style) = c.style.as_deref_mut() {
            let mut finished = Vec::new();
            let mut running = Vec::new();
            for (i, anim) in style.animations.iter_mut().enumerate() {
                match keyframe::advance(anim, delta_time) {
                    AnimationPhase::Pending => still_active = true,
                    AnimationPhase::Running => {
                        still_active = true;
                        running.push(i);
                    }
                    AnimationPhase::Finished => {
                        if anim.is_infinite() {
                            still_active = true;
                        } else {
                            finished.push(i);
                        }
                    }
                }
            }
            for &i in &running {
                let anim = style.animations[i].clone();
                keyframe::apply(&anim, style);
            }
            for &i in &finished {
                let anim = style.animations[i].clone();
                keyframe::apply(&anim, style);
            }
            for &i in finished.iter().rev() {
                style.animations.remove(i);
            }
        }
        c.dirty.insert(DirtyFlags::STYLE);
    }

    for child in children {
        animation_tree_update(ctx, child, delta_time);
    }

    if let Some(c) = ctx.get_mut(root) {
        c.has_active_animations = still_active || c.children.iter().any(|&h| ctx_child_active(ctx, h));
    }
}

fn ctx_child_active(ctx: &IRContext, handle: NodeHandle) -> bool {
    ctx.get(handle).map(|c| c.has_active_animations).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kryo_core::animation_data::{AnimationProperty, Keyframe, KeyframeProperty};
    use kryo_core::ids::InstanceId;
    use kryo_core::{Animation, ComponentVariant};

    fn fade_animation() -> Animation {
        let mut anim = Animation::new("fade", 1.0);
        anim.iteration_count = kryo_core::animation_data::INFINITE_ITERATIONS;
        let mut start = Keyframe::new(0.0);
        start.push_property(KeyframeProperty::scalar(AnimationProperty::Opacity, 0.0));
        let mut end = Keyframe::new(1.0);
        end.push_property(KeyframeProperty::scalar(AnimationProperty::Opacity, 1.0));
        anim.push_keyframe(start);
        anim.push_keyframe(end);
        anim
    }

    #[test]
    fn propagate_flags_bubbles_up_from_leaf() {
        let mut ctx = IRContext::new(InstanceId(0));
        let root = ctx.alloc(ComponentVariant::Container).unwrap();
        ctx.set_root(root);
        let leaf = ctx.alloc(ComponentVariant::Text).unwrap();
        ctx.add_child(root, leaf).unwrap();
        ctx.get_mut(leaf).unwrap().style_or_default().animations.push(fade_animation());

        propagate_flags(&mut ctx, root);
        assert!(ctx.get(root).unwrap().has_active_animations);
        assert!(ctx.get(leaf).unwrap().has_active_animations);
    }

    #[test]
    fn tree_update_skips_subtrees_without_the_flag() {
        let mut ctx = IRContext::new(InstanceId(0));
        let root = ctx.alloc(ComponentVariant::Container).unwrap();
        ctx.set_root(root);
        let leaf = ctx.alloc(ComponentVariant::Text).unwrap();
        ctx.add_child(root, leaf).unwrap();
        // No animations anywhere: has_active_animations stays false, and
        // the update is a no-op rather than touching dirty flags.
        propagate_flags(&mut ctx, root);
        ctx.get_mut(root).unwrap().dirty = DirtyFlags::empty();
        animation_tree_update(&mut ctx, root, 0.5);
        assert!(ctx.get(root).unwrap().dirty.is_empty());
    }

    #[test]
    fn tree_update_advances_and_applies_an_active_leaf_animation() {
        let mut ctx = IRContext::new(InstanceId(0));
        let root = ctx.alloc(ComponentVariant::Container).unwrap();
        ctx.set_root(root);
        let leaf = ctx.alloc(ComponentVariant::Text).unwrap();
        ctx.add_child(root, leaf).unwrap();
        ctx.get_mut(leaf).unwrap().style_or_default().animations.push(fade_animation());
        propagate_flags(&mut ctx, root);

        animation_tree_update(&mut ctx, root, 0.5);

        let leaf_style = ctx.get(leaf).unwrap().style.as_ref().unwrap();
        assert!((leaf_style.opacity - 0.5).abs() < 1e-6);
    }

    fn fade_in_out() -> Animation {
        let mut anim = Animation::new("fadeInOut", 1.0);
        let mut k0 = Keyframe::new(0.0);
        k0.push_property(KeyframeProperty::scalar(AnimationProperty::Opacity, 0.0));
        let mut k1 = Keyframe::new(0.5);
        k1.push_property(KeyframeProperty::scalar(AnimationProperty::Opacity, 1.0));
        let mut k2 = Keyframe::new(1.0);
        k2.push_property(KeyframeProperty::scalar(AnimationProperty::Opacity, 0.0));
        anim.push_keyframe(k0);
        anim.push_keyframe(k1);
        anim.push_keyframe(k2);
        anim
    }

    fn opacity_after(elapsed: f32) -> f32 {
        let mut ctx = IRContext::new(InstanceId(0));
        let root = ctx.alloc(ComponentVariant::Container).unwrap();
        ctx.set_root(root);
        let leaf = ctx.alloc(ComponentVariant::Text).unwrap();
        ctx.add_child(root, leaf).unwrap();
        ctx.get_mut(leaf).unwrap().style_or_default().animations.push(fade_in_out());
        propagate_flags(&mut ctx, root);

        animation_tree_update(&mut ctx, root, elapsed);
        ctx.get(leaf).unwrap().style.as_ref().unwrap().opacity
    }

    #[test]
    fn tree_update_matches_the_fade_in_out_timeline() {
        assert!((opacity_after(0.25) - 0.5).abs() < 1e-6);
        assert!((opacity_after(0.5) - 1.0).abs() < 1e-6);
        assert!((opacity_after(0.75) - 0.5).abs() < 1e-6);
        assert!((opacity_after(1.0) - 0.0).abs() < 1e-6);
    }

    #[test]
    fn finished_animation_applies_its_final_frame_before_removal() {
        let mut ctx = IRContext::new(InstanceId(0));
        let root = ctx.alloc(ComponentVariant::Container).unwrap();
        ctx.set_root(root);
        let leaf = ctx.alloc(ComponentVariant::Text).unwrap();
        ctx.add_child(root, leaf).unwrap();
        ctx.get_mut(leaf).unwrap().style_or_default().animations.push(fade_in_out());
        propagate_flags(&mut ctx, root);

        animation_tree_update(&mut ctx, root, 1.0);

        let leaf_style = ctx.get(leaf).unwrap().style.as_ref().unwrap();
        assert!((leaf_style.opacity - 0.0).abs() < 1e-6);
        assert!(leaf_style.animations.is_empty());
    }
}
