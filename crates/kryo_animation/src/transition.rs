//! Per-context CSS-style transition registry (§4.6).

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use kryo_core::style::{PseudoState, Style};
use kryo_core::{AnimationProperty, Color, DirtyFlags, Easing, IRContext, NodeHandle};

/// Upper bound on simultaneously active transition slots per registry.
pub const MAX_ACTIVE_TRANSITIONS: usize = 8;

#[derive(Clone, PartialEq, Debug)]
pub enum TransitionValue {
    Float(f32),
    Color(Color),
}

impl TransitionValue {
    fn lerp(&self, other: &TransitionValue, t: f32) -> TransitionValue {
        match (self, other) {
            (TransitionValue::Float(a), TransitionValue::Float(b)) => TransitionValue::Float(a + (b - a) * t),
            (TransitionValue::Color(a), TransitionValue::Color(b)) => TransitionValue::Color(a.lerp(b, t)),
            // Mismatched kinds shouldn't occur for a single property; snap
            // to the end value rather than producing nonsense.
            (_, other) => other.clone(),
        }
    }
}

fn read_property(style: &Style, property: AnimationProperty) -> TransitionValue {
    match property {
        AnimationProperty::Opacity => TransitionValue::Float(style.opacity),
        AnimationProperty::TranslateX => TransitionValue::Float(style.transform.translate_x),
        AnimationProperty::TranslateY => TransitionValue::Float(style.transform.translate_y),
        AnimationProperty::ScaleX => TransitionValue::Float(style.transform.scale_x),
        AnimationProperty::ScaleY => TransitionValue::Float(style.transform.scale_y),
        AnimationProperty::Rotate => TransitionValue::Float(style.transform.rotate),
        AnimationProperty::BackgroundColor => TransitionValue::Color(style.background.clone()),
    }
}

fn write_property(style: &mut Style, property: AnimationProperty, value: TransitionValue) {
    match (property, value) {
        (AnimationProperty::Opacity, TransitionValue::Float(v)) => style.opacity = v,
        (AnimationProperty::TranslateX, TransitionValue::Float(v)) => style.transform.translate_x = v,
        (AnimationProperty::TranslateY, TransitionValue::Float(v)) => style.transform.translate_y = v,
        (AnimationProperty::ScaleX, TransitionValue::Float(v)) => style.transform.scale_x = v,
        (AnimationProperty::ScaleY, TransitionValue::Float(v)) => style.transform.scale_y = v,
        (AnimationProperty::Rotate, TransitionValue::Float(v)) => style.transform.rotate = v,
        (AnimationProperty::BackgroundColor, TransitionValue::Color(c)) => style.background = c,
        _ => {}
    }
}

struct TransitionSlot {
    handle: NodeHandle,
    property: AnimationProperty,
    start: TransitionValue,
    end: TransitionValue,
    elapsed: f32,
    delay: f32,
    duration: f32,
    easing: Easing,
}

/// Tracks, for one `IRContext`, which components have an in-flight
/// transition and what their pseudo-state looked like last frame.
#[derive(Default)]
pub struct TransitionRegistry {
    slots: SmallVec<[TransitionSlot; MAX_ACTIVE_TRANSITIONS]>,
    previous_pseudo: FxHashMap<NodeHandle, PseudoState>,
    previous_values: FxHashMap<(NodeHandle, AnimationProperty), TransitionValue>,
}

impl TransitionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Walk `handle`'s subtree, arming a transition wherever a
    /// component's pseudo-state bitset differs from last frame's
    /// snapshot and a matching `Transition` is declared on its style.
    pub fn detect_and_start(&mut self, ctx: &IRContext, handle: NodeHandle) {
        let Some(component) = ctx.get(handle) else { return };
        if let Some(style) = component.style.as_deref() {
            let after = style.pseudo_state;
            let before = self.previous_pseudo.get(&handle).copied().unwrap_or(PseudoState::empty());
            let changed = before != after;
            for t in &style.transitions {
                let current = read_property(style, t.property);
                // The snapshot from the previous call always reflects the
                // value *before* whatever just changed it this frame, so it
                // is the correct transition start even though we overwrite
                // it with `current` below for next time.
                let previous = self.previous_values.get(&(handle, t.property)).cloned();
                if changed && t.is_triggered_by(before, after) {
                    let start = previous.unwrap_or_else(|| current.clone());
                    self.slots.retain(|s| !(s.handle == handle && s.property == t.property));
                    if self.slots.len() >= MAX_ACTIVE_TRANSITIONS {
                        self.slots.remove(0);
                    }
                    self.slots.push(TransitionSlot {
                        handle,
                        property: t.property,
                        start,
                        end: current.clone(),
                        elapsed: 0.0,
                        delay: t.delay,
                        duration: t.duration,
                        easing: t.easing,
                    });
                }
                self.previous_values.insert((handle, t.property), current);
            }
            self.previous_pseudo.insert(handle, after);
        }

        let children: SmallVec<[NodeHandle; 8]> =
            ctx.get(handle).map(|c| c.children.iter().copied().collect()).unwrap_or_default();
        for child in children {
            self.detect_and_start(ctx, child);
        }
    }

    /// Advance every slot's elapsed time. Does not touch the tree; call
    /// [`TransitionRegistry::apply_values`] afterward to write results.
    pub fn update_active(&mut self, delta_time: f32) {
        for slot in &mut self.slots {
            slot.elapsed += delta_time;
        }
    }

    /// Write each active slot's current interpolated value into its
    /// component's style, then drop completed slots. Later-started
    /// transitions win ties on the same `(handle, property)` because
    /// `detect_and_start` already cancelled any earlier one sharing it.
    pub fn apply_values(&mut self, ctx: &mut IRContext) {
        let mut finished = Vec::new();
        for (i, slot) in self.slots.iter().enumerate() {
            let after_delay = (slot.elapsed - slot.delay).max(0.0);
            let progress = if slot.duration <= 0.0 { 1.0 } else { (after_delay / slot.duration).min(1.0) };
            let eased = slot.easing.eval(progress);
            let value = slot.start.lerp(&slot.end, eased);
            if let Some(c) = ctx.get_mut(slot.handle) {
                if let Some(style) = c.style.as_deref_mut() {
                    write_property(style, slot.property, value.clone());
                }
            }
            ctx.mark_dirty(slot.handle, DirtyFlags::STYLE);
            self.previous_values.insert((slot.handle, slot.property), value);
            if progress >= 1.0 {
                finished.push(i);
            }
        }
        for &i in finished.iter().rev() {
            self.slots.remove(i);
        }
    }

    pub fn active_count(&self) -> usize {
        self.slots.len()
    }
}
