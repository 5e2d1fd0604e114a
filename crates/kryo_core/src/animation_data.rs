//! Keyframe animations and state-triggered transitions (§3).

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::easing::Easing;
use crate::style::PseudoState;

/// Upper bound on keyframes per animation (§6).
pub const MAX_KEYFRAMES: usize = 16;
/// Upper bound on properties set within a single keyframe (§6).
pub const MAX_KEYFRAME_PROPERTIES: usize = 16;
/// `iteration_count` value meaning "repeat forever".
pub const INFINITE_ITERATIONS: i32 = -1;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum AnimationProperty {
    Opacity,
    TranslateX,
    TranslateY,
    ScaleX,
    ScaleY,
    Rotate,
    BackgroundColor,
}

/// A single property target within a keyframe: either a scalar or a color,
/// never both, with `is_set` distinguishing "not targeted by this keyframe"
/// from "targeted with a value of zero".
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct KeyframeProperty {
    pub property: AnimationProperty,
    pub float_value: f32,
    pub color_value: Option<[u8; 4]>,
    pub is_set: bool,
}

impl KeyframeProperty {
    pub fn scalar(property: AnimationProperty, value: f32) -> Self {
        Self { property, float_value: value, color_value: None, is_set: true }
    }

    pub fn color(property: AnimationProperty, rgba: [u8; 4]) -> Self {
        Self { property, float_value: 0.0, color_value: Some(rgba), is_set: true }
    }
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Keyframe {
    /// Position along the animation timeline, 0.0..=1.0.
    pub offset: f32,
    pub easing: Option<Easing>,
    pub properties: SmallVec<[KeyframeProperty; MAX_KEYFRAME_PROPERTIES]>,
}

impl Keyframe {
    pub fn new(offset: f32) -> Self {
        Self { offset: offset.clamp(0.0, 1.0), easing: None, properties: SmallVec::new() }
    }

    /// Set a property on this keyframe, discarding it (returning `false`)
    /// once [`MAX_KEYFRAME_PROPERTIES`] is reached.
    pub fn push_property(&mut self, prop: KeyframeProperty) -> bool {
        if self.properties.len() >= MAX_KEYFRAME_PROPERTIES {
            return false;
        }
        self.properties.push(prop);
        true
    }

    pub fn get(&self, property: AnimationProperty) -> Option<&KeyframeProperty> {
        self.properties.iter().find(|p| p.is_set && p.property == property)
    }
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Animation {
    pub name: String,
    pub duration: f32,
    pub delay: f32,
    /// Negative one means infinite, per [`INFINITE_ITERATIONS`].
    pub iteration_count: i32,
    pub alternate: bool,
    pub default_easing: Easing,
    pub keyframes: SmallVec<[Keyframe; MAX_KEYFRAMES]>,
    pub current_time: f32,
    pub current_iteration: i32,
    pub paused: bool,
}

impl Animation {
    pub fn new(name: impl Into<String>, duration: f32) -> Self {
        Self {
            name: name.into(),
            duration,
            delay: 0.0,
            iteration_count: 1,
            alternate: false,
            default_easing: Easing::default(),
            keyframes: SmallVec::new(),
            current_time: 0.0,
            current_iteration: 0,
            paused: false,
        }
    }

    /// Add a keyframe, discarding it once [`MAX_KEYFRAMES`] is reached.
    pub fn push_keyframe(&mut self, keyframe: Keyframe) -> bool {
        if self.keyframes.len() >= MAX_KEYFRAMES {
            return false;
        }
        self.keyframes.push(keyframe);
        true
    }

    pub fn is_infinite(&self) -> bool {
        self.iteration_count == INFINITE_ITERATIONS
    }

    /// Whether playback direction is reversed for the current iteration,
    /// given `alternate` is set.
    pub fn is_reversed_iteration(&self) -> bool {
        self.alternate && self.current_iteration % 2 == 1
    }
}

/// A CSS-style transition: one animated property, armed by a pseudo-state
/// change. `trigger_mask` of empty means "any pseudo-state change arms it".
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct Transition {
    pub property: AnimationProperty,
    pub duration: f32,
    pub delay: f32,
    pub easing: Easing,
    pub trigger_mask: PseudoState,
}

impl Transition {
    pub fn new(property: AnimationProperty, duration: f32) -> Self {
        Self {
            property,
            duration,
            delay: 0.0,
            easing: Easing::default(),
            trigger_mask: PseudoState::empty(),
        }
    }

    /// Whether a pseudo-state change from `before` to `after` arms this
    /// transition: an empty mask matches any change, otherwise the flipped
    /// bits must intersect the mask.
    pub fn is_triggered_by(&self, before: PseudoState, after: PseudoState) -> bool {
        let changed = before ^ after;
        if changed.is_empty() {
            return false;
        }
        self.trigger_mask.is_empty() || self.trigger_mask.intersects(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyframe_limit_enforced() {
        let mut anim = Animation::new("spin", 1.0);
        for i in 0..MAX_KEYFRAMES {
            assert!(anim.push_keyframe(Keyframe::new(i as f32 / MAX_KEYFRAMES as f32)));
        }
        assert!(!anim.push_keyframe(Keyframe::new(1.0)));
    }

    #[test]
    fn keyframe_property_lookup_skips_unset() {
        let mut kf = Keyframe::new(0.0);
        kf.push_property(KeyframeProperty::scalar(AnimationProperty::Opacity, 0.5));
        assert!(kf.get(AnimationProperty::Opacity).is_some());
        assert!(kf.get(AnimationProperty::Rotate).is_none());
    }

    #[test]
    fn alternate_reverses_odd_iterations() {
        let mut anim = Animation::new("pulse", 1.0);
        anim.alternate = true;
        anim.current_iteration = 0;
        assert!(!anim.is_reversed_iteration());
        anim.current_iteration = 1;
        assert!(anim.is_reversed_iteration());
    }

    #[test]
    fn transition_empty_mask_matches_any_change() {
        let t = Transition::new(AnimationProperty::Opacity, 0.2);
        assert!(t.is_triggered_by(PseudoState::empty(), PseudoState::HOVER));
        assert!(!t.is_triggered_by(PseudoState::HOVER, PseudoState::HOVER));
    }

    #[test]
    fn transition_mask_requires_intersection() {
        let mut t = Transition::new(AnimationProperty::Opacity, 0.2);
        t.trigger_mask = PseudoState::FOCUS;
        assert!(!t.is_triggered_by(PseudoState::empty(), PseudoState::HOVER));
        assert!(t.is_triggered_by(PseudoState::empty(), PseudoState::FOCUS));
    }
}
