//! Per-animation time advance and keyframe interpolation (§4.6).

use kryo_core::style::Style;
use kryo_core::{Animation, AnimationProperty, Color, Keyframe};

/// Where an animation sits relative to its own timeline this frame.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AnimationPhase {
    /// Still inside its `delay`; ticking but not yet visibly animating.
    Pending,
    Running,
    /// Ran out its iteration count; the caller should drop it from
    /// `style.animations` once observed.
    Finished,
}

/// Advance `anim`'s `current_time` by `delta_time` and recompute
/// `current_iteration`, returning the resulting phase. A no-op (besides
/// reporting the phase) while `anim.paused`.
pub fn advance(anim: &mut Animation, delta_time: f32) -> AnimationPhase {
    if !anim.paused {
        anim.current_time += delta_time;
    }
    if anim.current_time < anim.delay {
        return AnimationPhase::Pending;
    }
    if anim.duration <= 0.0 {
        return AnimationPhase::Finished;
    }
    let elapsed = anim.current_time - anim.delay;
    let cycle = elapsed / anim.duration;
    let iteration = cycle.floor() as i32;
    if !anim.is_infinite() && iteration >= anim.iteration_count {
        anim.current_iteration = (anim.iteration_count - 1).max(0);
        return AnimationPhase::Finished;
    }
    anim.current_iteration = iteration.max(0);
    AnimationPhase::Running
}

/// Offset within the current iteration, in `[0, 1]`, with `alternate`
/// direction reversal already applied.
fn local_progress(anim: &Animation) -> f32 {
    if anim.duration <= 0.0 {
        return 1.0;
    }
    let elapsed = (anim.current_time - anim.delay).max(0.0);
    let mut local = (elapsed / anim.duration).fract();
    if local == 0.0 && elapsed > 0.0 {
        local = 1.0;
    }
    if anim.is_reversed_iteration() {
        local = 1.0 - local;
    }
    local.clamp(0.0, 1.0)
}

/// The two keyframes bracketing `local` (by offset), found by scanning
/// rather than assuming the caller inserted them in sorted order.
fn bracket(keyframes: &[Keyframe], local: f32) -> (Option<&Keyframe>, Option<&Keyframe>) {
    let before = keyframes
        .iter()
        .filter(|k| k.offset <= local)
        .max_by(|a, b| a.offset.partial_cmp(&b.offset).unwrap());
    let after = keyframes
        .iter()
        .filter(|k| k.offset >= local)
        .min_by(|a, b| a.offset.partial_cmp(&b.offset).unwrap());
    (before, after)
}

/// Interpolate every property this animation currently targets and write
/// the results into `style`. Call only for animations in
/// [`AnimationPhase::Running`] — a pending or finished animation has
/// nothing valid to write.
pub fn apply(anim: &Animation, style: &mut Style) {
    let local = local_progress(anim);
    let (before, after) = bracket(&anim.keyframes, local);

    for property in [
        AnimationProperty::Opacity,
        AnimationProperty::TranslateX,
        AnimationProperty::TranslateY,
        AnimationProperty::ScaleX,
        AnimationProperty::ScaleY,
        AnimationProperty::Rotate,
        AnimationProperty::BackgroundColor,
    ] {
        let before_prop = before.and_then(|k| k.get(property));
        let after_prop = after.and_then(|k| k.get(property));
        let (from, to) = match (before_prop, after_prop) {
            (Some(b), Some(a)) => (b, a),
            (Some(b), None) => (b, b),
            (None, Some(a)) => (a, a),
            (None, None) => continue,
        };

        let span_t = match (before, after) {
            (Some(b), Some(a)) if a.offset > b.offset => {
                ((local - b.offset) / (a.offset - b.offset)).clamp(0.0, 1.0)
            }
            _ => 1.0,
        };
        let easing = after.and_then(|k| k.easing).unwrap_or(anim.default_easing);
        let t = easing.eval(span_t);

        if let Some(color) = from.color_value.zip(to.color_value) {
            let (fc, tc) = color;
            let from_color = Color::rgba(fc[0], fc[1], fc[2], fc[3]);
            let to_color = Color::rgba(tc[0], tc[1], tc[2], tc[3]);
            write_color(style, property, from_color.lerp(&to_color, t));
        } else {
            let value = from.float_value + (to.float_value - from.float_value) * t;
            write_scalar(style, property, value);
        }
    }
}

fn write_scalar(style: &mut Style, property: AnimationProperty, value: f32) {
    match property {
        AnimationProperty::Opacity => style.opacity = value,
        AnimationProperty::TranslateX => style.transform.translate_x = value,
        AnimationProperty::TranslateY => style.transform.translate_y = value,
        AnimationProperty::ScaleX => style.transform.scale_x = value,
        AnimationProperty::ScaleY => style.transform.scale_y = value,
        AnimationProperty::Rotate => style.transform.rotate = value,
        AnimationProperty::BackgroundColor => {}
    }
}

fn write_color(style: &mut Style, property: AnimationProperty, color: Color) {
    if property == AnimationProperty::BackgroundColor {
        style.background = color;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kryo_core::animation_data::KeyframeProperty;

    fn sample_animation() -> Animation {
        let mut anim = Animation::new("fade", 1.0);
        let mut start = Keyframe::new(0.0);
        start.push_property(KeyframeProperty::scalar(AnimationProperty::Opacity, 0.0));
        let mut end = Keyframe::new(1.0);
        end.push_property(KeyframeProperty::scalar(AnimationProperty::Opacity, 1.0));
        anim.push_keyframe(start);
        anim.push_keyframe(end);
        anim
    }

    #[test]
    fn advance_reports_pending_during_delay() {
        let mut anim = sample_animation();
        anim.delay = 0.5;
        assert_eq!(advance(&mut anim, 0.1), AnimationPhase::Pending);
    }

    #[test]
    fn advance_reports_finished_past_iteration_count() {
        let mut anim = sample_animation();
        assert_eq!(advance(&mut anim, 1.5), AnimationPhase::Finished);
    }

    #[test]
    fn infinite_animation_never_finishes() {
        let mut anim = sample_animation();
        anim.iteration_count = kryo_core::animation_data::INFINITE_ITERATIONS;
        for _ in 0..10 {
            assert_eq!(advance(&mut anim, 1.0), AnimationPhase::Running);
        }
    }

    #[test]
    fn apply_interpolates_opacity_at_midpoint() {
        let mut anim = sample_animation();
        advance(&mut anim, 0.5);
        let mut style = Style::default();
        apply(&anim, &mut style);
        assert!((style.opacity - 0.5).abs() < 1e-6);
    }

    #[test]
    fn apply_snaps_to_single_bracket_past_last_keyframe_without_a_trailing_one() {
        let mut anim = Animation::new("spin", 1.0);
        let mut only = Keyframe::new(0.0);
        only.push_property(KeyframeProperty::scalar(AnimationProperty::Rotate, 90.0));
        anim.push_keyframe(only);
        advance(&mut anim, 0.5);
        let mut style = Style::default();
        apply(&anim, &mut style);
        assert_eq!(style.transform.rotate, 90.0);
    }
}
