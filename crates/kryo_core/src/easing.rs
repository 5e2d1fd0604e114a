//! Easing curves shared by the animation and transition engines.

use serde::{Deserialize, Serialize};

/// A standard easing curve, or an explicit cubic-Bezier.
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    CubicBezier(f32, f32, f32, f32),
}

impl Default for Easing {
    fn default() -> Self {
        Easing::Linear
    }
}

impl Easing {
    /// Evaluate the curve at `t` (clamped to `[0, 1]`), returning `y` in `[0, 1]`.
    pub fn eval(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::CubicBezier(x1, y1, x2, y2) => cubic_bezier(x1, y1, x2, y2, t),
        }
    }
}

/// Solve a CSS-style cubic-Bezier easing function by bisecting on `x` to
/// find the parametric `t` for the requested progress, then evaluating `y`.
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, target_x: f32) -> f32 {
    let bezier = |t: f32, p1: f32, p2: f32| -> f32 {
        let mt = 1.0 - t;
        3.0 * mt * mt * t * p1 + 3.0 * mt * t * t * p2 + t * t * t
    };

    let mut lo = 0.0f32;
    let mut hi = 1.0f32;
    let mut t = target_x;
    for _ in 0..20 {
        let x = bezier(t, x1, x2);
        if (x - target_x).abs() < 1e-4 {
            break;
        }
        if x < target_x {
            lo = t;
        } else {
            hi = t;
        }
        t = (lo + hi) / 2.0;
    }
    bezier(t, y1, y2)
}
