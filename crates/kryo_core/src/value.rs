//! Dimension and color value types shared by style and layout.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Maximum number of gradient stops (§6 bound).
pub const MAX_GRADIENT_STOPS: usize = 8;

/// A length or size value as it appears in styles and layout tracks.
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "UPPERCASE")]
pub enum Dimension {
    /// Absolute pixels.
    Px(f32),
    /// Percentage of the containing block (0..100 scale, matching CSS).
    Percent(f32),
    /// Sized to content; carried value is ignored.
    Auto,
    /// Flex-basis style growth factor.
    Flex(f32),
}

impl Dimension {
    pub const ZERO: Dimension = Dimension::Px(0.0);

    /// The numeric payload, or 0.0 for `Auto` where it is meaningless.
    pub fn value(self) -> f32 {
        match self {
            Dimension::Px(v) | Dimension::Percent(v) | Dimension::Flex(v) => v,
            Dimension::Auto => 0.0,
        }
    }
}

impl Default for Dimension {
    fn default() -> Self {
        Dimension::Auto
    }
}

/// An sRGB color, either solid, a gradient, transparent, or a deferred
/// reference into a theme's variable table.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Color {
    Solid { r: u8, g: u8, b: u8, a: u8 },
    Gradient(Box<Gradient>),
    Transparent,
    VarRef { theme_var: u32 },
}

impl Color {
    pub const TRANSPARENT: Color = Color::Transparent;
    pub const BLACK: Color = Color::Solid { r: 0, g: 0, b: 0, a: 255 };
    pub const WHITE: Color = Color::Solid { r: 255, g: 255, b: 255, a: 255 };

    pub fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color::Solid { r, g, b, a }
    }

    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color::rgba(r, g, b, 255)
    }

    /// Componentwise 8-bit sRGB lerp, per §4.6. Non-solid colors
    /// (gradients, transparent, var refs) do not blend and snap to `other`
    /// once `t >= 1.0`, otherwise hold `self`.
    pub fn lerp(&self, other: &Color, t: f32) -> Color {
        if let (
            Color::Solid { r: r1, g: g1, b: b1, a: a1 },
            Color::Solid { r: r2, g: g2, b: b2, a: a2 },
        ) = (self, other)
        {
            let lerp_u8 = |a: u8, b: u8| -> u8 {
                let a = a as f32;
                let b = b as f32;
                (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
            };
            return Color::Solid {
                r: lerp_u8(*r1, *r2),
                g: lerp_u8(*g1, *g2),
                b: lerp_u8(*b1, *b2),
                a: lerp_u8(*a1, *a2),
            };
        }
        if t >= 1.0 {
            other.clone()
        } else {
            self.clone()
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::Transparent
    }
}

#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct GradientStop {
    /// Position along the gradient, 0.0..=1.0.
    pub position: f32,
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub enum GradientKind {
    Linear { angle_deg: f32 },
    Radial { cx: f32, cy: f32 },
    Conic { cx: f32, cy: f32 },
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Gradient {
    pub kind: GradientKind,
    pub stops: SmallVec<[GradientStop; MAX_GRADIENT_STOPS]>,
}

impl Gradient {
    pub fn linear(angle_deg: f32) -> Self {
        Self {
            kind: GradientKind::Linear { angle_deg },
            stops: SmallVec::new(),
        }
    }

    /// Add a stop, discarding it (with a caller-visible `false` return)
    /// once [`MAX_GRADIENT_STOPS`] is reached.
    pub fn push_stop(&mut self, stop: GradientStop) -> bool {
        if self.stops.len() >= MAX_GRADIENT_STOPS {
            return false;
        }
        self.stops.push(stop);
        true
    }
}
