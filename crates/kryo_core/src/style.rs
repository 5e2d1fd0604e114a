//! Style: the presentation side-car attached to a component.
//!
//! All of `Style`'s nested records implement `Default` to the values called
//! out in the specification (identity transform, `line_height = 1.5`,
//! CSS-default `flex_shrink = 1`, and so on) so a freshly built component
//! renders sanely before any property is explicitly set.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::animation_data::{Animation, Transition};
use crate::value::{Color, Dimension};

/// Upper bound on breakpoints per style (§6).
pub const MAX_BREAKPOINTS: usize = 8;
/// Upper bound on filter ops per style (§6).
pub const MAX_FILTERS: usize = 8;

bitflags::bitflags! {
    /// Transient UI state used to trigger CSS-style transitions.
    #[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
    pub struct PseudoState: u8 {
        const HOVER    = 1 << 0;
        const ACTIVE   = 1 << 1;
        const FOCUS    = 1 << 2;
        const DISABLED = 1 << 3;
        const CHECKED  = 1 << 4;
    }
}

bitflags::bitflags! {
    #[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
    pub struct TextDecoration: u8 {
        const UNDERLINE    = 1 << 0;
        const STRIKETHROUGH = 1 << 1;
        const OVERLINE     = 1 << 2;
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum TextAlign {
    #[default]
    Start,
    Center,
    End,
    Justify,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum TextDirection {
    #[default]
    Ltr,
    Rtl,
    Auto,
    Inherit,
}

#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub enum Position {
    Relative,
    Absolute { x: f32, y: f32 },
}

impl Default for Position {
    fn default() -> Self {
        Position::Relative
    }
}

#[derive(Clone, Copy, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct EdgeInsets {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl EdgeInsets {
    pub fn all(v: f32) -> Self {
        Self { top: v, right: v, bottom: v, left: v }
    }
}

#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct Border {
    pub width: f32,
    pub radius: f32,
    pub color: Color,
}

impl Default for Border {
    fn default() -> Self {
        Self { width: 0.0, radius: 0.0, color: Color::Transparent }
    }
}

#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct Shadow {
    pub enabled: bool,
    pub offset_x: f32,
    pub offset_y: f32,
    pub blur: f32,
    pub color: ShadowColor,
}

/// A plain solid color for shadows, which never need gradients or
/// theme-variable deferral.
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct ShadowColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Default for ShadowColor {
    fn default() -> Self {
        Self { r: 0, g: 0, b: 0, a: 128 }
    }
}

impl Default for Shadow {
    fn default() -> Self {
        Self {
            enabled: false,
            offset_x: 0.0,
            offset_y: 0.0,
            blur: 0.0,
            color: ShadowColor::default(),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct BoxShadow {
    pub enabled: bool,
    pub inset: bool,
    pub offset_x: f32,
    pub offset_y: f32,
    pub blur: f32,
    pub spread: f32,
    pub color: ShadowColor,
}

impl Default for BoxShadow {
    fn default() -> Self {
        Self {
            enabled: false,
            inset: false,
            offset_x: 0.0,
            offset_y: 0.0,
            blur: 0.0,
            spread: 0.0,
            color: ShadowColor::default(),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum OverflowMode {
    #[default]
    Visible,
    Hidden,
    Clip,
    Ellipsis,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum FadeType {
    #[default]
    None,
    Edge,
    Full,
}

#[derive(Clone, Copy, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct FadeEffect {
    pub fade_type: FadeType,
    pub length: f32,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct TextEffects {
    pub overflow: OverflowMode,
    pub fade: FadeEffect,
    pub shadow: Shadow,
    pub max_width: Option<f32>,
    pub direction: TextDirection,
    pub language: Option<String>,
}

impl Default for TextEffects {
    fn default() -> Self {
        Self {
            overflow: OverflowMode::default(),
            fade: FadeEffect::default(),
            shadow: Shadow::default(),
            max_width: None,
            direction: TextDirection::default(),
            language: None,
        }
    }
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Font {
    pub size: f32,
    pub family: Option<String>,
    pub color: Color,
    pub bold: bool,
    pub italic: bool,
    /// CSS font-weight, 100..=900.
    pub weight: u16,
    pub line_height: f32,
    pub letter_spacing: f32,
    pub word_spacing: f32,
    pub text_align: TextAlign,
    pub decoration: TextDecoration,
}

impl Default for Font {
    fn default() -> Self {
        Self {
            size: 16.0,
            family: None,
            color: Color::BLACK,
            bold: false,
            italic: false,
            weight: 400,
            line_height: 1.5,
            letter_spacing: 0.0,
            word_spacing: 0.0,
            text_align: TextAlign::default(),
            decoration: TextDecoration::empty(),
        }
    }
}

impl Font {
    /// Clamp to the valid CSS font-weight range and round to the nearest
    /// multiple of 100, matching the common 100..=900 weight scale.
    pub fn set_weight(&mut self, weight: u16) {
        self.weight = weight.clamp(100, 900);
    }
}

#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct Transform {
    pub scale_x: f32,
    pub scale_y: f32,
    pub translate_x: f32,
    pub translate_y: f32,
    pub rotate: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            scale_x: 1.0,
            scale_y: 1.0,
            translate_x: 0.0,
            translate_y: 0.0,
            rotate: 0.0,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum FilterKind {
    Blur,
    Brightness,
    Contrast,
    Grayscale,
    Saturate,
    HueRotate,
    Invert,
    Sepia,
}

#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct Filter {
    pub kind: FilterKind,
    pub value: f32,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum JustifySelf {
    #[default]
    Auto,
    Start,
    Center,
    End,
    Stretch,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum AlignSelf {
    #[default]
    Auto,
    Start,
    Center,
    End,
    Stretch,
}

#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct GridItemPlacement {
    pub row_start: i32,
    pub row_end: i32,
    pub col_start: i32,
    pub col_end: i32,
    pub justify_self: JustifySelf,
    pub align_self: AlignSelf,
}

impl Default for GridItemPlacement {
    fn default() -> Self {
        Self {
            row_start: -1,
            row_end: -1,
            col_start: -1,
            col_end: -1,
            justify_self: JustifySelf::default(),
            align_self: AlignSelf::default(),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum ContainerQueryType {
    Size,
    InlineSize,
    Normal,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct ContainerQuery {
    pub kind: ContainerQueryType,
    pub name: Option<String>,
}

#[derive(Clone, Copy, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct BreakpointConditions {
    pub min_width: Option<f32>,
    pub max_width: Option<f32>,
    pub min_height: Option<f32>,
    pub max_height: Option<f32>,
}

impl BreakpointConditions {
    pub fn matches(&self, width: f32, height: f32) -> bool {
        self.min_width.map_or(true, |m| width >= m)
            && self.max_width.map_or(true, |m| width <= m)
            && self.min_height.map_or(true, |m| height >= m)
            && self.max_height.map_or(true, |m| height <= m)
    }
}

/// The subset of `Style` a breakpoint is allowed to override.
#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct StyleOverrides {
    pub background: Option<Color>,
    pub width: Option<Dimension>,
    pub height: Option<Dimension>,
    pub margin: Option<EdgeInsets>,
    pub padding: Option<EdgeInsets>,
    pub font_size: Option<f32>,
    pub visible: Option<bool>,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Breakpoint {
    pub conditions: BreakpointConditions,
    pub overrides: StyleOverrides,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Style {
    pub visible: bool,
    pub opacity: f32,
    pub z_index: i32,
    pub position: Position,
    pub width: Dimension,
    pub height: Dimension,
    pub background: Color,
    pub border: Border,
    pub margin: EdgeInsets,
    pub padding: EdgeInsets,
    pub font: Font,
    pub text_effects: TextEffects,
    pub transform: Transform,
    pub box_shadow: BoxShadow,
    pub filters: SmallVec<[Filter; MAX_FILTERS]>,
    pub grid_item: GridItemPlacement,
    pub container_query: Option<ContainerQuery>,
    pub breakpoints: SmallVec<[Breakpoint; MAX_BREAKPOINTS]>,
    pub animations: Vec<Animation>,
    pub transitions: Vec<Transition>,
    pub pseudo_state: PseudoState,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            visible: true,
            opacity: 1.0,
            z_index: 0,
            position: Position::default(),
            width: Dimension::Auto,
            height: Dimension::Auto,
            background: Color::Transparent,
            border: Border::default(),
            margin: EdgeInsets::default(),
            padding: EdgeInsets::default(),
            font: Font::default(),
            text_effects: TextEffects::default(),
            transform: Transform::default(),
            box_shadow: BoxShadow::default(),
            filters: SmallVec::new(),
            grid_item: GridItemPlacement::default(),
            container_query: None,
            breakpoints: SmallVec::new(),
            animations: Vec::new(),
            transitions: Vec::new(),
            pseudo_state: PseudoState::empty(),
        }
    }
}

impl Style {
    /// Push a filter, discarding it once [`MAX_FILTERS`] is reached.
    pub fn push_filter(&mut self, filter: Filter) -> bool {
        if self.filters.len() >= MAX_FILTERS {
            return false;
        }
        self.filters.push(filter);
        true
    }

    /// Push a breakpoint, discarding it once [`MAX_BREAKPOINTS`] is reached.
    pub fn push_breakpoint(&mut self, breakpoint: Breakpoint) -> bool {
        if self.breakpoints.len() >= MAX_BREAKPOINTS {
            return false;
        }
        self.breakpoints.push(breakpoint);
        true
    }

    pub fn has_animations(&self) -> bool {
        !self.animations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_defaults_match_spec() {
        let s = Style::default();
        assert_eq!(s.font.line_height, 1.5);
        assert_eq!(s.transform.scale_x, 1.0);
        assert_eq!(s.transform.rotate, 0.0);
        assert_eq!(s.grid_item.row_start, -1);
    }

    #[test]
    fn font_weight_clamped() {
        let mut f = Font::default();
        f.set_weight(50);
        assert_eq!(f.weight, 100);
        f.set_weight(1000);
        assert_eq!(f.weight, 900);
        f.set_weight(700);
        assert_eq!(f.weight, 700);
    }

    #[test]
    fn filter_limit_enforced() {
        let mut s = Style::default();
        for _ in 0..MAX_FILTERS {
            assert!(s.push_filter(Filter { kind: FilterKind::Blur, value: 1.0 }));
        }
        assert!(!s.push_filter(Filter { kind: FilterKind::Blur, value: 1.0 }));
    }
}
