//! Layout: the positioning side-car attached to a component.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::style::{AlignSelf, JustifySelf};
use crate::value::Dimension;

/// Implementation-defined bound on grid tracks per axis (§6).
pub const MAX_GRID_TRACKS: usize = 24;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum LayoutMode {
    #[default]
    Flex,
    Grid,
    Block,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum FlexDirection {
    Column,
    Row,
    /// `0xFF` sentinel: layout participates without flexing children.
    None,
}

impl Default for FlexDirection {
    fn default() -> Self {
        FlexDirection::Column
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum JustifyContent {
    #[default]
    Start,
    End,
    Center,
    SpaceBetween,
    SpaceAround,
    SpaceEvenly,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum AlignItems {
    #[default]
    Stretch,
    Start,
    End,
    Center,
    Baseline,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum BaseDirection {
    Ltr,
    Rtl,
    #[default]
    Auto,
    Inherit,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum UnicodeBidi {
    #[default]
    Normal,
    Embed,
    Isolate,
    BidiOverride,
}

#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct FlexLayout {
    pub direction: FlexDirection,
    pub wrap: bool,
    pub gap: f32,
    pub justify_content: JustifyContent,
    pub align_items: AlignItems,
    pub grow: f32,
    pub shrink: f32,
    pub base_direction: BaseDirection,
    pub unicode_bidi: UnicodeBidi,
}

impl Default for FlexLayout {
    fn default() -> Self {
        Self {
            direction: FlexDirection::default(),
            wrap: false,
            gap: 0.0,
            justify_content: JustifyContent::default(),
            // CSS default flex-shrink is 1; flex-grow defaults to 0.
            align_items: AlignItems::default(),
            grow: 0.0,
            shrink: 1.0,
            base_direction: BaseDirection::default(),
            unicode_bidi: UnicodeBidi::default(),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum TrackKind {
    Px,
    Percent,
    Fr,
    Auto,
    MinContent,
    MaxContent,
}

#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct GridTrack {
    pub kind: TrackKind,
    pub value: f32,
}

impl GridTrack {
    pub fn px(value: f32) -> Self {
        Self { kind: TrackKind::Px, value }
    }

    pub fn fr(value: f32) -> Self {
        Self { kind: TrackKind::Fr, value }
    }

    pub fn auto() -> Self {
        Self { kind: TrackKind::Auto, value: 0.0 }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum AutoFlow {
    #[default]
    Row,
    Column,
    RowDense,
    ColumnDense,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridLayout {
    pub rows: SmallVec<[GridTrack; MAX_GRID_TRACKS]>,
    pub columns: SmallVec<[GridTrack; MAX_GRID_TRACKS]>,
    pub row_gap: f32,
    pub column_gap: f32,
    pub auto_flow: AutoFlow,
    pub justify_items: JustifySelf,
    pub align_items: AlignSelf,
    pub justify_content: JustifyContent,
    pub align_content: AlignItems,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            rows: SmallVec::new(),
            columns: SmallVec::new(),
            row_gap: 0.0,
            column_gap: 0.0,
            auto_flow: AutoFlow::default(),
            justify_items: JustifySelf::default(),
            align_items: AlignSelf::default(),
            justify_content: JustifyContent::default(),
            align_content: AlignItems::default(),
        }
    }
}

impl GridLayout {
    /// Push a row track, discarding it once [`MAX_GRID_TRACKS`] is reached.
    pub fn push_row(&mut self, track: GridTrack) -> bool {
        if self.rows.len() >= MAX_GRID_TRACKS {
            return false;
        }
        self.rows.push(track);
        true
    }

    /// Push a column track, discarding it once [`MAX_GRID_TRACKS`] is reached.
    pub fn push_column(&mut self, track: GridTrack) -> bool {
        if self.columns.len() >= MAX_GRID_TRACKS {
            return false;
        }
        self.columns.push(track);
        true
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub mode: LayoutMode,
    pub flex: FlexLayout,
    pub grid: GridLayout,
    pub min_width: Option<Dimension>,
    pub max_width: Option<Dimension>,
    pub min_height: Option<Dimension>,
    pub max_height: Option<Dimension>,
    pub aspect_ratio: Option<f32>,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            mode: LayoutMode::default(),
            flex: FlexLayout::default(),
            grid: GridLayout::default(),
            min_width: None,
            max_width: None,
            min_height: None,
            max_height: None,
            aspect_ratio: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flex_defaults_match_css() {
        let flex = FlexLayout::default();
        assert_eq!(flex.grow, 0.0);
        assert_eq!(flex.shrink, 1.0);
    }

    #[test]
    fn grid_track_limit_enforced() {
        let mut grid = GridLayout::default();
        for _ in 0..MAX_GRID_TRACKS {
            assert!(grid.push_row(GridTrack::auto()));
        }
        assert!(!grid.push_row(GridTrack::auto()));
    }
}
