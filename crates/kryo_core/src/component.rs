//! The component: the single node type of the tree (§3).

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::event::{Event, Logic};
use crate::ids::{ComponentId, InstanceId, NodeHandle};
use crate::layout::Layout;
use crate::style::Style;
use crate::tabgroup::TabGroupState;

/// Inline-child capacity before a component's children spill to the heap.
/// Matches the geometric-growth starting capacity from §3's lifecycle note.
pub const INLINE_CHILDREN: usize = 4;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum TableRole {
    Head,
    Body,
    Foot,
    Row,
    Cell,
    HeaderCell,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum TabGroupRole {
    Bar,
    Tab,
    Content,
    Panel,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum ComponentVariant {
    #[default]
    Container,
    Text,
    Button,
    Input,
    Checkbox,
    Dropdown,
    Row,
    Column,
    Center,
    Image,
    Canvas,
    Table(TableRole),
    TabGroup(TabGroupRole),
    /// Heading level, clamped to `[1, 6]` by the builder.
    Heading(u8),
    Paragraph,
    Blockquote,
    CodeBlock,
    List,
    ListItem,
    Link,
    Markdown,
    HorizontalRule,
    Custom,
}

/// Custom per-variant payload, replacing the original implementation's
/// "first byte of an opaque blob" discriminator with a real tagged union
/// (see the TabGroup custom-data design note).
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub enum CustomData {
    TabGroup(TabGroupState),
    /// Catch-all for feature components (table, markdown, …) whose
    /// internal shape is out of scope here; carried opaquely so it
    /// still round-trips through serialization.
    Opaque(serde_json::Value),
}

bitflags::bitflags! {
    #[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
    pub struct DirtyFlags: u8 {
        const STYLE    = 1 << 0;
        const LAYOUT   = 1 << 1;
        const CONTENT  = 1 << 2;
        const CHILDREN = 1 << 3;
    }
}

#[derive(Clone, Copy, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct RenderedBounds {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub valid: bool,
}

impl RenderedBounds {
    pub fn contains(&self, px: f32, py: f32) -> bool {
        self.valid
            && px >= self.x
            && px < self.x + self.w
            && py >= self.y
            && py < self.y + self.h
    }
}

/// A pair identifying where a component was imported from, for cross-file
/// KIR serialization (§4.3).
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct ModuleRef {
    pub module: String,
    pub export_name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Component {
    pub id: ComponentId,
    pub variant: ComponentVariant,
    /// Weak back-reference; never owns the parent. In-memory only: a
    /// `NodeHandle` is a transient pool key, not a persistable id, so it is
    /// excluded from serialization (§4.3 operates on `ComponentId`s).
    #[serde(skip)]
    pub parent: Option<NodeHandle>,
    #[serde(skip)]
    pub children: SmallVec<[NodeHandle; INLINE_CHILDREN]>,
    pub style: Option<Box<Style>>,
    pub layout: Option<Box<Layout>>,
    pub events: Vec<Event>,
    pub logic: Vec<Logic>,
    pub text_content: Option<String>,
    pub custom_data: Option<Box<CustomData>>,
    pub tag: Option<String>,
    pub rendered_bounds: RenderedBounds,
    pub z_index: i32,
    pub dirty: DirtyFlags,
    pub has_active_animations: bool,
    pub is_disabled: bool,
    pub externally_allocated: bool,
    pub owner_instance: InstanceId,
    pub scope: Option<String>,
    pub module_ref: Option<ModuleRef>,
}

impl Component {
    pub fn new(id: ComponentId, variant: ComponentVariant, owner_instance: InstanceId) -> Self {
        Self {
            id,
            variant,
            parent: None,
            children: SmallVec::new(),
            style: None,
            layout: None,
            events: Vec::new(),
            logic: Vec::new(),
            text_content: None,
            custom_data: None,
            tag: None,
            rendered_bounds: RenderedBounds::default(),
            z_index: 0,
            dirty: DirtyFlags::empty(),
            has_active_animations: false,
            is_disabled: false,
            externally_allocated: false,
            owner_instance,
            scope: None,
            module_ref: None,
        }
    }

    pub fn style_or_default(&mut self) -> &mut Style {
        self.style.get_or_insert_with(|| Box::new(Style::default()))
    }

    pub fn layout_or_default(&mut self) -> &mut Layout {
        self.layout.get_or_insert_with(|| Box::new(Layout::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_component_starts_clean() {
        let c = Component::new(ComponentId(1), ComponentVariant::Container, InstanceId(0));
        assert!(c.dirty.is_empty());
        assert!(!c.rendered_bounds.valid);
        assert!(c.children.is_empty());
    }

    #[test]
    fn bounds_contains_half_open_rect() {
        let b = RenderedBounds { x: 0.0, y: 0.0, w: 10.0, h: 10.0, valid: true };
        assert!(b.contains(0.0, 0.0));
        assert!(!b.contains(10.0, 0.0));
        assert!(!b.contains(0.0, 10.0));
    }

    #[test]
    fn invalid_bounds_never_contain() {
        let b = RenderedBounds { x: 0.0, y: 0.0, w: 10.0, h: 10.0, valid: false };
        assert!(!b.contains(1.0, 1.0));
    }
}
