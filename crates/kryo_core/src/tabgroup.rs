//! TabGroup state machine (§4.2, custom-data contract).
//!
//! The operations here are the "state-machine contract" the core imposes
//! on the TabGroup feature component: everything about how tabs actually
//! render is out of scope, but selection, reorder, drag, and finalize must
//! hold the invariant that exactly one panel is a live child of the
//! content region at any time.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::component::{CustomData, DirtyFlags};
use crate::error::{IrError, IrResult};
use crate::ids::{ComponentId, LogicId, NodeHandle};
use crate::tree::IRContext;
use crate::value::Color;

/// Bound on tabs (and panels) per group (§6, §9: small fixed tables).
pub const MAX_TABS: usize = 16;

#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct TabVisuals {
    pub bg: Color,
    pub active_bg: Color,
    pub text: Color,
    pub active_text: Color,
}

impl Default for TabVisuals {
    fn default() -> Self {
        Self {
            bg: Color::Transparent,
            active_bg: Color::Transparent,
            text: Color::BLACK,
            active_text: Color::BLACK,
        }
    }
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct TabGroupState {
    pub group: ComponentId,
    pub bar: ComponentId,
    pub content: ComponentId,
    pub tabs: SmallVec<[ComponentId; MAX_TABS]>,
    pub panels: SmallVec<[ComponentId; MAX_TABS]>,
    pub selected_index: usize,
    pub reorderable: bool,
    pub dragging: bool,
    pub drag_index: Option<usize>,
    pub drag_x: f32,
    pub tab_visuals: SmallVec<[TabVisuals; MAX_TABS]>,
    pub tab_callbacks: SmallVec<[Option<LogicId>; MAX_TABS]>,
}

impl TabGroupState {
    pub fn new(group: ComponentId, bar: ComponentId, content: ComponentId) -> Self {
        Self {
            group,
            bar,
            content,
            tabs: SmallVec::new(),
            panels: SmallVec::new(),
            selected_index: 0,
            reorderable: false,
            dragging: false,
            drag_index: None,
            drag_x: 0.0,
            tab_visuals: SmallVec::new(),
            tab_callbacks: SmallVec::new(),
        }
    }

    /// Add a tab/panel pair, discarding it once [`MAX_TABS`] is reached.
    pub fn push_tab(&mut self, tab: ComponentId, panel: ComponentId) -> bool {
        if self.tabs.len() >= MAX_TABS {
            return false;
        }
        self.tabs.push(tab);
        self.panels.push(panel);
        self.tab_visuals.push(TabVisuals::default());
        self.tab_callbacks.push(None);
        true
    }

    pub fn tab_count(&self) -> usize {
        self.tabs.len()
    }
}

fn state<'a>(handle: NodeHandle, ctx: &'a IRContext) -> IrResult<&'a TabGroupState> {
    let component = ctx.get(handle).ok_or(IrError::InvalidHandle)?;
    match component.custom_data.as_deref() {
        Some(CustomData::TabGroup(s)) => Ok(s),
        _ => Err(IrError::CustomDataMismatch(component.id)),
    }
}

fn state_mut<'a>(handle: NodeHandle, ctx: &'a mut IRContext) -> IrResult<&'a mut TabGroupState> {
    let component = ctx.get_mut(handle).ok_or(IrError::InvalidHandle)?;
    match component.custom_data.as_deref_mut() {
        Some(CustomData::TabGroup(s)) => Ok(s),
        _ => Err(IrError::CustomDataMismatch(component.id)),
    }
}

/// `select(i)`: clears the content region's children and installs only
/// `panels[i]`, re-applies tab visuals, and invalidates bounds up through
/// the group and root. Out-of-range `i` is a no-op (§8 Boundaries).
pub fn select(ctx: &mut IRContext, group: NodeHandle, index: usize) -> IrResult<()> {
    let (content_id, panel_id) = {
        let s = state(group, ctx)?;
        if index >= s.tabs.len() {
            return Ok(());
        }
        (s.content, s.panels[index])
    };
    let content = ctx.find_by_id(content_id).ok_or(IrError::NotFound(content_id))?;
    let panel = ctx.find_by_id(panel_id).ok_or(IrError::NotFound(panel_id))?;

    let existing: SmallVec<[NodeHandle; 4]> = ctx.get(content).map(|c| c.children.clone().into_iter().collect()).unwrap_or_default();
    for child in existing {
        if child != panel {
            ctx.remove_child(content, child)?;
        }
    }
    if ctx.get(content).map(|c| !c.children.contains(&panel)).unwrap_or(false) {
        ctx.add_child(content, panel)?;
    }

    ctx.mark_dirty(content, DirtyFlags::CHILDREN | DirtyFlags::LAYOUT);
    ctx.mark_dirty(group, DirtyFlags::LAYOUT);
    if let Some(root) = ctx.root {
        ctx.mark_dirty(root, DirtyFlags::LAYOUT);
    }

    state_mut(group, ctx)?.selected_index = index;
    apply_tab_visuals(ctx, group)
}

fn apply_tab_visuals(ctx: &mut IRContext, group: NodeHandle) -> IrResult<()> {
    let (tabs, visuals, selected) = {
        let s = state(group, ctx)?;
        (s.tabs.clone(), s.tab_visuals.clone(), s.selected_index)
    };
    for (i, tab_id) in tabs.iter().enumerate() {
        let Some(handle) = ctx.find_by_id(*tab_id) else { continue };
        let v = visuals.get(i).copied().unwrap_or_default();
        let is_active = i == selected;
        if let Some(component) = ctx.get_mut(handle) {
            let style = component.style_or_default();
            style.background = if is_active { v.active_bg.clone() } else { v.bg.clone() };
            style.font.color = if is_active { v.active_text.clone() } else { v.text.clone() };
        }
        ctx.mark_dirty(handle, DirtyFlags::STYLE);
    }
    Ok(())
}

/// `reorder(from, to)`: moves the tab, the matching panel (only when
/// `panel_count == tab_count`), and the bar's child at the same index;
/// keeps the originally selected *tab* selected, then re-applies via
/// [`select`].
pub fn reorder(ctx: &mut IRContext, group: NodeHandle, from: usize, to: usize) -> IrResult<()> {
    let bar_id = {
        let s = state(group, ctx)?;
        if from >= s.tabs.len() || to >= s.tabs.len() || from == to {
            return Ok(());
        }
        s.bar
    };
    let bar = ctx.find_by_id(bar_id).ok_or(IrError::NotFound(bar_id))?;

    let selected_tab = state(group, ctx)?.tabs[state(group, ctx)?.selected_index];

    let s = state_mut(group, ctx)?;
    let move_elem = |v: &mut SmallVec<[ComponentId; MAX_TABS]>, from: usize, to: usize| {
        let item = v.remove(from);
        v.insert(to, item);
    };
    move_elem(&mut s.tabs, from, to);
    let panels_match = s.panels.len() == s.tabs.len();
    if panels_match {
        let mut panels = s.panels.clone();
        move_elem(&mut panels, from, to);
        s.panels = panels;
    }
    let new_selected = s.tabs.iter().position(|&t| t == selected_tab).unwrap_or(0);

    if let Some(bar_children) = ctx.get(bar).map(|c| c.children.clone()) {
        if from < bar_children.len() && to < bar_children.len() {
            let moved = bar_children[from];
            if let Some(b) = ctx.get_mut(bar) {
                b.children.remove(from);
                b.children.insert(to, moved);
            }
            ctx.mark_dirty(bar, DirtyFlags::CHILDREN | DirtyFlags::LAYOUT);
        }
    }

    select(ctx, group, new_selected)
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DragPhase {
    Down,
    Move,
    Up,
}

/// `handle_drag`: on [`DragPhase::Down`], selects the tab under the
/// pointer and begins dragging; on [`DragPhase::Move`], reorders once the
/// pointer crosses a neighbor's midpoint; on [`DragPhase::Up`], ends the
/// drag.
pub fn handle_drag(ctx: &mut IRContext, group: NodeHandle, x: f32, y: f32, phase: DragPhase) -> IrResult<()> {
    match phase {
        DragPhase::Down => {
            let tabs = state(group, ctx)?.tabs.clone();
            let mut found = None;
            for (i, tab_id) in tabs.iter().enumerate() {
                if let Some(handle) = ctx.find_by_id(*tab_id) {
                    if let Some(c) = ctx.get(handle) {
                        if c.rendered_bounds.contains(x, y) {
                            found = Some(i);
                        }
                    }
                }
            }
            if let Some(index) = found {
                {
                    let s = state_mut(group, ctx)?;
                    s.dragging = true;
                    s.drag_index = Some(index);
                    s.drag_x = x;
                }
                select(ctx, group, index)?;
            }
            Ok(())
        }
        DragPhase::Move => {
            let (dragging, drag_index, reorderable, prev_x) = {
                let s = state(group, ctx)?;
                (s.dragging, s.drag_index, s.reorderable, s.drag_x)
            };
            if !dragging || !reorderable {
                return Ok(());
            }
            let Some(from) = drag_index else { return Ok(()) };
            let tabs = state(group, ctx)?.tabs.clone();
            // Only the immediate neighbor in the direction of travel can
            // be crossed in a single move event.
            let neighbor = if x > prev_x {
                from.checked_add(1).filter(|&n| n < tabs.len())
            } else if x < prev_x {
                from.checked_sub(1)
            } else {
                None
            };
            let mut target = from;
            if let Some(n) = neighbor {
                if let Some(handle) = ctx.find_by_id(tabs[n]) {
                    if let Some(c) = ctx.get(handle) {
                        let b = c.rendered_bounds;
                        let midpoint = b.x + b.w / 2.0;
                        let crossed = if n > from { x >= midpoint } else { x <= midpoint };
                        if b.valid && crossed {
                            target = n;
                        }
                    }
                }
            }
            state_mut(group, ctx)?.drag_x = x;
            if target != from {
                reorder(ctx, group, from, target)?;
                state_mut(group, ctx)?.drag_index = Some(target);
            }
            Ok(())
        }
        DragPhase::Up => {
            let s = state_mut(group, ctx)?;
            s.dragging = false;
            s.drag_index = None;
            Ok(())
        }
    }
}

/// `finalize`: captures each tab's current style background as its
/// "inactive" color, clamps `selected_index` into range, then re-applies
/// via [`select`]. Idempotent (§8).
pub fn finalize(ctx: &mut IRContext, group: NodeHandle) -> IrResult<()> {
    let tabs = state(group, ctx)?.tabs.clone();
    let mut visuals: SmallVec<[TabVisuals; MAX_TABS]> = SmallVec::new();
    for tab_id in &tabs {
        let bg = ctx
            .find_by_id(*tab_id)
            .and_then(|h| ctx.get(h))
            .and_then(|c| c.style.as_ref().map(|s| s.background.clone()))
            .unwrap_or(Color::Transparent);
        visuals.push(TabVisuals { bg, ..TabVisuals::default() });
    }

    let selected = {
        let s = state_mut(group, ctx)?;
        s.tab_visuals = visuals;
        if s.tabs.is_empty() {
            0
        } else {
            s.selected_index.min(s.tabs.len() - 1)
        }
    };
    select(ctx, group, selected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::ComponentVariant;
    use crate::ids::InstanceId;

    fn build_group() -> (IRContext, NodeHandle) {
        let mut ctx = IRContext::new(InstanceId(0));
        let group = ctx.alloc(ComponentVariant::TabGroup(crate::component::TabGroupRole::Bar)).unwrap();
        ctx.set_root(group);
        let bar = ctx.alloc(ComponentVariant::TabGroup(crate::component::TabGroupRole::Bar)).unwrap();
        let content = ctx.alloc(ComponentVariant::TabGroup(crate::component::TabGroupRole::Content)).unwrap();
        ctx.add_child(group, bar).unwrap();
        ctx.add_child(group, content).unwrap();

        let bar_id = ctx.get(bar).unwrap().id;
        let content_id = ctx.get(content).unwrap().id;
        let group_id = ctx.get(group).unwrap().id;
        let mut state = TabGroupState::new(group_id, bar_id, content_id);

        let mut tab_ids = Vec::new();
        let mut panel_ids = Vec::new();
        for _ in 0..3 {
            let tab = ctx.alloc(ComponentVariant::TabGroup(crate::component::TabGroupRole::Tab)).unwrap();
            let panel = ctx.alloc(ComponentVariant::TabGroup(crate::component::TabGroupRole::Panel)).unwrap();
            ctx.add_child(bar, tab).unwrap();
            tab_ids.push(ctx.get(tab).unwrap().id);
            panel_ids.push(ctx.get(panel).unwrap().id);
        }
        for (t, p) in tab_ids.iter().zip(panel_ids.iter()) {
            state.push_tab(*t, *p);
        }
        ctx.get_mut(group).unwrap().custom_data = Some(Box::new(CustomData::TabGroup(state)));
        (ctx, group)
    }

    #[test]
    fn select_makes_only_target_panel_a_child() {
        let (mut ctx, group) = build_group();
        let content_id = state(group, &ctx).unwrap().content;
        let content = ctx.find_by_id(content_id).unwrap();
        let panel2 = state(group, &ctx).unwrap().panels[2];

        select(&mut ctx, group, 2).unwrap();

        let children = &ctx.get(content).unwrap().children;
        assert_eq!(children.len(), 1);
        assert_eq!(ctx.get(children[0]).unwrap().id, panel2);
        assert_eq!(state(group, &ctx).unwrap().selected_index, 2);
    }

    #[test]
    fn select_out_of_range_is_noop() {
        let (mut ctx, group) = build_group();
        select(&mut ctx, group, 0).unwrap();
        let before = state(group, &ctx).unwrap().selected_index;
        select(&mut ctx, group, 99).unwrap();
        assert_eq!(state(group, &ctx).unwrap().selected_index, before);
    }

    #[test]
    fn reorder_preserves_selected_tab() {
        let (mut ctx, group) = build_group();
        select(&mut ctx, group, 0).unwrap();
        let tab0 = state(group, &ctx).unwrap().tabs[0];

        reorder(&mut ctx, group, 0, 2).unwrap();

        let s = state(group, &ctx).unwrap();
        assert_eq!(s.tabs[2], tab0);
        assert_eq!(s.tabs[s.selected_index], tab0);
    }

    #[test]
    fn finalize_is_idempotent() {
        let (mut ctx, group) = build_group();
        finalize(&mut ctx, group).unwrap();
        let first = state(group, &ctx).unwrap().clone();
        finalize(&mut ctx, group).unwrap();
        let second = state(group, &ctx).unwrap().clone();
        assert_eq!(first.selected_index, second.selected_index);
        assert_eq!(first.tab_visuals, second.tab_visuals);
    }
}
