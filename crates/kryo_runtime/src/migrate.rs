//! Scope-matched state migration across a hot-reload swap (§4.8 step 6).

use kryo_core::{ComponentVariant, CustomData, IRContext, NodeHandle};

/// Walk `old` and `new` in lockstep (by child index, not by id — the new
/// tree was just parsed fresh and shares no ids with the old one). Where
/// both sides carry the same non-empty `scope` string, copy `text_content`
/// (Text nodes only), `tab_data.selected_index`, and the scope itself from
/// old to new. Nodes without a scope, or whose scope differs, are left as
/// the fresh parse produced them — they are not addressable across
/// reloads. Recursion continues into children regardless of whether this
/// level matched, since a nested scope may still need migrating.
pub fn migrate_scoped_state(
    old_ctx: &IRContext,
    old: NodeHandle,
    new_ctx: &mut IRContext,
    new: NodeHandle,
) {
    let Some(old_component) = old_ctx.get(old) else { return };
    let old_scope = old_component.scope.clone();
    let old_variant = old_component.variant;
    let old_text = old_component.text_content.clone();
    let old_selected_index = match old_component.custom_data.as_deref() {
        Some(CustomData::TabGroup(state)) => Some(state.selected_index),
        _ => None,
    };
    let old_children: Vec<NodeHandle> = old_component.children.iter().copied().collect();

    let new_scope = new_ctx.get(new).and_then(|c| c.scope.clone());
    let scopes_match = matches!((&old_scope, &new_scope), (Some(a), Some(b)) if a == b);

    if scopes_match {
        if let Some(new_component) = new_ctx.get_mut(new) {
            if old_variant == ComponentVariant::Text {
                new_component.text_content = old_text;
            }
            if let Some(selected) = old_selected_index {
                if let Some(CustomData::TabGroup(state)) = new_component.custom_data.as_deref_mut() {
                    state.selected_index = selected;
                }
            }
            new_component.scope = old_scope;
        }
    }

    let new_children: Vec<NodeHandle> =
        new_ctx.get(new).map(|c| c.children.iter().copied().collect()).unwrap_or_default();
    for (old_child, new_child) in old_children.into_iter().zip(new_children) {
        migrate_scoped_state(old_ctx, old_child, new_ctx, new_child);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kryo_core::ids::InstanceId;
    use kryo_core::tabgroup::TabGroupState;
    use kryo_core::ComponentId;

    fn text_tree(ctx: &mut IRContext, text: &str, scope: Option<&str>) -> NodeHandle {
        let root = ctx.alloc(ComponentVariant::Container).unwrap();
        ctx.set_root(root);
        let leaf = ctx.alloc(ComponentVariant::Text).unwrap();
        ctx.get_mut(leaf).unwrap().text_content = Some(text.to_string());
        ctx.get_mut(leaf).unwrap().scope = scope.map(|s| s.to_string());
        ctx.add_child(root, leaf).unwrap();
        root
    }

    #[test]
    fn matching_scope_migrates_text_content() {
        let mut old_ctx = IRContext::new(InstanceId(0));
        let old_root = text_tree(&mut old_ctx, "typed value", Some("input.field"));

        let mut new_ctx = IRContext::new(InstanceId(0));
        let new_root = text_tree(&mut new_ctx, "", Some("input.field"));

        migrate_scoped_state(&old_ctx, old_root, &mut new_ctx, new_root);

        let new_leaf = new_ctx.get(new_root).unwrap().children[0];
        assert_eq!(new_ctx.get(new_leaf).unwrap().text_content.as_deref(), Some("typed value"));
    }

    #[test]
    fn mismatched_scope_is_left_untouched() {
        let mut old_ctx = IRContext::new(InstanceId(0));
        let old_root = text_tree(&mut old_ctx, "typed value", Some("input.a"));

        let mut new_ctx = IRContext::new(InstanceId(0));
        let new_root = text_tree(&mut new_ctx, "placeholder", Some("input.b"));

        migrate_scoped_state(&old_ctx, old_root, &mut new_ctx, new_root);

        let new_leaf = new_ctx.get(new_root).unwrap().children[0];
        assert_eq!(new_ctx.get(new_leaf).unwrap().text_content.as_deref(), Some("placeholder"));
    }

    #[test]
    fn tab_selection_migrates_across_matching_scope() {
        let mut old_ctx = IRContext::new(InstanceId(0));
        let old_root = old_ctx.alloc(ComponentVariant::TabGroup(kryo_core::TabGroupRole::Content)).unwrap();
        old_ctx.set_root(old_root);
        old_ctx.get_mut(old_root).unwrap().scope = Some("tabs.main".to_string());
        let mut state = TabGroupState::new(ComponentId(0), ComponentId(1), ComponentId(2));
        state.selected_index = 2;
        old_ctx.get_mut(old_root).unwrap().custom_data = Some(Box::new(CustomData::TabGroup(state)));

        let mut new_ctx = IRContext::new(InstanceId(0));
        let new_root = new_ctx.alloc(ComponentVariant::TabGroup(kryo_core::TabGroupRole::Content)).unwrap();
        new_ctx.set_root(new_root);
        new_ctx.get_mut(new_root).unwrap().scope = Some("tabs.main".to_string());
        let fresh_state = TabGroupState::new(ComponentId(0), ComponentId(1), ComponentId(2));
        new_ctx.get_mut(new_root).unwrap().custom_data = Some(Box::new(CustomData::TabGroup(fresh_state)));

        migrate_scoped_state(&old_ctx, old_root, &mut new_ctx, new_root);

        match new_ctx.get(new_root).unwrap().custom_data.as_deref().unwrap() {
            CustomData::TabGroup(s) => assert_eq!(s.selected_index, 2),
            _ => panic!("expected TabGroup custom data"),
        }
    }
}
