//! Module-reference clearing/restoring for cross-file KIR (§4.3).

use kryo_core::component::ModuleRef;
use kryo_core::ids::{ComponentId, NodeHandle};
use kryo_core::tree::IRContext;

#[derive(Clone, Debug, PartialEq)]
pub struct ModuleRefEntry {
    pub id: ComponentId,
    pub module_ref: Option<ModuleRef>,
}

/// Walk the tree collecting each component's `(id, module_ref)`, then
/// null the in-tree field so it does not bleed into a cross-file KIR
/// document.
pub fn clear_tree_module_refs(ctx: &mut IRContext, root: NodeHandle) -> Vec<ModuleRefEntry> {
    let mut entries = Vec::new();
    clear_recursive(ctx, root, &mut entries);
    entries
}

fn clear_recursive(ctx: &mut IRContext, handle: NodeHandle, entries: &mut Vec<ModuleRefEntry>) {
    let (id, module_ref, children) = match ctx.get(handle) {
        Some(c) => (c.id, c.module_ref.clone(), c.children.clone()),
        None => return,
    };
    entries.push(ModuleRefEntry { id, module_ref });
    if let Some(c) = ctx.get_mut(handle) {
        c.module_ref = None;
    }
    for child in children {
        clear_recursive(ctx, child, entries);
    }
}

/// Re-apply a list collected by [`clear_tree_module_refs`].
pub fn restore_tree_module_refs(ctx: &mut IRContext, entries: &[ModuleRefEntry]) {
    for entry in entries {
        if let Some(handle) = ctx.find_by_id(entry.id) {
            if let Some(c) = ctx.get_mut(handle) {
                c.module_ref = entry.module_ref.clone();
            }
        }
    }
}

/// String-form entry for FFI boundaries: `module_ref` flattened to its
/// `"module::export_name"` combined form, or empty if absent.
#[derive(Clone, Debug, PartialEq)]
pub struct ModuleRefEntryString {
    pub id: u32,
    pub combined: String,
}

pub fn clear_tree_module_refs_string(ctx: &mut IRContext, root: NodeHandle) -> Vec<ModuleRefEntryString> {
    clear_tree_module_refs(ctx, root)
        .into_iter()
        .map(|entry| ModuleRefEntryString {
            id: entry.id.0,
            combined: entry
                .module_ref
                .map(|m| format!("{}::{}", m.module, m.export_name))
                .unwrap_or_default(),
        })
        .collect()
}

pub fn restore_tree_module_refs_string(ctx: &mut IRContext, entries: &[ModuleRefEntryString]) {
    let parsed: Vec<ModuleRefEntry> = entries
        .iter()
        .map(|entry| ModuleRefEntry {
            id: ComponentId(entry.id),
            module_ref: entry.combined.split_once("::").map(|(module, export_name)| ModuleRef {
                module: module.to_string(),
                export_name: export_name.to_string(),
            }),
        })
        .collect();
    restore_tree_module_refs(ctx, &parsed);
}

#[cfg(test)]
mod tests {
    use super::*;
    use kryo_core::component::ComponentVariant;
    use kryo_core::ids::InstanceId;

    #[test]
    fn clear_then_restore_round_trips() {
        let mut ctx = IRContext::new(InstanceId(0));
        let root = ctx.alloc(ComponentVariant::Container).unwrap();
        ctx.set_root(root);
        ctx.get_mut(root).unwrap().module_ref =
            Some(ModuleRef { module: "shared/button".into(), export_name: "Button".into() });

        let entries = clear_tree_module_refs(&mut ctx, root);
        assert!(ctx.get(root).unwrap().module_ref.is_none());

        restore_tree_module_refs(&mut ctx, &entries);
        assert_eq!(
            ctx.get(root).unwrap().module_ref.as_ref().unwrap().module,
            "shared/button"
        );
    }

    #[test]
    fn string_form_round_trips() {
        let mut ctx = IRContext::new(InstanceId(0));
        let root = ctx.alloc(ComponentVariant::Container).unwrap();
        ctx.get_mut(root).unwrap().module_ref =
            Some(ModuleRef { module: "m".into(), export_name: "E".into() });

        let entries = clear_tree_module_refs_string(&mut ctx, root);
        restore_tree_module_refs_string(&mut ctx, &entries);
        assert_eq!(ctx.get(root).unwrap().module_ref.as_ref().unwrap().export_name, "E");
    }
}
