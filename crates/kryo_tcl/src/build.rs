//! Builds an IR tree from lexed Tcl commands (§6 adapter surface).
//!
//! Widget hierarchy comes from Tk's own dotted-path convention
//! (`.foo.bar` is a child of `.foo`, which is a child of the implicit
//! root `.`) rather than from geometry-manager commands (`pack`/`grid`/
//! `place`), which this adapter does not interpret — they affect pixel
//! placement, not component parentage.

use rustc_hash::FxHashMap;

use kryo_core::{ComponentVariant, IRContext, LogicId, NodeHandle};

use crate::options::apply_option;
use crate::widget_table::{is_widget_command, map_widget_type};

/// Walk lexed `commands`, creating one IR component per distinct widget
/// path and applying its `-option value` pairs. Returns the root handle
/// (path `.`), or `None` if the component pool was exhausted partway
/// through (mirrors the builder's own allocation-failure contract).
pub fn build_tree(ctx: &mut IRContext, commands: &[Vec<String>]) -> Option<NodeHandle> {
    let mut paths: FxHashMap<String, NodeHandle> = FxHashMap::default();
    let mut next_logic_id = LogicId(0);

    for command in commands {
        let Some(name) = command.first() else { continue };
        if !is_widget_command(name) {
            continue;
        }
        let Some(path) = command.get(1) else { continue };
        let handle = ensure_path(ctx, &mut paths, path)?;
        if let Some(c) = ctx.get_mut(handle) {
            c.variant = map_widget_type(name);
        }

        let mut args = command[2..].iter();
        while let (Some(opt), Some(value)) = (args.next(), args.next()) {
            apply_option(ctx, handle, &mut next_logic_id, opt, value);
        }
    }

    ensure_path(ctx, &mut paths, ".")
}

fn ensure_path(ctx: &mut IRContext, paths: &mut FxHashMap<String, NodeHandle>, path: &str) -> Option<NodeHandle> {
    if let Some(&handle) = paths.get(path) {
        return Some(handle);
    }
    let handle = ctx.alloc(ComponentVariant::Container)?;
    paths.insert(path.to_string(), handle);
    if path == "." {
        ctx.set_root(handle);
    } else {
        let parent = parent_of(path);
        let parent_handle = ensure_path(ctx, paths, &parent)?;
        ctx.add_child(parent_handle, handle).ok();
    }
    Some(handle)
}

fn parent_of(path: &str) -> String {
    match path.rfind('.') {
        Some(0) | None => ".".to_string(),
        Some(idx) => path[..idx].to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kryo_core::ids::InstanceId;

    fn lex(source: &str) -> Vec<Vec<String>> {
        crate::lexer::split_commands(source).unwrap()
    }

    #[test]
    fn top_level_widget_is_parented_under_implicit_root() {
        let mut ctx = IRContext::new(InstanceId(0));
        let commands = lex("button .b -text Go");
        let root = build_tree(&mut ctx, &commands).unwrap();
        assert_eq!(ctx.get(root).unwrap().children.len(), 1);
        let button = ctx.get(root).unwrap().children[0];
        assert_eq!(ctx.get(button).unwrap().variant, ComponentVariant::Button);
    }

    #[test]
    fn nested_path_parents_under_its_frame() {
        let mut ctx = IRContext::new(InstanceId(0));
        let commands = lex("frame .f\nlabel .f.l -text Hi");
        let root = build_tree(&mut ctx, &commands).unwrap();
        let frame = ctx.get(root).unwrap().children[0];
        assert_eq!(ctx.get(frame).unwrap().children.len(), 1);
        let label = ctx.get(frame).unwrap().children[0];
        assert_eq!(ctx.get(label).unwrap().text_content.as_deref(), Some("Hi"));
    }

    #[test]
    fn geometry_manager_commands_do_not_create_components() {
        let mut ctx = IRContext::new(InstanceId(0));
        let commands = lex("frame .f\npack .f -side top");
        let root = build_tree(&mut ctx, &commands).unwrap();
        assert_eq!(ctx.get(root).unwrap().children.len(), 1);
    }

    #[test]
    fn unknown_widget_command_falls_back_to_container() {
        let mut ctx = IRContext::new(InstanceId(0));
        let commands = lex("ttk::sizegrip .sg");
        let root = build_tree(&mut ctx, &commands).unwrap();
        let sg = ctx.get(root).unwrap().children[0];
        assert_eq!(ctx.get(sg).unwrap().variant, ComponentVariant::Container);
    }
}
