//! AST → IR lowering entry point (§4.5).

use std::collections::BTreeMap;

use kryo_core::animation_data::INFINITE_ITERATIONS;
use kryo_core::style::PseudoState;
use kryo_core::{
    builder, Animation, AnimationProperty, ComponentVariant, CustomData, DirtyFlags, Easing, IRContext, Keyframe,
    KeyframeProperty, Logic, NodeHandle, SourceLanguage, Style, Transition,
};
use kryo_parser::ast::{AstNode, ComponentNode, ForLoop, IfStmt, PropertyAssignment};
use kryo_parser::{NodeId, Value};

use crate::component_table::lookup_component_type;
use crate::context::{CompileMode, ConversionContext, ParamValue};
use crate::error::LowerResult;
use crate::resolve::{parse_color, resolve_value_as_bool, resolve_value_as_number, resolve_value_as_string};
use crate::structs::bind_struct_fields;

/// Lower a top-level item list into sibling IR nodes under `parent`
/// (or as the tree root, if `parent` is `None` and none has been set
/// yet). Returns the handles of the components actually materialized
/// (empty for pure declarations like imports or struct decls).
pub fn lower_items(
    ctx: &mut IRContext,
    conv: &mut ConversionContext,
    items: &[NodeId],
    parent: Option<NodeHandle>,
) -> LowerResult<Vec<NodeHandle>> {
    let mut produced = Vec::new();
    for &item in items {
        produced.extend(lower_item(ctx, conv, item, parent)?);
    }
    Ok(produced)
}

fn lower_item(
    ctx: &mut IRContext,
    conv: &mut ConversionContext,
    item: NodeId,
    parent: Option<NodeHandle>,
) -> LowerResult<Vec<NodeHandle>> {
    let Some(node) = conv.ast.get(item) else {
        return Ok(Vec::new());
    };
    match node.clone() {
        AstNode::Import(import) => {
            for name in &import.names {
                let path = conv.resolve_import_path(&import.from);
                conv.module_registry.insert(
                    name.clone(),
                    crate::context::ModuleEntry { path, exports: import.names.clone() },
                );
            }
            if conv.skip_import_expansion {
                tracing::trace!(from = %import.from, "import recorded, expansion skipped");
            }
            Ok(Vec::new())
        }
        AstNode::StructDecl(decl) => {
            conv.struct_table.insert(decl.name.clone(), decl);
            Ok(Vec::new())
        }
        AstNode::StyleBlock(block) => {
            conv.style_table.insert(block.name, block.properties);
            Ok(Vec::new())
        }
        AstNode::PlatformBlock(block) => {
            let language = match block.language.as_str() {
                "lua" => SourceLanguage::Lua,
                "js" => SourceLanguage::Wasm,
                other => {
                    tracing::debug!(language = other, "unrecognized platform block language");
                    SourceLanguage::Native
                }
            };
            conv.logic_accumulator.push(Logic { id: conv.next_logic_id(), source_type: language, source_code: block.code });
            Ok(Vec::new())
        }
        AstNode::VarDecl(decl) => {
            conv.bind_parameter(decl.name, ParamValue::Value(decl.value));
            Ok(Vec::new())
        }
        AstNode::StateDecl(decl) => {
            conv.bind_parameter(decl.name, ParamValue::Value(decl.initial));
            Ok(Vec::new())
        }
        AstNode::PropertyAssignment(prop) => {
            conv.bind_parameter(prop.name, ParamValue::Value(prop.value));
            Ok(Vec::new())
        }
        AstNode::FuncDecl(_) | AstNode::Return(_) => {
            // Function bodies are invoked through expression evaluation at
            // runtime, not materialized as tree nodes during lowering.
            Ok(Vec::new())
        }
        AstNode::StaticBlock(body) => lower_static_block(ctx, conv, &body, parent),
        AstNode::ForLoop(for_loop) => lower_for_loop(ctx, conv, &for_loop, parent),
        AstNode::If(if_stmt) => lower_if(ctx, conv, &if_stmt, parent),
        AstNode::Component(component) => {
            let handle = lower_component(ctx, conv, &component)?;
            if let Some(parent) = parent {
                ctx.add_child(parent, handle)?;
            } else if ctx.root.is_none() {
                ctx.set_root(handle);
            }
            Ok(vec![handle])
        }
        AstNode::StructInstance { .. } => Ok(Vec::new()),
    }
}

fn lower_static_block(
    ctx: &mut IRContext,
    conv: &mut ConversionContext,
    body: &[NodeId],
    parent: Option<NodeHandle>,
) -> LowerResult<Vec<NodeHandle>> {
    let id = conv.next_static_block_id();
    let previous = conv.current_static_block_id.replace(id);
    let produced = lower_items(ctx, conv, body, parent)?;
    for &handle in &produced {
        if let Some(c) = ctx.get_mut(handle) {
            c.scope = Some(format!("static:{id}"));
        }
    }
    conv.current_static_block_id = previous;
    Ok(produced)
}

fn lower_for_loop(
    ctx: &mut IRContext,
    conv: &mut ConversionContext,
    for_loop: &ForLoop,
    parent: Option<NodeHandle>,
) -> LowerResult<Vec<NodeHandle>> {
    if matches!(conv.compile_mode, CompileMode::Codegen) {
        return Ok(Vec::new());
    }
    let mut is_unresolved = false;
    let iteration_values: Vec<Value> = match &for_loop.iterable {
        Value::Array(items) => items.clone(),
        Value::Range { start, end } => {
            let (start, end) = (*start as i64, *end as i64);
            (start..end).map(|n| Value::Number { value: n as f64, is_percentage: false }).collect()
        }
        Value::Identifier(name) => match conv.lookup_parameter(name) {
            Some(ParamValue::Value(Value::Array(items))) => items.clone(),
            _ => {
                tracing::warn!(binding = %name, "for-loop iterable did not resolve to an array or range");
                Vec::new()
            }
        },
        other => {
            let _ = resolve_value_as_string(conv, other, &mut is_unresolved);
            Vec::new()
        }
    };

    let mut produced = Vec::new();
    for value in iteration_values {
        conv.bind_parameter(for_loop.binding.clone(), ParamValue::Value(value));
        produced.extend(lower_items(ctx, conv, &for_loop.body, parent)?);
    }
    conv.unbind_parameter(&for_loop.binding);
    Ok(produced)
}

fn lower_if(
    ctx: &mut IRContext,
    conv: &mut ConversionContext,
    if_stmt: &IfStmt,
    parent: Option<NodeHandle>,
) -> LowerResult<Vec<NodeHandle>> {
    if matches!(conv.compile_mode, CompileMode::Codegen) {
        return Ok(Vec::new());
    }
    let mut is_unresolved = false;
    for branch in &if_stmt.branches {
        if resolve_value_as_bool(conv, &branch.condition, &mut is_unresolved) {
            return lower_items(ctx, conv, &branch.body, parent);
        }
    }
    match &if_stmt.else_body {
        Some(body) => lower_items(ctx, conv, body, parent),
        None => Ok(Vec::new()),
    }
}

fn lower_component(ctx: &mut IRContext, conv: &mut ConversionContext, node: &ComponentNode) -> LowerResult<NodeHandle> {
    let variant = resolve_component_variant(conv, node);
    let handle = builder::create(ctx, variant)
        .ok_or_else(|| crate::error::LowerError::ComponentAllocFailed(node.type_name.clone()))?;

    for prop in &node.properties {
        dispatch_property(ctx, conv, handle, prop);
    }

    for &child_id in &node.children {
        let Some(child_node) = conv.ast.get(child_id).cloned() else { continue };
        match child_node {
            AstNode::Component(child_component) => {
                let child_handle = lower_component(ctx, conv, &child_component)?;
                ctx.add_child(handle, child_handle)?;
            }
            _ => {
                lower_item(ctx, conv, child_id, Some(handle))?;
            }
        }
    }

    Ok(handle)
}

fn resolve_component_variant(conv: &mut ConversionContext, node: &ComponentNode) -> ComponentVariant {
    if let Some(variant) = lookup_component_type(&node.type_name) {
        return variant;
    }
    if let Some(decl) = conv.struct_table.get(&node.type_name).cloned() {
        tracing::debug!(name = %node.type_name, "struct instantiated at component position, lowered as Custom");
        let given: BTreeMap<String, Value> =
            node.properties.iter().map(|p| (p.name.clone(), p.value.clone())).collect();
        let _ = bind_struct_fields(&decl, &given);
        return ComponentVariant::Custom;
    }
    tracing::warn!(name = %node.type_name, "unknown component type, lowered as Custom");
    ComponentVariant::Custom
}

fn dispatch_property(ctx: &mut IRContext, conv: &mut ConversionContext, handle: NodeHandle, prop: &PropertyAssignment) {
    let mut unresolved = false;
    match prop.name.as_str() {
        "id" | "tag" => {
            let tag = resolve_value_as_string(conv, &prop.value, &mut unresolved);
            builder::set_tag(ctx, handle, tag);
        }
        "text" | "content" => {
            let text = resolve_value_as_string(conv, &prop.value, &mut unresolved);
            builder::set_text(ctx, handle, text);
        }
        "disabled" => {
            let disabled = resolve_value_as_bool(conv, &prop.value, &mut unresolved);
            builder::set_disabled(ctx, handle, disabled);
        }
        "z_index" => {
            let z = resolve_value_as_number(conv, &prop.value, &mut unresolved) as i32;
            builder::set_z_index(ctx, handle, z);
        }
        "scope" => {
            let scope = resolve_value_as_string(conv, &prop.value, &mut unresolved);
            builder::set_scope(ctx, handle, scope);
        }
        "width" => set_dimension(ctx, conv, handle, &prop.value, |style, dim| style.width = dim),
        "height" => set_dimension(ctx, conv, handle, &prop.value, |style, dim| style.height = dim),
        "opacity" => {
            let v = resolve_value_as_number(conv, &prop.value, &mut unresolved);
            builder::mutate_style(ctx, handle, |style| style.opacity = v);
        }
        "background" | "background_color" | "bg" => {
            let color = parse_color(conv, &prop.value, &mut unresolved);
            builder::mutate_style(ctx, handle, |style| style.background = color);
        }
        "color" | "text_color" => {
            let color = parse_color(conv, &prop.value, &mut unresolved);
            builder::mutate_style(ctx, handle, |style| style.font.color = color);
        }
        "border_color" => {
            let color = parse_color(conv, &prop.value, &mut unresolved);
            builder::mutate_style(ctx, handle, |style| style.border.color = color);
        }
        "border_width" => {
            let v = resolve_value_as_number(conv, &prop.value, &mut unresolved);
            builder::mutate_style(ctx, handle, |style| style.border.width = v);
        }
        "border_radius" => {
            let v = resolve_value_as_number(conv, &prop.value, &mut unresolved);
            builder::mutate_style(ctx, handle, |style| style.border.radius = v);
        }
        "font_size" => {
            let v = resolve_value_as_number(conv, &prop.value, &mut unresolved);
            builder::mutate_style(ctx, handle, |style| style.font.size = v);
        }
        "font_weight" => {
            let v = resolve_value_as_number(conv, &prop.value, &mut unresolved) as u16;
            builder::mutate_style(ctx, handle, |style| style.font.set_weight(v));
        }
        "font_family" => {
            let family = resolve_value_as_string(conv, &prop.value, &mut unresolved);
            builder::mutate_style(ctx, handle, |style| style.font.family = Some(family));
        }
        "bold" => {
            let v = resolve_value_as_bool(conv, &prop.value, &mut unresolved);
            builder::mutate_style(ctx, handle, |style| style.font.bold = v);
        }
        "italic" => {
            let v = resolve_value_as_bool(conv, &prop.value, &mut unresolved);
            builder::mutate_style(ctx, handle, |style| style.font.italic = v);
        }
        "visible" => {
            let v = resolve_value_as_bool(conv, &prop.value, &mut unresolved);
            builder::mutate_style(ctx, handle, |style| style.visible = v);
        }
        "gap" => {
            let v = resolve_value_as_number(conv, &prop.value, &mut unresolved);
            if let Some(c) = ctx.get_mut(handle) {
                c.layout_or_default().flex.gap = v;
            }
            ctx.mark_dirty(handle, DirtyFlags::LAYOUT);
        }
        "style" => {
            let name = resolve_value_as_string(conv, &prop.value, &mut unresolved);
            if let Some(properties) = conv.style_table.get(&name).cloned() {
                for nested in &properties {
                    dispatch_property(ctx, conv, handle, nested);
                }
            }
        }
        "animation" | "animations" => {
            for fields in object_entries(&prop.value) {
                let anim = build_animation(conv, fields, &mut unresolved);
                builder::mutate_style(ctx, handle, |style| style.animations.push(anim));
            }
        }
        "transition" | "transitions" => {
            for fields in object_entries(&prop.value) {
                let transition = build_transition(conv, fields, &mut unresolved);
                builder::mutate_style(ctx, handle, |style| style.transitions.push(transition));
            }
        }
        other => {
            tracing::trace!(property = other, "unrecognized property, stored as opaque custom data");
            store_opaque_property(ctx, conv, handle, other, &prop.value);
        }
    }
    if unresolved {
        tracing::trace!(property = %prop.name, "property value left unresolved (unbound parameter reference)");
    }
}

fn set_dimension(
    ctx: &mut IRContext,
    conv: &mut ConversionContext,
    handle: NodeHandle,
    value: &Value,
    apply: impl FnOnce(&mut Style, kryo_core::value::Dimension),
) {
    let mut unresolved = false;
    let dim = match value {
        Value::Identifier(name) if name == "auto" => kryo_core::value::Dimension::Auto,
        Value::Number { value, is_percentage: true } => kryo_core::value::Dimension::Percent(*value as f32),
        Value::Number { value, is_percentage: false } => kryo_core::value::Dimension::Px(*value as f32),
        other => {
            let n = resolve_value_as_number(conv, other, &mut unresolved);
            kryo_core::value::Dimension::Px(n)
        }
    };
    builder::mutate_style(ctx, handle, |style| apply(style, dim));
}

fn store_opaque_property(ctx: &mut IRContext, conv: &mut ConversionContext, handle: NodeHandle, name: &str, value: &Value) {
    let mut unresolved = false;
    let text = resolve_value_as_string(conv, value, &mut unresolved);
    let Some(component) = ctx.get_mut(handle) else { return };
    match component.custom_data.as_deref_mut() {
        Some(CustomData::Opaque(serde_json::Value::Object(map))) => {
            map.insert(name.to_string(), serde_json::Value::String(text));
        }
        None => {
            let mut map = serde_json::Map::new();
            map.insert(name.to_string(), serde_json::Value::String(text));
            component.custom_data = Some(Box::new(CustomData::Opaque(serde_json::Value::Object(map))));
        }
        // A TabGroup (or anything else) already owns custom_data; don't
        // clobber it with an unrelated property bag.
        Some(_) => {}
    }
}

/// `animations`/`transitions` accept either a single struct-instance
/// literal (`Keyframe { offset = 0; ... }`) or an array of them; anything
/// else (an unbound identifier, a bad literal) yields no entries rather
/// than a malformed animation.
fn object_entries(value: &Value) -> Vec<&BTreeMap<String, Value>> {
    match value {
        Value::StructInstance { fields, .. } => vec![fields],
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::StructInstance { fields, .. } => Some(fields),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn animation_property_from_name(name: &str) -> Option<AnimationProperty> {
    match name {
        "opacity" => Some(AnimationProperty::Opacity),
        "translate_x" => Some(AnimationProperty::TranslateX),
        "translate_y" => Some(AnimationProperty::TranslateY),
        "scale_x" => Some(AnimationProperty::ScaleX),
        "scale_y" => Some(AnimationProperty::ScaleY),
        "rotate" => Some(AnimationProperty::Rotate),
        "background" | "background_color" | "bg" => Some(AnimationProperty::BackgroundColor),
        _ => None,
    }
}

fn color_to_rgba(color: &kryo_core::value::Color) -> [u8; 4] {
    match color {
        kryo_core::value::Color::Solid { r, g, b, a } => [*r, *g, *b, *a],
        _ => [0, 0, 0, 0],
    }
}

fn parse_easing(conv: &ConversionContext, value: &Value, unresolved: &mut bool) -> Easing {
    if let Value::Array(items) = value {
        if let [x1, y1, x2, y2] = items.as_slice() {
            return Easing::CubicBezier(
                resolve_value_as_number(conv, x1, unresolved),
                resolve_value_as_number(conv, y1, unresolved),
                resolve_value_as_number(conv, x2, unresolved),
                resolve_value_as_number(conv, y2, unresolved),
            );
        }
    }
    let text = resolve_value_as_string(conv, value, unresolved);
    match text.as_str() {
        "linear" => Easing::Linear,
        "ease-in" | "ease_in" => Easing::EaseIn,
        "ease-out" | "ease_out" => Easing::EaseOut,
        "ease-in-out" | "ease_in_out" => Easing::EaseInOut,
        other => {
            tracing::debug!(easing = other, "unrecognized easing name, defaulting to linear");
            Easing::Linear
        }
    }
}

fn pseudo_state_from_name(name: &str) -> PseudoState {
    match name {
        "hover" => PseudoState::HOVER,
        "active" => PseudoState::ACTIVE,
        "focus" => PseudoState::FOCUS,
        "disabled" => PseudoState::DISABLED,
        "checked" => PseudoState::CHECKED,
        other => {
            tracing::debug!(trigger = other, "unrecognized pseudo-state name, ignored");
            PseudoState::empty()
        }
    }
}

fn pseudo_state_from_value(conv: &ConversionContext, value: &Value, unresolved: &mut bool) -> PseudoState {
    match value {
        Value::Array(items) => {
            items.iter().fold(PseudoState::empty(), |mask, item| mask | pseudo_state_from_value(conv, item, unresolved))
        }
        other => {
            let text = resolve_value_as_string(conv, other, unresolved);
            text.split(['|', ',']).map(|part| pseudo_state_from_name(part.trim())).fold(PseudoState::empty(), |a, b| a | b)
        }
    }
}

fn build_animation(conv: &ConversionContext, fields: &BTreeMap<String, Value>, unresolved: &mut bool) -> Animation {
    let name = fields.get("name").map(|v| resolve_value_as_string(conv, v, unresolved)).unwrap_or_default();
    let duration = fields.get("duration").map(|v| resolve_value_as_number(conv, v, unresolved)).unwrap_or(0.0);
    let mut anim = Animation::new(name, duration);
    if let Some(v) = fields.get("delay") {
        anim.delay = resolve_value_as_number(conv, v, unresolved);
    }
    if let Some(v) = fields.get("iteration_count").or_else(|| fields.get("iterations")) {
        anim.iteration_count = match v {
            Value::Identifier(name) if name == "infinite" => INFINITE_ITERATIONS,
            other => resolve_value_as_number(conv, other, unresolved) as i32,
        };
    }
    if let Some(v) = fields.get("alternate") {
        anim.alternate = resolve_value_as_bool(conv, v, unresolved);
    }
    if let Some(v) = fields.get("easing") {
        anim.default_easing = parse_easing(conv, v, unresolved);
    }
    if let Some(Value::Array(items)) = fields.get("keyframes") {
        for item in items {
            let Value::StructInstance { fields: kf_fields, .. } = item else { continue };
            let kf = build_keyframe(conv, kf_fields, unresolved);
            if !anim.push_keyframe(kf) {
                tracing::warn!(animation = %anim.name, "keyframe limit exceeded, discarding keyframe");
            }
        }
    }
    anim
}

fn build_keyframe(conv: &ConversionContext, fields: &BTreeMap<String, Value>, unresolved: &mut bool) -> Keyframe {
    let offset = fields.get("offset").map(|v| resolve_value_as_number(conv, v, unresolved)).unwrap_or(0.0);
    let mut kf = Keyframe::new(offset);
    if let Some(v) = fields.get("easing") {
        kf.easing = Some(parse_easing(conv, v, unresolved));
    }
    for (key, value) in fields {
        if key == "offset" || key == "easing" {
            continue;
        }
        let Some(property) = animation_property_from_name(key) else { continue };
        let kf_prop = if property == AnimationProperty::BackgroundColor {
            KeyframeProperty::color(property, color_to_rgba(&parse_color(conv, value, unresolved)))
        } else {
            KeyframeProperty::scalar(property, resolve_value_as_number(conv, value, unresolved))
        };
        if !kf.push_property(kf_prop) {
            tracing::warn!(offset = kf.offset, "keyframe property limit exceeded, discarding property");
        }
    }
    kf
}

fn build_transition(conv: &ConversionContext, fields: &BTreeMap<String, Value>, unresolved: &mut bool) -> Transition {
    let property = fields
        .get("property")
        .and_then(|v| animation_property_from_name(&resolve_value_as_string(conv, v, unresolved)))
        .unwrap_or(AnimationProperty::Opacity);
    let duration = fields.get("duration").map(|v| resolve_value_as_number(conv, v, unresolved)).unwrap_or(0.0);
    let mut transition = Transition::new(property, duration);
    if let Some(v) = fields.get("delay") {
        transition.delay = resolve_value_as_number(conv, v, unresolved);
    }
    if let Some(v) = fields.get("easing") {
        transition.easing = parse_easing(conv, v, unresolved);
    }
    if let Some(v) = fields.get("trigger").or_else(|| fields.get("trigger_mask")) {
        transition.trigger_mask = pseudo_state_from_value(conv, v, unresolved);
    }
    transition
}

#[cfg(test)]
mod tests {
    use super::*;
    use kryo_core::ids::InstanceId;
    use kryo_parser::Parser;

    fn lower_source(src: &'static str) -> (IRContext, NodeHandle) {
        let mut parser = Parser::new(src);
        let items = parser.parse_program();
        assert!(!parser.diagnostics.has_errors(), "{:?}", parser.diagnostics.entries);
        let mut conv = ConversionContext::new(&parser.ast, "/base");
        let mut ctx = IRContext::new(InstanceId(0));
        let produced = lower_items(&mut ctx, &mut conv, &items, None).unwrap();
        (ctx, produced[0])
    }

    #[test]
    fn lowers_a_component_with_typed_properties() {
        let (ctx, handle) = lower_source(
            r#"Container { width = 100; background = "#ff0000"; Text { text = "hi"; } }"#,
        );
        let c = ctx.get(handle).unwrap();
        assert_eq!(c.variant, ComponentVariant::Container);
        assert_eq!(c.style.as_ref().unwrap().width, kryo_core::value::Dimension::Px(100.0));
        assert_eq!(c.children.len(), 1);
    }

    #[test]
    fn unknown_component_type_becomes_custom_with_warning() {
        let (ctx, handle) = lower_source("TotallyMadeUp { }");
        assert_eq!(ctx.get(handle).unwrap().variant, ComponentVariant::Custom);
    }

    #[test]
    fn for_loop_expands_over_an_array_binding() {
        let (ctx, root) = lower_source(
            r#"Row { for item from [1, 2, 3] { Text { text = item; } } }"#,
        );
        assert_eq!(ctx.get(root).unwrap().children.len(), 3);
    }

    #[test]
    fn struct_instance_in_property_position_binds_defaults() {
        let mut parser = Parser::new(
            "struct Point { x: int = 0; y: int = 0; } Container { at = Point { x = 5; }; }",
        );
        let items = parser.parse_program();
        assert!(!parser.diagnostics.has_errors());
        let mut conv = ConversionContext::new(&parser.ast, "/base");
        let mut ctx = IRContext::new(InstanceId(0));
        let produced = lower_items(&mut ctx, &mut conv, &items, None).unwrap();
        assert_eq!(produced.len(), 1);
    }

    #[test]
    fn lowers_an_animation_property_into_keyframes() {
        let (ctx, handle) = lower_source(
            r#"Container {
                animations = [
                    Animation {
                        name = "fadeInOut";
                        duration = 1.0;
                        iteration_count = infinite;
                        alternate = true;
                        easing = "ease-in-out";
                        keyframes = [
                            Frame { offset = 0.0; opacity = 0.0; },
                            Frame { offset = 0.5; opacity = 1.0; },
                            Frame { offset = 1.0; opacity = 0.0; }
                        ];
                    }
                ];
            }"#,
        );
        let style = ctx.get(handle).unwrap().style.as_ref().unwrap();
        assert_eq!(style.animations.len(), 1);
        let anim = &style.animations[0];
        assert_eq!(anim.name, "fadeInOut");
        assert_eq!(anim.duration, 1.0);
        assert!(anim.is_infinite());
        assert!(anim.alternate);
        assert_eq!(anim.default_easing, Easing::EaseInOut);
        assert_eq!(anim.keyframes.len(), 3);
        assert_eq!(anim.keyframes[1].offset, 0.5);
        assert_eq!(anim.keyframes[1].get(AnimationProperty::Opacity).unwrap().float_value, 1.0);
    }

    #[test]
    fn lowers_a_transition_property_with_a_trigger_mask() {
        let (ctx, handle) = lower_source(
            r#"Container {
                transitions = [
                    Transition { property = "background_color"; duration = 0.2; trigger = "hover"; }
                ];
            }"#,
        );
        let style = ctx.get(handle).unwrap().style.as_ref().unwrap();
        assert_eq!(style.transitions.len(), 1);
        let transition = &style.transitions[0];
        assert_eq!(transition.property, AnimationProperty::BackgroundColor);
        assert_eq!(transition.duration, 0.2);
        assert!(transition.trigger_mask.contains(PseudoState::HOVER));
    }
}
