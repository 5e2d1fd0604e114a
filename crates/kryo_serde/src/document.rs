//! The self-describing KIR document and the tree ↔ document conversion
//! (§4.3).

use serde::{Deserialize, Serialize};

use kryo_core::component::{ComponentVariant, ModuleRef};
use kryo_core::event::{Event, Logic};
use kryo_core::ids::{ComponentId, NodeHandle};
use kryo_core::layout::Layout;
use kryo_core::style::Style;
use kryo_core::tree::IRContext;
use kryo_core::CustomData;

use crate::error::{SerdeError, SerdeResult};

/// A single component as it appears in a KIR document. Required fields
/// are `id` and `type`; everything else round-trips to its §3 default
/// when omitted.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ComponentDocument {
    pub id: u32,
    #[serde(rename = "type")]
    pub kind: Option<ComponentVariant>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub text_content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub custom_data: Option<CustomData>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub children: Vec<ComponentDocument>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub events: Vec<Event>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub logic: Vec<Logic>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub style: Option<Style>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub layout: Option<Layout>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub scope: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub module_ref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub export_name: Option<String>,
}

/// Walk the tree rooted at `handle`, producing its document form.
pub fn serialize_component(ctx: &IRContext, handle: NodeHandle) -> SerdeResult<ComponentDocument> {
    let component = ctx.get(handle).ok_or(SerdeError::InvalidRoot)?;
    let children = component
        .children
        .iter()
        .map(|&child| serialize_component(ctx, child))
        .collect::<SerdeResult<Vec<_>>>()?;

    Ok(ComponentDocument {
        id: component.id.0,
        kind: Some(component.variant),
        tag: component.tag.clone(),
        text_content: component.text_content.clone(),
        custom_data: component.custom_data.as_deref().cloned(),
        children,
        events: component.events.clone(),
        logic: component.logic.clone(),
        style: component.style.as_deref().cloned(),
        layout: component.layout.as_deref().cloned(),
        scope: component.scope.clone(),
        module_ref: component.module_ref.as_ref().map(|m| m.module.clone()),
        export_name: component.module_ref.as_ref().map(|m| m.export_name.clone()),
    })
}

/// Build a subtree from `doc` under `parent` (or as a detached root if
/// `parent` is `None`), preserving the document's ids.
pub fn deserialize_component(
    ctx: &mut IRContext,
    doc: &ComponentDocument,
    parent: Option<NodeHandle>,
) -> Option<NodeHandle> {
    let id = ComponentId(doc.id);
    let variant = doc.kind.unwrap_or_default();
    let handle = ctx.alloc_with_id(variant, id)?;

    if let Some(component) = ctx.get_mut(handle) {
        component.tag = doc.tag.clone();
        component.text_content = doc.text_content.clone();
        component.custom_data = doc.custom_data.clone().map(Box::new);
        component.events = doc.events.clone();
        component.logic = doc.logic.clone();
        component.style = doc.style.clone().map(Box::new);
        component.layout = doc.layout.clone().map(Box::new);
        component.scope = doc.scope.clone();
        component.module_ref = match (&doc.module_ref, &doc.export_name) {
            (Some(module), Some(export_name)) => Some(ModuleRef { module: module.clone(), export_name: export_name.clone() }),
            _ => None,
        };
    }

    if let Some(parent) = parent {
        ctx.add_child(parent, handle).ok();
    }

    for child_doc in &doc.children {
        deserialize_component(ctx, child_doc, Some(handle));
    }

    Some(handle)
}

/// `serialize(root) → document`.
pub fn serialize(ctx: &IRContext, root: NodeHandle) -> SerdeResult<ComponentDocument> {
    serialize_component(ctx, root)
}

/// `deserialize(document) → root'`, building a fresh tree inside `ctx`.
pub fn deserialize(ctx: &mut IRContext, doc: &ComponentDocument) -> Option<NodeHandle> {
    let root = deserialize_component(ctx, doc, None)?;
    ctx.set_root(root);
    Some(root)
}

pub fn serialize_to_string(ctx: &IRContext, root: NodeHandle) -> SerdeResult<String> {
    let doc = serialize(ctx, root)?;
    Ok(serde_json::to_string_pretty(&doc)?)
}

pub fn deserialize_from_str(ctx: &mut IRContext, json: &str) -> SerdeResult<Option<NodeHandle>> {
    let doc: ComponentDocument = serde_json::from_str(json)?;
    Ok(deserialize(ctx, &doc))
}
