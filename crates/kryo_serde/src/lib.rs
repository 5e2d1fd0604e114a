//! Bidirectional KIR document serialization (§4.3).

pub mod document;
pub mod error;
pub mod module_ref;

pub use document::{
    deserialize, deserialize_component, deserialize_from_str, serialize, serialize_component,
    serialize_to_string, ComponentDocument,
};
pub use error::{SerdeError, SerdeResult};
pub use module_ref::{
    clear_tree_module_refs, clear_tree_module_refs_string, restore_tree_module_refs,
    restore_tree_module_refs_string, ModuleRefEntry, ModuleRefEntryString,
};
