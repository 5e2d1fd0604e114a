//! Tcl/Tk adapter parser: turns a Tk-style script into the same KIR an
//! application built from KRY source would produce (§6).
//!
//! This adapter is deliberately narrow — it recognizes widget-creation
//! commands and the handful of `-option value` pairs §6 lists, and
//! ignores everything else (geometry managers, bindings, `proc`
//! bodies, control flow) rather than implementing Tcl itself.

pub mod build;
pub mod error;
pub mod lexer;
pub mod options;
pub mod widget_table;

pub use error::{TclError, TclResult};

use kryo_core::ids::InstanceId;
use kryo_core::tree::IRContext;
use kryo_core::ids::NodeHandle;
use kryo_serde::document::{serialize_component, ComponentDocument};

/// Parse a Tk script into a fresh `IRContext` and its root handle, if
/// the script produced any widgets at all.
pub fn parse_ir(source: &str) -> TclResult<(IRContext, Option<NodeHandle>)> {
    let commands = lexer::split_commands(source)?;
    let mut ctx = IRContext::new(InstanceId(0));
    let root = build::build_tree(&mut ctx, &commands);
    Ok((ctx, root))
}

/// Parse a Tk script straight into its KIR document form.
pub fn parse_document(source: &str) -> TclResult<Option<ComponentDocument>> {
    let (ctx, root) = parse_ir(source)?;
    match root {
        Some(handle) => Ok(Some(serialize_component(&ctx, handle)?)),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_small_script_into_a_document() {
        let doc = parse_document("frame .f\nbutton .f.b -text Go -command doThing\npack .f.b")
            .unwrap()
            .unwrap();
        assert_eq!(doc.children.len(), 1);
        let button = &doc.children[0];
        assert_eq!(button.text_content.as_deref(), Some("Go"));
        assert_eq!(button.events.len(), 1);
    }

    #[test]
    fn empty_script_produces_no_root() {
        let (_, root) = parse_ir("").unwrap();
        assert!(root.is_none());
    }
}
