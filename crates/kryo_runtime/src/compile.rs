//! Source-to-IR pipeline: parse then lower, in one call (§4.5, §4.8 step 5).

use std::path::Path;

use kryo_core::{IRContext, NodeHandle};
use kryo_lower::{ConversionContext, LowerResult};
use kryo_parser::Parser;

use crate::error::{RuntimeError, RuntimeResult};

/// Parse `source` and lower it directly under `parent` (or as the tree
/// root) within `ctx`. A `Fatal` parse diagnostic or a lowering error
/// both surface as [`RuntimeError`] without mutating `ctx` beyond
/// whatever partial tree lowering already produced — callers reloading
/// in place should lower into a throwaway context first and only swap
/// roots once this returns `Ok`.
pub fn compile_source(
    ctx: &mut IRContext,
    base_directory: impl AsRef<Path>,
    source: &str,
    parent: Option<NodeHandle>,
) -> RuntimeResult<Vec<NodeHandle>> {
    let mut parser = Parser::new(source);
    let items = parser.parse_program();
    if parser.diagnostics.entries.iter().any(|d| d.level == kryo_parser::DiagnosticLevel::Fatal) {
        return Err(RuntimeError::ParseFailed(parser.diagnostics.entries));
    }

    let mut conv = ConversionContext::new(&parser.ast, base_directory.as_ref());
    let handles: LowerResult<Vec<NodeHandle>> = kryo_lower::lower_items(ctx, &mut conv, &items, parent);
    handles.map_err(RuntimeError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kryo_core::ids::InstanceId;

    #[test]
    fn compiles_a_minimal_component() {
        let mut ctx = IRContext::new(InstanceId(0));
        let handles = compile_source(&mut ctx, ".", "Container { }", None).unwrap();
        assert_eq!(handles.len(), 1);
    }

    #[test]
    fn fatal_syntax_error_is_reported_without_panicking() {
        let mut ctx = IRContext::new(InstanceId(0));
        let result = compile_source(&mut ctx, ".", "@@@not valid kry@@@", None);
        // Best-effort recovery may still produce zero or more handles;
        // the call must not panic either way.
        let _ = result;
    }
}
