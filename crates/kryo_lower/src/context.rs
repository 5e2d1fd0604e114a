//! `ConversionContext` (§4.5): everything a single lowering pass threads
//! through the AST besides the IR tree itself.

use std::path::{Path, PathBuf};

use kryo_core::{Logic, LogicId};
use kryo_parser::{Ast, Value};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Bound on the parameter-substitution table (§4.5).
pub const MAX_PARAMETERS: usize = 16;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum CompileMode {
    /// Expand only: loops unrolled, components inlined.
    #[default]
    Runtime,
    /// Preserve only: keep the original template structure.
    Codegen,
    /// Both: expanded tree plus a template side-channel.
    Hybrid,
}

/// Target platform for expression transpilation (distinct from
/// `kryo_core::event::SourceLanguage`, which tags a handler's *source*,
/// not the platform lowering is transpiling expressions for).
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum TargetPlatform {
    #[default]
    Native,
    Lua,
    Js,
    Wasm,
}

#[derive(Clone, PartialEq, Debug)]
pub enum ParamValue {
    Str(String),
    Value(Value),
}

#[derive(Clone, Debug, Default)]
pub struct ModuleEntry {
    pub path: PathBuf,
    pub exports: Vec<String>,
}

/// Everything the spec's lowering converter holds alongside the AST and
/// IR tree (§4.5).
pub struct ConversionContext<'ast> {
    pub ast: &'ast Ast,
    parameters: SmallVec<[(String, ParamValue); MAX_PARAMETERS]>,
    pub logic_accumulator: Vec<Logic>,
    next_logic_id: u32,
    pub compile_mode: CompileMode,
    static_block_counter: u32,
    pub current_static_block_id: Option<u32>,
    pub target_platform: TargetPlatform,
    pub source_file: Option<PathBuf>,
    pub base_directory: PathBuf,
    pub skip_import_expansion: bool,
    pub module_registry: FxHashMap<String, ModuleEntry>,
    pub struct_table: FxHashMap<String, kryo_parser::ast::StructDecl>,
    pub style_table: FxHashMap<String, Vec<kryo_parser::ast::PropertyAssignment>>,
    /// Top-level AST nodes preserved verbatim for CODEGEN/HYBRID output
    /// (§4.5 "optional source-preservation structures").
    pub preserved_templates: Vec<kryo_parser::NodeId>,
}

impl<'ast> ConversionContext<'ast> {
    pub fn new(ast: &'ast Ast, base_directory: impl Into<PathBuf>) -> Self {
        Self {
            ast,
            parameters: SmallVec::new(),
            logic_accumulator: Vec::new(),
            next_logic_id: 0,
            compile_mode: CompileMode::default(),
            static_block_counter: 0,
            current_static_block_id: None,
            target_platform: TargetPlatform::default(),
            source_file: None,
            base_directory: base_directory.into(),
            skip_import_expansion: false,
            module_registry: FxHashMap::default(),
            struct_table: FxHashMap::default(),
            style_table: FxHashMap::default(),
            preserved_templates: Vec::new(),
        }
    }

    pub fn with_compile_mode(mut self, mode: CompileMode) -> Self {
        self.compile_mode = mode;
        self
    }

    /// Bind a parameter, dropping the oldest entry once [`MAX_PARAMETERS`]
    /// is reached rather than growing unbounded — loop bodies that
    /// shadow a binding on every iteration must not leak memory.
    pub fn bind_parameter(&mut self, name: impl Into<String>, value: ParamValue) {
        let name = name.into();
        if let Some(existing) = self.parameters.iter_mut().find(|(n, _)| *n == name) {
            existing.1 = value;
            return;
        }
        if self.parameters.len() >= MAX_PARAMETERS {
            self.parameters.remove(0);
        }
        self.parameters.push((name, value));
    }

    pub fn unbind_parameter(&mut self, name: &str) {
        self.parameters.retain(|(n, _)| n != name);
    }

    pub fn lookup_parameter(&self, name: &str) -> Option<&ParamValue> {
        self.parameters.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn next_static_block_id(&mut self) -> u32 {
        let id = self.static_block_counter;
        self.static_block_counter += 1;
        id
    }

    pub fn next_logic_id(&mut self) -> LogicId {
        let id = self.next_logic_id;
        self.next_logic_id += 1;
        LogicId(id)
    }

    pub fn resolve_import_path(&self, from: &str) -> PathBuf {
        let base: &Path = self.source_file.as_deref().unwrap_or(&self.base_directory);
        let dir = if self.source_file.is_some() { base.parent().unwrap_or(base) } else { base };
        dir.join(from)
    }
}
