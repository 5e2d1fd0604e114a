//! AST node storage (§4.4).
//!
//! The node graph is stored as a flat, append-only `Vec<AstNode>` indexed by
//! `NodeId` rather than built from `&'arena` references chained through a
//! bump allocator. Indices are stable for the life of the `Ast`, which gives
//! the same "no per-node heap allocation, no individual frees" property the
//! arena buys, without unsafe lifetime plumbing. Interned strings (property
//! names, identifiers) still go through the real `kryo_memory::Arena`.

use crate::value::Value;
use kryo_memory::Arena;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

#[derive(Clone, Debug, PartialEq)]
pub struct PropertyAssignment {
    pub name: String,
    pub value: Value,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StateDecl {
    pub name: String,
    pub initial: Value,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum VarKind {
    Const,
    Let,
    Var,
}

#[derive(Clone, Debug, PartialEq)]
pub struct VarDecl {
    pub kind: VarKind,
    pub name: String,
    pub value: Value,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Import {
    pub names: Vec<String>,
    pub from: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ForLoop {
    /// `Some` for a compile-time `for x in range/array { … }`; `None`
    /// combined with `is_runtime_each` for a runtime `for each` binding.
    pub binding: String,
    pub iterable: Value,
    pub is_runtime_each: bool,
    pub body: Vec<NodeId>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct IfBranch {
    pub condition: Value,
    pub body: Vec<NodeId>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct IfStmt {
    pub branches: Vec<IfBranch>,
    pub else_body: Option<Vec<NodeId>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StyleBlock {
    pub name: String,
    pub properties: Vec<PropertyAssignment>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PlatformBlock {
    /// e.g. `lua`, `js`, taken from `@lua { … }` / `@js { … }`.
    pub language: String,
    pub code: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FuncParam {
    pub name: String,
    pub default: Option<Value>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FuncDecl {
    pub name: String,
    pub params: Vec<FuncParam>,
    pub body: Vec<NodeId>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Return {
    pub value: Option<Value>,
    /// Module-level `return { a, b, c }` export lists name locals to
    /// re-export rather than evaluate an expression.
    pub export_names: Vec<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StructField {
    pub name: String,
    pub default: Option<Value>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StructDecl {
    pub name: String,
    pub fields: Vec<StructField>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ComponentNode {
    pub type_name: String,
    pub properties: Vec<PropertyAssignment>,
    pub children: Vec<NodeId>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum AstNode {
    Component(ComponentNode),
    PropertyAssignment(PropertyAssignment),
    StateDecl(StateDecl),
    VarDecl(VarDecl),
    Import(Import),
    /// `static { … }`: a block whose children are evaluated once, at parse
    /// time, rather than per instantiation.
    StaticBlock(Vec<NodeId>),
    ForLoop(ForLoop),
    If(IfStmt),
    StyleBlock(StyleBlock),
    PlatformBlock(PlatformBlock),
    FuncDecl(FuncDecl),
    Return(Return),
    StructDecl(StructDecl),
    StructInstance { type_name: String, fields: Vec<PropertyAssignment> },
}

/// Flat, append-only AST node store plus the string arena shared by the
/// whole parse.
pub struct Ast {
    nodes: Vec<AstNode>,
    pub strings: Arena,
}

impl Ast {
    pub fn new() -> Self {
        Self { nodes: Vec::new(), strings: Arena::new() }
    }

    pub fn push(&mut self, node: AstNode) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    pub fn get(&self, id: NodeId) -> Option<&AstNode> {
        self.nodes.get(id.0 as usize)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut AstNode> {
        self.nodes.get_mut(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Intern a string into this parse's arena, returning a stable
    /// lifetime-erased owned copy (the arena keeps the bytes alive for the
    /// `Ast`'s own lifetime; callers that need a `&str` tied to the arena
    /// can read it back out via `strings`).
    pub fn intern(&self, s: &str) -> String {
        match self.strings.strdup(s) {
            Some(interned) => interned.to_string(),
            None => s.to_string(),
        }
    }
}

impl Default for Ast {
    fn default() -> Self {
        Self::new()
    }
}
