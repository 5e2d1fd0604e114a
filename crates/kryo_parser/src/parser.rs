//! Recursive-descent parser (§4.4): turns a token stream into the AST,
//! accumulating diagnostics rather than failing fast.

use crate::ast::{
    Ast, AstNode, ComponentNode, ForLoop, FuncDecl, FuncParam, IfBranch, IfStmt, Import, NodeId,
    PlatformBlock, PropertyAssignment, Return, StateDecl, StructDecl, StructField, StyleBlock,
    VarDecl, VarKind,
};
use crate::diagnostics::{Diagnostic, DiagnosticCategory, DiagnosticLevel, Diagnostics};
use crate::lexer::Lexer;
use crate::token::{Token, TokenKind};
use crate::value::Value;

pub struct Parser<'src> {
    lexer: Lexer<'src>,
    current: Token,
    pub diagnostics: Diagnostics,
    pub ast: Ast,
}

impl<'src> Parser<'src> {
    pub fn new(src: &'src str) -> Self {
        let mut lexer = Lexer::new(src);
        let mut diagnostics = Diagnostics::new();
        let current = lexer.next_token(&mut diagnostics);
        Self { lexer, current, diagnostics, ast: Ast::new() }
    }

    fn bump(&mut self) -> Token {
        let next = self.lexer.next_token(&mut self.diagnostics);
        std::mem::replace(&mut self.current, next)
    }

    fn error(&mut self, message: impl Into<String>) {
        let pos = self.current.pos;
        self.diagnostics.push(Diagnostic {
            level: DiagnosticLevel::Error,
            category: DiagnosticCategory::Syntax,
            message: message.into(),
            line: pos.line,
            column: pos.column,
            snippet: None,
        });
    }

    fn expect(&mut self, kind: &TokenKind) -> bool {
        if std::mem::discriminant(&self.current.kind) == std::mem::discriminant(kind) {
            self.bump();
            true
        } else {
            self.error(format!("expected {:?}, found {:?}", kind, self.current.kind));
            false
        }
    }

    fn expect_identifier(&mut self) -> String {
        match self.current.kind.clone() {
            TokenKind::Identifier(name) => {
                self.bump();
                name
            }
            other => {
                self.error(format!("expected identifier, found {:?}", other));
                String::new()
            }
        }
    }

    /// Parse an entire source file into its top-level items, stopping
    /// early if a `Fatal` diagnostic was raised.
    pub fn parse_program(&mut self) -> Vec<NodeId> {
        let mut items = Vec::new();
        while !matches!(self.current.kind, TokenKind::Eof) {
            if self.diagnostics.should_stop() {
                break;
            }
            let before = self.current.pos;
            match self.parse_statement() {
                Some(id) => items.push(id),
                None => {
                    // A failed statement parse has usually already consumed
                    // its leading keyword while looking for what comes
                    // next; only force a skip here if it consumed nothing
                    // at all, to avoid eating tokens that belong to the
                    // next (possibly valid) statement.
                    if self.current.pos == before && !matches!(self.current.kind, TokenKind::Eof) {
                        self.bump();
                    }
                }
            }
        }
        items
    }

    fn parse_block(&mut self) -> Vec<NodeId> {
        self.expect(&TokenKind::LBrace);
        let mut items = Vec::new();
        while !matches!(self.current.kind, TokenKind::RBrace | TokenKind::Eof) {
            if self.diagnostics.should_stop() {
                break;
            }
            let before = self.current.pos;
            match self.parse_statement() {
                Some(id) => items.push(id),
                None => {
                    if self.current.pos == before
                        && !matches!(self.current.kind, TokenKind::RBrace | TokenKind::Eof)
                    {
                        self.bump();
                    }
                }
            }
        }
        self.expect(&TokenKind::RBrace);
        items
    }

    fn parse_statement(&mut self) -> Option<NodeId> {
        match self.current.kind.clone() {
            TokenKind::KwImport => self.parse_import(),
            TokenKind::KwStatic => self.parse_static_block(),
            TokenKind::KwConst | TokenKind::KwLet | TokenKind::KwVar => self.parse_var_decl(),
            TokenKind::KwState => self.parse_state_decl(),
            TokenKind::KwFor => self.parse_for_loop(),
            TokenKind::KwIf => self.parse_if(),
            TokenKind::KwStyle => self.parse_style_block(),
            TokenKind::KwPlatform(lang) => self.parse_platform_block(lang),
            TokenKind::KwFunc => self.parse_func_decl(),
            TokenKind::KwReturn => self.parse_return(),
            TokenKind::KwStruct => self.parse_struct_decl(),
            TokenKind::Identifier(_) => self.parse_component_or_property(),
            other => {
                self.error(format!("unexpected token {:?}", other));
                None
            }
        }
    }

    fn parse_import(&mut self) -> Option<NodeId> {
        self.bump(); // import
        let mut names = vec![self.expect_identifier()];
        while matches!(self.current.kind, TokenKind::Comma) {
            self.bump();
            names.push(self.expect_identifier());
        }
        self.expect(&TokenKind::KwFrom);
        let from = match self.current.kind.clone() {
            TokenKind::String(s) => {
                self.bump();
                s
            }
            other => {
                self.error(format!("expected import path string, found {:?}", other));
                String::new()
            }
        };
        self.skip_optional_semicolon();
        Some(self.ast.push(AstNode::Import(Import { names, from })))
    }

    fn parse_static_block(&mut self) -> Option<NodeId> {
        self.bump(); // static
        let body = self.parse_block();
        Some(self.ast.push(AstNode::StaticBlock(body)))
    }

    fn parse_var_decl(&mut self) -> Option<NodeId> {
        let kind = match self.current.kind {
            TokenKind::KwConst => VarKind::Const,
            TokenKind::KwLet => VarKind::Let,
            _ => VarKind::Var,
        };
        self.bump();
        let name = self.expect_identifier();
        self.expect(&TokenKind::Equals);
        let value = self.parse_value();
        self.skip_optional_semicolon();
        Some(self.ast.push(AstNode::VarDecl(VarDecl { kind, name, value })))
    }

    fn parse_state_decl(&mut self) -> Option<NodeId> {
        self.bump(); // state
        let name = self.expect_identifier();
        if matches!(self.current.kind, TokenKind::Colon) {
            self.bump();
            // Type annotations are not retained as a distinct AST field;
            // lowering infers the type from the initial value.
            self.expect_identifier();
        }
        self.expect(&TokenKind::Equals);
        let initial = self.parse_value();
        self.skip_optional_semicolon();
        Some(self.ast.push(AstNode::StateDecl(StateDecl { name, initial })))
    }

    fn parse_for_loop(&mut self) -> Option<NodeId> {
        self.bump(); // for
        let is_runtime_each = matches!(self.current.kind, TokenKind::KwEach);
        if is_runtime_each {
            self.bump();
        }
        let binding = self.expect_identifier();
        // `in <iterable>`, written with the `from` keyword reused as the
        // binding preposition to avoid growing the keyword set further.
        if matches!(self.current.kind, TokenKind::KwFrom) {
            self.bump();
        }
        let iterable = self.parse_value();
        let body = self.parse_block();
        Some(self.ast.push(AstNode::ForLoop(ForLoop { binding, iterable, is_runtime_each, body })))
    }

    fn parse_if(&mut self) -> Option<NodeId> {
        let mut branches = Vec::new();
        self.bump(); // if
        let condition = self.parse_value();
        let body = self.parse_block();
        branches.push(IfBranch { condition, body });

        let mut else_body = None;
        while matches!(self.current.kind, TokenKind::KwElse) {
            self.bump();
            if matches!(self.current.kind, TokenKind::KwIf) {
                self.bump();
                let condition = self.parse_value();
                let body = self.parse_block();
                branches.push(IfBranch { condition, body });
            } else {
                else_body = Some(self.parse_block());
                break;
            }
        }
        Some(self.ast.push(AstNode::If(IfStmt { branches, else_body })))
    }

    fn parse_style_block(&mut self) -> Option<NodeId> {
        self.bump(); // style
        let name = self.expect_identifier();
        self.expect(&TokenKind::LBrace);
        let mut properties = Vec::new();
        while !matches!(self.current.kind, TokenKind::RBrace | TokenKind::Eof) {
            let Some(prop) = self.parse_property_assignment() else {
                break;
            };
            properties.push(prop);
        }
        self.expect(&TokenKind::RBrace);
        Some(self.ast.push(AstNode::StyleBlock(StyleBlock { name, properties })))
    }

    fn parse_platform_block(&mut self, language: String) -> Option<NodeId> {
        self.bump(); // @lang token
        if !matches!(self.current.kind, TokenKind::LBrace) {
            self.error("expected '{' to open platform code block");
            return None;
        }
        // `current` already holds the LBrace token produced by `next_token`,
        // which means the lexer's cursor is already sitting just past the
        // '{' — resume directly rather than bumping (that would mis-lex
        // the raw code body as further tokens).
        let code = self.lexer.resume_balanced(b'{', b'}', &mut self.diagnostics);
        self.current = self.lexer.next_token(&mut self.diagnostics);
        Some(self.ast.push(AstNode::PlatformBlock(PlatformBlock { language, code })))
    }

    fn parse_func_decl(&mut self) -> Option<NodeId> {
        self.bump(); // func
        let name = self.expect_identifier();
        self.expect(&TokenKind::LParen);
        let mut params = Vec::new();
        while !matches!(self.current.kind, TokenKind::RParen | TokenKind::Eof) {
            let pname = self.expect_identifier();
            let default = if matches!(self.current.kind, TokenKind::Equals) {
                self.bump();
                Some(self.parse_value())
            } else {
                None
            };
            params.push(FuncParam { name: pname, default });
            if matches!(self.current.kind, TokenKind::Comma) {
                self.bump();
            } else {
                break;
            }
        }
        self.expect(&TokenKind::RParen);
        if matches!(self.current.kind, TokenKind::Colon) {
            self.bump();
            self.expect_identifier(); // return-type annotation, not retained
        }
        let body = self.parse_block();
        Some(self.ast.push(AstNode::FuncDecl(FuncDecl { name, params, body })))
    }

    fn parse_return(&mut self) -> Option<NodeId> {
        self.bump(); // return
        if matches!(self.current.kind, TokenKind::LBrace) {
            // Module-level export list: `return { a, b, c }`.
            self.bump();
            let mut export_names = Vec::new();
            while !matches!(self.current.kind, TokenKind::RBrace | TokenKind::Eof) {
                export_names.push(self.expect_identifier());
                if matches!(self.current.kind, TokenKind::Comma) {
                    self.bump();
                } else {
                    break;
                }
            }
            self.expect(&TokenKind::RBrace);
            self.skip_optional_semicolon();
            return Some(self.ast.push(AstNode::Return(Return { value: None, export_names })));
        }
        let value = if matches!(self.current.kind, TokenKind::Semicolon | TokenKind::RBrace) {
            None
        } else {
            Some(self.parse_value())
        };
        self.skip_optional_semicolon();
        Some(self.ast.push(AstNode::Return(Return { value, export_names: Vec::new() })))
    }

    fn parse_struct_decl(&mut self) -> Option<NodeId> {
        self.bump(); // struct
        let name = self.expect_identifier();
        self.expect(&TokenKind::LBrace);
        let mut fields = Vec::new();
        while !matches!(self.current.kind, TokenKind::RBrace | TokenKind::Eof) {
            let fname = self.expect_identifier();
            if matches!(self.current.kind, TokenKind::Colon) {
                self.bump();
                self.expect_identifier(); // field type, not retained structurally
            }
            let default = if matches!(self.current.kind, TokenKind::Equals) {
                self.bump();
                Some(self.parse_value())
            } else {
                None
            };
            self.skip_optional_semicolon();
            fields.push(StructField { name: fname, default });
        }
        self.expect(&TokenKind::RBrace);
        Some(self.ast.push(AstNode::StructDecl(StructDecl { name, fields })))
    }

    /// Both components (`Name { props; children }`) and struct
    /// instantiations (`Name { field = value }`) share this surface
    /// syntax; lowering disambiguates via the component/struct-type
    /// lookup table (§4.5), so the parser always emits a `ComponentNode`.
    fn parse_component_or_property(&mut self) -> Option<NodeId> {
        let name = self.expect_identifier();
        match self.current.kind {
            TokenKind::LBrace => {
                self.bump();
                let (properties, children) = self.parse_component_body();
                Some(self.ast.push(AstNode::Component(ComponentNode { type_name: name, properties, children })))
            }
            TokenKind::Equals => {
                self.bump();
                let value = self.parse_value();
                self.skip_optional_semicolon();
                Some(self.ast.push(AstNode::PropertyAssignment(PropertyAssignment { name, value })))
            }
            _ => {
                self.error(format!("expected '{{' or '=' after identifier '{}'", name));
                None
            }
        }
    }

    fn parse_component_body(&mut self) -> (Vec<PropertyAssignment>, Vec<NodeId>) {
        let mut properties = Vec::new();
        let mut children = Vec::new();
        while !matches!(self.current.kind, TokenKind::RBrace | TokenKind::Eof) {
            if self.diagnostics.should_stop() {
                break;
            }
            let before = self.current.pos;
            match self.current.kind.clone() {
                TokenKind::Identifier(_) => match self.parse_component_or_property() {
                    Some(id) => match self.ast.get(id) {
                        Some(AstNode::PropertyAssignment(p)) => properties.push(p.clone()),
                        Some(_) => children.push(id),
                        None => {}
                    },
                    None => {
                        if self.current.pos == before
                            && !matches!(self.current.kind, TokenKind::RBrace | TokenKind::Eof)
                        {
                            self.bump();
                        }
                    }
                },
                _ => {
                    if let Some(id) = self.parse_statement() {
                        children.push(id);
                    } else if self.current.pos == before
                        && !matches!(self.current.kind, TokenKind::RBrace | TokenKind::Eof)
                    {
                        self.bump();
                    }
                }
            }
        }
        self.expect(&TokenKind::RBrace);
        (properties, children)
    }

    fn parse_property_assignment(&mut self) -> Option<PropertyAssignment> {
        let name = self.expect_identifier();
        self.expect(&TokenKind::Equals);
        let value = self.parse_value();
        self.skip_optional_semicolon();
        Some(PropertyAssignment { name, value })
    }

    fn parse_value(&mut self) -> Value {
        match self.current.kind.clone() {
            TokenKind::String(s) => {
                self.bump();
                Value::String(s)
            }
            TokenKind::Number { value, is_percentage } => {
                self.bump();
                Value::Number { value, is_percentage }
            }
            TokenKind::Identifier(name) => {
                self.bump();
                if matches!(self.current.kind, TokenKind::LBrace) {
                    self.bump();
                    let fields = self.parse_component_body_as_fields();
                    Value::StructInstance { type_name: name, fields }
                } else {
                    Value::Identifier(name)
                }
            }
            TokenKind::LBrace => {
                // `current` is the already-produced LBrace token; the
                // lexer's cursor sits just past the '{', so resume
                // directly instead of bumping first.
                let body = self.lexer.resume_balanced(b'{', b'}', &mut self.diagnostics);
                self.current = self.lexer.next_token(&mut self.diagnostics);
                Value::Expression(body)
            }
            TokenKind::LBracket => {
                self.bump();
                let mut items = Vec::new();
                while !matches!(self.current.kind, TokenKind::RBracket | TokenKind::Eof) {
                    items.push(self.parse_value());
                    if matches!(self.current.kind, TokenKind::Comma) {
                        self.bump();
                    } else {
                        break;
                    }
                }
                self.expect(&TokenKind::RBracket);
                Value::Array(items)
            }
            other => {
                self.error(format!("expected a value, found {:?}", other));
                self.bump();
                Value::Identifier(String::new())
            }
        }
    }

    fn parse_component_body_as_fields(&mut self) -> std::collections::BTreeMap<String, Value> {
        let mut fields = std::collections::BTreeMap::new();
        while !matches!(self.current.kind, TokenKind::RBrace | TokenKind::Eof) {
            let name = self.expect_identifier();
            self.expect(&TokenKind::Equals);
            let value = self.parse_value();
            self.skip_optional_semicolon();
            fields.insert(name, value);
        }
        self.expect(&TokenKind::RBrace);
        fields
    }

    fn skip_optional_semicolon(&mut self) {
        if matches!(self.current.kind, TokenKind::Semicolon) {
            self.bump();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_component_with_properties_and_children() {
        let mut parser = Parser::new(
            r#"Container { width = 100; Text { text = "hi"; } }"#,
        );
        let items = parser.parse_program();
        assert!(!parser.diagnostics.has_errors());
        assert_eq!(items.len(), 1);
        let AstNode::Component(root) = parser.ast.get(items[0]).unwrap() else {
            panic!("expected component");
        };
        assert_eq!(root.type_name, "Container");
        assert_eq!(root.properties.len(), 1);
        assert_eq!(root.children.len(), 1);
    }

    #[test]
    fn parses_var_and_state_decls() {
        let mut parser = Parser::new("const pi = 3; state counter: int = 0;");
        let items = parser.parse_program();
        assert!(!parser.diagnostics.has_errors());
        assert_eq!(items.len(), 2);
        assert!(matches!(parser.ast.get(items[0]), Some(AstNode::VarDecl(_))));
        assert!(matches!(parser.ast.get(items[1]), Some(AstNode::StateDecl(_))));
    }

    #[test]
    fn parses_if_else_chain() {
        let mut parser = Parser::new("if cond { Text { text = \"a\"; } } else { Text { text = \"b\"; } }");
        let items = parser.parse_program();
        assert!(!parser.diagnostics.has_errors());
        let AstNode::If(stmt) = parser.ast.get(items[0]).unwrap() else {
            panic!("expected if");
        };
        assert_eq!(stmt.branches.len(), 1);
        assert!(stmt.else_body.is_some());
    }

    #[test]
    fn expression_value_captures_raw_text() {
        let mut parser = Parser::new("width = { a.b + 1 };");
        let items = parser.parse_program();
        assert!(!parser.diagnostics.has_errors());
        let AstNode::PropertyAssignment(p) = parser.ast.get(items[0]).unwrap() else {
            panic!("expected property assignment");
        };
        assert_eq!(p.value, Value::Expression(" a.b + 1 ".to_string()));
    }

    #[test]
    fn parses_import_and_platform_block() {
        let mut parser = Parser::new(r#"import Button from "shared/button"; @lua { print("hi") }"#);
        let items = parser.parse_program();
        assert!(!parser.diagnostics.has_errors());
        assert!(matches!(parser.ast.get(items[0]), Some(AstNode::Import(_))));
        let AstNode::PlatformBlock(block) = parser.ast.get(items[1]).unwrap() else {
            panic!("expected platform block");
        };
        assert_eq!(block.language, "lua");
        assert_eq!(block.code.trim(), "print(\"hi\")");
    }

    #[test]
    fn parses_struct_decl_and_instance() {
        let mut parser = Parser::new("struct Point { x: int = 0; y: int = 0; } Point { x = 1; y = 2; }");
        let items = parser.parse_program();
        assert!(!parser.diagnostics.has_errors());
        assert!(matches!(parser.ast.get(items[0]), Some(AstNode::StructDecl(_))));
        assert!(matches!(parser.ast.get(items[1]), Some(AstNode::Component(_))));
    }

    #[test]
    fn malformed_statement_does_not_stall_the_parse() {
        let mut parser = Parser::new("@@@ const pi = 3;");
        let items = parser.parse_program();
        assert!(parser.diagnostics.has_errors());
        assert!(items.iter().any(|id| matches!(parser.ast.get(*id), Some(AstNode::VarDecl(_)))));
    }
}
