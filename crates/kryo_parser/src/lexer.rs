//! Character-level lexer (§4.4).

use crate::diagnostics::{Diagnostic, DiagnosticCategory, DiagnosticLevel, Diagnostics};
use crate::token::{Position, Token, TokenKind};

/// A saved lexer position for speculative parsing / backtracking.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Checkpoint {
    pos: usize,
    line: u32,
    column: u32,
}

pub struct Lexer<'src> {
    src: &'src [u8],
    pos: usize,
    line: u32,
    column: u32,
}

impl<'src> Lexer<'src> {
    pub fn new(src: &'src str) -> Self {
        Self { src: src.as_bytes(), pos: 0, line: 1, column: 1 }
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint { pos: self.pos, line: self.line, column: self.column }
    }

    pub fn restore(&mut self, cp: Checkpoint) {
        self.pos = cp.pos;
        self.line = cp.line;
        self.column = cp.column;
    }

    pub fn position(&self) -> Position {
        Position { line: self.line, column: self.column }
    }

    fn peek(&self) -> Option<u8> {
        self.src.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.src.get(self.pos + offset).copied()
    }

    fn advance(&mut self) -> Option<u8> {
        let c = self.peek()?;
        self.pos += 1;
        if c == b'\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn matches(&mut self, c: u8) -> bool {
        if self.peek() == Some(c) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.peek() {
                Some(b' ') | Some(b'\t') | Some(b'\r') | Some(b'\n') => {
                    self.advance();
                }
                Some(b'/') if self.peek_at(1) == Some(b'/') => {
                    while !matches!(self.peek(), None | Some(b'\n')) {
                        self.advance();
                    }
                }
                Some(b'/') if self.peek_at(1) == Some(b'*') => {
                    self.advance();
                    self.advance();
                    while !(self.peek() == Some(b'*') && self.peek_at(1) == Some(b'/')) {
                        if self.advance().is_none() {
                            break;
                        }
                    }
                    self.advance();
                    self.advance();
                }
                _ => break,
            }
        }
    }

    /// Consume a bracket-balanced region starting at the current open
    /// bracket (`(`, `[`, or `{`), returning the raw text strictly between
    /// the outer pair. Emits a `Syntax`/`BufferOverflow`-style error via
    /// `diags` on an unterminated region.
    pub fn skip_balanced(&mut self, open: u8, close: u8, diags: &mut Diagnostics) -> String {
        let start_pos = self.position();
        debug_assert_eq!(self.peek(), Some(open));
        self.advance();
        self.capture_balanced_body(open, close, start_pos, diags)
    }

    /// Like [`skip_balanced`], but assumes the opening bracket has already
    /// been consumed (e.g. by the token stream producing an `LBrace`
    /// before the parser realized it wanted a raw expression body rather
    /// than a nested block).
    pub fn resume_balanced(&mut self, open: u8, close: u8, diags: &mut Diagnostics) -> String {
        let start_pos = self.position();
        self.capture_balanced_body(open, close, start_pos, diags)
    }

    fn capture_balanced_body(
        &mut self,
        open: u8,
        close: u8,
        start_pos: Position,
        diags: &mut Diagnostics,
    ) -> String {
        let mut depth = 1usize;
        let body_start = self.pos;
        while depth > 0 {
            match self.peek() {
                Some(c) if c == open => {
                    depth += 1;
                    self.advance();
                }
                Some(c) if c == close => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                    self.advance();
                }
                Some(_) => {
                    self.advance();
                }
                None => {
                    diags.push(Diagnostic {
                        level: DiagnosticLevel::Error,
                        category: DiagnosticCategory::Syntax,
                        message: "unterminated bracket-balanced region".to_string(),
                        line: start_pos.line,
                        column: start_pos.column,
                        snippet: None,
                    });
                    return String::from_utf8_lossy(&self.src[body_start..self.pos]).into_owned();
                }
            }
        }
        let body = String::from_utf8_lossy(&self.src[body_start..self.pos]).into_owned();
        self.advance(); // consume the closing bracket
        body
    }

    fn lex_string(&mut self, diags: &mut Diagnostics) -> String {
        let start_pos = self.position();
        self.advance(); // opening quote
        let mut out = String::new();
        loop {
            match self.advance() {
                Some(b'"') => break,
                Some(b'\\') => match self.advance() {
                    Some(b'n') => out.push('\n'),
                    Some(b't') => out.push('\t'),
                    Some(b'r') => out.push('\r'),
                    Some(b'\\') => out.push('\\'),
                    Some(b'"') => out.push('"'),
                    Some(b'$') => out.push('$'),
                    Some(b'[') => out.push('['),
                    Some(b']') => out.push(']'),
                    Some(other) => out.push(other as char),
                    None => break,
                },
                Some(c) => out.push(c as char),
                None => {
                    diags.push(Diagnostic {
                        level: DiagnosticLevel::Error,
                        category: DiagnosticCategory::Syntax,
                        message: "unterminated string literal".to_string(),
                        line: start_pos.line,
                        column: start_pos.column,
                        snippet: None,
                    });
                    break;
                }
            }
        }
        out
    }

    fn lex_number(&mut self) -> (f64, bool) {
        let start = self.pos;
        if self.peek() == Some(b'-') {
            self.advance();
        }
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.advance();
        }
        if self.peek() == Some(b'.') && matches!(self.peek_at(1), Some(b'0'..=b'9')) {
            self.advance();
            while matches!(self.peek(), Some(b'0'..=b'9')) {
                self.advance();
            }
        }
        let text = std::str::from_utf8(&self.src[start..self.pos]).unwrap_or("0");
        let value: f64 = text.parse().unwrap_or(0.0);
        let is_percentage = self.matches(b'%');
        (value, is_percentage)
    }

    fn lex_identifier(&mut self) -> String {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_alphanumeric() || c == b'_') {
            self.advance();
        }
        String::from_utf8_lossy(&self.src[start..self.pos]).into_owned()
    }

    /// Produce the next token, or `Eof` once the source is exhausted.
    pub fn next_token(&mut self, diags: &mut Diagnostics) -> Token {
        self.skip_whitespace_and_comments();
        let pos = self.position();
        let Some(c) = self.peek() else {
            return Token { kind: TokenKind::Eof, pos };
        };

        let kind = match c {
            b'{' => {
                self.advance();
                TokenKind::LBrace
            }
            b'}' => {
                self.advance();
                TokenKind::RBrace
            }
            b'[' => {
                self.advance();
                TokenKind::LBracket
            }
            b']' => {
                self.advance();
                TokenKind::RBracket
            }
            b'(' => {
                self.advance();
                TokenKind::LParen
            }
            b')' => {
                self.advance();
                TokenKind::RParen
            }
            b';' => {
                self.advance();
                TokenKind::Semicolon
            }
            b':' => {
                self.advance();
                TokenKind::Colon
            }
            b',' => {
                self.advance();
                TokenKind::Comma
            }
            b'.' => {
                self.advance();
                TokenKind::Dot
            }
            b'=' => {
                self.advance();
                if self.matches(b'>') {
                    TokenKind::Arrow
                } else {
                    TokenKind::Equals
                }
            }
            b'"' => TokenKind::String(self.lex_string(diags)),
            b'0'..=b'9' => {
                let (value, is_percentage) = self.lex_number();
                TokenKind::Number { value, is_percentage }
            }
            b'-' if matches!(self.peek_at(1), Some(b'0'..=b'9')) => {
                let (value, is_percentage) = self.lex_number();
                TokenKind::Number { value, is_percentage }
            }
            b'@' => {
                self.advance();
                let name = self.lex_identifier();
                TokenKind::KwPlatform(name)
            }
            c if c.is_ascii_alphabetic() || c == b'_' => {
                let ident = self.lex_identifier();
                match ident.as_str() {
                    "const" => TokenKind::KwConst,
                    "let" => TokenKind::KwLet,
                    "var" => TokenKind::KwVar,
                    "state" => TokenKind::KwState,
                    "import" => TokenKind::KwImport,
                    "from" => TokenKind::KwFrom,
                    "static" => TokenKind::KwStatic,
                    "for" => TokenKind::KwFor,
                    "each" => TokenKind::KwEach,
                    "if" => TokenKind::KwIf,
                    "else" => TokenKind::KwElse,
                    "style" => TokenKind::KwStyle,
                    "func" => TokenKind::KwFunc,
                    "return" => TokenKind::KwReturn,
                    "struct" => TokenKind::KwStruct,
                    _ => TokenKind::Identifier(ident),
                }
            }
            other => {
                self.advance();
                diags.push(Diagnostic {
                    level: DiagnosticLevel::Error,
                    category: DiagnosticCategory::Syntax,
                    message: format!("unexpected character '{}'", other as char),
                    line: pos.line,
                    column: pos.column,
                    snippet: None,
                });
                TokenKind::Eof
            }
        };
        Token { kind, pos }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex_all(src: &str) -> (Vec<Token>, Diagnostics) {
        let mut lexer = Lexer::new(src);
        let mut diags = Diagnostics::new();
        let mut tokens = Vec::new();
        loop {
            let tok = lexer.next_token(&mut diags);
            let is_eof = matches!(tok.kind, TokenKind::Eof);
            tokens.push(tok);
            if is_eof {
                break;
            }
        }
        (tokens, diags)
    }

    #[test]
    fn tracks_line_and_column_across_newlines() {
        let (tokens, _) = lex_all("a\nb");
        assert_eq!(tokens[0].pos, Position { line: 1, column: 1 });
        assert_eq!(tokens[1].pos, Position { line: 2, column: 1 });
    }

    #[test]
    fn skips_line_and_block_comments() {
        let (tokens, _) = lex_all("// comment\na /* c */ b");
        let idents: Vec<_> = tokens
            .iter()
            .filter_map(|t| match &t.kind {
                TokenKind::Identifier(s) => Some(s.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(idents, vec!["a", "b"]);
    }

    #[test]
    fn number_with_percent_suffix() {
        let (tokens, _) = lex_all("50%");
        assert_eq!(tokens[0].kind, TokenKind::Number { value: 50.0, is_percentage: true });
    }

    #[test]
    fn string_escapes_decode() {
        let (tokens, _) = lex_all(r#""a\nb\"c""#);
        assert_eq!(tokens[0].kind, TokenKind::String("a\nb\"c".to_string()));
    }

    #[test]
    fn keywords_are_recognized() {
        let (tokens, _) = lex_all("const let state");
        assert_eq!(tokens[0].kind, TokenKind::KwConst);
        assert_eq!(tokens[1].kind, TokenKind::KwLet);
        assert_eq!(tokens[2].kind, TokenKind::KwState);
    }

    #[test]
    fn skip_balanced_captures_nested_braces() {
        let mut lexer = Lexer::new("{ a { b } c }");
        let mut diags = Diagnostics::new();
        let body = lexer.skip_balanced(b'{', b'}', &mut diags);
        assert_eq!(body.trim(), "a { b } c");
        assert!(diags.entries.is_empty());
    }

    #[test]
    fn skip_balanced_reports_unterminated_region() {
        let mut lexer = Lexer::new("{ a ");
        let mut diags = Diagnostics::new();
        lexer.skip_balanced(b'{', b'}', &mut diags);
        assert!(!diags.entries.is_empty());
    }

    #[test]
    fn unexpected_character_is_a_syntax_error() {
        let (_, diags) = lex_all("a # b");
        assert_eq!(diags.entries.len(), 1);
        assert_eq!(diags.entries[0].category, DiagnosticCategory::Syntax);
    }
}
