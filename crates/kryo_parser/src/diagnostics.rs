//! Accumulated parse diagnostics (§4.4, §7).

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum DiagnosticLevel {
    Warning,
    Error,
    /// Unrecoverable: the parser should stop rather than attempt recovery.
    Fatal,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum DiagnosticCategory {
    Syntax,
    Semantic,
    LimitExceeded,
    BufferOverflow,
    Conversion,
    Validation,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub category: DiagnosticCategory,
    pub message: String,
    pub line: u32,
    pub column: u32,
    pub snippet: Option<String>,
}

/// Accumulates diagnostics across a parse, tracking whether a `Fatal`
/// entry has been seen so callers can bail out of the recursive descent.
#[derive(Clone, Debug, Default)]
pub struct Diagnostics {
    pub entries: Vec<Diagnostic>,
    should_stop: bool,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        if diagnostic.level == DiagnosticLevel::Fatal {
            self.should_stop = true;
        }
        self.entries.push(diagnostic);
    }

    pub fn should_stop(&self) -> bool {
        self.should_stop
    }

    pub fn has_errors(&self) -> bool {
        self.entries
            .iter()
            .any(|d| matches!(d.level, DiagnosticLevel::Error | DiagnosticLevel::Fatal))
    }

    /// The first error-or-worse diagnostic, for legacy callers that only
    /// want a single failure reason rather than the full list.
    pub fn first_error(&self) -> Option<&Diagnostic> {
        self.entries
            .iter()
            .find(|d| matches!(d.level, DiagnosticLevel::Error | DiagnosticLevel::Fatal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fatal_sets_should_stop() {
        let mut diags = Diagnostics::new();
        assert!(!diags.should_stop());
        diags.push(Diagnostic {
            level: DiagnosticLevel::Fatal,
            category: DiagnosticCategory::Syntax,
            message: "boom".into(),
            line: 1,
            column: 1,
            snippet: None,
        });
        assert!(diags.should_stop());
    }

    #[test]
    fn first_error_skips_warnings() {
        let mut diags = Diagnostics::new();
        diags.push(Diagnostic {
            level: DiagnosticLevel::Warning,
            category: DiagnosticCategory::Semantic,
            message: "w".into(),
            line: 1,
            column: 1,
            snippet: None,
        });
        diags.push(Diagnostic {
            level: DiagnosticLevel::Error,
            category: DiagnosticCategory::Syntax,
            message: "e".into(),
            line: 2,
            column: 1,
            snippet: None,
        });
        assert_eq!(diags.first_error().unwrap().message, "e");
    }

    #[test]
    fn has_errors_false_when_only_warnings() {
        let mut diags = Diagnostics::new();
        diags.push(Diagnostic {
            level: DiagnosticLevel::Warning,
            category: DiagnosticCategory::Semantic,
            message: "w".into(),
            line: 1,
            column: 1,
            snippet: None,
        });
        assert!(!diags.has_errors());
    }
}
