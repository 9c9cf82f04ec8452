use leo_source::{ErrorKind, Span};
use leo_value::Type;
use thiserror::Error;

/// What kind of symbol a declaration error is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Variable,
    Function,
    Parameter,
}

impl std::fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SymbolKind::Variable => "variable",
            SymbolKind::Function => "function",
            SymbolKind::Parameter => "parameter",
        };
        f.write_str(name)
    }
}

/// Errors raised while scanning or parsing a program.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unrecognized token `{text}` at position {}", span.start)]
    InvalidToken { text: String, span: Span },
    #[error("unexpected {found} at position {}", span.start)]
    UnexpectedToken { found: String, span: Span },
    #[error("expected {expected}, found {found} at position {}", span.start)]
    Expected {
        expected: &'static str,
        found: String,
        span: Span,
    },
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEof { expected: &'static str, span: Span },
    #[error("{kind} `{name}` is already declared in this scope")]
    Redeclared {
        kind: SymbolKind,
        name: String,
        span: Span,
    },
    #[error("cannot resolve {kind} `{name}`")]
    Unresolved {
        kind: SymbolKind,
        name: String,
        span: Span,
    },
    #[error("cannot assign to global `{name}`, top-level values are constant")]
    AssignToGlobal { name: String, span: Span },
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: Type,
        found: Type,
        span: Span,
    },
    #[error("operator `{op}` cannot be applied to {found}")]
    InvalidOperand {
        op: &'static str,
        found: Type,
        span: Span,
    },
    #[error("expression has type void and cannot be used as a value")]
    VoidValue { span: Span },
    #[error("no main function")]
    MissingMain,
}

impl ParseError {
    /// Classifies the error according to the error taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::InvalidToken { .. }
            | ParseError::UnexpectedToken { .. }
            | ParseError::Expected { .. }
            | ParseError::UnexpectedEof { .. } => ErrorKind::Syntax,
            ParseError::Redeclared { .. }
            | ParseError::Unresolved { .. }
            | ParseError::AssignToGlobal { .. }
            | ParseError::MissingMain => ErrorKind::Declaration,
            ParseError::TypeMismatch { .. }
            | ParseError::InvalidOperand { .. }
            | ParseError::VoidValue { .. } => ErrorKind::Type,
        }
    }

    /// Returns the offending byte range, if known.
    pub fn span(&self) -> Option<&Span> {
        match self {
            ParseError::InvalidToken { span, .. }
            | ParseError::UnexpectedToken { span, .. }
            | ParseError::Expected { span, .. }
            | ParseError::UnexpectedEof { span, .. }
            | ParseError::Redeclared { span, .. }
            | ParseError::Unresolved { span, .. }
            | ParseError::AssignToGlobal { span, .. }
            | ParseError::TypeMismatch { span, .. }
            | ParseError::InvalidOperand { span, .. }
            | ParseError::VoidValue { span } => Some(span),
            ParseError::MissingMain => None,
        }
    }
}

pub type ParseResult<T> = Result<T, ParseError>;
