//! Source code representation and diagnostic management.

use std::{cell::RefCell, fmt, ops::Range};

/// A byte range into the source text.
pub type Span = Range<usize>;

/// Represents source code.
pub struct Source<'a> {
    /// Original source code.
    pub content: &'a str,
    /// Accumulated diagnostics (warnings).
    pub diagnostics: DiagnosticReporter,
}

impl<'a> Source<'a> {
    /// Create a new `Source` with the specified `content`.
    pub fn new(content: &'a str) -> Self {
        Self {
            content,
            diagnostics: DiagnosticReporter::new(),
        }
    }

    /// Returns `true` if `Source` has no accumulated diagnostics. Returns `false` otherwise.
    pub fn has_no_diagnostics(&self) -> bool {
        self.diagnostics.diagnostics.borrow().is_empty()
    }

    /// Converts a byte offset into a 1-based line and column.
    /// Offsets past the end are clamped to the end of the content.
    pub fn position(&self, offset: usize) -> Position {
        let offset = offset.min(self.content.len());
        let mut line = 1;
        let mut column = 1;
        for (i, c) in self.content.char_indices() {
            if i >= offset {
                break;
            }
            if c == '\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }
        Position { line, column }
    }
}

impl<'a> From<&'a str> for Source<'a> {
    fn from(content: &'a str) -> Self {
        Source::new(content)
    }
}

/// A 1-based line/column pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// The class of failure an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Unexpected token, unterminated expression or missing delimiter.
    Syntax,
    /// Duplicate name in one scope or reference to an undeclared name.
    Declaration,
    /// Declared type does not match the inferred expression type.
    Type,
    /// Failure while evaluating a program.
    Runtime,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Syntax => "syntax error",
            ErrorKind::Declaration => "declaration error",
            ErrorKind::Type => "type error",
            ErrorKind::Runtime => "runtime error",
        };
        f.write_str(name)
    }
}

/// Represents a non-fatal diagnostic (e.g. unreachable code).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    message: String,
    span: Option<Span>,
}

impl Diagnostic {
    /// Create a new diagnostic with the specified `message` and optional `span`.
    pub fn new(message: impl ToString, span: Option<Span>) -> Self {
        Self {
            message: message.to_string(),
            span,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn span(&self) -> Option<&Span> {
        self.span.as_ref()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.span {
            Some(span) => write!(
                f,
                "WARNING: {message} at position {position}",
                message = self.message,
                position = span.start
            ),
            None => write!(f, "WARNING: {}", self.message),
        }
    }
}

/// Manages all the diagnostics.
pub struct DiagnosticReporter {
    diagnostics: RefCell<Vec<Diagnostic>>,
}

impl DiagnosticReporter {
    /// Create an empty `DiagnosticReporter`.
    pub fn new() -> Self {
        Self {
            diagnostics: RefCell::new(Vec::new()),
        }
    }

    /// Adds a diagnostic to the `DiagnosticReporter`.
    /// This method uses the interior mutability pattern. This does not require mutability for ergonomics.
    pub fn add(&self, diagnostic: Diagnostic) {
        // This should be the only place where self.diagnostics is borrowed mutably.
        self.diagnostics.borrow_mut().push(diagnostic);
    }

    /// Removes and returns all accumulated diagnostics.
    pub fn take(&self) -> Vec<Diagnostic> {
        self.diagnostics.take()
    }
}

impl Default for DiagnosticReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DiagnosticReporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let diagnostics = self.diagnostics.borrow();
        for diagnostic in diagnostics.iter() {
            writeln!(f, "{}", diagnostic)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position() {
        let source: Source = "fn main() {\n  return 1;\n}".into();
        assert_eq!(source.position(0), Position { line: 1, column: 1 });
        assert_eq!(source.position(3), Position { line: 1, column: 4 });
        assert_eq!(source.position(14), Position { line: 2, column: 3 });
        assert_eq!(source.position(1000), Position { line: 3, column: 2 });
    }

    #[test]
    fn test_reporter() {
        let source: Source = "".into();
        assert!(source.has_no_diagnostics());
        source
            .diagnostics
            .add(Diagnostic::new("unreachable statement", Some(4..10)));
        assert!(!source.has_no_diagnostics());
        assert_eq!(
            source.diagnostics.to_string(),
            "WARNING: unreachable statement at position 4\n"
        );

        let taken = source.diagnostics.take();
        assert_eq!(taken.len(), 1);
        assert_eq!(taken[0].message(), "unreachable statement");
        assert!(source.has_no_diagnostics());
    }
}
