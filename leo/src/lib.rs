//! Embedding API: load a source file once, then run its `main`.

use leo_eval::RuntimeError;
use leo_parser::ast::{Program, Stmt};
use leo_parser::{parse_bare_expr, parse_file, tokenize, ParseError};
use leo_passes::unreachable::UnreachableCode;
use leo_source::{Diagnostic, ErrorKind, Source, Span};
use thiserror::Error;

pub use leo_value::{Type, Value};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
    #[error("no program loaded")]
    NotLoaded,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Parse(err) => err.kind(),
            Error::Runtime(err) => err.kind(),
            Error::NotLoaded => ErrorKind::Runtime,
        }
    }

    /// The offending byte range, for errors raised while parsing.
    pub fn span(&self) -> Option<&Span> {
        match self {
            Error::Parse(err) => err.span(),
            _ => None,
        }
    }
}

/// Holds a loaded program between [`Interpreter::load`] and [`Interpreter::run`].
#[derive(Debug, Default)]
pub struct Interpreter {
    program: Option<Program>,
    warnings: Vec<Diagnostic>,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tokenizes and parses `content`, replacing any previously loaded program.
    pub fn load(&mut self, content: &str) -> Result<(), Error> {
        self.program = None;
        self.warnings.clear();

        let source = Source::new(content);
        let tokens = tokenize(source.content)?;
        let program = parse_file(&tokens)?;
        UnreachableCode::new(&source).check_program(&program);

        let functions = program
            .body
            .iter()
            .filter(|stmt| matches!(stmt, Stmt::FnDef(_)))
            .count();
        tracing::debug!(
            functions,
            globals = program.body.len() - functions,
            "program loaded"
        );

        self.warnings = source.diagnostics.take();
        self.program = Some(program);
        Ok(())
    }

    /// Runs `main` of the loaded program. Returns `None` if `main` produces no value.
    pub fn run(&self) -> Result<Option<Value>, Error> {
        let program = self.program.as_ref().ok_or(Error::NotLoaded)?;
        Ok(leo_eval::run(program)?)
    }

    /// Warnings collected by the last successful [`Interpreter::load`].
    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }
}

/// Evaluates a single `;`-terminated expression such as `1 + 2 * 3;`.
pub fn eval_expr(content: &str) -> Result<Value, Error> {
    let tokens = tokenize(content)?;
    let (expr, _ty) = parse_bare_expr(&tokens)?;
    Ok(leo_eval::eval(&expr)?)
}
