use leo_source::ErrorKind;
use leo_value::Type;
use thiserror::Error;

/// Errors raised while evaluating a program. All of them end the current `run`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    #[error("no main function")]
    MissingMain,
    #[error("undefined variable `{0}`")]
    UndefinedVariable(String),
    #[error("undefined function `{0}`")]
    UndefinedFunction(String),
    #[error("function `{ident}` expects {expected} argument(s), received {found}")]
    ArityMismatch {
        ident: String,
        expected: usize,
        found: usize,
    },
    #[error("argument `{param}` of `{ident}` expects {expected}, received {found}")]
    ArgumentType {
        ident: String,
        param: String,
        expected: Type,
        found: Type,
    },
    #[error("division by zero")]
    DivisionByZero,
    #[error("integer overflow in `{0}`")]
    Overflow(&'static str),
    #[error("function `{ident}` must return {expected}, returned {found}")]
    ReturnType {
        ident: String,
        expected: Type,
        found: Type,
    },
    #[error("call to `{0}` produced no value")]
    VoidValue(String),
    #[error("operator `{op}` cannot be applied to {found}")]
    InvalidOperand { op: &'static str, found: Type },
    #[error("variable `{0}` is already declared in this scope")]
    Redeclared(String),
    #[error("cannot assign to `{0}` outside of the scope declaring it")]
    AssignOutsideScope(String),
    /// A fault caught at the `run` boundary.
    #[error("internal error: {0}")]
    Internal(String),
}

impl RuntimeError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Runtime
    }
}

pub type RuntimeResult<T> = Result<T, RuntimeError>;
