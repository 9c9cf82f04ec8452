//! Tree-walking evaluator for parsed leo programs.

pub mod env;
pub mod error;
pub mod eval;

pub use error::RuntimeError;
pub use eval::{eval, run, Evaluator};
