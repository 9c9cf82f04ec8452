//! Lexer, parser and static checks for leo source files.

pub mod ast;
pub mod cursor;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod scope;
pub mod visitor;

pub use error::{ParseError, ParseResult, SymbolKind};
pub use lexer::tokenize;
pub use parser::{parse_bare_expr, parse_file, Parser};
