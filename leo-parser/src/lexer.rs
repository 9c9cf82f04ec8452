use std::fmt;

use leo_source::Span;
use logos::Logos;

use crate::ast::{BinOp, UnaryOp};
use crate::error::{ParseError, ParseResult};

#[derive(Debug, Logos, Clone, PartialEq)]
pub enum Token {
    // literals
    #[regex(r"[0-9]+", |lex| lex.slice().parse())]
    IntLit(i64),
    #[token("true")]
    True,
    #[token("false")]
    False,

    // identifiers
    #[regex("[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),

    // unary operators
    #[token("!")]
    LogicalNot,

    // binary operators
    // - arithmetics
    #[token("+")]
    Plus,
    #[token("-")]
    Minus, // NOTE: can also be unary
    #[token("*")]
    Asterisk,
    #[token("/")]
    Slash,
    // - assignment
    #[token("=")]
    Equals,
    // - equality
    #[token("==")]
    EqualsEquals,
    #[token("!=")]
    NotEquals,
    // - ordering
    #[token(">")]
    GreaterThan,
    #[token(">=")]
    GreaterThanEquals,
    #[token("<")]
    LessThan,
    #[token("<=")]
    LessThanEquals,
    // - logical
    #[token("&&")]
    LogicalAnd,
    #[token("||")]
    LogicalOr,

    // punctuation
    #[token("(")]
    OpenParen,
    #[token(")")]
    CloseParen,
    #[token("{")]
    OpenBrace,
    #[token("}")]
    CloseBrace,
    #[token(",")]
    Comma,
    #[token(";")]
    Semi,

    // keywords
    #[token("fn")]
    Fn,
    #[token("var")]
    Var,
    #[token("return")]
    Return,
    #[token("int")]
    IntType,
    #[token("bool")]
    BoolType,

    // misc
    #[regex(r"[ \t\n\r\f]+", logos::skip)]
    #[regex(r"//[^\n]*", logos::skip)] // single line comments
    #[error]
    Error,

    /// Only generated by the cursor when reading past the last token.
    Eof,
}

impl Token {
    /// Returns the infix operator this token stands for or `None` if it is not a binop.
    /// `=` is not an expression operator.
    pub fn binop(&self) -> Option<BinOp> {
        let op = match self {
            /* Additive */
            Token::Plus => BinOp::Add,
            Token::Minus => BinOp::Sub,
            /* Multiplicative */
            Token::Asterisk => BinOp::Mul,
            Token::Slash => BinOp::Div,
            /* Equality */
            Token::EqualsEquals => BinOp::Eq,
            Token::NotEquals => BinOp::NotEq,
            /* Ordering */
            Token::GreaterThan => BinOp::Greater,
            Token::GreaterThanEquals => BinOp::GreaterEq,
            Token::LessThan => BinOp::Less,
            Token::LessThanEquals => BinOp::LessEq,
            /* Logical */
            Token::LogicalAnd => BinOp::And,
            Token::LogicalOr => BinOp::Or,
            _ => return None,
        };
        Some(op)
    }

    /// Returns the prefix operator this token stands for or `None` if it is not one.
    pub fn unary_op(&self) -> Option<UnaryOp> {
        match self {
            Token::Minus => Some(UnaryOp::Neg),
            Token::Plus => Some(UnaryOp::Plus),
            Token::LogicalNot => Some(UnaryOp::Not),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Token::IntLit(val) => return write!(f, "integer `{}`", val),
            Token::Identifier(ident) => return write!(f, "identifier `{}`", ident),
            Token::Eof => return f.write_str("end of input"),
            Token::Error => return f.write_str("invalid token"),
            Token::True => "true",
            Token::False => "false",
            Token::LogicalNot => "!",
            Token::Plus => "+",
            Token::Minus => "-",
            Token::Asterisk => "*",
            Token::Slash => "/",
            Token::Equals => "=",
            Token::EqualsEquals => "==",
            Token::NotEquals => "!=",
            Token::GreaterThan => ">",
            Token::GreaterThanEquals => ">=",
            Token::LessThan => "<",
            Token::LessThanEquals => "<=",
            Token::LogicalAnd => "&&",
            Token::LogicalOr => "||",
            Token::OpenParen => "(",
            Token::CloseParen => ")",
            Token::OpenBrace => "{",
            Token::CloseBrace => "}",
            Token::Comma => ",",
            Token::Semi => ";",
            Token::Fn => "fn",
            Token::Var => "var",
            Token::Return => "return",
            Token::IntType => "int",
            Token::BoolType => "bool",
        };
        write!(f, "`{}`", symbol)
    }
}

/// A token together with the byte range it was scanned from.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub span: Span,
}

/// Scans `source` into a flat token stream.
/// The stream never contains [`Token::Eof`]; the cursor synthesizes it.
pub fn tokenize(source: &str) -> ParseResult<Vec<Spanned>> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();

    while let Some(token) = lexer.next() {
        if token == Token::Error {
            return Err(ParseError::InvalidToken {
                text: lexer.slice().to_string(),
                span: lexer.span(),
            });
        }
        tokens.push(Spanned {
            token,
            span: lexer.span(),
        });
    }

    Ok(tokens)
}
