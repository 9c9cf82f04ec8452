use crate::ast::{Argument, Expr, FnDef, Program, Stmt};
use crate::cursor::TokenCursor;
use crate::error::{ParseError, ParseResult, SymbolKind};
use crate::lexer::{Spanned, Token};
use crate::scope::{FnSignature, Scope};
use leo_source::Span;
use leo_value::Type;
use std::mem;
use std::ops::Range;

mod expr;
mod stmt;
mod typeck;

pub struct Parser<'t, 'p> {
    cursor: TokenCursor<'t>,
    /// Declarations visible to the code being parsed.
    scope: Scope<'p>,
    /// Declared return type of the function whose body is being parsed.
    return_type: Type,
}

impl<'t> Parser<'t, 'static> {
    /// Creates a parser with an empty global scope.
    pub fn new(tokens: &'t [Spanned]) -> Self {
        Self::with_scope(tokens, Scope::new(None))
    }
}

impl<'t, 'p> Parser<'t, 'p> {
    pub fn with_scope(tokens: &'t [Spanned], scope: Scope<'p>) -> Self {
        Self {
            cursor: TokenCursor::new(tokens),
            scope,
            return_type: Type::Void,
        }
    }

    pub fn into_scope(self) -> Scope<'p> {
        self.scope
    }
}

/// A top-level declaration collected by the signature stage.
enum Item {
    Global(Stmt),
    Function {
        signature: FnSignature,
        /// Span of the function name, for error reporting.
        span: Span,
        /// Token indices of the brace-delimited body, braces excluded.
        body: Range<usize>,
    },
}

/// Parses a whole source file.
///
/// Parsing happens in two stages. The first registers every global variable and every
/// function signature, capturing function bodies as token ranges. The second parses each
/// body against the now complete global scope, so functions may call siblings defined
/// later in the file.
pub fn parse_file(tokens: &[Spanned]) -> ParseResult<Program> {
    let mut parser = Parser::new(tokens);
    let items = parser.parse_signatures()?;
    let globals = parser.into_scope();

    if globals.resolve_fn("main").is_none() {
        return Err(ParseError::MissingMain);
    }

    let mut body = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Item::Global(stmt) => body.push(stmt),
            Item::Function {
                signature,
                span,
                body: range,
            } => {
                let mut parser =
                    Parser::with_scope(&tokens[range], Scope::new(Some(&globals)));
                let def = parser.parse_fn_body(signature, span)?;
                body.push(Stmt::FnDef(def));
            }
        }
    }

    Ok(Program { body })
}

/// Parses a single `;`-terminated expression with nothing declared in scope.
/// Returns the expression and its static type.
pub fn parse_bare_expr(tokens: &[Spanned]) -> ParseResult<(Expr, Type)> {
    let mut parser = Parser::new(tokens);
    let parsed = parser.parse_typed_expr()?;
    if !parser.cursor.is_at_end() {
        return Err(parser.expected("end of input"));
    }
    Ok(parsed)
}

impl<'t, 'p> Parser<'t, 'p> {
    /// Signature stage: parses global declarations fully and function headers only.
    fn parse_signatures(&mut self) -> ParseResult<Vec<Item>> {
        let mut items = Vec::new();
        loop {
            match self.cursor.peek() {
                Token::Eof => break,
                Token::Var | Token::IntType | Token::BoolType => {
                    items.push(Item::Global(self.parse_var_decl()?));
                }
                Token::Fn => {
                    let (signature, span, body) = self.parse_fn_header()?;
                    self.scope.declare_fn(signature.clone(), span.clone())?;
                    items.push(Item::Function {
                        signature,
                        span,
                        body,
                    });
                }
                _ => return Err(self.expected("a declaration")),
            }
        }
        Ok(items)
    }

    /// Parses `fn ident(type ident, ...) [type] { ... }` up to and including the closing
    /// brace. The body is skipped and returned as a token range.
    fn parse_fn_header(&mut self) -> ParseResult<(FnSignature, Span, Range<usize>)> {
        self.expect(Token::Fn, "`fn`")?;
        let (ident, span) = self.expect_ident()?;
        self.expect(Token::OpenParen, "`(`")?;

        let mut params: Vec<Argument> = Vec::new();
        if !self.eat(Token::CloseParen) {
            loop {
                let ty = match self.parse_type() {
                    Some(ty) => ty,
                    None => return Err(self.expected("a parameter type")),
                };
                let (param, param_span) = self.expect_ident()?;
                if params.iter().any(|arg| arg.ident == param) {
                    return Err(ParseError::Redeclared {
                        kind: SymbolKind::Parameter,
                        name: param,
                        span: param_span,
                    });
                }
                params.push(Argument { ident: param, ty });

                if self.eat(Token::CloseParen) {
                    break;
                }
                self.expect(Token::Comma, "`,` or `)`")?;
            }
        }

        let return_type = self.parse_type().unwrap_or(Type::Void);
        self.expect(Token::OpenBrace, "`{`")?;
        let body = self.skip_block()?;

        let signature = FnSignature {
            ident,
            params,
            return_type,
        };
        Ok((signature, span, body))
    }

    /// Skips to the brace matching an already consumed `{`, returning the tokens in between.
    fn skip_block(&mut self) -> ParseResult<Range<usize>> {
        let start = self.cursor.pos();
        let mut depth = 1;
        loop {
            let span = self.cursor.peek_span();
            match self.cursor.next() {
                Token::OpenBrace => depth += 1,
                Token::CloseBrace => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                Token::Eof => {
                    return Err(ParseError::UnexpectedEof {
                        expected: "`}`",
                        span,
                    })
                }
                _ => {}
            }
        }
        // exclude the closing brace
        Ok(start..self.cursor.pos() - 1)
    }

    /// Body stage: binds the parameters and parses every statement of the body.
    fn parse_fn_body(&mut self, signature: FnSignature, span: Span) -> ParseResult<FnDef> {
        self.return_type = signature.return_type;
        for param in &signature.params {
            self.scope.declare_var(&param.ident, param.ty, span.clone())?;
        }

        let mut body = Vec::new();
        while !self.cursor.is_at_end() {
            body.push(self.parse_stmt()?);
        }

        Ok(FnDef {
            ident: signature.ident,
            span,
            params: signature.params,
            return_type: signature.return_type,
            body,
        })
    }
}

/// Parse utilities
impl<'t, 'p> Parser<'t, 'p> {
    /// Predicate that tests whether the current token has the same discriminant and eats it if yes as a side effect.
    fn eat(&mut self, tok: Token) -> bool {
        if mem::discriminant(self.cursor.peek()) == mem::discriminant(&tok) {
            self.cursor.next(); // eat token
            true
        } else {
            false
        }
    }

    fn expect(&mut self, tok: Token, expected: &'static str) -> ParseResult<()> {
        if self.eat(tok) {
            Ok(())
        } else {
            Err(self.expected(expected))
        }
    }

    fn expect_ident(&mut self) -> ParseResult<(String, Span)> {
        let span = self.cursor.peek_span();
        match self.cursor.peek() {
            Token::Identifier(ident) => {
                self.cursor.next();
                Ok((ident.clone(), span))
            }
            _ => Err(self.expected("an identifier")),
        }
    }

    /// Eats a type keyword if present.
    fn parse_type(&mut self) -> Option<Type> {
        let ty = match self.cursor.peek() {
            Token::IntType => Type::Int,
            Token::BoolType => Type::Bool,
            _ => return None,
        };
        self.cursor.next();
        Some(ty)
    }

    /// Raises an unexpected token error for the current token.
    fn unexpected(&self) -> ParseError {
        let span = self.cursor.peek_span();
        match self.cursor.peek() {
            Token::Eof => ParseError::UnexpectedEof {
                expected: "more input",
                span,
            },
            token => ParseError::UnexpectedToken {
                found: token.to_string(),
                span,
            },
        }
    }

    /// Raises an error saying what was expected instead of the current token.
    fn expected(&self, expected: &'static str) -> ParseError {
        let span = self.cursor.peek_span();
        match self.cursor.peek() {
            Token::Eof => ParseError::UnexpectedEof { expected, span },
            token => ParseError::Expected {
                expected,
                found: token.to_string(),
                span,
            },
        }
    }
}
