use super::*;
use crate::ast::UnaryOp;

impl<'t, 'p> Parser<'t, 'p> {
    /* Expressions */
    /// Parses any expression.
    ///
    /// Stops in front of (without consuming) a `;`, `,` or unmatched `)`, leaving the
    /// terminator for the caller.
    ///
    /// Operands must be joined by an infix operator: a `(` directly after a complete operand
    /// is rejected with [`ParseError::UnexpectedToken`] instead of being merged as a group.
    pub fn parse_expr(&mut self) -> ParseResult<Expr> {
        let mut root = self.parse_primary_expr()?;

        loop {
            let span = self.cursor.peek_span();
            match self.cursor.next() {
                Token::Semi | Token::Comma | Token::CloseParen => {
                    self.cursor.put_back(); // the terminator belongs to the parent
                    return Ok(root);
                }
                Token::Eof => {
                    return Err(ParseError::UnexpectedEof {
                        expected: "`;` after expression",
                        span,
                    })
                }
                token => match token.binop() {
                    Some(op) => {
                        let rhs = self.parse_primary_expr()?;
                        root = root.priority_merge(op, rhs);
                    }
                    None => {
                        return Err(ParseError::UnexpectedToken {
                            found: token.to_string(),
                            span,
                        })
                    }
                },
            }
        }
    }

    /// Parses a `;`-terminated expression and infers its type. The `;` is consumed.
    pub fn parse_typed_expr(&mut self) -> ParseResult<(Expr, Type)> {
        let span = self.cursor.peek_span();
        let expr = self.parse_expr()?;
        let ty = self.infer_value(&expr, &span)?;
        self.expect(Token::Semi, "`;`")?;
        Ok((expr, ty))
    }

    /// Parses a primary (atom) expression.
    fn parse_primary_expr(&mut self) -> ParseResult<Expr> {
        // NOTE: prefix operators are handled here
        match self.cursor.peek() {
            Token::IntLit(_) | Token::True | Token::False => self.parse_literal_expr(),
            Token::Identifier(_) => self.parse_identifier_or_call_expr(),
            Token::Minus | Token::Plus | Token::LogicalNot => self.parse_unary_expr(),
            Token::OpenParen => self.parse_grouped_expr(),
            _ => Err(self.expected("an expression")),
        }
    }

    /* Expressions.Literals */
    /// Parses a literal expression.
    /// A literal can be either an integer literal or a bool literal.
    fn parse_literal_expr(&mut self) -> ParseResult<Expr> {
        let val = match self.cursor.peek() {
            Token::IntLit(val) => Expr::IntLit(*val),
            Token::True => Expr::BoolLit(true),
            Token::False => Expr::BoolLit(false),
            _ => return Err(self.unexpected()),
        };
        self.cursor.next(); // eat parsed token
        Ok(val)
    }

    /* Expressions.Unary */
    /// Parses a prefix operator applied to a primary expression.
    /// The result is a leaf to any enclosing binary operator.
    fn parse_unary_expr(&mut self) -> ParseResult<Expr> {
        let op: UnaryOp = match self.cursor.peek().unary_op() {
            Some(op) => op,
            None => return Err(self.unexpected()),
        };
        self.cursor.next();
        let arg = self.parse_primary_expr()?;
        Ok(Expr::Unary {
            op,
            arg: Box::new(arg),
        })
    }

    /* Expressions.Grouping */
    /// Parses a parenthesized sub-expression and pins its precedence.
    fn parse_grouped_expr(&mut self) -> ParseResult<Expr> {
        self.expect(Token::OpenParen, "`(`")?;
        let inner = self.parse_expr()?;
        self.expect(Token::CloseParen, "`)`")?;
        Ok(inner.into_grouped())
    }

    /* Expressions.Identifier */
    /// Parses an identifier or a call expression.
    /// The name must resolve in the current scope.
    pub(super) fn parse_identifier_or_call_expr(&mut self) -> ParseResult<Expr> {
        let (ident, span) = self.expect_ident()?;

        if self.eat(Token::OpenParen) {
            if self.scope.resolve_fn(&ident).is_none() {
                return Err(ParseError::Unresolved {
                    kind: SymbolKind::Function,
                    name: ident,
                    span,
                });
            }

            // parse call expression
            let mut args = Vec::new();
            if !self.eat(Token::CloseParen) {
                loop {
                    args.push(self.parse_expr()?);

                    if self.eat(Token::CloseParen) {
                        break;
                    }
                    self.expect(Token::Comma, "`,` or `)`")?;
                }
            }

            Ok(Expr::FnCall { ident, args })
        } else {
            // parse identifier expression
            if self.scope.resolve_var(&ident).is_none() {
                return Err(ParseError::Unresolved {
                    kind: SymbolKind::Variable,
                    name: ident,
                    span,
                });
            }
            Ok(Expr::Identifier(ident))
        }
    }
}
