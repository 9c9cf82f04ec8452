use super::*;

impl<'t, 'p> Parser<'t, 'p> {
    /// Parses a statement inside a function body.
    pub fn parse_stmt(&mut self) -> ParseResult<Stmt> {
        match self.cursor.peek() {
            Token::Var | Token::IntType | Token::BoolType => self.parse_var_decl(),
            Token::Return => self.parse_return_stmt(),
            Token::Fn => self.parse_nested_fn(),
            Token::Identifier(_) => {
                // look past the identifier to tell a call from an assignment
                self.cursor.next();
                let is_call = matches!(self.cursor.peek(), Token::OpenParen);
                self.cursor.put_back();

                if is_call {
                    self.parse_call_stmt()
                } else {
                    self.parse_assignment()
                }
            }
            _ => Err(self.expected("a statement")),
        }
    }

    /// Parses `var ident = expr;` or `type ident = expr;` and registers the variable.
    pub fn parse_var_decl(&mut self) -> ParseResult<Stmt> {
        let declared = match self.cursor.next() {
            Token::Var => None,
            Token::IntType => Some(Type::Int),
            Token::BoolType => Some(Type::Bool),
            _ => {
                self.cursor.put_back();
                return Err(self.expected("`var` or a type"));
            }
        };
        let (ident, ident_span) = self.expect_ident()?;
        self.expect(Token::Equals, "`=`")?;

        let span = self.cursor.peek_span();
        let initializer = self.parse_expr()?;
        let ty = match declared {
            // If a type is specified, the expression must have that type
            Some(declared) => {
                let found = self.infer(&initializer, &span)?;
                if found != declared {
                    return Err(ParseError::TypeMismatch {
                        expected: declared,
                        found,
                        span,
                    });
                }
                declared
            }
            // Otherwise the variable takes the type of the expression
            None => self.infer_value(&initializer, &span)?,
        };
        self.expect(Token::Semi, "`;`")?;

        self.scope.declare_var(&ident, ty, ident_span)?;
        Ok(Stmt::VarDecl {
            ident,
            ty,
            initializer,
        })
    }

    /// Parses `return;` or `return expr;`. A function declared with a value type must return
    /// a value of that type; a `void` function may return anything.
    fn parse_return_stmt(&mut self) -> ParseResult<Stmt> {
        self.expect(Token::Return, "`return`")?;
        let span = self.cursor.peek_span();
        let (stmt, found) = if self.eat(Token::Semi) {
            (Stmt::Return(None), Type::Void)
        } else {
            let (expr, ty) = self.parse_typed_expr()?;
            (Stmt::Return(Some(expr)), ty)
        };

        if self.return_type != Type::Void && found != self.return_type {
            return Err(ParseError::TypeMismatch {
                expected: self.return_type,
                found,
                span,
            });
        }
        Ok(stmt)
    }

    /// Parses `ident = expr;`. Only variables of the current function can be assigned.
    fn parse_assignment(&mut self) -> ParseResult<Stmt> {
        let (ident, ident_span) = self.expect_ident()?;
        let ty = match self.scope.resolve_local_var(&ident) {
            Some(ty) => ty,
            None if self.scope.resolve_var(&ident).is_some() => {
                return Err(ParseError::AssignToGlobal {
                    name: ident,
                    span: ident_span,
                })
            }
            None => {
                return Err(ParseError::Unresolved {
                    kind: SymbolKind::Variable,
                    name: ident,
                    span: ident_span,
                })
            }
        };
        self.expect(Token::Equals, "`=` or `(`")?;

        let span = self.cursor.peek_span();
        let (value, found) = self.parse_typed_expr()?;
        if found != ty {
            return Err(ParseError::TypeMismatch {
                expected: ty,
                found,
                span,
            });
        }

        Ok(Stmt::Assignment { ident, value })
    }

    /// Parses `ident(args...);`. The call may return `void`.
    fn parse_call_stmt(&mut self) -> ParseResult<Stmt> {
        let span = self.cursor.peek_span();
        let call = self.parse_identifier_or_call_expr()?;
        self.infer(&call, &span)?;
        self.expect(Token::Semi, "`;`")?;
        Ok(Stmt::ExprStmt(call))
    }

    /// Parses a function defined inside another function's body.
    ///
    /// The function is visible to the rest of the enclosing body. Its own body only sees
    /// globals, its parameters and its locals.
    fn parse_nested_fn(&mut self) -> ParseResult<Stmt> {
        let (signature, span, body) = self.parse_fn_header()?;
        self.scope.declare_fn(signature.clone(), span.clone())?;

        let tokens = &self.cursor.tokens()[body];
        let mut parser = Parser::with_scope(tokens, Scope::new(self.scope.parent()));
        let def = parser.parse_fn_body(signature, span)?;
        Ok(Stmt::FnDef(def))
    }
}
