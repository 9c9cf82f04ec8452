use super::*;
use crate::ast::{BinOp, UnaryOp};

/// Static return-type inference. Nothing is evaluated.
impl<'t, 'p> Parser<'t, 'p> {
    /// Infers the type of `expr`, checking operand types on the way.
    /// `span` locates the expression for error reporting.
    pub(crate) fn infer(&self, expr: &Expr, span: &Span) -> ParseResult<Type> {
        match expr {
            Expr::IntLit(_) => Ok(Type::Int),
            Expr::BoolLit(_) => Ok(Type::Bool),
            Expr::Identifier(ident) => {
                self.scope
                    .resolve_var(ident)
                    .ok_or_else(|| ParseError::Unresolved {
                        kind: SymbolKind::Variable,
                        name: ident.clone(),
                        span: span.clone(),
                    })
            }
            Expr::FnCall { ident, args } => {
                for arg in args {
                    self.infer_value(arg, span)?;
                }
                self.scope
                    .resolve_fn(ident)
                    .map(|signature| signature.return_type)
                    .ok_or_else(|| ParseError::Unresolved {
                        kind: SymbolKind::Function,
                        name: ident.clone(),
                        span: span.clone(),
                    })
            }
            Expr::Unary { op, arg } => {
                let ty = self.infer_value(arg, span)?;
                let expected = match op {
                    UnaryOp::Not => Type::Bool,
                    UnaryOp::Neg | UnaryOp::Plus => Type::Int,
                };
                if ty != expected {
                    return Err(ParseError::InvalidOperand {
                        op: op.symbol(),
                        found: ty,
                        span: span.clone(),
                    });
                }
                Ok(ty)
            }
            Expr::Binary { lhs, op, rhs, .. } => {
                let lhs = self.infer_value(lhs, span)?;
                let rhs = self.infer_value(rhs, span)?;
                match op {
                    BinOp::Eq | BinOp::NotEq => {
                        if lhs != rhs {
                            return Err(ParseError::TypeMismatch {
                                expected: lhs,
                                found: rhs,
                                span: span.clone(),
                            });
                        }
                    }
                    BinOp::And | BinOp::Or => self.check_operands(*op, Type::Bool, lhs, rhs, span)?,
                    _ => self.check_operands(*op, Type::Int, lhs, rhs, span)?,
                }
                Ok(op.result_type())
            }
        }
    }

    /// Like [`Self::infer`] but rejects `void` calls, which produce no value.
    pub(crate) fn infer_value(&self, expr: &Expr, span: &Span) -> ParseResult<Type> {
        match self.infer(expr, span)? {
            Type::Void => Err(ParseError::VoidValue { span: span.clone() }),
            ty => Ok(ty),
        }
    }

    fn check_operands(
        &self,
        op: BinOp,
        expected: Type,
        lhs: Type,
        rhs: Type,
        span: &Span,
    ) -> ParseResult<()> {
        for found in [lhs, rhs] {
            if found != expected {
                return Err(ParseError::InvalidOperand {
                    op: op.symbol(),
                    found,
                    span: span.clone(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    fn infer(source: &str) -> ParseResult<Type> {
        let mut scope = Scope::new(None);
        scope.declare_var("n", Type::Int, 0..0).unwrap();
        scope.declare_var("flag", Type::Bool, 0..0).unwrap();
        scope
            .declare_fn(
                FnSignature {
                    ident: "noop".to_string(),
                    params: vec![],
                    return_type: Type::Void,
                },
                0..0,
            )
            .unwrap();
        let tokens = tokenize(source).unwrap();
        Parser::with_scope(&tokens, scope)
            .parse_typed_expr()
            .map(|(_, ty)| ty)
    }

    #[test]
    fn test_literals_and_identifiers() {
        assert_eq!(infer("123;"), Ok(Type::Int));
        assert_eq!(infer("true;"), Ok(Type::Bool));
        assert_eq!(infer("n;"), Ok(Type::Int));
        assert_eq!(infer("flag;"), Ok(Type::Bool));
    }

    #[test]
    fn test_unary_inherits_operand_type() {
        assert_eq!(infer("-123;"), Ok(Type::Int));
        assert_eq!(infer("!true;"), Ok(Type::Bool));
        assert!(matches!(
            infer("!1;"),
            Err(ParseError::InvalidOperand { op: "!", found: Type::Int, .. })
        ));
        assert!(matches!(
            infer("-flag;"),
            Err(ParseError::InvalidOperand { op: "-", found: Type::Bool, .. })
        ));
    }

    #[test]
    fn test_binary_result_types() {
        assert_eq!(infer("1 + 2;"), Ok(Type::Int));
        assert_eq!(infer("true && false;"), Ok(Type::Bool));
        assert_eq!(infer("1 < 2;"), Ok(Type::Bool));
        assert_eq!(infer("true == false;"), Ok(Type::Bool));
        assert_eq!(infer("1 == 1 && 2 != n || 3 > 1;"), Ok(Type::Bool));
    }

    #[test]
    fn test_operand_mismatch() {
        assert!(matches!(
            infer("1 + true;"),
            Err(ParseError::InvalidOperand { op: "+", found: Type::Bool, .. })
        ));
        assert!(matches!(
            infer("1 && flag;"),
            Err(ParseError::InvalidOperand { op: "&&", found: Type::Int, .. })
        ));
        assert!(matches!(
            infer("true == 2;"),
            Err(ParseError::TypeMismatch {
                expected: Type::Bool,
                found: Type::Int,
                ..
            })
        ));
    }

    #[test]
    fn test_void_call_has_no_value() {
        assert!(matches!(infer("noop();"), Err(ParseError::VoidValue { .. })));
        assert!(matches!(infer("noop() + 1;"), Err(ParseError::VoidValue { .. })));
    }
}
