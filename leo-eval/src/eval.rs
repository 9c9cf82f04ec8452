use std::panic::{self, AssertUnwindSafe};

use leo_parser::ast::{BinOp, Expr, FnDef, Program, Stmt, UnaryOp};
use leo_value::{Type, Value};

use crate::env::Env;
use crate::error::{RuntimeError, RuntimeResult};

/// What to do after a statement has been executed.
enum Flow {
    Next,
    Return(Option<Value>),
}

/// Evaluates expressions and statements. Every call frame it opens has the globals as parent.
pub struct Evaluator<'g, 'ast> {
    globals: &'g Env<'g, 'ast>,
}

impl<'g, 'ast> Evaluator<'g, 'ast> {
    pub fn new(globals: &'g Env<'g, 'ast>) -> Self {
        Self { globals }
    }

    pub fn eval_expr(&self, expr: &'ast Expr, env: &Env<'_, 'ast>) -> RuntimeResult<Value> {
        match expr {
            Expr::IntLit(val) => Ok(Value::Int(*val)),
            Expr::BoolLit(val) => Ok(Value::Bool(*val)),
            Expr::Identifier(ident) => env.get(ident),
            Expr::FnCall { ident, args } => self
                .eval_call(ident, args, env)?
                .ok_or_else(|| RuntimeError::VoidValue(ident.clone())),
            Expr::Unary { op, arg } => self.eval_unary(*op, arg, env),
            Expr::Binary { lhs, op, rhs, .. } => self.eval_binary(lhs, *op, rhs, env),
        }
    }

    /// Resolves `ident` from `env` and calls it. Arguments are evaluated in `env`.
    pub fn eval_call(
        &self,
        ident: &str,
        args: &'ast [Expr],
        env: &Env<'_, 'ast>,
    ) -> RuntimeResult<Option<Value>> {
        let def = env.resolve_fn(ident)?;
        self.call(def, args, env)
    }

    /// Calls `def` in a fresh frame. Returns `None` if the body finishes without a value.
    pub fn call(
        &self,
        def: &'ast FnDef,
        args: &'ast [Expr],
        env: &Env<'_, 'ast>,
    ) -> RuntimeResult<Option<Value>> {
        if def.params.len() != args.len() {
            return Err(RuntimeError::ArityMismatch {
                ident: def.ident.clone(),
                expected: def.params.len(),
                found: args.len(),
            });
        }

        // functions are not closures: the frame only sees globals
        let mut frame = Env::new(Some(self.globals));
        for (param, arg) in def.params.iter().zip(args) {
            let value = self.eval_expr(arg, env)?;
            if value.ty() != param.ty {
                return Err(RuntimeError::ArgumentType {
                    ident: def.ident.clone(),
                    param: param.ident.clone(),
                    expected: param.ty,
                    found: value.ty(),
                });
            }
            frame.declare(&param.ident, value)?;
        }

        tracing::trace!(function = %def.ident, "call");
        let result = match self.exec_block(&def.body, &mut frame)? {
            Flow::Return(value) => value,
            Flow::Next => None,
        };
        if let Some(value) = &result {
            if def.return_type != Type::Void && value.ty() != def.return_type {
                return Err(RuntimeError::ReturnType {
                    ident: def.ident.clone(),
                    expected: def.return_type,
                    found: value.ty(),
                });
            }
        }
        tracing::trace!(function = %def.ident, ?result, "return");
        Ok(result)
    }

    /// Executes statements in order until the first `return`.
    fn exec_block(&self, body: &'ast [Stmt], env: &mut Env<'_, 'ast>) -> RuntimeResult<Flow> {
        for stmt in body {
            if let Flow::Return(value) = self.exec_stmt(stmt, env)? {
                return Ok(Flow::Return(value));
            }
        }
        Ok(Flow::Next)
    }

    fn exec_stmt(&self, stmt: &'ast Stmt, env: &mut Env<'_, 'ast>) -> RuntimeResult<Flow> {
        match stmt {
            Stmt::VarDecl {
                ident, initializer, ..
            } => {
                let value = self.eval_expr(initializer, env)?;
                env.declare(ident, value)?;
            }
            Stmt::Assignment { ident, value } => {
                let value = self.eval_expr(value, env)?;
                env.assign(ident, value)?;
            }
            Stmt::Return(expr) => {
                let value = expr
                    .as_ref()
                    .map(|expr| self.eval_expr(expr, env))
                    .transpose()?;
                return Ok(Flow::Return(value));
            }
            Stmt::FnDef(def) => env.define_fn(def),
            // the result of a call statement is discarded, `void` included
            Stmt::ExprStmt(Expr::FnCall { ident, args }) => {
                self.eval_call(ident, args, env)?;
            }
            Stmt::ExprStmt(expr) => {
                self.eval_expr(expr, env)?;
            }
        }
        Ok(Flow::Next)
    }

    fn eval_unary(&self, op: UnaryOp, arg: &'ast Expr, env: &Env<'_, 'ast>) -> RuntimeResult<Value> {
        let val = self.eval_expr(arg, env)?;
        let symbol = op.symbol();
        match op {
            UnaryOp::Neg => int_operand(symbol, val)?
                .checked_neg()
                .map(Value::Int)
                .ok_or(RuntimeError::Overflow(symbol)),
            UnaryOp::Plus => int_operand(symbol, val).map(Value::Int),
            UnaryOp::Not => bool_operand(symbol, val).map(|val| Value::Bool(!val)),
        }
    }

    fn eval_binary(
        &self,
        lhs: &'ast Expr,
        op: BinOp,
        rhs: &'ast Expr,
        env: &Env<'_, 'ast>,
    ) -> RuntimeResult<Value> {
        let symbol = op.symbol();
        let lhs = self.eval_expr(lhs, env)?;

        /// Evaluates `rhs` and applies a checked integer operation.
        macro_rules! gen_int_binary_op {
            ($self: ident, $checked: ident) => {{
                let a = int_operand(symbol, lhs)?;
                let b = int_operand(symbol, $self.eval_expr(rhs, env)?)?;
                Value::Int(a.$checked(b).ok_or(RuntimeError::Overflow(symbol))?)
            }};
        }
        /// Evaluates `rhs` and compares both integer operands.
        macro_rules! gen_int_cmp_op {
            ($self: ident, $op: tt) => {{
                let a = int_operand(symbol, lhs)?;
                let b = int_operand(symbol, $self.eval_expr(rhs, env)?)?;
                Value::Bool(a $op b)
            }};
        }

        let val = match op {
            BinOp::Add => gen_int_binary_op!(self, checked_add),
            BinOp::Sub => gen_int_binary_op!(self, checked_sub),
            BinOp::Mul => gen_int_binary_op!(self, checked_mul),
            BinOp::Div => {
                let a = int_operand(symbol, lhs)?;
                let b = int_operand(symbol, self.eval_expr(rhs, env)?)?;
                if b == 0 {
                    return Err(RuntimeError::DivisionByZero);
                }
                Value::Int(a.checked_div(b).ok_or(RuntimeError::Overflow(symbol))?)
            }
            BinOp::Less => gen_int_cmp_op!(self, <),
            BinOp::LessEq => gen_int_cmp_op!(self, <=),
            BinOp::Greater => gen_int_cmp_op!(self, >),
            BinOp::GreaterEq => gen_int_cmp_op!(self, >=),
            BinOp::Eq | BinOp::NotEq => {
                let rhs = self.eval_expr(rhs, env)?;
                if lhs.ty() != rhs.ty() {
                    return Err(RuntimeError::InvalidOperand {
                        op: symbol,
                        found: rhs.ty(),
                    });
                }
                Value::Bool((lhs == rhs) == (op == BinOp::Eq))
            }
            // `rhs` is only evaluated when `lhs` does not decide the result
            BinOp::And => {
                let a = bool_operand(symbol, lhs)?;
                Value::Bool(a && bool_operand(symbol, self.eval_expr(rhs, env)?)?)
            }
            BinOp::Or => {
                let a = bool_operand(symbol, lhs)?;
                Value::Bool(a || bool_operand(symbol, self.eval_expr(rhs, env)?)?)
            }
        };
        Ok(val)
    }
}

fn int_operand(op: &'static str, val: Value) -> RuntimeResult<i64> {
    val.cast_to_int().ok_or(RuntimeError::InvalidOperand {
        op,
        found: val.ty(),
    })
}

fn bool_operand(op: &'static str, val: Value) -> RuntimeResult<bool> {
    val.cast_to_bool().ok_or(RuntimeError::InvalidOperand {
        op,
        found: val.ty(),
    })
}

/// Runs the `main` function of `program` and returns its result.
///
/// Global values are evaluated in declaration order before `main` is called.
pub fn run(program: &Program) -> RuntimeResult<Option<Value>> {
    guarded(|| run_main(program))
}

/// Evaluates an expression that refers to no variables or functions.
pub fn eval(expr: &Expr) -> RuntimeResult<Value> {
    guarded(|| {
        let globals = Env::new(None);
        Evaluator::new(&globals).eval_expr(expr, &globals)
    })
}

/// The outermost evaluation boundary. A panic escaping `f` is caught here and returned as
/// [`RuntimeError::Internal`].
fn guarded<T>(f: impl FnOnce() -> RuntimeResult<T>) -> RuntimeResult<T> {
    panic::catch_unwind(AssertUnwindSafe(f)).unwrap_or_else(|payload| {
        let message = payload
            .downcast_ref::<&str>()
            .map(|message| message.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "evaluation panicked".to_string());
        tracing::error!(%message, "evaluation panicked");
        Err(RuntimeError::Internal(message))
    })
}

fn run_main(program: &Program) -> RuntimeResult<Option<Value>> {
    let mut globals = Env::new(None);
    for stmt in &program.body {
        if let Stmt::FnDef(def) = stmt {
            globals.define_fn(def);
        }
    }
    for stmt in &program.body {
        if let Stmt::VarDecl {
            ident, initializer, ..
        } = stmt
        {
            let value = Evaluator::new(&globals).eval_expr(initializer, &globals)?;
            globals.declare(ident, value)?;
        }
    }

    let main = program.function("main").ok_or(RuntimeError::MissingMain)?;
    tracing::debug!("running main");
    let result = Evaluator::new(&globals).call(main, &[], &globals)?;
    tracing::debug!(?result, "main finished");
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use leo_parser::{parse_file, tokenize};

    fn run_source(source: &str) -> RuntimeResult<Option<Value>> {
        let program = parse_file(&tokenize(source).unwrap()).unwrap();
        run(&program)
    }

    #[test]
    fn test_local_shadows_global() {
        assert_eq!(
            run_source("var a = 10; fn main() { var a = 11; return a; }"),
            Ok(Some(Value::Int(11)))
        );
        assert_eq!(
            run_source("var a = 10; fn read() int { return a; } fn main() int { var a = 11; return read() + a; }"),
            Ok(Some(Value::Int(21)))
        );
    }

    #[test]
    fn test_call() {
        assert_eq!(
            run_source("fn foo() int { return 1 + 2; } fn main() int { return foo() + 1; }"),
            Ok(Some(Value::Int(4)))
        );
        assert_eq!(
            run_source("fn add(int a, int b) int { return a + b; } fn main() int { return add(2, 3) * 2; }"),
            Ok(Some(Value::Int(10)))
        );
    }

    #[test]
    fn test_mutual_recursion() {
        let program = |n: i64| {
            format!(
                r#"
                fn is_even(int n) bool {{ return n == 0 || is_odd(n - 1); }}
                fn is_odd(int n) bool {{ return n != 0 && is_even(n - 1); }}
                fn main() bool {{ return is_even({}); }}"#,
                n
            )
        };
        assert_eq!(run_source(&program(10)), Ok(Some(Value::Bool(true))));
        assert_eq!(run_source(&program(7)), Ok(Some(Value::Bool(false))));
    }

    #[test]
    fn test_globals_are_evaluated_in_order() {
        assert_eq!(
            run_source(
                r#"
                fn twice(int x) int { return x * 2; }
                var a = twice(10);
                int b = a + 1;
                fn main() int { return a + b; }"#
            ),
            Ok(Some(Value::Int(41)))
        );
    }

    #[test]
    fn test_first_return_wins() {
        assert_eq!(
            run_source("fn main() int { return 1; return 1 / 0; }"),
            Ok(Some(Value::Int(1)))
        );
        assert_eq!(run_source("fn main() { var a = 1; }"), Ok(None));
        assert_eq!(run_source("fn main() { return; }"), Ok(None));
    }

    #[test]
    fn test_assignment() {
        assert_eq!(
            run_source("fn inc(int a) int { a = a + 1; return a; } fn main() int { var a = 1; a = inc(a) * 10; return a; }"),
            Ok(Some(Value::Int(20)))
        );
    }

    #[test]
    fn test_nested_fn() {
        assert_eq!(
            run_source("var k = 2; fn main() int { fn scale(int x) int { return x * k; } return scale(21); }"),
            Ok(Some(Value::Int(42)))
        );
    }

    #[test]
    fn test_short_circuit() {
        let boom = "fn boom() bool { return 1 / 0 == 0; }";
        assert_eq!(
            run_source(&format!("{} fn main() bool {{ return false && boom(); }}", boom)),
            Ok(Some(Value::Bool(false)))
        );
        assert_eq!(
            run_source(&format!("{} fn main() bool {{ return true || boom(); }}", boom)),
            Ok(Some(Value::Bool(true)))
        );
        assert_eq!(
            run_source(&format!("{} fn main() bool {{ return true && boom(); }}", boom)),
            Err(RuntimeError::DivisionByZero)
        );
    }

    #[test]
    fn test_arithmetic_errors() {
        assert_eq!(
            run_source("fn main() int { return 1 / (2 - 2); }"),
            Err(RuntimeError::DivisionByZero)
        );
        assert_eq!(
            run_source("fn main() int { return 9223372036854775807 + 1; }"),
            Err(RuntimeError::Overflow("+"))
        );
        assert_eq!(
            run_source("fn main() int { var min = -9223372036854775807 - 1; return -min; }"),
            Err(RuntimeError::Overflow("-"))
        );
    }

    #[test]
    fn test_call_errors() {
        assert_eq!(
            run_source("fn f(int a) int { return a; } fn main() int { return f(1, 2); }"),
            Err(RuntimeError::ArityMismatch {
                ident: "f".to_string(),
                expected: 1,
                found: 2,
            })
        );
        assert_eq!(
            run_source("fn f(int a) int { return a; } fn main() int { return f(true); }"),
            Err(RuntimeError::ArgumentType {
                ident: "f".to_string(),
                param: "a".to_string(),
                expected: Type::Int,
                found: Type::Bool,
            })
        );
        // declared `int` but returns nothing
        assert_eq!(
            run_source("fn f() int { var a = 1; } fn main() int { return f() + 1; }"),
            Err(RuntimeError::VoidValue("f".to_string()))
        );
    }

    #[test]
    fn test_return_type_is_checked_at_call() {
        let def = |ident: &str, return_type, value| FnDef {
            ident: ident.to_string(),
            span: 0..0,
            params: vec![],
            return_type,
            body: vec![Stmt::Return(Some(value))],
        };
        let call = |ident: &str| Expr::FnCall {
            ident: ident.to_string(),
            args: vec![],
        };
        let program = Program {
            body: vec![
                Stmt::FnDef(def("f", Type::Int, Expr::BoolLit(true))),
                Stmt::FnDef(def("main", Type::Int, call("f"))),
            ],
        };
        assert_eq!(
            run(&program),
            Err(RuntimeError::ReturnType {
                ident: "f".to_string(),
                expected: Type::Int,
                found: Type::Bool,
            })
        );

        // `void` functions may hand back any value
        let program = Program {
            body: vec![Stmt::FnDef(def("main", Type::Void, Expr::IntLit(3)))],
        };
        assert_eq!(run(&program), Ok(Some(Value::Int(3))));
    }

    #[test]
    fn test_missing_main() {
        assert_eq!(
            run(&Program { body: vec![] }),
            Err(RuntimeError::MissingMain)
        );
    }

    #[test]
    fn test_eval() {
        let tokens = tokenize("-(1 + 2) * 3 < 0 == true;").unwrap();
        let (expr, _) = leo_parser::parse_bare_expr(&tokens).unwrap();
        assert_eq!(eval(&expr), Ok(Value::Bool(true)));
    }

    #[test]
    fn test_panic_is_contained() {
        assert_eq!(
            guarded::<()>(|| panic!("stack smashed")),
            Err(RuntimeError::Internal("stack smashed".to_string()))
        );
    }

    #[test]
    fn test_deterministic() {
        let source = "fn main() int { return (1 + 2) * 3 - 4 / 2; }";
        assert_eq!(run_source(source), Ok(Some(Value::Int(7))));
        assert_eq!(run_source(source), run_source(source));
    }
}
