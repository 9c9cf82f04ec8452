//! Visitor pattern for AST nodes.

use crate::ast::{Expr, FnDef, Stmt};

pub trait Visitor<'ast>: Sized {
    fn visit_expr(&mut self, expr: &'ast Expr) {
        walk_expr(self, expr);
    }
    fn visit_stmt(&mut self, stmt: &'ast Stmt) {
        walk_stmt(self, stmt);
    }
    fn visit_fn_def(&mut self, def: &'ast FnDef) {
        walk_fn_def(self, def);
    }
}

pub fn walk_expr<'ast>(visitor: &mut impl Visitor<'ast>, expr: &'ast Expr) {
    match expr {
        Expr::IntLit(_) => {}
        Expr::BoolLit(_) => {}
        Expr::Identifier(_) => {}
        Expr::FnCall { ident: _, args } => {
            for arg in args {
                visitor.visit_expr(arg);
            }
        }
        Expr::Binary { lhs, rhs, .. } => {
            visitor.visit_expr(lhs);
            visitor.visit_expr(rhs);
        }
        Expr::Unary { op: _, arg } => visitor.visit_expr(arg),
    }
}

pub fn walk_stmt<'ast>(visitor: &mut impl Visitor<'ast>, stmt: &'ast Stmt) {
    match stmt {
        Stmt::VarDecl { initializer, .. } => visitor.visit_expr(initializer),
        Stmt::Assignment { ident: _, value } => visitor.visit_expr(value),
        Stmt::Return(Some(expr)) => visitor.visit_expr(expr),
        Stmt::Return(None) => {}
        Stmt::FnDef(def) => visitor.visit_fn_def(def),
        Stmt::ExprStmt(expr) => visitor.visit_expr(expr),
    }
}

pub fn walk_fn_def<'ast>(visitor: &mut impl Visitor<'ast>, def: &'ast FnDef) {
    for stmt in &def.body {
        visitor.visit_stmt(stmt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse_file, tokenize};

    #[derive(Default)]
    struct Counter {
        exprs: usize,
        stmts: usize,
        fns: Vec<String>,
    }

    impl<'ast> Visitor<'ast> for Counter {
        fn visit_expr(&mut self, expr: &'ast Expr) {
            self.exprs += 1;
            walk_expr(self, expr);
        }
        fn visit_stmt(&mut self, stmt: &'ast Stmt) {
            self.stmts += 1;
            walk_stmt(self, stmt);
        }
        fn visit_fn_def(&mut self, def: &'ast FnDef) {
            self.fns.push(def.ident.clone());
            walk_fn_def(self, def);
        }
    }

    #[test]
    fn test_walks_nested_functions() {
        let tokens = tokenize(
            r#"
            var a = 1;
            fn main() int {
                fn inner(int x) int { return -x; }
                return inner(a + 2);
            }"#,
        )
        .unwrap();
        let program = parse_file(&tokens).unwrap();

        let mut counter = Counter::default();
        for stmt in &program.body {
            counter.visit_stmt(stmt);
        }
        assert_eq!(counter.fns, vec!["main", "inner"]);
        // 2 globals, 2 in main, 1 in inner
        assert_eq!(counter.stmts, 5);
        // `1`, `-x`, `x`, `inner(a + 2)`, `a + 2`, `a`, `2`
        assert_eq!(counter.exprs, 7);
    }
}
