//! Unreachable code detection.
//!
//! Statements following a `return` in the same function body are still accepted by the
//! parser but never run. This pass reports them as warnings.

use leo_parser::ast::{FnDef, Program, Stmt};
use leo_parser::visitor::{walk_fn_def, Visitor};
use leo_source::{Diagnostic, Source};

pub struct UnreachableCode<'a> {
    source: &'a Source<'a>,
    /// Number of function bodies with unreachable statements.
    found: usize,
}

impl<'a> UnreachableCode<'a> {
    pub fn new(source: &'a Source<'a>) -> Self {
        Self { source, found: 0 }
    }

    /// Checks every function of `program`, nested functions included.
    /// Returns the number of function bodies that contain unreachable statements.
    pub fn check_program(&mut self, program: &Program) -> usize {
        for stmt in &program.body {
            self.visit_stmt(stmt);
        }
        self.found
    }
}

impl<'a, 'ast> Visitor<'ast> for UnreachableCode<'a> {
    fn visit_fn_def(&mut self, def: &'ast FnDef) {
        let first_return = def
            .body
            .iter()
            .position(|stmt| matches!(stmt, Stmt::Return(_)));

        if let Some(index) = first_return {
            let dead = def.body.len() - index - 1;
            if dead > 0 {
                tracing::warn!(function = %def.ident, statements = dead, "unreachable code");
                self.found += 1;
                self.source.diagnostics.add(Diagnostic::new(
                    format!(
                        "{} unreachable statement(s) after `return` in function `{}`",
                        dead, def.ident
                    ),
                    Some(def.span.clone()),
                ));
            }
        }

        walk_fn_def(self, def);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leo_parser::{parse_file, tokenize};

    fn check(content: &str) -> (usize, Vec<Diagnostic>) {
        let source = Source::new(content);
        let program = parse_file(&tokenize(content).unwrap()).unwrap();
        let found = UnreachableCode::new(&source).check_program(&program);
        (found, source.diagnostics.take())
    }

    #[test]
    fn test_reachable() {
        let (found, diagnostics) = check(
            r#"
            fn main() int {
                var a = 1;
                return a;
            }"#,
        );
        assert_eq!(found, 0);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_code_after_return() {
        let (found, diagnostics) = check(
            r#"
            fn main() int {
                return 1;
                var a = 2;
                return a;
            }"#,
        );
        assert_eq!(found, 1);
        assert_eq!(
            diagnostics[0].message(),
            "2 unreachable statement(s) after `return` in function `main`"
        );
        assert_eq!(diagnostics[0].span(), Some(&(16..20)));
        assert!(diagnostics[0].to_string().ends_with("at position 16"));
    }

    #[test]
    fn test_nested_functions() {
        let (found, diagnostics) = check(
            r#"
            fn main() {
                fn inner() int {
                    return 1;
                    return 2;
                }
                inner();
            }"#,
        );
        assert_eq!(found, 1);
        assert!(diagnostics[0].message().contains("`inner`"));
    }
}
