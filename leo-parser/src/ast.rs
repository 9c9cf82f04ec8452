use std::fmt;

use leo_source::Span;
use leo_value::Type;

/// Binding strength of binary operators, weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    LogicalOr,
    LogicalAnd,
    Equality,
    Relational,
    Additive,
    Multiplicative,
    /// Pinned on parenthesized sub-expressions so they are never re-associated.
    Paren,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    NotEq,
    Less,
    LessEq,
    Greater,
    GreaterEq,
    And,
    Or,
}

impl BinOp {
    pub fn precedence(self) -> Precedence {
        match self {
            BinOp::Or => Precedence::LogicalOr,
            BinOp::And => Precedence::LogicalAnd,
            BinOp::Eq | BinOp::NotEq => Precedence::Equality,
            BinOp::Less | BinOp::LessEq | BinOp::Greater | BinOp::GreaterEq => {
                Precedence::Relational
            }
            BinOp::Add | BinOp::Sub => Precedence::Additive,
            BinOp::Mul | BinOp::Div => Precedence::Multiplicative,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Eq => "==",
            BinOp::NotEq => "!=",
            BinOp::Less => "<",
            BinOp::LessEq => "<=",
            BinOp::Greater => ">",
            BinOp::GreaterEq => ">=",
            BinOp::And => "&&",
            BinOp::Or => "||",
        }
    }

    /// The static type every application of this operator produces.
    pub fn result_type(self) -> Type {
        match self {
            BinOp::Add | BinOp::Sub | BinOp::Mul | BinOp::Div => Type::Int,
            _ => Type::Bool,
        }
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Plus,
    Not,
}

impl UnaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Plus => "+",
            UnaryOp::Not => "!",
        }
    }
}

#[derive(Debug, Clone)]
pub enum Expr {
    IntLit(i64),
    BoolLit(bool),
    /// An identifier (e.g. `foo`).
    Identifier(String),
    /// A prefix operator application (e.g. `-a`).
    Unary { op: UnaryOp, arg: Box<Expr> },
    /// A binary expression (e.g. `1+1`).
    Binary {
        lhs: Box<Expr>,
        op: BinOp,
        rhs: Box<Expr>,
        /// The precedence this node was built at. Only meaningful while parsing.
        precedence: Precedence,
    },
    /// A function call (e.g. `foo(1, bar)`).
    FnCall { ident: String, args: Vec<Expr> },
}

impl Expr {
    pub fn binary(lhs: Expr, op: BinOp, rhs: Expr) -> Expr {
        Expr::Binary {
            lhs: Box::new(lhs),
            op,
            rhs: Box::new(rhs),
            precedence: op.precedence(),
        }
    }

    /// Merges `op rhs` into the tree rooted at `self`, keeping operator precedence intact.
    ///
    /// A weaker (or equal) operator becomes the new root. A stronger operator descends the
    /// right spine until it finds a weaker node or a leaf and rotates in there.
    pub fn priority_merge(self, op: BinOp, rhs: Expr) -> Expr {
        let precedence = op.precedence();
        match self {
            Expr::Binary {
                lhs,
                op: root_op,
                rhs: root_rhs,
                precedence: root_precedence,
            } if precedence > root_precedence => {
                let merged = match *root_rhs {
                    right @ Expr::Binary { .. } => right.priority_merge(op, rhs),
                    leaf => Expr::binary(leaf, op, rhs),
                };
                Expr::Binary {
                    lhs,
                    op: root_op,
                    rhs: Box::new(merged),
                    precedence: root_precedence,
                }
            }
            root => Expr::binary(root, op, rhs),
        }
    }

    /// Pins the precedence of a parenthesized binary expression so that enclosing operators
    /// treat it as a leaf.
    pub fn into_grouped(self) -> Expr {
        match self {
            Expr::Binary { lhs, op, rhs, .. } => Expr::Binary {
                lhs,
                op,
                rhs,
                precedence: Precedence::Paren,
            },
            expr => expr,
        }
    }
}

/// Structural equality. The parse-only `precedence` field is ignored.
impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Expr::IntLit(a), Expr::IntLit(b)) => a == b,
            (Expr::BoolLit(a), Expr::BoolLit(b)) => a == b,
            (Expr::Identifier(a), Expr::Identifier(b)) => a == b,
            (Expr::Unary { op: op_a, arg: a }, Expr::Unary { op: op_b, arg: b }) => {
                op_a == op_b && a == b
            }
            (
                Expr::Binary {
                    lhs: lhs_a,
                    op: op_a,
                    rhs: rhs_a,
                    ..
                },
                Expr::Binary {
                    lhs: lhs_b,
                    op: op_b,
                    rhs: rhs_b,
                    ..
                },
            ) => op_a == op_b && lhs_a == lhs_b && rhs_a == rhs_b,
            (
                Expr::FnCall {
                    ident: ident_a,
                    args: args_a,
                },
                Expr::FnCall {
                    ident: ident_b,
                    args: args_b,
                },
            ) => ident_a == ident_b && args_a == args_b,
            _ => false,
        }
    }
}

/// A typed function parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    pub ident: String,
    pub ty: Type,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FnDef {
    pub ident: String,
    /// Location of the function name.
    pub span: Span,
    pub params: Vec<Argument>,
    pub return_type: Type,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// `var a = 1;` or `int a = 1;`. `ty` is the declared or inferred type.
    VarDecl {
        ident: String,
        ty: Type,
        initializer: Expr,
    },
    /// `a = 1;`
    Assignment { ident: String, value: Expr },
    /// `return;` or `return expr;`
    Return(Option<Expr>),
    FnDef(FnDef),
    /// A call evaluated for its effect (e.g. `bar();`).
    ExprStmt(Expr),
}

/// A parsed source file. Contains exactly one top-level [`FnDef`] named `main`.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub body: Vec<Stmt>,
}

impl Program {
    /// Returns the top-level function named `ident`.
    pub fn function(&self, ident: &str) -> Option<&FnDef> {
        self.body.iter().find_map(|stmt| match stmt {
            Stmt::FnDef(def) if def.ident == ident => Some(def),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(val: i64) -> Expr {
        Expr::IntLit(val)
    }

    #[test]
    fn test_merge_lower_precedence_wraps() {
        // (1 * 2) + 3
        let root = Expr::binary(int(1), BinOp::Mul, int(2));
        let merged = root.priority_merge(BinOp::Add, int(3));
        assert_eq!(
            merged,
            Expr::binary(Expr::binary(int(1), BinOp::Mul, int(2)), BinOp::Add, int(3))
        );
    }

    #[test]
    fn test_merge_equal_precedence_is_left_associative() {
        let root = Expr::binary(int(1), BinOp::Sub, int(2));
        let merged = root.priority_merge(BinOp::Add, int(3));
        assert_eq!(
            merged,
            Expr::binary(Expr::binary(int(1), BinOp::Sub, int(2)), BinOp::Add, int(3))
        );
    }

    #[test]
    fn test_merge_higher_precedence_rotates() {
        // 1 + (2 * 3)
        let root = Expr::binary(int(1), BinOp::Add, int(2));
        let merged = root.priority_merge(BinOp::Mul, int(3));
        assert_eq!(
            merged,
            Expr::binary(int(1), BinOp::Add, Expr::binary(int(2), BinOp::Mul, int(3)))
        );
    }

    #[test]
    fn test_merge_descends_right_spine() {
        // 1 || 2 == 3, then `+ 4` must bind beneath `==`
        let root = Expr::binary(int(1), BinOp::Or, int(2)).priority_merge(BinOp::Eq, int(3));
        let merged = root.priority_merge(BinOp::Add, int(4));
        assert_eq!(
            merged,
            Expr::binary(
                int(1),
                BinOp::Or,
                Expr::binary(int(2), BinOp::Eq, Expr::binary(int(3), BinOp::Add, int(4)))
            )
        );
    }

    #[test]
    fn test_merge_grouped_is_atomic() {
        let grouped = Expr::binary(int(1), BinOp::Add, int(2)).into_grouped();
        let merged = grouped.priority_merge(BinOp::Mul, int(3));
        assert_eq!(
            merged,
            Expr::binary(Expr::binary(int(1), BinOp::Add, int(2)), BinOp::Mul, int(3))
        );
    }

    #[test]
    fn test_merge_into_non_binary_root() {
        let root = Expr::Unary {
            op: UnaryOp::Neg,
            arg: Box::new(int(1)),
        };
        let merged = root.clone().priority_merge(BinOp::Mul, int(2));
        assert_eq!(merged, Expr::binary(root, BinOp::Mul, int(2)));
    }

    #[test]
    fn test_eq_ignores_precedence() {
        let grouped = Expr::binary(int(1), BinOp::Add, int(2)).into_grouped();
        assert_eq!(grouped, Expr::binary(int(1), BinOp::Add, int(2)));
    }
}
