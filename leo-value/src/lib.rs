//! Static types and runtime values.

use std::fmt;

/// The static type of an expression or declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    Int,
    Bool,
    /// No value. Only used as the return type of functions.
    Void,
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Type::Int => "int",
            Type::Bool => "bool",
            Type::Void => "void",
        };
        f.write_str(name)
    }
}

/// A runtime value produced by evaluation.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Value {
    Int(i64),
    Bool(bool),
}

impl Value {
    /// Returns the static [`Type`] this value inhabits.
    pub fn ty(&self) -> Type {
        match self {
            Value::Int(_) => Type::Int,
            Value::Bool(_) => Type::Bool,
        }
    }

    /// Attempts to cast the `Value` into an `i64` or `None` if wrong type.
    pub fn cast_to_int(&self) -> Option<i64> {
        match self {
            Self::Int(val) => Some(*val),
            _ => None,
        }
    }

    /// Attempts to cast the `Value` into a `bool` or `None` if wrong type.
    pub fn cast_to_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(val) => Some(*val),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(val) => write!(f, "{}", val),
            Value::Bool(val) => write!(f, "{}", val),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_casts() {
        assert_eq!(Value::Int(3).cast_to_int(), Some(3));
        assert_eq!(Value::Int(3).cast_to_bool(), None);
        assert_eq!(Value::Bool(true).cast_to_bool(), Some(true));
        assert_eq!(Value::Bool(true).cast_to_int(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Int(-7).to_string(), "-7");
        assert_eq!(Value::Bool(false).to_string(), "false");
        assert_eq!(Type::Void.to_string(), "void");
        assert_eq!(Value::Bool(true).ty(), Type::Bool);
    }
}
