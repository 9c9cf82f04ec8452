//! Static scopes used while parsing.

use std::collections::HashMap;

use leo_source::Span;
use leo_value::Type;

use crate::ast::Argument;
use crate::error::{ParseError, ParseResult, SymbolKind};

/// The part of a function definition callers need: its name, parameters and return type.
#[derive(Debug, Clone, PartialEq)]
pub struct FnSignature {
    pub ident: String,
    pub params: Vec<Argument>,
    pub return_type: Type,
}

/// A lexical scope mapping names to declarations.
///
/// Variables and functions live in separate namespaces. Lookups walk outward through
/// `parent`, which is only ever read.
#[derive(Debug, Default)]
pub struct Scope<'p> {
    parent: Option<&'p Scope<'p>>,
    vars: HashMap<String, Type>,
    fns: HashMap<String, FnSignature>,
}

impl<'p> Scope<'p> {
    pub fn new(parent: Option<&'p Scope<'p>>) -> Self {
        Self {
            parent,
            vars: HashMap::new(),
            fns: HashMap::new(),
        }
    }

    pub fn parent(&self) -> Option<&'p Scope<'p>> {
        self.parent
    }

    pub fn declare_var(&mut self, ident: &str, ty: Type, span: Span) -> ParseResult<()> {
        if self.vars.contains_key(ident) {
            return Err(ParseError::Redeclared {
                kind: SymbolKind::Variable,
                name: ident.to_string(),
                span,
            });
        }
        self.vars.insert(ident.to_string(), ty);
        Ok(())
    }

    pub fn declare_fn(&mut self, signature: FnSignature, span: Span) -> ParseResult<()> {
        if self.fns.contains_key(&signature.ident) {
            return Err(ParseError::Redeclared {
                kind: SymbolKind::Function,
                name: signature.ident,
                span,
            });
        }
        self.fns.insert(signature.ident.clone(), signature);
        Ok(())
    }

    /// Resolves a variable's type, innermost declaration first.
    pub fn resolve_var(&self, ident: &str) -> Option<Type> {
        match self.vars.get(ident) {
            Some(ty) => Some(*ty),
            None => self.parent.and_then(|parent| parent.resolve_var(ident)),
        }
    }

    /// Resolves a variable declared in this exact scope.
    pub fn resolve_local_var(&self, ident: &str) -> Option<Type> {
        self.vars.get(ident).copied()
    }

    pub fn resolve_fn(&self, ident: &str) -> Option<&FnSignature> {
        match self.fns.get(ident) {
            Some(signature) => Some(signature),
            None => self.parent.and_then(|parent| parent.resolve_fn(ident)),
        }
    }
}
