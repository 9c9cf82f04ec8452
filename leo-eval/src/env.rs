//! Runtime scope chain.

use std::collections::HashMap;

use leo_parser::ast::FnDef;
use leo_value::Value;

use crate::error::{RuntimeError, RuntimeResult};

/// Values and functions visible to the code being evaluated.
///
/// `'p` is the lifetime of the parent link and `'ast` the lifetime of the program the
/// functions come from. The parent is only ever read.
#[derive(Debug, Default)]
pub struct Env<'p, 'ast> {
    parent: Option<&'p Env<'p, 'ast>>,
    vars: HashMap<String, Value>,
    fns: HashMap<String, &'ast FnDef>,
}

impl<'p, 'ast> Env<'p, 'ast> {
    pub fn new(parent: Option<&'p Env<'p, 'ast>>) -> Self {
        Self {
            parent,
            vars: HashMap::new(),
            fns: HashMap::new(),
        }
    }

    /// Declares a variable in this exact scope.
    pub fn declare(&mut self, ident: &str, value: Value) -> RuntimeResult<()> {
        if self.vars.contains_key(ident) {
            return Err(RuntimeError::Redeclared(ident.to_string()));
        }
        self.vars.insert(ident.to_string(), value);
        Ok(())
    }

    /// Overwrites a variable declared in this exact scope.
    pub fn assign(&mut self, ident: &str, value: Value) -> RuntimeResult<()> {
        match self.vars.get_mut(ident) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(RuntimeError::AssignOutsideScope(ident.to_string())),
        }
    }

    pub fn get(&self, ident: &str) -> RuntimeResult<Value> {
        match self.vars.get(ident) {
            Some(value) => Ok(*value),
            None => match self.parent {
                Some(parent) => parent.get(ident),
                None => Err(RuntimeError::UndefinedVariable(ident.to_string())),
            },
        }
    }

    /// Registers a function. A later definition with the same name replaces the earlier one;
    /// duplicates are rejected by the parser.
    pub fn define_fn(&mut self, def: &'ast FnDef) {
        self.fns.insert(def.ident.clone(), def);
    }

    pub fn resolve_fn(&self, ident: &str) -> RuntimeResult<&'ast FnDef> {
        match self.fns.get(ident) {
            Some(def) => Ok(*def),
            None => match self.parent {
                Some(parent) => parent.resolve_fn(ident),
                None => Err(RuntimeError::UndefinedFunction(ident.to_string())),
            },
        }
    }
}
