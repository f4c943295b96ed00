//! Variable declarations and scopes

use crate::core::value::Value;
use std::fmt;

/// Namespace a variable is declared in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableScope {
    /// Owned by a single graph
    Graph,
    /// Attached to the object the graph runs on
    Object,
    Scene,
    Application,
    /// Persisted between runs
    Saved,
}

impl VariableScope {
    pub const ALL: [VariableScope; 5] = [
        VariableScope::Graph,
        VariableScope::Object,
        VariableScope::Scene,
        VariableScope::Application,
        VariableScope::Saved,
    ];
}

impl fmt::Display for VariableScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariableScope::Graph => write!(f, "graph"),
            VariableScope::Object => write!(f, "object"),
            VariableScope::Scene => write!(f, "scene"),
            VariableScope::Application => write!(f, "app"),
            VariableScope::Saved => write!(f, "saved"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub name: String,
    pub value: Value,
}

/// Ordered set of declarations for one scope
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariableDeclarations {
    entries: Vec<Declaration>,
}

impl VariableDeclarations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_defined(&self, name: &str) -> bool {
        self.entries.iter().any(|d| d.name == name)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|d| d.name == name)
            .map(|d| &d.value)
    }

    /// Declare or overwrite `name`
    pub fn set(&mut self, name: &str, value: Value) {
        match self.entries.iter_mut().find(|d| d.name == name) {
            Some(existing) => existing.value = value,
            None => self.entries.push(Declaration {
                name: name.to_string(),
                value,
            }),
        }
    }

    /// Remove a declaration, keeping the order of the rest
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        let index = self.entries.iter().position(|d| d.name == name)?;
        Some(self.entries.remove(index).value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Declaration> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
