//! Session journal
//!
//! Every mutation made while a prompt session is open is recorded here so
//! it can be reversed. Rollback undoes entries newest first; commit simply
//! forgets them.

use crate::core::graph::{Document, Edge};
use crate::core::id::{DefinitionId, GraphId, NodeId};
use crate::core::value::Value;
use crate::core::variables::VariableScope;
use tracing::debug;

/// One reversible mutation
#[derive(Debug, Clone, PartialEq)]
pub enum JournalEntry {
    NodeCreated {
        node: NodeId,
    },
    PortDefinitionAdded {
        graph: GraphId,
        definition: DefinitionId,
    },
    VariableDeclared {
        scope: VariableScope,
        graph: GraphId,
        name: String,
        /// Declared before the session touched it; never removed on rollback
        was_defined: bool,
    },
    DefaultValueSet {
        node: NodeId,
        key: String,
        previous: Value,
    },
    /// Edge between nodes that existed before it
    EdgeConnected {
        edge: Edge,
    },
}

impl JournalEntry {
    /// Reverse this entry against the document
    fn revert(&self, doc: &mut Document) {
        match self {
            JournalEntry::NodeCreated { node } => {
                doc.remove_node(*node);
            }
            JournalEntry::PortDefinitionAdded { graph, definition } => {
                doc.remove_definition(*graph, *definition);
            }
            JournalEntry::VariableDeclared {
                scope,
                graph,
                name,
                was_defined,
            } => {
                if !*was_defined {
                    if let Some(vars) = doc.variables_mut(*scope, *graph) {
                        vars.remove(name);
                    }
                }
            }
            JournalEntry::DefaultValueSet {
                node,
                key,
                previous,
            } => {
                doc.set_default(*node, key, previous.clone());
            }
            JournalEntry::EdgeConnected { edge } => {
                doc.disconnect(edge);
            }
        }
    }
}

/// Ordered log of the open session's mutations
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionJournal {
    entries: Vec<JournalEntry>,
}

impl SessionJournal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, entry: JournalEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Undo every entry, newest first. Returns how many were reverted.
    pub fn rollback(&mut self, doc: &mut Document) -> usize {
        let count = self.entries.len();
        while let Some(entry) = self.entries.pop() {
            entry.revert(doc);
        }
        if count > 0 {
            debug!("rolled back {} journal entries", count);
        }
        count
    }

    /// Keep every mutation and forget the log. Returns how many were kept.
    pub fn commit(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        count
    }
}

// =============================================================================
// TESTS
// =============================================================================
