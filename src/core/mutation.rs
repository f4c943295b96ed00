//! Graph mutation primitives
//!
//! `EditContext` bundles the document with the open session's bookkeeping
//! (journal, creation stack, feedback). Every primitive that changes the
//! document goes through here so the journal always sees it.

use crate::core::catalog::Catalog;
use crate::core::graph::{Document, Edge, EdgeKind, Node};
use crate::core::geometry::Vec2;
use crate::core::id::{DefinitionId, GraphId, NodeId};
use crate::core::journal::{JournalEntry, SessionJournal};
use crate::core::layout;
use crate::core::node::{NodeSpec, PortDefinitionSpec, PortKind};
use crate::core::value::{Value, ValueType};
use crate::core::variables::VariableScope;
use tracing::{debug, trace};

/// What the session shows the user besides the graph itself
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Feedback {
    /// Completion hint for the last token
    pub hint: Option<String>,
    /// Lines written by commands such as `showall:`
    pub output: Vec<String>,
}

impl Feedback {
    pub fn clear(&mut self) {
        self.hint = None;
        self.output.clear();
    }
}

/// Mutable view handed to every intent while it executes
pub struct EditContext<'a> {
    pub doc: &'a mut Document,
    pub catalog: &'a Catalog,
    pub journal: &'a mut SessionJournal,
    /// Nodes created this keystroke, oldest first
    pub stack: &'a mut Vec<NodeId>,
    pub feedback: &'a mut Feedback,
}

impl<'a> EditContext<'a> {
    /// The selected node, if it still exists
    pub fn anchor(&self) -> Option<&Node> {
        self.doc.selection().and_then(|id| self.doc.node(id))
    }

    /// Create a node next to the selection and wire it up.
    ///
    /// With no selection the node lands at the pointer in the open graph.
    /// Otherwise it joins the anchor's graph on the requested side, unless
    /// only the opposite side can be wired. The new node becomes the
    /// selection and is pushed on the creation stack.
    pub fn create_node(&mut self, spec: NodeSpec, attach_left: bool) -> Option<NodeId> {
        let anchor = self.anchor().cloned();
        let graph = anchor.as_ref().map_or(self.doc.root(), |a| a.graph);
        let start = anchor.as_ref().map_or(self.doc.pointer(), |a| a.position);

        let title = spec.title.clone();
        let id = self.doc.add_node(graph, spec, start)?;
        self.journal.record(JournalEntry::NodeCreated { node: id });

        if let Some(anchor) = anchor {
            let mut left = attach_left;
            if left && !self.can_feed(id, anchor.id) && self.can_feed(anchor.id, id) {
                left = false;
            } else if !self.can_feed(anchor.id, id) && self.can_feed(id, anchor.id) {
                left = true;
            }

            self.doc.set_position(id, layout::beside(&anchor, left));
            let edges = if left {
                self.connect_nodes(id, anchor.id)
            } else {
                self.connect_nodes(anchor.id, id)
            };
            debug!(
                "created {} {} of {} with {} edges",
                title,
                if left { "left" } else { "right" },
                anchor.title,
                edges
            );
        } else {
            debug!("created {} at pointer", title);
        }

        layout::space_out(self.doc, id);
        self.doc.select(Some(id));
        self.stack.push(id);
        Some(id)
    }

    /// Whether anything of `source` could be wired into `target`
    pub fn can_feed(&self, source: NodeId, target: NodeId) -> bool {
        let (Some(src), Some(dst)) = (self.doc.node(source), self.doc.node(target)) else {
            return false;
        };

        let control = src.control_outputs.iter().any(|out| {
            dst.control_inputs
                .iter()
                .any(|inp| self.doc.can_connect(EdgeKind::Control, source, out, target, inp))
        });
        let value = src.value_outputs.iter().any(|out| {
            dst.value_inputs
                .iter()
                .any(|inp| self.doc.can_connect(EdgeKind::Value, source, &out.key, target, &inp.key))
        });
        control || value
    }

    /// Wire `source` into `target`: the first free control output to a free
    /// control input, then every value output to the first compatible free
    /// value input. Returns the number of edges made.
    pub fn connect_nodes(&mut self, source: NodeId, target: NodeId) -> usize {
        self.wire(source, target).len()
    }

    /// Chain the selected nodes left to right, wiring each into its
    /// right-hand neighbour. Each edge is journaled since both ends
    /// outlive a rollback. Returns the number of edges made.
    pub fn connect_selection(&mut self) -> usize {
        let mut ordered: Vec<(NodeId, f32)> = self
            .doc
            .selected()
            .iter()
            .filter_map(|id| self.doc.node(*id).map(|n| (*id, n.position.x)))
            .collect();
        ordered.sort_by(|a, b| a.1.total_cmp(&b.1));

        let mut made = 0;
        for pair in ordered.windows(2) {
            for edge in self.wire(pair[0].0, pair[1].0) {
                self.journal.record(JournalEntry::EdgeConnected { edge });
                made += 1;
            }
        }
        debug!("connected {} selected nodes with {} edges", ordered.len(), made);
        made
    }

    fn wire(&mut self, source: NodeId, target: NodeId) -> Vec<Edge> {
        let (Some(src), Some(dst)) = (self.doc.node(source), self.doc.node(target)) else {
            return Vec::new();
        };
        let control_out = src
            .control_outputs
            .iter()
            .find(|k| !self.doc.output_connected(source, EdgeKind::Control, k))
            .cloned();
        let control_inputs = dst.control_inputs.clone();
        let value_outputs: Vec<String> = src.value_outputs.iter().map(|p| p.key.clone()).collect();
        let value_inputs: Vec<String> = dst.value_inputs.iter().map(|p| p.key.clone()).collect();

        let mut made = Vec::new();
        if let Some(out) = control_out {
            let free = control_inputs
                .iter()
                .find(|inp| self.doc.can_connect(EdgeKind::Control, source, &out, target, inp));
            if let Some(inp) = free {
                if self.doc.connect(EdgeKind::Control, source, &out, target, inp) {
                    made.push(Edge {
                        kind: EdgeKind::Control,
                        source,
                        output: out.clone(),
                        target,
                        input: inp.clone(),
                    });
                }
            }
        }

        for out in &value_outputs {
            let free = value_inputs
                .iter()
                .find(|inp| self.doc.can_connect(EdgeKind::Value, source, out, target, inp))
                .cloned();
            if let Some(inp) = free {
                if self.doc.connect(EdgeKind::Value, source, out, target, &inp) {
                    made.push(Edge {
                        kind: EdgeKind::Value,
                        source,
                        output: out.clone(),
                        target,
                        input: inp,
                    });
                }
            }
        }
        made
    }

    /// Graph that port commands edit: the selected composite's body, else
    /// the open graph
    pub fn resolve_edit_target(&self) -> GraphId {
        self.anchor()
            .and_then(|n| n.body)
            .unwrap_or_else(|| self.doc.root())
    }

    /// Add an interface port to `graph`; the key is the lowercased name
    pub fn add_port_definition(
        &mut self,
        graph: GraphId,
        kind: PortKind,
        name: &str,
    ) -> Option<DefinitionId> {
        let spec = PortDefinitionSpec {
            kind,
            key: name.to_lowercase(),
            label: name.to_string(),
            ty: ValueType::Object,
        };
        let definition = self.doc.add_definition(graph, spec)?;
        self.journal
            .record(JournalEntry::PortDefinitionAdded { graph, definition });
        debug!("defined {} {} on {}", kind, name, graph);
        Some(definition)
    }

    /// Declare `name` in `scope` unless it already exists.
    ///
    /// Returns whether it was already defined, or `None` when the scope
    /// cannot be reached from `graph`.
    pub fn declare_variable(
        &mut self,
        scope: VariableScope,
        graph: GraphId,
        name: &str,
        ty: &ValueType,
    ) -> Option<bool> {
        let vars = self.doc.variables_mut(scope, graph)?;
        let was_defined = vars.is_defined(name);
        if !was_defined {
            vars.set(name, Value::default_for(ty));
            trace!("declared {} variable {}", scope, name);
        }
        self.journal.record(JournalEntry::VariableDeclared {
            scope,
            graph,
            name: name.to_string(),
            was_defined,
        });
        Some(was_defined)
    }

    /// Place a helper node without selecting it or touching the stack
    pub fn place_accessor(&mut self, graph: GraphId, spec: NodeSpec, position: Vec2) -> Option<NodeId> {
        let id = self.doc.add_node(graph, spec, position)?;
        self.journal.record(JournalEntry::NodeCreated { node: id });
        Some(id)
    }

    /// Overwrite an inline default, journaling the previous value
    pub fn set_default(&mut self, node: NodeId, key: &str, value: Value) -> bool {
        match self.doc.set_default(node, key, value) {
            Some(previous) => {
                self.journal.record(JournalEntry::DefaultValueSet {
                    node,
                    key: key.to_string(),
                    previous,
                });
                true
            }
            None => false,
        }
    }
}


// =============================================================================
// TESTS
// =============================================================================
