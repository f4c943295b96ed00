//! In-memory graph document
//!
//! The document owns every graph and node and hands out handles. Nodes
//! live in exactly one graph; composite nodes additionally own a nested
//! graph whose interface port definitions decide the composite's ports.
//!
//! Edges only ever join a free output to a free input of a compatible
//! type. Removing a node removes its edges and, recursively, its body.

use crate::core::geometry::Vec2;
use crate::core::id::{DefinitionId, GraphId, NodeId};
use crate::core::node::{
    NodeKind, NodeSpec, PortDefinitionSpec, PortKind, ValueInputPort, ValueOutputPort,
};
use crate::core::value::{Value, ValueType};
use crate::core::variables::{VariableDeclarations, VariableScope};
use std::collections::BTreeMap;
use tracing::debug;

/// Value labels longer than this are hidden on the node
pub const MAX_LABEL_LENGTH: usize = 6;

/// Whether a definition label should be hidden when drawn
pub fn hides_label(kind: PortKind, label: &str) -> bool {
    match kind {
        PortKind::ValueInput | PortKind::ValueOutput => label.chars().count() > MAX_LABEL_LENGTH,
        PortKind::ControlInput => label == "Enter",
        PortKind::ControlOutput => label == "Exit",
    }
}

/// Interface port of a graph body
#[derive(Debug, Clone, PartialEq)]
pub struct PortDefinition {
    pub id: DefinitionId,
    pub kind: PortKind,
    pub key: String,
    pub label: String,
    pub hide_label: bool,
    pub ty: ValueType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    Control,
    Value,
}

/// Connection from an output port to an input port of the same graph
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub kind: EdgeKind,
    pub source: NodeId,
    pub output: String,
    pub target: NodeId,
    pub input: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    /// Graph this node is placed in
    pub graph: GraphId,
    pub kind: NodeKind,
    pub title: String,
    pub position: Vec2,
    pub control_inputs: Vec<String>,
    pub control_outputs: Vec<String>,
    pub value_inputs: Vec<ValueInputPort>,
    pub value_outputs: Vec<ValueOutputPort>,
    /// Nested graph of a composite node
    pub body: Option<GraphId>,
}

impl Node {
    pub fn value_input(&self, key: &str) -> Option<&ValueInputPort> {
        self.value_inputs.iter().find(|p| p.key == key)
    }

    pub fn value_output(&self, key: &str) -> Option<&ValueOutputPort> {
        self.value_outputs.iter().find(|p| p.key == key)
    }

    /// All input keys, control first
    pub fn input_keys(&self) -> impl Iterator<Item = &str> {
        self.control_inputs
            .iter()
            .map(String::as_str)
            .chain(self.value_inputs.iter().map(|p| p.key.as_str()))
    }

    /// All output keys, control first
    pub fn output_keys(&self) -> impl Iterator<Item = &str> {
        self.control_outputs
            .iter()
            .map(String::as_str)
            .chain(self.value_outputs.iter().map(|p| p.key.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Graph {
    pub id: GraphId,
    pub title: String,
    /// Composite node that embeds this graph, if any
    pub owner: Option<NodeId>,
    nodes: Vec<NodeId>,
    edges: Vec<Edge>,
    definitions: Vec<PortDefinition>,
    pub variables: VariableDeclarations,
}

impl Graph {
    fn new(id: GraphId, title: &str, owner: Option<NodeId>) -> Self {
        Self {
            id,
            title: title.to_string(),
            owner,
            nodes: Vec::new(),
            edges: Vec::new(),
            definitions: Vec::new(),
            variables: VariableDeclarations::new(),
        }
    }

    /// Nodes in insertion order
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn definitions(&self) -> &[PortDefinition] {
        &self.definitions
    }
}

/// The host graph model: graphs, nodes, selection, pointer and variables
#[derive(Debug, Clone)]
pub struct Document {
    graphs: BTreeMap<GraphId, Graph>,
    nodes: BTreeMap<NodeId, Node>,
    root: GraphId,
    /// Selected nodes; the first one anchors the prompt
    selection: Vec<NodeId>,
    pointer: Vec2,
    object_variables: VariableDeclarations,
    scene_variables: VariableDeclarations,
    application_variables: VariableDeclarations,
    saved_variables: VariableDeclarations,
    next_node: usize,
    next_graph: usize,
    next_definition: usize,
    revision: u64,
}

impl Document {
    /// Create a document with an empty open graph
    pub fn new(title: &str) -> Self {
        let root = GraphId(0);
        let mut graphs = BTreeMap::new();
        graphs.insert(root, Graph::new(root, title, None));
        Self {
            graphs,
            nodes: BTreeMap::new(),
            root,
            selection: Vec::new(),
            pointer: Vec2::ZERO,
            object_variables: VariableDeclarations::new(),
            scene_variables: VariableDeclarations::new(),
            application_variables: VariableDeclarations::new(),
            saved_variables: VariableDeclarations::new(),
            next_node: 0,
            next_graph: 1,
            next_definition: 0,
            revision: 0,
        }
    }

    /// The currently open top-level graph
    pub fn root(&self) -> GraphId {
        self.root
    }

    pub fn graph(&self, id: GraphId) -> Option<&Graph> {
        self.graphs.get(&id)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Nodes of one graph in insertion order
    pub fn nodes_in(&self, graph: GraphId) -> impl Iterator<Item = &Node> {
        self.graphs
            .get(&graph)
            .into_iter()
            .flat_map(|g| g.nodes.iter())
            .filter_map(|id| self.nodes.get(id))
    }

    /// Total number of nodes across all graphs
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn graph_count(&self) -> usize {
        self.graphs.len()
    }

    /// Bumped on every observable change
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// The primary selected node
    pub fn selection(&self) -> Option<NodeId> {
        self.selection.first().copied()
    }

    /// Every selected node, primary first
    pub fn selected(&self) -> &[NodeId] {
        &self.selection
    }

    /// Select a node, or clear the selection; unknown ids clear it
    pub fn select(&mut self, node: Option<NodeId>) {
        self.set_selection(node.into_iter().collect());
    }

    /// Replace the whole selection, dropping unknown and repeated ids
    pub fn set_selection(&mut self, nodes: Vec<NodeId>) {
        let mut selection = Vec::with_capacity(nodes.len());
        for id in nodes {
            if self.nodes.contains_key(&id) && !selection.contains(&id) {
                selection.push(id);
            }
        }
        self.selection = selection;
        self.revision += 1;
    }

    /// Add a node to the selection. Returns false for unknown or already
    /// selected nodes.
    pub fn extend_selection(&mut self, node: NodeId) -> bool {
        if !self.nodes.contains_key(&node) || self.selection.contains(&node) {
            return false;
        }
        self.selection.push(node);
        self.revision += 1;
        true
    }

    /// Select every node of `graph` in insertion order
    pub fn select_all(&mut self, graph: GraphId) {
        let nodes = self.graphs.get(&graph).map(|g| g.nodes.clone()).unwrap_or_default();
        self.set_selection(nodes);
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    pub fn set_pointer(&mut self, position: Vec2) {
        self.pointer = position;
    }

    pub fn set_position(&mut self, node: NodeId, position: Vec2) {
        if let Some(n) = self.nodes.get_mut(&node) {
            n.position = position;
            self.revision += 1;
        }
    }

    /// Instantiate a blueprint into `graph` at `position`
    pub fn add_node(&mut self, graph: GraphId, spec: NodeSpec, position: Vec2) -> Option<NodeId> {
        if !self.graphs.contains_key(&graph) {
            return None;
        }

        let id = NodeId(self.next_node);
        self.next_node += 1;

        let body = match spec.body {
            Some(body_spec) => {
                let body_id = GraphId(self.next_graph);
                self.next_graph += 1;
                let mut body = Graph::new(body_id, &body_spec.title, Some(id));
                for def in body_spec.definitions {
                    let def = self.make_definition(def);
                    body.definitions.push(def);
                }
                self.graphs.insert(body_id, body);
                Some(body_id)
            }
            None => None,
        };

        let node = Node {
            id,
            graph,
            kind: spec.kind,
            title: spec.title,
            position,
            control_inputs: spec.control_inputs,
            control_outputs: spec.control_outputs,
            value_inputs: spec.value_inputs,
            value_outputs: spec.value_outputs,
            body,
        };
        self.nodes.insert(id, node);
        if let Some(g) = self.graphs.get_mut(&graph) {
            g.nodes.push(id);
        }
        if let Some(body_id) = body {
            self.derive_composite_ports(body_id);
        }

        self.revision += 1;
        debug!("added {} to {}", id, graph);
        Some(id)
    }

    /// Remove a node with its edges and nested body
    pub fn remove_node(&mut self, id: NodeId) -> bool {
        let Some(node) = self.nodes.remove(&id) else {
            return false;
        };

        if let Some(body) = node.body {
            self.remove_graph(body);
        }

        if let Some(g) = self.graphs.get_mut(&node.graph) {
            g.nodes.retain(|n| *n != id);
            g.edges.retain(|e| e.source != id && e.target != id);
        }

        self.selection.retain(|n| *n != id);
        self.revision += 1;
        debug!("removed {}", id);
        true
    }

    fn remove_graph(&mut self, id: GraphId) {
        let Some(graph) = self.graphs.remove(&id) else {
            return;
        };
        for node in graph.nodes {
            self.remove_node(node);
        }
    }

    /// Whether any edge of `kind` ends at `node.key`
    pub fn input_connected(&self, node: NodeId, kind: EdgeKind, key: &str) -> bool {
        self.edges_touching(node)
            .any(|e| e.kind == kind && e.target == node && e.input == key)
    }

    /// Whether any edge of `kind` starts at `node.key`
    pub fn output_connected(&self, node: NodeId, kind: EdgeKind, key: &str) -> bool {
        self.edges_touching(node)
            .any(|e| e.kind == kind && e.source == node && e.output == key)
    }

    fn edges_touching(&self, node: NodeId) -> impl Iterator<Item = &Edge> {
        self.nodes
            .get(&node)
            .and_then(|n| self.graphs.get(&n.graph))
            .into_iter()
            .flat_map(|g| g.edges.iter())
    }

    /// Whether `source.output` could be wired to `target.input` right now
    pub fn can_connect(
        &self,
        kind: EdgeKind,
        source: NodeId,
        output: &str,
        target: NodeId,
        input: &str,
    ) -> bool {
        if source == target {
            return false;
        }
        let (Some(src), Some(dst)) = (self.nodes.get(&source), self.nodes.get(&target)) else {
            return false;
        };
        if src.graph != dst.graph {
            return false;
        }

        let ports_match = match kind {
            EdgeKind::Control => {
                src.control_outputs.iter().any(|k| k == output)
                    && dst.control_inputs.iter().any(|k| k == input)
            }
            EdgeKind::Value => match (src.value_output(output), dst.value_input(input)) {
                (Some(out), Some(inp)) => inp.ty.accepts(&out.ty),
                _ => false,
            },
        };

        ports_match
            && !self.output_connected(source, kind, output)
            && !self.input_connected(target, kind, input)
    }

    /// Add an edge if the ports are free and compatible
    pub fn connect(
        &mut self,
        kind: EdgeKind,
        source: NodeId,
        output: &str,
        target: NodeId,
        input: &str,
    ) -> bool {
        if !self.can_connect(kind, source, output, target, input) {
            return false;
        }
        let Some(graph) = self.nodes.get(&source).map(|n| n.graph) else {
            return false;
        };
        if let Some(g) = self.graphs.get_mut(&graph) {
            g.edges.push(Edge {
                kind,
                source,
                output: output.to_string(),
                target,
                input: input.to_string(),
            });
            self.revision += 1;
            return true;
        }
        false
    }

    /// Remove an edge equal to `edge`. Returns whether one was found.
    pub fn disconnect(&mut self, edge: &Edge) -> bool {
        let Some(graph) = self.nodes.get(&edge.source).map(|n| n.graph) else {
            return false;
        };
        let Some(g) = self.graphs.get_mut(&graph) else {
            return false;
        };
        let Some(at) = g.edges.iter().position(|e| e == edge) else {
            return false;
        };
        g.edges.remove(at);
        self.revision += 1;
        true
    }

    /// Overwrite the inline default of a value input.
    ///
    /// Returns the previous value, or `None` when the input does not exist or
    /// cannot hold a default.
    pub fn set_default(&mut self, node: NodeId, key: &str, value: Value) -> Option<Value> {
        let port = self
            .nodes
            .get_mut(&node)?
            .value_inputs
            .iter_mut()
            .find(|p| p.key == key)?;
        let previous = port.default.as_mut()?;
        let old = std::mem::replace(previous, value);
        self.revision += 1;
        Some(old)
    }

    fn make_definition(&mut self, spec: PortDefinitionSpec) -> PortDefinition {
        let id = DefinitionId(self.next_definition);
        self.next_definition += 1;
        PortDefinition {
            id,
            kind: spec.kind,
            hide_label: hides_label(spec.kind, &spec.label),
            key: spec.key,
            label: spec.label,
            ty: spec.ty,
        }
    }

    /// Append an interface port definition and notify the graph
    pub fn add_definition(&mut self, graph: GraphId, spec: PortDefinitionSpec) -> Option<DefinitionId> {
        if !self.graphs.contains_key(&graph) {
            return None;
        }
        let def = self.make_definition(spec);
        let id = def.id;
        if let Some(g) = self.graphs.get_mut(&graph) {
            g.definitions.push(def);
        }
        self.port_definitions_changed(graph);
        Some(id)
    }

    /// Remove an interface port definition and notify the graph
    pub fn remove_definition(&mut self, graph: GraphId, id: DefinitionId) -> bool {
        let Some(g) = self.graphs.get_mut(&graph) else {
            return false;
        };
        let before = g.definitions.len();
        g.definitions.retain(|d| d.id != id);
        if g.definitions.len() == before {
            return false;
        }
        self.port_definitions_changed(graph);
        true
    }

    /// Port-definition change notification: re-derive the owner's ports
    pub fn port_definitions_changed(&mut self, graph: GraphId) {
        self.derive_composite_ports(graph);
        self.revision += 1;
    }

    fn derive_composite_ports(&mut self, graph: GraphId) {
        let Some(g) = self.graphs.get(&graph) else {
            return;
        };
        let Some(owner) = g.owner else {
            return;
        };
        let definitions = g.definitions.clone();
        let Some(node) = self.nodes.get_mut(&owner) else {
            return;
        };

        let of_kind = |kind: PortKind| definitions.iter().filter(move |d| d.kind == kind);
        node.control_inputs = of_kind(PortKind::ControlInput).map(|d| d.key.clone()).collect();
        node.control_outputs = of_kind(PortKind::ControlOutput).map(|d| d.key.clone()).collect();
        node.value_inputs = of_kind(PortKind::ValueInput)
            .map(|d| ValueInputPort {
                key: d.key.clone(),
                ty: d.ty.clone(),
                default: None,
            })
            .collect();
        node.value_outputs = of_kind(PortKind::ValueOutput)
            .map(|d| ValueOutputPort {
                key: d.key.clone(),
                ty: d.ty.clone(),
            })
            .collect();

        let parent = node.graph;
        let inputs: Vec<String> = node.input_keys().map(str::to_string).collect();
        let outputs: Vec<String> = node.output_keys().map(str::to_string).collect();
        if let Some(p) = self.graphs.get_mut(&parent) {
            p.edges.retain(|e| {
                !(e.target == owner && !inputs.contains(&e.input)
                    || e.source == owner && !outputs.contains(&e.output))
            });
        }
    }

    /// Declarations for `scope`; graph scope is resolved against `graph`
    pub fn variables(&self, scope: VariableScope, graph: GraphId) -> Option<&VariableDeclarations> {
        match scope {
            VariableScope::Graph => self.graphs.get(&graph).map(|g| &g.variables),
            VariableScope::Object => Some(&self.object_variables),
            VariableScope::Scene => Some(&self.scene_variables),
            VariableScope::Application => Some(&self.application_variables),
            VariableScope::Saved => Some(&self.saved_variables),
        }
    }

    pub fn variables_mut(
        &mut self,
        scope: VariableScope,
        graph: GraphId,
    ) -> Option<&mut VariableDeclarations> {
        self.revision += 1;
        match scope {
            VariableScope::Graph => self.graphs.get_mut(&graph).map(|g| &mut g.variables),
            VariableScope::Object => Some(&mut self.object_variables),
            VariableScope::Scene => Some(&mut self.scene_variables),
            VariableScope::Application => Some(&mut self.application_variables),
            VariableScope::Saved => Some(&mut self.saved_variables),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::node::GraphSpec;

    fn adder() -> NodeSpec {
        NodeSpec::new(NodeKind::Unit("Flow.Math.ScalarSum".into()), "Add")
            .control_in("enter")
            .control_out("exit")
            .value_in("a", ValueType::Float, Some(Value::Float(0.0)))
            .value_in("b", ValueType::Float, Some(Value::Float(0.0)))
            .value_out("sum", ValueType::Float)
    }

    #[test]
    fn test_add_and_remove_node() {
        let mut doc = Document::new("Main");
        let root = doc.root();
        let a = doc.add_node(root, adder(), Vec2::ZERO).unwrap();
        assert_eq!(doc.node_count(), 1);
        assert_eq!(doc.graph(root).unwrap().nodes(), &[a]);
        assert!(doc.remove_node(a));
        assert!(!doc.remove_node(a));
        assert_eq!(doc.node_count(), 0);
    }

    #[test]
    fn test_connect_rules() {
        let mut doc = Document::new("Main");
        let root = doc.root();
        let a = doc.add_node(root, adder(), Vec2::ZERO).unwrap();
        let b = doc.add_node(root, adder(), Vec2::ZERO).unwrap();

        assert!(doc.connect(EdgeKind::Value, a, "sum", b, "a"));
        // Input already taken
        assert!(!doc.connect(EdgeKind::Value, a, "sum", b, "a"));
        // Output already taken
        assert!(!doc.connect(EdgeKind::Value, a, "sum", b, "b"));
        assert!(doc.connect(EdgeKind::Control, a, "exit", b, "enter"));
        assert!(doc.input_connected(b, EdgeKind::Control, "enter"));
        assert!(!doc.connect(EdgeKind::Value, a, "missing", b, "b"));
        assert!(!doc.connect(EdgeKind::Value, b, "sum", b, "b"));
        assert_eq!(doc.graph(root).unwrap().edges().len(), 2);

        doc.remove_node(a);
        assert!(doc.graph(root).unwrap().edges().is_empty());
    }

    #[test]
    fn test_type_mismatch_blocks_connection() {
        let mut doc = Document::new("Main");
        let root = doc.root();
        let text = NodeSpec::new(NodeKind::Literal(ValueType::String), "String")
            .value_out("output", ValueType::String);
        let s = doc.add_node(root, text, Vec2::ZERO).unwrap();
        let a = doc.add_node(root, adder(), Vec2::ZERO).unwrap();
        assert!(!doc.can_connect(EdgeKind::Value, s, "output", a, "a"));
    }

    #[test]
    fn test_selection_cleared_on_remove() {
        let mut doc = Document::new("Main");
        let root = doc.root();
        let a = doc.add_node(root, adder(), Vec2::ZERO).unwrap();
        doc.select(Some(a));
        assert_eq!(doc.selection(), Some(a));
        doc.remove_node(a);
        assert_eq!(doc.selection(), None);
        doc.select(Some(a));
        assert_eq!(doc.selection(), None);
    }

    #[test]
    fn test_multi_selection() {
        let mut doc = Document::new("Main");
        let root = doc.root();
        let a = doc.add_node(root, adder(), Vec2::ZERO).unwrap();
        let b = doc.add_node(root, adder(), Vec2::ZERO).unwrap();
        let c = doc.add_node(root, adder(), Vec2::ZERO).unwrap();

        doc.select(Some(b));
        assert!(doc.extend_selection(a));
        assert!(!doc.extend_selection(a));
        assert!(!doc.extend_selection(NodeId(99)));
        assert_eq!(doc.selected(), &[b, a]);
        assert_eq!(doc.selection(), Some(b));

        doc.remove_node(b);
        assert_eq!(doc.selection(), Some(a));

        doc.select_all(root);
        assert_eq!(doc.selected(), &[a, c]);
        doc.set_selection(vec![c, c, NodeId(42)]);
        assert_eq!(doc.selected(), &[c]);
    }

    #[test]
    fn test_disconnect() {
        let mut doc = Document::new("Main");
        let root = doc.root();
        let a = doc.add_node(root, adder(), Vec2::ZERO).unwrap();
        let b = doc.add_node(root, adder(), Vec2::ZERO).unwrap();
        assert!(doc.connect(EdgeKind::Value, a, "sum", b, "a"));
        let edge = doc.graph(root).unwrap().edges()[0].clone();
        assert!(doc.disconnect(&edge));
        assert!(!doc.disconnect(&edge));
        assert!(doc.can_connect(EdgeKind::Value, a, "sum", b, "a"));
    }

    #[test]
    fn test_set_default_requires_capable_input() {
        let mut doc = Document::new("Main");
        let root = doc.root();
        let spec = adder().value_in("target", ValueType::Object, None);
        let a = doc.add_node(root, spec, Vec2::ZERO).unwrap();
        assert_eq!(doc.set_default(a, "a", Value::Float(5.0)), Some(Value::Float(0.0)));
        assert_eq!(
            doc.node(a).unwrap().value_input("a").unwrap().default,
            Some(Value::Float(5.0))
        );
        assert_eq!(doc.set_default(a, "target", Value::Float(1.0)), None);
        assert_eq!(doc.set_default(a, "nope", Value::Float(1.0)), None);
    }

    #[test]
    fn test_composite_ports_follow_definitions() {
        let mut doc = Document::new("Main");
        let root = doc.root();
        let body = GraphSpec::new("Mover")
            .define(PortKind::ControlInput, "enter", "Enter")
            .define(PortKind::ControlOutput, "exit", "Exit");
        let sub = doc.add_node(root, NodeSpec::composite(None, body), Vec2::ZERO).unwrap();
        let node = doc.node(sub).unwrap();
        assert_eq!(node.control_inputs, vec!["enter".to_string()]);
        assert_eq!(node.control_outputs, vec!["exit".to_string()]);
        let body = node.body.unwrap();
        assert!(doc.graph(body).unwrap().definitions()[0].hide_label);

        let def = doc
            .add_definition(
                body,
                PortDefinitionSpec {
                    kind: PortKind::ValueInput,
                    key: "speed".into(),
                    label: "Speed".into(),
                    ty: ValueType::Object,
                },
            )
            .unwrap();
        assert_eq!(doc.node(sub).unwrap().value_inputs[0].key, "speed");

        let lit = NodeSpec::new(NodeKind::Literal(ValueType::Float), "Float")
            .value_out("output", ValueType::Float);
        let l = doc.add_node(root, lit, Vec2::ZERO).unwrap();
        assert!(doc.connect(EdgeKind::Value, l, "output", sub, "speed"));

        assert!(doc.remove_definition(body, def));
        assert!(doc.node(sub).unwrap().value_inputs.is_empty());
        // Edge to the vanished port is dropped
        assert!(doc.graph(root).unwrap().edges().is_empty());
    }

    #[test]
    fn test_remove_composite_drops_body() {
        let mut doc = Document::new("Main");
        let root = doc.root();
        let sub = doc
            .add_node(root, NodeSpec::composite(None, GraphSpec::new("Body")), Vec2::ZERO)
            .unwrap();
        let body = doc.node(sub).unwrap().body.unwrap();
        doc.add_node(body, adder(), Vec2::ZERO).unwrap();
        assert_eq!(doc.node_count(), 2);
        assert_eq!(doc.graph_count(), 2);
        doc.remove_node(sub);
        assert_eq!(doc.node_count(), 0);
        assert_eq!(doc.graph_count(), 1);
    }

    #[test]
    fn test_hides_label() {
        assert!(hides_label(PortKind::ValueInput, "Velocity"));
        assert!(!hides_label(PortKind::ValueOutput, "Speed"));
        assert!(hides_label(PortKind::ControlInput, "Enter"));
        assert!(!hides_label(PortKind::ControlInput, "Begin"));
        assert!(hides_label(PortKind::ControlOutput, "Exit"));
    }

    #[test]
    fn test_variable_scopes() {
        let mut doc = Document::new("Main");
        let root = doc.root();
        doc.variables_mut(VariableScope::Scene, root)
            .unwrap()
            .set("score", Value::Int(3));
        assert!(doc.variables(VariableScope::Scene, root).unwrap().is_defined("score"));
        assert!(!doc.variables(VariableScope::Graph, root).unwrap().is_defined("score"));
        assert!(doc.variables(VariableScope::Graph, GraphId(99)).is_none());
    }
}
