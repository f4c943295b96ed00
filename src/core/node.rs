//! Node blueprints
//!
//! Catalog factories return a `NodeSpec`; the document turns it into a
//! live `Node` with an id, a position and (for composites) a nested graph.

use crate::core::value::{Value, ValueType};
use crate::core::variables::VariableScope;
use std::fmt;

/// Direction and kind of a port or interface port definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortKind {
    ControlInput,
    ControlOutput,
    ValueInput,
    ValueOutput,
}

impl PortKind {
    pub fn is_value(&self) -> bool {
        matches!(self, PortKind::ValueInput | PortKind::ValueOutput)
    }
}

impl fmt::Display for PortKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortKind::ControlInput => write!(f, "control input"),
            PortKind::ControlOutput => write!(f, "control output"),
            PortKind::ValueInput => write!(f, "value input"),
            PortKind::ValueOutput => write!(f, "value output"),
        }
    }
}

/// How a member node touches its member
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberAccess {
    Construct,
    Invoke,
    Get,
    Set,
}

/// What a node is
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Built-in node type, by full type path
    Unit(String),
    /// Wraps a member of a host type
    Member {
        type_name: String,
        member: String,
        access: MemberAccess,
    },
    /// Constant of the given type
    Literal(ValueType),
    /// Composite node with a nested graph, optionally instanced from an asset
    Subgraph { asset: Option<String> },
    GetVariable(VariableScope),
    SetVariable(VariableScope),
    /// Neutral stand-in for a factory that failed
    Null,
}

impl NodeKind {
    pub fn is_composite(&self) -> bool {
        matches!(self, NodeKind::Subgraph { .. })
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Unit(path) => write!(f, "unit {}", path),
            NodeKind::Member {
                type_name,
                member,
                access,
            } => write!(f, "{:?} {}.{}", access, type_name, member),
            NodeKind::Literal(ty) => write!(f, "literal {}", ty),
            NodeKind::Subgraph { asset: Some(name) } => write!(f, "subgraph #{}", name),
            NodeKind::Subgraph { asset: None } => write!(f, "subgraph"),
            NodeKind::GetVariable(scope) => write!(f, "get {} variable", scope),
            NodeKind::SetVariable(scope) => write!(f, "set {} variable", scope),
            NodeKind::Null => write!(f, "null"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValueInputPort {
    pub key: String,
    pub ty: ValueType,
    /// `Some` when the input can hold an inline default value
    pub default: Option<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValueOutputPort {
    pub key: String,
    pub ty: ValueType,
}

/// Interface port definition of a nested graph body
#[derive(Debug, Clone, PartialEq)]
pub struct PortDefinitionSpec {
    pub kind: PortKind,
    pub key: String,
    pub label: String,
    pub ty: ValueType,
}

/// Body of a composite node
#[derive(Debug, Clone, PartialEq)]
pub struct GraphSpec {
    pub title: String,
    pub definitions: Vec<PortDefinitionSpec>,
}

impl GraphSpec {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            definitions: Vec::new(),
        }
    }

    /// Add an interface port; value definitions carry `object`
    pub fn define(mut self, kind: PortKind, key: &str, label: &str) -> Self {
        self.definitions.push(PortDefinitionSpec {
            kind,
            key: key.to_string(),
            label: label.to_string(),
            ty: ValueType::Object,
        });
        self
    }
}

/// Blueprint for a node, produced by a catalog factory
#[derive(Debug, Clone, PartialEq)]
pub struct NodeSpec {
    pub kind: NodeKind,
    pub title: String,
    pub control_inputs: Vec<String>,
    pub control_outputs: Vec<String>,
    pub value_inputs: Vec<ValueInputPort>,
    pub value_outputs: Vec<ValueOutputPort>,
    /// Nested graph for composite nodes; ports are derived from its definitions
    pub body: Option<GraphSpec>,
}

impl NodeSpec {
    pub fn new(kind: NodeKind, title: &str) -> Self {
        Self {
            kind,
            title: title.to_string(),
            control_inputs: Vec::new(),
            control_outputs: Vec::new(),
            value_inputs: Vec::new(),
            value_outputs: Vec::new(),
            body: None,
        }
    }

    pub fn null() -> Self {
        Self::new(NodeKind::Null, "Null")
    }

    pub fn composite(asset: Option<String>, body: GraphSpec) -> Self {
        let mut spec = Self::new(NodeKind::Subgraph { asset }, &body.title);
        spec.body = Some(body);
        spec
    }

    pub fn control_in(mut self, key: &str) -> Self {
        self.control_inputs.push(key.to_string());
        self
    }

    pub fn control_out(mut self, key: &str) -> Self {
        self.control_outputs.push(key.to_string());
        self
    }

    pub fn value_in(mut self, key: &str, ty: ValueType, default: Option<Value>) -> Self {
        self.value_inputs.push(ValueInputPort {
            key: key.to_string(),
            ty,
            default,
        });
        self
    }

    pub fn value_out(mut self, key: &str, ty: ValueType) -> Self {
        self.value_outputs.push(ValueOutputPort {
            key: key.to_string(),
            ty,
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let spec = NodeSpec::new(NodeKind::Unit("Flow.Math.ScalarSum".into()), "Add")
            .value_in("a", ValueType::Float, Some(Value::Float(0.0)))
            .value_in("b", ValueType::Float, Some(Value::Float(0.0)))
            .value_out("sum", ValueType::Float);
        assert_eq!(spec.value_inputs.len(), 2);
        assert_eq!(spec.value_outputs[0].key, "sum");
        assert!(spec.body.is_none());
    }

    #[test]
    fn test_composite() {
        let body = GraphSpec::new("Mover").define(PortKind::ControlInput, "enter", "Enter");
        let spec = NodeSpec::composite(None, body);
        assert!(spec.kind.is_composite());
        assert_eq!(spec.title, "Mover");
        assert_eq!(spec.body.map(|b| b.definitions.len()), Some(1));
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(NodeKind::Null.to_string(), "null");
        assert_eq!(
            NodeKind::Subgraph {
                asset: Some("mover".into())
            }
            .to_string(),
            "subgraph #mover"
        );
        assert_eq!(
            NodeKind::GetVariable(VariableScope::Scene).to_string(),
            "get scene variable"
        );
    }
}
