//! Inline default values
//!
//! `defaultvalue:` parses each argument as a literal and assigns it to the
//! next free input of the selected node that accepts its type.

use crate::core::command::{Command, Intent};
use crate::core::error::CommandError;
use crate::core::graph::{Document, EdgeKind};
use crate::core::mutation::EditContext;
use crate::core::value::{parse_literal, Value};

/// `defaultvalue:` assigns literals to free inputs, left to right
#[derive(Clone)]
pub struct AssignDefaults;

impl Command for AssignDefaults {
    fn resolve(&self, args: &[String], _attach_left: bool, _is_last: bool) -> Intent {
        Intent::AssignDefaults {
            values: args.to_vec(),
        }
    }
}

/// Match `args` against the selected node's free inputs, first fit.
///
/// Every argument claims one input; empty strings claim any free input but
/// are left out of the result. Returns `None` when nothing is selected.
pub fn probe(doc: &Document, args: &[String]) -> Option<Vec<(String, Value)>> {
    let node = doc.node(doc.selection()?)?;
    let mut taken: Vec<&str> = Vec::new();
    let mut claims = Vec::new();

    for arg in args {
        let value = parse_literal(arg);
        let skip = value.is_empty_string();
        let ty = value.value_type();
        let port = node.value_inputs.iter().find(|p| {
            p.default.is_some()
                && (skip || p.ty.accepts(&ty))
                && !taken.contains(&p.key.as_str())
                && !doc.input_connected(node.id, EdgeKind::Value, &p.key)
        });
        if let Some(port) = port {
            taken.push(&port.key);
            if !skip {
                claims.push((port.key.clone(), value));
            }
        }
    }
    Some(claims)
}

/// Write probed claims onto the selection
pub fn apply(ctx: &mut EditContext<'_>, claims: Vec<(String, Value)>) -> Result<(), CommandError> {
    let node = ctx.doc.selection().ok_or(CommandError::MissingSelection)?;
    for (key, value) in claims {
        ctx.set_default(node, &key, value);
    }
    Ok(())
}

/// `defaultvalue:` entry point
pub fn assign(ctx: &mut EditContext<'_>, values: &[String]) -> Result<(), CommandError> {
    let claims = probe(ctx.doc, values).ok_or(CommandError::MissingSelection)?;
    apply(ctx, claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::Vec2;
    use crate::core::mutation::test_support::Harness;
    use crate::core::node::{NodeKind, NodeSpec};
    use crate::core::value::ValueType;

    fn lerp() -> NodeSpec {
        NodeSpec::new(NodeKind::Unit("Lerp".into()), "Lerp")
            .value_in("a", ValueType::Float, Some(Value::Float(0.0)))
            .value_in("b", ValueType::Float, Some(Value::Float(0.0)))
            .value_in("label", ValueType::String, Some(Value::Str(String::new())))
            .value_in("wired", ValueType::Float, None)
            .value_out("result", ValueType::Float)
    }

    fn values(text: &str) -> Vec<String> {
        text.split(',').map(str::to_string).collect()
    }

    fn selected(h: &mut Harness) -> crate::core::id::NodeId {
        let root = h.doc.root();
        let id = h.doc.add_node(root, lerp(), Vec2::ZERO).unwrap();
        h.doc.select(Some(id));
        id
    }

    fn default_of(h: &Harness, node: crate::core::id::NodeId, key: &str) -> Option<Value> {
        h.doc.node(node).unwrap().value_input(key).unwrap().default.clone()
    }

    #[test]
    fn test_requires_selection() {
        let mut h = Harness::new();
        assert_eq!(
            assign(&mut h.ctx(), &values("1")),
            Err(CommandError::MissingSelection)
        );
    }

    #[test]
    fn test_first_fit_by_type() {
        let mut h = Harness::new();
        let id = selected(&mut h);
        assign(&mut h.ctx(), &values("hi,1.5,2")).unwrap();

        assert_eq!(default_of(&h, id, "a"), Some(Value::Float(1.5)));
        assert_eq!(default_of(&h, id, "b"), Some(Value::Float(2.0)));
        assert_eq!(default_of(&h, id, "label"), Some(Value::Str("hi".into())));
        assert_eq!(h.journal.len(), 3);
    }

    #[test]
    fn test_empty_argument_skips_an_input() {
        let mut h = Harness::new();
        let id = selected(&mut h);
        assign(&mut h.ctx(), &values(",4")).unwrap();

        assert_eq!(default_of(&h, id, "a"), Some(Value::Float(0.0)));
        assert_eq!(default_of(&h, id, "b"), Some(Value::Float(4.0)));
    }

    #[test]
    fn test_connected_and_incapable_inputs_are_skipped() {
        let mut h = Harness::new();
        let id = selected(&mut h);
        let root = h.doc.root();
        let source = h
            .doc
            .add_node(
                root,
                NodeSpec::new(NodeKind::Literal(ValueType::Float), "Float Literal")
                    .value_out("output", ValueType::Float),
                Vec2::new(-300.0, 0.0),
            )
            .unwrap();
        assert!(h.doc.connect(EdgeKind::Value, source, "output", id, "a"));

        let claims = probe(&h.doc, &values("1,2,3")).unwrap();
        assert_eq!(claims, vec![("b".to_string(), Value::Float(1.0))]);
    }

    #[test]
    fn test_probe_without_selection() {
        let h = Harness::new();
        assert_eq!(probe(&h.doc, &values("1")), None);
    }
}
