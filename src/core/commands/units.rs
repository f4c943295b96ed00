//! Unit creation and the default verb
//!
//! A bare token can mean three things: a catalog entry, a literal for the
//! selected node's inputs, or the title of a new subgraph. The default
//! command decides between them once the token runs.

use crate::core::catalog::Catalog;
use crate::core::command::{first_arg, Command, Intent};
use crate::core::commands::{default_values, subgraphs};
use crate::core::error::CommandError;
use crate::core::mutation::EditContext;
use tracing::debug;

/// Matches collected for the hint of the line's last token
pub const HINT_MATCHES: usize = 10;

/// `unit:` creates the first catalog match
#[derive(Clone)]
pub struct CreateUnit;

impl Command for CreateUnit {
    fn resolve(&self, args: &[String], attach_left: bool, is_last: bool) -> Intent {
        Intent::CreateUnit {
            query: first_arg(args),
            attach_left,
            is_last,
        }
    }
}

/// `empty:` and every token without a verb
#[derive(Clone)]
pub struct DefaultVerb;

impl Command for DefaultVerb {
    fn resolve(&self, args: &[String], attach_left: bool, is_last: bool) -> Intent {
        Intent::Default {
            args: args.to_vec(),
            attach_left,
            is_last,
        }
    }
}

/// Create the first entry matching `query`; publish a hint on the last token
pub fn create_unit(
    ctx: &mut EditContext<'_>,
    query: &str,
    attach_left: bool,
    is_last: bool,
) -> Result<(), CommandError> {
    let catalog = ctx.catalog;
    let limit = if is_last { HINT_MATCHES } else { 1 };
    let matches = catalog.search(query, limit);
    let Some(first) = matches.first() else {
        debug!("no catalog entry matches {:?}", query);
        return Ok(());
    };

    ctx.create_node(first.instantiate(), attach_left);
    if is_last {
        ctx.feedback.hint = Some(Catalog::describe_hint(&matches));
    }
    Ok(())
}

/// Resolve a bare token.
///
/// Prefers a unit unless the token reads as a non-string literal that fits
/// a free input of the selection; then defaults; then a unit anyway; and
/// finally a subgraph titled with the token.
pub fn run_default(
    ctx: &mut EditContext<'_>,
    args: &[String],
    attach_left: bool,
    is_last: bool,
) -> Result<(), CommandError> {
    let name = first_arg(args);
    let claims = default_values::probe(ctx.doc, args).unwrap_or_default();
    let inputs_available = !claims.is_empty();
    let non_string = claims.first().is_some_and(|(_, value)| !value.is_string());
    let found = !ctx.catalog.search(&name, 1).is_empty();

    if found && !non_string {
        create_unit(ctx, &name, attach_left, is_last)
    } else if inputs_available {
        default_values::apply(ctx, claims)
    } else if found {
        create_unit(ctx, &name, attach_left, is_last)
    } else {
        subgraphs::create_subgraph(ctx, &name, true, true, attach_left)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::CatalogEntry;
    use crate::core::graph::EdgeKind;
    use crate::core::mutation::test_support::Harness;
    use crate::core::node::{NodeKind, NodeSpec};
    use crate::core::value::{Value, ValueType};

    fn catalog() -> Catalog {
        Catalog::from_entries(vec![
            CatalogEntry::new("onstart", || {
                Ok(NodeSpec::new(NodeKind::Unit("OnStart".into()), "On Start").control_out("trigger"))
            }),
            CatalogEntry::new("log", || {
                Ok(NodeSpec::new(NodeKind::Unit("Log".into()), "Log")
                    .control_in("enter")
                    .control_out("exit")
                    .value_in("message", ValueType::Object, Some(Value::Null)))
            }),
            CatalogEntry::new("float", || {
                Ok(NodeSpec::new(NodeKind::Literal(ValueType::Float), "Float Literal")
                    .value_out("output", ValueType::Float))
            }),
            CatalogEntry::new("3dtext", || {
                Ok(NodeSpec::new(NodeKind::Unit("Text3D".into()), "3D Text"))
            }),
        ])
    }

    fn args(text: &str) -> Vec<String> {
        text.split(',').map(str::to_string).collect()
    }

    #[test]
    fn test_unit_creation_and_hint() {
        let mut h = Harness::with_catalog(catalog());
        create_unit(&mut h.ctx(), "o", false, true).unwrap();
        assert_eq!(h.doc.node_count(), 1);
        assert_eq!(h.feedback.hint.as_deref(), Some("log, float, onstart"));

        create_unit(&mut h.ctx(), "log", false, false).unwrap();
        assert_eq!(h.doc.node_count(), 2);
        assert_eq!(h.feedback.hint.as_deref(), Some("log, float, onstart"));
    }

    #[test]
    fn test_unknown_unit_is_a_no_op() {
        let mut h = Harness::with_catalog(catalog());
        create_unit(&mut h.ctx(), "nothing", false, true).unwrap();
        assert_eq!(h.doc.node_count(), 0);
        assert!(h.feedback.hint.is_none());
    }

    #[test]
    fn test_default_prefers_units() {
        let mut h = Harness::with_catalog(catalog());
        run_default(&mut h.ctx(), &args("onstart"), false, true).unwrap();
        run_default(&mut h.ctx(), &args("log"), false, true).unwrap();
        let selected = h.doc.selection().unwrap();
        assert_eq!(h.doc.node(selected).unwrap().title, "Log");
        assert!(h.doc.input_connected(selected, EdgeKind::Control, "enter"));
    }

    #[test]
    fn test_default_assigns_numbers_over_units() {
        // "3" matches "3dtext" but fits the free message input first
        let mut h = Harness::with_catalog(catalog());
        run_default(&mut h.ctx(), &args("log"), false, false).unwrap();
        run_default(&mut h.ctx(), &args("3"), false, true).unwrap();

        assert_eq!(h.doc.node_count(), 1);
        let log = h.doc.selection().unwrap();
        assert_eq!(
            h.doc.node(log).unwrap().value_input("message").unwrap().default,
            Some(Value::Float(3.0))
        );
    }

    #[test]
    fn test_default_string_prefers_unit_over_input() {
        let mut h = Harness::with_catalog(catalog());
        run_default(&mut h.ctx(), &args("log"), false, false).unwrap();
        run_default(&mut h.ctx(), &args("float"), false, true).unwrap();
        assert_eq!(h.doc.node_count(), 2);
    }

    #[test]
    fn test_default_falls_back_to_subgraph() {
        let mut h = Harness::with_catalog(catalog());
        run_default(&mut h.ctx(), &args("Movement"), false, true).unwrap();
        let id = h.doc.selection().unwrap();
        let node = h.doc.node(id).unwrap();
        assert!(node.kind.is_composite());
        assert_eq!(h.doc.graph(node.body.unwrap()).unwrap().title, "Movement");
        assert_eq!(node.control_inputs, vec!["enter"]);
        assert_eq!(node.control_outputs, vec!["exit"]);
    }

    #[test]
    fn test_default_string_literal_without_unit_sets_input() {
        let mut h = Harness::with_catalog(catalog());
        run_default(&mut h.ctx(), &args("log"), false, false).unwrap();
        run_default(&mut h.ctx(), &args("hello"), false, true).unwrap();
        let log = h.doc.selection().unwrap();
        assert_eq!(h.doc.node_count(), 1);
        assert_eq!(
            h.doc.node(log).unwrap().value_input("message").unwrap().default,
            Some(Value::Str("hello".into()))
        );
    }
}
