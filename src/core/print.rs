//! Plain-text rendering of a document
//!
//! Nodes are printed by their index within their graph rather than by id,
//! so two documents built by the same steps print identically even when
//! their ids differ. `diff_lines` compares two renderings line by line.

use crate::core::graph::{Document, EdgeKind, Graph};
use crate::core::id::{GraphId, NodeId};
use crate::core::variables::VariableScope;
use similar::{ChangeTag, TextDiff};
use std::fmt::Write;

const INDENT: &str = "  ";

/// Render every graph, variable store and the selection
pub fn render_document(doc: &Document) -> String {
    let mut out = String::new();
    render_graph(doc, doc.root(), 0, &mut out);

    for scope in VariableScope::ALL {
        if scope == VariableScope::Graph {
            continue;
        }
        if let Some(vars) = doc.variables(scope, doc.root()) {
            for decl in vars.iter() {
                let _ = writeln!(out, "{} var {} = {}", scope, decl.name, decl.value);
            }
        }
    }

    let selected: Vec<String> = doc.selected().iter().filter_map(|id| locate(doc, *id)).collect();
    if selected.is_empty() {
        let _ = writeln!(out, "selected nothing");
    } else {
        let _ = writeln!(out, "selected {}", selected.join(", "));
    }
    out
}

fn render_graph(doc: &Document, id: GraphId, depth: usize, out: &mut String) {
    let Some(graph) = doc.graph(id) else {
        return;
    };
    let pad = INDENT.repeat(depth);
    let _ = writeln!(out, "{}graph {:?}", pad, graph.title);

    for def in graph.definitions() {
        let _ = writeln!(
            out,
            "{}{}port {} {} {:?}{}",
            pad,
            INDENT,
            def.kind,
            def.key,
            def.label,
            if def.hide_label { " (label hidden)" } else { "" }
        );
    }
    for decl in graph.variables.iter() {
        let _ = writeln!(out, "{}{}var {} = {}", pad, INDENT, decl.name, decl.value);
    }

    for (index, node) in doc.nodes_in(id).enumerate() {
        let _ = writeln!(
            out,
            "{}{}[{}] {:?} {} at {}",
            pad, INDENT, index, node.title, node.kind, node.position
        );
        for port in &node.value_inputs {
            if let Some(default) = &port.default {
                let _ = writeln!(out, "{}{}{}{} = {}", pad, INDENT, INDENT, port.key, default);
            }
        }
        if let Some(body) = node.body {
            render_graph(doc, body, depth + 2, out);
        }
    }

    for edge in graph.edges() {
        let arrow = match edge.kind {
            EdgeKind::Control => "->",
            EdgeKind::Value => "=>",
        };
        let _ = writeln!(
            out,
            "{}{}[{}].{} {} [{}].{}",
            pad,
            INDENT,
            index_of(graph, edge.source).map_or("?".to_string(), |i| i.to_string()),
            edge.output,
            arrow,
            index_of(graph, edge.target).map_or("?".to_string(), |i| i.to_string()),
            edge.input
        );
    }
}

fn index_of(graph: &Graph, node: NodeId) -> Option<usize> {
    graph.nodes().iter().position(|n| *n == node)
}

/// `Main/[2]/Body/[0]` style path of a node
fn locate(doc: &Document, node: NodeId) -> Option<String> {
    let n = doc.node(node)?;
    let graph = doc.graph(n.graph)?;
    let here = format!("{}/[{}]", graph.title, index_of(graph, node)?);
    match graph.owner.and_then(|owner| locate(doc, owner)) {
        Some(parent) => Some(format!("{}/{}", parent, here)),
        None => Some(here),
    }
}

/// One changed line between two renderings
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffLine {
    Added(String),
    Removed(String),
}

impl std::fmt::Display for DiffLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiffLine::Added(line) => write!(f, "+ {}", line),
            DiffLine::Removed(line) => write!(f, "- {}", line),
        }
    }
}

/// Changed lines from `before` to `after`, in document order
pub fn diff_lines(before: &str, after: &str) -> Vec<DiffLine> {
    let diff = TextDiff::from_lines(before, after);
    let mut lines = Vec::new();
    for change in diff.iter_all_changes() {
        let text = change.value().trim_end_matches('\n').to_string();
        match change.tag() {
            ChangeTag::Delete => lines.push(DiffLine::Removed(text)),
            ChangeTag::Insert => lines.push(DiffLine::Added(text)),
            ChangeTag::Equal => {}
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::Vec2;
    use crate::core::node::{GraphSpec, NodeKind, NodeSpec, PortKind};
    use crate::core::value::{Value, ValueType};

    fn sample() -> Document {
        let mut doc = Document::new("Main");
        let root = doc.root();
        let start = doc
            .add_node(
                root,
                NodeSpec::new(NodeKind::Unit("OnStart".into()), "On Start").control_out("trigger"),
                Vec2::ZERO,
            )
            .unwrap();
        let body = GraphSpec::new("Body").define(PortKind::ControlInput, "enter", "Enter");
        let sub = doc
            .add_node(root, NodeSpec::composite(None, body), Vec2::new(180.0, 0.0))
            .unwrap();
        doc.connect(EdgeKind::Control, start, "trigger", sub, "enter");
        doc.variables_mut(VariableScope::Scene, root)
            .unwrap()
            .set("hp", Value::Int(3));
        doc.select(Some(sub));
        doc
    }

    #[test]
    fn test_render() {
        let text = render_document(&sample());
        assert!(text.starts_with("graph \"Main\"\n"));
        assert!(text.contains("  [0] \"On Start\" unit OnStart at (0, 0)\n"));
        assert!(text.contains("      port control input enter \"Enter\" (label hidden)\n"));
        assert!(text.contains("  [0].trigger -> [1].enter\n"));
        assert!(text.contains("scene var hp = 3\n"));
        assert!(text.ends_with("selected Main/[1]\n"));
    }

    #[test]
    fn test_render_lists_whole_selection() {
        let mut doc = sample();
        let root = doc.root();
        doc.select_all(root);
        assert!(render_document(&doc).ends_with("selected Main/[0], Main/[1]\n"));
    }

    #[test]
    fn test_render_ignores_ids() {
        let mut other = Document::new("Main");
        let root = other.root();
        // Burn some ids so the two documents diverge
        let scratch = other
            .add_node(root, NodeSpec::new(NodeKind::Literal(ValueType::Int), "x"), Vec2::ZERO)
            .unwrap();
        other.remove_node(scratch);

        let start = other
            .add_node(
                root,
                NodeSpec::new(NodeKind::Unit("OnStart".into()), "On Start").control_out("trigger"),
                Vec2::ZERO,
            )
            .unwrap();
        let body = GraphSpec::new("Body").define(PortKind::ControlInput, "enter", "Enter");
        let sub = other
            .add_node(root, NodeSpec::composite(None, body), Vec2::new(180.0, 0.0))
            .unwrap();
        other.connect(EdgeKind::Control, start, "trigger", sub, "enter");
        other
            .variables_mut(VariableScope::Scene, root)
            .unwrap()
            .set("hp", Value::Int(3));
        other.select(Some(sub));

        assert_eq!(render_document(&sample()), render_document(&other));
    }

    #[test]
    fn test_diff_lines() {
        let before = "graph \"Main\"\nselected nothing\n";
        let after = "graph \"Main\"\n  [0] \"If\" unit If at (0, 0)\nselected Main/[0]\n";
        assert_eq!(
            diff_lines(before, after),
            vec![
                DiffLine::Removed("selected nothing".into()),
                DiffLine::Added("  [0] \"If\" unit If at (0, 0)".into()),
                DiffLine::Added("selected Main/[0]".into()),
            ]
        );
        assert!(diff_lines(before, before).is_empty());
    }
}
