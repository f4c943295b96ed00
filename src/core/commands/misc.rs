//! Navigation and introspection

use crate::core::command::{first_arg, Command, Intent};
use crate::core::error::CommandError;
use crate::core::mutation::EditContext;
use tracing::info;

/// Matches printed by `showall:`
pub const SHOW_ALL_LIMIT: usize = 1000;

/// `up:` reselects an earlier node of this line
#[derive(Clone)]
pub struct GoUp;

impl Command for GoUp {
    fn resolve(&self, args: &[String], _attach_left: bool, _is_last: bool) -> Intent {
        // Negative counts still drop the current node but select nothing
        let count = first_arg(args).trim().parse::<i64>().unwrap_or(1).max(0);
        Intent::GoUp {
            count: usize::try_from(count).unwrap_or(usize::MAX),
        }
    }
}

/// Drop the current node from the stack, then pop and select `count` times
pub fn go_up(ctx: &mut EditContext<'_>, count: usize) -> Result<(), CommandError> {
    if ctx.stack.len() <= 1 {
        return Ok(());
    }
    ctx.stack.pop();
    for _ in 0..count {
        match ctx.stack.pop() {
            Some(node) => ctx.doc.select(Some(node)),
            None => break,
        }
    }
    Ok(())
}

/// `showall:` lists catalog matches
#[derive(Clone)]
pub struct ShowAll;

impl Command for ShowAll {
    fn resolve(&self, args: &[String], _attach_left: bool, _is_last: bool) -> Intent {
        Intent::ShowAll {
            query: first_arg(args),
        }
    }
}

pub fn show_all(ctx: &mut EditContext<'_>, query: &str) -> Result<(), CommandError> {
    let line = ctx
        .catalog
        .search(query, SHOW_ALL_LIMIT)
        .iter()
        .map(|e| e.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    info!("showall {:?}: {}", query, line);
    ctx.feedback.output.push(line);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::{Catalog, CatalogEntry};
    use crate::core::commands::subgraphs::create_subgraph;
    use crate::core::mutation::test_support::Harness;
    use crate::core::node::{NodeKind, NodeSpec};

    fn chain(h: &mut Harness, n: usize) -> Vec<crate::core::id::NodeId> {
        (0..n)
            .map(|i| {
                create_subgraph(&mut h.ctx(), &format!("S{}", i), true, true, false).unwrap();
                h.doc.selection().unwrap()
            })
            .collect()
    }

    #[test]
    fn test_count_parsing() {
        assert_eq!(GoUp.resolve(&[String::new()], false, false), Intent::GoUp { count: 1 });
        assert_eq!(GoUp.resolve(&["3".into()], false, false), Intent::GoUp { count: 3 });
        assert_eq!(GoUp.resolve(&["x".into()], false, false), Intent::GoUp { count: 1 });
        assert_eq!(GoUp.resolve(&["-1".into()], false, false), Intent::GoUp { count: 0 });
        assert_eq!(GoUp.resolve(&["0".into()], false, false), Intent::GoUp { count: 0 });
    }

    #[test]
    fn test_negative_count_only_drops_current() {
        let mut h = Harness::new();
        let ids = chain(&mut h, 3);
        let count = match GoUp.resolve(&["-1".into()], false, false) {
            Intent::GoUp { count } => count,
            other => panic!("unexpected intent {:?}", other),
        };
        go_up(&mut h.ctx(), count).unwrap();
        assert_eq!(h.doc.selection(), Some(ids[2]));
        assert_eq!(h.stack, vec![ids[0], ids[1]]);
    }

    #[test]
    fn test_go_up_once() {
        let mut h = Harness::new();
        let ids = chain(&mut h, 3);
        go_up(&mut h.ctx(), 1).unwrap();
        assert_eq!(h.doc.selection(), Some(ids[1]));
        assert_eq!(h.stack, vec![ids[0]]);
    }

    #[test]
    fn test_go_up_twice_drains_stack() {
        let mut h = Harness::new();
        let ids = chain(&mut h, 3);
        go_up(&mut h.ctx(), 5).unwrap();
        assert_eq!(h.doc.selection(), Some(ids[0]));
        assert!(h.stack.is_empty());
    }

    #[test]
    fn test_go_up_needs_two_nodes() {
        let mut h = Harness::new();
        let ids = chain(&mut h, 1);
        go_up(&mut h.ctx(), 1).unwrap();
        assert_eq!(h.doc.selection(), Some(ids[0]));
        assert_eq!(h.stack, ids);
    }

    #[test]
    fn test_show_all() {
        let catalog = Catalog::from_entries(
            ["if", "add", "sequence"]
                .iter()
                .map(|n| {
                    let title = n.to_string();
                    CatalogEntry::new(n, move || Ok(NodeSpec::new(NodeKind::Unit(title.clone()), &title)))
                })
                .collect(),
        );
        let mut h = Harness::with_catalog(catalog);
        show_all(&mut h.ctx(), "").unwrap();
        show_all(&mut h.ctx(), "E").unwrap();
        assert_eq!(h.feedback.output, vec!["if, add, sequence", "sequence"]);
    }
}
