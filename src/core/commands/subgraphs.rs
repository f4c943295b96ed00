//! Subgraph creation

use crate::core::command::{first_arg, Command, Intent};
use crate::core::error::CommandError;
use crate::core::mutation::EditContext;
use crate::core::node::{GraphSpec, NodeSpec, PortKind};

/// `subgraph:` and its variants; the flags pick which control ports the
/// new body gets
#[derive(Clone)]
pub struct CreateSubgraph {
    pub entry: bool,
    pub exit: bool,
}

impl CreateSubgraph {
    pub const fn new(entry: bool, exit: bool) -> Self {
        Self { entry, exit }
    }
}

impl Command for CreateSubgraph {
    fn resolve(&self, args: &[String], attach_left: bool, _is_last: bool) -> Intent {
        Intent::CreateSubgraph {
            title: first_arg(args),
            entry: self.entry,
            exit: self.exit,
            attach_left,
        }
    }
}

/// Create a composite node with an empty body titled `title`
pub fn create_subgraph(
    ctx: &mut EditContext<'_>,
    title: &str,
    entry: bool,
    exit: bool,
    attach_left: bool,
) -> Result<(), CommandError> {
    let mut body = GraphSpec::new(title);
    if entry {
        body = body.define(PortKind::ControlInput, "enter", "Enter");
    }
    if exit {
        body = body.define(PortKind::ControlOutput, "exit", "Exit");
    }
    ctx.create_node(NodeSpec::composite(None, body), attach_left);
    Ok(())
}
