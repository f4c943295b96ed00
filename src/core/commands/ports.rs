//! Interface port definitions
//!
//! `valueinput:`, `valueoutput:`, `controlinput:` and `controloutput:` add a
//! port to the selected subgraph's body, or to the open graph when no
//! subgraph is selected.

use crate::core::command::{first_arg, Command, Intent};
use crate::core::error::CommandError;
use crate::core::mutation::EditContext;
use crate::core::node::PortKind;

#[derive(Clone)]
pub struct DefinePort {
    pub kind: PortKind,
}

impl DefinePort {
    pub const fn new(kind: PortKind) -> Self {
        Self { kind }
    }
}

impl Command for DefinePort {
    fn resolve(&self, args: &[String], _attach_left: bool, _is_last: bool) -> Intent {
        Intent::AddPortDefinition {
            kind: self.kind,
            name: first_arg(args),
        }
    }
}

pub fn add_port(ctx: &mut EditContext<'_>, kind: PortKind, name: &str) -> Result<(), CommandError> {
    if name.is_empty() {
        return Err(CommandError::EmptyName { kind });
    }
    let graph = ctx.resolve_edit_target();
    ctx.add_port_definition(graph, kind, name);
    Ok(())
}
