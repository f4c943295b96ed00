//! Variable accessors
//!
//! `var<scope>:` links a getter into the selection's first free value input;
//! `setvar<scope>:` links a setter to its first free value output. The
//! variable is declared on first use and never overwritten.

use crate::core::command::{Command, Intent, VariableAccess};
use crate::core::error::CommandError;
use crate::core::geometry::Vec2;
use crate::core::graph::EdgeKind;
use crate::core::layout;
use crate::core::mutation::EditContext;
use crate::core::node::PortKind;
use crate::core::stdlib;
use crate::core::variables::VariableScope;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// Characters stripped from a port key to derive a variable name
static NAME_NOISE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"[%`_<>]").ok());

/// Variable name derived from a port key
pub fn sanitize(key: &str) -> String {
    match NAME_NOISE.as_ref() {
        Some(re) => re.replace_all(key, "").into_owned(),
        None => key.chars().filter(|c| !"%`_<>".contains(*c)).collect(),
    }
}

#[derive(Clone)]
pub struct LinkVariable {
    pub scope: VariableScope,
    pub access: VariableAccess,
}

impl LinkVariable {
    pub const fn new(scope: VariableScope, access: VariableAccess) -> Self {
        Self { scope, access }
    }
}

impl Command for LinkVariable {
    fn resolve(&self, args: &[String], _attach_left: bool, _is_last: bool) -> Intent {
        Intent::LinkVariable {
            scope: self.scope,
            access: self.access,
            name: args.first().filter(|a| !a.is_empty()).cloned(),
        }
    }
}

pub fn link_variable(
    ctx: &mut EditContext<'_>,
    scope: VariableScope,
    access: VariableAccess,
    name: Option<&str>,
) -> Result<(), CommandError> {
    let anchor = ctx.anchor().cloned().ok_or(CommandError::MissingSelection)?;

    let (key, ty) = match access {
        VariableAccess::Set => anchor
            .value_outputs
            .iter()
            .find(|p| !ctx.doc.output_connected(anchor.id, EdgeKind::Value, &p.key))
            .map(|p| (p.key.clone(), p.ty.clone()))
            .ok_or(CommandError::NoAvailablePort {
                kind: PortKind::ValueOutput,
            })?,
        VariableAccess::Get => anchor
            .value_inputs
            .iter()
            .find(|p| !ctx.doc.input_connected(anchor.id, EdgeKind::Value, &p.key))
            .map(|p| (p.key.clone(), p.ty.clone()))
            .ok_or(CommandError::NoAvailablePort {
                kind: PortKind::ValueInput,
            })?,
    };

    let name = match name {
        Some(name) => name.to_string(),
        None => sanitize(&key),
    };
    if name.is_empty() {
        return Err(CommandError::EmptyDerivedName);
    }

    ctx.declare_variable(scope, anchor.graph, &name, &ty);

    match access {
        VariableAccess::Set => {
            let position = anchor.position + Vec2::new(layout::node_width(&anchor), 0.0);
            let spec = stdlib::set_variable(scope, &name, ty);
            if let Some(setter) = ctx.place_accessor(anchor.graph, spec, position) {
                ctx.doc
                    .connect(EdgeKind::Value, anchor.id, &key, setter, "input");
            }
        }
        VariableAccess::Get => {
            let position = anchor.position + Vec2::new(-layout::NODE_MIN_WIDTH, layout::LEFT_DROP);
            let spec = stdlib::get_variable(scope, &name, ty);
            if let Some(getter) = ctx.place_accessor(anchor.graph, spec, position) {
                ctx.doc
                    .connect(EdgeKind::Value, getter, "value", anchor.id, &key);
            }
        }
    }
    debug!("linked {} variable {} to {}.{}", scope, name, anchor.title, key);
    Ok(())
}
