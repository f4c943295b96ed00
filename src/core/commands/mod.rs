//! Prompt verbs
//!
//! - **units**: `unit:` and the default verb for bare tokens
//! - **default_values**: `defaultvalue:`
//! - **subgraphs**: `subgraph:` and its port variants
//! - **ports**: interface port definitions
//! - **vars**: `var<scope>:` / `setvar<scope>:`
//! - **misc**: `up:` and `showall:`
//!
//! All verbs implement the [`Command`](crate::core::command::Command) trait.

/// Inline default values
pub mod default_values;
/// Navigation and introspection
pub mod misc;
/// Interface port definitions
pub mod ports;
/// Subgraph creation
pub mod subgraphs;
/// Unit creation and the default verb
pub mod units;
/// Variable accessors
pub mod vars;

use crate::core::command::{CommandRegistry, VariableAccess};
use crate::core::node::PortKind;
use crate::core::variables::VariableScope;

/// Verb used for tokens that match no other verb
pub const DEFAULT_VERB: &str = "empty:";

/// Registry with every built-in verb
pub fn default_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new(DEFAULT_VERB);
    register_all(&mut registry);
    registry
}

/// Register all verbs
pub fn register_all(registry: &mut CommandRegistry) {
    use self::default_values::*;
    use self::misc::*;
    use self::ports::*;
    use self::subgraphs::*;
    use self::units::*;
    use self::vars::*;

    registry.register(DEFAULT_VERB, Box::new(DefaultVerb));
    registry.register("unit:", Box::new(CreateUnit));
    registry.register("up:", Box::new(GoUp));

    registry.register("subgraph:", Box::new(CreateSubgraph::new(true, true)));
    registry.register("subgraphin:", Box::new(CreateSubgraph::new(true, false)));
    registry.register("subgraphout:", Box::new(CreateSubgraph::new(false, true)));
    registry.register("subgraphnoports:", Box::new(CreateSubgraph::new(false, false)));

    registry.register("valueinput:", Box::new(DefinePort::new(PortKind::ValueInput)));
    registry.register("valueoutput:", Box::new(DefinePort::new(PortKind::ValueOutput)));
    registry.register("controlinput:", Box::new(DefinePort::new(PortKind::ControlInput)));
    registry.register("controloutput:", Box::new(DefinePort::new(PortKind::ControlOutput)));

    registry.register("defaultvalue:", Box::new(AssignDefaults));

    for scope in VariableScope::ALL {
        registry.register(
            &format!("var{}:", scope),
            Box::new(LinkVariable::new(scope, VariableAccess::Get)),
        );
        registry.register(
            &format!("setvar{}:", scope),
            Box::new(LinkVariable::new(scope, VariableAccess::Set)),
        );
    }

    registry.register("showall:", Box::new(ShowAll));
}
