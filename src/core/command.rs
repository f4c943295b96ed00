//! Prompt commands and the verb registry
//!
//! A token is split into a verb prefix (`unit:`, `setvargraph:`, ...) and
//! `,`-separated arguments. The command registered for the verb turns the
//! arguments into an [`Intent`], which the dispatcher executes later
//! against the document. Resolving never touches the document, so a whole
//! line can be resolved before anything runs.

use crate::core::node::PortKind;
use crate::core::variables::VariableScope;

/// Whether a variable command reads or writes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableAccess {
    Get,
    Set,
}

/// A deferred action produced by one token
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// Bare token: create a node, assign defaults, or make a subgraph
    Default {
        args: Vec<String>,
        attach_left: bool,
        is_last: bool,
    },
    CreateUnit {
        query: String,
        attach_left: bool,
        is_last: bool,
    },
    /// Walk back up the creation stack
    GoUp { count: usize },
    CreateSubgraph {
        title: String,
        entry: bool,
        exit: bool,
        attach_left: bool,
    },
    AddPortDefinition { kind: PortKind, name: String },
    AssignDefaults { values: Vec<String> },
    LinkVariable {
        scope: VariableScope,
        access: VariableAccess,
        /// `None` derives the name from the port
        name: Option<String>,
    },
    ShowAll { query: String },
}

/// Turns a token's arguments into an intent
///
/// `args` always holds at least one element, possibly empty.
pub trait Command: Send + Sync + CloneCommand {
    fn resolve(&self, args: &[String], attach_left: bool, is_last: bool) -> Intent;
}

/// Helper trait for cloning boxed commands
pub trait CloneCommand {
    fn clone_box(&self) -> Box<dyn Command>;
}

impl<T> CloneCommand for T
where
    T: 'static + Command + Clone,
{
    fn clone_box(&self) -> Box<dyn Command> {
        Box::new(self.clone())
    }
}

impl Clone for Box<dyn Command> {
    fn clone(&self) -> Box<dyn Command> {
        self.as_ref().clone_box()
    }
}

/// First argument, or the empty string
pub fn first_arg(args: &[String]) -> String {
    args.first().cloned().unwrap_or_default()
}

/// Result of matching a token against the registry
pub struct VerbMatch<'r, 't> {
    pub verb: &'r str,
    pub command: &'r dyn Command,
    /// Token text after the verb
    pub rest: &'t str,
}

/// Ordered verb table with a fallback for tokens that carry no verb
#[derive(Clone)]
pub struct CommandRegistry {
    verbs: Vec<(String, Box<dyn Command>)>,
    fallback: String,
}

impl CommandRegistry {
    /// `fallback` is the verb used for tokens without a known prefix
    pub fn new(fallback: &str) -> Self {
        Self {
            verbs: Vec::new(),
            fallback: fallback.to_string(),
        }
    }

    /// Register or replace a verb
    pub fn register(&mut self, verb: &str, command: Box<dyn Command>) {
        match self.verbs.iter_mut().find(|(v, _)| v == verb) {
            Some(slot) => slot.1 = command,
            None => self.verbs.push((verb.to_string(), command)),
        }
    }

    /// Make `from` behave like `to`. Returns false if `to` is unknown.
    pub fn alias(&mut self, from: &str, to: &str) -> bool {
        match self.get(to).map(|c| c.clone_box()) {
            Some(command) => {
                self.register(from, command);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, verb: &str) -> Option<&dyn Command> {
        self.verbs
            .iter()
            .find(|(v, _)| v == verb)
            .map(|(_, c)| c.as_ref())
    }

    /// Match the longest registered verb that prefixes `token`, falling
    /// back to the default verb with the whole token as arguments
    pub fn lookup<'t>(&self, token: &'t str) -> Option<VerbMatch<'_, 't>> {
        let best = self
            .verbs
            .iter()
            .filter(|(v, _)| v != &self.fallback && token.starts_with(v.as_str()))
            .max_by_key(|(v, _)| v.len());

        match best {
            Some((verb, command)) => Some(VerbMatch {
                verb,
                command: command.as_ref(),
                rest: &token[verb.len()..],
            }),
            None => self
                .verbs
                .iter()
                .find(|(v, _)| v == &self.fallback)
                .map(|(verb, command)| VerbMatch {
                    verb,
                    command: command.as_ref(),
                    rest: token,
                }),
        }
    }

    pub fn verbs(&self) -> impl Iterator<Item = &str> {
        self.verbs.iter().map(|(v, _)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.verbs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verbs.is_empty()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone)]
    struct Echo(&'static str);

    impl Command for Echo {
        fn resolve(&self, args: &[String], _attach_left: bool, _is_last: bool) -> Intent {
            Intent::ShowAll {
                query: format!("{}{}", self.0, args.join("|")),
            }
        }
    }

    fn registry() -> CommandRegistry {
        let mut r = CommandRegistry::new("empty:");
        r.register("empty:", Box::new(Echo("default ")));
        r.register("var:", Box::new(Echo("var ")));
        r.register("vargraph:", Box::new(Echo("vargraph ")));
        r
    }

    #[test]
    fn test_longest_prefix_wins() {
        let r = registry();
        let m = r.lookup("vargraph:speed").unwrap();
        assert_eq!(m.verb, "vargraph:");
        assert_eq!(m.rest, "speed");
    }

    #[test]
    fn test_fallback_keeps_whole_token() {
        let r = registry();
        let m = r.lookup("add").unwrap();
        assert_eq!(m.verb, "empty:");
        assert_eq!(m.rest, "add");
        assert!(CommandRegistry::new("empty:").lookup("add").is_none());
    }

    #[test]
    fn test_alias_and_replace() {
        let mut r = registry();
        assert!(r.alias("vg:", "vargraph:"));
        assert!(!r.alias("x:", "missing:"));
        let m = r.lookup("vg:hp").unwrap();
        assert_eq!(
            m.command.resolve(&[m.rest.to_string()], false, true),
            Intent::ShowAll {
                query: "vargraph hp".into()
            }
        );

        r.register("var:", Box::new(Echo("other ")));
        assert_eq!(r.len(), 4);
        assert_eq!(r.verbs().collect::<Vec<_>>(), vec!["empty:", "var:", "vargraph:", "vg:"]);
    }

    #[test]
    fn test_first_arg() {
        assert_eq!(first_arg(&[]), "");
        assert_eq!(first_arg(&["a".into(), "b".into()]), "a");
    }
}
