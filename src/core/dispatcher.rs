//! Line dispatcher
//!
//! A prompt line is split on whitespace into tokens. Every token is
//! resolved to an [`Intent`] first, left to right, and only then are the
//! intents executed in the same order. Intents read the selection when
//! they run, so each token sees what the previous ones built.

use crate::core::command::{CommandRegistry, Intent};
use crate::core::commands::{default_values, misc, ports, subgraphs, units, vars};
use crate::core::error::CommandError;
use crate::core::mutation::EditContext;
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, warn};

/// Leading marker that flips the attach side of a token
pub const REVERSAL_MARKER: char = '!';

/// Separator between a token's arguments
pub const ARGUMENT_SEPARATOR: char = ',';

static WHITESPACE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\s+").ok());

/// One whitespace-delimited piece of the line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Text with the reversal marker stripped
    pub text: String,
    pub attach_left: bool,
    pub is_last: bool,
}

/// Split a line into tokens
pub fn tokenize(line: &str) -> Vec<Token> {
    let line = line.trim();
    if line.is_empty() {
        return Vec::new();
    }
    let pieces: Vec<&str> = match WHITESPACE.as_ref() {
        Some(re) => re.split(line).collect(),
        None => line.split_whitespace().collect(),
    };

    let count = pieces.len();
    pieces
        .into_iter()
        .enumerate()
        .map(|(i, piece)| {
            let (text, attach_left) = match piece.strip_prefix(REVERSAL_MARKER) {
                Some(rest) => (rest, true),
                None => (piece, false),
            };
            Token {
                text: text.to_string(),
                attach_left,
                is_last: i + 1 == count,
            }
        })
        .collect()
}

/// Resolve every token of `line` against the registry
pub fn resolve_line(registry: &CommandRegistry, line: &str) -> Vec<Intent> {
    tokenize(line)
        .iter()
        .filter_map(|token| {
            let Some(found) = registry.lookup(&token.text) else {
                debug!("no verb for {:?}", token.text);
                return None;
            };
            let args: Vec<String> = found
                .rest
                .split(ARGUMENT_SEPARATOR)
                .map(str::to_string)
                .collect();
            Some(found.command.resolve(&args, token.attach_left, token.is_last))
        })
        .collect()
}

/// Run one intent against the document
pub fn execute(ctx: &mut EditContext<'_>, intent: &Intent) -> Result<(), CommandError> {
    match intent {
        Intent::Default {
            args,
            attach_left,
            is_last,
        } => units::run_default(ctx, args, *attach_left, *is_last),
        Intent::CreateUnit {
            query,
            attach_left,
            is_last,
        } => units::create_unit(ctx, query, *attach_left, *is_last),
        Intent::GoUp { count } => misc::go_up(ctx, *count),
        Intent::CreateSubgraph {
            title,
            entry,
            exit,
            attach_left,
        } => subgraphs::create_subgraph(ctx, title, *entry, *exit, *attach_left),
        Intent::AddPortDefinition { kind, name } => ports::add_port(ctx, *kind, name),
        Intent::AssignDefaults { values } => default_values::assign(ctx, values),
        Intent::LinkVariable {
            scope,
            access,
            name,
        } => vars::link_variable(ctx, *scope, *access, name.as_deref()),
        Intent::ShowAll { query } => misc::show_all(ctx, query),
    }
}

/// Execute intents in order. A failing intent only loses its own effect;
/// warnings are echoed to the session output. Returns how many failed.
pub fn execute_all(ctx: &mut EditContext<'_>, intents: &[Intent]) -> usize {
    let mut failures = 0;
    for intent in intents {
        if let Err(e) = execute(ctx, intent) {
            failures += 1;
            if e.is_warning() {
                warn!("{}", e);
                ctx.feedback.output.push(e.to_string());
            } else {
                debug!("{}", e);
            }
        }
    }
    failures
}
