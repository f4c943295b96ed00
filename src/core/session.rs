//! Prompt sessions
//!
//! The `Interpreter` owns the catalog, the verb registry and the state of
//! the one prompt session that can be open at a time. Every keystroke
//! rolls the document back to where the session started and replays the
//! whole line, so what the user sees is exactly what confirming commits.

use crate::config::Config;
use crate::core::capability::{default_sources, CapabilitySource};
use crate::core::catalog::Catalog;
use crate::core::command::CommandRegistry;
use crate::core::commands::default_registry;
use crate::core::dispatcher::{execute_all, resolve_line};
use crate::core::error::SessionError;
use crate::core::graph::Document;
use crate::core::id::NodeId;
use crate::core::journal::SessionJournal;
use crate::core::mutation::{EditContext, Feedback};
use tracing::{debug, info, warn};

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Closed,
    /// `anchor` is the selection at activation, restored on every replay
    Open { anchor: Option<NodeId> },
}

pub struct Interpreter {
    config: Config,
    sources: Vec<Box<dyn CapabilitySource>>,
    catalog: Catalog,
    registry: CommandRegistry,
    state: SessionState,
    /// Whole selection at activation; `anchor` is its first node
    opened_with: Vec<NodeId>,
    journal: SessionJournal,
    stack: Vec<NodeId>,
    feedback: Feedback,
    text: String,
}

impl Interpreter {
    /// Build the catalog from `sources` and the registry with configured
    /// verb aliases
    pub fn new(config: Config, sources: Vec<Box<dyn CapabilitySource>>) -> Self {
        let catalog = Catalog::build(&sources, &config);
        let mut registry = default_registry();
        for alias in &config.command_aliases {
            if !registry.alias(&alias.from, &alias.to) {
                warn!("verb alias {} points at unknown verb {}", alias.from, alias.to);
            }
        }

        Self {
            config,
            sources,
            catalog,
            registry,
            state: SessionState::Closed,
            opened_with: Vec::new(),
            journal: SessionJournal::new(),
            stack: Vec::new(),
            feedback: Feedback::default(),
            text: String::new(),
        }
    }

    /// Interpreter over the built-in node types, manifests and assets
    pub fn with_default_sources(config: Config) -> Self {
        Self::new(config, default_sources())
    }

    /// Rescan every source and replace the catalog. An open session keeps
    /// its line; the next keystroke resolves against the new catalog.
    pub fn rebuild_catalog(&mut self) -> usize {
        self.catalog = Catalog::build(&self.sources, &self.config);
        info!("catalog rebuilt with {} entries", self.catalog.len());
        self.catalog.len()
    }

    /// Wire the selected nodes together left to right
    pub fn connect_selection(&mut self, doc: &mut Document) -> Result<usize, SessionError> {
        if self.is_open() {
            return Err(SessionError::AlreadyOpen);
        }
        let mut stack = Vec::new();
        let mut ctx = EditContext {
            doc,
            catalog: &self.catalog,
            journal: &mut self.journal,
            stack: &mut stack,
            feedback: &mut self.feedback,
        };
        let made = ctx.connect_selection();
        self.journal.commit();
        info!("connected selection with {} edges", made);
        Ok(made)
    }

    /// Select every node of the graph holding the selection, or of the
    /// open graph
    pub fn select_all(&mut self, doc: &mut Document) -> Result<usize, SessionError> {
        if self.is_open() {
            return Err(SessionError::AlreadyOpen);
        }
        let graph = doc
            .selection()
            .and_then(|id| doc.node(id))
            .map_or(doc.root(), |n| n.graph);
        doc.select_all(graph);
        Ok(doc.selected().len())
    }

    /// Open a session, remembering the current selection
    pub fn activate(&mut self, doc: &Document) -> Result<(), SessionError> {
        if self.is_open() {
            return Err(SessionError::AlreadyOpen);
        }
        let anchor = doc.selection();
        self.state = SessionState::Open { anchor };
        self.opened_with = doc.selected().to_vec();
        self.journal = SessionJournal::new();
        self.stack.clear();
        self.feedback.clear();
        self.text.clear();
        self.feedback.hint = Some(self.empty_hint());
        info!("prompt opened, anchor {:?}", anchor);
        Ok(())
    }

    /// Replace the line with `text` and replay it from scratch
    pub fn keystroke(&mut self, doc: &mut Document, text: &str) -> Result<(), SessionError> {
        self.anchor()?;
        self.journal.rollback(doc);
        doc.set_selection(self.opened_with.clone());
        self.stack.clear();
        self.feedback.clear();
        self.text = text.to_string();

        if text.trim().is_empty() {
            self.feedback.hint = Some(self.empty_hint());
            return Ok(());
        }

        let intents = resolve_line(&self.registry, text);
        let mut ctx = EditContext {
            doc,
            catalog: &self.catalog,
            journal: &mut self.journal,
            stack: &mut self.stack,
            feedback: &mut self.feedback,
        };
        let failures = execute_all(&mut ctx, &intents);
        debug!(
            "replayed {:?}: {} intents, {} failed, {} journal entries",
            text,
            intents.len(),
            failures,
            self.journal.len()
        );
        Ok(())
    }

    /// Keep everything and close; the selection stays where the line left it
    pub fn confirm(&mut self) -> Result<usize, SessionError> {
        self.anchor()?;
        let kept = self.journal.commit();
        self.close();
        info!("prompt confirmed, {} changes kept", kept);
        Ok(kept)
    }

    /// Undo everything and close, restoring the activation selection
    pub fn cancel(&mut self, doc: &mut Document) -> Result<usize, SessionError> {
        self.anchor()?;
        let reverted = self.journal.rollback(doc);
        doc.set_selection(self.opened_with.clone());
        self.close();
        info!("prompt cancelled, {} changes reverted", reverted);
        Ok(reverted)
    }

    fn close(&mut self) {
        self.state = SessionState::Closed;
        self.opened_with.clear();
        self.stack.clear();
    }

    fn anchor(&self) -> Result<Option<NodeId>, SessionError> {
        match self.state {
            SessionState::Open { anchor } => Ok(anchor),
            SessionState::Closed => Err(SessionError::NotOpen),
        }
    }

    fn empty_hint(&self) -> String {
        format!("Type unit names ({} units)", self.catalog.len())
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, SessionState::Open { .. })
    }

    /// Current line
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn hint(&self) -> Option<&str> {
        self.feedback.hint.as_deref()
    }

    /// Output of the latest replay
    pub fn output(&self) -> &[String] {
        &self.feedback.output
    }

    pub fn journal(&self) -> &SessionJournal {
        &self.journal
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Takes effect on the next `rebuild_catalog`
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }
}

// =============================================================================
// TESTS
// =============================================================================
