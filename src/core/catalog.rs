//! Catalog of creatable graph elements
//!
//! The catalog is a flat list of `(name, factory)` entries, kept in a
//! stable ascending order of name length. Search is a case-insensitive
//! substring match that returns entries in catalog order, so shorter
//! (usually more general) names win ties.

use crate::config::Config;
use crate::core::capability::{CapabilitySource, SourceStage};
use crate::core::error::FactoryError;
use crate::core::node::NodeSpec;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// Hint text is cut to this many characters
pub const MAX_HINT_LENGTH: usize = 100;

/// Builds a fresh node blueprint
pub type Factory = Arc<dyn Fn() -> Result<NodeSpec, FactoryError> + Send + Sync>;

/// A named, constructible element
#[derive(Clone)]
pub struct CatalogEntry {
    pub name: String,
    factory: Factory,
}

impl CatalogEntry {
    pub fn new<F>(name: &str, factory: F) -> Self
    where
        F: Fn() -> Result<NodeSpec, FactoryError> + Send + Sync + 'static,
    {
        Self::with_factory(name, Arc::new(factory))
    }

    /// Share an existing factory under another name
    pub fn with_factory(name: &str, factory: Factory) -> Self {
        Self {
            name: name.to_lowercase(),
            factory,
        }
    }

    pub fn factory(&self) -> Factory {
        Arc::clone(&self.factory)
    }

    /// Build the blueprint, falling back to a neutral node on failure
    pub fn instantiate(&self) -> NodeSpec {
        match (self.factory)() {
            Ok(spec) => spec,
            Err(e) => {
                debug!("factory for {} failed: {}", self.name, e);
                NodeSpec::null()
            }
        }
    }
}

impl fmt::Debug for CatalogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogEntry")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Ordered, searchable index of catalog entries
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Build from capability sources.
    ///
    /// Discovery sources run first; shortcut sources then see the
    /// discovered entries (aliases and shortcuts point at them). Shortcuts
    /// are placed ahead of discovered entries before the length sort.
    pub fn build(sources: &[Box<dyn CapabilitySource>], config: &Config) -> Self {
        let mut discovered = Vec::new();
        for source in sources.iter().filter(|s| s.stage() == SourceStage::Discovery) {
            let found = source.entries(&[], config);
            debug!("{} discovered {} entries", source.name(), found.len());
            discovered.extend(found);
        }

        let mut entries = Vec::new();
        for source in sources.iter().filter(|s| s.stage() == SourceStage::Shortcut) {
            let found = source.entries(&discovered, config);
            debug!("{} added {} shortcuts", source.name(), found.len());
            entries.extend(found);
        }
        entries.extend(discovered);

        let catalog = Self::from_entries(entries);
        info!("catalog built with {} entries", catalog.len());
        catalog
    }

    /// Wrap entries, applying the stable length sort
    pub fn from_entries(mut entries: Vec<CatalogEntry>) -> Self {
        entries.sort_by_key(|e| e.name.chars().count());
        Self { entries }
    }

    /// First `limit` entries whose name contains `query`, in catalog order
    pub fn search(&self, query: &str, limit: usize) -> Vec<&CatalogEntry> {
        let needle = query.to_lowercase();
        self.entries
            .iter()
            .filter(|e| e.name.contains(&needle))
            .take(limit)
            .collect()
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Join match names, cut to `MAX_HINT_LENGTH` characters plus `...`
    pub fn describe_hint(matches: &[&CatalogEntry]) -> String {
        let hint = matches
            .iter()
            .map(|e| e.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        if hint.chars().count() > MAX_HINT_LENGTH {
            let mut cut: String = hint.chars().take(MAX_HINT_LENGTH).collect();
            cut.push_str("...");
            cut
        } else {
            hint
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
