//! Error types for the prompt interpreter
//!
//! Nothing here is fatal: command errors are contained to the token that
//! produced them, factory errors are absorbed by the catalog, and session
//! errors only report misuse of the open/close protocol.

use crate::core::node::PortKind;
use thiserror::Error;

/// Failure of a single token's action
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommandError {
    #[error("Nothing is selected")]
    MissingSelection,

    #[error("No free {kind} on the selected node")]
    NoAvailablePort { kind: PortKind },

    #[error("Derived variable name is empty")]
    EmptyDerivedName,

    #[error("New {kind} needs a name")]
    EmptyName { kind: PortKind },
}

impl CommandError {
    /// Whether the user should see this error as a warning
    pub fn is_warning(&self) -> bool {
        !matches!(self, CommandError::EmptyDerivedName)
    }
}

/// Failure inside a catalog factory
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FactoryError {
    #[error("{name} cannot be constructed")]
    Unconstructible { name: String },

    #[error("{name} failed to construct: {reason}")]
    Failed { name: String, reason: String },
}

/// Misuse of the session state machine
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    #[error("A prompt session is already open")]
    AlreadyOpen,

    #[error("No prompt session is open")]
    NotOpen,
}
