//! This module constitutes the core, headless, and backend-agnostic engine of graphprompt.
//! It holds the host graph model, the catalog of creatable elements, the
//! prompt verbs and their dispatch, and the session that replays a line
//! on every keystroke.

pub mod capability;
pub mod catalog;
pub mod command;
pub mod commands;
pub mod dispatcher;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod id;
pub mod input;
pub mod journal;
pub mod layout;
pub mod mutation;
pub mod node;
pub mod print;
pub mod prompt;
pub mod session;
pub mod stdlib;
pub mod utf8;
pub mod value;
pub mod variables;
