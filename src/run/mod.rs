//! Execution modes for graphprompt.
//!
//! This module contains the implementation of the different front ends:
//! - Batch mode types lines from the command line or stdin
//! - Terminal mode runs the interactive prompt
//! - List mode prints catalog matches

mod batch;
mod tui;

use std::io::{self, BufRead, IsTerminal, Write};

use crate::cli::Cli;
use graphprompt::config::Config;
use graphprompt::core::catalog::Catalog;
use graphprompt::core::graph::Document;

pub use batch::run_batch_mode;
pub use tui::run_terminal_mode;

/// Most entries `--list` prints
pub const LIST_LIMIT: usize = 1000;

const DEFAULT_TITLE: &str = "Main";

/// Front-end execution mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunMode {
    List(String),
    /// Lines come from `--eval`
    Batch,
    /// Lines come from stdin
    Piped,
    Terminal,
}

/// Pick the mode from the parsed flags and whether stdin is a terminal
pub fn detect_mode(cli: &Cli) -> RunMode {
    detect_mode_internal(cli, io::stdin().is_terminal())
}

pub fn detect_mode_internal(cli: &Cli, is_stdin_tty: bool) -> RunMode {
    if let Some(query) = &cli.list {
        return RunMode::List(query.clone());
    }
    if !cli.eval.is_empty() {
        return RunMode::Batch;
    }
    if !is_stdin_tty {
        return RunMode::Piped;
    }
    RunMode::Terminal
}

/// Empty document titled from the `document_title` setting
pub fn new_document(config: &Config) -> Document {
    Document::new(config.get_string("document_title").unwrap_or(DEFAULT_TITLE))
}

/// Non-empty lines from stdin, `#` comments skipped
pub fn read_piped_lines() -> Result<Vec<String>, Box<dyn std::error::Error>> {
    let mut lines = Vec::new();
    for line in io::stdin().lock().lines() {
        let line = line?;
        if !line.trim().is_empty() && !line.starts_with('#') {
            lines.push(line);
        }
    }
    Ok(lines)
}

/// Print up to `LIST_LIMIT` catalog names containing `query`
pub fn run_list_mode<W: Write>(
    catalog: &Catalog,
    query: &str,
    out: &mut W,
) -> Result<usize, Box<dyn std::error::Error>> {
    let matches = catalog.search(query, LIST_LIMIT);
    for entry in &matches {
        writeln!(out, "{}", entry.name)?;
    }
    Ok(matches.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphprompt::core::catalog::CatalogEntry;
    use graphprompt::core::node::{NodeKind, NodeSpec};

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(args.iter().map(|a| a.to_string())).unwrap()
    }

    #[test]
    fn test_detect_mode() {
        assert_eq!(
            detect_mode_internal(&cli(&["-l", "add"]), true),
            RunMode::List("add".into())
        );
        assert_eq!(detect_mode_internal(&cli(&["-e", "if"]), false), RunMode::Batch);
        assert_eq!(detect_mode_internal(&cli(&[]), false), RunMode::Piped);
        assert_eq!(detect_mode_internal(&cli(&[]), true), RunMode::Terminal);
    }

    #[test]
    fn test_new_document_title() {
        let mut config = Config::default();
        let doc = new_document(&config);
        assert_eq!(doc.graph(doc.root()).unwrap().title, "Main");
        config.set("document_title", "Boss");
        let doc = new_document(&config);
        assert_eq!(doc.graph(doc.root()).unwrap().title, "Boss");
    }

    #[test]
    fn test_list_mode() {
        let catalog = Catalog::from_entries(vec![
            CatalogEntry::new("vector3.add(vector3,vector3)", || {
                Ok(NodeSpec::new(NodeKind::Unit("Add".into()), "Add"))
            }),
            CatalogEntry::new("if", || Ok(NodeSpec::new(NodeKind::Unit("If".into()), "If"))),
            CatalogEntry::new("add", || Ok(NodeSpec::new(NodeKind::Unit("Add".into()), "Add"))),
        ]);
        let mut out = Vec::new();
        let count = run_list_mode(&catalog, "ADD", &mut out).unwrap();
        assert_eq!(count, 2);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "add\nvector3.add(vector3,vector3)\n"
        );
    }
}
