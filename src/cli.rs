//! Command-line argument parsing for graphprompt.
//!
//! This module provides the `Cli` struct which encapsulates all command-line
//! options and methods for parsing them.

use graphprompt::config::{Config, ConfigValue};
use std::path::PathBuf;

/// Command-line interface configuration.
#[derive(Debug, Default)]
pub struct Cli {
    /// Lines to type and confirm in batch mode (-e flag)
    pub eval: Vec<String>,

    /// Cancel each batch line instead of confirming it
    pub cancel: bool,

    /// Catalog query to list
    pub list: Option<String>,

    /// Log file; terminal mode does not log otherwise
    pub log: Option<PathBuf>,

    /// Title override for the root graph
    pub title: Option<String>,

    /// Print usage and exit
    pub help: bool,
}

impl Cli {
    /// Parse command-line arguments.
    ///
    /// Returns a `Cli` struct populated with parsed arguments.
    /// Returns an error if required values are missing.
    pub fn parse() -> Result<Self, Box<dyn std::error::Error>> {
        Self::parse_from(std::env::args().skip(1))
    }

    /// Parse an argument list that excludes the program name
    pub fn parse_from<I>(args: I) -> Result<Self, Box<dyn std::error::Error>>
    where
        I: IntoIterator<Item = String>,
    {
        let mut cli = Self::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-c" | "--cancel" => cli.cancel = true,
                "-h" | "--help" => cli.help = true,
                "-e" | "--eval" => {
                    if let Some(line) = args.next() {
                        cli.eval.push(line);
                    } else {
                        return Err("--eval requires a value".into());
                    }
                }
                "-l" | "--list" => {
                    if let Some(query) = args.next() {
                        cli.list = Some(query);
                    } else {
                        return Err("--list requires a value".into());
                    }
                }
                "--log" => {
                    if let Some(path) = args.next() {
                        cli.log = Some(PathBuf::from(path));
                    } else {
                        return Err("--log requires a value".into());
                    }
                }
                "-t" | "--title" => {
                    if let Some(title) = args.next() {
                        cli.title = Some(title);
                    } else {
                        return Err("--title requires a value".into());
                    }
                }
                arg if arg.starts_with('-') => {
                    return Err(format!("Unknown flag: {}. Use --help for usage.", arg).into());
                }
                _ => {
                    return Err(format!(
                        "Unexpected argument: {}. Lines are passed with --eval.",
                        arg
                    )
                    .into());
                }
            }
        }

        Ok(cli)
    }

    /// Apply CLI overrides to a configuration object.
    pub fn apply_to_config(&self, config: &mut Config) {
        if let Some(title) = &self.title {
            config.set("document_title", ConfigValue::String(title.clone()));
        }
    }
}

pub fn print_help() {
    println!("graphprompt - Build node graphs from a command line");
    println!();
    println!("Usage: graphprompt [OPTIONS]");
    println!();
    println!("Without options an interactive prompt opens in the terminal.");
    println!();
    println!("Options:");
    println!("  -h, --help         Show this help message");
    println!("  -e, --eval LINE    Type LINE and confirm it (repeatable)");
    println!("  -c, --cancel       Cancel each --eval line instead of confirming");
    println!("  -l, --list QUERY   List catalog entries containing QUERY");
    println!("  -t, --title NAME   Title of the root graph");
    println!("      --log FILE     Write log output to FILE");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, Box<dyn std::error::Error>> {
        Cli::parse_from(args.iter().map(|a| a.to_string()))
    }

    #[test]
    fn test_parse_batch_flags() {
        let cli = parse(&["-e", "onstart", "--eval", "if", "-c", "--log", "out.log"]).unwrap();
        assert_eq!(cli.eval, vec!["onstart".to_string(), "if".to_string()]);
        assert!(cli.cancel);
        assert_eq!(cli.log, Some(PathBuf::from("out.log")));
        assert!(cli.list.is_none());
    }

    #[test]
    fn test_missing_values() {
        assert!(parse(&["-e"]).is_err());
        assert!(parse(&["--list"]).is_err());
        assert!(parse(&["--log"]).is_err());
    }

    #[test]
    fn test_unknown_arguments() {
        let err = parse(&["--gui"]).unwrap_err();
        assert!(err.to_string().contains("Unknown flag: --gui"));
        assert!(parse(&["onstart"]).is_err());
    }

    #[test]
    fn test_title_override() {
        let cli = parse(&["-t", "Enemy AI"]).unwrap();
        let mut config = Config::default();
        config.set("document_title", "Main");
        cli.apply_to_config(&mut config);
        assert_eq!(config.get_string("document_title"), Some("Enemy AI"));
    }
}
