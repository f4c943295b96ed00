//! graphprompt - build node graphs by typing
//!
//! This is the main entry point. It parses CLI arguments and delegates
//! to the appropriate mode runner (list, batch, or terminal).

mod cli;
mod run;

use std::io;

use graphprompt::config::Config;
use graphprompt::core::session::Interpreter;
use graphprompt::logging::{self, LogTarget};
use graphprompt::user_config;

const DEFAULT_LOG_FILTER: &str = "graphprompt=info";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let cli = cli::Cli::parse()?;
    if cli.help {
        cli::print_help();
        return Ok(());
    }

    // Load configuration
    let mut config = Config::default();
    user_config::configure(&mut config);

    // Apply CLI overrides
    cli.apply_to_config(&mut config);

    let mode = run::detect_mode(&cli);
    let filter = config
        .get_string("log_filter")
        .unwrap_or(DEFAULT_LOG_FILTER)
        .to_string();
    let target = match (&cli.log, &mode) {
        (Some(path), _) => LogTarget::File(path),
        (None, run::RunMode::Terminal) => LogTarget::Off,
        (None, _) => LogTarget::Stderr,
    };
    logging::init(&filter, target)?;

    let mut doc = run::new_document(&config);
    let mut interp = Interpreter::with_default_sources(config.clone());

    match mode {
        run::RunMode::List(query) => {
            let mut stdout = io::stdout().lock();
            run::run_list_mode(interp.catalog(), &query, &mut stdout)?;
        }
        run::RunMode::Batch => {
            let mut stdout = io::stdout().lock();
            run::run_batch_mode(&mut interp, &mut doc, &cli.eval, cli.cancel, &mut stdout)?;
        }
        run::RunMode::Piped => {
            let lines = run::read_piped_lines()?;
            let mut stdout = io::stdout().lock();
            run::run_batch_mode(&mut interp, &mut doc, &lines, cli.cancel, &mut stdout)?;
        }
        run::RunMode::Terminal => {
            run::run_terminal_mode(interp, doc, &config)?;
        }
    }

    Ok(())
}
