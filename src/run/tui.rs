//! Terminal mode: an always-open prompt over the document.

use std::io;
use std::time::Duration;

use graphprompt::config::Config;
use graphprompt::core::graph::Document;
use graphprompt::core::input::Keymap;
use graphprompt::core::print::{diff_lines, render_document};
use graphprompt::core::prompt::{PromptDriver, PromptEvent};
use graphprompt::core::session::Interpreter;
use graphprompt::terminal;
use graphprompt::terminal::events::TerminalEvent;
use graphprompt::terminal::render::{ScreenState, compose, draw};
use tracing::{info, warn};

/// Prompt state plus the committed rendering the preview is diffed against
struct TerminalSession {
    interp: Interpreter,
    doc: Document,
    driver: PromptDriver,
    committed: String,
}

impl TerminalSession {
    fn open(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        if !self.interp.is_open() {
            self.interp.activate(&self.doc)?;
        }
        Ok(())
    }

    /// Returns true when the user asked to quit
    fn handle(&mut self, event: TerminalEvent) -> Result<bool, Box<dyn std::error::Error>> {
        match event {
            TerminalEvent::Input(input) => {
                let result = self
                    .driver
                    .handle_key(&mut self.interp, &mut self.doc, &input)?;
                match result {
                    PromptEvent::Quit => return Ok(true),
                    PromptEvent::Confirmed | PromptEvent::Applied => {
                        self.committed = render_document(&self.doc);
                        self.open()?;
                    }
                    PromptEvent::Cancelled => self.open()?,
                    PromptEvent::Edited | PromptEvent::Unchanged => {}
                }
            }
            TerminalEvent::FocusLost => {
                self.driver.cancel(&mut self.interp, &mut self.doc)?;
                self.open()?;
            }
            TerminalEvent::Resize(_, _) | TerminalEvent::None => {}
        }
        Ok(false)
    }

    fn redraw(&self) -> Result<(), Box<dyn std::error::Error>> {
        let (cols, rows) = crossterm::terminal::size()?;
        let document = render_document(&self.doc);
        let diff = diff_lines(&self.committed, &document);
        let state = ScreenState {
            document: &document,
            diff: &diff,
            output: self.interp.output(),
            hint: self.interp.hint(),
            line: self.driver.line.text(),
            cursor: self.driver.line.cursor(),
        };
        let mut stdout = io::stdout();
        draw(&compose(&state, cols, rows), &mut stdout)
    }
}

/// Run in terminal mode until a quit key is pressed.
pub fn run_terminal_mode(
    interp: Interpreter,
    doc: Document,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let (keymap, rejected) = Keymap::from_bindings(&config.keybindings);
    for error in rejected {
        warn!("ignoring key binding: {}", error);
    }

    let committed = render_document(&doc);
    let mut session = TerminalSession {
        interp,
        doc,
        driver: PromptDriver::new(keymap),
        committed,
    };
    session.open()?;

    let _raw_mode = terminal::raw::RawMode::new()?;
    session.redraw()?;

    let mut event_handler = terminal::events::EventHandler::new();
    loop {
        if !event_handler.poll(Duration::from_millis(50))? {
            continue;
        }
        let event = event_handler.read()?;
        if event == TerminalEvent::None {
            continue;
        }
        if session.handle(event)? {
            break;
        }
        session.redraw()?;
    }

    info!("terminal session ended with {} nodes", session.doc.node_count());
    Ok(())
}
