use crate::core::input::{InputEvent, Key};

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use std::time::Duration;

/// Terminal events the prompt cares about
#[derive(Debug, Clone, PartialEq)]
pub enum TerminalEvent {
    Input(InputEvent),
    Resize(u16, u16),
    /// Window lost focus; the open line is cancelled
    FocusLost,
    None,
}

#[derive(Debug, Default)]
pub struct EventHandler;

impl EventHandler {
    /// Create a new EventHandler
    pub fn new() -> Self {
        Self
    }

    /// Check for available events with a timeout
    pub fn poll(&self, timeout: Duration) -> Result<bool, Box<dyn std::error::Error>> {
        Ok(crossterm::event::poll(timeout)?)
    }

    /// Read the next event; call after `poll` reported one
    pub fn read(&mut self) -> Result<TerminalEvent, Box<dyn std::error::Error>> {
        if event::poll(Duration::from_millis(0))? {
            return Ok(translate(event::read()?));
        }
        Ok(TerminalEvent::None)
    }
}

fn translate(event: Event) -> TerminalEvent {
    match event {
        // Key releases and repeats arrive on some platforms
        Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
            TerminalEvent::Input(crossterm_key_to_input(key_event))
        }
        Event::Resize(cols, rows) => TerminalEvent::Resize(cols, rows),
        Event::FocusLost => TerminalEvent::FocusLost,
        _ => TerminalEvent::None,
    }
}

fn crossterm_key_to_input(key_event: event::KeyEvent) -> InputEvent {
    let code = key_event.code;
    let modifiers = key_event.modifiers;

    let shift = modifiers.contains(KeyModifiers::SHIFT);
    let alt = modifiers.contains(KeyModifiers::ALT);
    let ctrl = modifiers.contains(KeyModifiers::CONTROL);

    let key = match code {
        KeyCode::Char(c) => {
            if ctrl && !alt {
                Key::Ctrl(c)
            } else if alt && !ctrl {
                Key::Alt(c)
            } else {
                Key::Char(c)
            }
        }
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Enter => Key::Enter,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::Tab | KeyCode::BackTab => Key::Tab,
        KeyCode::Delete => Key::Delete,
        KeyCode::Esc => Key::Esc,
        _ => Key::Null,
    };

    InputEvent {
        key,
        shift,
        alt,
        ctrl,
    }
}
