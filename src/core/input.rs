use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Native key representation for the prompt
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Ctrl(char),
    Alt(char),
    Esc,
    Enter,
    Backspace,
    Tab,
    Delete,
    Home,
    End,
    Up,
    Down,
    Left,
    Right,
    Null,
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Char(c) => write!(f, "{}", c),
            Key::Ctrl(c) => write!(f, "C-{}", c),
            Key::Alt(c) => write!(f, "M-{}", c),
            Key::Esc => write!(f, "ESC"),
            Key::Enter => write!(f, "RET"),
            Key::Backspace => write!(f, "BS"),
            Key::Tab => write!(f, "TAB"),
            Key::Delete => write!(f, "DEL"),
            Key::Home => write!(f, "Home"),
            Key::End => write!(f, "End"),
            Key::Up => write!(f, "↑"),
            Key::Down => write!(f, "↓"),
            Key::Left => write!(f, "←"),
            Key::Right => write!(f, "→"),
            Key::Null => write!(f, "NUL"),
        }
    }
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

impl FromStr for Key {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Ctrl notation: ^X or C-x
        if let Some(c) = s.strip_prefix('^').and_then(single_char) {
            return Ok(Key::Ctrl(c.to_ascii_lowercase()));
        }
        if let Some(c) = s.strip_prefix("C-").and_then(single_char) {
            return Ok(Key::Ctrl(c.to_ascii_lowercase()));
        }

        // Alt/Meta notation: M-x or ESC-x
        if let Some(c) = s
            .strip_prefix("M-")
            .or_else(|| s.strip_prefix("ESC-"))
            .and_then(single_char)
        {
            return Ok(Key::Alt(c.to_ascii_lowercase()));
        }

        match s.to_ascii_uppercase().as_str() {
            "ENTER" | "RET" => Ok(Key::Enter),
            "TAB" => Ok(Key::Tab),
            "BACKSPACE" | "BS" => Ok(Key::Backspace),
            "ESC" => Ok(Key::Esc),
            "DELETE" | "DEL" => Ok(Key::Delete),
            "HOME" => Ok(Key::Home),
            "END" => Ok(Key::End),
            "UP" => Ok(Key::Up),
            "DOWN" => Ok(Key::Down),
            "LEFT" => Ok(Key::Left),
            "RIGHT" => Ok(Key::Right),
            "NUL" | "NULL" => Ok(Key::Null),
            // A single raw character keeps its case
            _ => single_char(s)
                .map(Key::Char)
                .ok_or_else(|| format!("Unknown key: {}", s)),
        }
    }
}

/// Native input event representation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputEvent {
    pub key: Key,
    pub shift: bool,
    pub alt: bool,
    pub ctrl: bool,
}

impl InputEvent {
    pub fn key(key: Key) -> Self {
        let ctrl = matches!(key, Key::Ctrl(_));
        let alt = matches!(key, Key::Alt(_));
        Self {
            key,
            shift: false,
            alt,
            ctrl,
        }
    }
}

/// Session-level actions that keys can be bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptAction {
    Confirm,
    Cancel,
    Quit,
    /// Rescan capability sources
    Rebuild,
    SelectAll,
    /// Wire the selected nodes together left to right
    ConnectSelection,
}

impl FromStr for PromptAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "confirm" => Ok(PromptAction::Confirm),
            "cancel" => Ok(PromptAction::Cancel),
            "quit" => Ok(PromptAction::Quit),
            "rebuild" => Ok(PromptAction::Rebuild),
            "select-all" => Ok(PromptAction::SelectAll),
            "connect-selection" => Ok(PromptAction::ConnectSelection),
            _ => Err(format!("Unknown action: {}", s)),
        }
    }
}

/// What a key does to the prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Action(PromptAction),
    /// Key edits the line
    Edit(Key),
    InsertChar(char),
    Ignore,
}

/// Single-key binding table
#[derive(Debug, Clone, Default)]
pub struct Keymap {
    bindings: HashMap<Key, PromptAction>,
}

impl Keymap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `key -> action` pairs; returns the entries that did not parse
    pub fn from_bindings(bindings: &HashMap<String, String>) -> (Self, Vec<String>) {
        let mut keymap = Self::new();
        let mut rejected = Vec::new();
        for (key, action) in bindings {
            match (normalize(key), action.parse::<PromptAction>()) {
                (Ok(k), Ok(a)) => {
                    keymap.bindings.insert(k, a);
                }
                (Err(e), _) | (_, Err(e)) => rejected.push(e),
            }
        }
        rejected.sort();
        (keymap, rejected)
    }

    pub fn bind(&mut self, key: Key, action: PromptAction) {
        self.bindings.insert(key, action);
    }

    /// Classify an event: bound action, line edit, text, or nothing
    pub fn lookup(&self, event: &InputEvent) -> KeyAction {
        let key = match &event.key {
            Key::Ctrl(c) => Key::Ctrl(c.to_ascii_lowercase()),
            Key::Alt(c) => Key::Alt(c.to_ascii_lowercase()),
            other => other.clone(),
        };
        if let Some(action) = self.bindings.get(&key) {
            return KeyAction::Action(*action);
        }
        match key {
            Key::Char(c) if !event.ctrl && !event.alt => KeyAction::InsertChar(c),
            Key::Backspace | Key::Delete | Key::Left | Key::Right | Key::Home | Key::End => {
                KeyAction::Edit(key)
            }
            _ => KeyAction::Ignore,
        }
    }
}

fn normalize(s: &str) -> Result<Key, String> {
    s.parse::<Key>().map(|k| match k {
        Key::Ctrl(c) => Key::Ctrl(c.to_ascii_lowercase()),
        other => other,
    })
}
