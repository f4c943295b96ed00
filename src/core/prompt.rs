//! Prompt line editing shared by the interactive and batch front ends
//!
//! `PromptLine` is the text being typed; `PromptDriver` ties it to an
//! `Interpreter` so every edit is replayed against the document.

use crate::core::graph::Document;
use crate::core::input::{InputEvent, Key, KeyAction, Keymap, PromptAction};
use crate::core::session::Interpreter;
use crate::core::error::SessionError;
use crate::core::utf8;

/// Single-line text with a grapheme cursor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptLine {
    text: String,
    /// Cursor position in grapheme clusters
    cursor: usize,
}

impl PromptLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn byte_at(&self, grapheme: usize) -> usize {
        utf8::grapheme_byte_index(&self.text, grapheme).unwrap_or(self.text.len())
    }

    pub fn insert(&mut self, c: char) {
        let at = self.byte_at(self.cursor);
        let before = utf8::grapheme_count(&self.text);
        self.text.insert(at, c);
        // A combining mark joins the previous cluster instead of adding one
        if utf8::grapheme_count(&self.text) > before {
            self.cursor += 1;
        }
    }

    /// Apply an editing key. Returns whether the text changed.
    pub fn edit(&mut self, key: &Key) -> bool {
        let len = utf8::grapheme_count(&self.text);
        match key {
            Key::Backspace if self.cursor > 0 => {
                let start = self.byte_at(self.cursor - 1);
                let end = self.byte_at(self.cursor);
                self.text.replace_range(start..end, "");
                self.cursor -= 1;
                true
            }
            Key::Delete if self.cursor < len => {
                let start = self.byte_at(self.cursor);
                let end = self.byte_at(self.cursor + 1);
                self.text.replace_range(start..end, "");
                true
            }
            Key::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                false
            }
            Key::Right => {
                self.cursor = (self.cursor + 1).min(len);
                false
            }
            Key::Home => {
                self.cursor = 0;
                false
            }
            Key::End => {
                self.cursor = len;
                false
            }
            _ => false,
        }
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }
}

/// What a key press did to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptEvent {
    /// Line changed and was replayed
    Edited,
    /// Cursor moved or key ignored
    Unchanged,
    Confirmed,
    Cancelled,
    /// Line confirmed, then a document action ran
    Applied,
    Quit,
}

/// Feeds key presses into an interpreter session
pub struct PromptDriver {
    pub line: PromptLine,
    keymap: Keymap,
}

impl PromptDriver {
    pub fn new(keymap: Keymap) -> Self {
        Self {
            line: PromptLine::new(),
            keymap,
        }
    }

    /// Handle one key, opening a session on demand
    pub fn handle_key(
        &mut self,
        interp: &mut Interpreter,
        doc: &mut Document,
        event: &InputEvent,
    ) -> Result<PromptEvent, SessionError> {
        match self.keymap.lookup(event) {
            KeyAction::Action(PromptAction::Quit) => {
                if interp.is_open() {
                    interp.cancel(doc)?;
                }
                Ok(PromptEvent::Quit)
            }
            KeyAction::Action(PromptAction::Confirm) => {
                if interp.is_open() {
                    interp.confirm()?;
                }
                self.line.clear();
                Ok(PromptEvent::Confirmed)
            }
            KeyAction::Action(PromptAction::Cancel) => self.cancel(interp, doc),
            KeyAction::Action(PromptAction::Rebuild) => {
                interp.rebuild_catalog();
                if interp.is_open() {
                    interp.keystroke(doc, self.line.text())?;
                    Ok(PromptEvent::Edited)
                } else {
                    Ok(PromptEvent::Unchanged)
                }
            }
            KeyAction::Action(PromptAction::SelectAll) => {
                self.settle(interp)?;
                interp.select_all(doc)?;
                Ok(PromptEvent::Applied)
            }
            KeyAction::Action(PromptAction::ConnectSelection) => {
                self.settle(interp)?;
                interp.connect_selection(doc)?;
                Ok(PromptEvent::Applied)
            }
            KeyAction::InsertChar(c) => {
                self.line.insert(c);
                self.replay(interp, doc)
            }
            KeyAction::Edit(key) => {
                if self.line.edit(&key) {
                    self.replay(interp, doc)
                } else {
                    Ok(PromptEvent::Unchanged)
                }
            }
            KeyAction::Ignore => Ok(PromptEvent::Unchanged),
        }
    }

    /// Abandon the line; also used when the terminal loses focus
    pub fn cancel(&mut self, interp: &mut Interpreter, doc: &mut Document) -> Result<PromptEvent, SessionError> {
        if interp.is_open() {
            interp.cancel(doc)?;
        }
        self.line.clear();
        Ok(PromptEvent::Cancelled)
    }

    /// Keep whatever the line previewed so a document action can run
    fn settle(&mut self, interp: &mut Interpreter) -> Result<(), SessionError> {
        if interp.is_open() {
            interp.confirm()?;
        }
        self.line.clear();
        Ok(())
    }

    fn replay(&mut self, interp: &mut Interpreter, doc: &mut Document) -> Result<PromptEvent, SessionError> {
        if !interp.is_open() {
            interp.activate(doc)?;
        }
        interp.keystroke(doc, self.line.text())?;
        Ok(PromptEvent::Edited)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::core::geometry::Vec2;
    use crate::core::graph::EdgeKind;

    fn driver() -> PromptDriver {
        let mut keymap = Keymap::new();
        keymap.bind(Key::Enter, PromptAction::Confirm);
        keymap.bind(Key::Esc, PromptAction::Cancel);
        keymap.bind(Key::Ctrl('q'), PromptAction::Quit);
        keymap.bind(Key::Ctrl('r'), PromptAction::Rebuild);
        keymap.bind(Key::Ctrl('a'), PromptAction::SelectAll);
        keymap.bind(Key::Ctrl('e'), PromptAction::ConnectSelection);
        PromptDriver::new(keymap)
    }

    fn type_text(
        driver: &mut PromptDriver,
        interp: &mut Interpreter,
        doc: &mut Document,
        text: &str,
    ) {
        for c in text.chars() {
            driver
                .handle_key(interp, doc, &InputEvent::key(Key::Char(c)))
                .unwrap();
        }
    }

    #[test]
    fn test_line_editing() {
        let mut line = PromptLine::new();
        for c in "ifx".chars() {
            line.insert(c);
        }
        assert!(line.edit(&Key::Backspace));
        assert_eq!(line.text(), "if");
        assert!(!line.edit(&Key::Home));
        line.insert('!');
        assert_eq!(line.text(), "!if");
        assert!(line.edit(&Key::Delete));
        assert_eq!(line.text(), "!f");
        assert!(!line.edit(&Key::End));
        assert_eq!(line.cursor(), 2);
        assert!(!line.edit(&Key::Delete));
    }

    #[test]
    fn test_combining_mark_stays_in_cluster() {
        let mut line = PromptLine::new();
        line.insert('e');
        line.insert('\u{0301}');
        assert_eq!(line.cursor(), 1);
        assert!(line.edit(&Key::Backspace));
        assert_eq!(line.text(), "");
    }

    #[test]
    fn test_typing_previews_and_confirm_keeps() {
        let mut interp = Interpreter::with_default_sources(Config::default());
        let mut doc = Document::new("Main");
        let mut driver = driver();

        type_text(&mut driver, &mut interp, &mut doc, "onstart if");
        assert!(interp.is_open());
        assert_eq!(doc.node_count(), 2);

        let result = driver
            .handle_key(&mut interp, &mut doc, &InputEvent::key(Key::Enter))
            .unwrap();
        assert_eq!(result, PromptEvent::Confirmed);
        assert!(!interp.is_open());
        assert_eq!(doc.node_count(), 2);
        assert_eq!(driver.line.text(), "");
    }

    #[test]
    fn test_escape_reverts() {
        let mut interp = Interpreter::with_default_sources(Config::default());
        let mut doc = Document::new("Main");
        let mut driver = driver();

        type_text(&mut driver, &mut interp, &mut doc, "sequence");
        let result = driver
            .handle_key(&mut interp, &mut doc, &InputEvent::key(Key::Esc))
            .unwrap();
        assert_eq!(result, PromptEvent::Cancelled);
        assert_eq!(doc.node_count(), 0);
        assert_eq!(
            driver
                .handle_key(&mut interp, &mut doc, &InputEvent::key(Key::Ctrl('q')))
                .unwrap(),
            PromptEvent::Quit
        );
    }

    #[test]
    fn test_select_all_then_connect() {
        let mut interp = Interpreter::with_default_sources(Config::default());
        let mut doc = Document::new("Main");
        let root = doc.root();
        let start = interp.catalog().search("onstart", 1)[0].instantiate();
        let branch = interp.catalog().search("if", 1)[0].instantiate();
        let branch = doc.add_node(root, branch, Vec2::new(300.0, 0.0)).unwrap();
        let start = doc.add_node(root, start, Vec2::ZERO).unwrap();
        let mut driver = driver();

        // A pending line is kept before the selection changes
        type_text(&mut driver, &mut interp, &mut doc, "sequence");
        let ctrl = |c| InputEvent::key(Key::Ctrl(c));
        assert_eq!(
            driver.handle_key(&mut interp, &mut doc, &ctrl('a')).unwrap(),
            PromptEvent::Applied
        );
        assert!(!interp.is_open());
        assert_eq!(driver.line.text(), "");
        assert_eq!(doc.node_count(), 3);
        assert_eq!(doc.selected().len(), 3);

        doc.set_selection(vec![branch, start]);
        driver.handle_key(&mut interp, &mut doc, &ctrl('e')).unwrap();
        assert!(doc.output_connected(start, EdgeKind::Control, "trigger"));
        assert!(doc.input_connected(branch, EdgeKind::Control, "enter"));
    }

    #[test]
    fn test_rebuild_key_replays_line() {
        let mut interp = Interpreter::with_default_sources(Config::default());
        let mut doc = Document::new("Main");
        let mut driver = driver();

        type_text(&mut driver, &mut interp, &mut doc, "zap");
        assert_eq!(doc.graph_count(), 2);
        interp.config_mut().alias_unit("zap", "onstart");
        let result = driver
            .handle_key(&mut interp, &mut doc, &InputEvent::key(Key::Ctrl('r')))
            .unwrap();
        assert_eq!(result, PromptEvent::Edited);
        assert_eq!(interp.hint(), Some("zap"));
        assert_eq!(doc.node_count(), 1);
        assert_eq!(doc.graph_count(), 1);
    }
}
