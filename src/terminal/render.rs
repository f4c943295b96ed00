//! Terminal rendering module
//!
//! `compose` lays the prompt screen out as plain lines, clipped to the
//! terminal width; `draw` writes a composed frame with crossterm.
//!
//! Layout, top to bottom: the rendered document, the preview diff, session
//! output, the hint line and the prompt line.

use std::io::Write;

use crossterm::{
    QueueableCommand, cursor,
    style::{Attribute, Print, SetAttribute},
    terminal::{Clear, ClearType},
};

use crate::core::print::DiffLine;
use crate::core::utf8;

pub const PROMPT_PREFIX: &str = "> ";
const DIFF_RULE: &str = "-- preview --";
/// Session output rows shown at most
const MAX_OUTPUT_ROWS: usize = 3;

/// What one screen shows
#[derive(Debug, Clone, Default)]
pub struct ScreenState<'a> {
    pub document: &'a str,
    pub diff: &'a [DiffLine],
    pub output: &'a [String],
    pub hint: Option<&'a str>,
    pub line: &'a str,
    /// Prompt cursor in grapheme clusters
    pub cursor: usize,
}

/// A screen's worth of lines and where the cursor goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub lines: Vec<String>,
    /// Rows marked dim (hint and rule lines)
    pub dim_rows: Vec<usize>,
    pub cursor: (u16, u16),
}

/// Lay out `state` on a `cols` x `rows` screen
pub fn compose(state: &ScreenState<'_>, cols: u16, rows: u16) -> Frame {
    let width = cols as usize;
    let rows = rows as usize;
    let mut bottom: Vec<(String, bool)> = Vec::new();

    if !state.diff.is_empty() && rows > 4 {
        let room = (rows / 3).max(1);
        bottom.push((DIFF_RULE.to_string(), true));
        let shown = state.diff.len().min(room);
        for change in &state.diff[..shown] {
            bottom.push((change.to_string(), false));
        }
        if shown < state.diff.len() {
            bottom.push((format!("  ... {} more", state.diff.len() - shown), true));
        }
    }

    let skip = state.output.len().saturating_sub(MAX_OUTPUT_ROWS);
    for message in &state.output[skip..] {
        bottom.push((message.clone(), false));
    }
    bottom.push((state.hint.unwrap_or("").to_string(), true));
    bottom.push((format!("{}{}", PROMPT_PREFIX, state.line), false));

    // The prompt and hint always fit; older bottom rows go first
    if bottom.len() > rows {
        bottom.drain(..bottom.len() - rows);
    }

    let top_rows = rows - bottom.len();
    let mut lines: Vec<String> = state
        .document
        .lines()
        .take(top_rows)
        .map(str::to_string)
        .collect();
    lines.resize(top_rows, String::new());

    let mut dim_rows = Vec::new();
    for (text, dim) in bottom {
        if dim {
            dim_rows.push(lines.len());
        }
        lines.push(text);
    }

    for line in &mut lines {
        let clipped = utf8::clip_to_width(line, width).len();
        line.truncate(clipped);
    }

    let prompt_row = lines.len().saturating_sub(1);
    let column = utf8::grapheme_width(PROMPT_PREFIX) + utf8::width_up_to(state.line, state.cursor);
    let column = column.min(width.saturating_sub(1));

    Frame {
        lines,
        dim_rows,
        cursor: (column as u16, prompt_row as u16),
    }
}

/// Write `frame` over the whole screen and place the cursor
pub fn draw<W: Write>(frame: &Frame, out: &mut W) -> Result<(), Box<dyn std::error::Error>> {
    out.queue(cursor::Hide)?;
    for (row, line) in frame.lines.iter().enumerate() {
        out.queue(cursor::MoveTo(0, row as u16))?;
        out.queue(Clear(ClearType::CurrentLine))?;
        if frame.dim_rows.contains(&row) {
            out.queue(SetAttribute(Attribute::Dim))?;
            out.queue(Print(line))?;
            out.queue(SetAttribute(Attribute::Reset))?;
        } else {
            out.queue(Print(line))?;
        }
    }
    out.queue(cursor::MoveTo(frame.cursor.0, frame.cursor.1))?;
    out.queue(cursor::Show)?;
    out.flush()?;
    Ok(())
}
