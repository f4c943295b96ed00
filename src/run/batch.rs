//! Batch mode: type lines as if at the prompt, then print the document.

use std::io::Write;

use graphprompt::core::graph::Document;
use graphprompt::core::print::{diff_lines, render_document};
use graphprompt::core::session::Interpreter;
use tracing::info;

/// Type each line one character at a time, then confirm it (or cancel it
/// with `cancel`). Each line's feedback and diff are written to `out`,
/// followed by the final document.
pub fn run_batch_mode<W: Write>(
    interp: &mut Interpreter,
    doc: &mut Document,
    lines: &[String],
    cancel: bool,
    out: &mut W,
) -> Result<(), Box<dyn std::error::Error>> {
    for line in lines {
        let before = render_document(doc);
        interp.activate(doc)?;

        // One replay per prefix, like keystrokes at the prompt
        for (idx, c) in line.char_indices() {
            interp.keystroke(doc, &line[..idx + c.len_utf8()])?;
        }

        writeln!(out, "> {}", line)?;
        if let Some(hint) = interp.hint() {
            writeln!(out, "  ? {}", hint)?;
        }
        for message in interp.output() {
            writeln!(out, "  | {}", message)?;
        }

        let after = render_document(doc);
        for change in diff_lines(&before, &after) {
            writeln!(out, "  {}", change)?;
        }

        if cancel {
            let reverted = interp.cancel(doc)?;
            writeln!(out, "  cancelled, {} changes reverted", reverted)?;
        } else {
            let kept = interp.confirm()?;
            writeln!(out, "  confirmed, {} changes kept", kept)?;
        }
    }

    info!("batch of {} lines done", lines.len());
    writeln!(out)?;
    write!(out, "{}", render_document(doc))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphprompt::config::Config;

    fn run(lines: &[&str], cancel: bool) -> (Document, String) {
        let mut interp = Interpreter::with_default_sources(Config::default());
        let mut doc = Document::new("Main");
        let lines: Vec<String> = lines.iter().map(|l| l.to_string()).collect();
        let mut out = Vec::new();
        run_batch_mode(&mut interp, &mut doc, &lines, cancel, &mut out).unwrap();
        (doc, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_batch_confirms_lines() {
        let (doc, text) = run(&["onstart", "sequence"], false);
        assert_eq!(doc.node_count(), 2);
        assert!(text.contains("> onstart\n"));
        assert!(text.contains("  confirmed, "));
        assert!(text.trim_end().ends_with("selected Main/[1]"));
    }

    #[test]
    fn test_batch_cancel_leaves_document_empty() {
        let (doc, text) = run(&["onstart if"], true);
        assert_eq!(doc.node_count(), 0);
        assert!(text.contains("  cancelled, "));
        assert!(text.contains("  + "));
        assert!(text.trim_end().ends_with("selected nothing"));
    }
}
