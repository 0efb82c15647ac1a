//! Plain-text rendering of a [`Frame`].

use std::fmt::Write;
use wut_core::Frame;

/// Summary, legend and open form, one item per line.
pub fn frame_text(frame: &Frame) -> String {
    let mut out = String::new();
    let mode = if frame.editing { " (editing)" } else { "" };
    let _ = writeln!(out, "[{}{}]", frame.view, mode);
    let _ = writeln!(out, "{}", frame.summary.title);
    let _ = writeln!(out, "{}", frame.summary.description);
    for entry in &frame.legend {
        let _ = writeln!(out, "  {} {}", entry.color, entry.text);
    }
    if frame.affordances.show_new {
        let _ = writeln!(out, "buttons: {}, New", frame.affordances.edit_label);
    } else {
        let _ = writeln!(out, "buttons: {}", frame.affordances.edit_label);
    }
    if let Some(session) = &frame.session {
        let _ = writeln!(
            out,
            "form: {} [label={:?}, value={:?}]",
            session.title(),
            session.label,
            session.value
        );
    }
    out.trim_end().to_string()
}
