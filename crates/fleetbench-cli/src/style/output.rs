//! Status lines and listings.

use super::colors::{Paint, Tone};

/// Width scenario ids and table names are padded to in listings.
const ENTRY_WIDTH: usize = 36;

pub fn print_success(msg: &str) {
    eprintln!("{} {msg}", "✓".paint(Tone::Done));
}

pub fn print_error(msg: &str) {
    eprintln!("{} {msg}", "✗".paint(Tone::Failed));
}

pub fn print_warn(msg: &str) {
    eprintln!("{} {msg}", "⚠".paint(Tone::Caution));
}

pub fn print_header(title: &str) {
    println!("{}", title.paint(Tone::Title));
}

/// `  key: value`, key dimmed.
pub fn print_labeled(key: &str, value: &str) {
    println!("  {}: {value}", key.paint(Tone::Label));
}

/// An id column followed by its description.
pub fn print_entry(id: &str, description: &str) {
    // Pad before painting; escape codes would skew the width.
    let padded = format!("{id:<ENTRY_WIDTH$}");
    println!("  {} {description}", padded.paint(Tone::Ident));
}
