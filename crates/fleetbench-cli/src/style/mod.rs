//! Terminal styling for status lines and listings.
//!
//! Status lines go to stderr so stdout stays clean for generated queries.

use std::sync::atomic::{AtomicBool, Ordering};

pub mod colors;
pub mod output;

pub use output::*;

static PLAIN: AtomicBool = AtomicBool::new(false);

/// Turns styling off for the rest of the process (`--no-color`).
pub fn set_no_color(plain: bool) {
    PLAIN.store(plain, Ordering::Relaxed);
}

pub fn no_color() -> bool {
    PLAIN.load(Ordering::Relaxed)
}
