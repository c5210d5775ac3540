//! Palette for fleetbench output.

use std::fmt::Display;

use owo_colors::Style;

/// What a piece of output means, not how it looks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Done,
    Failed,
    Caution,
    Label,
    Title,
    /// Scenario ids and table names.
    Ident,
}

impl Tone {
    fn style(self) -> Style {
        match self {
            Tone::Done => Style::new().green().bold(),
            Tone::Failed => Style::new().red().bold(),
            Tone::Caution => Style::new().yellow(),
            Tone::Label => Style::new().dimmed(),
            Tone::Title => Style::new().bold(),
            Tone::Ident => Style::new().blue(),
        }
    }
}

/// Renders any displayable value in a [`Tone`], or plain under `--no-color`.
pub trait Paint: Display {
    fn paint(&self, tone: Tone) -> String {
        if super::no_color() {
            self.to_string()
        } else {
            tone.style().style(self).to_string()
        }
    }
}

impl<T: Display + ?Sized> Paint for T {}
