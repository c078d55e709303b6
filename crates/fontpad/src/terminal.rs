//! Terminal presentation of the editor.

use std::io::Write;
use std::sync::Arc;

use fontpad_engine::{AppliedFont, ItalicToggle, Presenter, WeightOption};
use parking_lot::Mutex;

/// Text content shared between the presenter and the input task.
pub type TextSurface = Arc<Mutex<String>>;

/// Prints every presentation change to the given writer.
pub struct TerminalPresenter<W: Write> {
    out: W,
    surface: TextSurface,
}

impl<W: Write> TerminalPresenter<W> {
    pub fn new(out: W, surface: TextSurface) -> Self {
        Self { out, surface }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn print(&mut self, line: impl std::fmt::Display) {
        if let Err(err) = writeln!(self.out, "{line}") {
            log::warn!("Failed to write to terminal: {err}");
        }
    }
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn populate_families(&mut self, families: &[String]) {
        if families.is_empty() {
            self.print("No font families available.");
        } else {
            self.print(format!("Families: {}", families.join(", ")));
        }
    }

    fn weight_options_changed(&mut self, options: &[WeightOption], selected: Option<&str>) {
        let labels: Vec<String> = options
            .iter()
            .map(|option| {
                if Some(option.key.as_str()) == selected {
                    format!("[{}]", option.label)
                } else {
                    option.label.clone()
                }
            })
            .collect();
        self.print(format!("Weights: {}", labels.join(", ")));
    }

    fn italic_toggle_changed(&mut self, toggle: ItalicToggle) {
        let state = match (toggle.enabled, toggle.active) {
            (false, _) => "unavailable",
            (true, true) => "on",
            (true, false) => "off",
        };
        self.print(format!("Italic: {state}"));
    }

    fn apply_resolved_font(&mut self, font: &AppliedFont) {
        let glyphs = font.font.glyph_count.map(|count| format!(", {count} glyphs")).unwrap_or_default();
        self.print(format!(
            "Font: {} {} {} ({}, {} bytes{glyphs})",
            font.family,
            font.weight,
            font.style,
            font.locator,
            font.font.len()
        ));
    }

    fn set_text(&mut self, text: &str) {
        *self.surface.lock() = text.to_string();
        if !text.is_empty() {
            self.print("Text:");
            self.print(text);
        }
    }

    fn reset_surface(&mut self) {
        self.print("Font: default");
    }
}
