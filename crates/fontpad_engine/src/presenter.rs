//! Boundary between the editor core and whatever displays it.
//!
//! The core only talks to the presentation side through [`Presenter`]; it never renders
//! anything itself.

use crate::loader::LoadedFont;
use crate::selection::ItalicToggle;
use crate::variant::FontStyle;
use crate::weights::WeightOption;

/// A resolved font, ready to be registered and painted onto the text surface.
#[derive(Debug, Clone)]
pub struct AppliedFont {
    pub family: String,
    pub locator: String,
    /// Bare numeric weight, without italic suffix.
    pub weight: String,
    pub style: FontStyle,
    pub font: LoadedFont,
}

pub trait Presenter {
    /// Called once after the catalog has been loaded.
    fn populate_families(&mut self, families: &[String]);

    /// The weight selector's options changed. `selected` is the variant key to select, if any.
    fn weight_options_changed(&mut self, options: &[WeightOption], selected: Option<&str>);

    fn italic_toggle_changed(&mut self, toggle: ItalicToggle);

    /// Register `font` and use it for the text surface.
    fn apply_resolved_font(&mut self, font: &AppliedFont);

    /// Restored or reset text content.
    fn set_text(&mut self, text: &str);

    /// Revert the text surface to its default font.
    fn reset_surface(&mut self);
}
