//! Current family/weight/style selection of the editor.
//!
//! Weight and style are always stored separately: the weight is the bare number
//! (`"700"`), the italic suffix is added only when a catalog key is built.

use serde::{Deserialize, Serialize};

use crate::variant::{qualified_key, strip_italic, FontStyle, DEFAULT_WEIGHT};
use crate::FontCatalog;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    /// Selected family, empty if none.
    pub family: String,
    /// Bare numeric weight string.
    pub weight: String,
    pub style: FontStyle,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self {
            family: String::new(),
            weight: DEFAULT_WEIGHT.to_string(),
            style: FontStyle::Normal,
        }
    }
}

/// State of the italic toggle control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ItalicToggle {
    pub enabled: bool,
    pub active: bool,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_family(&self) -> bool {
        !self.family.is_empty()
    }

    /// A new family resets the style to normal; the weight is kept.
    pub fn select_family(&mut self, family: impl Into<String>) {
        self.family = family.into();
        self.style = FontStyle::Normal;
    }

    /// Selects a weight option. The style follows the key's italic suffix.
    pub fn select_weight(&mut self, key: &str) {
        self.weight = strip_italic(key).to_string();
        self.style = FontStyle::of_key(key);
    }

    /// Flips the style, the weight stays untouched.
    pub fn toggle_italic(&mut self) -> FontStyle {
        self.style = self.style.toggle();
        self.style
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Catalog key for the current weight and style, e.g. `"700italic"`.
    pub fn variant_key(&self) -> String {
        qualified_key(&self.weight, self.style)
    }

    /// The toggle is usable when the selection is italic already or the selected family
    /// offers an italic variant of the selected weight.
    pub fn italic_toggle(&self, catalog: &FontCatalog) -> ItalicToggle {
        let italic_available = catalog
            .variants(&self.family)
            .is_some_and(|variants| variants.contains_key(&qualified_key(&self.weight, FontStyle::Italic)));
        ItalicToggle {
            enabled: self.style.is_italic() || italic_available,
            active: self.style.is_italic(),
        }
    }
}
