//! Variant keys and font styles.
//!
//! A variant key names one weight/style combination inside a family: the numeric weight,
//! optionally followed by the `italic` suffix (`"400"`, `"700italic"`).
//! The suffix only exists at the catalog boundary; editor state always carries the bare
//! weight and a separate [`FontStyle`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::FontPadError;

/// Suffix that marks the italic variant of a weight.
pub const ITALIC_SUFFIX: &str = "italic";

/// Weight used whenever nothing else has been selected.
pub const DEFAULT_WEIGHT: &str = "400";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

impl FontStyle {
    pub fn is_italic(self) -> bool {
        matches!(self, FontStyle::Italic)
    }

    /// Flip between normal and italic.
    pub fn toggle(self) -> FontStyle {
        match self {
            FontStyle::Normal => FontStyle::Italic,
            FontStyle::Italic => FontStyle::Normal,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FontStyle::Normal => "normal",
            FontStyle::Italic => "italic",
        }
    }

    /// Style implied by a variant key.
    pub fn of_key(key: &str) -> FontStyle {
        if is_italic_key(key) {
            FontStyle::Italic
        } else {
            FontStyle::Normal
        }
    }
}

impl fmt::Display for FontStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FontStyle {
    type Err = FontPadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "normal" => Ok(FontStyle::Normal),
            "italic" => Ok(FontStyle::Italic),
            other => Err(FontPadError::InvalidStyle { value: other.to_string() }),
        }
    }
}

/// True if the key carries the italic suffix.
pub fn is_italic_key(key: &str) -> bool {
    key.contains(ITALIC_SUFFIX)
}

/// Removes the italic suffix, `"700italic"` -> `"700"`.
pub fn strip_italic(key: &str) -> &str {
    key.strip_suffix(ITALIC_SUFFIX).unwrap_or(key)
}

/// Builds the catalog lookup key for a bare weight and a style.
pub fn qualified_key(weight: &str, style: FontStyle) -> String {
    let weight = strip_italic(weight);
    match style {
        FontStyle::Normal => weight.to_string(),
        FontStyle::Italic => format!("{weight}{ITALIC_SUFFIX}"),
    }
}

/// Numeric weight of a key: the leading run of ASCII digits.
///
/// Returns `None` if the key doesn't start with a digit.
pub fn parse_weight(key: &str) -> Option<u32> {
    let key = key.trim_start();
    let end = key.find(|c: char| !c.is_ascii_digit()).unwrap_or(key.len());
    key[..end].parse().ok()
}

/// Label shown in weight selectors: `"700italic"` -> `"700 Italic"`.
pub fn display_label(key: &str) -> String {
    if is_italic_key(key) {
        format!("{} Italic", key.replace(ITALIC_SUFFIX, ""))
    } else {
        key.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_weight() {
        assert_eq!(parse_weight("400"), Some(400));
        assert_eq!(parse_weight("700italic"), Some(700));
        assert_eq!(parse_weight("italic"), None);
        assert_eq!(parse_weight(""), None);
        assert_eq!(parse_weight("regular"), None);
    }

    #[test]
    fn test_qualified_key() {
        assert_eq!(qualified_key("700", FontStyle::Italic), "700italic");
        assert_eq!(qualified_key("700", FontStyle::Normal), "700");
        // never double the suffix
        assert_eq!(qualified_key("700italic", FontStyle::Italic), "700italic");
        assert_eq!(qualified_key("700italic", FontStyle::Normal), "700");
    }

    #[test]
    fn test_style_parsing() {
        assert_eq!("italic".parse::<FontStyle>().unwrap(), FontStyle::Italic);
        assert_eq!("normal".parse::<FontStyle>().unwrap(), FontStyle::Normal);
        assert!("oblique".parse::<FontStyle>().is_err());
        assert_eq!(FontStyle::Normal.toggle(), FontStyle::Italic);
        assert_eq!(FontStyle::of_key("300italic"), FontStyle::Italic);
    }

    #[test]
    fn test_display_label() {
        assert_eq!(display_label("700italic"), "700 Italic");
        assert_eq!(display_label("400"), "400");
    }
}
