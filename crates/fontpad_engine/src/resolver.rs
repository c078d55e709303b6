//! Maps a desired (family, weight, style) to the locator of the best available variant.

use crate::variant::{is_italic_key, parse_weight, qualified_key, strip_italic, FontStyle};
use crate::{FontCatalog, FontPadError, Result};

/// How a resolution was satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// The requested key exists in the family.
    Exact,
    /// Closest numeric weight.
    NearestWeight,
    /// Italic was requested and the nearest weight has no italic counterpart,
    /// so the first italic variant of the family was taken instead.
    ItalicFallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Variant key that was picked.
    pub key: String,
    pub locator: String,
    pub kind: MatchKind,
}

impl Resolution {
    pub fn is_exact(&self) -> bool {
        self.kind == MatchKind::Exact
    }
}

/// Resolve `family`/`weight`/`style` against the catalog.
///
/// `weight` is a numeric weight string; an italic suffix on it is ignored, the style
/// argument alone decides whether the italic key is looked up.
///
/// # Errors
///
/// `FamilyNotFound` if the family isn't in the catalog, `NoVariants` if it has no variants,
/// `InvalidWeight` if `weight` has no numeric value.
pub fn resolve(catalog: &FontCatalog, family: &str, weight: &str, style: FontStyle) -> Result<Resolution> {
    let variants = catalog.variants(family).ok_or_else(|| FontPadError::family_not_found(family))?;
    if variants.is_empty() {
        return Err(FontPadError::no_variants(family));
    }

    let wanted = qualified_key(weight, style);
    if let Some(locator) = variants.get(&wanted) {
        return Ok(Resolution {
            key: wanted,
            locator: locator.clone(),
            kind: MatchKind::Exact,
        });
    }

    let target = parse_weight(weight).ok_or_else(|| FontPadError::invalid_weight(weight))?;

    // Strict comparison keeps the first key in catalog order on ties.
    let mut nearest: Option<(&String, u32)> = None;
    for key in variants.keys() {
        let Some(value) = parse_weight(strip_italic(key)) else {
            continue;
        };
        let distance = value.abs_diff(target);
        if nearest.map_or(true, |(_, best)| distance < best) {
            nearest = Some((key, distance));
        }
    }
    // Keys without a numeric weight can't be compared; fall back to catalog order.
    let (mut chosen, mut kind) = match nearest {
        Some((key, _)) => (key, MatchKind::NearestWeight),
        None => match variants.keys().next() {
            Some(key) => (key, MatchKind::NearestWeight),
            None => return Err(FontPadError::no_variants(family)),
        },
    };

    if style.is_italic() {
        let counterpart = qualified_key(strip_italic(chosen), FontStyle::Italic);
        if !variants.contains_key(&counterpart) {
            if let Some(italic) = variants.keys().find(|key| is_italic_key(key)) {
                chosen = italic;
                kind = MatchKind::ItalicFallback;
            }
        }
    }

    let locator = variants.get(chosen).cloned().ok_or_else(|| FontPadError::no_variants(family))?;
    Ok(Resolution {
        key: chosen.clone(),
        locator,
        kind,
    })
}
