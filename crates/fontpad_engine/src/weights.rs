//! Weight options for the weight selector.
//!
//! Options are the union of variant keys over *all* families, not just the selected one.

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::variant::{display_label, is_italic_key, parse_weight};
use crate::FontCatalog;

/// One entry of the weight selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightOption {
    /// Variant key, e.g. `"700italic"`.
    pub key: String,
    /// Human readable label, e.g. `"700 Italic"`.
    pub label: String,
}

impl WeightOption {
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        let label = display_label(&key);
        Self { key, label }
    }

    pub fn is_italic(&self) -> bool {
        is_italic_key(&self.key)
    }
}

/// All distinct variant keys of the catalog: normal keys first, then italic keys,
/// each group ascending by numeric weight.
pub fn enumerate_weights(catalog: &FontCatalog) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut keys: Vec<String> = catalog
        .iter()
        .flat_map(|(_, variants)| variants.keys())
        .filter(|key| seen.insert(*key))
        .cloned()
        .collect();
    keys.sort_by(|a, b| compare_keys(a, b));
    keys
}

/// [`enumerate_weights`] with display labels.
pub fn weight_options(catalog: &FontCatalog) -> Vec<WeightOption> {
    enumerate_weights(catalog).into_iter().map(WeightOption::new).collect()
}

fn compare_keys(a: &str, b: &str) -> Ordering {
    match (is_italic_key(a), is_italic_key(b)) {
        (false, true) => Ordering::Less,
        (true, false) => Ordering::Greater,
        // keys without a number go last in their group
        _ => match (parse_weight(a), parse_weight(b)) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
    }
}
