//! The font catalog: family name -> variant key -> resource locator.
//!
//! Loaded once at startup from a JSON document shaped like
//!
//! ```json
//! { "Inter": { "400": "fonts/inter-400.woff2", "700italic": "fonts/inter-700i.woff2" } }
//! ```
//!
//! Iteration order of families and variants is the document order; nearest-weight
//! tie-breaking depends on it.

use std::fmt;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{FontPadError, Result};

/// Variant key -> resource locator, in catalog order.
pub type VariantMap = IndexMap<String, String>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FontCatalog {
    families: IndexMap<String, VariantMap>,
}

impl FontCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a catalog document.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a catalog document from disk.
    pub async fn load_file(path: &Path) -> Result<Self> {
        let json = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| FontPadError::catalog_fetch(path.display().to_string(), e))?;
        Self::from_json(&json)
    }

    /// Fetch a catalog document over http(s).
    pub async fn fetch_url(url: &str) -> Result<Self> {
        let response = reqwest::get(url).await.map_err(|e| FontPadError::catalog_fetch(url, e))?;
        if !response.status().is_success() {
            return Err(FontPadError::catalog_fetch(url, format!("server responded with {}", response.status())));
        }
        let json = response.text().await?;
        Self::from_json(&json)
    }

    /// Load the catalog from wherever `source` points.
    pub async fn fetch(source: &CatalogSource) -> Result<Self> {
        let catalog = match source {
            CatalogSource::File(path) => Self::load_file(path).await?,
            CatalogSource::Url(url) => Self::fetch_url(url).await?,
        };
        log::info!("Loaded font catalog from {source} ({} families)", catalog.len());
        Ok(catalog)
    }

    /// Insert or replace a family. Used when building catalogs in code.
    pub fn insert_family(&mut self, family: impl Into<String>, variants: VariantMap) {
        self.families.insert(family.into(), variants);
    }

    /// Builder-style variant of [`insert_family`](Self::insert_family).
    pub fn with_family<K, V>(mut self, family: impl Into<String>, variants: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let variants = variants.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        self.insert_family(family, variants);
        self
    }

    /// Family names in catalog order.
    pub fn families(&self) -> impl Iterator<Item = &str> {
        self.families.keys().map(String::as_str)
    }

    pub fn contains_family(&self, family: &str) -> bool {
        self.families.contains_key(family)
    }

    pub fn variants(&self, family: &str) -> Option<&VariantMap> {
        self.families.get(family)
    }

    /// Looks up the locator of one exact variant key.
    pub fn locator(&self, family: &str, key: &str) -> Option<&str> {
        self.families.get(family)?.get(key).map(String::as_str)
    }

    /// Iterates all families with their variants.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &VariantMap)> {
        self.families.iter().map(|(family, variants)| (family.as_str(), variants))
    }

    pub fn len(&self) -> usize {
        self.families.len()
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }
}

/// Where the catalog document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    File(PathBuf),
    Url(String),
}

impl CatalogSource {
    /// `http://` and `https://` sources are fetched over the network, everything else is a path.
    pub fn parse(source: &str) -> Self {
        if is_remote(source) {
            CatalogSource::Url(source.to_string())
        } else {
            CatalogSource::File(PathBuf::from(source))
        }
    }

    /// Base that relative resource locators are resolved against.
    pub fn base(&self) -> LocatorBase {
        match self {
            CatalogSource::File(path) => LocatorBase::Directory(path.parent().map(Path::to_path_buf).unwrap_or_default()),
            CatalogSource::Url(url) => match url.rfind('/') {
                Some(idx) if idx > url.find("://").map_or(0, |i| i + 2) => LocatorBase::Url(url[..=idx].to_string()),
                _ => LocatorBase::Url(format!("{url}/")),
            },
        }
    }
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogSource::File(path) => write!(f, "{}", path.display()),
            CatalogSource::Url(url) => f.write_str(url),
        }
    }
}

/// Resolution base for relative locators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocatorBase {
    Directory(PathBuf),
    Url(String),
}

/// A locator after resolving it against the catalog's location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedLocation {
    File(PathBuf),
    Url(String),
}

impl LocatorBase {
    pub fn resolve(&self, locator: &str) -> ResolvedLocation {
        if is_remote(locator) {
            return ResolvedLocation::Url(locator.to_string());
        }
        match self {
            LocatorBase::Directory(dir) => {
                let path = Path::new(locator);
                if path.is_absolute() {
                    ResolvedLocation::File(path.to_path_buf())
                } else {
                    ResolvedLocation::File(dir.join(path))
                }
            }
            LocatorBase::Url(base) => ResolvedLocation::Url(format!("{base}{}", locator.trim_start_matches("./"))),
        }
    }
}

fn is_remote(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}
