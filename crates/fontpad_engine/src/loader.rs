//! Fetching font resources and ordering their completion.
//!
//! Font loads are not cancellable. Each request gets a monotonic [`RequestId`] and only the
//! result of the most recently issued request is ever applied; a slow, superseded load
//! that finishes late is dropped.

use std::fmt;
use std::sync::Arc;

use ab_glyph::Font;
use async_trait::async_trait;

use crate::catalog::{LocatorBase, ResolvedLocation};
use crate::{FontPadError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out request ids and decides which completions may be applied.
#[derive(Debug, Default)]
pub struct FontLoadTracker {
    latest: u64,
}

impl FontLoadTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self) -> RequestId {
        self.latest += 1;
        RequestId(self.latest)
    }

    /// Only the highest id ever issued is current.
    pub fn is_current(&self, id: RequestId) -> bool {
        id.0 == self.latest
    }
}

/// Where font bytes come from.
#[async_trait]
pub trait FontSource: Send + Sync {
    async fn fetch(&self, locator: &str) -> Result<Vec<u8>>;
}

/// Reads locators from disk or over http(s), relative ones resolved against the catalog location.
pub struct LocatorFontSource {
    base: LocatorBase,
    client: reqwest::Client,
}

impl LocatorFontSource {
    pub fn new(base: LocatorBase) -> Self {
        Self {
            base,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl FontSource for LocatorFontSource {
    async fn fetch(&self, locator: &str) -> Result<Vec<u8>> {
        match self.base.resolve(locator) {
            ResolvedLocation::File(path) => tokio::fs::read(&path).await.map_err(|e| FontPadError::font_load(locator, e)),
            ResolvedLocation::Url(url) => {
                let response = self.client.get(&url).send().await.map_err(|e| FontPadError::font_load(locator, e))?;
                if !response.status().is_success() {
                    return Err(FontPadError::font_load(locator, format!("server responded with {}", response.status())));
                }
                let bytes = response.bytes().await?;
                Ok(bytes.to_vec())
            }
        }
    }
}

/// A font resource that passed validation.
#[derive(Debug, Clone)]
pub struct LoadedFont {
    pub locator: String,
    pub data: Arc<Vec<u8>>,
    /// `None` for web font containers, whose outlines aren't inspected.
    pub glyph_count: Option<usize>,
}

impl LoadedFont {
    /// Checks that `data` is a usable font.
    ///
    /// # Errors
    ///
    /// Returns an error if the data is neither a WOFF container nor a parseable TrueType/OpenType font.
    pub fn validate(locator: impl Into<String>, data: Vec<u8>) -> Result<Self> {
        let locator = locator.into();
        if is_web_font_container(&data) {
            return Ok(Self {
                locator,
                data: Arc::new(data),
                glyph_count: None,
            });
        }
        let glyph_count = ab_glyph::FontRef::try_from_slice(&data)?.glyph_count();
        if glyph_count == 0 {
            return Err(FontPadError::font_load(locator, "font has no glyphs"));
        }
        Ok(Self {
            locator,
            data: Arc::new(data),
            glyph_count: Some(glyph_count),
        })
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Fetch and validate the font behind `locator`.
pub async fn load_font(source: &dyn FontSource, locator: &str) -> Result<LoadedFont> {
    let data = source.fetch(locator).await?;
    LoadedFont::validate(locator, data).map_err(|err| match err {
        FontPadError::InvalidFont(e) => FontPadError::font_load(locator, e),
        other => other,
    })
}

fn is_web_font_container(data: &[u8]) -> bool {
    data.starts_with(b"wOFF") || data.starts_with(b"wOF2")
}
