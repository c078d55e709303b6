//! Unified error types for fontpad_engine

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for fontpad_engine operations
#[derive(Debug, Error)]
pub enum FontPadError {
    // === Resolution Errors ===
    #[error("Font family '{family}' is not part of the catalog")]
    FamilyNotFound { family: String },

    #[error("Font family '{family}' has no variants")]
    NoVariants { family: String },

    #[error("Invalid font weight: '{value}'")]
    InvalidWeight { value: String },

    #[error("Invalid font style: '{value}' (expected 'normal' or 'italic')")]
    InvalidStyle { value: String },

    // === Catalog Errors ===
    #[error("Failed to fetch font catalog from '{source_name}': {message}")]
    CatalogFetch { source_name: String, message: String },

    #[error("Invalid font catalog: {0}")]
    CatalogParse(#[from] serde_json::Error),

    // === Font Loading Errors ===
    #[error("Failed to load font from '{locator}': {message}")]
    FontLoad { locator: String, message: String },

    #[error("Invalid font data: {0}")]
    InvalidFont(#[from] ab_glyph::InvalidFont),

    // === Store Errors ===
    #[error("Failed to write editor state to '{path}': {message}")]
    StoreWrite { path: PathBuf, message: String },

    #[error("Store deserialization error: {0}")]
    StoreRead(#[from] toml::de::Error),

    #[error("Store serialization error: {0}")]
    StoreSerialize(#[from] toml::ser::Error),

    // === External Errors ===
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for fontpad_engine operations
pub type Result<T> = std::result::Result<T, FontPadError>;

// === Convenience constructors ===
impl FontPadError {
    pub fn family_not_found(family: impl Into<String>) -> Self {
        Self::FamilyNotFound { family: family.into() }
    }

    pub fn no_variants(family: impl Into<String>) -> Self {
        Self::NoVariants { family: family.into() }
    }

    pub fn invalid_weight(value: impl Into<String>) -> Self {
        Self::InvalidWeight { value: value.into() }
    }

    /// Create a catalog fetch error for the given source
    pub fn catalog_fetch(source_name: impl Into<String>, msg: impl std::fmt::Display) -> Self {
        Self::CatalogFetch {
            source_name: source_name.into(),
            message: msg.to_string(),
        }
    }

    /// Create a font load error for the given locator
    pub fn font_load(locator: impl Into<String>, msg: impl std::fmt::Display) -> Self {
        Self::FontLoad {
            locator: locator.into(),
            message: msg.to_string(),
        }
    }

    pub fn store_write(path: impl Into<PathBuf>, msg: impl std::fmt::Display) -> Self {
        Self::StoreWrite {
            path: path.into(),
            message: msg.to_string(),
        }
    }
}
