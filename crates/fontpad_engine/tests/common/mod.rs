#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use fontpad_engine::{AppliedFont, FontCatalog, FontPadError, FontSource, ItalicToggle, KeyValueStore, Presenter, WeightOption};
use parking_lot::Mutex;

pub const INTER_JSON: &str = r#"{
    "Inter": { "400": "a.woff", "700": "b.woff", "700italic": "c.woff" },
    "Roboto": { "100": "r100.woff", "300italic": "r300i.woff", "900": "r900.woff" },
    "Empty": {}
}"#;

pub fn catalog() -> FontCatalog {
    FontCatalog::from_json(INTER_JSON).unwrap()
}

/// Minimal WOFF2 header, enough to pass validation.
pub fn woff2_bytes() -> Vec<u8> {
    let mut data = b"wOF2".to_vec();
    data.extend_from_slice(&[0u8; 28]);
    data
}

/// Records every presenter call.
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    pub families: Vec<String>,
    pub weight_options: Vec<WeightOption>,
    pub selected_weight: Option<String>,
    pub italic_toggle: ItalicToggle,
    pub applied: Vec<AppliedFont>,
    pub text: Option<String>,
    /// Mirrors the last `set_text`, readable while the editor is borrowed by the event loop.
    pub surface: Arc<Mutex<String>>,
    pub surface_resets: usize,
}

impl RecordingPresenter {
    pub fn applied_locators(&self) -> Vec<&str> {
        self.applied.iter().map(|font| font.locator.as_str()).collect()
    }
}

impl Presenter for RecordingPresenter {
    fn populate_families(&mut self, families: &[String]) {
        self.families = families.to_vec();
    }

    fn weight_options_changed(&mut self, options: &[WeightOption], selected: Option<&str>) {
        self.weight_options = options.to_vec();
        self.selected_weight = selected.map(str::to_string);
    }

    fn italic_toggle_changed(&mut self, toggle: ItalicToggle) {
        self.italic_toggle = toggle;
    }

    fn apply_resolved_font(&mut self, font: &AppliedFont) {
        self.applied.push(font.clone());
    }

    fn set_text(&mut self, text: &str) {
        self.text = Some(text.to_string());
        *self.surface.lock() = text.to_string();
    }

    fn reset_surface(&mut self) {
        self.surface_resets += 1;
    }
}

/// Serves fonts from memory, optionally delaying individual locators.
#[derive(Default)]
pub struct MemoryFontSource {
    fonts: HashMap<String, Vec<u8>>,
    delays: HashMap<String, Duration>,
}

impl MemoryFontSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_font(mut self, locator: &str, data: Vec<u8>) -> Self {
        self.fonts.insert(locator.to_string(), data);
        self
    }

    pub fn with_delay(mut self, locator: &str, delay: Duration) -> Self {
        self.delays.insert(locator.to_string(), delay);
        self
    }

    /// Every locator of the test catalog as a valid font.
    pub fn for_catalog(catalog: &FontCatalog) -> Self {
        let mut source = Self::new();
        for (_, variants) in catalog.iter() {
            for locator in variants.values() {
                source = source.with_font(locator, woff2_bytes());
            }
        }
        source
    }
}

#[async_trait]
impl FontSource for MemoryFontSource {
    async fn fetch(&self, locator: &str) -> fontpad_engine::Result<Vec<u8>> {
        if let Some(delay) = self.delays.get(locator) {
            tokio::time::sleep(*delay).await;
        }
        self.fonts.get(locator).cloned().ok_or_else(|| FontPadError::font_load(locator, "not found"))
    }
}

/// Store whose every write fails, reads see nothing.
#[derive(Debug, Default)]
pub struct FailingStore {
    pub attempts: usize,
}

impl KeyValueStore for FailingStore {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&mut self, key: &str, _value: &str) -> fontpad_engine::Result<()> {
        self.attempts += 1;
        Err(FontPadError::store_write(key, "disk full"))
    }

    fn flush(&mut self) -> fontpad_engine::Result<()> {
        self.attempts += 1;
        Err(FontPadError::store_write("editor_state.toml", "disk full"))
    }
}
