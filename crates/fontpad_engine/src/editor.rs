//! The editor context: catalog, selection, text and store, wired to a presenter.
//!
//! Every handler runs on the single event loop (see [`crate::runtime`]). Handlers that change
//! the selection return a [`FontRequest`]; the caller loads the font and hands the outcome
//! back through [`FontPadEditor::font_loaded`].

use crate::loader::{FontLoadTracker, LoadedFont, RequestId};
use crate::persistence::{self, KeyValueStore, PersistedState};
use crate::presenter::{AppliedFont, Presenter};
use crate::resolver::{resolve, Resolution};
use crate::selection::SelectionState;
use crate::variant::FontStyle;
use crate::weights::weight_options;
use crate::{FontCatalog, FontPadError, Result};

/// Inbound events of the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    FamilyChanged(String),
    /// A weight option was picked, carries its variant key.
    WeightChanged(String),
    ItalicToggled,
    TextEdited(String),
    Reset,
    Shutdown,
}

/// A font that has to be loaded before it can be applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontRequest {
    pub id: RequestId,
    pub family: String,
    /// Bare weight for display.
    pub weight: String,
    pub style: FontStyle,
    pub resolution: Resolution,
}

impl FontRequest {
    pub fn locator(&self) -> &str {
        &self.resolution.locator
    }
}

pub struct FontPadEditor<S: KeyValueStore, P: Presenter> {
    catalog: FontCatalog,
    selection: SelectionState,
    content: String,
    store: S,
    presenter: P,
    loads: FontLoadTracker,
    applied: Option<AppliedFont>,
    restored: bool,
}

impl<S: KeyValueStore, P: Presenter> FontPadEditor<S, P> {
    pub fn new(store: S, presenter: P) -> Self {
        Self {
            catalog: FontCatalog::default(),
            selection: SelectionState::default(),
            content: String::new(),
            store,
            presenter,
            loads: FontLoadTracker::new(),
            applied: None,
            restored: false,
        }
    }

    pub fn catalog(&self) -> &FontCatalog {
        &self.catalog
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    /// The font currently shown on the text surface.
    pub fn current_font(&self) -> Option<&AppliedFont> {
        self.applied.as_ref()
    }

    /// Reads the persisted state and seeds text and selection from it.
    ///
    /// Only the first call reads the store; later calls do nothing.
    pub fn restore(&mut self) {
        if self.restored {
            return;
        }
        self.restored = true;

        let Some(state) = persistence::load(&self.store) else {
            log::debug!("No stored editor state");
            return;
        };
        log::info!(
            "Restoring editor state: family '{}', weight {}, style {}",
            state.selection.family,
            state.selection.weight,
            state.selection.style
        );
        self.content = state.content;
        self.selection = state.selection;
        self.presenter.set_text(&self.content);
    }

    /// Installs the loaded catalog, restores the stored session and runs the first resolution.
    pub fn catalog_loaded(&mut self, catalog: FontCatalog) -> Option<FontRequest> {
        self.catalog = catalog;
        let families: Vec<String> = self.catalog.families().map(str::to_string).collect();
        self.presenter.populate_families(&families);

        self.restore();
        if self.selection.has_family() && !self.catalog.contains_family(&self.selection.family) {
            log::warn!("Stored font family '{}' is not in the catalog", self.selection.family);
            self.selection.family.clear();
        }

        self.populate_weights();
        self.sync_italic_toggle();
        self.request_font()
    }

    pub fn family_changed(&mut self, family: &str) -> Option<FontRequest> {
        if !self.catalog.contains_family(family) {
            log::warn!("Ignoring unknown font family '{family}'");
            return None;
        }
        self.selection.select_family(family);
        self.populate_weights();
        self.sync_italic_toggle();
        self.request_font()
    }

    pub fn weight_changed(&mut self, key: &str) -> Option<FontRequest> {
        self.selection.select_weight(key);
        self.sync_italic_toggle();
        self.request_font()
    }

    /// Flips the style if the toggle is enabled; the weight is left alone.
    pub fn italic_toggled(&mut self) -> Option<FontRequest> {
        if !self.selection.italic_toggle(&self.catalog).enabled {
            log::debug!("Italic toggle is disabled for weight {}", self.selection.weight);
            return None;
        }
        self.selection.toggle_italic();
        self.sync_italic_toggle();
        self.request_font()
    }

    pub fn text_edited(&mut self, text: impl Into<String>) {
        self.content = text.into();
        self.save();
    }

    /// Back to an empty editor with default selection. The reset state is persisted.
    pub fn reset(&mut self) {
        log::info!("Resetting editor");
        self.content.clear();
        self.selection.reset();
        self.applied = None;
        // supersede in-flight loads
        self.loads.issue();

        self.presenter.set_text("");
        self.presenter.reset_surface();
        let options = weight_options(&self.catalog);
        self.presenter.weight_options_changed(&options, None);
        self.sync_italic_toggle();
        self.save();
    }

    pub fn autosave_tick(&mut self) {
        log::debug!("Autosave");
        self.save();
    }

    /// Dispatches one event. `Shutdown` is left to the event loop.
    pub fn handle(&mut self, event: EditorEvent) -> Option<FontRequest> {
        match event {
            EditorEvent::FamilyChanged(family) => self.family_changed(&family),
            EditorEvent::WeightChanged(key) => self.weight_changed(&key),
            EditorEvent::ItalicToggled => self.italic_toggled(),
            EditorEvent::TextEdited(text) => {
                self.text_edited(text);
                None
            }
            EditorEvent::Reset => {
                self.reset();
                None
            }
            EditorEvent::Shutdown => None,
        }
    }

    /// Applies a finished load if no newer request has been issued since.
    ///
    /// Returns true if the font was applied. Failed loads keep the previous font.
    pub fn font_loaded(&mut self, request: FontRequest, outcome: Result<LoadedFont>) -> bool {
        if !self.loads.is_current(request.id) {
            log::debug!("Dropping superseded font load {} for {}", request.id, request.locator());
            return false;
        }
        match outcome {
            Ok(font) => {
                let applied = AppliedFont {
                    family: request.family,
                    locator: request.resolution.locator,
                    weight: request.weight,
                    style: request.style,
                    font,
                };
                log::info!("Applied font {} {} {} from {}", applied.family, applied.weight, applied.style, applied.locator);
                self.presenter.apply_resolved_font(&applied);
                self.applied = Some(applied);
                self.save();
                true
            }
            Err(err) => {
                log::error!("Error loading font: {err}");
                false
            }
        }
    }

    pub fn snapshot(&self) -> PersistedState {
        PersistedState::new(self.content.clone(), self.selection.clone())
    }

    pub fn save(&mut self) {
        let state = self.snapshot();
        persistence::save_or_log(&mut self.store, &state);
    }

    fn populate_weights(&mut self) {
        let options = weight_options(&self.catalog);
        let key = self.selection.variant_key();
        let selected = options.iter().any(|option| option.key == key).then_some(key.as_str());
        self.presenter.weight_options_changed(&options, selected);
    }

    fn sync_italic_toggle(&mut self) {
        let toggle = self.selection.italic_toggle(&self.catalog);
        self.presenter.italic_toggle_changed(toggle);
    }

    fn request_font(&mut self) -> Option<FontRequest> {
        if !self.selection.has_family() {
            return None;
        }
        let selection = &self.selection;
        match resolve(&self.catalog, &selection.family, &selection.weight, selection.style) {
            Ok(resolution) => Some(FontRequest {
                id: self.loads.issue(),
                family: selection.family.clone(),
                weight: selection.weight.clone(),
                style: selection.style,
                resolution,
            }),
            Err(err @ FontPadError::NoVariants { .. }) => {
                log::error!("{err}");
                None
            }
            Err(err) => {
                log::warn!("Can't resolve font: {err}");
                None
            }
        }
    }
}
