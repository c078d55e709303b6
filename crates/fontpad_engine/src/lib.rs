//! Core of the fontpad font preview editor.
//!
//! A [`FontCatalog`] maps families to variant keys and font locators. The editor keeps a
//! [`SelectionState`], resolves it to the best matching variant with [`resolve`], loads the
//! font and hands it to a [`Presenter`]. Text and selection survive restarts through a
//! [`KeyValueStore`].

mod error;
pub use error::*;

pub mod autosave;
pub mod catalog;
pub mod editor;
pub mod loader;
pub mod persistence;
pub mod presenter;
pub mod resolver;
pub mod runtime;
pub mod selection;
pub mod variant;
pub mod weights;

pub use autosave::{AutosaveConfig, DEFAULT_AUTOSAVE_INTERVAL};
pub use catalog::{CatalogSource, FontCatalog, VariantMap};
pub use editor::{EditorEvent, FontPadEditor, FontRequest};
pub use loader::{FontLoadTracker, FontSource, LoadedFont, LocatorFontSource, RequestId};
pub use persistence::{FileStore, KeyValueStore, MemoryStore, PersistedState};
pub use presenter::{AppliedFont, Presenter};
pub use resolver::{resolve, MatchKind, Resolution};
pub use runtime::EditorRuntime;
pub use selection::{ItalicToggle, SelectionState};
pub use variant::FontStyle;
pub use weights::{enumerate_weights, weight_options, WeightOption};
