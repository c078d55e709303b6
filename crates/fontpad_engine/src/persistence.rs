//! Persisting editor text and selection.
//!
//! State is written as four independent string entries. The stored weight is
//! style-qualified (`"700italic"` when the style is italic), the live selection never is.
//! Storage is best-effort: failures are logged and a missing entry reads as "never saved".

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use crate::variant::{qualified_key, strip_italic, FontStyle, DEFAULT_WEIGHT};
use crate::{FontPadError, Result, SelectionState};

pub const CONTENT_KEY: &str = "textEditorContent";
pub const FAMILY_KEY: &str = "fontFamily";
pub const WEIGHT_KEY: &str = "fontWeight";
pub const STYLE_KEY: &str = "fontStyle";

/// A durable string key/value namespace.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Makes previous `set` calls durable.
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Non-durable store, used for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by a flat TOML table on disk.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Opens the store at `path`. A missing or unreadable file yields an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match Self::read_entries(&path) {
            Ok(entries) => entries,
            Err(err) => {
                log::warn!("Ignoring unreadable editor state {}: {}", path.display(), err);
                BTreeMap::new()
            }
        };
        Self { path, entries }
    }

    /// Store in the per-user config directory.
    pub fn default_location() -> Option<PathBuf> {
        let dirs = directories::ProjectDirs::from("com", "GitHub", "fontpad")?;
        Some(dirs.config_dir().join("editor_state.toml"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(path: &Path) -> Result<BTreeMap<String, String>> {
        if !path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| FontPadError::store_write(&self.path, e))?;
            }
        }
        let toml_string = toml::to_string_pretty(&self.entries)?;

        let mut write_name = self.path.clone();
        write_name.set_extension("new");
        fs::write(&write_name, toml_string).map_err(|e| FontPadError::store_write(&write_name, e))?;
        fs::rename(&write_name, &self.path).map_err(|e| FontPadError::store_write(&self.path, e))?;
        Ok(())
    }
}

/// Snapshot of the editor as it is written to the store.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PersistedState {
    pub content: String,
    pub selection: SelectionState,
}

impl PersistedState {
    pub fn new(content: impl Into<String>, selection: SelectionState) -> Self {
        Self {
            content: content.into(),
            selection,
        }
    }
}

/// Writes `state`, overwriting whatever was stored before.
///
/// # Errors
///
/// Returns the first failure of the underlying store.
pub fn save(store: &mut dyn KeyValueStore, state: &PersistedState) -> Result<()> {
    let selection = &state.selection;
    store.set(CONTENT_KEY, &state.content)?;
    store.set(FAMILY_KEY, &selection.family)?;
    store.set(WEIGHT_KEY, &qualified_key(&selection.weight, selection.style))?;
    store.set(STYLE_KEY, selection.style.as_str())?;
    store.flush()
}

/// Reads the stored state, `None` if nothing was ever saved.
///
/// Missing or empty entries fall back to the defaults of a fresh editor.
pub fn load(store: &dyn KeyValueStore) -> Option<PersistedState> {
    let entry = |key: &str| store.get(key).filter(|value| !value.is_empty());
    let content = entry(CONTENT_KEY);
    let family = entry(FAMILY_KEY);
    let weight = entry(WEIGHT_KEY);
    let style = entry(STYLE_KEY);

    if content.is_none() && family.is_none() && weight.is_none() && style.is_none() {
        return None;
    }

    let style = match style.as_deref().map(str::parse::<FontStyle>) {
        Some(Ok(style)) => style,
        Some(Err(err)) => {
            log::warn!("Ignoring stored font style: {err}");
            weight.as_deref().map(FontStyle::of_key).unwrap_or_default()
        }
        None => weight.as_deref().map(FontStyle::of_key).unwrap_or_default(),
    };
    let weight = match weight.as_deref().map(strip_italic) {
        Some(weight) if !weight.is_empty() => weight.to_string(),
        _ => DEFAULT_WEIGHT.to_string(),
    };

    Some(PersistedState {
        content: content.unwrap_or_default(),
        selection: SelectionState {
            family: family.unwrap_or_default(),
            weight,
            style,
        },
    })
}

/// Best-effort [`save`]: failures are logged, never returned.
pub fn save_or_log(store: &mut dyn KeyValueStore, state: &PersistedState) {
    if let Err(err) = save(store, state) {
        log::warn!("Failed to persist editor state: {err}");
    }
}
