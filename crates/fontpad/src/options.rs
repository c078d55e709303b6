use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use fontpad_engine::{AutosaveConfig, DEFAULT_AUTOSAVE_INTERVAL};
use serde::{Deserialize, Serialize};

use crate::TerminalResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Options {
    /// Font catalog, a path or an http(s) URL.
    #[serde(default = "default_catalog")]
    pub catalog: String,

    #[serde(default = "default_autosave_interval")]
    #[serde(with = "duration_secs")]
    pub autosave_interval: Duration,

    /// Where the editor state is kept, defaults to the config directory.
    #[serde(default)]
    pub store_file: Option<PathBuf>,
}

fn default_catalog() -> String {
    "fonts.json".to_string()
}

fn default_autosave_interval() -> Duration {
    DEFAULT_AUTOSAVE_INTERVAL
}

// Custom serialization for Duration as seconds
mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            catalog: default_catalog(),
            autosave_interval: DEFAULT_AUTOSAVE_INTERVAL,
            store_file: None,
        }
    }
}

impl Options {
    fn options_file() -> Option<PathBuf> {
        let proj_dirs = directories::ProjectDirs::from("com", "GitHub", "fontpad")?;
        Some(proj_dirs.config_dir().join("options.toml"))
    }

    /// Loads `options.toml` from the config directory, defaults if there is none.
    ///
    /// # Errors
    ///
    /// This function will return an error if the file exists but can't be read or parsed.
    pub fn load_options() -> TerminalResult<Self> {
        match Self::options_file() {
            Some(options_file) => Self::load_from(&options_file),
            None => Ok(Options::default()),
        }
    }

    pub fn load_from(options_file: &Path) -> TerminalResult<Self> {
        if options_file.exists() {
            let content = fs::read_to_string(options_file)?;
            let options: Options = toml::from_str(&content)?;
            return Ok(options);
        }
        Ok(Options::default())
    }

    /// Writes the options back to the config directory.
    ///
    /// # Errors
    ///
    /// This function will return an error if the config directory or file can't be written.
    pub fn store_options(&self) -> TerminalResult<()> {
        if let Some(file_name) = Self::options_file() {
            self.store_to(&file_name)?;
        }
        Ok(())
    }

    pub fn store_to(&self, file_name: &Path) -> TerminalResult<()> {
        let mut write_name = file_name.to_path_buf();
        write_name.set_extension("new");

        // Create config directory if it doesn't exist
        if let Some(parent) = file_name.parent() {
            fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        fs::write(&write_name, toml_string)?;

        // Move temp file to the real file
        fs::rename(&write_name, file_name)?;
        Ok(())
    }

    pub fn autosave(&self) -> AutosaveConfig {
        AutosaveConfig::new(self.autosave_interval)
    }

    /// Explicit store file, or `editor_state.toml` in the config directory.
    pub fn store_path(&self) -> Option<PathBuf> {
        self.store_file.clone().or_else(fontpad_engine::FileStore::default_location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_for_missing_fields() {
        let options: Options = toml::from_str("catalog = \"https://example.com/fonts.json\"").unwrap();
        assert_eq!(options.catalog, "https://example.com/fonts.json");
        assert_eq!(options.autosave_interval, Duration::from_secs(5));
        assert_eq!(options.store_file, None);
    }

    #[test]
    fn test_store_and_load() {
        let dir = std::env::temp_dir().join(format!("fontpad-options-{}", fastrand::u64(..)));
        let file = dir.join("options.toml");

        let options = Options {
            catalog: "assets/fonts.json".to_string(),
            autosave_interval: Duration::from_secs(30),
            store_file: Some(PathBuf::from("/tmp/state.toml")),
        };
        options.store_to(&file).unwrap();
        assert_eq!(Options::load_from(&file).unwrap(), options);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let file = std::env::temp_dir().join(format!("fontpad-missing-{}.toml", fastrand::u64(..)));
        assert_eq!(Options::load_from(&file).unwrap(), Options::default());
    }
}
