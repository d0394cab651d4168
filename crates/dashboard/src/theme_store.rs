//! Persistence for the theme preference
//!
//! One key-value pair, `themeMode` -> `"light" | "dark"`. Reads never fail the
//! caller: a missing, unreadable or invalid value means `light`.

use dashboard_api::ThemeMode;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};

pub const THEME_KEY: &str = "themeMode";

#[derive(Debug, thiserror::Error)]
pub enum ThemeStoreError {
    #[error("Failed to access theme file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode theme file {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub trait ThemeStore: Send + Sync {
    /// Stored preference, or `ThemeMode::Light` when there is none
    fn load(&self) -> ThemeMode;

    fn save(&self, mode: ThemeMode) -> Result<(), ThemeStoreError>;
}

/// JSON object file; keys other than `themeMode` are preserved on save
pub struct FileThemeStore {
    path: PathBuf,
}

impl FileThemeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Option<Map<String, Value>> {
        let content = std::fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(map)) => Some(map),
            Ok(_) | Err(_) => {
                warn!(
                    "[FileThemeStore] Ignoring malformed preferences file {}",
                    self.path.display()
                );
                None
            }
        }
    }
}

impl ThemeStore for FileThemeStore {
    fn load(&self) -> ThemeMode {
        let mode = self
            .read_map()
            .and_then(|map| map.get(THEME_KEY).and_then(Value::as_str).map(str::to_owned))
            .and_then(|value| value.parse().ok())
            .unwrap_or_default();
        debug!("[FileThemeStore] Loaded {} from {}", mode, self.path.display());
        mode
    }

    fn save(&self, mode: ThemeMode) -> Result<(), ThemeStoreError> {
        let io_error = |source| ThemeStoreError::Io {
            path: self.path.clone(),
            source,
        };

        let mut map = self.read_map().unwrap_or_default();
        map.insert(THEME_KEY.to_string(), Value::String(mode.as_str().to_string()));

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(io_error)?;
            }
        }
        let content =
            serde_json::to_string_pretty(&Value::Object(map)).map_err(|source| {
                ThemeStoreError::Encode {
                    path: self.path.clone(),
                    source,
                }
            })?;
        std::fs::write(&self.path, content).map_err(io_error)?;

        debug!("[FileThemeStore] Saved {} to {}", mode, self.path.display());
        Ok(())
    }
}

/// Process-local store for tests and `--offline` runs without a config dir
#[derive(Default)]
pub struct MemoryThemeStore {
    mode: Mutex<Option<ThemeMode>>,
}

impl MemoryThemeStore {
    pub fn new(initial: Option<ThemeMode>) -> Self {
        Self {
            mode: Mutex::new(initial),
        }
    }
}

impl ThemeStore for MemoryThemeStore {
    fn load(&self) -> ThemeMode {
        self.mode
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .unwrap_or_default()
    }

    fn save(&self, mode: ThemeMode) -> Result<(), ThemeStoreError> {
        *self.mode.lock().unwrap_or_else(|e| e.into_inner()) = Some(mode);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_means_light() {
        let dir = TempDir::new().unwrap();
        let store = FileThemeStore::new(dir.path().join("prefs.json"));
        assert_eq!(store.load(), ThemeMode::Light);
    }

    #[test]
    fn save_then_load_in_nested_dir() {
        let dir = TempDir::new().unwrap();
        let store = FileThemeStore::new(dir.path().join("nested/dir/prefs.json"));

        store.save(ThemeMode::Dark).unwrap();

        assert_eq!(store.load(), ThemeMode::Dark);
        assert_eq!(FileThemeStore::new(store.path()).load(), ThemeMode::Dark);
    }

    #[test]
    fn invalid_values_fall_back_to_light() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.json");

        std::fs::write(&path, r#"{"themeMode": "sepia"}"#).unwrap();
        assert_eq!(FileThemeStore::new(&path).load(), ThemeMode::Light);

        std::fs::write(&path, "not json").unwrap();
        assert_eq!(FileThemeStore::new(&path).load(), ThemeMode::Light);
    }

    #[test]
    fn save_keeps_unrelated_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, r#"{"language": "en", "themeMode": "light"}"#).unwrap();

        FileThemeStore::new(&path).save(ThemeMode::Dark).unwrap();

        let value: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["language"], "en");
        assert_eq!(value["themeMode"], "dark");
    }
}
