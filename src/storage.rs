//! Settings store: a JSON-file-backed string key/value map under the data
//! directory. League state and the purchase ledger persist through it.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

/// Default location relative to the working directory.
const DEFAULT_PATH: &str = "data/settings.json";

#[derive(Clone, Debug)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `data/settings.json`, overridable via `SETTINGS_PATH`.
    pub fn open_default() -> Self {
        let path = std::env::var("SETTINGS_PATH").unwrap_or_else(|_| DEFAULT_PATH.to_string());
        Self::new(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing or unreadable file reads as an empty map.
    fn read_map(&self) -> BTreeMap<String, String> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                log::warn!("settings file {} is not valid JSON: {}", self.path.display(), e);
                BTreeMap::new()
            }),
            Err(_) => BTreeMap::new(),
        }
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let raw = serde_json::to_string_pretty(map)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        std::fs::write(&self.path, raw)
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.read_map().get(key).cloned()
    }

    pub fn set(&self, key: &str, value: &str) -> io::Result<()> {
        let mut map = self.read_map();
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map)
    }

    pub fn remove(&self, key: &str) -> io::Result<()> {
        let mut map = self.read_map();
        if map.remove(key).is_some() {
            self.write_map(&map)?;
        }
        Ok(())
    }
}
