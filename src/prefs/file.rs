//! JSON-file preference store for the native client

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde_json::Value;

use super::{PreferenceError, PreferenceStore};

/// Preferences kept as a flat JSON object on disk
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data dir>/reeltrack/preferences.json`, or `./reeltrack_prefs.json`
    /// when the platform has no data directory
    pub fn default_path() -> PathBuf {
        dirs::data_local_dir()
            .map(|p| p.join("reeltrack").join("preferences.json"))
            .unwrap_or_else(|| PathBuf::from("./reeltrack_prefs.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whole file as a JSON object; values keep whatever type they were written with
    fn read_all(&self) -> Result<BTreeMap<String, Value>, PreferenceError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        match self.read_all() {
            Ok(mut values) => values.remove(key).and_then(scalar_to_string),
            Err(e) => {
                tracing::warn!("Failed to read preferences from {:?}: {}", self.path, e);
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        // A corrupt file is replaced rather than blocking the write
        let mut values = self.read_all().unwrap_or_else(|e| {
            tracing::warn!("Discarding unreadable preferences at {:?}: {}", self.path, e);
            BTreeMap::new()
        });
        values.insert(key.to_string(), Value::String(value.to_string()));

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(&values)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

/// Hand-edited files may hold numbers or booleans where strings are expected
fn scalar_to_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
