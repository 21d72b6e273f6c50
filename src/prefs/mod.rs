//! Local preferences
//!
//! The only state the client persists itself is the seconds-per-reel rate.
//! It lives behind [`PreferenceStore`] so the same load/save rules apply to
//! browser `localStorage` and to the native preference file.

#[cfg(feature = "native")]
mod file;

#[cfg(feature = "native")]
pub use file::FileStore;

use std::collections::HashMap;
use thiserror::Error;

use crate::estimate::SecondsPerReel;

/// Storage key holding the rate
pub const RATE_KEY: &str = "avgSecondsPerReel";

/// Errors raised while writing preferences
#[derive(Error, Debug)]
pub enum PreferenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Backing storage is missing (e.g. browser storage disabled)
    #[error("Preference storage unavailable: {0}")]
    Unavailable(String),
}

impl From<serde_json::Error> for PreferenceError {
    fn from(err: serde_json::Error) -> Self {
        PreferenceError::Serialization(err.to_string())
    }
}

/// String key/value storage for client preferences
pub trait PreferenceStore {
    /// Read a value; storage failures read as absent
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError>;
}

/// Load the rate, defaulting when absent or out of range
pub fn load_rate<S: PreferenceStore + ?Sized>(store: &S) -> SecondsPerReel {
    SecondsPerReel::from_stored(store.get(RATE_KEY).as_deref())
}

/// Persist the rate
pub fn save_rate<S: PreferenceStore + ?Sized>(
    store: &mut S,
    rate: SecondsPerReel,
) -> Result<(), PreferenceError> {
    tracing::debug!(rate = rate.get(), "saving rate preference");
    store.set(RATE_KEY, &rate.to_stored())
}

/// In-process store, used where nothing should touch disk
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
