//! Browser preference storage
//!
//! `localStorage`-backed [`PreferenceStore`]. Missing or disabled storage
//! reads as empty, so the rate falls back to its default.

use reeltrack::prefs::{PreferenceError, PreferenceStore};

/// Preference store over `window.localStorage`
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

impl PreferenceStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        let storage = Self::storage()
            .ok_or_else(|| PreferenceError::Unavailable("localStorage".to_string()))?;
        storage
            .set_item(key, value)
            .map_err(|e| PreferenceError::Unavailable(format!("{:?}", e)))
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use reeltrack::estimate::SecondsPerReel;
    use reeltrack::prefs::{load_rate, save_rate, RATE_KEY};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn rate_survives_reload() {
        let mut store = LocalStorageStore;
        save_rate(&mut store, SecondsPerReel::new(12)).unwrap();
        assert_eq!(store.get(RATE_KEY).as_deref(), Some("12"));
        assert_eq!(load_rate(&LocalStorageStore).get(), 12);
    }

    #[wasm_bindgen_test]
    fn out_of_range_value_reads_as_default() {
        let mut store = LocalStorageStore;
        store.set(RATE_KEY, "99").unwrap();
        assert_eq!(load_rate(&store), SecondsPerReel::default());
    }
}
