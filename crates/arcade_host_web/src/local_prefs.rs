//! `localStorage`-backed preference store implementation.
//!
//! Logical keys (`favorites`, `recentGames`, `save:{game}:{slot}`) are namespaced with a prefix so
//! the arcade does not collide with other scripts sharing the origin.

use arcade_host::{PrefsStore, PrefsStoreFuture, DEFAULT_STORAGE_PREFIX};

#[derive(Debug, Clone)]
/// Browser preference store backed by `window.localStorage`.
pub struct WebPrefsStore {
    prefix: String,
}

impl Default for WebPrefsStore {
    fn default() -> Self {
        Self::with_prefix(DEFAULT_STORAGE_PREFIX)
    }
}

impl WebPrefsStore {
    /// Creates a store whose physical keys are `{prefix}{logical_key}`.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Returns the physical `localStorage` key for a logical key.
    pub fn storage_key(&self, key: &str) -> String {
        format!("{}{key}", self.prefix)
    }

    /// Loads a raw JSON string for a logical key.
    pub fn load_json(&self, key: &str) -> Option<String> {
        #[cfg(target_arch = "wasm32")]
        {
            let storage = web_sys::window()?.local_storage().ok().flatten()?;
            storage.get_item(&self.storage_key(key)).ok().flatten()
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = key;
            None
        }
    }

    /// Saves a raw JSON string for a logical key.
    ///
    /// # Errors
    ///
    /// Returns an error when localStorage is unavailable or the write fails (for example when the
    /// origin's quota is exhausted).
    pub fn save_json(&self, key: &str, raw_json: &str) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            let storage = web_sys::window()
                .and_then(|w| w.local_storage().ok().flatten())
                .ok_or_else(|| "localStorage unavailable".to_string())?;
            storage
                .set_item(&self.storage_key(key), raw_json)
                .map_err(|e| format!("localStorage set_item failed: {e:?}"))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = (key, raw_json);
            Ok(())
        }
    }

    /// Deletes a logical key from localStorage.
    ///
    /// # Errors
    ///
    /// Returns an error when localStorage is unavailable or the delete fails.
    pub fn delete_json(&self, key: &str) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            let storage = web_sys::window()
                .and_then(|w| w.local_storage().ok().flatten())
                .ok_or_else(|| "localStorage unavailable".to_string())?;
            storage
                .remove_item(&self.storage_key(key))
                .map_err(|e| format!("localStorage remove_item failed: {e:?}"))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = key;
            Ok(())
        }
    }
}

impl PrefsStore for WebPrefsStore {
    fn load_pref<'a>(
        &'a self,
        key: &'a str,
    ) -> PrefsStoreFuture<'a, Result<Option<String>, String>> {
        Box::pin(async move { Ok(self.load_json(key)) })
    }

    fn save_pref<'a>(
        &'a self,
        key: &'a str,
        raw_json: &'a str,
    ) -> PrefsStoreFuture<'a, Result<(), String>> {
        Box::pin(async move { self.save_json(key, raw_json) })
    }

    fn delete_pref<'a>(&'a self, key: &'a str) -> PrefsStoreFuture<'a, Result<(), String>> {
        Box::pin(async move { self.delete_json(key) })
    }
}
