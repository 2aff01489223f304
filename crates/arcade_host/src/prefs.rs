//! Key/value preference storage contracts and adapters.
//!
//! Favorites, recently played ids, and per-game save slots are all stored as JSON text under a
//! string key. Stores are async at the trait boundary so browser and desktop transports can share
//! one contract.

use std::{cell::RefCell, collections::HashMap, future::Future, pin::Pin, rc::Rc};

use serde::{de::DeserializeOwned, Serialize};

/// Prefix persistent stores apply to every logical key unless configured otherwise.
pub const DEFAULT_STORAGE_PREFIX: &str = "cat-emu:";

/// Object-safe boxed future used by [`PrefsStore`] async methods.
pub type PrefsStoreFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host service for lightweight preference values (JSON stored as text per key).
pub trait PrefsStore {
    /// Loads a raw JSON string for a preference key.
    fn load_pref<'a>(
        &'a self,
        key: &'a str,
    ) -> PrefsStoreFuture<'a, Result<Option<String>, String>>;

    /// Saves a raw JSON string for a preference key.
    fn save_pref<'a>(
        &'a self,
        key: &'a str,
        raw_json: &'a str,
    ) -> PrefsStoreFuture<'a, Result<(), String>>;

    /// Deletes a preference key. Deleting an absent key succeeds.
    fn delete_pref<'a>(&'a self, key: &'a str) -> PrefsStoreFuture<'a, Result<(), String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op preference store for hosts without durable storage.
pub struct NoopPrefsStore;

impl PrefsStore for NoopPrefsStore {
    fn load_pref<'a>(
        &'a self,
        _key: &'a str,
    ) -> PrefsStoreFuture<'a, Result<Option<String>, String>> {
        Box::pin(async { Ok(None) })
    }

    fn save_pref<'a>(
        &'a self,
        _key: &'a str,
        _raw_json: &'a str,
    ) -> PrefsStoreFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }

    fn delete_pref<'a>(&'a self, _key: &'a str) -> PrefsStoreFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }
}

#[derive(Debug, Default)]
struct MemoryPrefsInner {
    entries: HashMap<String, String>,
    quota_bytes: Option<usize>,
}

impl MemoryPrefsInner {
    fn used_bytes_without(&self, key: &str) -> usize {
        self.entries
            .iter()
            .filter(|(existing, _)| existing.as_str() != key)
            .map(|(existing, value)| existing.len() + value.len())
            .sum()
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory preference store keyed by string.
///
/// Clones share the same backing map. An optional byte quota mimics browser storage limits: a
/// write that would push the total size of keys and values past the quota is rejected and leaves
/// the previous value in place.
pub struct MemoryPrefsStore {
    inner: Rc<RefCell<MemoryPrefsInner>>,
}

impl MemoryPrefsStore {
    /// Creates a store that rejects writes once keys plus values exceed `quota_bytes`.
    pub fn with_quota(quota_bytes: usize) -> Self {
        let store = Self::default();
        store.inner.borrow_mut().quota_bytes = Some(quota_bytes);
        store
    }

    /// Returns the raw stored JSON for `key` without going through the async contract.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.inner.borrow().entries.get(key).cloned()
    }

    /// Returns every stored key in sorted order.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.inner.borrow().entries.keys().cloned().collect();
        keys.sort();
        keys
    }
}

impl PrefsStore for MemoryPrefsStore {
    fn load_pref<'a>(
        &'a self,
        key: &'a str,
    ) -> PrefsStoreFuture<'a, Result<Option<String>, String>> {
        Box::pin(async move { Ok(self.inner.borrow().entries.get(key).cloned()) })
    }

    fn save_pref<'a>(
        &'a self,
        key: &'a str,
        raw_json: &'a str,
    ) -> PrefsStoreFuture<'a, Result<(), String>> {
        Box::pin(async move {
            let mut inner = self.inner.borrow_mut();
            if let Some(quota) = inner.quota_bytes {
                let needed = inner.used_bytes_without(key) + key.len() + raw_json.len();
                if needed > quota {
                    return Err(format!(
                        "storage quota exceeded writing `{key}` ({needed} > {quota} bytes)"
                    ));
                }
            }
            inner
                .entries
                .insert(key.to_string(), raw_json.to_string());
            Ok(())
        })
    }

    fn delete_pref<'a>(&'a self, key: &'a str) -> PrefsStoreFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.inner.borrow_mut().entries.remove(key);
            Ok(())
        })
    }
}

/// Loads and deserializes a typed preference value through a [`PrefsStore`] implementation.
///
/// # Errors
///
/// Returns an error when the store or JSON deserialization fails.
pub async fn load_pref_with<S: PrefsStore + ?Sized, T: DeserializeOwned>(
    store: &S,
    key: &str,
) -> Result<Option<T>, String> {
    let Some(raw) = store.load_pref(key).await? else {
        return Ok(None);
    };
    let value = serde_json::from_str(&raw).map_err(|e| format!("decode `{key}`: {e}"))?;
    Ok(Some(value))
}

/// Serializes and saves a typed preference value through a [`PrefsStore`] implementation.
///
/// # Errors
///
/// Returns an error when serialization or store save fails.
pub async fn save_pref_with<S: PrefsStore + ?Sized, T: Serialize + ?Sized>(
    store: &S,
    key: &str,
    value: &T,
) -> Result<(), String> {
    let raw = serde_json::to_string(value).map_err(|e| format!("encode `{key}`: {e}"))?;
    store.save_pref(key, &raw).await
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[test]
    fn memory_prefs_store_round_trip_and_delete() {
        let store = MemoryPrefsStore::default();
        let store_obj: &dyn PrefsStore = &store;

        block_on(store_obj.save_pref("favorites", "[\"cat-pong\"]")).expect("save");
        assert_eq!(
            block_on(store_obj.load_pref("favorites")).expect("load"),
            Some("[\"cat-pong\"]".to_string())
        );
        block_on(store_obj.delete_pref("favorites")).expect("delete");
        assert_eq!(block_on(store_obj.load_pref("favorites")).expect("load"), None);
        block_on(store_obj.delete_pref("favorites")).expect("deleting twice is fine");
    }

    #[test]
    fn clones_share_backing_entries() {
        let store = MemoryPrefsStore::default();
        let clone = store.clone();
        block_on(store.save_pref("recentGames", "[]")).expect("save");
        assert_eq!(clone.raw("recentGames").as_deref(), Some("[]"));
        assert_eq!(clone.keys(), vec!["recentGames".to_string()]);
    }

    #[test]
    fn quota_rejects_oversized_write_and_keeps_previous_value() {
        let store = MemoryPrefsStore::with_quota(24);
        block_on(store.save_pref("favorites", "[\"a\"]")).expect("fits");

        let err = block_on(store.save_pref("favorites", "[\"a-very-long-game-id\"]"))
            .expect_err("over quota");
        assert!(err.contains("quota exceeded"), "unexpected error: {err}");
        assert_eq!(store.raw("favorites").as_deref(), Some("[\"a\"]"));
    }

    #[test]
    fn quota_counts_replaced_value_only_once() {
        let store = MemoryPrefsStore::with_quota(16);
        block_on(store.save_pref("k", "\"0123456789\"")).expect("first write");
        block_on(store.save_pref("k", "\"9876543210\"")).expect("same-size overwrite");
    }

    #[test]
    fn typed_pref_helpers_round_trip() {
        let store = MemoryPrefsStore::default();
        let store_obj: &dyn PrefsStore = &store;
        let recents = vec!["whack-a-cat".to_string(), "cat-pong".to_string()];
        block_on(save_pref_with(store_obj, "recentGames", &recents)).expect("save typed pref");

        let loaded: Option<Vec<String>> =
            block_on(load_pref_with(store_obj, "recentGames")).expect("load typed pref");
        assert_eq!(loaded, Some(recents));
    }

    #[test]
    fn typed_load_reports_decode_errors_with_key() {
        let store = MemoryPrefsStore::default();
        block_on(store.save_pref("favorites", "{not json")).expect("save");
        let err = block_on(load_pref_with::<_, Vec<String>>(&store, "favorites"))
            .expect_err("decode failure");
        assert!(err.contains("favorites"));
    }

    #[test]
    fn noop_prefs_store_is_empty_and_successful() {
        let store = NoopPrefsStore;
        let store_obj: &dyn PrefsStore = &store;
        assert_eq!(block_on(store_obj.load_pref("k")).expect("load"), None);
        block_on(store_obj.save_pref("k", "{}")).expect("save");
        block_on(store_obj.delete_pref("k")).expect("delete");
    }
}
