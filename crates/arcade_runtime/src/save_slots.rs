//! Per-game save slots holding opaque JSON values.

use std::rc::Rc;

use arcade_host::PrefsStore;
use serde_json::Value;

use crate::{model::GameId, persistence::PersistenceError};

/// Returns the preference key for a game's save slot.
///
/// `%` and `:` are percent-encoded in both parts, so distinct `(game, slot)` pairs never share a
/// key even when ids or slot names contain the separator.
pub fn save_slot_key(game_id: &GameId, slot: &str) -> String {
    format!(
        "save:{}:{}",
        escape_key_part(game_id.as_str()),
        escape_key_part(slot)
    )
}

fn escape_key_part(part: &str) -> String {
    part.replace('%', "%25").replace(':', "%3A")
}

/// Save-slot access over a shared preference store.
#[derive(Clone)]
pub struct SaveSlotStore {
    prefs: Rc<dyn PrefsStore>,
}

impl SaveSlotStore {
    pub fn new(prefs: Rc<dyn PrefsStore>) -> Self {
        Self { prefs }
    }

    /// Stores `value` verbatim. Writing the value already stored is skipped.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::Write`] when the store rejects the write.
    pub async fn save(
        &self,
        game_id: &GameId,
        slot: &str,
        value: &Value,
    ) -> Result<(), PersistenceError> {
        let key = save_slot_key(game_id, slot);
        let raw = serde_json::to_string(value)
            .map_err(|err| PersistenceError::write(&key, err.to_string()))?;
        if let Ok(Some(existing)) = self.prefs.load_pref(&key).await {
            if existing == raw {
                return Ok(());
            }
        }
        self.prefs
            .save_pref(&key, &raw)
            .await
            .map_err(|err| PersistenceError::write(&key, err))
    }

    /// Reads a slot, returning `None` when it was never written or was removed.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::Read`] when the store fails or the payload is not JSON.
    pub async fn load(
        &self,
        game_id: &GameId,
        slot: &str,
    ) -> Result<Option<Value>, PersistenceError> {
        let key = save_slot_key(game_id, slot);
        let Some(raw) = self
            .prefs
            .load_pref(&key)
            .await
            .map_err(|err| PersistenceError::read(&key, err))?
        else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|err| PersistenceError::read(&key, err.to_string()))
    }

    /// Removes a slot and reports whether it existed.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] when the store fails to read or delete the key.
    pub async fn remove(&self, game_id: &GameId, slot: &str) -> Result<bool, PersistenceError> {
        let key = save_slot_key(game_id, slot);
        let existed = self
            .prefs
            .load_pref(&key)
            .await
            .map_err(|err| PersistenceError::read(&key, err))?
            .is_some();
        if existed {
            self.prefs
                .delete_pref(&key)
                .await
                .map_err(|err| PersistenceError::write(&key, err))?;
        }
        Ok(existed)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use arcade_host::{MemoryPrefsStore, PrefsStoreFuture};
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn store() -> (SaveSlotStore, MemoryPrefsStore) {
        let prefs = MemoryPrefsStore::default();
        (SaveSlotStore::new(Rc::new(prefs.clone())), prefs)
    }

    #[test]
    fn slots_are_created_overwritten_and_removed() {
        let (slots, prefs) = store();
        let game = GameId::from("cat-pong");

        assert_eq!(block_on(slots.load(&game, "quick")).expect("load"), None);
        block_on(slots.save(&game, "quick", &json!({ "level": 1 }))).expect("save");
        block_on(slots.save(&game, "quick", &json!({ "level": 2 }))).expect("overwrite");

        assert_eq!(
            block_on(slots.load(&game, "quick")).expect("load"),
            Some(json!({ "level": 2 }))
        );
        assert_eq!(prefs.keys(), vec!["save:cat-pong:quick".to_string()]);

        assert!(block_on(slots.remove(&game, "quick")).expect("remove"));
        assert!(!block_on(slots.remove(&game, "quick")).expect("remove absent"));
        assert_eq!(block_on(slots.load(&game, "quick")).expect("load"), None);
    }

    #[derive(Default)]
    struct CountingPrefs {
        inner: MemoryPrefsStore,
        writes: Cell<usize>,
    }

    impl PrefsStore for CountingPrefs {
        fn load_pref<'a>(
            &'a self,
            key: &'a str,
        ) -> PrefsStoreFuture<'a, Result<Option<String>, String>> {
            self.inner.load_pref(key)
        }

        fn save_pref<'a>(
            &'a self,
            key: &'a str,
            raw_json: &'a str,
        ) -> PrefsStoreFuture<'a, Result<(), String>> {
            self.writes.set(self.writes.get() + 1);
            self.inner.save_pref(key, raw_json)
        }

        fn delete_pref<'a>(&'a self, key: &'a str) -> PrefsStoreFuture<'a, Result<(), String>> {
            self.inner.delete_pref(key)
        }
    }

    #[test]
    fn identical_save_skips_the_write() {
        let prefs = Rc::new(CountingPrefs::default());
        let slots = SaveSlotStore::new(prefs.clone());
        let game = GameId::from("a");

        block_on(slots.save(&game, "quick", &json!([1, 2]))).expect("save");
        block_on(slots.save(&game, "quick", &json!([1, 2]))).expect("same value");
        assert_eq!(prefs.writes.get(), 1);

        block_on(slots.save(&game, "quick", &json!([3]))).expect("new value");
        assert_eq!(prefs.writes.get(), 2);
    }

    #[test]
    fn separator_in_ids_and_slots_does_not_alias_other_games() {
        let (slots, prefs) = store();
        let owner = GameId::from("a:b");
        let other = GameId::from("a");

        block_on(slots.save(&owner, "c", &json!({ "owner": "a:b" }))).expect("save");
        assert_eq!(block_on(slots.load(&other, "b:c")).expect("load"), None);
        assert!(!block_on(slots.remove(&other, "b:c")).expect("remove other"));
        assert_eq!(
            block_on(slots.load(&owner, "c")).expect("load owner"),
            Some(json!({ "owner": "a:b" }))
        );

        block_on(slots.save(&other, "b:c", &json!({ "owner": "a" }))).expect("save other");
        assert_eq!(
            prefs.keys(),
            vec!["save:a%3Ab:c".to_string(), "save:a:b%3Ac".to_string()]
        );
        assert_eq!(save_slot_key(&GameId::from("100%"), "x"), "save:100%25:x");
    }

    #[test]
    fn corrupt_payloads_are_read_errors() {
        let (slots, prefs) = store();
        block_on(prefs.save_pref("save:a:quick", "{oops")).expect("seed");
        assert!(matches!(
            block_on(slots.load(&GameId::from("a"), "quick")),
            Err(PersistenceError::Read { .. })
        ));
    }
}
