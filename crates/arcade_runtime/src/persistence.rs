//! Ledger persistence through the host preference store.
//!
//! Favorites and recents are stored as JSON arrays of ids. Reads are lenient: a missing or
//! corrupt entry hydrates as empty. Writes report a [`PersistenceError`] and leave in-memory
//! state authoritative.

use arcade_host::{load_pref_with, save_pref_with, PrefsStore};
use leptos::logging;
use thiserror::Error;

use crate::{ledger::Ledger, model::GameId};

/// Preference key holding the favorites array.
pub const FAVORITES_KEY: &str = "favorites";
/// Preference key holding the recently played array.
pub const RECENTS_KEY: &str = "recentGames";

/// Best-effort persistence failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// Reading a key failed or its payload could not be decoded.
    #[error("read `{key}` failed: {message}")]
    Read {
        /// Preference key.
        key: String,
        /// Store or decoder detail.
        message: String,
    },
    /// Writing or deleting a key failed.
    #[error("write `{key}` failed: {message}")]
    Write {
        /// Preference key.
        key: String,
        /// Store detail, for example a quota rejection.
        message: String,
    },
}

impl PersistenceError {
    pub(crate) fn read(key: &str, message: String) -> Self {
        Self::Read {
            key: key.to_string(),
            message,
        }
    }

    pub(crate) fn write(key: &str, message: String) -> Self {
        Self::Write {
            key: key.to_string(),
            message,
        }
    }

    /// Toast text shown once per failure.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Read { .. } => "Could not read saved data",
            Self::Write { .. } => "Could not save your data; changes last until the page closes",
        }
    }
}

/// Persisted ledger contents read at boot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LedgerSnapshot {
    pub favorites: Vec<GameId>,
    pub recents: Vec<GameId>,
}

async fn load_ids(prefs: &dyn PrefsStore, key: &str) -> Vec<GameId> {
    match load_pref_with::<_, Vec<GameId>>(prefs, key).await {
        Ok(ids) => ids.unwrap_or_default(),
        Err(err) => {
            logging::warn!("ignoring unreadable `{key}` preference: {err}");
            Vec::new()
        }
    }
}

/// Loads persisted favorites and recents. Unreadable entries hydrate as empty lists.
pub async fn load_ledger_snapshot(prefs: &dyn PrefsStore) -> LedgerSnapshot {
    LedgerSnapshot {
        favorites: load_ids(prefs, FAVORITES_KEY).await,
        recents: load_ids(prefs, RECENTS_KEY).await,
    }
}

/// Persists the favorites set.
///
/// # Errors
///
/// Returns [`PersistenceError::Write`] when the store rejects the write.
pub async fn persist_favorites(
    prefs: &dyn PrefsStore,
    ledger: &Ledger,
) -> Result<(), PersistenceError> {
    save_pref_with(prefs, FAVORITES_KEY, &ledger.favorites_snapshot())
        .await
        .map_err(|err| PersistenceError::write(FAVORITES_KEY, err))
}

/// Persists the recents list.
///
/// # Errors
///
/// Returns [`PersistenceError::Write`] when the store rejects the write.
pub async fn persist_recents(
    prefs: &dyn PrefsStore,
    ledger: &Ledger,
) -> Result<(), PersistenceError> {
    save_pref_with(prefs, RECENTS_KEY, ledger.recents())
        .await
        .map_err(|err| PersistenceError::write(RECENTS_KEY, err))
}

#[cfg(test)]
mod tests {
    use arcade_host::MemoryPrefsStore;
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn ledger_round_trips_through_prefs() {
        let prefs = MemoryPrefsStore::default();
        let mut ledger = Ledger::default();
        ledger.hydrate(vec![GameId::from("b"), GameId::from("a")], Vec::new());
        ledger.record_play(&GameId::from("a"));
        ledger.record_play(&GameId::from("b"));

        block_on(persist_favorites(&prefs, &ledger)).expect("favorites");
        block_on(persist_recents(&prefs, &ledger)).expect("recents");
        assert_eq!(prefs.raw(RECENTS_KEY).as_deref(), Some("[\"b\",\"a\"]"));

        assert_eq!(
            block_on(load_ledger_snapshot(&prefs)),
            LedgerSnapshot {
                favorites: vec![GameId::from("a"), GameId::from("b")],
                recents: vec![GameId::from("b"), GameId::from("a")],
            }
        );
    }

    #[test]
    fn corrupt_entries_hydrate_as_empty() {
        let prefs = MemoryPrefsStore::default();
        block_on(prefs.save_pref(FAVORITES_KEY, "{not json")).expect("seed");
        block_on(prefs.save_pref(RECENTS_KEY, "[1, 2]")).expect("seed");
        assert_eq!(block_on(load_ledger_snapshot(&prefs)), LedgerSnapshot::default());
    }

    #[test]
    fn quota_failures_surface_as_write_errors() {
        let prefs = MemoryPrefsStore::with_quota(8);
        let mut ledger = Ledger::default();
        ledger.record_play(&GameId::from("a-very-long-game-id"));

        let err = block_on(persist_recents(&prefs, &ledger)).expect_err("quota");
        assert!(matches!(err, PersistenceError::Write { ref key, .. } if key == RECENTS_KEY));
        assert_eq!(prefs.raw(RECENTS_KEY), None);
    }
}
