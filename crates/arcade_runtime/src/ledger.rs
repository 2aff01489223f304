//! Favorites set and recently played list, reconciled against the loaded manifest.

use std::collections::{BTreeSet, HashSet};

use crate::{manifest::ManifestStore, model::GameId};

/// Default number of recently played ids kept.
pub const DEFAULT_RECENTS_CAPACITY: usize = 10;

/// What [`Ledger::reconcile`] removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReconcileOutcome {
    /// At least one favorite referenced a game missing from the manifest.
    pub favorites_pruned: bool,
    /// At least one recent entry referenced a game missing from the manifest.
    pub recents_pruned: bool,
}

impl ReconcileOutcome {
    pub fn any(self) -> bool {
        self.favorites_pruned || self.recents_pruned
    }
}

/// User-owned game lists.
///
/// Recents are most-recent-first, contain no duplicates, and never exceed the capacity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ledger {
    favorites: BTreeSet<GameId>,
    recents: Vec<GameId>,
    capacity: usize,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_RECENTS_CAPACITY)
    }
}

impl Ledger {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            favorites: BTreeSet::new(),
            recents: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    /// Replaces both lists with persisted copies, dropping duplicates and overflow.
    pub fn hydrate(&mut self, favorites: Vec<GameId>, recents: Vec<GameId>) {
        self.favorites = favorites.into_iter().collect();
        self.recents.clear();
        for id in recents {
            if self.recents.len() == self.capacity {
                break;
            }
            if !self.recents.contains(&id) {
                self.recents.push(id);
            }
        }
    }

    /// Flips favorite membership for a manifest game and returns the new membership.
    ///
    /// Returns `None` without touching the set when `id` is not in `manifest`.
    pub fn toggle_favorite(&mut self, id: &GameId, manifest: &ManifestStore) -> Option<bool> {
        manifest.by_id(id)?;
        if self.favorites.remove(id) {
            Some(false)
        } else {
            self.favorites.insert(id.clone());
            Some(true)
        }
    }

    pub fn is_favorite(&self, id: &GameId) -> bool {
        self.favorites.contains(id)
    }

    pub fn favorites(&self) -> &BTreeSet<GameId> {
        &self.favorites
    }

    /// Favorites in the order they are persisted.
    pub fn favorites_snapshot(&self) -> Vec<GameId> {
        self.favorites.iter().cloned().collect()
    }

    pub fn recents(&self) -> &[GameId] {
        &self.recents
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Moves `id` to the front of the recents list, dropping the oldest entry on overflow.
    pub fn record_play(&mut self, id: &GameId) {
        self.recents.retain(|existing| existing != id);
        self.recents.insert(0, id.clone());
        self.recents.truncate(self.capacity);
    }

    /// Drops favorites and recents that are not in `manifest_ids`.
    pub fn reconcile(&mut self, manifest_ids: &HashSet<GameId>) -> ReconcileOutcome {
        let favorites_before = self.favorites.len();
        self.favorites.retain(|id| manifest_ids.contains(id));
        let recents_before = self.recents.len();
        self.recents.retain(|id| manifest_ids.contains(id));

        ReconcileOutcome {
            favorites_pruned: self.favorites.len() != favorites_before,
            recents_pruned: self.recents.len() != recents_before,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::config::ArcadeConfig;

    fn ids(raw: &[&str]) -> Vec<GameId> {
        raw.iter().copied().map(GameId::from).collect()
    }

    fn manifest(raw: &[&str]) -> ManifestStore {
        let entries: Vec<_> = raw.iter().map(|id| json!({ "id": id })).collect();
        ManifestStore::from_json(&json!(entries), &ArcadeConfig::default()).expect("manifest")
    }

    #[test]
    fn record_play_moves_replays_to_front() {
        let mut ledger = Ledger::default();
        for id in ids(&["a", "b", "a", "c"]) {
            ledger.record_play(&id);
        }
        assert_eq!(ledger.recents(), ids(&["c", "a", "b"]).as_slice());
    }

    #[test]
    fn record_play_drops_oldest_on_overflow() {
        let mut ledger = Ledger::with_capacity(3);
        for id in ids(&["a", "b", "c", "d"]) {
            ledger.record_play(&id);
        }
        assert_eq!(ledger.recents(), ids(&["d", "c", "b"]).as_slice());
    }

    #[test]
    fn default_ledger_keeps_ten_recents() {
        let mut ledger = Ledger::default();
        let played: Vec<GameId> = (0..11).map(|n| GameId::new(format!("game-{n}"))).collect();
        for id in &played {
            ledger.record_play(id);
        }

        assert_eq!(ledger.recents().len(), 10);
        assert_eq!(ledger.recents().first(), Some(&played[10]));
        assert!(!ledger.recents().contains(&played[0]));
    }

    #[test]
    fn double_toggle_restores_membership() {
        let store = manifest(&["cat-pong"]);
        let mut ledger = Ledger::default();
        let id = GameId::from("cat-pong");

        assert_eq!(ledger.toggle_favorite(&id, &store), Some(true));
        assert!(ledger.is_favorite(&id));
        assert_eq!(ledger.toggle_favorite(&id, &store), Some(false));
        assert!(!ledger.is_favorite(&id));
    }

    #[test]
    fn toggling_unknown_game_is_a_noop() {
        let store = manifest(&["cat-pong"]);
        let mut ledger = Ledger::default();
        assert_eq!(ledger.toggle_favorite(&GameId::from("ghost"), &store), None);
        assert!(ledger.favorites().is_empty());
    }

    #[test]
    fn reconcile_prunes_only_absent_ids() {
        let mut ledger = Ledger::default();
        ledger.hydrate(ids(&["a", "gone"]), ids(&["gone", "b", "a"]));

        let known: HashSet<GameId> = ids(&["a", "b"]).into_iter().collect();
        let outcome = ledger.reconcile(&known);

        assert_eq!(
            outcome,
            ReconcileOutcome {
                favorites_pruned: true,
                recents_pruned: true,
            }
        );
        assert_eq!(ledger.favorites_snapshot(), ids(&["a"]));
        assert_eq!(ledger.recents(), ids(&["b", "a"]).as_slice());
        assert!(!ledger.reconcile(&known).any());
    }

    #[test]
    fn hydrate_dedupes_and_caps_recents() {
        let mut ledger = Ledger::with_capacity(2);
        ledger.hydrate(Vec::new(), ids(&["a", "a", "b", "c"]));
        assert_eq!(ledger.recents(), ids(&["a", "b"]).as_slice());
    }
}
