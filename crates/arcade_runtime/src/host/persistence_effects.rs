//! Persistence effects. Each returns the follow-up action the host dispatches once the store
//! operation settles.

use std::rc::Rc;

use arcade_host::PrefsStore;
use leptos::logging;
use serde_json::Value;

use crate::{
    ledger::Ledger, model::GameId, persistence, reducer::ArcadeAction, save_slots::SaveSlotStore,
};

fn failed(cause: &str, error: persistence::PersistenceError) -> ArcadeAction {
    logging::warn!("persist {cause} failed: {error}");
    ArcadeAction::PersistenceFailed { error }
}

pub(super) async fn persist_favorites(
    prefs: Rc<dyn PrefsStore>,
    ledger: Ledger,
) -> Option<ArcadeAction> {
    persistence::persist_favorites(prefs.as_ref(), &ledger)
        .await
        .err()
        .map(|err| failed("favorites", err))
}

pub(super) async fn persist_recents(
    prefs: Rc<dyn PrefsStore>,
    ledger: Ledger,
) -> Option<ArcadeAction> {
    persistence::persist_recents(prefs.as_ref(), &ledger)
        .await
        .err()
        .map(|err| failed("recents", err))
}

pub(super) async fn save_slot(
    slots: SaveSlotStore,
    game_id: GameId,
    slot: String,
    value: Value,
) -> ArcadeAction {
    match slots.save(&game_id, &slot, &value).await {
        Ok(()) => ArcadeAction::SlotSaved { game_id, slot },
        Err(err) => failed("save slot", err),
    }
}

pub(super) async fn load_slot(slots: SaveSlotStore, game_id: GameId, slot: String) -> ArcadeAction {
    match slots.load(&game_id, &slot).await {
        Ok(value) => ArcadeAction::SlotLoaded {
            game_id,
            slot,
            value,
        },
        Err(err) => failed("load slot", err),
    }
}

pub(super) async fn delete_slot(
    slots: SaveSlotStore,
    game_id: GameId,
    slot: String,
) -> ArcadeAction {
    match slots.remove(&game_id, &slot).await {
        Ok(existed) => ArcadeAction::SlotDeleted {
            game_id,
            slot,
            existed,
        },
        Err(err) => failed("delete slot", err),
    }
}

#[cfg(test)]
mod tests {
    use arcade_host::MemoryPrefsStore;
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::persistence::{PersistenceError, FAVORITES_KEY};

    #[test]
    fn slot_effects_report_completion_actions() {
        let slots = SaveSlotStore::new(Rc::new(MemoryPrefsStore::default()));
        let game = GameId::from("cat-pong");

        assert_eq!(
            block_on(save_slot(
                slots.clone(),
                game.clone(),
                "quick".to_string(),
                json!({ "lives": 3 }),
            )),
            ArcadeAction::SlotSaved {
                game_id: game.clone(),
                slot: "quick".to_string(),
            }
        );
        assert_eq!(
            block_on(load_slot(slots.clone(), game.clone(), "quick".to_string())),
            ArcadeAction::SlotLoaded {
                game_id: game.clone(),
                slot: "quick".to_string(),
                value: Some(json!({ "lives": 3 })),
            }
        );
        assert_eq!(
            block_on(delete_slot(slots, game.clone(), "quick".to_string())),
            ArcadeAction::SlotDeleted {
                game_id: game,
                slot: "quick".to_string(),
                existed: true,
            }
        );
    }

    #[test]
    fn failed_writes_become_persistence_failures() {
        let prefs: Rc<dyn PrefsStore> = Rc::new(MemoryPrefsStore::with_quota(4));
        let mut ledger = Ledger::default();
        ledger.hydrate(vec![GameId::from("cat-pong")], Vec::new());

        let follow_up = block_on(persist_favorites(prefs.clone(), ledger.clone()));
        assert!(matches!(
            follow_up,
            Some(ArcadeAction::PersistenceFailed {
                error: PersistenceError::Write { ref key, .. },
            }) if key == FAVORITES_KEY
        ));

        let roomy: Rc<dyn PrefsStore> = Rc::new(MemoryPrefsStore::default());
        assert_eq!(block_on(persist_recents(roomy, ledger)), None);
    }
}
