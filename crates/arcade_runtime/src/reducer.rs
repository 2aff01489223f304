//! Reducer actions, side-effect intents, and transition logic for the arcade runtime.

use std::rc::Rc;

use arcade_host::NotificationKind;
use serde_json::Value;
use thiserror::Error;

use crate::{
    ledger::ReconcileOutcome,
    manifest::{LoadTicket, ManifestError, ManifestStore},
    model::{ArcadeState, CategoryFilter, GameId, LoadedSlot, SortOrder, ViewMode},
    persistence::PersistenceError,
    session::{SessionError, SessionPhase},
};

/// Toast shown when the manifest cannot be loaded or validated.
pub const MANIFEST_FAILURE_MESSAGE: &str = "Failed to load games. Please try again later.";
/// Toast shown when a launch or selection references an unknown game.
pub const GAME_NOT_FOUND_MESSAGE: &str = "Game not found";

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_arcade`] to mutate [`ArcadeState`].
pub enum ArcadeAction {
    /// Start a game from the catalog.
    Launch {
        /// Manifest id of the game.
        game_id: GameId,
    },
    /// Pause the running game.
    Pause,
    /// Resume the paused game.
    Resume,
    /// Pause when playing, resume when paused.
    TogglePause,
    /// Reload the active game from its entry URL.
    Restart,
    /// Close the active game and return to the catalog.
    Quit,
    /// Enter or leave fullscreen.
    ToggleFullscreen,
    /// Add or remove a favorite.
    ToggleFavorite {
        /// Manifest id of the game.
        game_id: GameId,
    },
    /// Replace the catalog search text.
    SetQuery {
        /// Raw search text.
        query: String,
    },
    /// Replace the catalog category filter.
    SetCategory {
        /// New filter.
        category: CategoryFilter,
    },
    /// Replace the catalog sort order.
    SetSort {
        /// New order.
        sort: SortOrder,
    },
    /// Switch between grid and list presentation.
    SetViewMode {
        /// New presentation.
        mode: ViewMode,
    },
    /// Open the details panel for a game.
    SelectGame {
        /// Manifest id of the game.
        game_id: GameId,
    },
    /// Close the details panel.
    CloseDetails,
    /// Store a value in a save slot of the active game.
    SaveState {
        /// Slot name, or the configured quick slot.
        slot: Option<String>,
        /// Opaque game state.
        value: Value,
    },
    /// Read a save slot of the active game.
    LoadState {
        /// Slot name, or the configured quick slot.
        slot: Option<String>,
    },
    /// Remove a save slot of any manifest game.
    DeleteState {
        /// Manifest id of the game.
        game_id: GameId,
        /// Slot name, or the configured quick slot.
        slot: Option<String>,
    },
    /// A save slot write completed.
    SlotSaved {
        /// Game the slot belongs to.
        game_id: GameId,
        /// Slot name.
        slot: String,
    },
    /// A save slot read completed.
    SlotLoaded {
        /// Game the slot belongs to.
        game_id: GameId,
        /// Slot name.
        slot: String,
        /// Stored value, `None` when the slot is empty.
        value: Option<Value>,
    },
    /// A save slot removal completed.
    SlotDeleted {
        /// Game the slot belongs to.
        game_id: GameId,
        /// Slot name.
        slot: String,
        /// Whether the slot existed before removal.
        existed: bool,
    },
    /// Restore persisted favorites and recents.
    HydrateLedger {
        /// Persisted favorites.
        favorites: Vec<GameId>,
        /// Persisted recents, most recent first.
        recents: Vec<GameId>,
    },
    /// A manifest request finished.
    ManifestLoaded {
        /// Ticket issued by [`ArcadeState::begin_manifest_load`].
        ticket: LoadTicket,
        /// Validated store or the reason loading failed.
        result: Result<ManifestStore, ManifestError>,
    },
    /// A host persistence operation failed.
    PersistenceFailed {
        /// Failure detail.
        error: PersistenceError,
    },
    /// Boot hydration finished.
    BootHydrationComplete,
}

#[derive(Debug, Clone, PartialEq)]
/// Side-effect intents emitted by [`reduce_arcade`] for the host to execute in order.
pub enum RuntimeEffect {
    /// Load the game entry URL into the viewport and show the player.
    OpenViewport(String),
    /// Reset the viewport to a blank document.
    CloseViewport,
    /// Move keyboard focus into the viewport on the next idle tick.
    FocusViewport,
    /// Show the pause overlay.
    ShowOverlay,
    /// Hide the pause overlay.
    HideOverlay,
    /// Request fullscreen presentation.
    EnterFullscreen,
    /// Leave fullscreen presentation.
    ExitFullscreen,
    /// Swap the player out for the catalog menu.
    ShowMenu,
    /// Show a toast.
    Notify {
        /// Toast text.
        message: String,
        /// Toast severity.
        kind: NotificationKind,
    },
    /// Persist the favorites set.
    PersistFavorites,
    /// Persist the recents list.
    PersistRecents,
    /// Write a save slot.
    SaveSlot {
        /// Game the slot belongs to.
        game_id: GameId,
        /// Slot name.
        slot: String,
        /// Value to store.
        value: Value,
    },
    /// Read a save slot and report back with [`ArcadeAction::SlotLoaded`].
    LoadSlot {
        /// Game the slot belongs to.
        game_id: GameId,
        /// Slot name.
        slot: String,
    },
    /// Remove a save slot and report back with [`ArcadeAction::SlotDeleted`].
    DeleteSlot {
        /// Game the slot belongs to.
        game_id: GameId,
        /// Slot name.
        slot: String,
    },
}

impl RuntimeEffect {
    /// Returns `true` for effects executed by the viewport adapter.
    pub fn is_viewport_intent(&self) -> bool {
        matches!(
            self,
            Self::OpenViewport(_)
                | Self::CloseViewport
                | Self::FocusViewport
                | Self::ShowOverlay
                | Self::HideOverlay
                | Self::EnterFullscreen
                | Self::ExitFullscreen
                | Self::ShowMenu
        )
    }

    fn notify(message: impl Into<String>, kind: NotificationKind) -> Self {
        Self::Notify {
            message: message.into(),
            kind,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reducer errors for rejected actions. State is unchanged when one is returned.
pub enum ReducerError {
    /// The action referenced a game missing from the manifest.
    #[error("game `{0}` not found")]
    GameNotFound(GameId),
    /// The session does not accept the action in its current phase.
    #[error(transparent)]
    InvalidTransition(#[from] SessionError),
    /// A manifest result arrived after a newer request was issued.
    #[error("discarded stale manifest result (ticket {0})")]
    StaleManifest(LoadTicket),
}

impl ReducerError {
    /// Toast text for errors the user should see. Fail-soft rejections return `None`.
    pub fn user_message(&self) -> Option<&'static str> {
        match self {
            Self::GameNotFound(_) => Some(GAME_NOT_FOUND_MESSAGE),
            Self::InvalidTransition(_) | Self::StaleManifest(_) => None,
        }
    }
}

fn persist_effects(outcome: ReconcileOutcome, effects: &mut Vec<RuntimeEffect>) {
    if outcome.favorites_pruned {
        effects.push(RuntimeEffect::PersistFavorites);
    }
    if outcome.recents_pruned {
        effects.push(RuntimeEffect::PersistRecents);
    }
}

fn active_game_id(state: &ArcadeState, action: &'static str) -> Result<GameId, ReducerError> {
    state
        .active_game()
        .map(|game| game.id.clone())
        .ok_or(ReducerError::InvalidTransition(
            SessionError::InvalidTransition {
                action,
                phase: SessionPhase::Browsing,
            },
        ))
}

fn slot_or_quick(state: &ArcadeState, slot: Option<String>) -> String {
    slot.map(|slot| slot.trim().to_string())
        .filter(|slot| !slot.is_empty())
        .unwrap_or_else(|| state.config.quick_save_slot.clone())
}

/// Applies an [`ArcadeAction`] to the arcade state and collects resulting side effects.
///
/// # Errors
///
/// Returns [`ReducerError`] when the action is rejected. The state is left untouched in that
/// case.
pub fn reduce_arcade(
    state: &mut ArcadeState,
    action: ArcadeAction,
) -> Result<Vec<RuntimeEffect>, ReducerError> {
    let mut effects = Vec::new();
    match action {
        ArcadeAction::Launch { game_id } => {
            let game = state
                .manifest
                .by_id(&game_id)
                .cloned()
                .ok_or_else(|| ReducerError::GameNotFound(game_id.clone()))?;
            let title = game.title.clone();
            effects.extend(state.session.launch(game)?);
            state.ledger.record_play(&game_id);
            state.selected_game = None;
            state.last_loaded_slot = None;
            effects.push(RuntimeEffect::PersistRecents);
            effects.push(RuntimeEffect::notify(
                format!("Starting {title}..."),
                NotificationKind::Info,
            ));
        }
        ArcadeAction::Pause => {
            effects.extend(state.session.pause()?);
            effects.push(RuntimeEffect::notify("Game Paused", NotificationKind::Info));
        }
        ArcadeAction::Resume => {
            effects.extend(state.session.resume()?);
        }
        ArcadeAction::TogglePause => {
            let next = match state.session.phase() {
                SessionPhase::Paused => ArcadeAction::Resume,
                SessionPhase::Playing | SessionPhase::Browsing => ArcadeAction::Pause,
            };
            return reduce_arcade(state, next);
        }
        ArcadeAction::Restart => {
            effects.extend(state.session.restart()?);
            effects.push(RuntimeEffect::notify(
                "Game Restarted",
                NotificationKind::Info,
            ));
        }
        ArcadeAction::Quit => {
            effects.extend(state.session.quit()?);
            state.last_loaded_slot = None;
            effects.push(RuntimeEffect::notify("Game Quit", NotificationKind::Info));
        }
        ArcadeAction::ToggleFullscreen => {
            effects.extend(state.session.toggle_fullscreen());
        }
        ArcadeAction::ToggleFavorite { game_id } => {
            let Some(added) = state.ledger.toggle_favorite(&game_id, &state.manifest) else {
                return Ok(effects);
            };
            effects.push(RuntimeEffect::PersistFavorites);
            effects.push(RuntimeEffect::notify(
                if added {
                    "Added to favorites"
                } else {
                    "Removed from favorites"
                },
                NotificationKind::Success,
            ));
        }
        ArcadeAction::SetQuery { query } => {
            state.params.query = query;
        }
        ArcadeAction::SetCategory { category } => {
            state.params.category = category;
        }
        ArcadeAction::SetSort { sort } => {
            state.params.sort = sort;
        }
        ArcadeAction::SetViewMode { mode } => {
            state.view_mode = mode;
        }
        ArcadeAction::SelectGame { game_id } => {
            if state.manifest.by_id(&game_id).is_none() {
                return Err(ReducerError::GameNotFound(game_id));
            }
            state.selected_game = Some(game_id);
        }
        ArcadeAction::CloseDetails => {
            state.selected_game = None;
        }
        ArcadeAction::SaveState { slot, value } => {
            let game_id = active_game_id(state, "save state")?;
            let slot = slot_or_quick(state, slot);
            effects.push(RuntimeEffect::SaveSlot {
                game_id,
                slot,
                value,
            });
        }
        ArcadeAction::LoadState { slot } => {
            let game_id = active_game_id(state, "load state")?;
            let slot = slot_or_quick(state, slot);
            effects.push(RuntimeEffect::LoadSlot { game_id, slot });
        }
        ArcadeAction::DeleteState { game_id, slot } => {
            if state.manifest.by_id(&game_id).is_none() {
                return Err(ReducerError::GameNotFound(game_id));
            }
            let slot = slot_or_quick(state, slot);
            effects.push(RuntimeEffect::DeleteSlot { game_id, slot });
        }
        ArcadeAction::SlotSaved { .. } => {
            effects.push(RuntimeEffect::notify(
                "Game state saved",
                NotificationKind::Success,
            ));
        }
        ArcadeAction::SlotLoaded {
            game_id,
            slot,
            value,
        } => {
            let found = value.is_some();
            state.last_loaded_slot = Some(LoadedSlot {
                game_id,
                slot,
                value,
            });
            effects.push(if found {
                RuntimeEffect::notify("Game state loaded", NotificationKind::Success)
            } else {
                RuntimeEffect::notify("No saved state found", NotificationKind::Info)
            });
        }
        ArcadeAction::SlotDeleted {
            game_id,
            slot,
            existed,
        } => {
            let matches_loaded = state
                .last_loaded_slot
                .as_ref()
                .is_some_and(|loaded| loaded.game_id == game_id && loaded.slot == slot);
            if matches_loaded {
                state.last_loaded_slot = None;
            }
            if existed {
                effects.push(RuntimeEffect::notify(
                    "Saved state deleted",
                    NotificationKind::Info,
                ));
            }
        }
        ArcadeAction::HydrateLedger { favorites, recents } => {
            state.ledger.hydrate(favorites, recents);
            if state.manifest_loaded && state.manifest_error.is_none() {
                let outcome = state.ledger.reconcile(&state.manifest.ids());
                persist_effects(outcome, &mut effects);
            }
        }
        ArcadeAction::ManifestLoaded { ticket, result } => {
            if !state.is_current_ticket(ticket) {
                return Err(ReducerError::StaleManifest(ticket));
            }
            state.manifest_loaded = true;
            match result {
                Ok(store) => {
                    let outcome = state.ledger.reconcile(&store.ids());
                    if state
                        .selected_game
                        .as_ref()
                        .is_some_and(|id| store.by_id(id).is_none())
                    {
                        state.selected_game = None;
                    }
                    let empty = store.is_empty();
                    state.manifest = Rc::new(store);
                    state.manifest_error = None;
                    persist_effects(outcome, &mut effects);
                    if empty {
                        effects.push(RuntimeEffect::notify(
                            "No games found",
                            NotificationKind::Info,
                        ));
                    }
                }
                Err(err) => {
                    state.manifest = Rc::new(ManifestStore::default());
                    state.manifest_error = Some(err);
                    state.selected_game = None;
                    effects.push(RuntimeEffect::notify(
                        MANIFEST_FAILURE_MESSAGE,
                        NotificationKind::Error,
                    ));
                }
            }
        }
        ArcadeAction::PersistenceFailed { error } => {
            effects.push(RuntimeEffect::notify(
                error.user_message(),
                NotificationKind::Error,
            ));
        }
        ArcadeAction::BootHydrationComplete => {
            effects.push(RuntimeEffect::notify(
                state.config.welcome_message.clone(),
                NotificationKind::Info,
            ));
        }
    }
    Ok(effects)
}
