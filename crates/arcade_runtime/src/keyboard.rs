//! Keyboard shortcut mapping.
//!
//! Keys are `KeyboardEvent.key` values. Callers skip events with Ctrl/Alt/Meta held and events
//! targeting text inputs.

use crate::{model::ArcadeState, reducer::ArcadeAction, session::SessionPhase};

/// Maps a key press to the action it triggers in the current state.
pub fn action_for_key(state: &ArcadeState, key: &str) -> Option<ArcadeAction> {
    let in_game = state.session.phase() != SessionPhase::Browsing;
    match key {
        "Escape" | "Esc" if !in_game && state.is_details_open() => {
            Some(ArcadeAction::CloseDetails)
        }
        "Escape" | "Esc" | " " | "Spacebar" | "p" | "P" if in_game => {
            Some(ArcadeAction::TogglePause)
        }
        "F11" => Some(ArcadeAction::ToggleFullscreen),
        _ => None,
    }
}
