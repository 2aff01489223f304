use arcade_host::{ViewportService, BLANK_VIEWPORT_URL};

use crate::reducer::RuntimeEffect;

/// Applies one viewport intent. Non-viewport effects are ignored.
pub(super) fn apply(viewport: &dyn ViewportService, effect: &RuntimeEffect) -> Result<(), String> {
    match effect {
        RuntimeEffect::OpenViewport(url) => {
            viewport.load_url(url)?;
            viewport.set_player_visible(true)
        }
        RuntimeEffect::CloseViewport => viewport.load_url(BLANK_VIEWPORT_URL),
        RuntimeEffect::FocusViewport => viewport.focus(),
        RuntimeEffect::ShowOverlay => viewport.set_overlay_visible(true),
        RuntimeEffect::HideOverlay => viewport.set_overlay_visible(false),
        RuntimeEffect::EnterFullscreen => viewport.set_fullscreen(true),
        RuntimeEffect::ExitFullscreen => viewport.set_fullscreen(false),
        RuntimeEffect::ShowMenu => {
            // Quitting from pause leaves the overlay up otherwise.
            viewport.set_overlay_visible(false)?;
            viewport.set_player_visible(false)
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use arcade_host::{MemoryViewportService, ViewportCall};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::{
        config::ArcadeConfig,
        manifest::ManifestStore,
        model::{ArcadeState, GameId},
        reducer::{reduce_arcade, ArcadeAction},
    };

    #[test]
    fn session_round_trip_drives_viewport_and_resets_it() {
        let mut state = ArcadeState::default();
        let ticket = state.begin_manifest_load();
        let store = ManifestStore::from_json(
            &json!([{ "id": "cat-pong", "entry": "https://example.com/pong" }]),
            &ArcadeConfig::default(),
        )
        .expect("manifest");
        reduce_arcade(
            &mut state,
            ArcadeAction::ManifestLoaded {
                ticket,
                result: Ok(store),
            },
        )
        .expect("loaded");

        let viewport = MemoryViewportService::default();
        for action in [
            ArcadeAction::Launch {
                game_id: GameId::from("cat-pong"),
            },
            ArcadeAction::ToggleFullscreen,
            ArcadeAction::Pause,
            ArcadeAction::Quit,
        ] {
            for effect in reduce_arcade(&mut state, action).expect("accepted") {
                apply(&viewport, &effect).expect("apply");
            }
        }

        assert_eq!(
            viewport.calls(),
            vec![
                ViewportCall::Load("https://example.com/pong".to_string()),
                ViewportCall::Player(true),
                ViewportCall::Focus,
                ViewportCall::Fullscreen(true),
                ViewportCall::Overlay(true),
                ViewportCall::Fullscreen(false),
                ViewportCall::Load(BLANK_VIEWPORT_URL.to_string()),
                ViewportCall::Overlay(false),
                ViewportCall::Player(false),
            ]
        );
        assert_eq!(viewport.current_url().as_deref(), Some(BLANK_VIEWPORT_URL));
    }
}
