//! Play session state machine.
//!
//! A session is either browsing the catalog or holding exactly one active game, which is running
//! or paused. Each transition returns the viewport intents the host must apply, in order.

use std::fmt;

use thiserror::Error;

use crate::{model::GameDescriptor, reducer::RuntimeEffect};

/// Session state. The active game lives inside the state, so `Browsing` never carries one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Browsing,
    Playing(GameDescriptor),
    Paused(GameDescriptor),
}

/// Payload-free view of [`SessionState`] for diagnostics and errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Browsing,
    Playing,
    Paused,
}

impl SessionPhase {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Browsing => "browsing",
            Self::Playing => "playing",
            Self::Paused => "paused",
        }
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transition failures.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    /// The action is not accepted in the current phase.
    #[error("cannot {action} while {phase}")]
    InvalidTransition {
        /// Rejected action name.
        action: &'static str,
        /// Phase the session was in.
        phase: SessionPhase,
    },
}

/// The single play session owned by a runtime.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    state: SessionState,
    is_fullscreen: bool,
}

impl Session {
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> SessionPhase {
        match self.state {
            SessionState::Browsing => SessionPhase::Browsing,
            SessionState::Playing(_) => SessionPhase::Playing,
            SessionState::Paused(_) => SessionPhase::Paused,
        }
    }

    pub fn active_game(&self) -> Option<&GameDescriptor> {
        match &self.state {
            SessionState::Browsing => None,
            SessionState::Playing(game) | SessionState::Paused(game) => Some(game),
        }
    }

    pub fn is_fullscreen(&self) -> bool {
        self.is_fullscreen
    }

    fn reject(&self, action: &'static str) -> SessionError {
        SessionError::InvalidTransition {
            action,
            phase: self.phase(),
        }
    }

    /// Starts `game`. Only accepted while browsing.
    pub fn launch(&mut self, game: GameDescriptor) -> Result<Vec<RuntimeEffect>, SessionError> {
        if !matches!(self.state, SessionState::Browsing) {
            return Err(self.reject("launch"));
        }
        let url = game.entry_url.clone();
        self.state = SessionState::Playing(game);
        Ok(vec![
            RuntimeEffect::OpenViewport(url),
            RuntimeEffect::FocusViewport,
        ])
    }

    pub fn pause(&mut self) -> Result<Vec<RuntimeEffect>, SessionError> {
        match std::mem::take(&mut self.state) {
            SessionState::Playing(game) => {
                self.state = SessionState::Paused(game);
                Ok(vec![RuntimeEffect::ShowOverlay])
            }
            other => {
                self.state = other;
                Err(self.reject("pause"))
            }
        }
    }

    pub fn resume(&mut self) -> Result<Vec<RuntimeEffect>, SessionError> {
        match std::mem::take(&mut self.state) {
            SessionState::Paused(game) => {
                self.state = SessionState::Playing(game);
                Ok(vec![RuntimeEffect::HideOverlay, RuntimeEffect::FocusViewport])
            }
            other => {
                self.state = other;
                Err(self.reject("resume"))
            }
        }
    }

    /// Reloads the active game from its entry URL and leaves the session playing.
    pub fn restart(&mut self) -> Result<Vec<RuntimeEffect>, SessionError> {
        let (game, was_paused) = match std::mem::take(&mut self.state) {
            SessionState::Playing(game) => (game, false),
            SessionState::Paused(game) => (game, true),
            SessionState::Browsing => return Err(self.reject("restart")),
        };
        let mut effects = vec![RuntimeEffect::OpenViewport(game.entry_url.clone())];
        if was_paused {
            effects.push(RuntimeEffect::HideOverlay);
        }
        effects.push(RuntimeEffect::FocusViewport);
        self.state = SessionState::Playing(game);
        Ok(effects)
    }

    /// Ends the active game and returns to the catalog, leaving fullscreen first.
    pub fn quit(&mut self) -> Result<Vec<RuntimeEffect>, SessionError> {
        if matches!(self.state, SessionState::Browsing) {
            return Err(self.reject("quit"));
        }
        let mut effects = Vec::with_capacity(3);
        if self.is_fullscreen {
            self.is_fullscreen = false;
            effects.push(RuntimeEffect::ExitFullscreen);
        }
        effects.push(RuntimeEffect::CloseViewport);
        effects.push(RuntimeEffect::ShowMenu);
        self.state = SessionState::Browsing;
        Ok(effects)
    }

    pub fn toggle_fullscreen(&mut self) -> Vec<RuntimeEffect> {
        self.is_fullscreen = !self.is_fullscreen;
        if self.is_fullscreen {
            vec![RuntimeEffect::EnterFullscreen]
        } else {
            vec![RuntimeEffect::ExitFullscreen]
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::GameId;

    fn game(id: &str) -> GameDescriptor {
        GameDescriptor {
            id: GameId::from(id),
            title: id.to_string(),
            category: "arcade".to_string(),
            entry_url: format!("games/{id}/index.html"),
            cover: String::new(),
            release_date: None,
            description: None,
            tags: Vec::new(),
            screenshots: Vec::new(),
        }
    }

    fn assert_paired(session: &Session) {
        assert_eq!(
            session.phase() == SessionPhase::Browsing,
            session.active_game().is_none(),
            "browsing must pair with no active game"
        );
    }

    #[test]
    fn restart_from_pause_hides_overlay_and_plays() {
        let mut session = Session::default();
        session.launch(game("a")).expect("launch");
        session.pause().expect("pause");

        let effects = session.restart().expect("restart");
        assert_eq!(
            effects,
            vec![
                RuntimeEffect::OpenViewport("games/a/index.html".to_string()),
                RuntimeEffect::HideOverlay,
                RuntimeEffect::FocusViewport,
            ]
        );
        assert_eq!(session.phase(), SessionPhase::Playing);
        assert_paired(&session);
    }

    #[test]
    fn quit_exits_fullscreen_first() {
        let mut session = Session::default();
        session.launch(game("a")).expect("launch");
        assert_eq!(session.toggle_fullscreen(), vec![RuntimeEffect::EnterFullscreen]);

        let effects = session.quit().expect("quit");
        assert_eq!(
            effects,
            vec![
                RuntimeEffect::ExitFullscreen,
                RuntimeEffect::CloseViewport,
                RuntimeEffect::ShowMenu,
            ]
        );
        assert!(!session.is_fullscreen());
        assert_paired(&session);
    }

    #[test]
    fn invalid_transitions_leave_state_untouched() {
        let mut session = Session::default();
        assert_eq!(
            session.pause(),
            Err(SessionError::InvalidTransition {
                action: "pause",
                phase: SessionPhase::Browsing,
            })
        );
        assert!(session.resume().is_err());
        assert!(session.restart().is_err());
        assert!(session.quit().is_err());
        assert_paired(&session);

        session.launch(game("a")).expect("launch");
        let err = session.launch(game("b")).expect_err("second launch");
        assert_eq!(err.to_string(), "cannot launch while playing");
        assert_eq!(session.active_game().map(|g| g.id.as_str()), Some("a"));
        assert!(session.resume().is_err());
        assert_eq!(session.phase(), SessionPhase::Playing);
        assert_paired(&session);
    }

    #[test]
    fn fullscreen_toggles_in_any_phase() {
        let mut session = Session::default();
        assert_eq!(session.toggle_fullscreen(), vec![RuntimeEffect::EnterFullscreen]);
        assert_eq!(session.toggle_fullscreen(), vec![RuntimeEffect::ExitFullscreen]);
        assert_paired(&session);
    }
}
