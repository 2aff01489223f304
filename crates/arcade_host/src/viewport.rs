//! Game viewport contracts.
//!
//! The viewport is the single embedded frame that hosts the running mini-game, plus the player
//! chrome around it (pause overlay, fullscreen, and the catalog menu it replaces). The runtime
//! never touches these surfaces directly; it emits intents that a [`ViewportService`] executes.

use std::{cell::RefCell, rc::Rc};

/// Neutral target loaded into the viewport whenever no game is active.
pub const BLANK_VIEWPORT_URL: &str = "about:blank";

/// Host service that drives the embedded game viewport.
///
/// Calls are synchronous: each maps onto an immediate DOM/window operation. Implementations that
/// must wait for the viewport element to exist (focus) schedule the work themselves.
pub trait ViewportService {
    /// Points the viewport at `url`, tearing down whatever was loaded before.
    fn load_url(&self, url: &str) -> Result<(), String>;

    /// Moves keyboard focus into the viewport.
    fn focus(&self) -> Result<(), String>;

    /// Shows or hides the pause overlay.
    fn set_overlay_visible(&self, visible: bool) -> Result<(), String>;

    /// Enters or leaves fullscreen presentation.
    fn set_fullscreen(&self, fullscreen: bool) -> Result<(), String>;

    /// Shows the player surface (hiding the catalog) or the catalog menu (hiding the player).
    fn set_player_visible(&self, visible: bool) -> Result<(), String>;
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op viewport for headless hosts.
pub struct NoopViewportService;

impl ViewportService for NoopViewportService {
    fn load_url(&self, _url: &str) -> Result<(), String> {
        Ok(())
    }

    fn focus(&self) -> Result<(), String> {
        Ok(())
    }

    fn set_overlay_visible(&self, _visible: bool) -> Result<(), String> {
        Ok(())
    }

    fn set_fullscreen(&self, _fullscreen: bool) -> Result<(), String> {
        Ok(())
    }

    fn set_player_visible(&self, _visible: bool) -> Result<(), String> {
        Ok(())
    }
}

/// One call observed by [`MemoryViewportService`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewportCall {
    /// [`ViewportService::load_url`].
    Load(String),
    /// [`ViewportService::focus`].
    Focus,
    /// [`ViewportService::set_overlay_visible`].
    Overlay(bool),
    /// [`ViewportService::set_fullscreen`].
    Fullscreen(bool),
    /// [`ViewportService::set_player_visible`].
    Player(bool),
}

#[derive(Debug, Default)]
struct MemoryViewportInner {
    calls: Vec<ViewportCall>,
    current_url: Option<String>,
}

#[derive(Debug, Clone, Default)]
/// Viewport that records calls and tracks the currently loaded URL.
pub struct MemoryViewportService {
    inner: Rc<RefCell<MemoryViewportInner>>,
}

impl MemoryViewportService {
    /// Returns every call made so far, oldest first.
    pub fn calls(&self) -> Vec<ViewportCall> {
        self.inner.borrow().calls.clone()
    }

    /// Returns the URL currently loaded into the viewport.
    pub fn current_url(&self) -> Option<String> {
        self.inner.borrow().current_url.clone()
    }

    fn record(&self, call: ViewportCall) {
        self.inner.borrow_mut().calls.push(call);
    }
}

impl ViewportService for MemoryViewportService {
    fn load_url(&self, url: &str) -> Result<(), String> {
        self.inner.borrow_mut().current_url = Some(url.to_string());
        self.record(ViewportCall::Load(url.to_string()));
        Ok(())
    }

    fn focus(&self) -> Result<(), String> {
        self.record(ViewportCall::Focus);
        Ok(())
    }

    fn set_overlay_visible(&self, visible: bool) -> Result<(), String> {
        self.record(ViewportCall::Overlay(visible));
        Ok(())
    }

    fn set_fullscreen(&self, fullscreen: bool) -> Result<(), String> {
        self.record(ViewportCall::Fullscreen(fullscreen));
        Ok(())
    }

    fn set_player_visible(&self, visible: bool) -> Result<(), String> {
        self.record(ViewportCall::Player(visible));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_viewport_tracks_current_url_and_call_order() {
        let viewport = MemoryViewportService::default();
        let handle = viewport.clone();

        viewport.load_url("games/cat-pong/index.html").expect("load");
        viewport.focus().expect("focus");
        viewport.load_url(BLANK_VIEWPORT_URL).expect("blank");

        assert_eq!(handle.current_url().as_deref(), Some(BLANK_VIEWPORT_URL));
        assert_eq!(
            handle.calls(),
            vec![
                ViewportCall::Load("games/cat-pong/index.html".to_string()),
                ViewportCall::Focus,
                ViewportCall::Load(BLANK_VIEWPORT_URL.to_string()),
            ]
        );
    }
}
