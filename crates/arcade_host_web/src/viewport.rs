//! DOM-backed game viewport adapter.
//!
//! The player is an `<iframe>` inside a player section that is swapped with the catalog menu by
//! toggling a `hidden` class. The pause overlay is shown with an `active` class, mirroring the
//! markup the catalog page ships.

use arcade_host::ViewportService;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast};

#[cfg(target_arch = "wasm32")]
const HIDDEN_CLASS: &str = "hidden";
#[cfg(target_arch = "wasm32")]
const ACTIVE_CLASS: &str = "active";

/// DOM element ids the viewport adapter drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportElementIds {
    /// Game `<iframe>`.
    pub frame: &'static str,
    /// Player section wrapping the frame.
    pub player: &'static str,
    /// Catalog menu section.
    pub menu: &'static str,
    /// Pause overlay.
    pub overlay: &'static str,
}

impl Default for ViewportElementIds {
    fn default() -> Self {
        Self {
            frame: "game-frame",
            player: "player",
            menu: "menu",
            overlay: "game-overlay",
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Browser viewport adapter.
pub struct WebViewportService {
    ids: ViewportElementIds,
}

impl WebViewportService {
    /// Creates an adapter bound to custom element ids.
    pub fn with_ids(ids: ViewportElementIds) -> Self {
        Self { ids }
    }

    /// Returns the element ids this adapter drives.
    pub fn ids(&self) -> ViewportElementIds {
        self.ids
    }
}

#[cfg(target_arch = "wasm32")]
fn element_by_id(id: &str) -> Result<web_sys::Element, String> {
    web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(id))
        .ok_or_else(|| format!("element `#{id}` not found"))
}

#[cfg(target_arch = "wasm32")]
fn set_class(id: &str, class: &str, present: bool) -> Result<(), String> {
    element_by_id(id)?
        .class_list()
        .toggle_with_force(class, present)
        .map(|_| ())
        .map_err(|err| format!("class toggle on `#{id}` failed: {err:?}"))
}

impl ViewportService for WebViewportService {
    fn load_url(&self, url: &str) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            let frame = element_by_id(self.ids.frame)?
                .dyn_into::<web_sys::HtmlIFrameElement>()
                .map_err(|_| format!("`#{}` is not an iframe", self.ids.frame))?;
            frame.set_src(url);
            Ok(())
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = url;
            Ok(())
        }
    }

    fn focus(&self) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            let window = web_sys::window().ok_or_else(|| "window unavailable".to_string())?;
            let frame_id = self.ids.frame;
            // The frame may have been swapped in by the same batch; focus on the next tick.
            let callback = Closure::once_into_js(move || {
                if let Ok(element) = element_by_id(frame_id) {
                    if let Ok(element) = element.dyn_into::<web_sys::HtmlElement>() {
                        let _ = element.focus();
                    }
                }
            });
            window
                .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), 0)
                .map(|_| ())
                .map_err(|err| format!("schedule viewport focus failed: {err:?}"))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            Ok(())
        }
    }

    fn set_overlay_visible(&self, visible: bool) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            set_class(self.ids.overlay, ACTIVE_CLASS, visible)
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = visible;
            Ok(())
        }
    }

    fn set_fullscreen(&self, fullscreen: bool) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            let document = web_sys::window()
                .and_then(|window| window.document())
                .ok_or_else(|| "document unavailable".to_string())?;
            if fullscreen {
                let root = document
                    .document_element()
                    .ok_or_else(|| "document element unavailable".to_string())?;
                root.request_fullscreen()
                    .map_err(|err| format!("request fullscreen failed: {err:?}"))
            } else {
                if document.fullscreen_element().is_some() {
                    document.exit_fullscreen();
                }
                Ok(())
            }
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = fullscreen;
            Ok(())
        }
    }

    fn set_player_visible(&self, visible: bool) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            set_class(self.ids.player, HIDDEN_CLASS, !visible)?;
            set_class(self.ids.menu, HIDDEN_CLASS, visible)
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = visible;
            Ok(())
        }
    }
}
