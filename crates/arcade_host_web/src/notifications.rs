//! Notification adapter backed by the Web Notifications API.

use arcade_host::{NotificationFuture, NotificationKind, NotificationService};

#[derive(Debug, Clone, Copy, Default)]
/// Browser notification adapter.
pub struct WebNotificationService;

fn render_title(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::Info => "Cat Arcade",
        NotificationKind::Success => "Cat Arcade: done",
        NotificationKind::Error => "Cat Arcade: error",
    }
}

impl NotificationService for WebNotificationService {
    fn notify<'a>(
        &'a self,
        message: &'a str,
        kind: NotificationKind,
    ) -> NotificationFuture<'a, Result<(), String>> {
        Box::pin(async move {
            #[cfg(target_arch = "wasm32")]
            {
                use wasm_bindgen::JsValue;
                let rendered = format!("{}: {message}", render_title(kind));
                return web_sys::Notification::new(&rendered)
                    .map(|_| ())
                    .map_err(|err: JsValue| format!("notification dispatch failed: {err:?}"));
            }

            #[cfg(not(target_arch = "wasm32"))]
            {
                let _ = (render_title(kind), message);
                Ok(())
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn titles_distinguish_errors() {
        assert_ne!(
            render_title(NotificationKind::Error),
            render_title(NotificationKind::Info)
        );
    }
}
