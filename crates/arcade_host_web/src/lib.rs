//! Browser (`wasm32`) implementations of [`arcade_host`] service contracts.
//!
//! Preferences live in `window.localStorage` under a configurable key prefix, notifications go
//! through the Web Notifications API, and the viewport adapter drives the game `<iframe>` plus
//! the player chrome by element id. On non-wasm targets every adapter degrades to a successful
//! no-op so the runtime can be exercised natively.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

/// Compile-time host-strategy selection and host bundle assembly.
pub mod adapters;
pub mod local_prefs;
pub mod notifications;
pub mod viewport;

pub use adapters::{build_host_services, host_strategy_name, selected_host_strategy};
pub use arcade_host::DEFAULT_STORAGE_PREFIX;
pub use local_prefs::WebPrefsStore;
pub use notifications::WebNotificationService;
pub use viewport::{ViewportElementIds, WebViewportService};
