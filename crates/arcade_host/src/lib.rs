//! Typed host-domain contracts shared by the arcade runtime and its browser adapters.
//!
//! This crate is the boundary between the catalog/session core and the environment it runs in.
//! It exposes the key/value preference store used for favorites, recents, and save slots, the
//! notification (toast) service, and the viewport service that hosts the embedded game. Concrete
//! browser adapters live in `arcade_host_web`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod host;
pub mod notifications;
pub mod prefs;
pub mod viewport;

pub use host::{HostServices, HostStrategy};
pub use notifications::{
    MemoryNotificationService, NoopNotificationService, NotificationFuture, NotificationKind,
    NotificationService,
};
pub use prefs::{
    load_pref_with, save_pref_with, MemoryPrefsStore, NoopPrefsStore, PrefsStore, PrefsStoreFuture,
    DEFAULT_STORAGE_PREFIX,
};
pub use viewport::{
    MemoryViewportService, NoopViewportService, ViewportCall, ViewportService, BLANK_VIEWPORT_URL,
};
