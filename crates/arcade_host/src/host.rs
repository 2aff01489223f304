//! Host service bundle injected into the arcade runtime.

use std::rc::Rc;

use crate::{
    MemoryNotificationService, MemoryPrefsStore, MemoryViewportService, NotificationService,
    PrefsStore, ViewportService,
};

/// Stable host strategy selected for the current build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostStrategy {
    /// Browser-backed adapters (`localStorage`, DOM viewport, Web Notifications).
    Browser,
    /// No-op adapters for headless builds.
    Stub,
    /// In-process recording adapters.
    Memory,
}

impl HostStrategy {
    /// Returns a stable string token for diagnostics.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Browser => "browser",
            Self::Stub => "stub",
            Self::Memory => "memory",
        }
    }
}

/// Runtime-selected host service bundle.
///
/// All environment-specific service selection happens before this bundle reaches
/// `arcade_runtime`, which keeps the catalog and session core free of DOM details.
#[derive(Clone)]
pub struct HostServices {
    /// Preference store backing favorites, recents, and save slots.
    pub prefs: Rc<dyn PrefsStore>,
    /// Toast/notification delivery.
    pub notifications: Rc<dyn NotificationService>,
    /// Embedded game viewport.
    pub viewport: Rc<dyn ViewportService>,
    /// Strategy identifier for diagnostics.
    pub host_strategy: HostStrategy,
}

impl HostServices {
    /// Builds a bundle around in-memory adapters, returning handles to inspect them.
    pub fn memory() -> (
        Self,
        MemoryPrefsStore,
        MemoryNotificationService,
        MemoryViewportService,
    ) {
        let prefs = MemoryPrefsStore::default();
        let notifications = MemoryNotificationService::default();
        let viewport = MemoryViewportService::default();
        let services = Self {
            prefs: Rc::new(prefs.clone()),
            notifications: Rc::new(notifications.clone()),
            viewport: Rc::new(viewport.clone()),
            host_strategy: HostStrategy::Memory,
        };
        (services, prefs, notifications, viewport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_bundle_shares_adapters_with_returned_handles() {
        let (services, prefs, _notifications, viewport) = HostServices::memory();
        services.viewport.load_url("games/a/index.html").expect("load");
        futures::executor::block_on(services.prefs.save_pref("favorites", "[]")).expect("save");

        assert_eq!(services.host_strategy.as_str(), "memory");
        assert_eq!(viewport.current_url().as_deref(), Some("games/a/index.html"));
        assert_eq!(prefs.raw("favorites").as_deref(), Some("[]"));
    }
}
