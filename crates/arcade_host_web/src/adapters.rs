use std::rc::Rc;

use arcade_host::{
    HostServices, HostStrategy, NoopNotificationService, NoopPrefsStore, NoopViewportService,
};

use crate::{WebNotificationService, WebPrefsStore, WebViewportService};

/// Returns the compile-time selected host strategy for the active build.
pub const fn selected_host_strategy() -> HostStrategy {
    #[cfg(feature = "host-stub")]
    {
        HostStrategy::Stub
    }

    #[cfg(not(feature = "host-stub"))]
    {
        HostStrategy::Browser
    }
}

/// Returns the selected host strategy as a stable string token.
pub fn host_strategy_name() -> &'static str {
    selected_host_strategy().as_str()
}

/// Assembles the host service bundle for the selected strategy.
///
/// `storage_prefix` namespaces every preference key written by the browser store.
pub fn build_host_services(storage_prefix: &str) -> HostServices {
    match selected_host_strategy() {
        HostStrategy::Browser => HostServices {
            prefs: Rc::new(WebPrefsStore::with_prefix(storage_prefix)),
            notifications: Rc::new(WebNotificationService),
            viewport: Rc::new(WebViewportService::default()),
            host_strategy: HostStrategy::Browser,
        },
        HostStrategy::Stub | HostStrategy::Memory => HostServices {
            prefs: Rc::new(NoopPrefsStore),
            notifications: Rc::new(NoopNotificationService),
            viewport: Rc::new(NoopViewportService),
            host_strategy: HostStrategy::Stub,
        },
    }
}
