use leptos::{create_effect, spawn_local, Callable, Callback};

use crate::{host::ArcadeHostContext, persistence, reducer::ArcadeAction};

pub(super) fn install_boot_hydration(host: ArcadeHostContext, dispatch: Callback<ArcadeAction>) {
    create_effect(move |_| {
        let dispatch = dispatch;
        let host = host.clone();
        spawn_local(async move {
            let prefs = host.prefs_store();
            let snapshot = persistence::load_ledger_snapshot(prefs.as_ref()).await;
            dispatch.call(ArcadeAction::HydrateLedger {
                favorites: snapshot.favorites,
                recents: snapshot.recents,
            });

            dispatch.call(ArcadeAction::BootHydrationComplete);
        });
    });
}
