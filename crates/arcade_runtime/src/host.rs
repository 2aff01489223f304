//! Host-side runtime helpers for executing reducer effects.
//!
//! The reducer only describes what should happen; this module routes each [`RuntimeEffect`] to the
//! injected host services and feeds completion results back through the dispatch callback.

mod boot;
mod persistence_effects;
mod viewport_effects;

use std::rc::Rc;

use arcade_host::{HostServices, NotificationKind, NotificationService, PrefsStore, ViewportService};
use leptos::{logging, spawn_local, SignalGetUntracked};

use crate::{
    reducer::{ArcadeAction, RuntimeEffect},
    runtime_context::ArcadeRuntimeContext,
    save_slots::SaveSlotStore,
};

#[derive(Clone)]
/// Host service bundle for arcade runtime side effects.
pub struct ArcadeHostContext {
    services: HostServices,
}

impl ArcadeHostContext {
    /// Wraps a host bundle assembled by the entry layer.
    pub fn new(services: HostServices) -> Self {
        Self { services }
    }

    /// Returns the configured preference store.
    pub fn prefs_store(&self) -> Rc<dyn PrefsStore> {
        self.services.prefs.clone()
    }

    /// Returns the configured toast service.
    pub fn notification_service(&self) -> Rc<dyn NotificationService> {
        self.services.notifications.clone()
    }

    /// Returns the configured game viewport.
    pub fn viewport_service(&self) -> Rc<dyn ViewportService> {
        self.services.viewport.clone()
    }

    /// Returns save-slot access over the configured preference store.
    pub fn save_slots(&self) -> SaveSlotStore {
        SaveSlotStore::new(self.prefs_store())
    }

    /// Returns the stable name of the selected host strategy.
    pub fn host_strategy_name(&self) -> &'static str {
        self.services.host_strategy.as_str()
    }

    /// Installs boot hydration: persisted favorites and recents are loaded and dispatched, then
    /// boot completion is announced.
    pub fn install_boot_hydration(&self, dispatch: leptos::Callback<ArcadeAction>) {
        boot::install_boot_hydration(self.clone(), dispatch);
    }

    /// Executes a single [`RuntimeEffect`] emitted by the reducer.
    pub fn run_runtime_effect(&self, runtime: ArcadeRuntimeContext, effect: RuntimeEffect) {
        if effect.is_viewport_intent() {
            if let Err(err) = viewport_effects::apply(self.services.viewport.as_ref(), &effect) {
                logging::warn!("viewport effect {effect:?} failed: {err}");
            }
            return;
        }

        match effect {
            RuntimeEffect::Notify { message, kind } => self.notify(message, kind),
            RuntimeEffect::PersistFavorites => {
                let ledger = runtime.state.get_untracked().ledger;
                let prefs = self.prefs_store();
                spawn_local(async move {
                    if let Some(action) = persistence_effects::persist_favorites(prefs, ledger).await
                    {
                        runtime.dispatch_action(action);
                    }
                });
            }
            RuntimeEffect::PersistRecents => {
                let ledger = runtime.state.get_untracked().ledger;
                let prefs = self.prefs_store();
                spawn_local(async move {
                    if let Some(action) = persistence_effects::persist_recents(prefs, ledger).await {
                        runtime.dispatch_action(action);
                    }
                });
            }
            RuntimeEffect::SaveSlot {
                game_id,
                slot,
                value,
            } => {
                let slots = self.save_slots();
                spawn_local(async move {
                    runtime.dispatch_action(
                        persistence_effects::save_slot(slots, game_id, slot, value).await,
                    );
                });
            }
            RuntimeEffect::LoadSlot { game_id, slot } => {
                let slots = self.save_slots();
                spawn_local(async move {
                    runtime
                        .dispatch_action(persistence_effects::load_slot(slots, game_id, slot).await);
                });
            }
            RuntimeEffect::DeleteSlot { game_id, slot } => {
                let slots = self.save_slots();
                spawn_local(async move {
                    runtime.dispatch_action(
                        persistence_effects::delete_slot(slots, game_id, slot).await,
                    );
                });
            }
            RuntimeEffect::OpenViewport(_)
            | RuntimeEffect::CloseViewport
            | RuntimeEffect::FocusViewport
            | RuntimeEffect::ShowOverlay
            | RuntimeEffect::HideOverlay
            | RuntimeEffect::EnterFullscreen
            | RuntimeEffect::ExitFullscreen
            | RuntimeEffect::ShowMenu => {}
        }
    }

    fn notify(&self, message: String, kind: NotificationKind) {
        let notifications = self.notification_service();
        spawn_local(async move {
            if let Err(err) = notifications.notify(&message, kind).await {
                logging::warn!("notification dispatch failed: {err}");
            }
        });
    }
}
