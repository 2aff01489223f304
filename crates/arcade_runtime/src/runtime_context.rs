//! Runtime provider and context wiring for the arcade.
//!
//! This module owns the long-lived reducer container, the runtime effect queue, and host
//! bootstrap wiring. Rendering stays with the embedding application, which reads the state and
//! catalog signals exposed here.
#![allow(clippy::clone_on_copy)]

use std::future::Future;

use arcade_host::{HostServices, NotificationKind};
use leptos::*;
use serde_json::Value;

use crate::{
    config::ArcadeConfig,
    effect_executor,
    host::ArcadeHostContext,
    keyboard,
    manifest::{ManifestError, ManifestStore},
    model::{ArcadeState, GameDescriptor},
    reducer::{reduce_arcade, ArcadeAction, RuntimeEffect},
};

#[derive(Clone, Copy)]
/// Leptos context for reading arcade state and dispatching [`ArcadeAction`] values.
pub struct ArcadeRuntimeContext {
    /// Host service bundle for executing runtime side effects.
    pub host: StoredValue<ArcadeHostContext>,
    /// Reactive arcade state signal.
    pub state: RwSignal<ArcadeState>,
    /// Queue of runtime effects emitted by the reducer and drained by the effect executor.
    pub effects: RwSignal<Vec<RuntimeEffect>>,
    /// Games matching the current search, category, and sort.
    pub catalog: Memo<Vec<GameDescriptor>>,
    /// Reducer dispatch callback.
    pub dispatch: Callback<ArcadeAction>,
}

impl ArcadeRuntimeContext {
    /// Dispatches a reducer action through the runtime context callback.
    pub fn dispatch_action(&self, action: ArcadeAction) {
        self.dispatch.call(action);
    }

    /// Dispatches the shortcut bound to `key`, returning whether one matched.
    pub fn dispatch_key(&self, key: &str) -> bool {
        let action = self
            .state
            .with_untracked(|state| keyboard::action_for_key(state, key));
        match action {
            Some(action) => {
                self.dispatch_action(action);
                true
            }
            None => false,
        }
    }

    /// Starts a manifest load. Only the most recently started load is applied.
    ///
    /// `fetch` resolves to the decoded manifest JSON or a transport error message.
    pub fn load_manifest<F>(&self, fetch: F)
    where
        F: Future<Output = Result<Value, String>> + 'static,
    {
        let mut state = self.state.get_untracked();
        let ticket = state.begin_manifest_load();
        let config = state.config.clone();
        self.state.set(state);

        let runtime = *self;
        spawn_local(async move {
            let result = match fetch.await {
                Ok(raw) => ManifestStore::from_json(&raw, &config),
                Err(err) => Err(ManifestError::Unavailable(err)),
            };
            if let Err(err) = &result {
                logging::warn!("manifest load failed: {err}");
            }
            runtime.dispatch_action(ArcadeAction::ManifestLoaded { ticket, result });
        });
    }
}

fn install_runtime_orchestration(runtime: ArcadeRuntimeContext) {
    runtime
        .host
        .get_value()
        .install_boot_hydration(runtime.dispatch);
    effect_executor::install(runtime);
}

#[component]
/// Provides [`ArcadeRuntimeContext`] to descendant components and boots persisted state.
pub fn ArcadeProvider(
    /// Injected browser or stub host bundle assembled by the entry layer.
    host_services: HostServices,
    /// Runtime configuration; defaults apply when omitted.
    #[prop(optional)]
    config: ArcadeConfig,
    children: Children,
) -> impl IntoView {
    let host = store_value(ArcadeHostContext::new(host_services));
    logging::log!(
        "arcade runtime starting with `{}` host",
        host.get_value().host_strategy_name()
    );
    let state = create_rw_signal(ArcadeState::new(config));
    let effects = create_rw_signal(Vec::<RuntimeEffect>::new());
    let catalog = create_memo(move |_| state.with(ArcadeState::catalog_view));

    let dispatch = Callback::new(move |action: ArcadeAction| {
        let mut arcade = state.get_untracked();
        let previous = arcade.clone();

        let new_effects = match reduce_arcade(&mut arcade, action) {
            Ok(new_effects) => {
                if arcade != previous {
                    state.set(arcade);
                }
                new_effects
            }
            Err(err) => {
                logging::warn!("arcade reducer rejected action: {err}");
                err.user_message()
                    .map(|message| {
                        vec![RuntimeEffect::Notify {
                            message: message.to_string(),
                            kind: NotificationKind::Error,
                        }]
                    })
                    .unwrap_or_default()
            }
        };

        if !new_effects.is_empty() {
            let mut queue = effects.get_untracked();
            queue.extend(new_effects);
            effects.set(queue);
        }
    });

    let runtime = ArcadeRuntimeContext {
        host,
        state,
        effects,
        catalog,
        dispatch,
    };

    provide_context(runtime.clone());

    install_runtime_orchestration(runtime);

    children().into_view()
}

/// Returns the current [`ArcadeRuntimeContext`].
///
/// # Panics
///
/// Panics if called outside [`ArcadeProvider`].
pub fn use_arcade_runtime() -> ArcadeRuntimeContext {
    use_context::<ArcadeRuntimeContext>().expect("ArcadeRuntimeContext not provided")
}
