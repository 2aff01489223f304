//! Catalog and play-session runtime for embeddable mini-games.
//!
//! The pure core ([`manifest`], [`catalog`], [`ledger`], [`session`], [`reducer`]) validates the
//! game manifest, derives catalog views, and runs the single play session as a state machine that
//! emits [`RuntimeEffect`] intents. [`ArcadeProvider`] hosts that core in a Leptos reactive
//! container and executes the intents against injected [`arcade_host::HostServices`].

pub mod catalog;
pub mod config;
mod effect_executor;
pub mod host;
pub mod keyboard;
pub mod ledger;
pub mod manifest;
pub mod model;
pub mod persistence;
pub mod reducer;
pub mod runtime_context;
pub mod save_slots;
pub mod session;

pub use config::{ArcadeConfig, ConfigError};
pub use host::ArcadeHostContext;
pub use ledger::{Ledger, ReconcileOutcome, DEFAULT_RECENTS_CAPACITY};
pub use manifest::{LoadTicket, ManifestError, ManifestStore};
pub use model::*;
pub use persistence::PersistenceError;
pub use reducer::{reduce_arcade, ArcadeAction, ReducerError, RuntimeEffect};
pub use runtime_context::{use_arcade_runtime, ArcadeProvider, ArcadeRuntimeContext};
pub use save_slots::SaveSlotStore;
pub use session::{Session, SessionError, SessionPhase, SessionState};
