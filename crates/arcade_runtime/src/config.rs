//! Typed arcade configuration loaded from TOML.
//!
//! Every field has a default, so an empty document is a valid configuration. Semantic checks run
//! after deserialization.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ledger::DEFAULT_RECENTS_CAPACITY;

/// Directory that relative game entry paths resolve against.
pub const DEFAULT_GAMES_ROOT: &str = "games";
/// Cover shown for games whose manifest entry has none.
pub const DEFAULT_PLACEHOLDER_COVER: &str = "assets/placeholder-cover.png";
/// Save slot used by the quick save/load commands.
pub const DEFAULT_QUICK_SAVE_SLOT: &str = "quick";
/// Toast shown once boot hydration completes.
pub const DEFAULT_WELCOME_MESSAGE: &str = "Welcome to Cat Games Emulator!";

/// Configuration failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The document is not valid TOML or has mistyped fields.
    #[error("failed to parse arcade config: {0}")]
    Parse(String),
    /// The document parsed but a value is unusable.
    #[error("invalid arcade config: {0}")]
    Invalid(String),
}

/// Arcade runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArcadeConfig {
    /// Root that relative entry paths resolve against.
    pub games_root: String,
    /// Cover reference used when a manifest entry has none.
    pub placeholder_cover: String,
    /// Maximum number of recently played ids kept.
    pub recents_capacity: usize,
    /// Slot name used by the quick save/load commands.
    pub quick_save_slot: String,
    /// Toast shown after boot.
    pub welcome_message: String,
    /// Prefix applied to every persisted key by the browser store.
    pub storage_prefix: String,
}

impl Default for ArcadeConfig {
    fn default() -> Self {
        Self {
            games_root: DEFAULT_GAMES_ROOT.to_string(),
            placeholder_cover: DEFAULT_PLACEHOLDER_COVER.to_string(),
            recents_capacity: DEFAULT_RECENTS_CAPACITY,
            quick_save_slot: DEFAULT_QUICK_SAVE_SLOT.to_string(),
            welcome_message: DEFAULT_WELCOME_MESSAGE.to_string(),
            storage_prefix: arcade_host::DEFAULT_STORAGE_PREFIX.to_string(),
        }
    }
}

impl ArcadeConfig {
    /// Parses and validates a TOML configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and [`ConfigError::Invalid`] when a value
    /// fails validation.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks semantic constraints serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.games_root.trim().is_empty() {
            return Err(ConfigError::Invalid("games_root must not be empty".into()));
        }
        if self.recents_capacity == 0 {
            return Err(ConfigError::Invalid(
                "recents_capacity must be at least 1".into(),
            ));
        }
        if self.quick_save_slot.trim().is_empty() || self.quick_save_slot.contains(':') {
            return Err(ConfigError::Invalid(
                "quick_save_slot must be non-empty and must not contain `:`".into(),
            ));
        }
        Ok(())
    }

    /// Returns the games root without trailing slashes.
    pub fn games_root_trimmed(&self) -> &str {
        self.games_root.trim_end_matches('/')
    }
}
