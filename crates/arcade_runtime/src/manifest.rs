//! Game manifest validation and lookup.
//!
//! The manifest is a JSON array of game objects. Only `id` is required; every other field is
//! display metadata with a documented fallback. Validation is all-or-nothing: one bad entry fails
//! the whole load and the caller keeps an empty catalog.

use std::{
    collections::{HashMap, HashSet},
    fmt,
};

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::{
    config::ArcadeConfig,
    model::{GameDescriptor, GameId, Screenshot, UNCATEGORIZED},
};

/// Manifest load failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ManifestError {
    /// The document is not an array, or an entry has the wrong shape.
    #[error("malformed manifest: {0}")]
    Malformed(String),
    /// An entry has no non-empty string `id`.
    #[error("manifest entry {index} has no id")]
    MissingId {
        /// Zero-based position of the offending entry.
        index: usize,
    },
    /// Two entries share an id.
    #[error("duplicate game id `{0}` in manifest")]
    DuplicateId(GameId),
    /// The manifest could not be fetched.
    #[error("manifest unavailable: {0}")]
    Unavailable(String),
}

/// Monotonic token identifying one manifest request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoadTicket(pub u64);

impl fmt::Display for LoadTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawScreenshot {
    Url(String),
    Detailed {
        url: String,
        #[serde(default)]
        thumbnail: Option<String>,
    },
}

impl From<RawScreenshot> for Screenshot {
    fn from(raw: RawScreenshot) -> Self {
        match raw {
            RawScreenshot::Url(url) => Self {
                url,
                thumbnail: None,
            },
            RawScreenshot::Detailed { url, thumbnail } => Self { url, thumbnail },
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawGameEntry {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    entry: Option<String>,
    #[serde(default)]
    path: Option<String>,
    #[serde(default)]
    cover: Option<String>,
    #[serde(default)]
    release_date: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    screenshots: Vec<RawScreenshot>,
}

/// Validated, read-only game list in manifest order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ManifestStore {
    games: Vec<GameDescriptor>,
    index: HashMap<GameId, usize>,
}

impl ManifestStore {
    /// Parses and validates manifest JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::Malformed`] for invalid JSON, otherwise see
    /// [`ManifestStore::from_json`].
    pub fn from_json_str(raw: &str, config: &ArcadeConfig) -> Result<Self, ManifestError> {
        let value: Value =
            serde_json::from_str(raw).map_err(|err| ManifestError::Malformed(err.to_string()))?;
        Self::from_json(&value, config)
    }

    /// Validates an already-decoded manifest value.
    ///
    /// # Errors
    ///
    /// Returns the first [`ManifestError`] found while walking entries in order.
    pub fn from_json(raw: &Value, config: &ArcadeConfig) -> Result<Self, ManifestError> {
        let entries = raw
            .as_array()
            .ok_or_else(|| ManifestError::Malformed("expected an array of games".to_string()))?;

        let mut games = Vec::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            let object = entry.as_object().ok_or_else(|| {
                ManifestError::Malformed(format!("entry {index} is not an object"))
            })?;
            let id = object
                .get("id")
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .ok_or(ManifestError::MissingId { index })?;
            let parsed = RawGameEntry::deserialize(entry)
                .map_err(|err| ManifestError::Malformed(format!("entry {index}: {err}")))?;
            games.push(resolve_entry(GameId::new(id), parsed, config));
        }

        Self::from_descriptors(games)
    }

    /// Builds a store from resolved descriptors.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::DuplicateId`] on the first repeated id.
    pub fn from_descriptors(games: Vec<GameDescriptor>) -> Result<Self, ManifestError> {
        let mut index = HashMap::with_capacity(games.len());
        for (position, game) in games.iter().enumerate() {
            if index.insert(game.id.clone(), position).is_some() {
                return Err(ManifestError::DuplicateId(game.id.clone()));
            }
        }
        Ok(Self { games, index })
    }

    pub fn all(&self) -> &[GameDescriptor] {
        &self.games
    }

    pub fn by_id(&self, id: &GameId) -> Option<&GameDescriptor> {
        self.index.get(id).map(|position| &self.games[*position])
    }

    pub fn ids(&self) -> HashSet<GameId> {
        self.index.keys().cloned().collect()
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.games
            .iter()
            .filter(|game| seen.insert(game.category.to_lowercase()))
            .map(|game| game.category.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn resolve_entry(id: GameId, raw: RawGameEntry, config: &ArcadeConfig) -> GameDescriptor {
    let title = non_blank(raw.title).unwrap_or_else(|| humanize_id(id.as_str()));
    let category = non_blank(raw.category).unwrap_or_else(|| UNCATEGORIZED.to_string());
    let entry_url = resolve_entry_url(
        &id,
        non_blank(raw.entry).or_else(|| non_blank(raw.path)),
        config,
    );
    let cover = non_blank(raw.cover).unwrap_or_else(|| config.placeholder_cover.clone());

    GameDescriptor {
        title,
        category,
        entry_url,
        cover,
        release_date: raw.release_date.as_deref().and_then(parse_release_date),
        description: non_blank(raw.description),
        tags: raw
            .tags
            .into_iter()
            .filter_map(|tag| non_blank(Some(tag)))
            .collect(),
        screenshots: raw.screenshots.into_iter().map(Screenshot::from).collect(),
        id,
    }
}

fn is_absolute_url(raw: &str) -> bool {
    let lower = raw.get(..8).unwrap_or(raw).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

fn resolve_entry_url(id: &GameId, entry: Option<String>, config: &ArcadeConfig) -> String {
    let root = config.games_root_trimmed();
    match entry {
        None => format!("{root}/{id}/index.html"),
        Some(entry) if is_absolute_url(&entry) || entry.starts_with('/') => entry,
        Some(entry) => {
            let relative = entry.trim_start_matches("./");
            if relative.starts_with(&format!("{root}/")) {
                relative.to_string()
            } else {
                format!("{root}/{relative}")
            }
        }
    }
}

/// Turns an id such as `whack_a-cat` into a display title (`Whack A Cat`).
pub fn humanize_id(id: &str) -> String {
    let mut title = String::with_capacity(id.len());
    let mut at_word_start = true;
    let mut pending_space = false;

    for ch in id.chars() {
        if ch == '-' || ch == '_' {
            pending_space = true;
            continue;
        }
        if pending_space {
            title.push(' ');
            pending_space = false;
            at_word_start = true;
        }
        if at_word_start && ch.is_alphanumeric() {
            title.extend(ch.to_uppercase());
        } else {
            title.push(ch);
        }
        at_word_start = !ch.is_alphanumeric();
    }

    if pending_space {
        title.push(' ');
    }
    title
}

/// Parses `YYYY-MM-DD`, `YYYY-MM`, or `YYYY`. Timestamps are truncated to their date part.
pub fn parse_release_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let date_part = raw.get(..10).unwrap_or(raw);
    if let Ok(date) = NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(date) = NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d") {
        return Some(date);
    }
    let year = raw.parse::<i32>().ok().filter(|_| raw.len() == 4)?;
    NaiveDate::from_ymd_opt(year, 1, 1)
}
