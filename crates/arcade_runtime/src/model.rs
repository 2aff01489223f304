use std::{fmt, rc::Rc};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    catalog,
    config::ArcadeConfig,
    ledger::Ledger,
    manifest::{LoadTicket, ManifestError, ManifestStore},
    session::Session,
};

/// Category assigned to games whose manifest entry has none.
pub const UNCATEGORIZED: &str = "uncategorized";

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(pub String);

impl GameId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GameId {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screenshot {
    pub url: String,
    pub thumbnail: Option<String>,
}

impl Screenshot {
    /// Image to show in a thumbnail strip.
    pub fn thumbnail_or_full(&self) -> &str {
        self.thumbnail.as_deref().unwrap_or(&self.url)
    }
}

/// Immutable game entry resolved from the manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameDescriptor {
    pub id: GameId,
    pub title: String,
    pub category: String,
    pub entry_url: String,
    pub cover: String,
    pub release_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub screenshots: Vec<Screenshot>,
}

/// Category selector applied before text filtering.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Favorites,
    Recent,
    /// Literal category, stored lower-cased.
    Named(String),
}

impl CategoryFilter {
    pub fn parse(raw: &str) -> Self {
        let normalized = raw.trim().to_lowercase();
        match normalized.as_str() {
            "" | "all" => Self::All,
            "favorites" => Self::Favorites,
            "recent" => Self::Recent,
            _ => Self::Named(normalized),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::All => "all",
            Self::Favorites => "favorites",
            Self::Recent => "recent",
            Self::Named(name) => name,
        }
    }

    /// Heading shown above the catalog grid.
    pub fn label(&self) -> String {
        match self {
            Self::All => "All Games".to_string(),
            Self::Favorites => "Favorites".to_string(),
            Self::Recent => "Recently Played".to_string(),
            Self::Named(name) => {
                let mut chars = name.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    NameAsc,
    NameDesc,
    Newest,
}

impl SortOrder {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "name-asc" => Some(Self::NameAsc),
            "name-desc" => Some(Self::NameDesc),
            "newest" => Some(Self::Newest),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NameAsc => "name-asc",
            Self::NameDesc => "name-desc",
            Self::Newest => "newest",
        }
    }
}

/// Search, category, and sort inputs for the catalog view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CatalogParams {
    pub query: String,
    pub category: CategoryFilter,
    pub sort: SortOrder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

/// Save-slot read result handed back to the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedSlot {
    pub game_id: GameId,
    pub slot: String,
    pub value: Option<Value>,
}

/// Whole runtime state owned by one arcade instance.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcadeState {
    pub config: Rc<ArcadeConfig>,
    pub manifest: Rc<ManifestStore>,
    /// `true` once any manifest result (success or failure) has been applied.
    pub manifest_loaded: bool,
    pub manifest_error: Option<ManifestError>,
    pub manifest_generation: u64,
    pub ledger: Ledger,
    pub session: Session,
    pub params: CatalogParams,
    pub view_mode: ViewMode,
    pub selected_game: Option<GameId>,
    pub last_loaded_slot: Option<LoadedSlot>,
}

impl Default for ArcadeState {
    fn default() -> Self {
        Self::new(ArcadeConfig::default())
    }
}

impl ArcadeState {
    pub fn new(config: ArcadeConfig) -> Self {
        let ledger = Ledger::with_capacity(config.recents_capacity);
        Self {
            config: Rc::new(config),
            manifest: Rc::new(ManifestStore::default()),
            manifest_loaded: false,
            manifest_error: None,
            manifest_generation: 0,
            ledger,
            session: Session::default(),
            params: CatalogParams::default(),
            view_mode: ViewMode::default(),
            selected_game: None,
            last_loaded_slot: None,
        }
    }

    /// Issues a ticket for a new manifest request. Results tagged with an older ticket are
    /// discarded when they arrive.
    pub fn begin_manifest_load(&mut self) -> LoadTicket {
        self.manifest_generation += 1;
        LoadTicket(self.manifest_generation)
    }

    pub fn is_current_ticket(&self, ticket: LoadTicket) -> bool {
        ticket.0 == self.manifest_generation
    }

    /// Games matching the current search, category, and sort.
    pub fn catalog_view(&self) -> Vec<GameDescriptor> {
        catalog::view(
            self.manifest.all(),
            &self.params,
            self.ledger.favorites(),
            self.ledger.recents(),
        )
    }

    pub fn active_game(&self) -> Option<&GameDescriptor> {
        self.session.active_game()
    }

    pub fn selected_descriptor(&self) -> Option<&GameDescriptor> {
        self.selected_game
            .as_ref()
            .and_then(|id| self.manifest.by_id(id))
    }

    pub fn is_details_open(&self) -> bool {
        self.selected_game.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_filter_parses_reserved_names_case_insensitively() {
        assert_eq!(CategoryFilter::parse("All"), CategoryFilter::All);
        assert_eq!(CategoryFilter::parse(" favorites "), CategoryFilter::Favorites);
        assert_eq!(CategoryFilter::parse("RECENT"), CategoryFilter::Recent);
        assert_eq!(
            CategoryFilter::parse("Puzzle"),
            CategoryFilter::Named("puzzle".to_string())
        );
    }

    #[test]
    fn category_labels() {
        assert_eq!(CategoryFilter::All.label(), "All Games");
        assert_eq!(CategoryFilter::Recent.label(), "Recently Played");
        assert_eq!(CategoryFilter::parse("arcade").label(), "Arcade");
    }

    #[test]
    fn sort_order_tokens_round_trip() {
        for sort in [SortOrder::NameAsc, SortOrder::NameDesc, SortOrder::Newest] {
            assert_eq!(SortOrder::parse(sort.as_str()), Some(sort));
        }
        assert_eq!(SortOrder::parse("oldest"), None);
    }

    #[test]
    fn manifest_tickets_only_accept_latest() {
        let mut state = ArcadeState::default();
        let first = state.begin_manifest_load();
        let second = state.begin_manifest_load();
        assert!(!state.is_current_ticket(first));
        assert!(state.is_current_ticket(second));
    }

    #[test]
    fn game_ids_serialize_as_plain_strings() {
        let ids = vec![GameId::from("cat-pong"), GameId::from("whack-a-cat")];
        assert_eq!(
            serde_json::to_string(&ids).expect("encode"),
            "[\"cat-pong\",\"whack-a-cat\"]"
        );
    }
}
