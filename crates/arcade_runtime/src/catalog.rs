//! Derived catalog views: category selection, text search, and ordering.

use std::{cmp::Ordering, collections::BTreeSet};

use crate::model::{CatalogParams, CategoryFilter, GameDescriptor, GameId, SortOrder};

/// Produces the displayed subset of `games` for `params`.
///
/// `recent` views follow the recents order and ignore `params.sort`; every other view is sorted.
pub fn view(
    games: &[GameDescriptor],
    params: &CatalogParams,
    favorites: &BTreeSet<GameId>,
    recents: &[GameId],
) -> Vec<GameDescriptor> {
    let query = params.query.trim().to_lowercase();

    let selected: Vec<&GameDescriptor> = match &params.category {
        CategoryFilter::All => games.iter().collect(),
        CategoryFilter::Favorites => games
            .iter()
            .filter(|game| favorites.contains(&game.id))
            .collect(),
        CategoryFilter::Recent => recents
            .iter()
            .filter_map(|id| games.iter().find(|game| &game.id == id))
            .collect(),
        CategoryFilter::Named(name) => games
            .iter()
            .filter(|game| game.category.to_lowercase() == *name)
            .collect(),
    };

    let mut matched: Vec<GameDescriptor> = selected
        .into_iter()
        .filter(|game| query.is_empty() || matches_query(game, &query))
        .cloned()
        .collect();

    if params.category != CategoryFilter::Recent {
        sort_games(&mut matched, params.sort);
    }
    matched
}

fn matches_query(game: &GameDescriptor, needle: &str) -> bool {
    game.title.to_lowercase().contains(needle)
        || game
            .description
            .as_deref()
            .is_some_and(|description| description.to_lowercase().contains(needle))
        || game
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(needle))
}

fn compare_titles(left: &GameDescriptor, right: &GameDescriptor) -> Ordering {
    left.title
        .to_lowercase()
        .cmp(&right.title.to_lowercase())
        .then_with(|| left.title.cmp(&right.title))
}

/// Sorts `games` in place. The sort is stable, so equal titles keep manifest order.
pub fn sort_games(games: &mut [GameDescriptor], sort: SortOrder) {
    match sort {
        SortOrder::NameAsc => games.sort_by(compare_titles),
        SortOrder::NameDesc => games.sort_by(|left, right| compare_titles(right, left)),
        SortOrder::Newest => games.sort_by(|left, right| {
            match (left.release_date, right.release_date) {
                (Some(l), Some(r)) => r.cmp(&l),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
            .then_with(|| compare_titles(left, right))
        }),
    }
}
