#![allow(missing_docs)]

//! Catalog query pipeline: filter, then sort, then paginate.
//!
//! Every stage is a pure function of its inputs. Invalid page requests
//! degrade to empty pages instead of failing.

use std::{cmp::Ordering, str::FromStr};

use icu_collator::{Collator, CollatorOptions};
use serde::Serialize;
use thiserror::Error;

use super::models::Game;

/// Optional per-dimension filters. Empty strings count as "not supplied".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterCriteria {
    /// Exact provider name.
    pub provider: Option<String>,
    /// Exact category name.
    pub category: Option<String>,
    /// Name of a tag the game must carry.
    pub tag: Option<String>,
    /// Case-insensitive substring of the game name.
    pub search: Option<String>,
}

impl FilterCriteria {
    /// Criteria with only a provider filter.
    pub fn provider(name: impl Into<String>) -> Self {
        Self {
            provider: Some(name.into()),
            ..Self::default()
        }
    }

    /// Criteria with only a category filter.
    pub fn category(name: impl Into<String>) -> Self {
        Self {
            category: Some(name.into()),
            ..Self::default()
        }
    }

    /// Criteria with only a tag filter.
    pub fn tag(name: impl Into<String>) -> Self {
        Self {
            tag: Some(name.into()),
            ..Self::default()
        }
    }

    /// Criteria with only a search term.
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search: Some(term.into()),
            ..Self::default()
        }
    }

    /// True when no dimension is filtered.
    pub fn is_empty(&self) -> bool {
        supplied(&self.provider).is_none()
            && supplied(&self.category).is_none()
            && supplied(&self.tag).is_none()
            && supplied(&self.search).is_none()
    }

    /// Whether `game` satisfies every supplied predicate.
    pub fn matches(&self, game: &Game) -> bool {
        if let Some(provider) = supplied(&self.provider) {
            if game.provider.name != provider {
                return false;
            }
        }
        if let Some(category) = supplied(&self.category) {
            if game.category.name != category {
                return false;
            }
        }
        if let Some(tag) = supplied(&self.tag) {
            if !game.has_tag(tag) {
                return false;
            }
        }
        if let Some(term) = supplied(&self.search) {
            if !game.name.to_lowercase().contains(&term.to_lowercase()) {
                return false;
            }
        }
        true
    }
}

fn supplied(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}

/// A sort field or direction nobody offers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sort option `{0}`")]
pub struct UnknownSortOption(pub String);

/// Field the catalog is ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    #[default]
    Name,
    Provider,
    Category,
}

impl SortField {
    fn key<'a>(&self, game: &'a Game) -> &'a str {
        match self {
            SortField::Name => &game.name,
            SortField::Provider => &game.provider.name,
            SortField::Category => &game.category.name,
        }
    }
}

impl FromStr for SortField {
    type Err = UnknownSortOption;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "name" => Ok(SortField::Name),
            "provider" => Ok(SortField::Provider),
            "category" => Ok(SortField::Category),
            _ => Err(UnknownSortOption(value.to_string())),
        }
    }
}

/// Direction of the ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortOrder {
    type Err = UnknownSortOption;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(UnknownSortOption(value.to_string())),
        }
    }
}

/// One window of a larger ordered sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Requested 1-based page number.
    pub page: usize,
    pub page_size: usize,
    /// Count before pagination.
    pub total_items: usize,
    /// `ceil(total_items / page_size)`, zero for an empty sequence.
    pub total_pages: usize,
}

/// Every user-visible catalog parameter in one value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogQuery {
    #[serde(flatten)]
    pub criteria: FilterCriteria,
    pub sort: SortField,
    pub order: SortOrder,
    pub page: usize,
    pub page_size: usize,
}

/// Games shown per page when the caller does not say otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 12;

impl Default for CatalogQuery {
    fn default() -> Self {
        Self {
            criteria: FilterCriteria::default(),
            sort: SortField::default(),
            order: SortOrder::default(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Keep games that satisfy `criteria`, preserving their relative order.
pub fn filter<'a>(games: &'a [Game], criteria: &FilterCriteria) -> Vec<&'a Game> {
    games.iter().filter(|game| criteria.matches(game)).collect()
}

/// Return a newly ordered copy of `games`. Ties keep their input order.
pub fn sort<'a>(games: &[&'a Game], field: SortField, order: SortOrder) -> Vec<&'a Game> {
    let mut sorted = games.to_vec();
    sorted.sort_by(|a, b| {
        let ordering = locale_cmp(field.key(a), field.key(b));
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
    sorted
}

/// Slice out 1-based page `page` of `page_size` items.
///
/// Page zero, a zero page size or a page past the end give an empty window.
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    let total_items = items.len();
    let total_pages = if page_size == 0 {
        0
    } else {
        total_items.div_ceil(page_size)
    };

    let window = page
        .checked_sub(1)
        .and_then(|index| index.checked_mul(page_size))
        .filter(|start| page_size > 0 && *start < total_items)
        .map(|start| &items[start..(start + page_size).min(total_items)])
        .unwrap_or(&[]);

    Page {
        items: window.to_vec(),
        page,
        page_size,
        total_items,
        total_pages,
    }
}

/// Run the full pipeline over `games`.
pub fn run_query<'a>(games: &'a [Game], query: &CatalogQuery) -> Page<&'a Game> {
    let filtered = filter(games, &query.criteria);
    let sorted = sort(&filtered, query.sort, query.order);
    paginate(&sorted, query.page, query.page_size)
}

thread_local! {
    static COLLATOR: Option<Collator> =
        Collator::try_new(&Default::default(), CollatorOptions::new()).ok();
}

/// Locale-aware string ordering using the root collation: accents and case
/// are secondary to the base letters, lowercase sorts before uppercase and
/// punctuation before digits.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    COLLATOR.with(|collator| match collator {
        Some(collator) => collator.compare(a, b),
        None => folded_cmp(a, b),
    })
}

/// Case-folded comparison used if no collation data is available.
fn folded_cmp(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn mock_games() -> Vec<Game> {
        serde_json::from_value(json!([
            {
                "id": 1,
                "name": "Game One",
                "slug": "game-one",
                "provider": { "name": "Provider A" },
                "category": { "name": "Slots" },
                "tags": [{ "id": 1, "name": "Feature A", "type": 1 }],
            },
            {
                "id": 2,
                "name": "Game Two",
                "slug": "game-two",
                "provider": { "name": "Provider B" },
                "category": { "name": "Table Games" },
                "tags": [{ "id": 2, "name": "Feature B", "type": 1 }],
            },
            {
                "id": 3,
                "name": "Game Three",
                "slug": "game-three",
                "provider": { "name": "Provider A" },
                "category": { "name": "Slots" },
                "tags": [
                    { "id": 1, "name": "Feature A", "type": 1 },
                    { "id": 2, "name": "Feature B", "type": 1 }
                ],
            },
        ]))
        .expect("valid mock games")
    }

    fn ids(games: &[&Game]) -> Vec<u64> {
        games.iter().map(|game| game.id).collect()
    }

    fn names<'a>(games: &[&'a Game]) -> Vec<&'a str> {
        games.iter().map(|game| game.name.as_str()).collect()
    }

    #[test]
    fn filters_by_provider() {
        let games = mock_games();
        let filtered = filter(&games, &FilterCriteria::provider("Provider A"));
        assert_eq!(ids(&filtered), vec![1, 3]);
    }

    #[test]
    fn filters_by_category() {
        let games = mock_games();
        let filtered = filter(&games, &FilterCriteria::category("Table Games"));
        assert_eq!(ids(&filtered), vec![2]);
    }

    #[test]
    fn filters_by_tag_membership() {
        let games = mock_games();
        let filtered = filter(&games, &FilterCriteria::tag("Feature B"));
        assert_eq!(ids(&filtered), vec![2, 3]);
    }

    #[test]
    fn search_is_case_insensitive_on_name() {
        let games = mock_games();
        let filtered = filter(&games, &FilterCriteria::search("THREE"));
        assert_eq!(ids(&filtered), vec![3]);
    }

    #[test]
    fn combines_every_supplied_predicate() {
        let games = mock_games();
        let criteria = FilterCriteria {
            provider: Some("Provider A".to_string()),
            tag: Some("Feature B".to_string()),
            ..FilterCriteria::default()
        };
        assert_eq!(ids(&filter(&games, &criteria)), vec![3]);

        // search no longer short-circuits the other dimensions
        let criteria = FilterCriteria {
            provider: Some("Provider B".to_string()),
            search: Some("game".to_string()),
            ..FilterCriteria::default()
        };
        assert_eq!(ids(&filter(&games, &criteria)), vec![2]);
    }

    #[test]
    fn empty_strings_do_not_filter() {
        let games = mock_games();
        let criteria = FilterCriteria {
            provider: Some(String::new()),
            category: Some(String::new()),
            tag: Some(String::new()),
            search: Some(String::new()),
        };
        assert!(criteria.is_empty());
        assert_eq!(ids(&filter(&games, &criteria)), vec![1, 2, 3]);
    }

    #[test]
    fn filter_output_is_an_ordered_subset() {
        let games = mock_games();
        let all = [
            FilterCriteria::default(),
            FilterCriteria::provider("Provider A"),
            FilterCriteria::category("Slots"),
            FilterCriteria::tag("Feature A"),
            FilterCriteria::search("o"),
            FilterCriteria::provider("Nobody"),
        ];
        for criteria in &all {
            let positions: Vec<usize> = filter(&games, criteria)
                .iter()
                .map(|kept| games.iter().position(|game| game.id == kept.id).unwrap())
                .collect();
            assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
        }
    }

    #[test]
    fn sorts_by_name_lexicographically() {
        let games = mock_games();
        let all: Vec<&Game> = games.iter().collect();

        let asc = sort(&all, SortField::Name, SortOrder::Asc);
        assert_eq!(names(&asc), vec!["Game One", "Game Three", "Game Two"]);

        let desc = sort(&all, SortField::Name, SortOrder::Desc);
        assert_eq!(names(&desc), vec!["Game Two", "Game Three", "Game One"]);

        let mut reversed = asc.clone();
        reversed.reverse();
        assert_eq!(ids(&reversed), ids(&desc));
    }

    #[test]
    fn sorts_by_provider_and_category() {
        let games = mock_games();
        let all: Vec<&Game> = games.iter().collect();

        let by_provider = sort(&all, SortField::Provider, SortOrder::Asc);
        let providers: Vec<_> = by_provider.iter().map(|g| g.provider.name.as_str()).collect();
        assert_eq!(providers, vec!["Provider A", "Provider A", "Provider B"]);
        // ties keep input order
        assert_eq!(ids(&by_provider), vec![1, 3, 2]);

        let by_category = sort(&all, SortField::Category, SortOrder::Asc);
        let categories: Vec<_> = by_category.iter().map(|g| g.category.name.as_str()).collect();
        assert_eq!(categories, vec!["Slots", "Slots", "Table Games"]);
    }

    #[test]
    fn sort_does_not_mutate_input() {
        let games = mock_games();
        let all: Vec<&Game> = games.iter().collect();
        let _ = sort(&all, SortField::Name, SortOrder::Desc);
        assert_eq!(ids(&all), vec![1, 2, 3]);
    }

    #[test]
    fn locale_ordering_folds_case() {
        assert_eq!(locale_cmp("apple", "Banana"), Ordering::Less);
        assert_eq!(locale_cmp("Zebra", "apple"), Ordering::Greater);
        assert_eq!(locale_cmp("a", "A"), Ordering::Less);
        assert_eq!(locale_cmp("same", "same"), Ordering::Equal);
    }

    #[test]
    fn locale_ordering_places_accents_with_base_letters() {
        assert_eq!(locale_cmp("Éclair", "Zebra"), Ordering::Less);
        assert_eq!(locale_cmp("Éclair", "Edge"), Ordering::Less);
        assert_eq!(locale_cmp("eclair", "éclair"), Ordering::Less);
        assert_eq!(locale_cmp("a_b", "a1"), Ordering::Less);
    }

    #[test]
    fn sorts_accented_names_alphabetically() {
        let games: Vec<Game> = serde_json::from_value(json!([
            {
                "id": 1,
                "name": "Zebra Run",
                "slug": "zebra-run",
                "provider": { "name": "Provider A" },
                "category": { "name": "Slots" },
            },
            {
                "id": 2,
                "name": "Éclair Spins",
                "slug": "eclair-spins",
                "provider": { "name": "Provider A" },
                "category": { "name": "Slots" },
            },
            {
                "id": 3,
                "name": "Dragon Gold",
                "slug": "dragon-gold",
                "provider": { "name": "Provider A" },
                "category": { "name": "Slots" },
            },
        ]))
        .unwrap();
        let all: Vec<&Game> = games.iter().collect();
        let sorted = sort(&all, SortField::Name, SortOrder::Asc);
        assert_eq!(names(&sorted), vec!["Dragon Gold", "Éclair Spins", "Zebra Run"]);
    }

    #[test]
    fn sort_options_parse_case_insensitively() {
        assert_eq!("Provider".parse::<SortField>(), Ok(SortField::Provider));
        assert_eq!("DESC".parse::<SortOrder>(), Ok(SortOrder::Desc));
        assert_eq!(
            "bogus".parse::<SortField>(),
            Err(UnknownSortOption("bogus".to_string()))
        );
    }

    #[test]
    fn paginates_first_and_last_page() {
        let games = mock_games();
        let all: Vec<&Game> = games.iter().collect();

        let first = paginate(&all, 1, 2);
        assert_eq!(ids(&first.items), vec![1, 2]);
        assert_eq!(first.total_pages, 2);

        let last = paginate(&all, 2, 2);
        assert_eq!(ids(&last.items), vec![3]);
        assert_eq!(last.total_pages, 2);
        assert_eq!(last.total_items, 3);
    }

    #[test]
    fn empty_and_out_of_range_pages_are_empty() {
        let empty: Vec<u32> = Vec::new();
        let page = paginate(&empty, 1, 10);
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 0);

        let items = vec![1, 2, 3];
        assert!(paginate(&items, 0, 2).items.is_empty());
        assert!(paginate(&items, 5, 2).items.is_empty());
        assert!(paginate(&items, 1, 0).items.is_empty());
        assert_eq!(paginate(&items, 1, 0).total_pages, 0);
    }

    #[test]
    fn pages_cover_every_item_exactly_once() {
        let items: Vec<usize> = (0..23).collect();
        for size in 1..=25 {
            let total_pages = paginate(&items, 1, size).total_pages;
            assert_eq!(total_pages, items.len().div_ceil(size));
            let collected: Vec<usize> = (1..=total_pages)
                .flat_map(|page| paginate(&items, page, size).items)
                .collect();
            assert_eq!(collected, items);
        }
    }

    #[test]
    fn total_pages_counts_filtered_items() {
        let games = mock_games();
        let query = CatalogQuery {
            criteria: FilterCriteria::provider("Provider A"),
            page_size: 1,
            ..CatalogQuery::default()
        };
        let page = run_query(&games, &query);
        assert_eq!(page.total_items, 2);
        assert_eq!(page.total_pages, 2);
        assert_eq!(ids(&page.items), vec![1]);
    }

    #[test]
    fn pipeline_is_idempotent() {
        let games = mock_games();
        let query = CatalogQuery {
            criteria: FilterCriteria::tag("Feature A"),
            sort: SortField::Name,
            order: SortOrder::Desc,
            page: 1,
            page_size: 5,
        };
        let first = run_query(&games, &query);
        let second = run_query(&games, &query);
        assert_eq!(ids(&first.items), ids(&second.items));
        assert_eq!(first.total_pages, second.total_pages);
        assert_eq!(ids(&first.items), vec![3, 1]);
    }
}
