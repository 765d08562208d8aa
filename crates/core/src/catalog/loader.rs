use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, warn};

use super::{
    models::Game,
    query::{run_query, CatalogQuery, Page},
};

/// Catalog fixture compiled into the binary, used when no path is configured.
pub const BUNDLED_CATALOG: &str = include_str!("../../fixtures/games.json");

/// Distinct filterable values, each in first-seen catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CatalogFacets {
    /// Provider names.
    pub providers: Vec<String>,
    /// Category names.
    pub categories: Vec<String>,
    /// Tag names.
    pub tags: Vec<String>,
}

impl CatalogFacets {
    /// Derive facets from a game collection.
    pub fn collect(games: &[Game]) -> Self {
        let mut facets = Self::default();
        for game in games {
            push_unique(&mut facets.providers, &game.provider.name);
            push_unique(&mut facets.categories, &game.category.name);
            for tag in &game.tags {
                push_unique(&mut facets.tags, &tag.name);
            }
        }
        facets
    }
}

fn push_unique(values: &mut Vec<String>, candidate: &str) {
    if !values.iter().any(|value| value == candidate) {
        values.push(candidate.to_string());
    }
}

/// Where a catalog was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// The fixture compiled into the binary.
    Bundled,
    /// A fixture file on disk.
    File(PathBuf),
    /// Games handed over directly (tests, tooling).
    Memory,
}

/// Read-only game collection loaded once at startup.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    games: Vec<Game>,
    facets: CatalogFacets,
    source: CatalogSource,
}

impl CatalogStore {
    /// Build a store around an already-parsed collection.
    pub fn from_games(games: Vec<Game>) -> Self {
        Self::with_source(games, CatalogSource::Memory)
    }

    /// Parse the bundled fixture.
    pub fn bundled() -> Result<Self> {
        let games = parse_games(BUNDLED_CATALOG).context("failed to parse bundled catalog")?;
        Ok(Self::with_source(games, CatalogSource::Bundled))
    }

    /// Read a fixture file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read catalog {}", path.display()))?;
        let games = parse_games(&content)
            .with_context(|| format!("failed to parse catalog {}", path.display()))?;
        Ok(Self::with_source(games, CatalogSource::File(path.to_path_buf())))
    }

    /// Load from `path` when configured, otherwise from the bundled fixture.
    pub fn open(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Self::bundled(),
        }
    }

    fn with_source(games: Vec<Game>, source: CatalogSource) -> Self {
        warn_duplicate_slugs(&games);
        let facets = CatalogFacets::collect(&games);
        info!(
            games = games.len(),
            providers = facets.providers.len(),
            categories = facets.categories.len(),
            tags = facets.tags.len(),
            ?source,
            "catalog loaded"
        );
        Self {
            games,
            facets,
            source,
        }
    }

    /// All games in fixture order.
    pub fn games(&self) -> &[Game] {
        &self.games
    }

    /// Provider, category and tag facets.
    pub fn facets(&self) -> &CatalogFacets {
        &self.facets
    }

    /// Origin of the loaded collection.
    pub fn source(&self) -> &CatalogSource {
        &self.source
    }

    /// Number of games.
    pub fn len(&self) -> usize {
        self.games.len()
    }

    /// True when the catalog holds no games.
    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Look a game up by slug. Absence is a normal outcome.
    pub fn by_slug(&self, slug: &str) -> Option<&Game> {
        self.games.iter().find(|game| game.slug == slug)
    }

    /// Run the filter/sort/paginate pipeline over the whole catalog.
    pub fn query(&self, query: &CatalogQuery) -> Page<&Game> {
        run_query(&self.games, query)
    }
}

fn parse_games(raw: &str) -> Result<Vec<Game>> {
    let games: Vec<Game> = serde_json::from_str(raw)?;
    Ok(games)
}

fn warn_duplicate_slugs(games: &[Game]) {
    let mut seen = HashSet::with_capacity(games.len());
    for game in games {
        if !seen.insert(game.slug.as_str()) {
            warn!("duplicate slug '{}'; lookups return the first game", game.slug);
        }
    }
}
