use std::str::FromStr;

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Json,
};
use portal_core::{
    catalog::{
        models::{License, Tag},
        CatalogFacets, LocaleSource,
    },
    CatalogQuery, FilterCriteria, Game, Market,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    errors::{AppError, AppQuery, AppResult},
    guard::{MarketPath, Session},
    AppState,
};

/// Tags shown on a catalog card.
const CARD_TAGS: usize = 3;

/// Query string of the casino lobby. Every parameter is optional and read
/// as text, so malformed values degrade instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct CasinoParams {
    pub provider: Option<String>,
    pub category: Option<String>,
    pub tag: Option<String>,
    #[serde(alias = "searchTerm")]
    pub search: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
    pub page: Option<String>,
}

impl CasinoParams {
    fn into_query(self, page_size: usize) -> CatalogQuery {
        CatalogQuery {
            criteria: FilterCriteria {
                provider: self.provider,
                category: self.category,
                tag: self.tag,
                search: self.search,
            },
            sort: lenient(self.sort.as_deref()),
            order: lenient(self.order.as_deref()),
            page: self.page.as_deref().map_or(1, page_number),
            page_size,
        }
    }
}

/// Unknown or empty options fall back to the default.
fn lenient<T: FromStr + Default>(value: Option<&str>) -> T {
    value
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or_default()
}

/// Empty means page one. Negative or unparsable pages become page zero,
/// which is always empty.
fn page_number(raw: &str) -> usize {
    let raw = raw.trim();
    if raw.is_empty() {
        return 1;
    }
    raw.parse().unwrap_or(0)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameCard<'a> {
    pub id: u64,
    pub slug: &'a str,
    pub name: &'a str,
    pub thumbnail: &'a str,
    pub provider: &'a str,
    pub category: &'a str,
    pub tags: Vec<&'a str>,
    pub has_jackpot: bool,
    pub href: String,
}

impl<'a> GameCard<'a> {
    fn new(game: &'a Game, market: Market) -> Self {
        let localised = game.localised(market);
        Self {
            id: game.id,
            slug: &game.slug,
            name: localised.name,
            thumbnail: localised.thumbnail,
            provider: &game.provider.name,
            category: &game.category.name,
            tags: game
                .tags
                .iter()
                .take(CARD_TAGS)
                .map(|tag| tag.name.as_str())
                .collect(),
            has_jackpot: game.has_jackpot,
            href: format!("/{market}/casino/{}", game.slug),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Lobby<'a> {
    pub market: Market,
    pub items: Vec<GameCard<'a>>,
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
    pub query: CatalogQuery,
    pub facets: &'a CatalogFacets,
}

pub async fn lobby(
    MarketPath(market): MarketPath,
    Session(_session): Session,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<CasinoParams>,
) -> AppResult<Response> {
    let query = params.into_query(state.config.page_size);
    let page = state.catalog.query(&query);
    debug!(
        %market,
        ?query,
        total_items = page.total_items,
        returned = page.items.len(),
        "catalog query"
    );

    let lobby = Lobby {
        market,
        items: page
            .items
            .iter()
            .map(|game| GameCard::new(*game, market))
            .collect(),
        page: page.page,
        page_size: page.page_size,
        total_items: page.total_items,
        total_pages: page.total_pages,
        query,
        facets: state.catalog.facets(),
    };
    Ok(Json(lobby).into_response())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameDetail<'a> {
    pub id: u64,
    pub slug: &'a str,
    pub name: &'a str,
    pub thumbnail: &'a str,
    pub locale_source: LocaleSource,
    pub provider: &'a str,
    pub category: &'a str,
    pub tags: &'a [Tag],
    pub licenses: &'a [License],
    pub desktop_game_id: &'a str,
    pub aspect_ratio: &'a str,
    pub has_jackpot: bool,
    pub is_live_game: bool,
    pub demo_available: bool,
    pub back_href: String,
}

pub async fn detail(
    MarketPath(market): MarketPath,
    Session(_session): Session,
    State(state): State<AppState>,
    Path((_, slug)): Path<(String, String)>,
) -> AppResult<Response> {
    let game = state
        .catalog
        .by_slug(&slug)
        .ok_or_else(|| AppError::not_found("Game not found"))?;
    let localised = game.localised(market);

    let detail = GameDetail {
        id: game.id,
        slug: &game.slug,
        name: localised.name,
        thumbnail: localised.thumbnail,
        locale_source: localised.source,
        provider: &game.provider.name,
        category: &game.category.name,
        tags: &game.tags,
        licenses: &game.licenses,
        desktop_game_id: &game.desktop_game_id,
        aspect_ratio: &game.aspect_ratio,
        has_jackpot: game.has_jackpot,
        is_live_game: game.is_live_game,
        demo_available: game.demo_mode_logged_in,
        back_href: format!("/{market}/casino"),
    };
    Ok(Json(detail).into_response())
}
