use axum::{
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use portal_core::{
    models::MarketCopy,
    theme::{Brand, Palette, ThemeMode},
    Market,
};
use serde::{Deserialize, Serialize};

use crate::{
    cookies,
    errors::{AppQuery, AppResult},
    guard::{MarketPath, Session},
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Landing {
    pub market: Market,
    pub greeting: String,
    pub copy: MarketCopy,
    pub brand: Brand,
    pub mode: ThemeMode,
    pub links: Links,
}

#[derive(Debug, Serialize)]
pub struct Links {
    pub home: String,
    pub casino: String,
    pub profile: String,
}

impl Links {
    pub fn for_market(market: Market) -> Self {
        Self {
            home: format!("/{market}"),
            casino: format!("/{market}/casino"),
            profile: format!("/{market}/my-profile"),
        }
    }
}

pub async fn landing(MarketPath(market): MarketPath, Session(session): Session) -> Json<Landing> {
    let theme = session.theme();
    let greeting = session
        .profile_view()
        .map(|profile| profile.first_name)
        .unwrap_or_default();

    Json(Landing {
        market,
        greeting,
        copy: market.copy(),
        brand: theme.brand(),
        mode: theme.mode(),
        links: Links::for_market(market),
    })
}

/// `?mode=light|dark` sets the preference, `?toggle=true` flips it.
#[derive(Debug, Deserialize)]
pub struct ThemeParams {
    pub mode: Option<ThemeMode>,
    #[serde(default)]
    pub toggle: bool,
}

#[derive(Debug, Serialize)]
pub struct CssVariable {
    pub name: String,
    pub value: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeResponse {
    pub market: Market,
    pub mode: ThemeMode,
    pub palette: Palette,
    pub css_variables: Vec<CssVariable>,
    pub brand: Brand,
}

pub async fn theme(
    MarketPath(market): MarketPath,
    Session(mut session): Session,
    AppQuery(params): AppQuery<ThemeParams>,
) -> AppResult<Response> {
    let changed = match (params.mode, params.toggle) {
        (Some(mode), _) => {
            session.set_theme_mode(mode);
            Some(mode)
        }
        (None, true) => Some(session.toggle_theme()),
        (None, false) => None,
    };
    let theme = session.theme().for_market(market);
    let palette = theme.palette();

    let body = Json(ThemeResponse {
        market,
        mode: theme.mode(),
        css_variables: palette
            .css_variables()
            .into_iter()
            .map(|(name, value)| CssVariable { name, value })
            .collect(),
        palette,
        brand: theme.brand(),
    });
    Ok(match changed {
        Some(mode) => ([(header::SET_COOKIE, cookies::theme(mode))], body).into_response(),
        None => body.into_response(),
    })
}
