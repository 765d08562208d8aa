use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use portal_core::{
    session::{ProfileUpdate, ProfileView},
    Market,
};
use serde::Serialize;

use crate::{
    cookies,
    errors::{AppError, AppJson, AppResult},
    guard::{MarketPath, Session},
    AppState,
};

#[derive(Debug, Serialize)]
pub struct ProfilePage {
    pub market: Market,
    pub profile: ProfileView,
    pub languages: &'static [&'static str],
}

pub async fn show(
    MarketPath(market): MarketPath,
    Session(session): Session,
) -> AppResult<Json<ProfilePage>> {
    let profile = session
        .profile_view()
        .ok_or_else(|| AppError::unauthorized("Authentication required"))?;
    Ok(Json(ProfilePage {
        market,
        profile,
        languages: market.languages(),
    }))
}

pub async fn update(
    MarketPath(market): MarketPath,
    Session(mut session): Session,
    State(state): State<AppState>,
    AppJson(update): AppJson<ProfileUpdate>,
) -> AppResult<Response> {
    let ttl = session.ttl();
    let credential = session.update_profile(update, Utc::now())?;
    let cookie = cookies::session(&credential.encode()?, ttl, state.config.secure_cookies)?;
    let page = ProfilePage {
        market,
        profile: ProfileView::from(credential),
        languages: market.languages(),
    };

    Ok(([(header::SET_COOKIE, cookie)], Json(page)).into_response())
}
