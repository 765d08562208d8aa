use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;
use portal_core::{session::market_segment, GuardVerdict, Market, SessionState};
use tracing::debug;

use crate::{cookies, errors::AppError, AppState};

/// Runs the session guard before any handler sees a market-scoped request.
pub async fn market_guard(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let cookie = cookies::read(request.headers(), cookies::SESSION_COOKIE);
    let verdict = state.guard.evaluate(
        request.uri().path(),
        request.uri().query(),
        cookie.as_deref(),
        Utc::now(),
    );

    match verdict {
        GuardVerdict::Bypass => next.run(request).await,
        GuardVerdict::Admit { market, credential } => {
            let mut session = state.new_session().restore(credential);
            if let Some(mode) = cookies::theme_mode(request.headers()) {
                session.set_theme_mode(mode);
            }
            if let Some(view) = session.guard_view() {
                debug!(%market, expires_at = %view.expires_at, "admitted");
            }
            request.extensions_mut().insert(session);
            next.run(request).await
        }
        GuardVerdict::Redirect {
            location,
            clear_credential,
        } => {
            let mut response = Redirect::temporary(&location).into_response();
            if clear_credential {
                response
                    .headers_mut()
                    .append(header::SET_COOKIE, cookies::clear());
            }
            response
        }
    }
}

/// Market named by the first path segment.
#[derive(Debug, Clone, Copy)]
pub struct MarketPath(pub Market);

impl<S> FromRequestParts<S> for MarketPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        market_segment(parts.uri.path())
            .map(|(market, _)| MarketPath(market))
            .ok_or_else(|| AppError::not_found("Invalid market"))
    }
}

/// Session the guard restored from an admitted credential and the stored
/// theme preference.
#[derive(Debug, Clone)]
pub struct Session(pub SessionState);

impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionState>()
            .cloned()
            .map(Session)
            .ok_or_else(|| AppError::unauthorized("Authentication required"))
    }
}
