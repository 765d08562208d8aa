use axum::{
    extract::State,
    http::{header, HeaderMap},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use chrono::Utc;
use portal_core::{
    session::{ProfileView, LOGIN_PATH},
    theme::Brand,
    Credential, Market,
};
use serde::{Deserialize, Serialize};

use crate::{
    cookies,
    errors::{AppJson, AppResult},
    AppState,
};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginPage {
    pub markets: &'static [Market],
    pub brand: Brand,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: ProfileView,
    pub redirect: String,
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub redirect: &'static str,
}

pub async fn root() -> Redirect {
    Redirect::temporary(LOGIN_PATH)
}

/// Login form data, or a redirect home when the visitor already holds a
/// valid credential.
pub async fn login_page(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(credential) = cookies::read(&headers, cookies::SESSION_COOKIE)
        .and_then(|raw| Credential::decode(&raw, Utc::now()).ok())
    {
        return Redirect::temporary(&format!("/{}", credential.market())).into_response();
    }

    Json(LoginPage {
        markets: Market::all(),
        brand: state.config.brand.brand(),
    })
    .into_response()
}

pub async fn login(
    State(state): State<AppState>,
    AppJson(request): AppJson<LoginRequest>,
) -> AppResult<Response> {
    let user = state
        .users
        .authenticate(&request.username, &request.password)?;

    let mut session = state.new_session();
    let ttl = session.ttl();
    let credential = session.login(user, Utc::now());
    let cookie = cookies::session(&credential.encode()?, ttl, state.config.secure_cookies)?;
    let body = LoginResponse {
        redirect: format!("/{}", credential.market()),
        user: ProfileView::from(credential),
    };

    Ok(([(header::SET_COOKIE, cookie)], Json(body)).into_response())
}

pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let mut session = state.new_session();
    if let Some(credential) = cookies::read(&headers, cookies::SESSION_COOKIE)
        .and_then(|raw| Credential::decode(&raw, Utc::now()).ok())
    {
        session = session.restore(credential);
    }
    session.logout();

    (
        [(header::SET_COOKIE, cookies::clear())],
        Json(LogoutResponse {
            redirect: LOGIN_PATH,
        }),
    )
        .into_response()
}
