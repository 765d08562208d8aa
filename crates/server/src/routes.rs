use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::{
    guard::market_guard,
    handlers::{self, auth, casino, market, profile},
    AppState,
};

/// Full portal router with the session guard in front of every route.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(auth::root))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/{market}", get(market::landing))
        .route("/{market}/", get(market::landing))
        .route("/{market}/theme", get(market::theme))
        .route("/{market}/casino", get(casino::lobby))
        .route("/{market}/casino/{slug}", get(casino::detail))
        .route(
            "/{market}/my-profile",
            get(profile::show).put(profile::update),
        )
        .fallback(handlers::not_found)
        .layer(middleware::from_fn_with_state(state.clone(), market_guard))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
