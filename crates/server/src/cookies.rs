//! Reading and writing the `user` session cookie and the `theme` preference.

use axum::http::{header, HeaderMap, HeaderValue};
use chrono::Duration;
use portal_core::theme::ThemeMode;

use crate::errors::AppError;

/// Cookie carrying the encoded credential.
pub const SESSION_COOKIE: &str = "user";

/// Cookie carrying the light/dark preference. Outlives logout.
pub const THEME_COOKIE: &str = "theme";

/// Value of cookie `name`, searching every `Cookie` header.
pub fn read(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
}

/// `Set-Cookie` value storing `encoded` for `ttl`.
pub fn session(encoded: &str, ttl: Duration, secure: bool) -> Result<HeaderValue, AppError> {
    let mut cookie = format!(
        "{SESSION_COOKIE}={encoded}; Path=/; Max-Age={}; SameSite=Lax; HttpOnly",
        ttl.num_seconds()
    );
    if secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
        .map_err(|err| AppError::internal(format!("invalid session cookie: {err}")))
}

/// `Set-Cookie` value that deletes the session cookie.
pub fn clear() -> HeaderValue {
    HeaderValue::from_static("user=; Path=/; Max-Age=0; SameSite=Lax; HttpOnly")
}

/// Stored theme preference, ignoring values that are not a known mode.
pub fn theme_mode(headers: &HeaderMap) -> Option<ThemeMode> {
    read(headers, THEME_COOKIE).and_then(|value| value.parse().ok())
}

/// `Set-Cookie` value remembering `mode` for a year.
pub fn theme(mode: ThemeMode) -> HeaderValue {
    match mode {
        ThemeMode::Light => {
            HeaderValue::from_static("theme=light; Path=/; Max-Age=31536000; SameSite=Lax")
        }
        ThemeMode::Dark => {
            HeaderValue::from_static("theme=dark; Path=/; Max-Age=31536000; SameSite=Lax")
        }
    }
}
