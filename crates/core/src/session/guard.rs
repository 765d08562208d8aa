//! Route guard for market-prefixed paths.

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use super::models::{Credential, GuardView};
use crate::models::Market;

/// Public route unauthenticated users are sent to.
pub const LOGIN_PATH: &str = "/login";

/// Outcome of guarding one navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardVerdict {
    /// Path is not market-scoped; the guard does not apply.
    Bypass,
    /// Credential matches the path's market.
    Admit {
        /// Market named by the path.
        market: Market,
        /// Decoded credential for downstream handlers.
        credential: Credential,
    },
    /// Navigation must go elsewhere.
    Redirect {
        /// Target path, including any query string.
        location: String,
        /// Whether the stored credential must be discarded (forced logout).
        clear_credential: bool,
    },
}

/// Admits or redirects navigations based on the stored credential.
///
/// Evaluation is a pure function of its arguments apart from logging, so
/// repeating it with the same inputs gives the same verdict.
#[derive(Debug, Clone)]
pub struct SessionGuard {
    login_path: String,
}

impl Default for SessionGuard {
    fn default() -> Self {
        Self::new(LOGIN_PATH)
    }
}

impl SessionGuard {
    pub fn new(login_path: impl Into<String>) -> Self {
        Self {
            login_path: login_path.into(),
        }
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    /// Judge a navigation to `path` (with optional `query`) given the raw
    /// credential cookie value.
    pub fn evaluate(
        &self,
        path: &str,
        query: Option<&str>,
        credential: Option<&str>,
        now: DateTime<Utc>,
    ) -> GuardVerdict {
        let Some((market, rest)) = market_segment(path) else {
            return GuardVerdict::Bypass;
        };

        let Some(raw) = credential.filter(|raw| !raw.is_empty()) else {
            debug!(path, "no credential; redirecting to login");
            return self.to_login(false);
        };

        let credential = match Credential::decode(raw, now) {
            Ok(credential) => credential,
            Err(err) => {
                warn!(path, %err, "discarding unusable credential");
                return self.to_login(true);
            }
        };

        let view = GuardView::from(&credential);
        if view.market == market {
            return GuardVerdict::Admit { market, credential };
        }
        let location = with_query(format!("/{}{}", view.market, rest), query);
        debug!(path, %location, expires_at = %view.expires_at, "market mismatch; redirecting");
        GuardVerdict::Redirect {
            location,
            clear_credential: false,
        }
    }

    fn to_login(&self, clear_credential: bool) -> GuardVerdict {
        GuardVerdict::Redirect {
            location: self.login_path.clone(),
            clear_credential,
        }
    }
}

/// Split `/<market>/rest` into the market and the remainder (`/rest`, or
/// empty). Only an exact first-segment match counts.
pub fn market_segment(path: &str) -> Option<(Market, &str)> {
    let trimmed = path.strip_prefix('/')?;
    let (segment, rest) = match trimmed.find('/') {
        Some(index) => trimmed.split_at(index),
        None => (trimmed, ""),
    };
    let market = segment.parse::<Market>().ok()?;
    Some((market, rest))
}

fn with_query(path: String, query: Option<&str>) -> String {
    match query.filter(|query| !query.is_empty()) {
        Some(query) => format!("{path}?{query}"),
        None => path,
    }
}
