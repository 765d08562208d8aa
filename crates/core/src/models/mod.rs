//! Shared domain models.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Tenant segment that scopes routes, theme and localisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Market {
    /// English market.
    En,
    /// Canadian market.
    Ca,
}

impl Market {
    /// Every market the portal serves, in routing order.
    pub fn all() -> &'static [Market] {
        &[Market::En, Market::Ca]
    }

    /// Lowercase URL segment (e.g. `en`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Market::En => "en",
            Market::Ca => "ca",
        }
    }

    /// Uppercase form used in localisation keys (e.g. `CA` in `en_CA`).
    pub fn as_upper(&self) -> &'static str {
        match self {
            Market::En => "EN",
            Market::Ca => "CA",
        }
    }

    /// Interface languages offered in profile preferences.
    pub fn languages(&self) -> &'static [&'static str] {
        match self {
            Market::En => &["en", "fr"],
            Market::Ca => &["en", "fr", "fr_ca"],
        }
    }

    /// Landing copy shown on the market home page.
    pub fn copy(&self) -> MarketCopy {
        match self {
            Market::En => MarketCopy {
                tagline: "Explore our wide range of casino games designed especially for the English market.",
                promotions: "Check out our latest promotions and bonuses tailored for you.",
                support: "Our support team is available 24/7 to assist you with any questions.",
            },
            Market::Ca => MarketCopy {
                tagline: "Découvrez notre large gamme de jeux de casino conçus spécialement pour le marché canadien.",
                promotions: "Découvrez nos dernières promotions et bonus adaptés pour vous.",
                support: "Notre équipe d'assistance est disponible 24/7 pour vous aider avec toutes vos questions.",
            },
        }
    }
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a known market.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown market '{0}'")]
pub struct UnknownMarket(pub String);

impl FromStr for Market {
    type Err = UnknownMarket;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Market::all()
            .iter()
            .copied()
            .find(|market| market.as_str() == value)
            .ok_or_else(|| UnknownMarket(value.to_string()))
    }
}

/// Static landing text for a market.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MarketCopy {
    /// Headline below the welcome banner.
    pub tagline: &'static str,
    /// Promotions panel text.
    pub promotions: &'static str,
    /// Support panel text.
    pub support: &'static str,
}

/// Logged-in portal user. Never carries a password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Stable identifier from the user directory.
    pub id: String,
    /// Login name.
    pub username: String,
    /// Market fixed at login; decides which URL segment the user may access.
    pub country: Market,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
}

impl User {
    /// Full name for greetings, falling back to the username.
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }
}
