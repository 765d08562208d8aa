#![allow(missing_docs)]

//! Market-aware presentation context.
//!
//! A [`ThemeContext`] is an explicit value owned by the session: built when a
//! user logs in, reset when they log out, handed to whoever renders.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::Market;

/// Light or dark surface colours.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// Light surfaces.
    #[default]
    Light,
    /// Dark surfaces.
    Dark,
}

impl ThemeMode {
    /// The other mode.
    pub fn toggle(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown theme mode `{0}`")]
pub struct UnknownThemeMode(pub String);

impl FromStr for ThemeMode {
    type Err = UnknownThemeMode;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            _ => Err(UnknownThemeMode(value.to_string())),
        }
    }
}

/// Colour roles exposed to the front end as `--color-<role>` variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Palette {
    pub primary: &'static str,
    pub secondary: &'static str,
    pub accent: &'static str,
    pub background: &'static str,
    pub card: &'static str,
    pub text: &'static str,
    pub border: &'static str,
}

impl Palette {
    /// Brand colours come from the market, surface colours from the mode.
    pub fn for_market(market: Market, mode: ThemeMode) -> Self {
        let (primary, secondary, accent) = match market {
            Market::En => ("#3b82f6", "#60a5fa", "#2563eb"),
            Market::Ca => ("#ef4444", "#f87171", "#dc2626"),
        };
        let (background, card, text, border) = match mode {
            ThemeMode::Light => ("#f3f4f6", "#ffffff", "#111827", "#d1d5db"),
            ThemeMode::Dark => ("#1f2937", "#374151", "#f9fafb", "#4b5563"),
        };
        Self {
            primary,
            secondary,
            accent,
            background,
            card,
            text,
            border,
        }
    }

    /// CSS custom properties in a stable order.
    pub fn css_variables(&self) -> Vec<(String, &'static str)> {
        [
            ("primary", self.primary),
            ("secondary", self.secondary),
            ("accent", self.accent),
            ("background", self.background),
            ("card", self.card),
            ("text", self.text),
            ("border", self.border),
        ]
        .into_iter()
        .map(|(role, value)| (format!("--color-{role}"), value))
        .collect()
    }
}

/// Where the navigation menu is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuPosition {
    /// Sidebar.
    Left,
    /// Header bar.
    Top,
}

/// Brand skin identifier, selectable in configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrandId {
    /// Casino A.
    #[default]
    CasinoA,
    /// Casino B.
    CasinoB,
}

impl BrandId {
    /// Static brand description.
    pub fn brand(&self) -> Brand {
        match self {
            BrandId::CasinoA => Brand {
                name: "Casino A",
                theme: "casinoA",
                menu_position: MenuPosition::Left,
                logo: "/images/casinoA-logo.svg",
            },
            BrandId::CasinoB => Brand {
                name: "Casino B",
                theme: "casinoB",
                menu_position: MenuPosition::Top,
                logo: "/images/casinoB-logo.svg",
            },
        }
    }
}

/// Brand chrome shown around every market page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Brand {
    pub name: &'static str,
    pub theme: &'static str,
    pub menu_position: MenuPosition,
    pub logo: &'static str,
}

/// Theme state for one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeContext {
    market: Market,
    mode: ThemeMode,
    brand: BrandId,
}

impl ThemeContext {
    pub fn new(market: Market, mode: ThemeMode, brand: BrandId) -> Self {
        Self {
            market,
            mode,
            brand,
        }
    }

    pub fn market(&self) -> Market {
        self.market
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    pub fn brand(&self) -> Brand {
        self.brand.brand()
    }

    pub fn palette(&self) -> Palette {
        Palette::for_market(self.market, self.mode)
    }

    /// Same context scoped to another market.
    pub fn for_market(self, market: Market) -> Self {
        Self { market, ..self }
    }

    /// Same context rendered in `mode`.
    pub fn with_mode(self, mode: ThemeMode) -> Self {
        Self { mode, ..self }
    }

    /// Flip between light and dark.
    pub fn toggle(&mut self) {
        self.mode = self.mode.toggle();
    }
}

impl Default for ThemeContext {
    fn default() -> Self {
        Self::new(Market::En, ThemeMode::default(), BrandId::default())
    }
}
