#![allow(missing_docs)]

//! Game catalog records and localisation lookup.

use std::{collections::HashMap, fmt};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::de;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::models::Market;

/// Language every market-specific localisation is written in.
pub const DEFAULT_LANG: &str = "en";
/// Region code of the rest-of-world fallback entry (`en_ROW`).
pub const REST_OF_WORLD: &str = "ROW";

static LOCALE_KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([a-z]{2})_([A-Z]{2,3})$").expect("invalid locale key regex"));

/// Casino game record as shipped in the catalog fixture.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: u64,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub desktop_game_id: String,
    #[serde(default)]
    pub mobile_game_id: String,
    #[serde(default)]
    pub meta: GameMeta,
    #[serde(default)]
    pub licenses: Vec<License>,
    #[serde(default)]
    pub aspect_ratio: String,
    #[serde(default)]
    pub has_jackpot: bool,
    #[serde(default)]
    pub demo_mode_logged_in: bool,
    #[serde(default)]
    pub demo_mode_logged_out: bool,
    #[serde(default)]
    pub is_live_game: bool,
    pub provider: Provider,
    #[serde(default)]
    pub tags: Vec<Tag>,
    pub category: Category,
    #[serde(default)]
    pub positions: HashMap<String, i64>,
    #[serde(
        default,
        serialize_with = "serialize_localisation",
        deserialize_with = "deserialize_localisation"
    )]
    pub localisation: HashMap<LocaleKey, LocalisedContent>,
}

impl Game {
    /// Whether any tag on the game carries `name`.
    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.iter().any(|tag| tag.name == name)
    }

    /// Resolve display name and thumbnail for `market`.
    ///
    /// Walks `en_<MARKET>`, then `en_ROW`, then the game's own `name`/`meta`,
    /// returning the first link present. Always yields a value.
    pub fn localised(&self, market: Market) -> Localised<'_> {
        let chain = [
            (
                LocaleKey::new(DEFAULT_LANG, market.as_upper()),
                LocaleSource::Market,
            ),
            (
                LocaleKey::new(DEFAULT_LANG, REST_OF_WORLD),
                LocaleSource::RestOfWorld,
            ),
        ];

        for (key, source) in chain {
            if let Some(content) = self.localisation.get(&key) {
                return Localised {
                    source,
                    name: &content.name,
                    thumbnail: &content.meta.thumbnail.src,
                };
            }
        }

        Localised {
            source: LocaleSource::Base,
            name: &self.name,
            thumbnail: &self.meta.thumbnail.src,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameMeta {
    #[serde(default)]
    pub thumbnail: Thumbnail,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Thumbnail {
    #[serde(default)]
    pub src: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct License {
    pub id: u64,
    #[serde(default)]
    pub key: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provider {
    pub name: String,
    #[serde(default)]
    pub logo: String,
    #[serde(default)]
    pub meta: ProviderMeta,
    #[serde(default)]
    pub aggregator: String,
    #[serde(default)]
    pub external_key: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderMeta {
    #[serde(default)]
    pub vendor_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    pub id: u64,
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    #[serde(default)]
    pub id: u64,
    pub name: String,
}

/// Market-specific override of a game's display data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalisedContent {
    pub name: String,
    #[serde(default)]
    pub meta: GameMeta,
}

/// Typed `<lang>_<REGION>` localisation key, e.g. `en_CA` or `en_ROW`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocaleKey {
    pub lang: String,
    pub region: String,
}

impl LocaleKey {
    pub fn new(lang: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            lang: lang.into(),
            region: region.into(),
        }
    }

    /// Parse a raw fixture key, returning `None` when it is not `<lang>_<REGION>`.
    pub fn parse(raw: &str) -> Option<Self> {
        let caps = LOCALE_KEY_RE.captures(raw)?;
        Some(Self::new(caps.get(1)?.as_str(), caps.get(2)?.as_str()))
    }
}

impl fmt::Display for LocaleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.lang, self.region)
    }
}

/// Which link of the localisation fallback chain produced a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LocaleSource {
    Market,
    RestOfWorld,
    Base,
}

/// Display data resolved for one market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Localised<'a> {
    pub source: LocaleSource,
    pub name: &'a str,
    pub thumbnail: &'a str,
}

fn serialize_localisation<S>(
    value: &HashMap<LocaleKey, LocalisedContent>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut map = serializer.serialize_map(Some(value.len()))?;
    for (key, content) in value {
        map.serialize_entry(&key.to_string(), content)?;
    }
    map.end()
}

fn deserialize_localisation<'de, D>(
    deserializer: D,
) -> Result<HashMap<LocaleKey, LocalisedContent>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: HashMap<String, LocalisedContent> = HashMap::deserialize(deserializer)?;
    let mut result = HashMap::with_capacity(raw.len());
    for (key, content) in raw {
        let parsed = LocaleKey::parse(&key)
            .ok_or_else(|| de::Error::custom(format!("invalid localisation key '{key}'")))?;
        result.insert(parsed, content);
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn game_with(localisation: serde_json::Value) -> Game {
        serde_json::from_value(json!({
            "id": 7,
            "name": "Base Name",
            "slug": "base-name",
            "meta": { "thumbnail": { "src": "/base.png" } },
            "provider": { "name": "Provider A" },
            "category": { "id": 1, "name": "Slots" },
            "localisation": localisation,
        }))
        .expect("valid game")
    }

    #[test]
    fn market_entry_wins_over_rest_of_world() {
        let game = game_with(json!({
            "en_CA": { "name": "Canadian Name", "meta": { "thumbnail": { "src": "/ca.png" } } },
            "en_ROW": { "name": "World Name", "meta": { "thumbnail": { "src": "/row.png" } } },
        }));

        let resolved = game.localised(Market::Ca);
        assert_eq!(resolved.source, LocaleSource::Market);
        assert_eq!(resolved.name, "Canadian Name");
        assert_eq!(resolved.thumbnail, "/ca.png");

        let resolved = game.localised(Market::En);
        assert_eq!(resolved.source, LocaleSource::RestOfWorld);
        assert_eq!(resolved.name, "World Name");
    }

    #[test]
    fn falls_back_to_base_fields() {
        let game = game_with(json!({}));
        let resolved = game.localised(Market::En);
        assert_eq!(resolved.source, LocaleSource::Base);
        assert_eq!(resolved.name, "Base Name");
        assert_eq!(resolved.thumbnail, "/base.png");
    }

    #[test]
    fn rejects_malformed_localisation_keys() {
        let result: Result<Game, _> = serde_json::from_value(json!({
            "id": 1,
            "name": "Broken",
            "slug": "broken",
            "provider": { "name": "P" },
            "category": { "name": "C" },
            "localisation": { "english": { "name": "x" } },
        }));
        let err = result.expect_err("malformed key must fail");
        assert!(err.to_string().contains("invalid localisation key"));
    }

    #[test]
    fn locale_keys_round_trip_through_display() {
        let key = LocaleKey::parse("en_ROW").expect("valid key");
        assert_eq!(key, LocaleKey::new("en", "ROW"));
        assert_eq!(key.to_string(), "en_ROW");
        assert!(LocaleKey::parse("EN_ca").is_none());
    }
}
