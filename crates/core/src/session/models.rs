#![allow(missing_docs)]

use std::string::FromUtf8Error;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{Market, User};

/// Persisted proof of login, carried in the `user` cookie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    pub user: User,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Reasons a stored credential cannot be used.
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("credential is not valid percent-encoded UTF-8")]
    Encoding(#[from] FromUtf8Error),
    #[error("credential payload is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("credential names unknown market '{0}'")]
    UnknownMarket(String),
    #[error("credential expired at {0}")]
    Expired(DateTime<Utc>),
}

impl Credential {
    /// Issue a credential for `user` valid for `ttl` from `now`.
    pub fn issue(user: User, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            user,
            issued_at: now,
            expires_at: now + ttl,
        }
    }

    pub fn market(&self) -> Market {
        self.user.country
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Cookie-safe form: percent-encoded JSON.
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        let json = serde_json::to_string(self)?;
        Ok(urlencoding::encode(&json).into_owned())
    }

    /// Parse a cookie value, rejecting unknown markets and expired credentials.
    pub fn decode(raw: &str, now: DateTime<Utc>) -> Result<Self, CredentialError> {
        let json = urlencoding::decode(raw)?;
        let raw: RawCredential = serde_json::from_str(&json)?;
        let country = raw
            .user
            .country
            .parse::<Market>()
            .map_err(|err| CredentialError::UnknownMarket(err.0))?;

        let credential = Credential {
            user: User {
                id: raw.user.id,
                username: raw.user.username,
                country,
                first_name: raw.user.first_name,
                last_name: raw.user.last_name,
            },
            issued_at: raw.issued_at,
            expires_at: raw.expires_at,
        };
        if credential.is_expired(now) {
            return Err(CredentialError::Expired(credential.expires_at));
        }
        Ok(credential)
    }
}

/// What route guarding needs to know about a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuardView {
    pub market: Market,
    pub expires_at: DateTime<Utc>,
}

/// What rendering needs to know about a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView {
    pub id: String,
    pub username: String,
    pub market: Market,
    pub first_name: String,
    pub last_name: String,
    pub display_name: String,
}

impl From<&Credential> for GuardView {
    fn from(credential: &Credential) -> Self {
        Self {
            market: credential.market(),
            expires_at: credential.expires_at,
        }
    }
}

impl From<&Credential> for ProfileView {
    fn from(credential: &Credential) -> Self {
        let user = &credential.user;
        Self {
            id: user.id.clone(),
            username: user.username.clone(),
            market: user.country,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            display_name: user.display_name(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCredential {
    user: RawUser,
    issued_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawUser {
    id: String,
    username: String,
    country: String,
    #[serde(default)]
    first_name: String,
    #[serde(default)]
    last_name: String,
}
