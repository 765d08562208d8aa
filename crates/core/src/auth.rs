//! Bundled user directory and credential checks.

use std::{fmt, fs, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{info, warn};

use crate::{
    error::PortalError,
    models::{Market, User},
};

/// User list compiled into the binary, used when no path is configured.
pub const BUNDLED_USERS: &str = include_str!("../fixtures/users.json");

#[derive(Clone)]
struct DirectoryEntry {
    user: User,
    password: String,
}

/// Plaintext user list the login form is checked against.
#[derive(Clone, Default)]
pub struct UserDirectory {
    entries: Vec<DirectoryEntry>,
}

impl fmt::Debug for UserDirectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserDirectory")
            .field("users", &self.entries.len())
            .finish()
    }
}

impl UserDirectory {
    /// Parse the bundled user list.
    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED_USERS).context("failed to parse bundled users")
    }

    /// Read a user list from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read users {}", path.display()))?;
        Self::from_json(&content).with_context(|| format!("failed to parse users {}", path.display()))
    }

    /// Load from `path` when configured, otherwise from the bundled list.
    pub fn open(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Self::bundled(),
        }
    }

    /// Parse a JSON user list. Entries naming an unknown market are skipped.
    pub fn from_json(raw: &str) -> Result<Self> {
        let raw: Vec<RawUser> = serde_json::from_str(raw)?;
        let mut entries = Vec::with_capacity(raw.len());
        for entry in raw {
            let country = match entry.country.parse::<Market>() {
                Ok(country) => country,
                Err(err) => {
                    warn!("Skipping user {}: {}", entry.username, err);
                    continue;
                }
            };
            entries.push(DirectoryEntry {
                user: User {
                    id: entry.id,
                    username: entry.username,
                    country,
                    first_name: entry.first_name,
                    last_name: entry.last_name,
                },
                password: entry.password,
            });
        }
        info!(users = entries.len(), "user directory loaded");
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check a username/password pair, returning the user without its password.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<User, PortalError> {
        self.entries
            .iter()
            .find(|entry| entry.user.username == username && entry.password == password)
            .map(|entry| entry.user.clone())
            .ok_or_else(|| {
                warn!(username, "rejected login");
                PortalError::InvalidCredentials
            })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawUser {
    id: String,
    username: String,
    password: String,
    country: String,
    #[serde(default)]
    first_name: String,
    #[serde(default)]
    last_name: String,
}
