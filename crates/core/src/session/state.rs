//! Single owner of session state.
//!
//! Cookie and client views are projections of this value; neither is written
//! independently.

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use tracing::info;

use super::models::{Credential, GuardView, ProfileView};
use crate::{
    error::PortalError,
    models::User,
    theme::{ThemeContext, ThemeMode},
};

/// Days a credential stays valid after each write.
pub const DEFAULT_SESSION_TTL_DAYS: i64 = 7;

/// Editable part of the profile.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub first_name: String,
    pub last_name: String,
}

/// Authoritative session: credential, expiry policy and theme context.
#[derive(Debug, Clone)]
pub struct SessionState {
    credential: Option<Credential>,
    ttl: Duration,
    default_theme: ThemeContext,
    theme: ThemeContext,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(
            Duration::days(DEFAULT_SESSION_TTL_DAYS),
            ThemeContext::default(),
        )
    }
}

impl SessionState {
    /// Anonymous session that issues credentials valid for `ttl`.
    pub fn new(ttl: Duration, default_theme: ThemeContext) -> Self {
        Self {
            credential: None,
            ttl,
            default_theme,
            theme: default_theme,
        }
    }

    /// Resume a session from a credential the guard already accepted.
    pub fn restore(mut self, credential: Credential) -> Self {
        self.theme = self.default_theme.for_market(credential.market());
        self.credential = Some(credential);
        self
    }

    /// Start a session for `user`, replacing any previous one.
    pub fn login(&mut self, user: User, now: DateTime<Utc>) -> &Credential {
        info!(username = %user.username, market = %user.country, "session started");
        self.theme = self.default_theme.for_market(user.country);
        self.credential
            .insert(Credential::issue(user, now, self.ttl))
    }

    /// End the session and reset the theme. Returns the dropped credential.
    pub fn logout(&mut self) -> Option<Credential> {
        self.theme = self.default_theme;
        let previous = self.credential.take();
        if let Some(credential) = &previous {
            info!(username = %credential.user.username, "session ended");
        }
        previous
    }

    /// Replace first and last name, re-issuing the credential with a fresh
    /// expiry. Both names are trimmed and must be non-empty.
    pub fn update_profile(
        &mut self,
        update: ProfileUpdate,
        now: DateTime<Utc>,
    ) -> Result<&Credential, PortalError> {
        let first_name = update.first_name.trim();
        let last_name = update.last_name.trim();
        if first_name.is_empty() || last_name.is_empty() {
            return Err(PortalError::IncompleteProfile);
        }

        let current = self
            .credential
            .as_ref()
            .ok_or(PortalError::NotAuthenticated)?;
        let user = User {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            ..current.user.clone()
        };
        info!(username = %user.username, "profile updated");
        Ok(self.credential.insert(Credential::issue(user, now, self.ttl)))
    }

    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.credential.is_some()
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Projection used for route guarding.
    pub fn guard_view(&self) -> Option<GuardView> {
        self.credential.as_ref().map(GuardView::from)
    }

    /// Projection used for rendering.
    pub fn profile_view(&self) -> Option<ProfileView> {
        self.credential.as_ref().map(ProfileView::from)
    }

    pub fn theme(&self) -> ThemeContext {
        self.theme
    }

    /// Apply a stored light/dark preference.
    pub fn set_theme_mode(&mut self, mode: ThemeMode) {
        self.theme = self.theme.with_mode(mode);
    }

    /// Flip between light and dark. Returns the new mode.
    pub fn toggle_theme(&mut self) -> ThemeMode {
        self.theme.toggle();
        self.theme.mode()
    }
}
