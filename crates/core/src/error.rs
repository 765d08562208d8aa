//! Domain errors surfaced to portal callers.

use thiserror::Error;

/// Failures a caller is expected to branch on and show to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PortalError {
    /// Username/password pair did not match the user directory.
    #[error("Invalid username or password")]
    InvalidCredentials,
    /// Profile update was missing a first or last name.
    #[error("First name and last name are required")]
    IncompleteProfile,
    /// Operation needs a logged-in session.
    #[error("You need to log in first")]
    NotAuthenticated,
}
