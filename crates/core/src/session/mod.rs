#![allow(missing_docs)]

//! Credential handling, route guarding and the session owner.

pub mod guard;
pub mod models;
pub mod state;

pub use guard::{market_segment, GuardVerdict, SessionGuard, LOGIN_PATH};
pub use models::{Credential, CredentialError, GuardView, ProfileView};
pub use state::{ProfileUpdate, SessionState, DEFAULT_SESSION_TTL_DAYS};
