#![warn(clippy::all, missing_docs)]

//! Core domain logic for the casino portal.
//!
//! This crate hosts the catalog and its query pipeline, the session owner and
//! route guard, the user directory, theming and configuration used by the
//! HTTP front end.

pub mod auth;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod session;
pub mod theme;

pub use auth::UserDirectory;
pub use catalog::{CatalogQuery, CatalogStore, FilterCriteria, Game, SortField, SortOrder};
pub use config::AppConfig;
pub use error::PortalError;
pub use models::{Market, User};
pub use session::{Credential, GuardVerdict, SessionGuard, SessionState};
pub use theme::{ThemeContext, ThemeMode};
