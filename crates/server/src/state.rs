use std::sync::Arc;

use anyhow::Result;
use portal_core::{AppConfig, CatalogStore, SessionGuard, SessionState, UserDirectory};

/// Shared, read-only application context handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub catalog: Arc<CatalogStore>,
    pub users: Arc<UserDirectory>,
    pub guard: SessionGuard,
}

impl AppState {
    pub fn new(config: AppConfig, catalog: CatalogStore, users: UserDirectory) -> Self {
        Self {
            config: Arc::new(config),
            catalog: Arc::new(catalog),
            users: Arc::new(users),
            guard: SessionGuard::default(),
        }
    }

    /// Load fixtures named by `config`, falling back to the bundled ones.
    pub fn from_config(config: AppConfig) -> Result<Self> {
        let catalog = CatalogStore::open(config.catalog_path.as_deref())?;
        let users = UserDirectory::open(config.users_path.as_deref())?;
        Ok(Self::new(config, catalog, users))
    }

    /// Anonymous session following the configured TTL and theme defaults.
    pub fn new_session(&self) -> SessionState {
        self.config.new_session()
    }
}
