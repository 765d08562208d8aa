//! Layered application configuration.
//!
//! Values come from `<config_dir>/casino-portal/config.toml` when present,
//! overridden by `PORTAL_*` environment variables.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use chrono::Duration;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    catalog::query::DEFAULT_PAGE_SIZE,
    models::Market,
    session::{SessionState, DEFAULT_SESSION_TTL_DAYS},
    theme::{BrandId, ThemeContext, ThemeMode},
};

/// Directory under the platform config dir holding `config.toml`.
pub const CONFIG_DIR: &str = "casino-portal";

const DEFAULT_CONFIG_TOML: &str = r#"# Casino portal configuration.
# Every key can be overridden with a PORTAL_<KEY> environment variable.

bind_addr = "127.0.0.1:3000"

# Fixture paths; leave unset to use the fixtures bundled into the binary.
# catalog_path = "/path/to/games.json"
# users_path = "/path/to/users.json"

page_size = 12
session_ttl_days = 7

# casino_a | casino_b
brand = "casino_a"
# light | dark
default_theme = "light"

# Mark the session cookie Secure (requires HTTPS).
secure_cookies = false
"#;

/// Runtime settings for the portal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Socket address the HTTP server listens on.
    pub bind_addr: String,
    /// Game fixture on disk; `None` uses the bundled catalog.
    pub catalog_path: Option<PathBuf>,
    /// User list on disk; `None` uses the bundled users.
    pub users_path: Option<PathBuf>,
    /// Games per catalog page.
    pub page_size: usize,
    /// Credential lifetime after each write.
    pub session_ttl_days: i64,
    /// Brand skin for every market.
    pub brand: BrandId,
    /// Theme mode before the user picks one.
    pub default_theme: ThemeMode,
    /// Whether the session cookie carries the `Secure` attribute.
    pub secure_cookies: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".to_string(),
            catalog_path: None,
            users_path: None,
            page_size: DEFAULT_PAGE_SIZE,
            session_ttl_days: DEFAULT_SESSION_TTL_DAYS,
            brand: BrandId::default(),
            default_theme: ThemeMode::default(),
            secure_cookies: false,
        }
    }
}

impl AppConfig {
    /// Load from the default config file and environment.
    pub fn load() -> Result<Self> {
        Self::load_from(config_path())
    }

    /// Load from `path` (optional on disk) and environment.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let settings = Config::builder()
            .add_source(
                File::from(path)
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(Environment::with_prefix("PORTAL").try_parsing(true))
            .build()
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: AppConfig = settings
            .try_deserialize()
            .with_context(|| format!("invalid config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            bail!("page_size must be at least 1");
        }
        if self.session_ttl_days < 1 {
            bail!("session_ttl_days must be at least 1");
        }
        Ok(())
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::days(self.session_ttl_days)
    }

    /// Theme a session starts from before login scopes it to a market.
    pub fn default_theme_context(&self) -> ThemeContext {
        ThemeContext::new(Market::En, self.default_theme, self.brand)
    }

    /// Fresh anonymous session following these settings.
    pub fn new_session(&self) -> SessionState {
        SessionState::new(self.session_ttl(), self.default_theme_context())
    }
}

/// Location of the config file.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR)
        .join("config.toml")
}

/// Write a commented default config file on first run.
pub fn ensure_default_config() -> Result<PathBuf> {
    let path = config_path();
    write_default_config(&path)?;
    Ok(path)
}

fn write_default_config(path: &Path) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(path, DEFAULT_CONFIG_TOML)
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!("wrote default config to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() -> Result<()> {
        let temp = tempdir()?;
        let config = AppConfig::load_from(temp.path().join("absent.toml"))?;
        assert_eq!(config.page_size, 12);
        assert_eq!(config.session_ttl(), Duration::days(7));
        assert_eq!(config.brand, BrandId::CasinoA);
        Ok(())
    }

    #[test]
    fn default_template_parses_to_defaults() -> Result<()> {
        let temp = tempdir()?;
        let path = temp.path().join("portal").join("config.toml");
        write_default_config(&path)?;
        assert!(path.exists());
        let config = AppConfig::load_from(&path)?;
        assert_eq!(config.bind_addr, AppConfig::default().bind_addr);
        assert_eq!(config.default_theme, ThemeMode::Light);
        Ok(())
    }

    #[test]
    fn file_values_override_defaults() -> Result<()> {
        let temp = tempdir()?;
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            "page_size = 24\nbrand = \"casino_b\"\ndefault_theme = \"dark\"\ncatalog_path = \"/srv/games.json\"\n",
        )?;
        let config = AppConfig::load_from(&path)?;
        assert_eq!(config.page_size, 24);
        assert_eq!(config.brand, BrandId::CasinoB);
        assert_eq!(config.default_theme, ThemeMode::Dark);
        assert_eq!(config.catalog_path, Some(PathBuf::from("/srv/games.json")));
        assert_eq!(config.default_theme_context().mode(), ThemeMode::Dark);
        Ok(())
    }

    #[test]
    fn rejects_zero_page_size() -> Result<()> {
        let temp = tempdir()?;
        let path = temp.path().join("config.toml");
        fs::write(&path, "page_size = 0\n")?;
        assert!(AppConfig::load_from(&path).is_err());
        Ok(())
    }
}
