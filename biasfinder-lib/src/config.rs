use std::{fs, path::Path, sync::Arc};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{Result, entities::UserId, fs::config_dir};

const FILE_NAME: &str = "core.toml";

pub const DEFAULT_API_URL: &str = "http://localhost:7070";
pub const DEFAULT_PAGE_SIZE: u32 = 24;

/// Handle to the shared core configuration
pub type Cfg = Arc<RwLock<CoreConfig>>;

/// The core configuration, serialized to TOML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// Origin of the catalog backend
    pub api_url: String,
    /// Number of cards requested per catalog page
    pub page_size: u32,
    /// The user selected at startup
    pub user_id: UserId,
}

impl CoreConfig {
    /// Load the configuration from the BiasFinder config directory, writing the defaults out if
    /// no file exists yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_dir()?.join(FILE_NAME))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            let mut cfg: Self = toml::from_str(&contents).unwrap_or_else(|err| {
                warn!("Ignoring malformed config at {}: {err}", path.display());
                Self::default()
            });

            if cfg.page_size == 0 {
                warn!("A page size of 0 is unusable, using {DEFAULT_PAGE_SIZE}");
                cfg.page_size = DEFAULT_PAGE_SIZE;
            }

            Ok(cfg)
        } else {
            let cfg = Self::default();
            cfg.save_to(path)?;
            debug!("Wrote default config to {}", path.display());
            Ok(cfg)
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&config_dir()?.join(FILE_NAME))
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, contents)?;

        Ok(())
    }

    /// Wrap this configuration in a shareable handle
    pub fn into_handle(self) -> Cfg {
        Arc::new(RwLock::new(self))
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
            page_size: DEFAULT_PAGE_SIZE,
            user_id: UserId::from(1),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_load_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("core.toml");

        let cfg = CoreConfig::load_from(&path).unwrap();

        assert!(path.exists());
        assert_eq!(cfg, CoreConfig::default());
        assert_eq!(cfg.page_size, 24);
        assert_eq!(cfg.api_url, "http://localhost:7070");
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("core.toml");

        let cfg = CoreConfig {
            api_url: "http://cards.example:8080".into(),
            page_size: 12,
            user_id: UserId::ADMIN,
        };
        cfg.save_to(&path).unwrap();

        assert_eq!(CoreConfig::load_from(&path).unwrap(), cfg);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("core.toml");
        fs::write(&path, "page_size = 48\n").unwrap();

        let cfg = CoreConfig::load_from(&path).unwrap();

        assert_eq!(cfg.page_size, 48);
        assert_eq!(cfg.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_malformed_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("core.toml");
        fs::write(&path, "page_size = \"lots\"").unwrap();

        assert_eq!(CoreConfig::load_from(&path).unwrap(), CoreConfig::default());
    }

    #[test]
    fn test_zero_page_size_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("core.toml");
        fs::write(&path, "page_size = 0\nuser_id = 2\n").unwrap();

        let cfg = CoreConfig::load_from(&path).unwrap();

        assert_eq!(cfg.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(cfg.user_id, UserId::from(2));
    }
}
