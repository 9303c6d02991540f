use std::{fs, path::Path, sync::Arc};

use biasfinder_lib::{Result, fs::config_dir};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::warn;

pub use theme::Theme;

mod theme;

const FILE_NAME: &str = "gui.toml";

/// Handle to the GUI's configuration
pub type Cfg = Arc<RwLock<GuiConfig>>;

/// Settings that only concern the GUI, serialized to TOML next to `core.toml`.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuiConfig {
    pub theme: Theme,
}

impl GuiConfig {
    pub fn load() -> Result<Self> {
        Self::load_from(&config_dir()?.join(FILE_NAME))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            Ok(toml::from_str(&contents).unwrap_or_else(|err| {
                warn!("Ignoring malformed GUI config at {}: {err}", path.display());
                Self::default()
            }))
        } else {
            let cfg = Self::default();
            cfg.save_to(path)?;
            Ok(cfg)
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&config_dir()?.join(FILE_NAME))
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;

        // Make sure the config dir exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, contents)?;

        Ok(())
    }

    pub fn theme(&self) -> iced::Theme {
        (&self.theme).into()
    }
}

#[cfg(test)]
mod test {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_missing_file_writes_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(FILE_NAME);

        let cfg = GuiConfig::load_from(&path).unwrap();

        assert_eq!(cfg, GuiConfig::default());
        assert!(path.exists());
    }

    #[test]
    fn test_theme_persists() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(FILE_NAME);

        let cfg = GuiConfig {
            theme: Theme::TokyoNight,
        };
        cfg.save_to(&path).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap().trim(),
            r#"theme = "tokyo-night""#
        );
        assert_eq!(GuiConfig::load_from(&path).unwrap().theme, Theme::TokyoNight);
    }

    #[test]
    fn test_malformed_file_falls_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(FILE_NAME);
        fs::write(&path, "theme = [").unwrap();

        assert_eq!(GuiConfig::load_from(&path).unwrap(), GuiConfig::default());
    }
}
