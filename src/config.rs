use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::menu::MenuMetrics;
use crate::utils::paths::get_config_path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,

    #[serde(default)]
    pub menu: MenuConfig,

    #[serde(default)]
    pub clipboard: ClipboardConfig,
}

/// Menu footprint in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuConfig {
    #[serde(default = "default_menu_width")]
    pub width: u16,
    #[serde(default = "default_menu_height")]
    pub height: u16,
    #[serde(default = "default_menu_padding")]
    pub padding: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipboardConfig {
    /// Try the system clipboard before the terminal copy sequence.
    #[serde(default = "default_true")]
    pub system: bool,
}

fn default_theme() -> String {
    "default".to_string()
}

fn default_menu_width() -> u16 {
    10
}

fn default_menu_height() -> u16 {
    3
}

fn default_menu_padding() -> u16 {
    1
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            menu: MenuConfig::default(),
            clipboard: ClipboardConfig::default(),
        }
    }
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            width: default_menu_width(),
            height: default_menu_height(),
            padding: default_menu_padding(),
        }
    }
}

impl Default for ClipboardConfig {
    fn default() -> Self {
        Self {
            system: default_true(),
        }
    }
}

impl MenuConfig {
    pub fn metrics(&self) -> MenuMetrics {
        MenuMetrics {
            width: self.width as f64,
            height: self.height as f64,
            padding: self.padding as f64,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = get_config_path()?;
        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config {}", path.display()))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.theme, "default");
        assert_eq!(config.menu, MenuConfig { width: 10, height: 3, padding: 1 });
        assert!(config.clipboard.system);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        assert!(toml_str.contains("theme"));
        assert!(toml_str.contains("[menu]"));
    }

    #[test]
    fn test_partial_sections_use_defaults() {
        let toml_str = r#"
        theme = "dark"

        [menu]
        width = 14

        [clipboard]
        system = false
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.theme, "dark");
        assert_eq!(config.menu.width, 14);
        assert_eq!(config.menu.height, 3);
        assert!(!config.clipboard.system);
    }

    #[test]
    fn test_metrics_conversion() {
        let metrics = MenuConfig::default().metrics();
        assert_eq!(metrics.width, 10.0);
        assert_eq!(metrics.height, 3.0);
        assert_eq!(metrics.padding, 1.0);
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.theme, "default");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "theme = \"light\"").unwrap();
        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.theme, "light");
    }

    #[test]
    fn test_load_invalid_file_fails() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "theme = [").unwrap();
        assert!(Config::load_from(file.path()).is_err());
    }
}
