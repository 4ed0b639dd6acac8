use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Problem catalog to load instead of the bundled one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_path: Option<String>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_scroll_step")]
    pub scroll_step: u16,
}

fn default_theme() -> String {
    "notebook".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_scroll_step() -> u16 {
    3
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            catalog_path: None,
            log_level: default_log_level(),
            scroll_step: default_scroll_step(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            let config: Config = toml::from_str(&content)
                .with_context(|| format!("parsing {}", path.display()))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("chemdrill")
    }

    fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Reset `theme` to the default when it names no known theme, and keep
    /// `scroll_step` within 1..=20.
    pub fn normalize(&mut self, available_themes: &[String]) {
        if !available_themes.iter().any(|t| *t == self.theme) {
            self.theme = default_theme();
        }
        self.scroll_step = self.scroll_step.clamp(1, 20);
    }
}
