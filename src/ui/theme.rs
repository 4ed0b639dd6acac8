use std::fs;

use ratatui::style::Color;
use rust_embed::Embed;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::Config;

#[derive(Embed)]
#[folder = "assets/themes/"]
struct ThemeAssets;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ThemeColors {
    pub bg: String,
    pub fg: String,
    pub muted: String,
    pub accent: String,
    pub highlight: String,
    pub marker: String,
    pub answer: String,
    pub info: String,
    pub success: String,
    pub warning: String,
    pub border: String,
    pub border_focused: String,
    pub header_bg: String,
    pub header_fg: String,
    pub selected_bg: String,
    pub selected_fg: String,
}

impl Theme {
    pub fn load(name: &str) -> Option<Self> {
        let user_theme_path = Config::config_dir()
            .join("themes")
            .join(format!("{name}.toml"));
        if let Ok(content) = fs::read_to_string(&user_theme_path) {
            match toml::from_str::<Theme>(&content) {
                Ok(theme) => return Some(theme),
                Err(e) => warn!(path = %user_theme_path.display(), "ignoring bad theme: {e}"),
            }
        }

        let filename = format!("{name}.toml");
        let file = ThemeAssets::get(&filename)?;
        let content = std::str::from_utf8(file.data.as_ref()).ok()?;
        toml::from_str::<Theme>(content).ok()
    }

    pub fn available_themes() -> Vec<String> {
        let mut names: Vec<String> = ThemeAssets::iter()
            .filter_map(|f| f.strip_suffix(".toml").map(|n| n.to_string()))
            .collect();
        names.sort();
        names
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::load("notebook").unwrap_or_else(|| Self {
            name: "default".to_string(),
            colors: ThemeColors::default(),
        })
    }
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            bg: "#fdfcf8".to_string(),
            fg: "#2c3e50".to_string(),
            muted: "#94a3b8".to_string(),
            accent: "#1a3b5c".to_string(),
            highlight: "#d8a7b1".to_string(),
            marker: "#b7950b".to_string(),
            answer: "#c0392b".to_string(),
            info: "#00838f".to_string(),
            success: "#34d399".to_string(),
            warning: "#fb923c".to_string(),
            border: "#cbd5e1".to_string(),
            border_focused: "#1a3b5c".to_string(),
            header_bg: "#1a3b5c".to_string(),
            header_fg: "#ffffff".to_string(),
            selected_bg: "#2c3e50".to_string(),
            selected_fg: "#ffffff".to_string(),
        }
    }
}

impl ThemeColors {
    pub fn parse_color(hex: &str) -> Color {
        let hex = hex.trim_start_matches('#');
        if hex.len() == 6 {
            if let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            ) {
                return Color::Rgb(r, g, b);
            }
        }
        if hex == "reset" {
            return Color::Reset;
        }
        Color::White
    }

    pub fn bg(&self) -> Color { Self::parse_color(&self.bg) }
    pub fn fg(&self) -> Color { Self::parse_color(&self.fg) }
    pub fn muted(&self) -> Color { Self::parse_color(&self.muted) }
    pub fn accent(&self) -> Color { Self::parse_color(&self.accent) }
    pub fn highlight(&self) -> Color { Self::parse_color(&self.highlight) }
    pub fn marker(&self) -> Color { Self::parse_color(&self.marker) }
    pub fn answer(&self) -> Color { Self::parse_color(&self.answer) }
    pub fn info(&self) -> Color { Self::parse_color(&self.info) }
    pub fn success(&self) -> Color { Self::parse_color(&self.success) }
    pub fn warning(&self) -> Color { Self::parse_color(&self.warning) }
    pub fn border(&self) -> Color { Self::parse_color(&self.border) }
    pub fn border_focused(&self) -> Color { Self::parse_color(&self.border_focused) }
    pub fn header_bg(&self) -> Color { Self::parse_color(&self.header_bg) }
    pub fn header_fg(&self) -> Color { Self::parse_color(&self.header_fg) }
    pub fn selected_bg(&self) -> Color { Self::parse_color(&self.selected_bg) }
    pub fn selected_fg(&self) -> Color { Self::parse_color(&self.selected_fg) }
}
