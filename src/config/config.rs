use anyhow::Result;
use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::ui::viewport::{DEFAULT_OVERSCAN, DEFAULT_ROW_HEIGHT, DEFAULT_VIRTUALIZE_THRESHOLD};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GridConfig {
    pub behavior: BehaviorConfig,
    pub theme: ThemeConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Row counts above this switch the body to virtualized rendering
    pub virtualize_threshold: usize,

    /// Extra rows materialized beyond each viewport edge
    pub overscan: usize,

    /// Estimated row height in layout units
    pub row_height: usize,

    /// Field that carries each row's unique identifier
    pub id_field: String,

    /// Search matching: "contains", "regex", or "fuzzy"
    pub match_mode: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Header foreground color name
    pub header_foreground: String,

    /// Foreground for selected rows
    pub selection_foreground: String,

    /// Bold headers
    pub header_bold: bool,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            virtualize_threshold: DEFAULT_VIRTUALIZE_THRESHOLD,
            overscan: DEFAULT_OVERSCAN,
            row_height: DEFAULT_ROW_HEIGHT,
            id_field: "id".to_string(),
            match_mode: "contains".to_string(),
        }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            header_foreground: "yellow".to_string(),
            selection_foreground: "cyan".to_string(),
            header_bold: true,
        }
    }
}

impl GridConfig {
    /// Load config from the default location, falling back to defaults if
    /// no file exists yet.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&config_path)?;
        let config: GridConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save config to the default location.
    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(&config_path, contents)?;

        Ok(())
    }

    /// Default config file path.
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("datagrid").join("config.toml"))
    }
}

impl ThemeConfig {
    pub fn header_style(&self) -> Style {
        let mut style = Style::default().fg(parse_color(&self.header_foreground));
        if self.header_bold {
            style = style.add_modifier(Modifier::BOLD);
        }
        style
    }

    pub fn selection_style(&self) -> Style {
        Style::default().fg(parse_color(&self.selection_foreground))
    }
}

fn parse_color(name: &str) -> Color {
    match name.to_lowercase().as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "gray" | "grey" => Color::Gray,
        "white" => Color::White,
        _ => Color::Reset,
    }
}
