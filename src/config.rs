use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::parser::{CONTAINER_CLASS, PageOptions, SECTION_CLASS};
use crate::search::highlight::MARKER_CLASS;
use crate::search::{FilterOptions, MatchMode};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ui: UiConfig,

    #[serde(default)]
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Dark palette for the interactive view (default: false)
    #[serde(default)]
    pub dark_mode: bool,
}

/// Search and page layout configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// "literal" (default) or "pattern"
    #[serde(default)]
    pub match_mode: MatchMode,

    /// Heading level that starts a content section (default: 2)
    #[serde(default = "default_section_level")]
    pub section_level: usize,

    #[serde(default = "default_container_class")]
    pub container_class: String,

    #[serde(default = "default_section_class")]
    pub section_class: String,

    #[serde(default = "default_marker_class")]
    pub marker_class: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            match_mode: MatchMode::default(),
            section_level: default_section_level(),
            container_class: default_container_class(),
            section_class: default_section_class(),
            marker_class: default_marker_class(),
        }
    }
}

fn default_section_level() -> usize {
    2
}

fn default_container_class() -> String {
    CONTAINER_CLASS.to_string()
}

fn default_section_class() -> String {
    SECTION_CLASS.to_string()
}

fn default_marker_class() -> String {
    MARKER_CLASS.to_string()
}

/// An existing `preferred` file wins; otherwise `fallback`, whether or not it exists yet.
fn resolve_path(preferred: Option<PathBuf>, fallback: Option<PathBuf>) -> Option<PathBuf> {
    match preferred {
        Some(path) if path.exists() => Some(path),
        _ => fallback,
    }
}

impl Config {
    /// Get the XDG-style config file path (~/.config/jagung/config.toml)
    /// This is preferred on macOS for CLI tools and cross-platform dotfiles
    fn xdg_config_path() -> Option<PathBuf> {
        if cfg!(target_os = "macos") {
            dirs::home_dir().map(|p| p.join(".config").join("jagung").join("config.toml"))
        } else {
            None
        }
    }

    /// Get the platform-specific config file path
    /// - macOS: ~/Library/Application Support/jagung/config.toml
    /// - Linux: ~/.config/jagung/config.toml
    /// - Windows: %APPDATA%/jagung/config.toml
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("jagung").join("config.toml"))
    }

    /// The file both `load` and `save` use.
    /// On macOS an existing ~/.config/jagung/config.toml wins over ~/Library/Application Support
    pub fn active_path() -> Option<PathBuf> {
        resolve_path(Self::xdg_config_path(), Self::config_path())
    }

    /// Load config from file, or return default if file doesn't exist
    pub fn load() -> Self {
        match Self::active_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load config from `path`. A missing file gives the defaults; an
    /// unreadable or invalid one is logged and also gives the defaults.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match Self::try_load_from(path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Ignoring config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    fn try_load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Save config to file
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::active_path().ok_or(ConfigError::NoConfigDir)?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;

        log::debug!("Saved config to {}", path.display());
        Ok(())
    }

    /// Update the dark mode flag and save config
    pub fn set_dark_mode(&mut self, enabled: bool) -> Result<(), ConfigError> {
        self.ui.dark_mode = enabled;
        self.save()
    }

    pub fn page_options(&self) -> PageOptions {
        PageOptions {
            section_level: self.search.section_level,
            container_class: self.search.container_class.clone(),
            section_class: self.search.section_class.clone(),
        }
    }

    pub fn filter_options(&self) -> FilterOptions {
        FilterOptions {
            container_class: self.search.container_class.clone(),
            section_class: self.search.section_class.clone(),
            marker_class: self.search.marker_class.clone(),
            match_mode: self.search.match_mode,
        }
    }
}
