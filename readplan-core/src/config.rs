//! Configuration management for readplan
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (READPLAN_*)
//! 3. Config file (~/.config/readplan/config.toml)
//! 4. Default values

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Validation thresholds
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Minimum distinct languages across section and topic titles
    pub min_languages: usize,

    /// Languages listed in coverage errors
    pub required_languages: Vec<String>,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            min_languages: 5,
            required_languages: ["de", "en", "es", "it", "fr"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// Preview rendering settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Language preference for names and titles
    pub languages: Vec<String>,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            languages: vec!["en".to_string(), "de".to_string()],
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub validation: ValidationConfig,
    pub preview: PreviewConfig,
}

impl Config {
    /// Load configuration from the default config file location
    ///
    /// Returns default config if file doesn't exist
    pub fn load() -> Result<Self> {
        if let Some(path) = Self::default_config_path() {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Get the default config file path
    ///
    /// Returns `~/.config/readplan/config.toml` on Unix
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("readplan").join("config.toml"))
    }

    /// Apply environment variable overrides
    ///
    /// Supported variables:
    /// - READPLAN_MIN_LANGUAGES: Minimum distinct title languages
    /// - READPLAN_PREVIEW_LANGUAGES: Comma-separated preview languages
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides(
            std::env::var("READPLAN_MIN_LANGUAGES").ok().as_deref(),
            std::env::var("READPLAN_PREVIEW_LANGUAGES").ok().as_deref(),
        )
    }

    fn with_overrides(
        mut self,
        min_languages: Option<&str>,
        languages: Option<&str>,
    ) -> Result<Self> {
        if let Some(raw) = min_languages {
            self.validation.min_languages = raw.trim().parse().map_err(|_| {
                Error::Config(format!("READPLAN_MIN_LANGUAGES is not a number: {}", raw))
            })?;
        }

        if let Some(raw) = languages {
            self.preview.languages = split_languages(raw);
        }

        Ok(self)
    }

    /// Apply CLI flag overrides
    pub fn with_cli_overrides(
        mut self,
        min_languages: Option<usize>,
        preview_languages: Vec<String>,
    ) -> Self {
        if let Some(n) = min_languages {
            self.validation.min_languages = n;
        }

        if !preview_languages.is_empty() {
            self.preview.languages = preview_languages;
        }

        self
    }

    /// Load configuration with all overrides applied
    ///
    /// Priority: CLI > env > config file > defaults
    pub fn load_with_overrides(
        min_languages: Option<usize>,
        preview_languages: Vec<String>,
    ) -> Result<Self> {
        Ok(Self::load()?
            .with_env_overrides()?
            .with_cli_overrides(min_languages, preview_languages))
    }
}

fn split_languages(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
