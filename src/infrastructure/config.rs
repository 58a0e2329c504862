//! Configuration management

use crate::domain::DEFAULT_MARKER_CLASS;
use crate::error::{LinkerError, Result};
use crate::infrastructure::repository::SITE_DIR;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

fn default_posts_dir() -> String {
    "posts".to_string()
}

fn default_marker_class() -> String {
    DEFAULT_MARKER_CLASS.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Prefix of every permalink (e.g. https://blog.example)
    pub base_url: String,
    /// Directory holding post files, relative to the site root
    #[serde(default = "default_posts_dir")]
    pub posts_dir: String,
    /// CSS class carried by inserted anchors
    #[serde(default = "default_marker_class")]
    pub marker_class: String,
    /// Only link occurrences that are not part of a longer word
    #[serde(default)]
    pub whole_words: bool,
    pub created: DateTime<Utc>,
}

impl Config {
    /// Create a new config with default values
    pub fn new(base_url: &str) -> Self {
        Config {
            base_url: base_url.trim_end_matches('/').to_string(),
            posts_dir: default_posts_dir(),
            marker_class: default_marker_class(),
            whole_words: false,
            created: Utc::now(),
        }
    }

    /// Load config from .taglinker/config.toml in the given directory
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join(SITE_DIR).join("config.toml");

        let contents = fs::read_to_string(&config_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                LinkerError::NotSiteDirectory(path.to_path_buf())
            } else {
                LinkerError::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to .taglinker/config.toml in the given directory
    pub fn save_to_dir(&self, path: &Path) -> Result<()> {
        let site_dir = path.join(SITE_DIR);
        let config_path = site_dir.join("config.toml");

        if !site_dir.exists() {
            fs::create_dir(&site_dir)?;
        }

        let contents = toml::to_string_pretty(self)?;

        fs::write(&config_path, contents)?;

        Ok(())
    }

    /// Reject values the linker cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty()
            || self
                .base_url
                .chars()
                .any(|ch| ch.is_whitespace() || matches!(ch, '"' | '<' | '>'))
        {
            return Err(LinkerError::Config(format!(
                "Invalid base_url: '{}'",
                self.base_url
            )));
        }

        if self.marker_class.trim().is_empty() || self.marker_class.contains('"') {
            return Err(LinkerError::Config(format!(
                "Invalid marker_class: '{}'",
                self.marker_class
            )));
        }

        if self.posts_dir.trim().is_empty() {
            return Err(LinkerError::Config("posts_dir cannot be empty".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_new_config() {
        let config = Config::new("https://blog.example/");
        assert_eq!(config.base_url, "https://blog.example");
        assert_eq!(config.posts_dir, "posts");
        assert_eq!(config.marker_class, "tag-linker");
        assert!(!config.whole_words);
    }

    #[test]
    fn test_save_and_load_config() {
        let temp = TempDir::new().unwrap();
        let config = Config::new("https://blog.example");

        config.save_to_dir(temp.path()).unwrap();
        assert!(temp.path().join(".taglinker/config.toml").exists());

        let loaded = Config::load_from_dir(temp.path()).unwrap();
        assert_eq!(loaded.base_url, config.base_url);
        assert_eq!(loaded.marker_class, config.marker_class);
        assert_eq!(loaded.created, config.created);
    }

    #[test]
    fn test_load_fills_defaults() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(".taglinker")).unwrap();
        fs::write(
            temp.path().join(".taglinker/config.toml"),
            "base_url = \"https://x.test\"\ncreated = \"2025-01-17T10:00:00Z\"\n",
        )
        .unwrap();

        let loaded = Config::load_from_dir(temp.path()).unwrap();
        assert_eq!(loaded.posts_dir, "posts");
        assert_eq!(loaded.marker_class, "tag-linker");
        assert!(!loaded.whole_words);
    }

    #[test]
    fn test_load_missing_config() {
        let temp = TempDir::new().unwrap();

        match Config::load_from_dir(temp.path()).unwrap_err() {
            LinkerError::NotSiteDirectory(_) => {}
            _ => panic!("Expected NotSiteDirectory error"),
        }
    }

    #[test]
    fn test_load_reports_malformed_toml() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(".taglinker")).unwrap();
        fs::write(temp.path().join(".taglinker/config.toml"), "base_url = ").unwrap();

        match Config::load_from_dir(temp.path()).unwrap_err() {
            LinkerError::TomlDeserialize(_) => {}
            other => panic!("Expected TomlDeserialize error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_markup_in_base_url() {
        let mut config = Config::new("https://x.test");
        assert!(config.validate().is_ok());

        for bad in ["", "https://x.test/a>b", "https://x.test/\"q", "https://x .test"] {
            config.base_url = bad.to_string();
            assert!(config.validate().is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn test_validate_rejects_quoted_marker() {
        let mut config = Config::new("https://x.test");
        config.marker_class = "bad\"class".to_string();
        assert!(config.validate().is_err());

        config.marker_class = "  ".to_string();
        assert!(config.validate().is_err());
    }
}
