//! Config management use case

use crate::error::{LinkerError, Result};
use crate::infrastructure::{Config, FileSystemRepository, SiteRepository};

const KEYS: &str = "base_url, posts_dir, marker_class, whole_words, created";

/// Service for managing site configuration
pub struct ConfigService {
    repository: FileSystemRepository,
}

impl ConfigService {
    /// Create a new config service
    pub fn new(repository: FileSystemRepository) -> Self {
        ConfigService { repository }
    }

    /// Get a single config value
    pub fn get(&self, key: &str) -> Result<String> {
        let config = self.repository.load_config()?;

        match key {
            "base_url" => Ok(config.base_url),
            "posts_dir" => Ok(config.posts_dir),
            "marker_class" => Ok(config.marker_class),
            "whole_words" => Ok(config.whole_words.to_string()),
            "created" => Ok(config.created.to_rfc3339()),
            _ => Err(LinkerError::Config(format!(
                "Unknown config key: '{}'. Valid keys are: {}",
                key, KEYS
            ))),
        }
    }

    /// Set a config value
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut config = self.repository.load_config()?;

        match key {
            "base_url" => config.base_url = value.trim_end_matches('/').to_string(),
            "posts_dir" => config.posts_dir = value.to_string(),
            "marker_class" => config.marker_class = value.to_string(),
            "whole_words" => {
                config.whole_words = value.parse().map_err(|_| {
                    LinkerError::Config(format!(
                        "Invalid value for whole_words: '{}'. Use true or false",
                        value
                    ))
                })?;
            }
            "created" => {
                return Err(LinkerError::Config(
                    "Cannot modify 'created' field (read-only)".to_string(),
                ));
            }
            _ => {
                return Err(LinkerError::Config(format!(
                    "Unknown config key: '{}'. Valid keys are: {}",
                    key, KEYS
                )));
            }
        }

        config.validate()?;
        self.repository.save_config(&config)?;
        Ok(())
    }

    /// List all config values
    pub fn list(&self) -> Result<Config> {
        self.repository.load_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn service(temp: &TempDir) -> ConfigService {
        let repo = FileSystemRepository::new(temp.path().to_path_buf());
        repo.initialize().unwrap();
        repo.save_config(&Config::new("https://x.test")).unwrap();
        ConfigService::new(repo)
    }

    #[test]
    fn set_and_get_values() {
        let temp = TempDir::new().unwrap();
        let service = service(&temp);

        service.set("marker_class", "auto-link").unwrap();
        service.set("whole_words", "true").unwrap();
        service.set("base_url", "https://y.test/").unwrap();

        assert_eq!(service.get("marker_class").unwrap(), "auto-link");
        assert_eq!(service.get("whole_words").unwrap(), "true");
        assert_eq!(service.get("base_url").unwrap(), "https://y.test");
    }

    #[test]
    fn rejects_bad_keys_and_values() {
        let temp = TempDir::new().unwrap();
        let service = service(&temp);

        assert!(service.get("mode").is_err());
        assert!(service.set("created", "now").is_err());
        assert!(service.set("whole_words", "maybe").is_err());
        assert!(service.set("marker_class", "").is_err());
        assert!(service.set("base_url", "https://y.test/a>b").is_err());
        assert_eq!(service.get("base_url").unwrap(), "https://x.test");
        assert_eq!(service.get("marker_class").unwrap(), "tag-linker");
    }
}
