//! Initialize site use case

use crate::error::Result;
use crate::infrastructure::{Config, FileSystemRepository, SiteRepository};
use std::fs;
use std::path::PathBuf;

/// Service for creating a new site
pub struct InitService {
    repository: FileSystemRepository,
}

impl InitService {
    pub fn new(repository: FileSystemRepository) -> Self {
        InitService { repository }
    }

    /// Create `.taglinker/`, the config file and the posts directory.
    ///
    /// Returns the posts directory.
    pub fn execute(&self, base_url: &str) -> Result<PathBuf> {
        let root = self.repository.root();
        let config = Config::new(base_url);
        config.validate()?;

        if !root.exists() {
            fs::create_dir_all(root)?;
        }

        self.repository.initialize()?;
        self.repository.save_config(&config)?;

        let posts_dir = root.join(&config.posts_dir);
        if !posts_dir.exists() {
            fs::create_dir_all(&posts_dir)?;
        }

        Ok(posts_dir)
    }
}
