//! Repository contracts and the file system site repository

use crate::domain::{Post, PostId, Scope, Tag, TagId};
use crate::error::{LinkerError, Result};
use crate::infrastructure::content::SiteContent;
use crate::infrastructure::Config;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the directory that marks a site root
pub const SITE_DIR: &str = ".taglinker";

/// Read posts and rewrite their bodies.
///
/// This is everything the linker needs from a content management system.
pub trait ContentRepository {
    /// Read a post by id
    fn get_post(&self, id: PostId) -> Result<Post>;

    /// List the ids of the posts in `scope`, in ascending order
    fn list_posts(&self, scope: &Scope) -> Result<Vec<PostId>>;

    /// Ids of the posts carrying `tag`, without `exclude`
    fn posts_with_tag(&self, tag: &TagId, exclude: PostId) -> Result<Vec<PostId>>;

    /// Public URL of a post
    fn permalink(&self, id: PostId) -> Result<String>;

    /// Replace the body of a post
    fn update_body(&mut self, id: PostId, body: &str) -> Result<()>;

    /// Tags of a post
    fn tags_for(&self, id: PostId) -> Result<Vec<Tag>> {
        Ok(self.get_post(id)?.tags)
    }
}

/// Abstract repository for site administration
pub trait SiteRepository {
    /// Get the root directory of this site
    fn root(&self) -> &Path;

    /// Load configuration from .taglinker/config.toml
    fn load_config(&self) -> Result<Config>;

    /// Save configuration to .taglinker/config.toml
    fn save_config(&self, config: &Config) -> Result<()>;

    /// Check if .taglinker directory exists
    fn is_initialized(&self) -> bool;

    /// Create .taglinker directory structure
    fn initialize(&self) -> Result<()>;
}

/// File system implementation of SiteRepository
#[derive(Debug, Clone)]
pub struct FileSystemRepository {
    pub root: PathBuf,
}

impl FileSystemRepository {
    /// Create a new repository with the given root directory
    pub fn new(root: PathBuf) -> Self {
        FileSystemRepository { root }
    }

    /// Discover the site root by walking up from current directory
    /// First checks TAGLINKER_ROOT environment variable, then falls back to discovery
    pub fn discover() -> Result<Self> {
        if let Ok(root_path) = std::env::var("TAGLINKER_ROOT") {
            let path = PathBuf::from(root_path);
            if Self::has_site_dir(&path) {
                return Ok(FileSystemRepository::new(path));
            } else {
                return Err(LinkerError::Config(format!(
                    "TAGLINKER_ROOT is set to '{}' but no {} directory found. \
                    Run 'taglinker init' in that directory or unset TAGLINKER_ROOT.",
                    path.display(),
                    SITE_DIR
                )));
            }
        }

        let current_dir = std::env::current_dir()?;
        Self::discover_from(&current_dir)
    }

    /// Discover the site root by walking up from a specific starting directory
    pub fn discover_from(start: &Path) -> Result<Self> {
        let mut current = start.to_path_buf();

        loop {
            if Self::has_site_dir(&current) {
                return Ok(FileSystemRepository::new(current));
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => {
                    return Err(LinkerError::NotSiteDirectory(start.to_path_buf()));
                }
            }
        }
    }

    fn has_site_dir(path: &Path) -> bool {
        path.join(SITE_DIR).is_dir()
    }

    /// Directory holding original-content snapshots
    pub fn snapshot_dir(&self) -> PathBuf {
        self.root.join(SITE_DIR).join("originals")
    }

    /// Scan the posts directory and load every post into memory
    pub fn content(&self) -> Result<SiteContent> {
        let config = self.load_config()?;
        SiteContent::load(&self.root.join(&config.posts_dir), &config.base_url)
    }
}

impl SiteRepository for FileSystemRepository {
    fn root(&self) -> &Path {
        &self.root
    }

    fn load_config(&self) -> Result<Config> {
        Config::load_from_dir(&self.root)
    }

    fn save_config(&self, config: &Config) -> Result<()> {
        config.save_to_dir(&self.root)
    }

    fn is_initialized(&self) -> bool {
        Self::has_site_dir(&self.root)
    }

    fn initialize(&self) -> Result<()> {
        let site_dir = self.root.join(SITE_DIR);

        if site_dir.exists() {
            return Err(LinkerError::Config(format!(
                "Directory already initialized: {}",
                self.root.display()
            )));
        }

        fs::create_dir(&site_dir)?;
        Ok(())
    }
}

/// Write a file using a best-effort atomic replace:
/// write to a temp file in the same directory, then rename into place.
///
/// On Windows, `rename` does not overwrite existing files, so we remove the destination first.
pub(crate) fn write_atomic(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let tmp_name = format!(
        "{}.taglinker-tmp-{}",
        path.file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("post.html"),
        std::process::id()
    );
    let tmp_path = path.with_file_name(tmp_name);

    fs::write(&tmp_path, content)?;

    if path.exists() {
        fs::remove_file(path)?;
    }

    fs::rename(&tmp_path, path)?;
    Ok(())
}
