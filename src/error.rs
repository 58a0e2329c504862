//! Error types for taglinker

use crate::domain::PostId;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for taglinker
#[derive(Debug, Error)]
pub enum LinkerError {
    #[error("Not a taglinker site: {0}")]
    NotSiteDirectory(PathBuf),

    #[error("Post not found: {0}")]
    PostNotFound(PostId),

    #[error("The selected post has no tags: {0}")]
    NoTags(PostId),

    #[error("Keyword density is undefined for '{keyword}': content has no words")]
    UndefinedDensity { keyword: String },

    #[error("Invalid post file {path:?}: {message}")]
    InvalidPost { path: PathBuf, message: String },

    #[error("Duplicate post id {id} in {path:?}")]
    DuplicatePostId { id: PostId, path: PathBuf },

    #[error("Post {path:?} has the same slug '{slug}' as post {other}")]
    DuplicateSlug {
        slug: String,
        other: PostId,
        path: PathBuf,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl LinkerError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            LinkerError::NotSiteDirectory(_) => 2,
            LinkerError::PostNotFound(_) => 3,
            LinkerError::NoTags(_) => 4,
            _ => 1,
        }
    }

    /// Whether this is reported as a warning rather than a failure
    pub fn is_warning(&self) -> bool {
        matches!(self, LinkerError::NoTags(_))
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            LinkerError::NotSiteDirectory(path) => {
                format!(
                    "Not a taglinker site: {}\n\n\
                    Suggestions:\n\
                    • Run 'taglinker init' in this directory to create a new site\n\
                    • Navigate to an existing site directory\n\
                    • Set TAGLINKER_ROOT environment variable to your site path",
                    path.display()
                )
            }
            LinkerError::PostNotFound(id) => {
                format!(
                    "Post not found: {}\n\n\
                    Suggestions:\n\
                    • Use 'taglinker list' to see available post ids\n\
                    • Post ids come from the 'id' key in each post's front matter",
                    id
                )
            }
            LinkerError::NoTags(id) => {
                format!(
                    "The selected post has no tags (post {}). Nothing was changed.\n\n\
                    Suggestions:\n\
                    • Add tags to the post front matter (e.g., tags = [\"cats\"])\n\
                    • Process a whole category instead: --category <name>",
                    id
                )
            }
            LinkerError::UndefinedDensity { keyword } => {
                format!(
                    "{}\n\n\
                    Keyword density divides by the word count of the post body.\n\
                    Give the post some text or remove the tag '{}' from it.",
                    self, keyword
                )
            }
            LinkerError::DuplicateSlug { .. } => {
                format!(
                    "{}\n\n\
                    Every post needs its own permalink.\n\
                    Set a distinct 'slug' in the front matter of one of the posts.",
                    self
                )
            }
            LinkerError::Config(msg) => {
                if msg.contains("Unknown config key") {
                    format!(
                        "{}\n\n\
                        Example: taglinker config marker_class tag-linker",
                        msg
                    )
                } else {
                    msg.clone()
                }
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using LinkerError
pub type Result<T> = std::result::Result<T, LinkerError>;
