//! Batch actions and the set of posts they target

use crate::domain::{CategoryId, PostId};
use std::fmt;

/// What a batch does to each post
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Insert tag links
    Apply,
    /// Remove inserted links and bring back the original body
    Restore,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Apply => f.write_str("apply"),
            Action::Restore => f.write_str("restore"),
        }
    }
}

/// Which posts a batch touches
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// One explicitly selected post
    Post(PostId),
    /// Every post filed under a category
    Category(CategoryId),
    /// Every post in the repository
    All,
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Post(id) => write!(f, "post {}", id),
            Scope::Category(category) => write!(f, "category '{}'", category),
            Scope::All => f.write_str("all posts"),
        }
    }
}
