//! Posts, tags and categories as seen by the linker

use std::fmt;

/// Identifier of a post in the content repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PostId(pub u64);

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Identifier of a tag. Two tags with the same id are the same tag.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TagId(String);

impl TagId {
    /// Derive the id from a tag name (case-insensitive)
    pub fn from_name(name: &str) -> Self {
        TagId(name.trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A tag attached to a post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
}

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Tag {
            id: TagId::from_name(&name),
            name,
        }
    }
}

/// Identifier of a category
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CategoryId(String);

impl CategoryId {
    pub fn from_name(name: &str) -> Self {
        CategoryId(name.trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A blog post. The linker only ever rewrites `body`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub body: String,
    pub tags: Vec<Tag>,
    pub categories: Vec<CategoryId>,
}

impl Post {
    pub fn new(id: u64, title: impl Into<String>, body: impl Into<String>) -> Self {
        Post {
            id: PostId(id),
            title: title.into(),
            body: body.into(),
            tags: Vec::new(),
            categories: Vec::new(),
        }
    }

    pub fn with_tags(mut self, names: &[&str]) -> Self {
        self.tags = names.iter().map(|name| Tag::new(*name)).collect();
        self
    }

    pub fn with_categories(mut self, names: &[&str]) -> Self {
        self.categories = names.iter().map(|name| CategoryId::from_name(name)).collect();
        self
    }

    pub fn has_tag(&self, tag: &TagId) -> bool {
        self.tags.iter().any(|t| &t.id == tag)
    }

    pub fn in_category(&self, category: &CategoryId) -> bool {
        self.categories.contains(category)
    }
}
