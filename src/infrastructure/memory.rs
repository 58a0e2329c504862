//! In-memory repository and snapshot store

use crate::domain::{Post, PostId, Scope, TagId};
use crate::error::{LinkerError, Result};
use crate::infrastructure::repository::ContentRepository;
use crate::infrastructure::snapshot::SnapshotStore;
use std::collections::{BTreeMap, HashMap};

/// Content repository backed by a map of posts.
///
/// Permalinks look like `<base_url>/posts/<id>/`.
#[derive(Debug, Clone)]
pub struct InMemoryRepository {
    base_url: String,
    posts: BTreeMap<PostId, Post>,
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new("https://example.com")
    }
}

impl InMemoryRepository {
    pub fn new(base_url: &str) -> Self {
        InMemoryRepository {
            base_url: base_url.trim_end_matches('/').to_string(),
            posts: BTreeMap::new(),
        }
    }

    pub fn with_post(mut self, post: Post) -> Self {
        self.insert(post);
        self
    }

    pub fn insert(&mut self, post: Post) {
        self.posts.insert(post.id, post);
    }

    pub fn post(&self, id: PostId) -> Option<&Post> {
        self.posts.get(&id)
    }

    /// Body of a post, or an empty string when it does not exist
    pub fn body(&self, id: PostId) -> &str {
        self.posts.get(&id).map(|post| post.body.as_str()).unwrap_or("")
    }
}

impl ContentRepository for InMemoryRepository {
    fn get_post(&self, id: PostId) -> Result<Post> {
        self.posts
            .get(&id)
            .cloned()
            .ok_or(LinkerError::PostNotFound(id))
    }

    fn list_posts(&self, scope: &Scope) -> Result<Vec<PostId>> {
        Ok(self
            .posts
            .values()
            .filter(|post| match scope {
                Scope::Post(id) => post.id == *id,
                Scope::Category(category) => post.in_category(category),
                Scope::All => true,
            })
            .map(|post| post.id)
            .collect())
    }

    fn posts_with_tag(&self, tag: &TagId, exclude: PostId) -> Result<Vec<PostId>> {
        Ok(self
            .posts
            .values()
            .filter(|post| post.id != exclude && post.has_tag(tag))
            .map(|post| post.id)
            .collect())
    }

    fn permalink(&self, id: PostId) -> Result<String> {
        if !self.posts.contains_key(&id) {
            return Err(LinkerError::PostNotFound(id));
        }
        Ok(format!("{}/posts/{}/", self.base_url, id))
    }

    fn update_body(&mut self, id: PostId, body: &str) -> Result<()> {
        let post = self
            .posts
            .get_mut(&id)
            .ok_or(LinkerError::PostNotFound(id))?;
        post.body = body.to_string();
        Ok(())
    }
}

/// Snapshot store backed by a hash map
#[derive(Debug, Clone, Default)]
pub struct InMemorySnapshotStore {
    snapshots: HashMap<PostId, String>,
}

impl InMemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

impl SnapshotStore for InMemorySnapshotStore {
    fn upsert(&mut self, id: PostId, content: &str) -> Result<()> {
        self.snapshots.insert(id, content.to_string());
        Ok(())
    }

    fn get(&self, id: PostId) -> Result<Option<String>> {
        Ok(self.snapshots.get(&id).cloned())
    }

    fn delete(&mut self, id: PostId) -> Result<()> {
        self.snapshots.remove(&id);
        Ok(())
    }
}
