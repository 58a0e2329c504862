//! List posts use case

use crate::domain::{MarkerAnchors, PostId, Scope};
use crate::error::Result;
use crate::infrastructure::{ContentRepository, SnapshotStore};

/// One line of the post listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostSummary {
    pub id: PostId,
    pub title: String,
    pub tags: Vec<String>,
    /// Marker anchors currently in the body
    pub linked: usize,
    pub has_snapshot: bool,
}

/// Summarize the posts in `scope` with their linking state.
pub fn list_posts<R, S>(
    repository: &R,
    store: &S,
    markers: &MarkerAnchors,
    scope: &Scope,
) -> Result<Vec<PostSummary>>
where
    R: ContentRepository,
    S: SnapshotStore,
{
    repository
        .list_posts(scope)?
        .into_iter()
        .map(|id| {
            let post = repository.get_post(id)?;
            Ok(PostSummary {
                id,
                linked: markers.count(&post.body),
                has_snapshot: store.contains(id)?,
                tags: post.tags.into_iter().map(|tag| tag.name).collect(),
                title: post.title,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Post, DEFAULT_MARKER_CLASS};
    use crate::infrastructure::{InMemoryRepository, InMemorySnapshotStore};

    #[test]
    fn summaries_show_links_and_snapshots() {
        let repo = InMemoryRepository::default()
            .with_post(
                Post::new(1, "Linked", r#"<a href="/b/" class="tag-linker">cats</a>"#)
                    .with_tags(&["cats"]),
            )
            .with_post(Post::new(2, "Plain", "cats").with_tags(&["cats", "pets"]));
        let mut store = InMemorySnapshotStore::new();
        store.upsert(PostId(1), "cats").unwrap();
        let markers = MarkerAnchors::new(DEFAULT_MARKER_CLASS).unwrap();

        let summaries = list_posts(&repo, &store, &markers, &Scope::All).unwrap();

        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].linked, 1);
        assert!(summaries[0].has_snapshot);
        assert_eq!(summaries[1].title, "Plain");
        assert_eq!(summaries[1].tags, vec!["cats".to_string(), "pets".to_string()]);
        assert!(!summaries[1].has_snapshot);
    }
}
