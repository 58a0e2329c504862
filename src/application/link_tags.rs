//! Link insertion and restoration for a single post

use crate::domain::{
    escape_attribute, keyword_density, link_first_occurrence, link_quota, Anchor, CandidateSelector,
    KeywordMatcher, MarkerAnchors, PostId, DEFAULT_MARKER_CLASS,
};
use crate::error::Result;
use crate::infrastructure::{Config, ContentRepository, SnapshotStore};
use std::collections::HashSet;
use tracing::{debug, info};

/// Tunables for link insertion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkerOptions {
    /// CSS class put on inserted anchors and used to find them again
    pub marker_class: String,
    /// Refuse matches glued to surrounding word characters
    pub whole_words: bool,
}

impl Default for LinkerOptions {
    fn default() -> Self {
        LinkerOptions {
            marker_class: DEFAULT_MARKER_CLASS.to_string(),
            whole_words: false,
        }
    }
}

impl From<&Config> for LinkerOptions {
    fn from(config: &Config) -> Self {
        LinkerOptions {
            marker_class: config.marker_class.clone(),
            whole_words: config.whole_words,
        }
    }
}

/// A link added to a post body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertedLink {
    pub tag: String,
    pub target: PostId,
    pub permalink: String,
}

/// What applying links did to one post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyOutcome {
    pub post_id: PostId,
    pub links: Vec<InsertedLink>,
    pub snapshot_created: bool,
    pub changed: bool,
}

/// Where a restored body came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreSource {
    /// The stored original, which is deleted afterwards
    Snapshot,
    /// No original was stored; marker anchors were stripped from the live body
    LiveBody,
}

/// What restoring did to one post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoreOutcome {
    pub post_id: PostId,
    pub source: RestoreSource,
    /// Marker anchors present in the body before restoring
    pub anchors_removed: usize,
    pub changed: bool,
}

/// Inserts tag links into posts and takes them out again.
///
/// The repository, snapshot store and candidate ordering are injected, so the
/// same linker runs against files on disk or in-memory fixtures.
pub struct TagLinker<R, S, C> {
    repository: R,
    store: S,
    selector: C,
    markers: MarkerAnchors,
    whole_words: bool,
}

impl<R, S, C> TagLinker<R, S, C>
where
    R: ContentRepository,
    S: SnapshotStore,
    C: CandidateSelector,
{
    pub fn new(repository: R, store: S, selector: C, options: LinkerOptions) -> Result<Self> {
        Ok(TagLinker {
            repository,
            store,
            selector,
            markers: MarkerAnchors::new(&options.marker_class)?,
            whole_words: options.whole_words,
        })
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Insert links for every tag of a post.
    ///
    /// Each tag gets `ceil(density / 100)` attempts. An attempt picks the
    /// first related post (after the selector orders them) that has not been
    /// linked yet in this pass, and wraps the first unlinked occurrence of the
    /// tag name. The untouched body is snapshotted unless a snapshot exists.
    ///
    /// # Errors
    ///
    /// Fails on repository or store errors, and with `UndefinedDensity` when
    /// a tagged post body has no words.
    pub fn apply(&mut self, post_id: PostId) -> Result<ApplyOutcome> {
        let post = self.repository.get_post(post_id)?;

        if post.tags.is_empty() {
            debug!(post = %post_id, "post has no tags, skipping");
            return Ok(ApplyOutcome {
                post_id,
                links: Vec::new(),
                snapshot_created: false,
                changed: false,
            });
        }

        let mut content = post.body.clone();
        let mut used_links: HashSet<PostId> = HashSet::new();
        let mut links = Vec::new();

        for tag in &post.tags {
            // Density is measured on the body as modified by earlier tags.
            let density = keyword_density(&content, &tag.name)?;
            let quota = link_quota(density);
            debug!(post = %post_id, tag = %tag.name, density, quota, "tag density");

            if quota == 0 {
                continue;
            }

            let matcher = KeywordMatcher::new(&tag.name, self.whole_words)?;

            for _ in 0..quota {
                let mut candidates = self.repository.posts_with_tag(&tag.id, post_id)?;
                candidates.retain(|id| !used_links.contains(id));
                self.selector.arrange(&mut candidates);

                let Some(&target) = candidates.first() else {
                    debug!(post = %post_id, tag = %tag.name, "no related post left");
                    continue;
                };

                let permalink = self.repository.permalink(target)?;
                if content.contains(permalink.as_str())
                    || content.contains(escape_attribute(&permalink).as_ref())
                {
                    debug!(post = %post_id, target = %target, "already linked to target");
                    continue;
                }

                used_links.insert(target);

                let anchor = Anchor {
                    href: &permalink,
                    class: self.markers.class(),
                };
                if let Some(linked) = link_first_occurrence(&content, &matcher, &anchor) {
                    content = linked;
                    links.push(InsertedLink {
                        tag: tag.name.clone(),
                        target,
                        permalink,
                    });
                }
            }
        }

        let snapshot_created = if self.store.contains(post_id)? {
            false
        } else {
            self.store.upsert(post_id, &post.body)?;
            true
        };

        let changed = content != post.body;
        if changed {
            self.repository.update_body(post_id, &content)?;
        }

        info!(
            post = %post_id,
            links = links.len(),
            snapshot_created,
            "applied tag links"
        );

        Ok(ApplyOutcome {
            post_id,
            links,
            snapshot_created,
            changed,
        })
    }

    /// Remove inserted links from a post.
    ///
    /// With a snapshot, the snapshot (minus any marker anchors it carries)
    /// becomes the body and the snapshot is deleted. Without one, marker
    /// anchors are stripped from the live body.
    pub fn restore(&mut self, post_id: PostId) -> Result<RestoreOutcome> {
        let current = self.repository.get_post(post_id)?.body;
        let anchors_removed = self.markers.count(&current);

        let (restored, source) = match self.store.get(post_id)? {
            Some(snapshot) => (self.markers.strip(&snapshot).content, RestoreSource::Snapshot),
            None => (self.markers.strip(&current).content, RestoreSource::LiveBody),
        };

        let changed = restored != current;
        if changed {
            self.repository.update_body(post_id, &restored)?;
        }

        if source == RestoreSource::Snapshot {
            self.store.delete(post_id)?;
        }

        info!(
            post = %post_id,
            ?source,
            anchors_removed,
            "restored original content"
        );

        Ok(RestoreOutcome {
            post_id,
            source,
            anchors_removed,
            changed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Post, StableSelector};
    use crate::error::LinkerError;
    use crate::infrastructure::{InMemoryRepository, InMemorySnapshotStore};

    type TestLinker = TagLinker<InMemoryRepository, InMemorySnapshotStore, StableSelector>;

    fn linker(repo: InMemoryRepository) -> TestLinker {
        TagLinker::new(
            repo,
            InMemorySnapshotStore::new(),
            StableSelector,
            LinkerOptions::default(),
        )
        .unwrap()
    }

    fn cats_site() -> InMemoryRepository {
        InMemoryRepository::new("https://blog.test")
            .with_post(Post::new(1, "A", "I love cats. Cats are great.").with_tags(&["cats"]))
            .with_post(Post::new(2, "B", "Another cats post.").with_tags(&["cats"]))
    }

    #[test]
    fn apply_links_first_occurrence_and_snapshots() {
        let mut linker = linker(cats_site());

        let outcome = linker.apply(PostId(1)).unwrap();

        assert!(outcome.changed);
        assert!(outcome.snapshot_created);
        assert_eq!(outcome.links.len(), 1);
        assert_eq!(outcome.links[0].target, PostId(2));
        assert_eq!(
            linker.repository().body(PostId(1)),
            r#"I love <a href="https://blog.test/posts/2/" class="tag-linker">cats</a>. Cats are great."#
        );
        assert_eq!(
            linker.store().get(PostId(1)).unwrap().as_deref(),
            Some("I love cats. Cats are great.")
        );
    }

    #[test]
    fn restore_round_trips_and_deletes_snapshot() {
        let mut linker = linker(cats_site());

        linker.apply(PostId(1)).unwrap();
        let outcome = linker.restore(PostId(1)).unwrap();

        assert_eq!(outcome.source, RestoreSource::Snapshot);
        assert_eq!(outcome.anchors_removed, 1);
        assert!(outcome.changed);
        assert_eq!(
            linker.repository().body(PostId(1)),
            "I love cats. Cats are great."
        );
        assert!(linker.store().is_empty());
    }

    #[test]
    fn restore_without_snapshot_strips_live_body() {
        let body = r#"<p><a href="/x/" class="tag-linker">cats</a> and <a href="/y/">dogs</a></p>"#;
        let repo = InMemoryRepository::default().with_post(Post::new(5, "E", body));
        let mut linker = linker(repo);

        let outcome = linker.restore(PostId(5)).unwrap();

        assert_eq!(outcome.source, RestoreSource::LiveBody);
        assert_eq!(
            linker.repository().body(PostId(5)),
            r#"<p>cats and <a href="/y/">dogs</a></p>"#
        );

        // A second restore has nothing left to do.
        let again = linker.restore(PostId(5)).unwrap();
        assert!(!again.changed);
        assert_eq!(again.anchors_removed, 0);
    }

    #[test]
    fn restore_strips_stale_anchors_from_snapshot() {
        let repo = InMemoryRepository::default().with_post(Post::new(1, "A", "live"));
        let mut store = InMemorySnapshotStore::new();
        store
            .upsert(PostId(1), r#"old <a href="/z/" class="tag-linker">cats</a>"#)
            .unwrap();
        let mut linker =
            TagLinker::new(repo, store, StableSelector, LinkerOptions::default()).unwrap();

        linker.restore(PostId(1)).unwrap();
        assert_eq!(linker.repository().body(PostId(1)), "old cats");
    }

    #[test]
    fn apply_without_tags_does_nothing() {
        let repo = InMemoryRepository::default().with_post(Post::new(1, "A", "cats"));
        let mut linker = linker(repo);

        let outcome = linker.apply(PostId(1)).unwrap();
        assert!(!outcome.changed);
        assert!(!outcome.snapshot_created);
        assert!(linker.store().is_empty());
    }

    #[test]
    fn apply_without_related_posts_keeps_body_but_snapshots() {
        let repo = InMemoryRepository::default()
            .with_post(Post::new(1, "A", "cats everywhere").with_tags(&["cats"]));
        let mut linker = linker(repo);

        let outcome = linker.apply(PostId(1)).unwrap();
        assert!(outcome.links.is_empty());
        assert!(!outcome.changed);
        assert!(outcome.snapshot_created);
        assert_eq!(linker.repository().body(PostId(1)), "cats everywhere");
    }

    #[test]
    fn second_apply_keeps_first_snapshot_and_does_not_double_link() {
        let mut linker = linker(cats_site());

        linker.apply(PostId(1)).unwrap();
        let after_first = linker.repository().body(PostId(1)).to_string();

        let outcome = linker.apply(PostId(1)).unwrap();
        assert!(!outcome.snapshot_created);
        assert!(outcome.links.is_empty());
        assert_eq!(linker.repository().body(PostId(1)), after_first);
        assert_eq!(
            linker.store().get(PostId(1)).unwrap().as_deref(),
            Some("I love cats. Cats are great.")
        );
    }

    #[test]
    fn targets_are_unique_across_tags() {
        let repo = InMemoryRepository::default()
            .with_post(Post::new(1, "A", "cats and kittens").with_tags(&["cats", "kittens"]))
            .with_post(Post::new(2, "B", "b").with_tags(&["cats", "kittens"]))
            .with_post(Post::new(3, "C", "c").with_tags(&["kittens"]));
        let mut linker = linker(repo);

        let outcome = linker.apply(PostId(1)).unwrap();
        let targets: Vec<PostId> = outcome.links.iter().map(|link| link.target).collect();
        assert_eq!(targets, vec![PostId(2), PostId(3)]);
    }

    #[test]
    fn existing_permalink_skips_the_attempt() {
        let body = r#"See https://example.com/posts/2/ about cats."#;
        let repo = InMemoryRepository::default()
            .with_post(Post::new(1, "A", body).with_tags(&["cats"]))
            .with_post(Post::new(2, "B", "b").with_tags(&["cats"]));
        let mut linker = linker(repo);

        let outcome = linker.apply(PostId(1)).unwrap();
        assert!(outcome.links.is_empty());
        assert_eq!(linker.repository().body(PostId(1)), body);
    }

    #[test]
    fn permalinks_with_markup_characters_still_restore_from_live_body() {
        let repo = InMemoryRepository::new("https://b.test/a>b?x=1&y=2")
            .with_post(Post::new(1, "A", "I love cats.").with_tags(&["cats"]))
            .with_post(Post::new(2, "B", "b").with_tags(&["cats"]));
        let mut linker = linker(repo);

        linker.apply(PostId(1)).unwrap();
        assert_eq!(
            linker.repository().body(PostId(1)),
            r#"I love <a href="https://b.test/a&gt;b?x=1&amp;y=2/posts/2/" class="tag-linker">cats</a>."#
        );

        let second = linker.apply(PostId(1)).unwrap();
        assert!(second.links.is_empty());

        // Restore with an empty store, as if the snapshot had been lost.
        let mut fresh = TagLinker::new(
            linker.repository().clone(),
            InMemorySnapshotStore::new(),
            StableSelector,
            LinkerOptions::default(),
        )
        .unwrap();
        let outcome = fresh.restore(PostId(1)).unwrap();

        assert_eq!(outcome.source, RestoreSource::LiveBody);
        assert_eq!(outcome.anchors_removed, 1);
        assert_eq!(fresh.repository().body(PostId(1)), "I love cats.");
    }

    #[test]
    fn wordless_tagged_post_is_undefined_density() {
        let repo = InMemoryRepository::default()
            .with_post(Post::new(1, "A", "").with_tags(&["cats"]))
            .with_post(Post::new(2, "B", "b").with_tags(&["cats"]));
        let mut linker = linker(repo);

        assert!(matches!(
            linker.apply(PostId(1)),
            Err(LinkerError::UndefinedDensity { .. })
        ));
        assert!(linker.store().is_empty());
    }

    #[test]
    fn high_density_inserts_several_links() {
        // "cat" occurs 3 times in 2 words: density 150%, two attempts.
        let repo = InMemoryRepository::default()
            .with_post(Post::new(1, "A", "catcat cat").with_tags(&["cat"]))
            .with_post(Post::new(2, "B", "b").with_tags(&["cat"]))
            .with_post(Post::new(3, "C", "c").with_tags(&["cat"]));
        let mut linker = linker(repo);

        let outcome = linker.apply(PostId(1)).unwrap();
        assert_eq!(outcome.links.len(), 2);
        assert_eq!(
            linker.repository().body(PostId(1)),
            concat!(
                r#"<a href="https://example.com/posts/2/" class="tag-linker">cat</a>"#,
                r#"<a href="https://example.com/posts/3/" class="tag-linker">cat</a> cat"#
            )
        );
    }

    #[test]
    fn custom_marker_class_is_used_both_ways() {
        let options = LinkerOptions {
            marker_class: "auto-link".to_string(),
            whole_words: false,
        };
        let mut linker =
            TagLinker::new(cats_site(), InMemorySnapshotStore::new(), StableSelector, options)
                .unwrap();

        linker.apply(PostId(1)).unwrap();
        assert!(linker.repository().body(PostId(1)).contains(r#"class="auto-link""#));

        linker.restore(PostId(1)).unwrap();
        assert_eq!(
            linker.repository().body(PostId(1)),
            "I love cats. Cats are great."
        );
    }

    #[test]
    fn unknown_post_fails() {
        let mut linker = linker(cats_site());
        assert!(matches!(
            linker.apply(PostId(42)),
            Err(LinkerError::PostNotFound(PostId(42)))
        ));
        assert!(linker.restore(PostId(42)).is_err());
    }
}
