//! Per-tag density report for a post

use crate::domain::{keyword_occurrences, link_quota, word_count, PostId};
use crate::error::Result;
use crate::infrastructure::ContentRepository;

/// Density figures for one tag of a post
#[derive(Debug, Clone, PartialEq)]
pub struct TagDensity {
    pub tag: String,
    pub occurrences: usize,
    pub words: usize,
    /// `None` when the body has no words
    pub density: Option<f64>,
    pub quota: Option<usize>,
    pub related_posts: usize,
}

/// Compute how many links each tag of a post would get on the current body.
///
/// Unlike linking, a wordless body is reported rather than treated as an error.
pub fn density_report<R: ContentRepository>(
    repository: &R,
    post_id: PostId,
) -> Result<Vec<TagDensity>> {
    let post = repository.get_post(post_id)?;
    let words = word_count(&post.body);

    post.tags
        .iter()
        .map(|tag| {
            let occurrences = keyword_occurrences(&post.body, &tag.name);
            let density = (words > 0).then(|| occurrences as f64 / words as f64 * 100.0);
            Ok(TagDensity {
                tag: tag.name.clone(),
                occurrences,
                words,
                density,
                quota: density.map(link_quota),
                related_posts: repository.posts_with_tag(&tag.id, post_id)?.len(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Post;
    use crate::infrastructure::InMemoryRepository;

    #[test]
    fn reports_each_tag() {
        let repo = InMemoryRepository::default()
            .with_post(Post::new(1, "A", "I love cats. Cats are great.").with_tags(&["cats", "dogs"]))
            .with_post(Post::new(2, "B", "b").with_tags(&["cats"]));

        let report = density_report(&repo, PostId(1)).unwrap();

        assert_eq!(report.len(), 2);
        assert_eq!(report[0].tag, "cats");
        assert_eq!(report[0].occurrences, 2);
        assert_eq!(report[0].words, 6);
        assert_eq!(report[0].quota, Some(1));
        assert_eq!(report[0].related_posts, 1);

        assert_eq!(report[1].occurrences, 0);
        assert_eq!(report[1].density, Some(0.0));
        assert_eq!(report[1].quota, Some(0));
        assert_eq!(report[1].related_posts, 0);
    }

    #[test]
    fn wordless_body_has_no_density() {
        let repo = InMemoryRepository::default().with_post(Post::new(1, "A", "").with_tags(&["cats"]));

        let report = density_report(&repo, PostId(1)).unwrap();
        assert_eq!(report[0].density, None);
        assert_eq!(report[0].quota, None);
    }
}
