//! Batch use case: apply or restore links over a set of posts

use crate::application::link_tags::{RestoreSource, TagLinker};
use crate::domain::{Action, CandidateSelector, PostId, Scope};
use crate::error::{LinkerError, Result};
use crate::infrastructure::{ContentRepository, SnapshotStore};
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostChange {
    pub post_id: PostId,
    pub links_inserted: usize,
    pub anchors_removed: usize,
    pub from_snapshot: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    pub action: Action,
    pub scope: Scope,
    pub scanned_posts: usize,
    pub changed_posts: usize,
    pub total_links: usize,
    pub total_anchors_removed: usize,
    pub snapshots_created: usize,
    pub restored_from_snapshot: usize,
    pub changes: Vec<PostChange>,
}

impl BatchReport {
    fn new(action: Action, scope: Scope, scanned_posts: usize) -> Self {
        BatchReport {
            action,
            scope,
            scanned_posts,
            changed_posts: 0,
            total_links: 0,
            total_anchors_removed: 0,
            snapshots_created: 0,
            restored_from_snapshot: 0,
            changes: Vec::new(),
        }
    }
}

/// Resolve `scope` to concrete post ids.
///
/// A single selected post must carry tags; otherwise nothing is touched and
/// `NoTags` is returned.
pub fn resolve_scope<R: ContentRepository>(repository: &R, scope: &Scope) -> Result<Vec<PostId>> {
    if let Scope::Post(id) = scope {
        if repository.tags_for(*id)?.is_empty() {
            warn!(post = %id, "selected post has no tags");
            return Err(LinkerError::NoTags(*id));
        }
    }

    repository.list_posts(scope)
}

/// Run `action` once for each post in `scope`.
///
/// Posts are processed in order and independently; the first error stops the
/// batch, leaving already processed posts as they are.
pub fn run_batch<R, S, C>(
    linker: &mut TagLinker<R, S, C>,
    action: Action,
    scope: &Scope,
) -> Result<BatchReport>
where
    R: ContentRepository,
    S: SnapshotStore,
    C: CandidateSelector,
{
    let post_ids = resolve_scope(linker.repository(), scope)?;
    info!(%action, %scope, posts = post_ids.len(), "starting batch");

    let mut report = BatchReport::new(action, scope.clone(), post_ids.len());

    for post_id in post_ids {
        let change = match action {
            Action::Apply => {
                let outcome = linker.apply(post_id)?;
                if outcome.snapshot_created {
                    report.snapshots_created += 1;
                }
                outcome.changed.then(|| PostChange {
                    post_id,
                    links_inserted: outcome.links.len(),
                    anchors_removed: 0,
                    from_snapshot: false,
                })
            }
            Action::Restore => {
                let outcome = linker.restore(post_id)?;
                let from_snapshot = outcome.source == RestoreSource::Snapshot;
                if from_snapshot {
                    report.restored_from_snapshot += 1;
                }
                outcome.changed.then_some(PostChange {
                    post_id,
                    links_inserted: 0,
                    anchors_removed: outcome.anchors_removed,
                    from_snapshot,
                })
            }
        };

        if let Some(change) = change {
            report.total_links += change.links_inserted;
            report.total_anchors_removed += change.anchors_removed;
            report.changes.push(change);
        }
    }

    report.changed_posts = report.changes.len();
    Ok(report)
}
