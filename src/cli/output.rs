//! Output formatting utilities

use crate::application::{BatchReport, PostSummary, TagDensity};
use crate::domain::Action;

/// Format the result notice of a batch
pub fn format_batch_report(report: &BatchReport) -> String {
    let mut output = String::new();

    match report.action {
        Action::Apply => {
            for change in &report.changes {
                output.push_str(&format!(
                    "post {}: {} link(s) inserted\n",
                    change.post_id, change.links_inserted
                ));
            }
            output.push_str(&format!(
                "Links inserted: {} link(s) in {} of {} post(s) ({}).",
                report.total_links, report.changed_posts, report.scanned_posts, report.scope
            ));
        }
        Action::Restore => {
            for change in &report.changes {
                let source = if change.from_snapshot {
                    "snapshot"
                } else {
                    "live body"
                };
                output.push_str(&format!(
                    "post {}: {} link(s) removed (from {})\n",
                    change.post_id, change.anchors_removed, source
                ));
            }
            output.push_str(&format!(
                "Original content restored: {} of {} post(s) changed ({}).",
                report.changed_posts, report.scanned_posts, report.scope
            ));
        }
    }

    output
}

/// Format a density report for display
pub fn format_density_report(rows: &[TagDensity]) -> String {
    if rows.is_empty() {
        return "Post has no tags".to_string();
    }

    let mut output = String::new();
    for row in rows {
        let density = row
            .density
            .map(|d| format!("{:.2}%", d))
            .unwrap_or_else(|| "undefined".to_string());
        let quota = row
            .quota
            .map(|q| q.to_string())
            .unwrap_or_else(|| "-".to_string());
        output.push_str(&format!(
            "{}  occurrences={} words={} density={} quota={} related={}\n",
            row.tag, row.occurrences, row.words, density, quota, row.related_posts
        ));
    }
    output
}

/// Format a list of posts for display
pub fn format_post_list(posts: &[PostSummary]) -> String {
    if posts.is_empty() {
        return "No posts found".to_string();
    }

    let mut output = String::new();
    for post in posts {
        let tags = if post.tags.is_empty() {
            "-".to_string()
        } else {
            post.tags.join(", ")
        };
        let snapshot = if post.has_snapshot { "  [snapshot]" } else { "" };
        output.push_str(&format!(
            "{:>5}  {}  tags: {}  links: {}{}\n",
            post.id, post.title, tags, post.linked, snapshot
        ));
    }
    output
}
