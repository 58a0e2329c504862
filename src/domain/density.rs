//! Keyword density estimation

use crate::error::{LinkerError, Result};
use regex::Regex;
use std::sync::OnceLock;

fn word_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    // A word starts with a letter and may contain apostrophes and hyphens.
    REGEX.get_or_init(|| Regex::new(r"\p{Alphabetic}[\p{Alphabetic}'-]*").unwrap())
}

/// Count the words in `text`.
///
/// Markup is not stripped: tag and attribute names count as words.
pub fn word_count(text: &str) -> usize {
    word_regex().find_iter(text).count()
}

/// Count case-insensitive, non-overlapping substring occurrences of `keyword`.
///
/// Matching is substring based, so "cat" is also counted inside "category".
pub fn keyword_occurrences(text: &str, keyword: &str) -> usize {
    if keyword.is_empty() {
        return 0;
    }

    text.to_lowercase().matches(&keyword.to_lowercase()).count()
}

/// Percentage of the word count of `text` taken by occurrences of `keyword`.
///
/// # Errors
///
/// Returns [`LinkerError::UndefinedDensity`] when `text` contains no words.
pub fn keyword_density(text: &str, keyword: &str) -> Result<f64> {
    let words = word_count(text);
    if words == 0 {
        return Err(LinkerError::UndefinedDensity {
            keyword: keyword.to_string(),
        });
    }

    Ok(keyword_occurrences(text, keyword) as f64 / words as f64 * 100.0)
}

/// Number of links to attempt for a tag with the given density.
///
/// Any positive density up to 100% yields one attempt. Higher densities,
/// which only happen when occurrences outnumber words, yield more.
pub fn link_quota(density: f64) -> usize {
    (density / 100.0).ceil().max(0.0) as usize
}
