//! HTML link insertion and marker-anchor stripping.
//!
//! Insertion works on the text between markup: element tags, comments and
//! whole `<a>...</a>` elements are excluded, and only the first keyword match
//! in the remaining text is wrapped in an anchor.

use crate::error::{LinkerError, Result};
use regex::{Regex, RegexBuilder};
use std::borrow::Cow;
use std::ops::Range;
use std::sync::OnceLock;

/// Default CSS class carried by every inserted anchor
pub const DEFAULT_MARKER_CLASS: &str = "tag-linker";

fn markup_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"(?s)<!--.*?-->|<[^>]*>").unwrap())
}

fn anchor_open_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"(?i)^<a(?:\s|>)").unwrap())
}

fn anchor_close_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"(?i)^</a\s*>").unwrap())
}

/// Case-insensitive matcher for a tag name in body text
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    regex: Regex,
}

impl KeywordMatcher {
    /// Build a matcher for `keyword`.
    ///
    /// With `whole_words`, a match may not be glued to surrounding word characters.
    pub fn new(keyword: &str, whole_words: bool) -> Result<Self> {
        let mut pattern = regex::escape(keyword);
        if whole_words {
            if keyword.chars().next().is_some_and(is_word_char) {
                pattern.insert_str(0, r"\b");
            }
            if keyword.chars().last().is_some_and(is_word_char) {
                pattern.push_str(r"\b");
            }
        }

        let regex = RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| LinkerError::Config(format!("Invalid keyword '{}': {}", keyword, e)))?;

        Ok(KeywordMatcher { regex })
    }
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// Attributes of an anchor to insert
#[derive(Debug, Clone, Copy)]
pub struct Anchor<'a> {
    pub href: &'a str,
    pub class: &'a str,
}

impl Anchor<'_> {
    fn wrap(&self, text: &str) -> String {
        format!(
            r#"<a href="{}" class="{}">{}</a>"#,
            escape_attribute(self.href),
            escape_attribute(self.class),
            text
        )
    }
}

/// Escape a value for use inside a double-quoted HTML attribute
pub fn escape_attribute(value: &str) -> Cow<'_, str> {
    if !value.contains(['&', '"', '<', '>']) {
        return Cow::Borrowed(value);
    }

    let mut escaped = String::with_capacity(value.len() + 8);
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(ch),
        }
    }
    Cow::Owned(escaped)
}

/// Wrap the first keyword occurrence found outside markup and existing anchors.
///
/// The anchor text keeps the casing of the matched occurrence. Returns `None`
/// when no eligible occurrence exists.
pub fn link_first_occurrence(
    html: &str,
    matcher: &KeywordMatcher,
    anchor: &Anchor<'_>,
) -> Option<String> {
    let mut cursor = 0usize;

    for range in excluded_ranges(html) {
        if range.start > cursor {
            if let Some(linked) = link_in_chunk(html, cursor..range.start, matcher, anchor) {
                return Some(linked);
            }
        }
        cursor = range.end;
    }

    if cursor < html.len() {
        return link_in_chunk(html, cursor..html.len(), matcher, anchor);
    }

    None
}

fn link_in_chunk(
    html: &str,
    chunk: Range<usize>,
    matcher: &KeywordMatcher,
    anchor: &Anchor<'_>,
) -> Option<String> {
    let found = matcher.regex.find(&html[chunk.clone()])?;
    let start = chunk.start + found.start();
    let end = chunk.start + found.end();

    let mut linked = String::with_capacity(html.len() + anchor.href.len() + 32);
    linked.push_str(&html[..start]);
    linked.push_str(&anchor.wrap(found.as_str()));
    linked.push_str(&html[end..]);
    Some(linked)
}

/// Byte ranges that must never be rewritten: tags, comments and anchor elements.
fn excluded_ranges(html: &str) -> Vec<Range<usize>> {
    let mut ranges = Vec::new();
    let mut anchor_start: Option<usize> = None;

    for token in markup_regex().find_iter(html) {
        let text = token.as_str();

        if anchor_open_regex().is_match(text) {
            anchor_start.get_or_insert(token.start());
        } else if anchor_close_regex().is_match(text) {
            if let Some(start) = anchor_start.take() {
                ranges.push(start..token.end());
                continue;
            }
        }

        if anchor_start.is_none() {
            ranges.push(token.range());
        }
    }

    // An unclosed anchor swallows the rest of the document.
    if let Some(start) = anchor_start {
        ranges.push(start..html.len());
    }

    ranges
}

/// Result of stripping marker anchors from a body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StripResult {
    pub content: String,
    pub removed: usize,
}

/// Recognizes anchors carrying the marker class
#[derive(Debug, Clone)]
pub struct MarkerAnchors {
    class: String,
    regex: Regex,
}

impl MarkerAnchors {
    pub fn new(class: &str) -> Result<Self> {
        let pattern = format!(
            r#"(?i)<a\s+[^>]*class="{}"[^>]*>(.*?)</a>"#,
            regex::escape(class)
        );
        let regex = Regex::new(&pattern)
            .map_err(|e| LinkerError::Config(format!("Invalid marker class '{}': {}", class, e)))?;

        Ok(MarkerAnchors {
            class: class.to_string(),
            regex,
        })
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn count(&self, html: &str) -> usize {
        self.regex.find_iter(html).count()
    }

    /// Replace every marker anchor with its inner text, leaving other markup alone.
    pub fn strip(&self, html: &str) -> StripResult {
        let removed = self.count(html);
        if removed == 0 {
            return StripResult {
                content: html.to_string(),
                removed,
            };
        }

        StripResult {
            content: self.regex.replace_all(html, "${1}").into_owned(),
            removed,
        }
    }
}
