//! Domain layer - Business logic and domain models

pub mod density;
pub mod linking;
pub mod post;
pub mod scope;
pub mod selection;

pub use density::{keyword_density, keyword_occurrences, link_quota, word_count};
pub use linking::{
    escape_attribute, link_first_occurrence, Anchor, KeywordMatcher, MarkerAnchors, StripResult,
    DEFAULT_MARKER_CLASS,
};
pub use post::{CategoryId, Post, PostId, Tag, TagId};
pub use scope::{Action, Scope};
pub use selection::{CandidateSelector, RandomSelector, StableSelector};
