//! taglinker - Automatic tag cross-linking for blog posts
//!
//! Wraps occurrences of a post's tag names in links to other posts sharing
//! the tag, keeps the original body so the links can be taken out again, and
//! ships a file system site layout with a command-line front end.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::LinkerError;
