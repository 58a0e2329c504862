//! Infrastructure layer - External I/O and persistence

pub mod config;
pub mod content;
pub mod memory;
pub mod repository;
pub mod snapshot;

pub use config::Config;
pub use content::SiteContent;
pub use memory::{InMemoryRepository, InMemorySnapshotStore};
pub use repository::{ContentRepository, FileSystemRepository, SiteRepository};
pub use snapshot::{FileSnapshotStore, SnapshotStore};
