//! Application layer - Use cases and orchestration

pub mod batch;
pub mod density_report;
pub mod init;
pub mod link_tags;
pub mod list_posts;
pub mod manage_config;

pub use batch::{resolve_scope, run_batch, BatchReport, PostChange};
pub use density_report::{density_report, TagDensity};
pub use init::InitService;
pub use link_tags::{
    ApplyOutcome, InsertedLink, LinkerOptions, RestoreOutcome, RestoreSource, TagLinker,
};
pub use list_posts::{list_posts, PostSummary};
pub use manage_config::ConfigService;
