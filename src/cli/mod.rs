//! CLI layer - Command-line interface

pub mod commands;
pub mod output;

pub use commands::{Cli, Commands, ScopeArgs};
pub use output::{format_batch_report, format_density_report, format_post_list};
