//! CLI command definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "taglinker")]
#[command(about = "Link tag keywords in blog posts to related posts", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Which posts to process. Exactly one must be given.
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct ScopeArgs {
    /// A single post id
    #[arg(long, value_name = "ID")]
    pub post: Option<u64>,

    /// Every post in a category
    #[arg(long, value_name = "NAME")]
    pub category: Option<String>,

    /// Every post of the site
    #[arg(long)]
    pub all: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new site
    Init {
        /// Directory to initialize (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Prefix used to build post permalinks
        #[arg(long, default_value = "http://localhost")]
        base_url: String,
    },

    /// Insert links for the tags of the selected posts
    Apply {
        #[command(flatten)]
        scope: ScopeArgs,

        /// Seed for candidate shuffling, for reproducible runs
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Remove inserted links and restore original content
    Restore {
        #[command(flatten)]
        scope: ScopeArgs,
    },

    /// Show keyword density and link quota per tag of a post
    Density {
        /// Post id
        id: u64,
    },

    /// List posts with their tags and link state
    List {
        /// Only posts in this category
        #[arg(long, value_name = "NAME")]
        category: Option<String>,
    },

    /// View or modify configuration
    Config {
        /// Config key to get or set
        key: Option<String>,

        /// Value to set (if provided, sets the key)
        value: Option<String>,

        /// List all configuration
        #[arg(short, long)]
        list: bool,
    },
}
