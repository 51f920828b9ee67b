//! CLI argument parsing for tagdraw
//!
//! Global flags: --store, --format, --quiet, --verbose, --log-level, --log-json

pub mod args;
pub mod format;
pub mod parse;
pub mod paths;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use args::{
    CategoryCommands, ExportArgs, ImportArgs, ManualCheckArgs, PickArgs, PoolArgs,
    QuestionCommands, SelectorCommands, TagsArgs,
};
use parse::parse_output_format;
pub use tagdraw_core::format::OutputFormat;

/// Tagdraw - tag-filtered random question selection
#[derive(Parser, Debug)]
#[command(name = "tagdraw")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Explicit store root path
    #[arg(long, global = true, env = "TAGDRAW_STORE")]
    pub store: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_parser = parse_output_format)]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Report timing for major phases
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log level (error, warn, info, debug, trace) or a full filter directive
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new tagdraw store
    Init,

    /// Manage question categories
    Category {
        #[command(subcommand)]
        command: CategoryCommands,
    },

    /// Manage bank questions
    Question {
        #[command(subcommand)]
        command: QuestionCommands,
    },

    /// Manage random-with-tags selectors
    Selector {
        #[command(subcommand)]
        command: SelectorCommands,
    },

    /// List tags, optionally only those used in a category
    Tags(TagsArgs),

    /// Show which question kinds are forbidden or manually graded
    Kinds,

    /// Show the candidate pool of a selector
    Pool(PoolArgs),

    /// Randomly pick a question for a selector
    Pick(PickArgs),

    /// Check whether a selector may draw a manually graded question
    ManualCheck(ManualCheckArgs),

    /// Export categories, questions and selectors to a pack file
    Export(ExportArgs),

    /// Import a pack file, remapping ids into this store
    Import(ImportArgs),
}
