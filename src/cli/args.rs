use clap::{Args, Subcommand};
use std::path::PathBuf;

use super::parse::parse_include_mode;
use tagdraw_core::model::IncludeMode;

#[derive(Subcommand, Debug)]
pub enum CategoryCommands {
    /// Create a category
    Add {
        /// Category name
        name: String,

        /// Parent category id
        #[arg(long)]
        parent: Option<i64>,
    },

    /// List categories
    List,
}

#[derive(Subcommand, Debug)]
pub enum QuestionCommands {
    /// Add a question to the bank
    Add(QuestionAddArgs),

    /// List questions
    List,
}

#[derive(Args, Debug, Clone)]
pub struct QuestionAddArgs {
    /// Question name
    pub name: String,

    /// Category id
    #[arg(long, short)]
    pub category: i64,

    /// Question kind (see `tagdraw kinds`)
    #[arg(long, short, default_value = "multichoice")]
    pub kind: String,

    /// Question text
    #[arg(long, default_value = "")]
    pub text: String,

    /// Tags (can be specified multiple times)
    #[arg(long, short, action = clap::ArgAction::Append)]
    pub tag: Vec<String>,

    /// Hide the question from selection
    #[arg(long)]
    pub hidden: bool,

    /// Parent question id (makes this a sub-question)
    #[arg(long)]
    pub parent: Option<i64>,
}

#[derive(Subcommand, Debug)]
pub enum SelectorCommands {
    /// Create a selector
    Add(SelectorAddArgs),

    /// Show a selector's configuration
    Show {
        /// Selector id
        id: i64,
    },

    /// Delete a selector
    Delete {
        /// Selector id
        id: i64,
    },

    /// List selectors
    List,
}

#[derive(Args, Debug, Clone)]
pub struct SelectorAddArgs {
    /// Category to draw from
    #[arg(long, short)]
    pub category: i64,

    /// Also draw from every subcategory
    #[arg(long)]
    pub subcategories: bool,

    /// Include mode: any or all (defaults to the store setting)
    #[arg(long, value_parser = parse_include_mode)]
    pub mode: Option<IncludeMode>,

    /// Tag names to include (can be specified multiple times)
    #[arg(long, action = clap::ArgAction::Append)]
    pub include: Vec<String>,

    /// Tag names to exclude (can be specified multiple times)
    #[arg(long, action = clap::ArgAction::Append)]
    pub exclude: Vec<String>,
}

#[derive(Args, Debug, Clone)]
pub struct TagsArgs {
    /// Only tags used in this category
    #[arg(long, short)]
    pub category: Option<i64>,

    /// Include subcategories of --category
    #[arg(long, requires = "category")]
    pub subcategories: bool,
}

#[derive(Args, Debug, Clone)]
pub struct PoolArgs {
    /// Selector id
    pub selector: i64,
}

#[derive(Args, Debug, Clone)]
pub struct PickArgs {
    /// Selector id
    pub selector: i64,

    /// Question ids that must not be picked (can be specified multiple times)
    #[arg(long, action = clap::ArgAction::Append)]
    pub exclude: Vec<i64>,

    /// Pin the result to this pool member
    #[arg(long)]
    pub force: Option<i64>,

    /// Seed for a reproducible draw
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Args, Debug, Clone)]
pub struct ManualCheckArgs {
    /// Selector id
    pub selector: i64,

    /// Question ids already used elsewhere (can be specified multiple times)
    #[arg(long, action = clap::ArgAction::Append)]
    pub in_use: Vec<i64>,
}

#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    /// Output file (stdout if omitted)
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct ImportArgs {
    /// Pack file to import
    pub file: PathBuf,
}
