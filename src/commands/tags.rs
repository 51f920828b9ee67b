//! `tagdraw tags` command - list tags

use crate::cli::TagsArgs;
use crate::commands::dispatch::CommandContext;
use crate::commands::format::{output_by_format_result, print_json};
use tagdraw_core::error::{Result, TagdrawError};
use tagdraw_core::tags::TagResolver;

pub fn execute(ctx: &CommandContext, args: &TagsArgs) -> Result<()> {
    let store = ctx.discover_or_open_store()?;
    let db = store.db();

    let tags = match args.category {
        Some(category) => {
            if db.category(category)?.is_none() {
                return Err(TagdrawError::not_found("category", category));
            }
            TagResolver::new(db, db).tags_in_category(category, args.subcategories)?
        }
        None => db.all_tags()?,
    };

    let cli = ctx.cli;
    output_by_format_result!(cli.format,
        json => print_json(&tags),
        human => {
            if tags.is_empty() && !cli.quiet {
                println!("No tags");
            }
            for tag in &tags {
                println!("{}\t{}", tag.id, tag.name);
            }
        }
    )
}
