//! `tagdraw category` commands

use serde_json::json;

use crate::cli::CategoryCommands;
use crate::commands::dispatch::CommandContext;
use crate::commands::format::{output_by_format_result, print_json, print_json_status};
use tagdraw_core::error::Result;

pub fn execute(ctx: &CommandContext, command: &CategoryCommands) -> Result<()> {
    let store = ctx.discover_or_open_store()?;
    let db = store.db();
    let cli = ctx.cli;

    match command {
        CategoryCommands::Add { name, parent } => {
            let id = db.create_category(name, *parent)?;
            output_by_format_result!(cli.format,
                json => print_json_status("ok", None, &[("id", json!(id)), ("name", json!(name))]),
                human => {
                    if cli.quiet {
                        println!("{}", id);
                    } else {
                        println!("Created category {} ({})", id, name);
                    }
                }
            )
        }
        CategoryCommands::List => {
            let categories = db.categories()?;
            output_by_format_result!(cli.format,
                json => print_json(&categories),
                human => {
                    if categories.is_empty() && !cli.quiet {
                        println!("No categories");
                    }
                    for category in &categories {
                        match category.parent_id {
                            Some(parent) => println!("{}\t{}\t(parent {})", category.id, category.name, parent),
                            None => println!("{}\t{}", category.id, category.name),
                        }
                    }
                }
            )
        }
    }
}
