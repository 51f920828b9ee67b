//! `tagdraw selector` commands

use serde_json::json;

use crate::cli::args::SelectorAddArgs;
use crate::cli::SelectorCommands;
use crate::commands::dispatch::CommandContext;
use crate::commands::format::{output_by_format_result, print_json, print_json_status};
use tagdraw_core::bank::SelectorStore;
use tagdraw_core::error::{Result, TagdrawError};
use tagdraw_core::model::{SelectorConfig, SelectorId};
use tagdraw_core::store::Store;
use tagdraw_core::tags::TagResolver;

pub fn execute(ctx: &CommandContext, command: &SelectorCommands) -> Result<()> {
    let store = ctx.discover_or_open_store()?;
    match command {
        SelectorCommands::Add(args) => execute_add(ctx, &store, args),
        SelectorCommands::Show { id } => execute_show(ctx, &store, *id),
        SelectorCommands::Delete { id } => execute_delete(ctx, &store, *id),
        SelectorCommands::List => execute_list(ctx, &store),
    }
}

fn execute_add(ctx: &CommandContext, store: &Store, args: &SelectorAddArgs) -> Result<()> {
    let db = store.db();
    if db.category(args.category)?.is_none() {
        return Err(TagdrawError::not_found("category", args.category));
    }

    let resolver = TagResolver::new(db, db);
    let config = SelectorConfig::new(args.category)
        .with_subcategories(args.subcategories)
        .with_mode(args.mode.unwrap_or(store.config().default_include_mode))
        .with_include_tags(resolver.resolve_names(&args.include)?)
        .with_exclude_tags(resolver.resolve_names(&args.exclude)?);

    let id = db.create_selector_question(args.category, args.subcategories)?;
    db.save_selector(id, &config)?;
    let name = db
        .question(id)?
        .map(|q| q.name)
        .unwrap_or_default();

    let cli = ctx.cli;
    output_by_format_result!(cli.format,
        json => print_json_status("ok", None, &[("id", json!(id)), ("name", json!(name))]),
        human => {
            if cli.quiet {
                println!("{}", id);
            } else {
                println!("Created selector {}: {}", id, name);
            }
        }
    )
}

/// Saved config of `id` with tag names resolved, as shown and listed
fn describe(store: &Store, id: SelectorId) -> Result<serde_json::Value> {
    let db = store.db();
    let config = db
        .load_selector(id)?
        .ok_or(TagdrawError::SelectorNotFound { id })?;
    let resolver = TagResolver::new(db, db);
    let name = db.question(id)?.map(|q| q.name).unwrap_or_default();

    Ok(json!({
        "id": id,
        "name": name,
        "category_id": config.category_id,
        "include_subcategories": config.include_subcategories,
        "include_mode": config.include_mode,
        "include_tags": resolver.names_of(&config.include_tags)?,
        "exclude_tags": resolver.names_of(&config.exclude_tags)?,
    }))
}

fn execute_show(ctx: &CommandContext, store: &Store, id: SelectorId) -> Result<()> {
    let selector = describe(store, id)?;
    let cli = ctx.cli;

    output_by_format_result!(cli.format,
        json => print_json(&selector),
        human => {
            println!("Selector {}: {}", id, selector["name"].as_str().unwrap_or(""));
            println!("  category:      {}", selector["category_id"]);
            println!("  subcategories: {}", selector["include_subcategories"]);
            println!("  mode:          {}", selector["include_mode"].as_str().unwrap_or("any"));
            println!("  include:       {}", join_names(&selector["include_tags"]));
            println!("  exclude:       {}", join_names(&selector["exclude_tags"]));
        }
    )
}

fn execute_delete(ctx: &CommandContext, store: &Store, id: SelectorId) -> Result<()> {
    if !store.db().delete_selector(id)? {
        return Err(TagdrawError::SelectorNotFound { id });
    }

    let cli = ctx.cli;
    output_by_format_result!(cli.format,
        json => print_json_status("ok", Some("Selector deleted"), &[("id", json!(id))]),
        human => {
            if !cli.quiet {
                println!("Deleted selector {}", id);
            }
        }
    )
}

fn execute_list(ctx: &CommandContext, store: &Store) -> Result<()> {
    let selectors = store
        .db()
        .selector_ids()?
        .into_iter()
        .map(|id| describe(store, id))
        .collect::<Result<Vec<_>>>()?;
    let cli = ctx.cli;

    output_by_format_result!(cli.format,
        json => print_json(&selectors),
        human => {
            if selectors.is_empty() && !cli.quiet {
                println!("No selectors");
            }
            for selector in &selectors {
                println!(
                    "{}\t{}\t{}",
                    selector["id"],
                    selector["category_id"],
                    selector["name"].as_str().unwrap_or("")
                );
            }
        }
    )
}

fn join_names(names: &serde_json::Value) -> String {
    let joined = names
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|v| v.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        })
        .unwrap_or_default();
    if joined.is_empty() {
        "-".to_string()
    } else {
        joined
    }
}
