//! `tagdraw question` commands

use serde_json::json;

use crate::cli::args::QuestionAddArgs;
use crate::cli::QuestionCommands;
use crate::commands::dispatch::CommandContext;
use crate::commands::format::{output_by_format_result, print_json, print_json_status};
use tagdraw_core::bail_usage;
use tagdraw_core::db::NewQuestion;
use tagdraw_core::error::{Result, TagdrawError};
use tagdraw_core::kinds::SELECTOR_KIND;

pub fn execute(ctx: &CommandContext, command: &QuestionCommands) -> Result<()> {
    match command {
        QuestionCommands::Add(args) => execute_add(ctx, args),
        QuestionCommands::List => execute_list(ctx),
    }
}

fn execute_add(ctx: &CommandContext, args: &QuestionAddArgs) -> Result<()> {
    if args.kind == SELECTOR_KIND {
        bail_usage!("selector questions are created with `tagdraw selector add`");
    }

    let store = ctx.discover_or_open_store()?;
    let db = store.db();
    let cli = ctx.cli;

    if let Some(parent) = args.parent {
        if db.question(parent)?.is_none() {
            return Err(TagdrawError::not_found("question", parent));
        }
    }

    let question = NewQuestion {
        category_id: args.category,
        name: args.name.clone(),
        kind: args.kind.clone(),
        text: args.text.clone(),
        hidden: args.hidden,
        parent_id: args.parent.unwrap_or(0),
    };
    let id = db.create_question(&question, &args.tag)?;

    output_by_format_result!(cli.format,
        json => print_json_status(
            "ok",
            None,
            &[("id", json!(id)), ("kind", json!(args.kind)), ("tags", json!(args.tag))],
        ),
        human => {
            if cli.quiet {
                println!("{}", id);
            } else {
                println!("Created question {} ({})", id, args.name);
            }
        }
    )
}

fn execute_list(ctx: &CommandContext) -> Result<()> {
    let store = ctx.discover_or_open_store()?;
    let questions = store.db().questions()?;
    let cli = ctx.cli;

    output_by_format_result!(cli.format,
        json => {
            let rows: Vec<_> = questions
                .iter()
                .map(|q| {
                    json!({
                        "id": q.id,
                        "category_id": q.category_id,
                        "name": q.name,
                        "kind": q.kind,
                        "hidden": q.hidden,
                        "parent_id": q.parent_id,
                        "tags": q.tags,
                    })
                })
                .collect();
            print_json(&rows)
        },
        human => {
            if questions.is_empty() && !cli.quiet {
                println!("No questions");
            }
            for q in &questions {
                let mut flags = Vec::new();
                if q.hidden {
                    flags.push("hidden".to_string());
                }
                if q.parent_id != 0 && q.parent_id != q.id {
                    flags.push(format!("child of {}", q.parent_id));
                }
                let suffix = if flags.is_empty() {
                    String::new()
                } else {
                    format!(" [{}]", flags.join(", "))
                };
                println!(
                    "{}\t{}\t{}\t{}{}\t{}",
                    q.id,
                    q.category_id,
                    q.kind,
                    q.name,
                    suffix,
                    q.tags.join(",")
                );
            }
        }
    )
}
