//! `tagdraw pool`, `tagdraw pick` and `tagdraw manual-check`
//!
//! All three work on a saved selector.

use std::collections::BTreeSet;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;

use crate::cli::{ManualCheckArgs, PickArgs, PoolArgs};
use crate::commands::dispatch::CommandContext;
use crate::commands::format::{output_by_format_result, print_json};
use tagdraw_core::bank::SelectorStore;
use tagdraw_core::error::{Result, TagdrawError};
use tagdraw_core::naming;

pub fn execute_pool(ctx: &CommandContext, args: &PoolArgs) -> Result<()> {
    let store = ctx.discover_or_open_store()?;
    let pool = store.selector().build_pool_for(args.selector)?;
    tracing::debug!(elapsed = ?ctx.start.elapsed(), size = pool.len(), "build_pool");

    let cli = ctx.cli;
    output_by_format_result!(cli.format,
        json => print_json(&json!({
            "selector_id": args.selector,
            "size": pool.len(),
            "questions": pool,
        })),
        human => {
            if pool.is_empty() && !cli.quiet {
                println!("Pool of selector {} is empty", args.selector);
            }
            for id in pool.iter() {
                println!("{}", id);
            }
        }
    )
}

pub fn execute_pick(ctx: &CommandContext, args: &PickArgs) -> Result<()> {
    let store = ctx.discover_or_open_store()?;
    let db = store.db();
    let excluded: BTreeSet<_> = args.exclude.iter().copied().collect();

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let picked = store
        .selector()
        .pick(args.selector, &excluded, args.force, &mut rng)?;

    let selector_name = db
        .question(args.selector)?
        .map(|q| q.name)
        .unwrap_or_default();
    let picked_name = match picked {
        Some(id) => db
            .question(id)?
            .map(|q| naming::selected_name(&q.name, &selector_name)),
        None => None,
    };

    let cli = ctx.cli;
    output_by_format_result!(cli.format,
        json => print_json(&json!({
            "selector_id": args.selector,
            "question_id": picked,
            "name": picked_name,
        })),
        human => {
            match (picked, &picked_name) {
                (Some(id), Some(name)) if !cli.quiet => println!("{}\t{}", id, name),
                (Some(id), _) => println!("{}", id),
                (None, _) => {
                    if !cli.quiet {
                        println!("No question available for selector {}", args.selector);
                    }
                }
            }
        }
    )
}

pub fn execute_manual_check(ctx: &CommandContext, args: &ManualCheckArgs) -> Result<()> {
    let store = ctx.discover_or_open_store()?;
    let config = store
        .db()
        .load_selector(args.selector)?
        .ok_or(TagdrawError::SelectorNotFound { id: args.selector })?;
    let in_use: BTreeSet<_> = args.in_use.iter().copied().collect();

    let manual = store
        .selector()
        .may_require_manual_grading(&config, &in_use)?;

    let cli = ctx.cli;
    output_by_format_result!(cli.format,
        json => print_json(&json!({
            "selector_id": args.selector,
            "may_require_manual_grading": manual,
        })),
        human => {
            if cli.quiet {
                println!("{}", manual);
            } else if manual {
                println!("Selector {} may draw a manually graded question", args.selector);
            } else {
                println!("Selector {} only draws automatically graded questions", args.selector);
            }
        }
    )
}
