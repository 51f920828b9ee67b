//! `tagdraw export` command - write the store to a pack file
//!
//! Selectors are written in the normalized shape: one association row per
//! tag, carrying the tag name as the portable key.

use std::fs::File;
use std::io::Write;

use serde_json::json;

use crate::cli::ExportArgs;
use crate::commands::dispatch::CommandContext;
use crate::commands::format::{output_by_format_result, print_json_status};
use crate::commands::pack::{Pack, PackCategory, PackQuestion, PACK_VERSION};
use tagdraw_core::bank::{SelectorStore, TagStore};
use tagdraw_core::error::{Result, TagdrawError};
use tagdraw_core::import::{NormalizedTagRow, RawSelectorRecord};
use tagdraw_core::store::Store;

pub fn execute(ctx: &CommandContext, args: &ExportArgs) -> Result<()> {
    let store = ctx.discover_or_open_store()?;
    let pack = build_pack(&store)?;
    let content = serde_json::to_string_pretty(&pack)?;

    let cli = ctx.cli;
    match &args.output {
        None => {
            println!("{}", content);
            Ok(())
        }
        Some(path) => {
            let mut file = File::create(path).map_err(|e| {
                TagdrawError::Other(format!("failed to create {}: {}", path.display(), e))
            })?;
            file.write_all(content.as_bytes())?;
            file.write_all(b"\n")?;

            output_by_format_result!(cli.format,
                json => print_json_status(
                    "ok",
                    None,
                    &[
                        ("output", json!(path.display().to_string())),
                        ("categories", json!(pack.categories.len())),
                        ("questions", json!(pack.questions.len())),
                        ("selectors", json!(pack.selectors.len())),
                    ],
                ),
                human => {
                    if !cli.quiet {
                        println!(
                            "Exported {} categories, {} questions, {} selectors to {}",
                            pack.categories.len(),
                            pack.questions.len(),
                            pack.selectors.len(),
                            path.display()
                        );
                    }
                }
            )
        }
    }
}

fn build_pack(store: &Store) -> Result<Pack> {
    let db = store.db();

    let categories: Vec<PackCategory> = db.categories()?.into_iter().map(Into::into).collect();
    let questions: Vec<PackQuestion> = db.questions()?.into_iter().map(Into::into).collect();

    let mut selectors = Vec::new();
    for id in db.selector_ids()? {
        let Some(config) = db.load_selector(id)? else {
            continue;
        };
        let mut associations = Vec::new();
        for row in db.tag_associations(id)? {
            associations.push(NormalizedTagRow {
                tag_id: row.tag_id,
                included: row.included,
                name: db.name_of(row.tag_id)?,
            });
        }
        let record = RawSelectorRecord {
            question_id: id,
            category_id: config.category_id,
            include_subcategories: Some(config.include_subcategories),
            include_mode: Some(config.include_mode.code()),
            associations: Some(associations),
            ..Default::default()
        };
        selectors.push(serde_json::to_value(record)?);
    }

    tracing::debug!(
        categories = categories.len(),
        questions = questions.len(),
        selectors = selectors.len(),
        "pack built"
    );

    Ok(Pack {
        version: PACK_VERSION.to_string(),
        created: Some(chrono::Utc::now()),
        categories,
        questions,
        selectors,
    })
}
