//! `tagdraw import` command - load a pack file into this store
//!
//! Categories, questions and selectors are recreated with fresh local ids.
//! Order matters: categories (parents first), then top-level questions, then
//! sub-questions (parents first), then selectors, which need both mappings.
//! Tags are matched by name throughout. A failed import leaves the store
//! unchanged.

use std::path::Path;

use serde_json::json;

use crate::cli::ImportArgs;
use crate::commands::dispatch::CommandContext;
use crate::commands::format::{output_by_format_result, print_json_status};
use crate::commands::pack::{Pack, PackCategory, PackQuestion, PACK_VERSION};
use tagdraw_core::db::{Database, NewQuestion};
use tagdraw_core::error::{Result, TagdrawError};
use tagdraw_core::import::{IdMapping, MappedEntity, SelectorRecord};
use tagdraw_core::kinds::SELECTOR_KIND;
use tagdraw_core::model::QuestionId;
use tagdraw_core::store::Store;

/// Counts reported after an import
#[derive(Debug, Default)]
struct ImportSummary {
    categories: usize,
    questions: usize,
    selectors: usize,
    placeholders_fixed: usize,
}

pub fn execute(ctx: &CommandContext, args: &ImportArgs) -> Result<()> {
    let store = ctx.discover_or_open_store()?;
    let pack = read_pack(&args.file)?;
    let summary = import_pack(&store, &pack)?;
    tracing::debug!(elapsed = ?ctx.start.elapsed(), "import");

    let cli = ctx.cli;
    output_by_format_result!(cli.format,
        json => print_json_status(
            "ok",
            None,
            &[
                ("categories", json!(summary.categories)),
                ("questions", json!(summary.questions)),
                ("selectors", json!(summary.selectors)),
                ("placeholders_fixed", json!(summary.placeholders_fixed)),
            ],
        ),
        human => {
            if !cli.quiet {
                println!(
                    "Imported {} categories, {} questions, {} selectors",
                    summary.categories, summary.questions, summary.selectors
                );
            }
        }
    )
}

fn read_pack(path: &Path) -> Result<Pack> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| TagdrawError::Other(format!("failed to read pack file: {}", e)))?;
    let pack: Pack = serde_json::from_str(&content)?;
    if pack.version != PACK_VERSION {
        return Err(TagdrawError::invalid_value(
            "pack version",
            format!("{} (supported: {})", pack.version, PACK_VERSION),
        ));
    }
    Ok(pack)
}

/// Load `pack` as one job: nothing is kept unless every record imports
fn import_pack(store: &Store, pack: &Pack) -> Result<ImportSummary> {
    let records = pack
        .selectors
        .iter()
        .map(|value| SelectorRecord::from_json(value.clone()))
        .collect::<Result<Vec<_>>>()?;

    let summary = store.db().with_savepoint("import_pack", |db| {
        let mut mapping = IdMapping::new();
        let mut summary = ImportSummary {
            categories: import_categories(db, &pack.categories, &mut mapping)?,
            questions: import_questions(db, &pack.questions, &mut mapping)?,
            ..ImportSummary::default()
        };

        let selector = store.selector();
        for record in &records {
            selector.import_selector(record, &mut mapping)?;
            summary.selectors += 1;
        }
        summary.placeholders_fixed = selector.finish_import(&mapping)?;
        Ok(summary)
    })?;

    tracing::info!(
        categories = summary.categories,
        questions = summary.questions,
        selectors = summary.selectors,
        placeholders_fixed = summary.placeholders_fixed,
        "pack imported"
    );
    Ok(summary)
}

/// Create categories so that every parent exists before its children
fn import_categories(
    db: &Database,
    categories: &[PackCategory],
    mapping: &mut IdMapping,
) -> Result<usize> {
    let mut pending: Vec<&PackCategory> = categories.iter().collect();
    let mut created = 0;

    while !pending.is_empty() {
        let before = pending.len();
        let mut waiting = Vec::new();
        for category in pending {
            let parent = match category.parent_id {
                None => None,
                Some(foreign) => match mapping.get(MappedEntity::Category, foreign) {
                    Some(local) => Some(local),
                    None => {
                        waiting.push(category);
                        continue;
                    }
                },
            };
            let local = db.create_category(&category.name, parent)?;
            mapping.insert(MappedEntity::Category, category.id, local);
            created += 1;
        }
        if waiting.len() == before {
            return Err(TagdrawError::not_found(
                "parent category",
                waiting
                    .iter()
                    .filter_map(|c| c.parent_id)
                    .map(|id| id.to_string())
                    .collect::<Vec<_>>()
                    .join(", "),
            ));
        }
        pending = waiting;
    }

    Ok(created)
}

/// Create questions: top-level ones first, then sub-questions once their
/// parent has been created
fn import_questions(
    db: &Database,
    questions: &[PackQuestion],
    mapping: &mut IdMapping,
) -> Result<usize> {
    // A selector question is its own parent; only real sub-questions wait
    let (mut pending, top_level): (Vec<&PackQuestion>, Vec<&PackQuestion>) = questions
        .iter()
        .partition(|q| q.parent_id != 0 && q.parent_id != q.id);

    for q in top_level {
        import_question(db, q, 0, mapping)?;
    }

    while !pending.is_empty() {
        let before = pending.len();
        let mut waiting = Vec::new();
        for q in pending {
            match mapping.get(MappedEntity::Question, q.parent_id) {
                Some(parent) => import_question(db, q, parent, mapping)?,
                None => waiting.push(q),
            }
        }
        if waiting.len() == before {
            return Err(TagdrawError::not_found(
                "parent question",
                waiting
                    .iter()
                    .map(|q| q.parent_id.to_string())
                    .collect::<Vec<_>>()
                    .join(", "),
            ));
        }
        pending = waiting;
    }

    Ok(questions.len())
}

fn import_question(
    db: &Database,
    q: &PackQuestion,
    parent_id: QuestionId,
    mapping: &mut IdMapping,
) -> Result<()> {
    let new = NewQuestion {
        category_id: mapping.require(MappedEntity::Category, q.category_id)?,
        name: q.name.clone(),
        kind: q.kind.clone(),
        text: q.text.clone(),
        hidden: q.hidden,
        parent_id,
    };
    let local = if q.kind == SELECTOR_KIND {
        db.create_selector_question_with(&new)?
    } else {
        db.create_question(&new, &q.tags)?
    };
    mapping.insert(MappedEntity::Question, q.id, local);
    mapping.mark_created(local);
    Ok(())
}
