//! `tagdraw init` command - create a new store
//!
//! Idempotent: an existing config and database are kept.

use serde_json::json;

use crate::cli::paths::resolve_against;
use crate::commands::dispatch::CommandContext;
use crate::commands::format::{output_by_format_result, print_json_status};
use tagdraw_core::error::Result;
use tagdraw_core::store::Store;

/// Execute the init command
pub fn execute(ctx: &CommandContext) -> Result<()> {
    let cli = ctx.cli;
    let store = match cli.store.as_ref() {
        Some(path) => Store::init_at(&resolve_against(ctx.root, path))?,
        None => Store::init(ctx.root)?,
    };

    output_by_format_result!(cli.format,
        json => print_json_status(
            "ok",
            Some("Store initialized"),
            &[("store", json!(store.root().display().to_string()))],
        ),
        human => {
            if !cli.quiet {
                println!("Initialized tagdraw store at {}", store.root().display());
            }
        }
    )
}
