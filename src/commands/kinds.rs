//! `tagdraw kinds` command - show the kind partition of the store

use serde_json::json;

use crate::commands::dispatch::CommandContext;
use crate::commands::format::{output_by_format_result, print_json};
use tagdraw_core::error::Result;

pub fn execute(ctx: &CommandContext) -> Result<()> {
    let store = ctx.discover_or_open_store()?;
    let kinds = store.kinds();
    let configured: Vec<&String> = store.config().kinds.keys().collect();

    let cli = ctx.cli;
    output_by_format_result!(cli.format,
        json => print_json(&json!({
            "kinds": configured,
            "forbidden": kinds.forbidden_kinds(),
            "manual": kinds.manual_kinds(),
        })),
        human => {
            println!("Known:     {}", join(configured.iter().map(|s| s.as_str())));
            println!("Forbidden: {}", join(kinds.forbidden_kinds().iter().map(String::as_str)));
            println!("Manual:    {}", join(kinds.manual_kinds().iter().map(String::as_str)));
        }
    )
}

fn join<'a>(names: impl Iterator<Item = &'a str>) -> String {
    let joined = names.collect::<Vec<_>>().join(", ");
    if joined.is_empty() {
        "-".to_string()
    } else {
        joined
    }
}
