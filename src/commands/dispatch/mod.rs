//! Command dispatch logic for tagdraw

use std::time::Instant;

use crate::cli::paths::resolve_root_path;
use crate::cli::{Cli, Commands};
use tagdraw_core::error::Result;
use tracing::debug;

mod command;

pub use command::CommandContext;
use command::{Command, NoCommand};

use crate::commands::{category, draw, export, import, init, kinds, question, selector, tags};

pub fn run(cli: &Cli, start: Instant) -> Result<()> {
    let root = resolve_root_path();

    debug!(elapsed = ?start.elapsed(), "resolve_root");

    let ctx = CommandContext::new(cli, &root, start);

    match &cli.command {
        None => NoCommand.execute(&ctx),
        Some(cmd) => cmd.execute(&ctx),
    }
}

impl Command for Commands {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            Commands::Init => init::execute(ctx),
            Commands::Category { command } => category::execute(ctx, command),
            Commands::Question { command } => question::execute(ctx, command),
            Commands::Selector { command } => selector::execute(ctx, command),
            Commands::Tags(args) => tags::execute(ctx, args),
            Commands::Kinds => kinds::execute(ctx),
            Commands::Pool(args) => draw::execute_pool(ctx, args),
            Commands::Pick(args) => draw::execute_pick(ctx, args),
            Commands::ManualCheck(args) => draw::execute_manual_check(ctx, args),
            Commands::Export(args) => export::execute(ctx, args),
            Commands::Import(args) => import::execute(ctx, args),
        }
    }
}
