//! Command trait and context for dispatching commands

use std::path::PathBuf;
use std::time::Instant;

use crate::cli::paths::resolve_against;
use crate::cli::Cli;
use tagdraw_core::error::Result;
use tagdraw_core::store::Store;

/// Open the store named by `--store`, or discover one upward from `root`
pub fn discover_or_open_store(cli: &Cli, root: &PathBuf) -> Result<Store> {
    if let Some(path) = &cli.store {
        Store::open(&resolve_against(root, path))
    } else {
        Store::discover(root)
    }
}

/// Shared context for command execution
pub struct CommandContext<'a> {
    pub cli: &'a Cli,
    pub root: &'a PathBuf,
    pub start: Instant,
}

impl<'a> CommandContext<'a> {
    pub fn new(cli: &'a Cli, root: &'a PathBuf, start: Instant) -> Self {
        Self { cli, root, start }
    }

    pub fn discover_or_open_store(&self) -> Result<Store> {
        let store = discover_or_open_store(self.cli, self.root)?;
        tracing::debug!(elapsed = ?self.start.elapsed(), store = %store.root().display(), "open_store");
        Ok(store)
    }
}

/// Trait for commands that can be executed
pub trait Command {
    fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// No-op command (when no subcommand is provided)
pub struct NoCommand;

impl Command for NoCommand {
    fn execute(&self, _ctx: &CommandContext) -> Result<()> {
        println!("tagdraw {}", env!("CARGO_PKG_VERSION"));
        println!();
        println!("Tag-filtered random question selection.");
        println!();
        println!("Run `tagdraw --help` for usage information.");
        Ok(())
    }
}
