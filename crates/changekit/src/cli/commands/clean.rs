//! Clean command

use clap::Args;
use tracing::info;

use crate::cli::{output, Cli};

/// Delete all changesets after a release
#[derive(Debug, Args)]
pub struct CleanCommand {}

impl CleanCommand {
    /// Execute the clean command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!("executing clean command");
        let cwd = std::env::current_dir()?;
        let (_, store) = cli.open_store(&cwd)?;

        let removed = store.delete_all()?;

        if cli.quiet {
            println!("{}", removed);
        } else if removed == 0 {
            output::warning("No changesets to delete.");
        } else {
            output::success(&format!(
                "Deleted {} changeset(s) from {}",
                removed,
                output::path_style().apply_to(store.dir().display())
            ));
        }

        Ok(())
    }
}
