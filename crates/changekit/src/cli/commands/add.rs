//! Add command

use std::path::{Path, PathBuf};

use clap::Args;
use tracing::info;

use changekit_changeset::{ChangesetRecord, ChangesetStore, PullRequest};

use crate::cli::{output, Cli};

/// Record a changeset for an accepted pull request
#[derive(Debug, Args)]
pub struct AddCommand {
    /// Pull request number
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub pr: u64,

    /// Pull request title, conventionally `<type>[(scope)][!]: summary`
    #[arg(long)]
    pub title: String,

    /// Pull request author
    #[arg(long)]
    pub author: String,

    /// Pull request body, used as the changeset description
    #[arg(long)]
    pub body: Option<String>,

    /// Mark the change as breaking regardless of its title
    #[arg(long)]
    pub breaking: bool,

    /// Branch the pull request was merged into (default: mainline branch)
    #[arg(long)]
    pub branch: Option<String>,
}

impl AddCommand {
    /// Execute the add command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(pr = self.pr, author = %self.author, "executing add command");
        let cwd = std::env::current_dir()?;
        let (config, store) = cli.open_store(&cwd)?;

        let path = self.record(&store, &config.changesets.mainline_branch)?;

        if cli.quiet {
            println!("{}", path.display());
        } else {
            output::success(&format!(
                "Created changeset {}",
                output::path_style().apply_to(path.display())
            ));
        }

        Ok(())
    }

    fn record(&self, store: &ChangesetStore, mainline: &str) -> anyhow::Result<PathBuf> {
        let pull = PullRequest {
            number: self.pr,
            title: self.title.clone(),
            author: self.author.clone(),
            body: self.body.clone(),
            breaking: self.breaking,
            branch: self.branch.clone(),
        };

        let record = ChangesetRecord::from_pull_request(&pull, mainline);
        let filename = store.create(&record)?;
        Ok(relative_to_cwd(&store.dir().join(filename)))
    }
}

fn relative_to_cwd(path: &Path) -> PathBuf {
    std::env::current_dir()
        .ok()
        .and_then(|cwd| path.strip_prefix(cwd).ok().map(Path::to_path_buf))
        .unwrap_or_else(|| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use changekit_core::config::StoreConfig;
    use tempfile::TempDir;

    fn command(title: &str) -> AddCommand {
        AddCommand {
            pr: 42,
            title: title.to_string(),
            author: "alice".to_string(),
            body: None,
            breaking: false,
            branch: None,
        }
    }

    #[test]
    fn test_record_defaults_to_mainline() {
        let temp = TempDir::new().unwrap();
        let store = ChangesetStore::new(temp.path().join(".changesets"), StoreConfig::default());

        command("feat: add widget").record(&store, "develop").unwrap();

        let records = store.list(None).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].pr, 42);
        assert_eq!(records[0].branch.as_deref(), Some("develop"));
        assert_eq!(records[0].description, "feat: add widget");
        assert!(!records[0].breaking);
    }

    #[test]
    fn test_record_explicit_breaking() {
        let temp = TempDir::new().unwrap();
        let store = ChangesetStore::new(temp.path().join(".changesets"), StoreConfig::default());

        let mut cmd = command("refactor: rename config keys");
        cmd.breaking = true;
        cmd.branch = Some("milestone/2.0".to_string());
        cmd.body = Some("Renames every key.".to_string());
        cmd.record(&store, "develop").unwrap();

        let records = store.list(Some("develop")).unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].breaking);
        assert_eq!(records[0].description, "Renames every key.");
    }
}
