//! Release notes command

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, ValueEnum};
use tracing::{debug, info};

use changekit_core::config::Config;
use changekit_core::NotesError;
use changekit_notes::{resolve_repo_url, GitHubContributors, NotesFormat, ReleaseNotesGenerator};

use crate::cli::{output, Cli};

/// Render release notes from pending changesets
#[derive(Debug, Args)]
pub struct NotesCommand {
    /// Output format (default: `release_notes.format` from the configuration)
    #[arg(short, long, value_enum)]
    pub format: Option<NotesFormatArg>,

    /// Repository URL used for pull request links and contributor lookups
    #[arg(long, env = "REPO_URL")]
    pub repo_url: Option<String>,

    /// GitHub token for first-time contributor lookups
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Only changesets that belong to this branch
    #[arg(short, long)]
    pub branch: Option<String>,

    /// Write to file (default: print to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Release notes format flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NotesFormatArg {
    /// Markdown document
    #[value(alias = "md")]
    Markdown,
    /// JSON document
    Json,
}

impl From<NotesFormatArg> for NotesFormat {
    fn from(format: NotesFormatArg) -> Self {
        match format {
            NotesFormatArg::Markdown => NotesFormat::Markdown,
            NotesFormatArg::Json => NotesFormat::Json,
        }
    }
}

impl NotesCommand {
    /// Execute the notes command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        let runtime = tokio::runtime::Runtime::new()?;
        runtime.block_on(self.execute_async(cli))
    }

    async fn execute_async(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(branch = ?self.branch, format = ?self.format, "executing notes command");
        let cwd = std::env::current_dir()?;
        let (config, store) = cli.open_store(&cwd)?;

        let records = store.list(self.branch.as_deref())?;
        let format = self.resolve_format(&config)?;
        let repo_url = resolve_repo_url(self.repo_url.as_deref(), &config.release_notes, &cwd);

        let mut generator =
            ReleaseNotesGenerator::new(config.release_notes.clone()).with_repo_url(repo_url.clone());
        match GitHubContributors::from_parts(repo_url.as_deref(), self.token.as_deref(), &config.github) {
            Some(contributors) => generator = generator.with_classifier(Arc::new(contributors)),
            None => debug!("first-time contributor lookups disabled"),
        }

        let notes = generator.render(&records, format).await?;

        match &self.output {
            Some(path) => {
                std::fs::write(path, &notes).map_err(|source| NotesError::WriteFailed {
                    path: path.clone(),
                    source,
                })?;
                if !cli.quiet {
                    output::success(&format!(
                        "Release notes for {} changeset(s) written to {}",
                        records.len(),
                        output::path_style().apply_to(path.display())
                    ));
                }
            }
            None => print!("{}", notes),
        }

        Ok(())
    }

    fn resolve_format(&self, config: &Config) -> anyhow::Result<NotesFormat> {
        match self.format {
            Some(format) => Ok(format.into()),
            None => config
                .release_notes
                .format
                .parse()
                .map_err(|e: String| anyhow::anyhow!(e)),
        }
    }
}
