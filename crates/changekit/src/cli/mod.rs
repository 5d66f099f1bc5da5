//! CLI definition and command handling

pub mod commands;
pub mod output;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::debug;

use changekit_changeset::ChangesetStore;
use changekit_core::config::{load_config, load_config_or_default, Config};

use crate::exit_codes;

use commands::{
    AddCommand, AnalyzeCommand, CleanCommand, CompletionsCommand, InitCommand, ListCommand,
    NotesCommand,
};

/// Changekit - changeset-based release notes and version bumps
#[derive(Debug, Parser)]
#[command(name = "changekit")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Working directory
    #[arg(short = 'C', long, global = true)]
    pub directory: Option<PathBuf>,

    /// Configuration file (default: searched from the working directory)
    #[arg(long, global = true, env = "CHANGEKIT_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format of listing commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output
    Json,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Write a default changekit configuration
    Init(InitCommand),

    /// Record a changeset for an accepted pull request
    Add(AddCommand),

    /// List pending changesets
    List(ListCommand),

    /// Recommend the next version bump
    Analyze(AnalyzeCommand),

    /// Render release notes from pending changesets
    Notes(NotesCommand),

    /// Delete all changesets after a release
    Clean(CleanCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

impl Cli {
    /// Execute the CLI command, returning the process exit code
    pub fn execute(self) -> anyhow::Result<i32> {
        // Change to specified directory if provided
        if let Some(dir) = &self.directory {
            std::env::set_current_dir(dir)?;
        }

        match self.command {
            Commands::Analyze(ref cmd) => return cmd.execute(&self),
            Commands::Init(ref cmd) => cmd.execute(&self)?,
            Commands::Add(ref cmd) => cmd.execute(&self)?,
            Commands::List(ref cmd) => cmd.execute(&self)?,
            Commands::Notes(ref cmd) => cmd.execute(&self)?,
            Commands::Clean(ref cmd) => cmd.execute(&self)?,
            Commands::Completions(ref cmd) => cmd.execute(&self)?,
        }

        Ok(exit_codes::SUCCESS)
    }

    /// Load the configuration for a project rooted at `cwd`
    pub fn load_config(&self, cwd: &Path) -> anyhow::Result<(Config, Option<PathBuf>)> {
        let loaded = match &self.config {
            Some(path) => (load_config(path)?, Some(path.clone())),
            None => load_config_or_default(cwd)?,
        };
        debug!(config_path = ?loaded.1, "configuration ready");
        Ok(loaded)
    }

    /// Open the changeset store configured for `cwd`
    pub fn open_store(&self, cwd: &Path) -> anyhow::Result<(Config, ChangesetStore)> {
        let (config, _) = self.load_config(cwd)?;
        let store = ChangesetStore::for_project(cwd, &config.changesets);
        Ok((config, store))
    }
}
