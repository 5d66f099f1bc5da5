//! Analyze command

use clap::Args;
use semver::Version;
use serde_json::json;
use tracing::info;

use changekit_changeset::{categorize, determine_bump, ChangesetRecord, CategorySummary};
use changekit_core::BumpType;

use crate::cli::{output, Cli, OutputFormat};
use crate::exit_codes;

/// Recommend the next version bump
///
/// Exits with 1, 2 or 3 for a major, minor or patch bump, and 0 when there
/// are no changesets.
#[derive(Debug, Args)]
pub struct AnalyzeCommand {
    /// Only changesets that belong to this branch
    #[arg(short, long)]
    pub branch: Option<String>,

    /// Current version, to print the next one
    #[arg(long, value_name = "VERSION")]
    pub current_version: Option<Version>,

    /// Exit with 0 regardless of the recommended bump
    #[arg(long)]
    pub no_exit_code: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Outcome of analyzing a set of changesets
#[derive(Debug, PartialEq, Eq)]
struct Analysis {
    changesets: usize,
    summary: CategorySummary,
    bump: Option<BumpType>,
    next_version: Option<Version>,
}

impl Analysis {
    fn new(records: &[ChangesetRecord], current: Option<&Version>) -> Self {
        let bump = (!records.is_empty()).then(|| determine_bump(records));
        Self {
            changesets: records.len(),
            summary: categorize(records).summary(),
            bump,
            next_version: bump.zip(current).map(|(bump, current)| bump.apply(current)),
        }
    }

    fn exit_code(&self) -> i32 {
        self.bump.map_or(exit_codes::SUCCESS, |bump| bump.exit_code())
    }
}

impl AnalyzeCommand {
    /// Execute the analyze command, returning the exit code
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<i32> {
        info!(branch = ?self.branch, "executing analyze command");
        let cwd = std::env::current_dir()?;
        let (_, store) = cli.open_store(&cwd)?;

        let records = store.list(self.branch.as_deref())?;
        let analysis = Analysis::new(&records, self.current_version.as_ref());
        info!(changesets = analysis.changesets, bump = ?analysis.bump, "analysis complete");

        match self.format {
            OutputFormat::Json => {
                let output = json!({
                    "changesets": analysis.changesets,
                    "summary": analysis.summary,
                    "bumpType": analysis.bump,
                    "nextVersion": analysis.next_version.as_ref().map(Version::to_string),
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Text if cli.quiet => {
                if let Some(bump) = analysis.bump {
                    println!("{}", bump);
                }
            }
            OutputFormat::Text => print_analysis(&analysis),
        }

        Ok(self.exit_code(&analysis))
    }

    fn exit_code(&self, analysis: &Analysis) -> i32 {
        if self.no_exit_code {
            exit_codes::SUCCESS
        } else {
            analysis.exit_code()
        }
    }
}

fn print_analysis(analysis: &Analysis) {
    let Some(bump) = analysis.bump else {
        output::warning("No changesets found.");
        return;
    };

    println!("{}", output::header("Changeset Analysis"));
    println!();
    println!("{}", output::key_value("Changesets", &analysis.changesets.to_string()));
    println!(
        "{}",
        output::key_value("Breaking", &analysis.summary.breaking.to_string())
    );
    println!(
        "{}",
        output::key_value("Features", &analysis.summary.features.to_string())
    );
    println!("{}", output::key_value("Fixes", &analysis.summary.fixes.to_string()));
    println!("{}", output::key_value("Other", &analysis.summary.other.to_string()));
    println!();
    println!(
        "{}",
        output::key_value(
            "Recommended bump",
            &output::version_style().apply_to(bump).to_string()
        )
    );
    if let Some(next) = &analysis.next_version {
        println!(
            "{}",
            output::key_value(
                "Next version",
                &output::version_style().apply_to(next).to_string()
            )
        );
    }
}
