//! List command

use clap::Args;
use console::style;
use tracing::info;

use changekit_changeset::ChangesetRecord;

use crate::cli::{output, Cli, OutputFormat};

/// List pending changesets
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Only changesets that belong to this branch
    #[arg(short, long)]
    pub branch: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl ListCommand {
    /// Execute the list command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(branch = ?self.branch, "executing list command");
        let cwd = std::env::current_dir()?;
        let (_, store) = cli.open_store(&cwd)?;

        let records = store.list(self.branch.as_deref())?;

        match self.format {
            OutputFormat::Json => {
                let entries: Vec<_> = records.iter().map(record_json).collect();
                println!("{}", serde_json::to_string_pretty(&entries)?);
            }
            OutputFormat::Text => {
                if records.is_empty() {
                    if !cli.quiet {
                        output::warning("No changesets found.");
                    }
                    return Ok(());
                }

                if !cli.quiet {
                    println!(
                        "{}",
                        output::header(&format!("{} changeset(s) in {}", records.len(), store.dir().display()))
                    );
                    println!();
                }

                for record in &records {
                    print_record(record);
                }
            }
        }

        Ok(())
    }
}

fn print_record(record: &ChangesetRecord) {
    let marker = if record.breaking {
        style("!").red().bold().to_string()
    } else {
        " ".to_string()
    };
    let branch = record
        .branch
        .as_deref()
        .map(|b| format!(" [{}]", output::branch_style().apply_to(b)))
        .unwrap_or_default();

    println!(
        "{} #{:<6} {:<10} {} - @{}{}",
        marker,
        record.pr,
        record.change_type,
        record.title,
        record.author,
        branch
    );
}

fn record_json(record: &ChangesetRecord) -> serde_json::Value {
    serde_json::json!({
        "file": record.filename,
        "title": record.title,
        "pr": record.pr,
        "author": record.author,
        "type": record.change_type,
        "breaking": record.breaking,
        "branch": record.branch,
        "description": record.description,
    })
}
