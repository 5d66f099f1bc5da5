//! Markdown release notes formatter

use changekit_core::NotesError;
use tracing::{debug, instrument};

use super::NotesFormatter;
use crate::model::{NoteEntry, ReleaseNotes};

/// Markdown release notes formatter
pub struct MarkdownFormatter {
    /// Top-level heading
    pub heading: String,
    /// Whether to print the one-line summary under the heading
    pub include_headline: bool,
}

impl MarkdownFormatter {
    /// Create a new markdown formatter
    pub fn new() -> Self {
        Self {
            heading: "Release Notes".to_string(),
            include_headline: true,
        }
    }

    fn format_entry(&self, output: &mut String, notes: &ReleaseNotes, entry: &NoteEntry) {
        output.push_str("- ");

        if let Some(prefix) = &entry.prefix {
            output.push_str(&format!("**{}** ", prefix));
        }
        output.push_str(&entry.title);

        match notes.pull_request_url(entry.pr) {
            Some(url) => output.push_str(&format!(" ([#{}]({}))", entry.pr, url)),
            None => output.push_str(&format!(" (#{})", entry.pr)),
        }

        output.push_str(&format!(" - @{}\n", entry.author));
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl NotesFormatter for MarkdownFormatter {
    #[instrument(skip(self, notes), fields(bump = %notes.bump_type))]
    fn format(&self, notes: &ReleaseNotes) -> Result<String, NotesError> {
        let mut output = String::new();

        output.push_str(&format!("## {}\n\n", self.heading));

        if self.include_headline {
            output.push_str(&format!("{}\n\n", notes.headline()));
        }

        for (title, entries) in notes.categories.sections() {
            if entries.is_empty() {
                continue;
            }

            output.push_str(&format!("### {}\n\n", title));
            for entry in entries {
                self.format_entry(&mut output, notes, entry);
            }
            output.push('\n');
        }

        if !notes.contributors.is_empty() {
            output.push_str("## Contributors\n\n");
            output.push_str("Thanks to all the contributors who made this release possible!\n\n");

            for contributor in &notes.contributors {
                if contributor.is_first_time_contributor {
                    output.push_str(&format!(
                        "- @{} (first-time contributor)\n",
                        contributor.username
                    ));
                } else {
                    output.push_str(&format!("- @{}\n", contributor.username));
                }
            }
            output.push('\n');
        }

        let output = format!("{}\n", output.trim_end());
        debug!(output_len = output.len(), "markdown release notes formatted");
        Ok(output)
    }

    fn extension(&self) -> &'static str {
        "md"
    }
}
