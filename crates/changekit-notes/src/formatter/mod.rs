//! Release notes formatters

mod json;
mod markdown;

pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;

use changekit_core::NotesError;

use crate::model::ReleaseNotes;

/// Trait for release notes formatters
pub trait NotesFormatter: Send + Sync {
    /// Format release notes to string
    fn format(&self, notes: &ReleaseNotes) -> Result<String, NotesError>;

    /// Get the file extension for this format
    fn extension(&self) -> &'static str;
}

/// Output format of release notes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NotesFormat {
    /// Human-readable markdown
    #[default]
    Markdown,
    /// Machine-readable JSON
    Json,
}

impl NotesFormat {
    /// Get the formatter for this format
    pub fn formatter(&self) -> Box<dyn NotesFormatter> {
        match self {
            Self::Markdown => Box::new(MarkdownFormatter::new()),
            Self::Json => Box::new(JsonFormatter::new()),
        }
    }
}

impl std::str::FromStr for NotesFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "markdown" | "md" => Ok(Self::Markdown),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown release notes format: {}", s)),
        }
    }
}
