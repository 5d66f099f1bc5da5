//! JSON release notes formatter

use changekit_core::NotesError;
use tracing::debug;

use super::NotesFormatter;
use crate::model::ReleaseNotes;

/// JSON release notes formatter
pub struct JsonFormatter {
    /// Pretty-print the document
    pub pretty: bool,
}

impl JsonFormatter {
    /// Create a pretty-printing JSON formatter
    pub fn new() -> Self {
        Self { pretty: true }
    }

    /// Emit compact single-line JSON
    pub fn compact() -> Self {
        Self { pretty: false }
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl NotesFormatter for JsonFormatter {
    fn format(&self, notes: &ReleaseNotes) -> Result<String, NotesError> {
        let output = if self.pretty {
            serde_json::to_string_pretty(notes)?
        } else {
            serde_json::to_string(notes)?
        };
        debug!(output_len = output.len(), "json release notes formatted");
        Ok(output)
    }

    fn extension(&self) -> &'static str {
        "json"
    }
}
