//! Changeset file format
//!
//! A changeset file is a front-matter metadata block followed by the
//! free-text description:
//!
//! ```text
//! ---
//! title: "feat: add widget"
//! pr: 10
//! author: "alice"
//! type: "feat"
//! breaking: false
//! branch: "develop"
//! ---
//! Adds the widget.
//! ```
//!
//! Strings are written double-quoted with JSON escaping, which is also a
//! valid YAML double-quoted scalar. Reading parses the block as YAML, so
//! folded scalars and trailing comments written by other tools are accepted.

use changekit_core::error::ChangesetError;
use serde::Deserialize;
use serde_yaml::{Mapping, Value};
use tracing::{trace, warn};

use crate::types::{ChangeType, ChangesetRecord};

/// Metadata block delimiter
const DELIMITER: &str = "---";

/// Encode a record as changeset file content
pub fn encode(record: &ChangesetRecord) -> String {
    let mut output = String::new();

    output.push_str(DELIMITER);
    output.push('\n');
    push_field(&mut output, "title", &quote(&record.title));
    push_field(&mut output, "pr", &record.pr.to_string());
    push_field(&mut output, "author", &quote(&record.author));
    push_field(&mut output, "type", &quote(record.change_type.as_str()));
    push_field(&mut output, "breaking", if record.breaking { "true" } else { "false" });
    if let Some(branch) = &record.branch {
        push_field(&mut output, "branch", &quote(branch));
    }
    output.push_str(DELIMITER);
    output.push('\n');

    let description = record.description.trim();
    if !description.is_empty() {
        output.push_str(description);
        output.push('\n');
    }

    output
}

/// Decode changeset file content.
///
/// `file` only labels errors. The metadata block is parsed as YAML; unknown
/// keys are ignored, a missing `type` is derived from the title, a missing
/// or non-boolean `breaking` is `false` and a missing `branch` stays unset.
pub fn decode(file: &str, content: &str) -> Result<ChangesetRecord, ChangesetError> {
    let (block, body) = split_block(file, content)?;

    let meta: RawMetadata = if block.lines().all(is_blank_or_comment) {
        RawMetadata::default()
    } else {
        serde_yaml::from_str(block).map_err(|e| {
            ChangesetError::malformed(file, format!("unparsable metadata block: {}", e))
        })?
    };

    meta.into_record(file, body.trim())
}

/// Split content into the metadata block and the body, both borrowed as-is
fn split_block<'a>(file: &str, content: &'a str) -> Result<(&'a str, &'a str), ChangesetError> {
    let mut offset = 0;
    let mut block_start = None;

    for line in content.split_inclusive('\n') {
        let line_end = offset + line.len();
        let trimmed = line.trim();

        match block_start {
            // Leading blank lines are tolerated before the block opens
            None if trimmed.is_empty() => {}
            None if trimmed == DELIMITER => block_start = Some(line_end),
            None => return Err(ChangesetError::malformed(file, "missing metadata block")),
            Some(start) if trimmed == DELIMITER => {
                return Ok((&content[start..offset], &content[line_end..]));
            }
            Some(_) => {}
        }

        offset = line_end;
    }

    match block_start {
        Some(_) => Err(ChangesetError::malformed(file, "unterminated metadata block")),
        None => Err(ChangesetError::malformed(file, "missing metadata block")),
    }
}

fn is_blank_or_comment(line: &str) -> bool {
    let line = line.trim();
    line.is_empty() || line.starts_with('#')
}

fn push_field(output: &mut String, key: &str, value: &str) {
    output.push_str(key);
    output.push_str(": ");
    output.push_str(value);
    output.push('\n');
}

fn quote(value: &str) -> String {
    // serde_json never fails on a plain string
    serde_json::to_string(value).unwrap_or_else(|_| format!("\"{}\"", value))
}

/// Scalar value as text; sequences and mappings have none
fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

fn parse_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "true" | "yes" | "on" => Some(true),
            "false" | "no" | "off" | "" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Metadata values as read, before validation
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawMetadata {
    title: Option<Value>,
    pr: Option<Value>,
    author: Option<Value>,
    #[serde(rename = "type")]
    change_type: Option<Value>,
    breaking: Option<Value>,
    branch: Option<Value>,
    #[serde(flatten)]
    unknown: Mapping,
}

impl RawMetadata {
    fn into_record(self, file: &str, description: &str) -> Result<ChangesetRecord, ChangesetError> {
        for key in self.unknown.keys() {
            trace!(file, key = ?key, "ignoring unknown changeset key");
        }

        let title = required(file, "title", self.title.as_ref())?;
        let author = required(file, "author", self.author.as_ref())?;
        let pr_raw = required(file, "pr", self.pr.as_ref())?;
        let pr = pr_raw.trim().parse::<u64>().map_err(|_| {
            ChangesetError::malformed(file, format!("`pr` is not an integer: {}", pr_raw))
        })?;

        let breaking = match &self.breaking {
            None | Some(Value::Null) => false,
            Some(raw) => parse_bool(raw).unwrap_or_else(|| {
                warn!(file, value = ?raw, "`breaking` is not a boolean, treating as false");
                false
            }),
        };

        let change_type = match self.change_type.as_ref().and_then(scalar) {
            Some(token) if !token.trim().is_empty() => ChangeType::from(token),
            _ => ChangeType::from_title(&title),
        };

        let branch = self
            .branch
            .as_ref()
            .and_then(scalar)
            .filter(|b| !b.trim().is_empty());

        let mut record = ChangesetRecord::new(title, pr, author)
            .with_type(change_type)
            .with_breaking(breaking)
            .with_description(description);
        record.branch = branch;
        Ok(record)
    }
}

fn required(file: &str, key: &str, value: Option<&Value>) -> Result<String, ChangesetError> {
    match value.and_then(scalar) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ChangesetError::malformed(
            file,
            format!("missing required key `{}`", key),
        )),
    }
}
