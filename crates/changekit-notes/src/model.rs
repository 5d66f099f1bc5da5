//! Release notes model
//!
//! Markdown and JSON output are both serializations of [`ReleaseNotes`].

use changekit_changeset::parser::split_prefix;
use changekit_changeset::{ChangeType, ChangesetRecord};
use changekit_core::BumpType;
use serde::Serialize;

/// Categorized release notes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseNotes {
    /// Recommended version bump
    pub bump_type: BumpType,
    /// Entries per category
    pub categories: NoteCategories,
    /// Distinct authors, in order of first appearance
    pub contributors: Vec<Contributor>,
    /// Repository URL used for pull request links
    #[serde(skip)]
    pub repo_url: Option<String>,
}

impl ReleaseNotes {
    /// Check if the notes contain no entries
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Link to a pull request, when a repository URL is known
    pub fn pull_request_url(&self, pr: u64) -> Option<String> {
        self.repo_url
            .as_deref()
            .map(|url| format!("{}/pull/{}", url.trim_end_matches('/'), pr))
    }

    /// One-line summary of the release
    pub fn headline(&self) -> String {
        if self.is_empty() {
            return "No changes since the last release.".to_string();
        }

        let mut parts = Vec::new();
        let c = &self.categories;

        if !c.breaking.is_empty() {
            parts.push(plural(c.breaking.len(), "breaking change", "breaking changes"));
        }
        if !c.features.is_empty() {
            parts.push(plural(c.features.len(), "new feature", "new features"));
        }
        if !c.fixes.is_empty() {
            parts.push(plural(c.fixes.len(), "fix", "fixes"));
        }

        if parts.is_empty() {
            "Maintenance release.".to_string()
        } else {
            format!("This release includes {}.", parts.join(", "))
        }
    }
}

fn plural(count: usize, one: &str, many: &str) -> String {
    format!("{} {}", count, if count == 1 { one } else { many })
}

/// Release notes entries per category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NoteCategories {
    pub breaking: Vec<NoteEntry>,
    pub features: Vec<NoteEntry>,
    pub fixes: Vec<NoteEntry>,
    pub other: Vec<NoteEntry>,
}

impl NoteCategories {
    /// Check if every category is empty
    pub fn is_empty(&self) -> bool {
        self.breaking.is_empty()
            && self.features.is_empty()
            && self.fixes.is_empty()
            && self.other.is_empty()
    }

    /// Categories with their markdown section titles, in rendering order
    pub fn sections(&self) -> [(&'static str, &[NoteEntry]); 4] {
        [
            ("Breaking Changes", self.breaking.as_slice()),
            ("Features", self.features.as_slice()),
            ("Fixes", self.fixes.as_slice()),
            ("Other Changes", self.other.as_slice()),
        ]
    }
}

/// A single line in the release notes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteEntry {
    /// Title with the type prefix removed
    pub title: String,
    /// Type prefix as written in the title (`feat`, `fix(api)!`)
    #[serde(skip)]
    pub prefix: Option<String>,
    /// Pull request number
    pub pr: u64,
    /// Pull request author
    pub author: String,
    /// Changeset description
    pub description: String,
    /// Change type
    #[serde(rename = "type")]
    pub change_type: ChangeType,
    /// Branch the changeset was authored on
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
}

impl From<&ChangesetRecord> for NoteEntry {
    fn from(record: &ChangesetRecord) -> Self {
        let (prefix, summary) = split_prefix(&record.title);
        Self {
            title: summary.to_string(),
            prefix: prefix.map(str::to_string),
            pr: record.pr,
            author: record.author.clone(),
            description: record.description.clone(),
            change_type: record.change_type.clone(),
            branch: record.branch.clone(),
        }
    }
}

/// A release contributor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Contributor {
    /// Author identifier
    pub username: String,
    /// Whether the author is contributing for the first time
    pub is_first_time_contributor: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notes(categories: NoteCategories) -> ReleaseNotes {
        ReleaseNotes {
            bump_type: BumpType::Patch,
            categories,
            contributors: Vec::new(),
            repo_url: None,
        }
    }

    #[test]
    fn test_note_entry_splits_prefix() {
        let record = ChangesetRecord::new("fix(parser)!: crash", 3, "bob");
        let entry = NoteEntry::from(&record);

        assert_eq!(entry.prefix.as_deref(), Some("fix(parser)!"));
        assert_eq!(entry.title, "crash");
        assert_eq!(entry.change_type, ChangeType::Fix);
    }

    #[test]
    fn test_pull_request_url_trims_slash() {
        let mut notes = notes(NoteCategories::default());
        assert!(notes.pull_request_url(5).is_none());

        notes.repo_url = Some("https://github.com/octo/widgets/".to_string());
        assert_eq!(
            notes.pull_request_url(5).as_deref(),
            Some("https://github.com/octo/widgets/pull/5")
        );
    }

    #[test]
    fn test_headline() {
        let entry = NoteEntry::from(&ChangesetRecord::new("fix: a", 1, "a"));
        let categories = NoteCategories {
            fixes: vec![entry.clone(), entry.clone()],
            features: vec![entry.clone()],
            ..Default::default()
        };
        assert_eq!(
            notes(categories).headline(),
            "This release includes 1 new feature, 2 fixes."
        );

        let other_only = NoteCategories {
            other: vec![entry],
            ..Default::default()
        };
        assert_eq!(notes(other_only).headline(), "Maintenance release.");
        assert_eq!(
            notes(NoteCategories::default()).headline(),
            "No changes since the last release."
        );
    }
}
