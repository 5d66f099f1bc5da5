//! Changekit Notes - release notes from changesets
//!
//! This crate turns a set of changesets into release notes. The categorized
//! model is built once and serialized as markdown or JSON; first-time
//! contributors are flagged through the GitHub API when a token is
//! available.

pub mod contributors;
pub mod formatter;
pub mod generator;
pub mod model;
pub mod repo_url;

pub use contributors::{
    is_first_time_contributor, ContributorClassifier, ContributorError, GitHubContributors,
    GitHubRepository,
};
pub use formatter::{JsonFormatter, MarkdownFormatter, NotesFormat, NotesFormatter};
pub use generator::ReleaseNotesGenerator;
pub use model::{Contributor, NoteCategories, NoteEntry, ReleaseNotes};
pub use repo_url::{normalize_repo_url, repo_url_from_package_json, resolve_repo_url};
