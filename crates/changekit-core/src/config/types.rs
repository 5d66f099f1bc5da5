//! Configuration types

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for changekit
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Changeset store configuration
    pub changesets: StoreConfig,

    /// Release notes configuration
    pub release_notes: NotesConfig,

    /// GitHub API configuration used for contributor lookups
    pub github: GitHubConfig,
}

/// Changeset store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory holding changeset files, relative to the project root
    pub directory: PathBuf,

    /// Branch releases are cut from; new changesets default to it
    pub mainline_branch: String,

    /// Branches with this prefix are folded into mainline listings
    pub staging_prefix: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(".changesets"),
            mainline_branch: "develop".to_string(),
            staging_prefix: "milestone/".to_string(),
        }
    }
}

impl StoreConfig {
    /// Check whether a record authored on `branch` belongs in a listing for `filter`
    pub fn branch_matches(&self, branch: Option<&str>, filter: &str) -> bool {
        match branch {
            // Legacy records carry no branch and are always included
            None => true,
            Some(branch) if branch == filter => true,
            Some(branch) => {
                filter == self.mainline_branch
                    && !self.staging_prefix.is_empty()
                    && branch.starts_with(&self.staging_prefix)
            }
        }
    }
}

/// Release notes configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotesConfig {
    /// Default output format (markdown or json)
    pub format: String,

    /// Repository URL used for pull request links
    pub repo_url: Option<String>,

    /// Whether to render the contributors section
    pub include_contributors: bool,
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self {
            format: "markdown".to_string(),
            repo_url: None,
            include_contributors: true,
        }
    }
}

/// GitHub API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// REST API base URL
    pub api_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Authors with at most this many commits count as first-time contributors
    pub first_time_threshold: usize,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.github.com".to_string(),
            timeout_secs: 10,
            first_time_threshold: 3,
        }
    }
}
