//! Changeset types

use serde::{Deserialize, Serialize};

use crate::parser;

/// Change type token taken from a conventional title prefix
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ChangeType {
    /// New feature
    Feat,
    /// Bug fix
    Fix,
    /// Documentation
    Docs,
    /// Code style (formatting, etc.)
    Style,
    /// Refactoring
    Refactor,
    /// Performance improvement
    Perf,
    /// Tests
    Test,
    /// Build system
    Build,
    /// CI configuration
    Ci,
    /// Chores (maintenance)
    Chore,
    /// Reverting changes
    Revert,
    /// Title without a recognized prefix
    Other,
    /// Free-form value found in a changeset file
    Custom(String),
}

impl ChangeType {
    /// Derive the change type from a pull request title
    pub fn from_title(title: &str) -> Self {
        parser::conventional_type(title)
            .and_then(|token| token.parse::<Self>().ok())
            .filter(|t| !matches!(t, Self::Custom(_) | Self::Other))
            .unwrap_or(Self::Other)
    }

    /// Get the token as written in changeset files
    pub fn as_str(&self) -> &str {
        match self {
            Self::Feat => "feat",
            Self::Fix => "fix",
            Self::Docs => "docs",
            Self::Style => "style",
            Self::Refactor => "refactor",
            Self::Perf => "perf",
            Self::Test => "test",
            Self::Build => "build",
            Self::Ci => "ci",
            Self::Chore => "chore",
            Self::Revert => "revert",
            Self::Other => "other",
            Self::Custom(token) => token,
        }
    }
}

impl std::fmt::Display for ChangeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl std::str::FromStr for ChangeType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        Ok(match token.to_lowercase().as_str() {
            "feat" => Self::Feat,
            "fix" => Self::Fix,
            "docs" => Self::Docs,
            "style" => Self::Style,
            "refactor" => Self::Refactor,
            "perf" => Self::Perf,
            "test" => Self::Test,
            "build" => Self::Build,
            "ci" => Self::Ci,
            "chore" => Self::Chore,
            "revert" => Self::Revert,
            "other" | "" => Self::Other,
            _ => Self::Custom(token.to_string()),
        })
    }
}

impl From<String> for ChangeType {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(change_type) => change_type,
            Err(never) => match never {},
        }
    }
}

impl From<ChangeType> for String {
    fn from(value: ChangeType) -> Self {
        value.as_str().to_string()
    }
}

/// A single accepted change, as persisted in the changeset store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangesetRecord {
    /// Pull request title, usually with a conventional prefix
    pub title: String,
    /// Pull request number
    pub pr: u64,
    /// Pull request author
    pub author: String,
    /// Change type
    #[serde(rename = "type")]
    pub change_type: ChangeType,
    /// Whether the change breaks backward compatibility
    pub breaking: bool,
    /// Branch the changeset was authored on; `None` for legacy records
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    /// Free-text body
    pub description: String,
    /// File name inside the store, once persisted
    #[serde(skip)]
    pub filename: Option<String>,
}

impl ChangesetRecord {
    /// Create a record from a title, deriving type and breaking flag from it
    pub fn new(title: impl Into<String>, pr: u64, author: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            change_type: ChangeType::from_title(&title),
            breaking: parser::detect_breaking(&title, "", false),
            description: title.trim().to_string(),
            title,
            pr,
            author: author.into(),
            branch: None,
            filename: None,
        }
    }

    /// Build the changeset for an accepted pull request.
    ///
    /// The branch falls back to `mainline` and the description to the title.
    pub fn from_pull_request(pull: &PullRequest, mainline: &str) -> Self {
        let body = pull.body.as_deref().unwrap_or("");
        Self::new(&pull.title, pull.number, &pull.author)
            .with_breaking(parser::detect_breaking(&pull.title, body, pull.breaking))
            .with_branch(pull.branch.as_deref().unwrap_or(mainline))
            .with_description(body)
    }

    /// Set the change type
    pub fn with_type(mut self, change_type: ChangeType) -> Self {
        self.change_type = change_type;
        self
    }

    /// Set the breaking flag
    pub fn with_breaking(mut self, breaking: bool) -> Self {
        self.breaking = breaking;
        self
    }

    /// Set the branch
    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    /// Set the description; an empty body keeps the title as description
    pub fn with_description(mut self, description: impl AsRef<str>) -> Self {
        let description = description.as_ref().trim();
        self.description = if description.is_empty() {
            self.title.trim().to_string()
        } else {
            description.to_string()
        };
        self
    }

    /// Check whether this record introduces a feature
    pub fn is_feature(&self) -> bool {
        self.change_type == ChangeType::Feat
    }

    /// Check whether this record is a fix
    pub fn is_fix(&self) -> bool {
        self.change_type == ChangeType::Fix
    }
}

/// Pull request data handed over by the change-record generator
#[derive(Debug, Clone, Default)]
pub struct PullRequest {
    /// Pull request number
    pub number: u64,
    /// Pull request title
    pub title: String,
    /// Pull request author
    pub author: String,
    /// Pull request body
    pub body: Option<String>,
    /// Explicit breaking flag
    pub breaking: bool,
    /// Branch the pull request was merged into
    pub branch: Option<String>,
}
