//! Core types for changekit

use semver::Version;
use serde::{Deserialize, Serialize};

/// Semantic version increment recommended by a set of changesets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BumpType {
    /// Patch version bump (fixes and everything else)
    Patch,
    /// Minor version bump (new features)
    Minor,
    /// Major version bump (breaking changes)
    Major,
}

impl BumpType {
    /// Returns the string representation of the bump type
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Major => "major",
            Self::Minor => "minor",
            Self::Patch => "patch",
        }
    }

    /// Process exit code reported by `changekit analyze`
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Major => 1,
            Self::Minor => 2,
            Self::Patch => 3,
        }
    }

    /// Compute the next version from `current`.
    ///
    /// Pre-release and build metadata are dropped.
    pub fn apply(&self, current: &Version) -> Version {
        match self {
            Self::Major => Version::new(current.major + 1, 0, 0),
            Self::Minor => Version::new(current.major, current.minor + 1, 0),
            Self::Patch => Version::new(current.major, current.minor, current.patch + 1),
        }
    }
}

impl std::fmt::Display for BumpType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for BumpType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "major" => Ok(Self::Major),
            "minor" => Ok(Self::Minor),
            "patch" => Ok(Self::Patch),
            _ => Err(format!("Unknown bump type: {}", s)),
        }
    }
}
