//! Conventional title parsing
//!
//! Pull request titles follow the Conventional Commits header format:
//! https://www.conventionalcommits.org/
//!
//! A change is breaking when the header carries the `!` marker right before
//! the colon (`feat!:`, `feat(api)!:`), when the title starts with
//! `BREAKING CHANGE:`, or when the body contains a `BREAKING CHANGE:` footer.
//! Exclamation marks anywhere else in the title are ordinary text.

use regex::Regex;
use std::sync::LazyLock;

/// Regex for a conventional header: `type(scope)!: description`
static CONVENTIONAL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<type>[a-zA-Z]+)(?:\((?P<scope>[^)]*)\))?(?P<breaking>!)?:\s*(?P<description>.*)$")
        .expect("Invalid regex")
});

/// Regex for a `BREAKING CHANGE:` title prefix
static BREAKING_PREFIX_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?P<token>BREAKING[ -]CHANGE):\s*(?P<description>.*)$")
        .expect("Invalid regex")
});

/// Footer tokens that mark a breaking change inside a body
const BREAKING_FOOTERS: [&str; 2] = ["BREAKING CHANGE:", "BREAKING-CHANGE:"];

/// Header fields of a conventional title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleHeader<'a> {
    /// Type token as written
    pub change_type: &'a str,
    /// Optional scope
    pub scope: Option<&'a str>,
    /// Whether the `!` marker is present
    pub breaking: bool,
    /// Text after the colon
    pub description: &'a str,
}

/// Parse a conventional header
pub fn parse_header(title: &str) -> Option<TitleHeader<'_>> {
    let caps = CONVENTIONAL_REGEX.captures(title.trim())?;

    Some(TitleHeader {
        change_type: caps.name("type")?.as_str(),
        scope: caps.name("scope").map(|m| m.as_str()),
        breaking: caps.name("breaking").is_some(),
        description: caps.name("description")?.as_str(),
    })
}

/// Get the type token of a conventional title, if any
pub fn conventional_type(title: &str) -> Option<&str> {
    parse_header(title).map(|h| h.change_type)
}

/// Decide whether a pull request introduces a breaking change
pub fn detect_breaking(title: &str, body: &str, explicit: bool) -> bool {
    if explicit {
        return true;
    }

    let title = title.trim();
    if parse_header(title).is_some_and(|h| h.breaking) {
        return true;
    }

    if BREAKING_PREFIX_REGEX.is_match(title) {
        return true;
    }

    BREAKING_FOOTERS.iter().any(|footer| body.contains(footer))
}

/// Split the leading type segment (`feat: `, `fix(api)!: `,
/// `BREAKING CHANGE: `) from the rest of a title.
///
/// The returned prefix excludes the colon. Titles without a prefix return
/// `None` and the trimmed title.
pub fn split_prefix(title: &str) -> (Option<&str>, &str) {
    let title = title.trim();

    if let Some(caps) = BREAKING_PREFIX_REGEX.captures(title) {
        if let (Some(token), Some(rest)) = (caps.name("token"), caps.name("description")) {
            return (Some(token.as_str()), rest.as_str());
        }
    }

    if let Some(caps) = CONVENTIONAL_REGEX.captures(title) {
        if let Some(rest) = caps.name("description") {
            let prefix_end = title[..rest.start()].trim_end().len();
            // Drop the colon from `type(scope)!:`
            let prefix = &title[..prefix_end - 1];
            return (Some(prefix), rest.as_str());
        }
    }

    (None, title)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_feat() {
        let header = parse_header("feat: add new feature").unwrap();

        assert_eq!(header.change_type, "feat");
        assert_eq!(header.description, "add new feature");
        assert!(header.scope.is_none());
        assert!(!header.breaking);
    }

    #[test]
    fn test_parse_with_scope() {
        let header = parse_header("fix(parser): handle edge case").unwrap();

        assert_eq!(header.change_type, "fix");
        assert_eq!(header.scope, Some("parser"));
        assert_eq!(header.description, "handle edge case");
    }

    #[test]
    fn test_parse_breaking_with_scope() {
        let header = parse_header("refactor(core)!: major refactoring").unwrap();

        assert_eq!(header.change_type, "refactor");
        assert!(header.breaking);
    }

    #[test]
    fn test_parse_non_conventional() {
        assert!(parse_header("Just a regular title").is_none());
        assert!(conventional_type("Update README.md").is_none());
    }

    #[test]
    fn test_breaking_marker() {
        assert!(detect_breaking("feat!: drop old API", "", false));
        assert!(detect_breaking("fix(api)!: rename field", "", false));
    }

    #[test]
    fn test_stray_exclamation_is_not_breaking() {
        assert!(!detect_breaking("fix: handle \"oops!\" message", "", false));
        assert!(!detect_breaking("feat: wow! a widget", "", false));
        assert!(!detect_breaking("Hotfix! everything", "", false));
    }

    #[test]
    fn test_breaking_prefix_and_footer() {
        assert!(detect_breaking("BREAKING CHANGE: refactor API", "", false));
        assert!(detect_breaking("breaking-change: refactor API", "", false));
        assert!(detect_breaking("feat: thing", "Body\n\nBREAKING-CHANGE: gone", false));
        assert!(!detect_breaking("feat: thing", "mentions breaking change casually", false));
    }

    #[test]
    fn test_explicit_flag() {
        assert!(detect_breaking("docs: typo", "", true));
    }

    #[test]
    fn test_split_prefix() {
        assert_eq!(split_prefix("feat: add widget"), (Some("feat"), "add widget"));
        assert_eq!(split_prefix("feat!: drop API"), (Some("feat!"), "drop API"));
        assert_eq!(
            split_prefix("fix(parser)!: crash"),
            (Some("fix(parser)!"), "crash")
        );
        assert_eq!(
            split_prefix("BREAKING CHANGE: new config"),
            (Some("BREAKING CHANGE"), "new config")
        );
        assert_eq!(split_prefix("  Update docs "), (None, "Update docs"));
    }
}
