//! Repository URL resolution for pull request links

use std::fs;
use std::path::Path;

use changekit_core::config::NotesConfig;
use serde_json::Value;
use tracing::debug;

/// Normalize a repository URL to `https://host/owner/repo`.
///
/// Strips a `git+` prefix and a `.git` suffix and rewrites
/// `git@github.com:` ssh remotes to https.
pub fn normalize_repo_url(url: &str) -> String {
    let url = url.trim();
    let url = url.strip_prefix("git+").unwrap_or(url);

    let url = match url.strip_prefix("git@github.com:") {
        Some(path) => format!("https://github.com/{}", path),
        None => url.to_string(),
    };

    let url = url.trim_end_matches('/');
    url.strip_suffix(".git").unwrap_or(url).to_string()
}

/// Read the `repository` field of `package.json` in `dir`.
///
/// Accepts both the string form and the `{ "url": ... }` object form.
pub fn repo_url_from_package_json(dir: &Path) -> Option<String> {
    let path = dir.join("package.json");
    let content = fs::read_to_string(&path).ok()?;

    let manifest: Value = match serde_json::from_str(&content) {
        Ok(value) => value,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "ignoring unparsable package.json");
            return None;
        }
    };

    let url = match manifest.get("repository")? {
        Value::String(url) => url.as_str(),
        Value::Object(repository) => repository.get("url")?.as_str()?,
        _ => return None,
    };

    Some(url.to_string()).filter(|u| !u.trim().is_empty())
}

/// Resolve the repository URL: explicit value, then configuration, then
/// `package.json` in `project_dir`. The result is normalized.
pub fn resolve_repo_url(
    explicit: Option<&str>,
    config: &NotesConfig,
    project_dir: &Path,
) -> Option<String> {
    let explicit = explicit.map(str::to_string);
    let configured = || config.repo_url.clone();
    let manifest = || repo_url_from_package_json(project_dir);

    let resolved = explicit
        .filter(|u| !u.trim().is_empty())
        .or_else(|| configured().filter(|u| !u.trim().is_empty()))
        .or_else(manifest)
        .map(|u| normalize_repo_url(&u));

    debug!(repo_url = ?resolved, "repository url resolved");
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_normalize() {
        assert_eq!(
            normalize_repo_url("git+https://github.com/octo/widgets.git"),
            "https://github.com/octo/widgets"
        );
        assert_eq!(
            normalize_repo_url("git@github.com:octo/widgets.git"),
            "https://github.com/octo/widgets"
        );
        assert_eq!(
            normalize_repo_url("https://github.com/octo/widgets/"),
            "https://github.com/octo/widgets"
        );
        assert_eq!(
            normalize_repo_url("https://gitlab.com/octo/widgets"),
            "https://gitlab.com/octo/widgets"
        );
    }

    #[test]
    fn test_package_json_string_form() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("package.json"),
            r#"{ "name": "widgets", "repository": "git+https://github.com/octo/widgets.git" }"#,
        )
        .unwrap();

        assert_eq!(
            repo_url_from_package_json(temp.path()).as_deref(),
            Some("git+https://github.com/octo/widgets.git")
        );
    }

    #[test]
    fn test_package_json_object_form() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("package.json"),
            r#"{ "repository": { "type": "git", "url": "https://github.com/octo/widgets" } }"#,
        )
        .unwrap();

        assert_eq!(
            repo_url_from_package_json(temp.path()).as_deref(),
            Some("https://github.com/octo/widgets")
        );
    }

    #[test]
    fn test_package_json_missing_or_invalid() {
        let temp = TempDir::new().unwrap();
        assert!(repo_url_from_package_json(temp.path()).is_none());

        fs::write(temp.path().join("package.json"), "not json").unwrap();
        assert!(repo_url_from_package_json(temp.path()).is_none());

        fs::write(temp.path().join("package.json"), r#"{ "repository": 3 }"#).unwrap();
        assert!(repo_url_from_package_json(temp.path()).is_none());
    }

    #[test]
    fn test_resolution_order() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("package.json"),
            r#"{ "repository": "git@github.com:octo/from-package.git" }"#,
        )
        .unwrap();

        let mut config = NotesConfig::default();
        assert_eq!(
            resolve_repo_url(None, &config, temp.path()).as_deref(),
            Some("https://github.com/octo/from-package")
        );

        config.repo_url = Some("https://github.com/octo/from-config".to_string());
        assert_eq!(
            resolve_repo_url(None, &config, temp.path()).as_deref(),
            Some("https://github.com/octo/from-config")
        );

        assert_eq!(
            resolve_repo_url(Some("https://github.com/octo/explicit.git"), &config, temp.path())
                .as_deref(),
            Some("https://github.com/octo/explicit")
        );
    }

    #[test]
    fn test_resolution_without_sources() {
        let temp = TempDir::new().unwrap();
        assert!(resolve_repo_url(Some(""), &NotesConfig::default(), temp.path()).is_none());
    }
}
