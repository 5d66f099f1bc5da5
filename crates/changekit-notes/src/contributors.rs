//! First-time contributor detection
//!
//! An author counts as a first-time contributor when the GitHub commits API
//! returns at most `first_time_threshold` commits by them. Lookups are an
//! enrichment: every failure degrades to "not first-time".

use std::time::Duration;

use async_trait::async_trait;
use changekit_core::config::GitHubConfig;
use reqwest::{header, Client, StatusCode};
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use crate::repo_url::normalize_repo_url;

/// Errors raised while looking up a contributor
#[derive(Debug, Error)]
pub enum ContributorError {
    /// Repository URL does not point at a GitHub repository
    #[error("Not a GitHub repository URL: {0}")]
    InvalidRepository(String),

    /// API returned a non-success status
    #[error("GitHub API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Transport or decoding failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Decides whether an author is contributing for the first time
#[async_trait]
pub trait ContributorClassifier: Send + Sync {
    /// Returns `false` whenever the answer cannot be determined
    async fn is_first_time(&self, author: &str) -> bool;
}

/// Owner and name of a GitHub repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitHubRepository {
    pub owner: String,
    pub name: String,
}

impl GitHubRepository {
    /// Parse `https://github.com/<owner>/<repo>` and its git/ssh variants
    pub fn parse(repo_url: &str) -> Result<Self, ContributorError> {
        let normalized = normalize_repo_url(repo_url);
        let invalid = || ContributorError::InvalidRepository(repo_url.to_string());

        let url = Url::parse(&normalized).map_err(|_| invalid())?;
        let host = url.host_str().ok_or_else(invalid)?;
        if host != "github.com" && host != "www.github.com" {
            return Err(invalid());
        }

        let mut segments = url.path_segments().ok_or_else(invalid)?;
        let owner = segments.next().filter(|s| !s.is_empty()).ok_or_else(invalid)?;
        let name = segments
            .next()
            .map(|s| s.trim_end_matches(".git"))
            .filter(|s| !s.is_empty())
            .ok_or_else(invalid)?;

        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}

/// Contributor classifier backed by the GitHub commits API
pub struct GitHubContributors {
    client: Client,
    api_url: String,
    repository: GitHubRepository,
    token: String,
    threshold: usize,
}

impl GitHubContributors {
    /// Create a classifier for `repository`
    pub fn new(
        repository: GitHubRepository,
        token: impl Into<String>,
        config: &GitHubConfig,
    ) -> Result<Self, ContributorError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("changekit/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            repository,
            token: token.into(),
            threshold: config.first_time_threshold,
        })
    }

    /// Build a classifier when both a repository URL and a token are available
    pub fn from_parts(
        repo_url: Option<&str>,
        token: Option<&str>,
        config: &GitHubConfig,
    ) -> Option<Self> {
        let repo_url = repo_url.map(str::trim).filter(|u| !u.is_empty())?;
        let token = token.map(str::trim).filter(|t| !t.is_empty())?;

        let repository = match GitHubRepository::parse(repo_url) {
            Ok(repository) => repository,
            Err(e) => {
                debug!(error = %e, "contributor lookups disabled");
                return None;
            }
        };

        match Self::new(repository, token, config) {
            Ok(classifier) => Some(classifier),
            Err(e) => {
                warn!(error = %e, "failed to build GitHub client, contributor lookups disabled");
                None
            }
        }
    }

    /// Count the author's commits, up to `threshold + 1`
    pub async fn recent_commit_count(&self, author: &str) -> Result<usize, ContributorError> {
        let url = format!(
            "{}/repos/{}/{}/commits",
            self.api_url, self.repository.owner, self.repository.name
        );
        let per_page = (self.threshold + 1).to_string();

        debug!(author, url = %url, "GitHub API request");

        let response = self
            .client
            .get(&url)
            .query(&[("author", author), ("per_page", per_page.as_str())])
            .header(header::AUTHORIZATION, format!("token {}", self.token))
            .header(header::ACCEPT, "application/vnd.github.v3+json")
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            let message = response.text().await.unwrap_or_default();
            return Err(ContributorError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let commits: Vec<serde_json::Value> = response.json().await?;
        Ok(commits.len())
    }
}

#[async_trait]
impl ContributorClassifier for GitHubContributors {
    async fn is_first_time(&self, author: &str) -> bool {
        if author.trim().is_empty() {
            return false;
        }

        match self.recent_commit_count(author).await {
            Ok(count) => {
                debug!(author, count, threshold = self.threshold, "contributor commits counted");
                count <= self.threshold
            }
            Err(e) => {
                warn!(author, error = %e, "contributor lookup failed");
                false
            }
        }
    }
}

/// Check a single author against a repository.
///
/// Returns `false` when any input is missing or the lookup fails.
pub async fn is_first_time_contributor(
    author: Option<&str>,
    repo_url: Option<&str>,
    token: Option<&str>,
    config: &GitHubConfig,
) -> bool {
    let Some(author) = author.filter(|a| !a.trim().is_empty()) else {
        return false;
    };

    match GitHubContributors::from_parts(repo_url, token, config) {
        Some(classifier) => classifier.is_first_time(author).await,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serve one canned HTTP response, returning the raw request
    async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut chunk = [0u8; 1024];
            loop {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&chunk[..n]);
                if request.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&request).to_string()
        });

        (format!("http://{}", addr), handle)
    }

    fn config(api_url: &str) -> GitHubConfig {
        GitHubConfig {
            api_url: api_url.to_string(),
            ..Default::default()
        }
    }

    fn repository() -> GitHubRepository {
        GitHubRepository {
            owner: "octo".to_string(),
            name: "widgets".to_string(),
        }
    }

    #[test]
    fn test_parse_repository_urls() {
        for url in [
            "https://github.com/octo/widgets",
            "https://github.com/octo/widgets.git",
            "git+https://github.com/octo/widgets.git",
            "git@github.com:octo/widgets.git",
            "https://github.com/octo/widgets/",
        ] {
            assert_eq!(GitHubRepository::parse(url).unwrap(), repository(), "{}", url);
        }

        assert!(GitHubRepository::parse("https://gitlab.com/octo/widgets").is_err());
        assert!(GitHubRepository::parse("https://github.com/octo").is_err());
        assert!(GitHubRepository::parse("not a url").is_err());
    }

    #[test]
    fn test_from_parts_requires_token_and_url() {
        let config = GitHubConfig::default();
        let url = Some("https://github.com/octo/widgets");

        assert!(GitHubContributors::from_parts(url, None, &config).is_none());
        assert!(GitHubContributors::from_parts(url, Some(" "), &config).is_none());
        assert!(GitHubContributors::from_parts(None, Some("secret"), &config).is_none());
        assert!(GitHubContributors::from_parts(Some("https://example.com/x/y"), Some("secret"), &config).is_none());
        assert!(GitHubContributors::from_parts(url, Some("secret"), &config).is_some());
    }

    #[tokio::test]
    async fn test_few_commits_is_first_time() {
        let (api_url, request) = serve_once("200 OK", r#"[{"sha":"a"},{"sha":"b"}]"#).await;
        let classifier = GitHubContributors::new(repository(), "secret", &config(&api_url)).unwrap();

        assert!(classifier.is_first_time("alice").await);

        let request = request.await.unwrap();
        assert!(request.starts_with("GET /repos/octo/widgets/commits?author=alice&per_page=4 "));
        assert!(request.to_lowercase().contains("authorization: token secret"));
        assert!(request.to_lowercase().contains("accept: application/vnd.github.v3+json"));
    }

    #[tokio::test]
    async fn test_many_commits_is_not_first_time() {
        let (api_url, _request) =
            serve_once("200 OK", r#"[{"sha":"a"},{"sha":"b"},{"sha":"c"},{"sha":"d"}]"#).await;
        let classifier = GitHubContributors::new(repository(), "secret", &config(&api_url)).unwrap();

        assert!(!classifier.is_first_time("veteran").await);
    }

    #[tokio::test]
    async fn test_api_rejection_is_not_first_time() {
        let (api_url, _request) = serve_once("401 Unauthorized", r#"{"message":"Bad credentials"}"#).await;
        let classifier = GitHubContributors::new(repository(), "bad", &config(&api_url)).unwrap();

        assert!(!classifier.is_first_time("alice").await);
    }

    #[tokio::test]
    async fn test_unparsable_body_is_not_first_time() {
        let (api_url, _request) = serve_once("200 OK", "<html>oops</html>").await;
        let classifier = GitHubContributors::new(repository(), "secret", &config(&api_url)).unwrap();

        assert!(classifier.recent_commit_count("alice").await.is_err());
    }

    #[tokio::test]
    async fn test_unreachable_api_is_not_first_time() {
        let classifier =
            GitHubContributors::new(repository(), "secret", &config("http://127.0.0.1:1")).unwrap();

        assert!(!classifier.is_first_time("alice").await);
    }

    #[tokio::test]
    async fn test_missing_inputs_are_not_first_time() {
        let config = GitHubConfig::default();
        let url = Some("https://github.com/octo/widgets");

        assert!(!is_first_time_contributor(None, url, Some("t"), &config).await);
        assert!(!is_first_time_contributor(Some("alice"), None, Some("t"), &config).await);
        assert!(!is_first_time_contributor(Some("alice"), url, None, &config).await);
    }
}
