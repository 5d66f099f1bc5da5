//! Release notes generation

use std::sync::Arc;

use changekit_changeset::{categorize, determine_bump, ChangesetRecord};
use changekit_core::config::NotesConfig;
use changekit_core::NotesError;
use tokio::task::JoinSet;
use tracing::{debug, info, instrument, warn};

use crate::contributors::ContributorClassifier;
use crate::formatter::NotesFormat;
use crate::model::{Contributor, NoteCategories, NoteEntry, ReleaseNotes};

/// Release notes generator
pub struct ReleaseNotesGenerator {
    config: NotesConfig,
    repo_url: Option<String>,
    classifier: Option<Arc<dyn ContributorClassifier>>,
}

impl ReleaseNotesGenerator {
    /// Create a generator without pull request links or contributor lookups
    pub fn new(config: NotesConfig) -> Self {
        Self {
            config,
            repo_url: None,
            classifier: None,
        }
    }

    /// Link pull requests against this repository
    pub fn with_repo_url(mut self, repo_url: Option<String>) -> Self {
        self.repo_url = repo_url;
        self
    }

    /// Flag first-time contributors with this classifier
    pub fn with_classifier(mut self, classifier: Arc<dyn ContributorClassifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    /// Build release notes from changesets
    #[instrument(skip(self, records), fields(changesets = records.len()))]
    pub async fn generate(&self, records: &[ChangesetRecord]) -> ReleaseNotes {
        let categories = categorize(records);
        let bump_type = determine_bump(records);
        info!(%bump_type, summary = ?categories.summary(), "generating release notes");

        let categories = NoteCategories {
            breaking: entries(&categories.breaking),
            features: entries(&categories.features),
            fixes: entries(&categories.fixes),
            other: entries(&categories.other),
        };

        let contributors = if self.config.include_contributors {
            self.contributors(records).await
        } else {
            Vec::new()
        };

        ReleaseNotes {
            bump_type,
            categories,
            contributors,
            repo_url: self.repo_url.clone(),
        }
    }

    /// Render already generated notes
    pub fn format(&self, notes: &ReleaseNotes, format: NotesFormat) -> Result<String, NotesError> {
        format.formatter().format(notes)
    }

    /// Generate and render release notes in one step
    pub async fn render(
        &self,
        records: &[ChangesetRecord],
        format: NotesFormat,
    ) -> Result<String, NotesError> {
        let notes = self.generate(records).await;
        self.format(&notes, format)
    }

    /// Distinct authors in order of first appearance, each looked up once
    async fn contributors(&self, records: &[ChangesetRecord]) -> Vec<Contributor> {
        let mut authors: Vec<&str> = Vec::new();
        for record in records {
            let author = record.author.trim();
            if !author.is_empty() && !authors.contains(&author) {
                authors.push(author);
            }
        }

        let mut flags = vec![false; authors.len()];

        if let Some(classifier) = &self.classifier {
            let mut set = JoinSet::new();
            for (index, author) in authors.iter().enumerate() {
                let classifier = Arc::clone(classifier);
                let author = author.to_string();
                set.spawn(async move { (index, classifier.is_first_time(&author).await) });
            }

            while let Some(result) = set.join_next().await {
                match result {
                    Ok((index, first_time)) => flags[index] = first_time,
                    Err(e) => warn!(error = %e, "contributor lookup task failed"),
                }
            }
        }

        debug!(count = authors.len(), "contributors collected");

        authors
            .into_iter()
            .zip(flags)
            .map(|(username, is_first_time_contributor)| Contributor {
                username: username.to_string(),
                is_first_time_contributor,
            })
            .collect()
    }
}

fn entries(bucket: &[&ChangesetRecord]) -> Vec<NoteEntry> {
    bucket.iter().map(|record| NoteEntry::from(*record)).collect()
}
