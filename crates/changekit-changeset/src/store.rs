//! Filesystem-backed changeset store
//!
//! Every record lives in its own `<timestamp>-pr-<number>.md` file inside
//! the store directory. Records are never rewritten: the store only creates
//! new files and deletes all of them after a release is cut.

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use changekit_core::config::StoreConfig;
use changekit_core::error::ChangesetError;
use tracing::{debug, info, instrument};

use crate::codec;
use crate::types::ChangesetRecord;

type Result<T> = std::result::Result<T, ChangesetError>;

/// File extension of changeset files
pub const CHANGESET_EXTENSION: &str = "md";

/// Timestamp layout used in changeset file names
const TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M%S";

/// Upper bound on `-N` suffixes tried for one timestamp and PR
const MAX_NAME_ATTEMPTS: u32 = 1000;

/// Directory of changeset files
#[derive(Debug, Clone)]
pub struct ChangesetStore {
    dir: PathBuf,
    config: StoreConfig,
}

impl ChangesetStore {
    /// Create a store rooted at `dir`
    pub fn new(dir: impl Into<PathBuf>, config: StoreConfig) -> Self {
        Self {
            dir: dir.into(),
            config,
        }
    }

    /// Create a store for a project, using the configured directory
    pub fn for_project(root: &Path, config: &StoreConfig) -> Self {
        Self::new(root.join(&config.directory), config.clone())
    }

    /// Store directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Persist a new record, returning its file name
    pub fn create(&self, record: &ChangesetRecord) -> Result<String> {
        self.create_at(record, Utc::now())
    }

    /// Persist a new record using `timestamp` for its file name.
    ///
    /// An existing file is never overwritten: a `-2`, `-3`, ... suffix is
    /// appended until a free name is found.
    #[instrument(skip(self, record), fields(pr = record.pr))]
    pub fn create_at(&self, record: &ChangesetRecord, timestamp: DateTime<Utc>) -> Result<String> {
        validate(record)?;

        std::fs::create_dir_all(&self.dir).map_err(|e| ChangesetError::io(&self.dir, e))?;

        let stem = format!("{}-pr-{}", timestamp.format(TIMESTAMP_FORMAT), record.pr);
        let content = codec::encode(record);

        for attempt in 1..=MAX_NAME_ATTEMPTS {
            let filename = if attempt == 1 {
                format!("{}.{}", stem, CHANGESET_EXTENSION)
            } else {
                format!("{}-{}.{}", stem, attempt, CHANGESET_EXTENSION)
            };
            let path = self.dir.join(&filename);

            let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    debug!(filename, "changeset file name taken, trying next suffix");
                    continue;
                }
                Err(e) => return Err(ChangesetError::io(path, e)),
            };

            file.write_all(content.as_bytes())
                .map_err(|e| ChangesetError::io(&path, e))?;

            info!(filename, pr = record.pr, "changeset created");
            return Ok(filename);
        }

        Err(ChangesetError::io(
            self.dir.join(format!("{}.{}", stem, CHANGESET_EXTENSION)),
            std::io::Error::new(ErrorKind::AlreadyExists, "no free changeset file name"),
        ))
    }

    /// Paths of all changeset files, in file name order.
    ///
    /// A missing store directory yields an empty list.
    pub fn files(&self) -> Result<Vec<PathBuf>> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(dir = %self.dir.display(), "changeset directory does not exist");
                return Ok(Vec::new());
            }
            Err(e) => return Err(ChangesetError::io(&self.dir, e)),
        };

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| ChangesetError::io(&self.dir, e))?;
            let path = entry.path();
            let file_type = entry.file_type().map_err(|e| ChangesetError::io(&path, e))?;

            if file_type.is_file() && path.extension().is_some_and(|e| e == CHANGESET_EXTENSION) {
                files.push(path);
            }
        }

        files.sort();
        Ok(files)
    }

    /// Read and decode a single changeset file
    pub fn read(&self, path: &Path) -> Result<ChangesetRecord> {
        let content = std::fs::read_to_string(path).map_err(|e| ChangesetError::io(path, e))?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        let mut record = codec::decode(&filename, &content)?;
        record.filename = Some(filename);
        Ok(record)
    }

    /// List records, optionally restricted to a branch.
    ///
    /// Listing the mainline branch also returns records from staging-line
    /// branches. Records without a branch are always returned.
    #[instrument(skip(self))]
    pub fn list(&self, branch: Option<&str>) -> Result<Vec<ChangesetRecord>> {
        let files = self.files()?;
        let mut records = Vec::with_capacity(files.len());

        for path in &files {
            let record = self.read(path)?;
            let included = branch
                .map(|filter| self.config.branch_matches(record.branch.as_deref(), filter))
                .unwrap_or(true);

            if included {
                records.push(record);
            }
        }

        debug!(
            total = files.len(),
            listed = records.len(),
            "changesets listed"
        );
        Ok(records)
    }

    /// Delete every changeset file, returning how many were removed
    #[instrument(skip(self))]
    pub fn delete_all(&self) -> Result<usize> {
        let files = self.files()?;

        for path in &files {
            std::fs::remove_file(path).map_err(|e| ChangesetError::io(path, e))?;
        }

        info!(count = files.len(), "changesets deleted");
        Ok(files.len())
    }
}

fn validate(record: &ChangesetRecord) -> Result<()> {
    if record.title.trim().is_empty() {
        return Err(ChangesetError::InvalidRecord("title cannot be empty".to_string()));
    }
    if record.author.trim().is_empty() {
        return Err(ChangesetError::InvalidRecord("author cannot be empty".to_string()));
    }
    if record.pr == 0 {
        return Err(ChangesetError::InvalidRecord(
            "pull request number must be positive".to_string(),
        ));
    }
    if record.branch.as_deref().is_some_and(|b| b.trim().is_empty()) {
        return Err(ChangesetError::InvalidRecord("branch cannot be empty".to_string()));
    }
    Ok(())
}
