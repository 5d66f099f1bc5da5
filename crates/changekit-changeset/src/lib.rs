//! Changekit Changeset - per-change records for release preparation
//!
//! This crate provides the changeset record model, the on-disk record
//! format, the filesystem-backed store and the classification of records
//! into release categories and a version bump.

pub mod classify;
pub mod codec;
pub mod parser;
pub mod store;
pub mod types;

pub use classify::{categorize, determine_bump, Categories, CategorySummary};
pub use codec::{decode, encode};
pub use store::ChangesetStore;
pub use types::{ChangeType, ChangesetRecord, PullRequest};
