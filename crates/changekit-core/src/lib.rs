//! Changekit Core - shared foundation for changeset-based releases
//!
//! This crate provides the error taxonomy, configuration loading and the
//! version bump type used by the changeset store and the release notes
//! renderer.

pub mod config;
pub mod error;
pub mod types;

pub use error::{ChangekitError, ChangesetError, ConfigError, NotesError, Result};
pub use types::BumpType;
