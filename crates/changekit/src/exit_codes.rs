//! Exit codes for the CLI
//!
//! `analyze` reports the recommended bump through its exit status; see
//! [`changekit_core::BumpType::exit_code`].

/// Success, or no changesets to analyze
pub const SUCCESS: i32 = 0;

/// Any error
pub const ERROR: i32 = 1;
