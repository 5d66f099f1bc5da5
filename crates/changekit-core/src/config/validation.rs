//! Configuration validation

use tracing::debug;

use crate::error::{ConfigError, Result};

use super::types::Config;

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("validating configuration");
    validate_changesets(config)?;
    validate_release_notes(config)?;
    validate_github(config)?;
    debug!("configuration validation passed");
    Ok(())
}

fn validate_changesets(config: &Config) -> Result<()> {
    if config.changesets.directory.as_os_str().is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "changesets.directory".to_string(),
            message: "directory cannot be empty".to_string(),
        }
        .into());
    }

    if config.changesets.mainline_branch.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "changesets.mainline_branch".to_string(),
            message: "branch cannot be empty".to_string(),
        }
        .into());
    }

    Ok(())
}

fn validate_release_notes(config: &Config) -> Result<()> {
    let valid_formats = ["markdown", "md", "json"];
    if !valid_formats.contains(&config.release_notes.format.as_str()) {
        return Err(ConfigError::InvalidValue {
            field: "release_notes.format".to_string(),
            message: format!("must be one of: {}", valid_formats.join(", ")),
        }
        .into());
    }

    Ok(())
}

fn validate_github(config: &Config) -> Result<()> {
    if !config.github.api_url.starts_with("http://") && !config.github.api_url.starts_with("https://")
    {
        return Err(ConfigError::InvalidValue {
            field: "github.api_url".to_string(),
            message: "must be an http(s) URL".to_string(),
        }
        .into());
    }

    if config.github.timeout_secs == 0 {
        return Err(ConfigError::InvalidValue {
            field: "github.timeout_secs".to_string(),
            message: "timeout must be greater than zero".to_string(),
        }
        .into());
    }

    Ok(())
}
