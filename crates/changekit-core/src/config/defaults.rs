//! Default configuration values

/// Default configuration file name (YAML)
pub const DEFAULT_CONFIG_YAML: &str = "changekit.yaml";

/// Default configuration file name (TOML)
pub const DEFAULT_CONFIG_TOML: &str = "changekit.toml";

/// Alternative configuration file name
pub const ALT_CONFIG_FILE: &str = ".changekit.yaml";

/// Get list of config file names to search for
pub fn config_file_names() -> Vec<&'static str> {
    vec![
        DEFAULT_CONFIG_YAML,
        DEFAULT_CONFIG_TOML,
        ALT_CONFIG_FILE,
        ".changekit.toml",
    ]
}

/// Default configuration template
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# changekit configuration

changesets:
  directory: .changesets
  mainline_branch: develop
  staging_prefix: milestone/

release_notes:
  format: markdown
  include_contributors: true

github:
  api_url: https://api.github.com
  timeout_secs: 10
  first_time_threshold: 3
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_template_matches_defaults() {
        let parsed: Config = serde_yaml::from_str(DEFAULT_CONFIG_TEMPLATE).unwrap();
        let defaults = Config::default();
        assert_eq!(parsed.changesets.directory, defaults.changesets.directory);
        assert_eq!(parsed.changesets.mainline_branch, defaults.changesets.mainline_branch);
        assert_eq!(parsed.github.api_url, defaults.github.api_url);
    }

    #[test]
    fn test_template_validates() {
        let parsed: Config = serde_yaml::from_str(DEFAULT_CONFIG_TEMPLATE).unwrap();
        assert!(crate::config::validate_config(&parsed).is_ok());
        assert!(parsed.release_notes.include_contributors);
    }
}
