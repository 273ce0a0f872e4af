use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// File name looked up in the working directory and the user config directory
pub const CONFIG_FILE_NAME: &str = "release-vars.toml";

/// Represents the complete configuration for semver-release-vars.
///
/// Every key is optional; the defaults reproduce the standard release conventions.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub release: ReleaseConfig,

    #[serde(default)]
    pub github: GitHubConfig,
}

fn default_snapshot_suffix() -> String {
    "SNAPSHOT".to_string()
}

fn default_run_branch_prefix() -> String {
    "releases/run-".to_string()
}

fn default_git_tag_prefix() -> String {
    "v".to_string()
}

fn default_token_env() -> String {
    "GITHUB_TOKEN".to_string()
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

/// Naming of derived versions, tags and branches.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ReleaseConfig {
    /// Pre-release token of the `next_*_snapshot_version` outputs
    #[serde(default = "default_snapshot_suffix")]
    pub snapshot_suffix: String,

    /// Run branch name is this prefix followed by the run id
    #[serde(default = "default_run_branch_prefix")]
    pub run_branch_prefix: String,

    /// Prefix of git tags (docker tags never carry it)
    #[serde(default = "default_git_tag_prefix")]
    pub git_tag_prefix: String,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        ReleaseConfig {
            snapshot_suffix: default_snapshot_suffix(),
            run_branch_prefix: default_run_branch_prefix(),
            git_tag_prefix: default_git_tag_prefix(),
        }
    }
}

/// GitHub API access.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GitHubConfig {
    /// Environment variable holding the API token
    #[serde(default = "default_token_env")]
    pub token_env: String,

    /// API root, used when the CI context does not provide one
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        GitHubConfig {
            token_env: default_token_env(),
            api_url: default_api_url(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `release-vars.toml` in current directory
/// 3. `release-vars.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new(CONFIG_FILE_NAME).exists() {
        fs::read_to_string(CONFIG_FILE_NAME)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    parse_config(&config_str)
}

/// Parse configuration from TOML text
pub fn parse_config(text: &str) -> Result<Config> {
    Ok(toml::from_str(text)?)
}
