use thiserror::Error;

/// Unified error type for release variable resolution
#[derive(Error, Debug)]
pub enum ReleaseVarsError {
    #[error("Invalid version: {0}")]
    InvalidVersion(String),

    #[error("Invalid branch: {0}")]
    InvalidBranch(String),

    #[error("Missing version: {0}")]
    MissingVersion(String),

    #[error("Duplicate version: a tag for version {0} already exists in the repository")]
    DuplicateVersion(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Repository API error: {0}")]
    Api(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration file error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Convenience type alias for Results in semver-release-vars
pub type Result<T> = std::result::Result<T, ReleaseVarsError>;

impl ReleaseVarsError {
    /// Create an invalid version error with context
    pub fn invalid_version(msg: impl Into<String>) -> Self {
        ReleaseVarsError::InvalidVersion(msg.into())
    }

    /// Create an invalid branch error with context
    pub fn invalid_branch(msg: impl Into<String>) -> Self {
        ReleaseVarsError::InvalidBranch(msg.into())
    }

    /// Create a missing version error with context
    pub fn missing_version(msg: impl Into<String>) -> Self {
        ReleaseVarsError::MissingVersion(msg.into())
    }

    /// Create a duplicate version error for the given version
    pub fn duplicate_version(version: impl Into<String>) -> Self {
        ReleaseVarsError::DuplicateVersion(version.into())
    }

    /// Create a not-found error with context
    pub fn not_found(msg: impl Into<String>) -> Self {
        ReleaseVarsError::NotFound(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseVarsError::Config(msg.into())
    }

    /// Create a repository API error with context
    pub fn api(msg: impl Into<String>) -> Self {
        ReleaseVarsError::Api(msg.into())
    }
}
