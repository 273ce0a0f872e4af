//! Repository access abstraction layer
//!
//! The resolver needs three read-only facts about the repository being
//! released: its tags, its branch names and its default branch. This module
//! provides a trait-based abstraction over where those facts come from.
//!
//! # Overview
//!
//! [RepositoryProvider] opens a repository, [Repository] answers the queries.
//! The concrete implementations include:
//!
//! - [github::GitHubProvider]: the GitHub REST API, through a blocking `reqwest` client
//! - [repository::LocalProvider]: a local checkout, through the `git2` crate
//! - [mock::MockRepository]: an in-memory repository for testing
//!
//! # Usage
//!
//! ```rust
//! # use semver_release_vars::git::{MockRepository, Repository};
//! # use semver_release_vars::domain::TagRef;
//! let repo = MockRepository::new()
//!     .with_tag(TagRef::new("v1.0.0", "abc123"))
//!     .with_branch("main")
//!     .with_default_branch("main");
//! assert_eq!(repo.list_tags().unwrap().len(), 1);
//! ```

pub mod github;
pub mod mock;
pub mod repository;

pub use github::{GitHubProvider, GitHubRepository};
pub use mock::{MockProvider, MockRepository};
pub use repository::{Git2Repository, LocalProvider};

use crate::domain::TagRef;
use crate::error::Result;

/// Read-only view of a hosted repository
///
/// All calls are synchronous and are not retried; a failure is fatal to the run.
pub trait Repository {
    /// All tags of the repository, whatever their naming
    fn list_tags(&self) -> Result<Vec<TagRef>>;

    /// All branch names, in the order the host returns them
    ///
    /// The order matters: the first matching maintenance branch is used.
    fn list_branch_names(&self) -> Result<Vec<String>>;

    /// The repository's default branch, if it has one
    fn default_branch(&self) -> Result<Option<String>>;
}

/// Opens repositories on a hosting service
pub trait RepositoryProvider {
    type Repo: Repository;

    /// Connect to `api_url` with `token` and open the repository `slug`
    ///
    /// # Errors
    /// Connection, authentication or lookup failures.
    fn open(&self, api_url: &str, token: &str, slug: &str) -> Result<Self::Repo>;

    /// Whether [RepositoryProvider::open] needs an API token
    fn requires_token(&self) -> bool {
        true
    }
}
