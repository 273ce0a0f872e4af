//! CI context abstraction layer
//!
//! The release resolver never reads the process environment or writes to the
//! CI runner directly. Everything goes through the [CiContext] trait, which has
//! these implementations:
//!
//! - [github::GitHubActionsContext]: GitHub Actions runner environment
//! - [local::LocalContext]: command-line flags, for runs outside of CI
//! - [mock::MockContext]: in-memory context for tests

pub mod github;
pub mod local;
pub mod mock;

pub use github::GitHubActionsContext;
pub use local::LocalContext;
pub use mock::MockContext;

use crate::error::Result;

/// Access to the CI run that triggered the release.
pub trait CiContext {
    /// Value of an action input, `None` when absent or blank
    fn input(&self, name: &str) -> Option<String>;

    /// Whether the triggering ref is a branch (as opposed to a tag)
    fn is_ref_type_branch(&self) -> bool;

    /// Short name of the triggering ref, e.g. `releases/trigger`
    fn ref_name(&self) -> Result<String>;

    /// Identifier of the current run
    fn run_id(&self) -> Result<String>;

    /// Repository slug, e.g. `octocat/Hello-World`
    fn repository_slug(&self) -> Result<String>;

    /// Root URL of the hosting API, if the runner provides one
    fn api_url(&self) -> Option<String>;

    /// Value of an environment variable that must be set
    ///
    /// # Errors
    /// `Config` when the variable is unset or empty.
    fn required_env(&self, name: &str) -> Result<String>;

    /// Emit an output variable
    fn set_output(&mut self, name: &str, value: &str) -> Result<()>;

    /// Emit an output variable only when a value is present
    fn set_optional_output(&mut self, name: &str, value: Option<&str>) -> Result<()> {
        match value {
            Some(value) => self.set_output(name, value),
            None => Ok(()),
        }
    }

    /// Emit several output variables at once
    ///
    /// Implementations backed by a file write the whole batch in one go.
    fn set_outputs(&mut self, outputs: &[(&str, &str)]) -> Result<()> {
        for (name, value) in outputs {
            self.set_output(name, value)?;
        }
        Ok(())
    }

    /// Diagnostic message for the CI log
    fn debug(&self, message: &str);
}
