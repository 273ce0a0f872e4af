use crate::ci::CiContext;
use crate::error::{ReleaseVarsError, Result};
use git2::Repository as Git2Repo;
use std::collections::HashMap;
use std::path::Path;

/// Context for runs outside of CI, filled from command-line flags.
///
/// Outputs are printed to stdout as `name=value` lines.
#[derive(Debug, Clone)]
pub struct LocalContext {
    branch: String,
    run_id: String,
    repository: String,
    inputs: HashMap<String, String>,
}

impl LocalContext {
    /// Create a new local context
    pub fn new(
        branch: impl Into<String>,
        run_id: impl Into<String>,
        repository: impl Into<String>,
    ) -> Self {
        LocalContext {
            branch: branch.into(),
            run_id: run_id.into(),
            repository: repository.into(),
            inputs: HashMap::new(),
        }
    }

    /// Provide an input value, as an action input would
    pub fn with_input(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.inputs.insert(name.into(), value.into());
        self
    }

    /// Name of the branch checked out in the repository at `path`
    ///
    /// # Errors
    /// `InvalidBranch` when HEAD is detached or unborn.
    pub fn current_branch<P: AsRef<Path>>(path: P) -> Result<String> {
        let repo = Git2Repo::discover(path)?;
        let head = repo
            .head()
            .map_err(|e| ReleaseVarsError::invalid_branch(format!("cannot read HEAD: {}", e)))?;

        if !head.is_branch() {
            return Err(ReleaseVarsError::invalid_branch(
                "HEAD is detached, pass --branch explicitly",
            ));
        }

        head.shorthand()
            .map(str::to_string)
            .ok_or_else(|| ReleaseVarsError::invalid_branch("HEAD branch name is not UTF-8"))
    }
}

impl CiContext for LocalContext {
    fn input(&self, name: &str) -> Option<String> {
        self.inputs
            .get(name)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    }

    fn is_ref_type_branch(&self) -> bool {
        true
    }

    fn ref_name(&self) -> Result<String> {
        Ok(self.branch.clone())
    }

    fn run_id(&self) -> Result<String> {
        Ok(self.run_id.clone())
    }

    fn repository_slug(&self) -> Result<String> {
        Ok(self.repository.clone())
    }

    fn api_url(&self) -> Option<String> {
        None
    }

    fn required_env(&self, name: &str) -> Result<String> {
        std::env::var(name)
            .ok()
            .filter(|value| !value.is_empty())
            .ok_or_else(|| ReleaseVarsError::config(format!("{} is not set", name)))
    }

    fn set_output(&mut self, name: &str, value: &str) -> Result<()> {
        println!("{}={}", name, value);
        Ok(())
    }

    fn debug(&self, message: &str) {
        tracing::debug!("{}", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_local_context_values() {
        let ctx = LocalContext::new("releases/trigger", "local", ".")
            .with_input("package_version", "1.2.3");

        assert!(ctx.is_ref_type_branch());
        assert_eq!(ctx.ref_name().unwrap(), "releases/trigger");
        assert_eq!(ctx.run_id().unwrap(), "local");
        assert_eq!(ctx.repository_slug().unwrap(), ".");
        assert_eq!(ctx.input("package_version").as_deref(), Some("1.2.3"));
        assert_eq!(ctx.input("missing"), None);
        assert_eq!(ctx.api_url(), None);
    }

    #[test]
    fn test_current_branch_of_fresh_repository_is_unborn() {
        let dir = tempdir().unwrap();
        Git2Repo::init(dir.path()).unwrap();

        let err = LocalContext::current_branch(dir.path()).unwrap_err();
        assert!(matches!(err, ReleaseVarsError::InvalidBranch(_)));
    }
}
