//! GitHub Actions runner context.
//!
//! Reads the `GITHUB_*` and `INPUT_*` variables the runner exports and writes
//! outputs to the file named by `GITHUB_OUTPUT`.

use crate::ci::CiContext;
use crate::error::{ReleaseVarsError, Result};
use std::collections::HashMap;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

const OUTPUT_DELIMITER: &str = "ghadelimiter_release_vars";

/// Context backed by a snapshot of the runner environment
#[derive(Debug, Clone, Default)]
pub struct GitHubActionsContext {
    vars: HashMap<String, String>,
}

impl GitHubActionsContext {
    /// Snapshot the current process environment
    pub fn from_env() -> Self {
        Self::from_vars(std::env::vars())
    }

    /// Build a context from explicit variables
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        GitHubActionsContext {
            vars: vars
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Whether the process runs inside GitHub Actions
    pub fn is_github_actions(&self) -> bool {
        self.var("GITHUB_ACTIONS") == Some("true")
    }

    fn var(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    fn non_empty_var(&self, name: &str) -> Result<String> {
        self.var(name)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
            .ok_or_else(|| ReleaseVarsError::config(format!("{} is not set", name)))
    }

    fn output_file(&self) -> Option<PathBuf> {
        self.var("GITHUB_OUTPUT")
            .filter(|path| !path.is_empty())
            .map(PathBuf::from)
    }

    /// Print a workflow error annotation
    pub fn error(&self, message: &str) {
        println!("::error::{}", escape_command_data(message));
    }
}

/// Environment variable name for an action input (`package_version` -> `INPUT_PACKAGE_VERSION`)
pub fn input_var_name(name: &str) -> String {
    format!("INPUT_{}", name.replace(' ', "_").to_uppercase())
}

/// Escape data for a `::command::data` workflow command line
pub fn escape_command_data(data: &str) -> String {
    data.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Format one entry of the `GITHUB_OUTPUT` file
pub fn format_output_entry(name: &str, value: &str) -> String {
    if value.contains('\n') {
        format!(
            "{name}<<{delim}\n{value}\n{delim}\n",
            name = name,
            delim = OUTPUT_DELIMITER,
            value = value
        )
    } else {
        format!("{}={}\n", name, value)
    }
}

impl CiContext for GitHubActionsContext {
    fn input(&self, name: &str) -> Option<String> {
        self.var(&input_var_name(name))
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    }

    fn is_ref_type_branch(&self) -> bool {
        self.var("GITHUB_REF_TYPE") == Some("branch")
    }

    fn ref_name(&self) -> Result<String> {
        self.non_empty_var("GITHUB_REF_NAME")
    }

    fn run_id(&self) -> Result<String> {
        self.non_empty_var("GITHUB_RUN_ID")
    }

    fn repository_slug(&self) -> Result<String> {
        self.non_empty_var("GITHUB_REPOSITORY")
    }

    fn api_url(&self) -> Option<String> {
        self.var("GITHUB_API_URL")
            .filter(|url| !url.is_empty())
            .map(str::to_string)
    }

    fn required_env(&self, name: &str) -> Result<String> {
        self.non_empty_var(name)
    }

    fn set_output(&mut self, name: &str, value: &str) -> Result<()> {
        match self.output_file() {
            Some(path) => {
                let mut file = OpenOptions::new().create(true).append(true).open(path)?;
                file.write_all(format_output_entry(name, value).as_bytes())?;
            }
            None => println!("::set-output name={}::{}", name, escape_command_data(value)),
        }
        Ok(())
    }

    fn set_outputs(&mut self, outputs: &[(&str, &str)]) -> Result<()> {
        match self.output_file() {
            Some(path) => {
                let entries: String = outputs
                    .iter()
                    .map(|(name, value)| format_output_entry(name, value))
                    .collect();
                let mut file = OpenOptions::new().create(true).append(true).open(path)?;
                file.write_all(entries.as_bytes())?;
            }
            None => {
                for (name, value) in outputs {
                    println!("::set-output name={}::{}", name, escape_command_data(value));
                }
            }
        }
        Ok(())
    }

    fn debug(&self, message: &str) {
        tracing::debug!("{}", message);
        println!("::debug::{}", escape_command_data(message));
    }
}
