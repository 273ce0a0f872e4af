use crate::ci::CiContext;
use crate::error::{ReleaseVarsError, Result};
use std::cell::RefCell;
use std::collections::HashMap;

/// In-memory CI context for testing without a runner
#[derive(Debug, Default)]
pub struct MockContext {
    inputs: HashMap<String, String>,
    env: HashMap<String, String>,
    ref_name: String,
    ref_is_branch: bool,
    run_id: String,
    repository: String,
    api_url: Option<String>,
    outputs: Vec<(String, String)>,
    debug_messages: RefCell<Vec<String>>,
}

impl MockContext {
    /// Create a context triggered by pushing `branch`
    pub fn on_branch(branch: impl Into<String>) -> Self {
        MockContext {
            ref_name: branch.into(),
            ref_is_branch: true,
            run_id: "123456".to_string(),
            repository: "octocat/Hello-World".to_string(),
            api_url: Some("https://api.github.com".to_string()),
            ..Default::default()
        }
    }

    /// Create a context triggered by pushing tag `tag`
    pub fn on_tag(tag: impl Into<String>) -> Self {
        MockContext {
            ref_is_branch: false,
            ..Self::on_branch(tag)
        }
    }

    pub fn set_input(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.inputs.insert(name.into(), value.into());
    }

    pub fn set_env(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.env.insert(name.into(), value.into());
    }

    pub fn set_run_id(&mut self, run_id: impl Into<String>) {
        self.run_id = run_id.into();
    }

    /// Outputs in emission order
    pub fn outputs(&self) -> &[(String, String)] {
        &self.outputs
    }

    /// Last value emitted for `name`
    pub fn output(&self, name: &str) -> Option<&str> {
        self.outputs
            .iter()
            .rev()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn debug_messages(&self) -> Vec<String> {
        self.debug_messages.borrow().clone()
    }
}

impl CiContext for MockContext {
    fn input(&self, name: &str) -> Option<String> {
        self.inputs.get(name).cloned()
    }

    fn is_ref_type_branch(&self) -> bool {
        self.ref_is_branch
    }

    fn ref_name(&self) -> Result<String> {
        Ok(self.ref_name.clone())
    }

    fn run_id(&self) -> Result<String> {
        Ok(self.run_id.clone())
    }

    fn repository_slug(&self) -> Result<String> {
        Ok(self.repository.clone())
    }

    fn api_url(&self) -> Option<String> {
        self.api_url.clone()
    }

    fn required_env(&self, name: &str) -> Result<String> {
        self.env
            .get(name)
            .cloned()
            .ok_or_else(|| ReleaseVarsError::config(format!("{} is not set", name)))
    }

    fn set_output(&mut self, name: &str, value: &str) -> Result<()> {
        self.outputs.push((name.to_string(), value.to_string()));
        Ok(())
    }

    fn debug(&self, message: &str) {
        self.debug_messages.borrow_mut().push(message.to_string());
    }
}
