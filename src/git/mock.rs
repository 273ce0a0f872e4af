use crate::domain::TagRef;
use crate::error::{ReleaseVarsError, Result};
use crate::git::{Repository, RepositoryProvider};

/// Mock repository for testing without a hosting service
#[derive(Debug, Clone, Default)]
pub struct MockRepository {
    tags: Vec<TagRef>,
    branches: Vec<String>,
    default_branch: Option<String>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tag
    pub fn with_tag(mut self, tag: TagRef) -> Self {
        self.tags.push(tag);
        self
    }

    /// Add tags by name, each pointing at a made-up commit
    pub fn with_tag_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for (i, name) in names.into_iter().enumerate() {
            self.tags.push(TagRef::new(name, format!("{:040x}", i + 1)));
        }
        self
    }

    /// Add a branch; branches are listed in insertion order
    pub fn with_branch(mut self, name: impl Into<String>) -> Self {
        self.branches.push(name.into());
        self
    }

    /// Set the default branch
    pub fn with_default_branch(mut self, name: impl Into<String>) -> Self {
        self.default_branch = Some(name.into());
        self
    }
}

impl Repository for MockRepository {
    fn list_tags(&self) -> Result<Vec<TagRef>> {
        Ok(self.tags.clone())
    }

    fn list_branch_names(&self) -> Result<Vec<String>> {
        Ok(self.branches.clone())
    }

    fn default_branch(&self) -> Result<Option<String>> {
        Ok(self.default_branch.clone())
    }
}

/// Provider handing out a fixed mock repository for one slug
#[derive(Debug, Clone)]
pub struct MockProvider {
    slug: String,
    repo: MockRepository,
}

impl MockProvider {
    pub fn new(slug: impl Into<String>, repo: MockRepository) -> Self {
        MockProvider {
            slug: slug.into(),
            repo,
        }
    }
}

impl RepositoryProvider for MockProvider {
    type Repo = MockRepository;

    fn open(&self, _api_url: &str, _token: &str, slug: &str) -> Result<MockRepository> {
        if slug == self.slug {
            Ok(self.repo.clone())
        } else {
            Err(ReleaseVarsError::not_found(format!(
                "repository '{}' does not exist",
                slug
            )))
        }
    }
}
