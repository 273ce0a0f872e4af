use crate::domain::TagRef;
use crate::error::Result;
use crate::git::{Repository, RepositoryProvider};
use git2::{BranchType, Repository as Git2Repo};
use std::path::{Path, PathBuf};

const REMOTE: &str = "origin";

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }
}

impl Repository for Git2Repository {
    fn list_tags(&self) -> Result<Vec<TagRef>> {
        let names = self.repo.tag_names(None)?;
        let mut tags = Vec::new();

        for name in names.iter().flatten() {
            let object = self.repo.revparse_single(&format!("refs/tags/{}", name))?;
            // tags on trees or blobs keep the id of the object the ref names
            let target = match object.peel_to_commit() {
                Ok(commit) => commit.id(),
                Err(e) => {
                    tracing::trace!(tag = name, error = %e, "tag does not point at a commit");
                    object.id()
                }
            };
            tags.push(TagRef::new(name, target.to_string()));
        }

        Ok(tags)
    }

    /// Local branches first, then `origin` branches not already listed
    fn list_branch_names(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = Vec::new();

        for branch in self.repo.branches(Some(BranchType::Local))? {
            let (branch, _) = branch?;
            if let Some(name) = branch.name()? {
                names.push(name.to_string());
            }
        }

        let remote_prefix = format!("{}/", REMOTE);
        for branch in self.repo.branches(Some(BranchType::Remote))? {
            let (branch, _) = branch?;
            let Some(name) = branch.name()? else {
                continue;
            };
            let Some(short) = name.strip_prefix(&remote_prefix) else {
                continue;
            };
            if short != "HEAD" && !names.iter().any(|n| n == short) {
                names.push(short.to_string());
            }
        }

        Ok(names)
    }

    /// Branch `refs/remotes/origin/HEAD` points at, if the clone recorded it
    fn default_branch(&self) -> Result<Option<String>> {
        let head_ref = format!("refs/remotes/{}/HEAD", REMOTE);
        let target_prefix = format!("refs/remotes/{}/", REMOTE);

        match self.repo.find_reference(&head_ref) {
            Ok(reference) => Ok(reference
                .symbolic_target()
                .and_then(|target| target.strip_prefix(&target_prefix))
                .map(str::to_string)),
            Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// Opens local checkouts; API URL and token are ignored
#[derive(Debug, Clone)]
pub struct LocalProvider {
    path: PathBuf,
}

impl LocalProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        LocalProvider { path: path.into() }
    }
}

impl RepositoryProvider for LocalProvider {
    type Repo = Git2Repository;

    fn open(&self, _api_url: &str, _token: &str, _slug: &str) -> Result<Git2Repository> {
        Git2Repository::open(&self.path)
    }

    fn requires_token(&self) -> bool {
        false
    }
}
