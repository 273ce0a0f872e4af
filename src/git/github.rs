//! GitHub REST API repository access.

use crate::domain::TagRef;
use crate::error::{ReleaseVarsError, Result};
use crate::git::{Repository, RepositoryProvider};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use serde::de::DeserializeOwned;
use serde::Deserialize;

const PER_PAGE: usize = 100;
const API_VERSION: &str = "2022-11-28";

#[derive(Debug, Deserialize)]
struct RepoPayload {
    default_branch: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CommitPayload {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct TagPayload {
    name: String,
    commit: CommitPayload,
}

#[derive(Debug, Deserialize)]
struct BranchPayload {
    name: String,
}

/// Check that a slug looks like `owner/name`
pub fn validate_slug(slug: &str) -> Result<()> {
    match slug.split_once('/') {
        Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
            Ok(())
        }
        _ => Err(ReleaseVarsError::config(format!(
            "repository '{}' should be formatted as owner/name",
            slug
        ))),
    }
}

/// Authenticated blocking client for one API root
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    api_url: String,
}

impl GitHubClient {
    /// Build a client and check that `api_url` answers
    pub fn connect(api_url: &str, token: &str, user_agent: &str) -> Result<Self> {
        let client = Self::new(api_url, token, user_agent)?;
        client.check_api_url_validity()?;
        Ok(client)
    }

    /// Build a client without touching the network
    pub fn new(api_url: &str, token: &str, user_agent: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| ReleaseVarsError::config("API token contains invalid characters"))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "x-github-api-version",
            HeaderValue::from_static(API_VERSION),
        );
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(user_agent)
                .map_err(|_| ReleaseVarsError::config("user agent contains invalid characters"))?,
        );

        let http = Client::builder().default_headers(headers).build()?;

        Ok(GitHubClient {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// URL of a repository endpoint, e.g. `repo_url("o/r", "/tags")`
    pub fn repo_url(&self, slug: &str, endpoint: &str) -> String {
        format!("{}/repos/{}{}", self.api_url, slug, endpoint)
    }

    fn check_api_url_validity(&self) -> Result<()> {
        tracing::debug!(api_url = %self.api_url, "checking API root");
        let response = self.http.get(&self.api_url).send()?;
        if !response.status().is_success() {
            return Err(ReleaseVarsError::api(format!(
                "API root {} returned HTTP {}",
                self.api_url,
                response.status()
            )));
        }
        Ok(())
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        tracing::trace!(%url, "GET");
        let response = self.http.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(ReleaseVarsError::api(format!(
                "GET {} returned HTTP {}",
                url, status
            )));
        }

        let body = response.text()?;
        serde_json::from_str(&body)
            .map_err(|e| ReleaseVarsError::api(format!("unexpected payload from {}: {}", url, e)))
    }

    /// Fetch every page of a list endpoint, stopping at the first short page
    fn get_paged<T: DeserializeOwned>(&self, url: &str) -> Result<Vec<T>> {
        let mut items = Vec::new();
        for page in 1.. {
            let batch: Vec<T> =
                self.get_json(&format!("{}?per_page={}&page={}", url, PER_PAGE, page))?;
            let done = batch.len() < PER_PAGE;
            items.extend(batch);
            if done {
                break;
            }
        }
        Ok(items)
    }
}

/// Opens repositories through the GitHub REST API
#[derive(Debug, Clone)]
pub struct GitHubProvider {
    user_agent: String,
}

impl GitHubProvider {
    pub fn new(user_agent: impl Into<String>) -> Self {
        GitHubProvider {
            user_agent: user_agent.into(),
        }
    }
}

impl Default for GitHubProvider {
    fn default() -> Self {
        Self::new(concat!("semver-release-vars/", env!("CARGO_PKG_VERSION")))
    }
}

impl RepositoryProvider for GitHubProvider {
    type Repo = GitHubRepository;

    fn open(&self, api_url: &str, token: &str, slug: &str) -> Result<GitHubRepository> {
        validate_slug(slug)?;
        let client = GitHubClient::connect(api_url, token, &self.user_agent)?;
        GitHubRepository::fetch(client, slug)
    }
}

/// A repository hosted on GitHub
#[derive(Debug, Clone)]
pub struct GitHubRepository {
    client: GitHubClient,
    slug: String,
    default_branch: Option<String>,
}

impl GitHubRepository {
    /// Look up repository metadata for `slug`
    pub fn fetch(client: GitHubClient, slug: &str) -> Result<Self> {
        let payload: RepoPayload = client.get_json(&client.repo_url(slug, ""))?;
        Ok(GitHubRepository {
            client,
            slug: slug.to_string(),
            default_branch: payload.default_branch,
        })
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }
}

impl Repository for GitHubRepository {
    fn list_tags(&self) -> Result<Vec<TagRef>> {
        let tags: Vec<TagPayload> = self.client.get_paged(&self.client.repo_url(&self.slug, "/tags"))?;
        Ok(tags
            .into_iter()
            .map(|tag| TagRef::new(tag.name, tag.commit.sha))
            .collect())
    }

    fn list_branch_names(&self) -> Result<Vec<String>> {
        let branches: Vec<BranchPayload> = self
            .client
            .get_paged(&self.client.repo_url(&self.slug, "/branches"))?;
        Ok(branches.into_iter().map(|branch| branch.name).collect())
    }

    fn default_branch(&self) -> Result<Option<String>> {
        Ok(self.default_branch.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_slug() {
        assert!(validate_slug("octocat/Hello-World").is_ok());
        for slug in ["", "octocat", "/repo", "owner/", "a/b/c"] {
            assert!(
                matches!(validate_slug(slug), Err(ReleaseVarsError::Config(_))),
                "expected '{}' to be rejected",
                slug
            );
        }
    }

    #[test]
    fn test_repo_url_trims_trailing_slash() {
        let client = GitHubClient::new("https://ghe.example.com/api/v3/", "token", "test").unwrap();
        assert_eq!(client.api_url(), "https://ghe.example.com/api/v3");
        assert_eq!(
            client.repo_url("octocat/Hello-World", "/tags"),
            "https://ghe.example.com/api/v3/repos/octocat/Hello-World/tags"
        );
        assert_eq!(
            client.repo_url("octocat/Hello-World", ""),
            "https://ghe.example.com/api/v3/repos/octocat/Hello-World"
        );
    }

    #[test]
    fn test_token_with_newline_is_rejected() {
        let err = GitHubClient::new("https://api.github.com", "bad\ntoken", "test").unwrap_err();
        assert!(matches!(err, ReleaseVarsError::Config(_)));
    }

    #[test]
    fn test_tag_payload() {
        let body = r#"[
            {"name": "v1.0.0", "commit": {"sha": "c5b97d5ae6c19d5c5df71a34c7fbeeda2479ccbc", "url": "x"}, "zipball_url": "z"},
            {"name": "nightly", "commit": {"sha": "6dcb09b5b57875f334f61aebed695e2e4193db5e"}}
        ]"#;
        let tags: Vec<TagPayload> = serde_json::from_str(body).unwrap();
        assert_eq!(tags.len(), 2);
        assert_eq!(tags[0].name, "v1.0.0");
        assert_eq!(tags[1].commit.sha, "6dcb09b5b57875f334f61aebed695e2e4193db5e");
    }

    #[test]
    fn test_branch_and_repo_payloads() {
        let branches: Vec<BranchPayload> =
            serde_json::from_str(r#"[{"name": "main", "protected": true}, {"name": "maintenances/1.x"}]"#)
                .unwrap();
        let names: Vec<String> = branches.into_iter().map(|b| b.name).collect();
        assert_eq!(names, vec!["main", "maintenances/1.x"]);

        let repo: RepoPayload =
            serde_json::from_str(r#"{"id": 1, "default_branch": "main"}"#).unwrap();
        assert_eq!(repo.default_branch.as_deref(), Some("main"));

        let empty: RepoPayload = serde_json::from_str(r#"{"id": 1}"#).unwrap();
        assert_eq!(empty.default_branch, None);
    }
}
