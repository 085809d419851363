/*!
 * GitHub-backed content store.
 *
 * The assembled deck and its source markdown are committed to a repository
 * through the Git Data API: read the branch head, upload a tree with the
 * new blobs, create a commit and fast-forward the ref. Deck filenames are
 * derived from the content id, with a timestamp+counter suffix appended
 * while the name is already taken.
 */

use std::time::Duration;

use chrono::Utc;
use log::{debug, error};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::errors::StoreError;

const GITHUB_API: &str = "https://api.github.com";
const USER_AGENT: &str = concat!("slaide/", env!("CARGO_PKG_VERSION"));

/// Content-derived identifier: hex SHA-256 of the source text
pub fn content_id(text: &str) -> String {
    let digest = Sha256::digest(text.as_bytes());
    digest.iter().map(|byte| format!("{:02x}", byte)).collect()
}

/// One file of a commit, mirroring a git tree entry
#[derive(Debug, Clone, Serialize)]
pub struct TreeEntry {
    /// Repository-relative path
    pub path: String,
    /// File mode, always a regular blob
    pub mode: &'static str,
    /// Entry type
    #[serde(rename = "type")]
    pub entry_type: &'static str,
    /// File content
    pub content: String,
}

impl TreeEntry {
    /// Create a regular-file entry
    pub fn file(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            mode: "100644",
            entry_type: "blob",
            content: content.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RefResponse {
    object: RefObject,
}

#[derive(Debug, Deserialize)]
struct RefObject {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct CommitResponse {
    sha: String,
    tree: TreeRef,
}

#[derive(Debug, Deserialize)]
struct TreeRef {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct CreatedObject {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct ContentEntry {
    name: String,
}

/// Store committing deck documents to a GitHub repository
#[derive(Debug, Clone)]
pub struct GithubStore {
    client: Client,
    owner: String,
    repo: String,
    branch: String,
    token: String,
}

impl GithubStore {
    /// Create a new store for one repository branch
    pub fn new(
        owner: impl Into<String>,
        repo: impl Into<String>,
        branch: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(60))
                .build()
                .unwrap_or_default(),
            owner: owner.into(),
            repo: repo.into(),
            branch: branch.into(),
            token: token.into(),
        }
    }

    /// Pick a deck filename that does not collide with existing ones:
    /// `<id>.md`, then `<id>-<timestamp>-<counter>.md` until free
    pub fn unique_deck_name(content_id: &str, existing: &[String]) -> String {
        let mut name = format!("{}.md", content_id);
        let timestamp = Utc::now().timestamp_millis();
        let mut counter = 1;
        while existing.iter().any(|taken| taken == &name) {
            name = format!("{}-{}-{}.md", content_id, timestamp, counter);
            counter += 1;
        }
        name
    }

    /// List the file names under a repository directory; a missing
    /// directory is an empty list, not an error
    pub async fn list_dir(&self, dir: &str) -> Result<Vec<String>, StoreError> {
        let url = format!(
            "{}/repos/{}/{}/contents/{}?ref={}",
            GITHUB_API, self.owner, self.repo, dir, self.branch
        );
        let response = self.get(&url).await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }
        let entries: Vec<ContentEntry> = Self::decode(response).await?;
        Ok(entries.into_iter().map(|entry| entry.name).collect())
    }

    /// Commit a set of files on top of the branch head
    pub async fn commit(&self, files: Vec<TreeEntry>, message: &str) -> Result<(), StoreError> {
        let head = self.branch_head().await?;
        let base_tree = self.commit_tree(&head).await?;

        let tree = self
            .post(
                &format!("{}/repos/{}/{}/git/trees", GITHUB_API, self.owner, self.repo),
                &serde_json::json!({ "base_tree": base_tree, "tree": files }),
            )
            .await?;
        let tree: CreatedObject = Self::decode(tree).await?;

        let commit = self
            .post(
                &format!("{}/repos/{}/{}/git/commits", GITHUB_API, self.owner, self.repo),
                &serde_json::json!({
                    "message": message,
                    "tree": tree.sha,
                    "parents": [head],
                }),
            )
            .await?;
        let commit: CreatedObject = Self::decode(commit).await?;

        let updated = self
            .client
            .patch(format!(
                "{}/repos/{}/{}/git/refs/heads/{}",
                GITHUB_API, self.owner, self.repo, self.branch
            ))
            .bearer_auth(&self.token)
            .header("User-Agent", USER_AGENT)
            .header("Accept", "application/vnd.github+json")
            .json(&serde_json::json!({ "sha": commit.sha }))
            .send()
            .await
            .map_err(|err| StoreError::RequestFailed(err.to_string()))?;
        Self::check_status(updated).await?;

        debug!("Committed {} to {}/{}", message, self.owner, self.repo);
        Ok(())
    }

    async fn branch_head(&self) -> Result<String, StoreError> {
        let url = format!(
            "{}/repos/{}/{}/git/ref/heads/{}",
            GITHUB_API, self.owner, self.repo, self.branch
        );
        let response = self.get(&url).await?;
        let reference: RefResponse = Self::decode(response).await?;
        Ok(reference.object.sha)
    }

    async fn commit_tree(&self, commit_sha: &str) -> Result<String, StoreError> {
        let url = format!(
            "{}/repos/{}/{}/git/commits/{}",
            GITHUB_API, self.owner, self.repo, commit_sha
        );
        let response = self.get(&url).await?;
        let commit: CommitResponse = Self::decode(response).await?;
        debug!("Branch head {} with tree {}", commit.sha, commit.tree.sha);
        Ok(commit.tree.sha)
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response, StoreError> {
        self.client
            .get(url)
            .bearer_auth(&self.token)
            .header("User-Agent", USER_AGENT)
            .header("Accept", "application/vnd.github+json")
            .send()
            .await
            .map_err(|err| StoreError::RequestFailed(err.to_string()))
    }

    async fn post(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<reqwest::Response, StoreError> {
        self.client
            .post(url)
            .bearer_auth(&self.token)
            .header("User-Agent", USER_AGENT)
            .header("Accept", "application/vnd.github+json")
            .json(body)
            .send()
            .await
            .map_err(|err| StoreError::RequestFailed(err.to_string()))
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read error response text".to_string());
            error!("GitHub API error ({}): {}", status, message);
            return Err(StoreError::ApiError {
                status_code: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }

    async fn decode<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, StoreError> {
        let response = Self::check_status(response).await?;
        response
            .json::<T>()
            .await
            .map_err(|err| StoreError::ParseError(err.to_string()))
    }
}
