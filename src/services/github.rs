// src/services/github.rs

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, header};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::json;
use url::Url;

use crate::services::remote_store::{RemoteStore, RepoRef, StoreError, TreeEntry};

const USER_AGENT: &str = concat!("quizdeck/", env!("CARGO_PKG_VERSION"));
const API_VERSION: &str = "2022-11-28";

/// Regular (non-executable) file mode for tree entries.
const FILE_MODE: &str = "100644";

/// [`RemoteStore`] backed by the GitHub Git Data API.
pub struct GitHubStore {
    client: Client,
    api_base: String,
    token: String,
}

#[derive(Deserialize)]
struct ShaOnly {
    sha: String,
}

#[derive(Deserialize)]
struct RefResponse {
    object: ShaOnly,
}

#[derive(Deserialize)]
struct CommitResponse {
    tree: ShaOnly,
}

impl GitHubStore {
    pub fn new(api_base: &Url, token: impl Into<String>) -> Result<Self, StoreError> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            client,
            api_base: api_base.as_str().trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    fn endpoint(&self, repo: &RepoRef, tail: &str) -> String {
        format!("{}/repos/{}/{}/{}", self.api_base, repo.owner, repo.name, tail)
    }

    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        req.bearer_auth(&self.token)
            .header("X-GitHub-Api-Version", API_VERSION)
    }

    /// Sends a request and decodes a JSON body.
    async fn send_json<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, StoreError> {
        let req = req.header(header::ACCEPT, "application/vnd.github+json");
        let body = self.send(req).await?;
        serde_json::from_str(&body).map_err(|e| StoreError::Decode(e.to_string()))
    }

    async fn send(&self, req: RequestBuilder) -> Result<String, StoreError> {
        let response = self.authorize(req).send().await?;
        read_body(response).await
    }
}

/// Returns the body of a 2xx response, otherwise a `Status` error carrying it.
async fn read_body(response: Response) -> Result<String, StoreError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(StoreError::Status {
            status: status.as_u16(),
            body,
        });
    }

    Ok(body)
}

#[async_trait]
impl RemoteStore for GitHubStore {
    async fn branch_head(&self, repo: &RepoRef, branch: &str) -> Result<String, StoreError> {
        let url = self.endpoint(repo, &format!("git/ref/heads/{}", branch));
        let reference: RefResponse = self.send_json(self.client.get(url)).await?;
        tracing::debug!(branch, sha = %reference.object.sha, "Resolved branch head");
        Ok(reference.object.sha)
    }

    async fn commit_tree(&self, repo: &RepoRef, commit_sha: &str) -> Result<String, StoreError> {
        let url = self.endpoint(repo, &format!("git/commits/{}", commit_sha));
        let commit: CommitResponse = self.send_json(self.client.get(url)).await?;
        Ok(commit.tree.sha)
    }

    async fn read_file(
        &self,
        repo: &RepoRef,
        path: &str,
        branch: &str,
    ) -> Result<String, StoreError> {
        let url = self.endpoint(repo, &format!("contents/{}", path));
        let req = self
            .client
            .get(url)
            .query(&[("ref", branch)])
            .header(header::ACCEPT, "application/vnd.github.raw+json");
        self.send(req).await
    }

    async fn create_blob(&self, repo: &RepoRef, content: String) -> Result<String, StoreError> {
        let url = self.endpoint(repo, "git/blobs");
        let body = json!({ "content": content, "encoding": "utf-8" });
        let blob: ShaOnly = self.send_json(self.client.post(url).json(&body)).await?;
        tracing::debug!(sha = %blob.sha, "Created blob");
        Ok(blob.sha)
    }

    async fn create_tree(
        &self,
        repo: &RepoRef,
        base_tree: &str,
        entries: Vec<TreeEntry>,
    ) -> Result<String, StoreError> {
        let url = self.endpoint(repo, "git/trees");
        let tree: Vec<_> = entries
            .iter()
            .map(|entry| {
                json!({
                    "path": entry.path,
                    "mode": FILE_MODE,
                    "type": "blob",
                    "sha": entry.blob_sha,
                })
            })
            .collect();
        let body = json!({ "base_tree": base_tree, "tree": tree });
        let created: ShaOnly = self.send_json(self.client.post(url).json(&body)).await?;
        Ok(created.sha)
    }

    async fn create_commit(
        &self,
        repo: &RepoRef,
        message: &str,
        tree_sha: &str,
        parent_sha: &str,
    ) -> Result<String, StoreError> {
        let url = self.endpoint(repo, "git/commits");
        let body = json!({
            "message": message,
            "tree": tree_sha,
            "parents": [parent_sha],
        });
        let commit: ShaOnly = self.send_json(self.client.post(url).json(&body)).await?;
        Ok(commit.sha)
    }

    async fn update_branch(
        &self,
        repo: &RepoRef,
        branch: &str,
        commit_sha: &str,
    ) -> Result<(), StoreError> {
        let url = self.endpoint(repo, &format!("git/refs/heads/{}", branch));
        let req = self
            .client
            .patch(url)
            .header(header::ACCEPT, "application/vnd.github+json")
            .json(&json!({ "sha": commit_sha }));
        self.send(req).await?;
        tracing::debug!(branch, sha = commit_sha, "Moved branch");
        Ok(())
    }
}
