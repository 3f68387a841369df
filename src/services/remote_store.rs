// src/services/remote_store.rs

//! Git object store abstraction used by the publisher.
//!
//! The operations mirror a hosted Git Data API: blobs, trees and commits are
//! immutable objects, and the branch ref is the only mutable pointer.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("remote store answered {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unexpected response: {0}")]
    Decode(String),
}

/// Owner and name of the target repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

/// A file placed into a new tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    pub path: String,
    pub blob_sha: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Commit SHA the branch currently points at.
    async fn branch_head(&self, repo: &RepoRef, branch: &str) -> Result<String, StoreError>;

    /// Tree SHA of a commit.
    async fn commit_tree(&self, repo: &RepoRef, commit_sha: &str) -> Result<String, StoreError>;

    /// Raw contents of a file at the tip of `branch`.
    async fn read_file(&self, repo: &RepoRef, path: &str, branch: &str)
        -> Result<String, StoreError>;

    /// Stores UTF-8 content and returns its blob SHA.
    async fn create_blob(&self, repo: &RepoRef, content: String) -> Result<String, StoreError>;

    /// Creates a tree on top of `base_tree` with the given files added or replaced.
    async fn create_tree(
        &self,
        repo: &RepoRef,
        base_tree: &str,
        entries: Vec<TreeEntry>,
    ) -> Result<String, StoreError>;

    async fn create_commit(
        &self,
        repo: &RepoRef,
        message: &str,
        tree_sha: &str,
        parent_sha: &str,
    ) -> Result<String, StoreError>;

    /// Moves `branch` to `commit_sha`. No compare-and-swap on the previous value.
    async fn update_branch(
        &self,
        repo: &RepoRef,
        branch: &str,
        commit_sha: &str,
    ) -> Result<(), StoreError>;
}
