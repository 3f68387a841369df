// src/services/publisher.rs

//! Commits a quiz document and the refreshed quiz index to the remote store.
//!
//! The sequence is: resolve branch head and tree, read the index, create the
//! two blobs, build a tree, commit, move the branch. Nothing is visible until
//! the final ref update; a failure before it leaves unreferenced objects
//! behind in the store.
//!
//! The ref update does not check that the branch still points at the commit
//! read at the start. Two publishes racing each other both build on the same
//! parent and the later ref update wins, dropping the other commit (and its
//! index entry) from the branch history.

use std::sync::Arc;

use thiserror::Error;

use crate::{
    config::PublishConfig,
    models::{
        index::{QuizIndex, QuizIndexEntry},
        quiz::QuizDocument,
    },
    services::remote_store::{RemoteStore, RepoRef, StoreError, TreeEntry},
    utils::slug::derive_filename,
};

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("publishing is misconfigured: {0}")]
    Config(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("failed to serialize JSON: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Where a published quiz ended up.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishOutcome {
    /// Repository path of the quiz document.
    pub path: String,
    pub commit_sha: String,
    /// Public URL of the quiz document.
    pub url: String,
}

pub struct Publisher {
    config: PublishConfig,
    store: Arc<dyn RemoteStore>,
}

impl Publisher {
    pub fn new(config: PublishConfig, store: Arc<dyn RemoteStore>) -> Self {
        Self { config, store }
    }

    pub async fn publish(
        &self,
        quiz: &QuizDocument,
        title: &str,
    ) -> Result<PublishOutcome, PublishError> {
        let repo = self.config.validate()?;
        let branch = self.config.branch.as_str();

        let file_name = format!("{}.json", derive_filename(title));
        let served_path = join_path(&[&self.config.quiz_dir, &file_name]);
        let quiz_path = join_path(&[&self.config.public_root, &served_path]);
        let index_path = join_path(&[&self.config.public_root, &self.config.index_path]);

        let head = self.store.branch_head(&repo, branch).await?;
        let base_tree = self.store.commit_tree(&repo, &head).await?;

        let mut index = self.load_index(&repo, &index_path).await;
        index.upsert(QuizIndexEntry {
            name: title.to_string(),
            file: format!("/{}", served_path),
            description: quiz.summary(),
        });

        let quiz_json = serde_json::to_string_pretty(quiz)?;
        let index_json = serde_json::to_string_pretty(&index)?;

        let (quiz_blob, index_blob) = tokio::try_join!(
            self.store.create_blob(&repo, quiz_json),
            self.store.create_blob(&repo, index_json)
        )?;

        let tree = self
            .store
            .create_tree(
                &repo,
                &base_tree,
                vec![
                    TreeEntry { path: quiz_path.clone(), blob_sha: quiz_blob },
                    TreeEntry { path: index_path, blob_sha: index_blob },
                ],
            )
            .await?;

        let message = format!("Add quiz: {}", title);
        let commit = self
            .store
            .create_commit(&repo, &message, &tree, &head)
            .await?;

        self.store.update_branch(&repo, branch, &commit).await?;

        tracing::info!(path = %quiz_path, commit = %commit, "Published quiz");

        Ok(PublishOutcome {
            url: self.public_url(&repo, &quiz_path, &served_path),
            path: quiz_path,
            commit_sha: commit,
        })
    }

    /// Reads the current index. Any failure, not only a missing file, yields
    /// an empty index, so a transient error can shrink the published index.
    async fn load_index(&self, repo: &RepoRef, path: &str) -> QuizIndex {
        let raw = match self.store.read_file(repo, path, &self.config.branch).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(path, error = %e, "Quiz index unavailable, starting a new one");
                return QuizIndex::default();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!(path, error = %e, "Quiz index unreadable, starting a new one");
            QuizIndex::default()
        })
    }

    fn public_url(&self, repo: &RepoRef, repo_path: &str, served_path: &str) -> String {
        match &self.config.public_base_url {
            Some(base) => format!("{}/{}", base.trim_end_matches('/'), served_path),
            None => format!(
                "https://github.com/{}/{}/blob/{}/{}",
                repo.owner, repo.name, self.config.branch, repo_path
            ),
        }
    }
}

/// Joins path segments with `/`, ignoring empty segments and stray slashes.
fn join_path(segments: &[&str]) -> String {
    segments
        .iter()
        .map(|s| s.trim_matches('/'))
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}
