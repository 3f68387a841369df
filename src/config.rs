// src/config.rs

use std::env;
use std::net::SocketAddr;

use dotenvy::dotenv;
use url::Url;

use crate::services::{publisher::PublishError, remote_store::RepoRef};

/// Maximum accepted upload size (10 MiB).
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct Config {
    pub rust_log: String,
    pub bind_addr: SocketAddr,
    /// Directory served as the static front-end.
    pub static_dir: String,
    /// When set, API routes require `Authorization: Bearer <token>`.
    pub upload_token: Option<String>,
    pub allowed_origins: Vec<String>,
    /// Access token for the remote store. Publishing is disabled without it.
    pub github_token: Option<String>,
    pub github_api_url: Url,
    pub publish: PublishConfig,
}

/// Repository coordinates and layout used by the publisher.
///
/// `owner` and `repo` are required to publish; they are checked by
/// [`PublishConfig::validate`] before any remote call is made.
#[derive(Debug, Clone)]
pub struct PublishConfig {
    pub owner: Option<String>,
    pub repo: Option<String>,
    pub branch: String,
    /// Repository directory that is served as the site root.
    pub public_root: String,
    /// Quiz directory, relative to `public_root`.
    pub quiz_dir: String,
    /// Quiz index file, relative to `public_root`.
    pub index_path: String,
    /// Base URL of the deployed site, used to build public links.
    pub public_base_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
            .parse()
            .expect("BIND_ADDR must be a socket address");

        let static_dir = env::var("STATIC_DIR").unwrap_or_else(|_| "public".to_string());

        let allowed_origins = optional("ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let github_api_url = env::var("GITHUB_API_URL")
            .unwrap_or_else(|_| "https://api.github.com".to_string())
            .parse()
            .expect("GITHUB_API_URL must be a valid URL");

        let publish = PublishConfig {
            owner: optional("GITHUB_OWNER"),
            repo: optional("GITHUB_REPO"),
            branch: optional("GITHUB_BRANCH").unwrap_or_else(|| "main".to_string()),
            public_root: env::var("QUIZ_PUBLIC_ROOT").unwrap_or_else(|_| "public".to_string()),
            quiz_dir: optional("QUIZ_DIR").unwrap_or_else(|| "data/quizzes".to_string()),
            index_path: optional("QUIZ_INDEX_PATH")
                .unwrap_or_else(|| "data/quiz-index.json".to_string()),
            public_base_url: optional("PUBLIC_BASE_URL"),
        };

        Self {
            rust_log,
            bind_addr,
            static_dir,
            upload_token: optional("UPLOAD_TOKEN"),
            allowed_origins,
            github_token: optional("GITHUB_TOKEN"),
            github_api_url,
            publish,
        }
    }
}

impl PublishConfig {
    /// Returns the repository to publish to, or a configuration error.
    pub fn validate(&self) -> Result<RepoRef, PublishError> {
        let owner = self
            .owner
            .as_deref()
            .ok_or_else(|| PublishError::Config("GITHUB_OWNER is not set".to_string()))?;
        let name = self
            .repo
            .as_deref()
            .ok_or_else(|| PublishError::Config("GITHUB_REPO is not set".to_string()))?;

        if self.branch.is_empty() {
            return Err(PublishError::Config("GITHUB_BRANCH is empty".to_string()));
        }

        Ok(RepoRef {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}

/// Reads a variable, treating empty values as unset.
fn optional(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
