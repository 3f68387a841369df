use std::sync::Arc;

use axum::extract::FromRef;

use crate::{
    config::Config,
    services::{github::GitHubStore, publisher::Publisher, remote_store::StoreError},
};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// `None` when no remote-store token is configured (convert-only mode).
    pub publisher: Option<Arc<Publisher>>,
}

impl AppState {
    /// Builds the state, wiring a GitHub-backed publisher when a token is present.
    pub fn new(config: Config) -> Result<Self, StoreError> {
        let publisher = match &config.github_token {
            Some(token) => {
                let store = GitHubStore::new(&config.github_api_url, token.as_str())?;
                Some(Arc::new(Publisher::new(config.publish.clone(), Arc::new(store))))
            }
            None => None,
        };

        Ok(Self { config, publisher })
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
