use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use serde::Serialize;
use thiserror::Error;

use crate::{
    config::Config,
    db::{
        build_pool,
        store::{PgRepositoryStore, RepositoryStore},
    },
    endpoints::{
        github::repositories::{
            read::index::handler as github_repositories_read_handler,
            search::index::handler as github_repositories_search_handler,
        },
        info::index::handler as info_handler,
    },
    github::search::{BuildSearchClientError, GitHubSearchClient},
};

#[derive(Debug, Clone, Serialize)]
pub struct AppInfo {
    pub name: String,
    pub version: String,
}

/// Process-wide state, built once in `main` and handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub github: GitHubSearchClient,
    /// `None` when persistence is disabled.
    pub store: Option<Arc<dyn RepositoryStore>>,
    pub info: AppInfo,
}

#[derive(Debug, Error)]
pub enum BuildStateError {
    #[error("BuildSearchClient: {source}")]
    BuildSearchClient {
        #[from]
        source: BuildSearchClientError,
    },
}

impl AppState {
    pub fn from_config(config: &Config) -> Result<Self, BuildStateError> {
        let github = GitHubSearchClient::new(config.github.clone())?;

        let store = if config.persistence_enabled {
            let pool = build_pool(&config.database.url(), config.database.connect_timeout());
            let store: Arc<dyn RepositoryStore> =
                Arc::new(PgRepositoryStore::new(pool, config.database.echo));
            Some(store)
        } else {
            None
        };

        Ok(Self {
            github,
            store,
            info: AppInfo {
                name: config.app.project_name.clone(),
                version: config.app.version(),
            },
        })
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/search", get(github_repositories_search_handler))
        .route("/api/v1/repositories", get(github_repositories_read_handler))
        .route("/api/v1/info", get(info_handler))
        .layer(Extension(state))
}
