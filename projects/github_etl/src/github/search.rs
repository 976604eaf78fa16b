use interfaces_github_search::{
    index::{fetch_search_repositories, FetchSearchRepositoriesError, GitHubSearchResult},
    models::{RepositoryRecord, SearchRepositoriesResponse},
};
use reqwest::{Client, StatusCode};
use thiserror::Error;

use crate::config::GitHubConfig;

#[derive(Debug, Error)]
pub enum SearchRepositoriesError {
    #[error("RemoteRequest: {source}")]
    RemoteRequest {
        #[from]
        source: FetchSearchRepositoriesError,
    },

    #[error("RemoteStatus: GitHub answered {status}: {body}")]
    RemoteStatus { status: StatusCode, body: String },

    #[error("MalformedResponse: {source}")]
    MalformedResponse {
        #[from]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum BuildSearchClientError {
    #[error("BuildHttpClient: {source}")]
    BuildHttpClient {
        #[from]
        source: reqwest::Error,
    },
}

/// Search client sharing one pooled HTTP client across requests.
#[derive(Debug, Clone)]
pub struct GitHubSearchClient {
    http: Client,
    config: GitHubConfig,
}

impl GitHubSearchClient {
    pub fn new(config: GitHubConfig) -> Result<Self, BuildSearchClientError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        Ok(Self { http, config })
    }

    /// Runs one search and returns the items in upstream order.
    pub async fn search(&self, query: &str) -> Result<Vec<RepositoryRecord>, SearchRepositoriesError> {
        let GitHubSearchResult { body, status } =
            fetch_search_repositories(&self.http, &self.config.target(), query).await?;

        if !status.is_success() {
            return Err(SearchRepositoriesError::RemoteStatus { status, body });
        }

        let parsed: SearchRepositoriesResponse = serde_json::from_str(&body)?;
        Ok(parsed.into_items())
    }
}
