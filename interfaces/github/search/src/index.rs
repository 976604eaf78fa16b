use reqwest::{header, Client, StatusCode};
use thiserror::Error;

pub const DEFAULT_API_BASE: &str = "https://api.github.com";
pub const DEFAULT_USER_AGENT: &str = "github-etl/1.0";
pub const ACCEPT_V3_JSON: &str = "application/vnd.github.v3+json";

pub struct GitHubSearchResult {
    pub body: String,
    pub status: StatusCode,
}

/// Everything needed to address the search endpoint besides the query itself.
#[derive(Debug, Clone)]
pub struct SearchTarget<'a> {
    pub api_base: &'a str,
    pub user_agent: &'a str,
    /// Sent as `X-GitHub-Api-Version` when set.
    pub api_version: Option<&'a str>,
}

impl Default for SearchTarget<'_> {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE,
            user_agent: DEFAULT_USER_AGENT,
            api_version: None,
        }
    }
}

/// Issues a single `GET {api_base}/search/repositories?q=<query>`.
///
/// The query goes out verbatim; any status is returned to the caller
/// together with the raw body.
pub async fn fetch_search_repositories(
    client: &Client,
    target: &SearchTarget<'_>,
    query: &str,
) -> Result<GitHubSearchResult, FetchSearchRepositoriesError> {
    let url = format!(
        "{}/search/repositories",
        target.api_base.trim_end_matches('/')
    );

    let mut request = client
        .get(url)
        .header(header::ACCEPT, ACCEPT_V3_JSON)
        .header(header::USER_AGENT, target.user_agent)
        .query(&[("q", query)]);

    if let Some(version) = target.api_version {
        request = request.header("X-GitHub-Api-Version", version);
    }

    let response = request
        .send()
        .await
        .map_err(|source| FetchSearchRepositoriesError::RequestSend { source })?;

    let status = response.status();

    let body = response
        .text()
        .await
        .map_err(|source| FetchSearchRepositoriesError::ResponseRead { source })?;

    Ok(GitHubSearchResult { body, status })
}

#[derive(Debug, Error)]
pub enum FetchSearchRepositoriesError {
    #[error("RequestSend: {source}")]
    RequestSend {
        source: reqwest::Error,
    },

    #[error("ResponseRead: {source}")]
    ResponseRead {
        source: reqwest::Error,
    },
}
