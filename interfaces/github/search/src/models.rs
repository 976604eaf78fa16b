use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Envelope returned by `GET /search/repositories`.
///
/// Only `items` is read; `total_count` and `incomplete_results` are ignored.
#[derive(Debug, Deserialize)]
pub struct SearchRepositoriesResponse {
    #[serde(default)]
    pub items: Option<Vec<RepositoryRecord>>,
}

impl SearchRepositoriesResponse {
    /// Items in upstream order; a missing or `null` array yields none.
    pub fn into_items(self) -> Vec<RepositoryRecord> {
        self.items.unwrap_or_default()
    }
}

/// Normalized repository as returned to callers.
///
/// Unknown upstream fields are dropped, missing ones stay `None` and
/// serialize as `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoryRecord {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub full_name: Option<String>,
    pub description: Option<String>,
    pub stargazers_count: Option<i64>,
    pub watchers_count: Option<i64>,
    pub forks_count: Option<i64>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub html_url: Option<String>,
    pub language: Option<String>,
}
