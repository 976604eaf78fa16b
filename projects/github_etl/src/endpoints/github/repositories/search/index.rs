use std::sync::Arc;

use axum::{
    extract::{Extension, Json, Query},
    http::StatusCode,
    response::IntoResponse,
};
use interfaces_github_search::models::RepositoryRecord;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    app::AppState,
    db::{repository::queries::UpsertOutcome, store::RepositoryStore},
    github::search::SearchRepositoriesError,
};

pub const DEFAULT_QUERY: &str = "stars:>1000";

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("SearchRepositories: {source}")]
    SearchRepositories {
        #[from]
        source: SearchRepositoriesError,
    },
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> axum::response::Response {
        match self {
            HandlerError::SearchRepositories { source } => {
                (StatusCode::BAD_GATEWAY, source.to_string()).into_response()
            }
        }
    }
}

/// Query parameters for the endpoint.
#[derive(Deserialize)]
pub struct SearchQuery {
    #[serde(default = "default_query")]
    query: String,
}

fn default_query() -> String {
    DEFAULT_QUERY.to_string()
}

/// Axum handler: GET /api/v1/search?query=
pub async fn handler(
    Extension(state): Extension<AppState>,
    Query(input): Query<SearchQuery>,
) -> Result<Json<Vec<RepositoryRecord>>, HandlerError> {
    let records = state.github.search(&input.query).await?;
    info!(query = %input.query, count = records.len(), "search completed");

    // Not awaited: the response never waits on the database.
    if let Some(store) = state.store.clone() {
        tokio::spawn(persist_records(store, records.clone()));
    }

    Ok(Json(records))
}

/// Tally of one batch of upserts.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct UpsertSummary {
    pub inserted: usize,
    pub updated: usize,
    pub failed: usize,
    pub skipped: usize,
}

/// Writes the batch on a blocking thread, detached from the request.
/// Failures are logged only.
async fn persist_records(store: Arc<dyn RepositoryStore>, records: Vec<RepositoryRecord>) {
    match tokio::task::spawn_blocking(move || upsert_all(store.as_ref(), &records)).await {
        Ok(summary) => debug!(?summary, "persisted search results"),
        Err(err) => warn!(error = %err, "persistence task did not complete"),
    }
}

/// Upserts each record in order. Once the store reports it is unreachable
/// the rest of the batch is skipped.
pub fn upsert_all(store: &dyn RepositoryStore, records: &[RepositoryRecord]) -> UpsertSummary {
    let mut summary = UpsertSummary::default();

    for (index, record) in records.iter().enumerate() {
        let full_name = record.full_name.as_deref().unwrap_or("<none>");

        match store.upsert(record) {
            Ok(UpsertOutcome::Inserted) => {
                summary.inserted += 1;
                debug!(full_name, "inserted repository");
            }
            Ok(UpsertOutcome::Updated) => {
                summary.updated += 1;
                debug!(full_name, "updated repository");
            }
            Err(err) if err.is_unavailable() => {
                summary.failed += 1;
                summary.skipped = records.len() - index - 1;
                warn!(full_name, error = %err, skipped = summary.skipped, "store unavailable");
                break;
            }
            Err(err) => {
                summary.failed += 1;
                warn!(full_name, error = %err, "failed to save repository");
            }
        }
    }

    summary
}
