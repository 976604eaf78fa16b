use axum::{
    extract::{Extension, Json, Query},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use thiserror::Error;

use crate::{app::AppState, db::store::PersistenceError};

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("PersistenceDisabled")]
    PersistenceDisabled,
    #[error("RepositoryNotInDatabase: {full_name}")]
    RepositoryNotInDatabase { full_name: String },
    #[error("Persistence: {source}")]
    Persistence {
        #[from]
        source: PersistenceError,
    },
    #[error("Join: {source}")]
    Join {
        #[from]
        source: tokio::task::JoinError,
    },
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> axum::response::Response {
        match self {
            HandlerError::PersistenceDisabled => (StatusCode::SERVICE_UNAVAILABLE, "Persistence is disabled".to_string()).into_response(),
            HandlerError::RepositoryNotInDatabase { full_name } => (StatusCode::NOT_FOUND, format!("Repository {full_name} not found in database")).into_response(),
            HandlerError::Persistence { source } => (StatusCode::INTERNAL_SERVER_ERROR, source.to_string()).into_response(),
            HandlerError::Join { source } => (StatusCode::INTERNAL_SERVER_ERROR, source.to_string()).into_response(),
        }
    }
}

/// Query parameters for the endpoint.
#[derive(Deserialize)]
pub struct RepositoryQuery {
    full_name: String,
}

/// Axum handler: GET /api/v1/repositories?full_name=owner/name
pub async fn handler(
    Extension(state): Extension<AppState>,
    Query(input): Query<RepositoryQuery>,
) -> impl IntoResponse {
    let store = match state.store {
        Some(store) => store,
        None => return HandlerError::PersistenceDisabled.into_response(),
    };

    let full_name = input.full_name.clone();
    let found = tokio::task::spawn_blocking(move || store.find_by_full_name(&full_name)).await;

    match found {
        Ok(Ok(Some(row))) => (StatusCode::OK, Json(row)).into_response(),
        Ok(Ok(None)) => HandlerError::RepositoryNotInDatabase {
            full_name: input.full_name,
        }
        .into_response(),
        Ok(Err(source)) => HandlerError::Persistence { source }.into_response(),
        Err(source) => HandlerError::Join { source }.into_response(),
    }
}
