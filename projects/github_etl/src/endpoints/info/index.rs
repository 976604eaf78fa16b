use axum::extract::{Extension, Json};

use crate::app::{AppInfo, AppState};

/// Axum handler: GET /api/v1/info
pub async fn handler(Extension(state): Extension<AppState>) -> Json<AppInfo> {
    Json(state.info)
}
