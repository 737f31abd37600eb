use std::sync::Arc;

use axum::{
    extract::Extension,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use crate::app::dto;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(get_analysis))
        .route("/refresh", post(refresh_analysis))
}

/// Displayed analysis state (`idle`, `pending` or `ready`).
pub async fn get_analysis(Extension(services): Extension<Arc<AppServices>>) -> impl IntoResponse {
    Json(services.coordinator.state())
}

/// Analyse the current local inventory now.
///
/// Always 200: service failures come back as the fallback result.
pub async fn refresh_analysis(Extension(services): Extension<Arc<AppServices>>) -> impl IntoResponse {
    let refreshed = services.coordinator.refresh_from(&*services.store).await;
    Json(dto::RefreshResponse::from(refreshed))
}
