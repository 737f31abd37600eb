use std::sync::Arc;

use axum::{extract::Extension, response::IntoResponse, Json};

use crate::app::services::AppServices;

pub async fn list_swaps(Extension(services): Extension<Arc<AppServices>>) -> impl IntoResponse {
    Json(services.store.swap_requests())
}
