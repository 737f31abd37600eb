use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Extension, Query},
    response::IntoResponse,
    Json,
};

use crate::app::{dto, errors};
use crate::app::services::AppServices;

/// Dashboard tiles; `days` defaults to the configured expiry window.
pub async fn get_stats(
    Extension(services): Extension<Arc<AppServices>>,
    params: Result<Query<dto::StatsParams>, QueryRejection>,
) -> axum::response::Response {
    let Query(params) = match params {
        Ok(p) => p,
        Err(e) => return errors::query_rejection_to_response(e),
    };

    let days = params.days.unwrap_or(services.expiry_window_days);
    Json(services.store.dashboard_stats(days)).into_response()
}
