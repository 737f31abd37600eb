use std::sync::Arc;

use axum::{extract::Extension, response::IntoResponse, Json};
use serde_json::json;

use crate::app::services::AppServices;

/// Hospital directory plus which one is "us".
pub async fn list_hospitals(Extension(services): Extension<Arc<AppServices>>) -> impl IntoResponse {
    Json(json!({
        "localHospitalId": services.store.local_hospital_id(),
        "hospitals": services.store.hospitals(),
    }))
}
