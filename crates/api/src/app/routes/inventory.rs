use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};

use medswap_core::ItemId;
use medswap_inventory::ItemDraft;

use crate::app::{dto, errors};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_items).post(add_item))
        .route("/:id", delete(remove_item))
        .route("/:id/status", post(set_status))
}

/// Local listings, newest first, each with its expiry badge.
pub async fn list_items(Extension(services): Extension<Arc<AppServices>>) -> impl IntoResponse {
    let window = services.expiry_window_days;
    let items: Vec<dto::LocalItemView> = services
        .store
        .list_local()
        .into_iter()
        .map(|item| dto::LocalItemView {
            expiry_status: services.store.expiry_status(&item, window),
            item,
        })
        .collect();
    Json(items)
}

pub async fn add_item(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<ItemDraft>, JsonRejection>,
) -> axum::response::Response {
    let Json(draft) = match body {
        Ok(b) => b,
        Err(e) => return errors::json_rejection_to_response(e),
    };

    match services.store.add_item(draft) {
        Ok(item) => (StatusCode::CREATED, Json(item)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// Always 204: removing an unknown id is a no-op.
pub async fn remove_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ItemId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    services.store.remove_item(&id);
    StatusCode::NO_CONTENT.into_response()
}

pub async fn set_status(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<dto::SetStatusRequest>, JsonRejection>,
) -> axum::response::Response {
    let id: ItemId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };
    let Json(body) = match body {
        Ok(b) => b,
        Err(e) => return errors::json_rejection_to_response(e),
    };

    match services.store.set_status(&id, body.status) {
        Ok(item) => Json(item).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
