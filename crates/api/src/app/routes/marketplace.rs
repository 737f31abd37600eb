use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Extension, Path, Query,
    },
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use medswap_core::ItemId;
use medswap_inventory::{MarketplaceQuery, swap_notification};

use crate::app::{dto, errors};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_listings))
        .route("/:id/swap", post(request_swap))
}

/// Other hospitals' listings. `category` (or `All`) filters, `sort` is one of
/// `proximity` (default), `expiry`, `quantity`.
pub async fn list_listings(
    Extension(services): Extension<Arc<AppServices>>,
    params: Result<Query<dto::MarketplaceParams>, QueryRejection>,
) -> axum::response::Response {
    let Query(params) = match params {
        Ok(p) => p,
        Err(e) => return errors::query_rejection_to_response(e),
    };

    let query = match MarketplaceQuery::parse(params.category.as_deref(), params.sort.as_deref()) {
        Ok(q) => q,
        Err(e) => return errors::domain_error_to_response(e),
    };

    Json(services.store.marketplace_listings(&query)).into_response()
}

pub async fn request_swap(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<dto::CreateSwapRequest>, JsonRejection>,
) -> axum::response::Response {
    let requested: ItemId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };
    let Json(body) = match body {
        Ok(b) => b,
        Err(e) => return errors::json_rejection_to_response(e),
    };
    let offered: ItemId = match body.offered_item_id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let request = match services.store.request_swap(&requested, &offered) {
        Ok(r) => r,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let name = services
        .store
        .list_marketplace()
        .into_iter()
        .find(|i| i.id == requested)
        .map(|i| i.name)
        .unwrap_or_else(|| requested.to_string());

    (
        StatusCode::CREATED,
        Json(dto::SwapCreated {
            request,
            notification: swap_notification(&name),
        }),
    )
        .into_response()
}
