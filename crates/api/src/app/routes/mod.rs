use axum::{routing::get, Router};

pub mod analysis;
pub mod hospitals;
pub mod inventory;
pub mod marketplace;
pub mod stats;
pub mod swaps;
pub mod system;

/// Router for all application endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/health", get(system::health))
        .route("/hospitals", get(hospitals::list_hospitals))
        .route("/swaps", get(swaps::list_swaps))
        .route("/stats", get(stats::get_stats))
        .nest("/inventory", inventory::router())
        .nest("/marketplace", marketplace::router())
        .nest("/analysis", analysis::router())
}
