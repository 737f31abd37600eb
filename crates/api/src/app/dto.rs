use serde::{Deserialize, Serialize};

use medswap_ai::{AnalysisResult, Refreshed};
use medswap_inventory::{ExpiryStatus, InventoryItem, ItemStatus, SwapRequest};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    pub status: ItemStatus,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSwapRequest {
    pub offered_item_id: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct MarketplaceParams {
    pub category: Option<String>,
    pub sort: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct StatsParams {
    pub days: Option<u32>,
}

// -------------------------
// Response DTOs
// -------------------------

/// A local listing plus its expiry badge.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalItemView {
    #[serde(flatten)]
    pub item: InventoryItem,
    pub expiry_status: ExpiryStatus,
}

#[derive(Debug, Serialize)]
pub struct SwapCreated {
    pub request: SwapRequest,
    pub notification: String,
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub request: u64,
    pub applied: bool,
    pub result: AnalysisResult,
}

impl From<Refreshed> for RefreshResponse {
    fn from(r: Refreshed) -> Self {
        Self {
            request: r.request,
            applied: r.applied,
            result: r.result,
        }
    }
}
