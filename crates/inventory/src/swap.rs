use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use medswap_core::{Entity, HospitalId, ItemId, SwapRequestId};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SwapStatus {
    Pending,
    Accepted,
    Rejected,
    Completed,
}

/// A proposed exchange between two hospitals.
///
/// Only initiation exists today; requests never leave `Pending`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapRequest {
    pub id: SwapRequestId,
    pub from_hospital_id: HospitalId,
    pub to_hospital_id: HospitalId,
    pub offered_item_id: ItemId,
    pub requested_item_id: ItemId,
    pub status: SwapStatus,
    pub created_at: DateTime<Utc>,
}

impl SwapRequest {
    pub fn initiate(
        from_hospital_id: HospitalId,
        to_hospital_id: HospitalId,
        offered_item_id: ItemId,
        requested_item_id: ItemId,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: SwapRequestId::generate(),
            from_hospital_id,
            to_hospital_id,
            offered_item_id,
            requested_item_id,
            status: SwapStatus::Pending,
            created_at,
        }
    }
}

impl Entity for SwapRequest {
    type Id = SwapRequestId;

    fn id(&self) -> &SwapRequestId {
        &self.id
    }
}

/// Human-readable notice shown when a swap is initiated.
pub fn swap_notification(requested_item_name: &str) -> String {
    format!("Swap request for {requested_item_name} initiated! The listing hospital has been notified.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initiated_requests_are_pending() {
        let req = SwapRequest::initiate(
            HospitalId::new("hosp-001"),
            HospitalId::new("hosp-002"),
            ItemId::new("item-1"),
            ItemId::new("item-3"),
            Utc::now(),
        );
        assert_eq!(req.status, SwapStatus::Pending);
        assert!(req.id.as_str().starts_with("swap-"));
    }

    #[test]
    fn serializes_camel_case() {
        let req = SwapRequest::initiate(
            HospitalId::new("hosp-001"),
            HospitalId::new("hosp-002"),
            ItemId::new("item-1"),
            ItemId::new("item-3"),
            Utc::now(),
        );
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["fromHospitalId"], "hosp-001");
        assert_eq!(json["requestedItemId"], "item-3");
        assert_eq!(json["status"], "Pending");
    }

    #[test]
    fn notification_names_the_item() {
        assert!(swap_notification("N95 Masks").starts_with("Swap request for N95 Masks initiated!"));
    }
}
