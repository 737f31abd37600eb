use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use medswap_core::ItemId;
use medswap_events::Event;

use crate::item::{InventoryItem, ItemStatus};
use crate::swap::SwapRequest;

/// Event: ItemAdded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemAdded {
    pub item: InventoryItem,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ItemRemoved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRemoved {
    pub item_id: ItemId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: StatusChanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChanged {
    pub item_id: ItemId,
    pub from: ItemStatus,
    pub to: ItemStatus,
    pub occurred_at: DateTime<Utc>,
}

/// Event: SwapRequested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapRequested {
    pub request: SwapRequest,
    pub occurred_at: DateTime<Utc>,
}

/// Change notifications published by the inventory store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InventoryEvent {
    ItemAdded(ItemAdded),
    ItemRemoved(ItemRemoved),
    StatusChanged(StatusChanged),
    SwapRequested(SwapRequested),
}

impl InventoryEvent {
    /// Whether the local inventory snapshot changed (and analysis is stale).
    pub fn changes_local_snapshot(&self) -> bool {
        !matches!(self, InventoryEvent::SwapRequested(_))
    }
}

impl Event for InventoryEvent {
    fn event_type(&self) -> &'static str {
        match self {
            InventoryEvent::ItemAdded(_) => "inventory.item.added",
            InventoryEvent::ItemRemoved(_) => "inventory.item.removed",
            InventoryEvent::StatusChanged(_) => "inventory.item.status_changed",
            InventoryEvent::SwapRequested(_) => "inventory.swap.requested",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            InventoryEvent::ItemAdded(e) => e.occurred_at,
            InventoryEvent::ItemRemoved(e) => e.occurred_at,
            InventoryEvent::StatusChanged(e) => e.occurred_at,
            InventoryEvent::SwapRequested(e) => e.occurred_at,
        }
    }
}
