//! Inventory Store: the single owner and mutator of the local hospital's
//! listings, plus read access to the marketplace.

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use medswap_core::{
    Clock, DomainError, DomainResult, HospitalId, ItemId, SystemClock, first_duplicate_id,
};
use medswap_events::{Event, EventBus, InMemoryEventBus, Subscription};

use crate::events::{InventoryEvent, ItemAdded, ItemRemoved, StatusChanged, SwapRequested};
use crate::hospital::Hospital;
use crate::item::{Category, Condition, InventoryItem, ItemDraft, ItemStatus};
use crate::marketplace::{MarketplaceListing, MarketplaceQuery, build_listings};
use crate::seed;
use crate::stats::{self, DashboardStats, ExpiryStatus};
use crate::swap::{SwapRequest, swap_notification};

/// Initial contents of a store.
///
/// `items` may mix local and marketplace listings; the store splits them by
/// `hospital_id`.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub local_hospital_id: HospitalId,
    pub hospitals: Vec<Hospital>,
    pub items: Vec<InventoryItem>,
}

/// Immutable point-in-time copy of the local inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventorySnapshot {
    pub items: Vec<InventoryItem>,
    pub taken_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct StoreState {
    /// Newest first.
    local: Vec<InventoryItem>,
    swaps: Vec<SwapRequest>,
}

/// In-memory inventory store.
///
/// All mutation happens under one write lock, so a caller that has seen a
/// mutator return observes that mutation in every later read. Change
/// notifications go out on the event bus after the lock is released.
pub struct InventoryStore<B = InMemoryEventBus<InventoryEvent>> {
    local_hospital_id: HospitalId,
    hospitals: Vec<Hospital>,
    marketplace: Vec<InventoryItem>,
    state: RwLock<StoreState>,
    clock: Arc<dyn Clock>,
    bus: B,
}

impl InventoryStore {
    pub fn new(catalog: Catalog, clock: Arc<dyn Clock>) -> DomainResult<Self> {
        Self::with_bus(catalog, clock, InMemoryEventBus::new())
    }

    /// Store seeded with the demo catalogue on the wall clock.
    pub fn demo() -> DomainResult<Self> {
        Self::new(seed::demo_catalog(), Arc::new(SystemClock))
    }
}

impl<B> InventoryStore<B>
where
    B: EventBus<InventoryEvent>,
{
    pub fn with_bus(catalog: Catalog, clock: Arc<dyn Clock>, bus: B) -> DomainResult<Self> {
        let Catalog {
            local_hospital_id,
            hospitals,
            items,
        } = catalog;

        if let Some(dup) = first_duplicate_id(&hospitals) {
            return Err(DomainError::validation(format!("duplicate hospital id {dup}")));
        }
        if !hospitals.iter().any(|h| h.id == local_hospital_id) {
            return Err(DomainError::validation(format!(
                "local hospital {local_hospital_id} is not in the hospital directory"
            )));
        }
        if let Some(dup) = first_duplicate_id(&items) {
            return Err(DomainError::validation(format!("duplicate item id {dup}")));
        }
        if let Some(orphan) = items
            .iter()
            .find(|i| !hospitals.iter().any(|h| h.id == i.hospital_id))
        {
            return Err(DomainError::validation(format!(
                "item {} references unknown hospital {}",
                orphan.id, orphan.hospital_id
            )));
        }

        let (local, marketplace): (Vec<_>, Vec<_>) = items
            .into_iter()
            .partition(|i| i.hospital_id == local_hospital_id);

        debug!(
            hospital = %local_hospital_id,
            local = local.len(),
            marketplace = marketplace.len(),
            "inventory store initialised"
        );

        Ok(Self {
            local_hospital_id,
            hospitals,
            marketplace,
            state: RwLock::new(StoreState {
                local,
                swaps: Vec::new(),
            }),
            clock,
            bus,
        })
    }

    fn read(&self) -> RwLockReadGuard<'_, StoreState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, event: InventoryEvent) {
        let event_type = event.event_type();
        if let Err(e) = self.bus.publish(event) {
            // The mutation already happened; subscribers will catch up on the next change.
            warn!(event_type, error = ?e, "failed to publish inventory event");
        }
    }

    fn fresh_id(&self, state: &StoreState) -> ItemId {
        loop {
            let id = ItemId::generate();
            let taken = state.local.iter().any(|i| i.id == id)
                || self.marketplace.iter().any(|i| i.id == id);
            if !taken {
                return id;
            }
        }
    }

    /// Subscribe to change notifications.
    pub fn subscribe(&self) -> Subscription<InventoryEvent> {
        self.bus.subscribe()
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// Evaluation-time date; read fresh on every call.
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    // -------------------------
    // Hospitals
    // -------------------------

    pub fn local_hospital_id(&self) -> &HospitalId {
        &self.local_hospital_id
    }

    pub fn local_hospital(&self) -> Option<&Hospital> {
        self.hospital(&self.local_hospital_id)
    }

    pub fn hospitals(&self) -> &[Hospital] {
        &self.hospitals
    }

    pub fn hospital(&self, id: &HospitalId) -> Option<&Hospital> {
        self.hospitals.iter().find(|h| &h.id == id)
    }

    // -------------------------
    // Mutators
    // -------------------------

    /// List a new surplus item for the local hospital.
    ///
    /// The item is prepended, gets a fresh id and always starts `Available`
    /// and `New` regardless of input.
    pub fn add_item(&self, draft: ItemDraft) -> DomainResult<InventoryItem> {
        let draft = draft.validate()?;

        let item = {
            let mut state = self.write();
            let item = InventoryItem {
                id: self.fresh_id(&state),
                name: draft.name,
                category: draft.category,
                quantity: draft.quantity,
                unit: draft.unit,
                expiration_date: draft.expiration_date,
                condition: Condition::New,
                status: ItemStatus::Available,
                hospital_id: self.local_hospital_id.clone(),
                description: draft.description,
            };
            state.local.insert(0, item.clone());
            item
        };

        info!(item_id = %item.id, name = %item.name, category = %item.category, "inventory item added");
        self.publish(InventoryEvent::ItemAdded(ItemAdded {
            item: item.clone(),
            occurred_at: self.clock.now(),
        }));
        Ok(item)
    }

    /// Remove a local item. Unknown ids are a no-op.
    pub fn remove_item(&self, id: &ItemId) -> Option<InventoryItem> {
        let removed = {
            let mut state = self.write();
            let pos = state.local.iter().position(|i| &i.id == id)?;
            state.local.remove(pos)
        };

        info!(item_id = %removed.id, "inventory item removed");
        self.publish(InventoryEvent::ItemRemoved(ItemRemoved {
            item_id: removed.id.clone(),
            occurred_at: self.clock.now(),
        }));
        Some(removed)
    }

    /// Move a local item through its listing lifecycle.
    pub fn set_status(&self, id: &ItemId, status: ItemStatus) -> DomainResult<InventoryItem> {
        let (from, item) = {
            let mut state = self.write();
            let item = state
                .local
                .iter_mut()
                .find(|i| &i.id == id)
                .ok_or_else(|| DomainError::not_found(format!("item {id}")))?;

            if !item.status.can_transition_to(status) {
                return Err(DomainError::conflict(format!(
                    "item {id} cannot move from {:?} to {status:?}",
                    item.status
                )));
            }

            let from = item.status;
            item.status = status;
            (from, item.clone())
        };

        info!(item_id = %item.id, ?from, to = ?status, "inventory item status changed");
        self.publish(InventoryEvent::StatusChanged(StatusChanged {
            item_id: item.id.clone(),
            from,
            to: status,
            occurred_at: self.clock.now(),
        }));
        Ok(item)
    }

    pub fn mark_swapped(&self, id: &ItemId) -> DomainResult<InventoryItem> {
        self.set_status(id, ItemStatus::Swapped)
    }

    /// Initiate a swap: offer a local item for a marketplace item.
    ///
    /// This records a `Pending` request and notifies; there is no negotiation.
    pub fn request_swap(
        &self,
        requested_item_id: &ItemId,
        offered_item_id: &ItemId,
    ) -> DomainResult<SwapRequest> {
        let requested = self
            .marketplace
            .iter()
            .find(|i| &i.id == requested_item_id)
            .ok_or_else(|| DomainError::not_found(format!("marketplace item {requested_item_id}")))?;
        if requested.status != ItemStatus::Available {
            return Err(DomainError::conflict(format!(
                "marketplace item {requested_item_id} is not available"
            )));
        }

        let request = {
            let mut state = self.write();
            let offered = state
                .local
                .iter()
                .find(|i| &i.id == offered_item_id)
                .ok_or_else(|| DomainError::not_found(format!("item {offered_item_id}")))?;
            if offered.status != ItemStatus::Available {
                return Err(DomainError::conflict(format!(
                    "item {offered_item_id} is not available to offer"
                )));
            }

            let request = SwapRequest::initiate(
                self.local_hospital_id.clone(),
                requested.hospital_id.clone(),
                offered.id.clone(),
                requested.id.clone(),
                self.clock.now(),
            );
            state.swaps.push(request.clone());
            request
        };

        info!(
            swap_id = %request.id,
            to_hospital = %request.to_hospital_id,
            "{}",
            swap_notification(&requested.name)
        );
        self.publish(InventoryEvent::SwapRequested(SwapRequested {
            request: request.clone(),
            occurred_at: self.clock.now(),
        }));
        Ok(request)
    }

    // -------------------------
    // Reads
    // -------------------------

    /// Local items, most recently added first.
    pub fn list_local(&self) -> Vec<InventoryItem> {
        self.read().local.clone()
    }

    pub fn list_marketplace(&self) -> Vec<InventoryItem> {
        self.marketplace.clone()
    }

    pub fn get_local(&self, id: &ItemId) -> Option<InventoryItem> {
        self.read().local.iter().find(|i| &i.id == id).cloned()
    }

    pub fn snapshot(&self) -> InventorySnapshot {
        InventorySnapshot {
            items: self.list_local(),
            taken_at: self.clock.now(),
        }
    }

    pub fn swap_requests(&self) -> Vec<SwapRequest> {
        self.read().swaps.clone()
    }

    pub fn marketplace_listings(&self, query: &MarketplaceQuery) -> Vec<MarketplaceListing> {
        build_listings(&self.marketplace, &self.hospitals, query)
    }

    // -------------------------
    // Derived queries
    // -------------------------

    pub fn count_by_category(&self) -> BTreeMap<Category, usize> {
        stats::count_by_category(&self.read().local)
    }

    /// Local items expiring strictly before today + `days`.
    pub fn expiring_within(&self, days: u32) -> usize {
        let today = self.today();
        stats::expiring_within(&self.read().local, today, days)
    }

    /// Badge for `item` against today's date and a `window_days` horizon.
    pub fn expiry_status(&self, item: &InventoryItem, window_days: u32) -> ExpiryStatus {
        stats::expiry_status(item, self.today(), window_days)
    }

    pub fn dashboard_stats(&self, window_days: u32) -> DashboardStats {
        let today = self.today();
        stats::dashboard_stats(&self.read().local, today, window_days)
    }
}
