//! Derived views over an inventory snapshot.
//!
//! Everything here is a pure function of the items and the evaluation date;
//! nothing is cached between calls.

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::item::{Category, InventoryItem};

/// Window used by the dashboard's "expiring soon" tile and item badges.
pub const DEFAULT_EXPIRY_WINDOW_DAYS: u32 = 90;

/// Count of items per category. All categories are present, zero included.
pub fn count_by_category(items: &[InventoryItem]) -> BTreeMap<Category, usize> {
    let mut counts: BTreeMap<Category, usize> = Category::ALL.into_iter().map(|c| (c, 0)).collect();
    for item in items {
        *counts.entry(item.category).or_insert(0) += 1;
    }
    counts
}

/// First date that is *not* inside the window starting at `today`.
fn window_end(today: NaiveDate, days: u32) -> NaiveDate {
    today
        .checked_add_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MAX)
}

/// Items whose expiration date is strictly before `today + days`.
pub fn expiring_within(items: &[InventoryItem], today: NaiveDate, days: u32) -> usize {
    let end = window_end(today, days);
    items.iter().filter(|i| i.expiration_date < end).count()
}

/// Badge state of a single listing.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryStatus {
    Expired,
    ExpiringSoon,
    Ok,
}

/// An item is expired from the first moment of its expiration date.
pub fn expiry_status(item: &InventoryItem, today: NaiveDate, window_days: u32) -> ExpiryStatus {
    if item.expiration_date <= today {
        ExpiryStatus::Expired
    } else if item.expiration_date < window_end(today, window_days) {
        ExpiryStatus::ExpiringSoon
    } else {
        ExpiryStatus::Ok
    }
}

/// Dashboard header tiles + category chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_items: usize,
    pub total_units: u64,
    pub expiring_soon: usize,
    pub expiry_window_days: u32,
    pub by_category: BTreeMap<Category, usize>,
}

pub fn dashboard_stats(items: &[InventoryItem], today: NaiveDate, window_days: u32) -> DashboardStats {
    DashboardStats {
        total_items: items.len(),
        total_units: items.iter().map(|i| u64::from(i.quantity)).sum(),
        expiring_soon: expiring_within(items, today, window_days),
        expiry_window_days: window_days,
        by_category: count_by_category(items),
    }
}
