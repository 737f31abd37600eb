//! Marketplace browsing: other hospitals' listings joined with the listing
//! hospital, with the category filter and sort controls of the dashboard.

use core::cmp::Ordering;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use medswap_core::{DomainError, DomainResult};

use crate::hospital::Hospital;
use crate::item::{Category, InventoryItem};

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketplaceSort {
    /// Nearest hospital first.
    #[default]
    Proximity,
    /// Soonest expiration first.
    Expiry,
    /// Largest quantity first.
    Quantity,
}

impl FromStr for MarketplaceSort {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "proximity" => Ok(MarketplaceSort::Proximity),
            "expiry" | "expiry_date" => Ok(MarketplaceSort::Expiry),
            "quantity" => Ok(MarketplaceSort::Quantity),
            other => Err(DomainError::validation(format!(
                "unknown sort '{other}' (expected one of: proximity, expiry, quantity)"
            ))),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarketplaceQuery {
    /// `None` shows every category.
    pub category: Option<Category>,
    pub sort: MarketplaceSort,
}

impl MarketplaceQuery {
    /// Build from raw query-string values. `"All"` (or nothing) disables the
    /// category filter.
    pub fn parse(category: Option<&str>, sort: Option<&str>) -> DomainResult<Self> {
        let category = match category.map(str::trim) {
            None | Some("") => None,
            Some(c) if c.eq_ignore_ascii_case("all") => None,
            Some(c) => Some(c.parse::<Category>()?),
        };
        let sort = match sort.map(str::trim) {
            None | Some("") => MarketplaceSort::default(),
            Some(s) => s.parse()?,
        };
        Ok(Self { category, sort })
    }
}

/// A marketplace card: the item plus who lists it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketplaceListing {
    #[serde(flatten)]
    pub item: InventoryItem,
    pub hospital: Hospital,
}

fn compare_distance(a: &Hospital, b: &Hospital) -> Ordering {
    match (a.distance_km(), b.distance_km()) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Filter, join and sort. Stable: ties keep catalogue order.
pub fn build_listings(
    items: &[InventoryItem],
    hospitals: &[Hospital],
    query: &MarketplaceQuery,
) -> Vec<MarketplaceListing> {
    let mut listings: Vec<MarketplaceListing> = items
        .iter()
        .filter(|item| query.category.is_none_or(|c| item.category == c))
        .filter_map(|item| {
            let hospital = hospitals.iter().find(|h| h.id == item.hospital_id)?;
            Some(MarketplaceListing {
                item: item.clone(),
                hospital: hospital.clone(),
            })
        })
        .collect();

    match query.sort {
        MarketplaceSort::Proximity => listings.sort_by(|a, b| compare_distance(&a.hospital, &b.hospital)),
        MarketplaceSort::Expiry => listings.sort_by_key(|l| l.item.expiration_date),
        MarketplaceSort::Quantity => listings.sort_by(|a, b| b.item.quantity.cmp(&a.item.quantity)),
    }

    listings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    fn marketplace() -> (Vec<InventoryItem>, Vec<Hospital>) {
        let catalog = seed::demo_catalog();
        let items = catalog
            .items
            .iter()
            .filter(|i| i.hospital_id != catalog.local_hospital_id)
            .cloned()
            .collect();
        (items, catalog.hospitals)
    }

    fn ids(listings: &[MarketplaceListing]) -> Vec<&str> {
        listings.iter().map(|l| l.item.id.as_str()).collect()
    }

    #[test]
    fn parse_query_defaults() {
        let q = MarketplaceQuery::parse(None, None).unwrap();
        assert_eq!(q, MarketplaceQuery::default());

        let q = MarketplaceQuery::parse(Some("All"), Some("quantity")).unwrap();
        assert_eq!(q.category, None);
        assert_eq!(q.sort, MarketplaceSort::Quantity);
    }

    #[test]
    fn parse_query_rejects_unknown_values() {
        assert!(MarketplaceQuery::parse(Some("Toys"), None).is_err());
        assert!(MarketplaceQuery::parse(None, Some("price")).is_err());
    }

    #[test]
    fn proximity_sort_puts_nearest_first() {
        let (items, hospitals) = marketplace();
        let listings = build_listings(&items, &hospitals, &MarketplaceQuery::default());
        // hosp-002 is 4.2km, hosp-003 is 12.8km
        assert_eq!(ids(&listings), vec!["item-3", "item-4"]);
        assert_eq!(listings[0].hospital.name, "Green Valley Medical Center");
    }

    #[test]
    fn expiry_and_quantity_sorts() {
        let (items, hospitals) = marketplace();
        let by_expiry = build_listings(
            &items,
            &hospitals,
            &MarketplaceQuery { category: None, sort: MarketplaceSort::Expiry },
        );
        assert_eq!(ids(&by_expiry), vec!["item-4", "item-3"]);

        let by_quantity = build_listings(
            &items,
            &hospitals,
            &MarketplaceQuery { category: None, sort: MarketplaceSort::Quantity },
        );
        assert_eq!(ids(&by_quantity), vec!["item-4", "item-3"]);
    }

    #[test]
    fn category_filter_applies() {
        let (items, hospitals) = marketplace();
        let listings = build_listings(
            &items,
            &hospitals,
            &MarketplaceQuery { category: Some(Category::Surgical), sort: MarketplaceSort::Proximity },
        );
        assert_eq!(ids(&listings), vec!["item-3"]);
    }

    #[test]
    fn listing_flattens_item_fields() {
        let (items, hospitals) = marketplace();
        let listings = build_listings(&items, &hospitals, &MarketplaceQuery::default());
        let json = serde_json::to_value(&listings[0]).unwrap();
        assert_eq!(json["id"], "item-3");
        assert_eq!(json["hospital"]["distance"], "4.2km");
    }
}
