//! Demo catalogue: the mock hospitals and listings the dashboard ships with.

use chrono::NaiveDate;

use medswap_core::{HospitalId, ItemId};

use crate::hospital::Hospital;
use crate::item::{Category, Condition, InventoryItem, ItemStatus};
use crate::store::Catalog;

pub const LOCAL_HOSPITAL_ID: &str = "hosp-001";

fn hospital(id: &str, name: &str, location: &str, distance: &str, rating: f32) -> Hospital {
    Hospital {
        id: HospitalId::new(id),
        name: name.to_string(),
        location: location.to_string(),
        distance: distance.to_string(),
        rating,
    }
}

/// Evaluated in `const` blocks, so a bad demo date fails the build.
const fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(d) => d,
        None => panic!("invalid demo date"),
    }
}

#[allow(clippy::too_many_arguments)]
fn item(
    id: &str,
    name: &str,
    category: Category,
    quantity: u32,
    unit: &str,
    expiration_date: NaiveDate,
    hospital_id: &str,
    description: &str,
) -> InventoryItem {
    InventoryItem {
        id: ItemId::new(id),
        name: name.to_string(),
        category,
        quantity,
        unit: unit.to_string(),
        expiration_date,
        condition: Condition::New,
        status: ItemStatus::Available,
        hospital_id: HospitalId::new(hospital_id),
        description: description.to_string(),
    }
}

pub fn demo_hospitals() -> Vec<Hospital> {
    vec![
        hospital("hosp-001", "St. Mary's General Hospital", "Downtown", "0km", 4.8),
        hospital("hosp-002", "Green Valley Medical Center", "Westside", "4.2km", 4.5),
        hospital("hosp-003", "Riverfront Children's Hospital", "Eastside", "12.8km", 4.9),
        hospital("hosp-004", "North Memorial Health", "North District", "8.5km", 4.2),
    ]
}

pub fn demo_items() -> Vec<InventoryItem> {
    vec![
        item(
            "item-1",
            "Amoxicillin 500mg Capsules",
            Category::Medicine,
            250,
            "Boxes",
            const { date(2025, 6, 15) },
            "hosp-001",
            "Surplus stock from over-ordering for seasonal needs.",
        ),
        item(
            "item-2",
            "N95 Respirator Masks",
            Category::Ppe,
            1200,
            "Pieces",
            const { date(2026, 12, 1) },
            "hosp-001",
            "Bulk surplus from emergency preparedness reserve.",
        ),
        item(
            "item-3",
            "Disposable Scalpels (Size 10)",
            Category::Surgical,
            45,
            "Boxes (10ct)",
            const { date(2024, 9, 30) },
            "hosp-002",
            "Switching to different supplier, current stock unused.",
        ),
        item(
            "item-4",
            "Rapid Antigen Test Kits",
            Category::Diagnostics,
            500,
            "Kits",
            const { date(2024, 5, 20) },
            "hosp-003",
            "Short dated surplus needs immediate utilization.",
        ),
    ]
}

/// Full demo catalogue with `hosp-001` as the viewing hospital.
pub fn demo_catalog() -> Catalog {
    Catalog {
        local_hospital_id: HospitalId::new(LOCAL_HOSPITAL_ID),
        hospitals: demo_hospitals(),
        items: demo_items(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_catalog_is_complete() {
        let catalog = demo_catalog();
        assert_eq!(catalog.hospitals.len(), 4);
        assert_eq!(catalog.items.len(), 4);
        assert!(catalog.hospitals.iter().any(|h| h.id == catalog.local_hospital_id));
    }

    #[test]
    fn demo_items_keep_their_listed_expiry_dates() {
        let dates: Vec<_> = demo_items()
            .into_iter()
            .map(|i| (i.id.to_string(), i.expiration_date))
            .collect();
        assert_eq!(
            dates,
            vec![
                ("item-1".to_string(), NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()),
                ("item-2".to_string(), NaiveDate::from_ymd_opt(2026, 12, 1).unwrap()),
                ("item-3".to_string(), NaiveDate::from_ymd_opt(2024, 9, 30).unwrap()),
                ("item-4".to_string(), NaiveDate::from_ymd_opt(2024, 5, 20).unwrap()),
            ]
        );
    }
}
