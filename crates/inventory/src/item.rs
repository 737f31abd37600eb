use core::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use medswap_core::{DomainError, DomainResult, Entity, HospitalId, ItemId};

/// Fixed category enumeration. Declaration order is display order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Medicine,
    #[serde(rename = "PPE")]
    Ppe,
    Surgical,
    Diagnostics,
    Other,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Medicine,
        Category::Ppe,
        Category::Surgical,
        Category::Diagnostics,
        Category::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Medicine => "Medicine",
            Category::Ppe => "PPE",
            Category::Surgical => "Surgical",
            Category::Diagnostics => "Diagnostics",
            Category::Other => "Other",
        }
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                DomainError::validation(format!(
                    "unknown category '{wanted}' (expected one of: Medicine, PPE, Surgical, Diagnostics, Other)"
                ))
            })
    }
}

/// Physical condition of a listed item.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Condition {
    New,
    #[serde(rename = "Like New")]
    LikeNew,
}

/// Listing lifecycle.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemStatus {
    Available,
    Reserved,
    Swapped,
}

impl ItemStatus {
    /// Legal transitions. `Swapped` is terminal.
    pub fn can_transition_to(self, next: ItemStatus) -> bool {
        use ItemStatus::*;
        matches!(
            (self, next),
            (Available, Reserved) | (Available, Swapped) | (Reserved, Swapped) | (Reserved, Available)
        )
    }
}

/// A surplus stock listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: ItemId,
    pub name: String,
    pub category: Category,
    pub quantity: u32,
    pub unit: String,
    pub expiration_date: NaiveDate,
    pub condition: Condition,
    pub status: ItemStatus,
    pub hospital_id: HospitalId,
    pub description: String,
}

impl Entity for InventoryItem {
    type Id = ItemId;

    fn id(&self) -> &ItemId {
        &self.id
    }
}

fn default_unit() -> String {
    "Units".to_string()
}

/// Input for a new listing: every item field except the ones the store
/// assigns (`id`, `hospitalId`, `condition`, `status`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDraft {
    pub name: String,
    pub category: Category,
    pub quantity: u32,
    #[serde(default = "default_unit")]
    pub unit: String,
    pub expiration_date: NaiveDate,
    #[serde(default)]
    pub description: String,
}

impl ItemDraft {
    pub fn new(
        name: impl Into<String>,
        category: Category,
        quantity: u32,
        expiration_date: NaiveDate,
    ) -> Self {
        Self {
            name: name.into(),
            category,
            quantity,
            unit: default_unit(),
            expiration_date,
            description: String::new(),
        }
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Check constraints and normalise whitespace.
    ///
    /// Quantity and date validity are carried by the types.
    pub fn validate(mut self) -> DomainResult<Self> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        self.name = name.to_string();

        let unit = self.unit.trim();
        self.unit = if unit.is_empty() { default_unit() } else { unit.to_string() };
        Ok(self)
    }
}
