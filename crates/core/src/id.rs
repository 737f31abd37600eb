//! Strongly-typed identifiers used across the domain.
//!
//! Identifiers are opaque strings: the seed catalogue uses human-readable
//! keys (`hosp-001`, `item-1`) while generated ids are prefixed UUIDv7s.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Identifier of a hospital (marketplace participant).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HospitalId(String);

/// Identifier of an inventory listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

/// Identifier of a swap request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SwapRequestId(String);

macro_rules! impl_string_id {
    ($t:ty, $name:literal, $prefix:literal) => {
        impl $t {
            /// Generate a fresh identifier.
            ///
            /// Uses UUIDv7 (time-ordered) behind a readable prefix. Prefer passing
            /// IDs explicitly in tests for determinism.
            pub fn generate() -> Self {
                Self(format!("{}-{}", $prefix, Uuid::now_v7()))
            }

            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $t {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<$t> for String {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err(DomainError::invalid_id(format!("{}: empty", $name)));
                }
                Ok(Self(trimmed.to_string()))
            }
        }
    };
}

impl_string_id!(HospitalId, "HospitalId", "hosp");
impl_string_id!(ItemId, "ItemId", "item");
impl_string_id!(SwapRequestId, "SwapRequestId", "swap");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_prefixed_and_distinct() {
        let a = ItemId::generate();
        let b = ItemId::generate();
        assert!(a.as_str().starts_with("item-"));
        assert_ne!(a, b);
        assert!(SwapRequestId::generate().as_str().starts_with("swap-"));
    }

    #[test]
    fn parse_rejects_blank() {
        assert!("   ".parse::<HospitalId>().is_err());
        assert_eq!("hosp-001".parse::<HospitalId>().unwrap(), HospitalId::new("hosp-001"));
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&ItemId::new("item-1")).unwrap();
        assert_eq!(json, "\"item-1\"");
    }
}
