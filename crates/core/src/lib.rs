//! `medswap-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod clock;
pub mod entity;
pub mod error;
pub mod id;

pub use clock::{Clock, FixedClock, SystemClock};
pub use entity::{Entity, first_duplicate_id};
pub use error::{DomainError, DomainResult};
pub use id::{HospitalId, ItemId, SwapRequestId};
