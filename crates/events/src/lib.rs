//! Event mechanics: the `Event` contract plus a lightweight pub/sub bus.
//!
//! Stores publish change notifications here; watchers (such as the analysis
//! coordinator) subscribe to react to them.

pub mod bus;
pub mod event;
pub mod in_memory_bus;

pub use bus::{EventBus, Subscription};
pub use event::Event;
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};
