//! Event publishing/subscription abstraction (mechanics only).
//!
//! The bus distributes change notifications to any number of consumers. It
//! makes minimal assumptions:
//!
//! - **Transport-agnostic**: in-memory channels today, anything else later
//! - **Broadcast**: every subscription receives every message published after it subscribed
//! - **No persistence**: the publishing component holds the authoritative state
//!
//! Consumers should treat messages as "something changed" hints and re-read
//! state rather than replaying deltas, so dropped or coalesced messages are
//! harmless.

use std::sync::Arc;
use std::sync::mpsc::Receiver;
use std::time::Duration;

/// A subscription to an event stream.
///
/// ## Usage Pattern
///
/// ```ignore
/// let subscription = store.subscribe();
///
/// loop {
///     match subscription.recv_timeout(Duration::from_millis(250)) {
///         Ok(event) => react(event),
///         Err(std::sync::mpsc::RecvTimeoutError::Timeout) => continue,  // Check for shutdown
///         Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => break,  // Bus closed
///     }
/// }
/// ```
///
/// Subscriptions are designed for single-threaded consumption.
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: Receiver<M>,
}

impl<M> Subscription<M> {
    pub fn new(receiver: Receiver<M>) -> Self {
        Self { receiver }
    }

    /// Block until the next message is available.
    pub fn recv(&self) -> Result<M, std::sync::mpsc::RecvError> {
        self.receiver.recv()
    }

    /// Try to receive a message without blocking.
    pub fn try_recv(&self) -> Result<M, std::sync::mpsc::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Block for up to `timeout` waiting for a message.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<M, std::sync::mpsc::RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }

    /// Everything already queued, without blocking.
    ///
    /// Watchers use this to fold a burst of notifications into one reaction.
    pub fn pending(&self) -> std::sync::mpsc::TryIter<'_, M> {
        self.receiver.try_iter()
    }
}

/// Domain-agnostic event bus (pub/sub abstraction).
///
/// `publish()` can fail (e.g. poisoned lock). Publishers that have already
/// applied their state change should log the failure rather than undo it.
///
/// The trait requires `Send + Sync`: several threads may publish concurrently.
pub trait EventBus<M>: Send + Sync {
    type Error: core::fmt::Debug + Send + Sync + 'static;

    fn publish(&self, message: M) -> Result<(), Self::Error>;

    fn subscribe(&self) -> Subscription<M>;
}

impl<M, B> EventBus<M> for Arc<B>
where
    B: EventBus<M> + ?Sized,
{
    type Error = B::Error;

    fn publish(&self, message: M) -> Result<(), Self::Error> {
        (**self).publish(message)
    }

    fn subscribe(&self) -> Subscription<M> {
        (**self).subscribe()
    }
}
