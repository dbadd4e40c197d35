//! # void_event - Observer Channels
//!
//! Synchronous multicast notification for single-threaded editor code:
//! - Handlers run in subscription order
//! - Delivery happens inline, on the caller's thread
//! - Dispatch never allocates
//!
//! The subscriber list can only change through `&mut Notifier`, and handlers
//! never receive the notifier, so a handler cannot subscribe or unsubscribe
//! while a notification is being delivered.

/// Subscriber ID
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriberId(pub u64);

impl std::fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Subscriber({})", self.0)
    }
}

/// Event handler function type
pub type EventHandler<E> = Box<dyn FnMut(&E)>;

/// Multicast channel for a single event type
pub struct Notifier<E> {
    /// Handlers in subscription order
    handlers: Vec<(SubscriberId, EventHandler<E>)>,
    /// Next subscriber ID
    next_subscriber_id: u64,
}

impl<E> Notifier<E> {
    /// Create a new notifier with no subscribers
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
            next_subscriber_id: 1,
        }
    }

    /// Subscribe a handler; it is called after every handler subscribed before it
    pub fn subscribe<F>(&mut self, handler: F) -> SubscriberId
    where
        F: FnMut(&E) + 'static,
    {
        let id = SubscriberId(self.next_subscriber_id);
        self.next_subscriber_id += 1;
        self.handlers.push((id, Box::new(handler)));
        log::trace!("{} subscribed", id);
        id
    }

    /// Unsubscribe. Returns false if the id was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(sub_id, _)| *sub_id != id);
        let removed = self.handlers.len() != before;
        if removed {
            log::trace!("{} unsubscribed", id);
        }
        removed
    }

    /// Deliver an event to every subscriber, in subscription order
    pub fn notify(&mut self, event: &E) {
        for (_, handler) in self.handlers.iter_mut() {
            handler(event);
        }
    }

    /// Check whether a subscriber is registered
    pub fn is_subscribed(&self, id: SubscriberId) -> bool {
        self.handlers.iter().any(|(sub_id, _)| *sub_id == id)
    }

    /// Remove all subscribers
    pub fn clear(&mut self) {
        self.handlers.clear();
    }

    /// Get subscriber count
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Check if there are no subscribers
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<E> Default for Notifier<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> std::fmt::Debug for Notifier<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("subscribers", &self.handlers.len())
            .field("next_subscriber_id", &self.next_subscriber_id)
            .finish()
    }
}

/// Prelude
pub mod prelude {
    pub use crate::{EventHandler, Notifier, SubscriberId};
}
