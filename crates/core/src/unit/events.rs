//! Outbound combat notifications.
//!
//! The engine emits fire-and-forget notifications to zero or more subscribers;
//! it never depends on whether anyone is listening. The presentation layer
//! subscribes to drive damage flashes, death animations, and teardown timing —
//! all of that timing lives outside this core, which never blocks on or waits
//! for an effect to finish.

use std::fmt;

/// Subscriber interface for unit combat events.
///
/// All methods have empty default bodies so observers implement only what
/// they care about. Observers must not assume exclusive access to the unit;
/// they receive copies of the relevant values, never handles into its state.
pub trait UnitObserver {
    /// The unit took damage: `(amount, health_remaining)`.
    fn on_damage_taken(&mut self, _amount: u32, _remaining: u32) {}

    /// The unit's health reached zero. Fires exactly once per unit.
    fn on_died(&mut self) {}
}

/// The set of subscribers attached to one unit.
#[derive(Default)]
pub struct ObserverSet {
    subscribers: Vec<Box<dyn UnitObserver>>,
}

impl ObserverSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subscriber. Subscribers are notified in registration order.
    pub fn subscribe(&mut self, observer: Box<dyn UnitObserver>) {
        self.subscribers.push(observer);
    }

    pub(crate) fn notify_damage_taken(&mut self, amount: u32, remaining: u32) {
        for subscriber in &mut self.subscribers {
            subscriber.on_damage_taken(amount, remaining);
        }
    }

    pub(crate) fn notify_died(&mut self) {
        for subscriber in &mut self.subscribers {
            subscriber.on_died();
        }
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}

impl fmt::Debug for ObserverSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverSet")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
