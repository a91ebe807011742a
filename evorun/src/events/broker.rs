#[cfg(test)]
#[path = "../../tests/unit/events/broker_test.rs"]
mod broker_test;

use super::*;
use crate::utils::{GenericError, GenericResult};
use rustc_hash::FxHashMap;

/// A listener of life-cycle events. An error returned by a listener aborts the whole execution.
pub type Listener<P> = Box<dyn Fn(&Event<P>) -> GenericResult<Decision<P>>>;

/// A typed publish/subscribe hub for life-cycle events.
pub struct EventBroker<P: Program> {
    listeners: FxHashMap<EventKind, Vec<Listener<P>>>,
}

impl<P: Program> Default for EventBroker<P> {
    fn default() -> Self {
        Self { listeners: FxHashMap::default() }
    }
}

impl<P: Program> EventBroker<P> {
    /// Registers a listener for the given event kind. Listeners are called in registration order.
    pub fn subscribe<F>(&mut self, kind: EventKind, listener: F)
    where
        F: Fn(&Event<P>) -> GenericResult<Decision<P>> + 'static,
    {
        self.listeners.entry(kind).or_default().push(Box::new(listener));
    }

    /// Returns amount of listeners registered for the given event kind.
    pub fn listeners(&self, kind: EventKind) -> usize {
        self.listeners.get(&kind).map_or(0, |listeners| listeners.len())
    }

    /// Publishes the event and returns its final version: every listener sees the payload left by the
    /// previous one, so the last override wins. Returns `None` when a listener rejects the event, in this
    /// case remaining listeners are not called. Without listeners, the event is returned unchanged.
    pub fn publish(&self, event: Event<P>) -> GenericResult<Option<Event<P>>> {
        let kind = event.kind();
        let Some(listeners) = self.listeners.get(&kind) else {
            return Ok(Some(event));
        };

        let mut event = event;

        for listener in listeners {
            match listener(&event)? {
                Decision::Accept => {}
                Decision::Override(other) if !kind.is_overridable() => {
                    return Err(format!("listener cannot override {kind} event with {}", other.kind()).into());
                }
                Decision::Override(other) if other.kind() != kind => {
                    return Err(format!("listener replaced {kind} event with {} one", other.kind()).into());
                }
                Decision::Override(other) => event = other,
                Decision::Reject if !kind.is_rejectable() => {
                    return Err(format!("listener cannot reject {kind} event").into());
                }
                Decision::Reject => return Ok(None),
            }
        }

        Ok(Some(event))
    }

    /// Publishes a notification event which listeners cannot change.
    pub fn notify(&self, event: Event<P>) -> GenericResult<()> {
        self.publish(event).map(|_| ())
    }
}

pub(crate) fn unexpected_event<P: Program>(expected: EventKind, actual: &Event<P>) -> GenericError {
    format!("expected {expected} event, got {}", actual.kind()).into()
}
