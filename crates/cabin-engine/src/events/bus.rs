//! Synchronous publish/subscribe keyed by [`EventKind`].

use std::collections::BTreeMap;

use super::{EventKind, GameEvent};

/// Handle returned by [`EventBus::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

type Handler<C> = Box<dyn FnMut(&GameEvent, &mut C) + Send>;

/// Dispatches events to handlers in subscription order.
///
/// Handlers receive the event and a mutable context (`C`, usually the game
/// state). Nothing is queued: `emit` returns after every handler for the
/// event's kind has run.
pub struct EventBus<C> {
    handlers: BTreeMap<EventKind, Vec<(SubscriptionId, Handler<C>)>>,
    next_id: u64,
}

impl<C> Default for EventBus<C> {
    fn default() -> Self {
        Self {
            handlers: BTreeMap::new(),
            next_id: 0,
        }
    }
}

impl<C> std::fmt::Debug for EventBus<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("handlers", &self.handler_count())
            .finish()
    }
}

impl<C> EventBus<C> {
    /// An empty bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `handler` for every event of `kind`.
    pub fn subscribe<F>(&mut self, kind: EventKind, handler: F) -> SubscriptionId
    where
        F: FnMut(&GameEvent, &mut C) + Send + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.handlers
            .entry(kind)
            .or_default()
            .push((id, Box::new(handler)));
        id
    }

    /// Remove a handler. Unknown ids are ignored.
    pub fn unsubscribe(&mut self, kind: EventKind, id: SubscriptionId) -> bool {
        let Some(list) = self.handlers.get_mut(&kind) else {
            return false;
        };
        let before = list.len();
        list.retain(|(sid, _)| *sid != id);
        before != list.len()
    }

    /// Deliver an event to its handlers.
    pub fn emit(&mut self, event: &GameEvent, ctx: &mut C) {
        if let Some(list) = self.handlers.get_mut(&event.kind()) {
            for (_, handler) in list.iter_mut() {
                handler(event, ctx);
            }
        }
    }

    /// Drop every handler.
    pub fn clear(&mut self) {
        self.handlers.clear();
    }

    /// Total number of handlers.
    pub fn handler_count(&self) -> usize {
        self.handlers.values().map(Vec::len).sum()
    }
}
