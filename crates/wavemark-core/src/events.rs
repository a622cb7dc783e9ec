//! Typed publish/subscribe
//!
//! Every entity that emits events owns an [`Emitter`]. Subscribing returns a
//! [`SubscriptionId`] that cancels the subscription via [`Emitter::off`];
//! [`Emitter::clear`] releases every listener at once, which is how entities
//! tear down deterministically when they are removed.

/// Handle for cancelling a subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Listener<E> {
    id: SubscriptionId,
    once: bool,
    callback: Box<dyn FnMut(&E)>,
}

/// Synchronous event channel for events of type `E`
pub struct Emitter<E> {
    listeners: Vec<Listener<E>>,
    next_id: u64,
}

impl<E> Default for Emitter<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> std::fmt::Debug for Emitter<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Emitter")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl<E> Emitter<E> {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    fn subscribe(&mut self, once: bool, callback: Box<dyn FnMut(&E)>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push(Listener { id, once, callback });
        id
    }

    /// Subscribe to every future event
    pub fn on(&mut self, listener: impl FnMut(&E) + 'static) -> SubscriptionId {
        self.subscribe(false, Box::new(listener))
    }

    /// Subscribe to the next event only
    pub fn once(&mut self, listener: impl FnMut(&E) + 'static) -> SubscriptionId {
        self.subscribe(true, Box::new(listener))
    }

    /// Cancel a subscription; returns false if it was already gone
    pub fn off(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|l| l.id != id);
        self.listeners.len() != before
    }

    /// Deliver an event to all listeners in subscription order
    pub fn emit(&mut self, event: &E) {
        for listener in self.listeners.iter_mut() {
            (listener.callback)(event);
        }
        self.listeners.retain(|l| !l.once);
    }

    /// Release every listener
    pub fn clear(&mut self) {
        self.listeners.clear();
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}
