//! Minimal observable state container.
//!
//! State is replaced wholesale through [`Store::set_state`]; listeners
//! run synchronously, in subscription order, after every replacement.

/// Handle returned by [`Store::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subscription(u64);

type Listener<S> = Box<dyn FnMut(&S) + Send>;

/// Single-owner observable store over a cloneable state `S`.
pub struct Store<S: Clone> {
    state: S,
    listeners: Vec<(u64, Listener<S>)>,
    next_id: u64,
}

impl<S: Clone> Store<S> {
    pub fn new(initial: S) -> Self {
        Self {
            state: initial,
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    /// Snapshot of the current state.
    pub fn get_state(&self) -> S {
        self.state.clone()
    }

    /// Borrow the current state without cloning.
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Replace the state with `update(current)` and notify listeners.
    pub fn set_state(&mut self, update: impl FnOnce(S) -> S) {
        self.state = update(self.state.clone());
        let state = &self.state;
        for (_, listener) in &mut self.listeners {
            listener(state);
        }
    }

    /// Register a listener; it is not called with the current state.
    pub fn subscribe(&mut self, listener: impl FnMut(&S) + Send + 'static) -> Subscription {
        let id = self.next_id;
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        Subscription(id)
    }

    /// Drop a listener; unknown subscriptions are ignored.
    pub fn unsubscribe(&mut self, subscription: Subscription) {
        self.listeners.retain(|(id, _)| *id != subscription.0);
    }
}
