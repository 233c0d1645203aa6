//! Change notification for shared terrain resources
//!
//! A [`ChangeSignal`] is a cheap clonable handle; every clone refers to the
//! same listener list. Listeners run synchronously inside [`ChangeSignal::emit`].

use std::cell::RefCell;
use std::rc::Rc;

/// Handle returned by [`ChangeSignal::subscribe`], used to unsubscribe
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut()>;

#[derive(Default)]
struct SignalState {
    next_id: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
    /// Unsubscribed while their listener list was checked out by `emit`
    removed_during_emit: Vec<SubscriptionId>,
    emitting: bool,
}

/// A single-threaded "resource changed" signal
#[derive(Clone, Default)]
pub struct ChangeSignal {
    state: Rc<RefCell<SignalState>>,
}

impl ChangeSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener, called on every [`emit`](Self::emit).
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: FnMut() + 'static,
    {
        let mut state = self.state.borrow_mut();
        let id = SubscriptionId(state.next_id);
        state.next_id += 1;
        state.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut state = self.state.borrow_mut();
        let before = state.listeners.len();
        state.listeners.retain(|(sid, _)| *sid != id);
        if state.listeners.len() != before {
            return true;
        }
        if state.emitting && !state.removed_during_emit.contains(&id) && id.0 < state.next_id {
            state.removed_during_emit.push(id);
            return true;
        }
        false
    }

    /// Notify every listener.
    pub fn emit(&self) {
        let mut listeners = {
            let mut state = self.state.borrow_mut();
            state.emitting = true;
            std::mem::take(&mut state.listeners)
        };

        for (_, listener) in listeners.iter_mut() {
            listener();
        }

        let mut state = self.state.borrow_mut();
        let removed = std::mem::take(&mut state.removed_during_emit);
        listeners.retain(|(id, _)| !removed.contains(id));
        // Keep listeners that subscribed while we were emitting
        listeners.append(&mut state.listeners);
        state.listeners = listeners;
        state.emitting = false;
    }

    pub fn listener_count(&self) -> usize {
        self.state.borrow().listeners.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn subscribe_emit_unsubscribe() {
        let signal = ChangeSignal::new();
        let hits = Rc::new(Cell::new(0));

        let h = hits.clone();
        let id = signal.subscribe(move || h.set(h.get() + 1));
        assert_eq!(signal.listener_count(), 1);

        signal.emit();
        signal.emit();
        assert_eq!(hits.get(), 2);

        assert!(signal.unsubscribe(id));
        assert!(!signal.unsubscribe(id));
        signal.emit();
        assert_eq!(hits.get(), 2);
        assert_eq!(signal.listener_count(), 0);
    }

    #[test]
    fn clones_share_listeners() {
        let signal = ChangeSignal::new();
        let other = signal.clone();
        let hits = Rc::new(Cell::new(0));

        let h = hits.clone();
        other.subscribe(move || h.set(h.get() + 1));
        signal.emit();
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn listener_can_subscribe_and_unsubscribe_during_emit() {
        let signal = ChangeSignal::new();
        let hits = Rc::new(Cell::new(0));
        let own_id = Rc::new(Cell::new(None));

        let s = signal.clone();
        let h = hits.clone();
        let own = own_id.clone();
        let id = signal.subscribe(move || {
            h.set(h.get() + 1);
            if let Some(id) = own.get() {
                s.unsubscribe(id);
            }
            let h2 = h.clone();
            s.subscribe(move || h2.set(h2.get() + 100));
        });
        own_id.set(Some(id));

        signal.emit();
        assert_eq!(hits.get(), 1);
        // The self-removing listener is gone, the one it added remains
        assert_eq!(signal.listener_count(), 1);

        signal.emit();
        assert_eq!(hits.get(), 101);
    }
}
