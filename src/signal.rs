//! Change notification.
//!
//! A tiny observer registry: subscribers are boxed callbacks stored in a
//! slotmap, so an id handed out once stays valid until it is unsubscribed and
//! is never confused with a later subscriber.

use slotmap::{SlotMap, new_key_type};

new_key_type! {
    /// Handle returned by `Observers::subscribe`
    pub struct SubscriptionId;
}

/// A subscriber callback
pub type Callback<E> = Box<dyn FnMut(&E)>;

pub struct Observers<E> {
    subscribers: SlotMap<SubscriptionId, Callback<E>>,
}

impl<E> Default for Observers<E> {
    fn default() -> Self {
        Self {
            subscribers: SlotMap::with_key(),
        }
    }
}

impl<E> Observers<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, f: impl FnMut(&E) + 'static) -> SubscriptionId {
        self.subscribers.insert(Box::new(f))
    }

    /// Returns false if the id was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.remove(id).is_some()
    }

    /// Deliver `event` to every subscriber.
    pub fn notify(&mut self, event: &E) {
        for (_, f) in self.subscribers.iter_mut() {
            f(event);
        }
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn notify_reaches_live_subscribers_only() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut obs = Observers::<u32>::new();

        let s1 = seen.clone();
        let a = obs.subscribe(move |v| s1.borrow_mut().push(("a", *v)));
        let s2 = seen.clone();
        obs.subscribe(move |v| s2.borrow_mut().push(("b", *v)));

        obs.notify(&1);
        assert!(obs.unsubscribe(a));
        assert!(!obs.unsubscribe(a));
        obs.notify(&2);

        let seen = seen.borrow();
        assert_eq!(seen.len(), 3);
        assert!(seen.contains(&("a", 1)));
        assert!(seen.contains(&("b", 1)));
        assert!(seen.contains(&("b", 2)));
        assert_eq!(obs.len(), 1);
    }
}
