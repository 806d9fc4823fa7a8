//! Change notification for mutable datasets.

use std::fmt;

use slotmap::{SlotMap, new_key_type};

new_key_type! {
    /// Handle returned by [`ChangeNotifier::subscribe`].
    pub struct SubscriptionId;
}

type Callback<E> = Box<dyn Fn(&E)>;

/// A set of callbacks invoked after each change.
pub struct ChangeNotifier<E> {
    subscribers: SlotMap<SubscriptionId, Callback<E>>,
}

impl<E> Default for ChangeNotifier<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for ChangeNotifier<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl<E> ChangeNotifier<E> {
    pub fn new() -> Self {
        Self {
            subscribers: SlotMap::with_key(),
        }
    }

    pub fn subscribe(&mut self, callback: impl Fn(&E) + 'static) -> SubscriptionId {
        self.subscribers.insert(Box::new(callback))
    }

    /// Returns false if the subscription was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.remove(id).is_some()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    pub fn notify(&self, event: &E) {
        for callback in self.subscribers.values() {
            callback(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_subscribe_notify_unsubscribe() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut notifier = ChangeNotifier::<u32>::new();
        let sink = Rc::clone(&seen);
        let id = notifier.subscribe(move |e| sink.borrow_mut().push(*e));
        notifier.notify(&1);
        notifier.notify(&2);
        assert!(notifier.unsubscribe(id));
        assert!(!notifier.unsubscribe(id));
        notifier.notify(&3);
        assert_eq!(*seen.borrow(), vec![1, 2]);
        assert_eq!(notifier.subscriber_count(), 0);
    }
}
