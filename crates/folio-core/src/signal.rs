//! Single-threaded subscribable signals
//!
//! The host environment publishes the scroll offset and viewport
//! intersection changes through a [`Signal`]. Subscribing returns a
//! [`Subscription`] guard; the listener stays attached exactly as long as
//! the guard lives, so teardown happens on every exit path.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

type Listener<T> = Box<dyn FnMut(&T)>;

struct Slot<T> {
    id: u64,
    listener: Listener<T>,
}

struct Registry<T> {
    next_id: u64,
    slots: Vec<Slot<T>>,
    /// Nesting depth of `emit` calls currently running
    dispatching: usize,
    /// Ids detached while their slot was checked out for dispatch
    detached: Vec<u64>,
}

/// A stream of values that listeners can subscribe to
pub struct Signal<T> {
    registry: Rc<RefCell<Registry<T>>>,
}

impl<T> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl<T> Signal<T> {
    pub fn new() -> Self {
        Self {
            registry: Rc::new(RefCell::new(Registry {
                next_id: 0,
                slots: Vec::new(),
                dispatching: 0,
                detached: Vec::new(),
            })),
        }
    }

    /// Attach a listener. It is detached when the returned guard is dropped.
    #[must_use = "dropping the subscription detaches the listener immediately"]
    pub fn subscribe(&self, listener: impl FnMut(&T) + 'static) -> Subscription
    where
        T: 'static,
    {
        let id = {
            let mut registry = self.registry.borrow_mut();
            let id = registry.next_id;
            registry.next_id += 1;
            registry.slots.push(Slot {
                id,
                listener: Box::new(listener),
            });
            id
        };

        let weak: Weak<RefCell<Registry<T>>> = Rc::downgrade(&self.registry);
        Subscription {
            id,
            detach: Some(Box::new(move || {
                if let Some(registry) = weak.upgrade() {
                    // Dropped after the borrow ends; a listener may own subscriptions
                    let _removed: Vec<Slot<T>> = {
                        let mut registry = registry.borrow_mut();
                        if registry.dispatching > 0 {
                            registry.detached.push(id);
                        }
                        let (removed, kept) = std::mem::take(&mut registry.slots)
                            .into_iter()
                            .partition(|slot| slot.id == id);
                        registry.slots = kept;
                        removed
                    };
                }
            })),
        }
    }

    /// Deliver a value to every attached listener in subscription order
    ///
    /// Listeners may subscribe, unsubscribe or emit from inside the call.
    /// A listener detached mid-dispatch is not called again; one attached
    /// mid-dispatch first hears the next value.
    pub fn emit(&self, value: T) {
        let mut slots = {
            let mut registry = self.registry.borrow_mut();
            registry.dispatching += 1;
            std::mem::take(&mut registry.slots)
        };

        for slot in slots.iter_mut() {
            if self.registry.borrow().detached.contains(&slot.id) {
                continue;
            }
            (slot.listener)(&value);
        }

        let _detached: Vec<Slot<T>> = {
            let mut registry = self.registry.borrow_mut();
            registry.dispatching -= 1;
            let (detached, mut kept): (Vec<_>, Vec<_>) = slots
                .into_iter()
                .partition(|slot| registry.detached.contains(&slot.id));
            // Subscriptions made during dispatch come after the existing ones
            kept.append(&mut registry.slots);
            registry.slots = kept;
            if registry.dispatching == 0 {
                registry.detached.clear();
            }
            detached
        };
    }

    /// Number of currently attached listeners
    pub fn listener_count(&self) -> usize {
        self.registry.borrow().slots.len()
    }
}

/// Guard for an attached listener
pub struct Subscription {
    id: u64,
    detach: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Detach explicitly; equivalent to dropping the guard
    pub fn unsubscribe(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("attached", &self.detach.is_some())
            .finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_emit_reaches_listener() {
        let signal = Signal::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let _sub = signal.subscribe(move |v: &u16| sink.borrow_mut().push(*v));

        signal.emit(3);
        signal.emit(7);
        assert_eq!(*seen.borrow(), vec![3, 7]);
    }

    #[test]
    fn test_drop_detaches() {
        let signal = Signal::new();
        let count = Rc::new(Cell::new(0));
        let counter = count.clone();
        let sub = signal.subscribe(move |_: &u16| counter.set(counter.get() + 1));

        signal.emit(1);
        drop(sub);
        signal.emit(2);

        assert_eq!(count.get(), 1);
        assert_eq!(signal.listener_count(), 0);
    }

    #[test]
    fn test_unsubscribe_only_removes_own_listener() {
        let signal = Signal::new();
        let a = Rc::new(Cell::new(0));
        let b = Rc::new(Cell::new(0));
        let (ca, cb) = (a.clone(), b.clone());
        let sub_a = signal.subscribe(move |_: &()| ca.set(ca.get() + 1));
        let _sub_b = signal.subscribe(move |_: &()| cb.set(cb.get() + 1));

        sub_a.unsubscribe();
        signal.emit(());

        assert_eq!(a.get(), 0);
        assert_eq!(b.get(), 1);
    }

    #[test]
    fn test_emit_without_listeners() {
        let signal: Signal<u16> = Signal::new();
        signal.emit(5);
        assert_eq!(signal.listener_count(), 0);
    }

    #[test]
    fn test_listener_unmounts_itself_during_emit() {
        let signal = Signal::new();
        let calls = Rc::new(Cell::new(0));
        let holder: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

        let (counter, own) = (calls.clone(), holder.clone());
        let sub = signal.subscribe(move |offset: &u16| {
            counter.set(counter.get() + 1);
            if *offset > 50 {
                drop(own.borrow_mut().take());
            }
        });
        *holder.borrow_mut() = Some(sub);

        signal.emit(10);
        signal.emit(60);
        signal.emit(70);

        assert_eq!(calls.get(), 2);
        assert_eq!(signal.listener_count(), 0);
    }

    #[test]
    fn test_listener_detaching_a_later_listener() {
        let signal = Signal::new();
        let later_calls = Rc::new(Cell::new(0));
        let later_holder: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

        let holder = later_holder.clone();
        let _first = signal.subscribe(move |_: &()| drop(holder.borrow_mut().take()));
        let counter = later_calls.clone();
        let later = signal.subscribe(move |_: &()| counter.set(counter.get() + 1));
        *later_holder.borrow_mut() = Some(later);

        signal.emit(());
        signal.emit(());

        assert_eq!(later_calls.get(), 0);
        assert_eq!(signal.listener_count(), 1);
    }

    #[test]
    fn test_subscribe_and_emit_during_dispatch() {
        let signal = Rc::new(Signal::new());
        let seen = Rc::new(RefCell::new(Vec::new()));
        let added: Rc<RefCell<Vec<Subscription>>> = Rc::new(RefCell::new(Vec::new()));

        let (inner, sink, store) = (signal.clone(), seen.clone(), added.clone());
        let _sub = signal.subscribe(move |v: &u16| {
            sink.borrow_mut().push(*v);
            if *v == 1 {
                let late_sink = sink.clone();
                store
                    .borrow_mut()
                    .push(inner.subscribe(move |v: &u16| late_sink.borrow_mut().push(*v + 100)));
                inner.emit(2);
            }
        });

        signal.emit(1);
        // The nested emit reached only the listener added during dispatch
        assert_eq!(*seen.borrow(), vec![1, 102]);

        signal.emit(3);
        assert_eq!(*seen.borrow(), vec![1, 102, 3, 103]);
        assert_eq!(signal.listener_count(), 2);
    }

    #[test]
    fn test_listener_owning_a_subscription_can_detach() {
        let signal = Signal::new();
        let holder: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

        let companion = signal.subscribe(|_: &u16| {});
        let own = holder.clone();
        let sub = signal.subscribe(move |_: &u16| {
            let _ = &companion;
            drop(own.borrow_mut().take());
        });
        *holder.borrow_mut() = Some(sub);
        assert_eq!(signal.listener_count(), 2);

        signal.emit(1);
        assert_eq!(signal.listener_count(), 0);

        let companion = signal.subscribe(|_: &u16| {});
        let outside = signal.subscribe(move |_: &u16| {
            let _ = &companion;
        });
        drop(outside);
        assert_eq!(signal.listener_count(), 0);
    }

    #[test]
    fn test_subscription_outliving_signal() {
        let signal: Signal<u16> = Signal::new();
        let sub = signal.subscribe(|_| {});
        drop(signal);
        drop(sub);
    }
}
