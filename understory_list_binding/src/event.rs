// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Synchronous listener lists.
//!
//! An [`Event`] holds listeners that are invoked in registration order every time
//! the event fires. There is no scheduling and no queue: [`Event::invoke`] calls
//! every listener before it returns.
//!
//! Events are fired through a shared reference, so a generator can expose an
//! event from `&self` and views can subscribe while the generator is held by a
//! store. Listeners may subscribe further listeners while the event is firing;
//! those join after the current round and first run on the next `invoke`.
//!
//! Firing an event from inside one of its own listeners does nothing: the
//! nested payload reaches no listener and is logged at `warn`.
//!
//! ```rust
//! use core::cell::Cell;
//! use std::rc::Rc;
//! use understory_list_binding::Event;
//!
//! let event = Event::<bool>::new();
//! let last = Rc::new(Cell::new(None));
//! let seen = Rc::clone(&last);
//! event.add_listener(move |expanded| seen.set(Some(*expanded)));
//!
//! event.invoke(&true);
//! assert_eq!(last.get(), Some(true));
//! ```

use alloc::boxed::Box;
use core::cell::{Cell, RefCell};
use core::fmt;

use smallvec::SmallVec;

type Listener<T> = Box<dyn FnMut(&T)>;

/// A list of listeners invoked synchronously, in registration order.
pub struct Event<T> {
    listeners: RefCell<SmallVec<[Listener<T>; 2]>>,
    // Bumped by `clear`, so a clear issued from inside a listener also drops
    // the round that is currently being delivered.
    clears: Cell<u64>,
    firing: Cell<bool>,
}

impl<T> Event<T> {
    /// Creates an event with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self {
            listeners: RefCell::new(SmallVec::new()),
            clears: Cell::new(0),
            firing: Cell::new(false),
        }
    }

    /// Registers a listener. Listeners run in the order they were added.
    pub fn add_listener(&self, listener: impl FnMut(&T) + 'static) {
        self.listeners.borrow_mut().push(Box::new(listener));
    }

    /// Removes every listener.
    pub fn clear(&self) {
        self.listeners.borrow_mut().clear();
        self.clears.set(self.clears.get().wrapping_add(1));
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Returns `true` if nothing listens to this event.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Calls every listener with `value`.
    ///
    /// A call made while this event is already firing is dropped.
    pub fn invoke(&self, value: &T) {
        if self.firing.replace(true) {
            log::warn!("event fired from its own listener; nested payload dropped");
            return;
        }
        // Take the list out so listeners can touch this event without a
        // double borrow.
        let clears = self.clears.get();
        let mut round = core::mem::take(&mut *self.listeners.borrow_mut());
        for listener in round.iter_mut() {
            listener(value);
        }
        self.firing.set(false);
        if self.clears.get() != clears {
            return;
        }
        let mut listeners = self.listeners.borrow_mut();
        let added = core::mem::replace(&mut *listeners, round);
        listeners.extend(added);
    }
}

impl<T> Default for Event<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Event<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("listeners", &self.len())
            .field("firing", &self.firing.get())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    use super::Event;

    #[test]
    fn listeners_run_in_registration_order() {
        let event = Event::<u32>::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        for tag in 0..3_u32 {
            let seen = Rc::clone(&seen);
            event.add_listener(move |v| seen.borrow_mut().push((tag, *v)));
        }
        event.invoke(&7);
        assert_eq!(*seen.borrow(), vec![(0, 7), (1, 7), (2, 7)]);
    }

    #[test]
    fn invoke_without_listeners_is_a_no_op() {
        let event = Event::<()>::default();
        assert!(event.is_empty());
        event.invoke(&());
    }

    #[test]
    fn listener_added_while_firing_joins_next_round() {
        let event = Rc::new(Event::<()>::new());
        let hits = Rc::new(RefCell::new(Vec::new()));
        {
            let inner_event = Rc::clone(&event);
            let hits = Rc::clone(&hits);
            let mut armed = true;
            event.add_listener(move |()| {
                hits.borrow_mut().push("outer");
                if armed {
                    armed = false;
                    let hits = Rc::clone(&hits);
                    inner_event.add_listener(move |()| hits.borrow_mut().push("inner"));
                }
            });
        }
        event.invoke(&());
        assert_eq!(*hits.borrow(), vec!["outer"]);
        assert_eq!(event.len(), 2);
        event.invoke(&());
        assert_eq!(*hits.borrow(), vec!["outer", "outer", "inner"]);
    }

    #[test]
    fn firing_from_a_listener_is_dropped() {
        let event = Rc::new(Event::<u32>::new());
        let seen = Rc::new(RefCell::new(Vec::new()));
        {
            let inner_event = Rc::clone(&event);
            let seen = Rc::clone(&seen);
            event.add_listener(move |v| {
                seen.borrow_mut().push(*v);
                if *v == 0 {
                    inner_event.invoke(&1);
                }
            });
        }
        event.invoke(&0);
        assert_eq!(*seen.borrow(), vec![0]);
        assert_eq!(event.len(), 1);

        // The event is usable again once the outer round is over.
        event.invoke(&2);
        assert_eq!(*seen.borrow(), vec![0, 2]);
    }

    #[test]
    fn clear_from_inside_a_listener_drops_everything() {
        let event = Rc::new(Event::<()>::new());
        let inner_event = Rc::clone(&event);
        event.add_listener(move |()| inner_event.clear());
        event.invoke(&());
        assert!(event.is_empty());
    }
}
