//! Listener registration and synchronous event dispatch.

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::event::ChangeEvent;

/// Observer of list changes.
///
/// Implemented for any `Fn(&ChangeEvent)` closure.
pub trait ChangeListener {
    fn on_change(&self, event: &ChangeEvent);
}

impl<F> ChangeListener for F
where
    F: Fn(&ChangeEvent),
{
    fn on_change(&self, event: &ChangeEvent) {
        self(event)
    }
}

/// Handle returned by listener registration, used to unregister.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl ListenerId {
    fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener-{}", self.0)
    }
}

/// Ordered set of listeners owned by one list.
///
/// Dispatch iterates over a snapshot taken when the event is fired, so
/// listeners may register or unregister (themselves or others) from inside
/// a callback. A listener removed mid-dispatch still sees the event being
/// dispatched; it will not see the next one.
///
/// A panicking listener is isolated: the panic is logged and the remaining
/// listeners are still notified.
#[derive(Default)]
pub struct Listeners {
    entries: RefCell<Vec<(ListenerId, Rc<dyn ChangeListener>)>>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, listener: Rc<dyn ChangeListener>) -> ListenerId {
        let id = ListenerId::new();
        self.entries.borrow_mut().push((id, listener));
        id
    }

    /// Unregister a listener. Returns false if it was not registered.
    pub fn remove(&self, id: ListenerId) -> bool {
        let mut entries = self.entries.borrow_mut();
        match entries.iter().position(|(entry, _)| *entry == id) {
            Some(position) => {
                entries.remove(position);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Notify every registered listener, in registration order.
    pub fn fire(&self, event: &ChangeEvent) {
        let snapshot: Vec<_> = self
            .entries
            .borrow()
            .iter()
            .map(|(id, listener)| (*id, Rc::clone(listener)))
            .collect();

        for (id, listener) in snapshot {
            let result = panic::catch_unwind(AssertUnwindSafe(|| listener.on_change(event)));
            if let Err(panic) = result {
                log::error!(
                    "[listeners] {} panicked handling {}: {}",
                    id,
                    event,
                    extract_panic_message(panic.as_ref())
                );
            }
        }
    }
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("len", &self.len())
            .finish()
    }
}

/// Extract a human-readable message from a panic payload.
///
/// Panics can contain either `&str` or `String` payloads. This function
/// attempts to extract either, falling back to a generic message.
pub fn extract_panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
