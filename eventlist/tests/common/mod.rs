#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use eventlist::{ChangeEvent, ChangeKind, EventList, SharedList};

pub type Recorded = Rc<RefCell<Vec<ChangeEvent>>>;

/// Collect every event `list` fires from now on.
pub fn record<T, L: EventList<T> + ?Sized>(list: &L) -> Recorded {
    let events: Recorded = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    list.add_listener(Rc::new(move |event: &ChangeEvent| {
        sink.borrow_mut().push(event.clone());
    }));
    events
}

/// Keep a plain Vec in sync with `list` using nothing but its events and
/// reads of the positions they name.
pub fn mirror<T: Clone + 'static>(list: SharedList<T>) -> Rc<RefCell<Vec<T>>> {
    let rows = Rc::new(RefCell::new(list.to_vec()));
    let sink = Rc::clone(&rows);
    let weak = Rc::downgrade(&list);
    list.add_listener(Rc::new(move |event: &ChangeEvent| {
        let Some(list) = weak.upgrade() else {
            return;
        };
        let mut rows = sink.borrow_mut();
        match event.kind() {
            ChangeKind::Added => {
                for i in event.range() {
                    rows.insert(i, list.get(i).expect("added position readable"));
                }
            }
            ChangeKind::Removed => {
                rows.drain(event.range());
            }
            ChangeKind::Changed => {
                for i in event.range() {
                    rows[i] = list.get(i).expect("changed position readable");
                }
            }
            ChangeKind::Other => *rows = list.to_vec(),
        }
    }));
    rows
}

pub fn take(events: &Recorded) -> Vec<ChangeEvent> {
    events.borrow_mut().drain(..).collect()
}
