//! Observable lists and the decorators that transform them.
//!
//! An [`EventList`] is an index-addressable sequence that notifies its
//! listeners synchronously after every committed mutation. Decorators such
//! as [`ReverseEventList`] or [`FilteredEventList`] wrap another list,
//! present their own index space, forward mutations down after translating
//! indices, and re-fire the delegate's events translated into their own
//! coordinates. Chains of decorators compose freely.
//!
//! Everything here is single-threaded: handles are `Rc` and state lives in
//! `Cell`/`RefCell`.
//!
//! # Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use eventlist::{ArrayEventList, ChangeEvent, EventList, EventListExt};
//!
//! let numbers = ArrayEventList::with_items(vec![1, 2, 3, 4, 5]);
//! let reversed = numbers.reversed();
//!
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let sink = Rc::clone(&seen);
//! reversed.add_listener(Rc::new(move |event: &ChangeEvent| {
//!     sink.borrow_mut().push(event.clone());
//! }));
//!
//! numbers.add(0, 0).unwrap();
//! assert_eq!(reversed.to_vec(), vec![5, 4, 3, 2, 1, 0]);
//! assert_eq!(seen.borrow()[0], ChangeEvent::added(reversed.id(), 5, 6));
//! ```

pub mod array;
pub mod error;
pub mod event;
pub mod ext;
pub mod list;
pub mod listener;
pub mod transform;

pub use array::ArrayEventList;
pub use error::{ListError, Result};
pub use event::{ChangeEvent, ChangeKind, ListId};
pub use ext::EventListExt;
pub use list::{EventList, SharedList};
pub use listener::{ChangeListener, ListenerId, Listeners, extract_panic_message};
pub use transform::{
    FilteredEventList, IndexMapping, RangedEventList, ReverseEventList, SortedEventList,
    WindowAnchor, WrappedEventList,
};
