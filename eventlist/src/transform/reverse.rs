//! Reverse-order decorator.

use std::cell::Cell;
use std::rc::Rc;

use super::{IndexMapping, TransformCore, Upstream};
use crate::error::Result;
use crate::event::{ChangeEvent, ChangeKind, ListId};
use crate::list::{EventList, SharedList};
use crate::listener::{ChangeListener, ListenerId};

/// Presents the delegate's elements in opposite order.
///
/// Position `i` reads delegate position `size - i - 1`. Insertion at `i`
/// lands at delegate position `size - i`, so appending to the reversed
/// list prepends to the delegate. As a special case, an insertion one past
/// the end (`size + 1`) is clamped to delegate position 0.
///
/// The size is cached and only moved by observed ADDED/REMOVED events, so
/// translation stays stable while an event is being processed. ADDED
/// grows the cache before translating; REMOVED translates against the old
/// size and shrinks afterwards.
#[derive(Debug)]
pub struct ReverseEventList<T> {
    core: TransformCore<T>,
    size: Cell<usize>,
}

impl<T: Clone + 'static> ReverseEventList<T> {
    pub fn new(delegate: SharedList<T>) -> Rc<Self> {
        let size = delegate.size();
        let list = Rc::new(Self {
            core: TransformCore::new(delegate),
            size: Cell::new(size),
        });
        list.core.subscribe(&list);
        list
    }

    pub fn delegate(&self) -> &SharedList<T> {
        self.core.delegate()
    }

    /// Stop observing the delegate.
    pub fn dispose(&self) {
        self.core.dispose();
    }

    fn invert(&self, index: usize) -> Option<usize> {
        self.size.get().checked_sub(index)
    }
}

impl<T: Clone + 'static> IndexMapping for ReverseEventList<T> {
    fn presented_size(&self) -> usize {
        self.size.get()
    }

    fn source_index(&self, index: usize) -> Option<usize> {
        self.invert(index)?.checked_sub(1)
    }

    fn insertion_index(&self, index: usize) -> Option<usize> {
        match self.invert(index) {
            Some(inverted) => Some(inverted),
            None if index == self.size.get() + 1 => Some(0),
            None => None,
        }
    }
}

impl<T: Clone + 'static> Upstream for ReverseEventList<T> {
    fn delegate_changed(&self, event: &ChangeEvent) {
        let id = self.core.id();
        let width = event.len();
        let reversed = match event.kind() {
            ChangeKind::Other => {
                self.size.set(self.core.delegate().size());
                event.resource(id)
            }
            ChangeKind::Added => {
                self.size.set(self.size.get() + width);
                let start = self.size.get().saturating_sub(event.index_end());
                ChangeEvent::added(id, start, start + width)
            }
            ChangeKind::Changed => {
                let start = self.size.get().saturating_sub(event.index_end());
                ChangeEvent::changed(id, start, start + width)
            }
            ChangeKind::Removed => {
                let start = self.size.get().saturating_sub(event.index_end());
                self.size.set(self.size.get().saturating_sub(width));
                ChangeEvent::removed(id, start, start + width)
            }
        };
        log::trace!("[reverse] {} -> {}", event, reversed);
        self.core.fire(reversed);
    }
}

impl<T: Clone + 'static> EventList<T> for ReverseEventList<T> {
    fn id(&self) -> ListId {
        self.core.id()
    }

    fn size(&self) -> usize {
        self.size.get()
    }

    fn get(&self, index: usize) -> Result<T> {
        self.core.mapped_get(self, index)
    }

    fn set(&self, index: usize, element: T) -> Result<T> {
        self.core.mapped_set(self, index, element)
    }

    fn add(&self, index: usize, element: T) -> Result<()> {
        self.core.mapped_add(self, index, element)
    }

    fn remove(&self, index: usize) -> Result<T> {
        self.core.mapped_remove(self, index)
    }

    fn add_listener(&self, listener: Rc<dyn ChangeListener>) -> ListenerId {
        self.core.listeners().add(listener)
    }

    fn remove_listener(&self, id: ListenerId) -> bool {
        self.core.listeners().remove(id)
    }
}
