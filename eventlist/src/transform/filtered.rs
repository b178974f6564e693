//! Predicate-filtered decorator.

use std::cell::RefCell;
use std::rc::Rc;

use super::{TransformCore, Upstream};
use crate::error::{ListError, Result};
use crate::event::{ChangeEvent, ChangeKind, ListId};
use crate::list::{EventList, SharedList};
use crate::listener::{ChangeListener, ListenerId};

type Filter<T> = Box<dyn Fn(&T) -> bool>;

/// Presents the delegate elements that match a filter, in delegate order.
///
/// Adding or setting an element that does not match the filter is
/// rejected with [`ListError::Rejected`] before anything is forwarded.
/// Appending (`add` at `size()`) appends to the delegate; any other
/// insertion lands directly before the element currently presented at
/// that position.
pub struct FilteredEventList<T> {
    core: TransformCore<T>,
    filter: RefCell<Filter<T>>,
    /// Delegate positions of the presented elements, ascending.
    index: RefCell<Vec<usize>>,
}

impl<T: Clone + 'static> FilteredEventList<T> {
    pub fn new(delegate: SharedList<T>, filter: impl Fn(&T) -> bool + 'static) -> Rc<Self> {
        let list = Rc::new(Self {
            core: TransformCore::new(delegate),
            filter: RefCell::new(Box::new(filter)),
            index: RefCell::new(Vec::new()),
        });
        let members = list.scan(0..list.core.delegate().size());
        *list.index.borrow_mut() = members;
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

    /// Check an element against the current filter.
    pub fn matches(&self, element: &T) -> bool {
        (self.filter.borrow())(element)
    }

    /// Replace the filter and re-evaluate every delegate element.
    pub fn set_filter(&self, filter: impl Fn(&T) -> bool + 'static) {
        *self.filter.borrow_mut() = Box::new(filter);
        log::debug!("[filtered] {} filter replaced", self.core.id());
        self.refilter();
    }

    /// Re-evaluate every delegate element, e.g. after elements were mutated
    /// in place without an event.
    pub fn refilter(&self) {
        let members = self.scan(0..self.core.delegate().size());
        let (old, new) = {
            let mut index = self.index.borrow_mut();
            let old = index.len();
            *index = members;
            (old, index.len())
        };
        self.core
            .fire_all(ChangeEvent::splice(self.core.id(), 0, old, new));
    }

    /// Delegate positions in `range` whose elements match.
    fn scan(&self, range: std::ops::Range<usize>) -> Vec<usize> {
        let delegate = self.core.delegate();
        range
            .filter(|&source| delegate.get(source).is_ok_and(|element| self.matches(&element)))
            .collect()
    }

    fn reject(&self) -> ListError {
        ListError::Rejected {
            list: self.core.id(),
            reason: "element does not match filter",
        }
    }

    fn source_index(&self, index: usize) -> Option<usize> {
        self.index.borrow().get(index).copied()
    }

    fn insertion_index(&self, index: usize) -> Option<usize> {
        let members = self.index.borrow();
        if index == members.len() {
            Some(self.core.delegate().size())
        } else {
            members.get(index).copied()
        }
    }

    // -------------------------------------------------------------------------
    // Upstream events
    // -------------------------------------------------------------------------

    fn on_added(&self, start: usize, end: usize) -> Vec<ChangeEvent> {
        let width = end - start;
        let matched = self.scan(start..end);
        let mut index = self.index.borrow_mut();
        let at = index.partition_point(|&source| source < start);
        for source in index[at..].iter_mut() {
            *source += width;
        }
        let count = matched.len();
        index.splice(at..at, matched);
        if count == 0 {
            return Vec::new();
        }
        vec![ChangeEvent::added(self.core.id(), at, at + count)]
    }

    fn on_removed(&self, start: usize, end: usize) -> Vec<ChangeEvent> {
        let width = end - start;
        let mut index = self.index.borrow_mut();
        let lo = index.partition_point(|&source| source < start);
        let hi = index.partition_point(|&source| source < end);
        index.drain(lo..hi);
        for source in index[lo..].iter_mut() {
            *source -= width;
        }
        if hi == lo {
            return Vec::new();
        }
        vec![ChangeEvent::removed(self.core.id(), lo, hi)]
    }

    fn on_changed(&self, start: usize, end: usize) -> Vec<ChangeEvent> {
        let matched = self.scan(start..end);
        let mut index = self.index.borrow_mut();
        let lo = index.partition_point(|&source| source < start);
        let hi = index.partition_point(|&source| source < end);
        let count = matched.len();
        index.splice(lo..hi, matched);
        ChangeEvent::splice(self.core.id(), lo, hi - lo, count)
    }
}

impl<T: Clone + 'static> Upstream for FilteredEventList<T> {
    fn delegate_changed(&self, event: &ChangeEvent) {
        let (start, end) = (event.index_start(), event.index_end());
        let events = match event.kind() {
            ChangeKind::Other => {
                let members = self.scan(0..self.core.delegate().size());
                *self.index.borrow_mut() = members;
                vec![event.resource(self.core.id())]
            }
            ChangeKind::Added => self.on_added(start, end),
            ChangeKind::Removed => self.on_removed(start, end),
            ChangeKind::Changed => self.on_changed(start, end),
        };
        log::trace!("[filtered] {} -> {:?}", event, events);
        self.core.fire_all(events);
    }
}

impl<T: Clone + 'static> EventList<T> for FilteredEventList<T> {
    fn id(&self) -> ListId {
        self.core.id()
    }

    fn size(&self) -> usize {
        self.index.borrow().len()
    }

    fn get(&self, index: usize) -> Result<T> {
        self.core
            .at_source(index, self.size(), self.source_index(index), |delegate, source| {
                delegate.get(source)
            })
    }

    fn set(&self, index: usize, element: T) -> Result<T> {
        let source = self.source_index(index);
        if source.is_some() && !self.matches(&element) {
            return Err(self.reject());
        }
        self.core
            .at_source(index, self.size(), source, |delegate, source| {
                delegate.set(source, element)
            })
    }

    fn add(&self, index: usize, element: T) -> Result<()> {
        let source = self.insertion_index(index);
        if source.is_some() && !self.matches(&element) {
            return Err(self.reject());
        }
        self.core
            .at_source(index, self.size(), source, |delegate, source| {
                delegate.add(source, element)
            })
    }

    fn remove(&self, index: usize) -> Result<T> {
        self.core
            .at_source(index, self.size(), self.source_index(index), |delegate, source| {
                delegate.remove(source)
            })
    }

    fn add_listener(&self, listener: Rc<dyn ChangeListener>) -> ListenerId {
        self.core.listeners().add(listener)
    }

    fn remove_listener(&self, id: ListenerId) -> bool {
        self.core.listeners().remove(id)
    }
}

impl<T> std::fmt::Debug for FilteredEventList<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilteredEventList")
            .field("core", &self.core)
            .field("index", &self.index.borrow())
            .finish()
    }
}
