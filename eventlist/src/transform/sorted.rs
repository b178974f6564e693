//! Comparator-ordered decorator.

use std::cell::RefCell;
use std::cmp::Ordering;
use std::rc::Rc;

use super::{TransformCore, Upstream};
use crate::error::{ListError, Result};
use crate::event::{ChangeEvent, ChangeKind, ListId};
use crate::list::{EventList, SharedList};
use crate::listener::{ChangeListener, ListenerId};

type Comparator<T> = Box<dyn Fn(&T, &T) -> Ordering>;

#[derive(Debug, Clone)]
struct Entry<T> {
    /// Position of the element in the delegate.
    source: usize,
    /// Value the entry was ranked with.
    value: T,
}

/// Presents the delegate's elements ordered by a comparator.
///
/// The sort is stable: elements that compare equal keep their delegate
/// order. A changed element that keeps its rank fires CHANGED at that rank;
/// one that moves fires CHANGED over every rank between its old and new
/// position, so the size never wavers mid-burst. Insertions and removals
/// fire a splice over the span of ranks they touch.
///
/// Re-ranking happens on a staged copy, so a comparator that panics
/// mid-event leaves the view exactly as listeners last saw it.
///
/// `add` validates the index against `size()` and then appends the element
/// to the delegate; it shows up at its sorted rank, not at the index given.
pub struct SortedEventList<T> {
    core: TransformCore<T>,
    comparator: RefCell<Comparator<T>>,
    /// Sorted view, rank to entry.
    entries: RefCell<Vec<Entry<T>>>,
}

impl<T: Clone + 'static> SortedEventList<T> {
    pub fn new(
        delegate: SharedList<T>,
        comparator: impl Fn(&T, &T) -> Ordering + 'static,
    ) -> Rc<Self> {
        let list = Rc::new(Self {
            core: TransformCore::new(delegate),
            comparator: RefCell::new(Box::new(comparator)),
            entries: RefCell::new(Vec::new()),
        });
        list.rebuild();
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

    /// Replace the comparator and re-sort, firing CHANGED over the whole list.
    pub fn set_comparator(&self, comparator: impl Fn(&T, &T) -> Ordering + 'static) {
        *self.comparator.borrow_mut() = Box::new(comparator);
        log::debug!("[sorted] {} comparator replaced", self.core.id());
        let mut entries = self.entries.borrow().clone();
        self.sort(&mut entries);
        let size = entries.len();
        *self.entries.borrow_mut() = entries;
        if size > 0 {
            self.core.fire(ChangeEvent::changed(self.core.id(), 0, size));
        }
    }

    /// Rank at which `source`/`value` belongs among `entries`.
    fn rank(&self, entries: &[Entry<T>], source: usize, value: &T) -> usize {
        let comparator = self.comparator.borrow();
        entries.partition_point(|entry| match comparator(&entry.value, value) {
            Ordering::Less => true,
            Ordering::Equal => entry.source < source,
            Ordering::Greater => false,
        })
    }

    fn sort(&self, entries: &mut [Entry<T>]) {
        let comparator = self.comparator.borrow();
        entries.sort_by(|a, b| comparator(&a.value, &b.value).then(a.source.cmp(&b.source)));
    }

    fn read(&self, range: std::ops::Range<usize>) -> Vec<Entry<T>> {
        let delegate = self.core.delegate();
        range
            .filter_map(|source| delegate.get(source).ok().map(|value| Entry { source, value }))
            .collect()
    }

    fn rebuild(&self) {
        let mut fresh = self.read(0..self.core.delegate().size());
        self.sort(&mut fresh);
        *self.entries.borrow_mut() = fresh;
    }

    fn source_index(&self, index: usize) -> Option<usize> {
        self.entries.borrow().get(index).map(|entry| entry.source)
    }

    // -------------------------------------------------------------------------
    // Upstream events
    // -------------------------------------------------------------------------

    fn on_added(&self, start: usize, end: usize) -> Vec<ChangeEvent> {
        let width = end - start;
        let fresh = self.read(start..end);
        let mut entries = self.entries.borrow().clone();
        for entry in entries.iter_mut() {
            if entry.source >= start {
                entry.source += width;
            }
        }
        for entry in fresh {
            let rank = self.rank(&entries, entry.source, &entry.value);
            entries.insert(rank, entry);
        }
        let ranks = ranks_of(&entries, start, end);
        *self.entries.borrow_mut() = entries;
        let (Some(&first), Some(&last)) = (ranks.first(), ranks.last()) else {
            return Vec::new();
        };
        let span = last + 1 - first;
        ChangeEvent::splice(self.core.id(), first, span - ranks.len(), span)
    }

    fn on_removed(&self, start: usize, end: usize) -> Vec<ChangeEvent> {
        let width = end - start;
        let mut entries = self.entries.borrow_mut();
        let ranks = ranks_of(&entries, start, end);
        entries.retain(|entry| !(start..end).contains(&entry.source));
        for entry in entries.iter_mut() {
            if entry.source >= end {
                entry.source -= width;
            }
        }
        let (Some(&first), Some(&last)) = (ranks.first(), ranks.last()) else {
            return Vec::new();
        };
        let span = last + 1 - first;
        ChangeEvent::splice(self.core.id(), first, span, span - ranks.len())
    }

    fn on_changed(&self, start: usize, end: usize) -> Vec<ChangeEvent> {
        let id = self.core.id();
        let fresh = self.read(start..end);
        let mut entries = self.entries.borrow().clone();
        let old_ranks = ranks_of(&entries, start, end);
        entries.retain(|entry| !(start..end).contains(&entry.source));
        for entry in fresh {
            let rank = self.rank(&entries, entry.source, &entry.value);
            entries.insert(rank, entry);
        }
        let new_ranks = ranks_of(&entries, start, end);
        let new_len = entries.len();
        *self.entries.borrow_mut() = entries;

        if old_ranks.is_empty() && new_ranks.is_empty() {
            return Vec::new();
        }
        // Entries outside first..=last kept their ranks.
        let old_len = new_len - new_ranks.len() + old_ranks.len();
        let touched = || old_ranks.iter().chain(&new_ranks).copied();
        let first = touched().min().unwrap_or(0);
        let last = touched().max().unwrap_or(0);
        let suffix = old_len.min(new_len).saturating_sub(last + 1);
        ChangeEvent::splice(id, first, old_len - suffix - first, new_len - suffix - first)
    }
}

/// Ascending ranks of the entries whose delegate position lies in `start..end`.
fn ranks_of<T>(entries: &[Entry<T>], start: usize, end: usize) -> Vec<usize> {
    entries
        .iter()
        .enumerate()
        .filter(|(_, entry)| (start..end).contains(&entry.source))
        .map(|(rank, _)| rank)
        .collect()
}

impl<T: Clone + 'static> Upstream for SortedEventList<T> {
    fn delegate_changed(&self, event: &ChangeEvent) {
        let (start, end) = (event.index_start(), event.index_end());
        let events = match event.kind() {
            ChangeKind::Other => {
                self.rebuild();
                vec![event.resource(self.core.id())]
            }
            ChangeKind::Added => self.on_added(start, end),
            ChangeKind::Removed => self.on_removed(start, end),
            ChangeKind::Changed => self.on_changed(start, end),
        };
        log::trace!("[sorted] {} -> {:?}", event, events);
        self.core.fire_all(events);
    }
}

impl<T: Clone + 'static> EventList<T> for SortedEventList<T> {
    fn id(&self) -> ListId {
        self.core.id()
    }

    fn size(&self) -> usize {
        self.entries.borrow().len()
    }

    fn get(&self, index: usize) -> Result<T> {
        self.core
            .at_source(index, self.size(), self.source_index(index), |delegate, source| {
                delegate.get(source)
            })
    }

    fn set(&self, index: usize, element: T) -> Result<T> {
        self.core
            .at_source(index, self.size(), self.source_index(index), |delegate, source| {
                delegate.set(source, element)
            })
    }

    fn add(&self, index: usize, element: T) -> Result<()> {
        let size = self.size();
        if index > size {
            return Err(ListError::out_of_bounds(index, size));
        }
        self.core
            .delegate()
            .push(element)
            .map_err(|err| err.rebased(index, size))
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

impl<T> std::fmt::Debug for SortedEventList<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sources: Vec<usize> = self.entries.borrow().iter().map(|e| e.source).collect();
        f.debug_struct("SortedEventList")
            .field("core", &self.core)
            .field("sources", &sources)
            .finish()
    }
}
