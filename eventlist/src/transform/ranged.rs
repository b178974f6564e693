//! Windowed (paginated) decorator.

use std::cell::Cell;
use std::rc::Rc;

use super::{IndexMapping, TransformCore, Upstream};
use crate::error::{ListError, Result};
use crate::event::{ChangeEvent, ChangeKind, ListId};
use crate::list::{EventList, SharedList};
use crate::listener::{ChangeListener, ListenerId};

/// What a window holds on to when the delegate changes before its start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WindowAnchor {
    /// The window stays on the same delegate positions; inserts and
    /// removals before `start` shift different elements into view.
    #[default]
    Position,
    /// The window follows its elements; inserts and removals before `start`
    /// move `start` so the same elements stay visible.
    Content,
}

/// Presents the contiguous delegate window `start..start + max_size`.
///
/// `size()` is `min(max_size, total - start)`, or 0 when `start` is past
/// the end. The delegate's size is cached in `total` and only moved by
/// observed events.
#[derive(Debug)]
pub struct RangedEventList<T> {
    core: TransformCore<T>,
    anchor: WindowAnchor,
    start: Cell<usize>,
    max_size: Cell<usize>,
    total: Cell<usize>,
}

impl<T: Clone + 'static> RangedEventList<T> {
    /// Window anchored on delegate positions.
    pub fn new(delegate: SharedList<T>, start: usize, max_size: usize) -> Rc<Self> {
        Self::with_anchor(delegate, start, max_size, WindowAnchor::Position)
    }

    /// Window anchored on its elements.
    pub fn steady(delegate: SharedList<T>, start: usize, max_size: usize) -> Rc<Self> {
        Self::with_anchor(delegate, start, max_size, WindowAnchor::Content)
    }

    pub fn with_anchor(
        delegate: SharedList<T>,
        start: usize,
        max_size: usize,
        anchor: WindowAnchor,
    ) -> Rc<Self> {
        let total = delegate.size();
        let list = Rc::new(Self {
            core: TransformCore::new(delegate),
            anchor,
            start: Cell::new(start),
            max_size: Cell::new(max_size),
            total: Cell::new(total),
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

    pub fn anchor(&self) -> WindowAnchor {
        self.anchor
    }

    /// Delegate position of the first presented element.
    pub fn start(&self) -> usize {
        self.start.get()
    }

    /// Move the window. Fires OTHER if the start changed.
    pub fn set_start(&self, start: usize) {
        if self.start.replace(start) != start {
            log::debug!("[ranged] {} start -> {}", self.core.id(), start);
            self.core.fire(ChangeEvent::other(self.core.id()));
        }
    }

    /// Page size: the most elements the window presents.
    pub fn max_size(&self) -> usize {
        self.max_size.get()
    }

    /// Resize the window. Fires OTHER if the max size changed.
    pub fn set_max_size(&self, max_size: usize) {
        if self.max_size.replace(max_size) != max_size {
            log::debug!("[ranged] {} max_size -> {}", self.core.id(), max_size);
            self.core.fire(ChangeEvent::other(self.core.id()));
        }
    }

    /// Size of the delegate.
    pub fn total(&self) -> usize {
        self.total.get()
    }

    fn window_size(&self) -> usize {
        self.total
            .get()
            .saturating_sub(self.start.get())
            .min(self.max_size.get())
    }

    // -------------------------------------------------------------------------
    // Upstream events
    // -------------------------------------------------------------------------

    fn on_added(&self, start: usize, end: usize) -> Vec<ChangeEvent> {
        let id = self.core.id();
        let width = end - start;
        let window = self.start.get();
        let before = self.window_size();
        self.total.set(self.total.get() + width);

        if start < window {
            if self.anchor == WindowAnchor::Content {
                self.start.set(window + width);
                return Vec::new();
            }
            return ChangeEvent::splice(id, 0, before, self.window_size());
        }

        let at = start - window;
        let max_size = self.max_size.get();
        if at >= max_size || at > before {
            return Vec::new();
        }
        let after = self.window_size();
        let inserted = width.min(max_size - at);
        if before + inserted == after {
            vec![ChangeEvent::added(id, at, at + inserted)]
        } else {
            // Elements were pushed out of the tail.
            ChangeEvent::splice(id, at, before - at, after - at)
        }
    }

    fn on_removed(&self, start: usize, end: usize) -> Vec<ChangeEvent> {
        let id = self.core.id();
        let width = end - start;
        let window = self.start.get();
        let before = self.window_size();
        self.total.set(self.total.get().saturating_sub(width));

        if start < window {
            match self.anchor {
                WindowAnchor::Position => {
                    return ChangeEvent::splice(id, 0, before, self.window_size());
                }
                WindowAnchor::Content => {
                    let skipped = end.min(window) - start;
                    self.start.set(window - skipped);
                    if end <= window {
                        return Vec::new();
                    }
                    // The rest of the removal ate the front of the window.
                    let removed = (end - window).min(before);
                    return self.removed_inside(0, removed, before);
                }
            }
        }

        let at = start - window;
        if at >= before {
            return Vec::new();
        }
        let removed = end.min(window + before) - start;
        self.removed_inside(at, removed, before)
    }

    /// Events for `removed` visible elements leaving at `at`, with the
    /// window possibly refilled from past its old end.
    fn removed_inside(&self, at: usize, removed: usize, before: usize) -> Vec<ChangeEvent> {
        let id = self.core.id();
        let after = self.window_size();
        if before - removed == after {
            vec![ChangeEvent::removed(id, at, at + removed)]
        } else {
            ChangeEvent::splice(id, at, before - at, after - at)
        }
    }

    fn on_changed(&self, start: usize, end: usize) -> Vec<ChangeEvent> {
        let window = self.start.get();
        let lo = start.max(window);
        let hi = end.min(window + self.window_size());
        if lo >= hi {
            return Vec::new();
        }
        vec![ChangeEvent::changed(self.core.id(), lo - window, hi - window)]
    }
}

impl<T: Clone + 'static> IndexMapping for RangedEventList<T> {
    fn presented_size(&self) -> usize {
        self.window_size()
    }

    fn source_index(&self, index: usize) -> Option<usize> {
        (index < self.window_size()).then(|| self.start.get() + index)
    }

    fn insertion_index(&self, index: usize) -> Option<usize> {
        (index <= self.window_size()).then(|| self.start.get() + index)
    }
}

impl<T: Clone + 'static> Upstream for RangedEventList<T> {
    fn delegate_changed(&self, event: &ChangeEvent) {
        let (start, end) = (event.index_start(), event.index_end());
        let events = match event.kind() {
            ChangeKind::Other => {
                self.total.set(self.core.delegate().size());
                vec![event.resource(self.core.id())]
            }
            ChangeKind::Added => self.on_added(start, end),
            ChangeKind::Removed => self.on_removed(start, end),
            ChangeKind::Changed => self.on_changed(start, end),
        };
        log::trace!("[ranged] {} -> {:?}", event, events);
        self.core.fire_all(events);
    }
}

impl<T: Clone + 'static> EventList<T> for RangedEventList<T> {
    fn id(&self) -> ListId {
        self.core.id()
    }

    fn size(&self) -> usize {
        self.window_size()
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

    /// Forwarded as one delegate insertion, so elements pushed past the
    /// window's end do not shift the remaining insertion points.
    fn add_all(&self, index: usize, elements: Vec<T>) -> Result<()> {
        let size = self.window_size();
        let source = self
            .insertion_index(index)
            .ok_or(ListError::out_of_bounds(index, size))?;
        self.core
            .delegate()
            .add_all(source, elements)
            .map_err(|err| err.rebased(index, size))
    }
}
