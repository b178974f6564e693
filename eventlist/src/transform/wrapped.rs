//! Pass-through decorator.

use std::rc::Rc;

use super::{IndexMapping, TransformCore, Upstream};
use crate::error::Result;
use crate::event::{ChangeEvent, ListId};
use crate::list::{EventList, SharedList};
use crate::listener::{ChangeListener, ListenerId};

/// Presents its delegate unchanged, under its own identity.
///
/// Useful as a boundary: consumers subscribe to the wrapper and can be cut
/// off from the delegate with [`dispose`](Self::dispose) without touching
/// the delegate's other listeners.
#[derive(Debug)]
pub struct WrappedEventList<T> {
    core: TransformCore<T>,
}

impl<T: Clone + 'static> WrappedEventList<T> {
    pub fn new(delegate: SharedList<T>) -> Rc<Self> {
        let list = Rc::new(Self {
            core: TransformCore::new(delegate),
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
}

impl<T: Clone + 'static> IndexMapping for WrappedEventList<T> {
    fn presented_size(&self) -> usize {
        self.core.delegate().size()
    }

    fn source_index(&self, index: usize) -> Option<usize> {
        (index < self.presented_size()).then_some(index)
    }

    fn insertion_index(&self, index: usize) -> Option<usize> {
        (index <= self.presented_size()).then_some(index)
    }
}

impl<T: Clone + 'static> Upstream for WrappedEventList<T> {
    fn delegate_changed(&self, event: &ChangeEvent) {
        self.core.refire(event);
    }
}

impl<T: Clone + 'static> EventList<T> for WrappedEventList<T> {
    fn id(&self) -> ListId {
        self.core.id()
    }

    fn size(&self) -> usize {
        self.presented_size()
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
