//! The observable list interface shared by base lists and decorators.

use std::rc::Rc;

use crate::error::{ListError, Result};
use crate::event::ListId;
use crate::listener::{ChangeListener, ListenerId};

/// Shared handle to any event list.
pub type SharedList<T> = Rc<dyn EventList<T>>;

/// An observable, index-addressable, mutable sequence.
///
/// Mutators take `&self`: lists are shared handles with interior
/// mutability, observed by any number of listeners. Every successful
/// mutation fires its change event(s) before returning, and internal state
/// is already updated when listeners run, so a listener may read back into
/// the list.
pub trait EventList<T> {
    /// Unique identifier, used as the source of fired events.
    fn id(&self) -> ListId;

    fn size(&self) -> usize;

    fn get(&self, index: usize) -> Result<T>;

    /// Replace the element at `index`, returning the previous one.
    fn set(&self, index: usize, element: T) -> Result<T>;

    /// Insert `element` at `index` (`index <= size()`).
    fn add(&self, index: usize, element: T) -> Result<()>;

    fn remove(&self, index: usize) -> Result<T>;

    fn add_listener(&self, listener: Rc<dyn ChangeListener>) -> ListenerId;

    /// Returns false if `id` was not registered on this list.
    fn remove_listener(&self, id: ListenerId) -> bool;

    // -------------------------------------------------------------------------
    // Provided
    // -------------------------------------------------------------------------

    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Append an element.
    fn push(&self, element: T) -> Result<()> {
        self.add(self.size(), element)
    }

    /// Insert all `elements` starting at `index`, in order.
    fn add_all(&self, index: usize, elements: Vec<T>) -> Result<()> {
        let size = self.size();
        if index > size {
            return Err(ListError::out_of_bounds(index, size));
        }
        for (offset, element) in elements.into_iter().enumerate() {
            self.add(index + offset, element)?;
        }
        Ok(())
    }

    /// Remove every element currently presented.
    fn clear(&self) -> Result<()> {
        for index in (0..self.size()).rev() {
            self.remove(index)?;
        }
        Ok(())
    }

    /// Snapshot of the presented elements.
    fn to_vec(&self) -> Vec<T> {
        (0..self.size()).filter_map(|i| self.get(i).ok()).collect()
    }

    fn index_of(&self, element: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        (0..self.size()).find(|&i| self.get(i).is_ok_and(|candidate| candidate == *element))
    }

    fn contains(&self, element: &T) -> bool
    where
        T: PartialEq,
    {
        self.index_of(element).is_some()
    }
}
