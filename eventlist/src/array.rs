//! Vec-backed base event list.

use std::cell::RefCell;
use std::mem;
use std::rc::Rc;

use crate::error::{ListError, Result};
use crate::event::{ChangeEvent, ListId};
use crate::list::EventList;
use crate::listener::{ChangeListener, ListenerId, Listeners};

/// The root of a decorator chain: a plain list that owns its elements.
///
/// Every mutator validates its index before touching state and fires
/// exactly one event afterwards.
#[derive(Debug)]
pub struct ArrayEventList<T> {
    id: ListId,
    items: RefCell<Vec<T>>,
    listeners: Listeners,
}

impl<T: Clone + 'static> ArrayEventList<T> {
    /// Create a new empty list.
    pub fn new() -> Rc<Self> {
        Self::with_items(Vec::new())
    }

    /// Create a list with initial items.
    pub fn with_items(items: Vec<T>) -> Rc<Self> {
        Rc::new(Self {
            id: ListId::new(),
            items: RefCell::new(items),
            listeners: Listeners::new(),
        })
    }

    fn fire(&self, event: ChangeEvent) {
        log::trace!("[array] {}", event);
        self.listeners.fire(&event);
    }
}

impl<T: Clone + 'static> EventList<T> for ArrayEventList<T> {
    fn id(&self) -> ListId {
        self.id
    }

    fn size(&self) -> usize {
        self.items.borrow().len()
    }

    fn get(&self, index: usize) -> Result<T> {
        let items = self.items.borrow();
        items
            .get(index)
            .cloned()
            .ok_or_else(|| ListError::out_of_bounds(index, items.len()))
    }

    fn set(&self, index: usize, element: T) -> Result<T> {
        let previous = {
            let mut items = self.items.borrow_mut();
            let size = items.len();
            let slot = items
                .get_mut(index)
                .ok_or(ListError::out_of_bounds(index, size))?;
            mem::replace(slot, element)
        };
        self.fire(ChangeEvent::changed(self.id, index, index + 1));
        Ok(previous)
    }

    fn add(&self, index: usize, element: T) -> Result<()> {
        {
            let mut items = self.items.borrow_mut();
            if index > items.len() {
                return Err(ListError::out_of_bounds(index, items.len()));
            }
            items.insert(index, element);
        }
        self.fire(ChangeEvent::added(self.id, index, index + 1));
        Ok(())
    }

    fn remove(&self, index: usize) -> Result<T> {
        let removed = {
            let mut items = self.items.borrow_mut();
            if index >= items.len() {
                return Err(ListError::out_of_bounds(index, items.len()));
            }
            items.remove(index)
        };
        self.fire(ChangeEvent::removed(self.id, index, index + 1));
        Ok(removed)
    }

    fn add_listener(&self, listener: Rc<dyn ChangeListener>) -> ListenerId {
        self.listeners.add(listener)
    }

    fn remove_listener(&self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    fn add_all(&self, index: usize, elements: Vec<T>) -> Result<()> {
        let count = elements.len();
        {
            let mut items = self.items.borrow_mut();
            if index > items.len() {
                return Err(ListError::out_of_bounds(index, items.len()));
            }
            if count == 0 {
                return Ok(());
            }
            items.splice(index..index, elements);
        }
        self.fire(ChangeEvent::added(self.id, index, index + count));
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let count = {
            let mut items = self.items.borrow_mut();
            let count = items.len();
            items.clear();
            count
        };
        if count > 0 {
            self.fire(ChangeEvent::removed(self.id, 0, count));
        }
        Ok(())
    }

    fn to_vec(&self) -> Vec<T> {
        self.items.borrow().clone()
    }
}
