//! Decorator lists that present a transformed view of another list.
//!
//! Each decorator holds a shared handle to exactly one delegate, translates
//! its own indices into the delegate's on the way down, and re-synthesizes
//! the delegate's events in its own index space on the way up. Decorators
//! never mutate the delegate in response to an event; only explicit calls
//! on the decorator are forwarded.
//!
//! A decorator subscribes through a weak reference, so dropping the last
//! handle to it unsubscribes it from its delegate. [`TransformCore::dispose`]
//! does the same explicitly, after which the decorator fires nothing.

mod filtered;
mod ranged;
mod reverse;
mod sorted;
mod wrapped;

use std::cell::Cell;
use std::rc::{Rc, Weak};

use crate::error::{ListError, Result};
use crate::event::{ChangeEvent, ListId};
use crate::list::{EventList, SharedList};
use crate::listener::{ChangeListener, ListenerId, Listeners};

pub use filtered::FilteredEventList;
pub use ranged::{RangedEventList, WindowAnchor};
pub use reverse::ReverseEventList;
pub use sorted::SortedEventList;
pub use wrapped::WrappedEventList;

/// Mapping from a decorator's positions to its delegate's positions.
///
/// Decorators whose positions map one-to-one onto delegate positions
/// implement this and get their element access from
/// [`TransformCore::mapped_get`] and friends. Upstream events default to
/// [`TransformCore::refire`]; a decorator that reshapes positions handles
/// the structural kinds itself and re-sources OTHER after resyncing.
pub trait IndexMapping {
    /// Number of elements this list presents.
    fn presented_size(&self) -> usize;

    /// Delegate position read, replaced or removed for `index`, or `None`
    /// if `index` is out of range.
    fn source_index(&self, index: usize) -> Option<usize>;

    /// Delegate position at which an insertion at `index` lands, or `None`
    /// if `index` is out of range.
    fn insertion_index(&self, index: usize) -> Option<usize>;
}

/// Receives events from a decorator's delegate.
pub(crate) trait Upstream {
    fn delegate_changed(&self, event: &ChangeEvent);
}

/// Listener registered on the delegate. Holds the decorator weakly so the
/// delegate never keeps it alive.
struct Forward<D>(Weak<D>);

impl<D: Upstream> ChangeListener for Forward<D> {
    fn on_change(&self, event: &ChangeEvent) {
        if let Some(owner) = self.0.upgrade() {
            owner.delegate_changed(event);
        }
    }
}

/// State shared by every decorator: identity, delegate, listeners and the
/// delegate subscription.
pub struct TransformCore<T> {
    id: ListId,
    delegate: SharedList<T>,
    listeners: Listeners,
    subscription: Cell<Option<ListenerId>>,
}

impl<T: 'static> TransformCore<T> {
    pub(crate) fn new(delegate: SharedList<T>) -> Self {
        Self {
            id: ListId::new(),
            delegate,
            listeners: Listeners::new(),
            subscription: Cell::new(None),
        }
    }

    /// Register `owner` for the delegate's events.
    pub(crate) fn subscribe<D: Upstream + 'static>(&self, owner: &Rc<D>) {
        let id = self
            .delegate
            .add_listener(Rc::new(Forward(Rc::downgrade(owner))));
        self.subscription.set(Some(id));
    }

    pub fn id(&self) -> ListId {
        self.id
    }

    pub fn delegate(&self) -> &SharedList<T> {
        &self.delegate
    }

    pub fn listeners(&self) -> &Listeners {
        &self.listeners
    }

    /// Unsubscribe from the delegate. Idempotent.
    pub fn dispose(&self) {
        if let Some(id) = self.subscription.take() {
            self.delegate.remove_listener(id);
            log::debug!("[transform] {} detached from {}", self.id, self.delegate.id());
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.subscription.get().is_none()
    }

    pub(crate) fn fire(&self, event: ChangeEvent) {
        if self.is_disposed() {
            return;
        }
        self.listeners.fire(&event);
    }

    /// Default upstream handling: re-fire `event` unchanged under this
    /// list's id.
    pub(crate) fn refire(&self, event: &ChangeEvent) {
        self.fire(event.resource(self.id));
    }

    pub(crate) fn fire_all(&self, events: Vec<ChangeEvent>) {
        for event in events {
            self.fire(event);
        }
    }

    /// Run `op` against the delegate at `source`, reporting any bounds
    /// failure as `index` against `size` in this list's coordinates.
    pub(crate) fn at_source<R>(
        &self,
        index: usize,
        size: usize,
        source: Option<usize>,
        op: impl FnOnce(&dyn EventList<T>, usize) -> Result<R>,
    ) -> Result<R> {
        let source = source.ok_or(ListError::out_of_bounds(index, size))?;
        op(self.delegate.as_ref(), source).map_err(|err| err.rebased(index, size))
    }

    // -------------------------------------------------------------------------
    // Default element access through an index mapping
    // -------------------------------------------------------------------------

    pub(crate) fn mapped_get(&self, mapping: &impl IndexMapping, index: usize) -> Result<T> {
        self.at_source(
            index,
            mapping.presented_size(),
            mapping.source_index(index),
            |delegate, source| delegate.get(source),
        )
    }

    pub(crate) fn mapped_set(
        &self,
        mapping: &impl IndexMapping,
        index: usize,
        element: T,
    ) -> Result<T> {
        self.at_source(
            index,
            mapping.presented_size(),
            mapping.source_index(index),
            |delegate, source| delegate.set(source, element),
        )
    }

    pub(crate) fn mapped_add(
        &self,
        mapping: &impl IndexMapping,
        index: usize,
        element: T,
    ) -> Result<()> {
        self.at_source(
            index,
            mapping.presented_size(),
            mapping.insertion_index(index),
            |delegate, source| delegate.add(source, element),
        )
    }

    pub(crate) fn mapped_remove(&self, mapping: &impl IndexMapping, index: usize) -> Result<T> {
        self.at_source(
            index,
            mapping.presented_size(),
            mapping.source_index(index),
            |delegate, source| delegate.remove(source),
        )
    }
}

impl<T> Drop for TransformCore<T> {
    fn drop(&mut self) {
        if let Some(id) = self.subscription.take() {
            self.delegate.remove_listener(id);
        }
    }
}

impl<T> std::fmt::Debug for TransformCore<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransformCore")
            .field("id", &self.id)
            .field("delegate", &self.delegate.id())
            .field("listeners", &self.listeners.len())
            .field("disposed", &self.subscription.get().is_none())
            .finish()
    }
}
