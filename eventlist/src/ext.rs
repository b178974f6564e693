//! Chaining constructors for decorators.

use std::cmp::Ordering;
use std::rc::Rc;

use crate::list::{EventList, SharedList};
use crate::transform::{
    FilteredEventList, RangedEventList, ReverseEventList, SortedEventList, WrappedEventList,
};

/// Build decorators directly from a list handle.
///
/// # Example
///
/// ```
/// use eventlist::{ArrayEventList, EventList, EventListExt};
///
/// let numbers = ArrayEventList::with_items(vec![5, 2, 8, 1, 4]);
/// let page = numbers.filtered(|n| n % 2 == 0).reversed().ranged(0, 2);
/// assert_eq!(page.to_vec(), vec![4, 8]);
/// ```
pub trait EventListExt<T> {
    fn wrapped(&self) -> Rc<WrappedEventList<T>>;
    fn reversed(&self) -> Rc<ReverseEventList<T>>;
    fn filtered(&self, filter: impl Fn(&T) -> bool + 'static) -> Rc<FilteredEventList<T>>;
    fn sorted(
        &self,
        comparator: impl Fn(&T, &T) -> Ordering + 'static,
    ) -> Rc<SortedEventList<T>>;
    fn ranged(&self, start: usize, max_size: usize) -> Rc<RangedEventList<T>>;
}

impl<T, L> EventListExt<T> for Rc<L>
where
    T: Clone + 'static,
    L: EventList<T> + 'static,
{
    fn wrapped(&self) -> Rc<WrappedEventList<T>> {
        WrappedEventList::new(shared(self))
    }

    fn reversed(&self) -> Rc<ReverseEventList<T>> {
        ReverseEventList::new(shared(self))
    }

    fn filtered(&self, filter: impl Fn(&T) -> bool + 'static) -> Rc<FilteredEventList<T>> {
        FilteredEventList::new(shared(self), filter)
    }

    fn sorted(
        &self,
        comparator: impl Fn(&T, &T) -> Ordering + 'static,
    ) -> Rc<SortedEventList<T>> {
        SortedEventList::new(shared(self), comparator)
    }

    fn ranged(&self, start: usize, max_size: usize) -> Rc<RangedEventList<T>> {
        RangedEventList::new(shared(self), start, max_size)
    }
}

fn shared<T, L: EventList<T> + 'static>(list: &Rc<L>) -> SharedList<T> {
    Rc::clone(list) as SharedList<T>
}
