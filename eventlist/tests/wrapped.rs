mod common;

use common::{record, take};
use eventlist::{ArrayEventList, ChangeEvent, EventList, EventListExt, ListError};

#[test]
fn test_wrapper_refires_under_own_identity() {
    let base = ArrayEventList::<String>::new();
    let wrapped = base.wrapped();
    let base_events = record(&*base);
    let events = record(&*wrapped);

    base.push("one".to_string()).unwrap();
    wrapped.push("two".to_string()).unwrap();

    assert_eq!(wrapped.to_vec(), vec!["one", "two"]);
    assert_eq!(
        take(&base_events),
        vec![
            ChangeEvent::added(base.id(), 0, 1),
            ChangeEvent::added(base.id(), 1, 2),
        ]
    );
    assert_eq!(
        take(&events),
        vec![
            ChangeEvent::added(wrapped.id(), 0, 1),
            ChangeEvent::added(wrapped.id(), 1, 2),
        ]
    );
}

#[test]
fn test_wrapper_forwards_every_operation() {
    let base = ArrayEventList::with_items(vec![1, 2, 3]);
    let wrapped = base.wrapped();
    let events = record(&*wrapped);

    assert_eq!(wrapped.set(0, 10).unwrap(), 1);
    assert_eq!(wrapped.remove(2).unwrap(), 3);
    wrapped.add_all(1, vec![4, 5]).unwrap();
    assert_eq!(base.to_vec(), vec![10, 4, 5, 2]);
    assert_eq!(wrapped.get(4), Err(ListError::out_of_bounds(4, 4)));

    assert_eq!(
        take(&events),
        vec![
            ChangeEvent::changed(wrapped.id(), 0, 1),
            ChangeEvent::removed(wrapped.id(), 2, 3),
            ChangeEvent::added(wrapped.id(), 1, 2),
            ChangeEvent::added(wrapped.id(), 2, 3),
        ]
    );
}

#[test]
fn test_disposed_wrapper_is_cut_off() {
    let base = ArrayEventList::with_items(vec![1]);
    let wrapped = base.wrapped();
    let other = record(&*base);
    let events = record(&*wrapped);

    wrapped.dispose();
    base.push(2).unwrap();

    assert!(take(&events).is_empty());
    assert_eq!(take(&other).len(), 1);
    assert_eq!(wrapped.size(), 2);
}

#[test]
fn test_every_decorator_refires_base_append() {
    let base = ArrayEventList::<i32>::new();
    let wrapped = base.wrapped();
    let reversed = base.reversed();
    let filtered = base.filtered(|_| true);
    let sorted = base.sorted(|a, b| a.cmp(b));
    let ranged = base.ranged(0, 10);

    let recorders = [
        (wrapped.id(), record(&*wrapped)),
        (reversed.id(), record(&*reversed)),
        (filtered.id(), record(&*filtered)),
        (sorted.id(), record(&*sorted)),
        (ranged.id(), record(&*ranged)),
    ];

    base.push(1).unwrap();

    for (id, events) in &recorders {
        assert_eq!(take(events), vec![ChangeEvent::added(*id, 0, 1)]);
    }
}

#[test]
fn test_add_then_remove_restores_every_view() {
    let base = ArrayEventList::with_items(vec![4, 1, 3, 2]);
    let views: Vec<eventlist::SharedList<i32>> = vec![
        base.wrapped(),
        base.reversed(),
        base.filtered(|n| n % 2 == 0),
        base.sorted(|a, b| a.cmp(b)),
        base.ranged(1, 2),
    ];
    let before: Vec<Vec<i32>> = views.iter().map(|view| view.to_vec()).collect();

    for index in 0..=base.size() {
        base.add(index, 6).unwrap();
        base.remove(index).unwrap();
    }

    let after: Vec<Vec<i32>> = views.iter().map(|view| view.to_vec()).collect();
    assert_eq!(after, before);
}

#[test]
fn test_wrapper_refires_other_from_delegate() {
    let base = ArrayEventList::with_items((0..10).collect::<Vec<i32>>());
    let page = base.ranged(0, 3);
    let wrapped = page.wrapped();
    let rows = common::mirror(wrapped.clone());
    let events = record(&*wrapped);

    page.set_start(4);

    assert_eq!(wrapped.to_vec(), vec![4, 5, 6]);
    assert_eq!(*rows.borrow(), vec![4, 5, 6]);
    assert_eq!(take(&events), vec![ChangeEvent::other(wrapped.id())]);
}
