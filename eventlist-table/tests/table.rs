use std::cell::{Cell, RefCell};
use std::rc::Rc;

use eventlist::{
    ArrayEventList, ChangeEvent, ChangeListener, EventList, EventListExt, ListId, ListenerId,
    Listeners,
};
use eventlist_table::{ChangeStrategy, ObjectListTable, Renderer, TableConfig};

/// Renders `n` as `"row n"` and keeps a journal of its calls.
#[derive(Default)]
struct Journal {
    rendered: Cell<usize>,
    detached: RefCell<Vec<i32>>,
}

impl Renderer<i32> for Journal {
    type Row = String;

    fn render(&self, element: &i32) -> String {
        self.rendered.set(self.rendered.get() + 1);
        format!("row {element}")
    }

    fn on_detach(&self, element: &i32, _row: &mut String) {
        self.detached.borrow_mut().push(*element);
    }
}

/// A list whose events are whatever the test announces.
struct Scripted {
    items: Rc<ArrayEventList<i32>>,
    listeners: Listeners,
}

impl Scripted {
    fn new(items: Vec<i32>) -> Rc<Self> {
        Rc::new(Self {
            items: ArrayEventList::with_items(items),
            listeners: Listeners::new(),
        })
    }

    fn announce(&self, event: ChangeEvent) {
        self.listeners.fire(&event);
    }
}

impl EventList<i32> for Scripted {
    fn id(&self) -> ListId {
        self.items.id()
    }

    fn size(&self) -> usize {
        self.items.size()
    }

    fn get(&self, index: usize) -> eventlist::Result<i32> {
        self.items.get(index)
    }

    fn set(&self, index: usize, element: i32) -> eventlist::Result<i32> {
        self.items.set(index, element)
    }

    fn add(&self, index: usize, element: i32) -> eventlist::Result<()> {
        self.items.add(index, element)
    }

    fn remove(&self, index: usize) -> eventlist::Result<i32> {
        self.items.remove(index)
    }

    fn add_listener(&self, listener: Rc<dyn ChangeListener>) -> ListenerId {
        self.listeners.add(listener)
    }

    fn remove_listener(&self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }
}

fn rows_for(elements: &[i32]) -> Vec<String> {
    elements.iter().map(|n| format!("row {n}")).collect()
}

// ============================================================================
// Initial render and structural events
// ============================================================================

#[test]
fn test_initial_rows_rendered_in_order() {
    let base = ArrayEventList::with_items(vec![3, 1, 2]);
    let table = ObjectListTable::new(base.clone(), Journal::default());

    assert_eq!(table.len(), 3);
    assert_eq!(table.rows(), rows_for(&[3, 1, 2]));
    assert_eq!(table.elements(), vec![3, 1, 2]);
    assert_eq!(table.renderer().rendered.get(), 3);
    assert_eq!(table.config().name, "ObjectListTable");
}

#[test]
fn test_added_renders_only_new_rows() {
    let base = ArrayEventList::with_items(vec![1, 2]);
    let table = ObjectListTable::new(base.clone(), Journal::default());

    base.add(1, 5).unwrap();
    base.add_all(0, vec![7, 8]).unwrap();

    assert_eq!(table.rows(), rows_for(&[7, 8, 1, 5, 2]));
    assert_eq!(table.renderer().rendered.get(), 5);
}

#[test]
fn test_removed_drops_rows_backwards() {
    let base = ArrayEventList::with_items(vec![1, 2, 3, 4]);
    let table = ObjectListTable::new(base.clone(), Journal::default());

    base.remove(1).unwrap();
    base.clear().unwrap();

    assert!(table.is_empty());
    assert_eq!(*table.renderer().detached.borrow(), vec![2, 4, 3, 1]);
}

// ============================================================================
// Change strategies
// ============================================================================

#[test]
fn test_replace_rerenders_differing_rows() {
    let base = ArrayEventList::with_items(vec![1, 2, 3]);
    let table = ObjectListTable::new(base.clone(), Journal::default());

    base.set(1, 20).unwrap();
    base.set(2, 3).unwrap();

    assert_eq!(table.rows(), rows_for(&[1, 20, 3]));
    assert_eq!(table.renderer().rendered.get(), 4);
    assert_eq!(*table.renderer().detached.borrow(), vec![2]);
}

#[test]
fn test_identity_reuses_rows_that_moved() {
    let base = ArrayEventList::with_items(vec![3, 1, 2]);
    let sorted = base.sorted(|a, b| a.cmp(b));
    let config = TableConfig::new("sorted").change_strategy(ChangeStrategy::Identity);
    let table = ObjectListTable::with_config(sorted.clone(), Journal::default(), config);
    assert_eq!(table.renderer().rendered.get(), 3);

    sorted.set_comparator(|a, b| b.cmp(a));

    assert_eq!(table.rows(), rows_for(&[3, 2, 1]));
    assert_eq!(table.renderer().rendered.get(), 3);
    assert!(table.renderer().detached.borrow().is_empty());
}

#[test]
fn test_replace_rerenders_rows_that_moved() {
    let base = ArrayEventList::with_items(vec![3, 1, 2]);
    let sorted = base.sorted(|a, b| a.cmp(b));
    let table = ObjectListTable::new(sorted.clone(), Journal::default());

    sorted.set_comparator(|a, b| b.cmp(a));

    assert_eq!(table.rows(), rows_for(&[3, 2, 1]));
    assert_eq!(table.renderer().rendered.get(), 5);
}

#[test]
fn test_identity_renders_new_elements() {
    let base = ArrayEventList::with_items(vec![1, 2, 3, 4, 5, 6]);
    let filtered = base.filtered(|n| n % 2 == 0);
    let config = TableConfig::default().change_strategy(ChangeStrategy::Identity);
    let table = ObjectListTable::with_config(filtered.clone(), Journal::default(), config);

    filtered.set_filter(|n| *n > 2);

    assert_eq!(table.rows(), rows_for(&[3, 4, 5, 6]));
    assert_eq!(table.elements(), filtered.to_vec());
}

// ============================================================================
// Decorator chains and lifecycle
// ============================================================================

#[test]
fn test_table_follows_decorator_chain() {
    let base = ArrayEventList::with_items(vec![5, 2, 8, 1, 4]);
    let page = base.filtered(|n| *n != 8).sorted(|a, b| a.cmp(b)).reversed().ranged(0, 3);
    let table = ObjectListTable::new(page.clone(), |n: &i32| n * 10);

    assert_eq!(table.rows(), vec![50, 40, 20]);

    base.push(9).unwrap();
    base.push(8).unwrap();
    base.set(0, 0).unwrap();
    page.set_start(1);

    assert_eq!(table.elements(), page.to_vec());
    assert_eq!(table.rows(), vec![40, 20, 10]);
}

#[test]
fn test_other_rebuilds_every_row() {
    let base = ArrayEventList::with_items((0..6).collect());
    let page = base.ranged(0, 2);
    let table = ObjectListTable::new(page.clone(), Journal::default());

    page.set_start(3);

    assert_eq!(table.rows(), rows_for(&[3, 4]));
    assert_eq!(table.renderer().rendered.get(), 4);
    assert_eq!(*table.renderer().detached.borrow(), vec![0, 1]);
}

#[test]
fn test_out_of_sync_table_rebuilds() {
    let list = Scripted::new(vec![1, 2, 3]);
    let table = ObjectListTable::new(list.clone(), Journal::default());

    list.announce(ChangeEvent::removed(list.id(), 5, 6));
    assert_eq!(table.rows(), rows_for(&[1, 2, 3]));

    list.announce(ChangeEvent::added(list.id(), 0, 1));
    assert_eq!(table.rows(), rows_for(&[1, 2, 3]));
    assert_eq!(table.renderer().rendered.get(), 10);
}

#[test]
fn test_dispose_freezes_rows() {
    let base = ArrayEventList::with_items(vec![1]);
    let table = ObjectListTable::new(base.clone(), Journal::default());

    table.dispose();
    assert!(table.is_disposed());
    base.push(2).unwrap();

    assert_eq!(table.rows(), rows_for(&[1]));
}

#[test]
fn test_dropped_table_detaches_rows() {
    let base = ArrayEventList::with_items(vec![1, 2]);
    let detached = Rc::new(RefCell::new(Vec::new()));

    struct Tracking(Rc<RefCell<Vec<i32>>>);
    impl Renderer<i32> for Tracking {
        type Row = i32;
        fn render(&self, element: &i32) -> i32 {
            *element
        }
        fn on_detach(&self, element: &i32, _row: &mut i32) {
            self.0.borrow_mut().push(*element);
        }
    }

    let table = ObjectListTable::new(base.clone(), Tracking(Rc::clone(&detached)));
    drop(table);
    base.push(3).unwrap();

    assert_eq!(*detached.borrow(), vec![1, 2]);
}
