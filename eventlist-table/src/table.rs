//! Table that mirrors an event list into rendered rows.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::ops::Range;
use std::rc::Rc;

use eventlist::{ChangeEvent, ChangeKind, ListError, ListenerId, Result, SharedList};

use crate::config::{ChangeStrategy, TableConfig};
use crate::renderer::{Renderer, RowGroup};

/// Keeps one [`RowGroup`] per element of an observed list, updated
/// incrementally from the list's change events.
///
/// ADDED renders and inserts rows, REMOVED drops them from the end of the
/// range backwards, CHANGED updates rows per the configured
/// [`ChangeStrategy`] and OTHER rebuilds every row. If the rows ever
/// disagree with the list after an event, the table logs a warning and
/// rebuilds.
pub struct ObjectListTable<T, R: Renderer<T>> {
    objects: SharedList<T>,
    renderer: R,
    config: TableConfig,
    groups: RefCell<Vec<RowGroup<T, R::Row>>>,
    subscription: Cell<Option<ListenerId>>,
}

impl<T, R> ObjectListTable<T, R>
where
    T: Clone + PartialEq + 'static,
    R: Renderer<T> + 'static,
{
    pub fn new(objects: SharedList<T>, renderer: R) -> Rc<Self> {
        Self::with_config(objects, renderer, TableConfig::default())
    }

    pub fn with_config(objects: SharedList<T>, renderer: R, config: TableConfig) -> Rc<Self> {
        let table = Rc::new(Self {
            objects,
            renderer,
            config,
            groups: RefCell::new(Vec::new()),
            subscription: Cell::new(None),
        });

        let weak = Rc::downgrade(&table);
        let id = table.objects.add_listener(Rc::new(move |event: &ChangeEvent| {
            if let Some(table) = weak.upgrade() {
                table.list_changed(event);
            }
        }));
        table.subscription.set(Some(id));

        let size = table.objects.size();
        table.list_changed(&ChangeEvent::added(table.objects.id(), 0, size));
        table
    }

    /// The observed list.
    pub fn objects(&self) -> &SharedList<T> {
        &self.objects
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn len(&self) -> usize {
        self.groups.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Run `f` over the current row groups.
    pub fn with_rows<U>(&self, f: impl FnOnce(&[RowGroup<T, R::Row>]) -> U) -> U {
        f(&self.groups.borrow())
    }

    pub fn rows(&self) -> Vec<R::Row>
    where
        R::Row: Clone,
    {
        self.with_rows(|groups| groups.iter().map(|group| group.row().clone()).collect())
    }

    /// Elements the rows were rendered from, in table order.
    pub fn elements(&self) -> Vec<T> {
        self.with_rows(|groups| groups.iter().map(|group| group.element().clone()).collect())
    }

    /// Stop following the list. The rows are kept as they are.
    pub fn dispose(&self) {
        if let Some(id) = self.subscription.take() {
            self.objects.remove_listener(id);
            log::debug!("[table] {} detached from {}", self.config.name, self.objects.id());
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.subscription.get().is_none()
    }

    // -------------------------------------------------------------------------
    // Event handling
    // -------------------------------------------------------------------------

    fn list_changed(&self, event: &ChangeEvent) {
        log::trace!("[table] {} <- {}", self.config.name, event);
        let applied = match event.kind() {
            ChangeKind::Added => self.insert_rows(event.range()),
            ChangeKind::Removed => self.remove_rows(event.range()),
            ChangeKind::Changed => match self.config.change_strategy {
                ChangeStrategy::Replace => self.replace_rows(event.range()),
                ChangeStrategy::Identity => self.reuse_rows(event.range()),
            },
            ChangeKind::Other => {
                self.rebuild();
                return;
            }
        };

        let (rows, size) = (self.len(), self.objects.size());
        if let Err(err) = applied {
            log::warn!("[table] {} could not apply {}: {}", self.config.name, event, err);
            self.rebuild();
        } else if rows != size {
            log::warn!(
                "[table] {} has {} rows for {} elements after {}",
                self.config.name,
                rows,
                size,
                event
            );
            self.rebuild();
        }
    }

    fn read(&self, range: Range<usize>) -> Result<Vec<T>> {
        range.map(|index| self.objects.get(index)).collect()
    }

    fn attach(&self, element: T) -> RowGroup<T, R::Row> {
        let mut row = self.renderer.render(&element);
        self.renderer.on_attach(&element, &mut row);
        RowGroup::new(element, row)
    }

    fn insert_rows(&self, range: Range<usize>) -> Result<()> {
        let elements = self.read(range.clone())?;
        let mut groups = self.groups.borrow_mut();
        if range.start > groups.len() {
            return Err(ListError::out_of_bounds(range.start, groups.len()));
        }
        for (index, element) in range.zip(elements) {
            groups.insert(index, self.attach(element));
        }
        Ok(())
    }

    fn remove_rows(&self, range: Range<usize>) -> Result<()> {
        let mut groups = self.groups.borrow_mut();
        if range.end > groups.len() {
            return Err(ListError::out_of_bounds(range.end, groups.len()));
        }
        for index in range.rev() {
            self.detach(groups.remove(index));
        }
        Ok(())
    }

    fn replace_rows(&self, range: Range<usize>) -> Result<()> {
        let elements = self.read(range.clone())?;
        let mut groups = self.groups.borrow_mut();
        if range.end > groups.len() {
            return Err(ListError::out_of_bounds(range.end, groups.len()));
        }
        for (index, element) in range.zip(elements) {
            if groups[index].element() == &element {
                continue;
            }
            let (old, row) = groups[index].parts_mut();
            self.renderer.on_detach(old, row);
            groups[index] = self.attach(element);
        }
        Ok(())
    }

    fn reuse_rows(&self, range: Range<usize>) -> Result<()> {
        let elements = self.read(range.clone())?;
        let mut groups = self.groups.borrow_mut();
        if range.end > groups.len() {
            return Err(ListError::out_of_bounds(range.end, groups.len()));
        }
        let mut pool: Vec<_> = groups.drain(range.clone()).collect();
        let mut reused = 0;
        for (index, element) in range.zip(elements) {
            let group = match pool.iter().position(|group| group.element() == &element) {
                Some(position) => {
                    reused += 1;
                    pool.remove(position)
                }
                None => self.attach(element),
            };
            groups.insert(index, group);
        }
        for group in pool {
            self.detach(group);
        }
        log::trace!("[table] {} reused {} rows", self.config.name, reused);
        Ok(())
    }

    fn rebuild(&self) {
        let elements = self.objects.to_vec();
        let old = std::mem::take(&mut *self.groups.borrow_mut());
        for group in old {
            self.detach(group);
        }
        let fresh: Vec<_> = elements
            .into_iter()
            .map(|element| self.attach(element))
            .collect();
        log::debug!("[table] {} rebuilt {} rows", self.config.name, fresh.len());
        *self.groups.borrow_mut() = fresh;
    }
}

impl<T, R: Renderer<T>> ObjectListTable<T, R> {
    fn detach(&self, mut group: RowGroup<T, R::Row>) {
        let (element, row) = group.parts_mut();
        self.renderer.on_detach(element, row);
    }
}

impl<T, R: Renderer<T>> Drop for ObjectListTable<T, R> {
    fn drop(&mut self) {
        if let Some(id) = self.subscription.take() {
            self.objects.remove_listener(id);
        }
        for group in std::mem::take(self.groups.get_mut()) {
            self.detach(group);
        }
    }
}

impl<T, R: Renderer<T>> fmt::Debug for ObjectListTable<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectListTable")
            .field("name", &self.config.name)
            .field("objects", &self.objects.id())
            .field("rows", &self.groups.borrow().len())
            .field("disposed", &self.subscription.get().is_none())
            .finish()
    }
}
