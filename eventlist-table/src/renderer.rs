//! Turning list elements into rows.

/// Builds the row for one element.
///
/// Implemented for any `Fn(&T) -> Row` closure. A renderer may read the
/// list the table observes, but must never mutate it.
pub trait Renderer<T> {
    type Row;

    fn render(&self, element: &T) -> Self::Row;

    /// Called after a freshly rendered row joins the table.
    fn on_attach(&self, _element: &T, _row: &mut Self::Row) {}

    /// Called when a row leaves the table.
    fn on_detach(&self, _element: &T, _row: &mut Self::Row) {}
}

impl<T, R, F> Renderer<T> for F
where
    F: Fn(&T) -> R,
{
    type Row = R;

    fn render(&self, element: &T) -> R {
        self(element)
    }
}

/// One element and the row rendered from it.
#[derive(Debug, Clone, PartialEq)]
pub struct RowGroup<T, R> {
    element: T,
    row: R,
}

impl<T, R> RowGroup<T, R> {
    pub(crate) fn new(element: T, row: R) -> Self {
        Self { element, row }
    }

    /// The element this row was rendered from.
    pub fn element(&self) -> &T {
        &self.element
    }

    pub fn row(&self) -> &R {
        &self.row
    }

    pub(crate) fn parts_mut(&mut self) -> (&T, &mut R) {
        (&self.element, &mut self.row)
    }

    pub fn into_row(self) -> R {
        self.row
    }
}
