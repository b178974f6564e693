//! Change events fired by event lists.
//!
//! Every committed mutation produces a [`ChangeEvent`] describing what
//! happened in the firing list's own index space. Ranges are half-open:
//! `index_start..index_end`.

use std::fmt;
use std::ops::Range;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Unique identifier for an event list instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListId(usize);

impl ListId {
    pub(crate) fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl fmt::Display for ListId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "__list_{}", self.0)
    }
}

/// What kind of mutation an event describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    /// Elements were inserted at the range.
    Added,
    /// Elements were removed from the range.
    Removed,
    /// Elements in the range were replaced.
    Changed,
    /// Anything else. Consumers should treat the whole list as invalid;
    /// the range is advisory.
    Other,
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Added => "ADDED",
            Self::Removed => "REMOVED",
            Self::Changed => "CHANGED",
            Self::Other => "OTHER",
        };
        f.write_str(name)
    }
}

/// An immutable description of one mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    source: ListId,
    kind: ChangeKind,
    index_start: usize,
    index_end: usize,
}

impl ChangeEvent {
    /// Create an event covering `index_start..index_end`.
    ///
    /// # Panics
    ///
    /// Panics if `index_start > index_end`.
    pub fn new(source: ListId, kind: ChangeKind, index_start: usize, index_end: usize) -> Self {
        assert!(
            index_start <= index_end,
            "event range start {index_start} is past its end {index_end}"
        );
        Self {
            source,
            kind,
            index_start,
            index_end,
        }
    }

    /// Create an event covering the single position `index`.
    pub fn single(source: ListId, kind: ChangeKind, index: usize) -> Self {
        Self::new(source, kind, index, index + 1)
    }

    pub fn added(source: ListId, index_start: usize, index_end: usize) -> Self {
        Self::new(source, ChangeKind::Added, index_start, index_end)
    }

    pub fn removed(source: ListId, index_start: usize, index_end: usize) -> Self {
        Self::new(source, ChangeKind::Removed, index_start, index_end)
    }

    pub fn changed(source: ListId, index_start: usize, index_end: usize) -> Self {
        Self::new(source, ChangeKind::Changed, index_start, index_end)
    }

    /// Create a whole-list invalidation.
    pub fn other(source: ListId) -> Self {
        Self::new(source, ChangeKind::Other, 0, 0)
    }

    /// Describe `removed` elements at `at` being replaced by `added` elements.
    ///
    /// The result holds at most one structural event (ADDED or REMOVED)
    /// followed by at most one CHANGED event. Once the structural event has
    /// been applied the list has its final size, so listeners reading back
    /// into the list during either event see consistent state.
    pub fn splice(source: ListId, at: usize, removed: usize, added: usize) -> Vec<ChangeEvent> {
        let kept = removed.min(added);
        let mut events = Vec::with_capacity(2);
        if added > removed {
            events.push(Self::added(source, at + removed, at + added));
        } else if removed > added {
            events.push(Self::removed(source, at + added, at + removed));
        }
        if kept > 0 {
            events.push(Self::changed(source, at, at + kept));
        }
        events
    }

    /// Copy this event with a different source.
    pub fn resource(&self, source: ListId) -> Self {
        Self { source, ..*self }
    }

    pub fn source(&self) -> ListId {
        self.source
    }

    pub fn kind(&self) -> ChangeKind {
        self.kind
    }

    pub fn index_start(&self) -> usize {
        self.index_start
    }

    pub fn index_end(&self) -> usize {
        self.index_end
    }

    pub fn range(&self) -> Range<usize> {
        self.index_start..self.index_end
    }

    /// Number of positions covered by the range.
    pub fn len(&self) -> usize {
        self.index_end - self.index_start
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_added(&self) -> bool {
        self.kind == ChangeKind::Added
    }

    pub fn is_removed(&self) -> bool {
        self.kind == ChangeKind::Removed
    }

    pub fn is_changed(&self) -> bool {
        self.kind == ChangeKind::Changed
    }

    pub fn is_other(&self) -> bool {
        self.kind == ChangeKind::Other
    }
}

impl fmt::Display for ChangeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}..{}) on {}",
            self.kind, self.index_start, self.index_end, self.source
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splice_growth_fires_added_then_changed() {
        let id = ListId::new();
        let events = ChangeEvent::splice(id, 2, 1, 3);
        assert_eq!(
            events,
            vec![ChangeEvent::added(id, 3, 5), ChangeEvent::changed(id, 2, 3)]
        );
    }

    #[test]
    fn test_splice_shrink_fires_removed_then_changed() {
        let id = ListId::new();
        let events = ChangeEvent::splice(id, 0, 3, 1);
        assert_eq!(
            events,
            vec![ChangeEvent::removed(id, 1, 3), ChangeEvent::changed(id, 0, 1)]
        );
    }

    #[test]
    fn test_splice_pure_cases() {
        let id = ListId::new();
        assert!(ChangeEvent::splice(id, 4, 0, 0).is_empty());
        assert_eq!(
            ChangeEvent::splice(id, 4, 0, 2),
            vec![ChangeEvent::added(id, 4, 6)]
        );
        assert_eq!(
            ChangeEvent::splice(id, 4, 2, 0),
            vec![ChangeEvent::removed(id, 4, 6)]
        );
        assert_eq!(
            ChangeEvent::splice(id, 4, 2, 2),
            vec![ChangeEvent::changed(id, 4, 6)]
        );
    }

    #[test]
    #[should_panic]
    fn test_inverted_range_panics() {
        ChangeEvent::new(ListId::new(), ChangeKind::Added, 3, 2);
    }
}
