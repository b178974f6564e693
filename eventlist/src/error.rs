//! Error types for list operations.

use crate::event::ListId;

/// Error type for list mutations and reads.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListError {
    /// The index is outside the valid range for the operation.
    #[error("Index: {index}, Size: {size}")]
    IndexOutOfBounds { index: usize, size: usize },

    /// The list refused an element that does not fit its contract.
    #[error("{list} rejected element: {reason}")]
    Rejected { list: ListId, reason: &'static str },
}

impl ListError {
    pub fn out_of_bounds(index: usize, size: usize) -> Self {
        Self::IndexOutOfBounds { index, size }
    }

    /// Re-express a bounds error in another list's coordinates.
    ///
    /// Other error kinds pass through unchanged.
    pub fn rebased(self, index: usize, size: usize) -> Self {
        match self {
            Self::IndexOutOfBounds { .. } => Self::IndexOutOfBounds { index, size },
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, ListError>;
