//! Table configuration types.

/// Per-table configuration.
#[derive(Debug, Clone)]
pub struct TableConfig {
    /// Name used in log messages.
    pub name: &'static str,

    /// How CHANGED events are applied to existing rows.
    pub change_strategy: ChangeStrategy,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            name: "ObjectListTable",
            change_strategy: ChangeStrategy::default(),
        }
    }
}

impl TableConfig {
    /// Create a new config with the given name.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            ..Default::default()
        }
    }

    /// Set the change strategy.
    pub fn change_strategy(mut self, strategy: ChangeStrategy) -> Self {
        self.change_strategy = strategy;
        self
    }
}

/// How a table updates rows covered by a CHANGED event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChangeStrategy {
    /// Re-render every position whose element differs from the one its row
    /// was rendered from.
    #[default]
    Replace,

    /// Reuse any row in the changed range whose element equals a new
    /// element in that range, wherever it moved to; render the rest.
    Identity,
}
