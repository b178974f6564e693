//! A table consumer for event lists.
//!
//! [`ObjectListTable`] observes any [`eventlist::EventList`] and keeps one
//! rendered row per element, updating only the rows an event touches.
//!
//! # Example
//!
//! ```
//! use eventlist::{ArrayEventList, EventList, EventListExt};
//! use eventlist_table::ObjectListTable;
//!
//! let names = ArrayEventList::with_items(vec!["bob", "alice"]);
//! let sorted = names.sorted(|a, b| a.cmp(b));
//! let table = ObjectListTable::new(sorted, |name: &&str| name.to_uppercase());
//!
//! names.push("carol").unwrap();
//! assert_eq!(table.rows(), vec!["ALICE", "BOB", "CAROL"]);
//! ```

pub mod config;
pub mod renderer;
pub mod table;

pub use config::{ChangeStrategy, TableConfig};
pub use renderer::{Renderer, RowGroup};
pub use table::ObjectListTable;
