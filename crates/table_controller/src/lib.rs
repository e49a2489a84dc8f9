//! Selection, pagination, sort and filter reconciliation for dashboard
//! tables. Every translator is a pure function of the current state; the
//! [`TableController`] facade threads them through an injected store,
//! row fetcher and message catalog.

pub mod bulk_select;
pub mod controller;
pub mod error;
pub mod filters;
pub mod messages;
pub mod pagination;
pub mod selection;
pub mod sort;
pub mod store;
pub mod transport;

pub use bulk_select::{build_bulk_select_config, BulkSelectConfig, BulkSelectItem};
pub use controller::{ControllerOptions, TableController};
pub use error::TableError;
pub use messages::{DefaultMessages, MessageKey, MessageLookup};
pub use pagination::PagePerPage;
pub use selection::{RowSelector, SelectionAction, SelectionCoordinator, SelectionOutcome};
pub use sort::{ColumnLayout, SortBy};
pub use store::{InMemoryTableStore, TableSnapshot, TableStore};
pub use transport::{HttpRowFetcher, MissingRowFetcher, RowFetcher};
