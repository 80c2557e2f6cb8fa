//! Generic server-driven data table.
//!
//! Split into a pure state layer ([`query`], [`selection`], [`search`]) and
//! the reactive engine ([`engine`]) that owns signals, fetching, and URL
//! synchronization. Column metadata lives in [`columns`].

pub mod columns;
pub mod engine;
pub mod query;
pub mod search;
pub mod selection;

pub use columns::{ColumnDef, TableConfig};
pub use engine::{DataTable, TableRow};
pub use query::{SortDirection, SortRequest, TableQuery};
