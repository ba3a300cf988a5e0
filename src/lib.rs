//! Book inventory for a small library.
//!
//! This crate tracks distinct book [`Edition`]s, the physical [`BookCopy`]s a
//! [`Catalog`] has acquired, whether each copy is on the shelf or on loan,
//! the condition of each copy, and exact-match keyword search.

pub mod catalog;
pub mod condition;
pub mod config;
pub mod copy;
pub mod edition;
pub mod error;
pub mod events;
pub mod observability;
pub mod observers;
pub mod report;

pub use catalog::{Catalog, SearchHit};
pub use condition::Condition;
pub use config::{CatalogConfig, MatchPolicy, SearchScope};
pub use copy::{BookCopy, CopyId};
pub use edition::Edition;
pub use error::{CatalogError, ErrorKind, Result};
pub use events::{CatalogEvent, CatalogRecord, Location};
pub use observers::{CatalogObserver, TracingObserver};
pub use report::{InventoryReport, ReportLine};
