use serde::{Deserialize, Serialize};

use crate::copy::CopyId;

/// Where a copy sits in the catalog's records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    /// On the shelf, available for checkout
    Available,
    /// On loan to a borrower
    CheckedOut,
    /// In neither collection; written off after being lost
    Missing,
}

/// Changes the catalog records
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogEvent {
    /// A new copy was bought and shelved
    Acquired(CopyId),
    /// A copy left the shelf on loan
    CheckedOut(CopyId),
    /// A copy came back from loan
    CheckedIn(CopyId),
    /// A copy was declared lost while at `location`
    Lost {
        /// The lost copy
        copy: CopyId,
        /// Where the records placed the copy when it was declared lost
        location: Location,
    },
    /// A lost copy was removed from the shelf and loan records
    WrittenOff {
        /// The written-off copy
        copy: CopyId,
        /// The collection the copy was removed from
        from: Location,
    },
}

impl CatalogEvent {
    /// The copy this event concerns
    #[must_use]
    pub fn copy(&self) -> CopyId {
        match self {
            Self::Acquired(copy) | Self::CheckedOut(copy) | Self::CheckedIn(copy) => *copy,
            Self::Lost { copy, .. } | Self::WrittenOff { copy, .. } => *copy,
        }
    }
}

/// A catalog event stamped with its position in the catalog's history
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CatalogRecord {
    /// Monotonic sequence number, starting at 1
    pub sequence: u64,
    /// What happened
    pub event: CatalogEvent,
}
