use tracing::{info, warn};

use crate::events::{CatalogEvent, CatalogRecord, Location};

/// Trait for catalog change observation
pub trait CatalogObserver: Send + Sync {
    /// Called after a catalog change has been committed
    fn on_event(&self, record: &CatalogRecord);
}

/// Logs every catalog change through `tracing`
#[derive(Debug, Default)]
pub struct TracingObserver;

impl CatalogObserver for TracingObserver {
    fn on_event(&self, record: &CatalogRecord) {
        let copy = record.event.copy();
        match &record.event {
            CatalogEvent::Acquired(_) => {
                info!(seq = record.sequence, %copy, "copy acquired");
            }
            CatalogEvent::CheckedOut(_) => {
                info!(seq = record.sequence, %copy, "copy checked out");
            }
            CatalogEvent::CheckedIn(_) => {
                info!(seq = record.sequence, %copy, "copy checked in");
            }
            CatalogEvent::Lost { location, .. } => match location {
                Location::Available => {
                    warn!(seq = record.sequence, %copy, "copy lost from the shelf");
                }
                Location::CheckedOut => {
                    warn!(seq = record.sequence, %copy, "copy lost while on loan");
                }
                Location::Missing => {
                    warn!(seq = record.sequence, %copy, "copy lost after write-off");
                }
            },
            CatalogEvent::WrittenOff { from, .. } => {
                info!(seq = record.sequence, %copy, from = ?from, "lost copy written off");
            }
        }
    }
}
