use std::{
    cmp::Reverse,
    collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque},
    fmt,
    sync::Arc,
};

use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use tracing::{debug, warn};

use crate::{
    condition::Condition,
    config::{CatalogConfig, MatchPolicy, SearchScope},
    copy::{BookCopy, CopyId},
    edition::Edition,
    error::{CatalogError, Result},
    events::{CatalogEvent, CatalogRecord, Location},
    observers::CatalogObserver,
    report::InventoryReport,
};

/// One edition returned by [`Catalog::search`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    /// The matching edition
    pub edition: Edition,
    /// Copies of the edition on the shelf
    pub available: usize,
    /// Copies of the edition on the shelf or on loan
    pub total: usize,
}

/// Everything the catalog lock protects
#[derive(Debug)]
struct CatalogState {
    /// Behaviour switches
    config: CatalogConfig,
    /// Every copy ever acquired, keyed (and so ordered) by acquisition
    ledger: BTreeMap<CopyId, BookCopy>,
    /// Copies on the shelf
    available: BTreeSet<CopyId>,
    /// Copies on loan
    checked_out: BTreeSet<CopyId>,
    /// Most recent changes, oldest first
    history: VecDeque<CatalogRecord>,
    /// Sequence number for the next history record
    next_sequence: u64,
}

impl CatalogState {
    /// Create empty state
    fn new(config: CatalogConfig) -> Self {
        Self {
            config,
            ledger: BTreeMap::new(),
            available: BTreeSet::new(),
            checked_out: BTreeSet::new(),
            history: VecDeque::new(),
            next_sequence: 1,
        }
    }

    /// Where `id` sits, or `None` if this catalog never acquired it
    fn location(&self, id: CopyId) -> Option<Location> {
        if !self.ledger.contains_key(&id) {
            None
        } else if self.available.contains(&id) {
            Some(Location::Available)
        } else if self.checked_out.contains(&id) {
            Some(Location::CheckedOut)
        } else {
            Some(Location::Missing)
        }
    }

    /// Whether `id` is in either collection
    fn is_held(&self, id: CopyId) -> bool {
        self.available.contains(&id) || self.checked_out.contains(&id)
    }

    /// Copies in either collection, in acquisition order
    fn held(&self) -> impl Iterator<Item = &BookCopy> {
        self.ledger.values().filter(|copy| self.is_held(copy.id()))
    }

    /// Whether a copy belongs to `edition` under the configured match policy
    fn belongs_to(&self, copy: &BookCopy, edition: &Edition) -> bool {
        match self.config.match_policy {
            MatchPolicy::FullIdentity => copy.edition_ref() == edition,
            MatchPolicy::TitleAndYear => {
                copy.title() == edition.title() && copy.year() == edition.year()
            }
        }
    }

    /// Whether a copy is covered by keyword search
    fn in_search_scope(&self, id: CopyId) -> bool {
        match self.config.search_scope {
            SearchScope::Everything => self.is_held(id),
            SearchScope::AvailableOnly => self.available.contains(&id),
        }
    }

    /// Collections are disjoint and only hold acquired copies
    fn is_consistent(&self) -> bool {
        self.available.is_disjoint(&self.checked_out)
            && self.available.iter().chain(&self.checked_out).all(|id| self.ledger.contains_key(id))
    }

    /// Append an event to the bounded history and return the stamped record
    fn record(&mut self, event: CatalogEvent) -> CatalogRecord {
        debug_assert!(self.is_consistent(), "copy present in both available and checked out");

        let record = CatalogRecord { sequence: self.next_sequence, event };
        self.next_sequence = self.next_sequence.wrapping_add(1);

        self.history.push_back(record.clone());
        while self.history.len() > self.config.max_history {
            self.history.pop_front();
        }

        record
    }

    /// Resolve ids from a collection into copy handles
    fn snapshot(&self, ids: &BTreeSet<CopyId>) -> Vec<BookCopy> {
        ids.iter().filter_map(|id| self.ledger.get(id)).cloned().collect()
    }
}

/// A small library's collection of book copies.
///
/// Every copy the catalog acquires is either on the shelf (available), on
/// loan (checked out), or, once written off after being lost, in neither.
/// No copy is ever in both collections. All operations take `&self` and are
/// serialised by a single lock, so a catalog can be shared between threads.
pub struct Catalog {
    /// Collections, ledger and history
    state: Mutex<CatalogState>,
    /// Registered change observers
    observers: RwLock<Vec<Arc<dyn CatalogObserver>>>,
}

impl fmt::Debug for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Catalog")
            .field("state", &*self.state.lock())
            .field("observers_count", &self.observers.read().len())
            .finish()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    /// Create an empty catalog with the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(CatalogConfig::default())
    }

    /// Create an empty catalog with the given configuration
    #[must_use]
    pub fn with_config(config: CatalogConfig) -> Self {
        Self { state: Mutex::new(CatalogState::new(config)), observers: RwLock::new(Vec::new()) }
    }

    /// The configuration this catalog was built with
    #[must_use]
    pub fn config(&self) -> CatalogConfig {
        self.state.lock().config.clone()
    }

    /// Register an observer to be notified of catalog changes
    pub fn register_observer(&self, observer: Arc<dyn CatalogObserver>) {
        self.observers.write().push(observer);
    }

    /// Tell every observer about a committed change. Called without the state lock held.
    fn notify(&self, record: &CatalogRecord) {
        let observers = self.observers.read().clone();
        for observer in &observers {
            observer.on_event(record);
        }
    }

    /// Buy a new copy of `edition` and put it on the shelf
    pub fn acquire(&self, edition: &Edition) -> BookCopy {
        let copy = BookCopy::new(edition);
        let id = copy.id();

        let record = {
            let mut state = self.state.lock();
            state.ledger.insert(id, copy.clone());
            state.available.insert(id);
            state.record(CatalogEvent::Acquired(id))
        };

        debug!(copy = %id, %edition, "acquired");
        self.notify(&record);
        copy
    }

    /// Check out a copy that is on the shelf.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotAvailable` if the copy is not on the shelf,
    /// whether because it is already on loan, written off, or unknown.
    pub fn checkout(&self, copy: &BookCopy) -> Result<()> {
        let id = copy.id();

        let record = {
            let mut state = self.state.lock();
            if !state.available.remove(&id) {
                warn!(copy = %id, "checkout rejected: copy is not on the shelf");
                return Err(CatalogError::NotAvailable { copy: id });
            }
            state.checked_out.insert(id);
            state.record(CatalogEvent::CheckedOut(id))
        };

        debug!(copy = %id, "checked out");
        self.notify(&record);
        Ok(())
    }

    /// Return a checked-out copy to the shelf.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotCheckedOut` if the copy is not on loan.
    pub fn checkin(&self, copy: &BookCopy) -> Result<()> {
        let id = copy.id();

        let record = {
            let mut state = self.state.lock();
            if !state.checked_out.remove(&id) {
                warn!(copy = %id, "checkin rejected: copy is not on loan");
                return Err(CatalogError::NotCheckedOut { copy: id });
            }
            state.available.insert(id);
            state.record(CatalogEvent::CheckedIn(id))
        };

        debug!(copy = %id, "checked in");
        self.notify(&record);
        Ok(())
    }

    /// Whether the copy is on the shelf
    #[must_use]
    pub fn is_available(&self, copy: &BookCopy) -> bool {
        self.state.lock().available.contains(&copy.id())
    }

    /// Whether the copy is on loan
    #[must_use]
    pub fn is_checked_out(&self, copy: &BookCopy) -> bool {
        self.state.lock().checked_out.contains(&copy.id())
    }

    /// Where the copy sits, or `None` if this catalog never acquired it
    #[must_use]
    pub fn location(&self, copy: &BookCopy) -> Option<Location> {
        self.state.lock().location(copy.id())
    }

    /// Every copy of `edition` on the shelf or on loan, in acquisition order
    #[must_use]
    pub fn all_copies(&self, edition: &Edition) -> Vec<BookCopy> {
        let state = self.state.lock();
        state.held().filter(|copy| state.belongs_to(copy, edition)).cloned().collect()
    }

    /// Every copy of `edition` on the shelf, in acquisition order
    #[must_use]
    pub fn available_copies(&self, edition: &Edition) -> Vec<BookCopy> {
        let state = self.state.lock();
        state
            .ledger
            .values()
            .filter(|copy| state.available.contains(&copy.id()))
            .filter(|copy| state.belongs_to(copy, edition))
            .cloned()
            .collect()
    }

    /// Editions whose title is exactly `query` or which list `query` as an author.
    ///
    /// Results are distinct and ordered newest first; editions published in
    /// the same year keep the order in which their first copy was acquired.
    /// A query matching nothing yields an empty list.
    #[must_use]
    pub fn find(&self, query: &str) -> Vec<Edition> {
        self.search(query).into_iter().map(|hit| hit.edition).collect()
    }

    /// Like [`find`](Self::find), with shelf and total copy counts per edition
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<SearchHit> {
        let state = self.state.lock();

        let mut seen = HashSet::new();
        let mut editions: Vec<&Edition> = Vec::new();
        let mut counts: HashMap<&Edition, (usize, usize)> = HashMap::new();

        for copy in state.held() {
            let edition = copy.edition_ref();
            if !edition.matches_keyword(query) {
                continue;
            }

            let (available, total) = counts.entry(edition).or_default();
            *total = total.saturating_add(1);
            if state.available.contains(&copy.id()) {
                *available = available.saturating_add(1);
            }

            if state.in_search_scope(copy.id()) && seen.insert(edition) {
                editions.push(edition);
            }
        }

        let mut hits: Vec<SearchHit> = editions
            .into_iter()
            .map(|edition| {
                let (available, total) = counts.get(edition).copied().unwrap_or_default();
                SearchHit { edition: edition.clone(), available, total }
            })
            .collect();
        hits.sort_by_key(|hit| Reverse(hit.edition.year()));

        debug!(query, hits = hits.len(), "search");
        hits
    }

    /// Declare a copy lost.
    ///
    /// A copy can be lost from the shelf (stolen without being checked out),
    /// while on loan (never returned), or after it has been written off. Its
    /// place in the shelf and loan records is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::UnknownCopy` if this catalog never acquired the copy.
    pub fn lose(&self, copy: &BookCopy) -> Result<()> {
        let id = copy.id();

        let record = {
            let mut state = self.state.lock();
            let Some(location) = state.location(id) else {
                warn!(copy = %id, "lose rejected: copy unknown to this catalog");
                return Err(CatalogError::UnknownCopy { copy: id });
            };
            copy.set_condition(Condition::Lost);
            state.record(CatalogEvent::Lost { copy: id, location })
        };

        debug!(copy = %id, "declared lost");
        self.notify(&record);
        Ok(())
    }

    /// Remove a lost copy from the shelf and loan records.
    ///
    /// The copy stays known to the catalog, so it can still be declared lost
    /// again, but it can no longer be checked out or in. Writing off a copy
    /// that is already in neither collection does nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the copy was never acquired by this catalog (`CatalogError::UnknownCopy`)
    /// - the copy is not in `Condition::Lost` (`CatalogError::NotLost`)
    pub fn write_off(&self, copy: &BookCopy) -> Result<()> {
        let id = copy.id();

        let record = {
            let mut state = self.state.lock();
            let Some(location) = state.location(id) else {
                warn!(copy = %id, "write-off rejected: copy unknown to this catalog");
                return Err(CatalogError::UnknownCopy { copy: id });
            };
            if copy.condition() != Condition::Lost {
                warn!(copy = %id, "write-off rejected: copy is not lost");
                return Err(CatalogError::NotLost { copy: id });
            }
            match location {
                Location::Available => {
                    state.available.remove(&id);
                }
                Location::CheckedOut => {
                    state.checked_out.remove(&id);
                }
                Location::Missing => return Ok(()),
            }
            state.record(CatalogEvent::WrittenOff { copy: id, from: location })
        };

        debug!(copy = %id, "written off");
        self.notify(&record);
        Ok(())
    }

    /// Snapshot of the copies on the shelf, in acquisition order
    #[must_use]
    pub fn available(&self) -> Vec<BookCopy> {
        let state = self.state.lock();
        state.snapshot(&state.available)
    }

    /// Snapshot of the copies on loan, in acquisition order
    #[must_use]
    pub fn checked_out(&self) -> Vec<BookCopy> {
        let state = self.state.lock();
        state.snapshot(&state.checked_out)
    }

    /// Number of copies ever acquired, including written-off copies
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.lock().ledger.len()
    }

    /// Whether no copy has been acquired yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.lock().ledger.is_empty()
    }

    /// The retained change history, oldest first
    #[must_use]
    pub fn history(&self) -> Vec<CatalogRecord> {
        self.state.lock().history.iter().cloned().collect()
    }

    /// Per-edition summary of every copy the catalog has acquired
    #[must_use]
    pub fn report(&self) -> InventoryReport {
        let state = self.state.lock();
        let mut report = InventoryReport::default();
        for copy in state.ledger.values() {
            if let Some(location) = state.location(copy.id()) {
                report.add(copy, location);
            }
        }
        report
    }
}
