//! Physical copies of an edition.
//!
//! A [`BookCopy`] is a shared handle: cloning it yields another handle to the
//! same physical copy. Two copies made from value-equal editions are still
//! distinct, and equality and hashing follow the copy's [`CopyId`].

use std::{
    fmt,
    hash::{Hash, Hasher},
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::{condition::Condition, edition::Edition};

/// Source of process-unique copy identifiers
static NEXT_COPY_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a physical copy, unique within the process
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
pub struct CopyId(u64);

impl CopyId {
    /// Allocate the next identifier
    fn next() -> Self {
        Self(NEXT_COPY_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for CopyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "copy-{}", self.0)
    }
}

/// State shared by every handle to one copy
#[derive(Debug)]
struct CopyInner {
    /// Identity of this copy
    id: CopyId,
    /// Edition fields captured when the copy was made
    edition: Edition,
    /// Current physical condition
    condition: Mutex<Condition>,
}

/// A particular copy of an edition held in a library's collection.
#[derive(Clone)]
pub struct BookCopy {
    /// Shared copy state
    inner: Arc<CopyInner>,
}

impl BookCopy {
    /// Make a new copy of `edition`, initially in good condition.
    #[must_use]
    pub fn new(edition: &Edition) -> Self {
        Self {
            inner: Arc::new(CopyInner {
                id: CopyId::next(),
                edition: edition.clone(),
                condition: Mutex::new(Condition::Good),
            }),
        }
    }

    /// Identity of this copy
    #[must_use]
    pub fn id(&self) -> CopyId {
        self.inner.id
    }

    /// The edition this is a copy of.
    ///
    /// The returned value is rebuilt from the fields captured at creation and
    /// is equal to the edition the copy was made from.
    #[must_use]
    pub fn edition(&self) -> Edition {
        self.inner.edition.clone()
    }

    /// Title of the copied edition
    #[must_use]
    pub fn title(&self) -> &str {
        self.inner.edition.title()
    }

    /// Authors of the copied edition
    #[must_use]
    pub fn authors(&self) -> &[String] {
        self.inner.edition.authors()
    }

    /// Publication year of the copied edition
    #[must_use]
    pub fn year(&self) -> u32 {
        self.inner.edition.year()
    }

    /// Borrow the captured edition without cloning it
    pub(crate) fn edition_ref(&self) -> &Edition {
        &self.inner.edition
    }

    /// Current condition of this copy
    #[must_use]
    pub fn condition(&self) -> Condition {
        *self.inner.condition.lock()
    }

    /// Set the condition of this copy, typically after a librarian inspects
    /// a returned copy.
    pub fn set_condition(&self, condition: Condition) {
        *self.inner.condition.lock() = condition;
    }
}

impl PartialEq for BookCopy {
    fn eq(&self, other: &Self) -> bool {
        self.inner.id == other.inner.id
    }
}

impl Eq for BookCopy {}

impl Hash for BookCopy {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.id.hash(state);
    }
}

impl fmt::Debug for BookCopy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BookCopy")
            .field("id", &self.inner.id)
            .field("edition", &self.inner.edition)
            .field("condition", &self.condition())
            .finish()
    }
}

impl fmt::Display for BookCopy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.condition(), self.inner.edition)
    }
}
