//! Error types for catalog operations.

use thiserror::Error;

use crate::copy::CopyId;

/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Broad classification of a [`CatalogError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The caller passed a malformed value or a copy this catalog does not know.
    InvalidArgument,
    /// The operation is not allowed from the copy's current location or condition.
    InvalidState,
    /// Configuration input could not be read or parsed.
    Configuration,
}

/// Errors that can occur during catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Edition title was empty or whitespace only.
    #[error("edition title must contain at least one non-space character")]
    EmptyTitle,

    /// Edition had no authors.
    #[error("edition must have at least one author")]
    NoAuthors,

    /// An author name was empty or whitespace only.
    #[error("author at position {index} must contain at least one non-space character")]
    BlankAuthor {
        /// Position of the offending name in the author list.
        index: usize,
    },

    /// Publication year was before the Common Era.
    #[error("publication year must be non-negative, got {year}")]
    NegativeYear {
        /// The rejected year.
        year: i32,
    },

    /// The copy was never produced by this catalog's `acquire`.
    #[error("{copy} was not acquired by this catalog")]
    UnknownCopy {
        /// The unrecognised copy.
        copy: CopyId,
    },

    /// Checkout attempted on a copy that is not on the shelf.
    #[error("{copy} is not available for checkout")]
    NotAvailable {
        /// The copy that could not be checked out.
        copy: CopyId,
    },

    /// Checkin attempted on a copy that is not on loan.
    #[error("{copy} is not checked out")]
    NotCheckedOut {
        /// The copy that could not be checked in.
        copy: CopyId,
    },

    /// Write-off attempted on a copy that has not been declared lost.
    #[error("{copy} must be declared lost before it can be written off")]
    NotLost {
        /// The copy that could not be written off.
        copy: CopyId,
    },

    /// Catalog configuration was invalid.
    #[error("invalid catalog configuration: {message}")]
    Config {
        /// Description of the configuration failure.
        message: String,
    },
}

impl CatalogError {
    /// Classify this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyTitle
            | Self::NoAuthors
            | Self::BlankAuthor { .. }
            | Self::NegativeYear { .. }
            | Self::UnknownCopy { .. } => ErrorKind::InvalidArgument,
            Self::NotAvailable { .. } | Self::NotCheckedOut { .. } | Self::NotLost { .. } => {
                ErrorKind::InvalidState
            }
            Self::Config { .. } => ErrorKind::Configuration,
        }
    }
}
