//! Configuration for a [`Catalog`](crate::Catalog).
//!
//! The library never reads the environment. Callers build a
//! [`CatalogConfig`] directly or parse one from JSON.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, Result};

/// How `all_copies` and `available_copies` decide a copy belongs to an edition
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPolicy {
    /// Title, authors and year must all be equal
    #[default]
    FullIdentity,
    /// Only title and year are compared; authors are ignored
    TitleAndYear,
}

/// Which collections `find` and `search` look through
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchScope {
    /// Copies on the shelf and copies on loan
    #[default]
    Everything,
    /// Only copies on the shelf
    AvailableOnly,
}

/// Catalog behaviour switches
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    /// Edition matching rule for copy lookups
    pub match_policy: MatchPolicy,
    /// Collections covered by keyword search
    pub search_scope: SearchScope,
    /// Maximum number of history records kept
    pub max_history: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            match_policy: MatchPolicy::default(),
            search_scope: SearchScope::default(),
            max_history: 100,
        }
    }
}

impl CatalogConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Config` if the text is not valid JSON or names
    /// an unknown field or value.
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| CatalogError::Config { message: e.to_string() })
    }

    /// Load a configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Config` if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| CatalogError::Config {
            message: format!("failed to read {}: {e}", path.display()),
        })?;
        Self::from_json_str(&text)
    }
}
