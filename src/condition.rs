use std::fmt;

use serde::{Deserialize, Serialize};

/// Physical condition of a book copy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    /// Copy is in good shape
    #[default]
    Good,
    /// Copy is damaged but still held
    Damaged,
    /// Copy has been declared lost
    Lost,
}

impl Condition {
    /// Get a human-readable description of the condition
    #[must_use]
    pub fn get_description(self) -> &'static str {
        match self {
            Self::Good => "Copy is in good condition",
            Self::Damaged => "Copy is damaged",
            Self::Lost => "Copy is marked as lost",
        }
    }

    /// Lowercase label used in listings
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Damaged => "damaged",
            Self::Lost => "lost",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
