use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, Result};

/// An edition of a book: the words and pictures, not the physical object.
///
/// An edition is identified by its title, its ordered author list and its
/// publication year. Case and author order are significant, so a book
/// written by "Fred" is a different edition than one written by "FRED".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawEdition")]
pub struct Edition {
    /// Title, never blank
    title: String,
    /// Authors in credited order, never empty
    authors: Vec<String>,
    /// Publication year in the Common Era
    year: u32,
}

/// Unvalidated wire form of an [`Edition`]
#[derive(Deserialize)]
struct RawEdition {
    /// Title as supplied
    title: String,
    /// Authors as supplied
    authors: Vec<String>,
    /// Year as supplied
    year: i32,
}

impl TryFrom<RawEdition> for Edition {
    type Error = CatalogError;

    fn try_from(raw: RawEdition) -> Result<Self> {
        Self::new(raw.title, raw.authors, raw.year)
    }
}

impl Edition {
    /// Make an edition.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `title` is empty or whitespace only
    /// - `authors` is empty, or any name in it is empty or whitespace only
    /// - `year` is negative
    pub fn new<T, I, A>(title: T, authors: I, year: i32) -> Result<Self>
    where
        T: Into<String>,
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(CatalogError::EmptyTitle);
        }

        let authors: Vec<String> = authors.into_iter().map(Into::into).collect();
        if authors.is_empty() {
            return Err(CatalogError::NoAuthors);
        }
        if let Some(index) = authors.iter().position(|name| name.trim().is_empty()) {
            return Err(CatalogError::BlankAuthor { index });
        }

        let year = u32::try_from(year).map_err(|_| CatalogError::NegativeYear { year })?;

        Ok(Self { title, authors, year })
    }

    /// The title of this edition
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The authors of this edition, in credited order
    #[must_use]
    pub fn authors(&self) -> &[String] {
        &self.authors
    }

    /// The year this edition was published
    #[must_use]
    pub fn year(&self) -> u32 {
        self.year
    }

    /// Whether `query` is exactly this edition's title or one of its authors
    #[must_use]
    pub fn matches_keyword(&self, query: &str) -> bool {
        self.title == query || self.authors.iter().any(|author| author == query)
    }
}

impl fmt::Display for Edition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" by {} ({})", self.title, self.authors.join(", "), self.year)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_accessors_return_constructor_values() {
        let edition = Edition::new(
            "This Test Is Just An Example",
            ["You Should", "Replace It", "With Your Own Tests"],
            1990,
        )
        .unwrap_or_else(|e| panic!("valid edition rejected: {e}"));

        assert_eq!(edition.title(), "This Test Is Just An Example");
        assert_eq!(edition.authors(), ["You Should", "Replace It", "With Your Own Tests"]);
        assert_eq!(edition.year(), 1990);
    }

    #[test]
    fn test_year_zero_is_valid() {
        assert!(Edition::new("Anonymous Scroll", ["Unknown"], 0).is_ok());
    }

    #[test]
    fn test_invalid_inputs_are_rejected() {
        let no_authors: [&str; 0] = [];
        let cases = [
            Edition::new("", ["Herbert"], 1965),
            Edition::new("   \t", ["Herbert"], 1965),
            Edition::new("Dune", no_authors, 1965),
            Edition::new("Dune", ["Herbert", "  "], 1965),
            Edition::new("Dune", ["Herbert"], -1),
        ];

        for result in cases {
            let err = result.err();
            assert!(
                matches!(err.as_ref().map(CatalogError::kind), Some(ErrorKind::InvalidArgument)),
                "expected InvalidArgument, got {err:?}"
            );
        }
    }

    #[test]
    fn test_blank_author_reports_position() {
        let result = Edition::new("Dune", ["Herbert", "", "Anderson"], 1965);
        assert!(matches!(result, Err(CatalogError::BlankAuthor { index: 1 })));
    }

    #[test]
    fn test_negative_year_reports_value() {
        let result = Edition::new("Dune", ["Herbert"], -44);
        assert!(matches!(result, Err(CatalogError::NegativeYear { year: -44 })));
    }

    #[test]
    fn test_equality_uses_every_field() -> Result<()> {
        let base = Edition::new("thinking", ["daniel", "rob"], 1990)?;

        assert_eq!(base, Edition::new("thinking", ["daniel", "rob"], 1990)?);
        assert_ne!(base, Edition::new("Thinking", ["daniel", "rob"], 1990)?);
        assert_ne!(base, Edition::new("thinking", ["Daniel", "rob"], 1990)?);
        assert_ne!(base, Edition::new("thinking", ["rob", "daniel"], 1990)?);
        assert_ne!(base, Edition::new("thinking", ["daniel", "rob"], 1991)?);
        Ok(())
    }

    #[test]
    fn test_case_sensitive_titles() -> Result<()> {
        let fred = Edition::new("Fred", ["A"], 2000)?;
        let shouting = Edition::new("FRED", ["A"], 2000)?;
        assert_ne!(fred, shouting);
        Ok(())
    }

    #[test]
    fn test_equal_editions_hash_together() -> Result<()> {
        let mut set = HashSet::new();
        set.insert(Edition::new("Dune", ["Herbert"], 1965)?);
        set.insert(Edition::new("Dune", ["Herbert"], 1965)?);
        set.insert(Edition::new("Dune", ["Herbert"], 1984)?);
        assert_eq!(set.len(), 2);
        Ok(())
    }

    #[test]
    fn test_display_is_deterministic() -> Result<()> {
        let edition = Edition::new("Good Omens", ["Pratchett", "Gaiman"], 1990)?;
        assert_eq!(edition.to_string(), "\"Good Omens\" by Pratchett, Gaiman (1990)");
        Ok(())
    }

    #[test]
    fn test_keyword_matching_is_exact() -> Result<()> {
        let edition = Edition::new("Moby Dick", ["Melville"], 1851)?;
        assert!(edition.matches_keyword("Moby Dick"));
        assert!(edition.matches_keyword("Melville"));
        assert!(!edition.matches_keyword("Moby"));
        assert!(!edition.matches_keyword("melville"));
        assert!(!edition.matches_keyword(""));
        Ok(())
    }

    #[test]
    fn test_deserialize_validates() {
        let good: std::result::Result<Edition, _> =
            serde_json::from_str(r#"{"title":"Dune","authors":["Herbert"],"year":1965}"#);
        assert!(good.is_ok());

        let bad: std::result::Result<Edition, _> =
            serde_json::from_str(r#"{"title":" ","authors":["Herbert"],"year":1965}"#);
        assert!(bad.is_err());

        let negative: std::result::Result<Edition, _> =
            serde_json::from_str(r#"{"title":"Dune","authors":["Herbert"],"year":-3}"#);
        assert!(negative.is_err());
    }
}
