use std::fmt;

use serde::Serialize;

use crate::{condition::Condition, copy::BookCopy, edition::Edition, events::Location};

/// Copy counts for one edition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportLine {
    /// The edition being summarised
    pub edition: Edition,
    /// Copies on the shelf
    pub available: usize,
    /// Copies on loan
    pub checked_out: usize,
    /// Copies written off the records
    pub missing: usize,
    /// Copies in damaged condition, wherever they are
    pub damaged: usize,
    /// Copies declared lost, wherever they are
    pub lost: usize,
}

impl ReportLine {
    /// An all-zero line for `edition`
    fn empty(edition: Edition) -> Self {
        Self { edition, available: 0, checked_out: 0, missing: 0, damaged: 0, lost: 0 }
    }

    /// Total number of copies ever acquired
    #[must_use]
    pub fn total(&self) -> usize {
        self.available.saturating_add(self.checked_out).saturating_add(self.missing)
    }
}

/// Per-edition inventory summary, in order of first acquisition
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InventoryReport {
    /// One line per distinct edition
    lines: Vec<ReportLine>,
}

impl InventoryReport {
    /// Count one copy found at `location`
    pub(crate) fn add(&mut self, copy: &BookCopy, location: Location) {
        let idx = if let Some(idx) =
            self.lines.iter().position(|line| line.edition == *copy.edition_ref())
        {
            idx
        } else {
            self.lines.push(ReportLine::empty(copy.edition()));
            self.lines.len().saturating_sub(1)
        };
        let Some(line) = self.lines.get_mut(idx) else {
            return;
        };

        match location {
            Location::Available => line.available = line.available.saturating_add(1),
            Location::CheckedOut => line.checked_out = line.checked_out.saturating_add(1),
            Location::Missing => line.missing = line.missing.saturating_add(1),
        }
        match copy.condition() {
            Condition::Good => {}
            Condition::Damaged => line.damaged = line.damaged.saturating_add(1),
            Condition::Lost => line.lost = line.lost.saturating_add(1),
        }
    }

    /// The report lines
    #[must_use]
    pub fn lines(&self) -> &[ReportLine] {
        &self.lines
    }

    /// Line for a specific edition, if the catalog holds any copy of it
    #[must_use]
    pub fn line_for(&self, edition: &Edition) -> Option<&ReportLine> {
        self.lines.iter().find(|line| line.edition == *edition)
    }
}

impl fmt::Display for InventoryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Inventory ===")?;
        if self.lines.is_empty() {
            return writeln!(f, "(no copies)");
        }
        writeln!(f, "{:>5} {:>5} {:>5} {:>5} {:>5}  edition", "avail", "out", "miss", "dmg", "lost")?;
        for line in &self.lines {
            writeln!(
                f,
                "{:>5} {:>5} {:>5} {:>5} {:>5}  {}",
                line.available, line.checked_out, line.missing, line.damaged, line.lost, line.edition
            )?;
        }
        Ok(())
    }
}
