use chrono::NaiveDate;

use super::model::{Category, Manufacturer, Registration};

// ---------------------------------------------------------------------------
// Date range
// ---------------------------------------------------------------------------

/// Inclusive `[start, end]` date window.
///
/// A range with `start > end` is accepted and contains no dates, so
/// filtering with it yields an empty result rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }
}

// ---------------------------------------------------------------------------
// Filter selection
// ---------------------------------------------------------------------------

/// What the user picked in the side panel. `None` means "All".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSelection {
    pub date_range: DateRange,
    pub category: Option<Category>,
    pub manufacturer: Option<Manufacturer>,
}

impl FilterSelection {
    /// Unrestricted selection over the given window.
    pub fn new(date_range: DateRange) -> Self {
        Self {
            date_range,
            category: None,
            manufacturer: None,
        }
    }

    pub fn with_category(mut self, category: Option<Category>) -> Self {
        self.category = category;
        self
    }

    pub fn with_manufacturer(mut self, manufacturer: Option<Manufacturer>) -> Self {
        self.manufacturer = manufacturer;
        self
    }

    /// Category and manufacturer constraints only; the date is ignored.
    ///
    /// Comparison periods re-apply just this part to the full dataset.
    pub fn matches_attributes(&self, record: &Registration) -> bool {
        self.category.map_or(true, |c| record.category() == c)
            && self.manufacturer.map_or(true, |m| record.manufacturer == m)
    }

    /// Full conjunctive predicate.
    pub fn matches(&self, record: &Registration) -> bool {
        self.date_range.contains(record.date) && self.matches_attributes(record)
    }
}

/// Records passing every active filter, in their original order.
pub fn filter(records: &[Registration], selection: &FilterSelection) -> Vec<Registration> {
    records
        .iter()
        .filter(|r| selection.matches(r))
        .copied()
        .collect()
}

/// Records inside `window` that pass the selection's category and
/// manufacturer filters. The selection's own date range is not applied.
pub fn filter_window(
    records: &[Registration],
    selection: &FilterSelection,
    window: DateRange,
) -> Vec<Registration> {
    records
        .iter()
        .filter(|r| window.contains(r.date) && selection.matches_attributes(r))
        .copied()
        .collect()
}
