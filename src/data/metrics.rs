use std::fmt;

use serde::Serialize;

use super::aggregate::total_registrations;
use super::filter::{filter_window, DateRange, FilterSelection};
use super::model::Registration;
use super::period::{shift_back_one_year, Quarter};

// ---------------------------------------------------------------------------
// Growth – a percentage or an explicit "not applicable"
// ---------------------------------------------------------------------------

/// Result of a period comparison. Never an error: a missing or zero
/// baseline is `NotApplicable`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Growth {
    Percent(f64),
    NotApplicable,
}

impl Growth {
    pub fn percent(self) -> Option<f64> {
        match self {
            Growth::Percent(p) => Some(p),
            Growth::NotApplicable => None,
        }
    }

    pub fn is_applicable(self) -> bool {
        matches!(self, Growth::Percent(_))
    }
}

impl fmt::Display for Growth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Growth::Percent(p) => write!(f, "{p:+.2}%"),
            Growth::NotApplicable => f.write_str("N/A"),
        }
    }
}

/// `(current - previous) / previous * 100`, or `NotApplicable` when the
/// baseline is missing or zero.
pub fn calculate_growth(current: u64, previous: Option<u64>) -> Growth {
    match previous {
        Some(prev) if prev != 0 => {
            let (current, prev) = (current as f64, prev as f64);
            Growth::Percent((current - prev) / prev * 100.0)
        }
        _ => Growth::NotApplicable,
    }
}

// ---------------------------------------------------------------------------
// Year over year
// ---------------------------------------------------------------------------

/// The selection window shifted back one calendar year.
pub fn yoy_window(range: DateRange) -> DateRange {
    DateRange::new(shift_back_one_year(range.start), shift_back_one_year(range.end))
}

/// Compare the filtered total against the same window one year earlier.
///
/// The comparison rows come from the full dataset with only the category
/// and manufacturer filters re-applied.
pub fn yoy_growth(
    all: &[Registration],
    filtered: &[Registration],
    selection: &FilterSelection,
) -> Growth {
    let current = total_registrations(filtered);
    let window = yoy_window(selection.date_range);
    let previous = total_registrations(&filter_window(all, selection, window));
    log::debug!(
        "YoY: current={current} previous={previous} window={}..={}",
        window.start,
        window.end
    );
    calculate_growth(current, Some(previous))
}

// ---------------------------------------------------------------------------
// Quarter over quarter
// ---------------------------------------------------------------------------

/// Compare the quarter containing the selection's end date with the one
/// before it. `NotApplicable` outright when `filtered` is empty.
pub fn qoq_growth(
    all: &[Registration],
    filtered: &[Registration],
    selection: &FilterSelection,
) -> Growth {
    if filtered.is_empty() {
        return Growth::NotApplicable;
    }

    let quarter = Quarter::containing(selection.date_range.end);
    let current: u64 = filtered
        .iter()
        .filter(|r| quarter.contains(r.date))
        .map(|r| u64::from(r.registrations))
        .sum();

    let previous_quarter = quarter.pred();
    let previous =
        total_registrations(&filter_window(all, selection, previous_quarter.date_range()));
    log::debug!("QoQ: {quarter}={current} {previous_quarter}={previous}");
    calculate_growth(current, Some(previous))
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GrowthSummary {
    pub yoy: Growth,
    pub qoq: Growth,
    /// Quarter the QoQ figure refers to.
    pub quarter: Quarter,
}

pub fn compute_growth(
    all: &[Registration],
    filtered: &[Registration],
    selection: &FilterSelection,
) -> GrowthSummary {
    GrowthSummary {
        yoy: yoy_growth(all, filtered, selection),
        qoq: qoq_growth(all, filtered, selection),
        quarter: Quarter::containing(selection.date_range.end),
    }
}
