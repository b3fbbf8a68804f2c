use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use super::filter::FilterSelection;
use super::metrics::GrowthSummary;
use super::model::{Category, Manufacturer, Registration};

// ---------------------------------------------------------------------------
// Grouped sums for the KPI strip and the charts
// ---------------------------------------------------------------------------

pub fn total_registrations(records: &[Registration]) -> u64 {
    records.iter().map(|r| u64::from(r.registrations)).sum()
}

/// Daily totals per category, each series ascending by date.
pub fn trend_by_category(records: &[Registration]) -> BTreeMap<Category, Vec<(NaiveDate, u64)>> {
    let mut grouped: BTreeMap<Category, BTreeMap<NaiveDate, u64>> = BTreeMap::new();
    for r in records {
        *grouped
            .entry(r.category())
            .or_default()
            .entry(r.date)
            .or_default() += u64::from(r.registrations);
    }
    grouped
        .into_iter()
        .map(|(cat, days)| (cat, days.into_iter().collect()))
        .collect()
}

/// The `n` manufacturers with the largest totals, returned smallest first
/// so a horizontal bar chart puts the leader on top.
pub fn top_manufacturers(records: &[Registration], n: usize) -> Vec<(Manufacturer, u64)> {
    let mut totals: BTreeMap<Manufacturer, u64> = BTreeMap::new();
    for r in records {
        *totals.entry(r.manufacturer).or_default() += u64::from(r.registrations);
    }

    let mut ranked: Vec<(Manufacturer, u64)> = totals.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.name().cmp(b.0.name())));
    ranked.truncate(n);
    ranked.reverse();
    ranked
}

// ---------------------------------------------------------------------------
// Exportable snapshot
// ---------------------------------------------------------------------------

/// Everything the dashboard shows except the raw rows, in a serialisable form.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub category: Option<Category>,
    pub manufacturer: Option<Manufacturer>,
    pub rows: usize,
    pub total_registrations: u64,
    pub growth: GrowthSummary,
    pub top_manufacturers: Vec<(Manufacturer, u64)>,
}

impl DashboardSummary {
    pub fn new(
        selection: &FilterSelection,
        filtered: &[Registration],
        growth: GrowthSummary,
        top_manufacturers: Vec<(Manufacturer, u64)>,
    ) -> Self {
        Self {
            start: selection.date_range.start,
            end: selection.date_range.end,
            category: selection.category,
            manufacturer: selection.manufacturer,
            rows: filtered.len(),
            total_registrations: total_registrations(filtered),
            growth,
            top_manufacturers,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
