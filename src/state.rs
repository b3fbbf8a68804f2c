use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::NaiveDate;

use crate::color::Palette;
use crate::constants::TOP_MANUFACTURERS;
use crate::data::aggregate::{
    top_manufacturers, total_registrations, trend_by_category, DashboardSummary,
};
use crate::data::filter::{filter, DateRange, FilterSelection};
use crate::data::metrics::{compute_growth, GrowthSummary};
use crate::data::model::{Category, Manufacturer, Registration, RegistrationDataset};

// ---------------------------------------------------------------------------
// Derived view
// ---------------------------------------------------------------------------

/// Everything computed from the dataset for one filter selection.
/// Rebuilt from scratch after every change, never patched in place.
#[derive(Debug, Clone)]
pub struct DashboardView {
    pub filtered: Vec<Registration>,
    pub total: u64,
    pub growth: GrowthSummary,
    pub trend: BTreeMap<Category, Vec<(NaiveDate, u64)>>,
    pub top_manufacturers: Vec<(Manufacturer, u64)>,
}

impl DashboardView {
    pub fn compute(dataset: &RegistrationDataset, selection: &FilterSelection) -> Self {
        let filtered = filter(dataset.records(), selection);
        let growth = compute_growth(dataset.records(), &filtered, selection);
        Self {
            total: total_registrations(&filtered),
            trend: trend_by_category(&filtered),
            top_manufacturers: top_manufacturers(&filtered, TOP_MANUFACTURERS),
            growth,
            filtered,
        }
    }

    pub fn summary(&self, selection: &FilterSelection) -> DashboardSummary {
        DashboardSummary::new(
            selection,
            &self.filtered,
            self.growth,
            self.top_manufacturers.clone(),
        )
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset. Read-only; replaced wholesale on File → Open.
    pub dataset: RegistrationDataset,

    /// Where `dataset` came from.
    pub source: PathBuf,

    /// Current side-panel selection.
    pub selection: FilterSelection,

    /// Derived from `dataset` and `selection`.
    pub view: DashboardView,

    pub palette: Palette,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(dataset: RegistrationDataset, source: PathBuf) -> Self {
        let selection = default_selection(&dataset);
        let view = DashboardView::compute(&dataset, &selection);
        Self {
            dataset,
            source,
            selection,
            view,
            palette: Palette::default(),
            status_message: None,
        }
    }

    /// Ingest a newly loaded dataset and reset the filters to cover it.
    pub fn set_dataset(&mut self, dataset: RegistrationDataset, source: PathBuf) {
        self.selection = default_selection(&dataset);
        self.dataset = dataset;
        self.source = source;
        self.status_message = None;
        self.refilter();
    }

    /// Recompute the derived view after a selection change.
    pub fn refilter(&mut self) {
        self.view = DashboardView::compute(&self.dataset, &self.selection);
        log::debug!(
            "Selection {:?} → {} rows, YoY {}, QoQ {}",
            self.selection,
            self.view.filtered.len(),
            self.view.growth.yoy,
            self.view.growth.qoq
        );
    }

    pub fn set_start(&mut self, start: NaiveDate) {
        self.selection.date_range.start = start;
        self.refilter();
    }

    pub fn set_end(&mut self, end: NaiveDate) {
        self.selection.date_range.end = end;
        self.refilter();
    }

    pub fn set_category(&mut self, category: Option<Category>) {
        self.selection.category = category;
        self.refilter();
    }

    pub fn set_manufacturer(&mut self, manufacturer: Option<Manufacturer>) {
        self.selection.manufacturer = manufacturer;
        self.refilter();
    }

    pub fn reset_filters(&mut self) {
        self.selection = default_selection(&self.dataset);
        self.refilter();
    }

    /// Bounds for the date pickers.
    pub fn date_bounds(&self) -> (NaiveDate, NaiveDate) {
        let r = default_selection(&self.dataset).date_range;
        (r.start, r.end)
    }
}

/// The whole observed date span with no category or manufacturer restriction.
pub fn default_selection(dataset: &RegistrationDataset) -> FilterSelection {
    let (start, end) = dataset
        .date_bounds()
        .unwrap_or((NaiveDate::default(), NaiveDate::default()));
    FilterSelection::new(DateRange::new(start, end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::metrics::Growth;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn state() -> AppState {
        let dataset = RegistrationDataset::from_records(vec![
            Registration::new(date(2022, 1, 15), Manufacturer::Tata, 50),
            Registration::new(date(2023, 1, 15), Manufacturer::Tata, 100),
            Registration::new(date(2023, 1, 20), Manufacturer::Hero, 300),
        ]);
        AppState::new(dataset, PathBuf::from("data.csv"))
    }

    #[test]
    fn test_initial_selection_covers_dataset() {
        let s = state();
        assert_eq!(s.date_bounds(), (date(2022, 1, 15), date(2023, 1, 20)));
        assert_eq!(s.view.filtered.len(), 3);
        assert_eq!(s.view.total, 450);
    }

    #[test]
    fn test_selection_changes_recompute_view() {
        let mut s = state();
        s.set_start(date(2023, 1, 1));
        s.set_end(date(2023, 1, 31));
        s.set_manufacturer(Some(Manufacturer::Tata));
        assert_eq!(s.view.total, 100);
        assert_eq!(s.view.growth.yoy, Growth::Percent(100.0));
        assert_eq!(s.view.top_manufacturers, vec![(Manufacturer::Tata, 100)]);

        s.set_category(Some(Category::TwoWheeler));
        assert!(s.view.filtered.is_empty());
        assert_eq!(s.view.growth.qoq, Growth::NotApplicable);

        s.reset_filters();
        assert_eq!(s.view.filtered.len(), 3);
        assert_eq!(s.selection.category, None);
    }

    #[test]
    fn test_inverted_range_gives_empty_view() {
        let mut s = state();
        s.set_start(date(2023, 6, 1));
        s.set_end(date(2023, 1, 1));
        assert!(s.view.filtered.is_empty());
        assert!(s.view.trend.is_empty());
        assert_eq!(s.view.growth.qoq, Growth::NotApplicable);
    }
}
