// End-to-end: CSV on disk → dataset → filter → growth metrics → charts.

use std::io::Write;
use std::path::PathBuf;

use chrono::NaiveDate;
use rusty_wheels::data::aggregate::{top_manufacturers, total_registrations};
use rusty_wheels::data::filter::{filter, DateRange, FilterSelection};
use rusty_wheels::data::loader::{load_file, LoadError};
use rusty_wheels::data::metrics::{compute_growth, Growth};
use rusty_wheels::data::model::{Category, Manufacturer, RegistrationDataset};
use rusty_wheels::data::period::Quarter;
use rusty_wheels::state::AppState;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn dataset() -> RegistrationDataset {
    load_file(&fixture("registrations.csv")).unwrap()
}

fn selection(start: NaiveDate, end: NaiveDate) -> FilterSelection {
    FilterSelection::new(DateRange::new(start, end))
}

#[test]
fn loads_fixture_with_bounds() {
    let ds = dataset();
    assert_eq!(ds.len(), 11);
    assert_eq!(ds.date_bounds(), Some((date(2022, 1, 15), date(2024, 3, 10))));
}

#[test]
fn january_tata_yoy_doubles() {
    let ds = dataset();
    let sel = selection(date(2023, 1, 1), date(2023, 1, 31))
        .with_manufacturer(Some(Manufacturer::Tata));
    let filtered = filter(ds.records(), &sel);
    assert_eq!(total_registrations(&filtered), 100);

    let growth = compute_growth(ds.records(), &filtered, &sel);
    assert_eq!(growth.yoy, Growth::Percent(100.0));
    // 2023-Q1 Tata = 100 against 2022-Q4 with no rows.
    assert_eq!(growth.qoq, Growth::NotApplicable);
}

#[test]
fn q1_selection_compares_with_previous_year_q4() {
    let ds = dataset();
    let sel = selection(date(2024, 1, 1), date(2024, 3, 31));
    let filtered = filter(ds.records(), &sel);
    let growth = compute_growth(ds.records(), &filtered, &sel);

    assert_eq!(growth.quarter, Quarter::new(2024, 1).unwrap());
    // 2024-Q1: 160 + 140 + 310 = 610; 2023-Q4: 280 + 150 = 430.
    let expected = (610.0 - 430.0) / 430.0 * 100.0;
    assert_eq!(growth.qoq, Growth::Percent(expected));
}

#[test]
fn leap_day_window_shifts_to_feb_28() {
    let ds = dataset();
    let sel = selection(date(2024, 2, 29), date(2024, 2, 29))
        .with_category(Some(Category::FourWheeler));
    let filtered = filter(ds.records(), &sel);
    let growth = compute_growth(ds.records(), &filtered, &sel);
    // 2024-02-29 Kia 140 against 2023-02-28 Kia 90.
    assert_eq!(growth.yoy, Growth::Percent((140.0 - 90.0) / 90.0 * 100.0));
}

#[test]
fn excluded_manufacturer_gives_empty_table_and_na() {
    let ds = dataset();
    let sel = selection(date(2023, 1, 1), date(2023, 12, 31))
        .with_manufacturer(Some(Manufacturer::Maruti));
    let filtered = filter(ds.records(), &sel);
    assert!(filtered.is_empty());

    let growth = compute_growth(ds.records(), &filtered, &sel);
    assert_eq!(growth.qoq, Growth::NotApplicable);
    assert_eq!(growth.yoy, Growth::NotApplicable);
    assert!(top_manufacturers(&filtered, 10).is_empty());
}

#[test]
fn app_state_summary_exports_json() {
    let mut state = AppState::new(dataset(), fixture("registrations.csv"));
    state.set_start(date(2023, 1, 1));
    state.set_end(date(2023, 1, 31));

    let json = state.view.summary(&state.selection).to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["total_registrations"], 430);
    assert_eq!(value["rows"], 2);
    assert_eq!(value["top_manufacturers"][1][0], "Hero");
}

#[test]
fn malformed_file_is_rejected() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "Date,Manufacturer,Category,Registrations").unwrap();
    writeln!(file, "2023-01-15,Tata,2W,100").unwrap();
    file.flush().unwrap();

    let err = load_file(file.path()).unwrap_err();
    assert!(matches!(err, LoadError::CategoryMismatch { row: 1, .. }));
}

#[test]
fn empty_file_is_rejected() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "Date,Manufacturer,Category,Registrations").unwrap();
    file.flush().unwrap();
    assert!(matches!(load_file(file.path()), Err(LoadError::Empty)));
}
