use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Category – vehicle class, derived from the manufacturer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "2W")]
    TwoWheeler,
    #[serde(rename = "4W")]
    FourWheeler,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::TwoWheeler, Category::FourWheeler];

    /// Short code used in the CSV file and the UI.
    pub fn code(self) -> &'static str {
        match self {
            Category::TwoWheeler => "2W",
            Category::FourWheeler => "4W",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.code() == s.trim())
            .ok_or_else(|| s.to_string())
    }
}

// ---------------------------------------------------------------------------
// Manufacturer – fixed vocabulary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Manufacturer {
    Maruti,
    Hyundai,
    Tata,
    Mahindra,
    Kia,
    Toyota,
    Honda,
    Hero,
    Bajaj,
    #[serde(rename = "TVS")]
    Tvs,
}

impl Manufacturer {
    pub const ALL: [Manufacturer; 10] = [
        Manufacturer::Maruti,
        Manufacturer::Hyundai,
        Manufacturer::Tata,
        Manufacturer::Mahindra,
        Manufacturer::Kia,
        Manufacturer::Toyota,
        Manufacturer::Honda,
        Manufacturer::Hero,
        Manufacturer::Bajaj,
        Manufacturer::Tvs,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Manufacturer::Maruti => "Maruti",
            Manufacturer::Hyundai => "Hyundai",
            Manufacturer::Tata => "Tata",
            Manufacturer::Mahindra => "Mahindra",
            Manufacturer::Kia => "Kia",
            Manufacturer::Toyota => "Toyota",
            Manufacturer::Honda => "Honda",
            Manufacturer::Hero => "Hero",
            Manufacturer::Bajaj => "Bajaj",
            Manufacturer::Tvs => "TVS",
        }
    }

    /// The category is a function of the manufacturer and cannot be set
    /// independently.
    pub fn category(self) -> Category {
        match self {
            Manufacturer::Hero | Manufacturer::Bajaj | Manufacturer::Tvs => Category::TwoWheeler,
            _ => Category::FourWheeler,
        }
    }
}

impl fmt::Display for Manufacturer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Manufacturer {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Manufacturer::ALL
            .into_iter()
            .find(|m| m.name() == s.trim())
            .ok_or_else(|| s.to_string())
    }
}

// ---------------------------------------------------------------------------
// Registration – one row of the source CSV
// ---------------------------------------------------------------------------

/// A single (date, manufacturer) observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registration {
    pub date: NaiveDate,
    pub manufacturer: Manufacturer,
    pub registrations: u32,
}

impl Registration {
    pub fn new(date: NaiveDate, manufacturer: Manufacturer, registrations: u32) -> Self {
        Self {
            date,
            manufacturer,
            registrations,
        }
    }

    pub fn category(&self) -> Category {
        self.manufacturer.category()
    }
}

/// CSV row shape shared by the loader and the sample generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationRow {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Manufacturer")]
    pub manufacturer: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Registrations")]
    pub registrations: i64,
}

impl From<&Registration> for RegistrationRow {
    fn from(r: &Registration) -> Self {
        Self {
            date: r.date.format(super::DATE_FORMAT).to_string(),
            manufacturer: r.manufacturer.name().to_string(),
            category: r.category().code().to_string(),
            registrations: i64::from(r.registrations),
        }
    }
}

// ---------------------------------------------------------------------------
// RegistrationDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full, read-only dataset. Built once per load and then only borrowed.
#[derive(Debug, Clone)]
pub struct RegistrationDataset {
    records: Vec<Registration>,
    date_bounds: Option<(NaiveDate, NaiveDate)>,
}

impl RegistrationDataset {
    pub fn from_records(records: Vec<Registration>) -> Self {
        let date_bounds = records.iter().fold(None, |acc, r| match acc {
            None => Some((r.date, r.date)),
            Some((lo, hi)) => Some((lo.min(r.date), hi.max(r.date))),
        });
        Self {
            records,
            date_bounds,
        }
    }

    /// All records in file order.
    pub fn records(&self) -> &[Registration] {
        &self.records
    }

    /// Earliest and latest observed date, `None` for an empty dataset.
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.date_bounds
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_category_is_derived_from_manufacturer() {
        assert_eq!(Manufacturer::Tata.category(), Category::FourWheeler);
        assert_eq!(Manufacturer::Tvs.category(), Category::TwoWheeler);
        let two_wheelers: Vec<_> = Manufacturer::ALL
            .into_iter()
            .filter(|m| m.category() == Category::TwoWheeler)
            .collect();
        assert_eq!(
            two_wheelers,
            vec![Manufacturer::Hero, Manufacturer::Bajaj, Manufacturer::Tvs]
        );
    }

    #[test]
    fn test_parse_names_and_codes() {
        assert_eq!("TVS".parse::<Manufacturer>(), Ok(Manufacturer::Tvs));
        assert_eq!(" Kia ".parse::<Manufacturer>(), Ok(Manufacturer::Kia));
        assert!("Ford".parse::<Manufacturer>().is_err());
        assert_eq!("4W".parse::<Category>(), Ok(Category::FourWheeler));
        assert!("3W".parse::<Category>().is_err());
    }

    #[test]
    fn test_date_bounds() {
        let ds = RegistrationDataset::from_records(vec![
            Registration::new(date(2023, 5, 1), Manufacturer::Kia, 10),
            Registration::new(date(2022, 1, 3), Manufacturer::Hero, 20),
            Registration::new(date(2024, 2, 9), Manufacturer::Tata, 30),
        ]);
        assert_eq!(ds.date_bounds(), Some((date(2022, 1, 3), date(2024, 2, 9))));
        assert_eq!(ds.len(), 3);
        assert!(RegistrationDataset::from_records(Vec::new())
            .date_bounds()
            .is_none());
    }

    #[test]
    fn test_row_from_registration() {
        let row = RegistrationRow::from(&Registration::new(date(2023, 1, 15), Manufacturer::Tvs, 7));
        assert_eq!(row.date, "2023-01-15");
        assert_eq!(row.manufacturer, "TVS");
        assert_eq!(row.category, "2W");
        assert_eq!(row.registrations, 7);
    }
}
