/// Data layer: core types, loading, filtering and metrics.
///
/// Architecture:
/// ```text
///   data.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse rows → RegistrationDataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  date range ∧ category ∧ manufacturer → Vec<Registration>
///   └──────────┘
///        │
///        ├──────────────┐
///        ▼              ▼
///   ┌──────────┐   ┌───────────┐
///   │ metrics   │   │ aggregate  │  totals, trend series, top-N ranking
///   └──────────┘   └───────────┘
///   YoY / QoQ, comparison windows from `period`
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod metrics;
pub mod model;
pub mod period;

/// Date format used by the CSV file.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
