use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::{Datelike, NaiveDate};
use clap::Parser;

use rusty_wheels::data::model::{Category, Manufacturer, Registration, RegistrationRow};

/// Write a synthetic vehicle-registration CSV.
#[derive(Parser, Debug)]
#[command(name = "generate_sample", about)]
struct Cli {
    /// Output file.
    #[arg(short, long, default_value = "data.csv")]
    output: PathBuf,

    /// PRNG seed; the same seed always produces the same file.
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// First day (inclusive).
    #[arg(long, default_value = "2022-01-01")]
    start: NaiveDate,

    /// Last day (inclusive).
    #[arg(long, default_value = "2024-12-31")]
    end: NaiveDate,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    /// Uniform integer in `[lo, hi)`.
    fn range(&mut self, lo: i64, hi: i64) -> i64 {
        let span = (hi - lo) as u64;
        lo + (self.next_u64() % span) as i64
    }

    /// Partial Fisher–Yates: `k` distinct items in random order.
    fn choose<T: Copy>(&mut self, items: &[T], k: usize) -> Vec<T> {
        let mut pool = items.to_vec();
        for i in 0..k.min(pool.len()) {
            let j = self.range(i as i64, pool.len() as i64) as usize;
            pool.swap(i, j);
        }
        pool.truncate(k);
        pool
    }
}

/// Base level + yearly sine seasonality + uniform noise, floored at zero.
fn daily_registrations(date: NaiveDate, manufacturer: Manufacturer, rng: &mut SimpleRng) -> u32 {
    let base: i64 = match manufacturer.category() {
        Category::FourWheeler => 150,
        Category::TwoWheeler => 300,
    };
    let phase = 2.0 * std::f64::consts::PI * f64::from(date.ordinal()) / 365.0;
    let seasonality = (50.0 * phase.sin()) as i64;
    let noise = rng.range(-20, 20);
    (base + seasonality + noise).max(0) as u32
}

fn generate(start: NaiveDate, end: NaiveDate, seed: u64) -> Vec<Registration> {
    let mut rng = SimpleRng::new(seed);
    let n_all = Manufacturer::ALL.len() as i64;
    let mut rows = Vec::new();

    for date in start.iter_days().take_while(|d| *d <= end) {
        let k = rng.range(5, n_all + 1) as usize;
        for manufacturer in rng.choose(&Manufacturer::ALL, k) {
            let registrations = daily_registrations(date, manufacturer, &mut rng);
            rows.push(Registration::new(date, manufacturer, registrations));
        }
    }
    rows
}

fn write_csv<W: Write>(out: W, rows: &[Registration]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    for r in rows {
        writer.serialize(RegistrationRow::from(r))?;
    }
    writer.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.start > cli.end {
        bail!("--start {} is after --end {}", cli.start, cli.end);
    }

    let rows = generate(cli.start, cli.end, cli.seed);
    let file = std::fs::File::create(&cli.output)
        .with_context(|| format!("creating {}", cli.output.display()))?;
    write_csv(file, &rows).with_context(|| format!("writing {}", cli.output.display()))?;

    log::info!("seed {} produced {} rows", cli.seed, rows.len());
    println!(
        "Wrote {} registration rows ({} to {}) to {}",
        rows.len(),
        cli.start,
        cli.end,
        cli.output.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusty_wheels::data::loader::load_reader;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_same_seed_same_rows() {
        let a = generate(date(2022, 1, 1), date(2022, 3, 31), 42);
        let b = generate(date(2022, 1, 1), date(2022, 3, 31), 42);
        assert_eq!(a, b);
        assert_ne!(a, generate(date(2022, 1, 1), date(2022, 3, 31), 7));
    }

    #[test]
    fn test_between_five_and_ten_distinct_makers_per_day() {
        let rows = generate(date(2023, 1, 1), date(2023, 1, 31), 42);
        for day in date(2023, 1, 1).iter_days().take(31) {
            let mut makers: Vec<_> = rows
                .iter()
                .filter(|r| r.date == day)
                .map(|r| r.manufacturer)
                .collect();
            let n = makers.len();
            makers.sort();
            makers.dedup();
            assert_eq!(makers.len(), n);
            assert!((5..=10).contains(&n), "{day}: {n} manufacturers");
        }
    }

    #[test]
    fn test_counts_stay_within_seasonal_band() {
        for r in generate(date(2022, 1, 1), date(2022, 12, 31), 1) {
            let (lo, hi) = match r.category() {
                Category::FourWheeler => (150 - 50 - 20, 150 + 50 + 20),
                Category::TwoWheeler => (300 - 50 - 20, 300 + 50 + 20),
            };
            assert!((lo..hi).contains(&r.registrations), "{r:?}");
        }
    }

    #[test]
    fn test_written_csv_loads_back() {
        let rows = generate(date(2024, 2, 27), date(2024, 3, 2), 42);
        let mut buf = Vec::new();
        write_csv(&mut buf, &rows).unwrap();
        assert!(buf.starts_with(b"Date,Manufacturer,Category,Registrations\n"));

        let dataset = load_reader(buf.as_slice()).unwrap();
        assert_eq!(dataset.records(), rows.as_slice());
    }
}
