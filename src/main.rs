use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use eframe::egui;

use rusty_wheels::app::RustyWheelsApp;
use rusty_wheels::constants::{APP_NAME, DEFAULT_DATA_PATH, MIN_WINDOW_SIZE, WINDOW_SIZE};
use rusty_wheels::data::loader;
use rusty_wheels::state::AppState;

#[derive(Parser, Debug)]
#[command(name = "rusty-wheels", version, about)]
struct Cli {
    /// Registration CSV to open.
    #[arg(default_value = DEFAULT_DATA_PATH)]
    data: PathBuf,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logger = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.debug {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    // The dataset is required before the window opens.
    let dataset = loader::load_file(&cli.data)
        .with_context(|| format!("loading registration data from {}", cli.data.display()))?;
    let state = AppState::new(dataset, cli.data);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(WINDOW_SIZE)
            .with_min_inner_size(MIN_WINDOW_SIZE),
        ..Default::default()
    };

    eframe::run_native(
        APP_NAME,
        options,
        Box::new(|_cc| Ok(Box::new(RustyWheelsApp::new(state)))),
    )
    .map_err(|e| anyhow!("running the dashboard window: {e}"))
}
