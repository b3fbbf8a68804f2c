/// Application display name.
pub const APP_NAME: &str = "Rusty Wheels – Vehicle Registrations";

/// File loaded when no path is given on the command line.
pub const DEFAULT_DATA_PATH: &str = "data.csv";

/// Bars shown in the manufacturer ranking chart.
pub const TOP_MANUFACTURERS: usize = 10;

/// Initial and minimum window size in logical points.
pub const WINDOW_SIZE: [f32; 2] = [1280.0, 860.0];
pub const MIN_WINDOW_SIZE: [f32; 2] = [720.0, 480.0];

/// Row height of the filtered-data table.
pub const TABLE_ROW_HEIGHT: f32 = 18.0;
