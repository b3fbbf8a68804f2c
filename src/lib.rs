pub mod app;
pub mod color;
pub mod constants;
pub mod data;
pub mod state;
pub mod ui;
