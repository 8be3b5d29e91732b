pub mod cli;
pub mod config;
pub mod models;
pub mod prayer_times;
pub mod tui;
pub mod utils;
