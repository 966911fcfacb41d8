pub mod config;
pub mod day;
pub mod grid;
pub mod reveal;
