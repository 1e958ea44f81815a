//! Built-in tools

pub mod date_time;

pub use date_time::DateTimeTool;
