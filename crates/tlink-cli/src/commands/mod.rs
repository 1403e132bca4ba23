//! CLI command implementations

pub mod check;
pub mod completions;
pub mod compose;
pub mod config;
pub mod table;
