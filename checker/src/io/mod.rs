//! Side-effecting helpers: configuration files and verdict reports.

pub mod config;
pub mod report;
