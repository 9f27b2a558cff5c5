//! CLI command implementations.

pub mod menu;
pub mod report;
pub mod seed;
