//! Library components for the `heatwatch` CLI.

pub mod args;
pub mod config;
pub mod logging;
pub mod render;
pub mod session;
