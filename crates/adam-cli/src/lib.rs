//! CLI library components for the ADaM metadata resolver.

pub mod cli;
pub mod commands;
pub mod logging;
