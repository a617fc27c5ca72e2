//! Library side of the `covid-trends` binary.

pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod pipeline;
pub mod summary;
