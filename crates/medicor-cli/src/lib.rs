//! CLI library components for the theatre timestamp formatter.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
pub mod types;
