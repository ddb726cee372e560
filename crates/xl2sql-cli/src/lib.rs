//! Library side of the xl2sql command-line tool.

pub mod config;
pub mod logging;
pub mod pipeline;
