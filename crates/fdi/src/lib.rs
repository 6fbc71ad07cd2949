//! Command-line front end for the FDI analytics engine
//!
//! Loads calibration and input records from YAML, runs one analysis from
//! `fdi_core` and renders a plain-text report.

pub mod cli;
pub mod commands;
pub mod inputs;
pub mod logging;

mod format;

pub use logging::init_logging;
