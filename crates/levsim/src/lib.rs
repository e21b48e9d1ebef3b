//! Command-line front end for the levsim simulator
//!
//! This crate wires `levsim_core` to the outside world:
//! - Importing daily price histories from Alpha Vantage JSON documents
//! - Caching imported series as JSON files in the data directory
//! - YAML run configuration with command-line overrides
//! - File logging and a plain-text report

pub mod alpha_vantage;
pub mod config;
pub mod logging;
pub mod report;
pub mod storage;
pub mod util;

pub use alpha_vantage::{ImportError, load_daily_file, parse_daily_document};
pub use config::RunConfig;
pub use logging::init_logging;
pub use storage::{JsonFileCache, StorageError};
