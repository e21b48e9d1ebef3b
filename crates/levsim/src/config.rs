//! Run configuration
//!
//! A `RunConfig` is read from a YAML file (every field optional) and then
//! overridden field by field from the command line:
//!
//! ```yaml
//! ticker: spy
//! leverage: 3.0
//! horizon_years: 23
//! path_count: 5000
//! seed: 42
//! ```

use std::fs;
use std::path::Path;

use levsim_core::SimulationParameters;
use levsim_core::model::TRADING_DAYS_PER_YEAR;
use serde::{Deserialize, Serialize};

use crate::storage::StorageError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub ticker: String,
    pub initial_price: f64,
    pub leverage: f64,
    pub horizon_years: u32,
    /// Years of history used for estimation; defaults to `horizon_years`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_years: Option<u32>,
    pub steps_per_year: u32,
    pub path_count: usize,
    /// Fixed RNG seed for reproducible runs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            ticker: "spy".to_string(),
            initial_price: 100.0,
            leverage: 3.0,
            horizon_years: 5,
            window_years: None,
            steps_per_year: TRADING_DAYS_PER_YEAR,
            path_count: 5_000,
            seed: None,
        }
    }
}

impl RunConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self, StorageError> {
        serde_saphyr::from_str(yaml)
            .map_err(|e| StorageError::Parse(format!("Failed to parse config: {}", e)))
    }

    pub fn to_yaml(&self) -> Result<String, StorageError> {
        serde_saphyr::to_string(self)
            .map_err(|e| StorageError::Serialize(format!("Failed to serialize config: {}", e)))
    }

    /// Load the config file
    pub fn load(path: &Path) -> Result<Self, StorageError> {
        let content = fs::read_to_string(path).map_err(|e| {
            StorageError::Io(format!("Failed to read config {}: {}", path.display(), e))
        })?;
        Self::from_yaml(&content)
    }

    pub fn estimation_window(&self) -> u32 {
        self.window_years.unwrap_or(self.horizon_years)
    }

    /// Simulation parameters without drift or volatility; those come from
    /// the historical estimate.
    pub fn base_parameters(&self) -> SimulationParameters {
        SimulationParameters {
            initial_price: self.initial_price,
            leverage: self.leverage,
            horizon_years: self.horizon_years,
            steps_per_year: self.steps_per_year,
            path_count: self.path_count,
            ..SimulationParameters::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = RunConfig::default();
        assert_eq!(config.ticker, "spy");
        assert_eq!(config.leverage, 3.0);
        assert_eq!(config.path_count, 5_000);
        assert_eq!(config.estimation_window(), 5);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = RunConfig::from_yaml("leverage: 2.0\nhorizon_years: 23\n").unwrap();

        assert_eq!(config.leverage, 2.0);
        assert_eq!(config.horizon_years, 23);
        assert_eq!(config.ticker, "spy");
        assert_eq!(config.steps_per_year, 252);
        assert_eq!(config.seed, None);
        assert_eq!(config.estimation_window(), 23);
    }

    #[test]
    fn test_yaml_round_trip() {
        let config = RunConfig {
            ticker: "qqq".to_string(),
            window_years: Some(10),
            seed: Some(42),
            ..RunConfig::default()
        };

        let yaml = config.to_yaml().unwrap();
        assert_eq!(RunConfig::from_yaml(&yaml).unwrap(), config);
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(matches!(
            RunConfig::from_yaml("leverage: [1, 2"),
            Err(StorageError::Parse(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("run.yaml");
        fs::write(&path, "ticker: tqqq\nwindow_years: 3\n").unwrap();

        let config = RunConfig::load(&path).unwrap();
        assert_eq!(config.ticker, "tqqq");
        assert_eq!(config.estimation_window(), 3);

        assert!(matches!(
            RunConfig::load(&temp_dir.path().join("missing.yaml")),
            Err(StorageError::Io(_))
        ));
    }

    #[test]
    fn test_base_parameters() {
        let config = RunConfig {
            initial_price: 50.0,
            leverage: 2.0,
            path_count: 10,
            ..RunConfig::default()
        };
        let params = config.base_parameters();

        assert_eq!(params.initial_price, 50.0);
        assert_eq!(params.leverage, 2.0);
        assert_eq!(params.horizon_years, 5);
        assert_eq!(params.path_count, 10);
        assert_eq!(params.annual_drift, 0.0);
    }
}
