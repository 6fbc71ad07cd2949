//! Time series inputs and forecast outputs

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

/// A single observation of a macro indicator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub period: Date,
    pub value: f64,
}

impl TimeSeriesPoint {
    pub fn new(period: Date, value: f64) -> Self {
        Self { period, value }
    }
}

/// Observed value echoed back alongside a forecast
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    /// 0-based position in the sorted history
    pub step: usize,
    pub value: f64,
    pub is_forecast: bool,
}

/// Projected value with its confidence band
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    /// 1-based steps past the last observation
    pub step: usize,
    pub value: f64,
    pub lower: f64,
    pub upper: f64,
    pub is_forecast: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub history: Vec<HistoryPoint>,
    pub predictions: Vec<ForecastPoint>,
    /// Percentage; 0 when the history mean is not positive
    pub accuracy: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendDecomposition {
    pub trend: Vec<f64>,
    pub seasonal: Vec<f64>,
    pub residual: Vec<f64>,
}

/// Named regressors, one row per observation
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FeatureMatrix {
    pub names: Vec<String>,
    pub rows: Vec<Vec<f64>>,
}

impl FeatureMatrix {
    pub fn new(names: Vec<String>, rows: Vec<Vec<f64>>) -> Self {
        Self { names, rows }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionResult {
    /// Intercept first, then one coefficient per feature
    pub coefficients: Vec<f64>,
    pub r_squared: f64,
    pub fitted: Vec<f64>,
    pub feature_names: Vec<String>,
}
