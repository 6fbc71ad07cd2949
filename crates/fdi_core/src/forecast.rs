//! Linear-trend forecasting, trend decomposition and multiple regression

use crate::config::{Calibration, ForecastPolicy};
use crate::error::{AnalyticsError, Result};
use crate::linalg::least_squares;
use crate::model::{
    FeatureMatrix, ForecastPoint, ForecastResult, HistoryPoint, RegressionResult,
    TimeSeriesPoint, TrendDecomposition,
};
use crate::stats::{mean, population_std, round_dp};

/// Fitted linear trend `value = intercept + slope · position`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendModel {
    pub slope: f64,
    pub intercept: f64,
    /// Population std of the fit residuals
    pub residual_std: f64,
}

impl TrendModel {
    pub fn value_at(&self, position: f64) -> f64 {
        self.intercept + self.slope * position
    }
}

/// Forecaster for a single macro indicator series
#[derive(Debug, Clone)]
pub struct TimeSeriesForecaster<'a> {
    policy: &'a ForecastPolicy,
    history: Vec<f64>,
    model: Option<TrendModel>,
}

impl<'a> TimeSeriesForecaster<'a> {
    pub fn new(calibration: &'a Calibration) -> Self {
        Self {
            policy: &calibration.forecast,
            history: Vec::new(),
            model: None,
        }
    }

    /// Fit a linear trend over the series sorted by period.
    ///
    /// Fewer than two points give a flat model through the single value
    /// (or 0) with no residual spread.
    pub fn fit(&mut self, series: &[TimeSeriesPoint]) -> &TrendModel {
        let values = sorted_values(series);

        let model = if values.len() < 2 {
            TrendModel {
                slope: 0.0,
                intercept: values.first().copied().unwrap_or(0.0),
                residual_std: 0.0,
            }
        } else {
            fit_line(&values)
        };

        self.history = values;
        self.model.insert(model)
    }

    /// Project the fitted trend `horizon` steps past the last observation.
    pub fn predict(&self, horizon: usize, confidence: f64) -> Result<ForecastResult> {
        let model = self.model.as_ref().ok_or(AnalyticsError::NotFitted)?;
        let n = self.history.len();
        let z = if confidence >= self.policy.high_confidence {
            self.policy.z_high
        } else {
            self.policy.z_low
        };

        let predictions = (1..=horizon)
            .map(|step| {
                let value = model.value_at((n + step - 1) as f64);
                let growth = 1.0 + (step - 1) as f64 / self.policy.spread_horizon;
                let spread = model.residual_std * z * growth.sqrt();
                ForecastPoint {
                    step,
                    value: value.max(0.0),
                    lower: (value - spread).max(0.0),
                    upper: (value + spread).max(0.0),
                    is_forecast: true,
                }
            })
            .collect();

        let history = self
            .history
            .iter()
            .enumerate()
            .map(|(step, value)| HistoryPoint {
                step,
                value: *value,
                is_forecast: false,
            })
            .collect();

        let history_mean = mean(&self.history);
        let accuracy = if history_mean > 0.0 {
            round_dp((1.0 - model.residual_std / history_mean) * 100.0, 1)
        } else {
            0.0
        };

        Ok(ForecastResult {
            history,
            predictions,
            accuracy,
        })
    }

    /// Split a series into centred moving-average trend, per-phase seasonal
    /// component and residual.
    pub fn decompose_trend(&self, series: &[TimeSeriesPoint], period: usize) -> TrendDecomposition {
        decompose(&sorted_values(series), period)
    }

    /// Ordinary least squares of `target` on the features plus an intercept.
    pub fn regression_forecast(
        &self,
        features: &FeatureMatrix,
        target: &[f64],
    ) -> Result<RegressionResult> {
        if target.is_empty() {
            return Err(AnalyticsError::EmptyInput("regression target"));
        }
        if features.rows.len() != target.len() {
            return Err(AnalyticsError::DimensionMismatch {
                context: "regression rows",
                expected: target.len(),
                actual: features.rows.len(),
            });
        }
        if let Some(row) = features.rows.iter().find(|r| r.len() != features.names.len()) {
            return Err(AnalyticsError::DimensionMismatch {
                context: "regression columns",
                expected: features.names.len(),
                actual: row.len(),
            });
        }

        let design: Vec<Vec<f64>> = features
            .rows
            .iter()
            .map(|row| std::iter::once(1.0).chain(row.iter().copied()).collect())
            .collect();
        let coefficients = least_squares(&design, target);

        let fitted: Vec<f64> = design
            .iter()
            .map(|row| row.iter().zip(&coefficients).map(|(x, b)| x * b).sum())
            .collect();

        let target_mean = mean(target);
        let ss_res: f64 = target.iter().zip(&fitted).map(|(y, f)| (y - f).powi(2)).sum();
        let ss_tot: f64 = target.iter().map(|y| (y - target_mean).powi(2)).sum();
        let r_squared = if ss_tot > 0.0 { 1.0 - ss_res / ss_tot } else { 0.0 };

        let feature_names = std::iter::once("intercept".to_string())
            .chain(features.names.iter().cloned())
            .collect();

        Ok(RegressionResult {
            coefficients,
            r_squared,
            fitted,
            feature_names,
        })
    }
}

fn sorted_values(series: &[TimeSeriesPoint]) -> Vec<f64> {
    let mut points = series.to_vec();
    points.sort_by_key(|p| p.period);
    points.into_iter().map(|p| p.value).collect()
}

/// OLS line over positions `0..n`
fn fit_line(values: &[f64]) -> TrendModel {
    let n = values.len() as f64;
    let x_mean = (n - 1.0) / 2.0;
    let y_mean = mean(values);

    let (sxy, sxx) = values
        .iter()
        .enumerate()
        .fold((0.0, 0.0), |(sxy, sxx), (i, y)| {
            let dx = i as f64 - x_mean;
            (sxy + dx * (y - y_mean), sxx + dx * dx)
        });
    let slope = if sxx > 0.0 { sxy / sxx } else { 0.0 };
    let intercept = y_mean - slope * x_mean;

    let residuals: Vec<f64> = values
        .iter()
        .enumerate()
        .map(|(i, y)| y - (intercept + slope * i as f64))
        .collect();

    TrendModel {
        slope,
        intercept,
        residual_std: population_std(&residuals),
    }
}

pub(crate) fn decompose(values: &[f64], period: usize) -> TrendDecomposition {
    let n = values.len();
    if n == 0 {
        return TrendDecomposition {
            trend: Vec::new(),
            seasonal: Vec::new(),
            residual: Vec::new(),
        };
    }
    let period = period.clamp(1, n);
    let half = period / 2;

    // Zero-padded "same" convolution with a flat kernel of width `period`
    let mut trend: Vec<f64> = (0..n)
        .map(|i| {
            let start = i as isize - half as isize;
            let window: f64 = (start..start + period as isize)
                .filter(|j| *j >= 0 && (*j as usize) < n)
                .map(|j| values[j as usize])
                .sum();
            window / period as f64
        })
        .collect();

    if half > 0 {
        let head = trend[half];
        trend[..half].fill(head);
        let tail = trend[n - half - 1];
        trend[n - half..].fill(tail);
    }

    // `period <= n`, so every phase has at least one member
    let deviation: Vec<f64> = values.iter().zip(&trend).map(|(v, t)| v - t).collect();
    let phase_means: Vec<f64> = (0..period)
        .map(|phase| {
            let members: Vec<f64> = deviation.iter().skip(phase).step_by(period).copied().collect();
            mean(&members)
        })
        .collect();
    let seasonal: Vec<f64> = (0..n).map(|i| phase_means[i % period]).collect();

    let residual = values
        .iter()
        .zip(&trend)
        .zip(&seasonal)
        .map(|((v, t), s)| v - t - s)
        .collect();

    TrendDecomposition {
        trend,
        seasonal,
        residual,
    }
}
