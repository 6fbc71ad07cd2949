//! Tests for the time series forecaster
//!
//! These tests verify that:
//! - A strictly linear series is continued along its slope with no spread
//! - Predicting before fitting is an error
//! - Inputs are sorted by period before fitting
//! - Decomposition components add back up to the series
//! - Multiple regression recovers exact coefficients
//! - A duplicated feature leaves the fit of the remaining columns unchanged

use jiff::civil::date;

use crate::config::Calibration;
use crate::error::AnalyticsError;
use crate::forecast::TimeSeriesForecaster;
use crate::model::{FeatureMatrix, TimeSeriesPoint};

fn yearly(values: &[f64]) -> Vec<TimeSeriesPoint> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| TimeSeriesPoint::new(date(2000 + i as i16, 1, 1), *v))
        .collect()
}

#[test]
fn test_linear_series_continues_slope() {
    let calibration = Calibration::default();
    let mut forecaster = TimeSeriesForecaster::new(&calibration);
    let series = yearly(&(0..10).map(|i| 10.0 + 2.0 * i as f64).collect::<Vec<_>>());

    let model = *forecaster.fit(&series);
    assert!((model.slope - 2.0).abs() < 1e-9);
    assert!((model.intercept - 10.0).abs() < 1e-9);
    assert!(model.residual_std < 1e-9);

    let result = forecaster.predict(3, 0.95).unwrap();
    assert_eq!(result.predictions.len(), 3);
    for (i, point) in result.predictions.iter().enumerate() {
        let expected = 10.0 + 2.0 * (10 + i) as f64;
        assert!(
            (point.value - expected).abs() < 1e-6,
            "step {} expected {expected}, got {}",
            point.step,
            point.value
        );
        assert!((point.upper - point.lower).abs() < 1e-6, "zero residuals give no spread");
        assert!(point.is_forecast);
    }

    assert_eq!(result.history.len(), 10);
    assert!(result.history.iter().all(|h| !h.is_forecast));
    assert_eq!(result.accuracy, 100.0);
}

#[test]
fn test_predict_before_fit_fails() {
    let calibration = Calibration::default();
    let forecaster = TimeSeriesForecaster::new(&calibration);

    assert_eq!(forecaster.predict(5, 0.95), Err(AnalyticsError::NotFitted));
}

#[test]
fn test_fit_sorts_by_period() {
    let calibration = Calibration::default();
    let mut forecaster = TimeSeriesForecaster::new(&calibration);
    let mut series = yearly(&[1.0, 2.0, 3.0, 4.0]);
    series.reverse();

    let model = *forecaster.fit(&series);
    assert!((model.slope - 1.0).abs() < 1e-9);
}

#[test]
fn test_single_point_gives_flat_model() {
    let calibration = Calibration::default();
    let mut forecaster = TimeSeriesForecaster::new(&calibration);

    let model = *forecaster.fit(&yearly(&[7.5]));
    assert_eq!(model.slope, 0.0);
    assert_eq!(model.intercept, 7.5);
    assert_eq!(model.residual_std, 0.0);

    let result = forecaster.predict(2, 0.9).unwrap();
    assert!(result.predictions.iter().all(|p| p.value == 7.5));
}

#[test]
fn test_bands_widen_and_use_confidence_tier() {
    let calibration = Calibration::default();
    let mut forecaster = TimeSeriesForecaster::new(&calibration);
    forecaster.fit(&yearly(&[100.0, 104.0, 101.0, 108.0, 106.0, 111.0]));

    let high = forecaster.predict(4, 0.95).unwrap();
    let low = forecaster.predict(4, 0.80).unwrap();

    let width = |p: &crate::model::ForecastPoint| p.upper - p.lower;
    for pair in high.predictions.windows(2) {
        assert!(width(&pair[1]) > width(&pair[0]));
    }
    // 1.96 against 1.645
    let ratio = width(&high.predictions[0]) / width(&low.predictions[0]);
    assert!((ratio - 1.96 / 1.645).abs() < 1e-9);
}

#[test]
fn test_forecast_is_floored_at_zero() {
    let calibration = Calibration::default();
    let mut forecaster = TimeSeriesForecaster::new(&calibration);
    forecaster.fit(&yearly(&[10.0, 6.0, 2.0]));

    let result = forecaster.predict(3, 0.95).unwrap();
    for point in &result.predictions {
        assert!(point.value >= 0.0 && point.lower >= 0.0 && point.upper >= 0.0);
    }
}

#[test]
fn test_accuracy_zero_for_non_positive_mean() {
    let calibration = Calibration::default();
    let mut forecaster = TimeSeriesForecaster::new(&calibration);
    forecaster.fit(&yearly(&[-1.0, 1.0, -1.0, 1.0]));

    let result = forecaster.predict(1, 0.95).unwrap();
    assert_eq!(result.accuracy, 0.0);
    assert!(result.accuracy.is_finite());
}

#[test]
fn test_decomposition_components_sum_to_series() {
    let calibration = Calibration::default();
    let forecaster = TimeSeriesForecaster::new(&calibration);
    let values = [12.0, 15.0, 11.0, 18.0, 13.0, 16.0, 12.0, 19.0, 14.0, 17.0];

    let parts = forecaster.decompose_trend(&yearly(&values), 4);

    assert_eq!(parts.trend.len(), values.len());
    for i in 0..values.len() {
        let rebuilt = parts.trend[i] + parts.seasonal[i] + parts.residual[i];
        assert!((rebuilt - values[i]).abs() < 1e-9);
    }
    // Seasonal repeats with the period
    assert_eq!(parts.seasonal[0], parts.seasonal[4]);
    assert_eq!(parts.seasonal[1], parts.seasonal[5]);
}

#[test]
fn test_decomposition_edges_replicate_nearest_value() {
    let calibration = Calibration::default();
    let forecaster = TimeSeriesForecaster::new(&calibration);
    let parts = forecaster.decompose_trend(&yearly(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]), 3);

    assert_eq!(parts.trend[0], parts.trend[1]);
    assert_eq!(parts.trend[6], parts.trend[5]);
    assert!((parts.trend[3] - 4.0).abs() < 1e-12);
}

#[test]
fn test_decomposition_period_clamped_to_length() {
    let calibration = Calibration::default();
    let forecaster = TimeSeriesForecaster::new(&calibration);

    let parts = forecaster.decompose_trend(&yearly(&[3.0, 5.0]), 12);
    assert_eq!(parts.trend.len(), 2);
    assert!(parts.residual.iter().all(|r| r.is_finite()));

    let empty = forecaster.decompose_trend(&[], 4);
    assert!(empty.trend.is_empty());
}

#[test]
fn test_regression_recovers_coefficients() {
    let calibration = Calibration::default();
    let forecaster = TimeSeriesForecaster::new(&calibration);
    let rows = vec![
        vec![1.0, 0.0],
        vec![2.0, 1.0],
        vec![3.0, 1.0],
        vec![4.0, 3.0],
        vec![5.0, 2.0],
    ];
    let target: Vec<f64> = rows.iter().map(|r| 1.0 + 2.0 * r[0] + 3.0 * r[1]).collect();
    let features = FeatureMatrix::new(vec!["gdp".into(), "inflation".into()], rows);

    let result = forecaster.regression_forecast(&features, &target).unwrap();

    assert_eq!(result.feature_names, vec!["intercept", "gdp", "inflation"]);
    for (actual, expected) in result.coefficients.iter().zip([1.0, 2.0, 3.0]) {
        assert!((actual - expected).abs() < 1e-8, "{actual} vs {expected}");
    }
    assert!((result.r_squared - 1.0).abs() < 1e-9);
    assert_eq!(result.fitted.len(), target.len());
}

#[test]
fn test_regression_dimension_checks() {
    let calibration = Calibration::default();
    let forecaster = TimeSeriesForecaster::new(&calibration);
    let features = FeatureMatrix::new(vec!["x".into()], vec![vec![1.0], vec![2.0]]);

    let err = forecaster.regression_forecast(&features, &[1.0, 2.0, 3.0]).unwrap_err();
    assert!(matches!(err, AnalyticsError::DimensionMismatch { context: "regression rows", .. }));

    let ragged = FeatureMatrix::new(vec!["x".into()], vec![vec![1.0], vec![2.0, 5.0]]);
    let err = forecaster.regression_forecast(&ragged, &[1.0, 2.0]).unwrap_err();
    assert!(matches!(err, AnalyticsError::DimensionMismatch { context: "regression columns", .. }));

    let err = forecaster.regression_forecast(&FeatureMatrix::default(), &[]).unwrap_err();
    assert_eq!(err, AnalyticsError::EmptyInput("regression target"));
}

#[test]
fn test_regression_constant_target_has_zero_r_squared() {
    let calibration = Calibration::default();
    let forecaster = TimeSeriesForecaster::new(&calibration);
    let features = FeatureMatrix::new(vec!["x".into()], vec![vec![1.0], vec![2.0], vec![3.0]]);

    let result = forecaster.regression_forecast(&features, &[4.0, 4.0, 4.0]).unwrap();
    assert_eq!(result.r_squared, 0.0);
}

#[test]
fn test_regression_duplicate_feature_matches_reduced_fit() {
    let calibration = Calibration::default();
    let forecaster = TimeSeriesForecaster::new(&calibration);
    let xs = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
    let noise = [0.4, -0.3, 0.2, -0.5, 0.1, 0.35, -0.25];
    let target: Vec<f64> = xs
        .iter()
        .zip(noise)
        .map(|(x, e)| 1.0 + 2.0 * x + 0.5 * x * x + e)
        .collect();

    let with_duplicate = FeatureMatrix::new(
        vec!["x".into(), "x_copy".into(), "x_sq".into()],
        xs.iter().map(|x| vec![*x, *x, x * x]).collect(),
    );
    let reduced = FeatureMatrix::new(
        vec!["x".into(), "x_sq".into()],
        xs.iter().map(|x| vec![*x, x * x]).collect(),
    );

    let full = forecaster.regression_forecast(&with_duplicate, &target).unwrap();
    let expected = forecaster.regression_forecast(&reduced, &target).unwrap();

    assert!((full.r_squared - expected.r_squared).abs() < 1e-10);
    for (a, b) in full.fitted.iter().zip(&expected.fitted) {
        assert!((a - b).abs() < 1e-8, "{a} vs {b}");
    }
    assert_eq!(full.coefficients[2], 0.0);
    assert!((full.coefficients[3] - expected.coefficients[2]).abs() < 1e-8);
}
