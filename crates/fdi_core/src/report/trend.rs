use crate::config::Calibration;
use crate::forecast::TimeSeriesForecaster;
use crate::model::{TimeSeriesPoint, TrendDecomposition};

pub struct TrendReporter<'a> {
    forecaster: TimeSeriesForecaster<'a>,
    max_period: usize,
}

impl<'a> TrendReporter<'a> {
    pub fn new(calibration: &'a Calibration) -> Self {
        Self {
            forecaster: TimeSeriesForecaster::new(calibration),
            max_period: calibration.reports.max_decomposition_period,
        }
    }

    /// Decomposition with a quarterly period, shortened for short series.
    pub fn decomposition(&self, series: &[TimeSeriesPoint]) -> TrendDecomposition {
        let period = self.max_period.min(series.len());
        self.forecaster.decompose_trend(series, period)
    }
}
