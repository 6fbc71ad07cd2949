use crate::config::Calibration;
use crate::error::Result;
use crate::model::{AllocationLine, AllocationPlan, RiskTolerance, SectorRecord};
use crate::portfolio::PortfolioOptimizer;
use crate::stats::round_dp;

/// Splits a budget across sectors with the portfolio optimizer
pub struct SectorAllocator<'a> {
    optimizer: PortfolioOptimizer<'a>,
}

impl<'a> SectorAllocator<'a> {
    pub fn new(calibration: &'a Calibration) -> Self {
        Self {
            optimizer: PortfolioOptimizer::new(calibration),
        }
    }

    /// Allocate `budget` across the sector records.
    ///
    /// Covariance assumes a constant correlation between sectors. An empty
    /// record list is an `EmptyInput` error from the optimizer.
    pub fn allocate(
        &self,
        records: &[SectorRecord],
        budget: f64,
        risk_tolerance: RiskTolerance,
    ) -> Result<AllocationPlan> {
        let profiles = self.optimizer.calculate_sector_metrics(records);
        let covariance = self.optimizer.covariance_from_profiles(&profiles);
        let returns: Vec<f64> = profiles.iter().map(|p| p.avg_return).collect();

        let portfolio = self
            .optimizer
            .optimize_portfolio(&returns, &covariance, risk_tolerance)?;

        let mut lines: Vec<AllocationLine> = profiles
            .into_iter()
            .zip(&portfolio.weights)
            .map(|(profile, &weight)| AllocationLine {
                amount: round_dp(budget * weight, 2),
                percentage: round_dp(weight * 100.0, 2),
                expected_return: round_dp(profile.avg_return * 100.0, 2),
                weight,
                sector_name: profile.sector_name,
                sector_code: profile.sector_code,
            })
            .collect();
        lines.sort_by(|a, b| b.percentage.total_cmp(&a.percentage));

        Ok(AllocationPlan {
            budget,
            lines,
            portfolio,
        })
    }
}
