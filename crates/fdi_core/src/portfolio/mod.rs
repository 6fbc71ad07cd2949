//! Sector risk/return profiling and mean-variance allocation

pub mod solver;

use tracing::{debug, warn};

use crate::config::{Calibration, PortfolioPolicy};
use crate::error::{AnalyticsError, Result};
use crate::model::{
    CorrelationMatrix, CovarianceMatrix, FrontierPoint, PortfolioAllocation, ReturnSeries,
    RiskReturnProfile, RiskTolerance, SectorRecord,
};
use crate::stats::{mean, pearson};

use solver::{
    MinVarianceProblem, ReturnConstraint, SolverOutcome, TerminationReason, WeightBounds,
    solve_min_variance,
};

pub struct PortfolioOptimizer<'a> {
    policy: &'a PortfolioPolicy,
}

impl<'a> PortfolioOptimizer<'a> {
    pub fn new(calibration: &'a Calibration) -> Self {
        Self {
            policy: &calibration.portfolio,
        }
    }

    /// Volatility, Sharpe ratio and beta for each sector record.
    pub fn calculate_sector_metrics(&self, records: &[SectorRecord]) -> Vec<RiskReturnProfile> {
        let policy = self.policy;
        let rf = policy.risk_free_rate;
        let returns: Vec<f64> = records
            .iter()
            .map(|r| r.avg_return_rate.unwrap_or(policy.default_return))
            .collect();
        let market_return = if returns.is_empty() {
            policy.default_return
        } else {
            mean(&returns)
        };
        let market_excess = market_return - rf;

        records
            .iter()
            .zip(&returns)
            .map(|(record, &ret)| {
                let risk = record.risk_score.unwrap_or(policy.default_risk_score);
                let volatility = (risk / 100.0 * policy.volatility_scale).max(0.0);
                let sharpe_ratio = if volatility > 0.0 {
                    (ret - rf) / volatility
                } else {
                    0.0
                };
                let beta = if market_excess != 0.0 {
                    (ret - rf) / market_excess
                } else {
                    1.0
                };

                RiskReturnProfile {
                    sector_name: record.name.clone(),
                    sector_code: record.code.clone(),
                    avg_return: ret,
                    volatility,
                    sharpe_ratio,
                    beta,
                    total_investment: record.total_investment,
                    investment_count: record.investment_count,
                }
            })
            .collect()
    }

    /// Pairwise Pearson correlation, each pair truncated to the shorter series.
    pub fn compute_correlation_matrix(&self, series: &[ReturnSeries]) -> CorrelationMatrix {
        let n = series.len();
        let mut matrix = vec![vec![0.0; n]; n];
        for i in 0..n {
            matrix[i][i] = 1.0;
            for j in (i + 1)..n {
                let rho = pearson(&series[i].returns, &series[j].returns);
                matrix[i][j] = rho;
                matrix[j][i] = rho;
            }
        }

        CorrelationMatrix {
            sectors: series.iter().map(|s| s.sector.clone()).collect(),
            matrix,
        }
    }

    /// Covariance under a constant pairwise correlation.
    pub fn covariance_from_profiles(&self, profiles: &[RiskReturnProfile]) -> CovarianceMatrix {
        let vols: Vec<f64> = profiles.iter().map(|p| p.volatility).collect();
        CovarianceMatrix::constant_correlation(&vols, self.policy.default_correlation)
    }

    /// Minimum-volatility weights that reach the tolerance's target return.
    ///
    /// Falls back to equal weights when the solver fails; the allocation is
    /// flagged and a warning is logged, but no error is returned.
    pub fn optimize_portfolio(
        &self,
        expected_returns: &[f64],
        covariance: &CovarianceMatrix,
        risk_tolerance: RiskTolerance,
    ) -> Result<PortfolioAllocation> {
        check_dimensions(expected_returns, covariance)?;

        let (lo, hi) = return_range(expected_returns);
        let target_return = lo + self.policy.risk_multiplier(risk_tolerance) * (hi - lo);
        let problem = MinVarianceProblem {
            covariance,
            expected_returns,
            target_return,
            constraint: ReturnConstraint::AtLeast,
            bounds: WeightBounds::new(self.policy.min_weight, self.policy.max_weight),
        };
        let outcome = solve_min_variance(&problem, &self.policy.solver);

        let converged = outcome.converged();
        let SolverOutcome {
            weights,
            termination,
            iterations,
            constraint_violation,
        } = outcome;
        let weights = if converged {
            weights
        } else {
            warn!(
                ?termination,
                iterations,
                constraint_violation,
                target_return,
                "portfolio solver failed, using equal weights"
            );
            vec![1.0 / expected_returns.len() as f64; expected_returns.len()]
        };

        let expected_return = dot(&weights, expected_returns);
        let risk = volatility(covariance, &weights);
        let sharpe_ratio = if risk > 0.0 {
            (expected_return - self.policy.risk_free_rate) / risk
        } else {
            0.0
        };

        Ok(PortfolioAllocation {
            weights,
            expected_return,
            risk,
            sharpe_ratio,
            target_return,
            converged,
            fallback_used: !converged,
            termination,
            iterations,
        })
    }

    /// Minimum-variance portfolios for targets spaced evenly between the
    /// lowest and highest expected return. Targets the solver cannot meet
    /// are left out.
    pub fn efficient_frontier(
        &self,
        expected_returns: &[f64],
        covariance: &CovarianceMatrix,
        num_portfolios: usize,
    ) -> Result<Vec<FrontierPoint>> {
        check_dimensions(expected_returns, covariance)?;

        let (lo, hi) = return_range(expected_returns);
        let points = (0..num_portfolios)
            .filter_map(|k| {
                let target_return = if num_portfolios > 1 {
                    lo + (hi - lo) * k as f64 / (num_portfolios - 1) as f64
                } else {
                    lo
                };
                let problem = MinVarianceProblem {
                    covariance,
                    expected_returns,
                    target_return,
                    constraint: ReturnConstraint::Exactly,
                    bounds: WeightBounds::new(0.0, 1.0),
                };
                let outcome = solve_min_variance(&problem, &self.policy.solver);
                if outcome.termination != TerminationReason::Converged {
                    debug!(target_return, termination = ?outcome.termination, "skipping frontier point");
                    return None;
                }

                Some(FrontierPoint {
                    risk: volatility(covariance, &outcome.weights),
                    expected_return: dot(&outcome.weights, expected_returns),
                    weights: outcome.weights,
                })
            })
            .collect();

        Ok(points)
    }
}

fn check_dimensions(expected_returns: &[f64], covariance: &CovarianceMatrix) -> Result<()> {
    if expected_returns.is_empty() {
        return Err(AnalyticsError::EmptyInput("expected returns"));
    }
    if covariance.dim() != expected_returns.len() {
        return Err(AnalyticsError::DimensionMismatch {
            context: "covariance",
            expected: expected_returns.len(),
            actual: covariance.dim(),
        });
    }
    Ok(())
}

fn return_range(returns: &[f64]) -> (f64, f64) {
    returns
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), r| (lo.min(*r), hi.max(*r)))
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

fn volatility(covariance: &CovarianceMatrix, weights: &[f64]) -> f64 {
    covariance.quadratic_form(weights).max(0.0).sqrt()
}
