//! Sector risk/return and allocation types

use serde::{Deserialize, Serialize};

use crate::error::{AnalyticsError, Result};
use crate::portfolio::solver::TerminationReason;

/// Sector reference record supplied by the caller
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SectorRecord {
    pub name: String,
    pub code: String,
    /// Average annual return; calibrated default when absent
    #[serde(default)]
    pub avg_return_rate: Option<f64>,
    /// 0-100 risk score; calibrated default when absent
    #[serde(default)]
    pub risk_score: Option<f64>,
    #[serde(default)]
    pub total_investment: f64,
    #[serde(default)]
    pub investment_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskReturnProfile {
    pub sector_name: String,
    pub sector_code: String,
    pub avg_return: f64,
    pub volatility: f64,
    pub sharpe_ratio: f64,
    pub beta: f64,
    pub total_investment: f64,
    pub investment_count: u64,
}

/// Historical returns of one sector
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReturnSeries {
    pub sector: String,
    pub returns: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub sectors: Vec<String>,
    pub matrix: Vec<Vec<f64>>,
}

/// Square symmetric covariance matrix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct CovarianceMatrix {
    rows: Vec<Vec<f64>>,
}

impl CovarianceMatrix {
    const SYMMETRY_TOLERANCE: f64 = 1e-9;

    /// Build from rows, rejecting non-square or asymmetric input
    pub fn new(rows: Vec<Vec<f64>>) -> Result<Self> {
        let n = rows.len();
        for row in &rows {
            if row.len() != n {
                return Err(AnalyticsError::DimensionMismatch {
                    context: "covariance row",
                    expected: n,
                    actual: row.len(),
                });
            }
        }
        for i in 0..n {
            for j in (i + 1)..n {
                if (rows[i][j] - rows[j][i]).abs() > Self::SYMMETRY_TOLERANCE {
                    return Err(AnalyticsError::AsymmetricCovariance { row: i, col: j });
                }
            }
        }
        Ok(Self { rows })
    }

    /// Diagonal matrix of the given variances
    pub fn diagonal(variances: &[f64]) -> Self {
        let n = variances.len();
        let mut rows = vec![vec![0.0; n]; n];
        for (i, v) in variances.iter().enumerate() {
            rows[i][i] = *v;
        }
        Self { rows }
    }

    /// `ρ·σᵢ·σⱼ` off the diagonal, `σᵢ²` on it
    pub fn constant_correlation(volatilities: &[f64], rho: f64) -> Self {
        let rows = volatilities
            .iter()
            .enumerate()
            .map(|(i, vi)| {
                volatilities
                    .iter()
                    .enumerate()
                    .map(|(j, vj)| if i == j { vi * vi } else { rho * vi * vj })
                    .collect()
            })
            .collect();
        Self { rows }
    }

    pub fn dim(&self) -> usize {
        self.rows.len()
    }

    /// `wᵀΣw`
    pub fn quadratic_form(&self, weights: &[f64]) -> f64 {
        self.rows
            .iter()
            .zip(weights)
            .map(|(row, wi)| wi * row.iter().zip(weights).map(|(c, wj)| c * wj).sum::<f64>())
            .sum()
    }

    /// `Σw`
    pub fn mul_vec(&self, weights: &[f64]) -> Vec<f64> {
        self.rows
            .iter()
            .map(|row| row.iter().zip(weights).map(|(c, w)| c * w).sum())
            .collect()
    }

    /// Largest absolute row sum; an upper bound on the spectral radius
    pub fn gershgorin_bound(&self) -> f64 {
        self.rows
            .iter()
            .map(|row| row.iter().map(|c| c.abs()).sum::<f64>())
            .fold(0.0_f64, f64::max)
    }
}

impl TryFrom<Vec<Vec<f64>>> for CovarianceMatrix {
    type Error = AnalyticsError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self> {
        Self::new(rows)
    }
}

impl From<CovarianceMatrix> for Vec<Vec<f64>> {
    fn from(matrix: CovarianceMatrix) -> Self {
        matrix.rows
    }
}

/// Risk appetite label used to pick a target return
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTolerance {
    Conservative,
    #[default]
    Moderate,
    Aggressive,
}

impl RiskTolerance {
    /// Parse a label; anything unrecognized is `Moderate`
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "conservative" => Self::Conservative,
            "aggressive" => Self::Aggressive,
            _ => Self::Moderate,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioAllocation {
    /// One weight per sector, in input order
    pub weights: Vec<f64>,
    pub expected_return: f64,
    pub risk: f64,
    pub sharpe_ratio: f64,
    pub target_return: f64,
    /// The solver met every constraint
    pub converged: bool,
    /// Weights are the equal-weight fallback
    pub fallback_used: bool,
    pub termination: TerminationReason,
    pub iterations: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrontierPoint {
    pub risk: f64,
    pub expected_return: f64,
    pub weights: Vec<f64>,
}
