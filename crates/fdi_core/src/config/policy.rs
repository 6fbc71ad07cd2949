//! Scalar policy constants for each component

use serde::{Deserialize, Serialize};

use crate::config::sectors::RevenueProfile;
use crate::model::RiskTolerance;
use crate::portfolio::solver::SolverSettings;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastPolicy {
    /// Confidence at or above which the wide z-score applies
    pub high_confidence: f64,
    pub z_high: f64,
    pub z_low: f64,
    /// Steps over which the spread grows by a factor of √2
    pub spread_horizon: f64,
}

impl Default for ForecastPolicy {
    fn default() -> Self {
        Self {
            high_confidence: 0.95,
            z_high: 1.96,
            z_low: 1.645,
            spread_horizon: 12.0,
        }
    }
}

/// Shares used by the indirect/induced cascade and job splits
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImpactPolicy {
    pub supply_chain_share: f64,
    pub indirect_employment_share: f64,
    pub induced_income_share: f64,
    pub induced_employment_share: f64,
    pub default_female_share: f64,
    pub construction_share: f64,
    pub operational_share: f64,
}

impl Default for ImpactPolicy {
    fn default() -> Self {
        Self {
            supply_chain_share: 0.6,
            indirect_employment_share: 0.55,
            induced_income_share: 0.4,
            induced_employment_share: 0.5,
            default_female_share: 0.30,
            construction_share: 0.3,
            operational_share: 0.7,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxPolicy {
    pub standard_corporate_rate: f64,
    /// Corporate rate inside an SEZ unless the incentive package overrides it
    pub sez_holiday_rate: f64,
    /// Annual revenue as a share of `amount × output multiplier`
    pub revenue_factor: f64,
    pub profit_margin: f64,
    pub vat_rate: f64,
    pub average_salary: f64,
    pub paye_rate: f64,
    pub withholding_rate: f64,
}

impl Default for TaxPolicy {
    fn default() -> Self {
        Self {
            standard_corporate_rate: 0.2575,
            sez_holiday_rate: 0.0,
            revenue_factor: 0.3,
            profit_margin: 0.15,
            vat_rate: 0.075,
            average_salary: 8_000.0,
            paye_rate: 0.25,
            withholding_rate: 0.02,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortfolioPolicy {
    /// Local T-bill rate
    pub risk_free_rate: f64,
    pub default_return: f64,
    pub default_risk_score: f64,
    /// Volatility at a risk score of 100
    pub volatility_scale: f64,
    pub min_weight: f64,
    pub max_weight: f64,
    pub conservative_multiplier: f64,
    pub moderate_multiplier: f64,
    pub aggressive_multiplier: f64,
    /// Pairwise correlation assumed when only volatilities are known
    pub default_correlation: f64,
    pub solver: SolverSettings,
}

impl PortfolioPolicy {
    pub fn risk_multiplier(&self, tolerance: RiskTolerance) -> f64 {
        match tolerance {
            RiskTolerance::Conservative => self.conservative_multiplier,
            RiskTolerance::Moderate => self.moderate_multiplier,
            RiskTolerance::Aggressive => self.aggressive_multiplier,
        }
    }
}

impl Default for PortfolioPolicy {
    fn default() -> Self {
        Self {
            risk_free_rate: 0.08,
            default_return: 0.10,
            default_risk_score: 50.0,
            volatility_scale: 0.3,
            min_weight: 0.02,
            max_weight: 0.40,
            conservative_multiplier: 0.3,
            moderate_multiplier: 0.6,
            aggressive_multiplier: 1.0,
            default_correlation: 0.3,
            solver: SolverSettings::default(),
        }
    }
}

/// Constants used only by the report coordinators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportPolicy {
    /// GDP value added as a share of economic output
    pub gdp_share: f64,
    pub forex_share: f64,
    pub sez_job_uplift: f64,
    pub default_holiday_years: u32,
    /// First-year revenue as a share of the investment
    pub base_revenue_share: f64,
    pub default_discount_rate: f64,
    pub npv_rates: Vec<f64>,
    pub roi_years: u32,
    pub gdp_years: u32,
    pub default_revenue: RevenueProfile,
    pub simulation_paths: usize,
    pub simulation_years: u32,
    pub proactive_threshold: f64,
    pub proactive_limit: usize,
    pub max_decomposition_period: usize,
    /// Investor countries listed per investment cluster
    pub cluster_origin_limit: usize,
}

impl Default for ReportPolicy {
    fn default() -> Self {
        Self {
            gdp_share: 0.1,
            forex_share: 0.3,
            sez_job_uplift: 1.1,
            default_holiday_years: 5,
            base_revenue_share: 0.25,
            default_discount_rate: 0.10,
            npv_rates: vec![0.08, 0.10, 0.12, 0.15],
            roi_years: 10,
            gdp_years: 10,
            default_revenue: RevenueProfile::default(),
            simulation_paths: 5_000,
            simulation_years: 5,
            proactive_threshold: 40.0,
            proactive_limit: 10,
            max_decomposition_period: 4,
            cluster_origin_limit: 5,
        }
    }
}
